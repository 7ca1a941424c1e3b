use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::proficiency::{Difficulty, ResourceKind};

/// Default number of resources recommended per gap skill.
pub const DEFAULT_RESOURCES_PER_GAP: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningResource {
    pub id: Uuid,
    pub skill_id: Uuid,
    pub title: String,
    pub url: String,
    pub kind: ResourceKind,
    pub difficulty: Difficulty,
    pub estimated_hours: u32,
    pub is_free: bool,
}

/// Resources keyed by the skill they teach, in catalog order.
pub type ResourceCatalog = HashMap<Uuid, Vec<LearningResource>>;

/// Picks up to `cap` resources for a skill: free before paid, then shortest first.
/// The sort is stable, so equal entries keep catalog order.
pub fn select_resources(
    catalog: &ResourceCatalog,
    skill_id: Uuid,
    cap: usize,
) -> Vec<LearningResource> {
    let Some(available) = catalog.get(&skill_id) else {
        return vec![];
    };

    let mut ranked: Vec<&LearningResource> = available.iter().collect();
    ranked.sort_by_key(|r| (!r.is_free, r.estimated_hours));
    ranked.into_iter().take(cap).cloned().collect()
}
