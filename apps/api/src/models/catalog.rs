use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::analysis::analyzer::RequiredSkill;
use crate::analysis::proficiency::ParseLevelError;
use crate::analysis::resources::LearningResource;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillRow {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub description: String,
    pub difficulty: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompanyRow {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub headquarters: String,
}

/// A role joined with the name of the company offering it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoleRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub company_name: String,
    pub title: String,
    pub description: String,
    pub salary_range: Option<String>,
    pub required_experience: Option<String>,
}

/// A role requirement joined with its skill.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RequirementRow {
    pub skill_id: Uuid,
    pub skill_name: String,
    pub min_level: String,
    pub is_mandatory: bool,
    pub difficulty: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResourceRow {
    pub id: Uuid,
    pub skill_id: Uuid,
    pub title: String,
    pub url: String,
    pub kind: String,
    pub difficulty: String,
    pub estimated_hours: i32,
    pub is_free: bool,
}

impl TryFrom<RequirementRow> for RequiredSkill {
    type Error = ParseLevelError;

    fn try_from(row: RequirementRow) -> Result<Self, Self::Error> {
        Ok(RequiredSkill {
            skill_id: row.skill_id,
            name: row.skill_name,
            min_level: row.min_level.parse()?,
            is_mandatory: row.is_mandatory,
            difficulty: row.difficulty.parse()?,
        })
    }
}

impl TryFrom<ResourceRow> for LearningResource {
    type Error = ParseLevelError;

    fn try_from(row: ResourceRow) -> Result<Self, Self::Error> {
        Ok(LearningResource {
            id: row.id,
            skill_id: row.skill_id,
            title: row.title,
            url: row.url,
            kind: row.kind.parse()?,
            difficulty: row.difficulty.parse()?,
            estimated_hours: u32::try_from(row.estimated_hours).map_err(|_| ParseLevelError {
                kind: "estimated_hours",
                value: row.estimated_hours.to_string(),
            })?,
            is_free: row.is_free,
        })
    }
}
