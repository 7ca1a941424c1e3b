use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::analysis::analyzer::RequiredSkill;
use crate::errors::AppError;
use crate::models::catalog::{CompanyRow, RoleRow, SkillRow};
use crate::state::AppState;
use crate::store::CatalogStats;

#[derive(Debug, Serialize)]
pub struct SkillCategory {
    pub category: String,
    pub skills: Vec<SkillRow>,
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub categories: Vec<SkillCategory>,
    pub total_skills: usize,
}

#[derive(Debug, Serialize)]
pub struct CompanyRoles {
    pub company: CompanyRow,
    pub roles: Vec<RoleRow>,
}

#[derive(Debug, Serialize)]
pub struct RoleSkillsResponse {
    pub role_id: Uuid,
    pub role_title: String,
    pub company: String,
    pub skills: Vec<RequiredSkill>,
    pub total_skills: usize,
}

/// GET /api/v1/stats
pub async fn handle_stats(State(state): State<AppState>) -> Result<Json<CatalogStats>, AppError> {
    Ok(Json(state.store.stats().await?))
}

/// GET /api/v1/skills
pub async fn handle_list_skills(
    State(state): State<AppState>,
) -> Result<Json<SkillsResponse>, AppError> {
    let skills = state.store.list_skills().await?;
    let total_skills = skills.len();
    Ok(Json(SkillsResponse {
        categories: group_by_category(skills),
        total_skills,
    }))
}

/// GET /api/v1/roles
pub async fn handle_list_roles(
    State(state): State<AppState>,
) -> Result<Json<Vec<CompanyRoles>>, AppError> {
    let companies = state.store.list_companies().await?;
    let roles = state.store.list_roles().await?;

    let grouped = companies
        .into_iter()
        .map(|company| {
            let roles = roles
                .iter()
                .filter(|r| r.company_id == company.id)
                .cloned()
                .collect();
            CompanyRoles { company, roles }
        })
        .collect();
    Ok(Json(grouped))
}

/// GET /api/v1/roles/:role_id/skills
pub async fn handle_role_skills(
    State(state): State<AppState>,
    Path(role_id): Path<Uuid>,
) -> Result<Json<RoleSkillsResponse>, AppError> {
    let role = state
        .store
        .get_role(role_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Role {role_id} not found")))?;

    let skills = state
        .store
        .role_requirements(role_id)
        .await?
        .into_iter()
        .map(RequiredSkill::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(RoleSkillsResponse {
        role_id,
        role_title: role.title,
        company: role.company_name,
        total_skills: skills.len(),
        skills,
    }))
}

/// Groups skills already sorted by (category, name) into consecutive categories.
fn group_by_category(skills: Vec<SkillRow>) -> Vec<SkillCategory> {
    let mut groups: Vec<SkillCategory> = Vec::new();
    for skill in skills {
        if let Some(group) = groups.last_mut() {
            if group.category == skill.category {
                group.skills.push(skill);
                continue;
            }
        }
        groups.push(SkillCategory {
            category: skill.category.clone(),
            skills: vec![skill],
        });
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(name: &str, category: &str) -> SkillRow {
        SkillRow {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category: category.to_string(),
            description: String::new(),
            difficulty: "Beginner".to_string(),
        }
    }

    #[test]
    fn test_group_by_category_keeps_order() {
        let groups = group_by_category(vec![
            skill("AWS", "Cloud"),
            skill("Azure", "Cloud"),
            skill("MySQL", "Database"),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "Cloud");
        assert_eq!(groups[0].skills.len(), 2);
        assert_eq!(groups[1].skills[0].name, "MySQL");
    }

    #[test]
    fn test_group_by_category_empty() {
        assert!(group_by_category(vec![]).is_empty());
    }
}
