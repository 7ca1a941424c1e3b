use std::collections::HashSet;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analysis::AnalysisRow;
use crate::models::student::{StudentRow, StudentSkillRow};
use crate::state::AppState;
use crate::store::{NewStudent, SkillSelection};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ReplaceSkillsRequest {
    pub skills: Vec<SkillSelection>,
}

#[derive(Debug, Serialize)]
pub struct StudentSkillsResponse {
    pub student_id: Uuid,
    pub skills: Vec<StudentSkillRow>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub student_id: Uuid,
    pub analyses: Vec<AnalysisRow>,
    pub total: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/students
pub async fn handle_create_student(
    State(state): State<AppState>,
    Json(request): Json<NewStudent>,
) -> Result<(StatusCode, Json<StudentRow>), AppError> {
    validate_new_student(&request)?;
    let student = state.store.create_student(request).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// GET /api/v1/students/:student_id
pub async fn handle_get_student(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<StudentRow>, AppError> {
    Ok(Json(require_student(&state, student_id).await?))
}

/// GET /api/v1/students/:student_id/skills
pub async fn handle_get_skills(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<StudentSkillsResponse>, AppError> {
    require_student(&state, student_id).await?;
    let skills = state.store.student_skills(student_id).await?;
    Ok(Json(StudentSkillsResponse {
        student_id,
        total: skills.len(),
        skills,
    }))
}

/// PUT /api/v1/students/:student_id/skills
///
/// Replaces the student's whole skill set. Every skill id must exist and
/// appear at most once; an empty list clears the set.
pub async fn handle_replace_skills(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
    Json(request): Json<ReplaceSkillsRequest>,
) -> Result<Json<StudentSkillsResponse>, AppError> {
    require_student(&state, student_id).await?;
    check_no_duplicates(&request.skills)?;

    let ids: Vec<Uuid> = request.skills.iter().map(|s| s.skill_id).collect();
    let known: HashSet<Uuid> = state
        .store
        .find_skills(&ids)
        .await?
        .into_iter()
        .map(|s| s.id)
        .collect();
    if let Some(unknown) = ids.iter().find(|id| !known.contains(id)) {
        return Err(AppError::Validation(format!("Unknown skill id {unknown}")));
    }

    let skills = state
        .store
        .replace_student_skills(student_id, &request.skills)
        .await?;
    Ok(Json(StudentSkillsResponse {
        student_id,
        total: skills.len(),
        skills,
    }))
}

/// GET /api/v1/students/:student_id/analyses
pub async fn handle_history(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<HistoryResponse>, AppError> {
    require_student(&state, student_id).await?;
    let analyses = state.store.analysis_history(student_id).await?;
    Ok(Json(HistoryResponse {
        student_id,
        total: analyses.len(),
        analyses,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

pub async fn require_student(state: &AppState, student_id: Uuid) -> Result<StudentRow, AppError> {
    state
        .store
        .get_student(student_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student {student_id} not found")))
}

fn validate_new_student(student: &NewStudent) -> Result<(), AppError> {
    if student.display_name.trim().is_empty() {
        return Err(AppError::Validation(
            "display_name cannot be empty".to_string(),
        ));
    }
    if !(0.0..=10.0).contains(&student.cgpa) {
        return Err(AppError::Validation(format!(
            "cgpa must be between 0 and 10, got {}",
            student.cgpa
        )));
    }
    Ok(())
}

fn check_no_duplicates(skills: &[SkillSelection]) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for selection in skills {
        if !seen.insert(selection.skill_id) {
            return Err(AppError::Validation(format!(
                "Skill {} submitted more than once",
                selection.skill_id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::proficiency::Proficiency;

    fn student(name: &str, cgpa: f64) -> NewStudent {
        NewStudent {
            display_name: name.to_string(),
            college_name: "COEP".to_string(),
            department: "IT".to_string(),
            year: "FIN".to_string(),
            cgpa,
        }
    }

    #[test]
    fn test_cgpa_range_is_inclusive() {
        assert!(validate_new_student(&student("ravi", 0.0)).is_ok());
        assert!(validate_new_student(&student("ravi", 10.0)).is_ok());
        assert!(validate_new_student(&student("ravi", 10.5)).is_err());
        assert!(validate_new_student(&student("ravi", f64::NAN)).is_err());
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(matches!(
            validate_new_student(&student("   ", 7.0)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_duplicate_selection_rejected() {
        let id = Uuid::new_v4();
        let skills = [
            SkillSelection {
                skill_id: id,
                level: Proficiency::Basic,
            },
            SkillSelection {
                skill_id: id,
                level: Proficiency::Expert,
            },
        ];
        assert!(check_no_duplicates(&skills).is_err());
        assert!(check_no_duplicates(&skills[..1]).is_ok());
    }
}
