//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::analyzer::{AnalysisError, AnalysisResult, HeldSkill, RequiredSkill};
use crate::analysis::resources::{LearningResource, ResourceCatalog};
use crate::analysis::risk::RiskTier;
use crate::analysis::roadmap::{build_roadmap, LearningRoadmap};
use crate::errors::AppError;
use crate::models::analysis::NewAnalysis;
use crate::models::catalog::RoleRow;
use crate::state::AppState;
use crate::students::handlers::require_student;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub role_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct RoadmapQuery {
    pub role_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub student_id: Uuid,
    pub role: RoleRow,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

#[derive(Debug, Serialize)]
pub struct RoadmapResponse {
    pub student_id: Uuid,
    pub role: RoleRow,
    pub match_percentage: u8,
    pub risk_tier: RiskTier,
    pub roadmap: LearningRoadmap,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/students/:student_id/analyses
///
/// Runs the gap analysis against the selected role and records it in the
/// student's history. A failed analysis records nothing.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<(StatusCode, Json<AnalysisResponse>), AppError> {
    let (role, result) = run_analysis(&state, student_id, request.role_id).await?;

    let record = state
        .store
        .record_analysis(NewAnalysis {
            student_id,
            role_id: role.id,
            result: &result,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AnalysisResponse {
            analysis_id: record.id,
            analyzed_at: record.analyzed_at,
            student_id,
            role,
            result,
        }),
    ))
}

/// GET /api/v1/students/:student_id/roadmap?role_id=
///
/// Week-by-week learning plan for the role's gaps. Not recorded in history.
pub async fn handle_roadmap(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
    Query(query): Query<RoadmapQuery>,
) -> Result<Json<RoadmapResponse>, AppError> {
    let (role, result) = run_analysis(&state, student_id, query.role_id).await?;

    Ok(Json(RoadmapResponse {
        student_id,
        role,
        match_percentage: result.match_percentage,
        risk_tier: result.risk_tier,
        roadmap: build_roadmap(&result),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Input loading
// ────────────────────────────────────────────────────────────────────────────

/// Loads the student's skills, the role's requirements and the resources for
/// those requirements, then runs the analyzer.
async fn run_analysis(
    state: &AppState,
    student_id: Uuid,
    role_id: Uuid,
) -> Result<(RoleRow, AnalysisResult), AppError> {
    require_student(state, student_id).await?;
    let role = state
        .store
        .get_role(role_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Role {role_id} not found")))?;

    let requirements = state
        .store
        .role_requirements(role_id)
        .await?
        .into_iter()
        .map(RequiredSkill::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let held = state
        .store
        .student_skills(student_id)
        .await?
        .into_iter()
        .map(HeldSkill::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let skill_ids: Vec<Uuid> = requirements.iter().map(|r| r.skill_id).collect();
    let mut catalog = ResourceCatalog::new();
    for row in state.store.resources_for_skills(&skill_ids).await? {
        let resource = LearningResource::try_from(row)?;
        catalog.entry(resource.skill_id).or_default().push(resource);
    }

    let result = state
        .analyzer
        .analyze(&held, &requirements, &catalog)
        .map_err(|e| match e {
            AnalysisError::InvalidRole => AppError::InvalidRole(format!(
                "Role '{}' ({role_id}) has no skill requirements",
                role.title
            )),
        })?;

    info!(
        "Analysed student {student_id} against role {role_id}: {}% ({})",
        result.match_percentage, result.risk_tier
    );
    Ok((role, result))
}
