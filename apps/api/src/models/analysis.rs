use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::FromRow;
use uuid::Uuid;

use crate::analysis::analyzer::AnalysisResult;

/// One history entry, joined with the analysed role and its company.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalysisRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub role_id: Uuid,
    pub role_title: String,
    pub company_name: String,
    pub match_percentage: i16,
    pub risk_tier: String,
    pub matched_count: i32,
    pub total_required: i32,
    pub matched_skills: Vec<String>,
    pub gap_skills: Vec<String>,
    pub recommended_resources: Value,
    pub analyzed_at: DateTime<Utc>,
}

/// Parameters for recording a finished analysis.
pub struct NewAnalysis<'a> {
    pub student_id: Uuid,
    pub role_id: Uuid,
    pub result: &'a AnalysisResult,
}

impl NewAnalysis<'_> {
    /// Gap skill → recommended resource references, in gap order.
    pub fn recommended_resources(&self) -> Value {
        Value::Array(
            self.result
                .gap_skills
                .iter()
                .map(|gap| {
                    json!({
                        "skill": gap.name,
                        "resources": gap
                            .resources
                            .iter()
                            .map(|r| json!({ "id": r.id, "title": r.title, "url": r.url }))
                            .collect::<Vec<_>>(),
                    })
                })
                .collect(),
        )
    }
}
