use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::analysis::analyzer::HeldSkill;
use crate::analysis::proficiency::ParseLevelError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentRow {
    pub id: Uuid,
    pub display_name: String,
    pub college_name: String,
    pub department: String,
    pub year: String,
    pub cgpa: f64,
    pub created_at: DateTime<Utc>,
}

/// A student skill joined with the skill it refers to.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentSkillRow {
    pub skill_id: Uuid,
    pub skill_name: String,
    pub category: String,
    pub level: String,
    pub verified: bool,
    pub added_at: DateTime<Utc>,
}

impl TryFrom<StudentSkillRow> for HeldSkill {
    type Error = ParseLevelError;

    fn try_from(row: StudentSkillRow) -> Result<Self, Self::Error> {
        Ok(HeldSkill {
            skill_id: row.skill_id,
            name: row.skill_name,
            level: row.level.parse()?,
            verified: row.verified,
        })
    }
}
