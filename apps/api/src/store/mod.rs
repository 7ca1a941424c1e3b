//! Storage seam for the collaborator layer.
//!
//! `AppState` holds an `Arc<dyn SkillStore>`: `PgSkillStore` in production,
//! `MemorySkillStore` for tests and database-less local runs.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::proficiency::Proficiency;
use crate::catalog::seed::SeedCatalog;
use crate::errors::AppError;
use crate::models::analysis::{AnalysisRow, NewAnalysis};
use crate::models::catalog::{CompanyRow, RequirementRow, ResourceRow, RoleRow, SkillRow};
use crate::models::student::{StudentRow, StudentSkillRow};

pub use memory::MemorySkillStore;
pub use postgres::PgSkillStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudent {
    pub display_name: String,
    pub college_name: String,
    pub department: String,
    pub year: String,
    pub cgpa: f64,
}

/// One entry of a submitted skill list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillSelection {
    pub skill_id: Uuid,
    pub level: Proficiency,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_companies: i64,
    pub total_roles: i64,
    pub total_skills: i64,
}

#[async_trait]
pub trait SkillStore: Send + Sync {
    async fn stats(&self) -> Result<CatalogStats, AppError>;

    /// All skills, ordered by category then name.
    async fn list_skills(&self) -> Result<Vec<SkillRow>, AppError>;

    /// Skills with the given ids; unknown ids are simply absent.
    async fn find_skills(&self, ids: &[Uuid]) -> Result<Vec<SkillRow>, AppError>;

    /// All companies, ordered by name.
    async fn list_companies(&self) -> Result<Vec<CompanyRow>, AppError>;

    /// All roles, ordered by company name then title.
    async fn list_roles(&self) -> Result<Vec<RoleRow>, AppError>;

    async fn get_role(&self, role_id: Uuid) -> Result<Option<RoleRow>, AppError>;

    /// Requirements of a role in requirements order: mandatory first, then skill name.
    async fn role_requirements(&self, role_id: Uuid) -> Result<Vec<RequirementRow>, AppError>;

    /// Resources for the given skills, in catalog (title) order.
    async fn resources_for_skills(&self, skill_ids: &[Uuid])
        -> Result<Vec<ResourceRow>, AppError>;

    async fn create_student(&self, student: NewStudent) -> Result<StudentRow, AppError>;

    async fn get_student(&self, student_id: Uuid) -> Result<Option<StudentRow>, AppError>;

    /// The student's current skills: verified first, newest first, then by name.
    async fn student_skills(&self, student_id: Uuid) -> Result<Vec<StudentSkillRow>, AppError>;

    /// Supersedes the student's whole skill set with `skills`.
    async fn replace_student_skills(
        &self,
        student_id: Uuid,
        skills: &[SkillSelection],
    ) -> Result<Vec<StudentSkillRow>, AppError>;

    async fn record_analysis(&self, analysis: NewAnalysis<'_>) -> Result<AnalysisRow, AppError>;

    /// History for a student, newest first.
    async fn analysis_history(&self, student_id: Uuid) -> Result<Vec<AnalysisRow>, AppError>;

    async fn load_seed(&self, catalog: &SeedCatalog) -> Result<(), AppError>;
}
