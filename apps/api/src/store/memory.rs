use std::cmp::Reverse;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::analysis::proficiency::Proficiency;
use crate::catalog::seed::SeedCatalog;
use crate::errors::AppError;
use crate::models::analysis::{AnalysisRow, NewAnalysis};
use crate::models::catalog::{CompanyRow, RequirementRow, ResourceRow, RoleRow, SkillRow};
use crate::models::student::{StudentRow, StudentSkillRow};
use crate::store::{CatalogStats, NewStudent, SkillSelection, SkillStore};

#[derive(Clone)]
struct Requirement {
    role_id: Uuid,
    skill_id: Uuid,
    min_level: Proficiency,
    is_mandatory: bool,
}

struct HeldRecord {
    student_id: Uuid,
    skill_id: Uuid,
    level: Proficiency,
    verified: bool,
    added_at: DateTime<Utc>,
}

#[derive(Default)]
struct Tables {
    skills: Vec<SkillRow>,
    companies: Vec<CompanyRow>,
    roles: Vec<RoleRow>,
    requirements: Vec<Requirement>,
    resources: Vec<ResourceRow>,
    students: Vec<StudentRow>,
    student_skills: Vec<HeldRecord>,
    analyses: Vec<AnalysisRow>,
}

impl Tables {
    fn skill(&self, id: Uuid) -> Option<&SkillRow> {
        self.skills.iter().find(|s| s.id == id)
    }

    fn skill_id_by_name(&self, name: &str) -> Result<Uuid, AppError> {
        self.skills
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.id)
            .ok_or_else(|| AppError::Internal(anyhow!("seed references unknown skill '{name}'")))
    }

    fn student_skill_rows(&self, student_id: Uuid) -> Vec<StudentSkillRow> {
        let mut rows: Vec<StudentSkillRow> = self
            .student_skills
            .iter()
            .filter(|h| h.student_id == student_id)
            .filter_map(|h| {
                self.skill(h.skill_id).map(|s| StudentSkillRow {
                    skill_id: h.skill_id,
                    skill_name: s.name.clone(),
                    category: s.category.clone(),
                    level: h.level.as_str().to_string(),
                    verified: h.verified,
                    added_at: h.added_at,
                })
            })
            .collect();
        rows.sort_by(|a, b| {
            (Reverse(a.verified), Reverse(a.added_at), &a.skill_name).cmp(&(
                Reverse(b.verified),
                Reverse(b.added_at),
                &b.skill_name,
            ))
        });
        rows
    }
}

/// Process-local store with the same ordering contracts as `PgSkillStore`.
#[derive(Default)]
pub struct MemorySkillStore {
    tables: RwLock<Tables>,
}

impl MemorySkillStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a role with no requirements, i.e. one that cannot be analysed.
    #[cfg(test)]
    pub async fn add_empty_role(&self, company_name: &str, title: &str) -> Uuid {
        let mut tables = self.tables.write().await;
        let existing = tables
            .companies
            .iter()
            .find(|c| c.name == company_name)
            .map(|c| c.id);
        let company_id = match existing {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4();
                tables.companies.push(CompanyRow {
                    id,
                    name: company_name.to_string(),
                    code: company_name.to_uppercase(),
                    headquarters: String::new(),
                });
                id
            }
        };
        let id = Uuid::new_v4();
        tables.roles.push(RoleRow {
            id,
            company_id,
            company_name: company_name.to_string(),
            title: title.to_string(),
            description: String::new(),
            salary_range: None,
            required_experience: None,
        });
        id
    }
}

#[async_trait]
impl SkillStore for MemorySkillStore {
    async fn stats(&self) -> Result<CatalogStats, AppError> {
        let tables = self.tables.read().await;
        Ok(CatalogStats {
            total_companies: tables.companies.len() as i64,
            total_roles: tables.roles.len() as i64,
            total_skills: tables.skills.len() as i64,
        })
    }

    async fn list_skills(&self) -> Result<Vec<SkillRow>, AppError> {
        let mut skills = self.tables.read().await.skills.clone();
        skills.sort_by(|a, b| (&a.category, &a.name).cmp(&(&b.category, &b.name)));
        Ok(skills)
    }

    async fn find_skills(&self, ids: &[Uuid]) -> Result<Vec<SkillRow>, AppError> {
        let tables = self.tables.read().await;
        let mut found: Vec<SkillRow> = tables
            .skills
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn list_companies(&self) -> Result<Vec<CompanyRow>, AppError> {
        let mut companies = self.tables.read().await.companies.clone();
        companies.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(companies)
    }

    async fn list_roles(&self) -> Result<Vec<RoleRow>, AppError> {
        let mut roles = self.tables.read().await.roles.clone();
        roles.sort_by(|a, b| (&a.company_name, &a.title).cmp(&(&b.company_name, &b.title)));
        Ok(roles)
    }

    async fn get_role(&self, role_id: Uuid) -> Result<Option<RoleRow>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.roles.iter().find(|r| r.id == role_id).cloned())
    }

    async fn role_requirements(&self, role_id: Uuid) -> Result<Vec<RequirementRow>, AppError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<RequirementRow> = tables
            .requirements
            .iter()
            .filter(|r| r.role_id == role_id)
            .filter_map(|r| {
                tables.skill(r.skill_id).map(|s| RequirementRow {
                    skill_id: r.skill_id,
                    skill_name: s.name.clone(),
                    min_level: r.min_level.as_str().to_string(),
                    is_mandatory: r.is_mandatory,
                    difficulty: s.difficulty.clone(),
                })
            })
            .collect();
        rows.sort_by(|a, b| {
            (Reverse(a.is_mandatory), &a.skill_name).cmp(&(Reverse(b.is_mandatory), &b.skill_name))
        });
        Ok(rows)
    }

    async fn resources_for_skills(
        &self,
        skill_ids: &[Uuid],
    ) -> Result<Vec<ResourceRow>, AppError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<ResourceRow> = tables
            .resources
            .iter()
            .filter(|r| skill_ids.contains(&r.skill_id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(rows)
    }

    async fn create_student(&self, student: NewStudent) -> Result<StudentRow, AppError> {
        let row = StudentRow {
            id: Uuid::new_v4(),
            display_name: student.display_name,
            college_name: student.college_name,
            department: student.department,
            year: student.year,
            cgpa: student.cgpa,
            created_at: Utc::now(),
        };
        self.tables.write().await.students.push(row.clone());
        Ok(row)
    }

    async fn get_student(&self, student_id: Uuid) -> Result<Option<StudentRow>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.students.iter().find(|s| s.id == student_id).cloned())
    }

    async fn student_skills(&self, student_id: Uuid) -> Result<Vec<StudentSkillRow>, AppError> {
        Ok(self.tables.read().await.student_skill_rows(student_id))
    }

    async fn replace_student_skills(
        &self,
        student_id: Uuid,
        skills: &[SkillSelection],
    ) -> Result<Vec<StudentSkillRow>, AppError> {
        let mut tables = self.tables.write().await;
        tables.student_skills.retain(|h| h.student_id != student_id);

        let now = Utc::now();
        tables
            .student_skills
            .extend(skills.iter().map(|s| HeldRecord {
                student_id,
                skill_id: s.skill_id,
                level: s.level,
                verified: false,
                added_at: now,
            }));

        Ok(tables.student_skill_rows(student_id))
    }

    async fn record_analysis(&self, analysis: NewAnalysis<'_>) -> Result<AnalysisRow, AppError> {
        let mut tables = self.tables.write().await;
        let role = tables
            .roles
            .iter()
            .find(|r| r.id == analysis.role_id)
            .ok_or_else(|| AppError::NotFound(format!("Role {} not found", analysis.role_id)))?;

        let result = analysis.result;
        let row = AnalysisRow {
            id: Uuid::new_v4(),
            student_id: analysis.student_id,
            role_id: analysis.role_id,
            role_title: role.title.clone(),
            company_name: role.company_name.clone(),
            match_percentage: result.match_percentage as i16,
            risk_tier: result.risk_tier.as_str().to_string(),
            matched_count: result.matched_count as i32,
            total_required: result.total_required as i32,
            matched_skills: result.matched_names(),
            gap_skills: result.gap_names(),
            recommended_resources: analysis.recommended_resources(),
            analyzed_at: Utc::now(),
        };
        tables.analyses.push(row.clone());
        Ok(row)
    }

    async fn analysis_history(&self, student_id: Uuid) -> Result<Vec<AnalysisRow>, AppError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<AnalysisRow> = tables
            .analyses
            .iter()
            .rev()
            .filter(|a| a.student_id == student_id)
            .cloned()
            .collect();
        rows.sort_by_key(|a| Reverse(a.analyzed_at));
        Ok(rows)
    }

    /// All or nothing: a seed with an unresolved reference leaves the store unchanged.
    async fn load_seed(&self, catalog: &SeedCatalog) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        let mut staged = Tables {
            skills: tables.skills.clone(),
            companies: tables.companies.clone(),
            roles: tables.roles.clone(),
            requirements: tables.requirements.clone(),
            resources: tables.resources.clone(),
            ..Tables::default()
        };
        seed_into(&mut staged, catalog)?;

        tables.skills = staged.skills;
        tables.companies = staged.companies;
        tables.roles = staged.roles;
        tables.requirements = staged.requirements;
        tables.resources = staged.resources;
        Ok(())
    }
}

fn seed_into(tables: &mut Tables, catalog: &SeedCatalog) -> Result<(), AppError> {
    for skill in &catalog.skills {
        if tables.skills.iter().any(|s| s.name == skill.name) {
            continue;
        }
        tables.skills.push(SkillRow {
            id: Uuid::new_v4(),
            name: skill.name.to_string(),
            category: skill.category.to_string(),
            description: String::new(),
            difficulty: skill.difficulty.as_str().to_string(),
        });
    }

    for company in &catalog.companies {
        if tables.companies.iter().any(|c| c.name == company.name) {
            continue;
        }
        tables.companies.push(CompanyRow {
            id: Uuid::new_v4(),
            name: company.name.to_string(),
            code: company.code.to_string(),
            headquarters: company.headquarters.to_string(),
        });
    }

    for role in &catalog.roles {
        let company_id = tables
            .companies
            .iter()
            .find(|c| c.name == role.company)
            .map(|c| c.id)
            .ok_or_else(|| {
                AppError::Internal(anyhow!("seed references unknown company '{}'", role.company))
            })?;

        let existing = tables
            .roles
            .iter()
            .find(|r| r.company_id == company_id && r.title == role.title)
            .map(|r| r.id);
        let role_id = match existing {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4();
                tables.roles.push(RoleRow {
                    id,
                    company_id,
                    company_name: role.company.to_string(),
                    title: role.title.to_string(),
                    description: role.description.to_string(),
                    salary_range: Some(role.salary_range.to_string()),
                    required_experience: Some(role.required_experience.to_string()),
                });
                id
            }
        };

        for req in &role.requirements {
            let skill_id = tables.skill_id_by_name(req.skill)?;
            if tables
                .requirements
                .iter()
                .any(|r| r.role_id == role_id && r.skill_id == skill_id)
            {
                continue;
            }
            tables.requirements.push(Requirement {
                role_id,
                skill_id,
                min_level: req.min_level,
                is_mandatory: req.is_mandatory,
            });
        }
    }

    for resource in &catalog.resources {
        let skill_id = tables.skill_id_by_name(resource.skill)?;
        if tables
            .resources
            .iter()
            .any(|r| r.skill_id == skill_id && r.title == resource.title)
        {
            continue;
        }
        tables.resources.push(ResourceRow {
            id: Uuid::new_v4(),
            skill_id,
            title: resource.title.to_string(),
            url: resource.url.to_string(),
            kind: resource.kind.as_str().to_string(),
            difficulty: resource.difficulty.as_str().to_string(),
            estimated_hours: resource.estimated_hours as i32,
            is_free: resource.is_free,
        });
    }

    Ok(())
}
