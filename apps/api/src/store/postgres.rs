use std::collections::HashMap;

use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::catalog::seed::SeedCatalog;
use crate::errors::AppError;
use crate::models::analysis::{AnalysisRow, NewAnalysis};
use crate::models::catalog::{CompanyRow, RequirementRow, ResourceRow, RoleRow, SkillRow};
use crate::models::student::{StudentRow, StudentSkillRow};
use crate::store::{CatalogStats, NewStudent, SkillSelection, SkillStore};

const ROLE_COLUMNS: &str = r#"
    r.id, r.company_id, c.name AS company_name, r.title, r.description,
    r.salary_range, r.required_experience
"#;

const ANALYSIS_COLUMNS: &str = r#"
    a.id, a.student_id, a.role_id, r.title AS role_title, c.name AS company_name,
    a.match_percentage, a.risk_tier, a.matched_count, a.total_required,
    a.matched_skills, a.gap_skills, a.recommended_resources, a.analyzed_at
"#;

pub struct PgSkillStore {
    pool: PgPool,
}

impl PgSkillStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SkillStore for PgSkillStore {
    async fn stats(&self) -> Result<CatalogStats, AppError> {
        let (total_companies, total_roles, total_skills): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT (SELECT COUNT(*) FROM companies),
                   (SELECT COUNT(*) FROM roles),
                   (SELECT COUNT(*) FROM skills)
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(CatalogStats {
            total_companies,
            total_roles,
            total_skills,
        })
    }

    async fn list_skills(&self) -> Result<Vec<SkillRow>, AppError> {
        Ok(
            sqlx::query_as::<_, SkillRow>("SELECT * FROM skills ORDER BY category, name")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn find_skills(&self, ids: &[Uuid]) -> Result<Vec<SkillRow>, AppError> {
        Ok(
            sqlx::query_as::<_, SkillRow>("SELECT * FROM skills WHERE id = ANY($1) ORDER BY name")
                .bind(ids)
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn list_companies(&self) -> Result<Vec<CompanyRow>, AppError> {
        Ok(
            sqlx::query_as::<_, CompanyRow>("SELECT * FROM companies ORDER BY name")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn list_roles(&self) -> Result<Vec<RoleRow>, AppError> {
        let sql = format!(
            "SELECT {ROLE_COLUMNS} FROM roles r JOIN companies c ON c.id = r.company_id \
             ORDER BY c.name, r.title"
        );
        Ok(sqlx::query_as::<_, RoleRow>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_role(&self, role_id: Uuid) -> Result<Option<RoleRow>, AppError> {
        let sql = format!(
            "SELECT {ROLE_COLUMNS} FROM roles r JOIN companies c ON c.id = r.company_id \
             WHERE r.id = $1"
        );
        Ok(sqlx::query_as::<_, RoleRow>(&sql)
            .bind(role_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn role_requirements(&self, role_id: Uuid) -> Result<Vec<RequirementRow>, AppError> {
        Ok(sqlx::query_as::<_, RequirementRow>(
            r#"
            SELECT rr.skill_id, s.name AS skill_name, rr.min_level, rr.is_mandatory, s.difficulty
            FROM role_requirements rr
            JOIN skills s ON s.id = rr.skill_id
            WHERE rr.role_id = $1
            ORDER BY rr.is_mandatory DESC, s.name ASC
            "#,
        )
        .bind(role_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn resources_for_skills(
        &self,
        skill_ids: &[Uuid],
    ) -> Result<Vec<ResourceRow>, AppError> {
        Ok(sqlx::query_as::<_, ResourceRow>(
            "SELECT * FROM resources WHERE skill_id = ANY($1) ORDER BY title, id",
        )
        .bind(skill_ids)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn create_student(&self, student: NewStudent) -> Result<StudentRow, AppError> {
        let row = sqlx::query_as::<_, StudentRow>(
            r#"
            INSERT INTO students (id, display_name, college_name, department, year, cgpa)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&student.display_name)
        .bind(&student.college_name)
        .bind(&student.department)
        .bind(&student.year)
        .bind(student.cgpa)
        .fetch_one(&self.pool)
        .await?;

        info!("Created student profile {}", row.id);
        Ok(row)
    }

    async fn get_student(&self, student_id: Uuid) -> Result<Option<StudentRow>, AppError> {
        Ok(
            sqlx::query_as::<_, StudentRow>("SELECT * FROM students WHERE id = $1")
                .bind(student_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn student_skills(&self, student_id: Uuid) -> Result<Vec<StudentSkillRow>, AppError> {
        Ok(sqlx::query_as::<_, StudentSkillRow>(
            r#"
            SELECT ss.skill_id, s.name AS skill_name, s.category, ss.level, ss.verified, ss.added_at
            FROM student_skills ss
            JOIN skills s ON s.id = ss.skill_id
            WHERE ss.student_id = $1
            ORDER BY ss.verified DESC, ss.added_at DESC, s.name ASC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn replace_student_skills(
        &self,
        student_id: Uuid,
        skills: &[SkillSelection],
    ) -> Result<Vec<StudentSkillRow>, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM student_skills WHERE student_id = $1")
            .bind(student_id)
            .execute(&mut *tx)
            .await?;

        for selection in skills {
            sqlx::query(
                "INSERT INTO student_skills (student_id, skill_id, level) VALUES ($1, $2, $3)",
            )
            .bind(student_id)
            .bind(selection.skill_id)
            .bind(selection.level.as_str())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        info!(
            "Replaced skill set for student {student_id} ({} skills)",
            skills.len()
        );

        self.student_skills(student_id).await
    }

    async fn record_analysis(&self, analysis: NewAnalysis<'_>) -> Result<AnalysisRow, AppError> {
        let result = analysis.result;
        let sql = format!(
            r#"
            WITH a AS (
                INSERT INTO analyses
                    (id, student_id, role_id, match_percentage, risk_tier, matched_count,
                     total_required, matched_skills, gap_skills, recommended_resources)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING *
            )
            SELECT {ANALYSIS_COLUMNS}
            FROM a
            JOIN roles r ON r.id = a.role_id
            JOIN companies c ON c.id = r.company_id
            "#
        );

        let row = sqlx::query_as::<_, AnalysisRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(analysis.student_id)
            .bind(analysis.role_id)
            .bind(result.match_percentage as i16)
            .bind(result.risk_tier.as_str())
            .bind(result.matched_count as i32)
            .bind(result.total_required as i32)
            .bind(result.matched_names())
            .bind(result.gap_names())
            .bind(analysis.recommended_resources())
            .fetch_one(&self.pool)
            .await?;

        info!(
            "Recorded analysis {} for student {} against role {} ({}%)",
            row.id, row.student_id, row.role_id, row.match_percentage
        );
        Ok(row)
    }

    async fn analysis_history(&self, student_id: Uuid) -> Result<Vec<AnalysisRow>, AppError> {
        let sql = format!(
            "SELECT {ANALYSIS_COLUMNS} FROM analyses a \
             JOIN roles r ON r.id = a.role_id \
             JOIN companies c ON c.id = r.company_id \
             WHERE a.student_id = $1 \
             ORDER BY a.analyzed_at DESC"
        );
        Ok(sqlx::query_as::<_, AnalysisRow>(&sql)
            .bind(student_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn load_seed(&self, catalog: &SeedCatalog) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        for skill in &catalog.skills {
            sqlx::query(
                r#"
                INSERT INTO skills (id, name, category, difficulty)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (name) DO NOTHING
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(skill.name)
            .bind(skill.category)
            .bind(skill.difficulty.as_str())
            .execute(&mut *tx)
            .await?;
        }

        for company in &catalog.companies {
            sqlx::query(
                r#"
                INSERT INTO companies (id, name, code, headquarters)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (name) DO NOTHING
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(company.name)
            .bind(company.code)
            .bind(company.headquarters)
            .execute(&mut *tx)
            .await?;
        }

        let skill_ids: HashMap<String, Uuid> =
            sqlx::query_as::<_, (String, Uuid)>("SELECT name, id FROM skills")
                .fetch_all(&mut *tx)
                .await?
                .into_iter()
                .collect();
        let company_ids: HashMap<String, Uuid> =
            sqlx::query_as::<_, (String, Uuid)>("SELECT name, id FROM companies")
                .fetch_all(&mut *tx)
                .await?
                .into_iter()
                .collect();

        let lookup = |ids: &HashMap<String, Uuid>, name: &str| {
            ids.get(name)
                .copied()
                .ok_or_else(|| AppError::Internal(anyhow!("seed references unknown '{name}'")))
        };

        for role in &catalog.roles {
            let company_id = lookup(&company_ids, role.company)?;
            sqlx::query(
                r#"
                INSERT INTO roles
                    (id, company_id, title, description, salary_range, required_experience)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (company_id, title) DO NOTHING
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(company_id)
            .bind(role.title)
            .bind(role.description)
            .bind(role.salary_range)
            .bind(role.required_experience)
            .execute(&mut *tx)
            .await?;

            let role_id: Uuid =
                sqlx::query_scalar("SELECT id FROM roles WHERE company_id = $1 AND title = $2")
                    .bind(company_id)
                    .bind(role.title)
                    .fetch_one(&mut *tx)
                    .await?;

            for req in &role.requirements {
                sqlx::query(
                    r#"
                    INSERT INTO role_requirements (role_id, skill_id, min_level, is_mandatory)
                    VALUES ($1, $2, $3, $4)
                    ON CONFLICT (role_id, skill_id) DO NOTHING
                    "#,
                )
                .bind(role_id)
                .bind(lookup(&skill_ids, req.skill)?)
                .bind(req.min_level.as_str())
                .bind(req.is_mandatory)
                .execute(&mut *tx)
                .await?;
            }
        }

        for resource in &catalog.resources {
            sqlx::query(
                r#"
                INSERT INTO resources
                    (id, skill_id, title, url, kind, difficulty, estimated_hours, is_free)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ON CONFLICT (skill_id, title) DO NOTHING
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(lookup(&skill_ids, resource.skill)?)
            .bind(resource.title)
            .bind(resource.url)
            .bind(resource.kind.as_str())
            .bind(resource.difficulty.as_str())
            .bind(resource.estimated_hours as i32)
            .bind(resource.is_free)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        info!(
            "Seed catalog loaded: {} skills, {} companies, {} roles, {} resources",
            catalog.skills.len(),
            catalog.companies.len(),
            catalog.roles.len(),
            catalog.resources.len()
        );
        Ok(())
    }
}
