//! Gap Analyzer: compares a student's skills against a role's requirements.
//!
//! Pure and synchronous. The caller loads the inputs and persists the output;
//! nothing here touches storage or request context.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::analysis::proficiency::{Difficulty, Proficiency};
use crate::analysis::resources::{
    select_resources, LearningResource, ResourceCatalog, DEFAULT_RESOURCES_PER_GAP,
};
use crate::analysis::risk::RiskTier;

// ────────────────────────────────────────────────────────────────────────────
// Inputs
// ────────────────────────────────────────────────────────────────────────────

/// One entry of a role's requirement list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredSkill {
    pub skill_id: Uuid,
    pub name: String,
    pub min_level: Proficiency,
    pub is_mandatory: bool,
    pub difficulty: Difficulty,
}

/// A skill the student reports holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeldSkill {
    pub skill_id: Uuid,
    pub name: String,
    pub level: Proficiency,
    pub verified: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedSkill {
    pub skill_id: Uuid,
    pub name: String,
    pub student_level: Proficiency,
    pub required_level: Proficiency,
    pub verified: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapKind {
    /// The student does not hold the skill at all.
    Missing,
    /// Held, but below the required level.
    UnderProficient,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    pub skill_id: Uuid,
    pub name: String,
    pub kind: GapKind,
    pub required_level: Proficiency,
    pub student_level: Option<Proficiency>,
    pub is_mandatory: bool,
    pub difficulty: Difficulty,
    pub resources: Vec<LearningResource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraSkill {
    pub skill_id: Uuid,
    pub name: String,
    pub student_level: Proficiency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: u8,
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub match_percentage: u8, // 0 – 100
    pub risk_tier: RiskTier,
    pub risk_description: String,
    pub matched_count: usize,
    pub total_required: usize,
    pub matched_skills: Vec<MatchedSkill>, // requirements order
    pub gap_skills: Vec<SkillGap>,         // requirements order
    pub extra_skills: Vec<ExtraSkill>,
    pub recommendations: Vec<Recommendation>,
    pub summary: String,
}

impl AnalysisResult {
    pub fn matched_names(&self) -> Vec<String> {
        self.matched_skills.iter().map(|m| m.name.clone()).collect()
    }

    pub fn gap_names(&self) -> Vec<String> {
        self.gap_skills.iter().map(|g| g.name.clone()).collect()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// A role without requirements is a catalog defect, not an analysis target.
    #[error("role has no skill requirements")]
    InvalidRole,
}

// ────────────────────────────────────────────────────────────────────────────
// Analyzer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct GapAnalyzer {
    resources_per_gap: usize,
}

impl Default for GapAnalyzer {
    fn default() -> Self {
        Self {
            resources_per_gap: DEFAULT_RESOURCES_PER_GAP,
        }
    }
}

impl GapAnalyzer {
    pub fn new(resources_per_gap: usize) -> Self {
        Self { resources_per_gap }
    }

    /// Runs the comparison.
    ///
    /// 1. Each requirement is matched iff the student holds the skill at or above
    ///    `min_level`; otherwise it is a gap (missing or under-proficient).
    /// 2. `match_percentage = round_half_up(100 × matched / required)`.
    /// 3. Risk tier from fixed thresholds (80 / 60 / 40).
    /// 4. Each gap gets up to `resources_per_gap` resources, free first, then shortest.
    pub fn analyze(
        &self,
        student_skills: &[HeldSkill],
        requirements: &[RequiredSkill],
        catalog: &ResourceCatalog,
    ) -> Result<AnalysisResult, AnalysisError> {
        if requirements.is_empty() {
            return Err(AnalysisError::InvalidRole);
        }

        let held: HashMap<Uuid, &HeldSkill> =
            student_skills.iter().map(|s| (s.skill_id, s)).collect();

        let mut matched_skills = Vec::new();
        let mut gap_skills = Vec::new();

        for req in requirements {
            match held.get(&req.skill_id) {
                Some(skill) if skill.level.meets(req.min_level) => {
                    matched_skills.push(MatchedSkill {
                        skill_id: req.skill_id,
                        name: req.name.clone(),
                        student_level: skill.level,
                        required_level: req.min_level,
                        verified: skill.verified,
                    });
                }
                found => {
                    let kind = if found.is_some() {
                        GapKind::UnderProficient
                    } else {
                        GapKind::Missing
                    };
                    gap_skills.push(SkillGap {
                        skill_id: req.skill_id,
                        name: req.name.clone(),
                        kind,
                        required_level: req.min_level,
                        student_level: found.map(|s| s.level),
                        is_mandatory: req.is_mandatory,
                        difficulty: req.difficulty,
                        resources: select_resources(
                            catalog,
                            req.skill_id,
                            self.resources_per_gap,
                        ),
                    });
                }
            }
        }

        let extra_skills = student_skills
            .iter()
            .filter(|s| !requirements.iter().any(|r| r.skill_id == s.skill_id))
            .map(|s| ExtraSkill {
                skill_id: s.skill_id,
                name: s.name.clone(),
                student_level: s.level,
            })
            .collect();

        let total_required = requirements.len();
        let matched_count = matched_skills.len();
        let match_percentage = match_percentage(matched_count, total_required);
        let risk_tier = RiskTier::from_percentage(match_percentage);

        Ok(AnalysisResult {
            match_percentage,
            risk_tier,
            risk_description: risk_tier.description().to_string(),
            matched_count,
            total_required,
            recommendations: build_recommendations(&gap_skills),
            summary: build_summary(matched_count, total_required, match_percentage, &gap_skills),
            matched_skills,
            gap_skills,
            extra_skills,
        })
    }
}

/// Round-half-up percentage in integer arithmetic. `total` must be non-zero.
pub fn match_percentage(matched: usize, total: usize) -> u8 {
    let pct = (200 * matched + total) / (2 * total);
    pct.min(100) as u8
}

fn build_recommendations(gaps: &[SkillGap]) -> Vec<Recommendation> {
    let mandatory = names_where(gaps, |g| g.kind == GapKind::Missing && g.is_mandatory);
    let optional = names_where(gaps, |g| g.kind == GapKind::Missing && !g.is_mandatory);
    let upgrades = names_where(gaps, |g| g.kind == GapKind::UnderProficient);

    let mut recommendations = Vec::new();
    if !mandatory.is_empty() {
        recommendations.push(Recommendation {
            priority: 1,
            title: format!("CRITICAL: Learn {} mandatory skills", mandatory.len()),
            description: "These are must-have skills for this role".to_string(),
            skills: mandatory,
        });
    }
    if !optional.is_empty() {
        recommendations.push(Recommendation {
            priority: 2,
            title: format!("IMPORTANT: Learn {} nice-to-have skills", optional.len()),
            description: "These will boost your chances".to_string(),
            skills: optional,
        });
    }
    if !upgrades.is_empty() {
        recommendations.push(Recommendation {
            priority: 3,
            title: format!("IMPROVE: Strengthen {} skills", upgrades.len()),
            description: "You have these skills but need a higher proficiency".to_string(),
            skills: upgrades,
        });
    }
    recommendations
}

fn names_where(gaps: &[SkillGap], pred: impl Fn(&SkillGap) -> bool) -> Vec<String> {
    gaps.iter().filter(|g| pred(g)).map(|g| g.name.clone()).collect()
}

fn build_summary(matched: usize, total: usize, pct: u8, gaps: &[SkillGap]) -> String {
    let to_learn = gaps.iter().filter(|g| g.kind == GapKind::Missing).count();
    let to_improve = gaps.len() - to_learn;
    format!(
        "You have {matched} out of {total} required skills ({pct}% match). \
         Learn {to_learn} new skills and strengthen {to_improve} to be fully prepared for this role."
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::proficiency::ResourceKind;

    fn requirement(name: &str, min_level: Proficiency, is_mandatory: bool) -> RequiredSkill {
        RequiredSkill {
            skill_id: Uuid::new_v4(),
            name: name.to_string(),
            min_level,
            is_mandatory,
            difficulty: Difficulty::Intermediate,
        }
    }

    fn holding(req: &RequiredSkill, level: Proficiency) -> HeldSkill {
        HeldSkill {
            skill_id: req.skill_id,
            name: req.name.clone(),
            level,
            verified: false,
        }
    }

    fn six_requirements() -> Vec<RequiredSkill> {
        ["Python", "Django", "SQL", "Git", "Docker", "AWS"]
            .iter()
            .map(|n| requirement(n, Proficiency::Intermediate, true))
            .collect()
    }

    #[test]
    fn test_empty_requirements_is_invalid_role() {
        let err = GapAnalyzer::default()
            .analyze(&[], &[], &ResourceCatalog::new())
            .unwrap_err();
        assert_eq!(err, AnalysisError::InvalidRole);
    }

    #[test]
    fn test_empty_student_set_is_all_gaps() {
        let reqs = six_requirements();
        let result = GapAnalyzer::default()
            .analyze(&[], &reqs, &ResourceCatalog::new())
            .unwrap();

        assert_eq!(result.match_percentage, 0);
        assert_eq!(result.risk_tier, RiskTier::Critical);
        let expected: Vec<String> = reqs.iter().map(|r| r.name.clone()).collect();
        assert_eq!(result.gap_names(), expected);
        assert!(result.gap_skills.iter().all(|g| g.kind == GapKind::Missing));
    }

    #[test]
    fn test_full_match_is_low_risk() {
        let reqs = six_requirements();
        let held: Vec<_> = reqs.iter().map(|r| holding(r, Proficiency::Expert)).collect();
        let result = GapAnalyzer::default()
            .analyze(&held, &reqs, &ResourceCatalog::new())
            .unwrap();

        assert_eq!(result.match_percentage, 100);
        assert_eq!(result.risk_tier, RiskTier::Low);
        assert!(result.gap_skills.is_empty());
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_three_of_six_is_fifty_high() {
        let reqs = six_requirements();
        let held: Vec<_> = reqs[..3]
            .iter()
            .map(|r| holding(r, Proficiency::Intermediate))
            .collect();
        let result = GapAnalyzer::default()
            .analyze(&held, &reqs, &ResourceCatalog::new())
            .unwrap();

        assert_eq!(result.match_percentage, 50);
        assert_eq!(result.risk_tier, RiskTier::High);
        assert_eq!(result.matched_names(), vec!["Python", "Django", "SQL"]);
        assert_eq!(result.gap_names(), vec!["Git", "Docker", "AWS"]);
    }

    #[test]
    fn test_five_of_six_rounds_to_eighty_three_low() {
        let reqs = six_requirements();
        let held: Vec<_> = reqs[..5]
            .iter()
            .map(|r| holding(r, Proficiency::Intermediate))
            .collect();
        let result = GapAnalyzer::default()
            .analyze(&held, &reqs, &ResourceCatalog::new())
            .unwrap();

        assert_eq!(result.match_percentage, 83);
        assert_eq!(result.risk_tier, RiskTier::Low);
    }

    #[test]
    fn test_under_proficient_is_a_gap() {
        let reqs = vec![requirement("Rust", Proficiency::Expert, true)];
        let held = vec![holding(&reqs[0], Proficiency::Intermediate)];
        let result = GapAnalyzer::default()
            .analyze(&held, &reqs, &ResourceCatalog::new())
            .unwrap();

        assert_eq!(result.match_percentage, 0);
        let gap = &result.gap_skills[0];
        assert_eq!(gap.kind, GapKind::UnderProficient);
        assert_eq!(gap.student_level, Some(Proficiency::Intermediate));
        assert_eq!(gap.required_level, Proficiency::Expert);
        assert_eq!(result.recommendations[0].priority, 3);
    }

    #[test]
    fn test_percentage_matches_brute_force() {
        // Every combination of student levels (absent / Basic / Intermediate / Expert)
        // over a requirement list with mixed minimum levels.
        let levels = [
            Proficiency::Basic,
            Proficiency::Expert,
            Proficiency::Intermediate,
            Proficiency::Basic,
            Proficiency::Expert,
        ];
        let reqs: Vec<_> = levels
            .iter()
            .enumerate()
            .map(|(i, l)| requirement(&format!("skill-{i}"), *l, i % 2 == 0))
            .collect();
        let analyzer = GapAnalyzer::default();

        for combo in 0..4usize.pow(reqs.len() as u32) {
            let mut held = Vec::new();
            let mut code = combo;
            for req in &reqs {
                let choice = code % 4;
                code /= 4;
                if choice > 0 {
                    held.push(holding(req, Proficiency::ALL[choice - 1]));
                }
            }

            let brute = reqs
                .iter()
                .filter(|r| {
                    held.iter()
                        .any(|h| h.skill_id == r.skill_id && h.level >= r.min_level)
                })
                .count();
            let expected = (100.0 * brute as f64 / reqs.len() as f64 + 0.5).floor() as u8;

            let result = analyzer
                .analyze(&held, &reqs, &ResourceCatalog::new())
                .unwrap();
            assert_eq!(result.matched_count, brute);
            assert_eq!(result.match_percentage, expected, "combo {combo}");
            assert_eq!(result.matched_count + result.gap_skills.len(), reqs.len());
        }
    }

    #[test]
    fn test_rounding_is_half_up() {
        assert_eq!(match_percentage(1, 8), 13); // 12.5
        assert_eq!(match_percentage(1, 3), 33);
        assert_eq!(match_percentage(2, 3), 67);
        assert_eq!(match_percentage(0, 1), 0);
        assert_eq!(match_percentage(7, 7), 100);
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let reqs = six_requirements();
        let held = vec![holding(&reqs[1], Proficiency::Basic)];
        let mut catalog = ResourceCatalog::new();
        catalog.insert(
            reqs[0].skill_id,
            vec![LearningResource {
                id: Uuid::new_v4(),
                skill_id: reqs[0].skill_id,
                title: "Python docs".to_string(),
                url: "https://docs.python.org".to_string(),
                kind: ResourceKind::Documentation,
                difficulty: Difficulty::Beginner,
                estimated_hours: 10,
                is_free: true,
            }],
        );

        let analyzer = GapAnalyzer::default();
        let first = analyzer.analyze(&held, &reqs, &catalog).unwrap();
        let second = analyzer.analyze(&held, &reqs, &catalog).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.gap_skills[0].resources.len(), 1);
    }

    #[test]
    fn test_resource_cap_applies_per_gap() {
        let reqs = vec![requirement("Kubernetes", Proficiency::Basic, true)];
        let skill_id = reqs[0].skill_id;
        let mut catalog = ResourceCatalog::new();
        catalog.insert(
            skill_id,
            (0..5)
                .map(|i| LearningResource {
                    id: Uuid::new_v4(),
                    skill_id,
                    title: format!("k8s-{i}"),
                    url: format!("https://k8s.example/{i}"),
                    kind: ResourceKind::Video,
                    difficulty: Difficulty::Advanced,
                    estimated_hours: 10 - i,
                    is_free: i % 2 == 0,
                })
                .collect(),
        );

        let result = GapAnalyzer::new(2).analyze(&[], &reqs, &catalog).unwrap();
        let titles: Vec<_> = result.gap_skills[0]
            .resources
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, vec!["k8s-4", "k8s-2"]);
    }

    #[test]
    fn test_extra_skills_and_recommendation_groups() {
        let reqs = vec![
            requirement("Java", Proficiency::Intermediate, true),
            requirement("React", Proficiency::Basic, false),
        ];
        let extra = HeldSkill {
            skill_id: Uuid::new_v4(),
            name: "Photoshop".to_string(),
            level: Proficiency::Expert,
            verified: true,
        };
        let result = GapAnalyzer::default()
            .analyze(&[extra], &reqs, &ResourceCatalog::new())
            .unwrap();

        assert_eq!(result.extra_skills.len(), 1);
        assert_eq!(result.extra_skills[0].name, "Photoshop");
        let priorities: Vec<u8> = result.recommendations.iter().map(|r| r.priority).collect();
        assert_eq!(priorities, vec![1, 2]);
        assert_eq!(result.recommendations[0].skills, vec!["Java"]);
        assert_eq!(result.recommendations[1].skills, vec!["React"]);
        assert!(result.summary.contains("0 out of 2"));
    }
}
