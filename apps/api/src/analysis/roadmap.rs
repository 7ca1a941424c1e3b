use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{AnalysisResult, SkillGap};

const SKILLS_PER_WEEK: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapWeek {
    pub week: usize,
    pub skills: Vec<String>,
    pub estimated_hours: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningRoadmap {
    pub total_weeks: usize,
    pub weeks: Vec<RoadmapWeek>,
    pub message: String,
}

/// Week-by-week plan over the gaps of an analysis: mandatory skills first,
/// easier skills before harder ones, two skills per week.
pub fn build_roadmap(result: &AnalysisResult) -> LearningRoadmap {
    let mut ordered: Vec<&SkillGap> = result.gap_skills.iter().collect();
    ordered.sort_by_key(|g| (!g.is_mandatory, g.difficulty));

    let weeks: Vec<RoadmapWeek> = ordered
        .chunks(SKILLS_PER_WEEK)
        .enumerate()
        .map(|(i, chunk)| RoadmapWeek {
            week: i + 1,
            skills: chunk.iter().map(|g| g.name.clone()).collect(),
            estimated_hours: chunk
                .iter()
                .flat_map(|g| g.resources.iter())
                .map(|r| u64::from(r.estimated_hours))
                .sum(),
        })
        .collect();

    let total_weeks = weeks.len();
    let message = if total_weeks == 0 {
        "No gaps to close - you already meet every requirement for this role.".to_string()
    } else {
        format!("Complete upskilling possible in approximately {total_weeks} weeks.")
    };

    LearningRoadmap {
        total_weeks,
        weeks,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::{GapAnalyzer, RequiredSkill};
    use crate::analysis::proficiency::{Difficulty, Proficiency, ResourceKind};
    use crate::analysis::resources::{LearningResource, ResourceCatalog};
    use uuid::Uuid;

    fn requirement(name: &str, is_mandatory: bool, difficulty: Difficulty) -> RequiredSkill {
        RequiredSkill {
            skill_id: Uuid::new_v4(),
            name: name.to_string(),
            min_level: Proficiency::Basic,
            is_mandatory,
            difficulty,
        }
    }

    fn resource_for(req: &RequiredSkill, hours: u32) -> LearningResource {
        LearningResource {
            id: Uuid::new_v4(),
            skill_id: req.skill_id,
            title: format!("{} course", req.name),
            url: "https://learn.example".to_string(),
            kind: ResourceKind::Course,
            difficulty: req.difficulty,
            estimated_hours: hours,
            is_free: true,
        }
    }

    #[test]
    fn test_mandatory_then_easier_first() {
        let reqs = vec![
            requirement("Kubernetes", false, Difficulty::Advanced),
            requirement("Redis", true, Difficulty::Advanced),
            requirement("Git", true, Difficulty::Beginner),
            requirement("AWS", false, Difficulty::Intermediate),
            requirement("Docker", true, Difficulty::Intermediate),
        ];
        let result = GapAnalyzer::default()
            .analyze(&[], &reqs, &ResourceCatalog::new())
            .unwrap();

        let roadmap = build_roadmap(&result);
        assert_eq!(roadmap.total_weeks, 3);
        assert_eq!(roadmap.weeks[0].skills, vec!["Git", "Docker"]);
        assert_eq!(roadmap.weeks[1].skills, vec!["Redis", "AWS"]);
        assert_eq!(roadmap.weeks[2].skills, vec!["Kubernetes"]);
        assert_eq!(roadmap.weeks[2].week, 3);
    }

    #[test]
    fn test_weekly_hours_sum_recommended_resources() {
        let reqs = vec![
            requirement("Python", true, Difficulty::Beginner),
            requirement("Django", true, Difficulty::Intermediate),
        ];
        let mut catalog = ResourceCatalog::new();
        catalog.insert(
            reqs[0].skill_id,
            vec![resource_for(&reqs[0], 10), resource_for(&reqs[0], 5)],
        );
        catalog.insert(reqs[1].skill_id, vec![resource_for(&reqs[1], 20)]);

        let result = GapAnalyzer::default().analyze(&[], &reqs, &catalog).unwrap();
        let roadmap = build_roadmap(&result);
        assert_eq!(roadmap.weeks.len(), 1);
        assert_eq!(roadmap.weeks[0].estimated_hours, 35);
    }

    #[test]
    fn test_weekly_hours_do_not_overflow() {
        let reqs = vec![
            requirement("Rust", true, Difficulty::Advanced),
            requirement("Go", true, Difficulty::Advanced),
        ];
        let huge = i32::MAX as u32;
        let mut catalog = ResourceCatalog::new();
        for req in &reqs {
            catalog.insert(req.skill_id, (0..3).map(|_| resource_for(req, huge)).collect());
        }

        let result = GapAnalyzer::default().analyze(&[], &reqs, &catalog).unwrap();
        let roadmap = build_roadmap(&result);
        assert_eq!(roadmap.weeks.len(), 1);
        assert_eq!(roadmap.weeks[0].estimated_hours, 6 * u64::from(huge));
    }

    #[test]
    fn test_no_gaps_means_no_weeks() {
        let reqs = vec![requirement("SQL", true, Difficulty::Beginner)];
        let held = vec![crate::analysis::analyzer::HeldSkill {
            skill_id: reqs[0].skill_id,
            name: "SQL".to_string(),
            level: Proficiency::Expert,
            verified: true,
        }];
        let result = GapAnalyzer::default()
            .analyze(&held, &reqs, &ResourceCatalog::new())
            .unwrap();

        let roadmap = build_roadmap(&result);
        assert_eq!(roadmap.total_weeks, 0);
        assert!(roadmap.weeks.is_empty());
        assert!(roadmap.message.contains("No gaps"));
    }
}
