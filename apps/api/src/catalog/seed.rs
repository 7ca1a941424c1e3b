//! Sample reference data: skills, companies, roles with requirements, and
//! learning resources. Loading is idempotent; rows are keyed by name/title.

use crate::analysis::proficiency::{Difficulty, Proficiency, ResourceKind};

pub struct SeedSkill {
    pub name: &'static str,
    pub category: &'static str,
    pub difficulty: Difficulty,
}

pub struct SeedCompany {
    pub name: &'static str,
    pub code: &'static str,
    pub headquarters: &'static str,
}

pub struct SeedRequirement {
    pub skill: &'static str,
    pub min_level: Proficiency,
    pub is_mandatory: bool,
}

pub struct SeedRole {
    pub company: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub required_experience: &'static str,
    pub salary_range: &'static str,
    pub requirements: Vec<SeedRequirement>,
}

pub struct SeedResource {
    pub skill: &'static str,
    pub title: &'static str,
    pub url: &'static str,
    pub kind: ResourceKind,
    pub difficulty: Difficulty,
    pub estimated_hours: u32,
    pub is_free: bool,
}

pub struct SeedCatalog {
    pub skills: Vec<SeedSkill>,
    pub companies: Vec<SeedCompany>,
    pub roles: Vec<SeedRole>,
    pub resources: Vec<SeedResource>,
}

const SKILLS: &[(&str, &str, Difficulty)] = &[
    ("Python", "Programming", Difficulty::Beginner),
    ("Java", "Programming", Difficulty::Beginner),
    ("JavaScript", "Programming", Difficulty::Beginner),
    ("C++", "Programming", Difficulty::Intermediate),
    ("Django", "Web Framework", Difficulty::Intermediate),
    ("Spring Boot", "Web Framework", Difficulty::Intermediate),
    ("React", "Web Framework", Difficulty::Intermediate),
    ("Angular", "Web Framework", Difficulty::Intermediate),
    ("MySQL", "Database", Difficulty::Beginner),
    ("PostgreSQL", "Database", Difficulty::Beginner),
    ("MongoDB", "Database", Difficulty::Intermediate),
    ("SQL", "Database", Difficulty::Beginner),
    ("Git", "Version Control", Difficulty::Beginner),
    ("Docker", "DevOps", Difficulty::Intermediate),
    ("Kubernetes", "DevOps", Difficulty::Advanced),
    ("AWS", "Cloud", Difficulty::Intermediate),
    ("Azure", "Cloud", Difficulty::Intermediate),
    ("REST API", "API", Difficulty::Intermediate),
    ("Microservices", "Architecture", Difficulty::Advanced),
];

const COMPANIES: &[(&str, &str, &str)] = &[
    ("TCS", "TCS", "Mumbai, India"),
    ("Infosys", "INFY", "Bangalore, India"),
    ("Wipro", "WIPRO", "Bangalore, India"),
    ("HCL Technologies", "HCL", "Noida, India"),
    ("Google", "GOOG", "Mountain View, USA"),
    ("Microsoft", "MSFT", "Redmond, USA"),
    ("Amazon", "AMZN", "Seattle, USA"),
];

/// (company, title, description, experience, salary, required skills)
const ROLES: &[(&str, &str, &str, &str, &str, &[&str])] = &[
    ("TCS", "Java Developer", "Develop enterprise Java applications", "0-2 years", "3-5 LPA",
        &["Java", "SQL", "Git", "Spring Boot"]),
    ("TCS", "Python Developer", "Build scalable Python applications", "0-2 years", "3-5 LPA",
        &["Python", "Django", "SQL", "Git"]),
    ("Infosys", "Full Stack Developer", "Develop front-end and back-end applications", "1-3 years", "4-7 LPA",
        &["Java", "React", "SQL", "REST API", "Git"]),
    ("Infosys", "DevOps Engineer", "Manage infrastructure and deployment", "2-4 years", "6-10 LPA",
        &["Docker", "Kubernetes", "AWS", "Git", "Python"]),
    ("Wipro", "QA Automation Engineer", "Automate testing and quality assurance", "1-2 years", "3-5 LPA",
        &["Python", "SQL", "Git", "REST API"]),
    ("Google", "Software Engineer", "Develop scalable software solutions", "0-3 years", "15-25 LPA",
        &["Python", "Java", "JavaScript", "SQL", "Microservices"]),
    ("Microsoft", "Cloud Solution Architect", "Design cloud-based solutions", "3-5 years", "20-30 LPA",
        &["Azure", "SQL", "Docker", "REST API"]),
    ("Amazon", "Backend Engineer", "Build high-performance backend systems", "1-3 years", "15-20 LPA",
        &["Java", "Python", "AWS", "SQL", "Microservices"]),
];

/// Core languages every seeded role treats as must-have.
const MANDATORY_SKILLS: &[&str] = &["Java", "Python", "SQL"];

/// (skill, title, url, kind, difficulty, hours, free)
const RESOURCES: &[(&str, &str, &str, ResourceKind, Difficulty, u32, bool)] = &[
    ("Python", "Python for Everybody", "https://www.coursera.org/learn/python",
        ResourceKind::Course, Difficulty::Beginner, 40, true),
    ("Python", "Python Crash Course", "https://nostarch.com/pythoncrashcourse2e",
        ResourceKind::Book, Difficulty::Beginner, 30, false),
    ("Java", "Java Programming Masterclass", "https://www.udemy.com/course/java-the-complete-java-developer-course",
        ResourceKind::Video, Difficulty::Intermediate, 80, false),
    ("Java", "Java Official Tutorials", "https://docs.oracle.com/javase/tutorial",
        ResourceKind::Documentation, Difficulty::Beginner, 25, true),
    ("Django", "Django for Beginners", "https://djangoforbeginners.com",
        ResourceKind::Book, Difficulty::Beginner, 20, false),
    ("Django", "Django Official Docs", "https://docs.djangoproject.com",
        ResourceKind::Documentation, Difficulty::Intermediate, 15, true),
    ("React", "React Official Tutorial", "https://react.dev",
        ResourceKind::Tutorial, Difficulty::Beginner, 10, true),
    ("React", "Complete React Course", "https://www.udemy.com/course/react-the-complete-guide",
        ResourceKind::Video, Difficulty::Intermediate, 48, false),
    ("SQL", "W3Schools SQL", "https://www.w3schools.com/sql",
        ResourceKind::Tutorial, Difficulty::Beginner, 8, true),
    ("SQL", "SQL in 100 Pages", "https://sql-in-100-pages.com",
        ResourceKind::Book, Difficulty::Beginner, 12, false),
    ("Docker", "Docker Getting Started", "https://www.docker.com/101-tutorial",
        ResourceKind::Tutorial, Difficulty::Beginner, 6, true),
    ("Docker", "Docker Mastery", "https://www.udemy.com/course/docker-mastery",
        ResourceKind::Video, Difficulty::Intermediate, 20, false),
    ("AWS", "AWS Free Tier Labs", "https://aws.amazon.com/free",
        ResourceKind::Tutorial, Difficulty::Beginner, 15, true),
    ("AWS", "AWS Solutions Architect", "https://aws.amazon.com/training",
        ResourceKind::Course, Difficulty::Advanced, 60, false),
];

pub fn sample_catalog() -> SeedCatalog {
    SeedCatalog {
        skills: SKILLS
            .iter()
            .map(|&(name, category, difficulty)| SeedSkill {
                name,
                category,
                difficulty,
            })
            .collect(),
        companies: COMPANIES
            .iter()
            .map(|&(name, code, headquarters)| SeedCompany {
                name,
                code,
                headquarters,
            })
            .collect(),
        roles: ROLES
            .iter()
            .map(
                |&(company, title, description, required_experience, salary_range, skills)| SeedRole {
                    company,
                    title,
                    description,
                    required_experience,
                    salary_range,
                    requirements: skills
                        .iter()
                        .map(|&skill| SeedRequirement {
                            skill,
                            min_level: Proficiency::Intermediate,
                            is_mandatory: MANDATORY_SKILLS.contains(&skill),
                        })
                        .collect(),
                },
            )
            .collect(),
        resources: RESOURCES
            .iter()
            .map(
                |&(skill, title, url, kind, difficulty, estimated_hours, is_free)| SeedResource {
                    skill,
                    title,
                    url,
                    kind,
                    difficulty,
                    estimated_hours,
                    is_free,
                },
            )
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_reference_resolves_to_a_seeded_skill() {
        let catalog = sample_catalog();
        let known = |name: &str| catalog.skills.iter().any(|s| s.name == name);

        for role in &catalog.roles {
            assert!(!role.requirements.is_empty(), "{} has no requirements", role.title);
            for req in &role.requirements {
                assert!(known(req.skill), "unknown skill {}", req.skill);
            }
            assert!(catalog.companies.iter().any(|c| c.name == role.company));
        }
        for resource in &catalog.resources {
            assert!(known(resource.skill), "unknown skill {}", resource.skill);
        }
    }

    #[test]
    fn test_core_languages_are_mandatory() {
        let catalog = sample_catalog();
        let python_dev = catalog
            .roles
            .iter()
            .find(|r| r.title == "Python Developer")
            .unwrap();
        let mandatory: Vec<_> = python_dev
            .requirements
            .iter()
            .filter(|r| r.is_mandatory)
            .map(|r| r.skill)
            .collect();
        assert_eq!(mandatory, vec!["Python", "SQL"]);
    }
}
