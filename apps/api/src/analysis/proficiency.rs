use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Self-reported or required skill level. Variant order is the comparison order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Proficiency {
    Basic,
    Intermediate,
    Expert,
}

/// Difficulty label shared by skills and learning resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Video,
    Article,
    Course,
    Documentation,
    Book,
    Tutorial,
    Other,
}

#[derive(Debug, Error, PartialEq)]
#[error("invalid stored {kind} '{value}'")]
pub struct ParseLevelError {
    pub kind: &'static str,
    pub value: String,
}

impl Proficiency {
    #[cfg(test)]
    pub const ALL: [Proficiency; 3] = [
        Proficiency::Basic,
        Proficiency::Intermediate,
        Proficiency::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Proficiency::Basic => "Basic",
            Proficiency::Intermediate => "Intermediate",
            Proficiency::Expert => "Expert",
        }
    }

    /// True when this level satisfies a requirement of `required`.
    pub fn meets(self, required: Proficiency) -> bool {
        self >= required
    }
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Video => "Video",
            ResourceKind::Article => "Article",
            ResourceKind::Course => "Course",
            ResourceKind::Documentation => "Documentation",
            ResourceKind::Book => "Book",
            ResourceKind::Tutorial => "Tutorial",
            ResourceKind::Other => "Other",
        }
    }
}

impl FromStr for Proficiency {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Basic" => Ok(Proficiency::Basic),
            "Intermediate" => Ok(Proficiency::Intermediate),
            "Expert" => Ok(Proficiency::Expert),
            other => Err(ParseLevelError {
                kind: "proficiency",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for Difficulty {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Beginner" => Ok(Difficulty::Beginner),
            "Intermediate" => Ok(Difficulty::Intermediate),
            "Advanced" => Ok(Difficulty::Advanced),
            other => Err(ParseLevelError {
                kind: "difficulty",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for ResourceKind {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Video" => Ok(ResourceKind::Video),
            "Article" => Ok(ResourceKind::Article),
            "Course" => Ok(ResourceKind::Course),
            "Documentation" => Ok(ResourceKind::Documentation),
            "Book" => Ok(ResourceKind::Book),
            "Tutorial" => Ok(ResourceKind::Tutorial),
            "Other" => Ok(ResourceKind::Other),
            other => Err(ParseLevelError {
                kind: "resource kind",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
