// Skill gap analysis: the pure analyzer plus the handlers that feed it.
// Everything except `handlers` is storage-free and synchronous.

pub mod analyzer;
pub mod handlers;
pub mod proficiency;
pub mod resources;
pub mod risk;
pub mod roadmap;
