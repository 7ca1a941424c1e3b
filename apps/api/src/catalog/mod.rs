// Reference data: skills, companies and their roles, learning resources.
// Read-only over HTTP; loaded through `seed` or managed directly in the database.

pub mod handlers;
pub mod seed;
