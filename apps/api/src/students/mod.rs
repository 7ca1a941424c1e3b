// Student profiles, self-reported skill sets and analysis history.

pub mod handlers;
