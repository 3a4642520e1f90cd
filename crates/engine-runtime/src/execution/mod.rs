pub mod factory;
pub mod jobs;
