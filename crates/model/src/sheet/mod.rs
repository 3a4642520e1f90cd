pub mod download;
pub mod format;
pub mod job;
pub mod page;
