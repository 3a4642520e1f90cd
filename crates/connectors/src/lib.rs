pub mod retry;
pub mod sheets;
pub mod sql;
