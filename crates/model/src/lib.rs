pub mod core;
pub mod execution;
pub mod sheet;
