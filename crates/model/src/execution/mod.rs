pub mod errors;
pub mod target;
pub mod view;
