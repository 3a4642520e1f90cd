pub mod copy;
pub mod create_view;
pub mod truncate;
