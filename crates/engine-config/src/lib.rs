pub mod defaults;
pub mod document;
pub mod env;
pub mod error;
pub mod settings;
