pub mod error;
pub mod execution;
pub mod logging;

#[cfg(test)]
mod tests;
