pub mod credentials;
pub mod enrich;
pub mod error;
pub mod export;
pub mod load;
pub mod paths;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;
