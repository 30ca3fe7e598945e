pub mod averages;
pub mod movements;
pub mod playoffs;
pub mod settings;

#[cfg(test)]
pub(crate) mod testing;
