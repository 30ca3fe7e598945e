pub mod common;
pub mod movement;
pub mod playoff;
pub mod ranking;
