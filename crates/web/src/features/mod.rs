pub mod movements;
pub mod playoffs;
pub mod rankings;
