pub mod constants;
pub mod poly;
pub mod signal;
