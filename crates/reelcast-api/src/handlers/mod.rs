pub mod generation;
pub mod session;
pub mod uploads;
