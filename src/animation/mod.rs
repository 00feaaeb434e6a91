pub mod palette;
pub mod schedule;
