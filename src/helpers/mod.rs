//! Helper functions for derived post fields

pub mod date;
pub mod reading_time;

pub use date::format_date;
pub use reading_time::estimate;
