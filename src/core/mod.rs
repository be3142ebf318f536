pub mod interval;
pub mod primitives;
pub mod time_unit;

pub use interval::TimeInterval;
pub use primitives::{combine_date_time, format_timestamp, parse_time_of_day, parse_timestamp};
pub use time_unit::TimeUnit;
