//! Units formatting for log lines and the progress bar. Report output never
//! goes through these.

use std::time::Duration;

use byte_unit::{Byte, UnitType};

/// Payload size in the largest decimal unit that keeps the value above one
///
/// # Examples
/// ```
/// use bench_db::util::units::format_size;
///
/// assert!(format_size(1_000_000).ends_with("MB"));
/// ```
pub fn format_size(bytes: u64) -> String {
    let adjusted = Byte::from_u64(bytes).get_appropriate_unit(UnitType::Decimal);
    format!("{:.1}", adjusted)
}

/// Elapsed time truncated to whole milliseconds
pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = Duration::from_millis(elapsed.as_millis() as u64);
    humantime::format_duration(millis).to_string()
}
