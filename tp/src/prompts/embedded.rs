//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// Packing list prompt
pub const PACKING_LIST: &str = include_str!("../../prompts/packing-list.pmt");

/// Day-by-day routine prompt
pub const DAILY_ROUTINE: &str = include_str!("../../prompts/daily-routine.pmt");

/// Recommended sightseeing spots prompt
pub const RECOMMENDED_SPOTS: &str = include_str!("../../prompts/recommended-spots.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "packing-list" => Some(PACKING_LIST),
        "daily-routine" => Some(DAILY_ROUTINE),
        "recommended-spots" => Some(RECOMMENDED_SPOTS),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}
