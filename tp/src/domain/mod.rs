//! Domain types for TripPack
//!
//! Trip form intake and validation, plus the opaque forecast payload the
//! weather provider hands back.

mod forecast;
mod trip;

pub use forecast::Forecast;
pub use trip::{DATE_FORMAT, TripError, TripForm, TripInfo, stay_days};
