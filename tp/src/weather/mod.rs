//! Weather lookup
//!
//! One forecast request per trip, no retries. The provider is reached through
//! the [`WeatherProvider`] trait so the flow can be exercised without network.

use tracing::debug;

pub mod client;
mod error;

pub use client::{WeatherApiClient, WeatherProvider};
pub use error::WeatherError;

/// Number of forecast days to request for a stay
///
/// The provider is asked for the next N days from today, so only the length of
/// the stay matters. `horizon` is the provider maximum; `None` leaves it unclamped.
pub fn forecast_days(stay_days: u32, horizon: Option<u32>) -> u32 {
    debug!(stay_days, ?horizon, "forecast_days: called");
    match horizon {
        Some(max) => stay_days.min(max),
        None => stay_days,
    }
}
