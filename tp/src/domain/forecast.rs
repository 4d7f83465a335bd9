//! Opaque forecast payload

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Forecast body as returned by the weather provider
///
/// The structure belongs to the provider. It is never inspected beyond logging
/// and is embedded into prompts verbatim as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Forecast(Value);

impl Forecast {
    pub fn new(body: Value) -> Self {
        Self(body)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Compact JSON text for prompt embedding
    pub fn to_json(&self) -> String {
        self.0.to_string()
    }

    /// Number of forecast days in a WeatherAPI-shaped body, if present
    pub fn day_count(&self) -> Option<usize> {
        self.0
            .get("forecast")
            .and_then(|f| f.get("forecastday"))
            .and_then(Value::as_array)
            .map(Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_day_count() {
        let forecast = Forecast::new(json!({
            "location": {"name": "Paris"},
            "forecast": {"forecastday": [{"date": "2024-06-01"}, {"date": "2024-06-02"}]}
        }));
        assert_eq!(forecast.day_count(), Some(2));
    }

    #[test]
    fn test_day_count_unknown_shape() {
        assert_eq!(Forecast::new(json!({"days": []})).day_count(), None);
    }

    #[test]
    fn test_to_json_is_verbatim() {
        let body = json!({"forecast": {"forecastday": []}});
        let forecast = Forecast::new(body.clone());
        let reparsed: Value = serde_json::from_str(&forecast.to_json()).unwrap();
        assert_eq!(reparsed, body);
    }
}
