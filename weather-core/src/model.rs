use serde::Serialize;

use crate::error::FetchError;

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// One entry of the provider's `weather` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    summary: String,
    description: String,
    icon_code: String,
}

impl Condition {
    pub(crate) fn new(summary: String, description: String, icon_code: String) -> Self {
        Self {
            summary,
            description,
            icon_code,
        }
    }

    /// Short group name, e.g. "Clouds".
    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn icon_code(&self) -> &str {
        &self.icon_code
    }

    /// Provider-hosted 2x icon for this condition.
    pub fn icon_url(&self) -> String {
        format!("{ICON_BASE_URL}/{}@2x.png", self.icon_code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Wind {
    speed_meters_per_second: f64,
    direction_degrees: f64,
}

impl Wind {
    pub(crate) fn new(speed_meters_per_second: f64, direction_degrees: f64) -> Self {
        Self {
            speed_meters_per_second,
            direction_degrees,
        }
    }

    pub fn speed_meters_per_second(&self) -> f64 {
        self.speed_meters_per_second
    }

    pub fn direction_degrees(&self) -> f64 {
        self.direction_degrees
    }
}

/// Validated snapshot of current conditions for one location.
///
/// Only the provider's schema validation builds one of these, so a reading
/// always has a non-empty location and at least one condition. Temperatures
/// are kept in Kelvin exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReading {
    location: String,
    temperature_kelvin: f64,
    feels_like_kelvin: f64,
    humidity_percent: f64,
    conditions: Vec<Condition>,
    wind: Wind,
}

impl WeatherReading {
    /// Returns `None` when `location` is empty or `conditions` has no entries.
    pub(crate) fn new(
        location: String,
        temperature_kelvin: f64,
        feels_like_kelvin: f64,
        humidity_percent: f64,
        conditions: Vec<Condition>,
        wind: Wind,
    ) -> Option<Self> {
        if location.is_empty() || conditions.is_empty() {
            return None;
        }

        Some(Self {
            location,
            temperature_kelvin,
            feels_like_kelvin,
            humidity_percent,
            conditions,
            wind,
        })
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn temperature_kelvin(&self) -> f64 {
        self.temperature_kelvin
    }

    pub fn feels_like_kelvin(&self) -> f64 {
        self.feels_like_kelvin
    }

    pub fn humidity_percent(&self) -> f64 {
        self.humidity_percent
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// The condition that gets displayed.
    pub fn primary_condition(&self) -> &Condition {
        // non-empty by construction
        &self.conditions[0]
    }

    pub fn wind(&self) -> Wind {
        self.wind
    }
}

/// Result of exactly one fetch attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum SearchOutcome {
    Success(WeatherReading),
    Failure(String),
}

impl SearchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SearchOutcome::Success(_))
    }

    pub fn reading(&self) -> Option<&WeatherReading> {
        match self {
            SearchOutcome::Success(reading) => Some(reading),
            SearchOutcome::Failure(_) => None,
        }
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            SearchOutcome::Success(_) => None,
            SearchOutcome::Failure(message) => Some(message),
        }
    }
}

impl From<Result<WeatherReading, FetchError>> for SearchOutcome {
    fn from(result: Result<WeatherReading, FetchError>) -> Self {
        match result {
            Ok(reading) => SearchOutcome::Success(reading),
            Err(err) => SearchOutcome::Failure(err.user_message()),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::TransportError;

    pub(crate) fn london() -> WeatherReading {
        let clouds = Condition::new("Clouds".into(), "overcast clouds".into(), "04d".into());

        WeatherReading::new(
            "London".to_string(),
            283.0,
            281.5,
            70.0,
            vec![clouds],
            Wind::new(3.6, 200.0),
        )
        .expect("valid reading")
    }

    #[test]
    fn reading_requires_location_and_condition() {
        let wind = Wind::new(1.0, 90.0);
        let cond = Condition::new("Clear".into(), "clear sky".into(), "01d".into());

        let nameless = WeatherReading::new(String::new(), 1.0, 1.0, 1.0, vec![cond], wind);
        assert!(nameless.is_none());

        let cloudless = WeatherReading::new("Oslo".into(), 1.0, 1.0, 1.0, vec![], wind);
        assert!(cloudless.is_none());
    }

    #[test]
    fn primary_condition_is_first() {
        let reading = london();
        assert_eq!(reading.primary_condition().icon_code(), "04d");
        assert_eq!(
            reading.primary_condition().icon_url(),
            "https://openweathermap.org/img/wn/04d@2x.png"
        );
    }

    #[test]
    fn outcome_from_error_uses_user_message() {
        let outcome = SearchOutcome::from(Err(FetchError::Transport(TransportError::Status(404))));
        assert_eq!(outcome.failure_message(), Some("City not found"));
        assert!(outcome.reading().is_none());

        let outcome = SearchOutcome::from(Ok(london()));
        assert!(outcome.is_success());
        assert!(outcome.failure_message().is_none());
    }

    #[test]
    fn outcome_serializes_tagged() {
        let json = serde_json::to_value(SearchOutcome::Failure("City is required".into()))
            .expect("serialize");
        assert_eq!(json["status"], "failure");
        assert_eq!(json["data"], "City is required");

        let json = serde_json::to_value(SearchOutcome::Success(london())).expect("serialize");
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["location"], "London");
        assert_eq!(json["data"]["conditions"][0]["icon_code"], "04d");
    }
}
