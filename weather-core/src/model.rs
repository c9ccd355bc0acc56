use serde::{Deserialize, Serialize};

/// One location's weather as served by `/api/weather/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: String,
    /// Current temperature, °C.
    pub temperature: f64,
    pub description: String,
    /// Relative humidity, percent.
    pub humidity: i64,
    /// Wind speed, km/h.
    pub wind_speed: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub forecast_7day: Vec<DayForecast>,
    pub bom_today_url: String,
    pub bom_7day_url: String,

    #[serde(default)]
    pub total_fire_ban: bool,

    /// `None` when the location does not publish fire danger ratings.
    #[serde(default)]
    pub fire_danger: Option<Vec<FireDangerDay>>,
}

/// A single day in the 7-day strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    /// Weekday letter, e.g. "F".
    pub day: String,
    pub temp_min: f64,
    pub temp_max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireDangerDay {
    pub day: String,
    /// Rating label as published, e.g. "High". Not restricted to the AFDRS set.
    pub rating: String,
    /// Fire Behaviour Index, if the source provides one.
    #[serde(default)]
    pub index: Option<i64>,
}

/// Body of `/api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "location": "Castlemaine",
        "temperature": 17.8,
        "description": "Partly cloudy",
        "humidity": 55,
        "wind_speed": 12.3,
        "temp_min": 11.2,
        "temp_max": 24.1,
        "forecast_7day": [{"day": "F", "temp_min": 13, "temp_max": 23}],
        "bom_today_url": "https://bom.example/castlemaine#today",
        "bom_7day_url": "https://bom.example/castlemaine#7-days"
    }"#;

    #[test]
    fn missing_fire_fields_default() {
        let report: WeatherReport = serde_json::from_str(MINIMAL).expect("valid report");

        assert!(!report.total_fire_ban);
        assert!(report.fire_danger.is_none());
        assert_eq!(report.forecast_7day[0].temp_min, 13.0);
    }

    #[test]
    fn null_fire_danger_is_none_and_null_index_is_none() {
        let mut value: serde_json::Value = serde_json::from_str(MINIMAL).expect("valid json");
        value["fire_danger"] = serde_json::Value::Null;
        let report: WeatherReport = serde_json::from_value(value.clone()).expect("valid report");
        assert!(report.fire_danger.is_none());

        value["fire_danger"] = serde_json::json!([
            {"day": "T", "rating": "High", "index": null},
            {"day": "F", "rating": "Extreme", "index": 87},
            {"day": "S", "rating": "Moderate"}
        ]);
        let report: WeatherReport = serde_json::from_value(value).expect("valid report");
        let days = report.fire_danger.expect("fire danger present");

        assert_eq!(days.len(), 3);
        assert_eq!(days[0].index, None);
        assert_eq!(days[1].index, Some(87));
        assert_eq!(days[2].index, None);
    }

    #[test]
    fn empty_fire_danger_stays_present() {
        let mut value: serde_json::Value = serde_json::from_str(MINIMAL).expect("valid json");
        value["fire_danger"] = serde_json::json!([]);
        let report: WeatherReport = serde_json::from_value(value).expect("valid report");

        assert_eq!(report.fire_danger, Some(Vec::new()));
    }
}
