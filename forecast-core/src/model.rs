//! Decoded shape of a WeatherAPI.com `forecast.json` response.
//!
//! Wire names that differ from ours are mapped with `#[serde(rename)]`; every
//! other field maps by identical name. Decoding is all-or-nothing: a missing
//! or mistyped required field fails the whole payload. `astro` is the only
//! field allowed to be absent.

use serde::{Deserialize, Serialize, Serializer};
use std::{fmt, str::FromStr};

use crate::display::{self, DisplayLocale, MoonPhase};

/// Root of one API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherInfo {
    pub location: Location,
    pub forecast: Forecast,
}

impl WeatherInfo {
    /// Decode a raw JSON body.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub region: String,
    pub country: String,
    #[serde(rename = "tz_id")]
    pub timezone_id: String,
    /// Local time as delivered by the API, not reparsed.
    #[serde(rename = "localtime")]
    pub local_time: String,
}

/// Days in the order the API returned them (day 0 = today).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    #[serde(rename = "forecastday")]
    pub forecasts_day: Vec<ForecastDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// `YYYY-MM-DD`
    pub date: String,
    pub day: DailyForecast,
    pub hour: Vec<HourlyForecast>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub astro: Option<Astro>,
}

impl ForecastDay {
    pub fn display_date(&self) -> String {
        display::format_display_date(&self.date)
    }

    pub fn display_date_in(&self, locale: DisplayLocale) -> String {
        display::format_display_date_in(&self.date, locale)
    }

    /// Lunar phase for the day, if the API sent one we recognise.
    pub fn moon_phase(&self) -> Option<MoonPhase> {
        self.astro.as_ref().and_then(Astro::phase)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    #[serde(rename = "maxtemp_c")]
    pub max_temp: f64,
    #[serde(rename = "mintemp_c")]
    pub min_temp: f64,
    /// 0..=100, passed through as received.
    #[serde(serialize_with = "serialize_percent")]
    pub daily_chance_of_rain: f64,
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    /// `YYYY-MM-DD HH:mm`
    pub time: String,
    #[serde(rename = "temp_c")]
    pub temperature: f64,
    pub condition: Condition,
    /// 0..=100, passed through as received.
    #[serde(serialize_with = "serialize_percent")]
    pub chance_of_rain: f64,
}

/// The API sends rain chances as integers; write whole values back the same way.
fn serialize_percent<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    if value.fract() == 0.0 && value.abs() <= MAX_EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    /// Scheme-relative path, e.g. `//cdn.weatherapi.com/weather/64x64/day/113.png`.
    pub icon: String,
}

impl Condition {
    pub fn icon_url(&self) -> String {
        display::resolve_icon_url(&self.icon)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Astro {
    pub moon_phase: String,
}

impl Astro {
    pub fn phase(&self) -> Option<MoonPhase> {
        MoonPhase::from_api_name(&self.moon_phase)
    }

    /// Numeric phase, only when the API sent a number instead of a name.
    /// Surrounding whitespace is ignored.
    pub fn moon_phase_value(&self) -> Option<f64> {
        self.moon_phase.trim().parse().ok()
    }
}

/// A point supplied by whatever provides the device location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| anyhow::anyhow!("Expected coordinate as 'lat,lon', got '{s}'"))?;

        let latitude: f64 = lat
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid latitude '{}'", lat.trim()))?;
        let longitude: f64 = lon
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid longitude '{}'", lon.trim()))?;

        Ok(Self { latitude, longitude })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{Value, json};

    fn hour(time: &str, temp: f64, rain: i64) -> Value {
        json!({
            "time": time,
            "temp_c": temp,
            "chance_of_rain": rain,
            "condition": { "text": "晴れ", "icon": "//cdn.weatherapi.com/weather/64x64/day/113.png" }
        })
    }

    fn day(date: &str, max: f64, min: f64, moon: Option<&str>) -> Value {
        let mut day = json!({
            "date": date,
            "day": {
                "maxtemp_c": max,
                "mintemp_c": min,
                "daily_chance_of_rain": 40,
                "condition": { "text": "曇り", "icon": "//cdn.weatherapi.com/weather/64x64/day/119.png" }
            },
            "hour": [
                hour(&format!("{date} 00:00"), min, 10),
                hour(&format!("{date} 11:00"), max, 40),
            ]
        });
        if let Some(phase) = moon {
            day["astro"] = json!({ "moon_phase": phase });
        }
        day
    }

    /// Three-day payload with the fields this crate decodes (plus a few it ignores).
    pub fn three_day(name: &str) -> Value {
        json!({
            "location": {
                "name": name,
                "region": "Iwate",
                "country": "Japan",
                "tz_id": "Asia/Tokyo",
                "localtime": "2024-12-23 10:15",
                "lat": 39.91,
                "lon": 141.09
            },
            "current": { "temp_c": 1.0 },
            "forecast": {
                "forecastday": [
                    day("2024-12-23", 4.5, -2.1, Some("Waning Gibbous")),
                    day("2024-12-24", 3.0, -3.4, Some("Third Quarter")),
                    day("2024-12-25", 2.2, -4.0, None),
                ]
            }
        })
    }
}
