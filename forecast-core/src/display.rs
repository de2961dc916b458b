//! Pure display derivations over decoded forecast data.
//!
//! Nothing here fails: unparseable input degrades to an empty string or to
//! the placeholder pair, so one bad row never blocks rendering the rest.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use uuid::Uuid;

use crate::model::HourlyForecast;

/// Date half of the fallback returned by [`split_timestamp`].
pub const PLACEHOLDER_DATE: &str = "----年--月--日";
/// Hour half of the fallback returned by [`split_timestamp`].
pub const PLACEHOLDER_HOUR: &str = "--:--";

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";
// `9` marks an ASCII digit, anything else must match literally.
const DATE_SHAPE: &[u8] = b"9999-99-99";
const TIMESTAMP_SHAPE: &[u8] = b"9999-99-99 99:99";
const ICON_SCHEME: &str = "https:";

/// chrono tolerates padding, signs and short fields; the API never sends those.
fn has_shape(input: &str, shape: &[u8]) -> bool {
    input.len() == shape.len()
        && input.bytes().zip(shape).all(|(b, &s)| match s {
            b'9' => b.is_ascii_digit(),
            _ => b == s,
        })
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    if !has_shape(date, DATE_SHAPE) {
        return None;
    }
    NaiveDate::parse_from_str(date, DATE_FORMAT).ok()
}

fn parse_timestamp(time: &str) -> Option<NaiveDateTime> {
    if !has_shape(time, TIMESTAMP_SHAPE) {
        return None;
    }
    NaiveDateTime::parse_from_str(time, TIMESTAMP_FORMAT).ok()
}

/// Conventions used for long-form dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayLocale {
    /// `2024年12月23日`
    #[default]
    Japanese,
    /// `December 23, 2024`
    English,
}

impl DisplayLocale {
    /// Pick the locale matching an API `lang` code.
    pub fn from_language(code: &str) -> Self {
        if code.trim().eq_ignore_ascii_case("ja") {
            DisplayLocale::Japanese
        } else {
            DisplayLocale::English
        }
    }
}

/// `"2024-12-23"` → `"2024年12月23日"`, or `""` when the input is not a `YYYY-MM-DD` date.
pub fn format_display_date(date: &str) -> String {
    format_display_date_in(date, DisplayLocale::Japanese)
}

pub fn format_display_date_in(date: &str, locale: DisplayLocale) -> String {
    let Some(date) = parse_date(date) else {
        return String::new();
    };

    match locale {
        DisplayLocale::Japanese => date.format("%Y年%m月%d日").to_string(),
        DisplayLocale::English => date.format("%B %-d, %Y").to_string(),
    }
}

/// Split a `YYYY-MM-DD HH:mm` timestamp into a long date and the bare hour
/// (`"2024-12-23 09:00"` → `("2024年12月23日", "9")`). Minutes are dropped.
///
/// Returns ([`PLACEHOLDER_DATE`], [`PLACEHOLDER_HOUR`]) when the input does
/// not parse.
pub fn split_timestamp(time: &str) -> (String, String) {
    split_timestamp_in(time, DisplayLocale::Japanese)
}

pub fn split_timestamp_in(time: &str, locale: DisplayLocale) -> (String, String) {
    let Some(ts) = parse_timestamp(time) else {
        tracing::debug!(time, "unparseable hourly timestamp, using placeholders");
        return (PLACEHOLDER_DATE.to_string(), PLACEHOLDER_HOUR.to_string());
    };

    let date = match locale {
        DisplayLocale::Japanese => format!("{}年{}月{}日", ts.year(), ts.month(), ts.day()),
        DisplayLocale::English => ts.format("%B %-d, %Y").to_string(),
    };

    (date, ts.hour().to_string())
}

/// Lunar phases as named by the API, folded onto one asset each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoonPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    /// The API sends both "Third Quarter" and "Last Quarter".
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    pub const fn all() -> &'static [MoonPhase] {
        &[
            MoonPhase::NewMoon,
            MoonPhase::WaxingCrescent,
            MoonPhase::FirstQuarter,
            MoonPhase::WaxingGibbous,
            MoonPhase::FullMoon,
            MoonPhase::WaningGibbous,
            MoonPhase::LastQuarter,
            MoonPhase::WaningCrescent,
        ]
    }

    /// Match a phase name, ignoring surrounding whitespace.
    pub fn from_api_name(name: &str) -> Option<Self> {
        match name.trim() {
            "New Moon" => Some(MoonPhase::NewMoon),
            "Waxing Crescent" => Some(MoonPhase::WaxingCrescent),
            "First Quarter" => Some(MoonPhase::FirstQuarter),
            "Waxing Gibbous" => Some(MoonPhase::WaxingGibbous),
            "Full Moon" => Some(MoonPhase::FullMoon),
            "Waning Gibbous" => Some(MoonPhase::WaningGibbous),
            "Third Quarter" | "Last Quarter" => Some(MoonPhase::LastQuarter),
            "Waning Crescent" => Some(MoonPhase::WaningCrescent),
            _ => None,
        }
    }

    /// Image asset name for the phase.
    pub fn asset_key(&self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::FullMoon => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }
}

/// Asset key for an API phase name; `""` means "no asset".
pub fn resolve_moon_phase_asset(phase: &str) -> &'static str {
    MoonPhase::from_api_name(phase).map_or("", |p| p.asset_key())
}

/// Turn the API's scheme-relative icon path into a fetchable URL.
pub fn resolve_icon_url(icon: &str) -> String {
    format!("{ICON_SCHEME}{icon}")
}

/// One hourly row ready for a list view. Built fresh on every render.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyDisplayForecast {
    /// List identity only; not stable across projections.
    pub id: Uuid,
    pub date: String,
    pub hour: String,
    pub icon: String,
    pub temperature: f64,
    pub chance_of_rain: f64,
}

impl HourlyDisplayForecast {
    pub fn icon_url(&self) -> String {
        resolve_icon_url(&self.icon)
    }
}

impl HourlyForecast {
    pub fn to_display(&self) -> HourlyDisplayForecast {
        self.to_display_in(DisplayLocale::Japanese)
    }

    pub fn to_display_in(&self, locale: DisplayLocale) -> HourlyDisplayForecast {
        let (date, hour) = split_timestamp_in(&self.time, locale);

        HourlyDisplayForecast {
            id: Uuid::new_v4(),
            date,
            hour,
            icon: self.condition.icon.clone(),
            temperature: self.temperature,
            chance_of_rain: self.chance_of_rain,
        }
    }
}
