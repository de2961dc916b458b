use std::fmt::Write;

use forecast_core::{
    DisplayLocale, ForecastDay, WeatherInfo, display::PLACEHOLDER_HOUR, resolve_moon_phase_asset,
};

struct Labels {
    rain: &'static str,
    moon: &'static str,
    icon: &'static str,
    local_time: &'static str,
    hour_suffix: &'static str,
}

fn labels(locale: DisplayLocale) -> Labels {
    match locale {
        DisplayLocale::Japanese => Labels {
            rain: "降水確率",
            moon: "月齢",
            icon: "アイコン",
            local_time: "現地時刻",
            hour_suffix: "時",
        },
        DisplayLocale::English => Labels {
            rain: "Chance of rain",
            moon: "Moon",
            icon: "Icon",
            local_time: "Local time",
            hour_suffix: ":00",
        },
    }
}

pub fn render_forecast(info: &WeatherInfo, locale: DisplayLocale, hourly: bool) -> String {
    let labels = labels(locale);
    let loc = &info.location;
    let mut out = String::new();

    let _ = writeln!(out, "{}, {}, {} ({})", loc.name, loc.region, loc.country, loc.timezone_id);
    let _ = writeln!(out, "{}: {}", labels.local_time, loc.local_time);

    for day in &info.forecast.forecasts_day {
        out.push('\n');
        render_day(&mut out, day, locale, &labels, hourly);
    }

    out
}

fn render_day(
    out: &mut String,
    day: &ForecastDay,
    locale: DisplayLocale,
    labels: &Labels,
    hourly: bool,
) {
    let date = match day.display_date_in(locale) {
        d if d.is_empty() => day.date.clone(),
        d => d,
    };
    let summary = &day.day;

    let _ = writeln!(out, "{date}  {}", summary.condition.text);
    let _ = writeln!(out, "  {}°C / {}°C", summary.max_temp, summary.min_temp);
    let _ = writeln!(out, "  {}: {}%", labels.rain, summary.daily_chance_of_rain);

    let moon = day.astro.as_ref().map_or("", |a| resolve_moon_phase_asset(&a.moon_phase));
    if !moon.is_empty() {
        let _ = writeln!(out, "  {}: {moon}", labels.moon);
    }

    let _ = writeln!(out, "  {}: {}", labels.icon, summary.condition.icon_url());

    if hourly {
        for hour in &day.hour {
            let row = hour.to_display_in(locale);
            let suffix = if row.hour == PLACEHOLDER_HOUR { "" } else { labels.hour_suffix };
            let _ = writeln!(
                out,
                "    {:>2}{}  {:>5}°C  {:>3}%  {}",
                row.hour, suffix, row.temperature, row.chance_of_rain, hour.condition.text
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn info() -> WeatherInfo {
        serde_json::from_value(json!({
            "location": {
                "name": "Obuke", "region": "Iwate", "country": "Japan",
                "tz_id": "Asia/Tokyo", "localtime": "2024-12-23 10:15"
            },
            "forecast": { "forecastday": [
                {
                    "date": "2024-12-23",
                    "day": {
                        "maxtemp_c": 4.5, "mintemp_c": -2.1, "daily_chance_of_rain": 40,
                        "condition": { "text": "曇り", "icon": "//cdn/119.png" }
                    },
                    "hour": [
                        { "time": "2024-12-23 09:00", "temp_c": 1.5, "chance_of_rain": 20,
                          "condition": { "text": "晴れ", "icon": "//cdn/113.png" } },
                        { "time": "bad", "temp_c": 2.0, "chance_of_rain": 0,
                          "condition": { "text": "晴れ", "icon": "//cdn/113.png" } }
                    ],
                    "astro": { "moon_phase": "Third Quarter" }
                },
                {
                    "date": "not-a-date",
                    "day": {
                        "maxtemp_c": 3.0, "mintemp_c": -3.0, "daily_chance_of_rain": 0,
                        "condition": { "text": "雪", "icon": "//cdn/227.png" }
                    },
                    "hour": []
                }
            ]}
        }))
        .unwrap()
    }

    #[test]
    fn renders_daily_summary() {
        let out = render_forecast(&info(), DisplayLocale::Japanese, false);

        assert!(out.starts_with("Obuke, Iwate, Japan (Asia/Tokyo)\n現地時刻: 2024-12-23 10:15\n"));
        assert!(out.contains("2024年12月23日  曇り\n"));
        assert!(out.contains("  4.5°C / -2.1°C\n"));
        assert!(out.contains("  降水確率: 40%\n"));
        assert!(out.contains("  月齢: Last Quarter\n"));
        assert!(out.contains("  アイコン: https://cdn/119.png\n"));
        assert!(!out.contains("時  "));
    }

    #[test]
    fn unparseable_date_falls_back_to_raw_and_missing_moon_is_skipped() {
        let out = render_forecast(&info(), DisplayLocale::English, false);

        assert!(out.contains("December 23, 2024  曇り"));
        assert!(out.contains("not-a-date  雪"));
        assert_eq!(out.matches("Moon:").count(), 1);
    }

    #[test]
    fn hourly_rows_use_placeholders_for_bad_timestamps() {
        let out = render_forecast(&info(), DisplayLocale::Japanese, true);

        assert!(out.contains("     9時    1.5°C   20%  晴れ\n"));
        assert!(out.contains("    --:--      2°C    0%  晴れ\n"));
        assert!(!out.contains("--:--時"));
    }

    #[test]
    fn placeholder_hour_has_no_english_suffix() {
        let out = render_forecast(&info(), DisplayLocale::English, true);

        assert!(out.contains("     9:00"));
        assert!(!out.contains("--:--:00"));
    }
}
