//! Clock, weather and quote shown above the timer.

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const QUOTES: &[&str] = &[
    "Focus on being productive instead of busy.",
    "Starve your distractions, feed your focus.",
    "The successful warrior is the average man, with laser-like focus.",
    "Your focus determines your reality.",
    "Concentrate all your thoughts upon the work at hand.",
    "Energy flows where attention goes.",
    "One reason so few of us achieve what we truly want is that we never direct our focus; we never concentrate our power.",
    "Success is not the key to happiness. Happiness is the key to success.",
    "Don't watch the clock; do what it does. Keep going.",
    "Simplicity is the ultimate sophistication.",
    "It always seems impossible until it's done.",
    "Action is the foundational key to all success.",
];

pub fn pick_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    QUOTES.choose(rng).copied().unwrap_or(QUOTES[0])
}

/// 24-hour "HH:MM"
pub fn clock_label<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%H:%M").to_string()
}

/// "Friday, 16 October"
pub fn date_label<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%A, %-d %B").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// WMO weather-code groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherKind {
    Clear,
    Cloudy,
    Fog,
    Rain,
    Snow,
    Showers,
    Thunderstorm,
}

impl WeatherKind {
    pub fn from_code(code: u16) -> Self {
        match code {
            0 | 1 => Self::Clear,
            2 | 3 => Self::Cloudy,
            45 | 48 => Self::Fog,
            51..=67 => Self::Rain,
            71..=77 => Self::Snow,
            80..=82 => Self::Showers,
            c if c >= 95 => Self::Thunderstorm,
            _ => Self::Clear,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Clear => "☀",
            Self::Cloudy => "☁",
            Self::Fog => "≡",
            Self::Rain => "☂",
            Self::Snow => "❄",
            Self::Showers => "☔",
            Self::Thunderstorm => "⚡",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Cloudy => "Cloudy",
            Self::Fog => "Fog",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Showers => "Showers",
            Self::Thunderstorm => "Thunderstorm",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weather {
    pub temperature: f64,
    pub code: u16,
}

impl Weather {
    pub fn kind(&self) -> WeatherKind {
        WeatherKind::from_code(self.code)
    }

    /// Rounded to whole degrees, e.g. "18°"
    pub fn temperature_label(&self) -> String {
        format!("{}°", self.temperature.round() as i64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeatherState {
    /// No lookup started yet
    Idle,
    Loading,
    Ready(Weather),
    /// Lookup failed or no coordinates configured
    Unavailable,
}

impl WeatherState {
    pub fn label(&self) -> String {
        match self {
            Self::Idle => "Updating...".to_string(),
            Self::Loading => "Loading...".to_string(),
            Self::Ready(w) => format!("{} {}", w.kind().glyph(), w.temperature_label()),
            Self::Unavailable => "No Weather".to_string(),
        }
    }
}

#[derive(Deserialize)]
struct ForecastResponse {
    current: Option<CurrentConditions>,
}

#[derive(Deserialize)]
struct CurrentConditions {
    temperature_2m: f64,
    weather_code: u16,
}

pub fn forecast_url(coords: Coordinates) -> String {
    format!(
        "{}?latitude={}&longitude={}&current=temperature_2m,weather_code",
        FORECAST_URL, coords.latitude, coords.longitude
    )
}

/// Parse an Open-Meteo forecast body
pub fn parse_forecast(body: &str) -> Result<Weather> {
    let response: ForecastResponse =
        serde_json::from_str(body).context("Weather response is not valid JSON")?;
    let current = response
        .current
        .context("Weather response has no current conditions")?;
    Ok(Weather {
        temperature: current.temperature_2m,
        code: current.weather_code,
    })
}

fn fetch(coords: Coordinates) -> Result<Weather> {
    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?;

    let body = client
        .get(forecast_url(coords))
        .send()
        .context("Weather request failed")?
        .error_for_status()
        .context("Weather service returned an error")?
        .text()
        .context("Failed to read weather response")?;

    parse_forecast(&body)
}

/// Run one lookup on a worker thread; the result arrives on the receiver
pub fn spawn_lookup(coords: Coordinates) -> Receiver<WeatherState> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let state = match fetch(coords) {
            Ok(weather) => {
                info!(
                    kind = weather.kind().name(),
                    temperature = weather.temperature,
                    "weather updated"
                );
                WeatherState::Ready(weather)
            }
            Err(e) => {
                warn!(error = %format!("{:#}", e), "weather lookup failed");
                WeatherState::Unavailable
            }
        };
        let _ = tx.send(state);
    });
    rx
}

/// Dashboard widget state
#[derive(Debug)]
pub struct Dashboard {
    pub quote: &'static str,
    pub weather: WeatherState,
    pending: Option<Receiver<WeatherState>>,
}

impl Dashboard {
    pub fn new(quote: &'static str) -> Self {
        Self {
            quote,
            weather: WeatherState::Idle,
            pending: None,
        }
    }

    /// Kick off the lookup, or mark weather unavailable without coordinates
    pub fn start_weather(&mut self, coords: Option<Coordinates>) {
        match coords {
            Some(coords) => {
                self.weather = WeatherState::Loading;
                self.pending = Some(spawn_lookup(coords));
            }
            None => {
                self.weather = WeatherState::Unavailable;
                self.pending = None;
            }
        }
    }

    /// Attach an existing result channel (lookup started elsewhere)
    #[cfg(test)]
    pub fn await_weather(&mut self, rx: Receiver<WeatherState>) {
        self.weather = WeatherState::Loading;
        self.pending = Some(rx);
    }

    /// Drain a finished lookup. Returns true when the state changed.
    pub fn poll_weather(&mut self) -> bool {
        let Some(rx) = &self.pending else {
            return false;
        };
        match rx.try_recv() {
            Ok(state) => {
                self.weather = state;
                self.pending = None;
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                self.weather = WeatherState::Unavailable;
                self.pending = None;
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_weather_code_groups() {
        assert_eq!(WeatherKind::from_code(0), WeatherKind::Clear);
        assert_eq!(WeatherKind::from_code(1), WeatherKind::Clear);
        assert_eq!(WeatherKind::from_code(3), WeatherKind::Cloudy);
        assert_eq!(WeatherKind::from_code(45), WeatherKind::Fog);
        assert_eq!(WeatherKind::from_code(48), WeatherKind::Fog);
        assert_eq!(WeatherKind::from_code(51), WeatherKind::Rain);
        assert_eq!(WeatherKind::from_code(67), WeatherKind::Rain);
        assert_eq!(WeatherKind::from_code(71), WeatherKind::Snow);
        assert_eq!(WeatherKind::from_code(77), WeatherKind::Snow);
        assert_eq!(WeatherKind::from_code(81), WeatherKind::Showers);
        assert_eq!(WeatherKind::from_code(95), WeatherKind::Thunderstorm);
        assert_eq!(WeatherKind::from_code(99), WeatherKind::Thunderstorm);
        // Unlisted codes fall back to clear
        assert_eq!(WeatherKind::from_code(10), WeatherKind::Clear);
        assert_eq!(WeatherKind::from_code(90), WeatherKind::Clear);
        assert_eq!(WeatherKind::from_code(63).name(), "Rain");
    }

    #[test]
    fn test_parse_forecast() {
        let body = r#"{"latitude":52.5,"current":{"time":"2026-10-16T12:00","temperature_2m":17.6,"weather_code":61}}"#;
        let weather = parse_forecast(body).unwrap();
        assert_eq!(weather.code, 61);
        assert_eq!(weather.kind(), WeatherKind::Rain);
        assert_eq!(weather.temperature_label(), "18°");
    }

    #[test]
    fn test_parse_forecast_without_current_fails() {
        assert!(parse_forecast(r#"{"latitude":52.5}"#).is_err());
        assert!(parse_forecast("<html>").is_err());
    }

    #[test]
    fn test_negative_temperature_rounds() {
        let w = Weather {
            temperature: -2.5,
            code: 73,
        };
        assert_eq!(w.temperature_label(), "-3°");
    }

    #[test]
    fn test_forecast_url() {
        let url = forecast_url(Coordinates {
            latitude: 48.85,
            longitude: 2.35,
        });
        assert_eq!(
            url,
            "https://api.open-meteo.com/v1/forecast?latitude=48.85&longitude=2.35&current=temperature_2m,weather_code"
        );
    }

    #[test]
    fn test_clock_and_date_labels() {
        let now = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 16, 9, 5, 0)
            .unwrap();
        assert_eq!(clock_label(&now), "09:05");
        assert_eq!(date_label(&now), "Friday, 16 October");

        let evening = Utc.with_ymd_and_hms(2026, 1, 3, 21, 30, 0).unwrap();
        assert_eq!(clock_label(&evening), "21:30");
        assert_eq!(date_label(&evening), "Saturday, 3 January");
    }

    #[test]
    fn test_pick_quote_is_from_list() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert!(QUOTES.contains(&pick_quote(&mut rng)));
        }
    }

    #[test]
    fn test_no_coordinates_means_no_weather() {
        let mut dash = Dashboard::new(QUOTES[0]);
        dash.start_weather(None);
        assert_eq!(dash.weather, WeatherState::Unavailable);
        assert_eq!(dash.weather.label(), "No Weather");
        assert!(!dash.poll_weather());
    }

    #[test]
    fn test_poll_weather_drains_channel() {
        let (tx, rx) = mpsc::channel();
        let mut dash = Dashboard::new(QUOTES[0]);
        dash.await_weather(rx);
        assert_eq!(dash.weather, WeatherState::Loading);
        assert!(!dash.poll_weather());

        let weather = Weather {
            temperature: 21.2,
            code: 0,
        };
        tx.send(WeatherState::Ready(weather)).unwrap();
        assert!(dash.poll_weather());
        assert_eq!(dash.weather, WeatherState::Ready(weather));
        assert_eq!(dash.weather.label(), "☀ 21°");
    }

    #[test]
    fn test_dropped_sender_means_unavailable() {
        let (tx, rx) = mpsc::channel::<WeatherState>();
        drop(tx);
        let mut dash = Dashboard::new(QUOTES[0]);
        dash.await_weather(rx);
        assert!(dash.poll_weather());
        assert_eq!(dash.weather, WeatherState::Unavailable);
    }
}
