//! Open-Meteo weather adapter for the Sirdaryo region
//!
//! Fetches current conditions for a fixed coordinate and renders the
//! channel-ready weather text.

use reqwest::Client;
use serde::Deserialize;

use crate::error::Error;
use crate::Result;

/// Guliston, Sirdaryo viloyati.
pub const LATITUDE: f64 = 40.49;
pub const LONGITUDE: f64 = 68.78;

const OPEN_METEO_URL: &str = "https://api.open-meteo.com";
const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,precipitation,weather_code,wind_speed_10m";

/// WMO weather interpretation code (WW) to Uzbek condition label.
///
/// Ordered brackets; codes that fall through every bracket read as variable
/// weather.
pub fn condition_label(code: u32) -> &'static str {
    match code {
        0 => "Ochiq havo ☀️",
        1..=3 => "Yengil bulutli 🌤",
        45 | 48 => "Tumanli 🌫",
        51..=55 => "Yengil yomg‘ir 🌦",
        61..=65 => "Yomg‘ir 🌧",
        71..=77 => "Qor ❄️",
        80..=82 => "Jala 🌧",
        95.. => "Momaqaldiroq ⛈",
        _ => "O‘zgaruvchan havo 🌥",
    }
}

/// Current conditions plus the rendered channel text.
#[derive(Debug, Clone)]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub precipitation: f64,
    pub condition: &'static str,
    /// Complete display text, promotional line included.
    pub rendered: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentWeather,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    precipitation: f64,
    weather_code: u32,
    wind_speed_10m: f64,
}

/// Open-Meteo client for the fixed coordinate.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    base_url: String,
}

impl WeatherClient {
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .user_agent("magistr_content/0.1.0")
            .build()
            .map_err(|e| Error::InvalidArgument(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            http,
            base_url: OPEN_METEO_URL.to_string(),
        })
    }

    /// Override the API endpoint.
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// One GET for the current conditions; no retry.
    pub async fn fetch_current(&self) -> Result<WeatherSnapshot> {
        let url = format!(
            "{}/v1/forecast?latitude={}&longitude={}&current={}&timezone=auto",
            self.base_url, LATITUDE, LONGITUDE, CURRENT_FIELDS
        );

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Weather(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Weather(format!("Open-Meteo returned {}", status)));
        }

        let forecast: ForecastResponse = response
            .json()
            .await
            .map_err(|e| Error::Weather(format!("invalid response: {}", e)))?;

        Ok(snapshot(forecast.current))
    }
}

fn snapshot(current: CurrentWeather) -> WeatherSnapshot {
    let condition = condition_label(current.weather_code);
    let rendered = render(&current, condition);

    WeatherSnapshot {
        temperature: current.temperature_2m,
        humidity: current.relative_humidity_2m,
        wind_speed: current.wind_speed_10m,
        precipitation: current.precipitation,
        condition,
        rendered,
    }
}

fn render(current: &CurrentWeather, condition: &str) -> String {
    let rain_line = if current.precipitation > 0.0 {
        format!("Yog‘ingarchilik: {}mm", current.precipitation)
    } else {
        "Yog‘ingarchilik ehtimoli past".to_string()
    };

    format!(
        "🌤 **Sirdaryo viloyati ob-havosi:**\n\n\
         🌡 Harorat: {}°C\n\
         💧 Namlik: {}%\n\
         💨 Shamol: {} m/s\n\
         ☔️ {}\n\
         ☁️ Holat: {}\n\n\
         @magistr_guliston sahifasini kuzatishda davom eting!",
        current.temperature_2m,
        current.relative_humidity_2m,
        current.wind_speed_10m,
        rain_line,
        condition
    )
}
