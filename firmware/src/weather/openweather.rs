//! OpenWeather current-weather client.
//!
//! Builds the request URL, hands it to an [`HttpTransport`] collaborator
//! and maps the JSON body to a [`WeatherReport`].  Temperatures are
//! requested in imperial units, so `main.temp` is already °F.
//!
//! Any deviation from the expected schema (non-200 HTTP status, an API
//! `cod` other than 200, a missing or non-numeric `main.temp`, a body
//! that is not JSON) is [`ErrorKind::MalformedResponse`].

use core::fmt::Write as _;
use core::future::Future;
use core::pin::Pin;

use log::warn;
use serde::Deserialize;

use super::{Sky, WeatherReport};
use crate::app::ports::{WeatherClient, WeatherFuture};
use crate::error::ErrorKind;

const ENDPOINT: &str = "http://api.openweathermap.org/data/2.5/weather";

// ───────────────────────────────────────────────────────────────
// Transport collaborator
// ───────────────────────────────────────────────────────────────

/// Raw HTTP response as delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// An in-flight GET request.
pub type HttpFuture = Pin<Box<dyn Future<Output = Result<HttpResponse, ErrorKind>>>>;

/// Non-blocking HTTP GET.  Connection problems are
/// [`ErrorKind::NetworkUnavailable`]; the transport may also enforce its
/// own socket timeout and report [`ErrorKind::Timeout`].
pub trait HttpTransport {
    fn get(&mut self, url: &str) -> HttpFuture;
}

// ───────────────────────────────────────────────────────────────
// Client
// ───────────────────────────────────────────────────────────────

pub struct OpenWeatherClient<T> {
    transport: T,
}

impl<T: HttpTransport> OpenWeatherClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }
}

impl<T: HttpTransport> WeatherClient for OpenWeatherClient<T> {
    fn fetch(&mut self, city: &str, api_key: &str) -> WeatherFuture {
        let response = self.transport.get(&request_url(city, api_key));
        Box::pin(async move { parse_response(&response.await?) })
    }
}

/// `ENDPOINT?q=<city>&appid=<key>&units=imperial`, query values percent-encoded.
pub fn request_url(city: &str, api_key: &str) -> String {
    let mut url = String::with_capacity(ENDPOINT.len() + city.len() * 3 + api_key.len() + 32);
    url.push_str(ENDPOINT);
    url.push_str("?q=");
    push_percent_encoded(&mut url, city);
    url.push_str("&appid=");
    push_percent_encoded(&mut url, api_key);
    url.push_str("&units=imperial");
    url
}

/// RFC 3986: everything but unreserved characters is `%XX`-escaped.
fn push_percent_encoded(out: &mut String, value: &str) {
    for b in value.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
            out.push(char::from(b));
        } else {
            let _ = write!(out, "%{b:02X}");
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Response schema
// ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CurrentWeather {
    /// Number on success, sometimes a string on error responses.
    #[serde(default)]
    cod: Option<serde_json::Value>,
    main: Option<MainBlock>,
    #[serde(default)]
    weather: Vec<Condition>,
}

#[derive(Deserialize)]
struct MainBlock {
    temp: f32,
    humidity: Option<f32>,
}

#[derive(Deserialize)]
struct Condition {
    main: String,
}

fn cod_is_ok(cod: Option<&serde_json::Value>) -> bool {
    match cod {
        None => true,
        Some(serde_json::Value::Number(n)) => n.as_u64() == Some(200),
        Some(serde_json::Value::String(s)) => s == "200",
        Some(_) => false,
    }
}

/// Map a full HTTP response to a report.
pub fn parse_response(response: &HttpResponse) -> Result<WeatherReport, ErrorKind> {
    if response.status != 200 {
        warn!("Weather: HTTP {}", response.status);
        if response.status == 401 {
            warn!("Weather: API key rejected (invalid or not yet activated)");
        }
        return Err(ErrorKind::MalformedResponse);
    }
    parse_body(&response.body)
}

/// Map a current-weather JSON body to a report.
pub fn parse_body(body: &[u8]) -> Result<WeatherReport, ErrorKind> {
    let parsed: CurrentWeather = serde_json::from_slice(body).map_err(|e| {
        warn!("Weather: body parse error: {}", e);
        ErrorKind::MalformedResponse
    })?;

    if !cod_is_ok(parsed.cod.as_ref()) {
        warn!("Weather: API returned error cod={:?}", parsed.cod);
        return Err(ErrorKind::MalformedResponse);
    }

    let main = parsed.main.ok_or_else(|| {
        warn!("Weather: body has no 'main' block");
        ErrorKind::MalformedResponse
    })?;
    if !main.temp.is_finite() {
        return Err(ErrorKind::MalformedResponse);
    }

    Ok(WeatherReport {
        temp_f: main.temp,
        humidity: main.humidity.map(|h| h.clamp(0.0, 100.0)),
        sky: parsed.weather.first().map(|c| Sky::from_label(&c.main)),
    })
}
