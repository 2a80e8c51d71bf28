//! HTTP transport placeholders.
//!
//! The weather client only needs [`HttpTransport`]; until a real
//! network stack is wired in, [`OfflineTransport`] answers every request
//! with [`ErrorKind::NetworkUnavailable`] so the device runs with the
//! outdoor readings on their placeholders.

use log::debug;

use crate::error::ErrorKind;
use crate::weather::openweather::{HttpFuture, HttpTransport};

#[derive(Debug, Default)]
pub struct OfflineTransport;

impl HttpTransport for OfflineTransport {
    fn get(&mut self, url: &str) -> HttpFuture {
        debug!("HTTP: offline, dropping GET {}", url.split('?').next().unwrap_or(url));
        Box::pin(core::future::ready(Err(ErrorKind::NetworkUnavailable)))
    }
}
