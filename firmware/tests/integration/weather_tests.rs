//! OpenWeather client driven through the poller, with a scripted transport.

use std::cell::RefCell;
use std::rc::Rc;

use tamapet::adapters::http::OfflineTransport;
use tamapet::error::ErrorKind;
use tamapet::pet::context::EnvironmentState;
use tamapet::weather::openweather::{HttpFuture, HttpResponse, HttpTransport, OpenWeatherClient};
use tamapet::weather::{Sky, WeatherPoller};

use crate::mock_hw::weather_config;

struct ScriptedHttp {
    replies: Vec<Result<HttpResponse, ErrorKind>>,
    urls: Rc<RefCell<Vec<String>>>,
}

impl HttpTransport for ScriptedHttp {
    fn get(&mut self, url: &str) -> HttpFuture {
        self.urls.borrow_mut().push(url.to_string());
        let reply = if self.replies.is_empty() {
            Err(ErrorKind::NetworkUnavailable)
        } else {
            self.replies.remove(0)
        };
        Box::pin(std::future::ready(reply))
    }
}

fn ok(body: &str) -> Result<HttpResponse, ErrorKind> {
    Ok(HttpResponse {
        status: 200,
        body: body.as_bytes().to_vec(),
    })
}

fn poller(
    replies: Vec<Result<HttpResponse, ErrorKind>>,
) -> (WeatherPoller<OpenWeatherClient<ScriptedHttp>>, Rc<RefCell<Vec<String>>>) {
    let urls = Rc::new(RefCell::new(Vec::new()));
    let client = OpenWeatherClient::new(ScriptedHttp {
        replies,
        urls: Rc::clone(&urls),
    });
    (WeatherPoller::new(&weather_config(), client), urls)
}

#[test]
fn successful_fetch_fills_outdoor_state() {
    let (mut poller, urls) = poller(vec![ok(
        r#"{"weather":[{"main":"Thunderstorm"}],"main":{"temp":66.2,"humidity":77},"cod":200}"#,
    )]);
    let mut env = EnvironmentState::new();

    let outcome = poller.poll_if_due(0, &mut env);
    assert!(matches!(outcome, Some(Ok(_))));
    assert_eq!(env.outdoor_temp_f, Some(66.2));
    assert_eq!(env.outdoor_humidity, Some(77.0));
    assert_eq!(env.outdoor_sky, Some(Sky::Thunderstorm));
    assert!(env.is_raining());

    let urls = urls.borrow();
    assert_eq!(urls.len(), 1);
    assert!(urls[0].contains("q=Reykjavik"));
    assert!(urls[0].contains("appid=test-key"));
    assert!(urls[0].ends_with("units=imperial"));
}

#[test]
fn wrong_schema_is_malformed_and_keeps_stale_value() {
    let (mut poller, _) = poller(vec![
        ok(r#"{"main":{"temp":40.0}}"#),
        ok(r#"{"main":{"feels_like":39.0}}"#),
    ]);
    let mut env = EnvironmentState::new();
    poller.poll_if_due(0, &mut env);
    assert_eq!(env.outdoor_temp_f, Some(40.0));

    let outcome = poller.poll_if_due(60_000, &mut env);
    assert_eq!(outcome, Some(Err(ErrorKind::MalformedResponse)));
    assert_eq!(env.outdoor_temp_f, Some(40.0));
}

#[test]
fn rejected_key_is_malformed() {
    let (mut poller, _) = poller(vec![Ok(HttpResponse {
        status: 401,
        body: br#"{"cod":401,"message":"Invalid API key."}"#.to_vec(),
    })]);
    let mut env = EnvironmentState::new();
    assert_eq!(
        poller.poll_if_due(0, &mut env),
        Some(Err(ErrorKind::MalformedResponse))
    );
}

#[test]
fn transport_failure_waits_for_next_interval() {
    let (mut poller, urls) = poller(vec![Err(ErrorKind::NetworkUnavailable)]);
    let mut env = EnvironmentState::new();
    assert_eq!(
        poller.poll_if_due(500, &mut env),
        Some(Err(ErrorKind::NetworkUnavailable))
    );
    for now in [1_000, 30_000, 60_499] {
        assert!(poller.poll_if_due(now, &mut env).is_none());
    }
    assert_eq!(urls.borrow().len(), 1);
}

#[test]
fn offline_transport_reports_network_unavailable() {
    let client = OpenWeatherClient::new(OfflineTransport);
    let mut poller = WeatherPoller::new(&weather_config(), client);
    let mut env = EnvironmentState::new();
    assert_eq!(
        poller.poll_if_due(0, &mut env),
        Some(Err(ErrorKind::NetworkUnavailable))
    );
    assert_eq!(env.last_weather_fetch_ms, Some(0));
}
