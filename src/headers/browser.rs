//! Header capture through a WebDriver-controlled browser.
//!
//! Chrome is started with performance logging on, so every network event the
//! browser emits lands in its `performance` log regardless of page
//! navigations. The booking form is filled and submitted, and the log is
//! drained until the search request (URL containing the search path) shows up.
//! Its headers come from `Network.requestWillBeSent`, completed by
//! `Network.requestWillBeSentExtraInfo`, which carries the headers the browser
//! itself adds (cookies, client hints, origin).

use std::collections::HashMap;
use std::time::{Duration, Instant};

use fantoccini::wd::WebDriverCompatibleCommand;
use fantoccini::{Client, ClientBuilder, Locator};
use log::{debug, info, warn};
use serde_json::{json, Value};
use tokio::time::sleep;

use super::{HeaderSet, HeaderSource};
use crate::config::{
    CAPTURE_POLL_INTERVAL, DESTINATION_INPUT_ID, FIELD_SETTLE_DELAY, FIND_FLIGHTS_BUTTON_SELECTOR,
    HOME_URL, ORIGIN_INPUT_ID, PAGE_SETTLE_DELAY, SEARCH_PATH_MARKER, SUBMIT_SETTLE_DELAY,
};
use crate::error_handling::HeaderCaptureError;

// WebDriver key codepoints
const KEY_TAB: &str = "\u{E004}";
const KEY_RETURN: &str = "\u{E006}";

const REQUEST_WILL_BE_SENT: &str = "Network.requestWillBeSent";
const REQUEST_EXTRA_INFO: &str = "Network.requestWillBeSentExtraInfo";

/// Settings for a browser capture session.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// WebDriver endpoint, e.g. a local chromedriver
    pub webdriver_url: String,
    /// Run Chrome without a window
    pub headless: bool,
    /// Origin typed into the booking form
    pub form_origin: String,
    /// Destination typed into the booking form
    pub form_destination: String,
    /// Upper bound on the wait for the search request
    pub capture_timeout: Duration,
}

/// Mints header sets by running a flight search in a real browser.
///
/// Each fetch opens and closes its own WebDriver session.
#[derive(Debug, Clone)]
pub struct BrowserHeaderSource {
    options: BrowserOptions,
}

impl BrowserHeaderSource {
    /// Creates a source that connects to `options.webdriver_url` on every fetch.
    pub fn new(options: BrowserOptions) -> Self {
        Self { options }
    }
}

impl HeaderSource for BrowserHeaderSource {
    async fn fetch_headers(&mut self) -> Result<HeaderSet, HeaderCaptureError> {
        info!("Getting headers via {}", self.options.webdriver_url);

        let mut builder = ClientBuilder::native();
        builder.capabilities(chrome_capabilities(self.options.headless));
        let client = builder.connect(&self.options.webdriver_url).await?;

        let result = capture(&client, &self.options).await;
        if let Err(e) = client.close().await {
            warn!("Failed to close browser session: {}", e);
        }

        let headers = result?;
        if headers.is_empty() {
            return Err(HeaderCaptureError::Empty);
        }
        debug!("Captured headers: {:?}", headers.names());
        Ok(headers)
    }
}

/// Chrome options matching a regular desktop session as closely as WebDriver
/// allows, with the performance log enabled.
fn chrome_capabilities(headless: bool) -> serde_json::Map<String, Value> {
    let mut args = vec![
        "--disable-blink-features=AutomationControlled",
        "--start-maximized",
    ];
    if headless {
        args.push("--headless=new");
    }

    let mut caps = serde_json::Map::new();
    caps.insert(
        "goog:chromeOptions".to_string(),
        json!({
            "excludeSwitches": ["enable-automation"],
            "useAutomationExtension": false,
            "args": args,
        }),
    );
    caps.insert(
        "goog:loggingPrefs".to_string(),
        json!({"performance": "ALL"}),
    );
    caps
}

/// Drains one of the browser's logs (chromedriver's `se/log` endpoint).
#[derive(Debug)]
struct GetLog {
    log_type: &'static str,
}

impl WebDriverCompatibleCommand for GetLog {
    fn endpoint(
        &self,
        base_url: &url::Url,
        session_id: Option<&str>,
    ) -> Result<url::Url, url::ParseError> {
        base_url
            .join("session/")?
            .join(&format!("{}/", session_id.unwrap_or_default()))?
            .join("se/log")
    }

    fn method_and_body(&self, _request_url: &url::Url) -> (reqwest::Method, Option<String>) {
        (
            reqwest::Method::POST,
            Some(json!({"type": self.log_type}).to_string()),
        )
    }
}

async fn capture(client: &Client, options: &BrowserOptions) -> Result<HeaderSet, HeaderCaptureError> {
    client.goto(HOME_URL).await?;
    sleep(PAGE_SETTLE_DELAY).await;

    let origin = client.find(Locator::Id(ORIGIN_INPUT_ID)).await?;
    origin.send_keys(&options.form_origin).await?;
    origin.send_keys(KEY_TAB).await?;
    sleep(FIELD_SETTLE_DELAY).await;

    let destination = client.find(Locator::Id(DESTINATION_INPUT_ID)).await?;
    destination.send_keys(&options.form_destination).await?;
    destination.send_keys(KEY_TAB).await?;
    sleep(FIELD_SETTLE_DELAY).await;

    let submit = client
        .find(Locator::Css(FIND_FLIGHTS_BUTTON_SELECTOR))
        .await?;
    submit.send_keys(KEY_RETURN).await?;
    sleep(SUBMIT_SETTLE_DELAY).await;

    let request_headers =
        wait_for_request(client, SEARCH_PATH_MARKER, options.capture_timeout).await?;

    // Fill-ins for when the browser never reported the extra-info headers
    let mut pairs: Vec<(String, String)> = Vec::new();
    let user_agent = client
        .execute("return navigator.userAgent;", vec![])
        .await?;
    if let Some(ua) = user_agent.as_str() {
        pairs.push(("user-agent".to_string(), ua.to_string()));
    }
    let cookie_header = client
        .get_all_cookies()
        .await?
        .iter()
        .map(|c| format!("{}={}", c.name(), c.value()))
        .collect::<Vec<_>>()
        .join("; ");
    if !cookie_header.is_empty() {
        pairs.push(("cookie".to_string(), cookie_header));
    }
    pairs.extend(request_headers);

    Ok(HeaderSet::from_pairs(pairs))
}

/// Drains the performance log until the request whose URL contains `marker`
/// has been seen, or `timeout` expires.
async fn wait_for_request(
    client: &Client,
    marker: &str,
    timeout: Duration,
) -> Result<Vec<(String, String)>, HeaderCaptureError> {
    let started = Instant::now();
    let mut network = NetworkCapture::new(marker);
    loop {
        let log = client
            .issue_cmd(GetLog {
                log_type: "performance",
            })
            .await?;
        network.ingest(log_entries(&log));
        if let Some(headers) = network.complete_headers() {
            return Ok(headers);
        }
        if started.elapsed() >= timeout {
            if let Some(headers) = network.request_headers() {
                warn!("Search request seen without extra-info headers, using what was sent");
                return Ok(headers);
            }
            return Err(HeaderCaptureError::RequestNotObserved {
                marker: marker.to_string(),
                waited_secs: started.elapsed().as_secs(),
            });
        }
        sleep(CAPTURE_POLL_INTERVAL).await;
    }
}

/// Entries of a log response, whether or not the `value` wrapper was stripped.
fn log_entries(log: &Value) -> &[Value] {
    log.as_array()
        .or_else(|| log.get("value").and_then(Value::as_array))
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Network events collected across successive performance log reads.
#[derive(Debug)]
struct NetworkCapture {
    marker: String,
    matched: Option<String>,
    sent: Vec<(String, String)>,
    extra: HashMap<String, Vec<(String, String)>>,
}

impl NetworkCapture {
    fn new(marker: &str) -> Self {
        Self {
            marker: marker.to_string(),
            matched: None,
            sent: Vec::new(),
            extra: HashMap::new(),
        }
    }

    /// Records the events of one log read.
    ///
    /// Each entry's `message` is a JSON string wrapping a DevTools event.
    fn ingest(&mut self, entries: &[Value]) {
        for entry in entries {
            let Some(message) = entry.get("message").and_then(Value::as_str) else {
                continue;
            };
            let Ok(event) = serde_json::from_str::<Value>(message) else {
                continue;
            };
            let method = event.pointer("/message/method").and_then(Value::as_str);
            let params = event.pointer("/message/params").unwrap_or(&Value::Null);
            let Some(request_id) = params.get("requestId").and_then(Value::as_str) else {
                continue;
            };

            match method {
                Some(REQUEST_WILL_BE_SENT) if self.matched.is_none() => {
                    let url = params
                        .pointer("/request/url")
                        .and_then(Value::as_str)
                        .unwrap_or_default();
                    if url.contains(&self.marker) {
                        debug!("Observed search request {}", url);
                        self.matched = Some(request_id.to_string());
                        self.sent = header_pairs(params.pointer("/request/headers"));
                    }
                }
                Some(REQUEST_EXTRA_INFO) => {
                    self.extra
                        .insert(request_id.to_string(), header_pairs(params.get("headers")));
                }
                _ => {}
            }
        }
    }

    /// Sent headers merged with extra-info headers, once both were seen.
    fn complete_headers(&self) -> Option<Vec<(String, String)>> {
        let extra = self.extra.get(self.matched.as_ref()?)?;
        let mut headers = self.sent.clone();
        headers.extend(extra.iter().cloned());
        Some(headers)
    }

    /// Headers of the matched request as sent, without extra info.
    fn request_headers(&self) -> Option<Vec<(String, String)>> {
        self.matched.as_ref().map(|_| self.sent.clone())
    }
}

/// String-valued entries of a DevTools headers object.
fn header_pairs(headers: Option<&Value>) -> Vec<(String, String)> {
    headers
        .and_then(Value::as_object)
        .map(|headers| {
            headers
                .iter()
                .filter_map(|(name, value)| value.as_str().map(|v| (name.clone(), v.to_string())))
                .collect()
        })
        .unwrap_or_default()
}
