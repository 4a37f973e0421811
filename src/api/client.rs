use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use reqwest::StatusCode;
use yansi::Paint;

use super::error::FetchError;
use crate::utils::build_query_string;

static SILENT: AtomicBool = AtomicBool::new(false);

/// Longest slice of an error body carried into an error message.
const ERROR_DETAIL_MAX_CHARS: usize = 200;

/// Longest slice of a response body echoed to the terminal.
const ECHO_BODY_MAX_CHARS: usize = 300;

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        println!("{}", msg);
    }
}

fn echo_body(body: &str) -> String {
    match body.char_indices().nth(ECHO_BODY_MAX_CHARS) {
        Some((cut, _)) => format!("{}... ({} bytes total)", &body[..cut], body.len()),
        None => body.to_string(),
    }
}

/// Build the shared HTTP client used by every fetcher.
///
/// The timeout bounds each outbound call; the cookie store lets the trends
/// client carry the session cookie from its warm-up request.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(format!("Pulseboard/{}", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .cookie_store(true)
        .build()
}

/// Raw outcome of a GET: the status and the body text, unclassified.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    /// A short, single-line description of the body for error messages.
    pub fn detail(&self) -> String {
        let flat = self.body.split_whitespace().collect::<Vec<_>>().join(" ");
        if flat.is_empty() {
            return self
                .status
                .canonical_reason()
                .unwrap_or("no response body")
                .to_string();
        }
        flat.chars().take(ERROR_DETAIL_MAX_CHARS).collect()
    }
}

/// Issue a single GET and return status + body.
///
/// Only transport failures are errors here; status classification is left
/// to the caller because each upstream reports failures differently.
pub async fn get_raw(
    client: &reqwest::Client,
    url: &str,
    params: &[(String, String)],
) -> Result<RawResponse, FetchError> {
    // --- Curl Logging ---
    let url_for_log = if params.is_empty() {
        url.to_string()
    } else {
        format!("{}?{}", url, build_query_string(params))
    };
    let parts = [
        Paint::new("curl").fg(yansi::Color::Green).bold().to_string(),
        format!("-X {}", Paint::new("GET").fg(yansi::Color::Yellow).bold()),
        format!("'{}'", Paint::new(&url_for_log).fg(yansi::Color::Cyan)),
    ];
    log_output(format!("Request:\n{}", parts.join(" ")));
    // --------------------

    let resp = client.get(url).query(params).send().await.map_err(|e| {
        tracing::warn!(%url, error = %e, "Request failed");
        FetchError::from(e)
    })?;
    let status = resp.status();
    let body = resp.text().await?;

    tracing::debug!(%url, status = status.as_u16(), bytes = body.len(), "Response received");
    let echoed = echo_body(&body);
    let response_str = if status.is_success() {
        // Grayed out color (dimmed/dark gray)
        Paint::new(format!("HTTP {}: {}", status, echoed)).rgb(100, 100, 100).to_string()
    } else {
        Paint::new(format!("HTTP {}: {}", status, echoed)).fg(yansi::Color::Red).to_string()
    };
    log_output(format!("Response:\n{}", response_str));

    Ok(RawResponse { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_flattens_and_truncates_body() {
        let raw = RawResponse {
            status: StatusCode::BAD_GATEWAY,
            body: format!("line one\n  line two {}", "x".repeat(500)),
        };
        let detail = raw.detail();
        assert!(detail.starts_with("line one line two"));
        assert_eq!(detail.chars().count(), ERROR_DETAIL_MAX_CHARS);
    }

    #[test]
    fn test_echo_body_truncates_long_pages() {
        let page = format!("<html>{}</html>", "a".repeat(5000));
        let echoed = echo_body(&page);
        assert!(echoed.starts_with("<html>aaa"));
        assert!(echoed.ends_with(&format!("... ({} bytes total)", page.len())));
        assert!(echoed.chars().count() < ECHO_BODY_MAX_CHARS + 40);
    }

    #[test]
    fn test_echo_body_keeps_short_bodies() {
        assert_eq!(echo_body(r#"{"results":[]}"#), r#"{"results":[]}"#);
    }

    #[test]
    fn test_detail_uses_reason_phrase_for_empty_body() {
        let raw = RawResponse {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: String::new(),
        };
        assert_eq!(raw.detail(), "Service Unavailable");
    }
}
