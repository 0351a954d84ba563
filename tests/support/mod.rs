//! Shared fixtures and a scripted page fetcher for integration tests

#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use industry_rank_lib::infrastructure::{Endpoint, FetchError, PageFetcher};
use tokio_util::sync::CancellationToken;

pub const QUOTE_SNAPSHOT_TABLE: &str = include_str!("../fixtures/quote_snapshot_table.html");
pub const QUOTE_HEADER_LINKS: &str = include_str!("../fixtures/quote_header_links.html");
pub const QUOTE_ETF: &str = include_str!("../fixtures/quote_etf.html");
pub const GROUPS_PERFORMANCE: &str = include_str!("../fixtures/groups_performance.html");

/// Serves canned bodies per endpoint and records every requested URL
pub struct ScriptedFetcher {
    quote: Result<String, FetchError>,
    groups: Result<String, FetchError>,
    delay: Option<Duration>,
    requests: Mutex<Vec<(Endpoint, String)>>,
}

impl ScriptedFetcher {
    pub fn new(quote: &str, groups: &str) -> Self {
        Self {
            quote: Ok(quote.to_string()),
            groups: Ok(groups.to_string()),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(mut self, endpoint: Endpoint, error: FetchError) -> Self {
        match endpoint {
            Endpoint::Quote => self.quote = Err(error),
            Endpoint::Groups => self.groups = Err(error),
        }
        self
    }

    /// Hold every response until `delay` passes or the token is cancelled
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<(Endpoint, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch_text(
        &self,
        endpoint: Endpoint,
        url: &str,
        cancellation_token: &CancellationToken,
    ) -> Result<String, FetchError> {
        self.requests
            .lock()
            .unwrap()
            .push((endpoint, url.to_string()));

        if let Some(delay) = self.delay {
            tokio::select! {
                () = tokio::time::sleep(delay) => {}
                () = cancellation_token.cancelled() => {
                    return Err(FetchError::Cancelled { endpoint, url: url.to_string() });
                }
            }
        }

        match endpoint {
            Endpoint::Quote => self.quote.clone(),
            Endpoint::Groups => self.groups.clone(),
        }
    }
}

pub fn status_error(endpoint: Endpoint, status: u16) -> FetchError {
    FetchError::Status {
        endpoint,
        status,
        url: format!("https://finviz.test/{endpoint}"),
    }
}

/// Groups page whose row literal ends with `,]`
pub fn groups_with_trailing_comma() -> String {
    let page = GROUPS_PERFORMANCE.replace("\"change\":\"-1.25%\"}\n", "\"change\":\"-1.25%\"},\n");
    assert_ne!(page, GROUPS_PERFORMANCE, "fixture layout changed");
    page
}

/// Minimal groups page around an arbitrary row literal
pub fn groups_page(literal: &str) -> String {
    format!("<html><script>\nvar rows = {literal};\n</script></html>")
}
