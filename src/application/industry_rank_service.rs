//! Industry rank query service
//!
//! One query fetches the ticker's quote page and the industry groups page,
//! resolves the ticker's industry, parses the group rows and ranks the
//! industry in every timeframe. Either everything succeeds or exactly one
//! [`QueryError`] is reported.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

use futures::FutureExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::application::dto::{IndustryRankRequest, IndustryRankResponse};
use crate::application::errors::QueryError;
use crate::domain::{QueryResult, Ticker, compute_ranks};
use crate::infrastructure::{
    Endpoint, EndpointConfig, IndustryResolver, PageFetcher, ParsingConfig, ParsingResult,
    RowTableParser,
};

pub struct IndustryRankService<F: PageFetcher> {
    fetcher: F,
    endpoints: EndpointConfig,
    resolver: IndustryResolver,
    row_parser: RowTableParser,
}

impl<F: PageFetcher> IndustryRankService<F> {
    /// Build the service, compiling the extraction patterns once
    pub fn new(fetcher: F, endpoints: EndpointConfig, parsing: &ParsingConfig) -> ParsingResult<Self> {
        Ok(Self {
            fetcher,
            endpoints,
            resolver: IndustryResolver::with_config(&parsing.resolver)?,
            row_parser: RowTableParser::with_config(&parsing.row_table)?,
        })
    }

    /// Service with the built-in endpoints and patterns
    pub fn with_defaults(fetcher: F) -> ParsingResult<Self> {
        Self::new(fetcher, EndpointConfig::default(), &ParsingConfig::default())
    }

    pub const fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub async fn get_industry_ranks(&self, ticker: &str) -> Result<QueryResult, QueryError> {
        self.get_industry_ranks_with_cancellation(ticker, &CancellationToken::new())
            .await
    }

    /// Run one query; cancelling the token surfaces as a transport failure
    pub async fn get_industry_ranks_with_cancellation(
        &self,
        ticker: &str,
        cancellation_token: &CancellationToken,
    ) -> Result<QueryResult, QueryError> {
        let started = Instant::now();

        let outcome = match AssertUnwindSafe(self.run_query(ticker, cancellation_token))
            .catch_unwind()
            .await
        {
            Ok(outcome) => outcome,
            Err(panic) => Err(QueryError::unexpected(panic_message(panic.as_ref()))),
        };

        match &outcome {
            Ok(result) => info!(
                "✅ {} -> '{}' ranked across {} industries in {:?}",
                ticker.trim(),
                result.industry,
                result.total,
                started.elapsed()
            ),
            Err(error @ QueryError::Unexpected { .. }) => {
                error!("💥 Query for '{}' failed unexpectedly: {}", ticker.trim(), error);
            }
            Err(error) if error.is_upstream_format_change() => {
                warn!("⚠️  Upstream page format changed? {}: {}", ticker.trim(), error);
            }
            Err(error) => warn!("❌ Query for '{}' failed: {}", ticker.trim(), error),
        }

        outcome
    }

    /// Request/response entry point; never fails, errors become `ok: false`
    pub async fn handle_request(&self, request: &IndustryRankRequest) -> IndustryRankResponse {
        self.get_industry_ranks(&request.ticker).await.into()
    }

    async fn run_query(
        &self,
        raw_ticker: &str,
        cancellation_token: &CancellationToken,
    ) -> Result<QueryResult, QueryError> {
        let ticker = Ticker::parse(raw_ticker).ok_or(QueryError::EmptyTicker)?;
        let quote_url = self
            .endpoints
            .quote_url(&ticker)
            .map_err(|e| QueryError::unexpected(format!("{e:#}")))?;

        debug!("Fetching quote and groups pages for {}", ticker);

        // Both pages are independent; failures are still reported in the
        // quote -> resolve -> groups -> parse -> rank order.
        let (quote_page, groups_page) = tokio::join!(
            self.fetcher
                .fetch_text(Endpoint::Quote, &quote_url, cancellation_token),
            self.fetcher
                .fetch_text(Endpoint::Groups, &self.endpoints.groups_url, cancellation_token),
        );

        let industry = self
            .resolver
            .resolve(&quote_page?)
            .ok_or_else(|| QueryError::IndustryNotFound {
                ticker: ticker.to_string(),
            })?;
        debug!("{} belongs to '{}'", ticker, industry);

        let table = self.row_parser.parse_rows(&groups_page?)?;
        let ranks = compute_ranks(&table, &industry)?;

        Ok(QueryResult::new(industry, ranks))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panic with non-string payload".to_string())
}
