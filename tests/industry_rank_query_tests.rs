//! End-to-end query tests over fixture pages with a scripted fetcher
mod support;

use std::time::{Duration, Instant};

use industry_rank_lib::application::{ErrorCode, IndustryRankRequest, IndustryRankService, QueryError};
use industry_rank_lib::domain::Timeframe;
use industry_rank_lib::infrastructure::{Endpoint, EndpointConfig, ParsingConfig};
use serde_json::json;
use support::{
    GROUPS_PERFORMANCE, QUOTE_ETF, QUOTE_HEADER_LINKS, QUOTE_SNAPSHOT_TABLE, ScriptedFetcher,
    groups_page, groups_with_trailing_comma, status_error,
};
use tokio_util::sync::CancellationToken;

fn service(fetcher: ScriptedFetcher) -> IndustryRankService<ScriptedFetcher> {
    IndustryRankService::with_defaults(fetcher).unwrap()
}

#[tokio::test]
async fn ranks_industry_resolved_from_snapshot_table() {
    let service = service(ScriptedFetcher::new(QUOTE_SNAPSHOT_TABLE, GROUPS_PERFORMANCE));

    let result = service.get_industry_ranks("nvda").await.unwrap();

    assert_eq!(result.industry, "Semiconductors");
    assert_eq!(result.total, 6);
    assert_eq!(result.ranks[Timeframe::OneDay], Some(1));
    assert_eq!(result.ranks[Timeframe::OneWeek], Some(1));
    assert_eq!(result.ranks[Timeframe::OneMonth], Some(4));
    assert_eq!(result.ranks[Timeframe::ThreeMonths], Some(1));
    assert_eq!(result.ranks[Timeframe::SixMonths], Some(1));
    assert_eq!(result.values[Timeframe::OneMonth], Some(-1.2));
}

#[tokio::test]
async fn requests_quote_page_with_normalized_ticker() {
    let service = service(ScriptedFetcher::new(QUOTE_SNAPSHOT_TABLE, GROUPS_PERFORMANCE));

    service.get_industry_ranks("  nvda ").await.unwrap();

    let mut requests = service.fetcher().requests();
    requests.sort_by_key(|(endpoint, _)| endpoint.to_string());
    assert_eq!(
        requests,
        vec![
            (
                Endpoint::Groups,
                "https://finviz.com/groups.ashx?g=industry&v=210&o=name".to_string()
            ),
            (Endpoint::Quote, "https://finviz.com/quote.ashx?t=NVDA".to_string()),
        ]
    );
}

#[tokio::test]
async fn decodes_entities_in_screener_link_text() {
    let service = service(ScriptedFetcher::new(QUOTE_HEADER_LINKS, GROUPS_PERFORMANCE));

    let result = service.get_industry_ranks("XOM").await.unwrap();

    assert_eq!(result.industry, "Oil & Gas Integrated");
    assert_eq!(result.ranks[Timeframe::OneDay], Some(3));
    assert_eq!(result.ranks[Timeframe::OneWeek], Some(5));
    assert_eq!(result.ranks[Timeframe::SixMonths], Some(4));
}

#[tokio::test]
async fn missing_value_gets_no_rank_but_total_is_full_table() {
    let quote = QUOTE_SNAPSHOT_TABLE
        .replace("ind_semiconductors", "ind_softwareapplication")
        .replace(">Semiconductors<", ">Software - Application<");
    let service = service(ScriptedFetcher::new(&quote, GROUPS_PERFORMANCE));

    let result = service.get_industry_ranks("CRM").await.unwrap();

    assert_eq!(result.industry, "Software - Application");
    assert_eq!(result.ranks[Timeframe::SixMonths], None);
    assert_eq!(result.values[Timeframe::SixMonths], None);
    assert_eq!(result.total, 6);
    // tied with Software - Infrastructure, which comes first in the table
    assert_eq!(result.ranks[Timeframe::OneMonth], Some(2));
}

#[tokio::test]
async fn loose_match_takes_first_row_in_table_order() {
    let quote = QUOTE_SNAPSHOT_TABLE.replace(">Semiconductors<", ">Software<");
    let service = service(ScriptedFetcher::new(&quote, GROUPS_PERFORMANCE));

    let result = service.get_industry_ranks("MSFT").await.unwrap();

    assert_eq!(result.industry, "Software");
    // Software - Infrastructure: 1D 1.05% is second behind Semiconductors
    assert_eq!(result.values[Timeframe::OneDay], Some(1.05));
    assert_eq!(result.ranks[Timeframe::OneDay], Some(2));
}

#[tokio::test]
async fn trailing_comma_is_repaired() {
    let groups = groups_with_trailing_comma();
    let service = service(ScriptedFetcher::new(QUOTE_SNAPSHOT_TABLE, &groups));

    let result = service.get_industry_ranks("NVDA").await.unwrap();

    assert_eq!(result.total, 6);
    assert_eq!(result.ranks[Timeframe::OneDay], Some(1));
}

#[tokio::test]
async fn blank_ticker_fails_without_fetching() {
    let service = service(ScriptedFetcher::new(QUOTE_SNAPSHOT_TABLE, GROUPS_PERFORMANCE));

    let err = service.get_industry_ranks(" \t ").await.unwrap_err();

    assert_eq!(err, QueryError::EmptyTicker);
    assert!(service.fetcher().requests().is_empty());
}

#[tokio::test]
async fn etf_has_no_industry() {
    let service = service(ScriptedFetcher::new(QUOTE_ETF, GROUPS_PERFORMANCE));

    let err = service.get_industry_ranks("SPY").await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::IndustryNotFound);
    assert!(!err.is_transient());
}

#[tokio::test]
async fn unknown_industry_label_is_row_not_found() {
    let quote = QUOTE_SNAPSHOT_TABLE.replace(">Semiconductors<", ">Biotechnology<");
    let service = service(ScriptedFetcher::new(&quote, GROUPS_PERFORMANCE));

    let err = service.get_industry_ranks("MRNA").await.unwrap_err();

    assert_eq!(
        err,
        QueryError::IndustryRowNotFound {
            industry: "Biotechnology".to_string(),
            total: 6
        }
    );
}

#[tokio::test]
async fn groups_page_without_rows() {
    let service = service(ScriptedFetcher::new(QUOTE_SNAPSHOT_TABLE, "<html><body>Maintenance</body></html>"));

    let err = service.get_industry_ranks("NVDA").await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::RowsNotFound);
    assert!(err.is_upstream_format_change());
}

#[tokio::test]
async fn unrepairable_rows_are_malformed() {
    let groups = groups_page(r#"[{"label":"Semiconductors","perfT":"1%",,}]"#);
    let service = service(ScriptedFetcher::new(QUOTE_SNAPSHOT_TABLE, &groups));

    let err = service.get_industry_ranks("NVDA").await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::RowsMalformed);
}

#[tokio::test]
async fn row_without_label_is_malformed() {
    let groups = groups_page(r#"[{"label":"Semiconductors","perfT":"1%"},{"perfT":"2%"}]"#);
    let service = service(ScriptedFetcher::new(QUOTE_SNAPSHOT_TABLE, &groups));

    let err = service.get_industry_ranks("NVDA").await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::RowsMalformed);
}

#[tokio::test]
async fn quote_transport_failure_wins_over_groups_failure() {
    let fetcher = ScriptedFetcher::new(QUOTE_SNAPSHOT_TABLE, GROUPS_PERFORMANCE)
        .failing(Endpoint::Quote, status_error(Endpoint::Quote, 429))
        .failing(Endpoint::Groups, status_error(Endpoint::Groups, 500));
    let service = service(fetcher);

    let err = service.get_industry_ranks("NVDA").await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::TransportFailure);
    assert!(err.is_transient());
    let detail = err.detail().unwrap();
    assert!(detail.contains("quote"));
    assert!(detail.contains("429"));
}

#[tokio::test]
async fn missing_industry_wins_over_groups_failure() {
    let fetcher = ScriptedFetcher::new(QUOTE_ETF, GROUPS_PERFORMANCE)
        .failing(Endpoint::Groups, status_error(Endpoint::Groups, 502));
    let service = service(fetcher);

    let err = service.get_industry_ranks("SPY").await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::IndustryNotFound);
}

#[tokio::test]
async fn groups_transport_failure_names_groups_endpoint() {
    let fetcher = ScriptedFetcher::new(QUOTE_SNAPSHOT_TABLE, GROUPS_PERFORMANCE)
        .failing(Endpoint::Groups, status_error(Endpoint::Groups, 503));
    let service = service(fetcher);

    let err = service.get_industry_ranks("NVDA").await.unwrap_err();

    match err {
        QueryError::TransportFailure(fetch) => {
            assert_eq!(fetch.endpoint(), Endpoint::Groups);
            assert_eq!(fetch.code(), "503");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn cancelling_abandons_pending_fetches() {
    let fetcher = ScriptedFetcher::new(QUOTE_SNAPSHOT_TABLE, GROUPS_PERFORMANCE)
        .delayed(Duration::from_secs(30));
    let service = service(fetcher);
    let token = CancellationToken::new();

    let canceller = {
        let token = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            token.cancel();
        })
    };

    let err = tokio::time::timeout(
        Duration::from_secs(5),
        service.get_industry_ranks_with_cancellation("NVDA", &token),
    )
    .await
    .expect("query should stop once cancelled")
    .unwrap_err();
    canceller.await.unwrap();

    match err {
        QueryError::TransportFailure(fetch) => assert_eq!(fetch.code(), "cancelled"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn both_pages_are_fetched_concurrently() {
    let delay = Duration::from_millis(300);
    let fetcher = ScriptedFetcher::new(QUOTE_SNAPSHOT_TABLE, GROUPS_PERFORMANCE).delayed(delay);
    let service = service(fetcher);

    let started = Instant::now();
    let result = service.get_industry_ranks("NVDA").await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(result.industry, "Semiconductors");
    assert_eq!(service.fetcher().requests().len(), 2);
    assert!(
        elapsed < delay * 2,
        "two {delay:?} fetches took {elapsed:?}; they ran one after the other"
    );
}

#[tokio::test]
async fn queries_are_independent() {
    let service = service(ScriptedFetcher::new(QUOTE_SNAPSHOT_TABLE, GROUPS_PERFORMANCE));

    let first = service.get_industry_ranks("NVDA").await.unwrap();
    let _ = service.get_industry_ranks("").await;
    let second = service.get_industry_ranks("NVDA").await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn custom_endpoints_are_used() {
    let endpoints = EndpointConfig {
        quote_base_url: "https://mirror.test/quote".to_string(),
        quote_ticker_param: "symbol".to_string(),
        groups_url: "https://mirror.test/groups?g=industry".to_string(),
    };
    let service = IndustryRankService::new(
        ScriptedFetcher::new(QUOTE_SNAPSHOT_TABLE, GROUPS_PERFORMANCE),
        endpoints,
        &ParsingConfig::default(),
    )
    .unwrap();

    service.get_industry_ranks("nvda").await.unwrap();

    let urls: Vec<String> = service.fetcher().requests().into_iter().map(|(_, url)| url).collect();
    assert!(urls.contains(&"https://mirror.test/quote?symbol=NVDA".to_string()));
    assert!(urls.contains(&"https://mirror.test/groups?g=industry".to_string()));
}

#[tokio::test]
async fn invalid_pattern_is_rejected_at_construction() {
    let mut parsing = ParsingConfig::default();
    parsing.row_table.assignments = vec!["(unclosed".to_string()];

    let result = IndustryRankService::new(
        ScriptedFetcher::new(QUOTE_SNAPSHOT_TABLE, GROUPS_PERFORMANCE),
        EndpointConfig::default(),
        &parsing,
    );

    assert!(result.is_err());
}

#[tokio::test]
async fn handle_request_produces_wire_shapes() {
    let service = service(ScriptedFetcher::new(QUOTE_SNAPSHOT_TABLE, GROUPS_PERFORMANCE));

    let ok = service.handle_request(&IndustryRankRequest::new("NVDA")).await;
    let ok_json = serde_json::to_value(&ok).unwrap();
    assert_eq!(ok_json["ok"], json!(true));
    assert_eq!(ok_json["industry"], json!("Semiconductors"));
    assert_eq!(ok_json["ranks"]["1D"], json!(1));
    assert_eq!(ok_json["values"]["6M"], json!(30.1));
    assert_eq!(ok_json["total"], json!(6));

    let failed = service.handle_request(&IndustryRankRequest::new("")).await;
    assert_eq!(
        serde_json::to_value(&failed).unwrap(),
        json!({"ok": false, "error": "EMPTY_TICKER"})
    );
}
