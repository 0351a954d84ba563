//! Infrastructure layer for page fetching, parsing, configuration and logging

pub mod config;
pub mod http_client;
pub mod logging;
pub mod parsing;
pub mod parsing_error;

// Re-export commonly used items
pub use config::{AppConfig, ConfigManager, EndpointConfig, LoggingConfig};
pub use http_client::{Endpoint, FetchError, HttpClient, HttpClientConfig, PageFetcher};
pub use logging::init_logging_with_config;
pub use parsing::{
    HtmlParser, IndustryResolver, ParsingConfig, ParsingError, ParsingResult, ResolutionStrategy,
    RowTableParser,
};
