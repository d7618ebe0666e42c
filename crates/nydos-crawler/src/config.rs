//! Configuration for the registry crawler.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Registry API constants.
pub mod api {
    use std::time::Duration;

    /// Host serving the NY Department of State public inquiry API.
    pub const BASE_URL: &str = "https://apps.dos.ny.gov";

    /// Path of the entity search endpoint.
    pub const SEARCH_PATH: &str =
        "/PublicInquiryWeb/api/PublicInquiry/GetComplexSearchMatchingEntities";

    /// Path of the entity detail endpoint.
    pub const DETAIL_PATH: &str = "/PublicInquiryWeb/api/PublicInquiry/GetEntityRecordByID";

    /// First record of the fixed result window (1-based, inclusive).
    pub const LIST_START_RECORD: u32 = 1;

    /// Last record of the fixed result window (inclusive).
    pub const LIST_END_RECORD: u32 = 50;

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
}

/// Output layout constants.
pub mod output {
    /// Default output directory, relative to the working directory.
    pub const DEFAULT_DIR: &str = "assets";

    /// Unix permission bits for a freshly created output directory (rwxr-xr-x).
    pub const DIR_MODE: u32 = 0o755;
}

/// Default number of tokens tried by one scan.
pub const DEFAULT_ITERATIONS: u32 = 1000;

/// Crawler configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Full URL of the entity search endpoint.
    pub search_url: String,

    /// Full URL of the entity detail endpoint.
    pub detail_url: String,

    /// Directory receiving every response file.
    pub output_dir: PathBuf,

    /// Tokens tried by a scan when the caller gives no count.
    pub iterations: u32,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,
}

impl Config {
    /// Production endpoints writing into `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self::with_base_url(api::BASE_URL, output_dir)
    }

    /// Both endpoints under an arbitrary host, keeping the production paths.
    #[must_use]
    pub fn with_base_url(base_url: &str, output_dir: impl Into<PathBuf>) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            search_url: format!("{base}{}", api::SEARCH_PATH),
            detail_url: format!("{base}{}", api::DETAIL_PATH),
            output_dir: output_dir.into(),
            iterations: DEFAULT_ITERATIONS,
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            iterations: 1,
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            ..Self::with_base_url(base_url, output_dir)
        }
    }

    /// Check that both endpoints are absolute http(s) URLs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_endpoint("search_url", &self.search_url)?;
        validate_endpoint("detail_url", &self.detail_url)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(output::DEFAULT_DIR)
    }
}

fn validate_endpoint(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        field,
        value: value.to_string(),
        reason,
    };

    let parsed = url::Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme {other:?}"))),
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(())
}
