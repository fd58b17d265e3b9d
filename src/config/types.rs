use serde::Deserialize;
use std::time::Duration;

/// Placeholder that is replaced by the page number in the URL template
pub const PAGE_PLACEHOLDER: &str = "{}";

pub const DEFAULT_URL_TEMPLATE: &str = "https://www.eventbrite.ie/d/ireland/all-events/?page={}";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const DEFAULT_OUTPUT_PATH: &str = "eventbrite_event_ids_requests.csv";
pub const DEFAULT_HEADER: &str = "Event ID";

/// Main configuration structure for Listing-Harvest
///
/// Every field has a default, so an empty TOML document (or no file at all)
/// yields the built-in Eventbrite Ireland setup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub request: RequestConfig,
    pub output: OutputConfig,
}

/// Where the listing pages live and what to pull out of them
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Page URL with a single `{}` placeholder for the page number
    #[serde(rename = "url-template")]
    pub url_template: String,

    /// Element tag carrying the identifier (e.g. "a")
    pub tag: String,

    /// Attribute holding the identifier (e.g. "data-event-id")
    pub attribute: String,

    /// First page number to request
    #[serde(rename = "start-page")]
    pub start_page: u32,
}

/// HTTP request behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    /// User-Agent header sent with every page request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Pause between successfully harvested pages (milliseconds)
    #[serde(rename = "page-delay-ms")]
    pub page_delay_ms: u64,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

/// Output file configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the delimited output file
    pub path: String,

    /// Single header cell written on the first row
    pub header: String,

    /// Field delimiter (one character)
    pub delimiter: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            tag: "a".to_string(),
            attribute: "data-event-id".to_string(),
            start_page: 1,
        }
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_delay_ms: 1000,
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT_PATH.to_string(),
            header: DEFAULT_HEADER.to_string(),
            delimiter: ",".to_string(),
        }
    }
}

impl SourceConfig {
    /// Builds the URL for a page number by filling the template placeholder
    pub fn page_url(&self, page: u32) -> String {
        self.url_template
            .replacen(PAGE_PLACEHOLDER, &page.to_string(), 1)
    }
}

impl RequestConfig {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl OutputConfig {
    /// Returns the delimiter character, falling back to ',' for an empty value
    pub fn delimiter_char(&self) -> char {
        self.delimiter.chars().next().unwrap_or(',')
    }
}
