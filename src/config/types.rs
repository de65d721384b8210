use serde::Deserialize;

/// Main configuration structure for Wiki-Trawl
///
/// Every section and key has a default, so an empty file (or no file at all)
/// yields a usable configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Traversal behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Depth budget given to the seed page
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Pause before every fetch (milliseconds)
    #[serde(rename = "request-delay-ms", default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Path prefix an href must start with to count as an article link
    #[serde(rename = "article-prefix", default = "default_article_prefix")]
    pub article_prefix: String,

    /// Character marking non-article namespaces (e.g. `Special:`, `Talk:`)
    #[serde(rename = "namespace-separator", default = "default_namespace_separator")]
    pub namespace_separator: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            request_delay_ms: default_request_delay_ms(),
            article_prefix: default_article_prefix(),
            namespace_separator: default_namespace_separator(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default = "default_contact_url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email", default = "default_contact_email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: default_contact_url(),
            contact_email: default_contact_email(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_max_depth() -> u32 {
    6
}

fn default_request_delay_ms() -> u64 {
    300
}

fn default_article_prefix() -> String {
    "/wiki".to_string()
}

fn default_namespace_separator() -> String {
    ":".to_string()
}

fn default_crawler_name() -> String {
    "wiki-trawl".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_contact_url() -> String {
    "https://github.com/wiki-trawl/wiki-trawl".to_string()
}

fn default_contact_email() -> String {
    "wiki-trawl@users.noreply.github.com".to_string()
}

fn default_database_path() -> String {
    "url_storage.db".to_string()
}
