use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://perception.to";
pub const DEFAULT_RESEARCH_PREFIX: &str = "/bitcoin-media-research";
pub const DEFAULT_SENTIMENT_PREFIX: &str = "/bitcoin-market-sentiment";
pub const DEFAULT_PLATFORM_NAME: &str = "Perception";

/// Canonical site settings used to build document URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    base_url: Url,
    pub research_prefix: String,
    pub sentiment_prefix: String,
    pub platform_name: String,
}

impl SiteConfig {
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            research_prefix: DEFAULT_RESEARCH_PREFIX.to_string(),
            sentiment_prefix: DEFAULT_SENTIMENT_PREFIX.to_string(),
            platform_name: DEFAULT_PLATFORM_NAME.to_string(),
        })
    }

    /// Origin without a trailing slash, e.g. `https://perception.to`.
    pub fn origin(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Absolute URL for a site path; `path` is expected to start with `/`.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.origin(), path)
        } else {
            format!("{}/{}", self.origin(), path)
        }
    }

    pub fn article_url(&self, slug: &str) -> String {
        self.url_for(&format!("{}/{}", self.research_prefix, slug))
    }

    pub fn daily_sentiment_url(&self, year: i32, month_name: &str, day: u32) -> String {
        self.url_for(&format!(
            "{}/{}/{}/{}",
            self.sentiment_prefix,
            year,
            month_name.to_lowercase(),
            day
        ))
    }

    pub fn monthly_sentiment_url(&self, year: i32, month_name: &str) -> String {
        self.url_for(&format!(
            "{}/{}/{}",
            self.sentiment_prefix,
            year,
            month_name.to_lowercase()
        ))
    }

    /// Closing line appended to every sentiment document.
    pub fn attribution(&self) -> String {
        format!(
            "Data provided by [{name}]({origin}) - Intelligence Workspace for Bitcoin & Crypto",
            name = self.platform_name,
            origin = self.origin()
        )
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            research_prefix: DEFAULT_RESEARCH_PREFIX.to_string(),
            sentiment_prefix: DEFAULT_SENTIMENT_PREFIX.to_string(),
            platform_name: DEFAULT_PLATFORM_NAME.to_string(),
        }
    }
}
