//! Provider configuration, read from the environment (and `.env`) and
//! overridden by command line flags.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use dotenvy::dotenv;
use ni_core::{Error, Language, Result};
use url::Url;

pub const DEFAULT_ANALYSIS_LATENCY: Duration = Duration::from_millis(2000);
pub const DEFAULT_NARRATION_LATENCY: Duration = Duration::from_millis(1500);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    /// Canned template corpus and placeholder audio.
    #[default]
    Mock,
    /// Remote news/sentiment and speech backends.
    Http,
}

impl FromStr for ProviderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(ProviderKind::Mock),
            "http" => Ok(ProviderKind::Http),
            other => Err(Error::Config(format!("Unknown provider: {}. Available providers: mock, http", other))),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Mock => f.write_str("mock"),
            ProviderKind::Http => f.write_str("http"),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub provider: ProviderKind,
    pub backend_url: Option<String>,
    pub narration_url: Option<String>,
    pub api_key: Option<String>,
    pub analysis_latency: Duration,
    pub narration_latency: Duration,
    /// Upper bound on one backend request of the http provider.
    pub request_timeout: Duration,
    pub language: Language,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("provider", &self.provider)
            .field("backend_url", &self.backend_url)
            .field("narration_url", &self.narration_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("analysis_latency", &self.analysis_latency)
            .field("narration_latency", &self.narration_latency)
            .field("request_timeout", &self.request_timeout)
            .field("language", &self.language)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            backend_url: None,
            narration_url: None,
            api_key: None,
            analysis_latency: DEFAULT_ANALYSIS_LATENCY,
            narration_latency: DEFAULT_NARRATION_LATENCY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            language: Language::default(),
        }
    }
}

impl Config {
    /// Load configuration from `NI_*` environment variables.
    ///
    /// Only malformed values are rejected here; call [`Config::validate`]
    /// once any overrides have been applied.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(provider) = lookup("NI_PROVIDER") {
            config.provider = provider.parse()?;
        }
        config.backend_url = lookup("NI_BACKEND_URL");
        config.narration_url = lookup("NI_TTS_URL");
        config.api_key = lookup("NI_API_KEY");

        if let Some(latency) = lookup("NI_LATENCY_MS") {
            let ms: u64 = latency
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("Invalid NI_LATENCY_MS: {}", latency)))?;
            config = config.with_latency(Duration::from_millis(ms));
        }
        if let Some(timeout) = lookup("NI_TIMEOUT_MS") {
            let ms: u64 = timeout
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("Invalid NI_TIMEOUT_MS: {}", timeout)))?;
            config.request_timeout = Duration::from_millis(ms);
        }
        if let Some(language) = lookup("NI_LANGUAGE") {
            config.language = language
                .parse()
                .map_err(|_| Error::Config(format!("Invalid NI_LANGUAGE: {}", language)))?;
        }

        Ok(config)
    }

    /// Sets both simulated latencies.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.analysis_latency = latency;
        self.narration_latency = latency;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("backend", &self.backend_url), ("narration", &self.narration_url)] {
            if let Some(url) = value {
                Url::parse(url).map_err(|e| Error::Config(format!("Invalid {} URL {}: {}", name, url, e)))?;
            }
        }
        if self.request_timeout.is_zero() {
            return Err(Error::Config("request timeout must be positive".to_string()));
        }
        if self.provider == ProviderKind::Http {
            if self.backend_url.is_none() {
                return Err(Error::Config("http provider requires a backend URL".to_string()));
            }
            if self.narration_url.is_none() {
                return Err(Error::Config("http provider requires a narration URL".to_string()));
            }
        }
        Ok(())
    }
}
