use crate::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://onesignal.com/api/v1";

pub const ENV_APP_ID: &str = "ONESIGNAL_APP_ID";
pub const ENV_API_KEY: &str = "ONESIGNAL_API_KEY";
pub const ENV_API_URI: &str = "ONESIGNAL_API_URI";

/// Application identifier, API key and base URL. Fixed once a client is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    app_id: String,
    api_key: String,
    base_url: String,
}

impl ClientConfig {
    pub fn new(app_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Reads `ONESIGNAL_APP_ID`, `ONESIGNAL_API_KEY` and the optional `ONESIGNAL_API_URI`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| Error::Config(format!("{} is not set", key)))
        };

        let config = Self::new(required(ENV_APP_ID)?, required(ENV_API_KEY)?);
        Ok(match lookup(ENV_API_URI).filter(|value| !value.is_empty()) {
            Some(base_url) => config.with_base_url(base_url),
            None => config,
        })
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Checks the base URL and drops any trailing slash.
    pub(crate) fn validated(mut self) -> Result<Self> {
        url::Url::parse(&self.base_url)
            .map_err(|err| Error::InvalidUrl(format!("{}: {}", self.base_url, err)))?;
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        Ok(self)
    }
}
