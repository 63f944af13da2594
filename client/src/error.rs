/// Failure reported by the service, classified from the response status and body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Root kind, for failures that fit no narrower classification.
    #[error("{0}")]
    Api(String),
    #[error("{0}")]
    Server(String),
    #[error("{0}")]
    Client(String),
    #[error("{0}")]
    RateLimit(String),
    #[error("{0}")]
    InvalidExternalUserIds(String),
    #[error("{0}")]
    InvalidPlayerIds(String),
    /// Never produced by response classification.
    #[error("{0}")]
    TagLimit(String),
}

impl ApiError {
    pub fn message(&self) -> &str {
        match self {
            ApiError::Api(message)
            | ApiError::Server(message)
            | ApiError::Client(message)
            | ApiError::RateLimit(message)
            | ApiError::InvalidExternalUserIds(message)
            | ApiError::InvalidPlayerIds(message)
            | ApiError::TagLimit(message) => message,
        }
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self, ApiError::Server(_))
    }

    /// True for the generic client error and every kind that refines it.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ApiError::Client(_)
                | ApiError::RateLimit(_)
                | ApiError::InvalidExternalUserIds(_)
                | ApiError::InvalidPlayerIds(_)
                | ApiError::TagLimit(_)
        )
    }

    /// Short name of the kind, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Api(_) => "api",
            ApiError::Server(_) => "server",
            ApiError::Client(_) => "client",
            ApiError::RateLimit(_) => "rate_limit",
            ApiError::InvalidExternalUserIds(_) => "invalid_external_user_ids",
            ApiError::InvalidPlayerIds(_) => "invalid_player_ids",
            ApiError::TagLimit(_) => "tag_limit",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),
    #[error("JSON serialization/deserialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
    #[error("Payload must serialize to a JSON object, got {0}")]
    InvalidPayload(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// The classified service error, if this failure came from the API.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
