use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Shown to the user whenever a backend answers with an envelope we cannot read.
pub const PARSING_FALLBACK_MESSAGE: &str =
    "Sorry, the analysis service returned a response that could not be understood. Please try again.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    #[error("Could not reach the analysis backend: {0}")]
    Connectivity(String),

    #[error("Analysis backend returned status {status}")]
    Backend { status: u16, body: String },

    #[error("{}", PARSING_FALLBACK_MESSAGE)]
    Parsing { detail: String },

    #[error("Error generating AI analysis: {0}")]
    Analysis(String),

    #[error("Invalid state transition: {current} -> {requested}")]
    InvalidTransition { current: String, requested: String },

    #[error("Session not found: {session_id}")]
    SessionNotFound { session_id: String },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn connectivity(msg: impl Into<String>) -> Self {
        Self::Connectivity(msg.into())
    }

    pub fn parsing(detail: impl Into<String>) -> Self {
        Self::Parsing {
            detail: detail.into(),
        }
    }

    pub fn analysis(msg: impl Into<String>) -> Self {
        Self::Analysis(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable identifier rendered alongside the message in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "configuration",
            Self::Validation(_) => "validation",
            Self::Connectivity(_) => "connectivity",
            Self::Backend { .. } => "backend",
            Self::Parsing { .. } => "parsing",
            Self::SessionNotFound { .. } => "session_not_found",
            _ => "analysis",
        }
    }

    /// Status code carried by a backend rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Everything except a broken configuration can be retried by the user.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Config(_) | Self::Yaml(_) | Self::AddrParse(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            Self::Backend {
                status: status.as_u16(),
                body: String::new(),
            }
        } else if e.is_connect() || e.is_timeout() || e.is_request() {
            Self::Connectivity(e.to_string())
        } else if e.is_decode() {
            Self::parsing(e.to_string())
        } else {
            Self::Analysis(e.to_string())
        }
    }
}

impl From<async_openai::error::OpenAIError> for Error {
    fn from(e: async_openai::error::OpenAIError) -> Self {
        use async_openai::error::OpenAIError;

        match e {
            OpenAIError::Reqwest(inner) => inner.into(),
            other @ OpenAIError::JSONDeserialize(..) => Self::parsing(other.to_string()),
            OpenAIError::InvalidArgument(msg) => Self::Config(msg),
            other => Self::Analysis(other.to_string()),
        }
    }
}
