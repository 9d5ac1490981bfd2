use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a product page into a (title, price) observation.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The request never produced a usable page: connection failure, timeout,
    /// or a non-2xx status.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The page loaded but the expected markup is gone. Site layouts change;
    /// this is an ordinary per-round outcome, not a crash.
    #[error("layout mismatch: no match for `{selector}`")]
    LayoutMismatch { selector: String },
}

impl ExtractionError {
    pub fn layout_mismatch(selector: impl Into<String>) -> Self {
        Self::LayoutMismatch {
            selector: selector.into(),
        }
    }

    /// Short kind label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::LayoutMismatch { .. } => "layout_mismatch",
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("price history unwritable: {0}")]
    Unwritable(#[source] sqlx::Error),

    #[error("price history schema mismatch: {0}")]
    SchemaMismatch(String),
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("notification channel unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("notification rejected by channel: HTTP {status}")]
    RejectedByChannel { status: u16 },
}

/// The only fatal error class. Without a readable product registry there is
/// nothing meaningful to monitor, so the process exits before the first round.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("product registry not found at {path}: {source}")]
    Missing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("product registry at {path} is malformed: {reason}")]
    Malformed { path: PathBuf, reason: String },
}
