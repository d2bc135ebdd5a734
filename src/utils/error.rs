use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BinderError {
    #[error("Upstream unavailable ({url}): {source}")]
    UpstreamUnavailable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] ParseFailure),

    #[error("Unable to find A/FD page for {waypoint}")]
    UnresolvedWaypoint { waypoint: String },

    #[error("Merge failed for {}: {message}", .path.display())]
    Merge { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

/// Structural mismatches between a fetched catalog page and what the scrapers expect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("cycle list element not found on catalog page")]
    MissingCycleList,

    #[error("cycle list contains no options")]
    EmptyCycleList,

    #[error("cycle option {label:?} has no value token")]
    MissingCycleValue { label: String },

    #[error("cycle label {label:?} does not look like 'Mon DD' or 'Mon DD, YYYY'")]
    UnrecognizedCycleLabel { label: String },

    #[error("cycle label {label:?} is not a real calendar date")]
    InvalidCycleDate { label: String },

    #[error("search results for {waypoint} contain neither a document link nor a no-results marker")]
    NoDocumentLink { waypoint: String },

    #[error("document URL {url:?} is not a valid absolute URL")]
    InvalidDocumentUrl { url: String },

    #[error("document URL {url:?} has no file name")]
    UnnamedDocument { url: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Parsing,
    Route,
    Document,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BinderError {
    pub fn upstream(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::UpstreamUnavailable {
            url: url.into(),
            source,
        }
    }

    pub fn merge(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Merge {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UpstreamUnavailable { .. } => ErrorCategory::Network,
            Self::Parse(_) => ErrorCategory::Parsing,
            Self::UnresolvedWaypoint { .. } => ErrorCategory::Route,
            Self::Merge { .. } => ErrorCategory::Document,
            Self::IoError(_) => ErrorCategory::System,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Route | ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Network | ErrorCategory::Parsing | ErrorCategory::Document => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::UpstreamUnavailable { url, .. } => {
                format!("Could not reach {}", url)
            }
            Self::Parse(failure) => format!("Unexpected page layout: {}", failure),
            Self::UnresolvedWaypoint { waypoint } => {
                format!("Unable to find A/FD page for {}", waypoint)
            }
            Self::Merge { path, .. } => {
                format!("Could not merge document {}", path.display())
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your connection and the catalog URL, then run again",
            ErrorCategory::Parsing => "The catalog layout may have changed; check --catalog-url and --document-host",
            ErrorCategory::Route => "Check the waypoint identifier spelling; not every airport has an A/FD page",
            ErrorCategory::Document => "Delete the cached file from the cache directory and run again",
            ErrorCategory::Configuration => "Review the command line options and config file",
            ErrorCategory::System => "Check permissions and free space in the cache and output directories",
        }
    }
}

pub type Result<T> = std::result::Result<T, BinderError>;
