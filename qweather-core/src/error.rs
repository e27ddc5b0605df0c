use thiserror::Error;

use crate::model::Coordinates;

pub type Result<T, E = QWeatherError> = std::result::Result<T, E>;

/// Every failure a capability call can end in.
///
/// `CityLookup` and `Fetch` wrap an inner failure with the step it happened
/// in; [`QWeatherError::kind`] looks through them.
#[derive(Debug, Error)]
pub enum QWeatherError {
    #[error("{field} cannot be empty")]
    EmptyInput { field: &'static str },

    #[error("failed to send request to {endpoint}: {message}")]
    Transport { endpoint: String, message: String },

    #[error("request cancelled")]
    Cancelled,

    #[error("request timed out")]
    TimedOut,

    /// `endpoint` is scheme, host and path only.
    #[error("API request failed, status code: {status}, endpoint: {endpoint}")]
    HttpStatus { status: u16, endpoint: String },

    #[error("failed to parse {resource} data: {message}")]
    Decode {
        resource: &'static str,
        message: String,
    },

    #[error("API returned error code: {code}")]
    Upstream { code: String },

    #[error("API returned invalid response: empty code and no data")]
    InvalidResponse,

    #[error("no matching city found")]
    NoMatchingCity,

    #[error("failed to query city: {0}")]
    CityLookup(#[source] Box<QWeatherError>),

    #[error("failed to get {resource} data: {source}{}", coordinates_suffix(.coordinates))]
    Fetch {
        resource: &'static str,
        coordinates: Option<Coordinates>,
        #[source]
        source: Box<QWeatherError>,
    },

    #[error("invalid request for {endpoint}: {message}")]
    InvalidRequest {
        endpoint: &'static str,
        message: String,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Coarse classification of the root failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Transport,
    Cancelled,
    Protocol,
    Decode,
    Upstream,
    InvalidResponse,
    NoMatch,
    Internal,
}

impl QWeatherError {
    /// The innermost failure, past any step wrappers.
    pub fn root(&self) -> &QWeatherError {
        match self {
            QWeatherError::CityLookup(inner) => inner.root(),
            QWeatherError::Fetch { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            QWeatherError::CityLookup(inner) => inner.kind(),
            QWeatherError::Fetch { source, .. } => source.kind(),
            QWeatherError::EmptyInput { .. } => ErrorKind::Validation,
            QWeatherError::Transport { .. } => ErrorKind::Transport,
            QWeatherError::Cancelled | QWeatherError::TimedOut => ErrorKind::Cancelled,
            QWeatherError::HttpStatus { .. } => ErrorKind::Protocol,
            QWeatherError::Decode { .. } => ErrorKind::Decode,
            QWeatherError::Upstream { .. } => ErrorKind::Upstream,
            QWeatherError::InvalidResponse => ErrorKind::InvalidResponse,
            QWeatherError::NoMatchingCity => ErrorKind::NoMatch,
            QWeatherError::InvalidRequest { .. } | QWeatherError::Client(_) => {
                ErrorKind::Internal
            }
        }
    }

    pub fn is_cancellation(&self) -> bool {
        self.kind() == ErrorKind::Cancelled
    }

    /// Upstream status code carried by the root failure, if any.
    pub fn upstream_code(&self) -> Option<&str> {
        match self.root() {
            QWeatherError::Upstream { code } => Some(code),
            _ => None,
        }
    }

    /// Coordinates recorded by the outermost `Fetch` wrapper.
    pub fn coordinates(&self) -> Option<&Coordinates> {
        match self {
            QWeatherError::Fetch { coordinates, .. } => coordinates.as_ref(),
            _ => None,
        }
    }

    pub(crate) fn city_lookup(self) -> Self {
        QWeatherError::CityLookup(Box::new(self))
    }

    pub(crate) fn fetching(self, resource: &'static str, coordinates: Option<&Coordinates>) -> Self {
        QWeatherError::Fetch {
            resource,
            coordinates: coordinates.cloned(),
            source: Box::new(self),
        }
    }
}

fn coordinates_suffix(coordinates: &Option<Coordinates>) -> String {
    match coordinates {
        Some(c) => format!(" (Coordinates: {c})"),
        None => String::new(),
    }
}

/// A wire or user string that is not one of a closed set of values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind} '{value}'. Supported values: {expected}.")]
pub struct ParseValueError {
    kind: &'static str,
    value: String,
    expected: String,
}

impl ParseValueError {
    pub(crate) fn new<'a>(
        kind: &'static str,
        value: &str,
        expected: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected: expected.into_iter().collect::<Vec<_>>().join(", "),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}
