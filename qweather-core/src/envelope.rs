//! Response envelopes and the rules for trusting their status.
//!
//! Every upstream body carries a string `code`. `"200"` is trusted, any other
//! non-empty value is an upstream error. An empty (or absent) code is only
//! meaningful for the air-quality resources, where the payload decides: data
//! present means [`Status::Unverified`], no data means the response is
//! unusable.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::DeserializeOwned};
use tracing::{error, info};

use crate::{
    endpoint::StatusPolicy,
    error::{QWeatherError, Result},
    log_level::LogLevel,
};

pub const CODE_SUCCESS: &str = "200";
pub const CODE_UNKNOWN: &str = "unknown";

const MAX_ERROR_LOG_LENGTH: usize = 500;

/// Parsed form of the upstream `code` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Status {
    /// Exactly `"200"`.
    Success,
    /// The code was empty but the payload was not; stamped by [`normalize`].
    Unverified,
    /// Empty or absent on the wire.
    #[default]
    Empty,
    Error(String),
}

impl Status {
    pub fn from_code(code: &str) -> Self {
        match code {
            CODE_SUCCESS => Status::Success,
            "" => Status::Empty,
            other => Status::Error(other.to_string()),
        }
    }

    pub fn as_code(&self) -> &str {
        match self {
            Status::Success => CODE_SUCCESS,
            Status::Unverified => CODE_UNKNOWN,
            Status::Empty => "",
            Status::Error(code) => code,
        }
    }

    /// Usable either way: verified or stamped after payload inspection.
    pub fn is_usable(&self) -> bool {
        matches!(self, Status::Success | Status::Unverified)
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = Option::<String>::deserialize(deserializer)?;
        Ok(code.as_deref().map_or(Status::Empty, Status::from_code))
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_code())
    }
}

/// A decoded top-level response with a status field.
pub trait Envelope {
    fn status(&self) -> &Status;
    fn set_status(&mut self, status: Status);
}

/// Status check for resources whose code is always trustworthy.
pub fn require_success<E: Envelope>(envelope: E) -> Result<E> {
    match envelope.status() {
        Status::Success => Ok(envelope),
        other => Err(QWeatherError::Upstream {
            code: other.as_code().to_string(),
        }),
    }
}

/// Status check for resources that sometimes omit their code.
///
/// `payload` locates the collection whose presence rescues an empty code.
pub fn normalize<E, T, F>(mut envelope: E, payload: F) -> Result<E>
where
    E: Envelope,
    F: FnOnce(&E) -> &[T],
{
    match envelope.status() {
        Status::Success | Status::Unverified => Ok(envelope),
        Status::Error(code) => Err(QWeatherError::Upstream { code: code.clone() }),
        Status::Empty => {
            if payload(&envelope).is_empty() {
                return Err(QWeatherError::InvalidResponse);
            }
            envelope.set_status(Status::Unverified);
            Ok(envelope)
        }
    }
}

impl StatusPolicy {
    /// Apply this policy; `payload` is only consulted by the lenient policy.
    pub fn apply<E, T, F>(self, envelope: E, payload: F) -> Result<E>
    where
        E: Envelope,
        F: FnOnce(&E) -> &[T],
    {
        match self {
            StatusPolicy::Strict => require_success(envelope),
            StatusPolicy::EmptyMeansPayload => normalize(envelope, payload),
        }
    }
}

/// Decode a raw body; the raw text goes to the log, never into the error.
pub fn decode<T: DeserializeOwned>(
    resource: &'static str,
    body: &[u8],
    log_level: LogLevel,
) -> Result<T> {
    serde_json::from_slice(body).map_err(|err| {
        if log_level >= LogLevel::Error {
            error!(
                resource,
                error = %err,
                raw = %preview(body, MAX_ERROR_LOG_LENGTH),
                "failed to parse response"
            );
        }
        QWeatherError::Decode {
            resource,
            message: err.to_string(),
        }
    })
}

/// Trace a rescued empty status; callers pass the payload size.
pub(crate) fn log_unverified(resource: &'static str, items: usize, log_level: LogLevel) {
    if log_level >= LogLevel::Info {
        info!(resource, items, "empty status code, accepting response with data");
    }
}

/// First `max` characters of a body, lossily decoded.
pub fn preview(body: &[u8], max: usize) -> String {
    let text = String::from_utf8_lossy(body);
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{head}... (truncated)")
    } else {
        text.into_owned()
    }
}
