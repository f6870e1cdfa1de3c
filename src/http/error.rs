use std::error::Error as StdError;
use std::fmt;

use reqwest::header::InvalidHeaderValue;
use reqwest::{Error as ReqwestError, Response, StatusCode};
use url::ParseError as UrlError;

use super::LightMethod;
use crate::internal::prelude::*;
use crate::json::JsonError;

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[non_exhaustive]
pub struct DiscordJsonError {
    /// The error code.
    pub code: isize,
    /// The error message.
    pub message: String,
    /// The full explained errors with their path in the request body.
    #[serde(default, deserialize_with = "deserialize_errors")]
    pub errors: Vec<DiscordJsonSingleError>,
}

#[derive(Deserialize)]
struct ErrorDetails {
    code: String,
    message: String,
}

/// An error with its path in the request body.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[non_exhaustive]
pub struct DiscordJsonSingleError {
    /// The error code.
    pub code: String,
    /// The error message.
    pub message: String,
    /// The path to the error in the request body itself, dot separated.
    pub path: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ErrorResponse {
    pub status_code: StatusCode,
    pub url: String,
    pub method: LightMethod,
    pub error: DiscordJsonError,
}

impl ErrorResponse {
    // We need a freestanding from-function since we cannot implement an async From-trait.
    pub async fn from_response(r: Response, method: LightMethod) -> Self {
        ErrorResponse {
            status_code: r.status(),
            url: r.url().to_string(),
            method,
            error: r.json().await.unwrap_or_else(|e| DiscordJsonError {
                code: -1,
                message: format!(
                    "[Accord] Could not decode json when receiving error response from discord: {e}"
                ),
                errors: vec![],
            }),
        }
    }
}

#[derive(Debug)]
#[non_exhaustive]
pub enum HttpError {
    /// When a non-successful status code was received for a request.
    UnsuccessfulRequest(ErrorResponse),
    /// When parsing an URL failed due to invalid input.
    Url(UrlError),
    /// Header value contains invalid input.
    InvalidHeader(InvalidHeaderValue),
    /// Reqwest's Error contain information on why sending a request failed.
    Request(ReqwestError),
}

impl HttpError {
    /// Returns true when the error is caused by an unsuccessful request
    #[must_use]
    pub fn is_unsuccessful_request(&self) -> bool {
        matches!(self, Self::UnsuccessfulRequest(_))
    }

    /// Returns true when the error is caused by the url containing invalid input
    #[must_use]
    pub fn is_url_error(&self) -> bool {
        matches!(self, Self::Url(_))
    }

    /// Returns true when the error is caused by an invalid header
    #[must_use]
    pub fn is_invalid_header(&self) -> bool {
        matches!(self, Self::InvalidHeader(_))
    }

    /// Returns the status code if the error is an unsuccessful request
    #[must_use]
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::UnsuccessfulRequest(res) => Some(res.status_code),
            _ => None,
        }
    }
}

impl From<ErrorResponse> for HttpError {
    fn from(error: ErrorResponse) -> Self {
        Self::UnsuccessfulRequest(error)
    }
}

impl From<ReqwestError> for HttpError {
    fn from(error: ReqwestError) -> Self {
        Self::Request(error)
    }
}

impl From<UrlError> for HttpError {
    fn from(error: UrlError) -> Self {
        Self::Url(error)
    }
}

impl From<InvalidHeaderValue> for HttpError {
    fn from(error: InvalidHeaderValue) -> Self {
        Self::InvalidHeader(error)
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsuccessfulRequest(e) => {
                f.write_str(&e.error.message)?;

                // Put Discord's human readable error explanations in parentheses
                let mut errors_iter = e.error.errors.iter();
                if let Some(error) = errors_iter.next() {
                    f.write_str(" (")?;
                    f.write_str(&error.path)?;
                    f.write_str(": ")?;
                    f.write_str(&error.message)?;
                    for error in errors_iter {
                        f.write_str(", ")?;
                        f.write_str(&error.path)?;
                        f.write_str(": ")?;
                        f.write_str(&error.message)?;
                    }
                    f.write_str(")")?;
                }

                Ok(())
            },
            Self::Url(_) => f.write_str("Provided URL is incorrect."),
            Self::InvalidHeader(_) => f.write_str("Provided value is an invalid header value."),
            Self::Request(_) => f.write_str("Error while sending HTTP request."),
        }
    }
}

impl StdError for HttpError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Url(inner) => Some(inner),
            Self::Request(inner) => Some(inner),
            _ => None,
        }
    }
}

fn deserialize_errors<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> StdResult<Vec<DiscordJsonSingleError>, D::Error> {
    let map: Value = Value::deserialize(deserializer)?;

    if !map.is_object() {
        return Ok(vec![]);
    }

    let mut errors = Vec::new();
    let mut path = Vec::new();
    loop_errors(&map, &mut errors, &mut path).map_err(serde::de::Error::custom)?;

    Ok(errors)
}

fn make_error(
    errors_to_process: Vec<ErrorDetails>,
    errors: &mut Vec<DiscordJsonSingleError>,
    path: &[&str],
) {
    for error in errors_to_process {
        errors.push(DiscordJsonSingleError {
            code: error.code,
            message: error.message,
            path: path.join("."),
        });
    }
}

fn loop_errors<'a>(
    value: &'a Value,
    errors: &mut Vec<DiscordJsonSingleError>,
    path: &mut Vec<&'a str>,
) -> StdResult<(), JsonError> {
    for (key, value) in value.as_object().into_iter().flatten() {
        if key == "_errors" {
            make_error(Vec::<ErrorDetails>::deserialize(value)?, errors, path);
        } else {
            path.push(key);
            loop_errors(value, errors, path)?;
            path.pop();
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::json::{from_value, json};

    #[test]
    fn nested_errors_are_flattened_with_their_path() {
        let error: DiscordJsonError = from_value(json!({
            "code": 50035,
            "message": "Invalid Form Body",
            "errors": {
                "name": {"_errors": [
                    {"code": "BASE_TYPE_REQUIRED", "message": "This field is required"},
                ]},
                "roles": {"0": {"_errors": [{"code": "X", "message": "Bad role"}]}},
            },
        }))
        .unwrap();

        assert_eq!(error.errors.len(), 2);
        assert!(error.errors.iter().any(|e| e.path == "name" && e.code == "BASE_TYPE_REQUIRED"));
        assert!(error.errors.iter().any(|e| e.path == "roles.0" && e.message == "Bad role"));
    }

    #[test]
    fn display_lists_every_error() {
        let error = HttpError::UnsuccessfulRequest(ErrorResponse {
            status_code: StatusCode::BAD_REQUEST,
            url: "https://discord.com/api/v10/guilds/1".into(),
            method: LightMethod::Patch,
            error: DiscordJsonError {
                code: 50035,
                message: "Invalid Form Body".into(),
                errors: vec![DiscordJsonSingleError {
                    code: "X".into(),
                    message: "Too long".into(),
                    path: "name".into(),
                }],
            },
        });

        assert_eq!(error.to_string(), "Invalid Form Body (name: Too long)");
        assert_eq!(error.status_code(), Some(StatusCode::BAD_REQUEST));
    }
}
