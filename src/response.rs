use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::{
    transport::{HttpResponse, TransportError},
    PostgrestError, Result,
};

/// Outcome of a terminal query operation.
///
/// At most one of `data` and `error` is set. Both are `None` only when a
/// successful response carried an empty body (e.g. `204 No Content`).
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    /// Parsed response body on a `2xx` status.
    pub data: Option<JsonValue>,
    /// Transport failure, non-`2xx` status or payload encoding failure.
    pub error: Option<PostgrestError>,
}

impl ApiResponse {
    pub fn ok(data: Option<JsonValue>) -> Self {
        Self { data, error: None }
    }

    pub fn error(err: PostgrestError) -> Self {
        Self {
            data: None,
            error: Some(err),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }

    /// Converts into a `Result`, consuming the response.
    pub fn into_result(self) -> Result<Option<JsonValue>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.data),
        }
    }

    /// Decodes `data` into `T`.
    ///
    /// Returns `Ok(None)` for a successful empty body.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<Option<T>> {
        self.into_result()?
            .map(|data| {
                serde_json::from_value(data).map_err(|err| {
                    PostgrestError::Decode(format!("unexpected response shape: {err}"))
                })
            })
            .transpose()
    }
}

/// Maps a transport outcome onto the `{data, error}` shape.
pub(crate) fn normalize(
    outcome: std::result::Result<HttpResponse, TransportError>,
) -> ApiResponse {
    let response = match outcome {
        Ok(response) => response,
        Err(err) => return ApiResponse::error(PostgrestError::Transport(err.0)),
    };

    let body = parse_body(&response.body);
    if (200..300).contains(&response.status) {
        ApiResponse::ok(body)
    } else {
        ApiResponse::error(PostgrestError::Http {
            status: response.status,
            body: body.unwrap_or(JsonValue::Null),
        })
    }
}

/// Parses a body as JSON, falling back to the raw text.
fn parse_body(text: &str) -> Option<JsonValue> {
    if text.is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).unwrap_or_else(|_| JsonValue::String(text.to_owned())))
}
