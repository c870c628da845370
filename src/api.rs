//! JSON wire layer
//!
//! Decodes a [`Request`], runs it against a [`PollService`] and encodes the
//! outcome as a [`Response`] envelope. Every failure, including an
//! undecodable request, comes back as an error envelope with an
//! [`ErrorCode`].
//!
//! ```rust
//! use poll::service::PollService;
//!
//! let service = PollService::for_testing();
//! let reply = service.handle_json(
//!     r#"{"method":"create_poll","params":{"id":"p1","question":"Color?","options":["red","blue"]}}"#,
//! );
//! assert!(reply.contains(r#""status":"ok""#));
//!
//! let reply = service.handle_json(r#"{"method":"get_poll","params":{"poll_id":"nope"}}"#);
//! assert!(reply.contains(r#""code":"NotFound""#));
//! ```

use crate::errors::ErrorCode;
use crate::service::PollService;
use crate::types::{CreatePollRequest, OptionCount, Poll, PollId};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A decoded call to one of the four poll operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "params", rename_all = "snake_case")]
pub enum Request {
    CreatePoll(CreatePollRequest),
    Vote { poll_id: PollId, option: String },
    GetPoll { poll_id: PollId },
    GetPollResults { poll_id: PollId },
}

/// Successful payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseData {
    Poll(Poll),
    Results(Vec<OptionCount>),
}

/// Failure payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&Error> for ErrorBody {
    fn from(error: &Error) -> Self {
        Self {
            code: error.code(),
            message: error.to_string(),
        }
    }
}

/// Outcome envelope for every request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Ok { data: ResponseData },
    Err { error: ErrorBody },
}

impl Response {
    /// Error envelope for `error`
    pub fn error(error: &Error) -> Self {
        Self::Err {
            error: ErrorBody::from(error),
        }
    }

    /// Whether this is a success envelope
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    /// Error code, if this is an error envelope
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Ok { .. } => None,
            Self::Err { error } => Some(error.code),
        }
    }
}

impl From<Result<ResponseData>> for Response {
    fn from(result: Result<ResponseData>) -> Self {
        match result {
            Ok(data) => Self::Ok { data },
            Err(e) => Self::error(&e),
        }
    }
}

impl PollService {
    /// Dispatch a decoded request
    pub fn handle(&self, request: Request) -> Response {
        let result = match request {
            Request::CreatePoll(req) => self.create_poll(req).map(ResponseData::Poll),
            Request::Vote { poll_id, option } => {
                self.vote(&poll_id, &option).map(ResponseData::Poll)
            }
            Request::GetPoll { poll_id } => self.get_poll(&poll_id).map(ResponseData::Poll),
            Request::GetPollResults { poll_id } => {
                self.get_poll_results(&poll_id).map(ResponseData::Results)
            }
        };

        Response::from(result)
    }

    /// Decode, dispatch and encode a JSON request
    pub fn handle_json(&self, raw: &str) -> String {
        let response = match decode_request(raw) {
            Ok(request) => self.handle(request),
            Err(e) => {
                tracing::warn!(error = %e, "Undecodable request");
                Response::error(&e)
            }
        };

        encode_response(&response)
    }
}

/// Parse a JSON request
pub fn decode_request(raw: &str) -> Result<Request> {
    Ok(serde_json::from_str(raw)?)
}

/// Serialize a response, falling back to an internal error envelope
pub fn encode_response(response: &Response) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| encoding_failure(&e.to_string()))
}

fn encoding_failure(detail: &str) -> String {
    serde_json::json!({
        "status": "err",
        "error": {
            "code": ErrorCode::Internal,
            "message": format!("Response encoding failed: {detail}"),
        },
    })
    .to_string()
}
