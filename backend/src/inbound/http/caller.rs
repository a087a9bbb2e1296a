//! Opaque caller identity supplied by the fronting gateway.
//!
//! The value is recorded in logs only; no authorisation decision depends on
//! it.

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

/// Header carrying the caller identity.
pub const CALLER_ID_HEADER: &str = "x-caller-id";

/// Caller identity, absent when the header is missing or blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerIdentity(Option<String>);

impl CallerIdentity {
    /// Read the identity from request headers.
    pub fn from_headers(req: &HttpRequest) -> Self {
        let id = req
            .headers()
            .get(CALLER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned);
        Self(id)
    }

    /// The identity, if supplied.
    pub fn id(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl FromRequest for CallerIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_headers(req)))
    }
}
