//! Bearer token plumbing for the login endpoints.
//!
//! The dashboard sends its session token as `Authorization: Bearer <token>`.
//! The extractor only parses the header; resolving the token against the
//! session store stays in the handlers so this type needs no shared state.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{Ready, ready};

use crate::domain::SessionToken;

const BEARER_PREFIX: &str = "Bearer ";

/// The bearer token carried by a request, when one was sent.
#[derive(Debug, Clone)]
pub struct BearerToken(Option<SessionToken>);

impl BearerToken {
    /// The parsed token, if the header was present and well formed.
    pub fn token(&self) -> Option<&SessionToken> {
        self.0.as_ref()
    }

    fn parse(req: &HttpRequest) -> Self {
        let token = req
            .headers()
            .get(actix_web::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .filter(|raw| !raw.is_empty())
            .map(SessionToken::from_raw);
        Self(token)
    }
}

impl FromRequest for BearerToken {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::parse(req)))
    }
}
