use crate::extractors::RejectionType;
use crate::AppState;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::*;
use serde::Deserialize;

/// The verified identity (email) of the requesting user.
///
/// This extractor is the authorization gate for every protected endpoint:
/// it decodes the `Authorization` header claim, resolves the claimed
/// email to its current session token in the registry, and compares. A
/// missing header, an undecodable claim, an absent session, or a token
/// mismatch all reject the request with 401 before any handler code
/// runs. The proof scheme is direct bearer-token equality.
pub(crate) struct AuthenticatedUser(pub String);

/// Wire shape of the `Authorization` header value: base64 of this JSON.
#[derive(Debug, Deserialize)]
struct Claim {
    email: String,
    token: String,
}

impl Claim {
    fn decode(header_value: &str) -> Option<Self> {
        let decoded = STANDARD.decode(header_value).ok()?;
        serde_json::from_slice(&decoded).ok()
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = RejectionType;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let unauthorized = || (StatusCode::UNAUTHORIZED, "Unauthorized".to_string());

        let header_value = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(unauthorized)?;

        let claim = Claim::decode(header_value).ok_or_else(|| {
            debug!("rejecting request with undecodable Authorization claim");
            unauthorized()
        })?;

        if state
            .session_registry()
            .is_current(&claim.email, &claim.token)
        {
            Ok(AuthenticatedUser(claim.email))
        } else {
            debug!("rejecting request with stale session for {}", claim.email);
            Err(unauthorized())
        }
    }
}
