use crate::extractors::RejectionType;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use semver::Version;
use service::config::ApiVersion;

/// Checks the `x-version` request header against the list of API
/// versions this build serves. Requests without the header, or pinned to
/// a version this router no longer exposes, are rejected up front.
pub(crate) struct CompareApiVersion(pub Version);

#[async_trait]
impl<S> FromRequestParts<S> for CompareApiVersion
where
    S: Send + Sync,
{
    type Rejection = RejectionType;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(ApiVersion::field_name())
            .and_then(|value| value.to_str().ok())
            .ok_or((
                StatusCode::BAD_REQUEST,
                format!("Missing {} header", ApiVersion::field_name()),
            ))?;

        if !ApiVersion::versions().iter().any(|v| *v == header_value) {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("Unsupported API version: {header_value}"),
            ));
        }

        let version = Version::parse(header_value).map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                format!("Invalid {} header", ApiVersion::field_name()),
            )
        })?;

        Ok(CompareApiVersion(version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get, Router};
    use tower::ServiceExt;

    async fn probe(CompareApiVersion(_v): CompareApiVersion) -> &'static str {
        "versioned"
    }

    fn test_app() -> Router {
        Router::new().route("/probe", get(probe))
    }

    #[tokio::test]
    async fn rejects_a_missing_version_header() {
        let request = Request::builder()
            .uri("/probe")
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_an_unsupported_version() {
        let request = Request::builder()
            .uri("/probe")
            .header(ApiVersion::field_name(), "0.0.1")
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn accepts_the_current_version() {
        let request = Request::builder()
            .uri("/probe")
            .header(ApiVersion::field_name(), ApiVersion::default_version())
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
