use crate::controller::ApiResponse;
use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::{AppState, Error};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{AppendHeaders, IntoResponse},
    Json,
};
use domain::user::Credentials;
use log::*;
use serde_json::json;
use service::config::ApiVersion;

/// Logs the user in and issues a new session token.
///
/// The token is returned in the `Authorization` response header and must
/// be presented (together with the email, base64-encoded as a JSON claim)
/// in the `Authorization` request header on every subsequent API call and
/// in the liveness channel handshake. Logging in again from anywhere
/// replaces the previous token, which stops being valid immediately.
#[utoipa::path(
    post,
    path = "/session",
    params(
        ApiVersion,
    ),
    request_body(content = domain::user::Credentials, content_type = "application/json"),
    responses(
        (status = 200, description = "Logs in and returns the session token in the Authorization header"),
        (status = 401, description = "Unauthorized"),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn login(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Json(creds): Json<Credentials>,
) -> Result<impl IntoResponse, Error> {
    let user = match domain::user::authenticate(app_state.db_conn_ref(), creds.clone()).await {
        Ok(user) => user,
        Err(err) => {
            warn!("Authentication failed, invalid credentials: {:?}", creds.email);
            return Err(Error::from(err));
        }
    };

    // Issuing the token is what logs any previous session out.
    let token = app_state.session_registry().create_session(&user.email);
    debug!("issued new session for {}", user.email);

    Ok((
        AppendHeaders([(header::AUTHORIZATION, token.as_str().to_owned())]),
        Json(ApiResponse::new(
            StatusCode::OK.into(),
            json!({ "email": user.email }),
        )),
    ))
}

/// Logs the user out by discarding their session.
///
/// Any liveness channel watching this session observes the deletion on
/// its next poll and closes.
#[utoipa::path(
    delete,
    path = "/session",
    params(
        ApiVersion,
    ),
    responses(
        (status = 200, description = "Successfully logged out"),
        (status = 401, description = "Unauthorized"),
        (status = 405, description = "Method not allowed")
    ),
    security(
        ("bearer_token" = [])
    )
)]
pub async fn delete(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(email): AuthenticatedUser,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    trace!("UserSessionController::delete()");
    app_state.session_registry().delete_session(&email);
    Ok(Json(ApiResponse::<()>::no_content(StatusCode::OK.into())))
}

#[cfg(test)]
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::post, Router};
    use chrono::Utc;
    use clap::Parser;
    use domain::{users, Id};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use service::config::{ApiVersion, Config};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn stored_user() -> users::Model {
        let now = Utc::now();
        users::Model {
            id: Id::default(),
            email: "test@chirp.dev".to_string(),
            first_name: "Test".to_string(),
            last_name: "Login".to_string(),
            gender: "other".to_string(),
            city: "Linkoping".to_string(),
            country: "Sweden".to_string(),
            password: domain::user::generate_hash("password123".to_string()),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn test_app(db: sea_orm::DatabaseConnection) -> (Router, AppState) {
        let config = Config::parse_from(["chirp"]);
        let app_state = AppState::new(config, &Arc::new(db));
        let app = Router::new()
            .route("/session", post(login))
            .with_state(app_state.clone());
        (app, app_state)
    }

    fn login_request(email: &str, password: &str) -> Request<Body> {
        Request::builder()
            .uri("/session")
            .method("POST")
            .header("content-type", "application/json")
            .header(ApiVersion::field_name(), ApiVersion::default_version())
            .body(Body::from(format!(
                r#"{{"email":"{email}","password":"{password}"}}"#
            )))
            .unwrap()
    }

    #[tokio::test]
    async fn login_issues_a_session_and_returns_the_token_header() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[stored_user()]])
            .into_connection();
        let (app, state) = test_app(db);

        let response = app
            .oneshot(login_request("test@chirp.dev", "password123"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let token_header = response
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .expect("login should return the session token")
            .to_owned();

        assert!(state
            .session_registry()
            .is_current("test@chirp.dev", &token_header));
    }

    #[tokio::test]
    async fn login_with_a_wrong_password_is_unauthorized() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[stored_user()]])
            .into_connection();
        let (app, state) = test_app(db);

        let response = app
            .oneshot(login_request("test@chirp.dev", "wrong-password"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(state.session_registry().get_session("test@chirp.dev").is_none());
    }

    #[tokio::test]
    async fn a_second_login_supersedes_the_first_session() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[stored_user()]])
            .append_query_results([[stored_user()]])
            .into_connection();
        let (app, state) = test_app(db);

        let first = app
            .clone()
            .oneshot(login_request("test@chirp.dev", "password123"))
            .await
            .unwrap();
        let first_token = first
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .unwrap()
            .to_owned();

        let second = app
            .oneshot(login_request("test@chirp.dev", "password123"))
            .await
            .unwrap();
        let second_token = second
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .unwrap()
            .to_owned();

        assert_ne!(first_token, second_token);
        assert!(!state
            .session_registry()
            .is_current("test@chirp.dev", &first_token));
        assert!(state
            .session_registry()
            .is_current("test@chirp.dev", &second_token));
    }
}
