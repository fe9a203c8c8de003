use crate::controller::health_check_controller;
use crate::{liveness, params, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::controller::{post_controller, user_controller, user_session_controller};

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Chirp API"
        ),
        paths(
            health_check_controller::health_check,
            post_controller::create,
            post_controller::index,
            user_controller::create,
            user_controller::read,
            user_controller::update_password,
            user_session_controller::login,
            user_session_controller::delete,
        ),
        components(
            schemas(
                domain::posts::Model,
                domain::users::Model,
                domain::user::Credentials,
                params::post::CreateParams,
                params::user::UpdatePasswordParams,
            )
        ),
        modifiers(&SecurityAddon),
        tags(
            (name = "chirp", description = "Chirp social networking API")
        )
    )]
struct ApiDoc;

struct SecurityAddon;

// Defines our bearer-token based authentication requirement for gaining
// access to our API endpoints for OpenAPI.
impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "authorization",
                    "Base64 JSON claim carrying the email and the session token \
                     returned in the Authorization header of a successful login",
                ))),
            )
        }
    }
}

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(user_routes(app_state.clone()))
        .merge(user_session_routes(app_state.clone()))
        .merge(post_routes(app_state.clone()))
        .merge(session_liveness_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn user_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/users", post(user_controller::create))
        .route("/users/password", put(user_controller::update_password))
        .route("/users/:email", get(user_controller::read))
        .with_state(app_state)
}

fn user_session_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/session", post(user_session_controller::login))
        .route("/session", delete(user_session_controller::delete))
        .with_state(app_state)
}

fn post_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/posts", post(post_controller::create))
        .route("/posts", get(post_controller::index))
        .with_state(app_state)
}

// The liveness channel authorizes in-protocol during its handshake, so
// it is wired without the request-header gate.
fn session_liveness_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/session/liveness", get(liveness::handler::liveness))
        .with_state(app_state)
}
