use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::{controller::ApiResponse, params::user::UpdatePasswordParams};
use crate::{AppState, Error};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::{user as UserApi, users};
use service::config::ApiVersion;

use log::*;

/// CREATE a new User (registration, no authorization required)
#[utoipa::path(
    post,
    path = "/users",
    params(
        ApiVersion,
    ),
    request_body = users::Model,
    responses(
        (status = 201, description = "Successfully registered a new User", body = [users::Model]),
        (status = 422, description = "Unprocessable Entity"),
        (status = 405, description = "Method not allowed")
    )
    )]
pub async fn create(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Json(user_model): Json<users::Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("CREATE new User from: {:?}", user_model.email);

    let user: users::Model = UserApi::register(
        app_state.db_conn_ref(),
        app_state.config.min_password_length,
        user_model,
    )
    .await?;

    debug!("Newly registered User {:?}", &user.email);

    Ok(Json(ApiResponse::new(StatusCode::CREATED.into(), user)))
}

/// GET a User's public profile by email
#[utoipa::path(
    get,
    path = "/users/{email}",
    params(
        ApiVersion,
        ("email" = String, Path, description = "Email of the user to browse")
    ),
    responses(
        (status = 200, description = "Successfully retrieved the User", body = [users::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not Found")
    ),
    security(
        ("bearer_token" = [])
    )
)]
pub async fn read(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_email): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let user = UserApi::profile(app_state.db_conn_ref(), &email).await?;
    Ok(Json(ApiResponse::new(StatusCode::OK.into(), user)))
}

/// UPDATE the authenticated User's password
#[utoipa::path(
    put,
    path = "/users/password",
    params(
        ApiVersion,
    ),
    request_body = UpdatePasswordParams,
    responses(
        (status = 204, description = "Successfully updated the password", body = ()),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Unprocessable Entity")
    ),
    security(
        ("bearer_token" = [])
    )
)]
pub async fn update_password(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(email): AuthenticatedUser,
    State(app_state): State<AppState>,
    Json(params): Json<UpdatePasswordParams>,
) -> Result<impl IntoResponse, Error> {
    UserApi::change_password(
        app_state.db_conn_ref(),
        app_state.config.min_password_length,
        &email,
        &params.old_password,
        &params.new_password,
    )
    .await?;

    Ok(Json(ApiResponse::<()>::no_content(
        StatusCode::NO_CONTENT.into(),
    )))
}
