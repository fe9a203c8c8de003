use crate::extractors::{
    authenticated_user::AuthenticatedUser, compare_api_version::CompareApiVersion,
};
use crate::params::post::{CreateParams, WallParams};
use crate::{controller::ApiResponse, AppState, Error};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::{post as PostApi, posts};
use service::config::ApiVersion;

use log::*;

/// CREATE a new Post on a user's wall
#[utoipa::path(
    post,
    path = "/posts",
    params(
        ApiVersion,
    ),
    request_body = CreateParams,
    responses(
        (status = 201, description = "Successfully created a new Post", body = [posts::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Recipient not found"),
        (status = 422, description = "Unprocessable Entity")
    ),
    security(
        ("bearer_token" = [])
    )
)]
pub async fn create(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(author_email): AuthenticatedUser,
    State(app_state): State<AppState>,
    Json(params): Json<CreateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!(
        "CREATE new Post on wall of {:?} by {:?}",
        params.recipient, author_email
    );

    let post = PostApi::create(
        app_state.db_conn_ref(),
        &author_email,
        &params.recipient,
        &params.content,
    )
    .await?;

    Ok(Json(ApiResponse::new(StatusCode::CREATED.into(), post)))
}

/// GET all Posts on a user's wall, newest first
#[utoipa::path(
    get,
    path = "/posts",
    params(
        ApiVersion,
        WallParams
    ),
    responses(
        (status = 200, description = "Successfully retrieved the wall's Posts", body = [posts::Model]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Wall owner not found")
    ),
    security(
        ("bearer_token" = [])
    )
)]
pub async fn index(
    CompareApiVersion(_v): CompareApiVersion,
    AuthenticatedUser(_email): AuthenticatedUser,
    State(app_state): State<AppState>,
    Query(params): Query<WallParams>,
) -> Result<impl IntoResponse, Error> {
    let posts = PostApi::find_by_wall(app_state.db_conn_ref(), &params.recipient).await?;
    Ok(Json(ApiResponse::new(StatusCode::OK.into(), posts)))
}
