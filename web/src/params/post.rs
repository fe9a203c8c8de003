use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateParams {
    /// Email of the user on whose wall the post is written.
    pub recipient: String,
    pub content: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct WallParams {
    /// Email of the user whose wall to list.
    pub recipient: String,
}
