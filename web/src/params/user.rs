use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePasswordParams {
    pub old_password: String,
    pub new_password: String,
}
