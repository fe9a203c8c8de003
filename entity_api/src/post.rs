use super::error::Error;
use chrono::Utc;

use entity::posts::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};

pub async fn create(db: &impl ConnectionTrait, post_model: Model) -> Result<Model, Error> {
    debug!(
        "New Post Model to be inserted on wall {}",
        post_model.recipient_id
    );

    let now = Utc::now();
    let post_active_model: ActiveModel = ActiveModel {
        author_id: Set(post_model.author_id),
        recipient_id: Set(post_model.recipient_id),
        content: Set(post_model.content),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(post_active_model.insert(db).await?)
}

/// All posts on a user's wall, newest first.
pub async fn find_by_recipient(
    db: &impl ConnectionTrait,
    recipient_id: Id,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::RecipientId.eq(recipient_id))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await?)
}
