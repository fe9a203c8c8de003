use crate::error::Error;
use crate::{posts, user};
use log::*;
use sea_orm::DatabaseConnection;

/// Writes a post on `recipient_email`'s wall. The author email comes
/// from the authorization gate, so a missing author record means the
/// account was removed after login; both lookups report not-found.
pub async fn create(
    db: &DatabaseConnection,
    author_email: &str,
    recipient_email: &str,
    content: &str,
) -> Result<posts::Model, Error> {
    if content.trim().is_empty() {
        return Err(Error::invalid("post content must not be empty"));
    }

    let author = user::profile(db, author_email).await?;
    let recipient = user::profile(db, recipient_email).await?;

    let now = chrono::Utc::now();
    let post_model = posts::Model {
        id: crate::Id::default(),
        author_id: author.id,
        recipient_id: recipient.id,
        content: content.to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    };

    let post = entity_api::post::create(db, post_model).await?;
    debug!("created post {} on wall of {}", post.id, recipient_email);
    Ok(post)
}

/// All posts on `recipient_email`'s wall, newest first.
pub async fn find_by_wall(
    db: &DatabaseConnection,
    recipient_email: &str,
) -> Result<Vec<posts::Model>, Error> {
    let recipient = user::profile(db, recipient_email).await?;
    Ok(entity_api::post::find_by_recipient(db, recipient.id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainErrorKind, EntityErrorKind, InternalErrorKind};

    #[tokio::test]
    async fn create_rejects_empty_content() {
        let db = DatabaseConnection::default();
        let err = create(&db, "a@x.com", "b@x.com", "   ")
            .await
            .unwrap_err();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::Invalid))
        );
    }
}
