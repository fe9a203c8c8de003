use crate::error::Error;
use crate::users;
use email_address::EmailAddress;
use log::*;
use sea_orm::DatabaseConnection;
use std::str::FromStr;

pub use entity_api::user::{find_by_email, find_by_id, generate_hash, verify_password, Credentials};

/// Registers a new user. Validates the email shape and the password
/// length before anything touches the database; a duplicate email is
/// reported the same way as any other invalid input.
pub async fn register(
    db: &DatabaseConnection,
    min_password_length: usize,
    user_model: users::Model,
) -> Result<users::Model, Error> {
    if EmailAddress::from_str(&user_model.email).is_err() {
        return Err(Error::invalid("email address is not valid"));
    }
    if user_model.password.len() < min_password_length {
        return Err(Error::invalid("password is too short"));
    }
    if find_by_email(db, &user_model.email).await?.is_some() {
        return Err(Error::invalid("email address is already registered"));
    }

    let user = entity_api::user::create(db, user_model).await?;
    info!("Registered user {}", user.email);
    Ok(user)
}

/// Resolves credentials to the matching user record. Unknown emails and
/// wrong passwords are indistinguishable to the caller.
pub async fn authenticate(
    db: &DatabaseConnection,
    creds: Credentials,
) -> Result<users::Model, Error> {
    let user = match find_by_email(db, &creds.email).await? {
        Some(user) => user,
        None => {
            debug!("authentication failed: unknown email {}", creds.email);
            return Err(Error::unauthenticated());
        }
    };

    verify_password(&creds.password, &user.password).await?;
    Ok(user)
}

/// Looks up a user's profile by email.
pub async fn profile(db: &DatabaseConnection, email: &str) -> Result<users::Model, Error> {
    match find_by_email(db, email).await? {
        Some(user) => Ok(user),
        None => Err(Error::not_found()),
    }
}

/// Changes a user's password after verifying the old one.
pub async fn change_password(
    db: &DatabaseConnection,
    min_password_length: usize,
    email: &str,
    old_password: &str,
    new_password: &str,
) -> Result<(), Error> {
    if new_password.len() < min_password_length {
        return Err(Error::invalid("new password is too short"));
    }

    let user = profile(db, email).await?;
    verify_password(old_password, &user.password).await?;
    entity_api::user::update_password(db, user, new_password.to_owned()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainErrorKind, EntityErrorKind, InternalErrorKind};
    use chrono::Utc;
    use entity_api::Id;

    fn user_model(email: &str, password: &str) -> users::Model {
        let now = Utc::now();
        users::Model {
            id: Id::default(),
            email: email.to_owned(),
            first_name: "Test".to_owned(),
            last_name: "User".to_owned(),
            gender: "other".to_owned(),
            city: "Linkoping".to_owned(),
            country: "Sweden".to_owned(),
            password: password.to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn assert_invalid(err: Error) {
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::Invalid))
        );
    }

    // Validation runs before any query, so a disconnected handle is fine.
    #[tokio::test]
    async fn register_rejects_a_malformed_email() {
        let db = DatabaseConnection::default();
        let err = register(&db, 8, user_model("not-an-email", "password123"))
            .await
            .unwrap_err();
        assert_invalid(err);
    }

    #[tokio::test]
    async fn register_rejects_a_short_password() {
        let db = DatabaseConnection::default();
        let err = register(&db, 8, user_model("a@x.com", "short"))
            .await
            .unwrap_err();
        assert_invalid(err);
    }

    #[tokio::test]
    async fn change_password_rejects_a_short_replacement() {
        let db = DatabaseConnection::default();
        let err = change_password(&db, 8, "a@x.com", "old-password", "tiny")
            .await
            .unwrap_err();
        assert_invalid(err);
    }

    #[cfg(feature = "mock")]
    mod mock_tests {
        use super::*;
        use sea_orm::{DatabaseBackend, MockDatabase};

        fn stored_user(email: &str, password: &str) -> users::Model {
            let mut user = user_model(email, password);
            user.password = generate_hash(password.to_owned());
            user
        }

        #[tokio::test]
        async fn authenticate_accepts_matching_credentials() {
            let db = MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[stored_user("a@x.com", "password123")]])
                .into_connection();

            let creds = Credentials {
                email: "a@x.com".to_owned(),
                password: "password123".to_owned(),
            };
            let user = authenticate(&db, creds).await.unwrap();
            assert_eq!(user.email, "a@x.com");
        }

        #[tokio::test]
        async fn authenticate_rejects_a_wrong_password() {
            let db = MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[stored_user("a@x.com", "password123")]])
                .into_connection();

            let creds = Credentials {
                email: "a@x.com".to_owned(),
                password: "wrong-password".to_owned(),
            };
            let err = authenticate(&db, creds).await.unwrap_err();
            assert_eq!(
                err.error_kind,
                DomainErrorKind::Internal(InternalErrorKind::Entity(
                    EntityErrorKind::Unauthenticated
                ))
            );
        }

        #[tokio::test]
        async fn authenticate_rejects_an_unknown_email() {
            let db = MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<users::Model>::new()])
                .into_connection();

            let creds = Credentials {
                email: "nobody@x.com".to_owned(),
                password: "password123".to_owned(),
            };
            let err = authenticate(&db, creds).await.unwrap_err();
            assert_eq!(
                err.error_kind,
                DomainErrorKind::Internal(InternalErrorKind::Entity(
                    EntityErrorKind::Unauthenticated
                ))
            );
        }
    }
}
