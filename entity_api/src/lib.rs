use chrono::Utc;
use log::*;
use sea_orm::DatabaseConnection;

pub use entity::{posts, users, Id};

pub mod error;
pub mod post;
pub mod user;

/// Populates an empty database with a couple of users and wall posts for
/// local development. Duplicate seeds are logged and skipped so the
/// function is safe to run repeatedly.
pub async fn seed_database(db: &DatabaseConnection) {
    let seed_users = [
        ("alice@chirp.dev", "Alice", "Archer", "female", "Oslo", "Norway"),
        ("bob@chirp.dev", "Bob", "Builder", "male", "Malmo", "Sweden"),
    ];

    for (email, first_name, last_name, gender, city, country) in seed_users {
        let now = Utc::now();
        let model = users::Model {
            id: Id::default(),
            email: email.to_owned(),
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            gender: gender.to_owned(),
            city: city.to_owned(),
            country: country.to_owned(),
            password: "password123".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        };

        match user::create(db, model).await {
            Ok(user) => info!("Seeded user {}", user.email),
            Err(e) => warn!("Skipping seed user {email}: {e}"),
        }
    }

    let (Ok(Some(alice)), Ok(Some(bob))) = (
        user::find_by_email(db, "alice@chirp.dev").await,
        user::find_by_email(db, "bob@chirp.dev").await,
    ) else {
        warn!("Seed users not found, skipping seed posts");
        return;
    };

    let now = Utc::now();
    let post_model = posts::Model {
        id: Id::default(),
        author_id: alice.id,
        recipient_id: bob.id,
        content: "Welcome to chirp!".to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    };

    match post::create(db, post_model).await {
        Ok(_) => info!("Seeded welcome post"),
        Err(e) => warn!("Skipping seed post: {e}"),
    }
}
