use password_auth::generate_hash;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INITIAL_EMAIL: &str = "admin@chirp.dev";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Hash at migration time so no plain-text password lands in SQL history.
        let password_hash = generate_hash("password123");

        manager
            .get_connection()
            .execute_unprepared(&format!(
                r#"
                INSERT INTO chirp.users
                    (email, first_name, last_name, gender, city, country, password)
                VALUES
                    ('{INITIAL_EMAIL}', 'Admin', 'Chirp', 'other', 'Linkoping', 'Sweden', '{password_hash}')
                ON CONFLICT (email) DO NOTHING;
            "#
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(&format!(
                "DELETE FROM chirp.users WHERE email = '{INITIAL_EMAIL}';"
            ))
            .await?;

        Ok(())
    }
}
