use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create the platform's schema
        manager
            .get_connection()
            .execute_unprepared("CREATE SCHEMA IF NOT EXISTS chirp;")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("SET search_path TO chirp, public;")
            .await?;

        // gen_random_uuid() is built in from Postgres 13; the extension
        // covers older servers.
        manager
            .get_connection()
            .execute_unprepared("CREATE EXTENSION IF NOT EXISTS pgcrypto;")
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE IF NOT EXISTS chirp.users (
                    id uuid PRIMARY KEY DEFAULT gen_random_uuid(),
                    email varchar(255) NOT NULL UNIQUE,
                    first_name varchar(255) NOT NULL,
                    last_name varchar(255) NOT NULL,
                    gender varchar(255) NOT NULL,
                    city varchar(255) NOT NULL,
                    country varchar(255) NOT NULL,
                    password varchar(255) NOT NULL,
                    created_at timestamptz NOT NULL DEFAULT now(),
                    updated_at timestamptz NOT NULL DEFAULT now()
                );
            "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE IF NOT EXISTS chirp.posts (
                    id uuid PRIMARY KEY DEFAULT gen_random_uuid(),
                    author_id uuid NOT NULL REFERENCES chirp.users(id) ON DELETE CASCADE,
                    recipient_id uuid NOT NULL REFERENCES chirp.users(id) ON DELETE CASCADE,
                    content text NOT NULL,
                    created_at timestamptz NOT NULL DEFAULT now(),
                    updated_at timestamptz NOT NULL DEFAULT now()
                );

                CREATE INDEX IF NOT EXISTS posts_recipient_created_at_idx
                    ON chirp.posts (recipient_id, created_at DESC);
            "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP SCHEMA IF EXISTS chirp CASCADE;")
            .await?;

        Ok(())
    }
}
