//! Table DDL for every entity, and database bootstrap.

use crate::error::{AppError, ConfigError};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

/// `CREATE TABLE IF NOT EXISTS` per entity, parents before children.
const TABLES: &[(&str, &str)] = &[
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS "users" (
            id UUID PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            nick_name TEXT NOT NULL,
            pwd TEXT NOT NULL,
            phone TEXT,
            create_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            update_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            delete_at TIMESTAMPTZ
        )
        "#,
    ),
    (
        "board",
        r#"
        CREATE TABLE IF NOT EXISTS "board" (
            id UUID PRIMARY KEY,
            title TEXT NOT NULL,
            contents TEXT NOT NULL,
            user_id UUID NOT NULL REFERENCES "users"(id) ON DELETE CASCADE,
            create_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            update_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            delete_at TIMESTAMPTZ
        )
        "#,
    ),
    (
        "novel_category",
        r#"
        CREATE TABLE IF NOT EXISTS "novel_category" (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            create_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            update_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            delete_at TIMESTAMPTZ
        )
        "#,
    ),
    (
        "novel_index",
        r#"
        CREATE TABLE IF NOT EXISTS "novel_index" (
            id UUID PRIMARY KEY,
            title TEXT NOT NULL,
            contents TEXT NOT NULL,
            episode INTEGER NOT NULL,
            user_id UUID REFERENCES "users"(id) ON DELETE SET NULL,
            create_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            update_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            delete_at TIMESTAMPTZ
        )
        "#,
    ),
    (
        "novel_index_review",
        r#"
        CREATE TABLE IF NOT EXISTS "novel_index_review" (
            id UUID PRIMARY KEY,
            contents TEXT NOT NULL,
            rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
            user_id UUID NOT NULL REFERENCES "users"(id) ON DELETE CASCADE,
            novel_index_id UUID NOT NULL REFERENCES "novel_index"(id) ON DELETE CASCADE,
            create_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            update_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            delete_at TIMESTAMPTZ
        )
        "#,
    ),
    (
        "bookmark",
        r#"
        CREATE TABLE IF NOT EXISTS "bookmark" (
            id UUID PRIMARY KEY,
            page INTEGER NOT NULL,
            is_boolean BOOLEAN NOT NULL DEFAULT TRUE,
            user_id UUID NOT NULL REFERENCES "users"(id) ON DELETE CASCADE,
            novel_index_id UUID NOT NULL REFERENCES "novel_index"(id) ON DELETE CASCADE,
            create_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            update_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            delete_at TIMESTAMPTZ
        )
        "#,
    ),
    (
        "event",
        r#"
        CREATE TABLE IF NOT EXISTS "event" (
            id UUID PRIMARY KEY,
            title TEXT NOT NULL,
            contents TEXT NOT NULL,
            is_event BOOLEAN NOT NULL DEFAULT TRUE,
            start_at TIMESTAMPTZ NOT NULL,
            end_at TIMESTAMPTZ NOT NULL,
            user_id UUID REFERENCES "users"(id) ON DELETE SET NULL,
            create_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            update_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "file",
        r#"
        CREATE TABLE IF NOT EXISTS "file" (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            path TEXT NOT NULL,
            url TEXT NOT NULL,
            create_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            delete_at TIMESTAMPTZ
        )
        "#,
    ),
    (
        "report",
        r#"
        CREATE TABLE IF NOT EXISTS "report" (
            id UUID PRIMARY KEY,
            contents TEXT NOT NULL,
            target_id UUID NOT NULL,
            user_id UUID REFERENCES "users"(id) ON DELETE SET NULL,
            create_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            update_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            delete_at TIMESTAMPTZ
        )
        "#,
    ),
    (
        "auth_email",
        r#"
        CREATE TABLE IF NOT EXISTS "auth_email" (
            id UUID PRIMARY KEY,
            email TEXT NOT NULL,
            token TEXT NOT NULL,
            is_auth BOOLEAN NOT NULL DEFAULT FALSE,
            user_id UUID REFERENCES "users"(id) ON DELETE CASCADE,
            create_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            update_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "auth_phone",
        r#"
        CREATE TABLE IF NOT EXISTS "auth_phone" (
            id UUID PRIMARY KEY,
            phone TEXT NOT NULL,
            token TEXT NOT NULL,
            is_auth BOOLEAN NOT NULL DEFAULT FALSE,
            user_id UUID REFERENCES "users"(id) ON DELETE CASCADE,
            create_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            update_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "payment",
        r#"
        CREATE TABLE IF NOT EXISTS "payment" (
            id UUID PRIMARY KEY,
            imp_uid TEXT NOT NULL,
            amount BIGINT NOT NULL,
            status TEXT NOT NULL,
            user_id UUID NOT NULL REFERENCES "users"(id) ON DELETE CASCADE,
            create_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
];

/// Create every entity table that does not exist yet. Safe to run on each start.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for (name, ddl) in TABLES {
        tracing::debug!(table = %name, "ensure table");
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

/// Connect to the server's `postgres` database and create the database named in `database_url`
/// when it is missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url).map_err(|e| ConfigError::Invalid {
        var: "DATABASE_URL",
        message: e.to_string(),
    })?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), ConfigError> {
    let path_start = url.rfind('/').ok_or(ConfigError::Invalid {
        var: "DATABASE_URL",
        message: "no database path".into(),
    })? + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::*;
    use crate::store::Entity;

    #[test]
    fn parses_database_name_and_admin_url() {
        let (admin, db) = parse_db_name_from_url("postgres://u:p@localhost:5432/content?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(db, "content");
    }

    #[test]
    fn rejects_url_without_path() {
        assert!(parse_db_name_from_url("localhost").is_err());
    }

    #[test]
    fn quotes_identifier() {
        assert_eq!(quote_ident("my\"db"), "\"my\"\"db\"");
    }

    fn assert_ddl_covers<E: Entity>() {
        let (_, ddl) = TABLES
            .iter()
            .find(|(name, _)| *name == E::TABLE.name)
            .unwrap_or_else(|| panic!("no DDL for {}", E::TABLE.name));
        for column in E::TABLE.columns {
            assert!(ddl.contains(&format!("\n            {} ", column)), "{}.{}", E::TABLE.name, column);
        }
    }

    #[test]
    fn ddl_declares_every_mapped_column() {
        assert_ddl_covers::<User>();
        assert_ddl_covers::<Board>();
        assert_ddl_covers::<NovelCategory>();
        assert_ddl_covers::<NovelIndex>();
        assert_ddl_covers::<NovelIndexReview>();
        assert_ddl_covers::<Bookmark>();
        assert_ddl_covers::<Event>();
        assert_ddl_covers::<FileEntity>();
        assert_ddl_covers::<Report>();
        assert_ddl_covers::<AuthEmail>();
        assert_ddl_covers::<AuthPhone>();
        assert_ddl_covers::<Payment>();
    }

    #[test]
    fn unique_columns_are_declared() {
        let ddl = |table: &str| TABLES.iter().find(|(t, _)| *t == table).map(|(_, d)| *d).unwrap();
        assert!(ddl("users").contains("email TEXT NOT NULL UNIQUE"));
        assert!(ddl("novel_category").contains("name TEXT NOT NULL UNIQUE"));
    }
}
