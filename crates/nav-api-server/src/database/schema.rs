//! Schema creation. Every statement is `IF NOT EXISTS` so the whole pass is
//! safe to run on every process start, including against a store image
//! restored from backup.

use super::DbPool;
use anyhow::Result;
use tracing::debug;

/// Create all tables and their supporting indexes if absent. A failure here
/// is fatal to startup: the process must not serve traffic against a store
/// with unknown schema state.
pub async fn ensure_schema(db: &DbPool) -> Result<()> {
    let pool = db.get_pool();

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS menus (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            "order" INTEGER DEFAULT 0
        )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS sub_menus (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            parent_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            "order" INTEGER DEFAULT 0,
            FOREIGN KEY(parent_id) REFERENCES menus(id) ON DELETE CASCADE
        )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS cards (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            menu_id INTEGER,
            sub_menu_id INTEGER,
            title TEXT NOT NULL,
            url TEXT NOT NULL,
            logo_url TEXT,
            custom_logo_path TEXT,
            "desc" TEXT,
            "order" INTEGER DEFAULT 0,
            FOREIGN KEY(menu_id) REFERENCES menus(id) ON DELETE CASCADE,
            FOREIGN KEY(sub_menu_id) REFERENCES sub_menus(id) ON DELETE CASCADE
        )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT UNIQUE NOT NULL,
            password TEXT NOT NULL,
            last_login_time TEXT,
            last_login_ip TEXT
        )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS friends (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            url TEXT NOT NULL,
            logo TEXT
        )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS ads (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            position TEXT NOT NULL,
            img TEXT NOT NULL,
            url TEXT
        )"#,
    )
    .execute(pool)
    .await?;

    // Indices
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sub_menus_parent ON sub_menus(parent_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_cards_menu ON cards(menu_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_cards_sub_menu ON cards(sub_menu_id)")
        .execute(pool)
        .await?;

    debug!("Schema ensured");
    Ok(())
}
