//! Startup-path tests: schema creation, emptiness-gated seeding and the
//! referential-integrity guarantees the store must keep afterwards.

use nav_api_server::config::AuthConfig;
use nav_api_server::database::{catalog, schema, seed, DbPool};

fn test_auth() -> AuthConfig {
    AuthConfig {
        jwt_secret: "test-secret".to_string(),
        token_expiration_seconds: 3600,
        default_admin_username: "admin".to_string(),
        default_admin_password: "admin123".to_string(),
    }
}

/// Same sequence main() runs before binding the listener.
async fn bootstrap(db: &DbPool) {
    schema::ensure_schema(db).await.unwrap();
    if seed::needs_seed(db).await.unwrap() {
        seed::seed(db, &test_auth()).await.unwrap();
    }
}

async fn count(db: &DbPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(db.get_pool())
        .await
        .unwrap()
}

#[tokio::test]
async fn fresh_store_is_fully_populated() {
    let db = DbPool::new_in_memory().await.unwrap();
    bootstrap(&db).await;

    assert_eq!(count(&db, "menus").await, catalog::DEFAULT_MENUS.len() as i64);
    assert_eq!(
        count(&db, "sub_menus").await,
        catalog::DEFAULT_SUB_MENUS.len() as i64
    );
    assert_eq!(count(&db, "cards").await, catalog::DEFAULT_CARDS.len() as i64);
    assert_eq!(count(&db, "users").await, 1);
    assert_eq!(
        count(&db, "friends").await,
        catalog::DEFAULT_FRIENDS.len() as i64
    );
}

#[tokio::test]
async fn bootstrap_twice_produces_no_duplicates() {
    let db = DbPool::new_in_memory().await.unwrap();
    bootstrap(&db).await;
    bootstrap(&db).await;

    assert_eq!(count(&db, "menus").await, catalog::DEFAULT_MENUS.len() as i64);
    assert_eq!(
        count(&db, "sub_menus").await,
        catalog::DEFAULT_SUB_MENUS.len() as i64
    );
    assert_eq!(count(&db, "cards").await, catalog::DEFAULT_CARDS.len() as i64);
    assert_eq!(count(&db, "users").await, 1);
    assert_eq!(
        count(&db, "friends").await,
        catalog::DEFAULT_FRIENDS.len() as i64
    );
}

#[tokio::test]
async fn restored_store_image_is_left_untouched() {
    // A backup-restore hook may populate the file before startup; the
    // schema pass and the emptiness gate must both no-op.
    let db = DbPool::new_in_memory().await.unwrap();
    bootstrap(&db).await;

    sqlx::query("UPDATE menus SET name = 'Renamed' WHERE name = 'Home'")
        .execute(db.get_pool())
        .await
        .unwrap();

    bootstrap(&db).await;

    let renamed: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menus WHERE name = 'Renamed'")
        .fetch_one(db.get_pool())
        .await
        .unwrap();
    assert_eq!(renamed, 1);
    assert_eq!(count(&db, "menus").await, catalog::DEFAULT_MENUS.len() as i64);
}

#[tokio::test]
async fn deleting_a_menu_cascades_to_sub_menus_and_cards() {
    let db = DbPool::new_in_memory().await.unwrap();
    bootstrap(&db).await;

    // "Ai Stuff" owns two sub-menus, one of which owns the DeepSeek card.
    let menu_id: i64 = sqlx::query_scalar("SELECT id FROM menus WHERE name = 'Ai Stuff'")
        .fetch_one(db.get_pool())
        .await
        .unwrap();

    sqlx::query("DELETE FROM menus WHERE id = ?")
        .bind(menu_id)
        .execute(db.get_pool())
        .await
        .unwrap();

    let orphaned_subs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sub_menus WHERE parent_id = ?")
        .bind(menu_id)
        .fetch_one(db.get_pool())
        .await
        .unwrap();
    assert_eq!(orphaned_subs, 0);

    let deepseek: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cards WHERE title = 'DeepSeek'")
        .fetch_one(db.get_pool())
        .await
        .unwrap();
    assert_eq!(deepseek, 0);
}

#[tokio::test]
async fn deleting_a_sub_menu_cascades_to_its_cards() {
    let db = DbPool::new_in_memory().await.unwrap();
    bootstrap(&db).await;

    let sub_id: i64 = sqlx::query_scalar("SELECT id FROM sub_menus WHERE name = 'AI chat'")
        .fetch_one(db.get_pool())
        .await
        .unwrap();

    sqlx::query("DELETE FROM sub_menus WHERE id = ?")
        .bind(sub_id)
        .execute(db.get_pool())
        .await
        .unwrap();

    let cards: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cards WHERE sub_menu_id = ?")
        .bind(sub_id)
        .fetch_one(db.get_pool())
        .await
        .unwrap();
    assert_eq!(cards, 0);

    // Top-level cards are unaffected.
    let home_cards: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM cards c JOIN menus m ON m.id = c.menu_id WHERE m.name = 'Home'",
    )
    .fetch_one(db.get_pool())
    .await
    .unwrap();
    assert_eq!(home_cards, 3);
}

#[tokio::test]
async fn seeded_rows_keep_catalog_display_order() {
    let db = DbPool::new_in_memory().await.unwrap();
    bootstrap(&db).await;

    let names: Vec<String> =
        sqlx::query_scalar(r#"SELECT name FROM menus ORDER BY "order", id"#)
            .fetch_all(db.get_pool())
            .await
            .unwrap();
    assert_eq!(
        names,
        vec!["Home", "Ai Stuff", "Cloud", "Software", "Tools", "Other"]
    );
}
