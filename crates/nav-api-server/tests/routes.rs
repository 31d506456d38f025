//! Repository-level tests for the semantics the route layer depends on.

use nav_api_server::config::AuthConfig;
use nav_api_server::database::{schema, seed, DbPool, NewCard, Repository};
use nav_api_server::security::PasswordService;

fn test_auth() -> AuthConfig {
    AuthConfig {
        jwt_secret: "test-secret".to_string(),
        token_expiration_seconds: 3600,
        default_admin_username: "admin".to_string(),
        default_admin_password: "admin123".to_string(),
    }
}

async fn seeded_repository() -> Repository {
    let db = DbPool::new_in_memory().await.unwrap();
    schema::ensure_schema(&db).await.unwrap();
    seed::seed(&db, &test_auth()).await.unwrap();
    Repository::new(db)
}

fn new_card(menu_id: Option<i64>, sub_menu_id: Option<i64>, title: &str) -> NewCard {
    NewCard {
        menu_id,
        sub_menu_id,
        title: title.to_string(),
        url: "https://example.com".to_string(),
        logo_url: None,
        custom_logo_path: None,
        desc: None,
        order: 0,
    }
}

#[tokio::test]
async fn menu_tree_nests_sub_menus_under_their_parent() {
    let repo = seeded_repository().await;

    let tree = repo.list_menu_tree().await.unwrap();
    let ai_stuff = tree.iter().find(|m| m.name == "Ai Stuff").unwrap();

    let names: Vec<&str> = ai_stuff.sub_menus.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["AI chat", "AI tools"]);

    let home = tree.iter().find(|m| m.name == "Home").unwrap();
    assert!(home.sub_menus.is_empty());
}

#[tokio::test]
async fn top_level_card_listing_excludes_sub_menu_cards() {
    let repo = seeded_repository().await;

    let tree = repo.list_menu_tree().await.unwrap();
    let ai_stuff = tree.iter().find(|m| m.name == "Ai Stuff").unwrap();
    let ai_chat = ai_stuff.sub_menus.iter().find(|s| s.name == "AI chat").unwrap();

    // DeepSeek belongs to the sub-menu, not to the menu's top level.
    let top_level = repo.cards_for_menu(ai_stuff.id).await.unwrap();
    assert!(top_level.is_empty());

    let nested = repo.cards_for_sub_menu(ai_chat.id).await.unwrap();
    assert_eq!(nested.len(), 1);
    assert_eq!(nested[0].title, "DeepSeek");
}

#[tokio::test]
async fn created_card_stores_exactly_one_parent_id() {
    let repo = seeded_repository().await;

    let tree = repo.list_menu_tree().await.unwrap();
    let tools = tree.iter().find(|m| m.name == "Tools").unwrap();
    let dev_tools = tools.sub_menus.iter().find(|s| s.name == "Dev Tools").unwrap();

    let id = repo
        .create_card(&new_card(None, Some(dev_tools.id), "JSON formatter"))
        .await
        .unwrap();

    let cards = repo.cards_for_sub_menu(dev_tools.id).await.unwrap();
    let card = cards.iter().find(|c| c.id == id).unwrap();
    assert_eq!(card.sub_menu_id, Some(dev_tools.id));
    assert_eq!(card.menu_id, None);
}

#[tokio::test]
async fn card_update_and_delete_report_affected_rows() {
    let repo = seeded_repository().await;

    let tree = repo.list_menu_tree().await.unwrap();
    let home = tree.iter().find(|m| m.name == "Home").unwrap();

    let id = repo
        .create_card(&new_card(Some(home.id), None, "Example"))
        .await
        .unwrap();

    let changed = repo
        .update_card(id, &new_card(Some(home.id), None, "Example v2"))
        .await
        .unwrap();
    assert_eq!(changed, 1);

    assert_eq!(repo.delete_card(id).await.unwrap(), 1);
    assert_eq!(repo.delete_card(id).await.unwrap(), 0);
}

#[tokio::test]
async fn login_bookkeeping_is_persisted() {
    let repo = seeded_repository().await;

    let user = repo.find_user_by_username("admin").await.unwrap().unwrap();
    assert!(user.last_login_time.is_none());

    repo.record_login(user.id, "2026-01-01T00:00:00Z", "127.0.0.1")
        .await
        .unwrap();

    let user = repo.find_user_by_username("admin").await.unwrap().unwrap();
    assert_eq!(user.last_login_time.as_deref(), Some("2026-01-01T00:00:00Z"));
    assert_eq!(user.last_login_ip.as_deref(), Some("127.0.0.1"));
}

#[tokio::test]
async fn password_change_replaces_the_hash() {
    let repo = seeded_repository().await;

    let user = repo.find_user_by_username("admin").await.unwrap().unwrap();
    let new_hash = PasswordService::hash("s3cret!").unwrap();
    assert_eq!(repo.update_password(user.id, &new_hash).await.unwrap(), 1);

    let user = repo.find_user_by_username("admin").await.unwrap().unwrap();
    assert!(PasswordService::verify("s3cret!", &user.password).unwrap());
    assert!(!PasswordService::verify("admin123", &user.password).unwrap());
}

#[tokio::test]
async fn friends_and_ads_crud_roundtrip() {
    let repo = seeded_repository().await;

    let friend_id = repo
        .create_friend("Blog", "https://blog.example.com", None)
        .await
        .unwrap();
    assert_eq!(
        repo.update_friend(friend_id, "Blog", "https://blog.example.com", Some("logo.png"))
            .await
            .unwrap(),
        1
    );
    let friends = repo.list_friends().await.unwrap();
    assert!(friends.iter().any(|f| f.id == friend_id && f.logo.as_deref() == Some("logo.png")));
    assert_eq!(repo.delete_friend(friend_id).await.unwrap(), 1);

    let ad_id = repo
        .create_ad("sidebar", "/uploads/banner.png", Some("https://example.com"))
        .await
        .unwrap();
    let ads = repo.list_ads().await.unwrap();
    assert_eq!(ads.len(), 1);
    assert_eq!(ads[0].position, "sidebar");
    assert_eq!(repo.delete_ad(ad_id).await.unwrap(), 1);
}
