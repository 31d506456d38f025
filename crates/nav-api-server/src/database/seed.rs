//! One-time population of default content into an empty store.
//!
//! Inserts run in three strictly ordered tiers: menus, then sub-menus
//! (parent ids resolved against the menus just inserted), then cards. A tier
//! never starts before the previous tier's rows are committed and their
//! generated ids captured. Within a tier, rows go in catalog order and a
//! failed row is logged and skipped without aborting its siblings.

use super::catalog::{self, CardSeed, CardTarget, FriendSeed, MenuSeed, SubMenuSeed};
use super::DbPool;
use crate::config::AuthConfig;
use crate::security::PasswordService;
use anyhow::Result;
use std::collections::HashMap;
use tracing::{info, warn};

/// What a seeding pass actually did.
#[derive(Debug, Default)]
pub struct SeedReport {
    pub menus: usize,
    pub sub_menus: usize,
    pub cards: usize,
    pub users: usize,
    pub friends: usize,
    pub warnings: Vec<String>,
}

/// The menus table is the anchor: every sub-menu and top-level card hangs off
/// it, so "menus empty" is the canonical signal for a virgin database. A
/// store manually emptied of only sub_menus is deliberately NOT auto-repaired
/// (re-seeding into a partially populated store risks duplicate rows).
pub async fn needs_seed(db: &DbPool) -> Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menus")
        .fetch_one(db.get_pool())
        .await?;
    Ok(count == 0)
}

/// Populate default content. Call only when [`needs_seed`] is true; the
/// admin user and friend links carry their own independent emptiness gates
/// so an operator can reset content without resetting credentials.
pub async fn seed(db: &DbPool, auth: &AuthConfig) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    let menu_ids = seed_menus(db, catalog::DEFAULT_MENUS, &mut report).await;
    let sub_menu_ids =
        seed_sub_menus(db, catalog::DEFAULT_SUB_MENUS, &menu_ids, &mut report).await;
    seed_cards(db, catalog::DEFAULT_CARDS, &menu_ids, &sub_menu_ids, &mut report).await;

    seed_admin_user(db, auth, &mut report).await?;
    seed_friends(db, catalog::DEFAULT_FRIENDS, &mut report).await;

    info!(
        menus = report.menus,
        sub_menus = report.sub_menus,
        cards = report.cards,
        users = report.users,
        friends = report.friends,
        warnings = report.warnings.len(),
        "Default content seeded"
    );
    Ok(report)
}

/// Tier 1. Returns the name → generated id map the later tiers resolve
/// against. The map lives only for the duration of the seeding pass.
async fn seed_menus(
    db: &DbPool,
    menus: &[MenuSeed],
    report: &mut SeedReport,
) -> HashMap<&'static str, i64> {
    let mut ids = HashMap::new();

    for menu in menus {
        let result = sqlx::query(r#"INSERT INTO menus (name, "order") VALUES (?, ?)"#)
            .bind(menu.name)
            .bind(menu.order)
            .execute(db.get_pool())
            .await;

        match result {
            Ok(done) => {
                ids.insert(menu.name, done.last_insert_rowid());
                report.menus += 1;
            }
            Err(e) => {
                let msg = format!(
                    "INSERT INTO menus (name, \"order\") VALUES ({:?}, {}): {}",
                    menu.name, menu.order, e
                );
                warn!("Seed menu failed: {}", msg);
                report.warnings.push(msg);
            }
        }
    }

    ids
}

/// Tier 2. Parent ids come from the tier-1 map, never from a placeholder; a
/// sub-menu whose parent name is absent is skipped with a warning. The
/// returned map is keyed by (parent name, name) so identically named
/// sub-menus under different parents stay distinct.
async fn seed_sub_menus(
    db: &DbPool,
    sub_menus: &[SubMenuSeed],
    menu_ids: &HashMap<&'static str, i64>,
    report: &mut SeedReport,
) -> Vec<((&'static str, &'static str), i64)> {
    let mut ids = Vec::new();

    for sub in sub_menus {
        let Some(&parent_id) = menu_ids.get(sub.parent) else {
            let msg = format!(
                "sub-menu '{}' skipped: parent menu '{}' was not inserted",
                sub.name, sub.parent
            );
            warn!("Catalog consistency: {}", msg);
            report.warnings.push(msg);
            continue;
        };

        let result =
            sqlx::query(r#"INSERT INTO sub_menus (parent_id, name, "order") VALUES (?, ?, ?)"#)
                .bind(parent_id)
                .bind(sub.name)
                .bind(sub.order)
                .execute(db.get_pool())
                .await;

        match result {
            Ok(done) => {
                ids.push(((sub.parent, sub.name), done.last_insert_rowid()));
                report.sub_menus += 1;
            }
            Err(e) => {
                let msg = format!(
                    "INSERT INTO sub_menus (parent_id, name, \"order\") VALUES ({}, {:?}, {}): {}",
                    parent_id, sub.name, sub.order, e
                );
                warn!("Seed sub-menu failed: {}", msg);
                report.warnings.push(msg);
            }
        }
    }

    ids
}

/// Tier 3. Exactly one of menu_id / sub_menu_id is stored per card. A card
/// whose target cannot be resolved is skipped with a warning, never inserted
/// with a dangling parent.
async fn seed_cards(
    db: &DbPool,
    cards: &[CardSeed],
    menu_ids: &HashMap<&'static str, i64>,
    sub_menu_ids: &[((&'static str, &'static str), i64)],
    report: &mut SeedReport,
) {
    for card in cards {
        let (menu_id, sub_menu_id) = match card.target {
            CardTarget::Menu(name) => match menu_ids.get(name) {
                Some(&id) => (Some(id), None),
                None => {
                    let msg = format!(
                        "card '{}' skipped: menu '{}' was not inserted",
                        card.title, name
                    );
                    warn!("Catalog consistency: {}", msg);
                    report.warnings.push(msg);
                    continue;
                }
            },
            CardTarget::SubMenu(name) => {
                // Leaf-name lookup against the composite keys; catalog order
                // decides if two parents share a sub-menu name.
                match sub_menu_ids.iter().find(|((_, n), _)| *n == name) {
                    Some(&(_, id)) => (None, Some(id)),
                    None => {
                        let msg = format!(
                            "card '{}' skipped: sub-menu '{}' was not inserted",
                            card.title, name
                        );
                        warn!("Catalog consistency: {}", msg);
                        report.warnings.push(msg);
                        continue;
                    }
                }
            }
        };

        let result = sqlx::query(
            r#"INSERT INTO cards (menu_id, sub_menu_id, title, url, logo_url, "desc", "order")
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(menu_id)
        .bind(sub_menu_id)
        .bind(card.title)
        .bind(card.url)
        .bind(card.logo_url)
        .bind(card.desc)
        .bind(card.order)
        .execute(db.get_pool())
        .await;

        match result {
            Ok(_) => report.cards += 1,
            Err(e) => {
                let msg = format!(
                    "INSERT INTO cards (menu_id, sub_menu_id, title, ...) VALUES ({:?}, {:?}, {:?}, ...): {}",
                    menu_id, sub_menu_id, card.title, e
                );
                warn!("Seed card failed: {}", msg);
                report.warnings.push(msg);
            }
        }
    }
}

/// Independent gate: only seeds when the users table itself is empty, so
/// wiping content does not reset credentials. The plaintext default is
/// hashed here and never stored.
async fn seed_admin_user(db: &DbPool, auth: &AuthConfig, report: &mut SeedReport) -> Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(db.get_pool())
        .await?;
    if count > 0 {
        return Ok(());
    }

    let hash = PasswordService::hash(&auth.default_admin_password)
        .map_err(|e| anyhow::anyhow!("hashing default admin password: {}", e))?;

    let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
        .bind(&auth.default_admin_username)
        .bind(&hash)
        .execute(db.get_pool())
        .await;

    match result {
        Ok(_) => {
            info!("Created default admin user '{}'", auth.default_admin_username);
            report.users += 1;
        }
        Err(e) => {
            let msg = format!(
                "INSERT INTO users (username, password) VALUES ({:?}, <hash>): {}",
                auth.default_admin_username, e
            );
            warn!("Seed admin failed: {}", msg);
            report.warnings.push(msg);
        }
    }
    Ok(())
}

/// Independent gate, same reasoning as the admin user.
async fn seed_friends(db: &DbPool, friends: &[FriendSeed], report: &mut SeedReport) {
    let count: i64 = match sqlx::query_scalar("SELECT COUNT(*) FROM friends")
        .fetch_one(db.get_pool())
        .await
    {
        Ok(c) => c,
        Err(e) => {
            let msg = format!("SELECT COUNT(*) FROM friends: {}", e);
            warn!("Seed friends gate failed: {}", msg);
            report.warnings.push(msg);
            return;
        }
    };
    if count > 0 {
        return;
    }

    for friend in friends {
        let result = sqlx::query("INSERT INTO friends (title, url, logo) VALUES (?, ?, ?)")
            .bind(friend.title)
            .bind(friend.url)
            .bind(friend.logo)
            .execute(db.get_pool())
            .await;

        match result {
            Ok(_) => report.friends += 1,
            Err(e) => {
                let msg = format!(
                    "INSERT INTO friends (title, url, logo) VALUES ({:?}, {:?}, {:?}): {}",
                    friend.title, friend.url, friend.logo, e
                );
                warn!("Seed friend failed: {}", msg);
                report.warnings.push(msg);
            }
        }
    }
}
