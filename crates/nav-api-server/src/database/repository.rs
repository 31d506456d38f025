use super::models::{Ad, Card, Friend, Menu, MenuTree, NewCard, SubMenu, User};
use super::DbPool;
use anyhow::Result;
use tracing::debug;

pub struct Repository {
    pub pool: DbPool,
}

impl Repository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    // ============ MENUS ============

    /// Menus with their sub-menus, both in display order.
    pub async fn list_menu_tree(&self) -> Result<Vec<MenuTree>> {
        let menus = sqlx::query_as::<_, Menu>(
            r#"SELECT id, name, "order" FROM menus ORDER BY "order", id"#,
        )
        .fetch_all(self.pool.get_pool())
        .await?;

        let sub_menus = sqlx::query_as::<_, SubMenu>(
            r#"SELECT id, parent_id, name, "order" FROM sub_menus ORDER BY "order", id"#,
        )
        .fetch_all(self.pool.get_pool())
        .await?;

        let tree = menus
            .into_iter()
            .map(|menu| {
                let children = sub_menus
                    .iter()
                    .filter(|s| s.parent_id == menu.id)
                    .cloned()
                    .collect();
                MenuTree {
                    id: menu.id,
                    name: menu.name,
                    order: menu.order,
                    sub_menus: children,
                }
            })
            .collect();

        Ok(tree)
    }

    pub async fn create_menu(&self, name: &str, order: i64) -> Result<i64> {
        let result = sqlx::query(r#"INSERT INTO menus (name, "order") VALUES (?, ?)"#)
            .bind(name)
            .bind(order)
            .execute(self.pool.get_pool())
            .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn update_menu(&self, id: i64, name: &str, order: i64) -> Result<u64> {
        let result = sqlx::query(r#"UPDATE menus SET name = ?, "order" = ? WHERE id = ?"#)
            .bind(name)
            .bind(order)
            .bind(id)
            .execute(self.pool.get_pool())
            .await?;
        Ok(result.rows_affected())
    }

    /// Cascades to the menu's sub-menus and cards.
    pub async fn delete_menu(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM menus WHERE id = ?")
            .bind(id)
            .execute(self.pool.get_pool())
            .await?;
        debug!("Deleted menu {} ({} row)", id, result.rows_affected());
        Ok(result.rows_affected())
    }

    // ============ SUB-MENUS ============

    pub async fn menu_exists(&self, id: i64) -> Result<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM menus WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool.get_pool())
            .await?;
        Ok(found.is_some())
    }

    pub async fn sub_menu_exists(&self, id: i64) -> Result<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM sub_menus WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool.get_pool())
            .await?;
        Ok(found.is_some())
    }

    pub async fn create_sub_menu(&self, parent_id: i64, name: &str, order: i64) -> Result<i64> {
        let result =
            sqlx::query(r#"INSERT INTO sub_menus (parent_id, name, "order") VALUES (?, ?, ?)"#)
                .bind(parent_id)
                .bind(name)
                .bind(order)
                .execute(self.pool.get_pool())
                .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn update_sub_menu(&self, id: i64, name: &str, order: i64) -> Result<u64> {
        let result = sqlx::query(r#"UPDATE sub_menus SET name = ?, "order" = ? WHERE id = ?"#)
            .bind(name)
            .bind(order)
            .bind(id)
            .execute(self.pool.get_pool())
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_sub_menu(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sub_menus WHERE id = ?")
            .bind(id)
            .execute(self.pool.get_pool())
            .await?;
        Ok(result.rows_affected())
    }

    // ============ CARDS ============

    /// Top-level cards of a menu (cards owned by a sub-menu are excluded).
    pub async fn cards_for_menu(&self, menu_id: i64) -> Result<Vec<Card>> {
        let cards = sqlx::query_as::<_, Card>(
            r#"SELECT id, menu_id, sub_menu_id, title, url, logo_url, custom_logo_path, "desc", "order"
               FROM cards WHERE menu_id = ? AND sub_menu_id IS NULL ORDER BY "order", id"#,
        )
        .bind(menu_id)
        .fetch_all(self.pool.get_pool())
        .await?;
        Ok(cards)
    }

    pub async fn cards_for_sub_menu(&self, sub_menu_id: i64) -> Result<Vec<Card>> {
        let cards = sqlx::query_as::<_, Card>(
            r#"SELECT id, menu_id, sub_menu_id, title, url, logo_url, custom_logo_path, "desc", "order"
               FROM cards WHERE sub_menu_id = ? ORDER BY "order", id"#,
        )
        .bind(sub_menu_id)
        .fetch_all(self.pool.get_pool())
        .await?;
        Ok(cards)
    }

    /// Exactly one of menu_id / sub_menu_id must be set; the handler
    /// validates that before calling.
    pub async fn create_card(&self, card: &NewCard) -> Result<i64> {
        let result = sqlx::query(
            r#"INSERT INTO cards
               (menu_id, sub_menu_id, title, url, logo_url, custom_logo_path, "desc", "order")
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(card.menu_id)
        .bind(card.sub_menu_id)
        .bind(&card.title)
        .bind(&card.url)
        .bind(&card.logo_url)
        .bind(&card.custom_logo_path)
        .bind(&card.desc)
        .bind(card.order)
        .execute(self.pool.get_pool())
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn update_card(&self, id: i64, card: &NewCard) -> Result<u64> {
        let result = sqlx::query(
            r#"UPDATE cards SET
                menu_id = ?,
                sub_menu_id = ?,
                title = ?,
                url = ?,
                logo_url = ?,
                custom_logo_path = ?,
                "desc" = ?,
                "order" = ?
               WHERE id = ?"#,
        )
        .bind(card.menu_id)
        .bind(card.sub_menu_id)
        .bind(&card.title)
        .bind(&card.url)
        .bind(&card.logo_url)
        .bind(&card.custom_logo_path)
        .bind(&card.desc)
        .bind(card.order)
        .bind(id)
        .execute(self.pool.get_pool())
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_card(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM cards WHERE id = ?")
            .bind(id)
            .execute(self.pool.get_pool())
            .await?;
        Ok(result.rows_affected())
    }

    // ============ USERS ============

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password, last_login_time, last_login_ip FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(self.pool.get_pool())
        .await?;
        Ok(user)
    }

    pub async fn record_login(&self, id: i64, time: &str, ip: &str) -> Result<()> {
        sqlx::query("UPDATE users SET last_login_time = ?, last_login_ip = ? WHERE id = ?")
            .bind(time)
            .bind(ip)
            .bind(id)
            .execute(self.pool.get_pool())
            .await?;
        Ok(())
    }

    pub async fn update_password(&self, id: i64, password_hash: &str) -> Result<u64> {
        let result = sqlx::query("UPDATE users SET password = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id)
            .execute(self.pool.get_pool())
            .await?;
        Ok(result.rows_affected())
    }

    // ============ FRIENDS ============

    pub async fn list_friends(&self) -> Result<Vec<Friend>> {
        let friends =
            sqlx::query_as::<_, Friend>("SELECT id, title, url, logo FROM friends ORDER BY id")
                .fetch_all(self.pool.get_pool())
                .await?;
        Ok(friends)
    }

    pub async fn create_friend(&self, title: &str, url: &str, logo: Option<&str>) -> Result<i64> {
        let result = sqlx::query("INSERT INTO friends (title, url, logo) VALUES (?, ?, ?)")
            .bind(title)
            .bind(url)
            .bind(logo)
            .execute(self.pool.get_pool())
            .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn update_friend(
        &self,
        id: i64,
        title: &str,
        url: &str,
        logo: Option<&str>,
    ) -> Result<u64> {
        let result = sqlx::query("UPDATE friends SET title = ?, url = ?, logo = ? WHERE id = ?")
            .bind(title)
            .bind(url)
            .bind(logo)
            .bind(id)
            .execute(self.pool.get_pool())
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_friend(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM friends WHERE id = ?")
            .bind(id)
            .execute(self.pool.get_pool())
            .await?;
        Ok(result.rows_affected())
    }

    // ============ ADS ============

    pub async fn list_ads(&self) -> Result<Vec<Ad>> {
        let ads = sqlx::query_as::<_, Ad>("SELECT id, position, img, url FROM ads ORDER BY id")
            .fetch_all(self.pool.get_pool())
            .await?;
        Ok(ads)
    }

    pub async fn create_ad(&self, position: &str, img: &str, url: Option<&str>) -> Result<i64> {
        let result = sqlx::query("INSERT INTO ads (position, img, url) VALUES (?, ?, ?)")
            .bind(position)
            .bind(img)
            .bind(url)
            .execute(self.pool.get_pool())
            .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn update_ad(
        &self,
        id: i64,
        position: &str,
        img: &str,
        url: Option<&str>,
    ) -> Result<u64> {
        let result = sqlx::query("UPDATE ads SET position = ?, img = ?, url = ? WHERE id = ?")
            .bind(position)
            .bind(img)
            .bind(url)
            .bind(id)
            .execute(self.pool.get_pool())
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_ad(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM ads WHERE id = ?")
            .bind(id)
            .execute(self.pool.get_pool())
            .await?;
        Ok(result.rows_affected())
    }
}
