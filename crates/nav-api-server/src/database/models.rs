use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Menu {
    pub id: i64,
    pub name: String,
    pub order: i64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubMenu {
    pub id: i64,
    pub parent_id: i64,
    pub name: String,
    pub order: i64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Card {
    pub id: i64,
    pub menu_id: Option<i64>,
    pub sub_menu_id: Option<i64>,
    pub title: String,
    pub url: String,
    pub logo_url: Option<String>,
    pub custom_logo_path: Option<String>,
    pub desc: Option<String>,
    pub order: i64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub last_login_time: Option<String>,
    pub last_login_ip: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Friend {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ad {
    pub id: i64,
    pub position: String,
    pub img: String,
    pub url: Option<String>,
}

/// A menu with its sub-menus, as returned by GET /api/menus.
#[derive(Debug, Clone, Serialize)]
pub struct MenuTree {
    pub id: i64,
    pub name: String,
    pub order: i64,
    pub sub_menus: Vec<SubMenu>,
}

/// A card augmented with the logo the front end should display.
#[derive(Debug, Clone, Serialize)]
pub struct CardView {
    #[serde(flatten)]
    pub card: Card,
    pub display_logo: String,
}

impl CardView {
    /// Custom upload wins over an explicit logo URL, which wins over the
    /// site favicon.
    pub fn from_card(card: Card) -> Self {
        let display_logo = if let Some(path) = &card.custom_logo_path {
            format!("/uploads/{}", path)
        } else if let Some(logo) = &card.logo_url {
            logo.clone()
        } else {
            format!("{}/favicon.ico", card.url.trim_end_matches('/'))
        };
        Self { card, display_logo }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewCard {
    pub menu_id: Option<i64>,
    pub sub_menu_id: Option<i64>,
    pub title: String,
    pub url: String,
    pub logo_url: Option<String>,
    pub custom_logo_path: Option<String>,
    pub desc: Option<String>,
    #[serde(default)]
    pub order: i64,
}
