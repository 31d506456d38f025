//! Default content catalog. Pure data: the seeder walks these tables in
//! order, so every reference here must point backward to a name declared in
//! an earlier sequence (menus before sub-menus before cards).

#[derive(Debug)]
pub struct MenuSeed {
    pub name: &'static str,
    pub order: i64,
}

#[derive(Debug)]
pub struct SubMenuSeed {
    pub parent: &'static str,
    pub name: &'static str,
    pub order: i64,
}

/// Where a seeded card attaches. Exactly one target, by construction.
#[derive(Debug, Clone, Copy)]
pub enum CardTarget {
    Menu(&'static str),
    SubMenu(&'static str),
}

#[derive(Debug)]
pub struct CardSeed {
    pub target: CardTarget,
    pub title: &'static str,
    pub url: &'static str,
    pub logo_url: Option<&'static str>,
    pub desc: Option<&'static str>,
    pub order: i64,
}

#[derive(Debug)]
pub struct FriendSeed {
    pub title: &'static str,
    pub url: &'static str,
    pub logo: Option<&'static str>,
}

pub const DEFAULT_MENUS: &[MenuSeed] = &[
    MenuSeed { name: "Home", order: 1 },
    MenuSeed { name: "Ai Stuff", order: 2 },
    MenuSeed { name: "Cloud", order: 3 },
    MenuSeed { name: "Software", order: 4 },
    MenuSeed { name: "Tools", order: 5 },
    MenuSeed { name: "Other", order: 6 },
];

pub const DEFAULT_SUB_MENUS: &[SubMenuSeed] = &[
    SubMenuSeed { parent: "Ai Stuff", name: "AI chat", order: 1 },
    SubMenuSeed { parent: "Ai Stuff", name: "AI tools", order: 2 },
    SubMenuSeed { parent: "Tools", name: "Dev Tools", order: 1 },
    SubMenuSeed { parent: "Software", name: "Mac", order: 1 },
    SubMenuSeed { parent: "Software", name: "Windows", order: 4 },
];

pub const DEFAULT_CARDS: &[CardSeed] = &[
    CardSeed {
        target: CardTarget::Menu("Home"),
        title: "Baidu",
        url: "https://www.baidu.com",
        logo_url: None,
        desc: Some("Search engine"),
        order: 0,
    },
    CardSeed {
        target: CardTarget::Menu("Home"),
        title: "YouTube",
        url: "https://www.youtube.com",
        logo_url: None,
        desc: Some("Video"),
        order: 0,
    },
    CardSeed {
        target: CardTarget::Menu("Home"),
        title: "GitHub",
        url: "https://github.com",
        logo_url: None,
        desc: Some("Code hosting"),
        order: 0,
    },
    CardSeed {
        target: CardTarget::SubMenu("AI chat"),
        title: "DeepSeek",
        url: "https://www.deepseek.com",
        logo_url: None,
        desc: Some("AI search"),
        order: 0,
    },
];

pub const DEFAULT_FRIENDS: &[FriendSeed] = &[
    FriendSeed {
        title: "GitHub",
        url: "https://github.com",
        logo: None,
    },
];
