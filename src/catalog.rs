//! Built-in content catalogs: court positions and tactics learning modules.
//!
//! These are fixture data, not part of the state-machine contract. Questions
//! come from the backend; everything here is static display/unlock metadata.

use crate::domain::Position;

/// Catalog entry for a selectable court position.
#[derive(Clone, Debug)]
pub struct PositionInfo {
    pub position: Position,
    pub name: &'static str,
    pub difficulty: &'static str,
    pub avatar: &'static str,
    pub features: [&'static str; 3],
}

pub fn positions() -> Vec<PositionInfo> {
    vec![
        PositionInfo {
            position: Position::Outside,
            name: "主攻",
            difficulty: "中等",
            avatar: "https://api.dicebear.com/7.x/avataaars-neutral/svg?seed=hitter&backgroundColor=0ea5e9",
            features: ["全面发展", "攻防兼备", "核心得分手"],
        },
        PositionInfo {
            position: Position::Middle,
            name: "副攻",
            difficulty: "中等",
            avatar: "https://api.dicebear.com/7.x/avataaars-neutral/svg?seed=middle&backgroundColor=10b981",
            features: ["防线支柱", "快攻先锋", "拦网专家"],
        },
        PositionInfo {
            position: Position::Setter,
            name: "二传",
            difficulty: "较难",
            avatar: "https://api.dicebear.com/7.x/avataaars-neutral/svg?seed=setter&backgroundColor=ffa500",
            features: ["球队大脑", "战术指挥", "节奏控制"],
        },
        PositionInfo {
            position: Position::Opposite,
            name: "接应",
            difficulty: "较难",
            avatar: "https://api.dicebear.com/7.x/avataaars-neutral/svg?seed=opposite&backgroundColor=f59e0b",
            features: ["终结者", "强力进攻", "单拦核心"],
        },
        PositionInfo {
            position: Position::Libero,
            name: "自由人",
            difficulty: "中等",
            avatar: "https://api.dicebear.com/7.x/avataaars-neutral/svg?seed=libero&backgroundColor=3b82f6",
            features: ["防守专家", "接发球核心", "防线指挥"],
        },
        PositionInfo {
            position: Position::Defensive,
            name: "防守队员",
            difficulty: "较易",
            avatar: "https://api.dicebear.com/7.x/avataaars-neutral/svg?seed=defender&backgroundColor=14b8a6",
            features: ["后排防守", "接发球", "团队支援"],
        },
    ]
}

/// The tactics module the user starts with.
pub const BASE_MODULE: &str = "基础轮转规则";

/// Catalog entry for a tactics learning module.
///
/// `required_stars` / `required_level` are advisory display thresholds only;
/// actual gating goes through the unlock set and `unlock_after`.
#[derive(Clone, Debug)]
pub struct TacticsModule {
    pub emoji: &'static str,
    pub title: &'static str,
    pub tier: &'static str,
    pub description: &'static str,
    pub required_stars: Option<u32>,
    pub required_level: Option<u32>,
}

pub fn tactics_modules() -> Vec<TacticsModule> {
    vec![
        TacticsModule {
            emoji: "🔄",
            title: BASE_MODULE,
            tier: "初级",
            description: "排球比赛中的轮转是最基本也是最重要的规则之一。每当己方获得发球权时，全队需要顺时针轮转一个位置。",
            required_stars: None,
            required_level: None,
        },
        TacticsModule {
            emoji: "🏐",
            title: "位置与职责",
            tier: "初级",
            description: "排球场上有6个位置，每个位置都有特定的职责。了解各位置的作用是掌握排球战术的基础。",
            required_stars: Some(2),
            required_level: Some(1),
        },
        TacticsModule {
            emoji: "📐",
            title: "接发球站位",
            tier: "初级",
            description: "接发球（一传）是进攻的起点。合理的站位能够确保更好地接起对方的发球。",
            required_stars: Some(5),
            required_level: Some(2),
        },
        TacticsModule {
            emoji: "⚡",
            title: "进攻战术组合",
            tier: "中级",
            description: "通过多点进攻和快速配合，可以撕开对方的防线。常见的进攻战术包括快攻、强攻、后排攻等。",
            required_stars: Some(15),
            required_level: Some(3),
        },
        TacticsModule {
            emoji: "🛡️",
            title: "拦网体系",
            tier: "中级",
            description: "有效的拦网不仅能直接得分，还能降低后排防守压力。团队拦网需要良好的协同配合。",
            required_stars: Some(25),
            required_level: Some(4),
        },
        TacticsModule {
            emoji: "🎯",
            title: "防守阵型",
            tier: "高级",
            description: "后排防守阵型决定了球队的防守覆盖范围。不同的阵型适用于不同的比赛情况。",
            required_stars: Some(50),
            required_level: Some(5),
        },
    ]
}

/// The single wired unlock edge: completing the base rotation module opens
/// 位置与职责. No other module currently unlocks anything.
pub fn unlock_after(completed_module: &str) -> Option<&'static str> {
    match completed_module {
        BASE_MODULE => Some("位置与职责"),
        _ => None,
    }
}
