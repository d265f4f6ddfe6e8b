//! Domain models: user profile, rank ladder, court positions, quiz questions,
//! answer records, chat turns, and reward tiers.

use serde::{Deserialize, Serialize};

/// One of the six court positions a player can train as.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Outside,
    Middle,
    Setter,
    Opposite,
    Libero,
    Defensive,
}

impl Position {
    /// Stable string tag used by the catalog and persisted state.
    pub fn id(&self) -> &'static str {
        match self {
            Position::Outside => "outside",
            Position::Middle => "middle",
            Position::Setter => "setter",
            Position::Opposite => "opposite",
            Position::Libero => "libero",
            Position::Defensive => "defensive",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "outside" => Some(Position::Outside),
            "middle" => Some(Position::Middle),
            "setter" => Some(Position::Setter),
            "opposite" => Some(Position::Opposite),
            "libero" => Some(Position::Libero),
            "defensive" => Some(Position::Defensive),
            _ => None,
        }
    }
}

/// Rank ladder, a read-only projection of cumulative stars.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Master,
    Grandmaster,
}

impl Rank {
    /// Fixed thresholds: 0 / 50 / 100 / 200 / 350 / 550 / 800 stars.
    pub fn from_stars(stars: u32) -> Self {
        match stars {
            0..=49 => Rank::Bronze,
            50..=99 => Rank::Silver,
            100..=199 => Rank::Gold,
            200..=349 => Rank::Platinum,
            350..=549 => Rank::Diamond,
            550..=799 => Rank::Master,
            _ => Rank::Grandmaster,
        }
    }

    /// Display label (段位).
    pub fn label(&self) -> &'static str {
        match self {
            Rank::Bronze => "青铜",
            Rank::Silver => "白银",
            Rank::Gold => "黄金",
            Rank::Platinum => "铂金",
            Rank::Diamond => "钻石",
            Rank::Master => "大师",
            Rank::Grandmaster => "王者",
        }
    }
}

/// The player's profile. Mutated only by quiz reward application; never
/// destroyed within a session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub level: u32,
    pub xp: u32,
    pub stars: u32,
    pub main_position: Position,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            username: "guest".into(),
            level: 1,
            xp: 0,
            stars: 0,
            main_position: Position::Libero,
        }
    }
}

impl UserProfile {
    /// Rank is derived, not stored.
    pub fn rank(&self) -> Rank {
        Rank::from_stars(self.stars)
    }

    /// Progress toward the next level bar; xp wraps by modulo 100.
    pub fn level_progress(&self) -> u32 {
        self.xp % 100
    }

    /// Additive reward application. Level itself is display state and is not
    /// advanced here.
    pub fn apply_reward(&mut self, stars: u32, xp: u32) {
        self.stars += stars;
        self.xp += xp;
    }
}

/// A tactics quiz question, sourced from the backend catalog. Immutable once
/// fetched.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    #[serde(rename = "question")]
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub explanation: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub category: String,
}

/// One graded answer. Append-only, one per question in grading order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: u32,
    pub selected_answer: usize,
    pub is_correct: bool,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One turn of the AI-coach transcript.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// Reward tier for a finished quiz, keyed by the correct-answer percentage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RewardTier {
    Excellent,
    Good,
    Beginner,
}

impl RewardTier {
    /// Pure function of the percentage with inclusive lower bounds at 60/80.
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage >= 80 {
            RewardTier::Excellent
        } else if percentage >= 60 {
            RewardTier::Good
        } else {
            RewardTier::Beginner
        }
    }

    pub fn stars(&self) -> u32 {
        match self {
            RewardTier::Excellent => 3,
            RewardTier::Good => 2,
            RewardTier::Beginner => 1,
        }
    }

    pub fn xp(&self) -> u32 {
        match self {
            RewardTier::Excellent => 50,
            RewardTier::Good => 35,
            RewardTier::Beginner => 25,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RewardTier::Excellent => "优秀",
            RewardTier::Good => "良好",
            RewardTier::Beginner => "初级",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RewardTier::Excellent => "太棒了！你已经掌握了这个战术！",
            RewardTier::Good => "不错！再复习一下会更好！",
            RewardTier::Beginner => "继续加油！",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reward_tier_boundaries() {
        assert_eq!(RewardTier::from_percentage(59), RewardTier::Beginner);
        assert_eq!(RewardTier::from_percentage(60), RewardTier::Good);
        assert_eq!(RewardTier::from_percentage(79), RewardTier::Good);
        assert_eq!(RewardTier::from_percentage(80), RewardTier::Excellent);
        assert_eq!(RewardTier::from_percentage(100), RewardTier::Excellent);
        assert_eq!(RewardTier::from_percentage(0), RewardTier::Beginner);
    }

    #[test]
    fn rank_thresholds() {
        assert_eq!(Rank::from_stars(0), Rank::Bronze);
        assert_eq!(Rank::from_stars(49), Rank::Bronze);
        assert_eq!(Rank::from_stars(50), Rank::Silver);
        assert_eq!(Rank::from_stars(199), Rank::Gold);
        assert_eq!(Rank::from_stars(200), Rank::Platinum);
        assert_eq!(Rank::from_stars(549), Rank::Diamond);
        assert_eq!(Rank::from_stars(550), Rank::Master);
        assert_eq!(Rank::from_stars(800), Rank::Grandmaster);
    }

    #[test]
    fn reward_application_is_additive() {
        let mut user = UserProfile::default();
        user.apply_reward(3, 50);
        user.apply_reward(2, 35);
        assert_eq!(user.stars, 5);
        assert_eq!(user.xp, 85);
        assert_eq!(user.level, 1);
        assert_eq!(user.level_progress(), 85);
        user.apply_reward(0, 40);
        assert_eq!(user.level_progress(), 25);
    }

    #[test]
    fn position_roundtrip() {
        for pos in [
            Position::Outside,
            Position::Middle,
            Position::Setter,
            Position::Opposite,
            Position::Libero,
            Position::Defensive,
        ] {
            assert_eq!(Position::from_id(pos.id()), Some(pos));
        }
        assert_eq!(Position::from_id("coach"), None);
    }
}
