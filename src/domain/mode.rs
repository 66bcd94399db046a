//! Game mode and engine difficulty settings.
//!
//! The difficulty table maps each level to a UCI `Skill Level` (0-20) and a
//! per-move thinking budget. Both grow with difficulty.

use serde::Deserialize;
use std::time::Duration;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
pub enum GameMode {
    #[default]
    #[serde(rename = "pvp")]
    HumanVsHuman,
    #[serde(rename = "engine")]
    HumanVsEngine,
}

impl GameMode {
    pub fn label(self) -> &'static str {
        match self {
            GameMode::HumanVsHuman => "Player vs Player",
            GameMode::HumanVsEngine => "Player vs AI",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            GameMode::HumanVsHuman => GameMode::HumanVsEngine,
            GameMode::HumanVsEngine => GameMode::HumanVsHuman,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Unbeatable,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Unbeatable,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Unbeatable => "Unbeatable",
        }
    }

    /// Value sent as the engine's `Skill Level` option
    pub fn skill_level(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 5,
            Difficulty::Hard => 10,
            Difficulty::Unbeatable => 20,
        }
    }

    /// Thinking time granted to the engine per move
    pub fn time_budget(self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(200),
            Difficulty::Medium => Duration::from_millis(500),
            Difficulty::Hard => Duration::from_millis(1000),
            Difficulty::Unbeatable => Duration::from_millis(2000),
        }
    }

    /// Next level, wrapping around after the strongest
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_table() {
        let skills: Vec<u8> = Difficulty::ALL.iter().map(|d| d.skill_level()).collect();
        assert_eq!(skills, vec![1, 5, 10, 20]);
    }

    #[test]
    fn test_time_budget_increases_with_difficulty() {
        for pair in Difficulty::ALL.windows(2) {
            assert!(pair[0].time_budget() < pair[1].time_budget());
            assert!(pair[0].skill_level() < pair[1].skill_level());
        }
    }

    #[test]
    fn test_difficulty_cycle_wraps() {
        assert_eq!(Difficulty::Easy.next(), Difficulty::Medium);
        assert_eq!(Difficulty::Unbeatable.next(), Difficulty::Easy);
    }

    #[test]
    fn test_mode_toggle() {
        assert_eq!(GameMode::HumanVsHuman.toggled(), GameMode::HumanVsEngine);
        assert_eq!(GameMode::default(), GameMode::HumanVsHuman);
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }
}
