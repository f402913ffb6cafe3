use serde::{Deserialize, Serialize};
use std::fmt;

/// How the cat feels about the current spend-to-budget ratio.
///
/// Ordered from least to most financial stress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Relaxed,
    Confused,
    Surprised,
    Sad,
    Angry,
}

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Relaxed,
        Mood::Confused,
        Mood::Surprised,
        Mood::Sad,
        Mood::Angry,
    ];

    /// Machine key, also used to index breed images.
    pub fn key(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Relaxed => "relaxed",
            Mood::Confused => "confused",
            Mood::Surprised => "surprised",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Relaxed => "Relaxed",
            Mood::Confused => "Confused",
            Mood::Surprised => "Surprised",
            Mood::Sad => "Sad",
            Mood::Angry => "Angry",
        }
    }

    /// What the cat says when it reacts to a new expense.
    pub fn dialogue(&self) -> &'static str {
        match self {
            Mood::Happy => "Purr... the wallet feels light as a feather!",
            Mood::Relaxed => "Still plenty of budget left, nap time.",
            Mood::Confused => "Hmm, where did half the budget go?",
            Mood::Surprised => "Whoa! That budget is shrinking fast!",
            Mood::Sad => "Almost nothing left for fish this month...",
            Mood::Angry => "Hiss! We are over budget!",
        }
    }

    pub fn from_key(key: &str) -> Option<Mood> {
        Mood::ALL.iter().copied().find(|m| m.key() == key)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
