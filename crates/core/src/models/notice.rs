use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Handle returned when a notice is posted; the caller's timer hands it back
/// to [`NoticeBoard::dismiss`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoticeId(pub u64);

/// Independent display slots. A new notice replaces the old one on the same channel only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoticeChannel {
    /// "Your cat levelled up!" banner.
    LevelUp,
    /// Speech bubble next to the cat.
    Dialogue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub id: NoticeId,
    pub channel: NoticeChannel,
    pub text: String,
    /// How long the presentation layer should keep it visible.
    pub duration_ms: u64,
}

/// Transient notifications with stale-timer protection.
///
/// Posting overwrites whatever is shown on that channel. A timer that fires
/// for an older notice finds a different id and leaves the newer one alone.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    active: HashMap<NoticeChannel, Notice>,
    next_id: u64,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&mut self, channel: NoticeChannel, text: impl Into<String>, duration_ms: u64) -> Notice {
        self.next_id += 1;
        let notice = Notice {
            id: NoticeId(self.next_id),
            channel,
            text: text.into(),
            duration_ms,
        };
        self.active.insert(channel, notice.clone());
        notice
    }

    /// Clear the notice with this id if it is still the one on display.
    /// Returns `false` for stale ids.
    pub fn dismiss(&mut self, id: NoticeId) -> bool {
        let channel = self
            .active
            .iter()
            .find(|(_, n)| n.id == id)
            .map(|(channel, _)| *channel);
        match channel {
            Some(channel) => {
                self.active.remove(&channel);
                true
            }
            None => false,
        }
    }

    pub fn current(&self, channel: NoticeChannel) -> Option<&Notice> {
        self.active.get(&channel)
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}
