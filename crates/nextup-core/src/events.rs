use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::agenda::Urgency;
use crate::engine::EngineState;

/// Every observable state change in the countdown produces an Event.
/// The presentation adapter consumes these; it never reaches into the
/// agenda itself while the countdown runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The countdown began; the head item (if any) is now active.
    CountdownStarted {
        item_id: Option<Uuid>,
        topic: Option<String>,
        at: DateTime<Utc>,
    },
    /// One second elapsed on the head item.
    Tick {
        item_id: Uuid,
        topic: String,
        /// Display text for the remaining time, e.g. `"4:59"`.
        display: String,
        remaining_secs: u64,
        urgency: Urgency,
        at: DateTime<Utc>,
    },
    /// The head item reached zero; its fade-out begins now.
    FadeStarted {
        item_id: Uuid,
        topic: String,
        at: DateTime<Utc>,
    },
    /// A faded item was removed from the agenda.
    ItemRemoved {
        item_id: Uuid,
        topic: String,
        at: DateTime<Utc>,
    },
    /// The agenda ran out of items. Terminal; emitted exactly once.
    MeetingEnded {
        at: DateTime<Utc>,
    },
    /// The countdown was stopped before the agenda emptied.
    CountdownStopped {
        at: DateTime<Utc>,
    },
    /// Full engine state, for pull-style consumers.
    StateSnapshot {
        state: EngineState,
        title: String,
        items_left: usize,
        head_topic: Option<String>,
        head_display: Option<String>,
        head_urgency: Option<Urgency>,
        at: DateTime<Utc>,
    },
}
