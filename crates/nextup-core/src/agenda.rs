//! Agenda model: an ordered queue of timed topics.
//!
//! An [`Agenda`] is built once from user-entered (topic, duration) pairs and
//! then consumed head-first by the countdown engine. Entries whose topic or
//! time field is empty, or still holds the form placeholder text, are
//! silently discarded at construction.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::codec::{self, ParseMode};
use crate::error::{CodecError, EngineError};

/// Severity of an item's remaining time, used to drive visual emphasis.
///
/// Ordered by severity; escalation is always `max(current, derived)` so an
/// item's urgency never decreases over its lifetime.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    #[default]
    Normal,
    UnderOneMinute,
    UnderFifteenSeconds,
}

impl Urgency {
    /// Severity implied by a remaining-seconds value alone.
    pub fn for_remaining(secs: u64) -> Self {
        if secs < 15 {
            Urgency::UnderFifteenSeconds
        } else if secs < 60 {
            Urgency::UnderOneMinute
        } else {
            Urgency::Normal
        }
    }
}

/// Placeholder and default strings for the agenda entry form.
///
/// These mirror the localized defaults the presentation layer pre-fills
/// input fields with; an entry still holding them was never edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormText {
    #[serde(default = "default_topic_placeholder")]
    pub topic_placeholder: String,
    #[serde(default = "default_time_placeholder")]
    pub time_placeholder: String,
    #[serde(default = "default_name_placeholder")]
    pub meeting_name_placeholder: String,
    #[serde(default = "default_title")]
    pub default_title: String,
}

fn default_topic_placeholder() -> String {
    "Topic".into()
}
fn default_time_placeholder() -> String {
    "Time".into()
}
fn default_name_placeholder() -> String {
    "Name Your Meeting".into()
}
fn default_title() -> String {
    "Agenda".into()
}

impl Default for FormText {
    fn default() -> Self {
        Self {
            topic_placeholder: default_topic_placeholder(),
            time_placeholder: default_time_placeholder(),
            meeting_name_placeholder: default_name_placeholder(),
            default_title: default_title(),
        }
    }
}

/// One timed topic on the agenda.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgendaItem {
    pub id: Uuid,
    pub topic: String,
    /// Remaining time in whole seconds. Decremented only by the engine,
    /// never below zero.
    pub remaining_secs: u64,
    pub urgency: Urgency,
    /// Set once the item has hit zero and its fade-out has begun.
    #[serde(default)]
    pub fading: bool,
}

impl AgendaItem {
    fn new(topic: String, remaining_secs: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            topic,
            remaining_secs,
            urgency: Urgency::Normal,
            fading: false,
        }
    }

    /// Current display text for the remaining time.
    pub fn display(&self) -> String {
        codec::format_duration(self.remaining_secs)
    }
}

/// An ordered meeting agenda. Insertion order is countdown order; the engine
/// only ever touches the head.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agenda {
    title: String,
    items: VecDeque<AgendaItem>,
}

impl Agenda {
    /// Create an empty agenda. An empty or never-edited meeting name falls
    /// back to the default title.
    pub fn new(title: &str) -> Self {
        Self::new_with(title, &FormText::default())
    }

    pub fn new_with(title: &str, form: &FormText) -> Self {
        let title = if title.is_empty() || title == form.meeting_name_placeholder {
            form.default_title.clone()
        } else {
            title.to_string()
        };
        Self {
            title,
            items: VecDeque::new(),
        }
    }

    /// Build an agenda from (topic, duration text) pairs, discarding invalid
    /// entries. May return an empty agenda if every entry was invalid.
    ///
    /// # Errors
    ///
    /// In [`ParseMode::Strict`], a surviving entry with malformed duration
    /// text fails the whole construction with [`CodecError::InvalidFormat`].
    pub fn from_entries<S: AsRef<str>>(
        title: &str,
        entries: &[(S, S)],
        mode: ParseMode,
    ) -> Result<Self, CodecError> {
        Self::from_entries_with(title, entries, mode, &FormText::default())
    }

    pub fn from_entries_with<S: AsRef<str>>(
        title: &str,
        entries: &[(S, S)],
        mode: ParseMode,
        form: &FormText,
    ) -> Result<Self, CodecError> {
        let mut agenda = Self::new_with(title, form);
        for (topic, time) in entries {
            agenda.add_item_with(topic.as_ref(), time.as_ref(), mode, form)?;
        }
        Ok(agenda)
    }

    /// Append one entry, unless it is empty or untouched placeholder text.
    /// Returns whether the entry was appended.
    ///
    /// # Errors
    ///
    /// In [`ParseMode::Strict`], malformed duration text on a non-discarded
    /// entry is an error. Lenient mode never fails.
    pub fn add_item(
        &mut self,
        topic: &str,
        duration_text: &str,
        mode: ParseMode,
    ) -> Result<bool, CodecError> {
        let form = FormText::default();
        self.add_item_with(topic, duration_text, mode, &form)
    }

    pub fn add_item_with(
        &mut self,
        topic: &str,
        duration_text: &str,
        mode: ParseMode,
        form: &FormText,
    ) -> Result<bool, CodecError> {
        if topic.is_empty()
            || topic == form.topic_placeholder
            || duration_text.is_empty()
            || duration_text == form.time_placeholder
        {
            return Ok(false);
        }
        let secs = codec::parse_duration_with(duration_text, mode)?;
        self.items.push_back(AgendaItem::new(topic.to_string(), secs));
        Ok(true)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn head(&self) -> Option<&AgendaItem> {
        self.items.front()
    }

    pub fn head_mut(&mut self) -> Option<&mut AgendaItem> {
        self.items.front_mut()
    }

    /// Remove and return the head item.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyAgenda`] if there is nothing to remove.
    pub fn remove_head(&mut self) -> Result<AgendaItem, EngineError> {
        self.items.pop_front().ok_or(EngineError::EmptyAgenda)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AgendaItem> {
        self.items.iter()
    }

    /// Total remaining seconds across all items.
    pub fn total_secs(&self) -> u64 {
        self.items.iter().map(|i| i.remaining_secs).sum()
    }
}
