//! Countdown engine implementation.
//!
//! The engine is a caller-driven state machine. It does not own timers --
//! the caller (normally [`crate::runner`]) invokes `tick()` once per second
//! and `finish_fade()` after the fade delay.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Finished
//! ```
//!
//! Each tick decrements the head item, escalates its urgency, and marks it
//! fading when it reaches zero. The faded item is only removed later, by
//! `finish_fade()`, and only if it is still the untouched zero-second head:
//! removal and the next tick may interleave either way, so the removal
//! re-checks everything it assumed.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::agenda::{Agenda, Urgency};
use crate::error::EngineError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    Idle,
    Running,
    /// The agenda emptied. Terminal; no further ticks have any effect.
    Finished,
}

/// Core countdown engine.
///
/// Owns the agenda for the duration of the meeting. Only ever reads and
/// mutates the head item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownEngine {
    agenda: Agenda,
    state: EngineState,
}

impl CountdownEngine {
    pub fn new(agenda: Agenda) -> Self {
        Self {
            agenda,
            state: EngineState::Idle,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn agenda(&self) -> &Agenda {
        &self.agenda
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let head = self.agenda.head();
        Event::StateSnapshot {
            state: self.state,
            title: self.agenda.title().to_string(),
            items_left: self.agenda.len(),
            head_topic: head.map(|h| h.topic.clone()),
            head_display: head.map(|h| h.display()),
            head_urgency: head.map(|h| h.urgency),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin the countdown. The head item becomes active.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AlreadyStarted`] unless the engine is `Idle`.
    pub fn start(&mut self) -> Result<Event, EngineError> {
        if self.state != EngineState::Idle {
            return Err(EngineError::AlreadyStarted);
        }
        self.state = EngineState::Running;
        let head = self.agenda.head();
        Ok(Event::CountdownStarted {
            item_id: head.map(|h| h.id),
            topic: head.map(|h| h.topic.clone()),
            at: Utc::now(),
        })
    }

    /// Advance the countdown by one second.
    ///
    /// Returns the events this tick produced: nothing when not `Running`,
    /// `MeetingEnded` once when the agenda is found empty, otherwise a
    /// `Tick` for the head item plus `FadeStarted` the first time it hits
    /// zero.
    pub fn tick(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if self.state != EngineState::Running {
            return events;
        }
        let Some(head) = self.agenda.head_mut() else {
            self.state = EngineState::Finished;
            events.push(Event::MeetingEnded { at: Utc::now() });
            return events;
        };
        head.remaining_secs = head.remaining_secs.saturating_sub(1);
        head.urgency = head.urgency.max(Urgency::for_remaining(head.remaining_secs));
        events.push(Event::Tick {
            item_id: head.id,
            topic: head.topic.clone(),
            display: head.display(),
            remaining_secs: head.remaining_secs,
            urgency: head.urgency,
            at: Utc::now(),
        });
        if head.remaining_secs == 0 && !head.fading {
            head.fading = true;
            events.push(Event::FadeStarted {
                item_id: head.id,
                topic: head.topic.clone(),
                at: Utc::now(),
            });
        }
        events
    }

    /// Complete a fade begun by an earlier tick: remove the item if it is
    /// still the head, still at zero, and still fading. Returns `None` when
    /// any of that no longer holds -- the item was already removed, or the
    /// agenda changed under the timer.
    pub fn finish_fade(&mut self, item_id: Uuid) -> Option<Event> {
        let head = self.agenda.head()?;
        if head.id != item_id || !head.fading || head.remaining_secs != 0 {
            return None;
        }
        let removed = self.agenda.remove_head().ok()?;
        Some(Event::ItemRemoved {
            item_id: removed.id,
            topic: removed.topic,
            at: Utc::now(),
        })
    }

    /// Halt the countdown. Idempotent; only a `Running` engine emits the
    /// stop event, every other state is a no-op.
    pub fn stop(&mut self) -> Option<Event> {
        if self.state != EngineState::Running {
            return None;
        }
        self.state = EngineState::Idle;
        Some(Event::CountdownStopped { at: Utc::now() })
    }
}
