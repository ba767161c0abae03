//! # NextUp Core Library
//!
//! Core logic for NextUp, a meeting-agenda countdown. A user enters topics
//! with allotted durations; the countdown then walks the agenda head-first,
//! one second at a time, escalating urgency as an item runs low and fading
//! it out once it expires.
//!
//! The presentation layer (CLI here, anything that can render a list
//! elsewhere) is a thin adapter: it feeds (topic, duration) pairs in and
//! consumes [`Event`]s out.
//!
//! ## Key Components
//!
//! - [`codec`]: duration string parsing and display formatting
//! - [`Agenda`]: the ordered queue of timed topics
//! - [`CountdownEngine`]: caller-driven per-second state machine
//! - [`runner`]: tokio driver owning the tick and fade timers
//! - [`Config`]: TOML configuration (timings, parse mode, form text)

pub mod agenda;
pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod runner;

pub use agenda::{Agenda, AgendaItem, FormText, Urgency};
pub use codec::{format_duration, parse_duration, parse_duration_strict, ParseMode};
pub use config::Config;
pub use engine::{CountdownEngine, EngineState};
pub use error::{CodecError, ConfigError, CoreError, EngineError, Result};
pub use events::Event;
pub use runner::{CountdownHandle, Timings};
