pub mod agenda;
pub mod config;
pub mod run;
pub mod time;

use nextup_core::{Agenda, Config, CoreError, ParseMode};

/// Split `TOPIC=TIME` command-line entries into (topic, time) pairs.
/// Entries without `=` are rejected up front.
pub fn parse_entries(raw: &[String]) -> Result<Vec<(String, String)>, CoreError> {
    raw.iter()
        .map(|entry| {
            entry
                .split_once('=')
                .map(|(topic, time)| (topic.to_string(), time.to_string()))
                .ok_or_else(|| {
                    CoreError::Custom(format!("invalid entry {entry:?}, expected TOPIC=TIME"))
                })
        })
        .collect()
}

/// Build an agenda from raw entries using the configured form text, with an
/// optional strict-parsing override.
pub fn build_agenda(
    title: &str,
    raw: &[String],
    config: &Config,
    strict: bool,
) -> Result<Agenda, CoreError> {
    let entries = parse_entries(raw)?;
    let mode = if strict {
        ParseMode::Strict
    } else {
        config.parse_mode()
    };
    let agenda = Agenda::from_entries_with(title, &entries, mode, &config.form)?;
    Ok(agenda)
}
