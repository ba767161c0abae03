//! Duration string parsing and formatting.
//!
//! Durations are entered as colon-separated strings (`"90"`, `"1:30"`,
//! `"1:01:30"`) and displayed in the shortest form that fits the magnitude.
//! Parsing is lenient by default: unparseable segments count as zero and a
//! surplus of segments falls back to reading the first one only. The strict
//! variant rejects malformed input instead, for callers that want to surface
//! typos to the user.

use crate::error::CodecError;

/// How [`parse_duration`]-shaped input is handled when it is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Best-effort: bad segments read as 0, extra segments are ignored.
    #[default]
    Lenient,
    /// Malformed input is an error.
    Strict,
}

/// Parse a duration string into total seconds, leniently.
///
/// - 1 segment: seconds (`"90"` -> 90)
/// - 2 segments: minutes:seconds (`"1:30"` -> 90)
/// - 3 segments: hours:minutes:seconds (`"1:01:30"` -> 3690)
/// - 4+ segments: only the first segment is read, as seconds
///
/// Segments that do not parse as integers count as 0, so `parse_duration("")`
/// and `parse_duration("abc")` both return 0. Totals beyond `u64::MAX`
/// saturate; lenient parsing never fails.
pub fn parse_duration(text: &str) -> u64 {
    let parts: Vec<&str> = text.split(':').collect();
    let seg = |i: usize| {
        parts
            .get(i)
            .and_then(|p| p.trim().parse::<u64>().ok())
            .unwrap_or(0)
    };
    match parts.len() {
        3 => seg(0)
            .saturating_mul(3600)
            .saturating_add(seg(1).saturating_mul(60))
            .saturating_add(seg(2)),
        2 => seg(0).saturating_mul(60).saturating_add(seg(1)),
        _ => seg(0),
    }
}

/// Parse a duration string into total seconds, rejecting malformed input.
///
/// # Errors
///
/// Returns [`CodecError::InvalidFormat`] if the input is empty, has more than
/// three colon-separated segments, contains a non-numeric segment, or totals
/// beyond `u64::MAX` seconds.
pub fn parse_duration_strict(text: &str) -> Result<u64, CodecError> {
    let invalid = || CodecError::InvalidFormat {
        input: text.to_string(),
    };
    if text.trim().is_empty() {
        return Err(invalid());
    }
    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() > 3 {
        return Err(invalid());
    }
    let mut segs = [0u64; 3];
    for (i, part) in parts.iter().enumerate() {
        segs[i] = part.trim().parse::<u64>().map_err(|_| invalid())?;
    }
    match parts.len() {
        3 => segs[0]
            .checked_mul(3600)
            .and_then(|h| segs[1].checked_mul(60).and_then(|m| h.checked_add(m)))
            .and_then(|hm| hm.checked_add(segs[2])),
        2 => segs[0].checked_mul(60).and_then(|m| m.checked_add(segs[1])),
        _ => Some(segs[0]),
    }
    .ok_or_else(invalid)
}

/// Parse a duration string according to `mode`.
///
/// # Errors
///
/// Returns [`CodecError::InvalidFormat`] in strict mode only.
pub fn parse_duration_with(text: &str, mode: ParseMode) -> Result<u64, CodecError> {
    match mode {
        ParseMode::Lenient => Ok(parse_duration(text)),
        ParseMode::Strict => parse_duration_strict(text),
    }
}

/// Format total seconds for display.
///
/// `"H:MM:SS"` when an hour or more remains, `"M:SS"` when a minute or more,
/// otherwise the bare seconds count. Display-only: not every input string
/// round-trips through this, but its own canonical outputs do.
pub fn format_duration(secs: u64) -> String {
    let s = secs % 60;
    let minutes = secs / 60;
    if minutes >= 60 {
        let m = minutes % 60;
        let hours = minutes / 60;
        format!("{hours}:{m:02}:{s:02}")
    } else if minutes > 0 {
        format!("{minutes}:{s:02}")
    } else {
        format!("{s}")
    }
}
