use clap::Subcommand;
use nextup_core::{codec, CoreError};

#[derive(Subcommand)]
pub enum TimeAction {
    /// Parse a duration string into total seconds
    Parse {
        /// Duration text, e.g. "90", "1:30", "1:01:30"
        text: String,
        /// Reject malformed input instead of best-effort parsing
        #[arg(long)]
        strict: bool,
    },
    /// Format total seconds as display text
    Format {
        /// Total seconds
        seconds: u64,
    },
}

pub fn run(action: TimeAction) -> Result<(), CoreError> {
    match action {
        TimeAction::Parse { text, strict } => {
            let secs = if strict {
                codec::parse_duration_strict(&text)?
            } else {
                codec::parse_duration(&text)
            };
            println!("{secs}");
        }
        TimeAction::Format { seconds } => {
            println!("{}", codec::format_duration(seconds));
        }
    }
    Ok(())
}
