use clap::Subcommand;
use nextup_core::{Config, CoreError};

#[derive(Subcommand)]
pub enum AgendaAction {
    /// Show which entries survive filtering and how they parse
    Check {
        /// Agenda entries as TOPIC=TIME
        #[arg(required = true)]
        entries: Vec<String>,
        /// Meeting title
        #[arg(long, default_value = "")]
        title: String,
        /// Reject malformed duration text
        #[arg(long)]
        strict: bool,
        /// Print the agenda as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: AgendaAction) -> Result<(), CoreError> {
    match action {
        AgendaAction::Check {
            entries,
            title,
            strict,
            json,
        } => {
            let config = Config::load_or_default();
            let agenda = super::build_agenda(&title, &entries, &config, strict)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&agenda)?);
            } else {
                println!("{}", agenda.title());
                for item in agenda.iter() {
                    println!("  {}  {}", item.topic, item.display());
                }
                println!(
                    "{} item(s), {} total",
                    agenda.len(),
                    nextup_core::format_duration(agenda.total_secs())
                );
            }
        }
    }
    Ok(())
}
