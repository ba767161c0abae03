use std::time::Duration;

use clap::Args;
use nextup_core::{runner, Config, CoreError, Event, Urgency};

#[derive(Args)]
pub struct RunArgs {
    /// Agenda entries as TOPIC=TIME (e.g. "Standup=5:00")
    #[arg(required = true)]
    pub entries: Vec<String>,

    /// Meeting title
    #[arg(long, default_value = "")]
    pub title: String,

    /// Reject malformed duration text instead of best-effort parsing
    #[arg(long)]
    pub strict: bool,

    /// Override the tick period in milliseconds
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// Override the fade delay in milliseconds
    #[arg(long)]
    pub fade_ms: Option<u64>,

    /// Print events as JSON lines instead of human-readable text
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: RunArgs) -> Result<(), CoreError> {
    let config = Config::load_or_default();
    let agenda = super::build_agenda(&args.title, &args.entries, &config, args.strict)?;
    if agenda.is_empty() {
        return Err(CoreError::Custom("no valid agenda entries".into()));
    }

    let mut timings = config.timings();
    if let Some(ms) = args.tick_ms {
        timings.tick = Duration::from_millis(ms);
    }
    if let Some(ms) = args.fade_ms {
        timings.fade = Duration::from_millis(ms);
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let (handle, mut rx) = runner::run(agenda, timings)?;
        while let Some(event) = rx.recv().await {
            if args.json {
                println!("{}", serde_json::to_string(&event)?);
            } else {
                print_event(&event);
            }
            if matches!(event, Event::MeetingEnded { .. }) {
                break;
            }
        }
        handle.wait().await;
        Ok(())
    })
}

fn print_event(event: &Event) {
    match event {
        Event::CountdownStarted { topic, .. } => {
            if let Some(topic) = topic {
                println!("now: {topic}");
            }
        }
        Event::Tick {
            topic,
            display,
            urgency,
            ..
        } => {
            let marker = match urgency {
                Urgency::Normal => "",
                Urgency::UnderOneMinute => " !",
                Urgency::UnderFifteenSeconds => " !!",
            };
            println!("{topic}  {display}{marker}");
        }
        Event::FadeStarted { topic, .. } => println!("time's up: {topic}"),
        Event::ItemRemoved { .. } => {}
        Event::MeetingEnded { .. } => println!("Meeting's Over!"),
        Event::CountdownStopped { .. } => println!("stopped"),
        Event::StateSnapshot { .. } => {}
    }
}
