//! Tokio driver for the countdown engine.
//!
//! The engine itself is caller-driven; this module supplies the caller. It
//! owns the repeating one-second tick and the one-shot fade timer spawned
//! for each expiring item, and forwards every event over an unbounded
//! channel to the presentation adapter.
//!
//! All agenda mutation goes through one `Mutex<CountdownEngine>`, so the
//! tick loop and the per-item fade tasks serialize no matter how the
//! runtime schedules them. Locks are never held across an await.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::agenda::Agenda;
use crate::engine::{CountdownEngine, EngineState};
use crate::error::EngineError;
use crate::events::Event;

/// Timer periods for a countdown run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Period between ticks.
    pub tick: Duration,
    /// Delay between an item reaching zero and its removal.
    pub fade: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            fade: Duration::from_millis(900),
        }
    }
}

/// Handle to a running countdown. Dropping it does not stop the run; call
/// [`CountdownHandle::stop`] for that.
pub struct CountdownHandle {
    engine: Arc<Mutex<CountdownEngine>>,
    task: JoinHandle<()>,
    tx: UnboundedSender<Event>,
    stopped: AtomicBool,
}

impl CountdownHandle {
    /// Halt the countdown. Idempotent. No tick events are delivered after
    /// this returns; an in-flight fade timer may still complete, but its
    /// removal stays conditional on the item being a faded zero-second head.
    pub fn stop(&self) {
        self.task.abort();
        // Emitting under the engine lock serializes against an in-flight
        // tick iteration: its events land before CountdownStopped or not
        // at all.
        if let Some(event) = lock(&self.engine).stop() {
            let _ = self.tx.send(event);
        }
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Whether the tick loop has exited (ended or stopped).
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Whether this countdown was halted via [`CountdownHandle::stop`]
    /// rather than running to completion.
    pub fn stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    pub fn state(&self) -> EngineState {
        lock(&self.engine).state()
    }

    /// Current engine snapshot event.
    pub fn snapshot(&self) -> Event {
        lock(&self.engine).snapshot()
    }

    /// Wait for the tick loop to exit.
    pub async fn wait(self) {
        // A JoinError here only means the task was aborted by stop().
        let _ = self.task.await;
    }
}

/// Start a countdown over `agenda` and return its handle plus the event
/// stream. The first event on the stream is always `CountdownStarted`.
///
/// # Errors
///
/// Returns [`EngineError::AlreadyStarted`] only when given a pre-built
/// engine that is past `Idle`; a fresh agenda never fails.
pub fn run(
    agenda: Agenda,
    timings: Timings,
) -> Result<(CountdownHandle, UnboundedReceiver<Event>), EngineError> {
    run_engine(CountdownEngine::new(agenda), timings)
}

/// Start a countdown over an explicitly constructed engine.
///
/// # Errors
///
/// Returns [`EngineError::AlreadyStarted`] if the engine is not `Idle`.
pub fn run_engine(
    mut engine: CountdownEngine,
    timings: Timings,
) -> Result<(CountdownHandle, UnboundedReceiver<Event>), EngineError> {
    let (tx, rx) = mpsc::unbounded_channel();
    let started = engine.start()?;
    let _ = tx.send(started);

    let engine = Arc::new(Mutex::new(engine));
    let task = tokio::spawn(tick_loop(Arc::clone(&engine), timings, tx.clone()));
    Ok((
        CountdownHandle {
            engine,
            task,
            tx,
            stopped: AtomicBool::new(false),
        },
        rx,
    ))
}

async fn tick_loop(
    engine: Arc<Mutex<CountdownEngine>>,
    timings: Timings,
    tx: UnboundedSender<Event>,
) {
    // interval() fires immediately; the first tick lands a full period
    // after start.
    let start = tokio::time::Instant::now() + timings.tick;
    let mut interval = tokio::time::interval_at(start, timings.tick);
    loop {
        interval.tick().await;
        // Tick and deliver under one lock acquisition: stop() takes the same
        // lock before emitting CountdownStopped, so once it returns no tick
        // event can still be in flight.
        let mut guard = lock(&engine);
        let events = guard.tick();
        let mut ended = false;
        for event in events {
            match &event {
                Event::FadeStarted { item_id, .. } => {
                    spawn_fade(Arc::clone(&engine), timings.fade, tx.clone(), *item_id);
                }
                Event::MeetingEnded { .. } => ended = true,
                _ => {}
            }
            if tx.send(event).is_err() {
                // Receiver gone; nobody is watching the meeting anymore.
                return;
            }
        }
        drop(guard);
        if ended {
            return;
        }
    }
}

fn spawn_fade(
    engine: Arc<Mutex<CountdownEngine>>,
    fade: Duration,
    tx: UnboundedSender<Event>,
    item_id: Uuid,
) {
    tokio::spawn(async move {
        tokio::time::sleep(fade).await;
        if let Some(event) = lock(&engine).finish_fade(item_id) {
            let _ = tx.send(event);
        }
    });
}

fn lock(engine: &Mutex<CountdownEngine>) -> MutexGuard<'_, CountdownEngine> {
    engine.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agenda::Agenda;
    use crate::codec::ParseMode;

    fn agenda_of(entries: &[(&str, &str)]) -> Agenda {
        Agenda::from_entries("Test", entries, ParseMode::Lenient).unwrap()
    }

    async fn drain(mut rx: UnboundedReceiver<Event>) -> Vec<Event> {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    #[tokio::test(start_paused = true)]
    async fn one_second_item_runs_to_completion() {
        let (handle, rx) = run(agenda_of(&[("Only", "1")]), Timings::default()).unwrap();
        handle.wait().await;
        let events = drain(rx).await;

        let kinds: Vec<&'static str> = events
            .iter()
            .map(|e| match e {
                Event::CountdownStarted { .. } => "started",
                Event::Tick { .. } => "tick",
                Event::FadeStarted { .. } => "fade",
                Event::ItemRemoved { .. } => "removed",
                Event::MeetingEnded { .. } => "ended",
                other => panic!("unexpected event {other:?}"),
            })
            .collect();
        assert_eq!(kinds, ["started", "tick", "fade", "removed", "ended"]);
    }

    #[tokio::test(start_paused = true)]
    async fn meeting_ended_exactly_once() {
        let (handle, rx) = run(agenda_of(&[("A", "1"), ("B", "1")]), Timings::default()).unwrap();
        handle.wait().await;
        let events = drain(rx).await;

        let ended = events
            .iter()
            .filter(|e| matches!(e, Event::MeetingEnded { .. }))
            .count();
        assert_eq!(ended, 1);
        let removed = events
            .iter()
            .filter(|e| matches!(e, Event::ItemRemoved { .. }))
            .count();
        assert_eq!(removed, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_agenda_ends_on_first_tick() {
        let (handle, mut rx) = run(agenda_of(&[]), Timings::default()).unwrap();
        assert!(matches!(rx.recv().await, Some(Event::CountdownStarted { .. })));
        assert!(matches!(rx.recv().await, Some(Event::MeetingEnded { .. })));
        handle.wait().await;
    }

    #[tokio::test(start_paused = true)]
    async fn stop_prevents_further_ticks() {
        let (handle, mut rx) = run(agenda_of(&[("Long", "10:00")]), Timings::default()).unwrap();
        assert!(matches!(rx.recv().await, Some(Event::CountdownStarted { .. })));
        assert!(matches!(rx.recv().await, Some(Event::Tick { .. })));
        assert!(matches!(rx.recv().await, Some(Event::Tick { .. })));

        handle.stop();
        assert!(matches!(rx.recv().await, Some(Event::CountdownStopped { .. })));
        assert_eq!(handle.state(), EngineState::Idle);
        // Give any stray timer every chance to fire.
        tokio::time::sleep(Duration::from_secs(10)).await;
        drop(handle);
        assert!(drain(rx).await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_is_idempotent() {
        let (handle, mut rx) = run(agenda_of(&[("Long", "10:00")]), Timings::default()).unwrap();
        assert!(matches!(rx.recv().await, Some(Event::CountdownStarted { .. })));
        handle.stop();
        handle.stop();
        drop(handle);
        let stopped = drain(rx)
            .await
            .into_iter()
            .filter(|e| matches!(e, Event::CountdownStopped { .. }))
            .count();
        assert_eq!(stopped, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_reflects_how_the_run_ended() {
        let (handle, mut rx) = run(agenda_of(&[("Long", "10:00")]), Timings::default()).unwrap();
        assert!(!handle.stopped());
        assert!(matches!(rx.recv().await, Some(Event::CountdownStarted { .. })));
        handle.stop();
        assert!(handle.stopped());

        // A run that completes on its own never reads as stopped.
        let (handle, _rx) = run(agenda_of(&[("Only", "1")]), Timings::default()).unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(handle.is_finished());
        assert!(!handle.stopped());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn stop_orders_before_late_ticks_across_threads() {
        // Real time, fast ticks: the tick loop and the stopping task race on
        // separate worker threads. Delivery happens under the engine lock,
        // so nothing may land after CountdownStopped.
        let timings = Timings {
            tick: Duration::from_millis(2),
            fade: Duration::from_millis(1),
        };
        let (handle, mut rx) = run(agenda_of(&[("Long", "10:00")]), timings).unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.stop();
        drop(handle);

        let mut after_stop = Vec::new();
        let mut seen_stop = false;
        while let Some(event) = rx.recv().await {
            if seen_stop {
                after_stop.push(event);
            } else {
                seen_stop = matches!(event, Event::CountdownStopped { .. });
            }
        }
        assert!(seen_stop);
        assert!(after_stop.is_empty(), "events after stop: {after_stop:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn removal_happens_before_next_tick() {
        // Fade (900ms) elapses between the zero tick and the next tick, so
        // the removal event must land in between.
        let (handle, rx) = run(agenda_of(&[("A", "1"), ("B", "5")]), Timings::default()).unwrap();
        handle.wait().await;
        let events = drain(rx).await;

        let removed_at = events
            .iter()
            .position(|e| matches!(e, Event::ItemRemoved { .. }))
            .unwrap();
        match &events[removed_at + 1] {
            Event::Tick { topic, remaining_secs, .. } => {
                assert_eq!(topic, "B");
                assert_eq!(*remaining_secs, 4);
            }
            other => panic!("expected next item's tick, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_fade_does_not_double_remove() {
        // Fade longer than the tick period: the zero-second head sees extra
        // ticks while fading, then is removed exactly once.
        let timings = Timings {
            tick: Duration::from_secs(1),
            fade: Duration::from_millis(2500),
        };
        let (handle, rx) = run(agenda_of(&[("Only", "1")]), timings).unwrap();
        handle.wait().await;
        let events = drain(rx).await;

        let removed = events
            .iter()
            .filter(|e| matches!(e, Event::ItemRemoved { .. }))
            .count();
        assert_eq!(removed, 1);
        let fades = events
            .iter()
            .filter(|e| matches!(e, Event::FadeStarted { .. }))
            .count();
        assert_eq!(fades, 1);
        assert!(events
            .iter()
            .all(|e| !matches!(e, Event::Tick { remaining_secs, .. } if *remaining_secs > 1)));
    }
}
