//! Round loop thread: runs the round engine on a fixed 100 ms cadence.
//!
//! The engine moves into the thread, so nothing else can mutate the round.
//! Commands arrive via an `mpsc` channel and are applied strictly between
//! ticks. While paused the thread blocks on the channel without ticking.
//! When the round terminates the thread hands the outcome to the result
//! sink and exits, so the timer cannot outlive the round.
//!
//! Once every sender is gone the round can get no more input: a running
//! round plays out to its end, a paused one is abandoned.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{error, info};

use zerotrust_core::commands::RoundCommand;
use zerotrust_core::events::RoundEvent;
use zerotrust_core::state::{RoundOutcome, RoundState};
use zerotrust_core::types::{ResponderId, ThreatId};
use zerotrust_sim::RoundEngine;

use crate::error::AppError;
use crate::sink::ResultSink;
use crate::state::{LoopCommand, SharedRound};

/// Caller's side of a running round.
pub struct RoundHandle {
    commands: mpsc::Sender<LoopCommand>,
    events: mpsc::Receiver<RoundEvent>,
    shared: SharedRound,
    origin: Instant,
    thread: JoinHandle<Option<RoundOutcome>>,
}

impl RoundHandle {
    pub fn send(&self, command: RoundCommand) -> Result<(), AppError> {
        self.commands
            .send(LoopCommand::Round(command))
            .map_err(|_| AppError::LoopFinished)
    }

    pub fn assign(&self, responder: ResponderId, threat: ThreatId) -> Result<(), AppError> {
        self.send(RoundCommand::Assign { responder, threat })
    }

    pub fn pause(&self) -> Result<(), AppError> {
        self.send(RoundCommand::Pause)
    }

    pub fn resume(&self) -> Result<(), AppError> {
        self.send(RoundCommand::Resume)
    }

    /// Milliseconds since the round started, on the loop's clock.
    pub fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    /// Latest published round state.
    pub fn latest(&self) -> Option<RoundState> {
        self.shared.latest()
    }

    /// Events emitted since the last call.
    pub fn drain_events(&self) -> Vec<RoundEvent> {
        self.events.try_iter().collect()
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Stop the loop early. The round is abandoned without an outcome.
    pub fn shutdown(self) -> Result<Option<RoundOutcome>, AppError> {
        let _ = self.commands.send(LoopCommand::Shutdown);
        self.thread.join().map_err(|_| AppError::LoopPanicked)
    }

    /// Give up control and wait for the round to end.
    ///
    /// A running round plays out and yields its outcome. A paused round can
    /// never resume, so it is abandoned and yields `None`.
    pub fn join(self) -> Result<Option<RoundOutcome>, AppError> {
        let RoundHandle {
            commands, thread, ..
        } = self;
        drop(commands);
        thread.join().map_err(|_| AppError::LoopPanicked)
    }
}

/// Spawn the round loop for an engine started at time 0 on the loop clock.
pub fn spawn_round_loop(
    engine: RoundEngine,
    sink: Box<dyn ResultSink + Send>,
) -> Result<RoundHandle, AppError> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();
    let (event_tx, event_rx) = mpsc::channel::<RoundEvent>();
    let shared = SharedRound::new();
    shared.publish(engine.state());
    let origin = Instant::now();

    let loop_shared = shared.clone();
    let thread = std::thread::Builder::new()
        .name("zerotrust-round-loop".into())
        .spawn(move || {
            let mut round = RoundLoop {
                engine,
                sink,
                commands: cmd_rx,
                events: event_tx,
                shared: loop_shared,
                origin,
            };
            round.run()
        })?;

    Ok(RoundHandle {
        commands: cmd_tx,
        events: event_rx,
        shared,
        origin,
        thread,
    })
}

struct RoundLoop {
    engine: RoundEngine,
    sink: Box<dyn ResultSink + Send>,
    commands: mpsc::Receiver<LoopCommand>,
    events: mpsc::Sender<RoundEvent>,
    shared: SharedRound,
    origin: Instant,
}

impl RoundLoop {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    /// Runs until the round ends, a Shutdown command, or channel disconnect.
    fn run(&mut self) -> Option<RoundOutcome> {
        let tick = Duration::from_millis(self.engine.config().tick_ms);
        let mut next_tick = Instant::now() + tick;
        let mut detached = false;
        info!(tick_ms = tick.as_millis() as u64, "round loop started");

        loop {
            // 1. Paused: block until a command arrives
            if self.engine.is_paused() {
                match self.commands.recv() {
                    Ok(LoopCommand::Round(command)) => {
                        self.apply(command);
                        if !self.engine.is_paused() {
                            next_tick = Instant::now() + tick;
                        }
                        continue;
                    }
                    Ok(LoopCommand::Shutdown) | Err(_) => return self.stop(),
                }
            }

            // 2. Wait for the next tick, applying commands as they arrive
            let now = Instant::now();
            if next_tick > now {
                if detached {
                    std::thread::sleep(next_tick - now);
                } else {
                    match self.commands.recv_timeout(next_tick - now) {
                        Ok(LoopCommand::Round(command)) => {
                            self.apply(command);
                            continue;
                        }
                        Ok(LoopCommand::Shutdown) => return self.stop(),
                        Err(RecvTimeoutError::Disconnected) => {
                            detached = true;
                            continue;
                        }
                        Err(RecvTimeoutError::Timeout) => {}
                    }
                }
            }

            // 3. Advance one tick
            let now_ms = self.now_ms();
            let done = self.engine.tick(now_ms);
            self.publish();
            if done {
                return self.finish();
            }

            next_tick += tick;
            let now = Instant::now();
            if now > next_tick + tick * 2 {
                // Too far behind: elapsed time comes from the clock, so skip
                // ahead instead of catching up
                next_tick = now;
            }
        }
    }

    fn apply(&mut self, command: RoundCommand) {
        let now = self.now_ms();
        self.engine.handle_command(command, now);
        self.publish();
    }

    fn publish(&mut self) {
        self.shared.publish(self.engine.state());
        for event in self.engine.drain_events() {
            // Nobody listening is fine.
            let _ = self.events.send(event);
        }
    }

    fn finish(&mut self) -> Option<RoundOutcome> {
        let outcome = self.engine.outcome()?;
        if let Err(e) = self.sink.submit(&outcome, self.engine.action_log()) {
            error!("result sink failed: {e}");
        }
        info!(score = outcome.score, "round loop finished");
        Some(outcome)
    }

    fn stop(&mut self) -> Option<RoundOutcome> {
        info!(
            elapsed_ms = self.engine.state().elapsed_ms(),
            "round loop stopped before the round ended"
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use zerotrust_core::bot::BotConfiguration;
    use zerotrust_core::config::EngineConfig;
    use zerotrust_core::enums::RoundPhase;

    fn bot() -> BotConfiguration {
        serde_json::from_str(
            r#"{
                "botName": "Quick Worm",
                "botType": "worm",
                "primaryTarget": "compute",
                "damageMultiplier": 2.0,
                "victoryCondition": "system_destruction",
                "threatCount": 3,
                "spawnPattern": "burst"
            }"#,
        )
        .unwrap()
    }

    /// Short round so tests finish quickly: 10 ms ticks, 1 s of round time.
    fn fast_config() -> EngineConfig {
        EngineConfig {
            tick_ms: 10,
            round_duration_ms: 1_000,
            ..Default::default()
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<LoopCommand>();
        tx.send(LoopCommand::Round(RoundCommand::Pause)).unwrap();
        tx.send(LoopCommand::Round(RoundCommand::Resume)).unwrap();
        tx.send(LoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            commands,
            vec![
                LoopCommand::Round(RoundCommand::Pause),
                LoopCommand::Round(RoundCommand::Resume),
                LoopCommand::Shutdown,
            ]
        );
    }

    #[test]
    fn test_loop_runs_round_to_completion() {
        let engine = RoundEngine::new(&bot(), b"loop", fast_config(), 0).unwrap();
        let sink = MemorySink::new();
        let handle = spawn_round_loop(engine, Box::new(sink.clone())).unwrap();

        let outcome = handle.join().unwrap().unwrap();
        // 1 s is far too short to destroy three systems.
        assert!(outcome.defender_won);
        assert!(outcome.duration_ms >= 1_000);

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].outcome, outcome);
    }

    #[test]
    fn test_pause_blocks_ticking() {
        let engine = RoundEngine::new(&bot(), b"loop", fast_config(), 0).unwrap();
        let handle = spawn_round_loop(engine, Box::new(MemorySink::new())).unwrap();

        handle.pause().unwrap();
        std::thread::sleep(Duration::from_millis(50));
        let paused = handle.latest().unwrap();
        assert_eq!(paused.phase, RoundPhase::Paused);

        std::thread::sleep(Duration::from_millis(1_200));
        let still = handle.latest().unwrap();
        assert_eq!(still.clock.tick, paused.clock.tick);
        assert!(!handle.is_finished());

        handle.resume().unwrap();
        let outcome = handle.join().unwrap().unwrap();
        assert!(outcome.duration_ms >= 1_000);
    }

    #[test]
    fn test_join_abandons_paused_round() {
        let engine = RoundEngine::new(&bot(), b"loop", EngineConfig::default(), 0).unwrap();
        let sink = MemorySink::new();
        let handle = spawn_round_loop(engine, Box::new(sink.clone())).unwrap();
        handle.pause().unwrap();

        let (done_tx, done_rx) = mpsc::channel();
        std::thread::spawn(move || {
            let _ = done_tx.send(handle.join());
        });
        let joined = done_rx.recv_timeout(Duration::from_secs(3)).unwrap();
        assert_eq!(joined.unwrap(), None);
        assert!(sink.records().is_empty());
    }

    #[test]
    fn test_shutdown_abandons_round() {
        let engine = RoundEngine::new(&bot(), b"loop", EngineConfig::default(), 0).unwrap();
        let sink = MemorySink::new();
        let handle = spawn_round_loop(engine, Box::new(sink.clone())).unwrap();
        std::thread::sleep(Duration::from_millis(250));
        assert_eq!(handle.shutdown().unwrap(), None);
        assert!(sink.records().is_empty());
    }

    #[test]
    fn test_commands_fail_after_round_ends() {
        let engine = RoundEngine::new(&bot(), b"loop", fast_config(), 0).unwrap();
        let handle = spawn_round_loop(engine, Box::new(MemorySink::new())).unwrap();
        while !handle.is_finished() {
            std::thread::sleep(Duration::from_millis(20));
        }
        assert!(matches!(handle.pause(), Err(AppError::LoopFinished)));
        let events = handle.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, RoundEvent::RoundEnded { defender_won: true })));
    }
}
