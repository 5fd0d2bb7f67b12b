//! Timer-driven scheduler for CPU moves.

use crate::cpu::CpuPolicy;
use crate::events::GameEvent;
use crate::game::GameEngine;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, instrument};

/// How often the scheduler checks whether the CPU should move.
pub const POLL_INTERVAL: Duration = Duration::from_millis(300);

/// Thinking time between arming a CPU move and playing it.
pub const CPU_MOVE_DELAY: Duration = Duration::from_millis(700);

/// Polls a shared engine and plays CPU moves after a fixed thinking delay.
///
/// Each poll checks vs-CPU mode, CPU turn, and game-in-progress; when all
/// hold a one-shot trigger is armed. At most one trigger is pending at a
/// time. Arming records the engine epoch: a reset, mode change, or
/// starting-player reroll bumps the epoch, which disarms the trigger at the
/// next tick and, as a second line, is re-verified before the move lands.
/// The engine mutex makes each CPU move a single atomic state update, never
/// interleaved with a human placement.
pub struct CpuScheduler {
    engine: Arc<Mutex<GameEngine>>,
    policy: Box<dyn CpuPolicy>,
    poll_interval: Duration,
    move_delay: Duration,
}

impl CpuScheduler {
    /// Creates a scheduler with the standard timing.
    pub fn new(engine: Arc<Mutex<GameEngine>>, policy: Box<dyn CpuPolicy>) -> Self {
        Self {
            engine,
            policy,
            poll_interval: POLL_INTERVAL,
            move_delay: CPU_MOVE_DELAY,
        }
    }

    /// Overrides the poll interval and thinking delay.
    pub fn with_timing(mut self, poll_interval: Duration, move_delay: Duration) -> Self {
        self.poll_interval = poll_interval;
        self.move_delay = move_delay;
        self
    }

    /// Spawns the scheduler onto the current runtime.
    pub fn spawn(self) -> SchedulerHandle {
        SchedulerHandle {
            task: tokio::spawn(self.run()),
        }
    }

    #[instrument(skip(self))]
    async fn run(mut self) {
        let mut poll = time::interval(self.poll_interval);
        poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // Epoch the pending move was armed under, and when it fires.
        let mut armed: Option<(u64, Instant)> = None;

        loop {
            match armed {
                None => {
                    poll.tick().await;
                    let engine = self.engine.lock().unwrap();
                    if engine.cpu_turn_ready() {
                        debug!(epoch = engine.epoch(), "arming CPU move");
                        engine.notify(GameEvent::CpuThinking);
                        armed = Some((engine.epoch(), Instant::now() + self.move_delay));
                    }
                }
                Some((epoch, deadline)) => {
                    tokio::select! {
                        _ = poll.tick() => {
                            let engine = self.engine.lock().unwrap();
                            if engine.epoch() != epoch {
                                debug!("pending CPU move disarmed");
                                armed = None;
                            }
                        }
                        _ = time::sleep_until(deadline) => {
                            let mut engine = self.engine.lock().unwrap();
                            if engine.epoch() == epoch && engine.cpu_turn_ready() {
                                engine.apply_cpu_move(self.policy.as_mut());
                            } else {
                                debug!("stale CPU trigger dropped");
                            }
                            armed = None;
                        }
                    }
                }
            }
        }
    }
}

/// Handle to a spawned scheduler task.
///
/// Canceling stops the recurring poll and any armed one-shot trigger;
/// nothing fires afterwards. Canceling twice, or after the task already
/// stopped, is safe.
#[derive(Debug)]
pub struct SchedulerHandle {
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stops the scheduler. Idempotent.
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// True once the task has fully stopped.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
