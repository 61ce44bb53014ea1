use std::{
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::{Duration, Instant},
};

use rand::Rng;
use rand_pcg::Pcg32;
use stackbot_client::GameApi;
use stackbot_core::Command;
use stackbot_evaluator::move_planner::MovePlanner;
use tracing::{debug, info, warn};

use crate::{GameStatus, SessionState, SessionStats};

/// Timing and failure limits for [`SessionDriver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Minimum time between two status requests.
    pub status_interval: Duration,
    /// Minimum time between two `RESUME` attempts while paused.
    pub resume_interval: Duration,
    /// Minimum time between two `RESTART` attempts after game over.
    pub restart_interval: Duration,
    /// Delay after a playing tick.
    pub tick_delay: Duration,
    /// Delay after a paused or game-over tick.
    pub idle_delay: Duration,
    /// Consecutive ticks without a board before the connectivity probe runs.
    pub max_consecutive_failures: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            status_interval: Duration::from_secs(1),
            resume_interval: Duration::from_secs(3),
            restart_interval: Duration::from_secs(5),
            tick_delay: Duration::from_millis(200),
            idle_delay: Duration::from_secs(1),
            max_consecutive_failures: 5,
        }
    }
}

#[derive(Debug)]
pub struct SessionDriver<A, R = Pcg32> {
    api: A,
    planner: MovePlanner<R>,
    config: DriverConfig,
    state: SessionState,
    stats: SessionStats,
    last_status_check: Option<Instant>,
    last_recovery_attempt: Option<Instant>,
    consecutive_failures: u32,
}

impl<A, R> SessionDriver<A, R>
where
    A: GameApi,
    R: Rng,
{
    #[must_use]
    pub fn new(api: A, planner: MovePlanner<R>, config: DriverConfig) -> Self {
        Self {
            api,
            planner,
            config,
            state: SessionState::Starting,
            stats: SessionStats::new(),
            last_status_check: None,
            last_recovery_attempt: None,
            consecutive_failures: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    #[must_use]
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    #[must_use]
    pub fn planner(&self) -> &MovePlanner<R> {
        &self.planner
    }

    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut A {
        &mut self.api
    }

    #[must_use]
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Restarts the remote game and enters [`SessionState::Playing`].
    ///
    /// A failed restart runs the connectivity probe but does not prevent play.
    /// Does nothing unless the driver is still starting.
    pub fn start(&mut self) {
        if !self.state.is_starting() {
            return;
        }
        info!("starting session");
        if !self.dispatch(Command::Restart) {
            warn!("failed to restart game, checking API connectivity");
            self.probe();
        }
        self.enter(SessionState::Playing);
    }

    /// Runs one iteration and returns the delay before the next one.
    pub fn tick(&mut self, now: Instant) -> Duration {
        match self.state {
            SessionState::Stopped => return self.config.idle_delay,
            SessionState::Starting => self.start(),
            SessionState::Playing | SessionState::Paused | SessionState::GameOver => {}
        }
        self.stats.record_tick();

        if self.is_status_due(now) {
            self.refresh_status(now);
        }

        match self.state {
            SessionState::Paused => {
                self.attempt_recovery(Command::Resume, self.config.resume_interval, now);
                self.config.idle_delay
            }
            SessionState::GameOver => {
                self.attempt_recovery(Command::Restart, self.config.restart_interval, now);
                self.config.idle_delay
            }
            SessionState::Starting | SessionState::Playing | SessionState::Stopped => {
                self.play();
                self.config.tick_delay
            }
        }
    }

    /// Stops the session. No further requests are made.
    pub fn stop(&mut self) {
        if self.state.is_stopped() {
            return;
        }
        self.enter(SessionState::Stopped);
        self.stats.log_summary();
    }

    /// Ticks until `running` is cleared, then stops.
    ///
    /// The flag is checked between iterations, so an in-flight request always
    /// completes first.
    pub fn run(&mut self, running: &AtomicBool) {
        self.start();
        while running.load(Ordering::SeqCst) && !self.state.is_stopped() {
            let delay = self.tick(Instant::now());
            thread::sleep(delay);
        }
        self.stop();
    }

    fn is_status_due(&self, now: Instant) -> bool {
        self.last_status_check
            .is_none_or(|last| now.saturating_duration_since(last) >= self.config.status_interval)
    }

    fn refresh_status(&mut self, now: Instant) {
        self.last_status_check = Some(now);
        let report = match self.api.status() {
            Ok(report) => report,
            Err(err) => {
                warn!(error = %err, "failed to fetch game status");
                return;
            }
        };

        let next = GameStatus::classify(report.state()).session_state();
        if next == self.state {
            return;
        }
        if self.state.is_game_over() {
            debug!("resetting planner after game over");
            self.planner.reset();
        }
        if next.is_paused() || next.is_game_over() {
            // the first recovery attempt waits one full interval
            self.last_recovery_attempt = Some(now);
        }
        self.enter(next);
    }

    fn enter(&mut self, next: SessionState) {
        info!(from = ?self.state, to = ?next, "session state changed");
        self.state = next;
    }

    fn attempt_recovery(&mut self, command: Command, interval: Duration, now: Instant) {
        let due = self
            .last_recovery_attempt
            .is_none_or(|last| now.saturating_duration_since(last) >= interval);
        if !due {
            return;
        }
        info!(%command, state = ?self.state, "attempting to recover session");
        self.dispatch(command);
        self.last_recovery_attempt = Some(now);
    }

    fn play(&mut self) {
        let snapshot = match self.api.matrix() {
            Ok(snapshot) if !snapshot.is_empty() => Some(snapshot),
            Ok(_) => None,
            Err(err) => {
                warn!(error = %err, "failed to fetch board");
                None
            }
        };
        self.stats.record_snapshot(snapshot.is_some());

        let Some(snapshot) = snapshot else {
            self.consecutive_failures += 1;
            warn!(
                failures = self.consecutive_failures,
                max = self.config.max_consecutive_failures,
                "no board data received"
            );
            if self.consecutive_failures >= self.config.max_consecutive_failures {
                warn!("too many missing boards, checking API connectivity");
                self.probe();
                self.consecutive_failures = 0;
            }
            return;
        };

        self.consecutive_failures = 0;
        debug!("board:\n{}", snapshot.render());
        let command = self.planner.decide_move(Some(snapshot));
        self.dispatch(command);
    }

    fn dispatch(&mut self, command: Command) -> bool {
        match self.api.send_command(command) {
            Ok(_) => {
                info!(%command, "command sent");
                self.stats.record_command(command, true);
                true
            }
            Err(err) => {
                warn!(%command, error = %err, "failed to send command");
                self.stats.record_command(command, false);
                false
            }
        }
    }

    fn probe(&mut self) {
        self.stats.record_probe();
        self.api.probe();
    }
}
