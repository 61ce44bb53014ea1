use stackbot_core::Command;

/// Counters collected over one driver run.
///
/// Tracked metrics:
///
/// - **Ticks**: loop iterations while the session was live
/// - **Snapshots**: boards received, and boards that were missing or failed to load
/// - **Commands**: dispatched commands per kind, and dispatches that failed
/// - **Recovery**: resume and restart attempts, connectivity probes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    ticks: u64,
    snapshots: u64,
    missed_snapshots: u64,
    command_counter: [u64; Command::ALL.len()],
    failed_commands: u64,
    resume_attempts: u64,
    restart_attempts: u64,
    probes: u64,
}

impl SessionStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ticks: 0,
            snapshots: 0,
            missed_snapshots: 0,
            command_counter: [0; Command::ALL.len()],
            failed_commands: 0,
            resume_attempts: 0,
            restart_attempts: 0,
            probes: 0,
        }
    }

    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub const fn snapshots(&self) -> u64 {
        self.snapshots
    }

    #[must_use]
    pub const fn missed_snapshots(&self) -> u64 {
        self.missed_snapshots
    }

    /// Successfully dispatched commands of the given kind.
    #[must_use]
    pub const fn commands(&self, command: Command) -> u64 {
        self.command_counter[command as usize]
    }

    #[must_use]
    pub fn total_commands(&self) -> u64 {
        self.command_counter.iter().sum()
    }

    #[must_use]
    pub const fn failed_commands(&self) -> u64 {
        self.failed_commands
    }

    #[must_use]
    pub const fn resume_attempts(&self) -> u64 {
        self.resume_attempts
    }

    #[must_use]
    pub const fn restart_attempts(&self) -> u64 {
        self.restart_attempts
    }

    #[must_use]
    pub const fn probes(&self) -> u64 {
        self.probes
    }

    pub(crate) fn record_tick(&mut self) {
        self.ticks += 1;
    }

    pub(crate) fn record_snapshot(&mut self, received: bool) {
        if received {
            self.snapshots += 1;
        } else {
            self.missed_snapshots += 1;
        }
    }

    pub(crate) fn record_command(&mut self, command: Command, delivered: bool) {
        if delivered {
            self.command_counter[command as usize] += 1;
        } else {
            self.failed_commands += 1;
        }
        match command {
            Command::Resume => self.resume_attempts += 1,
            Command::Restart => self.restart_attempts += 1,
            _ => {}
        }
    }

    pub(crate) fn record_probe(&mut self) {
        self.probes += 1;
    }

    /// Logs all counters at `info` level.
    pub fn log_summary(&self) {
        tracing::info!(
            ticks = self.ticks,
            snapshots = self.snapshots,
            missed_snapshots = self.missed_snapshots,
            commands = self.total_commands(),
            failed_commands = self.failed_commands,
            resume_attempts = self.resume_attempts,
            restart_attempts = self.restart_attempts,
            probes = self.probes,
            "session summary"
        );
        for command in Command::ALL {
            let count = self.commands(command);
            if count > 0 {
                tracing::info!(%command, count, "commands dispatched");
            }
        }
    }
}
