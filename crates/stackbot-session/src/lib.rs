//! Polling session driver.
//!
//! [`SessionDriver`] owns one [`GameApi`](stackbot_client::GameApi) connection
//! and one [`MovePlanner`](stackbot_evaluator::move_planner::MovePlanner). Each
//! tick it refreshes the server status when due, reacts to pause and game-over
//! states, and otherwise fetches the board and dispatches the planner's command.
//!
//! ```text
//! Starting ──start()──► Playing ◄──────► Paused
//!                         ▲  │
//!                         │  ▼
//!                        GameOver          (any) ──stop()──► Stopped
//! ```

pub use self::{driver::*, state::*, stats::*};

mod driver;
mod state;
mod stats;
