use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use anyhow::Context;
use stackbot_evaluator::move_planner::MovePlanner;
use stackbot_session::{DriverConfig, SessionDriver};

use super::EndpointArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[command(flatten)]
    pub(crate) endpoint: EndpointArg,
    /// Seed for the planner's random source (entropy if omitted)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { endpoint, seed } = arg;

    let api = endpoint.connect();
    let planner = match seed {
        Some(seed) => MovePlanner::from_seed(*seed),
        None => MovePlanner::from_entropy(),
    };
    tracing::info!(
        server = %api.endpoint().origin(),
        api_path = %endpoint.api_path,
        session_id = %endpoint.session_id,
        "starting bot"
    );

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || {
            tracing::info!("interrupt received, stopping");
            running.store(false, Ordering::SeqCst);
        })
        .context("Failed to install Ctrl+C handler")?;
    }

    let mut driver = SessionDriver::new(api, planner, DriverConfig::default());
    driver.run(&running);
    Ok(())
}
