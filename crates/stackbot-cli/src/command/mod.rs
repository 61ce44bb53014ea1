use std::time::Duration;

use clap::{Parser, Subcommand};
use stackbot_client::{Endpoint, HttpGameApi, Protocol};

use crate::util;

use self::{analyze::AnalyzeArg, play::PlayArg, probe::ProbeArg, send::SendArg};

mod analyze;
mod play;
mod probe;
mod send;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct CommandArgs {
    /// Enable debug output (`RUST_LOG` overrides this)
    #[arg(long, global = true)]
    debug: bool,
    /// What mode to run the program in (defaults to `run`)
    #[command(subcommand)]
    mode: Option<Mode>,
    #[command(flatten)]
    play: PlayArg,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play the remote game until interrupted
    Run(#[clap(flatten)] PlayArg),
    /// Analyze a saved board and print the planner's decision
    Analyze(#[clap(flatten)] AnalyzeArg),
    /// Check connectivity to the server and exit
    Probe(#[clap(flatten)] ProbeArg),
    /// Send a single command to the session
    Send(#[clap(flatten)] SendArg),
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EndpointArg {
    /// Protocol used to reach the server (http or https)
    #[arg(long = "http-protocol", default_value = "https")]
    protocol: Protocol,
    /// Server host name
    #[arg(short, long, default_value = "tetris-server.example.com")]
    server: String,
    /// Server port
    #[arg(short, long, default_value_t = 3001)]
    port: u16,
    /// Game session id
    #[arg(short = 'i', long, default_value = "my-bot-session")]
    session_id: String,
    /// Path prefix in front of the session id
    #[arg(long, default_value = "/api/tetris/")]
    api_path: String,
    /// Timeout applied to each request, in milliseconds
    #[arg(long, default_value_t = 3000)]
    timeout_ms: u64,
}

impl EndpointArg {
    fn endpoint(&self) -> Endpoint {
        Endpoint {
            protocol: self.protocol,
            host: self.server.clone(),
            port: self.port,
            api_path: self.api_path.clone(),
            session_id: self.session_id.clone(),
        }
    }

    fn connect(&self) -> HttpGameApi {
        HttpGameApi::new(self.endpoint(), Duration::from_millis(self.timeout_ms))
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    util::init_logging(args.debug)?;
    match args.mode.unwrap_or(Mode::Run(args.play)) {
        Mode::Run(arg) => play::run(&arg)?,
        Mode::Analyze(arg) => analyze::run(&arg)?,
        Mode::Probe(arg) => probe::run(&arg),
        Mode::Send(arg) => send::run(&arg)?,
    }
    Ok(())
}
