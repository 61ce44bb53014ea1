use anyhow::Context;
use stackbot_client::GameApi as _;
use stackbot_core::Command;

use super::EndpointArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SendArg {
    /// Command to send (LEFT, RIGHT, DOWN, DROP, ROTATE_CW, ROTATE_CCW, RESTART, RESUME)
    pub(crate) command: Command,
    #[command(flatten)]
    pub(crate) endpoint: EndpointArg,
}

pub(crate) fn run(arg: &SendArg) -> anyhow::Result<()> {
    let SendArg { command, endpoint } = arg;

    let mut api = endpoint.connect();
    let response = api
        .send_command(*command)
        .with_context(|| format!("Failed to send {command}"))?;
    match response {
        Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        None => println!("{command} accepted (no JSON body)"),
    }
    Ok(())
}
