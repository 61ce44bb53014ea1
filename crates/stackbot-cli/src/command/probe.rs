use stackbot_client::GameApi as _;

use super::EndpointArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ProbeArg {
    #[command(flatten)]
    pub(crate) endpoint: EndpointArg,
}

pub(crate) fn run(arg: &ProbeArg) {
    arg.endpoint.connect().probe();
}
