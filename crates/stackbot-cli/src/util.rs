use std::{fs::File, io, path::Path};

use anyhow::Context;
use stackbot_client::schema::MatrixReport;
use stackbot_core::Snapshot;
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence; otherwise the level is `debug` or `info`.
pub fn init_logging(debug: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to install log subscriber: {err}"))
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Reads a saved `/matrix` response body.
pub fn read_matrix_file<P>(path: P) -> anyhow::Result<Snapshot>
where
    P: AsRef<Path>,
{
    let report: MatrixReport = read_json_file("matrix", path)?;
    Ok(report.into_snapshot())
}
