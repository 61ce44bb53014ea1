use std::path::PathBuf;

use stackbot_core::Snapshot;
use stackbot_evaluator::{move_planner::MovePlanner, snapshot_analysis::SnapshotAnalysis};

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AnalyzeArg {
    /// Saved `/matrix` response (JSON)
    matrix_path: PathBuf,
    /// Response polled one tick earlier, used to estimate the falling piece
    #[arg(long)]
    previous: Option<PathBuf>,
    /// Seed for the planner's random source
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let AnalyzeArg {
        matrix_path,
        previous,
        seed,
    } = arg;

    let current = util::read_matrix_file(matrix_path)?;
    let previous = previous
        .as_ref()
        .map(util::read_matrix_file)
        .transpose()?;

    let analysis = SnapshotAnalysis::from_snapshots(&current, previous.as_ref());
    print_analysis(&current, &analysis);

    // Replaying the previous board first leaves the planner exactly where the
    // live driver would be on the second tick.
    let mut planner = MovePlanner::from_seed(*seed);
    if let Some(previous) = previous {
        planner.decide_move(Some(previous));
    }
    let command = planner.decide_move(Some(current));
    println!("Next command: {command}");
    let pending = planner
        .pending_actions()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    if !pending.is_empty() {
        println!("Queued: {}", pending.join(", "));
    }

    Ok(())
}

fn print_analysis(snapshot: &Snapshot, analysis: &SnapshotAnalysis) {
    let board = analysis.board_analysis();

    println!("{}", snapshot.render());
    println!("Column heights: {:?}", board.column_heights());
    println!("Holes: {}", board.num_holes());
    println!("Bumpiness: {}", board.surface_bumpiness());
    println!(
        "Lowest column: {}, highest column: {}",
        board.min_height_column(),
        board.max_height_column()
    );
    for line in board.potential_lines() {
        println!(
            "Potential line {}: {} cells filled, target column {}",
            line.line(),
            line.filled_cells(),
            line.target_column()
        );
    }
    match analysis.active_piece() {
        Some(piece) => {
            let cells = piece
                .cells()
                .iter()
                .map(|cell| format!("({}, {})", cell.line, cell.column))
                .collect::<Vec<_>>();
            println!("Active piece: {}", cells.join(" "));
        }
        None => println!("Active piece: unknown"),
    }
}
