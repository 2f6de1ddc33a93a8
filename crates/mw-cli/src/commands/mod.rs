use mw_config::MeshConfig;

use crate::cli::{Commands, GlobalFlags};

pub mod classify;
pub mod consensus;
pub mod inputs;
pub mod report;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, config: &MeshConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Consensus(args) => consensus::handle(&args, config, flags),
        Commands::Classify(args) => classify::handle(&args, config, flags),
        Commands::Inputs(args) => inputs::handle(&args, config, flags),
        Commands::Report(args) => report::handle(&args, config, flags),
    }
}
