use super::args::{Cli, Commands};
use super::handlers;
use crate::logging::init_logging;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.log_level);

    match cli.command {
        Commands::Convert { log, output, run } => handlers::convert::handle(&log, output, &run),
        Commands::Populate { logs_dir, run } => handlers::populate::handle(&logs_dir, &run),
        Commands::Validate { trajectory } => handlers::validate::handle(&trajectory),
    }
}
