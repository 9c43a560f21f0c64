use clap::Parser;

use dry_guard::cli::{Cli, Commands};
use dry_guard::commands::{run_aggregate, run_check, run_config, run_init};
use dry_guard::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let exit_code = match &cli.command {
        Commands::Check(args) => run_check(args, &cli),
        Commands::Aggregate(args) => run_aggregate(args, &cli),
        Commands::Init(args) => run_init(args),
        Commands::Config(args) => run_config(args, &cli),
    };

    std::process::exit(exit_code);
}
