use clap::Parser;
use env_logger::Env;

use tally::cli::{self, Cli, Commands};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let file = cli.file;

    let result = match cli.command {
        Commands::Init => cli::init::run(file),
        Commands::Add {
            amount,
            category,
            date,
            description,
        } => cli::add::run(file, &amount, &category, date.as_deref(), &description),
        Commands::Report { range } => cli::report::transactions(file, &range),
        Commands::Breakdown { range, by_category } => cli::report::breakdown(file, &range, by_category),
        Commands::Series {
            range,
            granularity,
            cumulative,
            categories,
        } => cli::series::run(file, &range, granularity, cumulative, categories),
        Commands::Status => cli::status::run(file),
        Commands::Use { path } => cli::init::use_file(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
