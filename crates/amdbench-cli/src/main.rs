use std::process::ExitCode;

use clap::Parser;

mod cli;
mod cmd;
mod error;
mod io;
mod logging;

pub use cli::*;

use error::CliError;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(logging::default_level(cli.quiet, cli.verbose)) {
        let err = CliError::Logging {
            detail: e.to_string(),
        };
        eprintln!("{}", err.message());
        return ExitCode::from(err.exit_code());
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(exit_code = e.exit_code(), "command failed");
            eprintln!("{}", e.message());
            ExitCode::from(e.exit_code())
        }
    }
}

/// Dispatches the parsed command.
fn run(cli: &Cli) -> Result<(), CliError> {
    let config = cmd::load_config(cli)?;
    match &cli.command {
        Command::Generate {
            topology,
            vertex_count,
            output,
            max_weight,
            density,
            seed,
            show,
        } => cmd::generate::run(
            &cmd::generate::GenerateArgs {
                topology,
                vertex_count: *vertex_count,
                output,
                max_weight: *max_weight,
                density: *density,
                seed: *seed,
                show: *show,
            },
            &config.test_dir,
            cli.quiet,
        ),
        Command::Suite { seed } => cmd::suite::run(*seed, &config.test_dir, cli.quiet),
        Command::Bench {
            repetitions,
            threads,
            suffix,
            sequential,
            concurrent,
            speedup,
        } => {
            let args = cmd::bench::BenchArgs {
                repetitions: *repetitions,
                threads: threads.clone(),
                suffix: suffix.clone(),
                sequential: sequential.clone(),
                concurrent: concurrent.clone(),
                speedup: speedup.map(Into::into),
            };
            cmd::bench::run(&args, config, cli.quiet)
        }
        Command::Table { csv, speedup } => {
            let policy = speedup.map_or(config.speedup_policy, Into::into);
            let csv = csv.as_deref().unwrap_or(&config.results_csv);
            cmd::table::run(csv, &config.table_path, policy, cli.quiet)
        }
        Command::Show { file, save, title } => {
            cmd::show::run(file, save.as_deref(), title.as_deref(), cli.quiet)
        }
    }
}
