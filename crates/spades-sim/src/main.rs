use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

use spades_core::AppInfo;
use spades_core::analysis::NilRule;
use spades_sim::config::SimulationConfig;
use spades_sim::logging::init_logging;
use spades_sim::runner::{ExposureRunner, NilRunner, RunOptions};

/// Spades heart-suit simulator.
#[derive(Debug, Parser)]
#[command(
    name = AppInfo::name(),
    author,
    version = AppInfo::version(),
    about = AppInfo::description()
)]
struct Cli {
    /// Log every deal and every nil heart trick.
    #[arg(short, long)]
    verbose: bool,

    /// Trials to add per combination, or the per-combination target with --nil.
    #[arg(short, long, value_name = "COUNT")]
    iterations: Option<u64>,

    /// Print stored results without running any trials.
    #[arg(short, long)]
    show_only: bool,

    /// Simulate nil bids instead of honor exposure.
    #[arg(short, long)]
    nil: bool,

    /// Restrict the nil run to one combination, e.g. "JH,KH".
    #[arg(short, long, value_name = "CARDS", requires = "nil")]
    only: Option<String>,

    /// Count an opponent's spade or higher heart as covering the nil.
    #[arg(short, long, requires = "nil")]
    force: bool,

    /// Seed for reproducible runs.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Worker threads (0 lets the pool decide).
    #[arg(long, value_name = "COUNT")]
    threads: Option<usize>,

    /// Optional YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the state file used by the selected mode.
    #[arg(long, value_name = "FILE")]
    state: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => SimulationConfig::from_path(path)?,
        None => SimulationConfig::default(),
    };

    if let Some(iterations) = cli.iterations {
        config.iterations = iterations;
    }

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    if let Some(threads) = cli.threads {
        config.threads = threads;
    }

    let rule = if cli.force {
        NilRule::OpponentsForced
    } else {
        NilRule::Standard
    };

    if let Some(state) = cli.state {
        match (cli.nil, rule) {
            (false, _) => config.state.exposure = state,
            (true, NilRule::Standard) => config.state.nil = state,
            (true, NilRule::OpponentsForced) => config.state.nil_forced = state,
        }
    }

    config.validate()?;

    let _logging_guard = init_logging(&config.logging, cli.verbose)?;

    let options = RunOptions {
        iterations: config.iterations,
        seed: config.seed,
        threads: config.threads,
        show_only: cli.show_only,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let summary = if cli.nil {
        let mut runner = NilRunner::new(options, rule, config.state.nil_path(rule));
        if let Some(only) = cli.only.as_deref() {
            runner = runner.only(only)?;
        }
        runner.run(&mut out)?.1
    } else {
        ExposureRunner::new(options, &config.state.exposure)
            .run(&mut out)?
            .1
    };
    out.flush()?;

    tracing::info!(
        combinations = summary.combinations,
        trials = summary.trials_run,
        "run complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_metadata_comes_from_app_info() {
        let command = Cli::command();
        command.clone().debug_assert();
        assert_eq!(command.get_name(), AppInfo::name());
        assert_eq!(command.get_version(), Some(AppInfo::version()));
    }

    #[test]
    fn only_and_force_require_nil_mode() {
        assert!(Cli::try_parse_from(["spades", "--only", "JH,KH"]).is_err());
        let cli = Cli::try_parse_from(["spades", "-n", "-f", "-o", "JH,KH", "-v"]).expect("parses");
        assert!(cli.nil && cli.force && cli.verbose);
        assert_eq!(cli.only.as_deref(), Some("JH,KH"));
    }
}
