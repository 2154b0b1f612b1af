use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use u_grouping::placement::GroupSizes;
use u_grouping::roster::RosterDocument;
use u_grouping::summary::Summary;
use u_grouping::trials::{GroupingConfig, TrialRunner};
use u_grouping::GroupingError;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "groupsort: split a roster into groups honoring friend preferences",
    long_about = None
)]
struct Cli {
    /// Roster document (JSON with "users", "preferences", "anti_preferences").
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Group capacities, e.g. "30-25-20".
    #[arg(short, long, value_name = "A-B-C")]
    sizes: GroupSizes,

    /// Run 10^N trials.
    #[arg(short = 'p', long, value_name = "N", default_value_t = 3)]
    trials_exp: u32,

    /// Only enforce total capacity; groups are single-gender.
    #[arg(long)]
    one_gender: bool,

    /// Show identities instead of display names.
    #[arg(long)]
    use_identity_names: bool,

    /// Seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Run trials on the current thread only.
    #[arg(long)]
    sequential: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn config(&self) -> GroupingConfig {
        let config = GroupingConfig::new(self.sizes.clone())
            .with_trial_exponent(self.trials_exp)
            .with_one_gender(self.one_gender)
            .with_identity_names(self.use_identity_names)
            .with_parallel(!self.sequential);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), GroupingError> {
    let config = cli.config();
    config.validate()?;

    let roster = RosterDocument::from_json_file(&cli.input)?.into_roster()?;
    info!(
        input = %cli.input.display(),
        identities = roster.len(),
        participants = roster.universe().len(),
        exclusions = roster.exclusion_count(),
        "roster loaded"
    );

    let run = TrialRunner::run(&roster, &config)?;
    let summary = Summary::new(&roster, &run.best, config.display_names());

    if cli.json {
        let output = serde_json::json!({
            "seed": run.seed,
            "trials_run": run.trials_run,
            "best_trial": run.best_trial,
            "fitness": run.fitness,
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{summary}");
        println!(
            "Best of {} trials (trial {}, seed {})",
            run.trials_run, run.best_trial, run.seed
        );
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("u_grouping=info,groupsort=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from([
            "groupsort",
            "--input",
            "roster.json",
            "--sizes",
            "3-5-4",
            "-p",
            "2",
            "--one-gender",
            "--seed",
            "9",
            "--sequential",
        ])
        .unwrap();

        let config = cli.config();
        assert_eq!(config.sizes.as_slice(), &[5, 4, 3]);
        assert_eq!(config.trial_count(), 100);
        assert!(config.one_gender);
        assert_eq!(config.seed, Some(9));
        assert!(!config.parallel);
        assert!(!cli.json);
    }

    #[test]
    fn test_rejects_bad_sizes() {
        let result = Cli::try_parse_from(["groupsort", "-i", "r.json", "-s", "3-x"]);
        assert!(result.is_err());
    }
}
