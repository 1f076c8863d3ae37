//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use salfit_search::{Affine, SearchConfig};
use std::path::PathBuf;

/// Salfit - Fit salary curves to reference quartiles by Monte-Carlo validated hill climbing.
#[derive(Debug, Parser)]
#[command(name = "salfit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.salfit/config.toml)
    #[arg(short, long, global = true, env = "SALFIT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (score only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search for the curves that best fit the reference
    Fit(FitArgs),

    /// Score one explicit set of curves
    Evaluate(EvaluateArgs),

    /// Fit a single factor applied to the reference itself
    Baseline(BaselineArgs),

    /// Show the reference dataset
    Reference(ReferenceArgs),
}

/// Options shared by commands that run evaluations.
#[derive(Debug, Clone, Parser)]
pub struct SearchArgs {
    /// Random seed
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Salaries simulated per unit profile at each evaluation
    #[arg(long)]
    pub samples: Option<usize>,

    /// Reference dataset file (TOML); the built-in dataset is used otherwise
    #[arg(short, long)]
    pub reference: Option<PathBuf>,
}

impl SearchArgs {
    /// Apply the command-line overrides on top of `config`.
    pub fn apply(&self, mut config: SearchConfig) -> SearchConfig {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(samples) = self.samples {
            config.samples_per_profile = samples;
        }
        config
    }
}

/// Arguments for the fit command.
#[derive(Debug, Parser)]
pub struct FitArgs {
    /// Number of iterations; runs until Ctrl+C when omitted
    #[arg(short = 'n', long)]
    pub iterations: Option<usize>,

    /// Configuration preset replacing the [search] section of the config file
    #[arg(short, long, value_enum)]
    pub preset: Option<PresetArg>,

    /// Print every improvement as it happens
    #[arg(long)]
    pub progress: bool,

    #[command(flatten)]
    pub search: SearchArgs,
}

/// Arguments for the evaluate command.
#[derive(Debug, Parser)]
pub struct EvaluateArgs {
    /// Q1 curve as SLOPE,INTERCEPT
    #[arg(long, value_parser = parse_curve, allow_hyphen_values = true)]
    pub q1: Affine,

    /// Mean curve as SLOPE,INTERCEPT
    #[arg(long, value_parser = parse_curve, allow_hyphen_values = true)]
    pub mean: Affine,

    /// Q3 curve as SLOPE,INTERCEPT
    #[arg(long, value_parser = parse_curve, allow_hyphen_values = true)]
    pub q3: Affine,

    #[command(flatten)]
    pub search: SearchArgs,
}

/// Arguments for the baseline command.
#[derive(Debug, Parser)]
pub struct BaselineArgs {
    /// Number of iterations of the factor search
    #[arg(short = 'n', long, default_value_t = 200)]
    pub iterations: usize,

    /// Score this factor instead of searching one
    #[arg(long, conflicts_with = "iterations")]
    pub factor: Option<f64>,

    #[command(flatten)]
    pub search: SearchArgs,
}

/// Arguments for the reference command.
#[derive(Debug, Parser)]
pub struct ReferenceArgs {
    /// Reference dataset file (TOML)
    #[arg(short, long)]
    pub reference: Option<PathBuf>,

    /// Expand aggregated profiles into unit profiles
    #[arg(long)]
    pub split: bool,
}

/// Search configuration presets.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PresetArg {
    /// Fewer samples, coarser steps
    Quick,
    /// Reference settings
    Default,
    /// More samples, slower adaptation
    Thorough,
}

impl From<PresetArg> for SearchConfig {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Quick => SearchConfig::quick(),
            PresetArg::Default => SearchConfig::default(),
            PresetArg::Thorough => SearchConfig::thorough(),
        }
    }
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

/// Parse `SLOPE,INTERCEPT` into a curve.
pub fn parse_curve(value: &str) -> Result<Affine, String> {
    let (slope, intercept) = value
        .split_once(',')
        .ok_or_else(|| format!("expected SLOPE,INTERCEPT, got '{}'", value))?;
    let slope: f64 = slope
        .trim()
        .parse()
        .map_err(|e| format!("invalid slope '{}': {}", slope.trim(), e))?;
    let intercept: f64 = intercept
        .trim()
        .parse()
        .map_err(|e| format!("invalid intercept '{}': {}", intercept.trim(), e))?;
    Ok(Affine::from_slope_intercept(slope, intercept))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_curve() {
        assert_eq!(parse_curve("0.5,29"), Ok(Affine::from_slope_intercept(0.5, 29.0)));
        assert_eq!(parse_curve(" -1.5 , 3 "), Ok(Affine::from_slope_intercept(-1.5, 3.0)));
        assert!(parse_curve("0.5").is_err());
        assert!(parse_curve("a,1").is_err());
    }

    #[test]
    fn test_fit_args() {
        let cli = Cli::try_parse_from(["salfit", "--format", "json", "fit", "-n", "50", "--seed", "3", "--progress"]).unwrap();
        match cli.command {
            Command::Fit(args) => {
                assert_eq!(args.iterations, Some(50));
                assert!(args.progress);
                let config = args.search.apply(SearchConfig::default());
                assert_eq!(config.seed, 3);
                assert_eq!(config.samples_per_profile, 10_000);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(matches!(cli.format, Some(CliFormat::Json)));
    }

    #[test]
    fn test_evaluate_args() {
        let cli = Cli::try_parse_from([
            "salfit", "evaluate", "--q1", "-0.5,30", "--mean", "0.5,34", "--q3", "0.6,38", "--samples", "100",
        ])
        .unwrap();
        match cli.command {
            Command::Evaluate(args) => {
                assert_eq!(args.q1, Affine::from_slope_intercept(-0.5, 30.0));
                assert_eq!(args.search.samples, Some(100));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_evaluate_requires_curves() {
        assert!(Cli::try_parse_from(["salfit", "evaluate", "--q1", "1,1"]).is_err());
    }

    #[test]
    fn test_baseline_args() {
        let cli = Cli::try_parse_from(["salfit", "baseline", "--seed", "4"]).unwrap();
        match cli.command {
            Command::Baseline(args) => {
                assert_eq!(args.iterations, 200);
                assert_eq!(args.factor, None);
                assert_eq!(args.search.seed, Some(4));
            }
            other => panic!("unexpected command {:?}", other),
        }

        let cli = Cli::try_parse_from(["salfit", "baseline", "--factor", "1.1"]).unwrap();
        assert!(matches!(cli.command, Command::Baseline(BaselineArgs { factor: Some(f), .. }) if f == 1.1));
        assert!(Cli::try_parse_from(["salfit", "baseline", "--factor", "1.1", "-n", "5"]).is_err());
    }

    #[test]
    fn test_presets() {
        assert_eq!(SearchConfig::from(PresetArg::Quick), SearchConfig::quick());
        assert_eq!(SearchConfig::from(PresetArg::Thorough).samples_per_profile, 50_000);
    }
}
