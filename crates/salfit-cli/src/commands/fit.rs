//! Fit command implementation.

use super::run_interruptible;
use crate::cli::FitArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::reference::load_reference;
use crate::sink::ConsoleSink;
use salfit_search::{FitWorker, HillClimber, SearchConfig};

/// Execute the fit command.
pub async fn execute_fit(args: FitArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let base = args.preset.map(SearchConfig::from).unwrap_or_else(|| config.search.clone());
    let search = args.search.apply(base);

    let path = args.search.reference.as_deref().or(config.settings.reference.as_deref());
    let reference = load_reference(path)?;

    let mut climber = HillClimber::new(reference, &search)?;
    if args.progress {
        climber.add_sink(Box::new(ConsoleSink::new(formatter.clone())));
    }

    match args.iterations {
        Some(iterations) => {
            climber = run_interruptible(climber, iterations, HillClimber::run).await?;
        }
        None => {
            eprintln!("{}", formatter.info("Searching until Ctrl+C"));
            let mut worker = FitWorker::new(climber);
            worker.run().await?;
            climber = worker.into_inner();
        }
    }

    let best = climber
        .best()
        .ok_or_else(|| CliError::InvalidInput("no iteration was run".to_string()))?;

    println!(
        "{}",
        formatter.format_fit(
            &best.model.parameters,
            &best.evaluation,
            climber.evaluator().reference(),
            Some(climber.metrics()),
        )?
    );

    Ok(())
}
