//! Baseline command implementation.

use super::run_interruptible;
use crate::cli::BaselineArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::reference::load_reference;
use salfit_search::FactorSearch;

/// Execute the baseline command.
pub async fn execute_baseline(args: BaselineArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let search = args.search.apply(config.search.clone());

    let path = args.search.reference.as_deref().or(config.settings.reference.as_deref());
    let reference = load_reference(path)?;
    let mut baseline = FactorSearch::new(reference, &search)?;

    // A fixed factor is scored as is
    if let Some(factor) = args.factor {
        let evaluation = baseline.evaluate(factor)?;
        println!(
            "{}",
            formatter.format_baseline(factor, &evaluation, baseline.evaluator().reference(), None)?
        );
        return Ok(());
    }

    baseline = run_interruptible(baseline, args.iterations, FactorSearch::run).await?;
    let best = baseline
        .best()
        .ok_or_else(|| CliError::InvalidInput("no iteration was run".to_string()))?;

    println!(
        "{}",
        formatter.format_baseline(
            best.factor,
            &best.evaluation,
            baseline.evaluator().reference(),
            Some(baseline.metrics()),
        )?
    );

    Ok(())
}
