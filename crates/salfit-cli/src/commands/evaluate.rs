//! Evaluate command implementation.

use crate::cli::EvaluateArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::reference::load_reference;
use salfit_search::{ModelFactory, MonteCarloEvaluator, Parameters};

/// Execute the evaluate command.
pub fn execute_evaluate(args: EvaluateArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let search = args.search.apply(config.search.clone());
    search.validate()?;

    let path = args.search.reference.as_deref().or(config.settings.reference.as_deref());
    let reference = load_reference(path)?;

    let parameters = Parameters::new(args.q1, args.mean, args.q3);
    if !parameters.is_feasible() {
        return Err(CliError::InvalidInput(format!(
            "curves must satisfy 0 <= Q1 < Q3 at both ends of the window: {}",
            parameters
        )));
    }

    let model = ModelFactory::from_reference(&reference).create("evaluated", parameters);
    let evaluator = MonteCarloEvaluator::new(reference, search.seed, search.samples_per_profile)?;
    let evaluation = evaluator.evaluate(&model)?;

    println!(
        "{}",
        formatter.format_fit(&parameters, &evaluation, evaluator.reference(), None)?
    );

    Ok(())
}
