//! Reference command implementation.

use crate::cli::ReferenceArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::reference::load_reference;

/// Execute the reference command.
pub fn execute_reference(args: ReferenceArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let path = args.reference.as_deref().or(config.settings.reference.as_deref());
    let mut reference = load_reference(path)?;

    if args.split {
        reference = reference.split_profiles();
    }

    println!("{}", formatter.format_reference(&reference)?);

    Ok(())
}
