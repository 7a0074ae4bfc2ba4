//! Rules command implementation.

use crate::cli::RulesArgs;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the rules command.
pub fn execute_rules(args: RulesArgs, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_rules(args.critical)?);
    Ok(())
}
