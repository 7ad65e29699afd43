use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};

/// Asks for a y/N answer on stdin unless `yes` was passed.
pub fn confirm_or_abort(prompt: &str, yes: bool) -> Result<()> {
	if yes {
		return Ok(());
	}

	print!("{prompt} [y/N] ");
	io::stdout().flush()?;

	let mut answer = String::new();
	io::stdin().lock().read_line(&mut answer)?;

	if is_yes(&answer) {
		Ok(())
	} else {
		bail!("Aborted")
	}
}

fn is_yes(answer: &str) -> bool {
	matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
