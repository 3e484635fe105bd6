//! Interactive prompts

use console::Term;
use owo_colors::OwoColorize;
use std::io;

/// Ask a yes/no question on stderr and read the answer from the terminal.
///
/// Only an explicit `y`/`yes` counts as consent. Without an attended
/// terminal the question is declined.
pub fn confirm(question: &str) -> io::Result<bool> {
    let term = Term::stderr();
    if !term.is_term() {
        return Ok(false);
    }

    term.write_str(&format!("{} {} ", question, "[y/N]".dimmed()))?;
    let answer = term.read_line()?;
    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
