//! Yes/no confirmation prompts.

use std::io::{self, BufRead, Write};

/// Asks `question` on stdout and reads the answer from stdin.
///
/// Only `y` or `yes` (any case) confirm. An empty line, EOF or a read error
/// declines.
pub fn confirm(question: &str) -> bool {
  let stdin = io::stdin();
  confirm_with(question, &mut stdin.lock(), &mut io::stdout())
}

fn confirm_with(question: &str, input: &mut impl BufRead, output: &mut impl Write) -> bool {
  let _ = write!(output, "{question} [y/N]: ");
  let _ = output.flush();

  let mut answer = String::new();
  match input.read_line(&mut answer) {
    Ok(0) | Err(_) => {
      let _ = writeln!(output);
      false
    }
    Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
  }
}
