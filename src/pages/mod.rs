pub mod feed;
pub mod upload;

use std::io::{self, BufRead, Write};

/// Blocking user interaction used by the pages: show a message, or ask a
/// yes/no question before doing something destructive.
pub trait Notifier {
    fn alert(&self, message: &str);
    fn confirm(&self, question: &str) -> bool;
}

/// Alerts and questions are written to stderr whatever the log level,
/// answers are read from stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier {
    assume_yes: bool,
}

impl ConsoleNotifier {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        let _ = writeln!(io::stderr(), "{}", message);
    }

    fn confirm(&self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        let mut stderr = io::stderr();
        let _ = write!(stderr, "{} [y/N] ", question);
        let _ = stderr.flush();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(_) => false,
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("no"));
        assert!(ConsoleNotifier::new(true).confirm("Delete?"));
    }
}
