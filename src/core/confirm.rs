//! Yes/no confirmation gates in front of destructive rewrites.

use std::io::{self, BufRead, Write};

/// Answers a yes/no question. Processing blocks until it returns.
pub trait Confirmer {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Always gives the same answer. Used for `--yes` and in tests.
#[derive(Debug, Clone, Copy)]
pub struct PresetConfirmer(pub bool);

impl Confirmer for PresetConfirmer {
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.0
    }
}

/// Asks on a writer and reads the answer from a line reader.
pub struct PromptConfirmer<R, W> {
    input: R,
    output: W,
}

/// Interactive confirmer on the process's stdin/stdout.
pub type StdinConfirmer = PromptConfirmer<io::StdinLock<'static>, io::Stdout>;

impl StdinConfirmer {
    pub fn stdin() -> Self {
        PromptConfirmer::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> PromptConfirmer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirmer for PromptConfirmer<R, W> {
    fn confirm(&mut self, prompt: &str) -> bool {
        let _ = write!(self.output, "{prompt} (yes/no): ");
        let _ = self.output.flush();

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(_) => false,
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
