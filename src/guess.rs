use crate::error::GameError;
use crate::words::Word;

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

/// Checks guesses against the secret word and keeps the guess log
#[derive(Debug, Clone)]
pub struct GuessEvaluator {
    word: Word,
    log: Vec<String>,
    last_verdict: Option<Verdict>,
    locked: bool,
}

impl GuessEvaluator {
    pub fn new(word: Word) -> Self {
        Self {
            word,
            log: Vec::new(),
            last_verdict: None,
            locked: false,
        }
    }

    /// Empty text is ignored. Anything else is logged verbatim, then
    /// compared after trimming and lowercasing.
    pub fn submit(&mut self, raw: &str) -> Result<Option<Verdict>, GameError> {
        if self.locked {
            return Err(GameError::InputLocked);
        }

        if raw.is_empty() {
            return Ok(None);
        }

        self.log.push(raw.to_string());

        let verdict = if raw.trim().to_lowercase() == self.word.as_str() {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        };
        self.last_verdict = Some(verdict);

        log::debug!("guess #{} judged {:?}", self.log.len(), verdict);
        Ok(Some(verdict))
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn last_verdict(&self) -> Option<Verdict> {
        self.last_verdict
    }

    pub fn word(&self) -> &Word {
        &self.word
    }
}
