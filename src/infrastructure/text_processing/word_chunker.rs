use std::str::SplitWhitespace;

use crate::application::ports::TextSplitter;
use crate::application::services::count_tokens;
use crate::domain::Chunk;

pub const DEFAULT_TOKEN_BUDGET: usize = 6000;

/// Groups words into chunks of at most `token_budget` tokens.
///
/// A word is flushed into a new chunk only when adding it would push the
/// current chunk strictly over budget, so chunks may fill the budget exactly.
/// Words are never split, and a word that alone exceeds the budget still
/// gets a chunk of its own.
#[derive(Debug, Clone, Copy)]
pub struct WordChunker {
    token_budget: usize,
}

impl WordChunker {
    /// A budget of zero is treated as one.
    pub fn new(token_budget: usize) -> Self {
        Self {
            token_budget: token_budget.max(1),
        }
    }

    pub fn chunks<'a>(&self, text: &'a str) -> WordChunks<'a> {
        WordChunks {
            words: text.split_whitespace(),
            token_budget: self.token_budget,
            carry: None,
            next_index: 0,
        }
    }
}

impl Default for WordChunker {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_BUDGET)
    }
}

impl TextSplitter for WordChunker {
    fn token_budget(&self) -> usize {
        self.token_budget
    }

    fn split<'a>(&self, text: &'a str) -> Box<dyn Iterator<Item = Chunk> + Send + 'a> {
        Box::new(self.chunks(text))
    }
}

/// Lazy iterator over the chunks of one text.
#[derive(Debug, Clone)]
pub struct WordChunks<'a> {
    words: SplitWhitespace<'a>,
    token_budget: usize,
    carry: Option<&'a str>,
    next_index: usize,
}

impl Iterator for WordChunks<'_> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        let mut words: Vec<&str> = Vec::new();
        let mut tokens = 0;

        if let Some(word) = self.carry.take() {
            tokens += count_tokens(word);
            words.push(word);
        }

        for word in self.words.by_ref() {
            let word_tokens = count_tokens(word);
            if !words.is_empty() && tokens + word_tokens > self.token_budget {
                self.carry = Some(word);
                break;
            }
            tokens += word_tokens;
            words.push(word);
        }

        if words.is_empty() {
            return None;
        }

        let chunk = Chunk::new(self.next_index, words.join(" "), tokens);
        self.next_index += 1;
        Some(chunk)
    }
}
