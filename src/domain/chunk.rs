/// A contiguous, word-bounded slice of a larger text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    pub text: String,
    pub token_count: usize,
}

impl Chunk {
    pub fn new(index: usize, text: String, token_count: usize) -> Self {
        Self {
            index,
            text,
            token_count,
        }
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.text.split_whitespace()
    }
}
