use crate::domain::Chunk;

/// Splits text into chunks no larger than `token_budget` tokens.
///
/// The returned iterator is lazy; calling `split` again on the same input
/// yields the same sequence.
pub trait TextSplitter: Send + Sync {
    fn token_budget(&self) -> usize;

    fn split<'a>(&self, text: &'a str) -> Box<dyn Iterator<Item = Chunk> + Send + 'a>;
}
