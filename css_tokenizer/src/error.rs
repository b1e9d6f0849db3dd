use thiserror::Error;

pub type Result<T> = std::result::Result<T, TokenizerError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizerError {
    /// The tokenizer produced more tokens than the input could ever account for.
    #[error("tokenizer stuck in a loop: produced {tokens} tokens from {input_length} code points")]
    InfiniteLoop { tokens: usize, input_length: usize },
}
