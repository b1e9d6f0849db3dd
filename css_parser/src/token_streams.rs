use std::cell::{Cell, RefCell};

use css_tokenizer::Token;

static END_OF_FILE: Token = Token::EndOfFile;

/// 5.3. Token Streams
///
/// https://drafts.csswg.org/css-syntax-3/#parser-definitions
#[derive(Debug, Clone)]
pub struct TokenStream {
    /// A list of tokens and/or component values.
    ///
    /// https://drafts.csswg.org/css-syntax-3/#token-stream-tokens
    tokens: Vec<Token>,

    /// An index into the tokens, representing the progress of parsing. It starts at 0 initially.
    ///
    /// https://drafts.csswg.org/css-syntax-3/#token-stream-index
    index: Cell<usize>,

    /// A stack of index values, representing points that the parser might return to. It starts empty initially.
    ///
    /// https://drafts.csswg.org/css-syntax-3/#token-stream-marked-indexes
    marked_indexes: RefCell<Vec<usize>>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> TokenStream {
        TokenStream {
            tokens,
            index: Cell::new(0),
            marked_indexes: RefCell::new(vec![]),
        }
    }

    pub fn index(&self) -> usize {
        self.index.get()
    }

    /// https://drafts.csswg.org/css-syntax-3/#token-stream-next-token
    pub fn next_token(&self) -> &Token {
        // The item of tokens at index.
        self.tokens
            .get(self.index.get())
            // If that index would be out-of-bounds past the end of the list, it’s instead an <eof-token>.
            .unwrap_or(&END_OF_FILE)
    }

    /// https://drafts.csswg.org/css-syntax-3/#token-stream-empty
    pub fn empty(&self) -> bool {
        // A token stream is empty if the next token is an <eof-token>.
        self.next_token().is_eof()
    }

    /// https://drafts.csswg.org/css-syntax-3/#token-stream-consume-a-token
    pub fn consume_a_token(&self) -> &Token {
        // Let token be the next token.
        let token = self.next_token();
        // Increment index,
        self.index.set(self.index.get() + 1);
        // then return token.
        token
    }

    /// https://drafts.csswg.org/css-syntax-3/#token-stream-discard-a-token
    pub fn discard_a_token(&self) {
        // If the token stream is not empty, increment index.
        if !self.empty() {
            self.index.set(self.index.get() + 1);
        }
    }

    /// https://drafts.csswg.org/css-syntax-3/#token-stream-mark
    pub fn mark(&self) {
        // Append index to marked indexes.
        self.marked_indexes.borrow_mut().push(self.index.get());
    }

    /// https://drafts.csswg.org/css-syntax-3/#token-stream-restore-a-mark
    ///
    /// # Panics
    ///
    /// Panics if there is no mark to restore.
    pub fn restore_a_mark(&self) {
        // Pop from marked indexes, and set index to the popped value.
        let popped = self
            .marked_indexes
            .borrow_mut()
            .pop()
            .expect("restore_a_mark called without a matching mark");
        self.index.set(popped);
    }

    /// https://drafts.csswg.org/css-syntax-3/#token-stream-discard-a-mark
    pub fn discard_a_mark(&self) {
        // Pop from marked indexes, and do nothing with the popped value.
        self.marked_indexes.borrow_mut().pop();
    }

    /// https://drafts.csswg.org/css-syntax-3/#token-stream-discard-whitespace
    pub fn discard_whitespace(&self) {
        // While the next token is a <whitespace-token>, discard a token.
        while self.next_token().is_whitespace() {
            self.discard_a_token();
        }
    }

    /// Repeatedly calls `action` with the next token until it returns
    /// [`ProcessResult::Return`]. The action is responsible for consuming or
    /// discarding tokens; `process` itself never advances the index.
    ///
    /// https://drafts.csswg.org/css-syntax-3/#token-stream-process
    pub fn process<A, R>(&self, mut action: A) -> R
    where
        A: FnMut(&Token) -> ProcessResult<R>,
    {
        loop {
            match action(self.next_token()) {
                ProcessResult::Return(result) => return result,
                ProcessResult::Continue => {}
            }
        }
    }
}

/// What a [`TokenStream::process`] action wants to happen after it has
/// looked at the next token.
pub enum ProcessResult<T> {
    /// Run the action again on the (possibly advanced) next token.
    Continue,
    /// Stop processing, and hand the value back to the caller of `process`.
    Return(T),
}

#[cfg(test)]
mod tests {
    use css_tokenizer::tokenize;

    use super::*;

    fn ident(value: &str) -> Token {
        Token::Ident {
            value: value.to_string(),
        }
    }

    #[test]
    fn reading_past_the_end_yields_eof() {
        let input = TokenStream::new(vec![ident("a")]);
        assert_eq!(input.consume_a_token(), &ident("a"));
        assert!(input.empty());
        assert_eq!(input.consume_a_token(), &Token::EndOfFile);
        assert_eq!(input.next_token(), &Token::EndOfFile);
    }

    #[test]
    fn discard_stops_at_eof() {
        let input = TokenStream::new(tokenize("a").unwrap());
        input.discard_a_token();
        input.discard_a_token();
        input.discard_a_token();
        assert_eq!(input.index(), 1);
        assert!(input.empty());
    }

    #[test]
    fn marks_restore_the_index() {
        let input = TokenStream::new(tokenize("a b c").unwrap());
        input.discard_a_token();
        input.mark();
        input.discard_whitespace();
        assert_eq!(input.consume_a_token(), &ident("b"));
        input.mark();
        input.discard_a_token();
        input.discard_a_mark();
        input.restore_a_mark();
        assert_eq!(input.index(), 1);
        assert_eq!(input.next_token(), &Token::Whitespace);
    }

    #[test]
    #[should_panic]
    fn restoring_without_a_mark_panics() {
        TokenStream::new(vec![]).restore_a_mark();
    }

    #[test]
    fn process_runs_until_a_result() {
        let input = TokenStream::new(tokenize("a b;c").unwrap());
        let mut seen = vec![];
        let stopped_at = input.process(|token| match token {
            Token::Semicolon => ProcessResult::Return(input.index()),
            _ => {
                seen.push(input.consume_a_token().clone());
                ProcessResult::Continue
            }
        });
        assert_eq!(stopped_at, 3);
        assert_eq!(seen, vec![ident("a"), Token::Whitespace, ident("b")]);
    }
}
