use crate::definitions::{
    is_digit, is_hex_digit, is_ident_code_point, is_ident_start_code_point, is_newline,
    is_non_printable_code_point, is_surrogate, is_whitespace, MAXIMUM_ALLOWED_CODE_POINT,
};
use crate::error::{Result, TokenizerError};
use crate::preprocessor::{preprocess, preprocess_utf16};
use crate::token::{HashType, NumberType, Sign, Token};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenizer {
    input: Vec<char>,
    position: isize,
}

impl Tokenizer {
    pub fn new(input: &str) -> Self {
        Self::from_code_points(preprocess(input))
    }

    pub fn from_utf16(input: &[u16]) -> Self {
        Self::from_code_points(preprocess_utf16(input))
    }

    /// Creates a tokenizer over code points that have already been preprocessed.
    pub fn from_code_points(input: Vec<char>) -> Self {
        Self {
            input,
            position: -1,
        }
    }

    /// Consumes tokens until the end of the input.
    ///
    /// The returned list always ends with a single [`Token::EndOfFile`].
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = vec![];

        loop {
            let token = self.next_token();
            log_current_token!(token);
            match token {
                Token::EndOfFile => {
                    tokens.push(token);
                    break;
                }
                _ => tokens.push(token),
            }

            // Every token consumes at least one code point, so this can only
            // happen if the tokenizer stopped making progress.
            if tokens.len() > self.input.len() * 2 {
                return Err(TokenizerError::InfiniteLoop {
                    tokens: tokens.len(),
                    input_length: self.input.len(),
                });
            }
        }

        Ok(tokens)
    }

    /// Consumes and returns the next token.
    ///
    /// Once the input is exhausted every call returns [`Token::EndOfFile`].
    pub fn next_token(&mut self) -> Token {
        self.consume_a_token()
    }

    // https://www.w3.org/TR/css-syntax-3/#next-input-code-point
    fn next_input_code_point(&self) -> Option<char> {
        self.peek(1)
    }

    fn consume_next_input_code_point(&mut self) -> Option<char> {
        self.position += 1;
        self.current_input_code_point()
    }

    // https://www.w3.org/TR/css-syntax-3/#current-input-code-point
    fn current_input_code_point(&self) -> Option<char> {
        self.peek(0)
    }

    // https://www.w3.org/TR/css-syntax-3/#reconsume-the-current-input-code-point
    fn reconsume_current_input_code_point(&mut self) {
        self.position -= 1;
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-token
    fn consume_a_token(&mut self) -> Token {
        // Consume comments.
        self.consume_comments();

        // Consume the next input code point.
        let code_point = self.consume_next_input_code_point();

        match code_point {
            Some(code_point) => match code_point {
                definition!(whitespace) => {
                    // Consume as much whitespace as possible.
                    self.consume_as_much_whitespace_as_possible();

                    // Return a <whitespace-token>.
                    Token::Whitespace
                }
                '"' | '\'' => {
                    // Consume a string token and return it.
                    self.consume_a_string_token(None)
                }
                '#' => {
                    // If the next input code point is an ident code point
                    // or the next two input code points are a valid escape, then:
                    if self.next_input_code_point().is_some_and(is_ident_code_point)
                        || Self::check_if_two_code_points_are_a_valid_escape(
                            self.peek(1),
                            self.peek(2),
                        )
                    {
                        // 1. Create a <hash-token>.
                        let hash_token = Token::Hash {
                            // 2. If the next 3 input code points would start an ident sequence, set the <hash-token>’s type flag to "id".
                            hash_type: match Self::check_if_three_code_points_would_start_an_ident_sequence(
                                self.peek(1),
                                self.peek(2),
                                self.peek(3),
                            ) {
                                true => HashType::Id,
                                false => HashType::Unrestricted,
                            },
                            // 3. Consume an ident sequence, and set the <hash-token>’s value to the returned string.
                            value: self.consume_an_ident_sequence(),
                        };

                        // 4. Return the <hash-token>.
                        return hash_token;
                    }

                    // Otherwise, return a <delim-token> with its value set to the current input code point.
                    Token::Delim { value: code_point }
                }
                '(' => Token::LeftParenthesis,
                ')' => Token::RightParenthesis,
                '+' => {
                    // If the input stream starts with a number,
                    if self.stream_starts_with_a_number() {
                        // reconsume the current input code point,
                        self.reconsume_current_input_code_point();
                        // consume a numeric token, and return it.
                        return self.consume_a_numeric_token();
                    }

                    // Otherwise, return a <delim-token> with its value set to the current input code point.
                    Token::Delim { value: code_point }
                }
                ',' => Token::Comma,
                '-' => {
                    // If the input stream starts with a number,
                    if self.stream_starts_with_a_number() {
                        // reconsume the current input code point,
                        self.reconsume_current_input_code_point();
                        // consume a numeric token, and return it.
                        return self.consume_a_numeric_token();
                    }

                    // Otherwise, if the next 2 input code points are U+002D HYPHEN-MINUS U+003E GREATER-THAN SIGN (->),
                    if let (Some('-'), Some('>')) = (self.peek(1), self.peek(2)) {
                        // consume them and return a <CDC-token>.
                        self.consume_next_input_code_point();
                        self.consume_next_input_code_point();
                        return Token::Cdc;
                    }

                    // Otherwise, if the input stream starts with an ident sequence,
                    if self.stream_starts_with_an_ident_sequence() {
                        // reconsume the current input code point,
                        self.reconsume_current_input_code_point();
                        // consume an ident-like token, and return it.
                        return self.consume_an_ident_like_token();
                    }

                    // Otherwise, return a <delim-token> with its value set to the current input code point.
                    Token::Delim { value: code_point }
                }
                '.' => {
                    // If the input stream starts with a number,
                    if self.stream_starts_with_a_number() {
                        // reconsume the current input code point,
                        self.reconsume_current_input_code_point();
                        // consume a numeric token, and return it.
                        return self.consume_a_numeric_token();
                    }

                    // Otherwise, return a <delim-token> with its value set to the current input code point.
                    Token::Delim { value: code_point }
                }
                ':' => Token::Colon,
                ';' => Token::Semicolon,
                '<' => {
                    // If the next 3 input code points are U+0021 EXCLAMATION MARK U+002D HYPHEN-MINUS U+002D HYPHEN-MINUS (!--),
                    if let (Some('!'), Some('-'), Some('-')) = (self.peek(1), self.peek(2), self.peek(3))
                    {
                        // consume them and return a <CDO-token>.
                        for _ in 0..3 {
                            self.consume_next_input_code_point();
                        }
                        return Token::Cdo;
                    }

                    // Otherwise, return a <delim-token> with its value set to the current input code point.
                    Token::Delim { value: code_point }
                }
                '@' => {
                    // If the next 3 input code points would start an ident sequence,
                    if Self::check_if_three_code_points_would_start_an_ident_sequence(
                        self.peek(1),
                        self.peek(2),
                        self.peek(3),
                    ) {
                        // consume an ident sequence,
                        // create an <at-keyword-token> with its value set to the returned value, and return it.
                        return Token::AtKeyword {
                            value: self.consume_an_ident_sequence(),
                        };
                    }

                    // Otherwise, return a <delim-token> with its value set to the current input code point.
                    Token::Delim { value: code_point }
                }
                '[' => Token::LeftSquareBracket,
                '\\' => {
                    // If the input stream starts with a valid escape,
                    if self.stream_starts_with_a_valid_escape() {
                        // reconsume the current input code point,
                        self.reconsume_current_input_code_point();
                        // consume an ident-like token, and return it.
                        return self.consume_an_ident_like_token();
                    }

                    // Otherwise, this is a parse error.
                    log_parse_error!("backslash does not start a valid escape");
                    // Return a <delim-token> with its value set to the current input code point.
                    Token::Delim { value: code_point }
                }
                ']' => Token::RightSquareBracket,
                '{' => Token::LeftCurlyBracket,
                '}' => Token::RightCurlyBracket,
                definition!(digit) => {
                    // Reconsume the current input code point,
                    self.reconsume_current_input_code_point();
                    // consume a numeric token, and return it.
                    self.consume_a_numeric_token()
                }
                definition!(ident_start_code_point) => {
                    // Reconsume the current input code point,
                    self.reconsume_current_input_code_point();
                    // consume an ident-like token, and return it.
                    self.consume_an_ident_like_token()
                }
                _ => Token::Delim { value: code_point },
            },
            definition!(eof_code_point) => Token::EndOfFile,
        }
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-comment
    fn consume_comments(&mut self) {
        // If the next two input code point are U+002F SOLIDUS (/) followed by a U+002A ASTERISK (*),
        while let (Some('/'), Some('*')) = (self.peek(1), self.peek(2)) {
            // consume them and all following code points
            self.consume_next_input_code_point();
            self.consume_next_input_code_point();
            loop {
                match self.consume_next_input_code_point() {
                    // up to and including the first U+002A ASTERISK (*) followed by a U+002F SOLIDUS (/),
                    Some('*') if self.next_input_code_point() == Some('/') => {
                        self.consume_next_input_code_point();
                        break;
                    }
                    // or up to an EOF code point.
                    definition!(eof_code_point) => {
                        // If the preceding paragraph ended by consuming an EOF code point, this is a parse error.
                        log_parse_error!("EOF in comment");
                        return;
                    }
                    _ => {}
                }
            }
            // Return to the start of this step.
        }
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-numeric-token
    fn consume_a_numeric_token(&mut self) -> Token {
        // Consume a number and let number be the result.
        let number = self.consume_a_number();

        // If the next 3 input code points would start an ident sequence, then:
        if Self::check_if_three_code_points_would_start_an_ident_sequence(
            self.peek(1),
            self.peek(2),
            self.peek(3),
        ) {
            // 1. Create a <dimension-token> with the same value and type flag as number, and a unit set initially to the empty string.
            let dimension_token = Token::Dimension {
                value: number.value,
                number_type: number.number_type,
                sign: number.sign,
                // 2. Consume an ident sequence. Set the <dimension-token>’s unit to the returned value.
                unit: self.consume_an_ident_sequence(),
            };

            // 3. Return the <dimension-token>.
            return dimension_token;
        }

        // Otherwise, if the next input code point is U+0025 PERCENTAGE SIGN (%),
        if self.next_input_code_point() == Some('%') {
            // consume it.
            self.consume_next_input_code_point();
            // Create a <percentage-token> with the same value as number, and return it.
            return Token::Percentage {
                value: number.value,
                number_type: number.number_type,
                sign: number.sign,
            };
        }

        // Otherwise, create a <number-token> with the same value and type flag as number, and return it.
        Token::Number {
            value: number.value,
            number_type: number.number_type,
            sign: number.sign,
        }
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token
    fn consume_an_ident_like_token(&mut self) -> Token {
        // Consume an ident sequence, and let string be the result.
        let string = self.consume_an_ident_sequence();

        // If string’s value is an ASCII case-insensitive match for "url",
        // and the next input code point is U+0028 LEFT PARENTHESIS ((),
        if string.eq_ignore_ascii_case("url") && self.next_input_code_point() == Some('(') {
            // consume it.
            self.consume_next_input_code_point();

            // While the next two input code points are whitespace,
            // consume the next input code point.
            while self.peek(1).is_some_and(is_whitespace) && self.peek(2).is_some_and(is_whitespace)
            {
                self.consume_next_input_code_point();
            }

            // If the next one or two input code points are U+0022 QUOTATION MARK ("), U+0027 APOSTROPHE ('),
            // or whitespace followed by U+0022 QUOTATION MARK (") or U+0027 APOSTROPHE ('),
            let is_quote = |code_point: Option<char>| matches!(code_point, Some('"' | '\''));
            if is_quote(self.peek(1))
                || (self.peek(1).is_some_and(is_whitespace) && is_quote(self.peek(2)))
            {
                // then create a <function-token> with its value set to string and return it.
                return Token::Function { value: string };
            }

            // Otherwise, consume a url token, and return it.
            return self.consume_a_url_token();
        }

        // Otherwise, if the next input code point is U+0028 LEFT PARENTHESIS ((),
        if self.next_input_code_point() == Some('(') {
            // consume it.
            self.consume_next_input_code_point();
            // Create a <function-token> with its value set to string and return it.
            return Token::Function { value: string };
        }

        // Otherwise, create an <ident-token> with its value set to string and return it.
        Token::Ident { value: string }
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-string-token
    fn consume_a_string_token(&mut self, ending_code_point: Option<char>) -> Token {
        // This algorithm may be called with an ending code point,
        // which denotes the code point that ends the string.
        // If an ending code point is not specified,
        // the current input code point is used.
        let ending_code_point = ending_code_point.or_else(|| self.current_input_code_point());

        // Initially create a <string-token> with its value set to the empty string.
        let mut value = String::new();

        loop {
            // Consume the next input code point.
            match self.consume_next_input_code_point() {
                Some(code_point) if Some(code_point) == ending_code_point => {
                    // Return the <string-token>.
                    return Token::String { value };
                }
                definition!(eof_code_point) => {
                    // This is a parse error.
                    log_parse_error!("EOF in string token");
                    // Return the <string-token>.
                    return Token::String { value };
                }
                Some(definition!(newline)) => {
                    // This is a parse error.
                    log_parse_error!("newline in string token");
                    // Reconsume the current input code point,
                    self.reconsume_current_input_code_point();
                    // create a <bad-string-token>, and return it.
                    return Token::BadString;
                }
                Some('\\') => match self.next_input_code_point() {
                    // If the next input code point is EOF, do nothing.
                    definition!(eof_code_point) => {}
                    // Otherwise, if the next input code point is a newline, consume it.
                    Some(definition!(newline)) => {
                        self.consume_next_input_code_point();
                    }
                    // Otherwise, (the stream starts with a valid escape) consume an escaped code point
                    // and append the returned code point to the <string-token>’s value.
                    Some(_) => value.push(self.consume_an_escaped_code_point()),
                },
                Some(code_point) => {
                    // Append the current input code point to the <string-token>’s value.
                    value.push(code_point);
                }
            }
        }
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-url-token
    fn consume_a_url_token(&mut self) -> Token {
        // 1. Initially create a <url-token> with its value set to the empty string.
        let mut value = String::new();

        // 2. Consume as much whitespace as possible.
        self.consume_as_much_whitespace_as_possible();

        // 3. Repeatedly consume the next input code point from the stream:
        loop {
            match self.consume_next_input_code_point() {
                Some(')') => {
                    // Return the <url-token>.
                    return Token::Url { value };
                }
                definition!(eof_code_point) => {
                    // This is a parse error. Return the <url-token>.
                    log_parse_error!("EOF in url token");
                    return Token::Url { value };
                }
                Some(definition!(whitespace)) => {
                    // Consume as much whitespace as possible.
                    self.consume_as_much_whitespace_as_possible();

                    // If the next input code point is U+0029 RIGHT PARENTHESIS ()) or EOF,
                    // consume it and return the <url-token>
                    match self.next_input_code_point() {
                        Some(')') => {
                            self.consume_next_input_code_point();
                            return Token::Url { value };
                        }
                        definition!(eof_code_point) => {
                            self.consume_next_input_code_point();
                            log_parse_error!("EOF in url token");
                            return Token::Url { value };
                        }
                        Some(_) => {
                            // otherwise, consume the remnants of a bad url, create a <bad-url-token>, and return it.
                            self.consume_the_remnants_of_a_bad_url();
                            return Token::BadUrl;
                        }
                    }
                }
                Some('"' | '\'' | '(') => {
                    // This is a parse error.
                    log_parse_error!("unexpected code point in url token");
                    // Consume the remnants of a bad url, create a <bad-url-token>, and return it.
                    self.consume_the_remnants_of_a_bad_url();
                    return Token::BadUrl;
                }
                Some(code_point) if is_non_printable_code_point(code_point) => {
                    log_parse_error!("non-printable code point in url token");
                    self.consume_the_remnants_of_a_bad_url();
                    return Token::BadUrl;
                }
                Some('\\') => {
                    // If the stream starts with a valid escape,
                    if self.stream_starts_with_a_valid_escape() {
                        // consume an escaped code point and append the returned code point to the <url-token>’s value.
                        value.push(self.consume_an_escaped_code_point());
                    } else {
                        // Otherwise, this is a parse error.
                        log_parse_error!("invalid escape in url token");
                        // Consume the remnants of a bad url, create a <bad-url-token>, and return it.
                        self.consume_the_remnants_of_a_bad_url();
                        return Token::BadUrl;
                    }
                }
                Some(code_point) => {
                    // Append the current input code point to the <url-token>’s value.
                    value.push(code_point);
                }
            }
        }
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point
    fn consume_an_escaped_code_point(&mut self) -> char {
        // Consume the next input code point.
        match self.consume_next_input_code_point() {
            Some(code_point) if is_hex_digit(code_point) => {
                // Consume as many hex digits as possible, but no more than 5.
                // Note that this means 1-6 hex digits have been consumed in total.
                let mut digits = String::from(code_point);
                while digits.len() < 6 && self.next_input_code_point().is_some_and(is_hex_digit) {
                    if let Some(digit) = self.consume_next_input_code_point() {
                        digits.push(digit);
                    }
                }

                // If the next input code point is whitespace, consume it as well.
                if self.next_input_code_point().is_some_and(is_whitespace) {
                    self.consume_next_input_code_point();
                }

                // Interpret the hex digits as a hexadecimal number.
                let number = u32::from_str_radix(&digits, 16).unwrap_or(0);

                // If this number is zero, or is for a surrogate, or is greater than the maximum allowed code point,
                // return U+FFFD REPLACEMENT CHARACTER (�).
                if number == 0 || is_surrogate(number) || number > MAXIMUM_ALLOWED_CODE_POINT {
                    return char::REPLACEMENT_CHARACTER;
                }

                // Otherwise, return the code point with that value.
                char::from_u32(number).unwrap_or(char::REPLACEMENT_CHARACTER)
            }
            definition!(eof_code_point) => {
                // This is a parse error. Return U+FFFD REPLACEMENT CHARACTER (�).
                log_parse_error!("EOF in escape");
                char::REPLACEMENT_CHARACTER
            }
            // Return the current input code point.
            Some(code_point) => code_point,
        }
    }

    // https://www.w3.org/TR/css-syntax-3/#starts-with-a-valid-escape
    fn check_if_two_code_points_are_a_valid_escape(
        first: Option<char>,
        second: Option<char>,
    ) -> bool {
        // If the first code point is not U+005C REVERSE SOLIDUS (\), return false.
        if first != Some('\\') {
            return false;
        }

        // Otherwise, if the second code point is a newline, return false.
        // Otherwise, return true.
        !second.is_some_and(is_newline)
    }

    fn stream_starts_with_a_valid_escape(&self) -> bool {
        // the two code points in question are
        // the current input code point and the next input code point,
        // in that order.
        Self::check_if_two_code_points_are_a_valid_escape(
            self.current_input_code_point(),
            self.next_input_code_point(),
        )
    }

    // https://www.w3.org/TR/css-syntax-3/#check-if-three-code-points-would-start-an-ident-sequence
    fn check_if_three_code_points_would_start_an_ident_sequence(
        first: Option<char>,
        second: Option<char>,
        third: Option<char>,
    ) -> bool {
        // Look at the first code point:
        match first {
            Some('-') => match second {
                // If the second code point is an ident-start code point or a U+002D HYPHEN-MINUS,
                // or the second and third code points are a valid escape, return true.
                Some('-') => true,
                Some(code_point) if is_ident_start_code_point(code_point) => true,
                // Otherwise, return false.
                _ => Self::check_if_two_code_points_are_a_valid_escape(second, third),
            },
            // Return true.
            Some(code_point) if is_ident_start_code_point(code_point) => true,
            // If the first and second code points are a valid escape, return true. Otherwise, return false.
            Some('\\') => Self::check_if_two_code_points_are_a_valid_escape(first, second),
            _ => false,
        }
    }

    fn stream_starts_with_an_ident_sequence(&self) -> bool {
        // the three code points in question are
        // the current input code point and
        // the next two input code points,
        // in that order.
        Self::check_if_three_code_points_would_start_an_ident_sequence(
            self.current_input_code_point(),
            self.peek(1),
            self.peek(2),
        )
    }

    // https://www.w3.org/TR/css-syntax-3/#starts-with-a-number
    fn check_if_three_code_points_would_start_a_number(
        first: Option<char>,
        second: Option<char>,
        third: Option<char>,
    ) -> bool {
        // Look at the first code point:
        match first {
            Some('+' | '-') => match second {
                // If the second code point is a digit, return true.
                Some(definition!(digit)) => true,
                // Otherwise, if the second code point is a U+002E FULL STOP (.)
                // and the third code point is a digit, return true.
                Some('.') => third.is_some_and(is_digit),
                _ => false,
            },
            // If the second code point is a digit, return true.
            // Otherwise, return false.
            Some('.') => second.is_some_and(is_digit),
            Some(definition!(digit)) => true,
            _ => false,
        }
    }

    fn stream_starts_with_a_number(&self) -> bool {
        // the three code points in question are
        // the current input code point and
        // the next two input code points,
        // in that order.
        Self::check_if_three_code_points_would_start_a_number(
            self.current_input_code_point(),
            self.peek(1),
            self.peek(2),
        )
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-name
    fn consume_an_ident_sequence(&mut self) -> String {
        // Let result initially be an empty string.
        let mut result = String::new();

        // Repeatedly consume the next input code point from the stream:
        loop {
            match self.consume_next_input_code_point() {
                Some(code_point) if is_ident_code_point(code_point) => {
                    // Append the code point to result.
                    result.push(code_point);
                }
                _ if self.stream_starts_with_a_valid_escape() => {
                    // Consume an escaped code point. Append the returned code point to result.
                    result.push(self.consume_an_escaped_code_point());
                }
                _ => {
                    // Reconsume the current input code point.
                    self.reconsume_current_input_code_point();
                    // Return result.
                    return result;
                }
            }
        }
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-number
    fn consume_a_number(&mut self) -> CssNumber {
        // 1. Initially set type to "integer". Let repr be the empty string.
        let mut number_type = NumberType::Integer;
        let mut repr = String::new();
        let mut sign = None;

        macro_rules! consume_and_append_to_repr {
            () => {
                if let Some(code_point) = self.consume_next_input_code_point() {
                    repr.push(code_point);
                }
            };
        }

        macro_rules! consume_digits_and_append_to_repr {
            () => {
                while self.next_input_code_point().is_some_and(is_digit) {
                    consume_and_append_to_repr!();
                }
            };
        }

        // 2. If the next input code point is U+002B PLUS SIGN (+) or U+002D HYPHEN-MINUS (-), consume it and append it to repr.
        match self.next_input_code_point() {
            Some('+') => sign = Some(Sign::Plus),
            Some('-') => sign = Some(Sign::Minus),
            _ => {}
        }
        if sign.is_some() {
            consume_and_append_to_repr!();
        }

        // 3. While the next input code point is a digit, consume it and append it to repr.
        consume_digits_and_append_to_repr!();

        // 4. If the next 2 input code points are U+002E FULL STOP (.) followed by a digit, then:
        if self.peek(1) == Some('.') && self.peek(2).is_some_and(is_digit) {
            // 1. Consume them.
            // 2. Append them to repr.
            consume_and_append_to_repr!();
            consume_and_append_to_repr!();

            // 3. Set type to "number".
            number_type = NumberType::Number;

            // 4. While the next input code point is a digit, consume it and append it to repr.
            consume_digits_and_append_to_repr!();
        }

        // 5. If the next 2 or 3 input code points are
        // U+0045 LATIN CAPITAL LETTER E (E) or U+0065 LATIN SMALL LETTER E (e),
        // optionally followed by U+002D HYPHEN-MINUS (-) or U+002B PLUS SIGN (+),
        // followed by a digit, then:
        let exponent_length = match (self.peek(1), self.peek(2), self.peek(3)) {
            (Some('E' | 'e'), Some('+' | '-'), Some(definition!(digit))) => 3,
            (Some('E' | 'e'), Some(definition!(digit)), _) => 2,
            _ => 0,
        };
        if exponent_length > 0 {
            // 1. Consume them.
            // 2. Append them to repr.
            for _ in 0..exponent_length {
                consume_and_append_to_repr!();
            }

            // 3. Set type to "number".
            number_type = NumberType::Number;

            // 4. While the next input code point is a digit, consume it and append it to repr.
            consume_digits_and_append_to_repr!();
        }

        // 6. Convert repr to a number, and set the value to the returned value.
        let value = repr.parse::<f64>().unwrap_or_else(|_| {
            log_parse_error!(format!("failed to convert {repr:?} to a number"));
            0.0
        });

        // 7. Return value and type.
        CssNumber {
            value,
            number_type,
            sign,
        }
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-remnants-of-bad-url
    fn consume_the_remnants_of_a_bad_url(&mut self) {
        // Repeatedly consume the next input code point from the stream:
        loop {
            match self.consume_next_input_code_point() {
                // U+0029 RIGHT PARENTHESIS ()) or EOF: Return.
                Some(')') | definition!(eof_code_point) => return,
                // The input stream starts with a valid escape:
                _ if self.stream_starts_with_a_valid_escape() => {
                    // Consume an escaped code point.
                    // This allows an escaped right parenthesis ("\)") to be encountered without ending the <bad-url-token>.
                    self.consume_an_escaped_code_point();
                }
                // Do nothing.
                _ => {}
            }
        }
    }

    fn peek(&self, offset: isize) -> Option<char> {
        debug_assert!(offset <= 3, "no more than three code points of lookahead");
        let n = self.position + offset;
        if n < 0 {
            return None;
        }
        self.input.get(n as usize).copied()
    }

    fn consume_as_much_whitespace_as_possible(&mut self) {
        while self.next_input_code_point().is_some_and(is_whitespace) {
            self.consume_next_input_code_point();
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct CssNumber {
    value: f64,
    number_type: NumberType,
    sign: Option<Sign>,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn tokenize(input: &str) -> Vec<Token> {
        Tokenizer::new(input).tokenize().unwrap()
    }

    fn assert_tokens(input: &str, expected: Vec<Token>) {
        let mut tokens = tokenize(input);
        assert_eq!(tokens.pop(), Some(Token::EndOfFile));
        assert_eq!(tokens, expected);
    }

    fn ident(value: &str) -> Token {
        Token::Ident {
            value: value.to_string(),
        }
    }

    fn delim(value: char) -> Token {
        Token::Delim { value }
    }

    fn integer(value: f64, sign: Option<Sign>) -> Token {
        Token::Number {
            value,
            number_type: NumberType::Integer,
            sign,
        }
    }

    fn number(value: f64, sign: Option<Sign>) -> Token {
        Token::Number {
            value,
            number_type: NumberType::Number,
            sign,
        }
    }

    fn dimension(value: f64, number_type: NumberType, sign: Option<Sign>, unit: &str) -> Token {
        Token::Dimension {
            value,
            number_type,
            sign,
            unit: unit.to_string(),
        }
    }

    #[test]
    fn empty_input() {
        assert_eq!(tokenize(""), vec![Token::EndOfFile]);
    }

    #[test]
    fn next_token_keeps_returning_eof() {
        let mut tokenizer = Tokenizer::new("a");
        assert_eq!(tokenizer.next_token(), ident("a"));
        assert_eq!(tokenizer.next_token(), Token::EndOfFile);
        assert_eq!(tokenizer.next_token(), Token::EndOfFile);
    }

    #[rstest]
    #[case("(", vec![Token::LeftParenthesis])]
    #[case(")[", vec![Token::RightParenthesis, Token::LeftSquareBracket])]
    #[case("{}", vec![Token::LeftCurlyBracket, Token::RightCurlyBracket])]
    #[case(",:;", vec![Token::Comma, Token::Colon, Token::Semicolon])]
    #[case("~=", vec![delim('~'), delim('=')])]
    #[case("|||", vec![delim('|'), delim('|'), delim('|')])]
    #[case("<!--", vec![Token::Cdo])]
    #[case("<!---", vec![Token::Cdo, delim('-')])]
    #[case("-->", vec![Token::Cdc])]
    #[case("\u{7f}", vec![delim('\u{7f}')])]
    #[case("\u{2003}", vec![delim('\u{2003}')])]
    #[case("\u{A0}", vec![delim('\u{A0}')])]
    fn single_and_multiple_character_tokens(#[case] input: &str, #[case] expected: Vec<Token>) {
        assert_tokens(input, expected);
    }

    #[rstest]
    #[case(" ", vec![Token::Whitespace])]
    #[case("\n\rS", vec![Token::Whitespace, ident("S")])]
    #[case("\r\n\u{C}\t2", vec![Token::Whitespace, integer(2.0, None)])]
    #[case("/* comment */a/**/b", vec![ident("a"), ident("b")])]
    #[case("a/* unterminated", vec![ident("a")])]
    fn whitespace_and_comments(#[case] input: &str, #[case] expected: Vec<Token>) {
        assert_tokens(input, expected);
    }

    #[rstest]
    #[case("hel\\6Co", vec![ident("hello")])]
    #[case("\\26 B", vec![ident("&B")])]
    #[case("spac\\65\r\ns", vec![ident("spaces")])]
    #[case("spac\\65\n\rs", vec![ident("space"), Token::Whitespace, ident("s")])]
    #[case("hel\\6c  o", vec![ident("hell"), Token::Whitespace, ident("o")])]
    #[case("test\\\n", vec![ident("test"), delim('\\'), Token::Whitespace])]
    #[case("te\\s\\t", vec![ident("test")])]
    #[case("spaces\\ in\\\tident", vec![ident("spaces in\tident")])]
    #[case("\\.\\,\\:\\!", vec![ident(".,:!")])]
    #[case("\\\r\n", vec![delim('\\'), Token::Whitespace])]
    #[case("null\\\0\0", vec![ident("null\u{FFFD}\u{FFFD}")])]
    #[case("null\\0000", vec![ident("null\u{FFFD}")])]
    #[case("large\\110000", vec![ident("large\u{FFFD}")])]
    #[case("surrogate\\D800", vec![ident("surrogate\u{FFFD}")])]
    #[case("\\00DFFFsurrogate", vec![ident("\u{FFFD}surrogate")])]
    #[case("\\10fFfF", vec![ident("\u{10FFFF}")])]
    #[case("\\10000000", vec![ident("\u{100000}00")])]
    #[case("eof\\", vec![ident("eof\u{FFFD}")])]
    #[case("\0", vec![ident("\u{FFFD}")])]
    fn escapes(#[case] input: &str, #[case] expected: Vec<Token>) {
        assert_tokens(input, expected);
    }

    #[rstest]
    #[case("-_underscore", "-_underscore")]
    #[case("-\\6d", "-m")]
    #[case("--", "--")]
    #[case("--11", "--11")]
    #[case("\u{12345}", "\u{12345}")]
    fn ident_tokens(#[case] input: &str, #[case] value: &str) {
        assert_eq!(tokenize(input), vec![ident(value), Token::EndOfFile]);
    }

    #[rstest]
    #[case("fun\\(ction(", vec![Token::Function { value: "fun(ction".to_string() }])]
    #[case("url(\"foo.gif\"", vec![
        Token::Function { value: "url".to_string() },
        Token::String { value: "foo.gif".to_string() },
    ])]
    #[case("url( 'bar.gif'", vec![
        Token::Function { value: "url".to_string() },
        Token::Whitespace,
        Token::String { value: "bar.gif".to_string() },
    ])]
    #[case("@at-keyword", vec![Token::AtKeyword { value: "at-keyword".to_string() }])]
    #[case("@-\\ ", vec![Token::AtKeyword { value: "- ".to_string() }])]
    #[case("@@", vec![delim('@'), delim('@')])]
    #[case("@-1", vec![delim('@'), integer(-1.0, Some(Sign::Minus))])]
    fn function_and_at_keyword_tokens(#[case] input: &str, #[case] expected: Vec<Token>) {
        assert_tokens(input, expected);
    }

    #[rstest]
    #[case("url(foo.gif)", vec![Token::Url { value: "foo.gif".to_string() }])]
    #[case("uRl(what-a.crazy^URL~this\\ is!)", vec![Token::Url { value: "what-a.crazy^URL~this is!".to_string() }])]
    #[case("Url(escapes\\ \\\"\\'\\)\\()", vec![Token::Url { value: "escapes \"')(".to_string() }])]
    #[case("UrL( whitespace )", vec![Token::Url { value: "whitespace".to_string() }])]
    #[case("URl( whitespace-eof ", vec![Token::Url { value: "whitespace-eof".to_string() }])]
    #[case("URL(eof", vec![Token::Url { value: "eof".to_string() }])]
    #[case("url(not/*a*/comment)", vec![Token::Url { value: "not/*a*/comment".to_string() }])]
    #[case("urL()", vec![Token::Url { value: "".to_string() }])]
    #[case("uRl(white space),", vec![Token::BadUrl, Token::Comma])]
    #[case("Url(b(ad),", vec![Token::BadUrl, Token::Comma])]
    #[case("uRl(ba'd):", vec![Token::BadUrl, Token::Colon])]
    #[case("url(b\\\nad):", vec![Token::BadUrl, Token::Colon])]
    #[case("url(/*'bad')*/", vec![Token::BadUrl, delim('*'), delim('/')])]
    #[case("url(ba'd\\))", vec![Token::BadUrl])]
    #[case("url(ba'd\\\\))", vec![Token::BadUrl, Token::RightParenthesis])]
    fn url_tokens(#[case] input: &str, #[case] expected: Vec<Token>) {
        assert_tokens(input, expected);
    }

    #[rstest]
    #[case("'text'", "text")]
    #[case("'es\\'ca\\\"pe'", "es'ca\"pe")]
    #[case("\"mismatch'", "mismatch'")]
    #[case("\"end on eof", "end on eof")]
    #[case("'esca\\\nped'", "escaped")]
    #[case("\"new\\\r\nline\"", "newline")]
    #[case("'h\\65l\0lo'", "hel\u{FFFD}lo")]
    #[case("'eof\\", "eof")]
    fn string_tokens(#[case] input: &str, #[case] value: &str) {
        assert_eq!(
            tokenize(input),
            vec![
                Token::String {
                    value: value.to_string()
                },
                Token::EndOfFile
            ]
        );
    }

    #[rstest]
    #[case("'bad\nstring")]
    #[case("'bad\rstring")]
    #[case("'bad\r\nstring")]
    #[case("'bad\u{C}string")]
    fn bad_string_tokens(#[case] input: &str) {
        assert_eq!(
            tokenize(input),
            vec![Token::BadString, Token::Whitespace, ident("string"), Token::EndOfFile]
        );
    }

    #[rstest]
    #[case("#id-selector", "id-selector", HashType::Id)]
    #[case("#FF7700", "FF7700", HashType::Id)]
    #[case("#3377FF", "3377FF", HashType::Unrestricted)]
    #[case("#\\ ", " ", HashType::Id)]
    #[case("#-2", "-2", HashType::Unrestricted)]
    fn hash_tokens(#[case] input: &str, #[case] value: &str, #[case] hash_type: HashType) {
        assert_eq!(
            tokenize(input),
            vec![
                Token::Hash {
                    value: value.to_string(),
                    hash_type
                },
                Token::EndOfFile
            ]
        );
    }

    #[rstest]
    #[case("# ", vec![delim('#'), Token::Whitespace])]
    #[case("#\\\n", vec![delim('#'), delim('\\'), Token::Whitespace])]
    #[case("#!", vec![delim('#'), delim('!')])]
    fn hash_delims(#[case] input: &str, #[case] expected: Vec<Token>) {
        assert_tokens(input, expected);
    }

    #[rstest]
    #[case("10", vec![integer(10.0, None)])]
    #[case("12.0", vec![number(12.0, None)])]
    #[case("+45.6", vec![number(45.6, Some(Sign::Plus))])]
    #[case("-7", vec![integer(-7.0, Some(Sign::Minus))])]
    #[case("010", vec![integer(10.0, None)])]
    #[case("10e0", vec![number(10.0, None)])]
    #[case("3e+1", vec![number(30.0, None)])]
    #[case("12E-1", vec![number(1.2, None)])]
    #[case(".7", vec![number(0.7, None)])]
    #[case("-.3", vec![number(-0.3, Some(Sign::Minus))])]
    #[case("+637.54e-2", vec![number(6.3754, Some(Sign::Plus))])]
    #[case("-12.34E+2", vec![number(-1234.0, Some(Sign::Minus))])]
    #[case("+ 5", vec![delim('+'), Token::Whitespace, integer(5.0, None)])]
    #[case("-+12", vec![delim('-'), integer(12.0, Some(Sign::Plus))])]
    #[case("13.", vec![integer(13.0, None), delim('.')])]
    #[case("1.e2", vec![integer(1.0, None), delim('.'), ident("e2")])]
    #[case("2e3.5", vec![number(2000.0, None), number(0.5, None)])]
    #[case("1000000000000000000000000", vec![integer(1e24, None)])]
    #[case("u+222-111", vec![ident("u"), integer(222.0, Some(Sign::Plus)), integer(-111.0, Some(Sign::Minus))])]
    fn number_tokens(#[case] input: &str, #[case] expected: Vec<Token>) {
        assert_tokens(input, expected);
    }

    #[rstest]
    #[case("10px", vec![dimension(10.0, NumberType::Integer, None, "px")])]
    #[case("-12.0em", vec![dimension(-12.0, NumberType::Number, Some(Sign::Minus), "em")])]
    #[case("5e", vec![dimension(5.0, NumberType::Integer, None, "e")])]
    #[case("5px-2px", vec![dimension(5.0, NumberType::Integer, None, "px-2px")])]
    #[case("5e-", vec![dimension(5.0, NumberType::Integer, None, "e-")])]
    #[case("5\\ ", vec![dimension(5.0, NumberType::Integer, None, " ")])]
    #[case("40\\70\\78", vec![dimension(40.0, NumberType::Integer, None, "px")])]
    #[case("4e3e2", vec![dimension(4000.0, NumberType::Number, None, "e2")])]
    #[case("0x10px", vec![dimension(0.0, NumberType::Integer, None, "x10px")])]
    #[case("5e+", vec![dimension(5.0, NumberType::Integer, None, "e"), delim('+')])]
    #[case("2e+.5", vec![dimension(2.0, NumberType::Integer, None, "e"), number(0.5, Some(Sign::Plus))])]
    fn dimension_tokens(#[case] input: &str, #[case] expected: Vec<Token>) {
        assert_tokens(input, expected);
    }

    #[rstest]
    #[case("10%", 10.0, NumberType::Integer, None)]
    #[case("+12.0%", 12.0, NumberType::Number, Some(Sign::Plus))]
    #[case("-48.99%", -48.99, NumberType::Number, Some(Sign::Minus))]
    #[case("6e-1%", 0.6, NumberType::Number, None)]
    fn percentage_tokens(
        #[case] input: &str,
        #[case] value: f64,
        #[case] number_type: NumberType,
        #[case] sign: Option<Sign>,
    ) {
        assert_eq!(
            tokenize(input),
            vec![
                Token::Percentage {
                    value,
                    number_type,
                    sign
                },
                Token::EndOfFile
            ]
        );
    }

    #[test]
    fn utf16_input() {
        let input: Vec<u16> = "\u{20000},\u{0},"
            .encode_utf16()
            .chain([0xD800, 0x2C, 0xDFFF])
            .collect();
        assert_eq!(
            Tokenizer::from_utf16(&input).tokenize().unwrap(),
            vec![
                ident("\u{20000}"),
                Token::Comma,
                ident("\u{FFFD}"),
                Token::Comma,
                ident("\u{FFFD}"),
                Token::Comma,
                ident("\u{FFFD}"),
                Token::EndOfFile,
            ]
        );
    }
}
