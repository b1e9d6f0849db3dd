// https://www.w3.org/TR/css-syntax-3/#input-preprocessing

/// Filters the input stream into the code points the tokenizer operates on.
///
/// Replaces CR LF pairs, lone CR and FF with a single LF, and U+0000 NULL
/// with U+FFFD REPLACEMENT CHARACTER.
pub fn preprocess(input: &str) -> Vec<char> {
    filter_code_points(input.chars())
}

/// Like [`preprocess`], but decodes UTF-16 first.
///
/// A valid surrogate pair becomes its astral code point, an unpaired surrogate
/// becomes U+FFFD REPLACEMENT CHARACTER.
pub fn preprocess_utf16(input: &[u16]) -> Vec<char> {
    filter_code_points(
        char::decode_utf16(input.iter().copied())
            .map(|result| result.unwrap_or(char::REPLACEMENT_CHARACTER)),
    )
}

fn filter_code_points(input: impl Iterator<Item = char>) -> Vec<char> {
    let mut output = Vec::new();
    let mut input = input.peekable();

    while let Some(code_point) = input.next() {
        match code_point {
            '\r' => {
                if input.peek() == Some(&'\n') {
                    input.next();
                }
                output.push('\n');
            }
            '\u{C}' => output.push('\n'),
            '\0' => output.push(char::REPLACEMENT_CHARACTER),
            _ => output.push(code_point),
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newlines_are_normalized() {
        assert_eq!(preprocess("a\r\nb\rc\u{C}d\ne"), "a\nb\nc\nd\ne".chars().collect::<Vec<_>>());
        assert_eq!(preprocess("\r\r\n"), vec!['\n', '\n']);
    }

    #[test]
    fn null_is_replaced() {
        assert_eq!(preprocess("a\0b"), vec!['a', '\u{FFFD}', 'b']);
    }

    #[test]
    fn surrogate_pairs_are_decoded() {
        // U+1F600 encoded as a surrogate pair.
        assert_eq!(preprocess_utf16(&[0xD83D, 0xDE00]), vec!['\u{1F600}']);
    }

    #[test]
    fn unpaired_surrogates_are_replaced() {
        assert_eq!(
            preprocess_utf16(&[0x61, 0xD83D, 0x62, 0xDE00]),
            vec!['a', '\u{FFFD}', 'b', '\u{FFFD}']
        );
    }
}
