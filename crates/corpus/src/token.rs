/// Splits raw bytes into upper-cased ASCII-letter tokens.
///
/// Every byte that is not an ASCII letter acts as a separator, so digits,
/// punctuation, whitespace, underscores and non-ASCII bytes all break words.
/// Empty pieces are never emitted. Input is treated as a single-byte
/// encoding, which means tokenization cannot fail on undecodable text.
pub fn tokenize_bytes(bytes: &[u8]) -> Vec<String> {
    let mut tokens = Vec::with_capacity(bytes.len() / 6 + 1);
    let mut current = String::new();

    for &b in bytes {
        if b.is_ascii_alphabetic() {
            current.push(char::from(b.to_ascii_uppercase()));
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// Tokenizes text. See [`tokenize_bytes`].
pub fn tokenize(text: &str) -> Vec<String> {
    tokenize_bytes(text.as_bytes())
}
