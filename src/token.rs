//! At the heart of an [`NGramModel`](crate::NGramModel) is a [`Token`]. In fact, this is just a
//! String. But we make a distinction here: A Token is a word, a single punctuation mark, or one of
//! the sentence markers [`START`] and [`END`].
//!
//! Text is turned into tokens by [`tokenize()`]. If you want more control of what a token is, you
//! can use [`NGramModel::feed_tokens()`](crate::NGramModel::feed_tokens()).

/// Representation of a string segment.
pub type Token = String;

/// Marks the beginning of a sentence. A sentence of an order `n` model is padded with `n - 1` of
/// these.
pub const START: &str = "<start>";

/// Marks the end of a sentence. Every sentence ends with exactly one.
pub const END: &str = "<end>";

/// Written in place of a token when nothing could be generated, e.g. from an empty model.
pub const NO_TOKEN: &str = "<>";

/// Characters that always become tokens of their own.
pub const PUNCTUATION: [char; 15] = [
    '.', ':', '!', '?', '\'', ',', '-', '"', ';', '(', ')', '[', ']', '{', '}',
];

/// Returns `true` if `s` is a single recognized punctuation character.
///
/// ```
/// # use ngramish::token::is_punct;
/// assert!(is_punct("?"));
/// assert!(!is_punct("?!"));
/// assert!(!is_punct("a"));
/// ```
pub fn is_punct(s: &str) -> bool {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => is_punct_char(c),
        _ => false,
    }
}

fn is_punct_char(c: char) -> bool {
    PUNCTUATION.contains(&c)
}

fn flush_word(word: &mut String, tokens: &mut Vec<Token>) {
    if !word.is_empty() {
        tokens.push(std::mem::take(word));
    }
}

/// Splits `text` into the tokens of one sentence for a model of the given `order`.
///
/// The text is trimmed, `order - 1` [`START`] markers are put in front and a single [`END`]
/// marker is put last. Words are separated by whitespace, and every punctuation character (see
/// [`PUNCTUATION`]) is a token of its own. The text is scanned one `char` at a time, so a
/// combining mark after a space or punctuation character starts a new word.
///
/// ```
/// # use ngramish::tokenize;
/// assert_eq!(
///     tokenize(2, "This is an example."),
///     vec!["<start>", "This", "is", "an", "example", ".", "<end>"]
/// );
/// ```
pub fn tokenize(order: usize, text: &str) -> Vec<Token> {
    let padding = order.saturating_sub(1);
    let mut tokens: Vec<Token> = std::iter::repeat(START)
        .take(padding)
        .map(Token::from)
        .collect();

    let mut word = String::new();
    for c in text.trim().chars() {
        if is_punct_char(c) {
            flush_word(&mut word, &mut tokens);
            tokens.push(c.to_string());
        } else if c.is_whitespace() {
            flush_word(&mut word, &mut tokens);
        } else {
            word.push(c);
        }
    }
    flush_word(&mut word, &mut tokens);

    tokens.push(END.to_string());
    tokens
}
