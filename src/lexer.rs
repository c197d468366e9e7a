//! A module implementing lexical analysis (tokenization) for command lines.
//!
//! The command language here is deliberately tiny: a line is a sequence of
//! words separated by whitespace, nothing more. There is no quoting,
//! escaping, globbing or substitution, so tokenization never fails.

/// Characters that separate words on a command line.
///
/// Besides the usual blanks this includes the bell character, which stray
/// terminal input can leave embedded in a line.
const DELIMITERS: [char; 5] = [' ', '\t', '\r', '\n', '\u{7}'];

/// Splits a command line into whitespace-delimited words.
///
/// Words are the maximal delimiter-free substrings of `line`, returned in
/// left-to-right order as owned strings. Runs of consecutive delimiters
/// collapse, so the result never contains an empty word; an empty or
/// all-whitespace line yields an empty vector, which the dispatcher treats
/// as a no-op.
pub fn split_into_tokens(line: &str) -> Vec<String> {
    line.split(|ch| DELIMITERS.contains(&ch))
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
        .collect()
}
