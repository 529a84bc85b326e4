//! Yes/no interpretation of user responses.

use std::fmt;

use crate::domain::error::DomainError;

/// A user's response at a decision node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Yes => write!(f, "yes"),
            Answer::No => write!(f, "no"),
        }
    }
}

/// Interprets a response: anything starting with `n` or `N` is no, every
/// other non-empty string is yes.
///
/// The input is not trimmed, so `" no"` reads as yes.
pub fn parse_yes_no(response: &str) -> Result<Answer, DomainError> {
    let first = response.chars().next().ok_or(DomainError::EmptyAnswer)?;
    if first.to_lowercase().eq(['n']) {
        Ok(Answer::No)
    } else {
        Ok(Answer::Yes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("no", Answer::No)]
    #[case("N", Answer::No)]
    #[case("nope", Answer::No)]
    #[case("NO WAY", Answer::No)]
    #[case("yes", Answer::Yes)]
    #[case("Y", Answer::Yes)]
    #[case("anything else", Answer::Yes)]
    #[case(" no", Answer::Yes)]
    #[case("maybe not", Answer::Yes)]
    fn test_parse_yes_no(#[case] input: &str, #[case] expected: Answer) {
        assert_eq!(parse_yes_no(input).unwrap(), expected);
    }

    #[test]
    fn test_parse_yes_no_empty_is_error() {
        assert!(matches!(parse_yes_no(""), Err(DomainError::EmptyAnswer)));
    }
}
