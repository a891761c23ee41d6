use rakast_match::Match;

use crate::error::{Error, Result};

/// Which named sub-captures a match has with content and which are present
/// but empty, computed once per match and tested in dispatch order.
///
/// Shapes are compared as exact key sets: a match with an extra capture does
/// not satisfy a smaller shape. The first matching shape wins; the tests are
/// ordered by the caller because the grammar does not populate overlapping
/// shapes ambiguously, only the factory's ordering keeps them disjoint.
pub(crate) struct Shape {
    filled: Vec<Box<str>>,
    empty: Vec<Box<str>>,
}

impl Shape {
    pub(crate) fn of(m: &Match) -> Self {
        let mut filled: Vec<Box<str>> = m.filled_keys().map(Into::into).collect();
        let mut empty: Vec<Box<str>> = m.empty_keys().map(Into::into).collect();
        filled.sort_unstable();
        empty.sort_unstable();
        Self { filled, empty }
    }

    /// Exact-set test: the match has precisely `filled` captures with
    /// content and precisely `empty` captures present without content.
    pub(crate) fn is(&self, filled: &[&str], empty: &[&str]) -> bool {
        same_set(&self.filled, filled) && same_set(&self.empty, empty)
    }
}

fn same_set(actual: &[Box<str>], expected: &[&str]) -> bool {
    if actual.len() != expected.len() {
        return false;
    }
    let mut expected = expected.to_vec();
    expected.sort_unstable();
    actual.iter().zip(expected).all(|(a, e)| a.as_ref() == e)
}

/// The fail-fast terminal branch of every dispatch function: report the
/// production and the classified key sets, abort the build.
pub(crate) fn unhandled(production: &'static str, m: &Match) -> Error {
    let mut filled: Vec<String> = m.filled_keys().map(Into::into).collect();
    let mut empty: Vec<String> = m.empty_keys().map(Into::into).collect();
    filled.sort_unstable();
    empty.sort_unstable();
    Error::UnhandledMatch { production, filled, empty, range: m.range() }
}

/// Fetches a capture a shape test has already established. Failing here
/// means the shape test and the access disagree, which is reported like any
/// other unhandled shape rather than panicking.
pub(crate) fn expect_capture<'m>(
    production: &'static str,
    m: &'m Match,
    key: &str,
) -> Result<&'m Match> {
    m.capture(key).ok_or_else(|| unhandled(production, m))
}
