use std::iter;

use recur::{trace_id, Step};

/// Every proper prefix of `s`, then `s` without its first character, then
/// the same again for that shorter string.
pub fn all_substrings(s: &str) -> impl Iterator<Item = Step<'_, &str>> {
    let segment = s.char_indices().nth(1).map(|(second, _)| {
        let rest = &s[second..];
        s.char_indices()
            .skip(1)
            .map(move |(end, _)| Step::item(trace_id("", &s[..end])))
            .chain(iter::once(Step::item(trace_id("", rest))))
            .chain(iter::once(Step::tail(move || all_substrings(rest))))
    });
    segment.into_iter().flatten()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use recur::recur_gen;

    use super::*;

    #[test]
    fn test_all_substrings() {
        let found: BTreeSet<_> = recur_gen(all_substrings("abcd")).collect();
        let expected: BTreeSet<_> =
            ["a", "b", "c", "d", "ab", "bc", "cd", "abc", "bcd"].into_iter().collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_all_substrings_order() {
        let found: Vec<_> = recur_gen(all_substrings("abcd")).collect();
        assert_eq!(found, ["a", "ab", "abc", "bcd", "b", "bc", "cd", "c", "d"]);
    }

    #[test]
    fn test_short_inputs() {
        assert_eq!(recur_gen(all_substrings("")).count(), 0);
        assert_eq!(recur_gen(all_substrings("x")).count(), 0);
    }

    #[test]
    fn test_multibyte() {
        let found: Vec<_> = recur_gen(all_substrings("äöü")).collect();
        assert_eq!(found, ["ä", "äö", "öü", "ö", "ü"]);
    }
}
