//! Compact character-class specifications.

/// A predicate over a single character, compiled from a compact
/// specification string.
///
/// The specification is read left to right: `a-b` between two characters is
/// an inclusive range, a leading `^` on a non-empty spec negates the whole
/// class, and every other character is a literal member. A `-` at either end
/// of the spec is a literal. The empty specification matches every
/// character.
///
/// A reversed range (`z-a`) is a bug in the grammar, not in the input, and
/// panics at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharClass {
    negated: bool,
    singles: Vec<char>,
    ranges: Vec<(char, char)>,
}

impl CharClass {
    pub fn new(spec: &str) -> Self {
        let chars: Vec<char> = spec.chars().collect();
        let negated = chars.len() > 1 && chars[0] == '^';
        let mut singles = Vec::new();
        let mut ranges = Vec::new();

        let mut i = usize::from(negated);
        while i < chars.len() {
            if chars.get(i + 1) == Some(&'-') && i + 2 < chars.len() {
                let (lo, hi) = (chars[i], chars[i + 2]);
                if lo > hi {
                    panic!("malformed character class `{spec}`: range `{lo}-{hi}` is reversed");
                }
                ranges.push((lo, hi));
                i += 3;
            } else {
                singles.push(chars[i]);
                i += 1;
            }
        }

        Self {
            negated,
            singles,
            ranges,
        }
    }

    pub fn matches(&self, ch: char) -> bool {
        if self.singles.is_empty() && self.ranges.is_empty() {
            return true;
        }
        let member = self.singles.contains(&ch)
            || self.ranges.iter().any(|&(lo, hi)| (lo..=hi).contains(&ch));
        member != self.negated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_range() {
        let class = CharClass::new("0-9");
        assert!(class.matches('0'));
        assert!(class.matches('5'));
        assert!(class.matches('9'));
        assert!(!class.matches('a'));
        assert!(!class.matches('/'));
        assert!(!class.matches(':'));
    }

    #[test]
    fn multiple_ranges_and_literals() {
        let class = CharClass::new("0-9a-fA-F_");
        assert!(class.matches('b'));
        assert!(class.matches('D'));
        assert!(class.matches('_'));
        assert!(!class.matches('g'));
    }

    #[test]
    fn empty_spec_matches_everything() {
        let class = CharClass::new("");
        assert!(class.matches('x'));
        assert!(class.matches('\n'));
        assert!(class.matches('é'));
    }

    #[test]
    fn dash_at_either_end_is_literal() {
        let leading = CharClass::new("-0-9");
        assert!(leading.matches('-'));
        assert!(leading.matches('7'));
        let trailing = CharClass::new("a-");
        assert!(trailing.matches('a'));
        assert!(trailing.matches('-'));
        assert!(!trailing.matches('b'));
    }

    #[test]
    fn negation() {
        let class = CharClass::new("^0-9");
        assert!(!class.matches('3'));
        assert!(class.matches('x'));
    }

    #[test]
    fn lone_caret_is_literal() {
        let class = CharClass::new("^");
        assert!(class.matches('^'));
        assert!(!class.matches('a'));
    }

    #[test]
    #[should_panic(expected = "reversed")]
    fn reversed_range_panics() {
        CharClass::new("9-0");
    }
}
