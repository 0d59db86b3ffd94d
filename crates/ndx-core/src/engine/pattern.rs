use super::error::EngineError;
use crate::core::models::identifiers::IdentifierSet;
use crate::core::utils::natural::natural_sort;
use regex::Regex;
use std::sync::LazyLock;

static RANGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+),(\d+)").expect("Invalid range pattern"));

/// The rule that resolved a selection pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Blank input; selects nothing.
    Empty,
    /// The pattern is itself a member of the source set.
    Exact,
    /// `<prefix><start>,<end><suffix>` expanded over the inclusive integer range.
    Range,
    /// The pattern compiled as a regular expression (unanchored).
    Regex,
}

/// Members of a source set selected by one pattern, in natural order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub rule: MatchRule,
    pub matches: Vec<String>,
}

/// A parsed `<prefix><start>,<end><suffix>` range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangePattern<'a> {
    pub prefix: &'a str,
    pub start: u64,
    pub end: u64,
    pub suffix: &'a str,
}

impl<'a> RangePattern<'a> {
    /// Parses the first `<digits>,<digits>` occurrence of `pattern`.
    ///
    /// Returns `None` when there is none or when a bound does not fit in a `u64`.
    pub fn parse(pattern: &'a str) -> Option<Self> {
        let caps = RANGE_PATTERN.captures(pattern)?;
        let whole = caps.get(0)?;
        Some(Self {
            prefix: &pattern[..whole.start()],
            start: caps[1].parse().ok()?,
            end: caps[2].parse().ok()?,
            suffix: &pattern[whole.end()..],
        })
    }

    /// Whether `id` equals `prefix + i + suffix` for some `i` in `[start, end]`, with `i`
    /// written without leading zeros.
    pub fn matches(&self, id: &str) -> bool {
        if self.start > self.end {
            return false;
        }
        let Some(digits) = id
            .strip_prefix(self.prefix)
            .and_then(|rest| rest.strip_suffix(self.suffix))
        else {
            return false;
        };
        is_canonical_integer(digits)
            && digits
                .parse::<u64>()
                .is_ok_and(|n| (self.start..=self.end).contains(&n))
    }
}

fn is_canonical_integer(text: &str) -> bool {
    !text.is_empty()
        && text.bytes().all(|b| b.is_ascii_digit())
        && (text == "0" || !text.starts_with('0'))
}

/// Resolves `pattern` against `source`.
///
/// Rules are tried in priority order: exact membership, numeric range, regular
/// expression. A pattern shaped like a range never falls through to the regex rule, even
/// when the range selects nothing. This includes counted regex quantifiers such as
/// `A{1,2}`, which must be written without a `<digits>,<digits>` run (`AA?`).
///
/// # Errors
///
/// Returns [`EngineError::InvalidPattern`] when the regex rule applies and `pattern` is
/// not a valid regular expression.
pub fn resolve<S: IdentifierSet>(pattern: &str, source: &S) -> Result<Resolution, EngineError> {
    if pattern.is_empty() {
        return Ok(Resolution {
            rule: MatchRule::Empty,
            matches: Vec::new(),
        });
    }

    if source.contains(pattern) {
        return Ok(Resolution {
            rule: MatchRule::Exact,
            matches: vec![pattern.to_string()],
        });
    }

    let (rule, mut matches) = if let Some(range) = RangePattern::parse(pattern) {
        let matches: Vec<String> = source
            .members()
            .filter(|id| range.matches(id))
            .map(str::to_owned)
            .collect();
        (MatchRule::Range, matches)
    } else {
        let regex = Regex::new(pattern).map_err(|source| EngineError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        let matches: Vec<String> = source
            .members()
            .filter(|id| regex.is_match(id))
            .map(str::to_owned)
            .collect();
        (MatchRule::Regex, matches)
    };

    natural_sort(&mut matches);
    Ok(Resolution { rule, matches })
}
