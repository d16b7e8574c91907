//! Divisor-rule sequence generation (FizzBuzz and custom rule sets).
//!
//! A [`RuleSet`] maps divisors to labels in insertion order. For every `i` in `1..=n`,
//! [`SequenceGenerator`] yields the concatenation of the labels whose divisor divides `i`,
//! or `i` itself when none does.
//!
//! ```rust
//! use rust_data_exercises::sequence::{RuleSet, SequenceGenerator};
//!
//! let rules = RuleSet::parse(["2:Foo", "3:Bar"]).unwrap();
//! let seq: Vec<String> = SequenceGenerator::new(6, rules).iter().collect();
//! assert_eq!(seq, ["1", "Foo", "Bar", "Foo", "5", "FooBar"]);
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::iter::FusedIterator;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SequenceError, SequenceResult};

/// A `(divisor, label)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub divisor: u64,
    pub label: String,
}

impl Rule {
    fn validate(self) -> SequenceResult<Self> {
        if self.divisor == 0 {
            return Err(SequenceError::RuleFormat {
                rule: format!("{}:{}", self.divisor, self.label),
                reason: "divisor must be a positive integer".to_string(),
            });
        }
        Ok(self)
    }
}

impl FromStr for Rule {
    type Err = SequenceError;

    /// Parse `divisor:label`, e.g. `3:Fizz`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_err = |reason: &str| SequenceError::RuleFormat {
            rule: s.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = s.split(':');
        let (Some(divisor), Some(label), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(format_err("expected exactly one ':'"));
        };

        let divisor: i64 = divisor
            .trim()
            .parse()
            .map_err(|e: std::num::ParseIntError| format_err(&e.to_string()))?;
        if divisor <= 0 {
            return Err(format_err("divisor must be a positive integer"));
        }

        Ok(Rule {
            divisor: divisor as u64,
            label: label.to_string(),
        })
    }
}

/// Ordered divisor → label mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// An empty rule set; every value renders as its number.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Insert or replace a rule. A replaced divisor keeps its original position.
    pub fn insert(&mut self, rule: Rule) {
        match self.rules.iter_mut().find(|r| r.divisor == rule.divisor) {
            Some(existing) => existing.label = rule.label,
            None => self.rules.push(rule),
        }
    }

    /// Parse every `divisor:label` string. The first malformed rule fails the whole set.
    pub fn parse<I, S>(rules: I) -> SequenceResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::empty();
        for raw in rules {
            set.insert(raw.as_ref().parse()?);
        }
        Ok(set)
    }

    /// Read a JSON array of `{"divisor": 3, "label": "Fizz"}` objects.
    pub fn from_json_reader<R: Read>(reader: R) -> SequenceResult<Self> {
        let rules: Vec<Rule> = serde_json::from_reader(reader)?;
        let mut set = Self::empty();
        for rule in rules {
            set.insert(rule.validate()?);
        }
        Ok(set)
    }

    pub fn from_json_path(path: impl AsRef<Path>) -> SequenceResult<Self> {
        Self::from_json_reader(BufReader::new(File::open(path)?))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Render a single value.
    pub fn apply(&self, i: u64) -> String {
        let labels: String = self
            .rules
            .iter()
            .filter(|r| i % r.divisor == 0)
            .map(|r| r.label.as_str())
            .collect();
        if labels.is_empty() { i.to_string() } else { labels }
    }
}

impl Default for RuleSet {
    /// `3:Fizz`, `5:Buzz`.
    fn default() -> Self {
        let mut set = Self::empty();
        set.insert(Rule { divisor: 3, label: "Fizz".to_string() });
        set.insert(Rule { divisor: 5, label: "Buzz".to_string() });
        set
    }
}

/// Parse a sequence upper bound; it must be a positive integer.
pub fn parse_upper_bound(raw: &str) -> SequenceResult<u64> {
    let invalid = |reason: String| SequenceError::InvalidUpperBound {
        raw: raw.to_string(),
        reason,
    };
    let n: i64 = raw.trim().parse().map_err(|e: std::num::ParseIntError| invalid(e.to_string()))?;
    if n <= 0 {
        return Err(invalid("the number must be positive".to_string()));
    }
    Ok(n as u64)
}

/// Finite, restartable sequence over `1..=upper`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceGenerator {
    upper: u64,
    rules: RuleSet,
}

impl SequenceGenerator {
    pub fn new(upper: u64, rules: RuleSet) -> Self {
        Self { upper, rules }
    }

    pub fn upper(&self) -> u64 {
        self.upper
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// A fresh lazy pass starting at 1.
    pub fn iter(&self) -> Sequence<'_> {
        Sequence {
            rules: &self.rules,
            next: 1,
            upper: self.upper,
        }
    }
}

impl<'a> IntoIterator for &'a SequenceGenerator {
    type Item = String;
    type IntoIter = Sequence<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator returned by [`SequenceGenerator::iter`].
#[derive(Debug, Clone)]
pub struct Sequence<'a> {
    rules: &'a RuleSet,
    next: u64,
    upper: u64,
}

impl Iterator for Sequence<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.next > self.upper {
            return None;
        }
        let i = self.next;
        self.next += 1;
        Some(self.rules.apply(i))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.next > self.upper { 0 } else { self.upper - self.next + 1 };
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for Sequence<'_> {}
