//! Per-(SOI, A, B) accumulation of verdicts across trees.

use crate::analysis::classifier::Verdict;
use serde::Serialize;
use std::collections::HashMap;

// =#========================================================================#=
// TRIPLE KEY
// =#========================================================================#=
/// Key of a tally entry: species of interest and the two reference taxa.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TripleKey {
    #[serde(rename = "SOI")]
    pub soi: String,
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
}

impl TripleKey {
    pub fn new(soi: impl Into<String>, a: impl Into<String>, b: impl Into<String>) -> Self {
        TripleKey {
            soi: soi.into(),
            a: a.into(),
            b: b.into(),
        }
    }
}

// =#========================================================================#=
// COUNTS
// =#========================================================================#=
/// Verdict counters of one key.
///
/// `trees_processed` counts every verdict (including errors), so it always
/// equals the sum of the four verdict counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub trees_processed: usize,
    #[serde(rename = "closer_to_A")]
    pub closer_to_a: usize,
    #[serde(rename = "closer_to_B")]
    pub closer_to_b: usize,
    pub undetermined: usize,
    pub errors: usize,
}

impl Counts {
    /// Counts one verdict.
    pub fn record(&mut self, verdict: Verdict) {
        self.trees_processed += 1;
        match verdict {
            Verdict::CloserToA => self.closer_to_a += 1,
            Verdict::CloserToB => self.closer_to_b += 1,
            Verdict::Undetermined => self.undetermined += 1,
            Verdict::Error => self.errors += 1,
        }
    }
}

/// A key together with its counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TallyEntry {
    #[serde(flatten)]
    pub key: TripleKey,
    #[serde(flatten)]
    pub counts: Counts,
}

// =#========================================================================#=
// TALLY
// =#========================================================================#=
/// Ordered table of [TallyEntry] over the full SOI × A × B cross product.
///
/// Entries are created up front, so keys never observed in any tree are
/// still reported with zero counts. The order is fixed at construction:
/// SOI outermost, then A, then B. A key occurring twice in the cross
/// product (because a list repeats a name) is kept once, at its first
/// position.
#[derive(Debug, Clone, Default)]
pub struct Tally {
    entries: Vec<TallyEntry>,
    index: HashMap<TripleKey, usize>,
}

impl Tally {
    /// Creates a zeroed tally for the cross product of the given lists.
    pub fn from_lists<S: AsRef<str>>(soi_list: &[S], a_list: &[S], b_list: &[S]) -> Self {
        let mut tally = Tally::default();
        for soi in soi_list {
            for a in a_list {
                for b in b_list {
                    let key = TripleKey::new(soi.as_ref(), a.as_ref(), b.as_ref());
                    if !tally.index.contains_key(&key) {
                        tally.index.insert(key.clone(), tally.entries.len());
                        tally.entries.push(TallyEntry {
                            key,
                            counts: Counts::default(),
                        });
                    }
                }
            }
        }
        tally
    }

    /// Returns the keys in enumeration order.
    pub fn keys(&self) -> impl Iterator<Item = &TripleKey> {
        self.entries.iter().map(|e| &e.key)
    }

    /// Returns the entries in enumeration order.
    pub fn entries(&self) -> &[TallyEntry] {
        &self.entries
    }

    /// Returns the counts of a key, if it is part of the tally.
    pub fn get(&self, key: &TripleKey) -> Option<&Counts> {
        self.index.get(key).map(|&i| &self.entries[i].counts)
    }

    /// Counts `verdict` for `key`.
    ///
    /// # Returns
    /// `false` (and counts nothing) if `key` is not part of the tally.
    pub fn record(&mut self, key: &TripleKey, verdict: Verdict) -> bool {
        match self.index.get(key) {
            Some(&i) => {
                self.entries[i].counts.record(verdict);
                true
            }
            None => false,
        }
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the tally has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_product_order() {
        let tally = Tally::from_lists(&["S1", "S2"], &["A1", "A2"], &["B1"]);
        let keys: Vec<_> = tally.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                TripleKey::new("S1", "A1", "B1"),
                TripleKey::new("S1", "A2", "B1"),
                TripleKey::new("S2", "A1", "B1"),
                TripleKey::new("S2", "A2", "B1"),
            ]
        );
        assert!(tally.entries().iter().all(|e| e.counts == Counts::default()));
    }

    #[test]
    fn test_repeated_names_are_kept_once() {
        let tally = Tally::from_lists(&["S", "S"], &["A"], &["B", "B"]);
        assert_eq!(tally.len(), 1);
    }

    #[test]
    fn test_empty_list_gives_empty_tally() {
        let tally = Tally::from_lists::<&str>(&[], &["A"], &["B"]);
        assert!(tally.is_empty());
    }

    #[test]
    fn test_record() {
        let mut tally = Tally::from_lists(&["S"], &["A"], &["B"]);
        let key = TripleKey::new("S", "A", "B");
        for verdict in [
            Verdict::CloserToA,
            Verdict::CloserToA,
            Verdict::Undetermined,
            Verdict::Error,
        ] {
            assert!(tally.record(&key, verdict));
        }
        assert!(!tally.record(&TripleKey::new("X", "A", "B"), Verdict::CloserToB));

        let counts = tally.get(&key).unwrap();
        assert_eq!(counts.trees_processed, 4);
        assert_eq!(counts.closer_to_a, 2);
        assert_eq!(counts.closer_to_b, 0);
        assert_eq!(counts.undetermined, 1);
        assert_eq!(counts.errors, 1);
    }
}
