use crate::GameError;
use serde::Serialize;

/// Append-only per-round records of one player or group.
///
/// Rounds are 1-based. Records can only be appended for the next round in
/// sequence and are never modified afterwards, so later rounds can rely on
/// earlier ones for cumulative totals and previous-round lookups.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct History<T> {
    records: Vec<T>,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T> History<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rounds recorded so far.
    pub fn rounds(&self) -> u32 {
        self.records.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends the record for `round`, which must be the round right after the
    /// last recorded one.
    pub fn push(&mut self, round: u32, record: T) -> Result<(), GameError> {
        let expected = self.rounds() + 1;
        if round != expected {
            return Err(GameError::OutOfSequence {
                expected,
                got: round,
            });
        }
        self.records.push(record);
        Ok(())
    }

    pub fn in_round(&self, round: u32) -> Option<&T> {
        let index = round.checked_sub(1)?;
        self.records.get(index as usize)
    }

    /// Record of the round before `round`, if any.
    pub fn previous(&self, round: u32) -> Option<&T> {
        self.in_round(round.checked_sub(1)?)
    }

    pub fn last(&self) -> Option<&T> {
        self.records.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.iter()
    }

    /// Records paired with their 1-based round number.
    pub fn iter_rounds(&self) -> impl Iterator<Item = (u32, &T)> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| (index as u32 + 1, record))
    }

    pub fn as_slice(&self) -> &[T] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_in_sequence() {
        let mut history = History::new();
        history.push(1, "a").unwrap();
        history.push(2, "b").unwrap();
        assert_eq!(history.rounds(), 2);
        assert_eq!(history.in_round(1), Some(&"a"));
        assert_eq!(history.in_round(2), Some(&"b"));
        assert_eq!(history.in_round(0), None);
        assert_eq!(history.in_round(3), None);
        assert_eq!(history.last(), Some(&"b"));
    }

    #[test]
    fn test_push_rejects_gaps_and_rewrites() {
        let mut history = History::new();
        assert_eq!(
            history.push(2, 10),
            Err(GameError::OutOfSequence {
                expected: 1,
                got: 2
            })
        );
        history.push(1, 10).unwrap();
        assert_eq!(
            history.push(1, 11),
            Err(GameError::OutOfSequence {
                expected: 2,
                got: 1
            })
        );
        assert_eq!(history.as_slice(), &[10]);
    }

    #[test]
    fn test_previous() {
        let mut history = History::new();
        history.push(1, 'x').unwrap();
        history.push(2, 'y').unwrap();
        assert_eq!(history.previous(1), None);
        assert_eq!(history.previous(2), Some(&'x'));
        assert_eq!(history.previous(3), Some(&'y'));
        assert_eq!(history.previous(0), None);
    }

    #[test]
    fn test_iter_rounds() {
        let mut history = History::new();
        history.push(1, 5).unwrap();
        history.push(2, 7).unwrap();
        let rounds: Vec<_> = history.iter_rounds().collect();
        assert_eq!(rounds, vec![(1, &5), (2, &7)]);
    }

    #[test]
    fn test_serializes_as_list() {
        let mut history = History::new();
        history.push(1, 3).unwrap();
        assert_eq!(serde_json::to_string(&history).unwrap(), "[3]");
    }
}
