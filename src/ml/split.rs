//! Stratified, seeded train/test splitting.

use std::collections::BTreeMap;

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::{Result, RetortError};
use crate::label::Label;

/// Row indices of the two sides of a split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StratifiedSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

impl StratifiedSplit {
    /// Pick the train and test rows out of `items`.
    pub fn select<T: Clone>(&self, items: &[T]) -> (Vec<T>, Vec<T>) {
        let pick =
            |indices: &[usize]| -> Vec<T> { indices.iter().map(|&i| items[i].clone()).collect() };
        (pick(&self.train), pick(&self.test))
    }
}

/// Split row indices so every label keeps its share on both sides.
///
/// Each label contributes `round(count * test_size)` rows to the test side,
/// clamped so that both sides receive at least one row of it. The same
/// labels, `test_size` and `seed` always produce the same split.
pub fn stratified_split(labels: &[Label], test_size: f64, seed: u64) -> Result<StratifiedSplit> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(RetortError::invalid_argument(format!(
            "test_size must be between 0 and 1, got {test_size}"
        )));
    }

    let mut by_label: BTreeMap<Label, Vec<usize>> = BTreeMap::new();
    for (idx, &label) in labels.iter().enumerate() {
        by_label.entry(label).or_default().push(idx);
    }

    if let Some((label, rows)) = by_label.iter().find(|(_, rows)| rows.len() < 2) {
        return Err(RetortError::invalid_argument(format!(
            "label '{label}' has {} sample(s); a stratified split needs at least 2 per label",
            rows.len()
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(labels.len());
    let mut test = Vec::new();

    for (label, mut rows) in by_label {
        rows.shuffle(&mut rng);
        let n_test = ((rows.len() as f64 * test_size).round() as usize).clamp(1, rows.len() - 1);
        debug!(
            "Split label '{label}': {} train / {} test",
            rows.len() - n_test,
            n_test
        );
        test.extend_from_slice(&rows[..n_test]);
        train.extend_from_slice(&rows[n_test..]);
    }

    train.shuffle(&mut rng);
    test.shuffle(&mut rng);

    Ok(StratifiedSplit { train, test })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<Label> {
        let mut labels = vec![Label::Praise; 10];
        labels.extend(vec![Label::Threat; 5]);
        labels.extend(vec![Label::Support; 2]);
        labels
    }

    #[test]
    fn test_split_is_stratified() {
        let labels = labels();
        let split = stratified_split(&labels, 0.2, 42).unwrap();

        assert_eq!(split.train.len() + split.test.len(), labels.len());

        let count =
            |rows: &[usize], label: Label| rows.iter().filter(|&&i| labels[i] == label).count();
        assert_eq!(count(&split.test, Label::Praise), 2);
        assert_eq!(count(&split.test, Label::Threat), 1);
        assert_eq!(count(&split.test, Label::Support), 1);
        assert_eq!(count(&split.train, Label::Support), 1);

        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort();
        assert_eq!(all, (0..labels.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_is_deterministic() {
        let labels = labels();
        assert_eq!(
            stratified_split(&labels, 0.2, 42).unwrap(),
            stratified_split(&labels, 0.2, 42).unwrap()
        );
    }

    #[test]
    fn test_split_rejects_singleton_label() {
        let labels = vec![Label::Praise, Label::Praise, Label::Threat];
        let error = stratified_split(&labels, 0.2, 42).unwrap_err();
        assert!(error.to_string().contains("threat"));
    }

    #[test]
    fn test_split_rejects_bad_test_size() {
        let labels = labels();
        assert!(stratified_split(&labels, 0.0, 42).is_err());
        assert!(stratified_split(&labels, 1.0, 42).is_err());
    }

    #[test]
    fn test_select() {
        let split = StratifiedSplit {
            train: vec![2, 0],
            test: vec![1],
        };
        let (train, test) = split.select(&["a", "b", "c"]);
        assert_eq!(train, vec!["c", "a"]);
        assert_eq!(test, vec!["b"]);
    }
}
