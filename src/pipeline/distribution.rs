//! Per-label counts and their text bar chart.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::label::Label;

/// Widest bar, in characters.
const MAX_BAR_WIDTH: usize = 40;

/// How often each label occurs, in label order. Absent labels are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelDistribution {
    counts: Vec<(Label, usize)>,
}

impl LabelDistribution {
    /// Count the labels of an iterator.
    pub fn from_labels<I: IntoIterator<Item = Label>>(labels: I) -> Self {
        let mut counts: BTreeMap<Label, usize> = BTreeMap::new();
        for label in labels {
            *counts.entry(label).or_insert(0) += 1;
        }
        Self {
            counts: counts.into_iter().collect(),
        }
    }

    pub fn counts(&self) -> &[(Label, usize)] {
        &self.counts
    }

    /// Occurrences of one label.
    pub fn count(&self, label: Label) -> usize {
        self.counts
            .iter()
            .find(|(l, _)| *l == label)
            .map_or(0, |&(_, n)| n)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|&(_, n)| n).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Render a horizontal bar chart under `title`.
    ///
    /// ```text
    /// Label distribution in dataset
    ///
    /// praise | ######################################## 4
    /// threat | ####################                     2
    /// ```
    pub fn render_chart(&self, title: &str) -> String {
        let mut chart = String::new();
        let _ = writeln!(chart, "{title}");
        let _ = writeln!(chart);

        let name_width = self
            .counts
            .iter()
            .map(|(label, _)| label.as_str().len())
            .max()
            .unwrap_or(0);
        let max_count = self.counts.iter().map(|&(_, n)| n).max().unwrap_or(0);

        for &(label, count) in &self.counts {
            let bar_len = if max_count == 0 {
                0
            } else {
                (count * MAX_BAR_WIDTH).div_ceil(max_count)
            };
            let _ = writeln!(
                chart,
                "{:<name_width$} | {:<bar_width$} {}",
                label.as_str(),
                "#".repeat(bar_len),
                count,
                bar_width = MAX_BAR_WIDTH
            );
        }
        chart
    }

    /// Write the chart to a file, creating parent directories as needed.
    pub fn write_chart<P: AsRef<Path>>(&self, path: P, title: &str) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.render_chart(title))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_in_label_order() {
        let distribution = LabelDistribution::from_labels([
            Label::Threat,
            Label::Praise,
            Label::Threat,
            Label::ConstructiveCriticism,
        ]);

        assert_eq!(
            distribution.counts(),
            &[
                (Label::ConstructiveCriticism, 1),
                (Label::Praise, 1),
                (Label::Threat, 2)
            ]
        );
        assert_eq!(distribution.total(), 4);
        assert_eq!(distribution.count(Label::Threat), 2);
        assert_eq!(distribution.count(Label::Support), 0);
    }

    #[test]
    fn test_render_chart() {
        let distribution =
            LabelDistribution::from_labels([Label::Praise, Label::Praise, Label::Threat]);
        let chart = distribution.render_chart("Label distribution in dataset");
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines[0], "Label distribution in dataset");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], format!("praise | {} 2", "#".repeat(40)));
        assert_eq!(lines[3], format!("threat | {:<40} 1", "#".repeat(20)));
    }

    #[test]
    fn test_empty_distribution() {
        let distribution = LabelDistribution::from_labels([]);
        assert!(distribution.is_empty());
        assert_eq!(distribution.render_chart("Empty"), "Empty\n\n");
    }
}
