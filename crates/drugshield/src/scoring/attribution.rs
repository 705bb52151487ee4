use super::domain::LineItem;
use super::round2;
use std::collections::HashMap;

/// Per-medication point ledger. Keeps first-insertion order so ties sort deterministically.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Attribution {
    entries: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl Attribution {
    /// Ledger pre-populated with every name at zero points.
    pub(crate) fn seeded<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut attribution = Self::default();
        for name in names {
            attribution.credit(name, 0.0);
        }
        attribution
    }

    /// Adds points to a medication. Blank names are ignored.
    pub(crate) fn credit(&mut self, name: impl Into<String>, points: f64) {
        let name = name.into();
        if name.is_empty() {
            return;
        }

        match self.index.get(&name) {
            Some(&position) => self.entries[position].1 += points,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, points));
            }
        }
    }

    /// Splits `points` evenly across `names`.
    pub(crate) fn spread<'a, I>(&mut self, names: I, points: f64)
    where
        I: IntoIterator<Item = &'a str>,
        I::IntoIter: ExactSizeIterator,
    {
        let names = names.into_iter();
        let count = names.len();
        if count == 0 {
            return;
        }

        let share = points / count as f64;
        for name in names {
            self.credit(name, share);
        }
    }

    pub(crate) fn merge(&mut self, other: Attribution) {
        for (name, points) in other.entries {
            self.credit(name, points);
        }
    }

    #[cfg(test)]
    pub(crate) fn points_for(&self, name: &str) -> Option<f64> {
        self.index.get(name).map(|&position| self.entries[position].1)
    }

    #[cfg(test)]
    pub(crate) fn total(&self) -> f64 {
        self.entries.iter().map(|(_, points)| points).sum()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Impact list sorted by points, highest first.
    pub(crate) fn into_impacts(self) -> Vec<LineItem> {
        let mut impacts: Vec<LineItem> = self
            .entries
            .into_iter()
            .map(|(name, points)| LineItem::new(name, round2(points)))
            .collect();
        impacts.sort_by(|left, right| right.points.total_cmp(&left.points));
        impacts
    }
}
