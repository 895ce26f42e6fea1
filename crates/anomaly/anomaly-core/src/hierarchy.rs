//! Severity classification of named metrics.

use anomaly_spi::{Metric, Result, Tier};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Entry {
    /// Monotonic write stamp, used to resolve duplicate names.
    revision: u64,
    metric: Metric,
}

/// Metrics grouped by [`Tier`], each tier keeping insertion order.
///
/// `add` performs no uniqueness check, so one name may live in several
/// tiers at once. Lookup by name returns the most recently written entry;
/// `reclassify` moves the first match in tier order
/// (critical, warning, info). Lookups are linear scans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricHierarchy {
    tiers: [Vec<Entry>; 3],
    next_revision: u64,
}

impl MetricHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a metric to `tier`.
    pub fn add(&mut self, name: impl Into<String>, tier: Tier, data: Vec<f64>) {
        let metric = Metric::new(name, data);
        debug!(name = %metric.name, %tier, len = metric.data.len(), "adding metric");
        self.push(tier, metric);
    }

    /// [`add`](Self::add) with a textual tier label.
    pub fn add_labeled(&mut self, name: impl Into<String>, tier: &str, data: Vec<f64>) -> Result<()> {
        let tier: Tier = tier.parse()?;
        self.add(name, tier, data);
        Ok(())
    }

    /// Move the first metric called `name` to the end of `tier`.
    ///
    /// Returns `false`, changing nothing, when no metric has that name.
    pub fn reclassify(&mut self, name: &str, tier: Tier) -> bool {
        let found = Tier::ALL.iter().find_map(|&from| {
            self.tiers[from.index()]
                .iter()
                .position(|e| e.metric.name == name)
                .map(|pos| (from, pos))
        });

        match found {
            Some((from, pos)) => {
                let entry = self.tiers[from.index()].remove(pos);
                debug!(name, %from, to = %tier, "reclassifying metric");
                self.push(tier, entry.metric);
                true
            }
            None => false,
        }
    }

    /// [`reclassify`](Self::reclassify) with a textual tier label.
    ///
    /// An unknown label fails even when `name` is absent.
    pub fn reclassify_labeled(&mut self, name: &str, tier: &str) -> Result<bool> {
        let tier: Tier = tier.parse()?;
        Ok(self.reclassify(name, tier))
    }

    /// Metrics of `tier` in insertion order.
    pub fn metrics(&self, tier: Tier) -> impl Iterator<Item = &Metric> + '_ {
        self.tiers[tier.index()].iter().map(|e| &e.metric)
    }

    /// Names of the metrics in `tier`, in insertion order.
    pub fn names(&self, tier: Tier) -> Vec<&str> {
        self.metrics(tier).map(|m| m.name.as_str()).collect()
    }

    /// Most recently written metric called `name`.
    pub fn get(&self, name: &str) -> Option<&Metric> {
        self.latest(name).map(|(_, entry)| &entry.metric)
    }

    /// Tier holding the most recently written metric called `name`.
    pub fn tier_of(&self, name: &str) -> Option<Tier> {
        self.latest(name).map(|(tier, _)| tier)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.latest(name).is_some()
    }

    /// Number of metrics in `tier`.
    pub fn tier_len(&self, tier: Tier) -> usize {
        self.tiers[tier.index()].len()
    }

    /// Total number of metrics across all tiers.
    pub fn len(&self) -> usize {
        self.tiers.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, tier: Tier, metric: Metric) {
        let revision = self.next_revision;
        self.next_revision += 1;
        self.tiers[tier.index()].push(Entry { revision, metric });
    }

    fn latest(&self, name: &str) -> Option<(Tier, &Entry)> {
        Tier::ALL
            .iter()
            .flat_map(|&tier| self.tiers[tier.index()].iter().map(move |e| (tier, e)))
            .filter(|(_, e)| e.metric.name == name)
            .max_by_key(|(_, e)| e.revision)
    }
}
