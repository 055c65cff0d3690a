use std::collections::HashSet;

use indexmap::IndexMap;

use super::metric::PerformanceData;
use crate::error::{PluginError, Result};

/// Ordered collection of metrics with unique labels.
///
/// Emission order is first-insertion order. Replacing a metric keeps its
/// original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerfDataSet {
    metrics: IndexMap<String, PerformanceData>,
}

impl PerfDataSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and inserts a batch of metrics, all or nothing.
    ///
    /// With `allow_duplicates` false a label already stored, or repeated
    /// within the batch, rejects the batch. With it true the later metric
    /// replaces the earlier one.
    ///
    /// # Errors
    /// Returns `InvalidMetric` for the first metric that fails validation or
    /// `DuplicateMetric` for the first clashing label. The set is unchanged
    /// on error.
    pub fn add<I>(&mut self, allow_duplicates: bool, metrics: I) -> Result<()>
    where
        I: IntoIterator<Item = PerformanceData>,
    {
        let batch: Vec<PerformanceData> = metrics.into_iter().collect();

        for (index, metric) in batch.iter().enumerate() {
            metric
                .validate()
                .map_err(|rule| PluginError::InvalidMetric {
                    index,
                    label: metric.label.clone(),
                    rule,
                })?;
        }

        if !allow_duplicates {
            let mut seen = HashSet::with_capacity(batch.len());
            for metric in &batch {
                if self.metrics.contains_key(&metric.label) || !seen.insert(metric.label.as_str()) {
                    return Err(PluginError::DuplicateMetric {
                        label: metric.label.clone(),
                    });
                }
            }
        }

        for metric in batch {
            tracing::debug!(
                target: crate::logging::TARGET,
                label = %metric.label,
                "performance metric accepted"
            );
            self.metrics.insert(metric.label.clone(), metric);
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&PerformanceData> {
        self.metrics.get(label)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PerformanceData> {
        self.metrics.values()
    }

    /// Renders all metrics separated by single spaces.
    #[must_use]
    pub fn render(&self) -> String {
        self.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
#[path = "set_tests.rs"]
mod tests;
