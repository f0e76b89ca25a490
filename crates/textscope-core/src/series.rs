//! Bounded rolling history of normalized samples, keyed by metric.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// Default history capacity; wide terminals can still fill every column.
pub const DEFAULT_CAPACITY: usize = 1200;

/// Identifier of a tracked metric (`cpu`, `ram`, `gpu`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricKey(String);

impl MetricKey {
    /// Create a key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// CPU utilisation.
    #[must_use]
    pub fn cpu() -> Self {
        Self::new("cpu")
    }

    /// Memory utilisation.
    #[must_use]
    pub fn ram() -> Self {
        Self::new("ram")
    }

    /// GPU utilisation.
    #[must_use]
    pub fn gpu() -> Self {
        Self::new("gpu")
    }

    /// Key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MetricKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Clamp to [0.0, 1.0]; NaN becomes 0.
#[must_use]
pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Fixed-capacity FIFO of samples in [0.0, 1.0], oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesBuffer {
    data: VecDeque<f64>,
    capacity: usize,
}

impl TimeSeriesBuffer {
    /// Create an empty buffer. A zero capacity is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Create a buffer already full of zeros, so charts start as flat lines.
    #[must_use]
    pub fn zeroed(capacity: usize) -> Self {
        let mut buffer = Self::new(capacity);
        buffer.data.extend(std::iter::repeat(0.0).take(buffer.capacity));
        buffer
    }

    /// Append a sample, clamped to [0.0, 1.0]. Evicts the oldest when full.
    pub fn push(&mut self, value: f64) {
        if self.data.len() == self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(clamp01(value));
    }

    /// Up to `n` most recent samples, oldest first. No padding.
    #[must_use]
    pub fn tail(&self, n: usize) -> Vec<f64> {
        let start = self.data.len().saturating_sub(n);
        self.data.range(start..).copied().collect()
    }

    /// Most recent sample.
    #[must_use]
    pub fn last(&self) -> Option<f64> {
        self.data.back().copied()
    }

    /// Number of stored samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether no samples are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Maximum number of samples.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all samples.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

/// All tracked series plus the latest value of each metric.
#[derive(Debug, Clone)]
pub struct SeriesStore {
    series: HashMap<MetricKey, TimeSeriesBuffer>,
    capacity: usize,
    prefill: bool,
}

impl SeriesStore {
    /// Create a store for the given metrics.
    ///
    /// With `prefill` every series starts full of zeros.
    #[must_use]
    pub fn new(capacity: usize, prefill: bool, keys: impl IntoIterator<Item = MetricKey>) -> Self {
        let mut store = Self {
            series: HashMap::new(),
            capacity: capacity.max(1),
            prefill,
        };
        for key in keys {
            let buffer = store.fresh_buffer();
            store.series.insert(key, buffer);
        }
        store
    }

    /// Store tracking `cpu`, `ram` and `gpu`.
    #[must_use]
    pub fn system(capacity: usize, prefill: bool) -> Self {
        Self::new(
            capacity,
            prefill,
            [MetricKey::cpu(), MetricKey::ram(), MetricKey::gpu()],
        )
    }

    fn fresh_buffer(&self) -> TimeSeriesBuffer {
        if self.prefill {
            TimeSeriesBuffer::zeroed(self.capacity)
        } else {
            TimeSeriesBuffer::new(self.capacity)
        }
    }

    /// Append a sample. A key seen for the first time starts a new series.
    pub fn append(&mut self, key: &MetricKey, value: f64) {
        if !self.series.contains_key(key) {
            tracing::debug!(metric = %key, "registering new metric series");
            let buffer = self.fresh_buffer();
            self.series.insert(key.clone(), buffer);
        }
        if let Some(buffer) = self.series.get_mut(key) {
            buffer.push(value);
        }
    }

    /// Up to `n` most recent samples of a metric; empty for unknown keys.
    #[must_use]
    pub fn tail(&self, key: &MetricKey, n: usize) -> Vec<f64> {
        self.series
            .get(key)
            .map(|buffer| buffer.tail(n))
            .unwrap_or_default()
    }

    /// Latest sample of a metric, 0.0 when unknown or empty.
    #[must_use]
    pub fn latest(&self, key: &MetricKey) -> f64 {
        self.series
            .get(key)
            .and_then(TimeSeriesBuffer::last)
            .unwrap_or(0.0)
    }

    /// Series of a metric.
    #[must_use]
    pub fn get(&self, key: &MetricKey) -> Option<&TimeSeriesBuffer> {
        self.series.get(key)
    }

    /// Tracked metric keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<&MetricKey> {
        let mut keys: Vec<_> = self.series.keys().collect();
        keys.sort();
        keys
    }

    /// Per-series capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Reinitialize every series, keeping the set of keys.
    pub fn reset(&mut self) {
        let keys: Vec<MetricKey> = self.series.keys().cloned().collect();
        for key in keys {
            let buffer = self.fresh_buffer();
            self.series.insert(key, buffer);
        }
    }
}
