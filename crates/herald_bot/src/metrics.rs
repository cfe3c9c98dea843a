//! Run counters for the on-demand and scheduled triggers.

use crate::Trigger;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Metrics collector shared by the API and the scheduled bot.
#[derive(Debug, Clone, Default)]
pub struct PipelineMetrics {
    inner: Arc<PipelineMetricsInner>,
}

#[derive(Debug, Default)]
struct PipelineMetricsInner {
    on_demand: TriggerCounters,
    scheduled: TriggerCounters,
}

#[derive(Debug, Default)]
struct TriggerCounters {
    executions: AtomicU64,
    failures: AtomicU64,
    rejections: AtomicU64,
    last_success: parking_lot::Mutex<Option<Instant>>,
}

impl TriggerCounters {
    fn snapshot(&self) -> TriggerMetricSnapshot {
        TriggerMetricSnapshot {
            executions: self.executions.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            rejections: self.rejections.load(Ordering::Relaxed),
            seconds_since_success: self.last_success.lock().map(|i| i.elapsed().as_secs()),
        }
    }
}

impl PipelineMetrics {
    /// Creates a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    fn counters(&self, trigger: Trigger) -> &TriggerCounters {
        match trigger {
            Trigger::OnDemand => &self.inner.on_demand,
            Trigger::Scheduled => &self.inner.scheduled,
        }
    }

    /// Records the start of a run.
    pub fn record_execution(&self, trigger: Trigger) {
        self.counters(trigger)
            .executions
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Records a completed run.
    pub fn record_success(&self, trigger: Trigger) {
        *self.counters(trigger).last_success.lock() = Some(Instant::now());
    }

    /// Records a run that failed after its inputs were accepted.
    pub fn record_failure(&self, trigger: Trigger) {
        self.counters(trigger).failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a run refused because of bad caller input.
    pub fn record_rejection(&self, trigger: Trigger) {
        self.counters(trigger)
            .rejections
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Gets the execution count for a trigger.
    pub fn executions(&self, trigger: Trigger) -> u64 {
        self.counters(trigger).executions.load(Ordering::Relaxed)
    }

    /// Gets the failure count for a trigger.
    pub fn failures(&self, trigger: Trigger) -> u64 {
        self.counters(trigger).failures.load(Ordering::Relaxed)
    }

    /// Gets time since the last success for a trigger.
    pub fn time_since_success(&self, trigger: Trigger) -> Option<Duration> {
        self.counters(trigger)
            .last_success
            .lock()
            .map(|instant| instant.elapsed())
    }

    /// Gets overall success rate (0.0 - 1.0). Rejections are not counted.
    pub fn overall_success_rate(&self) -> f64 {
        let on_demand = self.inner.on_demand.snapshot();
        let scheduled = self.inner.scheduled.snapshot();
        let attempted = (on_demand.executions + scheduled.executions)
            .saturating_sub(on_demand.rejections + scheduled.rejections);
        if attempted == 0 {
            return 1.0;
        }
        let successes = attempted.saturating_sub(on_demand.failures + scheduled.failures);
        successes as f64 / attempted as f64
    }

    /// Creates a serializable snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            on_demand: self.inner.on_demand.snapshot(),
            scheduled: self.inner.scheduled.snapshot(),
            overall_success_rate: self.overall_success_rate(),
        }
    }
}

/// Serializable snapshot of pipeline metrics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    /// On-demand trigger metrics
    pub on_demand: TriggerMetricSnapshot,
    /// Scheduled trigger metrics
    pub scheduled: TriggerMetricSnapshot,
    /// Success rate across both triggers
    pub overall_success_rate: f64,
}

/// Serializable snapshot of one trigger's metrics.
#[derive(Debug, Clone, Serialize)]
pub struct TriggerMetricSnapshot {
    /// Number of runs started
    pub executions: u64,
    /// Number of runs that failed
    pub failures: u64,
    /// Number of runs refused for bad input
    pub rejections: u64,
    /// Seconds since last success
    pub seconds_since_success: Option<u64>,
}
