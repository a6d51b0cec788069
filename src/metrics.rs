//! Prometheus Metrics Definitions
//!
//! This module defines every Prometheus metric exposed by the SURFboard exporter. The
//! full set is created once, from the static schedules in
//! [`surfboard::types`](crate::surfboard::types), and never changes afterwards: polls
//! only change values and add channel labels.
//!
//! # Metric Categories
//!
//! ## Boot Tasks
//! One state-set per [`Task`], e.g. `surfboard_cable_modem_status`. The label carries
//! the metric's own name and one series exists per [`TaskState`]; the current state
//! is 1 and every other state is 0.
//!
//! ## Signal Readings
//! One gauge per (table, field) of the signal schedule, labeled by `channel`, e.g.
//! `surfboard_downstream_power_level{channel="3"}`.
//!
//! ## Modem and Exporter
//! - `surfboard_system_up_time` - modem uptime in seconds
//! - `surfboard_up` - whether the last poll read both pages (1=up, 0=down)
//! - `surfboard_poll_duration_seconds` - wall time of the last poll
//!
//! # Consistency
//!
//! Writers hold a write lock for a whole page update and [`MetricsCollector::render`]
//! holds the read lock, so a scrape never sees a page half applied or a task with two
//! active states.

use crate::error::Result;
use crate::parsers::{SignalReading, StatusReport};
use crate::surfboard::types::{metric_name, SignalKey, Task, TaskState, UPTIME_LABEL};
use parking_lot::RwLock;
use prometheus::{Gauge, GaugeVec, IntGauge, IntGaugeVec, Opts, Registry, TextEncoder};
use std::collections::BTreeMap;
use std::sync::Arc;

const UP_METRIC: &str = "surfboard_up";
const POLL_DURATION_METRIC: &str = "surfboard_poll_duration_seconds";

/// Metrics collector for the SURFboard exporter
#[derive(Clone)]
pub struct MetricsCollector {
    registry: Arc<Registry>,
    update_lock: Arc<RwLock<()>>,
    names: Arc<Vec<String>>,

    // Indexed by `Task::index`
    task_states: Arc<Vec<IntGaugeVec>>,
    signals: Arc<BTreeMap<SignalKey, GaugeVec>>,

    pub uptime_seconds: Arc<IntGauge>,
    pub up: Arc<Gauge>,
    pub poll_duration_seconds: Arc<Gauge>,
}

impl MetricsCollector {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let mut names = Vec::new();

        // Boot task state-sets
        let mut task_states = Vec::with_capacity(Task::ALL.len());
        for task in Task::ALL {
            let name = task.metric_name();
            let gauge = IntGaugeVec::new(Opts::new(name.as_str(), task.label()), &[name.as_str()])?;
            registry.register(Box::new(gauge.clone()))?;
            names.push(name);
            task_states.push(gauge);
        }

        // Signal gauges
        let mut signals = BTreeMap::new();
        for key in SignalKey::all() {
            let name = key.metric_name();
            let gauge = GaugeVec::new(Opts::new(name.as_str(), key.help()), &["channel"])?;
            registry.register(Box::new(gauge.clone()))?;
            names.push(name);
            signals.insert(key, gauge);
        }

        let uptime_name = metric_name(&[UPTIME_LABEL]);
        let uptime_seconds = IntGauge::new(uptime_name.as_str(), UPTIME_LABEL)?;

        let up = Gauge::new(
            UP_METRIC,
            "Whether the last poll read both modem pages (1=up, 0=down)",
        )?;

        let poll_duration_seconds = Gauge::new(
            POLL_DURATION_METRIC,
            "Wall time of the last modem poll in seconds",
        )?;

        registry.register(Box::new(uptime_seconds.clone()))?;
        registry.register(Box::new(up.clone()))?;
        registry.register(Box::new(poll_duration_seconds.clone()))?;
        names.extend([
            uptime_name,
            UP_METRIC.to_string(),
            POLL_DURATION_METRIC.to_string(),
        ]);

        let collector = Self {
            registry: Arc::new(registry),
            update_lock: Arc::new(RwLock::new(())),
            names: Arc::new(names),
            task_states: Arc::new(task_states),
            signals: Arc::new(signals),
            uptime_seconds: Arc::new(uptime_seconds),
            up: Arc::new(up),
            poll_duration_seconds: Arc::new(poll_duration_seconds),
        };

        // Every task starts out "Not started" so each state-set renders from the first scrape
        for task in Task::ALL {
            collector.write_task_state(task, TaskState::NotStarted);
        }

        Ok(collector)
    }

    /// Names of every registered metric, fixed at construction
    pub fn metric_names(&self) -> &[String] {
        &self.names
    }

    /// Set the current state of a boot task
    pub fn set_task_state(&self, task: Task, state: TaskState) {
        let _guard = self.update_lock.write();
        self.write_task_state(task, state);
    }

    /// Set a signal reading for one channel
    pub fn set_signal(&self, key: SignalKey, channel: u32, value: f64) {
        let _guard = self.update_lock.write();
        self.write_signal(key, channel, value);
    }

    /// Set the modem uptime in seconds
    pub fn set_uptime(&self, seconds: u64) {
        let _guard = self.update_lock.write();
        self.write_uptime(seconds);
    }

    /// Apply a parsed status page as a single update
    pub fn apply_status_report(&self, report: &StatusReport) {
        let _guard = self.update_lock.write();
        for &(task, state) in &report.tasks {
            self.write_task_state(task, state);
        }
        if let Some(seconds) = report.uptime_seconds {
            self.write_uptime(seconds);
        }
    }

    /// Apply parsed signal readings as a single update
    pub fn apply_signal_readings(&self, readings: &[SignalReading]) {
        let _guard = self.update_lock.write();
        for reading in readings {
            self.write_signal(reading.key, reading.channel, reading.value);
        }
    }

    /// Current state of a boot task
    pub fn task_state(&self, task: Task) -> TaskState {
        let _guard = self.update_lock.read();
        let gauge = &self.task_states[task.index()];
        TaskState::ALL
            .into_iter()
            .find(|state| gauge.with_label_values(&[state.label()]).get() == 1)
            .unwrap_or(TaskState::NotStarted)
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> Result<String> {
        let metric_families = {
            let _guard = self.update_lock.read();
            self.registry.gather()
        };
        Ok(TextEncoder::new().encode_to_string(&metric_families)?)
    }

    fn write_task_state(&self, task: Task, state: TaskState) {
        let gauge = &self.task_states[task.index()];
        for candidate in TaskState::ALL {
            gauge
                .with_label_values(&[candidate.label()])
                .set(i64::from(candidate == state));
        }
    }

    fn write_signal(&self, key: SignalKey, channel: u32, value: f64) {
        if let Some(gauge) = self.signals.get(&key) {
            gauge
                .with_label_values(&[channel.to_string().as_str()])
                .set(value);
        }
    }

    fn write_uptime(&self, seconds: u64) {
        self.uptime_seconds
            .set(i64::try_from(seconds).unwrap_or(i64::MAX));
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new().expect("Failed to create metrics collector")
    }
}
