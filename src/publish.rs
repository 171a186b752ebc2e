//! The boundary between extraction and the monitoring controller.
//!
//! Values cross this boundary truncated toward zero to integer precision,
//! tagged with the fixed rollup qualifiers the controller expects for
//! instantaneous observations.

use crate::Result;
use std::io::Write;

const LOG_TARGET: &str = "   publish";

/// How the controller aggregates values reported within one minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Aggregation {
    Average,
    Observation,
    Sum,
}

/// How the controller rolls values up over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum TimeRollup {
    Average,
    Current,
    Sum,
}

/// How the controller rolls values up across a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum ClusterRollup {
    Individual,
    Collective,
}

/// One reported metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricObservation {
    pub name: String,
    pub value: i64,
    pub aggregation: Aggregation,
    pub time_rollup: TimeRollup,
    pub cluster_rollup: ClusterRollup,
}

impl MetricObservation {
    /// Build an instantaneous observation, truncating `value` toward zero.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, reason = "truncation toward zero is the wire contract")]
    pub fn observed(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: value as i64,
            aggregation: Aggregation::Observation,
            time_rollup: TimeRollup::Average,
            cluster_rollup: ClusterRollup::Individual,
        }
    }
}

/// Where surviving metrics go at the end of a poll cycle.
pub trait MetricSink {
    /// Hand one observation to the controller.
    fn report(&mut self, observation: &MetricObservation) -> Result<()>;
}

/// Sink writing machine-agent protocol lines to a writer, one per metric:
/// `name=<name>,value=<value>,aggregator=<a>,time-rollup=<t>,cluster-rollup=<c>`
#[derive(Debug)]
pub struct ProtocolLineSink<W> {
    out: W,
}

impl<W: Write> ProtocolLineSink<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> MetricSink for ProtocolLineSink<W> {
    fn report(&mut self, observation: &MetricObservation) -> Result<()> {
        log::debug!(target: LOG_TARGET, "Reporting '{}' = {}", observation.name, observation.value);

        writeln!(
            self.out,
            "name={},value={},aggregator={},time-rollup={},cluster-rollup={}",
            observation.name, observation.value, observation.aggregation, observation.time_rollup, observation.cluster_rollup
        )
        .map_err(|source| crate::error::MonitorError::Report {
            name: observation.name.clone(),
            source,
        })
    }
}
