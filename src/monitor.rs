//! One poll cycle, from fetch to emission.

use crate::Result;
use crate::config::Config;
use crate::credentials;
use crate::extract;
use crate::filter::ExclusionFilter;
use crate::publish::{MetricObservation, MetricSink};
use crate::status::StatusClient;
use std::collections::BTreeMap;

const LOG_TARGET: &str = "   monitor";

/// What one poll cycle accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CycleOutcome {
    /// Metrics handed to the sink
    pub reported: usize,
    /// Metrics suppressed by the exclusion filter
    pub excluded: usize,
}

/// Run a single poll cycle against the endpoint described by `config`,
/// emitting surviving metrics to `sink`.
///
/// The sequence is strictly synchronous: resolve credentials, fetch, parse,
/// assemble, filter, emit. Nothing is emitted once any stage fails, and no
/// state survives the cycle.
pub async fn run_cycle(config: &Config, sink: &mut impl MetricSink) -> Result<CycleOutcome> {
    let password = credentials::resolve_password(config)?;
    let client = StatusClient::new(config, password)?;

    let Some(document) = client.fetch_document().await? else {
        log::warn!(target: LOG_TARGET, "No usable status document this cycle, reporting nothing");
        return Ok(CycleOutcome::default());
    };

    let metrics = extract::assemble(&document)?;
    let filter = ExclusionFilter::compile(config.disabled_metrics.iter().map(String::as_str));

    let outcome = emit(&metrics, &filter, &config.metric_prefix, sink)?;

    log::info!(
        target: LOG_TARGET,
        "Reported {} metric(s), excluded {}",
        outcome.reported,
        outcome.excluded
    );

    Ok(outcome)
}

/// Emit every metric that survives the filter, with the global prefix
/// attached at the last moment.
fn emit(metrics: &BTreeMap<String, f64>, filter: &ExclusionFilter, prefix: &str, sink: &mut impl MetricSink) -> Result<CycleOutcome> {
    let mut outcome = CycleOutcome::default();

    for (name, value) in metrics {
        if filter.is_excluded(name) {
            outcome.excluded += 1;
            continue;
        }

        sink.report(&MetricObservation::observed(format!("{prefix}{name}"), *value))?;
        outcome.reported += 1;
    }

    Ok(outcome)
}
