//! The metric-extraction engine.
//!
//! Turns the semi-structured AMPS status document into a flat
//! `category|subcategory|metricName -> f64` mapping. The document mixes
//! three shapes, each handled by its own operation:
//!
//! - plain objects whose numeric children are the metrics ([`flatten`]),
//! - arrays of objects addressed by the value of an `id` field ([`select`]),
//! - arrays of objects where one field's value names each element's metrics
//!   ([`select`]).
//!
//! [`assemble`] drives the seven fixed metric groups against the document
//! root.

mod assemble;
mod flatten;
mod numeric;
mod select;

pub use assemble::assemble;
pub use flatten::flatten_object;
pub use numeric::numeric_value;
pub use select::{select_all_by_field, select_by_field};

/// Separator between the segments of a fully-qualified metric name.
pub const METRIC_SEPARATOR: char = '|';
