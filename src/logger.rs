//! # Logger
//!
//! Per invocation metrics accumulator + emitter returned from lambda_emf_metrics::Builder

use super::builder::Config;
use super::emf::{self, Dimension, MetricDefinition, MetricDirective, StorageResolution};
use super::env::{Environment, LambdaEnvironment, ProcessEnvironment};
use super::error::FlushError;
use super::unit::Unit;
use serde::ser::Error as _;
use serde::Serialize;
use serde_json::value::Value;
use std::collections::BTreeMap;
use std::io::{Stdout, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, error, trace};

/// Namespace used until [Logger::set_namespace] is called
pub const DEFAULT_NAMESPACE: &str = "aws-embedded-metrics";

/// `ServiceType` value identifying the compute platform
pub const SERVICE_TYPE: &str = "AWS::Lambda::Function";

/// Output settings fixed at construction
struct Output {
    pretty: bool,
    omit_timestamp: bool,
    timestamp: Option<u64>,
}

/// Logger state, everything lives within one mutex
struct LoggerState<W> {
    sink: W,
    /// Root fields the directive refers to: lambda metadata, dimension values and metric values
    values: BTreeMap<String, Value>,
    /// Free form root fields, shadowed by `values` on a name clash
    properties: BTreeMap<String, Value>,
    /// Metric values that could not be encoded, by metric name
    rejected: BTreeMap<String, String>,
    directive: MetricDirective,
    log_group_name: Option<String>,
}

impl<W> LoggerState<W> {
    /// Declares a metric and sets its value, a repeated name is declared again and its value overwritten
    fn store(
        &mut self,
        name: String,
        value: Result<Value, serde_json::Error>,
        unit: Unit,
        resolution: StorageResolution,
    ) {
        let unit = Some(unit).filter(|unit| !unit.as_str().is_empty());
        self.directive.metrics.push(MetricDefinition {
            name: name.clone(),
            unit,
            resolution,
        });
        match value {
            Ok(value) => {
                self.rejected.remove(&name);
                self.values.insert(name, value);
            }
            Err(err) => {
                self.values.remove(&name);
                self.rejected.insert(name, err.to_string());
            }
        }
    }
}

/// Converts a metric value, non-finite floats become `null` in serde_json so any null is refused
fn encode_metric_value(value: &impl Serialize) -> Result<Value, serde_json::Error> {
    fn contains_null(value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::Array(items) => items.iter().any(contains_null),
            _ => false,
        }
    }

    let value = serde_json::to_value(value)?;
    if contains_null(&value) {
        return Err(serde_json::Error::custom("metric value is null or not a finite number"));
    }
    Ok(value)
}

/// Embedded CloudWatch Metrics Logger
///
/// Construct one per unit of work (a lambda invocation, a request), record metrics as the work
/// progresses and [flush](Logger::flush) once at the end. Every method takes `&self` and is safe
/// to call from many threads at once.
///
/// Use [Builder](super::Builder) to configure the output
///
/// # Example
/// ```
/// use lambda_emf_metrics::{StorageResolution, Unit};
///
/// let metrics = lambda_emf_metrics::Logger::new();
///
/// metrics
///     .add_dimension("Method", "GET")
///     .add_count("requests", 1, StorageResolution::Standard)
///     .add_metric("latency", 12.5, Unit::MILLISECONDS, StorageResolution::High)
///     .set_property("RequestId", "ABC123");
///
/// metrics.flush().unwrap();
/// ```
pub struct Logger<W = Stdout> {
    state: Mutex<LoggerState<W>>,
    output: Output,
}

impl Logger<Stdout> {
    /// Logger writing to stdout, seeded from the process environment
    pub fn new() -> Self {
        Self::from_config(Config::default(), &ProcessEnvironment)
    }
}

impl Default for Logger<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Logger<W> {
    pub fn from_config(config: Config<W>, env: &(impl Environment + ?Sized)) -> Self {
        let lambda = LambdaEnvironment::discover(env);

        let mut values = BTreeMap::new();
        values.insert("executionEnvironment".to_string(), lambda.execution_environment.into());
        values.insert("memorySize".to_string(), lambda.memory_size.into());
        values.insert("functionVersion".to_string(), lambda.function_version.into());
        values.insert("logStreamId".to_string(), lambda.log_stream_id.into());
        values.insert("functionName".to_string(), lambda.function_name.clone().into());
        if let Some(trace_id) = lambda.trace_id {
            values.insert("traceId".to_string(), trace_id.into());
        }
        values.insert("ServiceType".to_string(), SERVICE_TYPE.into());
        values.insert("ServiceName".to_string(), lambda.function_name.into());

        let directive = MetricDirective {
            namespace: DEFAULT_NAMESPACE.to_string(),
            dimensions: vec![Dimension::from_iter(["ServiceName", "ServiceType"])],
            metrics: Vec::new(),
        };

        Self {
            state: Mutex::new(LoggerState {
                sink: config.sink,
                values,
                properties: BTreeMap::new(),
                rejected: BTreeMap::new(),
                directive,
                log_group_name: config.log_group_name.filter(|name| !name.is_empty()),
            }),
            output: Output {
                pretty: config.pretty,
                omit_timestamp: config.omit_timestamp || lambda.omit_timestamp,
                timestamp: config.timestamp,
            },
        }
    }

    /// Every operation is a single insert or push, so a panic elsewhere can't leave the state torn
    fn state(&self) -> MutexGuard<'_, LoggerState<W>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records a count metric
    pub fn add_count(&self, name: impl Into<String>, count: u64, resolution: StorageResolution) -> &Self {
        self.state().store(name.into(), Ok(count.into()), Unit::COUNT, resolution);
        self
    }

    /// Records a metric with any unit
    /// * Any serializable value is accepted, numbers (or arrays of numbers) are expected
    /// * A value that can't be encoded, NaN and infinities included, makes [Logger::flush] fail
    ///   until the metric is added again with a valid value
    /// * An empty unit string leaves `Unit` out of the definition
    pub fn add_metric(
        &self,
        name: impl Into<String>,
        value: impl Serialize,
        unit: impl Into<Unit>,
        resolution: StorageResolution,
    ) -> &Self {
        let value = encode_metric_value(&value);
        self.state().store(name.into(), value, unit.into(), resolution);
        self
    }

    /// Adds a dimension set made of this single key
    /// * Each call adds a separate set, nothing is merged into the existing ones
    pub fn add_dimension(&self, key: impl Into<String>, value: impl Into<String>) -> &Self {
        let key = key.into();
        let mut state = self.state();
        state.directive.dimensions.push(Dimension(vec![key.clone()]));
        state.values.insert(key, Value::String(value.into()));
        self
    }

    /// Sets the CloudWatch namespace, the last call wins
    pub fn set_namespace(&self, namespace: impl Into<String>) -> &Self {
        self.state().directive.namespace = namespace.into();
        self
    }

    /// Sets the CloudWatch log group name, an empty name removes it
    pub fn set_log_group_name(&self, name: impl Into<String>) -> &Self {
        self.state().log_group_name = Some(name.into()).filter(|name| !name.is_empty());
        self
    }

    /// Set a property to emit with the metrics
    /// * Properties are plain root fields, neither metrics nor dimensions
    /// * Setting a property with same name multiple times will overwrite the previous value
    /// * Metric and dimension values take precedence over a property of the same name
    pub fn set_property(&self, name: impl Into<String>, value: impl Into<Value>) -> &Self {
        self.state().properties.insert(name.into(), value.into());
        self
    }

    /// Removes a property, metric and dimension values are left alone
    pub fn remove_property(&self, name: &str) -> &Self {
        self.state().properties.remove(name);
        self
    }

    /// Milliseconds since the epoch unless pinned or omitted via [Builder](super::Builder)
    fn timestamp(&self) -> Option<u64> {
        if self.output.omit_timestamp {
            return None;
        }
        let timestamp = self.output.timestamp.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
                .unwrap_or_default()
        });
        Some(timestamp)
    }

    /// Write the accumulated metrics as one EMF document followed by a newline
    ///
    /// * Nothing is written when no metric has been added
    /// * State is kept, flushing again re-emits the same metrics with a fresh timestamp
    pub fn flush(&self) -> Result<(), FlushError> {
        let mut state = self.state();

        if state.directive.metrics.is_empty() {
            debug!("No metrics recorded, skipping flush");
            return Ok(());
        }

        if let Some((name, reason)) = state.rejected.iter().next() {
            let err = serde_json::Error::custom(format!("metric {name}: {reason}"));
            error!("Failed to encode metrics document: {err}");
            return Err(FlushError::Encode(err));
        }

        let state = &mut *state;
        let document = emf::Document {
            aws: emf::Metadata {
                timestamp: self.timestamp(),
                cloudwatch_metrics: [&state.directive],
                log_group_name: state.log_group_name.as_deref(),
            },
            values: &state.values,
            properties: &state.properties,
        };

        let encoded = if self.output.pretty {
            serde_json::to_vec_pretty(&document)
        } else {
            serde_json::to_vec(&document)
        };
        let mut buf = encoded.map_err(|err| {
            error!("Failed to encode metrics document: {err}");
            FlushError::Encode(err)
        })?;
        buf.push(b'\n');

        if let Err(err) = state.sink.write_all(&buf).and_then(|()| state.sink.flush()) {
            error!("Failed to write metrics document: {err}");
            return Err(FlushError::Write(err));
        }

        trace!(bytes = buf.len(), metrics = state.directive.metrics.len(), "Flushed metrics");
        Ok(())
    }

    /// Consumes the logger and returns its sink
    pub fn into_sink(self) -> W {
        self.state.into_inner().unwrap_or_else(PoisonError::into_inner).sink
    }
}
