//! # EMF
//!
//! Helpers for serializing CloudWatch Embedded Metrics via serde_json
//!
//! <https://docs.aws.amazon.com/AmazonCloudWatch/latest/monitoring/CloudWatch_Embedded_Metric_Format_Specification.html>

use super::unit::Unit;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::value::Value;
use std::collections::BTreeMap;

/// Root key reserved for the metadata object
pub const AWS_KEY: &str = "_aws";

/// Time granularity CloudWatch stores a metric at
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageResolution {
    /// 1 second resolution, for high precision metrics
    High = 1,
    /// 1 minute resolution, suitable for most metrics
    #[default]
    Standard = 60,
}

impl StorageResolution {
    pub fn is_standard(&self) -> bool {
        *self == StorageResolution::Standard
    }
}

impl Serialize for StorageResolution {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (*self as u32).serialize(serializer)
    }
}

/// EMF MetricDefinition object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDefinition {
    #[serde(rename = "Name")]
    pub name: String,
    /// If omitted CloudWatch assumes None
    #[serde(rename = "Unit")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
    /// Standard resolution is implied when omitted, so it is never written
    #[serde(rename = "StorageResolution")]
    #[serde(skip_serializing_if = "StorageResolution::is_standard")]
    pub resolution: StorageResolution,
}

/// One dimension set, the names of root keys that jointly identify a metric series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Dimension(pub Vec<String>);

impl<K: Into<String>> FromIterator<K> for Dimension {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Dimension(iter.into_iter().map(Into::into).collect())
    }
}

/// EMF MetricDirective object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDirective {
    #[serde(rename = "Namespace")]
    pub namespace: String,
    #[serde(rename = "Dimensions")]
    pub dimensions: Vec<Dimension>,
    #[serde(rename = "Metrics")]
    pub metrics: Vec<MetricDefinition>,
}

/// EMF Metadata object, the value of the `_aws` key
#[derive(Serialize)]
pub struct Metadata<'a> {
    /// Milliseconds since the unix epoch
    #[serde(rename = "Timestamp")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    // A logger only ever carries one directive
    #[serde(rename = "CloudWatchMetrics")]
    pub cloudwatch_metrics: [&'a MetricDirective; 1],
    #[serde(rename = "LogGroupName")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_group_name: Option<&'a str>,
}

/// The full EMF document, metadata under `_aws` next to the flat values it describes
pub struct Document<'a> {
    pub aws: Metadata<'a>,
    /// Values the directive refers to
    pub values: &'a BTreeMap<String, Value>,
    /// Extra root fields, a value of the same name takes precedence
    pub properties: &'a BTreeMap<String, Value>,
}

impl Serialize for Document<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut root: BTreeMap<&str, &Value> = self.properties.iter().map(|(k, v)| (k.as_str(), v)).collect();
        root.extend(self.values.iter().map(|(k, v)| (k.as_str(), v)));
        // The metadata always owns the reserved key
        root.remove(AWS_KEY);

        let mut map = serializer.serialize_map(Some(root.len() + 1))?;
        map.serialize_entry(AWS_KEY, &self.aws)?;
        for (key, value) in root {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
