//! Emit CloudWatch Embedded Metric Format documents from AWS Lambda functions
//!
//! A [Logger] collects metrics, dimensions and properties for one unit of work and writes them
//! as a single JSON line that CloudWatch Logs turns into metrics.
//!
//! <https://docs.aws.amazon.com/AmazonCloudWatch/latest/monitoring/CloudWatch_Embedded_Metric_Format_Specification.html>

pub use {
    builder::{Builder, Config},
    emf::StorageResolution,
    env::{Environment, ProcessEnvironment},
    error::FlushError,
    logger::{Logger, DEFAULT_NAMESPACE, SERVICE_TYPE},
    unit::Unit,
};

mod builder;
pub mod emf;
pub mod env;
mod error;
mod logger;
mod unit;
