//! # Env
//!
//! Deployment metadata discovered once when a [Logger](super::Logger) is constructed
//!
//! <https://docs.aws.amazon.com/lambda/latest/dg/configuration-envvars.html#configuration-envvars-runtime>

use std::collections::{BTreeMap, HashMap};

pub const FUNCTION_NAME: &str = "AWS_LAMBDA_FUNCTION_NAME";
pub const EXECUTION_ENV: &str = "AWS_EXECUTION_ENV";
pub const MEMORY_SIZE: &str = "AWS_LAMBDA_FUNCTION_MEMORY_SIZE";
pub const FUNCTION_VERSION: &str = "AWS_LAMBDA_FUNCTION_VERSION";
pub const LOG_STREAM_NAME: &str = "AWS_LAMBDA_LOG_STREAM_NAME";
pub const TRACE_ID: &str = "_X_AMZN_TRACE_ID";
/// Any non-empty value disables the `Timestamp` field, for deterministic output
pub const OMIT_TIMESTAMP: &str = "METRICS_OMIT_TIMESTAMP";

/// Trace ids are only recorded for sampled requests
const TRACE_SAMPLED: &str = "Sampled=1";

/// Key-value source consulted for deployment metadata
pub trait Environment {
    fn get(&self, key: &str) -> Option<String>;
}

/// The process environment via [std::env::var]
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl Environment for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

impl Environment for [(&str, &str)] {
    fn get(&self, key: &str) -> Option<String> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v.to_string())
    }
}

impl<const N: usize> Environment for [(&str, &str); N] {
    fn get(&self, key: &str) -> Option<String> {
        Environment::get(self.as_slice(), key)
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Snapshot of the lambda runtime variables a logger seeds its root fields from
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LambdaEnvironment {
    pub function_name: String,
    pub execution_environment: String,
    pub memory_size: String,
    pub function_version: String,
    pub log_stream_id: String,
    pub trace_id: Option<String>,
    pub omit_timestamp: bool,
}

impl LambdaEnvironment {
    pub fn discover(env: &(impl Environment + ?Sized)) -> Self {
        let var = |key| env.get(key).unwrap_or_default();
        Self {
            function_name: var(FUNCTION_NAME),
            execution_environment: var(EXECUTION_ENV),
            memory_size: var(MEMORY_SIZE),
            function_version: var(FUNCTION_VERSION),
            log_stream_id: var(LOG_STREAM_NAME),
            trace_id: env.get(TRACE_ID).filter(|id| id.contains(TRACE_SAMPLED)),
            omit_timestamp: !var(OMIT_TIMESTAMP).is_empty(),
        }
    }
}
