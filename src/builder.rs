use super::env::{Environment, ProcessEnvironment};
use super::logger::Logger;
use std::io::{self, Stdout};

/// Recognized logger options
///
/// Usually assembled through [Builder], but the fields are public for callers who prefer a
/// struct literal.
pub struct Config<W = Stdout> {
    /// Where documents are written, one JSON object per line
    pub sink: W,
    /// Optional CloudWatch log group, `LogGroupName` is omitted when unset
    pub log_group_name: Option<String>,
    /// Indent the JSON output, mostly useful in tests
    pub pretty: bool,
    /// Leave `Timestamp` out of the metadata entirely
    pub omit_timestamp: bool,
    /// Pin `Timestamp` to a fixed value instead of the current time
    pub timestamp: Option<u64>,
}

impl Default for Config<Stdout> {
    fn default() -> Self {
        Config::with_sink(io::stdout())
    }
}

impl<W> Config<W> {
    pub fn with_sink(sink: W) -> Self {
        Config {
            sink,
            log_group_name: None,
            pretty: false,
            omit_timestamp: false,
            timestamp: None,
        }
    }
}

/// Builder for the embedded metrics [Logger]
///
/// # Example
/// ```
/// use lambda_emf_metrics::{Builder, StorageResolution};
///
/// let metrics = Builder::new()
///     .log_group_name("MyLogGroup")
///     .build();
///
/// metrics
///     .set_namespace("MyApplication")
///     .add_count("requests", 1, StorageResolution::Standard);
/// metrics.flush().unwrap();
/// ```
pub struct Builder<W = Stdout> {
    config: Config<W>,
}

impl Builder<Stdout> {
    pub fn new() -> Self {
        Builder {
            config: Config::default(),
        }
    }
}

impl Default for Builder<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: io::Write> Builder<W> {
    /// Replaces the output, stdout by default
    pub fn sink<S: io::Write>(self, sink: S) -> Builder<S> {
        let Config {
            log_group_name,
            pretty,
            omit_timestamp,
            timestamp,
            ..
        } = self.config;
        Builder {
            config: Config {
                sink,
                log_group_name,
                pretty,
                omit_timestamp,
                timestamp,
            },
        }
    }

    /// Sets the CloudWatch log group name
    /// * An empty name is treated as unset
    pub fn log_group_name(mut self, name: impl Into<String>) -> Self {
        self.config.log_group_name = Some(name.into()).filter(|name| !name.is_empty());
        self
    }

    /// Indent the JSON output
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.config.pretty = pretty;
        self
    }

    /// Omit the `Timestamp` field, takes precedence over [Builder::with_timestamp]
    pub fn omit_timestamp(mut self, omit: bool) -> Self {
        self.config.omit_timestamp = omit;
        self
    }

    /// Emit a fixed timestamp (milliseconds since the unix epoch) rather than the current time
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.config.timestamp = Some(timestamp);
        self
    }

    /// Construct the logger, discovering lambda metadata from the process environment
    pub fn build(self) -> Logger<W> {
        self.build_with_env(&ProcessEnvironment)
    }

    /// Construct the logger, discovering lambda metadata from the given source
    pub fn build_with_env(self, env: &(impl Environment + ?Sized)) -> Logger<W> {
        Logger::from_config(self.config, env)
    }
}
