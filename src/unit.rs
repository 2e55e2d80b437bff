//! # Unit
//!
//! CloudWatch metric units
//!
//! <https://docs.aws.amazon.com/AmazonCloudWatch/latest/APIReference/API_MetricDatum.html>

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// A CloudWatch unit string
///
/// The associated constants cover every unit CloudWatch accepts. Any other string can be wrapped
/// with [Unit::custom], it is passed through to the document untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Unit(Cow<'static, str>);

impl Unit {
    pub const NONE: Unit = Unit::from_static("None");
    pub const SECONDS: Unit = Unit::from_static("Seconds");
    pub const MICROSECONDS: Unit = Unit::from_static("Microseconds");
    pub const MILLISECONDS: Unit = Unit::from_static("Milliseconds");
    pub const BYTES: Unit = Unit::from_static("Bytes");
    pub const KILOBYTES: Unit = Unit::from_static("Kilobytes");
    pub const MEGABYTES: Unit = Unit::from_static("Megabytes");
    pub const GIGABYTES: Unit = Unit::from_static("Gigabytes");
    pub const TERABYTES: Unit = Unit::from_static("Terabytes");
    pub const BITS: Unit = Unit::from_static("Bits");
    pub const KILOBITS: Unit = Unit::from_static("Kilobits");
    pub const MEGABITS: Unit = Unit::from_static("Megabits");
    pub const GIGABITS: Unit = Unit::from_static("Gigabits");
    pub const TERABITS: Unit = Unit::from_static("Terabits");
    pub const PERCENT: Unit = Unit::from_static("Percent");
    pub const COUNT: Unit = Unit::from_static("Count");
    pub const BYTES_PER_SECOND: Unit = Unit::from_static("Bytes/Second");
    pub const KILOBYTES_PER_SECOND: Unit = Unit::from_static("Kilobytes/Second");
    pub const MEGABYTES_PER_SECOND: Unit = Unit::from_static("Megabytes/Second");
    pub const GIGABYTES_PER_SECOND: Unit = Unit::from_static("Gigabytes/Second");
    pub const TERABYTES_PER_SECOND: Unit = Unit::from_static("Terabytes/Second");
    pub const BITS_PER_SECOND: Unit = Unit::from_static("Bits/Second");
    pub const KILOBITS_PER_SECOND: Unit = Unit::from_static("Kilobits/Second");
    pub const MEGABITS_PER_SECOND: Unit = Unit::from_static("Megabits/Second");
    pub const GIGABITS_PER_SECOND: Unit = Unit::from_static("Gigabits/Second");
    pub const TERABITS_PER_SECOND: Unit = Unit::from_static("Terabits/Second");
    pub const COUNT_PER_SECOND: Unit = Unit::from_static("Count/Second");

    const fn from_static(name: &'static str) -> Self {
        Unit(Cow::Borrowed(name))
    }

    /// Wraps an arbitrary unit string, no validation is performed
    pub fn custom(name: impl Into<Cow<'static, str>>) -> Self {
        Unit(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Unit {
    fn from(name: &'static str) -> Self {
        Unit::from_static(name)
    }
}

impl From<String> for Unit {
    fn from(name: String) -> Self {
        Unit(Cow::Owned(name))
    }
}

/// Convert a metrics::Unit into the cloudwatch unit
///
/// The binary prefixed units of the metrics crate map onto the decimal names CloudWatch uses
impl From<metrics::Unit> for Unit {
    fn from(unit: metrics::Unit) -> Self {
        match unit {
            metrics::Unit::Count => Unit::COUNT,
            metrics::Unit::Percent => Unit::PERCENT,
            metrics::Unit::Seconds => Unit::SECONDS,
            metrics::Unit::Milliseconds => Unit::MILLISECONDS,
            metrics::Unit::Microseconds => Unit::MICROSECONDS,
            // CloudWatch has no nanosecond unit
            metrics::Unit::Nanoseconds => Unit::custom("Nanoseconds"),
            metrics::Unit::Tebibytes => Unit::TERABYTES,
            metrics::Unit::Gibibytes => Unit::GIGABYTES,
            metrics::Unit::Mebibytes => Unit::MEGABYTES,
            metrics::Unit::Kibibytes => Unit::KILOBYTES,
            metrics::Unit::Bytes => Unit::BYTES,
            metrics::Unit::TerabitsPerSecond => Unit::TERABITS_PER_SECOND,
            metrics::Unit::GigabitsPerSecond => Unit::GIGABITS_PER_SECOND,
            metrics::Unit::MegabitsPerSecond => Unit::MEGABITS_PER_SECOND,
            metrics::Unit::KilobitsPerSecond => Unit::KILOBITS_PER_SECOND,
            metrics::Unit::BitsPerSecond => Unit::BITS_PER_SECOND,
            metrics::Unit::CountPerSecond => Unit::COUNT_PER_SECOND,
        }
    }
}
