// crates/logging/src/clock.rs

use crate::flags::TimeFormat;
use safe_json::inspect::iso_millis;
use std::fmt;
use std::sync::Arc;
use time::OffsetDateTime;

type TimeFn = dyn Fn() -> serde_json::Value + Send + Sync;

/// Produces the optional `"time":…,` fragment of a record.
#[derive(Clone, Default)]
pub enum TimePolicy {
    /// `"time":"2017-12-25T00:00:00.000Z",`
    #[default]
    Iso,
    /// `"time":1514160000000,` in milliseconds since the epoch.
    Epoch,
    /// No time field.
    None,
    /// `"time":<value>,` for whatever the closure returns.
    Custom(Arc<TimeFn>),
}

impl TimePolicy {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn() -> serde_json::Value + Send + Sync + 'static,
    {
        TimePolicy::Custom(Arc::new(f))
    }

    pub fn fixed(value: impl Into<serde_json::Value>) -> Self {
        let value = value.into();
        Self::custom(move || value.clone())
    }

    pub fn render(&self) -> String {
        match self {
            TimePolicy::Iso => iso_millis(OffsetDateTime::now_utc())
                .map(|now| format!("\"time\":\"{now}\","))
                .unwrap_or_default(),
            TimePolicy::Epoch => {
                let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
                format!("\"time\":{millis},")
            }
            TimePolicy::None => String::new(),
            TimePolicy::Custom(f) => serde_json::to_string(&f())
                .map(|v| format!("\"time\":{v},"))
                .unwrap_or_default(),
        }
    }
}

impl From<TimeFormat> for TimePolicy {
    fn from(format: TimeFormat) -> Self {
        match format {
            TimeFormat::Iso => TimePolicy::Iso,
            TimeFormat::Epoch => TimePolicy::Epoch,
            TimeFormat::None => TimePolicy::None,
        }
    }
}

impl fmt::Debug for TimePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimePolicy::Iso => f.write_str("Iso"),
            TimePolicy::Epoch => f.write_str("Epoch"),
            TimePolicy::None => f.write_str("None"),
            TimePolicy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
