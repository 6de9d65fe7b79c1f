// crates/logging/src/json_format.rs
#![allow(missing_docs)]

use crate::flags::Level;
use crate::formatter::RecordFormatter;
use safe_json::Value;
use tracing::{Event, Subscriber};
use tracing_serde::fields::AsMap;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, format::Writer};
use tracing_subscriber::registry::LookupSpan;

/// Renders `tracing` events as record lines.
///
/// The event's `message` field becomes `msg`, the remaining fields become
/// the data pairs, and the event level maps onto the record level code.
#[derive(Clone, Debug, Default)]
pub struct JsonLogFormat {
    formatter: RecordFormatter,
    ctx: String,
}

impl JsonLogFormat {
    pub fn new(formatter: RecordFormatter) -> Self {
        Self {
            formatter,
            ctx: String::new(),
        }
    }

    /// Adds fixed pairs to every event, after any added earlier.
    pub fn with_context(mut self, ctx: &Value) -> Self {
        let pairs = self.formatter.serializer().render_pairs(ctx);
        self.ctx.push_str(&pairs);
        self
    }
}

impl<S, N> FormatEvent<S, N> for JsonLogFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let fields = serde_json::to_value(event.field_map()).map_err(|_| std::fmt::Error)?;
        let data = Value::from(fields);
        let message = match &data {
            Value::Object(obj) => obj.remove("message").unwrap_or_default(),
            _ => Value::Undefined,
        };
        let level = Level::from(*event.metadata().level());
        let line = self.formatter.format(level, &self.ctx, &message, &data);
        writer.write_str(&line)
    }
}
