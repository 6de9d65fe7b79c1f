// crates/logging/src/formatter.rs

use crate::clock::TimePolicy;
use crate::flags::Level;
use safe_json::{Serializer, Value};

/// Assembles one record line:
/// `{"level":N,` time, context, data pairs, `"msg":…}` and a newline.
#[derive(Clone, Debug, Default)]
pub struct RecordFormatter {
    serializer: Serializer,
    time: TimePolicy,
}

impl RecordFormatter {
    pub fn new(serializer: Serializer, time: TimePolicy) -> Self {
        Self { serializer, time }
    }

    pub fn serializer(&self) -> &Serializer {
        &self.serializer
    }

    pub fn time(&self) -> &TimePolicy {
        &self.time
    }

    /// `ctx` must already be a rendered pair fragment (empty or ending in `,`).
    pub fn format(&self, level: Level, ctx: &str, message: &Value, data: &Value) -> String {
        let time = self.time.render();
        let data = self.serializer.render_pairs(data);
        let msg = self.serializer.to_json(message);
        let msg = msg.as_deref().unwrap_or("null");

        let mut line =
            String::with_capacity(16 + time.len() + ctx.len() + data.len() + msg.len());
        line.push_str("{\"level\":");
        line.push_str(&level.code().to_string());
        line.push(',');
        line.push_str(&time);
        line.push_str(ctx);
        line.push_str(&data);
        line.push_str("\"msg\":");
        line.push_str(msg);
        line.push_str("}\n");
        line
    }
}

/// Formats a record with the default serializer.
pub fn format_line(
    level: Level,
    time: &TimePolicy,
    ctx: &str,
    message: &Value,
    data: &Value,
) -> String {
    RecordFormatter::new(Serializer::default(), time.clone()).format(level, ctx, message, data)
}
