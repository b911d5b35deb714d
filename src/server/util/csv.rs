//! Minimal RFC 4180 CSV writer for report exports.

/// Accumulates CSV rows with CRLF line endings.
pub struct CsvWriter {
    buffer: String,
}

impl CsvWriter {
    /// Creates a writer and emits the header row.
    pub fn with_header(columns: &[&str]) -> Self {
        let mut writer = Self {
            buffer: String::new(),
        };
        writer.write_row(columns.iter().copied());
        writer
    }

    pub fn write_row<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                self.buffer.push(',');
            }
            self.buffer.push_str(&escape(field.as_ref()));
        }
        self.buffer.push_str("\r\n");
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}

/// Quotes a field when it contains a comma, quote, or line break.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
