//! Indenting text buffer for IDL output.

/// Spaces per indentation level.
const INDENT: usize = 4;

/// Builds an IDL file line by line.
///
/// Indentation is written lazily, when the first text of a line arrives,
/// so blank lines never carry trailing spaces.
pub struct IdlWriter {
    buffer: String,
    level: usize,
    at_line_start: bool,
}

impl IdlWriter {
    pub fn new() -> Self {
        IdlWriter {
            buffer: String::with_capacity(1024),
            level: 0,
            at_line_start: true,
        }
    }

    /// Append `text` to the current line.
    pub fn text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.at_line_start {
            for _ in 0..self.level * INDENT {
                self.buffer.push(' ');
            }
            self.at_line_start = false;
        }
        self.buffer.push_str(text);
    }

    /// Append `text` and end the line.
    pub fn line(&mut self, text: &str) {
        self.text(text);
        self.newline();
    }

    pub fn newline(&mut self) {
        self.buffer.push('\n');
        self.at_line_start = true;
    }

    pub fn indent(&mut self) {
        self.level += 1;
    }

    pub fn outdent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}

impl Default for IdlWriter {
    fn default() -> Self {
        Self::new()
    }
}
