//! Indent-aware string builder for the generated JavaScript.
//!
//! All indentation in generated programs goes through here: two spaces per
//! level, no trailing whitespace, `\n` line endings.

const INDENT: &str = "  ";

pub struct CodeWriter {
    buf: String,
    indent_level: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self {
            buf: String::with_capacity(8 * 1024),
            indent_level: 0,
        }
    }

    /// Write a complete line at the current indent.
    pub fn line(&mut self, text: &str) {
        if text.is_empty() {
            self.blank();
            return;
        }
        self.buf.extend(std::iter::repeat_n(INDENT, self.indent_level));
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Write multi-line text with the current indent prepended to each line.
    /// Line contents are otherwise untouched, trailing whitespace included;
    /// only trailing line breaks at the very end are dropped.
    pub fn verbatim(&mut self, text: &str) {
        for line in text.trim_end_matches(['\n', '\r']).lines() {
            self.line(line);
        }
    }

    /// Write `// ` comment lines, one per line of `text`.
    pub fn comment(&mut self, text: &str) {
        for line in text.trim_end().lines() {
            let line = line.trim_end();
            if line.is_empty() {
                self.line("//");
            } else {
                self.line(&format!("// {}", line));
            }
        }
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// `if (ready)` → `if (ready) {`, then indent.
    pub fn block_open(&mut self, text: &str) {
        self.open_with(&format!("{} {{", text));
    }

    /// Write an opening line exactly as given (e.g. `const steps = [`) and indent.
    pub fn open_with(&mut self, opener: &str) {
        self.line(opener);
        self.indent();
    }

    /// Dedent, then `}`.
    pub fn block_close(&mut self) {
        self.block_close_with("}");
    }

    /// Decrease indent and write a closing line such as `},` or `];`.
    pub fn block_close_with(&mut self, closer: &str) {
        self.dedent();
        self.line(closer);
    }

    /// The rendered program text.
    pub fn finish(self) -> String {
        self.buf
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}
