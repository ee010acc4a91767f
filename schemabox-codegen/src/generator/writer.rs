//! Indented line writer for text-based targets.

use crate::generator::traits::IndentStyle;

/// Accumulates lines at a tracked indentation depth.
#[derive(Debug, Clone)]
pub struct CodeWriter {
    out: String,
    indent: IndentStyle,
    depth: usize,
}

impl CodeWriter {
    pub fn new(indent: IndentStyle) -> Self {
        Self {
            out: String::new(),
            indent,
            depth: 0,
        }
    }

    /// Write one line at the current depth. An empty line carries no indent.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            self.out.push_str(&self.indent.indent(self.depth));
            self.out.push_str(text);
        }
        self.out.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.line("")
    }

    pub fn lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.line(line);
        }
        self
    }

    /// Write `text` and indent what follows.
    pub fn open(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.line(text);
        self.depth += 1;
        self
    }

    /// Dedent and write `text`.
    pub fn close(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.line(text)
    }

    /// Append text verbatim, ensuring it ends with a newline.
    pub fn raw(&mut self, text: &str) -> &mut Self {
        self.out.push_str(text);
        if !text.is_empty() && !text.ends_with('\n') {
            self.out.push('\n');
        }
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Append `separator` to every item but the last.
pub fn separated<I, S>(items: I, separator: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = items.into_iter().map(Into::into).collect();
    let last = out.len().saturating_sub(1);
    for item in out.iter_mut().take(last) {
        item.push_str(separator);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_open_close_indentation() {
        let mut w = CodeWriter::new(IndentStyle::Spaces2);
        w.open("class A {").line("x = 1;").blank().close("}");
        assert_eq!(w.finish(), "class A {\n  x = 1;\n\n}\n");
    }

    #[test]
    fn test_close_never_underflows() {
        let mut w = CodeWriter::new(IndentStyle::Tabs);
        w.close("}").line("a");
        assert_eq!(w.depth(), 0);
        assert_eq!(w.finish(), "}\na\n");
    }

    #[test]
    fn test_raw_terminates_line() {
        let mut w = CodeWriter::new(IndentStyle::Spaces4);
        w.open("{").raw("verbatim").close("}");
        assert_eq!(w.finish(), "{\nverbatim\n}\n");
    }

    #[test]
    fn test_separated() {
        assert_eq!(separated(["a", "b", "c"], ","), vec!["a,", "b,", "c"]);
        assert_eq!(separated(["only"], ","), vec!["only"]);
        assert!(separated(Vec::<String>::new(), ",").is_empty());
    }

    proptest! {
        #[test]
        fn prop_separated_has_no_trailing_separator(items in prop::collection::vec("[a-z]{1,8}", 0..10)) {
            let out = separated(items.clone(), ";");
            prop_assert_eq!(out.len(), items.len());
            if let Some(last) = out.last() {
                prop_assert!(!last.ends_with(';'));
            }
            for (line, item) in out.iter().zip(&items).take(items.len().saturating_sub(1)) {
                prop_assert_eq!(line, &format!("{};", item));
            }
        }
    }
}
