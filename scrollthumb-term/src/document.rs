//! The scrolled document: lines of text and the first visible line.

use std::fs;
use std::io;
use std::path::Path;

const TAB: &str = "    ";

#[derive(Debug, Clone, Default)]
pub struct Document {
    lines: Vec<String>,
    top: usize,
}

impl Document {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines, top: 0 }
    }

    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines().map(|line| line.replace('\t', TAB)).collect())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let bytes = fs::read(path)?;
        Ok(Self::from_text(&String::from_utf8_lossy(&bytes)))
    }

    /// Built-in text shown when no file is given.
    pub fn sample() -> Self {
        let mut lines = vec![
            "scrollthumb".to_string(),
            String::new(),
            "Scroll with the mouse wheel, arrows, j/k, PgUp/PgDn, Home/End.".to_string(),
            "The thumb appears while you scroll and fades out when idle.".to_string(),
            "Press q or Esc to quit.".to_string(),
            String::new(),
        ];
        lines.extend((1..=300).map(|n| format!("{n:>4}  line {n} of the sample document")));
        Self::new(lines)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Index of the first visible line.
    pub fn top(&self) -> usize {
        self.top
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Largest `top` that still fills a viewport `rows` tall.
    pub fn max_top(&self, rows: u16) -> usize {
        self.lines.len().saturating_sub(rows as usize)
    }

    /// Returns true if the first visible line changed.
    pub fn scroll_to(&mut self, top: usize, rows: u16) -> bool {
        let top = top.min(self.max_top(rows));
        if top == self.top {
            return false;
        }
        self.top = top;
        true
    }

    /// Returns true if the first visible line changed.
    pub fn scroll_by(&mut self, delta: i64, rows: u16) -> bool {
        let top = (self.top as i64).saturating_add(delta).max(0) as usize;
        self.scroll_to(top, rows)
    }

    /// Pull `top` back into range after the viewport grew.
    pub fn clamp(&mut self, rows: u16) {
        self.top = self.top.min(self.max_top(rows));
    }
}
