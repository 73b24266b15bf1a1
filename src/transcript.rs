//! Dialog transcript model and line-oriented writer.

use std::fmt;
use std::io::Write;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use scraper::{Html, Selector};
use tracing::debug;

use crate::extract;

static DIV: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Furhat,
    User,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::Furhat => f.write_str("Furhat"),
            Speaker::User => f.write_str("User"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogLine {
    pub speaker: Speaker,
    pub text: String,
}

impl fmt::Display for DialogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.speaker, self.text)
    }
}

/// Write one `Speaker:text` line per speech div, in document order.
///
/// Each line goes out as soon as its element is classified, so on error the
/// sink keeps whatever prefix was already written. Returns the line count.
pub fn write_transcript<W: Write>(document: &Html, mut out: W) -> Result<usize> {
    let mut count = 0usize;
    for (idx, el) in document.select(&DIV).enumerate() {
        if let Some(line) =
            extract::dialog_line(el).with_context(|| format!("div #{idx} in document order"))?
        {
            debug!(speaker = %line.speaker, "dialog turn");
            writeln!(out, "{line}").context("writing transcript line")?;
            count += 1;
        }
    }
    out.flush().context("flushing transcript")?;
    Ok(count)
}
