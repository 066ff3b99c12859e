//! User-facing rendering of [`EnvError`]s.
//!
//! ```text
//! ReferenceError: Undefined variable 'y'.
//!  ----> File 'main.ht'.
//!    |
//!  3 | print(y);
//!    |       ^
//! ```

use std::{fmt::Write, path::Path};

use hinton_lex::LineInfo;

use crate::err::EnvError;

/// Formats `err` with the offending line of `source` underlined.
///
/// When the error's line does not exist in `source` (e.g. the identifier
/// was synthesized) only the header and file lines are produced.
pub fn render(err: &EnvError, path: &Path, source: &str) -> String {
    let LineInfo { line, col } = err.info();
    let digits = line.to_string().len();

    let mut out = String::new();
    let _ = writeln!(out, "{}: {}", err.error_name(), err.message());
    let _ = writeln!(out, " {}---> File '{}'.", "-".repeat(digits), path.display());

    let src_line = line.checked_sub(1).and_then(|i| source.lines().nth(i));
    if let Some(src) = src_line {
        write_snippet(&mut out, line, col, err.name().chars().count(), src);
    }
    out
}

fn write_snippet(out: &mut String, line: usize, col: usize, len: usize, src: &str) {
    let trimmed = src.trim();
    if trimmed.is_empty() {
        return;
    }

    let gutter = " ".repeat(line.to_string().len() + 2);
    // `col` is a byte offset; pad by characters so the caret lines up.
    let leading = src.len() - src.trim_start().len();
    let col = src
        .get(leading..col.max(leading))
        .map_or_else(|| col.saturating_sub(leading), |s| s.chars().count());

    let _ = writeln!(out, "{gutter}|");
    let _ = writeln!(out, " {line} | {trimmed}");
    let _ = writeln!(out, "{gutter}| {}{}", " ".repeat(col), "^".repeat(len.max(1)));
}
