//! Call-site locations for directive diagnostics.
//!
//! A location is captured eagerly as a single point and widened lazily, on
//! first rendering, into the full textual span of the directive call. The
//! widening re-reads the source file and is strictly best-effort: any failure
//! leaves the point location untouched, and the result never influences
//! registration outcomes.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

fn start_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\s*@?configure.*").expect("valid pattern"))
}

fn end_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r".*\)\s*$").expect("valid pattern"))
}

/// Source location of a directive declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    file: PathBuf,
    line: u32,
    column: u32,
    end_line: u32,
    end_column: u32,
    #[serde(skip)]
    widened: OnceLock<(u32, u32, u32)>,
}

impl SourceInfo {
    /// Captures the caller's file and line as a point location.
    #[must_use]
    #[track_caller]
    pub fn capture() -> Self {
        let caller = std::panic::Location::caller();
        Self::point(caller.file(), caller.line(), 0)
    }

    /// Creates a point location (start equals end).
    pub fn point(file: impl Into<PathBuf>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            end_line: line,
            end_column: column,
            widened: OnceLock::new(),
        }
    }

    /// Creates a location spanning an explicit range.
    pub fn spanned(
        file: impl Into<PathBuf>,
        line: u32,
        column: u32,
        end_line: u32,
        end_column: u32,
    ) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            end_line,
            end_column,
            widened: OnceLock::new(),
        }
    }

    /// Returns the source file path.
    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Returns the captured (1-based) start line.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Returns the captured start column.
    #[must_use]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Widens a point location to the directive's textual span.
    ///
    /// Scans backward from the captured line for the directive opening (a
    /// stripped line starting with an optional `@` marker and `configure`)
    /// and forward for the closing parenthesis; the end column is the length
    /// of the closing line. Cached after the first call; returns
    /// `(line, end_line, end_column)` and falls back to the stored span when
    /// the file cannot be read or no match is found.
    fn span(&self) -> (u32, u32, u32) {
        *self.widened.get_or_init(|| {
            if self.line != self.end_line || self.column != self.end_column {
                return (self.line, self.end_line, self.end_column);
            }
            widen(&self.file, self.line).unwrap_or((self.line, self.end_line, self.end_column))
        })
    }
}

fn widen(file: &Path, from_line: u32) -> Option<(u32, u32, u32)> {
    let text = fs::read_to_string(file).ok()?;
    let lines: Vec<&str> = text.lines().collect();
    if from_line == 0 || from_line as usize > lines.len() {
        return None;
    }

    let mut start = from_line as usize;
    while start > 0 && !start_pattern().is_match(lines[start - 1]) {
        start -= 1;
    }
    if start == 0 {
        return None;
    }

    let mut end = from_line as usize;
    while end <= lines.len() {
        let candidate = lines[end - 1];
        if end_pattern().is_match(candidate) {
            let end_column = u32::try_from(candidate.len()).ok()?;
            return Some((start as u32, end as u32, end_column));
        }
        end += 1;
    }
    None
}

impl PartialEq for SourceInfo {
    fn eq(&self, other: &Self) -> bool {
        self.file == other.file
            && self.line == other.line
            && self.column == other.column
            && self.end_line == other.end_line
            && self.end_column == other.end_column
    }
}

impl Eq for SourceInfo {}

impl fmt::Display for SourceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (line, end_line, end_column) = self.span();
        if line == end_line && self.column == end_column {
            write!(f, "File \"{}\", line {}.{}", self.file.display(), line, self.column)
        } else {
            write!(
                f,
                "File \"{}\", line {}.{}-{}.{}",
                self.file.display(),
                line,
                self.column,
                end_line,
                end_column
            )
        }
    }
}
