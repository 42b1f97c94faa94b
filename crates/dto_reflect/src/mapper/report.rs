use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::fmt::Write;

use crate::value::CoerceError;

// -----------------------------------------------------------------------------
// PopulateReport

/// The input keys a populate call skipped.
///
/// Returned by [`Mapper::populate_with_report`](crate::Mapper::populate_with_report).
/// Skipping is not an error; the report only makes it visible.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PopulateReport {
    skipped: Vec<SkippedField>,
}

impl PopulateReport {
    /// Returns the skipped keys in input order.
    #[inline]
    pub fn skipped(&self) -> &[SkippedField] {
        &self.skipped
    }

    /// Returns `true` if no key was skipped.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Returns the paths of the skipped keys.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.skipped.iter().map(|field| field.path.as_str())
    }
}

/// One skipped input key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedField {
    /// Dotted path of the key from the populated root, with array indices
    /// in brackets: `address.city`, `items[1].id`.
    pub path: String,
    pub reason: SkipReason,
}

/// Why a key was skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The type has no field with this name.
    UnknownField,
    /// The field has no setter.
    MissingSetter,
    /// The value could not be converted to the field type.
    Rejected(CoerceError),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField => f.write_str("unknown field"),
            Self::MissingSetter => f.write_str("no setter"),
            Self::Rejected(err) => write!(f, "rejected: {err}"),
        }
    }
}

// -----------------------------------------------------------------------------
// Recorder

enum Segment {
    Key(String),
    Index(usize),
}

/// Tracks the current path during populate and collects skips.
pub(crate) struct Recorder {
    report: Option<PopulateReport>,
    path: Vec<Segment>,
}

impl Recorder {
    /// Logs skips without collecting them.
    pub(crate) const fn silent() -> Self {
        Self {
            report: None,
            path: Vec::new(),
        }
    }

    /// Logs and collects skips.
    pub(crate) const fn collecting() -> Self {
        Self {
            report: Some(PopulateReport {
                skipped: Vec::new(),
            }),
            path: Vec::new(),
        }
    }

    pub(crate) fn enter_key(&mut self, key: &str) {
        self.path.push(Segment::Key(key.into()));
    }

    pub(crate) fn enter_index(&mut self, index: usize) {
        self.path.push(Segment::Index(index));
    }

    pub(crate) fn leave(&mut self) {
        self.path.pop();
    }

    pub(crate) fn skip(&mut self, key: &str, reason: SkipReason) {
        if self.report.is_none() && !log::log_enabled!(log::Level::Debug) {
            return;
        }
        let path = self.render(key);
        log::debug!("skipped `{path}`: {reason}");
        if let Some(report) = &mut self.report {
            report.skipped.push(SkippedField { path, reason });
        }
    }

    fn render(&self, key: &str) -> String {
        fn push_key(out: &mut String, key: &str) {
            if !out.is_empty() {
                out.push('.');
            }
            out.push_str(key);
        }

        let mut out = String::new();
        for segment in &self.path {
            match segment {
                Segment::Key(key) => push_key(&mut out, key),
                Segment::Index(index) => {
                    let _ = write!(out, "[{index}]");
                }
            }
        }
        push_key(&mut out, key);
        out
    }

    pub(crate) fn finish(self) -> PopulateReport {
        self.report.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::{Recorder, SkipReason};

    #[test]
    fn paths() {
        let mut recorder = Recorder::collecting();
        recorder.skip("extra", SkipReason::UnknownField);
        recorder.enter_key("address");
        recorder.skip("city", SkipReason::MissingSetter);
        recorder.leave();
        recorder.enter_key("items");
        recorder.enter_index(1);
        recorder.skip("id", SkipReason::UnknownField);
        recorder.leave();
        recorder.leave();

        let report = recorder.finish();
        let paths: Vec<&str> = report.paths().collect();
        assert_eq!(paths, ["extra", "address.city", "items[1].id"]);
        assert_eq!(report.skipped()[1].reason, SkipReason::MissingSetter);
    }

    #[test]
    fn silent_collects_nothing() {
        let mut recorder = Recorder::silent();
        recorder.skip("extra", SkipReason::UnknownField);
        assert!(recorder.finish().is_clean());
    }
}
