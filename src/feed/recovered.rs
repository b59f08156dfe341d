use std::fmt;
use thiserror::Error;

/// Pipeline step that produced a [`Recovered`] failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Rule,
    TargetFetch,
    HtmlParse,
    Probe,
    Title,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Rule => "rule",
            Stage::TargetFetch => "target_fetch",
            Stage::HtmlParse => "html_parse",
            Stage::Probe => "probe",
            Stage::Title => "title",
        })
    }
}

/// A leaf failure that the lookup absorbed instead of propagating.
///
/// Returned by steps whose failure only means "no contribution": one rule,
/// one probe, one title fetch, the HTML scan. Callers log it and move on.
#[derive(Debug, Error)]
#[error("{stage} failed for {subject}: {reason}")]
pub struct Recovered {
    pub stage: Stage,
    pub subject: String,
    pub reason: String,
}

impl Recovered {
    pub fn new(stage: Stage, subject: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            stage,
            subject: subject.into(),
            reason: reason.to_string(),
        }
    }

    pub fn log(&self) {
        tracing::debug!(
            stage = %self.stage,
            subject = %self.subject,
            reason = %self.reason,
            "Recovered from leaf failure"
        );
    }
}
