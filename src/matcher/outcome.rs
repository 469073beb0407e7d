use super::capture::MatchTree;
use super::mismatch::MismatchReport;

/// Result of one match call: exactly one of a capture tree or a report.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome<'t> {
    Matched(MatchTree<'t>),
    Mismatched(MismatchReport<'t>),
}

impl<'t> MatchOutcome<'t> {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Matched(_))
    }

    pub fn matched(&self) -> Option<&MatchTree<'t>> {
        match self {
            MatchOutcome::Matched(tree) => Some(tree),
            MatchOutcome::Mismatched(_) => None,
        }
    }

    pub fn mismatch(&self) -> Option<&MismatchReport<'t>> {
        match self {
            MatchOutcome::Matched(_) => None,
            MatchOutcome::Mismatched(report) => Some(report),
        }
    }

    pub fn into_parts(self) -> (Option<MatchTree<'t>>, Option<MismatchReport<'t>>) {
        match self {
            MatchOutcome::Matched(tree) => (Some(tree), None),
            MatchOutcome::Mismatched(report) => (None, Some(report)),
        }
    }

    pub fn into_result(self) -> Result<MatchTree<'t>, MismatchReport<'t>> {
        match self {
            MatchOutcome::Matched(tree) => Ok(tree),
            MatchOutcome::Mismatched(report) => Err(report),
        }
    }
}
