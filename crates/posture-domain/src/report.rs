use posture_types::{Decision, EvaluationError, ReportSummary, ReportVerdict};

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub verdict: ReportVerdict,
    pub decisions: Vec<Decision>,
    pub errors: Vec<EvaluationError>,
    pub summary: ReportSummary,
}
