#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RenderableSeverity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl RenderableSeverity {
    pub fn label(self) -> &'static str {
        match self {
            RenderableSeverity::Info => "INFO",
            RenderableSeverity::Low => "LOW",
            RenderableSeverity::Medium => "MEDIUM",
            RenderableSeverity::High => "HIGH",
            RenderableSeverity::Critical => "CRITICAL",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableOutcome {
    Allow,
    Deny,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdict {
    Pass,
    Fail,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableDecision {
    pub outcome: RenderableOutcome,
    pub severity: RenderableSeverity,
    pub kind: String,
    pub subject: String,
    /// Free-form source position, typically `path:line`. Empty when unknown.
    pub locator: String,
    pub title: Option<String>,
    pub remediation: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableError {
    pub kind: String,
    pub subject: Option<String>,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderableSummary {
    pub profile: String,
    pub fail_on: String,
    pub requests: u32,
    pub allowed: u32,
    pub denied: u32,
    pub skipped: u32,
    pub errors: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdict,
    pub decisions: Vec<RenderableDecision>,
    pub errors: Vec<RenderableError>,
    pub summary: RenderableSummary,
}
