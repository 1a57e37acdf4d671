//! Domain keyword vocabularies.
//!
//! Four fixed term lists, one per entity family. Built once at startup and
//! shared read-only across all concurrent queries; matching is substring
//! containment against the lowercased query, so every term here is
//! lowercase.

/// Terms suggesting the query is about projects or initiatives.
const PROJECT_TERMS: &[&str] = &[
    "project",
    "projects",
    "initiative",
    "initiatives",
    "program",
    "programs",
    "ai safety",
    "bias detection",
    "ethics framework",
    "safety blueprint",
    "framework",
    "system",
    "platform",
    "implementation",
];

/// Terms suggesting the query is about people.
const EMPLOYEE_TERMS: &[&str] = &[
    "employee",
    "employees",
    "person",
    "people",
    "team",
    "member",
    "members",
    "researcher",
    "engineer",
    "specialist",
    "manager",
    "lead",
    "developer",
    "worked",
    "working",
    "involved",
    "participated",
    "contributed",
];

/// Terms suggesting the query is about results and impact.
const OUTCOME_TERMS: &[&str] = &[
    "outcome",
    "outcomes",
    "result",
    "results",
    "achievement",
    "achievements",
    "impact",
    "success",
    "benefit",
    "improvement",
    "reduction",
    "increase",
    "metrics",
    "performance",
    "effectiveness",
    "accomplished",
    "delivered",
];

/// Terms suggesting the query is about written sources.
const REPORT_TERMS: &[&str] = &[
    "report",
    "reports",
    "document",
    "documents",
    "documentation",
    "paper",
    "assessment",
    "analysis",
    "study",
    "findings",
    "publication",
    "summary",
];

/// Immutable domain vocabularies. Safe for unsynchronized concurrent reads.
#[derive(Debug, Clone, Copy)]
pub struct KeywordVocabulary {
    employee_terms: &'static [&'static str],
    project_terms: &'static [&'static str],
    outcome_terms: &'static [&'static str],
    report_terms: &'static [&'static str],
}

impl KeywordVocabulary {
    pub fn builtin() -> Self {
        Self {
            employee_terms: EMPLOYEE_TERMS,
            project_terms: PROJECT_TERMS,
            outcome_terms: OUTCOME_TERMS,
            report_terms: REPORT_TERMS,
        }
    }

    pub fn employee_terms(&self) -> &'static [&'static str] {
        self.employee_terms
    }

    pub fn project_terms(&self) -> &'static [&'static str] {
        self.project_terms
    }

    pub fn outcome_terms(&self) -> &'static [&'static str] {
        self.outcome_terms
    }

    pub fn report_terms(&self) -> &'static [&'static str] {
        self.report_terms
    }
}

impl Default for KeywordVocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}
