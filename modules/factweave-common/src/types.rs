use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Graph node records ---

/// An employee node. `skills` is stored as a string array property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: String,
    pub join_date: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub budget: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub title: String,
    pub content: String,
    pub report_type: String,
    pub date: String,
    pub file_path: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub id: String,
    pub description: String,
    pub impact_level: String,
    pub metrics: String,
    pub achieved_date: String,
    pub category: String,
}

// --- Composite query records ---
//
// Each multi-entity graph query returns its own tagged record type.
// The Display rendering is the canonical text form: the context formatter
// emits it verbatim and the citation engine matches claims against it, so
// it must stay deterministic.

/// Row shape of the project-summary query: one project with its team,
/// outcomes, metrics and supporting report titles collected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub project_name: String,
    pub project_description: String,
    pub team_members: Vec<String>,
    pub outcomes: Vec<String>,
    pub metrics: Vec<String>,
    pub supporting_reports: Vec<String>,
}

impl fmt::Display for ProjectSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} | Team: {} | Outcomes: {} | Metrics: {} | Reports: {}",
            self.project_name,
            self.project_description,
            self.team_members.join(", "),
            self.outcomes.join("; "),
            self.metrics.join("; "),
            self.supporting_reports.join("; "),
        )
    }
}

/// Row shape of the outcome-detail queries. `documented_in` carries the
/// title of a report documenting the outcome, when one exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeDetail {
    pub description: String,
    pub impact_level: String,
    pub metrics: String,
    pub achieved_date: String,
    pub category: String,
    pub documented_in: Option<String>,
}

impl fmt::Display for OutcomeDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Impact: {}, Metrics: {}, Achieved: {})",
            self.description, self.impact_level, self.metrics, self.achieved_date
        )?;
        if let Some(report) = &self.documented_in {
            write!(f, " [Documented in: {report}]")?;
        }
        Ok(())
    }
}

/// Row shape of the report-detail query: a report joined with the name of
/// the project that produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDetail {
    pub title: String,
    pub report_type: String,
    pub date: String,
    pub file_path: String,
    pub summary: String,
    pub project_name: String,
}

impl fmt::Display for ReportDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}): {} [Project: {}]",
            self.title, self.report_type, self.date, self.summary, self.project_name
        )
    }
}

// --- Query classification ---

/// What kind of retrieval a query requires. Exactly one per query;
/// ComprehensiveSearch is both the default and the explicit fallback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryIntent {
    FindPeopleByProject,
    FindOutcomes,
    FindProjectOutcomes,
    FindReports,
    #[default]
    ComprehensiveSearch,
}

impl fmt::Display for QueryIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryIntent::FindPeopleByProject => write!(f, "find_people_by_project"),
            QueryIntent::FindOutcomes => write!(f, "find_outcomes"),
            QueryIntent::FindProjectOutcomes => write!(f, "find_project_outcomes"),
            QueryIntent::FindReports => write!(f, "find_reports"),
            QueryIntent::ComprehensiveSearch => write!(f, "comprehensive_search"),
        }
    }
}

/// Entities and intent extracted from a raw query. Keyword sets hold
/// lowercased vocabulary hits plus canonical terms; never null, only empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryEntities {
    pub employee_keywords: HashSet<String>,
    pub project_keywords: HashSet<String>,
    pub outcome_keywords: HashSet<String>,
    pub report_keywords: HashSet<String>,
    pub person_names: HashSet<String>,
    pub organizations: HashSet<String>,
    #[serde(rename = "queryIntent")]
    pub intent: QueryIntent,
}

impl QueryEntities {
    pub fn has_employee_keywords(&self) -> bool {
        !self.employee_keywords.is_empty() || !self.person_names.is_empty()
    }

    pub fn has_project_keywords(&self) -> bool {
        !self.project_keywords.is_empty()
    }

    pub fn has_outcome_keywords(&self) -> bool {
        !self.outcome_keywords.is_empty()
    }

    pub fn has_report_keywords(&self) -> bool {
        !self.report_keywords.is_empty()
    }

    /// The canonical domain anchor for retrieval. Defaults to "AI Safety"
    /// so the system always has a retrieval anchor, even for unrelated
    /// queries.
    pub fn primary_project_category(&self) -> &str {
        if self.project_keywords.contains("AI Safety")
            || self.employee_keywords.contains("AI Safety")
        {
            return "AI Safety";
        }
        if self.project_keywords.contains("bias") {
            return "bias";
        }
        if self.project_keywords.contains("ethics") {
            return "ethics";
        }
        "AI Safety"
    }

    /// Highest-priority canonical outcome keyword, empty when none matched.
    pub fn primary_outcome_keyword(&self) -> &str {
        if self.outcome_keywords.contains("reduction") {
            return "reduction";
        }
        if self.outcome_keywords.contains("improvement") {
            return "improvement";
        }
        if self.outcome_keywords.contains("accuracy") {
            return "accuracy";
        }
        ""
    }
}

// --- Retrieval context ---

/// Everything retrieved from the graph for one query. Created fresh per
/// retrieval call, owned by the pipeline invocation, discarded after the
/// response is built. Collections default to empty, never absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeGraphContext {
    pub employees: Vec<Employee>,
    pub projects: Vec<Project>,
    pub reports: Vec<Report>,
    pub outcomes: Vec<Outcome>,
    pub project_summaries: Vec<ProjectSummary>,
    pub outcome_details: Vec<OutcomeDetail>,
    pub report_details: Vec<ReportDetail>,
}

impl KnowledgeGraphContext {
    pub fn has_employees(&self) -> bool {
        !self.employees.is_empty()
    }

    pub fn has_projects(&self) -> bool {
        !self.projects.is_empty()
    }

    pub fn has_reports(&self) -> bool {
        !self.reports.is_empty()
    }

    pub fn has_outcomes(&self) -> bool {
        !self.outcomes.is_empty()
    }

    pub fn has_project_summaries(&self) -> bool {
        !self.project_summaries.is_empty()
    }

    pub fn has_outcome_details(&self) -> bool {
        !self.outcome_details.is_empty()
    }

    pub fn has_report_details(&self) -> bool {
        !self.report_details.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.total_entities() == 0
    }

    /// Sum of all seven collection sizes. Computed on demand so it can
    /// never drift from the collections themselves.
    pub fn total_entities(&self) -> usize {
        self.employees.len()
            + self.projects.len()
            + self.reports.len()
            + self.outcomes.len()
            + self.project_summaries.len()
            + self.outcome_details.len()
            + self.report_details.len()
    }
}

// --- Citations ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CitationType {
    Metric,
    Outcome,
    Project,
    ProjectSummary,
    Report,
}

/// A pointer from a claim in the generated answer back to a source record.
///
/// Two citations are the same citation when (type, source_document,
/// content) agree; file_path and metadata do not participate in identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    #[serde(rename = "type")]
    pub citation_type: CitationType,
    pub content: String,
    pub source_document: String,
    pub source_type: Option<String>,
    pub file_path: Option<String>,
    pub metadata: Option<String>,
}

impl PartialEq for Citation {
    fn eq(&self, other: &Self) -> bool {
        self.citation_type == other.citation_type
            && self.source_document == other.source_document
            && self.content == other.content
    }
}

impl Eq for Citation {}

impl Hash for Citation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.citation_type.hash(state);
        self.source_document.hash(state);
        self.content.hash(state);
    }
}

impl Citation {
    /// Footnote rendering: source document plus whichever optional parts
    /// are present.
    pub fn formatted(&self) -> String {
        let mut out = self.source_document.clone();
        if let Some(source_type) = &self.source_type {
            out.push_str(&format!(" ({source_type})"));
        }
        if let Some(file_path) = &self.file_path {
            out.push_str(&format!(" - {file_path}"));
        }
        if let Some(metadata) = &self.metadata {
            out.push_str(&format!(" - {metadata}"));
        }
        out
    }
}

// --- Pipeline response ---

/// Final result of one pipeline invocation. Constructed once, immutable
/// after construction, never persisted. Field names on the wire are fixed
/// for downstream API compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KagResponse {
    #[serde(rename = "userQuery")]
    pub user_query: String,
    #[serde(rename = "extractedEntities")]
    pub extracted_entities: Option<QueryEntities>,
    #[serde(rename = "knowledgeGraphContext")]
    pub knowledge_graph_context: Option<KnowledgeGraphContext>,
    #[serde(rename = "rawGeneratedAnswer")]
    pub raw_answer: Option<String>,
    #[serde(rename = "annotatedAnswer")]
    pub annotated_answer: Option<String>,
    pub citations: Vec<Citation>,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl KagResponse {
    /// A failed query: carries only the original query and the error
    /// message, no partial pipeline output.
    pub fn failure(user_query: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            user_query: user_query.into(),
            extracted_entities: None,
            knowledge_graph_context: None,
            raw_answer: None,
            annotated_answer: None,
            citations: Vec::new(),
            error: Some(error.into()),
            timestamp: Utc::now(),
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.as_deref().is_some_and(|e| !e.is_empty())
    }

    pub fn has_citations(&self) -> bool {
        !self.citations.is_empty()
    }

    /// Total graph entities backing this answer, zero when the pipeline
    /// failed before retrieval.
    pub fn entity_count(&self) -> usize {
        self.knowledge_graph_context
            .as_ref()
            .map(KnowledgeGraphContext::total_entities)
            .unwrap_or(0)
    }

    /// The answer to show: annotated when citation injection ran, raw
    /// otherwise. Callers must check `has_error` first.
    pub fn final_answer(&self) -> Option<&str> {
        self.annotated_answer
            .as_deref()
            .or(self.raw_answer.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_entities_is_sum_of_all_collections() {
        let mut context = KnowledgeGraphContext::default();
        assert_eq!(context.total_entities(), 0);
        assert!(context.is_empty());

        context.employees.push(Employee::default());
        context.projects.push(Project::default());
        context.projects.push(Project::default());
        context.outcome_details.push(OutcomeDetail::default());
        context.report_details.push(ReportDetail::default());
        assert_eq!(context.total_entities(), 5);
        assert!(!context.is_empty());
    }

    #[test]
    fn citation_identity_ignores_file_path_and_metadata() {
        let a = Citation {
            citation_type: CitationType::Metric,
            content: "45%".to_string(),
            source_document: "Q3 Safety Report".to_string(),
            source_type: Some("Report".to_string()),
            file_path: Some("/reports/q3.pdf".to_string()),
            metadata: None,
        };
        let b = Citation {
            file_path: None,
            metadata: Some("Date: 2024-09-30".to_string()),
            ..a.clone()
        };
        assert_eq!(a, b);

        let mut seen = HashSet::new();
        seen.insert(a);
        assert!(seen.contains(&b));
    }

    #[test]
    fn primary_category_prefers_ai_safety_then_bias_then_ethics() {
        let mut entities = QueryEntities::default();
        assert_eq!(entities.primary_project_category(), "AI Safety");

        entities.project_keywords.insert("ethics".to_string());
        assert_eq!(entities.primary_project_category(), "ethics");

        entities.project_keywords.insert("bias".to_string());
        assert_eq!(entities.primary_project_category(), "bias");

        entities.employee_keywords.insert("AI Safety".to_string());
        assert_eq!(entities.primary_project_category(), "AI Safety");
    }

    #[test]
    fn primary_outcome_keyword_priority_order() {
        let mut entities = QueryEntities::default();
        assert_eq!(entities.primary_outcome_keyword(), "");

        entities.outcome_keywords.insert("accuracy".to_string());
        assert_eq!(entities.primary_outcome_keyword(), "accuracy");

        entities.outcome_keywords.insert("improvement".to_string());
        assert_eq!(entities.primary_outcome_keyword(), "improvement");

        entities.outcome_keywords.insert("reduction".to_string());
        assert_eq!(entities.primary_outcome_keyword(), "reduction");
    }

    #[test]
    fn final_answer_prefers_annotated() {
        let mut response = KagResponse::failure("q", "boom");
        assert!(response.has_error());
        assert_eq!(response.final_answer(), None);

        response.error = None;
        response.raw_answer = Some("raw".to_string());
        assert_eq!(response.final_answer(), Some("raw"));

        response.annotated_answer = Some("raw [1]".to_string());
        assert_eq!(response.final_answer(), Some("raw [1]"));
    }

    #[test]
    fn formatted_citation_includes_only_present_parts() {
        let citation = Citation {
            citation_type: CitationType::Report,
            content: "Bias Audit".to_string(),
            source_document: "Bias Audit".to_string(),
            source_type: Some("Report".to_string()),
            file_path: Some("/reports/bias.pdf".to_string()),
            metadata: Some("Date: 2024-05-01, Type: Audit".to_string()),
        };
        assert_eq!(
            citation.formatted(),
            "Bias Audit (Report) - /reports/bias.pdf - Date: 2024-05-01, Type: Audit"
        );

        let bare = Citation {
            source_type: None,
            file_path: None,
            metadata: None,
            ..citation
        };
        assert_eq!(bare.formatted(), "Bias Audit");
    }
}
