//! Citation engine contract tests.
//!
//! Injection: metric rewriting, outcome recording, project and summary
//! passes, deduplication, and the footnote section. Extraction: the
//! answer-independent citation list.

use factweave_common::{
    Citation, CitationType, KnowledgeGraphContext, ProjectSummary,
};
use factweave_kag::testing::{outcome_detail, project, report, report_detail};
use factweave_kag::CitationEngine;

fn context_with_report_details(details: Vec<factweave_common::ReportDetail>) -> KnowledgeGraphContext {
    KnowledgeGraphContext {
        report_details: details,
        ..KnowledgeGraphContext::default()
    }
}

// =========================================================================
// Metric injection
// =========================================================================

#[test]
fn metric_backed_by_report_detail_gets_inline_marker_and_footnote() {
    let engine = CitationEngine::new();
    let context = context_with_report_details(vec![report_detail(
        "Safety Assessment Q2",
        "Accuracy improved by 15% in controlled evaluation",
        "Safety Blueprint",
    )]);

    let (annotated, citations) =
        engine.inject("Model accuracy improved by 15% after the rollout.", &context);

    assert!(annotated.contains("15% [1]"));
    assert!(annotated.contains("\n\n**Sources:**\n"));
    assert!(annotated.contains("[1] Safety Assessment Q2 (Report)"));
    assert_eq!(citations.len(), 1);
    assert_eq!(citations[0].citation_type, CitationType::Metric);
    assert_eq!(citations[0].content, "15%");
}

#[test]
fn unbacked_metric_is_left_alone() {
    let engine = CitationEngine::new();
    let context = context_with_report_details(vec![report_detail(
        "Safety Assessment Q2",
        "No numbers here",
        "Safety Blueprint",
    )]);

    let answer = "Throughput rose 30% last quarter.";
    let (annotated, citations) = engine.inject(answer, &context);

    assert_eq!(annotated, answer);
    assert!(citations.is_empty());
}

#[test]
fn repeated_metric_is_cited_once_and_rewritten_once() {
    let engine = CitationEngine::new();
    let context = context_with_report_details(vec![report_detail(
        "Safety Assessment Q2",
        "Incidents fell 45% year over year",
        "Safety Blueprint",
    )]);

    let (annotated, citations) = engine.inject(
        "Incidents dropped 45% overall; the 45% figure held across teams.",
        &context,
    );

    assert_eq!(citations.len(), 1);
    // Only the first occurrence carries the marker.
    assert_eq!(annotated.matches("45% [1]").count(), 1);
    assert_eq!(annotated.matches("45%").count(), 2);
}

#[test]
fn multiple_metrics_are_numbered_left_to_right() {
    let engine = CitationEngine::new();
    let context = context_with_report_details(vec![
        report_detail("Q2 Assessment", "Incidents fell 45%", "Safety Blueprint"),
        report_detail("Accuracy Study", "Accuracy rose 3.5% in testing", "Model Evaluation"),
    ]);

    let (annotated, citations) =
        engine.inject("We saw a 45% drop and a 3.5% gain.", &context);

    assert_eq!(citations.len(), 2);
    assert!(annotated.contains("45% [1]"));
    assert!(annotated.contains("3.5% [2]"));
    assert!(annotated.contains("[1] Q2 Assessment (Report)"));
    assert!(annotated.contains("[2] Accuracy Study (Report)"));
}

// =========================================================================
// Outcome injection
// =========================================================================

#[test]
fn outcome_clause_is_recorded_without_rewriting() {
    let engine = CitationEngine::new();
    let context = KnowledgeGraphContext {
        outcome_details: vec![outcome_detail(
            "Reduced review backlog across departments",
            "40% reduction",
        )],
        ..KnowledgeGraphContext::default()
    };

    let answer = "The team reduced review backlog across departments. More work followed.";
    let (annotated, citations) = engine.inject(answer, &context);

    // No inline rewrite for outcome citations, footnote only.
    assert!(annotated.starts_with(answer));
    assert_eq!(citations.len(), 1);
    assert_eq!(citations[0].citation_type, CitationType::Outcome);
    assert_eq!(citations[0].source_document, "Internal Documentation");
    assert!(annotated.contains("[1] Internal Documentation (Outcome Documentation)"));
}

#[test]
fn outcome_citation_uses_documenting_report_when_known() {
    let engine = CitationEngine::new();
    let mut detail = outcome_detail("Improved labeling accuracy for edge cases", "15% gain");
    detail.documented_in = Some("Labeling Accuracy Report".to_string());

    let context = KnowledgeGraphContext {
        outcome_details: vec![detail],
        ..KnowledgeGraphContext::default()
    };

    let (_, citations) = engine.inject(
        "The project improved labeling accuracy for edge cases.",
        &context,
    );

    assert_eq!(citations.len(), 1);
    assert_eq!(citations[0].source_document, "Labeling Accuracy Report");
}

// =========================================================================
// Project and summary passes
// =========================================================================

#[test]
fn mentioned_project_names_are_cited_with_metadata() {
    let engine = CitationEngine::new();
    let context = KnowledgeGraphContext {
        projects: vec![
            project("p1", "Safety Blueprint", "AI Safety"),
            project("p2", "Bias Detection", "bias"),
        ],
        ..KnowledgeGraphContext::default()
    };

    let (annotated, citations) =
        engine.inject("The Safety Blueprint shipped on schedule.", &context);

    // Only the mentioned project is cited.
    assert_eq!(citations.len(), 1);
    assert_eq!(citations[0].citation_type, CitationType::Project);
    assert_eq!(
        citations[0].source_document,
        "Safety Blueprint Project Documentation"
    );
    assert_eq!(
        citations[0].metadata.as_deref(),
        Some("Start: 2023-03-01, Status: Completed")
    );
    assert!(annotated.contains("**Sources:**"));
}

#[test]
fn every_summary_record_is_cited() {
    let engine = CitationEngine::new();
    let context = KnowledgeGraphContext {
        project_summaries: vec![
            ProjectSummary {
                project_name: "Safety Blueprint".to_string(),
                ..ProjectSummary::default()
            },
            ProjectSummary {
                project_name: "Bias Detection".to_string(),
                ..ProjectSummary::default()
            },
        ],
        ..KnowledgeGraphContext::default()
    };

    let (_, citations) = engine.inject("Answer without explicit mentions.", &context);

    assert_eq!(citations.len(), 2);
    assert!(citations
        .iter()
        .all(|c| c.citation_type == CitationType::ProjectSummary));
}

// =========================================================================
// Dedup and empty context
// =========================================================================

#[test]
fn equal_citations_are_not_added_twice() {
    let engine = CitationEngine::new();
    // Two report details with the same title: the second match dedupes.
    let context = context_with_report_details(vec![
        report_detail("Q2 Assessment", "Incidents fell 45%", "Safety Blueprint"),
        report_detail("Q2 Assessment", "45% reduction confirmed", "Safety Blueprint"),
    ]);

    let (_, citations) = engine.inject("A 45% drop was recorded; 45% held firm.", &context);
    assert_eq!(citations.len(), 1);
}

#[test]
fn empty_context_returns_answer_unchanged() {
    let engine = CitationEngine::new();
    let answer = "Accuracy improved by 15% and incidents reduced overall.";
    let (annotated, citations) = engine.inject(answer, &KnowledgeGraphContext::default());

    assert_eq!(annotated, answer);
    assert!(citations.is_empty());
    assert!(!annotated.contains("**Sources:**"));
}

// =========================================================================
// Extraction
// =========================================================================

#[test]
fn extract_lists_typed_reports_and_detail_records() {
    let engine = CitationEngine::new();
    let context = KnowledgeGraphContext {
        reports: vec![report("r1", "Bias Audit")],
        report_details: vec![report_detail("Q2 Assessment", "details", "Safety Blueprint")],
        ..KnowledgeGraphContext::default()
    };

    let citations = engine.extract(&context);

    assert_eq!(citations.len(), 2);
    assert!(citations
        .iter()
        .all(|c| c.citation_type == CitationType::Report));

    let typed = &citations[0];
    assert_eq!(typed.source_document, "Bias Audit");
    assert_eq!(typed.file_path.as_deref(), Some("/reports/r1.pdf"));
    assert_eq!(
        typed.metadata.as_deref(),
        Some("Date: 2024-07-15, Type: Assessment")
    );

    let detail = &citations[1];
    assert_eq!(detail.source_document, "Q2 Assessment");
    assert!(detail.file_path.is_none());
}

#[test]
fn extract_defaults_blank_titles_to_unknown_report() {
    let engine = CitationEngine::new();
    let context = context_with_report_details(vec![report_detail("", "details", "Safety Blueprint")]);

    let citations = engine.extract(&context);
    assert_eq!(citations.len(), 1);
    assert_eq!(citations[0].source_document, "Unknown Report");
}

#[test]
fn extract_does_not_deduplicate() {
    let engine = CitationEngine::new();
    let context = context_with_report_details(vec![
        report_detail("Q2 Assessment", "a", "Safety Blueprint"),
        report_detail("Q2 Assessment", "b", "Safety Blueprint"),
    ]);

    let citations = engine.extract(&context);
    assert_eq!(citations.len(), 2);
    assert_eq!(citations[0], citations[1]);

    // While extract keeps duplicates, identity-based collections collapse
    // them; both views are intentional.
    let unique: std::collections::HashSet<Citation> = citations.into_iter().collect();
    assert_eq!(unique.len(), 1);
}
