use std::sync::LazyLock;

use anyhow::{anyhow, Result};
use regex::Regex;
use tracing::warn;

use factweave_common::{Citation, CitationType, KnowledgeGraphContext};

// Metric-like tokens: integer or decimal percentage, or "<number> <word>".
static METRIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+%|\d+%|\d+ [A-Za-z]+").unwrap());

// Outcome-verb clause up to the end of the sentence.
static OUTCOME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(reduced|improved|achieved|implemented|established)\s+[^.]+").unwrap()
});

/// Post-processes generated answers against the retrieval context:
/// injects inline citation markers and a footnote list, and independently
/// extracts the full citation list for the response payload.
pub struct CitationEngine;

impl CitationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Annotate an answer with citations drawn from the context.
    ///
    /// Best-effort: any internal failure returns the original answer
    /// unchanged with no citations. Callers must invoke this exactly once
    /// per answer; re-annotating an annotated answer would re-match the
    /// footnotes themselves.
    pub fn inject(&self, answer: &str, context: &KnowledgeGraphContext) -> (String, Vec<Citation>) {
        match inject_citations(answer, context) {
            Ok(annotated) => annotated,
            Err(err) => {
                warn!(error = %err, "citation injection failed, returning original answer");
                (answer.to_string(), Vec::new())
            }
        }
    }

    /// The full citation list for a context, independent of any answer
    /// text: one Report citation per typed report plus one per
    /// report-detail record. Returned verbatim, not deduplicated against
    /// the injected citations.
    pub fn extract(&self, context: &KnowledgeGraphContext) -> Vec<Citation> {
        let mut citations = Vec::new();

        for report in &context.reports {
            citations.push(Citation {
                citation_type: CitationType::Report,
                content: report.title.clone(),
                source_document: report.title.clone(),
                source_type: Some("Report".to_string()),
                file_path: Some(report.file_path.clone()),
                metadata: Some(format!("Date: {}, Type: {}", report.date, report.report_type)),
            });
        }

        for detail in &context.report_details {
            let title = if detail.title.is_empty() {
                "Unknown Report".to_string()
            } else {
                detail.title.clone()
            };
            citations.push(Citation {
                citation_type: CitationType::Report,
                content: title.clone(),
                source_document: title,
                source_type: Some("Report".to_string()),
                file_path: None,
                metadata: None,
            });
        }

        citations
    }
}

impl Default for CitationEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn inject_citations(
    answer: &str,
    context: &KnowledgeGraphContext,
) -> Result<(String, Vec<Citation>)> {
    let mut citations: Vec<Citation> = Vec::new();
    // Replacement spans are collected against the original answer and
    // applied once, left-to-right. Never mutate while scanning: earlier
    // rewrites would shift the offsets of later matches.
    let mut replacements: Vec<(usize, usize, String)> = Vec::new();

    // Metric pass: each metric backed by a report-detail record gets a
    // citation and a bracketed index appended in place.
    for metric_match in METRIC_RE.find_iter(answer) {
        let metric = metric_match.as_str();
        let Some(report) = context
            .report_details
            .iter()
            .find(|detail| detail.to_string().contains(metric))
        else {
            continue;
        };

        let citation = Citation {
            citation_type: CitationType::Metric,
            content: metric.to_string(),
            source_document: report.title.clone(),
            source_type: Some("Report".to_string()),
            file_path: None,
            metadata: None,
        };
        if !citations.contains(&citation) {
            citations.push(citation);
            let index = citations.len();
            replacements.push((
                metric_match.start(),
                metric_match.end(),
                format!("{metric} [{index}]"),
            ));
        }
    }

    // Outcome pass: recorded but never rewritten in place.
    for outcome_match in OUTCOME_RE.find_iter(answer) {
        let clause = outcome_match.as_str();
        let lowered = clause.to_lowercase();
        let Some(outcome) = context
            .outcome_details
            .iter()
            .find(|detail| detail.to_string().to_lowercase().contains(&lowered))
        else {
            continue;
        };

        let citation = Citation {
            citation_type: CitationType::Outcome,
            content: clause.to_string(),
            source_document: outcome
                .documented_in
                .clone()
                .unwrap_or_else(|| "Internal Documentation".to_string()),
            source_type: Some("Outcome Documentation".to_string()),
            file_path: None,
            metadata: None,
        };
        if !citations.contains(&citation) {
            citations.push(citation);
        }
    }

    // Project pass: any project named verbatim in the answer.
    for project in &context.projects {
        if project.name.is_empty() || !answer.contains(&project.name) {
            continue;
        }
        let citation = Citation {
            citation_type: CitationType::Project,
            content: project.name.clone(),
            source_document: format!("{} Project Documentation", project.name),
            source_type: Some("Project".to_string()),
            file_path: None,
            metadata: Some(format!(
                "Start: {}, Status: {}",
                project.start_date, project.status
            )),
        };
        if !citations.contains(&citation) {
            citations.push(citation);
        }
    }

    // Project-summary pass: one citation per summary record present.
    for summary in &context.project_summaries {
        let citation = Citation {
            citation_type: CitationType::ProjectSummary,
            content: "Project Summary".to_string(),
            source_document: summary.project_name.clone(),
            source_type: Some("Project Summary".to_string()),
            file_path: None,
            metadata: None,
        };
        if !citations.contains(&citation) {
            citations.push(citation);
        }
    }

    let mut annotated = apply_replacements(answer, &replacements)?;

    if !citations.is_empty() {
        annotated.push_str("\n\n**Sources:**\n");
        for (i, citation) in citations.iter().enumerate() {
            annotated.push_str(&format!("[{}] {}\n", i + 1, citation.formatted()));
        }
    }

    Ok((annotated, citations))
}

/// Apply pre-computed (start, end, text) replacements to the original
/// answer in one pass. Spans come from a single regex sweep, so they are
/// ordered and non-overlapping.
fn apply_replacements(answer: &str, replacements: &[(usize, usize, String)]) -> Result<String> {
    let mut out = String::with_capacity(answer.len() + replacements.len() * 8);
    let mut cursor = 0usize;

    for (start, end, text) in replacements {
        let unchanged = answer
            .get(cursor..*start)
            .ok_or_else(|| anyhow!("replacement span {start}..{end} out of bounds"))?;
        out.push_str(unchanged);
        out.push_str(text);
        cursor = *end;
    }

    let tail = answer
        .get(cursor..)
        .ok_or_else(|| anyhow!("replacement cursor {cursor} out of bounds"))?;
    out.push_str(tail);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_pattern_matches_percentages_and_counted_nouns() {
        let matches: Vec<&str> = METRIC_RE
            .find_iter("a 45% drop, 3.5% drift, and 12 incidents")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(matches, vec!["45%", "3.5%", "12 incidents"]);
    }

    #[test]
    fn outcome_pattern_captures_verb_clause_to_sentence_end() {
        let m = OUTCOME_RE
            .find("The team Reduced bias incidents by 45%. Later work followed.")
            .expect("outcome clause");
        assert_eq!(m.as_str(), "Reduced bias incidents by 45%");
    }

    #[test]
    fn apply_replacements_preserves_unmatched_text() {
        let replaced = apply_replacements(
            "improved accuracy by 15% across models",
            &[(21, 24, "15% [1]".to_string())],
        )
        .expect("replace");
        assert_eq!(replaced, "improved accuracy by 15% [1] across models");
    }
}
