use std::fmt::Write;

use factweave_common::KnowledgeGraphContext;

/// Render the retrieved context as the deterministic text block handed to
/// the generator. Sections appear in fixed order and only for non-empty
/// collections; an all-empty context yields just the header.
pub fn format_context_for_llm(context: &KnowledgeGraphContext) -> String {
    let mut out = String::from("KNOWLEDGE GRAPH CONTEXT:\n\n");

    if context.has_employees() {
        out.push_str("EMPLOYEES:\n");
        for employee in &context.employees {
            let _ = writeln!(
                out,
                "- {} ({}) - {}, {}",
                employee.name, employee.role, employee.department, employee.email
            );
        }
        out.push('\n');
    }

    if context.has_projects() {
        out.push_str("PROJECTS:\n");
        for project in &context.projects {
            let _ = writeln!(
                out,
                "- {}: {} (Status: {})",
                project.name, project.description, project.status
            );
        }
        out.push('\n');
    }

    if context.has_project_summaries() {
        out.push_str("PROJECT SUMMARIES:\n");
        for summary in &context.project_summaries {
            let _ = writeln!(out, "- {summary}");
        }
        out.push('\n');
    }

    if context.has_outcome_details() {
        out.push_str("OUTCOMES:\n");
        for outcome in &context.outcome_details {
            let _ = writeln!(out, "- {outcome}");
        }
        out.push('\n');
    }

    if context.has_report_details() {
        out.push_str("SUPPORTING REPORTS:\n");
        for report in &context.report_details {
            let _ = writeln!(out, "- {report}");
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use factweave_common::{Employee, OutcomeDetail};

    #[test]
    fn empty_context_yields_header_only() {
        let context = KnowledgeGraphContext::default();
        assert_eq!(format_context_for_llm(&context), "KNOWLEDGE GRAPH CONTEXT:\n\n");
    }

    #[test]
    fn sections_appear_only_for_non_empty_collections() {
        let context = KnowledgeGraphContext {
            employees: vec![Employee {
                id: "e1".to_string(),
                name: "Carol Johnson".to_string(),
                email: "carol@example.com".to_string(),
                department: "Research".to_string(),
                role: "AI Safety Researcher".to_string(),
                ..Employee::default()
            }],
            outcome_details: vec![OutcomeDetail {
                description: "Reduced bias incidents by 45%".to_string(),
                impact_level: "High".to_string(),
                metrics: "45% reduction".to_string(),
                achieved_date: "2024-06-30".to_string(),
                category: "AI Safety".to_string(),
                documented_in: None,
            }],
            ..KnowledgeGraphContext::default()
        };

        let formatted = format_context_for_llm(&context);
        assert!(formatted.contains("EMPLOYEES:\n"));
        assert!(formatted
            .contains("- Carol Johnson (AI Safety Researcher) - Research, carol@example.com\n"));
        assert!(formatted.contains("OUTCOMES:\n"));
        assert!(!formatted.contains("PROJECTS:"));
        assert!(!formatted.contains("PROJECT SUMMARIES:"));
        assert!(!formatted.contains("SUPPORTING REPORTS:"));
    }

    #[test]
    fn formatting_is_deterministic() {
        let context = KnowledgeGraphContext {
            outcome_details: vec![
                OutcomeDetail {
                    description: "first".to_string(),
                    ..OutcomeDetail::default()
                },
                OutcomeDetail {
                    description: "second".to_string(),
                    ..OutcomeDetail::default()
                },
            ],
            ..KnowledgeGraphContext::default()
        };

        assert_eq!(
            format_context_for_llm(&context),
            format_context_for_llm(&context.clone())
        );
    }
}
