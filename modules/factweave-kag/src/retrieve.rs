use std::sync::Arc;

use tracing::{info, warn};

use factweave_common::{Employee, KnowledgeGraphContext, Project, QueryEntities, QueryIntent};

use crate::traits::KnowledgeQueries;

/// Maps a classified query to one of five composite retrieval procedures
/// and executes it against the injected graph capability.
///
/// Failure policy: every underlying graph call is isolated. A failing
/// call is logged and leaves only its own field of the context empty;
/// the other fields still populate (partial-result semantics).
pub struct StrategyRouter {
    knowledge: Arc<dyn KnowledgeQueries>,
}

impl StrategyRouter {
    pub fn new(knowledge: Arc<dyn KnowledgeQueries>) -> Self {
        Self { knowledge }
    }

    pub async fn retrieve(&self, entities: &QueryEntities) -> KnowledgeGraphContext {
        let context = match entities.intent {
            QueryIntent::FindPeopleByProject => self.people_by_project(entities).await,
            QueryIntent::FindOutcomes => self.outcomes(entities).await,
            QueryIntent::FindProjectOutcomes => self.project_outcomes(entities).await,
            QueryIntent::FindReports => self.reports(entities).await,
            QueryIntent::ComprehensiveSearch => self.comprehensive(entities).await,
        };

        info!(
            intent = %entities.intent,
            employees = context.employees.len(),
            projects = context.projects.len(),
            summaries = context.project_summaries.len(),
            outcome_details = context.outcome_details.len(),
            report_details = context.report_details.len(),
            total = context.total_entities(),
            "knowledge graph retrieval complete"
        );

        context
    }

    /// Who worked on what: employees and projects in the category, with
    /// outcome and report detail records as the evidence carriers. The
    /// typed outcomes/reports lists stay empty on this path.
    async fn people_by_project(&self, entities: &QueryEntities) -> KnowledgeGraphContext {
        let category = entities.primary_project_category();

        KnowledgeGraphContext {
            employees: or_empty(
                "employees_by_project_category",
                self.knowledge.employees_by_project_category(category).await,
            ),
            projects: or_empty(
                "projects_by_category",
                self.knowledge.projects_by_category(category).await,
            ),
            outcome_details: or_empty(
                "outcomes_by_project_category",
                self.knowledge.outcomes_by_project_category(category).await,
            ),
            report_details: or_empty(
                "report_details_by_project_category",
                self.knowledge
                    .report_details_by_project_category(category)
                    .await,
            ),
            ..KnowledgeGraphContext::default()
        }
    }

    async fn outcomes(&self, entities: &QueryEntities) -> KnowledgeGraphContext {
        let category = entities.primary_project_category();
        let outcome_keyword = entities.primary_outcome_keyword();

        KnowledgeGraphContext {
            outcome_details: or_empty(
                "outcome_details",
                self.knowledge.outcome_details(category, outcome_keyword).await,
            ),
            projects: or_empty(
                "projects_with_outcomes_by_category",
                self.knowledge
                    .projects_with_outcomes_by_category(category)
                    .await,
            ),
            ..KnowledgeGraphContext::default()
        }
    }

    async fn project_outcomes(&self, entities: &QueryEntities) -> KnowledgeGraphContext {
        let category = entities.primary_project_category();

        KnowledgeGraphContext {
            project_summaries: or_empty(
                "project_summaries_by_category",
                self.knowledge.project_summaries_by_category(category).await,
            ),
            outcome_details: or_empty(
                "outcomes_by_project_category",
                self.knowledge.outcomes_by_project_category(category).await,
            ),
            ..KnowledgeGraphContext::default()
        }
    }

    /// Report details plus the outcome details those reports document.
    async fn reports(&self, entities: &QueryEntities) -> KnowledgeGraphContext {
        let category = entities.primary_project_category();

        KnowledgeGraphContext {
            report_details: or_empty(
                "report_details_by_project_category",
                self.knowledge
                    .report_details_by_project_category(category)
                    .await,
            ),
            outcome_details: or_empty(
                "outcomes_by_project_category",
                self.knowledge.outcomes_by_project_category(category).await,
            ),
            ..KnowledgeGraphContext::default()
        }
    }

    /// Catch-all strategy. When the query names people, a targeted
    /// name-variant search runs first; a category search backfills when
    /// it finds nobody. Outcome and report details always populate;
    /// project summaries are intentionally left empty on this path.
    async fn comprehensive(&self, entities: &QueryEntities) -> KnowledgeGraphContext {
        let category = entities.primary_project_category();
        let mut context = KnowledgeGraphContext::default();

        if !entities.person_names.is_empty() {
            let mut person_names: Vec<&String> = entities.person_names.iter().collect();
            person_names.sort();

            let mut employees: Vec<Employee> = Vec::new();
            let mut projects: Vec<Project> = Vec::new();

            for person_name in person_names {
                for variant in name_variants(person_name) {
                    employees.extend(or_empty(
                        "employees_by_name",
                        self.knowledge.employees_by_name(&variant).await,
                    ));
                    projects.extend(or_empty(
                        "projects_by_employee_name",
                        self.knowledge.projects_by_employee_name(&variant).await,
                    ));
                }
            }

            context.employees = dedup_by_id(employees, |e| e.id.as_str());
            context.projects = dedup_by_id(projects, |p| p.id.as_str());

            info!(
                employees = context.employees.len(),
                projects = context.projects.len(),
                "person-targeted search complete"
            );
        }

        if context.employees.is_empty() {
            context.employees = or_empty(
                "employees_by_project_category",
                self.knowledge.employees_by_project_category(category).await,
            );
            context.projects = or_empty(
                "projects_by_category",
                self.knowledge.projects_by_category(category).await,
            );
        }

        context.outcome_details = or_empty(
            "outcome_details",
            self.knowledge.outcome_details(category, "").await,
        );
        context.report_details = or_empty(
            "report_details_by_project_category",
            self.knowledge
                .report_details_by_project_category(category)
                .await,
        );

        context
    }
}

/// Collapse a sub-query failure to an empty collection, logging the loss.
fn or_empty<T>(shape: &str, result: anyhow::Result<Vec<T>>) -> Vec<T> {
    match result {
        Ok(records) => records,
        Err(err) => {
            warn!(query = shape, error = %err, "graph query failed, leaving collection empty");
            Vec::new()
        }
    }
}

/// The casing variants tried for a person name lookup: verbatim,
/// first-letter-capitalized, and every-word-capitalized. Duplicates are
/// collapsed so an already-capitalized name issues one lookup.
pub(crate) fn name_variants(name: &str) -> Vec<String> {
    let variants = vec![
        name.to_string(),
        capitalize_first(name),
        capitalize_words(name),
    ];
    let mut seen = Vec::with_capacity(variants.len());
    for variant in variants {
        if !seen.contains(&variant) {
            seen.push(variant);
        }
    }
    seen
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

fn capitalize_words(s: &str) -> String {
    s.split_whitespace()
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn dedup_by_id<T, F>(records: Vec<T>, id: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::with_capacity(records.len());
    for record in records {
        let record_id = id(&record).to_string();
        if !seen.contains(&record_id) {
            seen.push(record_id);
            out.push(record);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_variants_cover_three_casings() {
        assert_eq!(
            name_variants("carol johnson"),
            vec!["carol johnson", "Carol johnson", "Carol Johnson"]
        );
    }

    #[test]
    fn name_variants_collapse_when_already_canonical() {
        assert_eq!(name_variants("Carol"), vec!["Carol"]);
        assert_eq!(name_variants("CAROL"), vec!["CAROL", "Carol"]);
    }

    #[test]
    fn dedup_by_id_keeps_first_occurrence() {
        let records = vec![("a", 1), ("b", 2), ("a", 3)];
        let deduped = dedup_by_id(records, |r| r.0);
        assert_eq!(deduped, vec![("a", 1), ("b", 2)]);
    }
}
