// Trait abstractions for the pipeline's three external collaborators.
//
// KnowledgeQueries — one method per named graph query shape. The pipeline
//   treats the graph purely as an injected read capability.
// AnswerGenerator — single blocking-completion call to the generation
//   backend.
// EntityRecognizer — narrow text -> {persons, organizations} interface;
//   callers must tolerate absence and failure.
//
// These enable deterministic testing with the mocks in `testing`:
// no Neo4j, no network.

use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;

use factweave_common::{Employee, OutcomeDetail, Project, ProjectSummary, ReportDetail};

// ---------------------------------------------------------------------------
// KnowledgeQueries
// ---------------------------------------------------------------------------

#[async_trait]
pub trait KnowledgeQueries: Send + Sync {
    /// Employees who worked on projects matching a category.
    async fn employees_by_project_category(&self, category: &str) -> Result<Vec<Employee>>;

    /// Employees matched by exact name.
    async fn employees_by_name(&self, name: &str) -> Result<Vec<Employee>>;

    /// Projects a named employee worked on.
    async fn projects_by_employee_name(&self, name: &str) -> Result<Vec<Project>>;

    /// Projects whose category or name matches.
    async fn projects_by_category(&self, category: &str) -> Result<Vec<Project>>;

    /// Projects in a category that achieved at least one outcome.
    async fn projects_with_outcomes_by_category(&self, category: &str) -> Result<Vec<Project>>;

    /// Composite per-project rollups for a category.
    async fn project_summaries_by_category(&self, category: &str) -> Result<Vec<ProjectSummary>>;

    /// Outcomes achieved by projects in a category.
    async fn outcomes_by_project_category(&self, category: &str) -> Result<Vec<OutcomeDetail>>;

    /// Outcomes matched by category or description keyword.
    async fn outcome_details(&self, category: &str, keyword: &str) -> Result<Vec<OutcomeDetail>>;

    /// Reports produced by projects in a category, with project names.
    async fn report_details_by_project_category(&self, category: &str)
        -> Result<Vec<ReportDetail>>;
}

#[async_trait]
impl KnowledgeQueries for factweave_graph::KnowledgeReader {
    async fn employees_by_project_category(&self, category: &str) -> Result<Vec<Employee>> {
        Ok(self.employees_by_project_category(category).await?)
    }

    async fn employees_by_name(&self, name: &str) -> Result<Vec<Employee>> {
        Ok(self.employees_by_name(name).await?)
    }

    async fn projects_by_employee_name(&self, name: &str) -> Result<Vec<Project>> {
        Ok(self.projects_by_employee_name(name).await?)
    }

    async fn projects_by_category(&self, category: &str) -> Result<Vec<Project>> {
        Ok(self.projects_by_category(category).await?)
    }

    async fn projects_with_outcomes_by_category(&self, category: &str) -> Result<Vec<Project>> {
        Ok(self.projects_with_outcomes_by_category(category).await?)
    }

    async fn project_summaries_by_category(&self, category: &str) -> Result<Vec<ProjectSummary>> {
        Ok(self.project_summaries_by_category(category).await?)
    }

    async fn outcomes_by_project_category(&self, category: &str) -> Result<Vec<OutcomeDetail>> {
        Ok(self.outcomes_by_project_category(category).await?)
    }

    async fn outcome_details(&self, category: &str, keyword: &str) -> Result<Vec<OutcomeDetail>> {
        Ok(self.outcome_details(category, keyword).await?)
    }

    async fn report_details_by_project_category(
        &self,
        category: &str,
    ) -> Result<Vec<ReportDetail>> {
        Ok(self.report_details_by_project_category(category).await?)
    }
}

// ---------------------------------------------------------------------------
// AnswerGenerator
// ---------------------------------------------------------------------------

pub use ai_client::GenerateOptions;

#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Produce one completed answer for a prompt/system-prompt pair.
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: &str,
        options: Option<GenerateOptions>,
    ) -> Result<String>;
}

#[async_trait]
impl AnswerGenerator for ai_client::Claude {
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: &str,
        options: Option<GenerateOptions>,
    ) -> Result<String> {
        self.generate(prompt, system_prompt, options).await
    }
}

// ---------------------------------------------------------------------------
// EntityRecognizer
// ---------------------------------------------------------------------------

/// Person and organization names recognized in free text.
#[derive(Debug, Clone, Default)]
pub struct RecognizedNames {
    pub persons: HashSet<String>,
    pub organizations: HashSet<String>,
}

#[async_trait]
pub trait EntityRecognizer: Send + Sync {
    async fn recognize(&self, text: &str) -> Result<RecognizedNames>;
}

#[async_trait]
impl EntityRecognizer for ner_client::NerClient {
    async fn recognize(&self, text: &str) -> Result<RecognizedNames> {
        let entities = self.extract(text).await?;
        Ok(RecognizedNames {
            persons: entities.persons,
            organizations: entities.organizations,
        })
    }
}
