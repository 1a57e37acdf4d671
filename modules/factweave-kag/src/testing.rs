// Test mocks for the pipeline's collaborator boundaries.
//
// Three mocks matching the three traits:
// - MockKnowledge (KnowledgeQueries) — HashMap-based, per-shape failure
//   switches, records every call for assertion.
// - MockGenerator (AnswerGenerator) — canned answer or failure, records
//   received prompts.
// - MockRecognizer (EntityRecognizer) — fixed name sets or failure.
//
// Plus record builders for Employee/Project/OutcomeDetail/ReportDetail.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use factweave_common::{
    Employee, OutcomeDetail, Project, ProjectSummary, Report, ReportDetail,
};

use crate::traits::{
    AnswerGenerator, EntityRecognizer, GenerateOptions, KnowledgeQueries, RecognizedNames,
};

// ---------------------------------------------------------------------------
// MockKnowledge
// ---------------------------------------------------------------------------

/// HashMap-backed graph capability. Unregistered keys return empty
/// collections (an empty graph, not an error); shapes listed in `failing`
/// return errors instead.
#[derive(Default)]
pub struct MockKnowledge {
    employees_by_category: HashMap<String, Vec<Employee>>,
    employees_by_name: HashMap<String, Vec<Employee>>,
    projects_by_employee: HashMap<String, Vec<Project>>,
    projects_by_category: HashMap<String, Vec<Project>>,
    projects_with_outcomes: HashMap<String, Vec<Project>>,
    summaries_by_category: HashMap<String, Vec<ProjectSummary>>,
    outcomes_by_category: HashMap<String, Vec<OutcomeDetail>>,
    outcome_details: HashMap<(String, String), Vec<OutcomeDetail>>,
    report_details: HashMap<String, Vec<ReportDetail>>,
    failing: HashSet<&'static str>,
    calls: Mutex<Vec<String>>,
}

impl MockKnowledge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_employees_by_category(mut self, category: &str, employees: Vec<Employee>) -> Self {
        self.employees_by_category
            .insert(category.to_string(), employees);
        self
    }

    pub fn on_employees_by_name(mut self, name: &str, employees: Vec<Employee>) -> Self {
        self.employees_by_name.insert(name.to_string(), employees);
        self
    }

    pub fn on_projects_by_employee(mut self, name: &str, projects: Vec<Project>) -> Self {
        self.projects_by_employee.insert(name.to_string(), projects);
        self
    }

    pub fn on_projects_by_category(mut self, category: &str, projects: Vec<Project>) -> Self {
        self.projects_by_category
            .insert(category.to_string(), projects);
        self
    }

    pub fn on_projects_with_outcomes(mut self, category: &str, projects: Vec<Project>) -> Self {
        self.projects_with_outcomes
            .insert(category.to_string(), projects);
        self
    }

    pub fn on_summaries(mut self, category: &str, summaries: Vec<ProjectSummary>) -> Self {
        self.summaries_by_category
            .insert(category.to_string(), summaries);
        self
    }

    pub fn on_outcomes_by_category(
        mut self,
        category: &str,
        outcomes: Vec<OutcomeDetail>,
    ) -> Self {
        self.outcomes_by_category
            .insert(category.to_string(), outcomes);
        self
    }

    pub fn on_outcome_details(
        mut self,
        category: &str,
        keyword: &str,
        outcomes: Vec<OutcomeDetail>,
    ) -> Self {
        self.outcome_details
            .insert((category.to_string(), keyword.to_string()), outcomes);
        self
    }

    pub fn on_report_details(mut self, category: &str, reports: Vec<ReportDetail>) -> Self {
        self.report_details.insert(category.to_string(), reports);
        self
    }

    /// Make one query shape fail with an error.
    pub fn failing(mut self, shape: &'static str) -> Self {
        self.failing.insert(shape);
        self
    }

    /// Every call made so far, as "shape(arg)" strings, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, shape: &str, arg: &str) -> Result<()> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(format!("{shape}({arg})"));
        if self.failing.contains(shape) {
            bail!("mock failure in {shape}");
        }
        Ok(())
    }
}

#[async_trait]
impl KnowledgeQueries for MockKnowledge {
    async fn employees_by_project_category(&self, category: &str) -> Result<Vec<Employee>> {
        self.record("employees_by_project_category", category)?;
        Ok(self
            .employees_by_category
            .get(category)
            .cloned()
            .unwrap_or_default())
    }

    async fn employees_by_name(&self, name: &str) -> Result<Vec<Employee>> {
        self.record("employees_by_name", name)?;
        Ok(self.employees_by_name.get(name).cloned().unwrap_or_default())
    }

    async fn projects_by_employee_name(&self, name: &str) -> Result<Vec<Project>> {
        self.record("projects_by_employee_name", name)?;
        Ok(self
            .projects_by_employee
            .get(name)
            .cloned()
            .unwrap_or_default())
    }

    async fn projects_by_category(&self, category: &str) -> Result<Vec<Project>> {
        self.record("projects_by_category", category)?;
        Ok(self
            .projects_by_category
            .get(category)
            .cloned()
            .unwrap_or_default())
    }

    async fn projects_with_outcomes_by_category(&self, category: &str) -> Result<Vec<Project>> {
        self.record("projects_with_outcomes_by_category", category)?;
        Ok(self
            .projects_with_outcomes
            .get(category)
            .cloned()
            .unwrap_or_default())
    }

    async fn project_summaries_by_category(&self, category: &str) -> Result<Vec<ProjectSummary>> {
        self.record("project_summaries_by_category", category)?;
        Ok(self
            .summaries_by_category
            .get(category)
            .cloned()
            .unwrap_or_default())
    }

    async fn outcomes_by_project_category(&self, category: &str) -> Result<Vec<OutcomeDetail>> {
        self.record("outcomes_by_project_category", category)?;
        Ok(self
            .outcomes_by_category
            .get(category)
            .cloned()
            .unwrap_or_default())
    }

    async fn outcome_details(&self, category: &str, keyword: &str) -> Result<Vec<OutcomeDetail>> {
        self.record("outcome_details", &format!("{category},{keyword}"))?;
        Ok(self
            .outcome_details
            .get(&(category.to_string(), keyword.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn report_details_by_project_category(
        &self,
        category: &str,
    ) -> Result<Vec<ReportDetail>> {
        self.record("report_details_by_project_category", category)?;
        Ok(self
            .report_details
            .get(category)
            .cloned()
            .unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// MockGenerator
// ---------------------------------------------------------------------------

/// Canned-answer generator. Records every (prompt, system_prompt) pair.
pub struct MockGenerator {
    answer: Option<String>,
    prompts: Mutex<Vec<(String, String)>>,
}

impl MockGenerator {
    /// A generator that always returns the given answer.
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A generator that always fails.
    pub fn failing() -> Self {
        Self {
            answer: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().expect("prompts lock").clone()
    }
}

#[async_trait]
impl AnswerGenerator for MockGenerator {
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: &str,
        _options: Option<GenerateOptions>,
    ) -> Result<String> {
        self.prompts
            .lock()
            .expect("prompts lock")
            .push((prompt.to_string(), system_prompt.to_string()));
        match &self.answer {
            Some(answer) => Ok(answer.clone()),
            None => bail!("mock generation failure"),
        }
    }
}

// ---------------------------------------------------------------------------
// MockRecognizer
// ---------------------------------------------------------------------------

/// Fixed-output recognizer, or an always-failing one.
pub struct MockRecognizer {
    names: Option<RecognizedNames>,
}

impl MockRecognizer {
    pub fn recognizing(persons: &[&str], organizations: &[&str]) -> Self {
        Self {
            names: Some(RecognizedNames {
                persons: persons.iter().map(|s| s.to_string()).collect(),
                organizations: organizations.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }

    pub fn failing() -> Self {
        Self { names: None }
    }
}

#[async_trait]
impl EntityRecognizer for MockRecognizer {
    async fn recognize(&self, _text: &str) -> Result<RecognizedNames> {
        match &self.names {
            Some(names) => Ok(names.clone()),
            None => bail!("mock recognizer failure"),
        }
    }
}

// ---------------------------------------------------------------------------
// Record builders
// ---------------------------------------------------------------------------

pub fn employee(id: &str, name: &str) -> Employee {
    Employee {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@example.com", id),
        department: "Research".to_string(),
        role: "Researcher".to_string(),
        join_date: "2022-01-15".to_string(),
        skills: vec!["AI Safety".to_string()],
    }
}

pub fn project(id: &str, name: &str, category: &str) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{name} initiative"),
        category: category.to_string(),
        start_date: "2023-03-01".to_string(),
        end_date: "2024-06-30".to_string(),
        status: "Completed".to_string(),
        budget: Some(250_000),
    }
}

pub fn report(id: &str, title: &str) -> Report {
    Report {
        id: id.to_string(),
        title: title.to_string(),
        content: format!("{title} full text"),
        report_type: "Assessment".to_string(),
        date: "2024-07-15".to_string(),
        file_path: format!("/reports/{id}.pdf"),
        summary: format!("{title} summary"),
    }
}

pub fn outcome_detail(description: &str, metrics: &str) -> OutcomeDetail {
    OutcomeDetail {
        description: description.to_string(),
        impact_level: "High".to_string(),
        metrics: metrics.to_string(),
        achieved_date: "2024-06-30".to_string(),
        category: "AI Safety".to_string(),
        documented_in: None,
    }
}

pub fn report_detail(title: &str, summary: &str, project_name: &str) -> ReportDetail {
    ReportDetail {
        title: title.to_string(),
        report_type: "Assessment".to_string(),
        date: "2024-07-15".to_string(),
        file_path: format!("/reports/{}.pdf", title.to_lowercase().replace(' ', "-")),
        summary: summary.to_string(),
        project_name: project_name.to_string(),
    }
}
