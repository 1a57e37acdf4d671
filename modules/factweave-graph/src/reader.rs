use neo4rs::query;
use tracing::debug;

use factweave_common::{Employee, OutcomeDetail, Project, ProjectSummary, ReportDetail};

use crate::GraphClient;

/// Read-only query surface over the organization graph. One method per
/// named query shape; every method takes scalar parameters and returns a
/// typed record collection. Category and name matching is substring
/// containment, mirroring the graph's seeded free-text properties.
pub struct KnowledgeReader {
    client: GraphClient,
}

impl KnowledgeReader {
    pub fn new(client: GraphClient) -> Self {
        Self { client }
    }

    /// Employees who worked on any project whose category or name matches.
    pub async fn employees_by_project_category(
        &self,
        category: &str,
    ) -> Result<Vec<Employee>, neo4rs::Error> {
        let cypher = "MATCH (e:Employee)-[:WORKED_ON]->(p:Project)
             WHERE p.category CONTAINS $category OR p.name CONTAINS $category
             RETURN DISTINCT e";

        let q = query(cypher).param("category", category);
        let mut results = Vec::new();
        let mut stream = self.client.graph.execute(q).await?;
        while let Some(row) = stream.next().await? {
            if let Some(employee) = row_to_employee(&row) {
                results.push(employee);
            }
        }
        debug!(category, count = results.len(), "employees_by_project_category");
        Ok(results)
    }

    /// Employees matched by exact name.
    pub async fn employees_by_name(&self, name: &str) -> Result<Vec<Employee>, neo4rs::Error> {
        let q = query("MATCH (e:Employee) WHERE e.name = $name RETURN e").param("name", name);
        let mut results = Vec::new();
        let mut stream = self.client.graph.execute(q).await?;
        while let Some(row) = stream.next().await? {
            if let Some(employee) = row_to_employee(&row) {
                results.push(employee);
            }
        }
        Ok(results)
    }

    /// Projects a named employee worked on.
    pub async fn projects_by_employee_name(
        &self,
        name: &str,
    ) -> Result<Vec<Project>, neo4rs::Error> {
        let cypher = "MATCH (e:Employee)-[:WORKED_ON]->(p:Project)
             WHERE e.name = $name
             RETURN DISTINCT p";

        let q = query(cypher).param("name", name);
        let mut results = Vec::new();
        let mut stream = self.client.graph.execute(q).await?;
        while let Some(row) = stream.next().await? {
            if let Some(project) = row_to_project(&row) {
                results.push(project);
            }
        }
        Ok(results)
    }

    /// Projects whose category or name matches.
    pub async fn projects_by_category(&self, category: &str) -> Result<Vec<Project>, neo4rs::Error> {
        let cypher = "MATCH (p:Project)
             WHERE p.category CONTAINS $category OR p.name CONTAINS $category
             RETURN p";

        let q = query(cypher).param("category", category);
        let mut results = Vec::new();
        let mut stream = self.client.graph.execute(q).await?;
        while let Some(row) = stream.next().await? {
            if let Some(project) = row_to_project(&row) {
                results.push(project);
            }
        }
        Ok(results)
    }

    /// Projects in a category that have at least one achieved outcome.
    pub async fn projects_with_outcomes_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Project>, neo4rs::Error> {
        let cypher = "MATCH (p:Project)-[:ACHIEVED]->(:Outcome)
             WHERE p.category CONTAINS $category
             RETURN DISTINCT p";

        let q = query(cypher).param("category", category);
        let mut results = Vec::new();
        let mut stream = self.client.graph.execute(q).await?;
        while let Some(row) = stream.next().await? {
            if let Some(project) = row_to_project(&row) {
                results.push(project);
            }
        }
        Ok(results)
    }

    /// Composite per-project rollup: team, outcomes, metrics and
    /// supporting report titles collected into one row per project.
    pub async fn project_summaries_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<ProjectSummary>, neo4rs::Error> {
        let cypher = "MATCH (e:Employee)-[:WORKED_ON]->(p:Project)
             WHERE p.category CONTAINS $category
             MATCH (p)-[:ACHIEVED]->(o:Outcome)
             OPTIONAL MATCH (r:Report)-[:DOCUMENTS]->(o)
             RETURN p.name AS projectName,
                    p.description AS projectDescription,
                    collect(DISTINCT e.name) AS teamMembers,
                    collect(DISTINCT o.description) AS outcomes,
                    collect(DISTINCT o.metrics) AS metrics,
                    collect(DISTINCT r.title) AS supportingReports";

        let q = query(cypher).param("category", category);
        let mut results = Vec::new();
        let mut stream = self.client.graph.execute(q).await?;
        while let Some(row) = stream.next().await? {
            let project_name: String = row.get("projectName").unwrap_or_default();
            if project_name.is_empty() {
                continue;
            }
            results.push(ProjectSummary {
                project_name,
                project_description: row.get("projectDescription").unwrap_or_default(),
                team_members: row.get("teamMembers").unwrap_or_default(),
                outcomes: row.get("outcomes").unwrap_or_default(),
                metrics: row.get("metrics").unwrap_or_default(),
                supporting_reports: row.get("supportingReports").unwrap_or_default(),
            });
        }
        Ok(results)
    }

    /// Outcomes achieved by projects in a category, each joined with the
    /// title of a report documenting it when one exists.
    pub async fn outcomes_by_project_category(
        &self,
        category: &str,
    ) -> Result<Vec<OutcomeDetail>, neo4rs::Error> {
        let cypher = "MATCH (p:Project)-[:ACHIEVED]->(o:Outcome)
             WHERE p.category CONTAINS $category
             OPTIONAL MATCH (r:Report)-[:DOCUMENTS]->(o)
             RETURN DISTINCT o, r.title AS documentedIn";

        self.outcome_detail_rows(query(cypher).param("category", category))
            .await
    }

    /// Outcomes matched by category or description keyword. An empty
    /// keyword matches every description, so this widens to all outcomes;
    /// comprehensive search relies on that.
    pub async fn outcome_details(
        &self,
        category: &str,
        keyword: &str,
    ) -> Result<Vec<OutcomeDetail>, neo4rs::Error> {
        let cypher = "MATCH (o:Outcome)
             WHERE o.category CONTAINS $category OR o.description CONTAINS $keyword
             OPTIONAL MATCH (r:Report)-[:DOCUMENTS]->(o)
             RETURN o, r.title AS documentedIn";

        self.outcome_detail_rows(
            query(cypher)
                .param("category", category)
                .param("keyword", keyword),
        )
        .await
    }

    /// Reports produced by projects in a category, newest first, joined
    /// with the producing project's name.
    pub async fn report_details_by_project_category(
        &self,
        category: &str,
    ) -> Result<Vec<ReportDetail>, neo4rs::Error> {
        let cypher = "MATCH (p:Project)-[:PRODUCED]->(r:Report)
             WHERE p.category CONTAINS $category
             RETURN r, p.name AS projectName
             ORDER BY r.date DESC";

        let q = query(cypher).param("category", category);
        let mut results = Vec::new();
        let mut stream = self.client.graph.execute(q).await?;
        while let Some(row) = stream.next().await? {
            let r: neo4rs::Node = match row.get("r") {
                Ok(node) => node,
                Err(_) => continue,
            };
            results.push(ReportDetail {
                title: r.get("title").unwrap_or_default(),
                report_type: r.get("type").unwrap_or_default(),
                date: r.get("date").unwrap_or_default(),
                file_path: r.get("filePath").unwrap_or_default(),
                summary: r.get("summary").unwrap_or_default(),
                project_name: row.get("projectName").unwrap_or_default(),
            });
        }
        Ok(results)
    }

    async fn outcome_detail_rows(
        &self,
        q: neo4rs::Query,
    ) -> Result<Vec<OutcomeDetail>, neo4rs::Error> {
        let mut results = Vec::new();
        let mut stream = self.client.graph.execute(q).await?;
        while let Some(row) = stream.next().await? {
            let o: neo4rs::Node = match row.get("o") {
                Ok(node) => node,
                Err(_) => continue,
            };
            let documented_in: Option<String> = row.get::<String>("documentedIn").ok();
            results.push(OutcomeDetail {
                description: o.get("description").unwrap_or_default(),
                impact_level: o.get("impactLevel").unwrap_or_default(),
                metrics: o.get("metrics").unwrap_or_default(),
                achieved_date: o.get("achievedDate").unwrap_or_default(),
                category: o.get("category").unwrap_or_default(),
                documented_in,
            });
        }
        Ok(results)
    }
}

fn row_to_employee(row: &neo4rs::Row) -> Option<Employee> {
    let n: neo4rs::Node = row.get("e").ok()?;
    let id: String = n.get("id").ok()?;

    Some(Employee {
        id,
        name: n.get("name").unwrap_or_default(),
        email: n.get("email").unwrap_or_default(),
        department: n.get("department").unwrap_or_default(),
        role: n.get("role").unwrap_or_default(),
        join_date: n.get("joinDate").unwrap_or_default(),
        skills: n.get("skills").unwrap_or_default(),
    })
}

fn row_to_project(row: &neo4rs::Row) -> Option<Project> {
    let n: neo4rs::Node = row.get("p").ok()?;
    let id: String = n.get("id").ok()?;

    Some(Project {
        id,
        name: n.get("name").unwrap_or_default(),
        description: n.get("description").unwrap_or_default(),
        category: n.get("category").unwrap_or_default(),
        start_date: n.get("startDate").unwrap_or_default(),
        end_date: n.get("endDate").unwrap_or_default(),
        status: n.get("status").unwrap_or_default(),
        budget: n.get("budget").ok(),
    })
}
