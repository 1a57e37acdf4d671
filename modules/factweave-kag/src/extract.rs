use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};

use factweave_common::{KeywordVocabulary, QueryEntities, QueryIntent};

use crate::traits::EntityRecognizer;

/// Turns a raw query string into a structured entity/intent bundle.
///
/// Two independent passes: a keyword pass over the domain vocabularies
/// (always runs) and a best-effort NER pass through the optional
/// recognizer. NER unavailability never fails the query; the result is
/// simply keyword-only.
pub struct EntityExtractor {
    vocabulary: KeywordVocabulary,
    recognizer: Option<Arc<dyn EntityRecognizer>>,
}

impl EntityExtractor {
    pub fn new(recognizer: Option<Arc<dyn EntityRecognizer>>) -> Self {
        Self {
            vocabulary: KeywordVocabulary::builtin(),
            recognizer,
        }
    }

    pub async fn extract_entities(&self, query: &str) -> QueryEntities {
        let lower = query.to_lowercase();

        let mut entities = QueryEntities {
            employee_keywords: self.employee_keywords(&lower),
            project_keywords: self.project_keywords(&lower),
            outcome_keywords: self.outcome_keywords(&lower),
            report_keywords: self.report_keywords(&lower),
            ..QueryEntities::default()
        };

        if let Some(recognizer) = &self.recognizer {
            match recognizer.recognize(query).await {
                Ok(names) => {
                    entities.person_names = names.persons;
                    entities.organizations = names.organizations;
                }
                Err(err) => {
                    warn!(error = %err, "NER failed, using keyword-based extraction only");
                }
            }
        }

        entities.intent = classify_intent(&lower);

        info!(
            intent = %entities.intent,
            persons = entities.person_names.len(),
            employee_keywords = entities.employee_keywords.len(),
            project_keywords = entities.project_keywords.len(),
            "entities extracted"
        );

        entities
    }

    fn employee_keywords(&self, lower: &str) -> HashSet<String> {
        let mut keywords = matching_terms(lower, self.vocabulary.employee_terms());

        // Canonical skill/role terms layered on top of the vocabulary hits
        if lower.contains("ai safety") || lower.contains("safety") {
            keywords.insert("AI Safety".to_string());
        }
        if lower.contains("researcher") {
            keywords.insert("researcher".to_string());
        }
        if lower.contains("engineer") {
            keywords.insert("engineer".to_string());
        }

        keywords
    }

    fn project_keywords(&self, lower: &str) -> HashSet<String> {
        let mut keywords = matching_terms(lower, self.vocabulary.project_terms());

        // Canonical project categories
        if lower.contains("ai safety") || lower.contains("safety") {
            keywords.insert("AI Safety".to_string());
        }
        if lower.contains("bias") {
            keywords.insert("bias".to_string());
        }
        if lower.contains("ethics") {
            keywords.insert("ethics".to_string());
        }

        keywords
    }

    fn outcome_keywords(&self, lower: &str) -> HashSet<String> {
        let mut keywords = matching_terms(lower, self.vocabulary.outcome_terms());

        // Canonical outcome types, covering both verb and noun forms
        if lower.contains("reduction") || lower.contains("reduced") {
            keywords.insert("reduction".to_string());
        }
        if lower.contains("improvement") || lower.contains("improved") {
            keywords.insert("improvement".to_string());
        }
        if lower.contains("accuracy") {
            keywords.insert("accuracy".to_string());
        }

        keywords
    }

    fn report_keywords(&self, lower: &str) -> HashSet<String> {
        matching_terms(lower, self.vocabulary.report_terms())
    }
}

fn matching_terms(lower: &str, terms: &[&str]) -> HashSet<String> {
    terms
        .iter()
        .filter(|term| lower.contains(**term))
        .map(|term| term.to_string())
        .collect()
}

/// Ordered rule cascade over the lowercased query; first match wins.
/// Rule order is load-bearing: a query matching both the "who worked"
/// and "what outcome" shapes classifies as FindPeopleByProject.
pub fn classify_intent(lower: &str) -> QueryIntent {
    if lower.contains("who") && (lower.contains("worked") || lower.contains("involved")) {
        return QueryIntent::FindPeopleByProject;
    }

    if lower.contains("what")
        && (lower.contains("outcome") || lower.contains("result") || lower.contains("achievement"))
    {
        return QueryIntent::FindOutcomes;
    }

    if lower.contains("project") && (lower.contains("outcome") || lower.contains("result")) {
        return QueryIntent::FindProjectOutcomes;
    }

    if lower.contains("report") || lower.contains("document") {
        return QueryIntent::FindReports;
    }

    QueryIntent::ComprehensiveSearch
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cascade_order_is_preserved() {
        // Matches rules 1 and 2; rule 1 must win.
        assert_eq!(
            classify_intent("who worked on ai safety and what were the outcomes?"),
            QueryIntent::FindPeopleByProject
        );
    }

    #[test]
    fn each_rule_fires() {
        assert_eq!(
            classify_intent("who was involved in the bias work?"),
            QueryIntent::FindPeopleByProject
        );
        assert_eq!(
            classify_intent("what achievements came out of this?"),
            QueryIntent::FindOutcomes
        );
        assert_eq!(
            classify_intent("show the project results"),
            QueryIntent::FindProjectOutcomes
        );
        assert_eq!(
            classify_intent("find the assessment document"),
            QueryIntent::FindReports
        );
        assert_eq!(
            classify_intent("tell me about the company"),
            QueryIntent::ComprehensiveSearch
        );
    }

    #[test]
    fn empty_query_defaults_to_comprehensive() {
        assert_eq!(classify_intent(""), QueryIntent::ComprehensiveSearch);
    }
}
