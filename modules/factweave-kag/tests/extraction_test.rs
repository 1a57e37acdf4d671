//! Entity extraction contract tests.
//!
//! These verify the two extraction passes (keyword and NER), the
//! canonicalization rules layered on the vocabulary hits, and the
//! fail-soft behavior when the recognizer is absent or failing.

use std::sync::Arc;

use factweave_common::QueryIntent;
use factweave_kag::testing::MockRecognizer;
use factweave_kag::{EntityExtractor, EntityRecognizer};

// =========================================================================
// Keyword pass
// =========================================================================

#[tokio::test]
async fn keyword_pass_matches_vocabulary_substrings() {
    let extractor = EntityExtractor::new(None);
    let entities = extractor
        .extract_entities("Which employees worked on the bias detection initiative?")
        .await;

    assert!(entities.employee_keywords.contains("employees"));
    assert!(entities.employee_keywords.contains("worked"));
    assert!(entities.project_keywords.contains("bias detection"));
    assert!(entities.project_keywords.contains("initiative"));
    assert!(entities.report_keywords.is_empty());
}

#[tokio::test]
async fn safety_mentions_add_canonical_category_to_both_sets() {
    let extractor = EntityExtractor::new(None);
    let entities = extractor
        .extract_entities("Tell me about our AI Safety efforts")
        .await;

    assert!(entities.employee_keywords.contains("AI Safety"));
    assert!(entities.project_keywords.contains("AI Safety"));

    // The bare word "safety" is enough.
    let entities = extractor.extract_entities("how is safety going").await;
    assert!(entities.project_keywords.contains("AI Safety"));
}

#[tokio::test]
async fn verb_forms_canonicalize_to_outcome_nouns() {
    let extractor = EntityExtractor::new(None);

    let entities = extractor
        .extract_entities("what have we reduced lately")
        .await;
    assert!(entities.outcome_keywords.contains("reduction"));

    let entities = extractor
        .extract_entities("has accuracy improved this year?")
        .await;
    assert!(entities.outcome_keywords.contains("improvement"));
    assert!(entities.outcome_keywords.contains("accuracy"));
}

#[tokio::test]
async fn matching_is_case_insensitive() {
    let extractor = EntityExtractor::new(None);
    let entities = extractor
        .extract_entities("WHO WORKED ON ETHICS PROJECTS?")
        .await;

    assert!(entities.project_keywords.contains("ethics"));
    assert_eq!(entities.intent, QueryIntent::FindPeopleByProject);
}

#[tokio::test]
async fn empty_query_yields_empty_sets_and_default_intent() {
    let extractor = EntityExtractor::new(None);
    let entities = extractor.extract_entities("").await;

    assert!(entities.employee_keywords.is_empty());
    assert!(entities.project_keywords.is_empty());
    assert!(entities.outcome_keywords.is_empty());
    assert!(entities.report_keywords.is_empty());
    assert!(entities.person_names.is_empty());
    assert_eq!(entities.intent, QueryIntent::ComprehensiveSearch);
    assert_eq!(entities.primary_project_category(), "AI Safety");
}

// =========================================================================
// Intent cascade
// =========================================================================

#[tokio::test]
async fn ambiguous_query_resolves_to_first_matching_rule() {
    let extractor = EntityExtractor::new(None);
    let entities = extractor
        .extract_entities("Who worked on AI safety and what were the outcomes?")
        .await;

    // Matches both the people rule and the outcomes rule; rule order wins.
    assert_eq!(entities.intent, QueryIntent::FindPeopleByProject);
}

#[tokio::test]
async fn report_rule_fires_after_outcome_rules() {
    let extractor = EntityExtractor::new(None);

    let entities = extractor
        .extract_entities("where is the assessment document stored")
        .await;
    assert_eq!(entities.intent, QueryIntent::FindReports);

    // "project" + "result" outranks the report rule.
    let entities = extractor
        .extract_entities("summarize project results from the report")
        .await;
    assert_eq!(entities.intent, QueryIntent::FindProjectOutcomes);
}

// =========================================================================
// NER pass
// =========================================================================

#[tokio::test]
async fn recognizer_output_populates_name_sets() {
    let recognizer: Arc<dyn EntityRecognizer> = Arc::new(MockRecognizer::recognizing(
        &["Carol Johnson"],
        &["Acme Labs"],
    ));
    let extractor = EntityExtractor::new(Some(recognizer));

    let entities = extractor
        .extract_entities("What did Carol Johnson ship with Acme Labs?")
        .await;

    assert!(entities.person_names.contains("Carol Johnson"));
    assert!(entities.organizations.contains("Acme Labs"));
}

#[tokio::test]
async fn failing_recognizer_degrades_to_keyword_only() {
    let recognizer: Arc<dyn EntityRecognizer> = Arc::new(MockRecognizer::failing());
    let extractor = EntityExtractor::new(Some(recognizer));

    let entities = extractor
        .extract_entities("Who worked on AI safety with Carol?")
        .await;

    // Extraction still succeeds: name sets empty, keywords intact.
    assert!(entities.person_names.is_empty());
    assert!(entities.organizations.is_empty());
    assert!(entities.employee_keywords.contains("AI Safety"));
    assert_eq!(entities.intent, QueryIntent::FindPeopleByProject);
}

#[tokio::test]
async fn absent_recognizer_behaves_like_empty_recognition() {
    let extractor = EntityExtractor::new(None);
    let entities = extractor
        .extract_entities("What did Carol Johnson work on?")
        .await;

    assert!(entities.person_names.is_empty());
    assert!(entities.organizations.is_empty());
}
