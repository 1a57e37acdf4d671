use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use tracing::{debug, error, info};

use factweave_common::{FactweaveError, KagResponse};

use crate::citations::CitationEngine;
use crate::extract::EntityExtractor;
use crate::format::format_context_for_llm;
use crate::prompt::{build_grounded_prompt, SYSTEM_PROMPT};
use crate::retrieve::StrategyRouter;
use crate::traits::{AnswerGenerator, EntityRecognizer, KnowledgeQueries};

/// The full query pipeline: extract, retrieve, format, compose, generate,
/// annotate, assemble. Stages run sequentially with no branching; the only
/// suspension points are the graph and generator collaborator calls.
///
/// Holds no per-request mutable state. One instance serves all concurrent
/// queries; collaborators are process-wide and constructed at startup.
pub struct KagPipeline {
    extractor: EntityExtractor,
    router: StrategyRouter,
    generator: Arc<dyn AnswerGenerator>,
    citations: CitationEngine,
}

impl KagPipeline {
    pub fn new(
        knowledge: Arc<dyn KnowledgeQueries>,
        generator: Arc<dyn AnswerGenerator>,
        recognizer: Option<Arc<dyn EntityRecognizer>>,
    ) -> Self {
        Self {
            extractor: EntityExtractor::new(recognizer),
            router: StrategyRouter::new(knowledge),
            generator,
            citations: CitationEngine::new(),
        }
    }

    /// Process one query end to end. A failure at any stage yields a
    /// response carrying only the original query and an error message;
    /// partial pipeline output is never attached.
    pub async fn process_query(&self, user_query: &str) -> KagResponse {
        match self.run(user_query).await {
            Ok(response) => response,
            Err(err) => {
                error!(query = user_query, error = %err, "query processing failed");
                KagResponse::failure(user_query, format!("Failed to process query: {err}"))
            }
        }
    }

    async fn run(&self, user_query: &str) -> Result<KagResponse> {
        info!(query = user_query, "processing query");

        let entities = self.extractor.extract_entities(user_query).await;

        let context = self.router.retrieve(&entities).await;

        let formatted_context = format_context_for_llm(&context);
        debug!(chars = formatted_context.len(), "context formatted");

        let prompt = build_grounded_prompt(user_query, &formatted_context);

        let raw_answer = self
            .generator
            .generate(&prompt, SYSTEM_PROMPT, None)
            .await
            .map_err(|err| FactweaveError::Generation(err.to_string()))?;
        info!(chars = raw_answer.len(), "answer generated");

        // Injection runs exactly once per query; re-annotating would
        // duplicate the footnote section.
        let (annotated_answer, injected) = self.citations.inject(&raw_answer, &context);
        debug!(injected = injected.len(), "citations injected");

        let citations = self.citations.extract(&context);

        Ok(KagResponse {
            user_query: user_query.to_string(),
            extracted_entities: Some(entities),
            knowledge_graph_context: Some(context),
            raw_answer: Some(raw_answer),
            annotated_answer: Some(annotated_answer),
            citations,
            error: None,
            timestamp: Utc::now(),
        })
    }
}
