pub mod citations;
pub mod extract;
pub mod format;
pub mod pipeline;
pub mod prompt;
pub mod retrieve;
pub mod testing;
pub mod traits;

pub use citations::CitationEngine;
pub use extract::EntityExtractor;
pub use format::format_context_for_llm;
pub use pipeline::KagPipeline;
pub use prompt::{build_grounded_prompt, SYSTEM_PROMPT};
pub use retrieve::StrategyRouter;
pub use traits::{AnswerGenerator, EntityRecognizer, KnowledgeQueries, RecognizedNames};
