pub mod client;
pub mod reader;

pub use client::GraphClient;
pub use reader::KnowledgeReader;
