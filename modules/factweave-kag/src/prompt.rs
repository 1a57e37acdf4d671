/// Fixed system prompt passed unmodified to the generator on every call.
pub const SYSTEM_PROMPT: &str = "You are a Knowledge-Augmented Generation (KAG) assistant for an enterprise. \
Your role is to provide accurate, well-sourced answers about company projects, \
employees, outcomes, and reports based on the knowledge graph context provided. \
Always maintain factual accuracy and provide citations to source documents when possible.";

/// Compose the grounded prompt: fixed preamble, the literal formatted
/// context block, the literal user query, and a closing instruction.
pub fn build_grounded_prompt(user_query: &str, formatted_context: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str("You are an AI assistant with access to a company's knowledge graph. ");
    prompt.push_str("Please answer the user's question based on the provided knowledge graph context.\n\n");

    prompt.push_str("IMPORTANT INSTRUCTIONS:\n");
    prompt.push_str("1. Base your answer ONLY on the provided knowledge graph context\n");
    prompt.push_str("2. If the context doesn't contain sufficient information, state this clearly\n");
    prompt.push_str("3. Include specific names, dates, and metrics from the context\n");
    prompt.push_str("4. Reference specific reports and documents mentioned in the context\n");
    prompt.push_str("5. Maintain a professional, informative tone\n\n");

    prompt.push_str(formatted_context);
    prompt.push('\n');

    prompt.push_str("USER QUERY: ");
    prompt.push_str(user_query);
    prompt.push_str("\n\n");

    prompt.push_str("Please provide a comprehensive answer based on the above context. ");
    prompt.push_str("Include relevant details about people, projects, outcomes, and supporting documentation.");

    prompt
}
