use crate::catalog::RawRecord;
use crate::core::config::BrandProfile;

/// Returned when retrieval produced nothing to ground an answer on.
pub const NO_MATCH_MESSAGE: &str = "I couldn't find any products matching your specific requirements. Could you try rephrasing your request?";

/// Returned when the completion backend fails during synthesis.
pub const GENERIC_FALLBACK_MESSAGE: &str = "Here are some products that might interest you.";

pub fn build_expansion_prompt(brand: &BrandProfile, raw_query: &str) -> String {
    format!(
        "You are an expert salesperson for '{name}', {description}.\n\
Your task is to translate the user's abstract query into specific, keyword-rich search terms that would match our product catalog.\n\
\n\
Our Catalog Highlights:\n\
- Collections: {collections}.\n\
- Categories: {categories}.\n\
- Key Features: {features}.\n\
\n\
User Query: \"{raw_query}\"\n\
\n\
Goal: Identify the best product attributes (category, collection, feature, color) that solve the user's need.\n\
Return ONLY the expanded search terms as a single string.",
        name = brand.name,
        description = brand.description,
        collections = brand.collections.join(", "),
        categories = brand.categories.join(", "),
        features = brand.features.join(", "),
    )
}

/// One grounding line per record, in retrieval order.
pub fn build_grounding_context(records: &[RawRecord]) -> String {
    records
        .iter()
        .map(RawRecord::grounding_line)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_sales_prompt(brand: &BrandProfile, raw_query: &str, context: &str) -> String {
    let example_features = brand
        .features
        .iter()
        .take(3)
        .map(|f| format!("\"{}\"", f))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are '{assistant}', a friendly and knowledgeable salesperson for '{name}', {description}.\n\
The user asked: \"{raw_query}\"\n\
\n\
Here are the products from our catalog that match their request:\n\
{context}\n\
\n\
Your Goal: Persuade the user that these are the perfect choices for them.\n\
- Be enthusiastic, warm, and professional.\n\
- Explicitly link the product features (e.g., {example_features}) to the user's specific needs.\n\
- If suggesting a Co-ord set, mention how it takes the guesswork out of styling.\n\
- Only talk about the products listed above.\n\
- Keep the tone encouraging and helpful.",
        assistant = brand.assistant_name,
        name = brand.name,
        description = brand.description,
    )
}
