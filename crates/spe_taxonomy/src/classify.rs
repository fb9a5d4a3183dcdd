use crate::DISCOVERY_TAG;

/// Tokens that are mainstream when matched exactly.
const MAINSTREAM_EXACT: &[&str] = &["food", "restaurant", "bar", "dessert", "cafe"];

/// Tokens that make a type mainstream when contained anywhere in it.
const MAINSTREAM_SUBSTRINGS: &[&str] = &[
    "restaurant", "food", "bar", "dessert", "cafe", "coffee", "cocktail", "tea", "bakery",
];

/// True when the token names a food/drink-centric place.
pub fn is_mainstream_token(raw: &str) -> bool {
    let token = raw.trim().to_lowercase();
    if token.is_empty() {
        return false;
    }
    MAINSTREAM_EXACT.iter().any(|word| token == *word)
        || MAINSTREAM_SUBSTRINGS.iter().any(|word| token.contains(word))
}

/// True when every classification signal points at food/drink.
pub fn is_mainstream_like(tokens: &[String]) -> bool {
    tokens.iter().any(|token| is_mainstream_token(token))
}

/// Discovery classification over explicit tags plus category/type tokens.
///
/// A `"discovery"` tag always qualifies. Otherwise at least one token must be
/// present and non-mainstream; a record with zero type information is never
/// inferred as discovery.
pub fn is_discovery_signal(tags: &[String], tokens: &[String]) -> bool {
    if tags.iter().any(|tag| tag == DISCOVERY_TAG) {
        return true;
    }
    !tokens.is_empty() && tokens.iter().any(|token| !is_mainstream_token(token))
}
