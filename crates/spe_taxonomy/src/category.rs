/// Semantic category inferred from a free-text place type token.
///
/// The closed variants cover the vocabularies the engine reasons about;
/// anything else is carried through verbatim as `Other` so no information is
/// lost for downstream consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Food,
    Bar,
    Dessert,
    Culture,
    Games,
    Outdoors,
    Other(String),
}

const FOOD_TOKENS: &[&str] = &["restaurant", "food"];
const BAR_TOKENS: &[&str] = &["bar", "cocktail"];
const DESSERT_TOKENS: &[&str] = &["dessert", "bakery", "cafe", "coffee"];
const CULTURE_TOKENS: &[&str] = &["museum", "gallery", "culture"];
const GAMES_TOKENS: &[&str] = &["amusement", "games", "arcade"];
const OUTDOORS_TOKENS: &[&str] = &["park", "outdoor", "trail", "garden"];

fn contains_any(token: &str, vocabulary: &[&str]) -> bool {
    vocabulary.iter().any(|word| token.contains(word))
}

impl Category {
    /// Infer a category from a raw type token. Vocabularies are checked by
    /// substring containment in a fixed priority order; the first match wins.
    /// Unmatched tokens come back unchanged as `Other` (lowercased, trimmed).
    pub fn from_type_token(raw: &str) -> Category {
        let token = raw.trim().to_lowercase();
        if contains_any(&token, FOOD_TOKENS) {
            Category::Food
        } else if contains_any(&token, BAR_TOKENS) {
            Category::Bar
        } else if contains_any(&token, DESSERT_TOKENS) {
            Category::Dessert
        } else if contains_any(&token, CULTURE_TOKENS) {
            Category::Culture
        } else if contains_any(&token, GAMES_TOKENS) {
            Category::Games
        } else if contains_any(&token, OUTDOORS_TOKENS) {
            Category::Outdoors
        } else {
            Category::Other(token)
        }
    }

    /// Canonical label for the category. `Other` yields the raw token.
    pub fn label(&self) -> &str {
        match self {
            Category::Food => "food",
            Category::Bar => "bar",
            Category::Dessert => "dessert",
            Category::Culture => "culture",
            Category::Games => "games",
            Category::Outdoors => "outdoors",
            Category::Other(raw) => raw,
        }
    }
}
