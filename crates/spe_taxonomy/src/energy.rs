/// Energy buckets checked highest-first. When a place matches several buckets
/// the most energetic one wins; ambiguity deliberately resolves toward
/// excitement rather than contemplative activities.
const ENERGY_BUCKETS: &[(&[&str], f64)] = &[
    (&["nightlife", "bar", "club", "lounge"], 0.8),
    (&["games", "arcade", "bowling", "mini_golf"], 0.7),
    (&["outdoors", "park", "trail", "garden", "beach"], 0.6),
    (&["museum", "gallery", "culture"], 0.5),
    (&["restaurant", "food"], 0.4),
    (&["cafe", "coffee", "dessert", "bakery", "tea"], 0.3),
];

/// Estimate an energy level in `[0.0, 1.0]` from type tokens.
///
/// Tokens are matched by substring containment against each bucket in order;
/// only the first matching bucket is used. No match yields `None` so callers
/// can distinguish "unknown" from "low".
pub fn infer_energy<'a, I>(tokens: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a str>,
{
    let tokens: Vec<String> = tokens
        .into_iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    for (vocabulary, level) in ENERGY_BUCKETS {
        let hit = tokens
            .iter()
            .any(|token| vocabulary.iter().any(|word| token.contains(word)));
        if hit {
            return Some(*level);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_checked_highest_first() {
        assert_eq!(infer_energy(["wine_bar"]), Some(0.8));
        assert_eq!(infer_energy(["bowling_alley"]), Some(0.7));
        assert_eq!(infer_energy(["state park"]), Some(0.6));
        assert_eq!(infer_energy(["art gallery"]), Some(0.5));
        assert_eq!(infer_energy(["restaurant"]), Some(0.4));
        assert_eq!(infer_energy(["tea house"]), Some(0.3));
    }

    #[test]
    fn most_energetic_bucket_wins_on_mixed_tokens() {
        // A museum with a bar classifies as nightlife-level energy.
        assert_eq!(infer_energy(["museum", "bar"]), Some(0.8));
        assert_eq!(infer_energy(["cafe", "arcade"]), Some(0.7));
    }

    #[test]
    fn unknown_tokens_yield_none() {
        assert_eq!(infer_energy(["planetarium"]), None);
        assert_eq!(infer_energy([]), None);
        assert_eq!(infer_energy(["  "]), None);
    }
}
