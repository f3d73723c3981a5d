use proptest::prelude::*;

use jobmatch::recommend::fallback::keyword_score;
use jobmatch::recommend::normalize;
use jobmatch::recommend::semantic::distance_to_score;

proptest! {
    #[test]
    fn normalize_is_idempotent(text in ".{0,120}") {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_keeps_only_alphanumerics_and_whitespace(text in ".{0,120}") {
        let normalized = normalize(&text);
        prop_assert!(normalized.chars().all(|c| c.is_alphanumeric() || c.is_whitespace()));
        prop_assert_eq!(normalized.trim(), normalized.as_str());
    }

    #[test]
    fn keyword_score_is_bounded(total in 1usize..40, matches in 0usize..40) {
        let matches = matches.min(total);
        let score = keyword_score(matches, total);
        prop_assert!((20.0..=95.0).contains(&score));
    }

    #[test]
    fn keyword_score_grows_with_matches(total in 1usize..40, matches in 0usize..39) {
        let matches = matches.min(total - 1);
        prop_assert!(keyword_score(matches + 1, total) >= keyword_score(matches, total));
    }

    #[test]
    fn distance_score_stays_in_range(distance in -4.0f32..4.0) {
        let score = distance_to_score(distance);
        prop_assert!((0.0..=100.0).contains(&score));
    }
}
