//! Personalized recommendation ranking.
//!
//! Candidates (already filtered to exclude purchased products) are scored
//! with a binary relevance: 1 if the candidate's category appears in the
//! customer's purchased-category set, else 0. Ordering is relevance
//! descending with a uniform-random tiebreak within each band, so repeated
//! calls may legitimately return different orders.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use super::Product;

/// Target result length for recommendations.
pub const RECOMMENDATION_LIMIT: usize = 6;

/// Maximum distinct (category, brand) pairs inspected from purchase history.
pub const HISTORY_PAIR_LIMIT: usize = 10;

/// Maximum distinct (name, brand) pairs returned by the suggestion path.
pub const SUGGESTION_LIMIT: usize = 5;

/// Ranks candidates by category relevance and truncates to the target
/// length.
///
/// Shuffling before the stable sort gives the unstable random tiebreak
/// within each relevance band.
pub fn rank_candidates<R: Rng>(
    mut candidates: Vec<Product>,
    purchased_categories: &HashSet<String>,
    rng: &mut R,
) -> Vec<Product> {
    candidates.shuffle(rng);
    candidates.sort_by_key(|p| {
        let relevant = purchased_categories.contains(&p.category);
        std::cmp::Reverse(u8::from(relevant))
    });
    candidates.truncate(RECOMMENDATION_LIMIT);
    candidates
}

/// Returns how many backfill picks are needed to reach the target length.
pub fn backfill_shortfall(ranked: &[Product]) -> usize {
    RECOMMENDATION_LIMIT.saturating_sub(ranked.len())
}

/// Appends randomly selected backfill products until the target length is
/// reached or the supply is exhausted.
///
/// The backfill intentionally applies no exclusion filter; there is no
/// dedup guarantee beyond the purchased-product exclusion on the ranked
/// portion.
pub fn backfill<R: Rng>(
    mut ranked: Vec<Product>,
    mut supply: Vec<Product>,
    rng: &mut R,
) -> Vec<Product> {
    supply.shuffle(rng);
    for product in supply {
        if ranked.len() >= RECOMMENDATION_LIMIT {
            break;
        }
        ranked.push(product);
    }
    ranked
}
