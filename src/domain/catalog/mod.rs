//! Product catalog domain: records and the recommendation ranking.

mod product;
pub mod recommendation;

pub use product::{Product, PurchasedCategory, Suggestion};
pub use recommendation::{
    backfill, backfill_shortfall, rank_candidates, HISTORY_PAIR_LIMIT, RECOMMENDATION_LIMIT,
    SUGGESTION_LIMIT,
};
