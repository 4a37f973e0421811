pub mod adverse_event;
pub mod app_state;
pub mod fetch_result;
pub mod region_interest;

pub use adverse_event::{summarize_reactions, AdverseEventReport, ReactionCount};
pub use app_state::AppState;
pub use fetch_result::FetchResult;
pub use region_interest::{rank_by_interest, top_region, RegionInterest, Resolution};
