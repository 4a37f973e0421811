//! Placeholder tables shown when a live search-interest fetch fails.

use crate::models::RegionInterest;
use crate::utils::STATE_CODES;

/// Rows in the metro placeholder table.
pub const METRO_FALLBACK_ROWS: usize = 10;

pub const METRO_FALLBACK_NAME: &str = "N/A";

/// Every state plus DC at the same `interest` value.
pub fn state_fallback(interest: u32) -> Vec<RegionInterest> {
    STATE_CODES
        .iter()
        .map(|(name, code)| RegionInterest::new(*name, Some(code.to_string()), interest))
        .collect()
}

/// Ten unnamed metros with no interest.
pub fn metro_fallback() -> Vec<RegionInterest> {
    (0..METRO_FALLBACK_ROWS)
        .map(|_| RegionInterest::new(METRO_FALLBACK_NAME, None, 0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::is_state_code;

    #[test]
    fn test_state_fallback_covers_every_region_at_one_value() {
        let rows = state_fallback(85);
        assert_eq!(rows.len(), 51);
        assert!(rows.iter().all(|r| r.interest == 85));
        assert!(rows
            .iter()
            .all(|r| r.code.as_deref().map(is_state_code).unwrap_or(false)));
    }

    #[test]
    fn test_metro_fallback_is_ten_placeholder_rows() {
        let rows = metro_fallback();
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|r| r.name == "N/A" && r.interest == 0 && r.code.is_none()));
    }
}
