use serde::Serialize;

use super::{ZoneId, ZoneMap};

/// A user's derived standing across all zones, rebuilt from answers on every call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub zone_scores: ZoneMap<u32>,
    /// Scores normalized to whole percentages; all zero when nothing scored
    pub zone_percentages: ZoneMap<u32>,
    pub primary_zone: ZoneId,
    pub secondary_zone: ZoneId,
    pub blind_spot_zone: ZoneId,
    /// Zones above 15%, ranked; never fewer than primary and secondary
    pub top_zones: Vec<ZoneId>,
}

impl UserProfile {
    pub fn percentage(&self, zone: ZoneId) -> u32 {
        self.zone_percentages.get(zone)
    }

    /// User strength in `zone` as a fraction in [0, 1]
    pub fn strength(&self, zone: ZoneId) -> f64 {
        f64::from(self.percentage(zone)) / 100.0
    }

    pub fn total_score(&self) -> u32 {
        self.zone_scores.iter().map(|(_, score)| score).sum()
    }
}
