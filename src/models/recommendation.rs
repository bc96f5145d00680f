use serde::Serialize;

use super::{Quote, UserProfile, ZoneMap};

/// The opposing viewpoint attached to a contrarian pick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContrarianPick {
    pub quote: Quote,
    pub why: String,
}

/// One recommended episode, with the evidence for recommending it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeAlignment {
    pub slug: String,
    pub guest: String,
    pub title: String,
    /// 0 to 100
    pub alignment_score: u8,
    pub matching_quotes: Vec<Quote>,
    pub match_reason: String,
    pub episode_zones: ZoneMap<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrarian: Option<ContrarianPick>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub user_profile: UserProfile,
    pub primary: Vec<EpisodeAlignment>,
    pub contrarian: Vec<EpisodeAlignment>,
}
