use std::cmp::Reverse;

use crate::models::{
    QuizAnswers, QuizOption, QuizQuestion, UserProfile, ZoneContribution, ZoneId, ZoneMap,
    DEFAULT_ZONE,
};

/// Zones above this percentage count towards `top_zones`
const TOP_ZONE_THRESHOLD: u32 = 15;

/// Question bank plus the partial-credit weights behind every option
///
/// The standard bank has ten questions with three options each. Shorter,
/// older quiz variants answered only the first seven.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringMatrix {
    questions: Vec<QuizQuestion>,
}

impl Default for ScoringMatrix {
    fn default() -> Self {
        Self::standard()
    }
}

fn option(id: &'static str, label: &'static str, weights: &[(ZoneId, u32)]) -> QuizOption {
    QuizOption {
        id,
        label,
        contributions: weights
            .iter()
            .map(|&(zone, points)| ZoneContribution { zone, points })
            .collect(),
    }
}

fn question(id: &'static str, prompt: &'static str, options: Vec<QuizOption>) -> QuizQuestion {
    QuizQuestion { id, prompt, options }
}

impl ScoringMatrix {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self { questions }
    }

    /// The ten-question bank served to users
    pub fn standard() -> Self {
        use ZoneId::*;

        Self::new(vec![
            question(
                "q1",
                "A competitor ships the feature your roadmap had slotted for next quarter. You...",
                vec![
                    option("a", "Ship a lean version this sprint", &[(Velocity, 3)]),
                    option(
                        "b",
                        "Ask customers whether it actually matters",
                        &[(Discovery, 2), (Data, 1)],
                    ),
                    option(
                        "c",
                        "Stay the course, the plan has its reasons",
                        &[(Focus, 2), (Perfection, 1)],
                    ),
                ],
            ),
            question(
                "q2",
                "How do you decide what goes into the next release?",
                vec![
                    option("a", "Whatever moves the north-star metric", &[(Data, 3)]),
                    option("b", "What I believe users will love", &[(Intuition, 3)]),
                    option(
                        "c",
                        "A blend of team input, data and vision",
                        &[(Alignment, 1), (Data, 1), (Intuition, 1)],
                    ),
                ],
            ),
            question(
                "q3",
                "Launch day arrives and a known polish issue remains.",
                vec![
                    option(
                        "a",
                        "Launch anyway and fix it live",
                        &[(Velocity, 2), (Chaos, 1)],
                    ),
                    option("b", "Delay until it is right", &[(Perfection, 3)]),
                    option(
                        "c",
                        "Cut scope down to what is polished",
                        &[(Focus, 2), (Perfection, 1)],
                    ),
                ],
            ),
            question(
                "q4",
                "Leadership changes priorities in the middle of the quarter.",
                vec![
                    option("a", "Re-plan quickly, change is normal", &[(Chaos, 3)]),
                    option(
                        "b",
                        "Push back and defend the original goals",
                        &[(Focus, 3)],
                    ),
                    option(
                        "c",
                        "Get stakeholders aligned on the new direction",
                        &[(Alignment, 2), (Chaos, 1)],
                    ),
                ],
            ),
            question(
                "q5",
                "Your best product ideas usually come from...",
                vec![
                    option("a", "Customer interviews", &[(Discovery, 3)]),
                    option("b", "Usage analytics", &[(Data, 3)]),
                    option("c", "My own product sense", &[(Intuition, 3)]),
                ],
            ),
            question(
                "q6",
                "You and the engineering lead disagree on an approach.",
                vec![
                    option("a", "Write it up and build consensus", &[(Alignment, 3)]),
                    option(
                        "b",
                        "Run a quick experiment to settle it",
                        &[(Data, 2), (Velocity, 1)],
                    ),
                    option(
                        "c",
                        "Make the call and move on",
                        &[(Velocity, 1), (Intuition, 1), (Focus, 1)],
                    ),
                ],
            ),
            question(
                "q7",
                "A large customer asks for a custom feature.",
                vec![
                    option(
                        "a",
                        "Build it fast, revenue is revenue",
                        &[(Velocity, 2), (Chaos, 1)],
                    ),
                    option(
                        "b",
                        "Dig into the underlying problem first",
                        &[(Discovery, 3)],
                    ),
                    option("c", "Decline, it is off-strategy", &[(Focus, 3)]),
                ],
            ),
            question(
                "q8",
                "Your roadmap is best described as...",
                vec![
                    option("a", "Three bets and nothing else", &[(Focus, 3)]),
                    option(
                        "b",
                        "A living document that changes weekly",
                        &[(Chaos, 2), (Velocity, 1)],
                    ),
                    option(
                        "c",
                        "A shared narrative the whole team co-owns",
                        &[(Alignment, 3)],
                    ),
                ],
            ),
            question(
                "q9",
                "What makes a launch successful?",
                vec![
                    option("a", "It hit the metric we predicted", &[(Data, 3)]),
                    option(
                        "b",
                        "Users say it feels delightful",
                        &[(Perfection, 2), (Intuition, 1)],
                    ),
                    option(
                        "c",
                        "We learned something new about customers",
                        &[(Discovery, 2), (Chaos, 1)],
                    ),
                ],
            ),
            question(
                "q10",
                "There is no data to guide a decision. You...",
                vec![
                    option("a", "Trust your gut and commit", &[(Intuition, 3)]),
                    option(
                        "b",
                        "Gather the team and decide together",
                        &[(Alignment, 2), (Discovery, 1)],
                    ),
                    option(
                        "c",
                        "Ship a small test to create some data",
                        &[(Velocity, 2), (Data, 1)],
                    ),
                ],
            ),
        ])
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn question(&self, question_id: &str) -> Option<&QuizQuestion> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    /// Weights for one (question, option) pair, if the pair exists
    pub fn contributions(&self, question_id: &str, option_id: &str) -> Option<&[ZoneContribution]> {
        self.question(question_id)
            .and_then(|q| q.option(option_id))
            .map(|o| o.contributions.as_slice())
    }
}

/// Sums the matrix contributions of every recognized answer.
/// Unknown questions or options contribute nothing.
pub fn calculate_zone_scores(answers: &QuizAnswers, matrix: &ScoringMatrix) -> ZoneMap<u32> {
    let mut scores = ZoneMap::filled(0u32);

    for (question_id, option_id) in answers.iter() {
        let Some(contributions) = matrix.contributions(question_id, option_id) else {
            tracing::debug!(question_id, option_id, "Ignoring unrecognized answer");
            continue;
        };

        for contribution in contributions {
            let zone = contribution.zone;
            scores.set(zone, scores[zone] + contribution.points);
        }
    }

    scores
}

/// Normalizes scores to whole percentages of the total
pub fn calculate_percentages(scores: &ZoneMap<u32>) -> ZoneMap<u32> {
    let total: u32 = scores.iter().map(|(_, score)| score).sum();
    if total == 0 {
        return ZoneMap::filled(0);
    }

    scores.map(|score| percentage_of(score, total))
}

fn percentage_of(score: u32, total: u32) -> u32 {
    (f64::from(score) / f64::from(total) * 100.0).round() as u32
}

/// Zones ordered by percentage descending, ties by canonical zone order
pub fn rank_zones(percentages: &ZoneMap<u32>) -> Vec<ZoneId> {
    // ALL is already in canonical order and the sort is stable
    let mut ranked = ZoneId::ALL.to_vec();
    ranked.sort_by_key(|zone| Reverse(percentages[*zone]));
    ranked
}

/// Builds the full profile for a set of quiz answers.
///
/// Degenerate inputs never fail:
/// - nothing scored: primary, secondary and blind spot are all `DEFAULT_ZONE`
/// - exactly one zone scored: secondary collapses onto primary, and the blind
///   spot is the last zero-score zone in canonical order
pub fn build_profile(answers: &QuizAnswers, matrix: &ScoringMatrix) -> UserProfile {
    let zone_scores = calculate_zone_scores(answers, matrix);
    let zone_percentages = calculate_percentages(&zone_scores);
    let ranked = rank_zones(&zone_percentages);

    let scoring_zones = zone_scores.iter().filter(|(_, score)| *score > 0).count();

    let (primary_zone, secondary_zone, blind_spot_zone) = if scoring_zones == 0 {
        (DEFAULT_ZONE, DEFAULT_ZONE, DEFAULT_ZONE)
    } else {
        let primary = ranked.first().copied().unwrap_or(DEFAULT_ZONE);
        let secondary = if scoring_zones >= 2 {
            ranked.get(1).copied().unwrap_or(primary)
        } else {
            primary
        };
        let blind_spot = ranked.last().copied().unwrap_or(DEFAULT_ZONE);
        (primary, secondary, blind_spot)
    };

    let mut top_zones: Vec<ZoneId> = ranked
        .iter()
        .copied()
        .filter(|zone| zone_percentages[*zone] > TOP_ZONE_THRESHOLD)
        .collect();
    if top_zones.len() < 2 {
        for zone in [primary_zone, secondary_zone] {
            if !top_zones.contains(&zone) {
                top_zones.push(zone);
            }
        }
    }

    UserProfile {
        zone_scores,
        zone_percentages,
        primary_zone,
        secondary_zone,
        blind_spot_zone,
        top_zones,
    }
}
