use std::collections::HashSet;

use pm_compass::{
    models::{
        ContentRegistry, ContrarianCandidate, EpisodeEnrichment, EpisodeMetadata, QuizAnswers,
        Quote, QuoteSource, ZoneId, ZoneMap,
    },
    services::{
        build_profile, generate_recommendations,
        recommendations::{
            find_best_matching_quotes, score_episodes, select_contrarian, select_primary,
        },
        Catalog, RecommendationOptions, ScoringMatrix,
    },
};

fn sample_catalog() -> Catalog {
    let registry: ContentRegistry =
        serde_json::from_str(include_str!("../data/verified-content.json")).unwrap();
    let episodes: Vec<EpisodeMetadata> =
        serde_json::from_str(include_str!("../data/episodes.json")).unwrap();
    Catalog::from_parts(registry, episodes)
}

fn answers_from_index(mut index: usize) -> QuizAnswers {
    (1..=10)
        .map(|q| {
            let option = ["a", "b", "c"][index % 3];
            index /= 3;
            (format!("q{}", q), option.to_string())
        })
        .collect()
}

fn uniform(option_id: &str, count: usize) -> QuizAnswers {
    (1..=count)
        .map(|q| (format!("q{}", q), option_id.to_string()))
        .collect()
}

#[test]
fn test_sample_catalog_loads() {
    let catalog = sample_catalog();
    assert_eq!(catalog.len(), 10);
    assert!(catalog.episode("unreleased-episode").is_none());
    // camelCase and snake_case influence spellings both land in the same field
    let priya = &catalog.episode("priya-raman").unwrap().enrichment;
    assert!(priya.zone_influence[ZoneId::Focus] > 0.0);
    let tom = &catalog.episode("tom-okafor").unwrap().enrichment;
    assert!(tom.zone_influence[ZoneId::Discovery] > 0.0);
}

#[test]
fn test_recommendations_are_deterministic() {
    let catalog = sample_catalog();
    let matrix = ScoringMatrix::standard();
    let answers = answers_from_index(12345);
    let options = RecommendationOptions::default();

    let first = generate_recommendations(&answers, &catalog, &matrix, options);
    let second = generate_recommendations(&answers, &catalog, &matrix, options);

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_recommendation_invariants_across_answer_sets() {
    let catalog = sample_catalog();
    let matrix = ScoringMatrix::standard();
    let options = RecommendationOptions::default();

    for index in (0..59_049).step_by(97) {
        let answers = answers_from_index(index);
        let recs = generate_recommendations(&answers, &catalog, &matrix, options);

        assert!(!recs.primary.is_empty(), "no primary for set {}", index);
        assert!(recs.primary.len() <= 5);
        assert!(recs.contrarian.len() <= 3);

        let primary: HashSet<&str> = recs.primary.iter().map(|p| p.slug.as_str()).collect();
        let contrarian: HashSet<&str> = recs.contrarian.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(primary.len(), recs.primary.len());
        assert_eq!(contrarian.len(), recs.contrarian.len());
        assert!(primary.is_disjoint(&contrarian));
        assert!(!primary.contains("noah-green"));

        for pair in recs.primary.windows(2) {
            assert!(pair[0].alignment_score >= pair[1].alignment_score);
        }
        for rec in recs.primary.iter().chain(recs.contrarian.iter()) {
            assert!(rec.alignment_score <= 100);
            assert!(!rec.matching_quotes.is_empty());
            assert!(rec.matching_quotes.len() <= 2);
        }
        for rec in &recs.contrarian {
            assert_eq!(rec.matching_quotes.len(), 1);
            assert!(rec.match_reason.starts_with("Challenges your thinking: \""));
            assert!(rec.contrarian.is_some());
        }

        let profile = &recs.user_profile;
        let sum: u32 = profile.zone_percentages.iter().map(|(_, p)| p).sum();
        assert!((95..=105).contains(&sum), "percentages summed to {}", sum);

        let scoring_zones = profile.zone_scores.iter().filter(|(_, s)| *s > 0).count();
        if scoring_zones >= 2 {
            assert_ne!(profile.primary_zone, profile.blind_spot_zone);
        }
    }
}

#[test]
fn test_uniform_answers_pick_max_zone() {
    let matrix = ScoringMatrix::standard();
    for option_id in ["a", "b", "c"] {
        let profile = build_profile(&uniform(option_id, 10), &matrix);
        let percentages = &profile.zone_percentages;
        let max = percentages.iter().map(|(_, p)| p).max().unwrap();
        assert_eq!(profile.percentage(profile.primary_zone), max);
    }
}

#[test]
fn test_seven_answer_quiz_produces_recommendations() {
    let catalog = sample_catalog();
    let answers = uniform("a", 7);
    let matrix = ScoringMatrix::standard();
    let options = RecommendationOptions::default();
    let recs = generate_recommendations(&answers, &catalog, &matrix, options);
    assert!(recs.user_profile.total_score() > 0);
    assert!(!recs.primary.is_empty());
}

#[test]
fn test_empty_answers_do_not_panic() {
    let catalog = sample_catalog();
    let recs = generate_recommendations(
        &QuizAnswers::new(),
        &catalog,
        &ScoringMatrix::standard(),
        RecommendationOptions::default(),
    );
    let percentages = &recs.user_profile.zone_percentages;
    assert!(percentages.iter().all(|(_, p)| p == 0));
    assert!(recs.primary.len() <= 5);
}

#[test]
fn test_larger_primary_limit() {
    let catalog = sample_catalog();
    let answers = uniform("b", 10);
    let matrix = ScoringMatrix::standard();
    let options = RecommendationOptions::default().with_primary_limit(12);
    let recs = generate_recommendations(&answers, &catalog, &matrix, options);
    assert!(recs.primary.len() <= 9);
    assert!(recs.primary.len() >= 3);
}

// Synthetic fixtures

fn quote(id: &str, slug: &str, zones: &[ZoneId]) -> Quote {
    Quote {
        id: id.to_string(),
        speaker: "Test Guest".to_string(),
        text: "Roadmaps are promises you make to yourself.".to_string(),
        timestamp: None,
        source: QuoteSource {
            slug: slug.to_string(),
            line_start: 1,
            line_end: 3,
        },
        themes: vec!["roadmaps".to_string()],
        zones: zones.to_vec(),
    }
}

fn episode(
    slug: &str,
    influence: &[(ZoneId, f64)],
    contrarian_zones: Option<&[ZoneId]>,
) -> (EpisodeEnrichment, EpisodeMetadata) {
    let quote_id = format!("{}-001", slug);
    (
        EpisodeEnrichment {
            slug: slug.to_string(),
            quotes: vec![quote(&quote_id, slug, &[])],
            themes: vec![],
            takeaways: vec![],
            zone_influence: influence.iter().copied().collect::<ZoneMap<f64>>(),
            contrarian_candidates: contrarian_zones
                .map(|zones| {
                    vec![ContrarianCandidate {
                        quote_id: quote_id.clone(),
                        why: "Pushes back on your instincts".to_string(),
                        related_zones: zones.to_vec(),
                    }]
                })
                .unwrap_or_default(),
        },
        EpisodeMetadata {
            slug: slug.to_string(),
            guest: "Test Guest".to_string(),
            title: slug.to_string(),
            guest_type: None,
        },
    )
}

fn synthetic_catalog(episodes: Vec<(EpisodeEnrichment, EpisodeMetadata)>) -> Catalog {
    let (episodes, metadata): (Vec<_>, Vec<_>) = episodes.into_iter().unzip();
    Catalog::from_parts(
        ContentRegistry {
            episodes,
            quotes: vec![],
            last_updated: "test".to_string(),
        },
        metadata,
    )
}

#[test]
fn test_quote_fallback_without_zone_tags() {
    let profile = build_profile(&uniform("a", 10), &ScoringMatrix::standard());
    let quotes = vec![
        quote("one", "s", &[]),
        quote("two", "s", &[]),
        quote("three", "s", &[]),
    ];
    let best = find_best_matching_quotes(&profile, &quotes, 2);
    assert_eq!(best.len(), 2);
    assert_eq!(best[0].id, "one");
    assert_eq!(best[1].id, "two");
}

#[test]
fn test_identical_episodes_second_never_scores_higher() {
    let heavy = [(ZoneId::Data, 0.85), (ZoneId::Discovery, 0.15)];
    let catalog = synthetic_catalog(vec![
        episode("first", &heavy, None),
        episode("second", &heavy, None),
    ]);
    let profile = build_profile(&uniform("a", 10), &ScoringMatrix::standard());

    let scored = score_episodes(&profile, &catalog);
    assert_eq!(scored[0].score, scored[1].score);

    let primary = select_primary(&scored, 5);
    assert_eq!(primary.len(), 2);
    assert!(primary[1].alignment_score <= primary[0].alignment_score);
}

#[test]
fn test_blind_spot_influence_outranks_in_contrarian() {
    let profile = build_profile(&uniform("a", 10), &ScoringMatrix::standard());
    let blind_spot = profile.blind_spot_zone;
    let taken = [profile.primary_zone, profile.secondary_zone, blind_spot];
    let other = ZoneId::ALL
        .into_iter()
        .find(|zone| !taken.contains(zone))
        .unwrap();

    let related = [blind_spot];
    let pure = [(other, 1.0)];
    let mixed = [(other, 0.7), (blind_spot, 0.3)];
    let catalog = synthetic_catalog(vec![
        episode("without-blind-spot", &pure, Some(&related[..])),
        episode("with-blind-spot", &mixed, Some(&related[..])),
    ]);

    let scored = score_episodes(&profile, &catalog);
    let picks = select_contrarian(&profile, &scored, &HashSet::new(), 3);
    let slugs: Vec<&str> = picks.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["with-blind-spot", "without-blind-spot"]);
}

#[test]
fn test_contrarian_excludes_primary_slugs() {
    let velocity = [ZoneId::Velocity];
    let only = episode("only", &[(ZoneId::Velocity, 1.0)], Some(&velocity[..]));
    let catalog = synthetic_catalog(vec![only]);
    let answers = uniform("a", 10);
    let matrix = ScoringMatrix::standard();
    let options = RecommendationOptions::default();
    let recs = generate_recommendations(&answers, &catalog, &matrix, options);
    assert_eq!(recs.primary.len(), 1);
    assert!(recs.contrarian.is_empty());
}
