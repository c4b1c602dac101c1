use gamelister_core::{Category, MatchMode};

use super::*;

const SWITCH: u32 = 130;
const WII_U: u32 = 41;
const PC: u32 = 6;
const PS4: u32 = 48;
const ADVENTURE: u32 = 31;
const PUZZLE: u32 = 9;
const RPG: u32 = 12;

fn game(name: &str) -> CatalogRecord {
    CatalogRecord::new(1, name)
        .with_platforms(&[SWITCH])
        .with_genres(&[ADVENTURE])
        .with_release_date(1_500_000_000_000)
}

fn classify(options: &SearchOptions, record: &mut CatalogRecord) -> (MatchDecision, Information) {
    let mut info = Information::default();
    let decision = Classifier::new(options).classify(record, &mut info);
    (decision, info)
}

#[test]
fn plain_record_is_accepted() {
    let (decision, _) = classify(&SearchOptions::new(), &mut game("Celeste"));
    assert!(decision.is_accepted());
}

#[test]
fn add_ons_are_always_rejected() {
    let permissive = SearchOptions::new()
        .allowed_platforms(&["Nintendo Switch"])
        .release_status(ReleaseStatus::All);
    for category in [Category::Dlc, Category::Bundle] {
        let mut record = game("Season Pass").with_category(category);
        let (decision, _) = classify(&permissive, &mut record);
        assert_eq!(decision.reasons, vec![RejectReason::AddOn]);
    }

    let mut expansion = game("Torna").with_category(Category::Expansion);
    assert!(classify(&permissive, &mut expansion).0.is_accepted());
}

#[test]
fn duplicate_prefix_is_rejected() {
    let (decision, _) = classify(&SearchOptions::new(), &mut game("duplicate Foo"));
    assert_eq!(decision.reasons, vec![RejectReason::Duplicate]);

    let (decision, _) = classify(&SearchOptions::new(), &mut game("DUPLICATE Foo"));
    assert!(!decision.is_accepted());

    let (decision, _) = classify(&SearchOptions::new(), &mut game("Foo duplicate"));
    assert!(decision.is_accepted());
}

#[test]
fn malformed_and_unnamed_stop_early() {
    let options = SearchOptions::new().search_platforms(&["Nintendo Switch"], MatchMode::Any);

    let mut malformed: CatalogRecord = error_marker_record();
    let (decision, info) = classify(&options, &mut malformed);
    assert_eq!(decision.reasons, vec![RejectReason::Malformed]);
    assert_eq!(info.search_platforms, 0);

    let mut unnamed = game("x");
    unnamed.name = None;
    let (decision, info) = classify(&options, &mut unnamed);
    assert_eq!(decision.reasons, vec![RejectReason::Unnamed]);
    assert_eq!(info.search_platforms, 0);
}

/// A record that only carries the API's error marker.
fn error_marker_record() -> CatalogRecord {
    CatalogRecord {
        error: Some(serde::de::IgnoredAny),
        ..Default::default()
    }
}

#[test]
fn search_text_miss_skips_remaining_checks() {
    let options = SearchOptions::new()
        .search("zelda")
        .search_platforms(&["Nintendo Switch"], MatchMode::Any);
    let mut record = game("Metroid Dread").with_category(Category::Dlc);
    let (decision, info) = classify(&options, &mut record);
    assert_eq!(decision.reasons, vec![RejectReason::SearchMiss]);
    assert_eq!(info.search_platforms, 0);
}

#[test]
fn search_text_matches_case_insensitively() {
    let options = SearchOptions::new().search("zelda");
    let mut record = game("The Legend of Zelda: Tears of the Kingdom");
    assert!(classify(&options, &mut record).0.is_accepted());
}

#[test]
fn missing_platforms_rejected_when_allow_list_set() {
    let options = SearchOptions::new().allowed_platforms(&["Nintendo Switch"]);
    let mut record = game("Mystery");
    record.platforms = None;
    let (decision, info) = classify(&options, &mut record);
    assert_eq!(
        decision.reasons,
        vec![RejectReason::MissingField(Domain::Platform)]
    );
    assert_eq!(info.allowed_platforms, 0);
}

#[test]
fn allow_list_includes_search_platforms() {
    let options = SearchOptions::new()
        .search_platforms(&["Nintendo Switch"], MatchMode::Any)
        .allowed_platforms(&["PC (Microsoft Windows)"]);

    let mut ok = game("Hades").with_platforms(&[PC, SWITCH]);
    let (decision, info) = classify(&options, &mut ok);
    assert!(decision.is_accepted());
    assert_eq!(info.allowed_platforms, 1);

    let mut not_ok = game("Hades").with_platforms(&[PC, SWITCH, PS4]);
    let (decision, info) = classify(&options, &mut not_ok);
    assert_eq!(
        decision.reasons,
        vec![RejectReason::NotAllowed(Domain::Platform)]
    );
    assert_eq!(info.allowed_platforms, 0);
}

#[test]
fn disallowed_platform_rejects_and_counts() {
    let options = SearchOptions::new().disallowed_platforms(&["PlayStation 4"]);
    let mut record = game("Hades").with_platforms(&[SWITCH, PS4]);
    let (decision, info) = classify(&options, &mut record);
    assert_eq!(
        decision.reasons,
        vec![RejectReason::Disallowed(Domain::Platform)]
    );
    assert_eq!(info.disallowed_platforms, 1);
}

#[test]
fn genre_lists_mirror_platform_lists() {
    let options = SearchOptions::new()
        .allowed_genres(&["Adventure", "Puzzle"])
        .disallowed_genres(&["Role-playing (RPG)"]);

    let mut ok = game("Portal").with_genres(&[PUZZLE, ADVENTURE]);
    let (decision, info) = classify(&options, &mut ok);
    assert!(decision.is_accepted());
    assert_eq!(info.allowed_genres, 1);

    let mut rpg = game("Octopath").with_genres(&[ADVENTURE, RPG]);
    let (decision, info) = classify(&options, &mut rpg);
    assert_eq!(
        decision.reasons,
        vec![
            RejectReason::NotAllowed(Domain::Genre),
            RejectReason::Disallowed(Domain::Genre),
        ]
    );
    assert_eq!(info.disallowed_genres, 1);

    let mut missing = game("Untagged");
    missing.genres = None;
    let (decision, _) = classify(&options, &mut missing);
    assert_eq!(decision.reasons, vec![RejectReason::MissingField(Domain::Genre)]);
}

#[test]
fn search_platform_moves_to_front() {
    let options = SearchOptions::new().search_platforms(&["Wii U"], MatchMode::Any);
    let mut record = game("Bayonetta 2").with_platforms(&[SWITCH, WII_U]);
    let (decision, info) = classify(&options, &mut record);
    assert!(decision.is_accepted());
    assert_eq!(record.platforms, Some(vec![WII_U, SWITCH]));
    assert_eq!(info.search_platforms, 1);
}

#[test]
fn multiple_search_platforms_order_by_code() {
    // Option order is Switch then Wii U, but ties go to the lower code.
    let options = SearchOptions::new().search_platforms(&["Nintendo Switch", "Wii U"], MatchMode::Any);
    let mut record = game("Mario Kart 8").with_platforms(&[PC, SWITCH, PS4, WII_U]);
    let (_, info) = classify(&options, &mut record);
    assert_eq!(record.platforms, Some(vec![WII_U, SWITCH, PC, PS4]));
    assert_eq!(info.search_platforms, 2);
}

#[test]
fn repeated_codes_keep_their_count() {
    let options = SearchOptions::new().search_platforms(&["Nintendo Switch"], MatchMode::Any);
    let mut record = game("Doubled Up").with_platforms(&[WII_U, SWITCH, PC, SWITCH]);
    let (_, info) = classify(&options, &mut record);
    assert_eq!(record.platforms, Some(vec![SWITCH, WII_U, PC, SWITCH]));
    assert_eq!(info.search_platforms, 1);
}

#[test]
fn search_genres_move_to_front() {
    let options = SearchOptions::new().search_genres(&["Puzzle"], MatchMode::All);
    let mut record = game("Baba Is You").with_genres(&[ADVENTURE, RPG, PUZZLE]);
    classify(&options, &mut record);
    assert_eq!(record.genres, Some(vec![PUZZLE, ADVENTURE, RPG]));
}

#[test]
fn reorder_runs_even_for_rejected_records() {
    let options = SearchOptions::new().search_platforms(&["Wii U"], MatchMode::Any);
    let mut record = game("Expansion Pass")
        .with_category(Category::Dlc)
        .with_platforms(&[SWITCH, WII_U]);
    let (decision, info) = classify(&options, &mut record);
    assert!(!decision.is_accepted());
    assert_eq!(record.platforms, Some(vec![WII_U, SWITCH]));
    assert_eq!(info.search_platforms, 1);
}

#[test]
fn released_requires_release_date() {
    let mut record = game("Silksong");
    record.release_date = None;

    let released = SearchOptions::new().release_status(ReleaseStatus::Released);
    let (decision, _) = classify(&released, &mut record);
    assert_eq!(decision.reasons, vec![RejectReason::NoReleaseDate]);

    let unreleased = SearchOptions::new().release_status(ReleaseStatus::Unreleased);
    assert!(classify(&unreleased, &mut record).0.is_accepted());
}

#[test]
fn retain_keeps_order_and_counts() {
    let options = SearchOptions::new().release_status(ReleaseStatus::Released);
    let mut undated = game("Undated");
    undated.release_date = None;
    let records = vec![
        game("Alpha"),
        game("DLC Pack").with_category(Category::Dlc),
        undated,
        game("duplicate Alpha"),
        game("Beta"),
    ];

    let mut info = Information::default();
    let kept = Classifier::new(&options).retain(records, &mut info);
    let names: Vec<&str> = kept.iter().filter_map(|r| r.name()).collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);
    assert_eq!(info.fetched, 5);
    assert_eq!(info.accepted, 2);
    assert_eq!(info.rejected, 3);
    assert_eq!(info.add_on, 1);
    assert_eq!(info.no_release_date, 1);
    assert_eq!(info.duplicate, 1);
}
