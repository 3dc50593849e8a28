use std::path::PathBuf;

use battle_ranking::config::ScoringSettings;
use battle_ranking::domain::Match;
use battle_ranking::errors::SeasonError;
use battle_ranking::parsing::{read_match_rows, MatchAssembler, MatchRow};
use battle_ranking::ranking::{rank_season, SeasonResult};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn fixture_season() -> SeasonResult {
    let rows = read_match_rows(fixture_path("season.csv")).unwrap();
    let matches = MatchAssembler::new().unwrap().assemble(&rows).unwrap();
    rank_season(&matches, &ScoringSettings::default()).unwrap()
}

/// Rounds as (date, stage, battle) rows played at the same host
fn battles(rows: &[(&str, &str, &str)]) -> Vec<Match> {
    let rows: Vec<MatchRow> = rows
        .iter()
        .map(|(date, stage, battle)| MatchRow {
            date: date.to_string(),
            host: "Praça".to_string(),
            stage: stage.to_string(),
            battle: battle.to_string(),
            ..Default::default()
        })
        .collect();
    MatchAssembler::new().unwrap().assemble(&rows).unwrap()
}

fn final_table(season: &SeasonResult) -> Vec<(String, u32, i32)> {
    season
        .final_leaderboard()
        .iter()
        .map(|row| (row.nickname.clone(), row.position, row.score))
        .collect()
}

#[test]
fn fixture_season_final_leaderboard() {
    let season = fixture_season();
    assert_eq!(season.snapshots.len(), 3);

    let expected = [
        ("RK", 1, 4),
        ("Eva", 2, 2),
        ("Isa", 2, 2),
        ("Barb", 4, 1),
        ("Giza", 4, 1),
        ("Kant", 6, 1),
        ("Jhony", 7, 1),
        ("Onec", 8, 0),
        ("Big Xang", 9, 0),
        ("Mont", 10, -1),
    ];
    let expected: Vec<(String, u32, i32)> = expected
        .iter()
        .map(|(n, p, s)| (n.to_string(), *p, *s))
        .collect();
    assert_eq!(final_table(&season), expected);
}

#[test]
fn round_scores_sum_to_total_after_every_round() {
    let season = fixture_season();
    for player in season.standings.players() {
        assert_eq!(player.tournament_score_sum(), player.score, "{}", player.nickname);
    }
    for snapshot in &season.snapshots {
        assert!(!snapshot.rows.is_empty());
    }
}

#[test]
fn absent_top_four_lose_a_point_each_round() {
    let season = fixture_season();
    let rk = season.standings.get("RK").unwrap();
    assert_eq!(rk.score_by_tournament.values().copied().collect::<Vec<_>>(), vec![6, -1, -1]);
    assert_eq!(rk.participation, 1);

    // eighth after round two, so no penalty for skipping round three
    let jhony = season.standings.get("jhony").unwrap();
    assert_eq!(jhony.score_by_tournament.values().copied().collect::<Vec<_>>(), vec![0, -1, 2]);
}

#[test]
fn walkover_final_is_a_title_without_upset() {
    let season = fixture_season();
    let barb = season.standings.get("Barb").unwrap();
    assert_eq!(barb.titles, 1);
    assert_eq!(barb.score, 1);
    assert_eq!(barb.underdog_victory, 0);
    assert_eq!(season.final_leaderboard()[3].titles, "🏆");
}

#[test]
fn upsets_in_one_round_use_round_start_scores() {
    let matches = battles(&[
        ("2024-01-06", "Oitavas de final", "Y 2 x 0 A"),
        ("2024-01-06", "Final", "Y 2 x 0 B"),
        ("2024-01-13", "Oitavas de final", "X 2 x 1 Y"),
        ("2024-01-13", "Quartas de final", "X 2 x 1 Y"),
    ]);
    let season = rank_season(&matches, &ScoringSettings::default()).unwrap();

    let x = season.standings.get("X").unwrap();
    let y = season.standings.get("Y").unwrap();
    // 1 + 1 then 2 + 1: mid-round X already had 2 and Y 4
    assert_eq!(x.score, 5);
    assert_eq!(x.underdog_victory, 2);
    assert_eq!(y.score, 3);
    assert_eq!(y.topdog_defeat, 2);
    assert!(season.clarifications[2].text.contains("Vitória do desfavorecido: X rouba 1 ponto de Y"));
}

#[test]
fn tied_players_share_a_position() {
    let matches = battles(&[
        ("2024-01-06", "Oitavas de final", "A 2 x 1 B"),
        ("2024-01-06", "Oitavas de final", "C 2 x 1 D"),
        ("2024-01-06", "Oitavas de final", "E 2 x 1 F"),
    ]);
    let season = rank_season(&matches, &ScoringSettings::default()).unwrap();
    let positions: Vec<u32> = season.final_leaderboard().iter().map(|r| r.position).collect();
    assert_eq!(positions, vec![1, 1, 1, 4, 4, 4]);
}

#[test]
fn duo_points_round_up() {
    let matches = battles(&[("2024-01-06", "Semifinal", "A e B 2 x 0 C e D")]);
    let season = rank_season(&matches, &ScoringSettings::default()).unwrap();
    assert_eq!(season.standings.score_of("A"), 2);
    assert_eq!(season.standings.score_of("B"), 2);
    assert_eq!(season.standings.score_of("C"), 0);
}

#[test]
fn duo_split_can_be_turned_off() {
    let matches = battles(&[("2024-01-06", "Semifinal", "A e B 2 x 0 C e D")]);
    let settings = ScoringSettings {
        split_duo_points: false,
        ..ScoringSettings::default()
    };
    let season = rank_season(&matches, &settings).unwrap();
    assert_eq!(season.standings.score_of("A"), 3);
}

#[test]
fn unknown_stage_aborts_scoring() {
    let matches = battles(&[
        ("2024-01-06", "Oitavas de final", "A 2 x 1 B"),
        ("2024-01-06", "Repescagem", "B 2 x 1 C"),
    ]);
    let err = rank_season(&matches, &ScoringSettings::default()).unwrap_err();
    assert!(matches!(err, SeasonError::UnknownStage { ref label, .. } if label == "Repescagem"));
}
