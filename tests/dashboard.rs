use std::fs;
use std::path::Path;

use adshark_bets::access::{AccessDecision, AccessGate};
use adshark_bets::config::Config;
use adshark_bets::data::export::write_csv;
use adshark_bets::data::filter::ColumnPolicy;
use adshark_bets::data::loader::{load_file, TableSource};
use adshark_bets::data::model::{CellValue, DatasetKind};
use adshark_bets::state::AppState;
use adshark_bets::view::{render, Notice};

const FUTURE_CSV: &str = "\
season,week,away_team,home_team,spread_line,total_line,model_pick
2025,1,DAL,PHI,-7.5,47.5,DAL
2025,1,KC,LAC,3.0,45.0,KC
";

fn write(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).expect("fixture should be writable");
}

fn state(dir: &Path, password: Option<&str>) -> AppState {
    AppState::new(Config {
        data_dir: dir.to_path_buf(),
        password: password.map(str::to_string),
        ..Config::default()
    })
}

#[test]
fn wrong_password_shows_public_columns_only() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "future.csv", FUTURE_CSV);
    let mut state = state(dir.path(), Some("Sharp$2025"));

    state.password_input = "sharp$2025".into();
    let view = state.render_tab(DatasetKind::Future).unwrap();
    assert_eq!(
        view.displayed_columns(),
        ["season", "week", "away_team", "home_team", "spread_line", "total_line"]
    );
    assert_eq!(view.notice, Some(Notice::PublicOnly));
    assert_eq!(view.hidden_columns, vec!["model_pick"]);

    state.password_input = "Sharp$2025".into();
    let view = state.render_tab(DatasetKind::Future).unwrap();
    assert_eq!(view.displayed_columns().len(), 7);
    assert_eq!(view.notice, Some(Notice::Unlocked));
}

#[test]
fn past_table_is_displayed_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "past.csv",
        "season,week,home_team,result,units\n\
         2024,1,KC,win,0.91\n\
         2024,2,KC,loss,-1.0\n\
         2024,3,DET,push,0.0\n",
    );
    let mut state = state(dir.path(), None);

    let view = state.render_tab(DatasetKind::Past).unwrap();
    assert_eq!(view.table.len(), 3);
    assert_eq!(view.table.column_count(), 5);
    assert!(view.notice.is_none());
    assert_eq!(
        view.table.rows[1],
        vec![
            CellValue::Integer(2024),
            CellValue::Integer(2),
            CellValue::String("KC".into()),
            CellValue::String("loss".into()),
            CellValue::Float(-1.0),
        ]
    );
    assert_eq!(view.table, load_file(&dir.path().join("past.csv")).unwrap());
}

#[test]
fn uploaded_future_without_total_line_still_renders() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "future.csv", FUTURE_CSV);
    write(
        dir.path(),
        "upload.csv",
        "season,week,away_team,home_team,spread_line,model_pick,edge\n2025,2,NYJ,NE,-2.5,NE,1.4\n",
    );
    let mut state = state(dir.path(), Some("pw"));
    state.set_upload(DatasetKind::Future, &dir.path().join("upload.csv")).unwrap();

    let view = state.render_tab(DatasetKind::Future).unwrap();
    assert_eq!(
        view.displayed_columns(),
        ["season", "week", "away_team", "home_team", "spread_line"]
    );
    assert_eq!(view.missing_public_columns, vec!["total_line"]);
    assert_eq!(view.hidden_columns, vec!["model_pick", "edge"]);
}

#[test]
fn empty_secret_unlocks_with_empty_input() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "future.csv", FUTURE_CSV);
    let mut state = state(dir.path(), Some(""));

    let view = state.render_tab(DatasetKind::Future).unwrap();
    assert_eq!(view.displayed_columns().len(), 7);

    state.password_input = "anything".into();
    let view = state.render_tab(DatasetKind::Future).unwrap();
    assert_eq!(view.displayed_columns().len(), 6);
}

#[test]
fn missing_default_file_fails_only_that_tab() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "future.csv", FUTURE_CSV);
    let mut state = state(dir.path(), None);

    let err = state.render_tab(DatasetKind::Yearly).unwrap_err();
    assert!(err.to_string().contains("final_model_performance_summary.csv"), "{err}");
    assert!(state.render_tab(DatasetKind::Future).is_ok());
}

#[test]
fn malformed_upload_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "bad.csv", "a,b\n1,2,3,4\n");
    let mut state = state(dir.path(), None);
    state.set_upload(DatasetKind::Weekly, &dir.path().join("bad.csv")).unwrap();
    assert!(state.render_tab(DatasetKind::Weekly).is_err());
}

#[test]
fn export_then_load_preserves_table() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "future.csv", FUTURE_CSV);
    let original = load_file(&dir.path().join("future.csv")).unwrap();

    let mut buf = Vec::new();
    write_csv(&original, &mut buf).unwrap();
    let source = TableSource::Upload {
        file_name: "roundtrip.csv",
        bytes: &buf,
    };
    let view = render(
        DatasetKind::Past,
        &source,
        &ColumnPolicy::default(),
        AccessDecision::Denied,
    )
    .unwrap();
    assert_eq!(view.table, original);
}

#[test]
fn gate_decisions_are_exact() {
    let gate = AccessGate::new(Some("Picks".into()));
    for (input, granted) in [("Picks", true), ("picks", false), ("Picks ", false), ("", false)] {
        assert_eq!(gate.decide(input).is_granted(), granted, "input {input:?}");
    }
}
