//! Tests for the SQLite loss repository.

use diesel::{Connection, RunQueryDsl, SqliteConnection};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tempfile::NamedTempFile;

use wary_store::SqliteLossRepository;
use wary_tictactoe::{Board, KEY_FORMAT_VERSION, LossRepository, MoveChoice, MoveSelector, Token};

/// Creates a temporary database file and opens a repository on it. The file
/// handle must stay in scope to keep the file alive.
fn setup_test_db() -> (NamedTempFile, SqliteLossRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let repo = SqliteLossRepository::open(db_path).expect("Failed to open repository");
    (db_file, repo)
}

#[test]
fn test_record_then_contains() {
    let (_db, mut repo) = setup_test_db();
    assert!(!repo.contains("1,0,0,0").expect("Lookup failed"));

    repo.record("1,0,0,0").expect("Record failed");
    assert!(repo.contains("1,0,0,0").expect("Lookup failed"));
    assert!(!repo.contains("0,1,0,0").expect("Lookup failed"));
}

#[test]
fn test_record_is_idempotent() {
    let (_db, mut repo) = setup_test_db();
    assert!(repo.insert_position("1,-1,0,0").expect("Insert failed"));
    assert!(!repo.insert_position("1,-1,0,0").expect("Insert failed"));

    repo.record("1,-1,0,0").expect("Record of duplicate failed");
    assert_eq!(repo.keys().expect("Keys failed"), vec!["1,-1,0,0".to_string()]);
}

#[test]
fn test_record_retags_row_from_older_key_format() {
    let (db, mut repo) = setup_test_db();
    let db_path = db.path().to_str().expect("Invalid path");

    let mut conn = SqliteConnection::establish(db_path).expect("Failed to connect");
    diesel::sql_query(
        "INSERT INTO losing_positions (board_key, key_format) VALUES ('1,0,0,0', 0)",
    )
    .execute(&mut conn)
    .expect("Seeding stale row failed");

    assert!(!repo.contains("1,0,0,0").expect("Lookup failed"));

    repo.record("1,0,0,0").expect("Record failed");
    assert!(repo.contains("1,0,0,0").expect("Lookup failed"));

    let positions = repo.positions().expect("Dump failed");
    assert_eq!(positions.len(), 1);
    assert_eq!(*positions[0].key_format(), KEY_FORMAT_VERSION);
    assert!(!repo.insert_position("1,0,0,0").expect("Insert failed"));
}

#[test]
fn test_contains_any() {
    let (_db, mut repo) = setup_test_db();
    repo.record("b").expect("Record failed");

    let keys = vec!["a".to_string(), "b".to_string()];
    assert!(repo.contains_any(&keys).expect("Lookup failed"));
    assert!(!repo.contains_any(&keys[..1]).expect("Lookup failed"));
    assert!(!repo.contains_any(&[]).expect("Lookup failed"));
}

#[test]
fn test_positions_survive_reopen() {
    let (db, mut repo) = setup_test_db();
    repo.record("0,0,0,1").expect("Record failed");
    drop(repo);

    let db_path = db.path().to_str().expect("Invalid path").to_string();
    let reopened = SqliteLossRepository::open(db_path).expect("Reopen failed");
    assert!(reopened.contains("0,0,0,1").expect("Lookup failed"));
}

#[test]
fn test_positions_dump() {
    let (_db, mut repo) = setup_test_db();
    repo.record("z").expect("Record failed");
    repo.record("a").expect("Record failed");

    let positions = repo.positions().expect("Dump failed");
    assert_eq!(positions.len(), 2);
    assert!(positions.iter().all(|p| *p.key_format() == KEY_FORMAT_VERSION));

    let mut keys: Vec<&str> = positions.iter().map(|p| p.board_key().as_str()).collect();
    keys.sort();
    assert_eq!(keys, vec!["a", "z"]);
    assert_eq!(repo.keys().expect("Keys failed"), vec!["a".to_string(), "z".to_string()]);
}

#[test]
fn test_clear() {
    let (_db, mut repo) = setup_test_db();
    repo.record("a").expect("Record failed");
    repo.record("b").expect("Record failed");

    assert_eq!(repo.clear().expect("Clear failed"), 2);
    assert!(!repo.contains("a").expect("Lookup failed"));
    assert!(repo.keys().expect("Keys failed").is_empty());
}

#[test]
fn test_unreachable_path_fails_to_open() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let missing = dir.path().join("no_such_dir").join("losses.db");
    let result = SqliteLossRepository::open(missing.to_string_lossy().into_owned());
    assert!(result.is_err());
}

#[test]
fn test_selector_avoids_stored_loss() {
    let (_db, mut repo) = setup_test_db();

    // On a 2×2 board every first move is an equivalent corner.
    let mut losing = Board::new(2).expect("Board failed");
    losing.place_token(Token::O, 1, 2).expect("Place failed");
    repo.record(&losing.serialize()).expect("Record failed");

    let board = Board::new(2).expect("Board failed");
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let selection = MoveSelector::new(1).select(&board, Token::X, &repo, &mut rng);
    assert_eq!(*selection.choice(), MoveChoice::Concede);
    assert_eq!(*selection.rejected(), 4);
}
