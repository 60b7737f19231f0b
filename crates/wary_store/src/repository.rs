//! SQLite loss repository.

use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};
use wary_tictactoe::{KEY_FORMAT_VERSION, LossRepository, RepositoryError};

use crate::schema::losing_positions;
use crate::{DbError, LosingPosition, NewLosingPosition};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Loss repository persisted in a SQLite database file.
///
/// Each operation opens its own connection, so the repository itself holds
/// nothing but the path.
#[derive(Debug, Clone)]
pub struct SqliteLossRepository {
    db_path: String,
}

impl SqliteLossRepository {
    /// Opens the database at `db_path`, creating the file and applying any
    /// pending migrations.
    ///
    /// Use `":memory:"` only for throwaway checks: every connection to an
    /// in-memory database starts empty.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, DbError> {
        info!(path = %db_path, "Opening loss repository");

        let repo = Self { db_path };
        let mut conn = repo.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::migration(e))?;
        debug!(count = applied.len(), "Migrations applied");

        Ok(repo)
    }

    /// Returns the database path.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Stores `key` under the current key format. Returns whether a row was
    /// written, either a new one or an existing row tagged with an older key
    /// format.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn insert_position(&self, key: &str) -> Result<bool, DbError> {
        let mut conn = self.connection()?;
        let row = NewLosingPosition::new(key.to_string(), KEY_FORMAT_VERSION);

        let (inserted, retagged) = conn.transaction::<_, DbError, _>(|conn| {
            let inserted = diesel::insert_or_ignore_into(losing_positions::table)
                .values(&row)
                .execute(conn)?;
            let retagged = diesel::update(
                losing_positions::table
                    .filter(losing_positions::board_key.eq(key))
                    .filter(losing_positions::key_format.ne(KEY_FORMAT_VERSION)),
            )
            .set(losing_positions::key_format.eq(KEY_FORMAT_VERSION))
            .execute(conn)?;
            Ok((inserted, retagged))
        })?;

        if inserted > 0 {
            info!(%key, "Losing position stored");
        } else if retagged > 0 {
            info!(%key, "Losing position moved to current key format");
        } else {
            debug!(%key, "Losing position already stored");
        }
        Ok(inserted + retagged > 0)
    }

    /// Checks whether any of `keys` is stored under the current key format.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, keys), fields(count = keys.len()))]
    pub fn has_any_position(&self, keys: &[String]) -> Result<bool, DbError> {
        if keys.is_empty() {
            return Ok(false);
        }
        let mut conn = self.connection()?;

        let found = diesel::select(exists(
            losing_positions::table
                .filter(losing_positions::board_key.eq_any(keys))
                .filter(losing_positions::key_format.eq(KEY_FORMAT_VERSION)),
        ))
        .get_result::<bool>(&mut conn)?;

        debug!(found, "Position lookup");
        Ok(found)
    }

    /// Lists every stored position, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn positions(&self) -> Result<Vec<LosingPosition>, DbError> {
        let mut conn = self.connection()?;

        let rows = losing_positions::table
            .order((losing_positions::recorded_at.asc(), losing_positions::board_key.asc()))
            .select(LosingPosition::as_select())
            .load(&mut conn)?;

        debug!(count = rows.len(), "Loaded losing positions");
        Ok(rows)
    }

    /// Deletes every stored position. Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn clear(&self) -> Result<usize, DbError> {
        let mut conn = self.connection()?;
        let removed = diesel::delete(losing_positions::table).execute(&mut conn)?;
        info!(removed, "Cleared losing positions");
        Ok(removed)
    }
}

impl LossRepository for SqliteLossRepository {
    fn record(&mut self, key: &str) -> Result<(), RepositoryError> {
        self.insert_position(key)?;
        Ok(())
    }

    fn contains(&self, key: &str) -> Result<bool, RepositoryError> {
        Ok(self.has_any_position(&[key.to_string()])?)
    }

    fn contains_any(&self, keys: &[String]) -> Result<bool, RepositoryError> {
        Ok(self.has_any_position(keys)?)
    }

    fn keys(&self) -> Result<Vec<String>, RepositoryError> {
        let mut keys: Vec<String> = self
            .positions()?
            .into_iter()
            .filter(|p| *p.key_format() == KEY_FORMAT_VERSION)
            .map(|p| p.board_key().clone())
            .collect();
        keys.sort();
        Ok(keys)
    }
}
