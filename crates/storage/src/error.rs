use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }
}

/// Errors raised by the ranking, movement and playoff services.
///
/// Store failures keep their original cause; the remaining variants are
/// domain preconditions that the caller can act on.
#[derive(Debug, Error)]
pub enum LeagueError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Playoff band needs at least {required} players, found {found}")]
    NotEnoughPlayoffPlayers { found: usize, required: usize },

    #[error("Playoff {0} has no recorded result")]
    PlayoffNotPlayed(Uuid),

    #[error("Movements for playoff {0} were already applied")]
    PlayoffAlreadyApplied(Uuid),

    #[error("Stage {0} is already being processed")]
    StageBusy(Uuid),

    #[error("Invalid result: {0}")]
    InvalidResult(String),
}

pub type LeagueResult<T> = std::result::Result<T, LeagueError>;

impl LeagueError {
    /// True for failures that come from a caller-side precondition rather
    /// than from the data store.
    pub fn is_domain(&self) -> bool {
        !matches!(self, LeagueError::Storage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_errors_are_not_domain_errors() {
        let error = LeagueError::from(StorageError::NotFound);
        assert!(!error.is_domain());
        assert_eq!(error.to_string(), "Not found");
    }

    #[test]
    fn test_playoff_precondition_message() {
        let error = LeagueError::NotEnoughPlayoffPlayers {
            found: 3,
            required: 4,
        };
        assert!(error.is_domain());
        assert_eq!(
            error.to_string(),
            "Playoff band needs at least 4 players, found 3"
        );
    }
}
