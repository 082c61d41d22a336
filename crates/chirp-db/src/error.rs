use rusqlite::ffi;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("unique constraint violated")]
    UniqueViolation,

    #[error("foreign key constraint violated")]
    ForeignKeyViolation,

    #[error("DB lock poisoned: {0}")]
    LockPoisoned(String),

    #[error(transparent)]
    Sqlite(rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, DbError>;

impl From<rusqlite::Error> for DbError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(e, _) = &err {
            match e.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE => return Self::UniqueViolation,
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => return Self::ForeignKeyViolation,
                _ => {}
            }
        }
        Self::Sqlite(err)
    }
}
