#[derive(Debug)]
pub enum StoreError {
    Database(sqlx::Error),
    Password(argon2::password_hash::Error),
    /// A post time that is not `DD.MM.YYYY HH:MM`.
    InvalidPostTime(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Database(e) => write!(f, "database error: {e}"),
            StoreError::Password(e) => write!(f, "password hash error: {e}"),
            StoreError::InvalidPostTime(raw) => write!(f, "invalid post time: {raw}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(e)
    }
}

impl From<argon2::password_hash::Error> for StoreError {
    fn from(e: argon2::password_hash::Error) -> Self {
        StoreError::Password(e)
    }
}
