mod app_error;
mod db_error;

pub use app_error::AppError;
pub use db_error::DbError;

use thiserror::Error;

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    #[error("An unknown error occurred: {0}")]
    Unknown(String),
}

impl ApplicationError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ApplicationError::Db(DbError::PlayerNotFound(_))
                | ApplicationError::Db(DbError::PlayerByUsernameNotFound(_))
        )
    }
}
