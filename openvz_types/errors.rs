use thiserror::Error;

pub mod app_error;
pub mod command_error;
pub mod db_error;

pub use app_error::AppError;
pub use command_error::CommandError;
pub use db_error::DbError;

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    #[error("An unknown error occurred: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for ApplicationError {
    fn from(err: anyhow::Error) -> Self {
        ApplicationError::Unknown(err.to_string())
    }
}

impl ApplicationError {
    /// True for errors that mean "the requested job or container does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ApplicationError::Db(DbError::JobNotFound(_) | DbError::ContainerNotFound(_))
        )
    }
}
