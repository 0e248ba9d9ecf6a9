use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] ids_config::ConfigError),

    #[error("Database error: {0}")]
    Db(#[from] ids_db::DbError),

    #[error("Provider client error: {0}")]
    Provider(#[from] ids_provider::ProviderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logger error: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
