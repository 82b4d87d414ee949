use std::path::PathBuf;

use scrollthumb::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not read props from {}: {source}", path.display())]
    Props {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not start logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
