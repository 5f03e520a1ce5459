use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ImageModuleError {
    #[error("Failed to read image file `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid filter pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to determine the working directory for filter patterns: {0}")]
    WorkingDirectory(#[source] std::io::Error),

    #[error("Invalid plugin options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}
