use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid front matter in {path}: {source}")]
    FrontMatter {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}
