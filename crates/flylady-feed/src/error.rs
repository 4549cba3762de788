use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed unavailable: unexpected HTTP status {status} from {url}")]
    Unavailable { status: u16, url: String },

    #[error("malformed feed XML: {0}")]
    Xml(#[from] quick_xml::Error),
}
