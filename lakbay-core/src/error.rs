use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Failed to parse route definitions in {path}: {source}")]
    DefinitionParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unknown route: {0}")]
    UnknownRoute(String),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
