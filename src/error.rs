use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    /// Both legs of a metric carry the same label.
    #[error("Ill-formed indices {0} and {0}")]
    IllFormedIndex(String),
    /// A product does not carry the contracted pair exactly once.
    #[error("Contraction indices ({left}, {right}) not found in {product}: {found} residual slots instead of 2")]
    ContractionIndexNotFound {
        left: String,
        right: String,
        product: String,
        found: usize,
    },
}
