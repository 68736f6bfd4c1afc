use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("search query must not be empty")]
    EmptyQuery,
}
