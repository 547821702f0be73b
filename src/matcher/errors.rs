use thiserror::Error;
use crate::matcher::thresholds::Category;

#[derive(Error, Debug)]
#[error("no {category} threshold configured for label \"{label}\"")]
pub struct MatchError {
    pub label: String,
    pub category: Category,
}
