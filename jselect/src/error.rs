//! Error types for dropdown construction and reload.

use formdom::{DomError, NodeId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, JselectError>;

#[derive(Debug, Error)]
pub enum JselectError {
    #[error("no locale registered for '{0}'")]
    UnknownLocale(String),
    #[error("invalid locale table: {0}")]
    LocaleParse(#[from] serde_json::Error),
    #[error("node {node} is a <{tag}>, expected <select>")]
    NotASelect { node: NodeId, tag: String },
    #[error("no dropdown named '{0}'")]
    UnknownInstance(String),
    #[error(transparent)]
    Dom(#[from] DomError),
}
