//! Error type for scenario loading and scene-graph invariants.

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum ScenarioError {
    #[error("cannot read scenario file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed scenario document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown preset scenario '{0}'")]
    UnknownPreset(String),

    #[error("orbit chain of '{0}' is cyclic")]
    CyclicOrbit(String),

    #[error("invalid orbital elements for '{body}': {reason}")]
    InvalidElements { body: String, reason: String },

    #[error("invalid graphic color '{color}' for '{body}'")]
    InvalidGraphic { body: String, color: String },

    #[error("invalid config value '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("point of view '{0}' does not name a body")]
    UnknownPov(String),

    #[error("no body with key '{0}'")]
    UnknownBody(String),
}

pub type Result<T> = std::result::Result<T, ScenarioError>;
