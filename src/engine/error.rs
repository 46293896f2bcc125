use std::time::Duration;
use thiserror::Error;

/// Why a single asset could not be loaded.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("not found")]
    NotFound,
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("malformed bytes: {0}")]
    Malformed(String),
    #[error("load timed out after {0:?}")]
    TimedOut(Duration),
}

/// Errors surfaced by [`Engine::render`](crate::engine::Engine::render).
///
/// The engine never partially renders and never substitutes fallbacks; any
/// failure aborts the whole render. Translation to user-facing responses
/// (HTTP statuses, page text) is the caller's job, so the failing asset or
/// stage stays inspectable here.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("record is not a verified roster entry")]
    VerificationRequired,
    #[error("asset {asset:?} unavailable: {cause}")]
    AssetUnavailable {
        asset: String,
        #[source]
        cause: AssetError,
    },
    #[error("composition failed during {stage}: {cause}")]
    CompositionFailed { stage: &'static str, cause: String },
}

impl RenderError {
    pub(crate) fn unavailable(asset: &str, cause: AssetError) -> Self {
        Self::AssetUnavailable {
            asset: asset.to_string(),
            cause,
        }
    }

    pub(crate) fn composition(stage: &'static str, cause: impl ToString) -> Self {
        Self::CompositionFailed {
            stage,
            cause: cause.to_string(),
        }
    }
}
