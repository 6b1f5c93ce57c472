//! Sequential orchestration of the three relay steps.
//!
//! acquire, then infer, then submit. Any error stops the run; the stage it
//! occurred in is attached so the caller can report which step failed.

use std::fmt;

use crate::acquire;
use crate::config::PipelineConfig;
use crate::error::RelayError;
use crate::http::RelayClient;
use crate::inference;
use crate::submit;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Acquire,
    Infer,
    Submit,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Acquire => write!(f, "image acquisition"),
            Stage::Infer => write!(f, "inference"),
            Stage::Submit => write!(f, "submission"),
        }
    }
}

/// A relay error annotated with the stage it occurred in.
#[derive(thiserror::Error, Debug)]
#[error("{stage} failed: {source}")]
pub struct StageError {
    pub stage: Stage,
    #[source]
    pub source: RelayError,
}

fn at(stage: Stage) -> impl FnOnce(RelayError) -> StageError {
    move |source| StageError { stage, source }
}

/// Run the full pipeline once.
pub async fn run(client: &RelayClient, cfg: &PipelineConfig) -> Result<(), StageError> {
    let asset = acquire::acquire_image(client, cfg)
        .await
        .map_err(at(Stage::Acquire))?;

    let response = inference::infer(client, cfg, &asset)
        .await
        .map_err(at(Stage::Infer))?;

    submit::submit(client, cfg, &response)
        .await
        .map_err(at(Stage::Submit))?;

    tracing::info!("pipeline complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_names_are_readable() {
        assert_eq!(Stage::Acquire.to_string(), "image acquisition");
        assert_eq!(Stage::Infer.to_string(), "inference");
        assert_eq!(Stage::Submit.to_string(), "submission");
    }

    #[test]
    fn stage_error_mentions_stage_and_cause() {
        let err = StageError {
            stage: Stage::Acquire,
            source: RelayError::NoImage,
        };
        let msg = err.to_string();
        assert!(msg.contains("image acquisition"));
        assert!(msg.contains("no image element"));
    }
}
