//! Trip plan generation
//!
//! Renders one prompt per artifact kind and asks the LLM for each in turn.

mod artifact;
mod generator;

pub use artifact::{Artifact, ArtifactKind};
pub use generator::{ContentGenerator, GenerationError, PlanOutcome};
