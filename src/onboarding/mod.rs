//! Onboarding submission: turns a completed wizard into a registered,
//! onboarded user with an initial roadmap.

pub mod pipeline;

pub use pipeline::{
    FAILURE_TOAST, PipelineStep, SUCCESS_STATUS, SUCCESS_TOAST, SubmissionPipeline,
};
