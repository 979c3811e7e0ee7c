//! Submission intake and the admin review workflow.
//!
//! New entries enter as `pending` through [`submit`]; only [`review`] changes
//! their status afterwards.

pub mod review;
mod submission;

pub use submission::submit;
