//! Domain logic for the jobtrail backend.
//!
//! This crate has no internal dependencies and no database access: it holds
//! the error taxonomy, entity status/stage state machines, time-window math
//! for weekly quotas, the credential-store cipher, validation helpers, and
//! the template fallback for content generation. The `db` and `api` crates
//! build on top of it.

pub mod crypto;
pub mod error;
pub mod generation;
pub mod idea_status;
pub mod job_stage;
pub mod post_lifecycle;
pub mod recruiter_status;
pub mod time_window;
pub mod types;
pub mod validation;
