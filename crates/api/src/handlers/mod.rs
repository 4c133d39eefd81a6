//! HTTP request handlers, grouped by resource.

pub mod appointments;
pub mod auth;
pub mod job_opportunities;
pub mod linkedin;
pub mod post_ideas;
pub mod posts;
pub mod recruiters;
