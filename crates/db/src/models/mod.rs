pub mod appointment;
pub mod job_opportunity;
pub mod oauth_state;
pub mod post;
pub mod post_idea;
pub mod recruiter;
pub mod user;
