pub mod appointment_repo;
pub mod job_opportunity_repo;
pub mod oauth_state_repo;
pub mod post_idea_repo;
pub mod post_repo;
pub mod recruiter_repo;
pub mod user_repo;

pub use appointment_repo::AppointmentRepo;
pub use job_opportunity_repo::JobOpportunityRepo;
pub use oauth_state_repo::OauthStateRepo;
pub use post_idea_repo::PostIdeaRepo;
pub use post_repo::PostRepo;
pub use recruiter_repo::RecruiterRepo;
pub use user_repo::UserRepo;
