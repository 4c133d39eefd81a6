//! Text-generation capability behind a trait, plus the Anthropic-backed
//! implementation.
//!
//! Handlers depend on [`TextGenerator`] only; when no provider is configured
//! (or the provider fails on the ideas path) they fall back to the
//! deterministic templates in `jobtrail_core::generation`.

pub mod anthropic;

use async_trait::async_trait;
use jobtrail_core::error::CoreError;
use jobtrail_core::generation::PostIdeaDraft;

pub use anthropic::AnthropicGenerator;

/// Inputs for generating a single post body.
#[derive(Debug, Clone)]
pub struct PostRequest<'a> {
    pub topic: &'a str,
    pub description: &'a str,
    pub skills: &'a [String],
    pub tone: &'a str,
    pub max_words: u32,
}

/// An external text-synthesis capability.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a post body for the given topic and author profile.
    async fn generate_post(&self, request: &PostRequest<'_>) -> Result<String, CoreError>;

    /// Generate `count` post-topic ideas tailored to the author's skills.
    async fn generate_ideas(
        &self,
        skills: &[String],
        count: u32,
    ) -> Result<Vec<PostIdeaDraft>, CoreError>;
}
