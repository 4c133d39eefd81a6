//! Input assembly and deterministic fallbacks for content generation.
//!
//! The actual text synthesis is delegated to an external capability (see the
//! api crate's generation client). This module owns the two halves that must
//! not depend on that capability: building its prompts from user data, and a
//! fixed set of template-based ideas and outreach messages used when no
//! credential is configured or the provider is down.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// A generated post-topic suggestion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostIdeaDraft {
    pub title: String,
    pub description: String,
    pub reason: String,
}

/// A template outreach message with its register.
#[derive(Debug, Clone, Serialize)]
pub struct ContactMessageDraft {
    pub title: &'static str,
    pub tone: &'static str,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Prompt assembly
// ---------------------------------------------------------------------------

/// Build the prompt for generating a single post.
pub fn build_post_prompt(
    topic: &str,
    description: &str,
    skills: &[String],
    tone: &str,
    max_words: u32,
) -> String {
    format!(
        "Generate a professional LinkedIn post about the following topic:\n\n\
         Topic: {topic}\n\
         Description: {description}\n\
         Author's skills/expertise: {}\n\
         Tone: {tone}\n\
         Maximum words: {max_words}\n\n\
         Requirements:\n\
         - Write in English\n\
         - Be authentic and engaging\n\
         - Include relevant hashtags (3-5)\n\
         - Focus on providing value to the reader\n\
         - Keep it concise and impactful\n\n\
         Return only the post content, ready to be published on LinkedIn.",
        skills.join(", ")
    )
}

/// Build the prompt for generating post-topic ideas as a JSON array.
pub fn build_ideas_prompt(skills: &[String], count: u32) -> String {
    format!(
        "Generate {count} LinkedIn post topic ideas for a professional with \
         the following skills: {}.\n\n\
         Topics should showcase their expertise, support an international job \
         search, and increase visibility with recruiters.\n\n\
         Return ONLY a JSON array of objects with fields \"title\", \
         \"description\" and \"reason\", no additional text.",
        skills.join(", ")
    )
}

/// Extract the first JSON array from a model response that may carry
/// surrounding prose.
pub fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (end > start).then(|| &text[start..=end])
}

// ---------------------------------------------------------------------------
// Recruiter search URLs
// ---------------------------------------------------------------------------

const PEOPLE_SEARCH_BASE: &str = "https://www.linkedin.com/search/results/people/";

/// Criteria for a single people-search URL.
#[derive(Debug, Default, Clone)]
pub struct SearchParams<'a> {
    pub title: Option<&'a str>,
    pub company: Option<&'a str>,
    pub location: Option<&'a str>,
    pub keywords: &'a [&'a str],
}

/// A labelled people-search URL.
#[derive(Debug, Clone, Serialize)]
pub struct SearchUrl {
    pub description: String,
    pub url: String,
}

/// Build a LinkedIn people-search URL from the given criteria.
///
/// The title and keywords collapse into a single `keywords` query parameter;
/// empty criteria are omitted entirely.
pub fn people_search_url(params: &SearchParams<'_>) -> String {
    let mut query_parts: Vec<&str> = Vec::new();
    if let Some(title) = params.title {
        query_parts.push(title);
    }
    query_parts.extend(params.keywords);

    let mut pairs = form_urlencoded::Serializer::new(String::new());
    if !query_parts.is_empty() {
        pairs.append_pair("keywords", &query_parts.join(" "));
    }
    if let Some(location) = params.location {
        pairs.append_pair("geoUrn", location);
    }
    if let Some(company) = params.company {
        pairs.append_pair("company", company);
    }
    pairs.append_pair("origin", "GLOBAL_SEARCH_HEADER");

    format!("{PEOPLE_SEARCH_BASE}?{}", pairs.finish())
}

/// A fixed set of recruiter searches tailored to the user's profile: a few
/// role-focused queries seeded with their top skill and region, plus one
/// search per target company.
pub fn recruiter_search_urls(
    skills: &[String],
    location: Option<&str>,
    target_companies: &[String],
) -> Vec<SearchUrl> {
    let top_skill = skills.first().map(String::as_str).unwrap_or("Software Engineering");

    let mut searches = vec![
        SearchUrl {
            description: "Technical Recruiters - LATAM".into(),
            url: people_search_url(&SearchParams {
                title: Some("Technical Recruiter"),
                keywords: &["LATAM", "Latin America", top_skill],
                location,
                ..Default::default()
            }),
        },
        SearchUrl {
            description: "Global Remote Talent Acquisition".into(),
            url: people_search_url(&SearchParams {
                title: Some("Talent Acquisition"),
                keywords: &["remote", "global", "worldwide", "international"],
                location,
                ..Default::default()
            }),
        },
        SearchUrl {
            description: "Engineering Recruiters - LATAM Focus".into(),
            url: people_search_url(&SearchParams {
                title: Some("Engineering Recruiter"),
                keywords: &["Latin America", "Brazil", "Argentina", "remote"],
                location,
                ..Default::default()
            }),
        },
        SearchUrl {
            description: "Global Hiring - Remote Positions".into(),
            url: people_search_url(&SearchParams {
                title: Some("Recruiter"),
                keywords: &["global hiring", "remote first", "distributed team"],
                location,
                ..Default::default()
            }),
        },
    ];

    for company in target_companies {
        searches.push(SearchUrl {
            description: format!("Recruiters at {company} - Global Roles"),
            url: people_search_url(&SearchParams {
                title: Some("Recruiter"),
                company: Some(company),
                keywords: &["global", "remote"],
                location,
                ..Default::default()
            }),
        });
    }

    searches
}

// ---------------------------------------------------------------------------
// Fallback templates
// ---------------------------------------------------------------------------

/// Skills rendered for a template, with a generic stand-in when empty.
fn skills_text(skills: &[String]) -> String {
    if skills.is_empty() {
        "software development".to_string()
    } else {
        skills
            .iter()
            .take(3)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Deterministic post ideas used when the external capability is unavailable.
pub fn fallback_post_ideas(skills: &[String]) -> Vec<PostIdeaDraft> {
    let skills = skills_text(skills);
    vec![
        PostIdeaDraft {
            title: "A lesson learned the hard way".into(),
            description: format!(
                "Describe a production incident or project setback involving {skills} \
                 and the concrete practice you adopted afterwards."
            ),
            reason: "Failure stories are the most shared posts and show seniority".into(),
        },
        PostIdeaDraft {
            title: "How I would learn my stack from scratch today".into(),
            description: format!(
                "A compact learning roadmap for {skills}, with the resources you \
                 would keep and the ones you would skip."
            ),
            reason: "Roadmaps attract early-career followers and recruiter attention".into(),
        },
        PostIdeaDraft {
            title: "One tool that changed how I work".into(),
            description: "Pick one tool from your daily workflow and show a before/after \
                          of a real task."
                .into(),
            reason: "Concrete tooling posts perform well with hiring engineers".into(),
        },
        PostIdeaDraft {
            title: "What code review taught me about communication".into(),
            description: "Three review comments you received or wrote that changed your \
                          approach, and why."
                .into(),
            reason: "Signals collaboration skills, which interviews probe heavily".into(),
        },
        PostIdeaDraft {
            title: "Trade-offs I got wrong".into(),
            description: format!(
                "An architecture or design decision involving {skills} you would make \
                 differently now, with the reasoning on both sides."
            ),
            reason: "Demonstrates judgment rather than just knowledge".into(),
        },
    ]
}

/// Deterministic post body used when the external capability is unavailable.
pub fn fallback_post_content(topic: &str, skills: &[String]) -> String {
    let skills = skills_text(skills);
    format!(
        "Let's talk about {topic}.\n\n\
         Working with {skills}, I keep coming back to the same lesson: the \
         fundamentals outlast the tools.\n\n\
         Three things that held up over time:\n\n\
         1. Understand the problem before reaching for a solution.\n\
         2. Make the change easy, then make the easy change.\n\
         3. Leave the code better than you found it.\n\n\
         What has {topic} taught you?\n\n\
         #SoftwareEngineering #CareerGrowth #Engineering"
    )
}

/// Three template outreach messages for a recruiter, in distinct registers.
pub fn fallback_contact_messages(
    recruiter_name: &str,
    company: &str,
    skills: &[String],
    experience: &str,
) -> Vec<ContactMessageDraft> {
    let first_name = recruiter_name
        .split_whitespace()
        .next()
        .unwrap_or(recruiter_name);
    let skills = skills_text(skills);
    let experience_lead = if experience.is_empty() {
        "I have".to_string()
    } else {
        format!("With experience in {experience}, I have")
    };

    vec![
        ContactMessageDraft {
            title: "Professional and direct",
            tone: "professional",
            message: format!(
                "Hi {first_name},\n\n\
                 I came across your profile and saw that you recruit for {company}. \
                 I'm a software engineer with experience in {skills}, currently \
                 exploring new opportunities.\n\n\
                 I'd love to connect and hear about roles that might fit my \
                 background.\n\n\
                 Thank you for your time!"
            ),
        },
        ContactMessageDraft {
            title: "Friendly and conversational",
            tone: "friendly",
            message: format!(
                "Hi {first_name}!\n\n\
                 I noticed you work in recruitment at {company} and wanted to reach \
                 out. I'm a software engineer specializing in {skills}, and I've \
                 been following {company} for a while.\n\n\
                 Would you be open to a quick chat about how I could contribute to \
                 the team?"
            ),
        },
        ContactMessageDraft {
            title: "Value focused",
            tone: "direct",
            message: format!(
                "Hi {first_name},\n\n\
                 I'm reaching out because I believe my skills in {skills} could be a \
                 strong match for {company}. {experience_lead} a track record of \
                 delivering high-quality solutions and collaborating across teams.\n\n\
                 I'd welcome the chance to discuss open opportunities at {company}."
            ),
        },
    ]
}
