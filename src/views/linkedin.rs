//! LinkedIn suggestions and generated posts.

use serde::Serialize;

use crate::api::{LinkedInPost, LinkedInProfile};

pub const NO_SUGGESTIONS: &str = "No LinkedIn suggestions available yet";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostIdeaView {
    pub topic: String,
    pub draft: String,
    pub hashtags: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LinkedInView {
    Empty,
    Suggestions {
        profile_summary: Option<String>,
        post_ideas: Vec<PostIdeaView>,
        skills_to_add: Vec<String>,
    },
}

pub fn linkedin_view(profile: &LinkedInProfile) -> LinkedInView {
    let summary = profile
        .profile_summary
        .clone()
        .filter(|s| !s.trim().is_empty());
    if summary.is_none() && profile.post_ideas.is_empty() && profile.skills_to_add.is_empty() {
        return LinkedInView::Empty;
    }

    LinkedInView::Suggestions {
        profile_summary: summary,
        post_ideas: profile
            .post_ideas
            .iter()
            .map(|idea| PostIdeaView {
                topic: idea.topic.clone(),
                draft: idea.draft.clone(),
                hashtags: hashtag_line(&idea.hashtags),
            })
            .collect(),
        skills_to_add: profile.skills_to_add.clone(),
    }
}

/// `["rust", "#career"]` → `"#rust #career"`.
pub fn hashtag_line(tags: &[String]) -> String {
    tags.iter()
        .map(|t| t.trim().trim_start_matches('#'))
        .filter(|t| !t.is_empty())
        .map(|t| format!("#{t}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Post text ready to copy: content, blank line, hashtags.
pub fn format_post(post: &LinkedInPost) -> String {
    let tags = hashtag_line(&post.hashtags);
    if tags.is_empty() {
        return post.post_content.clone();
    }
    format!("{}\n\n{}", post.post_content, tags)
}
