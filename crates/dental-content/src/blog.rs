//! Blog posts.
//!
//! Posts ship as a static JSON document bundled with the storefront. If the
//! document cannot be read the service falls back to a small built-in set, so
//! the blog pages always have something to show.

use crate::error::ContentError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Bundled post document.
pub const BLOG_POSTS_JSON: &str = include_str!("../data/blog-posts.json");

/// A blog post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub excerpt: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl BlogPost {
    pub fn new(id: &str, title: &str, date: NaiveDate, excerpt: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            date,
            excerpt: excerpt.to_string(),
            content: None,
            meta_description: None,
            author: None,
            tags: Vec::new(),
        }
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Body text, or the excerpt when the post has no body.
    pub fn body(&self) -> &str {
        self.content.as_deref().unwrap_or(&self.excerpt)
    }

    /// Description for previews, preferring the meta description.
    pub fn summary(&self) -> &str {
        self.meta_description.as_deref().unwrap_or(&self.excerpt)
    }

    /// Date as shown on the page, e.g. "September 12, 2024".
    pub fn display_date(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }

    fn shared_tags(&self, other: &BlogPost) -> usize {
        self.tags
            .iter()
            .filter(|t| other.tags.iter().any(|o| o.eq_ignore_ascii_case(t)))
            .count()
    }
}

/// Read access to the blog.
#[derive(Debug, Clone)]
pub struct BlogService {
    posts: Vec<BlogPost>,
}

impl BlogService {
    /// Build from posts, ordering newest first.
    pub fn new(mut posts: Vec<BlogPost>) -> Self {
        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Self { posts }
    }

    /// Parse a JSON array of posts.
    pub fn from_json(text: &str) -> Result<Self, ContentError> {
        let posts: Vec<BlogPost> = serde_json::from_str(text)?;
        if posts.is_empty() {
            return Err(ContentError::NoPosts);
        }
        Ok(Self::new(posts))
    }

    /// Load from a document, falling back to the built-in posts when the
    /// document is missing or unreadable.
    pub fn load(document: Option<&str>) -> Self {
        let Some(text) = document else {
            tracing::debug!("No blog document, using built-in posts");
            return Self::fallback();
        };
        match Self::from_json(text) {
            Ok(service) => service,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load blog posts, using built-in posts");
                Self::fallback()
            }
        }
    }

    /// Posts from the bundled document.
    pub fn bundled() -> Self {
        Self::load(Some(BLOG_POSTS_JSON))
    }

    /// The built-in posts.
    pub fn fallback() -> Self {
        Self::new(fallback_posts())
    }

    /// All posts, newest first.
    pub fn all_posts(&self) -> &[BlogPost] {
        &self.posts
    }

    /// Look up a post. Unknown ids yield `None`.
    pub fn get_blog_post(&self, id: &str) -> Option<&BlogPost> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// The `n` newest posts.
    pub fn recent(&self, n: usize) -> &[BlogPost] {
        &self.posts[..n.min(self.posts.len())]
    }

    /// Up to `n` posts related to `id`, by shared tags then recency.
    pub fn related(&self, id: &str, n: usize) -> Vec<&BlogPost> {
        let Some(post) = self.get_blog_post(id) else {
            return Vec::new();
        };
        let mut others: Vec<(usize, &BlogPost)> = self
            .posts
            .iter()
            .filter(|p| p.id != post.id)
            .map(|p| (post.shared_tags(p), p))
            .collect();
        // posts are already newest first and sort_by is stable
        others.sort_by(|a, b| b.0.cmp(&a.0));
        others.into_iter().take(n).map(|(_, p)| p).collect()
    }

    /// Posts carrying a tag.
    pub fn with_tag(&self, tag: &str) -> Vec<&BlogPost> {
        self.posts
            .iter()
            .filter(|p| p.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

fn fallback_posts() -> Vec<BlogPost> {
    vec![
        BlogPost::new(
            "welcome",
            "Welcome to Our Blog",
            date(2024, 1, 15),
            "Equipment advice, product news and practice tips from our team.",
        )
        .with_tags(&["news"]),
        BlogPost::new(
            "infection-control-basics",
            "Infection Control Basics",
            date(2024, 2, 20),
            "The supplies and routines every operatory needs between patients.",
        )
        .with_tags(&["infection-control", "supplies"]),
        BlogPost::new(
            "financing-equipment",
            "Financing New Equipment",
            date(2024, 3, 8),
            "How equipment financing works and what to have ready before you apply.",
        )
        .with_tags(&["equipment", "financing"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_posts_parse() {
        let blog = BlogService::from_json(BLOG_POSTS_JSON).unwrap();
        assert_eq!(blog.len(), 5);
        assert_eq!(blog.all_posts()[0].id, "choosing-a-dental-chair");
        assert_eq!(blog.all_posts()[4].id, "planning-an-operatory");
    }

    #[test]
    fn test_unknown_post_is_none() {
        let blog = BlogService::bundled();
        assert!(blog.get_blog_post("does-not-exist").is_none());
        assert!(blog.get_blog_post("autoclave-maintenance").is_some());
    }

    #[test]
    fn test_load_falls_back() {
        assert_eq!(BlogService::load(None).len(), 3);
        assert_eq!(BlogService::load(Some("not json")).len(), 3);
        assert_eq!(BlogService::load(Some("[]")).len(), 3);
        assert!(matches!(
            BlogService::from_json("[]"),
            Err(ContentError::NoPosts)
        ));
    }

    #[test]
    fn test_fallback_is_newest_first() {
        let blog = BlogService::fallback();
        let ids: Vec<&str> = blog.all_posts().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["financing-equipment", "infection-control-basics", "welcome"]);
    }

    #[test]
    fn test_recent() {
        let blog = BlogService::bundled();
        assert_eq!(blog.recent(2).len(), 2);
        assert_eq!(blog.recent(50).len(), 5);
    }

    #[test]
    fn test_related_prefers_shared_tags() {
        let blog = BlogService::bundled();
        let related = blog.related("choosing-a-dental-chair", 2);
        let ids: Vec<&str> = related.iter().map(|p| p.id.as_str()).collect();
        // one shared tag each, so newest first
        assert_eq!(ids, vec!["sensor-vs-phosphor-plates", "planning-an-operatory"]);
        assert!(blog.related("missing", 3).is_empty());
    }

    #[test]
    fn test_optional_fields() {
        let blog = BlogService::bundled();
        let post = blog.get_blog_post("glove-sizing-guide").unwrap();
        assert!(post.meta_description.is_none());
        assert_eq!(post.summary(), post.excerpt);
        assert_eq!(post.display_date(), "June 18, 2024");
    }
}
