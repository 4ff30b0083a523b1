//! Enriched views returned by relationship-crossing reads.
//!
//! A view is a fresh value combining a record with fields copied from
//! related records at read time. Views are never stored; two reads after a
//! related update reflect the update. A missing related record leaves the
//! enrichment fields [None] instead of failing the read.

use serde::Serialize;

use super::{AuthorFollower, Bundle, Comment, Favorite, Post, Purchase, Recommendation, Review, Snippet};

/// A snippet annotated with its author's username
#[derive(Debug, Clone, Serialize)]
pub struct SnippetWithAuthor {
    #[serde(flatten)]
    pub snippet: Snippet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// A post annotated with its author's username and comment count
#[derive(Debug, Clone, Serialize)]
pub struct PostWithAuthor {
    #[serde(flatten)]
    pub post: Post,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub comment_count: usize,
}

/// A bundle annotated with its author's username and member count
#[derive(Debug, Clone, Serialize)]
pub struct BundleWithAuthor {
    #[serde(flatten)]
    pub bundle: Bundle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub snippet_count: usize,
}

/// A purchase annotated with the title of the snippet bought
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseWithSnippet {
    #[serde(flatten)]
    pub purchase: Purchase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet_title: Option<String>,
}

/// A comment annotated with its author's username
#[derive(Debug, Clone, Serialize)]
pub struct CommentWithAuthor {
    #[serde(flatten)]
    pub comment: Comment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// A review annotated with its author's username and avatar
#[derive(Debug, Clone, Serialize)]
pub struct ReviewWithAuthor {
    #[serde(flatten)]
    pub review: Review,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_avatar: Option<String>,
}

/// A favorite annotated with the title of the liked snippet
#[derive(Debug, Clone, Serialize)]
pub struct FavoriteWithSnippet {
    #[serde(flatten)]
    pub favorite: Favorite,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet_title: Option<String>,
}

/// A follow edge annotated with the follower's identity, for an author's
/// follower listing
#[derive(Debug, Clone, Serialize)]
pub struct FollowerInfo {
    #[serde(flatten)]
    pub follow: AuthorFollower,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follower_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follower_avatar: Option<String>,
}

/// A follow edge annotated with the author's identity, for a user's
/// following listing
#[derive(Debug, Clone, Serialize)]
pub struct FollowingInfo {
    #[serde(flatten)]
    pub follow: AuthorFollower,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_avatar: Option<String>,
}

/// A recommendation annotated with the suggested snippet's title and
/// language
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationWithSnippet {
    #[serde(flatten)]
    pub recommendation: Recommendation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet_language: Option<String>,
}
