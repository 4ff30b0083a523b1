use chrono::{DateTime, Utc};

mod data;
pub use data::*;

mod views;
pub use views::*;

mod memory;
pub use memory::*;

/// Represents a type that owns the marketplace's application state.
///
/// Every operation is synchronous and addresses exactly one entity kind's
/// collection; absence is signalled with [None] or `false`, never an error.
/// Validation, uniqueness, and business rules are the calling layer's
/// responsibility: creates never fail, and records with dangling references
/// are stored as-is, surfacing as [None] enrichment fields on read.
pub trait Storage: Send + Sync {
    // Users
    fn user_by_id(&self, id: UserId) -> Option<User>;
    fn user_by_username(&self, username: &str) -> Option<User>;
    fn create_user(&self, new_user: NewUser) -> User;
    fn update_user(&self, id: UserId, updates: UpdatedUser) -> Option<User>;

    // Snippets
    /// Lists the public catalog. Drafts are filtered out at this layer,
    /// not by the routing layer
    fn published_snippets(&self) -> Vec<SnippetWithAuthor>;
    fn snippet_by_id(&self, id: SnippetId) -> Option<SnippetWithAuthor>;
    fn create_snippet(&self, new_snippet: NewSnippet) -> Snippet;
    fn update_snippet(&self, id: SnippetId, updates: UpdatedSnippet) -> Option<Snippet>;
    /// Everything a user authored, drafts included
    fn snippets_by_user(&self, user_id: UserId) -> Vec<Snippet>;
    /// Popularity-ranked published snippets the user doesn't own and hasn't
    /// bought, by descending downloads + sales, ties in insertion order
    fn recommended_snippets(&self, user_id: UserId) -> Vec<SnippetWithAuthor>;

    // Purchases
    fn create_purchase(&self, new_purchase: NewPurchase) -> Purchase;
    fn purchases_by_user(&self, user_id: UserId) -> Vec<PurchaseWithSnippet>;
    /// Every purchase of a snippet the user authored
    fn sales_by_user(&self, user_id: UserId) -> Vec<PurchaseWithSnippet>;

    // Comments
    fn create_comment(&self, new_comment: NewComment) -> Comment;
    fn snippet_comments(&self, snippet_id: SnippetId) -> Vec<CommentWithAuthor>;
    fn post_comments(&self, post_id: PostId) -> Vec<CommentWithAuthor>;

    // Posts
    fn posts(&self) -> Vec<PostWithAuthor>;
    fn post_by_id(&self, id: PostId) -> Option<PostWithAuthor>;
    fn create_post(&self, new_post: NewPost) -> Post;
    fn update_post(&self, id: PostId, updates: UpdatedPost) -> Option<Post>;
    /// Bumps the post's upvote counter by one. There is no per-user
    /// tracking; repeated calls keep counting
    fn upvote_post(&self, id: PostId) -> Option<Post>;

    // Bundles
    fn bundles(&self) -> Vec<BundleWithAuthor>;
    fn bundle_by_id(&self, id: BundleId) -> Option<BundleWithAuthor>;
    fn create_bundle(&self, new_bundle: NewBundle) -> Bundle;
    fn update_bundle(&self, id: BundleId, updates: UpdatedBundle) -> Option<Bundle>;
    fn bundle_snippets(&self, bundle_id: BundleId) -> Vec<SnippetWithAuthor>;

    // Reviews
    fn create_review(&self, new_review: NewReview) -> Review;
    fn snippet_reviews(&self, snippet_id: SnippetId) -> Vec<ReviewWithAuthor>;
    fn reviews_by_user(&self, user_id: UserId) -> Vec<Review>;

    // Favorites
    fn create_favorite(&self, new_favorite: NewFavorite) -> Favorite;
    /// Deletes the first favorite matching the pair. Returns whether one
    /// existed
    fn remove_favorite(&self, user_id: UserId, snippet_id: SnippetId) -> bool;
    fn favorites_by_user(&self, user_id: UserId) -> Vec<FavoriteWithSnippet>;

    // Shares
    fn create_share(&self, new_share: NewShare) -> Share;
    fn snippet_shares(&self, snippet_id: SnippetId) -> Vec<Share>;

    // Subscriptions
    fn create_subscription(&self, new_subscription: NewSubscription) -> Subscription;
    /// The user's subscription with active status, if any
    fn active_subscription(&self, user_id: UserId) -> Option<Subscription>;
    fn update_subscription(
        &self,
        id: SubscriptionId,
        updates: UpdatedSubscription,
    ) -> Option<Subscription>;

    // Author followers
    fn follow_author(&self, new_follow: NewAuthorFollower) -> AuthorFollower;
    /// Deletes the first follow edge matching the pair. Returns whether one
    /// existed
    fn unfollow_author(&self, follower_id: UserId, author_id: UserId) -> bool;
    fn author_followers(&self, author_id: UserId) -> Vec<FollowerInfo>;
    fn user_following(&self, follower_id: UserId) -> Vec<FollowingInfo>;

    // Recommendations
    fn create_recommendation(&self, new_recommendation: NewRecommendation) -> Recommendation;
    fn recommendations_for_user(&self, user_id: UserId) -> Vec<RecommendationWithSnippet>;

    // Playground sessions
    fn create_playground_session(&self, new_session: NewPlaygroundSession) -> PlaygroundSession;
    fn playground_session_by_id(&self, id: PlaygroundSessionId) -> Option<PlaygroundSession>;
    fn playground_session_by_session_id(&self, session_id: &str) -> Option<PlaygroundSession>;
    fn update_playground_session(
        &self,
        id: PlaygroundSessionId,
        updates: UpdatedPlaygroundSession,
    ) -> Option<PlaygroundSession>;
    fn playground_sessions_by_user(&self, user_id: UserId) -> Vec<PlaygroundSession>;
    fn snippet_playground_sessions(&self, snippet_id: SnippetId) -> Vec<PlaygroundSession>;

    // Scheduled tasks
    fn schedule_task(&self, new_task: NewScheduledTask) -> ScheduledTask;
    /// Tasks that are due at `now` and not yet completed
    fn due_tasks(&self, now: DateTime<Utc>) -> Vec<ScheduledTask>;
    fn complete_task(&self, id: ScheduledTaskId, now: DateTime<Utc>) -> Option<ScheduledTask>;
}
