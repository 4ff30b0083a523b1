use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use synth_core::Id;

pub type UserId = Id<User>;
pub type SnippetId = Id<Snippet>;
pub type BundleId = Id<Bundle>;
pub type PurchaseId = Id<Purchase>;
pub type CommentId = Id<Comment>;
pub type PostId = Id<Post>;
pub type ReviewId = Id<Review>;
pub type FavoriteId = Id<Favorite>;
pub type ShareId = Id<Share>;
pub type SubscriptionId = Id<Subscription>;
pub type AuthorFollowerId = Id<AuthorFollower>;
pub type RecommendationId = Id<Recommendation>;
pub type PlaygroundSessionId = Id<PlaygroundSession>;
pub type ScheduledTaskId = Id<ScheduledTask>;

/// The standard listing price of a snippet
pub const DEFAULT_SNIPPET_PRICE: Decimal = Decimal::from_parts(299, 0, 0, false, 2);
/// The standard listing price of a bundle
pub const DEFAULT_BUNDLE_PRICE: Decimal = Decimal::from_parts(999, 0, 0, false, 2);

/// A registered account on the marketplace
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Opaque credential. Verification is the identity layer's concern
    pub password: String,
    pub email: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    /// Community standing, mutated only by external logic
    pub reputation: i32,
    pub is_subscribed: bool,
    pub subscription_tier: SubscriptionTier,
    pub subscription_expiry: Option<DateTime<Utc>>,
    /// Account id at the external identity provider, if linked
    pub provider_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A code snippet listed on the marketplace
#[derive(Debug, Clone, Serialize)]
pub struct Snippet {
    pub id: SnippetId,
    pub title: String,
    pub description: Option<String>,
    pub code: String,
    pub language: String,
    pub price: Decimal,
    /// The author and seller of the snippet
    pub user_id: UserId,
    /// Whether buyers can download the file yet. Flips after the publish
    /// grace period
    pub downloadable: bool,
    /// When the snippet went public. [None] means draft
    pub published_at: Option<DateTime<Utc>>,
    pub rating: Option<Decimal>,
    pub tags: Option<Vec<String>>,
    pub bundle_id: Option<BundleId>,
    pub total_downloads: i64,
    pub total_sales: i64,
    pub created_at: DateTime<Utc>,
}

/// A curated collection of snippets sold together
#[derive(Debug, Clone, Serialize)]
pub struct Bundle {
    pub id: BundleId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub user_id: UserId,
    pub cover_image: Option<String>,
    pub featured: bool,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A completed sale of a snippet
#[derive(Debug, Clone, Serialize)]
pub struct Purchase {
    pub id: PurchaseId,
    pub snippet_id: SnippetId,
    pub buyer_id: UserId,
    /// The price at the time of purchase. Later price changes don't touch it
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// A comment on either a snippet or a community post.
///
/// Exactly one of `snippet_id` and `post_id` should be set. The store does
/// not enforce this; it is the calling layer's validation duty.
#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub user_id: UserId,
    pub snippet_id: Option<SnippetId>,
    pub post_id: Option<PostId>,
    pub created_at: DateTime<Utc>,
}

/// A community feed post
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub user_id: UserId,
    pub upvotes: i32,
    #[serde(rename = "type")]
    pub post_type: PostType,
    /// Code embedded in the post, for showcases
    pub code: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The kind of community post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Discussion,
    Showcase,
    Question,
    Job,
}

/// A star rating with optional prose, left by a buyer
#[derive(Debug, Clone, Serialize)]
pub struct Review {
    pub id: ReviewId,
    pub snippet_id: SnippetId,
    pub user_id: UserId,
    /// 1 to 5 stars
    pub rating: i32,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A "like" edge between a user and a snippet
#[derive(Debug, Clone, Serialize)]
pub struct Favorite {
    pub id: FavoriteId,
    pub snippet_id: SnippetId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// A record of a snippet being shared to an external platform
#[derive(Debug, Clone, Serialize)]
pub struct Share {
    pub id: ShareId,
    pub snippet_id: SnippetId,
    pub user_id: UserId,
    /// Where the snippet was shared to. Example: twitter, linkedin
    pub platform: String,
    pub created_at: DateTime<Utc>,
}

/// A paid subscription period
#[derive(Debug, Clone, Serialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub user_id: UserId,
    pub tier: SubscriptionTier,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: SubscriptionStatus,
    /// Reference at the external payment processor
    pub payment_id: Option<String>,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// The tier of a subscription or account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    Free,
    Basic,
    Pro,
    Premium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Cancelled,
    Expired,
}

/// A directed follow edge from a follower to an author
#[derive(Debug, Clone, Serialize)]
pub struct AuthorFollower {
    pub id: AuthorFollowerId,
    pub author_id: UserId,
    pub follower_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// A snippet suggestion produced for a user by external analysis
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub id: RecommendationId,
    pub user_id: UserId,
    pub snippet_id: SnippetId,
    pub score: Decimal,
    /// Why the snippet was suggested
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// An interactive code editing session
#[derive(Debug, Clone, Serialize)]
pub struct PlaygroundSession {
    pub id: PlaygroundSessionId,
    pub user_id: Option<UserId>,
    pub snippet_id: Option<SnippetId>,
    pub code: String,
    pub language: String,
    pub input: Option<String>,
    pub output: Option<String>,
    pub is_public: bool,
    /// The session key handed out to the client
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A deferred transition, stored so pending work is ordinary store state
#[derive(Debug, Clone, Serialize)]
pub struct ScheduledTask {
    pub id: ScheduledTaskId,
    pub action: TaskAction,
    pub due_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// The work a scheduled task performs when it comes due
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskAction {
    /// Lift the download restriction on a published snippet
    MakeDownloadable { snippet_id: SnippetId },
}

#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewSnippet {
    pub title: String,
    pub description: Option<String>,
    pub code: String,
    pub language: String,
    /// Defaults to the standard listing price when omitted
    pub price: Option<Decimal>,
    pub user_id: UserId,
}

#[derive(Debug, Deserialize)]
pub struct NewBundle {
    pub name: String,
    pub description: Option<String>,
    /// Defaults to the standard bundle price when omitted
    pub price: Option<Decimal>,
    pub user_id: UserId,
    pub cover_image: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewPurchase {
    pub snippet_id: SnippetId,
    pub buyer_id: UserId,
    pub price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct NewComment {
    pub content: String,
    pub user_id: UserId,
    pub snippet_id: Option<SnippetId>,
    pub post_id: Option<PostId>,
}

#[derive(Debug, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewReview {
    pub snippet_id: SnippetId,
    pub user_id: UserId,
    pub rating: i32,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewFavorite {
    pub snippet_id: SnippetId,
    pub user_id: UserId,
}

#[derive(Debug, Deserialize)]
pub struct NewShare {
    pub snippet_id: SnippetId,
    pub user_id: UserId,
    pub platform: String,
}

#[derive(Debug, Deserialize)]
pub struct NewSubscription {
    pub user_id: UserId,
    pub tier: SubscriptionTier,
    pub end_date: DateTime<Utc>,
    /// Defaults to [SubscriptionStatus::Active] when omitted
    pub status: Option<SubscriptionStatus>,
    pub payment_id: Option<String>,
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct NewAuthorFollower {
    pub author_id: UserId,
    pub follower_id: UserId,
}

#[derive(Debug, Deserialize)]
pub struct NewRecommendation {
    pub user_id: UserId,
    pub snippet_id: SnippetId,
    pub score: Decimal,
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewPlaygroundSession {
    pub user_id: Option<UserId>,
    pub snippet_id: Option<SnippetId>,
    pub code: String,
    pub language: String,
    pub input: Option<String>,
    pub output: Option<String>,
    pub is_public: Option<bool>,
    pub session_id: String,
}

#[derive(Debug)]
pub struct NewScheduledTask {
    pub action: TaskAction,
    pub due_at: DateTime<Utc>,
}

/// Partial update of a user. [None] fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatedUser {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub reputation: Option<i32>,
    pub is_subscribed: Option<bool>,
    pub subscription_tier: Option<SubscriptionTier>,
    pub subscription_expiry: Option<DateTime<Utc>>,
    pub provider_id: Option<String>,
}

/// Partial update of a snippet. [None] fields are left unchanged; the tag
/// list is replaced wholesale, never merged element-wise.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatedSnippet {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub language: Option<String>,
    pub price: Option<Decimal>,
    pub downloadable: Option<bool>,
    pub published_at: Option<DateTime<Utc>>,
    pub rating: Option<Decimal>,
    pub tags: Option<Vec<String>>,
    pub bundle_id: Option<BundleId>,
    pub total_downloads: Option<i64>,
    pub total_sales: Option<i64>,
}

/// Partial update of a bundle. [None] fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatedBundle {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub cover_image: Option<String>,
    pub featured: Option<bool>,
    pub category: Option<String>,
}

/// Partial update of a post. [None] fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatedPost {
    pub title: Option<String>,
    pub content: Option<String>,
    pub upvotes: Option<i32>,
    #[serde(rename = "type")]
    pub post_type: Option<PostType>,
    pub code: Option<String>,
}

/// Partial update of a subscription. [None] fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatedSubscription {
    pub tier: Option<SubscriptionTier>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: Option<SubscriptionStatus>,
    pub payment_id: Option<String>,
    pub amount: Option<Decimal>,
}

/// Partial update of a playground session. [None] fields are left
/// unchanged; `updated_at` advances on every applied update.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatedPlaygroundSession {
    pub code: Option<String>,
    pub language: Option<String>,
    pub input: Option<String>,
    pub output: Option<String>,
    pub is_public: Option<bool>,
}
