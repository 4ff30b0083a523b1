use std::cmp::Reverse;
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use synth_core::Table;

use super::{
    AuthorFollower, Bundle, BundleId, BundleWithAuthor, Comment, CommentWithAuthor, Favorite,
    FavoriteWithSnippet, FollowerInfo, FollowingInfo, NewAuthorFollower, NewBundle, NewComment,
    NewFavorite, NewPlaygroundSession, NewPost, NewPurchase, NewRecommendation, NewReview,
    NewScheduledTask, NewShare, NewSnippet, NewSubscription, NewUser, PlaygroundSession,
    PlaygroundSessionId, Post, PostId, PostWithAuthor, Purchase, PurchaseWithSnippet,
    Recommendation, RecommendationWithSnippet, Review, ReviewWithAuthor, ScheduledTask,
    ScheduledTaskId, Share, Snippet, SnippetId, SnippetWithAuthor, Storage, Subscription,
    SubscriptionId, SubscriptionStatus, SubscriptionTier, UpdatedBundle, UpdatedPlaygroundSession,
    UpdatedPost, UpdatedSnippet, UpdatedSubscription, UpdatedUser, User, UserId,
    DEFAULT_BUNDLE_PRICE, DEFAULT_SNIPPET_PRICE,
};
use crate::StoreConfig;

/// An in-memory [Storage] implementation holding one guarded table per
/// entity kind.
///
/// State lives for the lifetime of the value and does not survive a
/// process restart. Construct one at the process entry point and hand it
/// to consumers behind an [Arc](std::sync::Arc).
pub struct MemoryStore {
    config: StoreConfig,

    users: Table<User>,
    snippets: Table<Snippet>,
    bundles: Table<Bundle>,
    purchases: Table<Purchase>,
    comments: Table<Comment>,
    posts: Table<Post>,
    reviews: Table<Review>,
    favorites: Table<Favorite>,
    shares: Table<Share>,
    subscriptions: Table<Subscription>,
    author_followers: Table<AuthorFollower>,
    recommendations: Table<Recommendation>,
    playground_sessions: Table<PlaygroundSession>,
    tasks: Table<ScheduledTask>,
}

impl MemoryStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,

            users: Table::new(),
            snippets: Table::new(),
            bundles: Table::new(),
            purchases: Table::new(),
            comments: Table::new(),
            posts: Table::new(),
            reviews: Table::new(),
            favorites: Table::new(),
            shares: Table::new(),
            subscriptions: Table::new(),
            author_followers: Table::new(),
            recommendations: Table::new(),
            playground_sessions: Table::new(),
            tasks: Table::new(),
        }
    }

    fn username_of(&self, user_id: UserId) -> Option<String> {
        self.users.get(user_id).map(|user| user.username)
    }

    fn avatar_of(&self, user_id: UserId) -> Option<String> {
        self.users.get(user_id).and_then(|user| user.avatar)
    }

    fn snippet_title_of(&self, snippet_id: SnippetId) -> Option<String> {
        self.snippets.get(snippet_id).map(|snippet| snippet.title)
    }

    fn with_author(&self, snippet: Snippet) -> SnippetWithAuthor {
        let username = self.username_of(snippet.user_id);

        SnippetWithAuthor { snippet, username }
    }

    fn post_with_author(&self, post: Post) -> PostWithAuthor {
        let username = self.username_of(post.user_id);
        let comment_count = self
            .comments
            .filter(|comment| comment.post_id == Some(post.id))
            .len();

        PostWithAuthor {
            post,
            username,
            comment_count,
        }
    }

    fn bundle_with_author(&self, bundle: Bundle) -> BundleWithAuthor {
        let username = self.username_of(bundle.user_id);
        let snippet_count = self
            .snippets
            .filter(|snippet| snippet.bundle_id == Some(bundle.id))
            .len();

        BundleWithAuthor {
            bundle,
            username,
            snippet_count,
        }
    }

    fn comment_with_author(&self, comment: Comment) -> CommentWithAuthor {
        let username = self.username_of(comment.user_id);

        CommentWithAuthor { comment, username }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl Storage for MemoryStore {
    fn user_by_id(&self, id: UserId) -> Option<User> {
        self.users.get(id)
    }

    fn user_by_username(&self, username: &str) -> Option<User> {
        self.users.find(|user| user.username == username)
    }

    fn create_user(&self, new_user: NewUser) -> User {
        self.users.insert_with(|id| User {
            id,
            username: new_user.username,
            password: new_user.password,
            email: new_user.email,
            avatar: new_user.avatar,
            bio: new_user.bio,
            reputation: 0,
            is_subscribed: false,
            subscription_tier: SubscriptionTier::Free,
            subscription_expiry: None,
            provider_id: None,
            created_at: Utc::now(),
        })
    }

    fn update_user(&self, id: UserId, updates: UpdatedUser) -> Option<User> {
        self.users.update(id, |user| {
            if let Some(username) = updates.username {
                user.username = username;
            }
            if let Some(password) = updates.password {
                user.password = password;
            }
            if let Some(email) = updates.email {
                user.email = email;
            }
            if let Some(avatar) = updates.avatar {
                user.avatar = Some(avatar);
            }
            if let Some(bio) = updates.bio {
                user.bio = Some(bio);
            }
            if let Some(reputation) = updates.reputation {
                user.reputation = reputation;
            }
            if let Some(is_subscribed) = updates.is_subscribed {
                user.is_subscribed = is_subscribed;
            }
            if let Some(subscription_tier) = updates.subscription_tier {
                user.subscription_tier = subscription_tier;
            }
            if let Some(subscription_expiry) = updates.subscription_expiry {
                user.subscription_expiry = Some(subscription_expiry);
            }
            if let Some(provider_id) = updates.provider_id {
                user.provider_id = Some(provider_id);
            }
        })
    }

    fn published_snippets(&self) -> Vec<SnippetWithAuthor> {
        self.snippets
            .filter(|snippet| snippet.published_at.is_some())
            .into_iter()
            .map(|snippet| self.with_author(snippet))
            .collect()
    }

    fn snippet_by_id(&self, id: SnippetId) -> Option<SnippetWithAuthor> {
        self.snippets
            .get(id)
            .map(|snippet| self.with_author(snippet))
    }

    fn create_snippet(&self, new_snippet: NewSnippet) -> Snippet {
        self.snippets.insert_with(|id| Snippet {
            id,
            title: new_snippet.title,
            description: new_snippet.description,
            code: new_snippet.code,
            language: new_snippet.language,
            price: new_snippet.price.unwrap_or(DEFAULT_SNIPPET_PRICE),
            user_id: new_snippet.user_id,
            downloadable: false,
            published_at: None,
            rating: None,
            tags: None,
            bundle_id: None,
            total_downloads: 0,
            total_sales: 0,
            created_at: Utc::now(),
        })
    }

    fn update_snippet(&self, id: SnippetId, updates: UpdatedSnippet) -> Option<Snippet> {
        self.snippets.update(id, |snippet| {
            if let Some(title) = updates.title {
                snippet.title = title;
            }
            if let Some(description) = updates.description {
                snippet.description = Some(description);
            }
            if let Some(code) = updates.code {
                snippet.code = code;
            }
            if let Some(language) = updates.language {
                snippet.language = language;
            }
            if let Some(price) = updates.price {
                snippet.price = price;
            }
            if let Some(downloadable) = updates.downloadable {
                snippet.downloadable = downloadable;
            }
            if let Some(published_at) = updates.published_at {
                snippet.published_at = Some(published_at);
            }
            if let Some(rating) = updates.rating {
                snippet.rating = Some(rating);
            }
            if let Some(tags) = updates.tags {
                snippet.tags = Some(tags);
            }
            if let Some(bundle_id) = updates.bundle_id {
                snippet.bundle_id = Some(bundle_id);
            }
            if let Some(total_downloads) = updates.total_downloads {
                snippet.total_downloads = total_downloads;
            }
            if let Some(total_sales) = updates.total_sales {
                snippet.total_sales = total_sales;
            }
        })
    }

    fn snippets_by_user(&self, user_id: UserId) -> Vec<Snippet> {
        self.snippets.filter(|snippet| snippet.user_id == user_id)
    }

    fn recommended_snippets(&self, user_id: UserId) -> Vec<SnippetWithAuthor> {
        let purchased: HashSet<SnippetId> = self
            .purchases
            .filter(|purchase| purchase.buyer_id == user_id)
            .into_iter()
            .map(|purchase| purchase.snippet_id)
            .collect();

        let mut candidates = self.snippets.filter(|snippet| {
            snippet.published_at.is_some()
                && snippet.user_id != user_id
                && !purchased.contains(&snippet.id)
        });

        // Stable sort, so equally popular snippets stay in insertion order
        candidates.sort_by_key(|snippet| Reverse(snippet.total_downloads + snippet.total_sales));
        candidates.truncate(self.config.recommendation_limit);

        candidates
            .into_iter()
            .map(|snippet| self.with_author(snippet))
            .collect()
    }

    fn create_purchase(&self, new_purchase: NewPurchase) -> Purchase {
        self.purchases.insert_with(|id| Purchase {
            id,
            snippet_id: new_purchase.snippet_id,
            buyer_id: new_purchase.buyer_id,
            price: new_purchase.price,
            created_at: Utc::now(),
        })
    }

    fn purchases_by_user(&self, user_id: UserId) -> Vec<PurchaseWithSnippet> {
        self.purchases
            .filter(|purchase| purchase.buyer_id == user_id)
            .into_iter()
            .map(|purchase| {
                let snippet_title = self.snippet_title_of(purchase.snippet_id);

                PurchaseWithSnippet {
                    purchase,
                    snippet_title,
                }
            })
            .collect()
    }

    fn sales_by_user(&self, user_id: UserId) -> Vec<PurchaseWithSnippet> {
        let mut sales = Vec::new();

        for snippet in self.snippets.filter(|snippet| snippet.user_id == user_id) {
            let snippet_sales = self
                .purchases
                .filter(|purchase| purchase.snippet_id == snippet.id)
                .into_iter()
                .map(|purchase| PurchaseWithSnippet {
                    purchase,
                    snippet_title: Some(snippet.title.clone()),
                });

            sales.extend(snippet_sales);
        }

        sales
    }

    fn create_comment(&self, new_comment: NewComment) -> Comment {
        self.comments.insert_with(|id| Comment {
            id,
            content: new_comment.content,
            user_id: new_comment.user_id,
            snippet_id: new_comment.snippet_id,
            post_id: new_comment.post_id,
            created_at: Utc::now(),
        })
    }

    fn snippet_comments(&self, snippet_id: SnippetId) -> Vec<CommentWithAuthor> {
        self.comments
            .filter(|comment| comment.snippet_id == Some(snippet_id))
            .into_iter()
            .map(|comment| self.comment_with_author(comment))
            .collect()
    }

    fn post_comments(&self, post_id: PostId) -> Vec<CommentWithAuthor> {
        self.comments
            .filter(|comment| comment.post_id == Some(post_id))
            .into_iter()
            .map(|comment| self.comment_with_author(comment))
            .collect()
    }

    fn posts(&self) -> Vec<PostWithAuthor> {
        self.posts
            .all()
            .into_iter()
            .map(|post| self.post_with_author(post))
            .collect()
    }

    fn post_by_id(&self, id: PostId) -> Option<PostWithAuthor> {
        self.posts.get(id).map(|post| self.post_with_author(post))
    }

    fn create_post(&self, new_post: NewPost) -> Post {
        self.posts.insert_with(|id| Post {
            id,
            title: new_post.title,
            content: new_post.content,
            user_id: new_post.user_id,
            upvotes: 0,
            post_type: new_post.post_type,
            code: new_post.code,
            created_at: Utc::now(),
        })
    }

    fn update_post(&self, id: PostId, updates: UpdatedPost) -> Option<Post> {
        self.posts.update(id, |post| {
            if let Some(title) = updates.title {
                post.title = title;
            }
            if let Some(content) = updates.content {
                post.content = content;
            }
            if let Some(upvotes) = updates.upvotes {
                post.upvotes = upvotes;
            }
            if let Some(post_type) = updates.post_type {
                post.post_type = post_type;
            }
            if let Some(code) = updates.code {
                post.code = Some(code);
            }
        })
    }

    fn upvote_post(&self, id: PostId) -> Option<Post> {
        self.posts.update(id, |post| post.upvotes += 1)
    }

    fn bundles(&self) -> Vec<BundleWithAuthor> {
        self.bundles
            .all()
            .into_iter()
            .map(|bundle| self.bundle_with_author(bundle))
            .collect()
    }

    fn bundle_by_id(&self, id: BundleId) -> Option<BundleWithAuthor> {
        self.bundles
            .get(id)
            .map(|bundle| self.bundle_with_author(bundle))
    }

    fn create_bundle(&self, new_bundle: NewBundle) -> Bundle {
        self.bundles.insert_with(|id| Bundle {
            id,
            name: new_bundle.name,
            description: new_bundle.description,
            price: new_bundle.price.unwrap_or(DEFAULT_BUNDLE_PRICE),
            user_id: new_bundle.user_id,
            cover_image: new_bundle.cover_image,
            featured: false,
            category: new_bundle.category,
            created_at: Utc::now(),
        })
    }

    fn update_bundle(&self, id: BundleId, updates: UpdatedBundle) -> Option<Bundle> {
        self.bundles.update(id, |bundle| {
            if let Some(name) = updates.name {
                bundle.name = name;
            }
            if let Some(description) = updates.description {
                bundle.description = Some(description);
            }
            if let Some(price) = updates.price {
                bundle.price = price;
            }
            if let Some(cover_image) = updates.cover_image {
                bundle.cover_image = Some(cover_image);
            }
            if let Some(featured) = updates.featured {
                bundle.featured = featured;
            }
            if let Some(category) = updates.category {
                bundle.category = Some(category);
            }
        })
    }

    fn bundle_snippets(&self, bundle_id: BundleId) -> Vec<SnippetWithAuthor> {
        self.snippets
            .filter(|snippet| snippet.bundle_id == Some(bundle_id))
            .into_iter()
            .map(|snippet| self.with_author(snippet))
            .collect()
    }

    fn create_review(&self, new_review: NewReview) -> Review {
        self.reviews.insert_with(|id| Review {
            id,
            snippet_id: new_review.snippet_id,
            user_id: new_review.user_id,
            rating: new_review.rating,
            content: new_review.content,
            created_at: Utc::now(),
        })
    }

    fn snippet_reviews(&self, snippet_id: SnippetId) -> Vec<ReviewWithAuthor> {
        self.reviews
            .filter(|review| review.snippet_id == snippet_id)
            .into_iter()
            .map(|review| {
                let username = self.username_of(review.user_id);
                let user_avatar = self.avatar_of(review.user_id);

                ReviewWithAuthor {
                    review,
                    username,
                    user_avatar,
                }
            })
            .collect()
    }

    fn reviews_by_user(&self, user_id: UserId) -> Vec<Review> {
        self.reviews.filter(|review| review.user_id == user_id)
    }

    fn create_favorite(&self, new_favorite: NewFavorite) -> Favorite {
        self.favorites.insert_with(|id| Favorite {
            id,
            snippet_id: new_favorite.snippet_id,
            user_id: new_favorite.user_id,
            created_at: Utc::now(),
        })
    }

    fn remove_favorite(&self, user_id: UserId, snippet_id: SnippetId) -> bool {
        self.favorites
            .remove_first(|favorite| {
                favorite.user_id == user_id && favorite.snippet_id == snippet_id
            })
    }

    fn favorites_by_user(&self, user_id: UserId) -> Vec<FavoriteWithSnippet> {
        self.favorites
            .filter(|favorite| favorite.user_id == user_id)
            .into_iter()
            .map(|favorite| {
                let snippet_title = self.snippet_title_of(favorite.snippet_id);

                FavoriteWithSnippet {
                    favorite,
                    snippet_title,
                }
            })
            .collect()
    }

    fn create_share(&self, new_share: NewShare) -> Share {
        self.shares.insert_with(|id| Share {
            id,
            snippet_id: new_share.snippet_id,
            user_id: new_share.user_id,
            platform: new_share.platform,
            created_at: Utc::now(),
        })
    }

    fn snippet_shares(&self, snippet_id: SnippetId) -> Vec<Share> {
        self.shares.filter(|share| share.snippet_id == snippet_id)
    }

    fn create_subscription(&self, new_subscription: NewSubscription) -> Subscription {
        let now = Utc::now();

        self.subscriptions.insert_with(|id| Subscription {
            id,
            user_id: new_subscription.user_id,
            tier: new_subscription.tier,
            start_date: now,
            end_date: new_subscription.end_date,
            status: new_subscription
                .status
                .unwrap_or(SubscriptionStatus::Active),
            payment_id: new_subscription.payment_id,
            amount: new_subscription.amount,
            created_at: now,
        })
    }

    fn active_subscription(&self, user_id: UserId) -> Option<Subscription> {
        self.subscriptions.find(|subscription| {
            subscription.user_id == user_id && subscription.status == SubscriptionStatus::Active
        })
    }

    fn update_subscription(
        &self,
        id: SubscriptionId,
        updates: UpdatedSubscription,
    ) -> Option<Subscription> {
        self.subscriptions.update(id, |subscription| {
            if let Some(tier) = updates.tier {
                subscription.tier = tier;
            }
            if let Some(end_date) = updates.end_date {
                subscription.end_date = end_date;
            }
            if let Some(status) = updates.status {
                subscription.status = status;
            }
            if let Some(payment_id) = updates.payment_id {
                subscription.payment_id = Some(payment_id);
            }
            if let Some(amount) = updates.amount {
                subscription.amount = amount;
            }
        })
    }

    fn follow_author(&self, new_follow: NewAuthorFollower) -> AuthorFollower {
        self.author_followers.insert_with(|id| AuthorFollower {
            id,
            author_id: new_follow.author_id,
            follower_id: new_follow.follower_id,
            created_at: Utc::now(),
        })
    }

    fn unfollow_author(&self, follower_id: UserId, author_id: UserId) -> bool {
        self.author_followers
            .remove_first(|follow| {
                follow.follower_id == follower_id && follow.author_id == author_id
            })
    }

    fn author_followers(&self, author_id: UserId) -> Vec<FollowerInfo> {
        self.author_followers
            .filter(|follow| follow.author_id == author_id)
            .into_iter()
            .map(|follow| {
                let follower_username = self.username_of(follow.follower_id);
                let follower_avatar = self.avatar_of(follow.follower_id);

                FollowerInfo {
                    follow,
                    follower_username,
                    follower_avatar,
                }
            })
            .collect()
    }

    fn user_following(&self, follower_id: UserId) -> Vec<FollowingInfo> {
        self.author_followers
            .filter(|follow| follow.follower_id == follower_id)
            .into_iter()
            .map(|follow| {
                let author_username = self.username_of(follow.author_id);
                let author_avatar = self.avatar_of(follow.author_id);

                FollowingInfo {
                    follow,
                    author_username,
                    author_avatar,
                }
            })
            .collect()
    }

    fn create_recommendation(&self, new_recommendation: NewRecommendation) -> Recommendation {
        self.recommendations.insert_with(|id| Recommendation {
            id,
            user_id: new_recommendation.user_id,
            snippet_id: new_recommendation.snippet_id,
            score: new_recommendation.score,
            reason: new_recommendation.reason,
            created_at: Utc::now(),
        })
    }

    fn recommendations_for_user(&self, user_id: UserId) -> Vec<RecommendationWithSnippet> {
        self.recommendations
            .filter(|recommendation| recommendation.user_id == user_id)
            .into_iter()
            .map(|recommendation| {
                let snippet = self.snippets.get(recommendation.snippet_id);

                RecommendationWithSnippet {
                    recommendation,
                    snippet_title: snippet.as_ref().map(|snippet| snippet.title.clone()),
                    snippet_language: snippet.map(|snippet| snippet.language),
                }
            })
            .collect()
    }

    fn create_playground_session(&self, new_session: NewPlaygroundSession) -> PlaygroundSession {
        let now = Utc::now();

        self.playground_sessions.insert_with(|id| PlaygroundSession {
            id,
            user_id: new_session.user_id,
            snippet_id: new_session.snippet_id,
            code: new_session.code,
            language: new_session.language,
            input: new_session.input,
            output: new_session.output,
            is_public: new_session.is_public.unwrap_or(false),
            session_id: new_session.session_id,
            created_at: now,
            updated_at: now,
        })
    }

    fn playground_session_by_id(&self, id: PlaygroundSessionId) -> Option<PlaygroundSession> {
        self.playground_sessions.get(id)
    }

    fn playground_session_by_session_id(&self, session_id: &str) -> Option<PlaygroundSession> {
        self.playground_sessions
            .find(|session| session.session_id == session_id)
    }

    fn update_playground_session(
        &self,
        id: PlaygroundSessionId,
        updates: UpdatedPlaygroundSession,
    ) -> Option<PlaygroundSession> {
        self.playground_sessions.update(id, |session| {
            if let Some(code) = updates.code {
                session.code = code;
            }
            if let Some(language) = updates.language {
                session.language = language;
            }
            if let Some(input) = updates.input {
                session.input = Some(input);
            }
            if let Some(output) = updates.output {
                session.output = Some(output);
            }
            if let Some(is_public) = updates.is_public {
                session.is_public = is_public;
            }

            session.updated_at = Utc::now();
        })
    }

    fn playground_sessions_by_user(&self, user_id: UserId) -> Vec<PlaygroundSession> {
        self.playground_sessions
            .filter(|session| session.user_id == Some(user_id))
    }

    fn snippet_playground_sessions(&self, snippet_id: SnippetId) -> Vec<PlaygroundSession> {
        self.playground_sessions
            .filter(|session| session.snippet_id == Some(snippet_id))
    }

    fn schedule_task(&self, new_task: NewScheduledTask) -> ScheduledTask {
        self.tasks.insert_with(|id| ScheduledTask {
            id,
            action: new_task.action,
            due_at: new_task.due_at,
            completed_at: None,
            created_at: Utc::now(),
        })
    }

    fn due_tasks(&self, now: DateTime<Utc>) -> Vec<ScheduledTask> {
        self.tasks
            .filter(|task| task.completed_at.is_none() && task.due_at <= now)
    }

    fn complete_task(&self, id: ScheduledTaskId, now: DateTime<Utc>) -> Option<ScheduledTask> {
        self.tasks.update(id, |task| task.completed_at = Some(now))
    }
}
