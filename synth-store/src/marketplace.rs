use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{
    NewPurchase, NewReview, NewScheduledTask, NewUser, Purchase, Review, Snippet, SnippetId,
    Storage, StoreConfig, TaskAction, UpdatedSnippet, User, UserId,
};

/// Enforces the marketplace rules the store itself stays agnostic of:
/// uniqueness, business rules, and the publish lifecycle.
pub struct Marketplace<S> {
    store: Arc<S>,
    config: StoreConfig,
}

#[derive(Debug, Error)]
pub enum MarketplaceError {
    /// A resource already exists
    #[error("{resource} with {field} of value {value} already exists")]
    Conflict {
        resource: &'static str,
        field: &'static str,
        value: String,
    },
    /// A referenced resource doesn't exist
    #[error("{resource}:{identifier} doesn't exist")]
    NotFound {
        resource: &'static str,
        identifier: &'static str,
    },
    #[error("Rating must be between 1 and 5")]
    RatingOutOfRange,
    #[error("Snippet was already reviewed by this user")]
    AlreadyReviewed,
}

impl<S> Marketplace<S>
where
    S: Storage,
{
    pub fn new(store: &Arc<S>, config: StoreConfig) -> Self {
        Self {
            store: store.clone(),
            config,
        }
    }

    /// Creates an account, rejecting usernames that are already taken
    pub fn register_user(&self, new_user: NewUser) -> Result<User, MarketplaceError> {
        if self.store.user_by_username(&new_user.username).is_some() {
            return Err(MarketplaceError::Conflict {
                resource: "user",
                field: "username",
                value: new_user.username,
            });
        }

        Ok(self.store.create_user(new_user))
    }

    /// Takes a draft snippet public and queues the downloadable flip for
    /// when the grace period ends.
    ///
    /// Publishing an already published snippet changes nothing.
    pub fn publish_snippet(
        &self,
        id: SnippetId,
        now: DateTime<Utc>,
    ) -> Result<Snippet, MarketplaceError> {
        let snippet = self
            .store
            .snippet_by_id(id)
            .ok_or(MarketplaceError::NotFound {
                resource: "snippet",
                identifier: "id",
            })?
            .snippet;

        if snippet.published_at.is_some() {
            return Ok(snippet);
        }

        let published = self
            .store
            .update_snippet(
                id,
                UpdatedSnippet {
                    published_at: Some(now),
                    ..Default::default()
                },
            )
            .ok_or(MarketplaceError::NotFound {
                resource: "snippet",
                identifier: "id",
            })?;

        self.store.schedule_task(NewScheduledTask {
            action: TaskAction::MakeDownloadable { snippet_id: id },
            due_at: now + self.config.downloadable_delay(),
        });

        Ok(published)
    }

    /// Records a purchase at the snippet's current price. Later price
    /// changes don't affect the recorded amount
    pub fn purchase_snippet(
        &self,
        snippet_id: SnippetId,
        buyer_id: UserId,
    ) -> Result<Purchase, MarketplaceError> {
        let snippet = self
            .store
            .snippet_by_id(snippet_id)
            .ok_or(MarketplaceError::NotFound {
                resource: "snippet",
                identifier: "id",
            })?
            .snippet;

        Ok(self.store.create_purchase(NewPurchase {
            snippet_id,
            buyer_id,
            price: snippet.price,
        }))
    }

    /// Adds a review, one per user per snippet
    pub fn review_snippet(&self, new_review: NewReview) -> Result<Review, MarketplaceError> {
        if !(1..=5).contains(&new_review.rating) {
            return Err(MarketplaceError::RatingOutOfRange);
        }

        let already_reviewed = self
            .store
            .snippet_reviews(new_review.snippet_id)
            .iter()
            .any(|view| view.review.user_id == new_review.user_id);

        if already_reviewed {
            return Err(MarketplaceError::AlreadyReviewed);
        }

        Ok(self.store.create_review(new_review))
    }
}

#[cfg(test)]
mod test {
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;
    use std::sync::Arc;

    use super::{Marketplace, MarketplaceError};
    use crate::{
        MemoryStore, NewReview, NewSnippet, NewUser, SnippetId, Storage, StoreConfig, UpdatedSnippet,
    };

    fn marketplace() -> (Arc<MemoryStore>, Marketplace<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        let marketplace = Marketplace::new(&store, StoreConfig::default());

        (store, marketplace)
    }

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password: "hunter2".to_string(),
            email: format!("{username}@example.com"),
            avatar: None,
            bio: None,
        }
    }

    fn new_snippet(store: &MemoryStore, username: &str) -> SnippetId {
        let user = store.create_user(new_user(username));

        store
            .create_snippet(NewSnippet {
                title: "Quicksort".to_string(),
                description: None,
                code: "fn main() {}".to_string(),
                language: "rust".to_string(),
                price: None,
                user_id: user.id,
            })
            .id
    }

    #[test]
    fn duplicate_usernames_are_rejected() {
        let (_, marketplace) = marketplace();

        marketplace.register_user(new_user("john")).unwrap();
        let err = marketplace.register_user(new_user("john")).unwrap_err();

        assert!(matches!(err, MarketplaceError::Conflict { .. }));
    }

    #[test]
    fn publishing_stamps_the_snippet_and_queues_the_flip() {
        let (store, marketplace) = marketplace();
        let snippet_id = new_snippet(&store, "john");
        let now = Utc::now();

        let published = marketplace.publish_snippet(snippet_id, now).unwrap();
        assert_eq!(published.published_at, Some(now));
        assert!(!published.downloadable);

        // Not due before the grace period ends
        assert!(store.due_tasks(now + Duration::days(2)).is_empty());
        assert_eq!(store.due_tasks(now + Duration::days(3)).len(), 1);
    }

    #[test]
    fn republishing_changes_nothing() {
        let (store, marketplace) = marketplace();
        let snippet_id = new_snippet(&store, "john");
        let now = Utc::now();

        let first = marketplace.publish_snippet(snippet_id, now).unwrap();
        let second = marketplace
            .publish_snippet(snippet_id, now + Duration::days(1))
            .unwrap();

        assert_eq!(second.published_at, first.published_at);
        assert_eq!(store.due_tasks(now + Duration::days(30)).len(), 1);
    }

    #[test]
    fn publishing_a_missing_snippet_fails() {
        let (_, marketplace) = marketplace();

        let err = marketplace
            .publish_snippet(SnippetId::from_value(42), Utc::now())
            .unwrap_err();

        assert!(matches!(err, MarketplaceError::NotFound { .. }));
    }

    #[test]
    fn purchases_snapshot_the_current_price() {
        let (store, marketplace) = marketplace();
        let snippet_id = new_snippet(&store, "author");
        let buyer = store.create_user(new_user("buyer"));

        let purchase = marketplace.purchase_snippet(snippet_id, buyer.id).unwrap();
        assert_eq!(purchase.price, Decimal::new(299, 2));

        store.update_snippet(
            snippet_id,
            UpdatedSnippet {
                price: Some(Decimal::new(1999, 2)),
                ..Default::default()
            },
        );

        let purchases = store.purchases_by_user(buyer.id);
        assert_eq!(purchases[0].purchase.price, Decimal::new(299, 2));
    }

    #[test]
    fn reviews_are_limited_to_one_per_user() {
        let (store, marketplace) = marketplace();
        let snippet_id = new_snippet(&store, "author");
        let reviewer = store.create_user(new_user("reviewer"));

        let review = NewReview {
            snippet_id,
            user_id: reviewer.id,
            rating: 5,
            content: Some("Excellent".to_string()),
        };

        marketplace.review_snippet(review).unwrap();

        let err = marketplace
            .review_snippet(NewReview {
                snippet_id,
                user_id: reviewer.id,
                rating: 4,
                content: None,
            })
            .unwrap_err();

        assert!(matches!(err, MarketplaceError::AlreadyReviewed));
    }

    #[test]
    fn out_of_range_ratings_are_rejected() {
        let (store, marketplace) = marketplace();
        let snippet_id = new_snippet(&store, "author");
        let reviewer = store.create_user(new_user("reviewer"));

        for rating in [0, 6] {
            let err = marketplace
                .review_snippet(NewReview {
                    snippet_id,
                    user_id: reviewer.id,
                    rating,
                    content: None,
                })
                .unwrap_err();

            assert!(matches!(err, MarketplaceError::RatingOutOfRange));
        }
    }
}
