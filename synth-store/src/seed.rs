//! The fixture dataset the demo environment expects.

use chrono::Utc;
use log::info;
use rust_decimal::Decimal;

use crate::{
    NewComment, NewPost, NewPurchase, NewSnippet, NewUser, PostType, Storage, UpdatedPost,
    UpdatedSnippet,
};

/// Fills the store with the demo dataset: two users, three snippets, two
/// posts, two comments, and one purchase.
///
/// Demo snippets are live and downloadable from the start. Seeding is a
/// one-time initialization; calling it twice duplicates the data.
pub fn seed_demo_data<S>(store: &S)
where
    S: Storage,
{
    let john = store.create_user(NewUser {
        username: "johndoe".to_string(),
        password: "password123".to_string(),
        email: "john@example.com".to_string(),
        avatar: None,
        bio: Some("Full-stack developer with 5 years of experience".to_string()),
    });

    let jane = store.create_user(NewUser {
        username: "janedoe".to_string(),
        password: "password123".to_string(),
        email: "jane@example.com".to_string(),
        avatar: None,
        bio: Some("Frontend specialist focused on React and modern UI".to_string()),
    });

    let scroll_hook = store.create_snippet(NewSnippet {
        title: "React Infinite Scroll Hook".to_string(),
        description: Some(
            "A custom hook for implementing infinite scroll in React applications".to_string(),
        ),
        code: INFINITE_SCROLL_HOOK.to_string(),
        language: "javascript".to_string(),
        price: Some(Decimal::new(399, 2)),
        user_id: john.id,
    });

    let data_parser = store.create_snippet(NewSnippet {
        title: "Python Data Parser".to_string(),
        description: Some("Efficiently parse and transform CSV data using Python".to_string()),
        code: DATA_PARSER.to_string(),
        language: "python".to_string(),
        price: Some(Decimal::new(499, 2)),
        user_id: jane.id,
    });

    let animated_button = store.create_snippet(NewSnippet {
        title: "CSS Animated Button".to_string(),
        description: Some("Beautiful button with hover effects and animations".to_string()),
        code: ANIMATED_BUTTON.to_string(),
        language: "css".to_string(),
        price: Some(Decimal::new(249, 2)),
        user_id: john.id,
    });

    for snippet_id in [scroll_hook.id, data_parser.id, animated_button.id] {
        store.update_snippet(
            snippet_id,
            UpdatedSnippet {
                downloadable: Some(true),
                published_at: Some(Utc::now()),
                ..Default::default()
            },
        );
    }

    let react_post = store.create_post(NewPost {
        title: "Thoughts on React 18 features".to_string(),
        content: "I've been using the new concurrent rendering features in React 18 and it's \
                  a game changer for complex UIs. The automatic batching of state updates has \
                  significantly improved performance in my app. What are your experiences with \
                  React 18?"
            .to_string(),
        user_id: john.id,
        post_type: PostType::Discussion,
        code: None,
    });

    let portfolio_post = store.create_post(NewPost {
        title: "Check out my new portfolio site!".to_string(),
        content: "I just launched my new portfolio site built with Astro and Tailwind CSS. It \
                  features a dark mode toggle, animated page transitions, and a live code \
                  editor for demonstrations. Would love to get your feedback!"
            .to_string(),
        user_id: jane.id,
        post_type: PostType::Showcase,
        code: None,
    });

    store.update_post(
        react_post.id,
        UpdatedPost {
            upvotes: Some(5),
            ..Default::default()
        },
    );

    store.update_post(
        portfolio_post.id,
        UpdatedPost {
            upvotes: Some(8),
            ..Default::default()
        },
    );

    store.create_comment(NewComment {
        content: "Great snippet! Saved me hours of work.".to_string(),
        user_id: jane.id,
        snippet_id: Some(scroll_hook.id),
        post_id: None,
    });

    store.create_comment(NewComment {
        content: "I agree, the automatic batching is incredibly useful.".to_string(),
        user_id: jane.id,
        snippet_id: None,
        post_id: Some(react_post.id),
    });

    store.create_purchase(NewPurchase {
        snippet_id: scroll_hook.id,
        buyer_id: jane.id,
        price: scroll_hook.price,
    });

    info!("Seeded demo data (2 users, 3 snippets, 2 posts, 2 comments, 1 purchase)");
}

const INFINITE_SCROLL_HOOK: &str = r#"import { useState, useEffect } from 'react';

function useInfiniteScroll(callback) {
  const [isFetching, setIsFetching] = useState(false);

  useEffect(() => {
    function handleScroll() {
      if (
        window.innerHeight + document.documentElement.scrollTop !== document.documentElement.offsetHeight ||
        isFetching
      )
        return;
      setIsFetching(true);
    }

    window.addEventListener('scroll', handleScroll);
    return () => window.removeEventListener('scroll', handleScroll);
  }, [isFetching]);

  useEffect(() => {
    if (!isFetching) return;
    callback();
  }, [isFetching, callback]);

  return [isFetching, setIsFetching];
}

export default useInfiniteScroll;"#;

const DATA_PARSER: &str = r#"import pandas as pd
import numpy as np

def process_data(filename):
    # Read the CSV file
    df = pd.read_csv(filename)

    # Clean data
    df = df.dropna()

    # Transform data
    df['total'] = df['price'] * df['quantity']
    df['date'] = pd.to_datetime(df['date'])

    # Group by date
    result = df.groupby(df['date'].dt.date).agg({
        'total': 'sum',
        'quantity': 'sum'
    }).reset_index()

    return result

if __name__ == "__main__":
    result = process_data('sales.csv')
    print(result.head())"#;

const ANIMATED_BUTTON: &str = r#".animated-button {
  padding: 12px 24px;
  background: linear-gradient(135deg, #9A6AFF, #00FFFF);
  border: none;
  border-radius: 4px;
  color: white;
  font-weight: bold;
  position: relative;
  overflow: hidden;
  transition: all 0.3s ease;
}

.animated-button:hover {
  transform: translateY(-2px);
  box-shadow: 0 8px 16px rgba(0, 0, 0, 0.2);
}

.animated-button::before {
  content: '';
  position: absolute;
  top: 0;
  left: -100%;
  width: 100%;
  height: 100%;
  background: linear-gradient(90deg, transparent, rgba(255,255,255,0.2), transparent);
  transition: all 0.5s ease;
}

.animated-button:hover::before {
  left: 100%;
}"#;

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;

    use super::seed_demo_data;
    use crate::{MemoryStore, Storage};

    #[test]
    fn demo_dataset_has_the_expected_records() {
        let store = MemoryStore::default();
        seed_demo_data(&store);

        let john = store.user_by_username("johndoe").unwrap();
        let jane = store.user_by_username("janedoe").unwrap();

        let snippets = store.published_snippets();
        assert_eq!(snippets.len(), 3);
        assert!(snippets.iter().all(|view| view.snippet.downloadable));

        let posts = store.posts();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].post.upvotes, 5);
        assert_eq!(posts[1].post.upvotes, 8);
        assert_eq!(posts[0].comment_count, 1);

        assert_eq!(store.snippets_by_user(john.id).len(), 2);
        assert_eq!(store.snippets_by_user(jane.id).len(), 1);

        let purchases = store.purchases_by_user(jane.id);
        assert_eq!(purchases.len(), 1);
        assert_eq!(purchases[0].purchase.price, Decimal::new(399, 2));
        assert_eq!(
            purchases[0].snippet_title.as_deref(),
            Some("React Infinite Scroll Hook")
        );

        let sales = store.sales_by_user(john.id);
        assert_eq!(sales.len(), 1);
    }

    #[test]
    fn seeded_snippet_comments_are_attributed() {
        let store = MemoryStore::default();
        seed_demo_data(&store);

        let hook = store.published_snippets().remove(0);
        let comments = store.snippet_comments(hook.snippet.id);

        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].username.as_deref(), Some("janedoe"));
    }
}
