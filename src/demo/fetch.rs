//! Simulated asynchronous data source
//!
//! Nothing here touches the network: each fetch sleeps on the tokio timer for
//! the configured latency and answers with a canned payload.

use serde::Serialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchResponse {
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub content: String,
    pub excerpt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedUser {
    pub data: String,
    pub posts: Vec<Post>,
}

const EXCERPT_CHARS: usize = 100;

/// Pretend to fetch `url`
pub async fn fetch_data(url: &str, latency: Duration) -> FetchResponse {
    debug!(url, latency_ms = latency.as_millis() as u64, "Simulated fetch");
    tokio::time::sleep(latency).await;
    FetchResponse {
        data: format!("Data from {}", url),
    }
}

/// Fetch a user and their posts, one after the other
pub async fn process_user_data(user_id: u32, latency: Duration) -> ProcessedUser {
    let user = fetch_data(&format!("api/users/{}", user_id), latency).await;
    let posts = fetch_data(&format!("api/users/{}/posts", user_id), latency).await;

    let posts = posts
        .data
        .split(',')
        .map(|content| Post {
            content: content.to_string(),
            excerpt: content.chars().take(EXCERPT_CHARS).collect(),
        })
        .collect();

    ProcessedUser {
        data: user.data,
        posts,
    }
}
