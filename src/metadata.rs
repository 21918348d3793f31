//! Paginated metadata fetching from the listing endpoint.

use crate::config::ApiConfig;
use crate::types::Post;

/// Client for the paginated `post.json` listing endpoint.
///
/// Pagination is strictly sequential: one page in flight at a time, pages
/// requested from 1 upward until the server returns an empty array. Any
/// transport, status, or parse error stops pagination and returns whatever
/// has accumulated so far. Partial results are used rather than discarded, which
/// favors making progress over completeness.
#[derive(Clone, Debug)]
pub struct MetadataClient {
    client: reqwest::Client,
    base_url: String,
    page_size: usize,
}

impl MetadataClient {
    /// Create a metadata client from the API configuration
    pub fn new(client: reqwest::Client, api: &ApiConfig) -> Self {
        Self {
            client,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            page_size: api.page_size,
        }
    }

    /// Fetch every post matching the tag filter, across all pages.
    ///
    /// Infallible by design: errors end pagination early and are logged, the
    /// accumulated prefix of the listing is returned either way. Ordering
    /// follows page arrival; nothing stronger is guaranteed.
    pub async fn fetch_all(&self, tags: &str) -> Vec<Post> {
        let encoded_tags = urlencoding::encode(tags);
        let mut all_posts = Vec::new();
        let mut page = 1u32;

        loop {
            let url = format!(
                "{}/post.json?limit={}&page={}&tags={}",
                self.base_url, self.page_size, page, encoded_tags
            );

            let posts = match self.fetch_page(&url).await {
                Ok(posts) => posts,
                Err(e) => {
                    tracing::warn!(
                        page,
                        error = %e,
                        "Failed to fetch listing page, stopping pagination with partial results"
                    );
                    break;
                }
            };

            if posts.is_empty() {
                break;
            }

            all_posts.extend(posts);
            tracing::debug!(page, total = all_posts.len(), "Fetched listing page");
            page += 1;
        }

        tracing::info!(total = all_posts.len(), "Metadata fetch complete");
        all_posts
    }

    async fn fetch_page(&self, url: &str) -> reqwest::Result<Vec<Post>> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Post>>()
            .await
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PostId;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, page_size: usize) -> MetadataClient {
        let api = ApiConfig {
            base_url: server.uri(),
            page_size,
            ..ApiConfig::default()
        };
        MetadataClient::new(reqwest::Client::new(), &api)
    }

    fn listing(ids: &[i64]) -> serde_json::Value {
        serde_json::Value::Array(
            ids.iter()
                .map(|id| {
                    serde_json::json!({
                        "id": id,
                        "file_url": format!("https://files.example/{}.jpg", id),
                        "file_size": 100 * id,
                        "file_ext": "jpg",
                        "tags": "cat"
                    })
                })
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_fetch_all_walks_pages_until_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/post.json"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(&[1, 2])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/post.json"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(&[3])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/post.json"))
            .and(query_param("page", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(&[])))
            .mount(&server)
            .await;

        let posts = client_for(&server, 2).fetch_all("cat").await;
        let ids: Vec<_> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PostId(1), PostId(2), PostId(3)]);
    }

    #[tokio::test]
    async fn test_tags_are_url_encoded() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/post.json"))
            .and(query_param("tags", "cat rating:safe"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(&[])))
            .expect(1)
            .mount(&server)
            .await;

        let posts = client_for(&server, 100).fetch_all("cat rating:safe").await;
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn test_mid_pagination_error_returns_partial_results() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/post.json"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(&[1, 2])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/post.json"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        // Page 2 fails: the run proceeds with page 1's posts
        let posts = client_for(&server, 2).fetch_all("cat").await;
        assert_eq!(posts.len(), 2);
    }

    #[tokio::test]
    async fn test_unparseable_page_returns_partial_results() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/post.json"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(&[1])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/post.json"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let posts = client_for(&server, 1).fetch_all("cat").await;
        assert_eq!(posts.len(), 1);
    }

    #[tokio::test]
    async fn test_first_page_error_yields_empty_list() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/post.json"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let posts = client_for(&server, 100).fetch_all("cat").await;
        assert!(posts.is_empty());
    }
}
