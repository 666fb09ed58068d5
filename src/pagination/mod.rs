//! Post list pagination
//!
//! `PaginationState` holds the displayed posts, the opaque next-page cursor
//! and a loading flag. The paginator drives incremental "load more"
//! fetching: each call issues one GET against the cursor URL, maps the
//! returned documents and appends them. A failed fetch leaves the state
//! untouched apart from the loading flag; the post list stays usable.

use crate::cms::{CmsClient, CmsError, SearchResponse};
use crate::content::{map_results, MapError, Post};

/// Fetches one page of results from an opaque cursor URL
pub trait PageFetcher {
    fn fetch_page(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<SearchResponse, CmsError>>;
}

impl PageFetcher for CmsClient {
    async fn fetch_page(&self, url: &str) -> Result<SearchResponse, CmsError> {
        CmsClient::fetch_page(self, url).await
    }
}

/// Client-side state of a paginated post list
///
/// Created once per page view from the initial query response, mutated only
/// by [`Paginator::fetch_next_page`], discarded on navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationState {
    /// Displayed posts, in remote page order; later pages are appended
    pub posts: Vec<Post>,

    /// Opaque URL of the next page; `None` means no further pages exist
    pub next_cursor: Option<String>,

    /// Guards against overlapping fetches
    pub is_loading: bool,
}

impl PaginationState {
    /// Build the initial state from a query response
    pub fn from_response(response: &SearchResponse) -> Result<Self, MapError> {
        Ok(Self {
            posts: map_results(&response.results)?,
            next_cursor: response.next_page.clone(),
            is_loading: false,
        })
    }

    /// Whether a further page exists
    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}

/// Drives incremental fetching of a paginated post list
pub struct Paginator<'a, F: PageFetcher> {
    state: PaginationState,
    fetcher: &'a F,
}

impl<'a, F: PageFetcher> Paginator<'a, F> {
    pub fn new(state: PaginationState, fetcher: &'a F) -> Self {
        Self { state, fetcher }
    }

    /// Current pagination state
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Fetch the next page and append its posts
    ///
    /// No-op when the cursor is terminal or a fetch is already in flight.
    /// Issues exactly one GET per invocation; no retry, no backoff. On any
    /// failure (transport, non-2xx, malformed body, mapping) the posts and
    /// cursor are left unchanged and the loading flag is cleared.
    pub async fn fetch_next_page(&mut self) {
        if self.state.is_loading {
            return;
        }
        let Some(cursor) = self.state.next_cursor.clone() else {
            return;
        };

        self.state.is_loading = true;

        match self.fetcher.fetch_page(&cursor).await {
            Ok(response) => match map_results(&response.results) {
                Ok(posts) => {
                    self.state.posts.extend(posts);
                    self.state.next_cursor = response.next_page;
                }
                Err(e) => {
                    tracing::warn!("Skipping next page, mapping failed: {}", e);
                }
            },
            Err(e) => {
                tracing::warn!("Failed to fetch next page: {}", e);
            }
        }

        self.state.is_loading = false;
    }

    /// Walk all remaining pages, yielding the full ordered post list
    ///
    /// Used at generation time to discover every post. Best effort: a page
    /// that fails to load ends the walk with what was collected so far.
    pub async fn collect_all(mut self) -> Vec<Post> {
        while self.state.has_more() {
            let cursor_before = self.state.next_cursor.clone();
            self.fetch_next_page().await;

            // A failed fetch leaves the cursor in place; stop rather than
            // refetch the same page forever.
            if self.state.next_cursor == cursor_before {
                break;
            }
        }

        self.state.posts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::Document;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Serves queued responses; errors simulate network failure
    struct MockFetcher {
        responses: Mutex<VecDeque<Result<SearchResponse, CmsError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockFetcher {
        fn new(responses: Vec<Result<SearchResponse, CmsError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl PageFetcher for MockFetcher {
        async fn fetch_page(&self, url: &str) -> Result<SearchResponse, CmsError> {
            self.calls.lock().unwrap().push(url.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected fetch")
        }
    }

    fn document(uid: &str) -> Document {
        Document {
            id: format!("id-{}", uid),
            uid: Some(uid.to_string()),
            doc_type: "posts".to_string(),
            first_publication_date: Some("2021-03-15T10:00:00+0000".to_string()),
            data: json!({"title": uid, "subtitle": "sub", "author": "Ursula"}),
        }
    }

    fn response(uids: &[&str], next_page: Option<&str>) -> SearchResponse {
        SearchResponse {
            page: 1,
            results: uids.iter().map(|uid| document(uid)).collect(),
            total_pages: 0,
            total_results_size: 0,
            next_page: next_page.map(str::to_string),
        }
    }

    fn initial_state(uids: &[&str], cursor: Option<&str>) -> PaginationState {
        PaginationState::from_response(&response(uids, cursor)).unwrap()
    }

    fn network_error() -> CmsError {
        CmsError::Status {
            status: reqwest::StatusCode::BAD_GATEWAY,
            url: "https://cms.example.com/page2".to_string(),
        }
    }

    #[test]
    fn test_initial_state_from_response() {
        let state = initial_state(&["a", "b"], Some("https://cms.example.com/page2"));
        assert_eq!(state.posts.len(), 2);
        assert!(state.has_more());
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_fetch_appends_and_advances_cursor() {
        let fetcher = MockFetcher::new(vec![Ok(response(&["c"], None))]);
        let state = initial_state(&["a", "b"], Some("https://cms.example.com/page2"));
        let mut paginator = Paginator::new(state, &fetcher);

        paginator.fetch_next_page().await;

        let state = paginator.state();
        let uids: Vec<_> = state.posts.iter().map(|p| p.uid.as_str()).collect();
        assert_eq!(uids, vec!["a", "b", "c"]);
        assert_eq!(state.next_cursor, None);
        assert!(!state.is_loading);
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn test_terminal_cursor_is_a_noop() {
        let fetcher = MockFetcher::new(Vec::new());
        let state = initial_state(&["a"], None);
        let mut paginator = Paginator::new(state.clone(), &fetcher);

        paginator.fetch_next_page().await;
        paginator.fetch_next_page().await;

        assert_eq!(*paginator.state(), state);
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_state_unchanged() {
        let fetcher = MockFetcher::new(vec![Err(network_error())]);
        let state = initial_state(&["a", "b"], Some("https://cms.example.com/page2"));
        let mut paginator = Paginator::new(state.clone(), &fetcher);

        paginator.fetch_next_page().await;

        assert_eq!(paginator.state().posts, state.posts);
        assert_eq!(paginator.state().next_cursor, state.next_cursor);
        assert!(!paginator.state().is_loading);
    }

    #[tokio::test]
    async fn test_malformed_results_leave_state_unchanged() {
        let mut bad = response(&["c"], None);
        bad.results[0].data = json!({"title": "only a title"});

        let fetcher = MockFetcher::new(vec![Ok(bad)]);
        let state = initial_state(&["a"], Some("https://cms.example.com/page2"));
        let mut paginator = Paginator::new(state.clone(), &fetcher);

        paginator.fetch_next_page().await;

        assert_eq!(*paginator.state(), state);
    }

    #[tokio::test]
    async fn test_in_flight_guard_skips_second_call() {
        let fetcher = MockFetcher::new(Vec::new());
        let mut state = initial_state(&["a"], Some("https://cms.example.com/page2"));
        state.is_loading = true;
        let mut paginator = Paginator::new(state, &fetcher);

        paginator.fetch_next_page().await;

        assert_eq!(fetcher.call_count(), 0);
        assert!(paginator.state().is_loading);
    }

    #[tokio::test]
    async fn test_collect_all_walks_every_page() {
        let fetcher = MockFetcher::new(vec![
            Ok(response(&["c", "d"], Some("https://cms.example.com/page3"))),
            Ok(response(&["e"], None)),
        ]);
        let state = initial_state(&["a", "b"], Some("https://cms.example.com/page2"));

        let posts = Paginator::new(state, &fetcher).collect_all().await;

        let uids: Vec<_> = posts.iter().map(|p| p.uid.as_str()).collect();
        assert_eq!(uids, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(fetcher.call_count(), 2);
    }

    #[tokio::test]
    async fn test_collect_all_stops_after_a_failed_page() {
        let fetcher = MockFetcher::new(vec![Err(network_error())]);
        let state = initial_state(&["a"], Some("https://cms.example.com/page2"));

        let posts = Paginator::new(state, &fetcher).collect_all().await;

        assert_eq!(posts.len(), 1);
        assert_eq!(fetcher.call_count(), 1);
    }
}
