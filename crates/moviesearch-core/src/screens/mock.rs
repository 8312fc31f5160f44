//! Scripted `MovieApi` for screen tests.
#![allow(clippy::unwrap_used)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use moviesearch_api::tmdb::{ApiError, DetailRecord, MovieApi, ResultItem, ResultPage};
use tokio::sync::oneshot;

type Reply<T> = oneshot::Receiver<Result<T, ApiError>>;

/// Responses are released by the test through the returned senders, so
/// completion order is fully controlled. Unscripted calls fail with
/// `Network`.
#[derive(Debug, Default)]
pub struct MockApi {
    pages: Mutex<HashMap<String, VecDeque<Reply<ResultPage>>>>,
    details: Mutex<HashMap<u64, VecDeque<Reply<DetailRecord>>>>,
    calls: Mutex<Vec<String>>,
}

impl MockApi {
    /// Scripts the next reply for `key` (`"popular:1"`, `"search:Q:1"`).
    pub fn gate_page(&self, key: &str) -> oneshot::Sender<Result<ResultPage, ApiError>> {
        let (tx, rx) = oneshot::channel();
        self.pages
            .lock()
            .unwrap()
            .entry(String::from(key))
            .or_default()
            .push_back(rx);
        tx
    }

    /// Scripts the next reply for the detail of `id`.
    pub fn gate_detail(&self, id: u64) -> oneshot::Sender<Result<DetailRecord, ApiError>> {
        let (tx, rx) = oneshot::channel();
        self.details
            .lock()
            .unwrap()
            .entry(id)
            .or_default()
            .push_back(rx);
        tx
    }

    /// Scripts an already-released page reply.
    pub fn reply_page(&self, key: &str, reply: Result<ResultPage, ApiError>) {
        self.gate_page(key).send(reply).unwrap();
    }

    /// Scripts an already-released detail reply.
    pub fn reply_detail(&self, id: u64, reply: Result<DetailRecord, ApiError>) {
        self.gate_detail(id).send(reply).unwrap();
    }

    /// Returns the keys of every call made so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn take_page(&self, key: String) -> Option<Reply<ResultPage>> {
        let reply = self
            .pages
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(VecDeque::pop_front);
        self.calls.lock().unwrap().push(key);
        reply
    }

    fn take_detail(&self, id: u64) -> Option<Reply<DetailRecord>> {
        let reply = self
            .details
            .lock()
            .unwrap()
            .get_mut(&id)
            .and_then(VecDeque::pop_front);
        self.calls.lock().unwrap().push(format!("detail:{id}"));
        reply
    }
}

async fn await_reply<T>(reply: Option<Reply<T>>) -> Result<T, ApiError> {
    match reply {
        Some(rx) => rx
            .await
            .unwrap_or_else(|_| Err(ApiError::Network(String::from("reply dropped")))),
        None => Err(ApiError::Network(String::from("unscripted call"))),
    }
}

impl MovieApi for MockApi {
    async fn fetch_popular(&self, page: u32) -> Result<ResultPage, ApiError> {
        await_reply(self.take_page(format!("popular:{page}"))).await
    }

    async fn search_by_query(&self, query: &str, page: u32) -> Result<ResultPage, ApiError> {
        await_reply(self.take_page(format!("search:{query}:{page}"))).await
    }

    async fn fetch_detail(&self, id: u64) -> Result<DetailRecord, ApiError> {
        await_reply(self.take_detail(id)).await
    }
}

/// Builds a list item with only id and title set.
pub fn movie(id: u64, title: &str) -> ResultItem {
    ResultItem {
        id,
        title: String::from(title),
        overview_text: String::new(),
        release_date: String::from("1999-10-15"),
        rating_average: 8.433,
        rating_count: 26_280,
        poster_ref: String::new(),
        backdrop_ref: String::new(),
        original_language: String::from("en"),
        popularity: 0.0,
    }
}

/// Builds a page of `items` out of `total_pages`.
pub fn page_of(page: u32, total_pages: u32, items: Vec<ResultItem>) -> ResultPage {
    ResultPage {
        page,
        total_results: u64::try_from(items.len()).unwrap(),
        items,
        total_pages,
    }
}

/// Builds a minimal detail record.
pub fn detail(id: u64, title: &str) -> DetailRecord {
    DetailRecord {
        movie: movie(id, title),
        runtime_minutes: Some(139),
        budget: 0,
        revenue: 0,
        genres: Vec::new(),
        production_companies: Vec::new(),
        status: String::from("Released"),
        tagline: String::new(),
        original_language: String::from("en"),
        homepage: None,
        imdb_id: None,
    }
}
