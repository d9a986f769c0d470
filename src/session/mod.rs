//! Fetch lifecycle for one wizard run: loading, then success or error.
//!
//! Every fetch gets a request id. Only the result for the latest id is applied,
//! so a slow earlier request cannot overwrite a newer one.

use tracing::{debug, warn};

use crate::errors::{SuggestError, GENERIC_FETCH_MESSAGE};
use crate::fetch::SuggestionFetcher;
use crate::form::AnswerSet;
use crate::wire::Suggestions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestId(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Success(Suggestions<T>),
    Error(String),
}

#[derive(Debug)]
pub struct SuggestionSession<T> {
    latest: u64,
    state: FetchState<T>,
}

impl<T> Default for SuggestionSession<T> {
    fn default() -> Self {
        Self { latest: 0, state: FetchState::Loading }
    }
}

/// Text shown to the user for a failed fetch.
pub fn user_message(err: &SuggestError) -> String {
    let msg = err.to_string();
    if msg.trim().is_empty() {
        GENERIC_FETCH_MESSAGE.to_string()
    } else {
        msg
    }
}

impl<T> SuggestionSession<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn into_state(self) -> FetchState<T> {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Loading)
    }

    /// Enter the loading state for a new request.
    pub fn begin(&mut self) -> RequestId {
        self.latest += 1;
        self.state = FetchState::Loading;
        debug!(request = self.latest, "fetch started");
        RequestId(self.latest)
    }

    /// Apply a finished fetch. Returns `false` when `id` has been superseded.
    pub fn complete(&mut self, id: RequestId, result: Result<Suggestions<T>, SuggestError>) -> bool {
        if id.0 != self.latest {
            debug!(request = id.0, latest = self.latest, "discarding stale fetch result");
            return false;
        }
        self.state = match result {
            Ok(data) => FetchState::Success(data),
            Err(e) => {
                warn!(error = %e, "suggestion fetch failed");
                FetchState::Error(user_message(&e))
            }
        };
        true
    }

    /// Drop any in-flight request and go back to loading.
    pub fn invalidate(&mut self) {
        self.latest += 1;
        self.state = FetchState::Loading;
    }

    pub async fn run<F>(&mut self, fetcher: &F, answers: &AnswerSet) -> &FetchState<T>
    where
        F: SuggestionFetcher<Item = T> + ?Sized,
    {
        let id = self.begin();
        let result = fetcher.fetch(answers).await;
        self.complete(id, result);
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::Source;

    fn data(n: usize) -> Suggestions<String> {
        Suggestions { suggestions: (0..n).map(|i| i.to_string()).collect(), sources: vec![] }
    }

    #[test]
    fn starts_loading() {
        let s: SuggestionSession<String> = SuggestionSession::new();
        assert!(s.is_loading());
    }

    #[test]
    fn success_and_error_transitions() {
        let mut s = SuggestionSession::new();
        let id = s.begin();
        assert!(s.complete(id, Ok(data(2))));
        assert_eq!(s.state(), &FetchState::Success(data(2)));

        let id = s.begin();
        assert!(s.is_loading());
        s.complete(id, Err(SuggestError::EmptyResponse));
        assert_eq!(s.state(), &FetchState::Error("the model returned an empty response".into()));
    }

    #[test]
    fn stale_result_is_discarded() {
        let mut s = SuggestionSession::new();
        let first = s.begin();
        let second = s.begin();
        assert!(s.complete(second, Ok(data(1))));
        assert!(!s.complete(first, Ok(data(5))));
        assert_eq!(s.state(), &FetchState::Success(data(1)));
    }

    #[test]
    fn invalidate_drops_in_flight() {
        let mut s = SuggestionSession::new();
        let id = s.begin();
        s.invalidate();
        assert!(!s.complete(id, Ok(data(3))));
        assert!(s.is_loading());
    }

    #[test]
    fn empty_provider_message_falls_back() {
        let e = SuggestError::Provider { status: 500, message: String::new() };
        assert_eq!(user_message(&e), GENERIC_FETCH_MESSAGE);
        let e = SuggestError::Provider { status: 403, message: "API key not valid.".into() };
        assert_eq!(user_message(&e), "API key not valid.");
    }

    #[test]
    fn sources_survive_success() {
        let mut s = SuggestionSession::new();
        let id = s.begin();
        let d = Suggestions {
            suggestions: vec!["x".to_string()],
            sources: vec![Source { uri: "https://a.example".into(), title: None }],
        };
        s.complete(id, Ok(d.clone()));
        assert_eq!(s.state(), &FetchState::Success(d));
    }
}
