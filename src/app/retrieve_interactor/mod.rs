// Retrieve interactor - Orchestrates the cutlist retrieval use case

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::app::progress_ticker::{ProgressTicker, DEFAULT_TICK_INTERVAL};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::parsers::{parse_cutlist_file, parse_header_index};
use crate::ports::*;

/// Interactor for the cutlist retrieval use case
pub struct RetrieveInteractor {
    source_port: Arc<dyn CutlistSourcePort>,
    progress_port: Arc<dyn ProgressPort>,
    tick_interval: Duration,
}

impl RetrieveInteractor {
    /// Create new retrieve interactor with injected ports
    pub fn new(source_port: Arc<dyn CutlistSourcePort>, progress_port: Arc<dyn ProgressPort>) -> Self {
        Self {
            source_port,
            progress_port,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }

    /// Use a different progress tick interval
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        if tick_interval.is_zero() {
            warn!("Ignoring zero progress tick interval, keeping {:?}", self.tick_interval);
            return self;
        }
        self.tick_interval = tick_interval;
        self
    }

    /// Retrieve the best valid cutlist for a video.
    ///
    /// Candidates are tried once each, best rated first; the first one that
    /// validates is returned. Progress is ticked until the retrieval ends.
    pub async fn retrieve(&self, video_key: &str) -> RetrievalOutcome {
        let ticker = ProgressTicker::start(
            Arc::clone(&self.progress_port),
            video_key,
            self.tick_interval,
        );

        let result = self.select_cutlist(video_key).await;
        ticker.stop().await;

        match &result {
            Ok(cutlist) => info!(key = %video_key, "Selected {}", cutlist),
            Err(e) => warn!(key = %video_key, "{}", e),
        }

        RetrievalOutcome {
            video_key: video_key.to_string(),
            result,
        }
    }

    /// Check whether the repository lists any cutlist for a video.
    ///
    /// Only the header index is fetched.
    pub async fn has_cutlists(&self, video_key: &str) -> bool {
        !self.load_ranked_candidates(video_key).await.is_empty()
    }

    /// Fetch the header index and rank its candidates.
    ///
    /// Transport and parse errors are logged and yield an empty list.
    pub async fn load_ranked_candidates(&self, video_key: &str) -> Vec<String> {
        let headers = match self.load_headers(video_key).await {
            Ok(headers) => headers,
            Err(e) => {
                error!(key = %video_key, "Error while reading cutlist headers: {}", e);
                Vec::new()
            }
        };

        let ids = CandidateRanker::rank(&headers);
        if ids.is_empty() {
            warn!(key = %video_key, "No cutlist header could be loaded");
        }
        ids
    }

    /// Try the ranked candidates in order and return the first valid cutlist
    pub async fn load_cutlist_details(&self, video_key: &str, ids: &[String]) -> Option<Cutlist> {
        for id in ids {
            match self.try_candidate(id).await {
                CandidateAttempt::Valid(cutlist) => return Some(cutlist),
                CandidateAttempt::Skip(DomainError::Transport(reason)) => {
                    warn!(key = %video_key, id = %id, "Cutlist could not be fetched: {}", reason)
                }
                CandidateAttempt::Skip(reason) => {
                    error!(key = %video_key, id = %id, "Cutlist rejected: {}", reason)
                }
            }
        }
        None
    }

    /// Fetch and validate a single candidate
    pub async fn try_candidate(&self, cutlist_id: &str) -> CandidateAttempt {
        let content = match self.source_port.fetch_cutlist_file(cutlist_id).await {
            Ok(content) => content,
            Err(e) => return CandidateAttempt::Skip(e),
        };

        match parse_cutlist_file(cutlist_id, &content) {
            Ok(cutlist) => CandidateAttempt::Valid(cutlist),
            Err(e) => CandidateAttempt::Skip(e),
        }
    }

    async fn select_cutlist(&self, video_key: &str) -> Result<Cutlist, DomainError> {
        let ids = self.load_ranked_candidates(video_key).await;
        if ids.is_empty() {
            return Err(DomainError::NoCutlistHeader {
                video_key: video_key.to_string(),
            });
        }

        self.load_cutlist_details(video_key, &ids)
            .await
            .ok_or_else(|| DomainError::NoCutlistRetrieved {
                video_key: video_key.to_string(),
            })
    }

    async fn load_headers(&self, video_key: &str) -> Result<Vec<CandidateHeader>, DomainError> {
        let body = self.source_port.fetch_header_index(video_key).await?;
        parse_header_index(body.as_slice())
    }
}
