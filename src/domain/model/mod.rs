// Domain models - Core types and data structures

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Header record of one cutlist as listed by the repository index
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateHeader {
    pub id: String,
    pub score: f64,
}

impl CandidateHeader {
    /// Create a new candidate header
    pub fn new(id: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            score,
        }
    }
}

/// One region of the recording to remove.
///
/// Times are in seconds, frames are frame numbers/counts. A representation
/// that is absent in the cutlist file is left at zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub time_start: f64,
    pub time_duration: f64,
    pub frame_start: u64,
    pub frame_duration: u64,
}

impl Segment {
    /// Create a time-based segment
    pub fn from_time(time_start: f64, time_duration: f64) -> Self {
        Self {
            time_start,
            time_duration,
            ..Self::default()
        }
    }

    /// Create a frame-based segment
    pub fn from_frames(frame_start: u64, frame_duration: u64) -> Self {
        Self {
            frame_start,
            frame_duration,
            ..Self::default()
        }
    }

    /// True if start or duration time is set
    pub fn carries_time(&self) -> bool {
        self.time_start != 0.0 || self.time_duration != 0.0
    }

    /// True if start or duration frame is set
    pub fn carries_frames(&self) -> bool {
        self.frame_start != 0 || self.frame_duration != 0
    }

    /// End of the segment in seconds
    pub fn time_end(&self) -> f64 {
        self.time_start + self.time_duration
    }
}

/// A validated list of cuts for one recording
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cutlist {
    pub id: String,
    pub application: String,
    pub aspect_ratio: String,
    pub frames_per_second: f64,
    pub time_based: bool,
    pub frame_based: bool,
    pub segments: Vec<Segment>,
}

impl Cutlist {
    /// Create an empty cutlist for a candidate id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// A cutlist is only usable with at least one segment
    pub fn is_valid(&self) -> bool {
        !self.segments.is_empty()
    }

    /// Sum of all segment durations in seconds (time-based cutlists only)
    pub fn total_cut_seconds(&self) -> Option<f64> {
        if !self.time_based {
            return None;
        }
        Some(self.segments.iter().map(|s| s.time_duration).sum())
    }

    /// Sum of all segment durations in frames (frame-based cutlists only)
    pub fn total_cut_frames(&self) -> Option<u64> {
        if !self.frame_based {
            return None;
        }
        Some(self.segments.iter().map(|s| s.frame_duration).sum())
    }
}

impl fmt::Display for Cutlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let basis = match (self.time_based, self.frame_based) {
            (true, true) => "time+frames",
            (true, false) => "time",
            (false, true) => "frames",
            (false, false) => "none",
        };
        write!(
            f,
            "cutlist {} ({} cuts, {}-based, {} @ {} fps, {})",
            self.id,
            self.segments.len(),
            basis,
            self.aspect_ratio,
            self.frames_per_second,
            self.application
        )
    }
}

/// Result of trying a single ranked candidate
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateAttempt {
    /// The candidate produced a fully validated cutlist
    Valid(Cutlist),
    /// The candidate failed; the reason is kept for logging
    Skip(DomainError),
}

/// Outcome of one retrieval, keyed by the video it was made for
#[derive(Debug, Clone)]
pub struct RetrievalOutcome {
    pub video_key: String,
    pub result: Result<Cutlist, DomainError>,
}

impl RetrievalOutcome {
    /// Create a successful outcome
    pub fn success(video_key: impl Into<String>, cutlist: Cutlist) -> Self {
        Self {
            video_key: video_key.into(),
            result: Ok(cutlist),
        }
    }

    /// Create a failed outcome
    pub fn failure(video_key: impl Into<String>, error: DomainError) -> Self {
        Self {
            video_key: video_key.into(),
            result: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Borrow the cutlist if the retrieval succeeded
    pub fn cutlist(&self) -> Option<&Cutlist> {
        self.result.as_ref().ok()
    }
}
