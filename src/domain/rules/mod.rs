// Domain rules - Ranking and consistency policies

use crate::domain::errors::*;
use crate::domain::model::*;

/// Business rules for ordering the candidates of one video
pub struct CandidateRanker;

impl CandidateRanker {
    /// Order candidate ids by descending score.
    ///
    /// The sort is stable: candidates with equal scores keep the order in
    /// which the index listed them. An empty result means no cutlist exists.
    pub fn rank(headers: &[CandidateHeader]) -> Vec<String> {
        let mut ordered: Vec<&CandidateHeader> = headers.iter().collect();
        ordered.sort_by(|a, b| b.score.total_cmp(&a.score));
        ordered.into_iter().map(|h| h.id.clone()).collect()
    }
}

/// Representation fixed by the first cut of a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CutMode {
    pub time_based: bool,
    pub frame_based: bool,
}

impl CutMode {
    /// Mode of a cutlist whose first cut declares a start time and/or a
    /// start frame. A declared value of zero still counts.
    pub fn new(time_based: bool, frame_based: bool) -> Self {
        Self {
            time_based,
            frame_based,
        }
    }

    /// Check one segment against this mode
    pub fn check(&self, index: usize, segment: &Segment) -> Result<(), DomainError> {
        if self.frame_based && !segment.carries_frames() {
            return Err(DomainError::Validation(format!(
                "cut {} is missing frame information",
                index
            )));
        }
        if self.time_based && !segment.carries_time() {
            return Err(DomainError::Validation(format!(
                "cut {} is missing time information",
                index
            )));
        }
        if !segment.carries_time() && !segment.carries_frames() {
            return Err(DomainError::Validation(format!(
                "cut {} has neither time nor frame information",
                index
            )));
        }
        Ok(())
    }
}

/// Accumulates the segments of one candidate and enforces consistency.
///
/// The first rejected segment clears everything collected so far, so a
/// candidate is either accepted whole or not at all.
#[derive(Debug)]
pub struct CutlistAssembler {
    cutlist: Cutlist,
    mode: CutMode,
}

impl CutlistAssembler {
    /// Start assembling a cutlist with its general metadata filled in and
    /// the mode declared by its first cut
    pub fn new(cutlist: Cutlist, mode: CutMode) -> Self {
        Self {
            cutlist: Cutlist {
                segments: Vec::new(),
                time_based: mode.time_based,
                frame_based: mode.frame_based,
                ..cutlist
            },
            mode,
        }
    }

    /// Add the next segment, in cut index order
    pub fn push(&mut self, segment: Segment) -> Result<(), DomainError> {
        let index = self.cutlist.segments.len();

        if let Err(e) = self.mode.check(index, &segment) {
            self.discard();
            return Err(e);
        }

        self.cutlist.segments.push(segment);
        Ok(())
    }

    /// Drop every segment collected so far
    pub fn discard(&mut self) {
        self.cutlist.segments.clear();
    }

    /// Finish the cutlist; zero accepted segments is a validation failure
    pub fn finish(self) -> Result<Cutlist, DomainError> {
        if !self.cutlist.is_valid() {
            return Err(DomainError::Validation(format!(
                "cutlist {} has no usable cuts",
                self.cutlist.id
            )));
        }
        Ok(self.cutlist)
    }
}

#[cfg(test)]
mod tests;
