//! Streaming scanner for the cutlist header index
//!
//! The index is an XML document listing every cutlist known for a video.
//! Only the `id` and `rating` of each `cutlist` record are of interest, so the
//! document is consumed event by event instead of being built into a tree.
//! The character set declared in the XML declaration is honoured while
//! reading.

use std::io::BufRead;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, info};

use crate::domain::errors::DomainError;
use crate::domain::model::CandidateHeader;

const TAG_CUTLIST: &[u8] = b"CUTLIST";
const TAG_ID: &[u8] = b"ID";
const TAG_RATING: &[u8] = b"RATING";

/// Fields of a cutlist record that are collected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    Rating,
}

impl Field {
    fn from_name(name: &[u8]) -> Option<Self> {
        if name.eq_ignore_ascii_case(TAG_ID) {
            Some(Field::Id)
        } else if name.eq_ignore_ascii_case(TAG_RATING) {
            Some(Field::Rating)
        } else {
            None
        }
    }
}

/// Text collected for the cutlist record currently being read
#[derive(Debug, Default)]
struct RecordBuilder {
    id: String,
    rating: String,
}

impl RecordBuilder {
    /// Start a new value for `field`; the last element of a record wins
    fn reset(&mut self, field: Field) {
        match field {
            Field::Id => self.id.clear(),
            Field::Rating => self.rating.clear(),
        }
    }

    fn append(&mut self, field: Field, text: &str) {
        match field {
            Field::Id => self.id.push_str(text),
            Field::Rating => self.rating.push_str(text),
        }
    }

    fn build(self) -> Option<CandidateHeader> {
        let id = self.id.trim();
        if id.is_empty() {
            return None;
        }
        Some(CandidateHeader::new(id, parse_score(&self.rating)))
    }
}

/// Parse a rating; anything that is not a finite number counts as zero
pub fn parse_score(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|score| score.is_finite())
        .unwrap_or(0.0)
}

/// State carried from one XML event to the next
#[derive(Debug, Default)]
struct IndexScanner {
    open_field: Option<Field>,
    record: Option<RecordBuilder>,
    depth: usize,
    headers: Vec<CandidateHeader>,
}

impl IndexScanner {
    fn start_element(&mut self, name: &[u8]) {
        self.depth += 1;

        if name.eq_ignore_ascii_case(TAG_CUTLIST) {
            self.record = Some(RecordBuilder::default());
            self.open_field = None;
        } else if let Some(field) = Field::from_name(name) {
            if let Some(record) = self.record.as_mut() {
                record.reset(field);
            }
            self.open_field = Some(field);
        }
    }

    fn end_element(&mut self, name: &[u8]) {
        self.depth = self.depth.saturating_sub(1);

        if let Some(field) = Field::from_name(name) {
            if self.open_field == Some(field) {
                self.open_field = None;
            }
        }

        if name.eq_ignore_ascii_case(TAG_CUTLIST) {
            self.open_field = None;
            match self.record.take().and_then(RecordBuilder::build) {
                Some(header) => {
                    info!(id = %header.id, score = header.score, "Found cutlist");
                    self.headers.push(header);
                }
                None => debug!("Skipping cutlist record without id"),
            }
        }
    }

    fn text(&mut self, text: &str) {
        if let (Some(field), Some(record)) = (self.open_field, self.record.as_mut()) {
            record.append(field, text);
        }
    }

    fn finish(self) -> Result<Vec<CandidateHeader>, DomainError> {
        if self.depth > 0 {
            return Err(DomainError::Structure(format!(
                "header index ended with {} unclosed element(s)",
                self.depth
            )));
        }
        Ok(self.headers)
    }
}

/// Scan a header index document and return its candidates in document order.
///
/// Any XML error, or an end of input before the document is complete, fails
/// the whole scan; records read before the error are not returned.
pub fn parse_header_index<R: BufRead>(input: R) -> Result<Vec<CandidateHeader>, DomainError> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut scanner = IndexScanner::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => scanner.start_element(e.local_name().as_ref()),
            Ok(Event::End(e)) => scanner.end_element(e.local_name().as_ref()),
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(|err| {
                    DomainError::Structure(format!(
                        "undecodable text at position {}: {}",
                        reader.buffer_position(),
                        err
                    ))
                })?;
                scanner.text(&text);
            }
            Ok(Event::CData(e)) => {
                let raw = e.into_inner();
                let text = reader.decoder().decode(&raw).map_err(|err| {
                    DomainError::Structure(format!(
                        "undecodable CDATA at position {}: {}",
                        reader.buffer_position(),
                        err
                    ))
                })?;
                scanner.text(&text);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                return Err(DomainError::Structure(format!(
                    "malformed header index at position {}: {}",
                    reader.buffer_position(),
                    err
                )));
            }
        }
        buf.clear();
    }

    scanner.finish()
}
