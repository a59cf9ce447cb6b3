//! Parser for cutlist detail files
//!
//! A cutlist file is an INI document with a `[General]` section and one
//! `[CutN]` section per cut. Section and key names are case-insensitive.

use std::str::FromStr;

use ini::{Ini, ParseOption, Properties};
use tracing::warn;

use crate::domain::errors::DomainError;
use crate::domain::model::{Cutlist, Segment};
use crate::domain::rules::{CutMode, CutlistAssembler};

const SECTION_GENERAL: &str = "general";
const KEY_NUM_CUTS: &str = "noofcuts";
const KEY_RATIO: &str = "displayaspectratio";
const KEY_APP: &str = "intendedcutapplicationname";
const KEY_FPS: &str = "framespersecond";
const SECTION_CUT_PREFIX: &str = "cut";
const KEY_TIME_START: &str = "start";
const KEY_TIME_DUR: &str = "duration";
const KEY_FRAME_START: &str = "startframe";
const KEY_FRAME_DUR: &str = "durationframes";

/// Name of the section describing cut `index`
pub fn cut_section_name(index: usize) -> String {
    format!("{}{}", SECTION_CUT_PREFIX, index)
}

/// Parse and validate the cutlist file of candidate `id`.
///
/// Missing optional metadata is logged and left empty. A missing or invalid
/// cut count, a missing cut section or an inconsistent cut rejects the whole
/// file.
pub fn parse_cutlist_file(id: &str, content: &str) -> Result<Cutlist, DomainError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let options = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    let document = Ini::load_from_str_opt(content, options).map_err(|e| {
        DomainError::Structure(format!("cutlist {} could not be opened: {}", id, e))
    })?;

    let general = document.section(Some(SECTION_GENERAL)).ok_or_else(|| {
        DomainError::Structure(format!(
            "cutlist {} does not have section '{}'",
            id, SECTION_GENERAL
        ))
    })?;

    let mut cutlist = Cutlist::new(id);
    if let Some(ratio) = optional_key(general, id, KEY_RATIO) {
        cutlist.aspect_ratio = ratio.to_string();
    }
    if let Some(fps) = optional_key(general, id, KEY_FPS) {
        cutlist.frames_per_second = fps.trim().parse::<f64>().unwrap_or_else(|_| {
            warn!(id = %id, value = %fps, "Cutlist has an unreadable frame rate");
            0.0
        });
    }
    if let Some(app) = optional_key(general, id, KEY_APP) {
        cutlist.application = app.to_string();
    }

    let num_cuts = cut_count(general, id)?;
    let mode = match num_cuts {
        0 => CutMode::default(),
        _ => document
            .section(Some(cut_section_name(0).as_str()))
            .map(declared_mode)
            .unwrap_or_default(),
    };

    let mut assembler = CutlistAssembler::new(cutlist, mode);
    for index in 0..num_cuts {
        let name = cut_section_name(index);
        let section = match document.section(Some(name.as_str())) {
            Some(section) => section,
            None => {
                assembler.discard();
                return Err(DomainError::Structure(format!(
                    "cutlist {} does not have section '{}'",
                    id, name
                )));
            }
        };

        assembler.push(read_segment(section))?;
    }

    assembler.finish()
}

/// Read an optional key, warning when it is absent
fn optional_key<'a>(section: &'a Properties, id: &str, key: &str) -> Option<&'a str> {
    let value = section.get(key);
    if value.is_none() {
        warn!(id = %id, key = key, "Cutlist does not have key");
    }
    value
}

/// Read the required number of cuts
fn cut_count(general: &Properties, id: &str) -> Result<usize, DomainError> {
    let raw = general.get(KEY_NUM_CUTS).ok_or_else(|| {
        DomainError::Structure(format!(
            "cutlist {} does not have key '{}'",
            id, KEY_NUM_CUTS
        ))
    })?;
    raw.trim().parse::<usize>().map_err(|_| {
        DomainError::Structure(format!(
            "cutlist {} has an invalid '{}' value: {}",
            id, KEY_NUM_CUTS, raw
        ))
    })
}

/// Mode declared by the first cut: a start key fixes a representation even
/// when its value is zero
fn declared_mode(first_cut: &Properties) -> CutMode {
    CutMode::new(
        first_cut.get(KEY_TIME_START).is_some(),
        first_cut.get(KEY_FRAME_START).is_some(),
    )
}

/// Read one cut; absent or unreadable values are zero
fn read_segment(section: &Properties) -> Segment {
    Segment {
        time_start: seconds_or_zero(section.get(KEY_TIME_START)),
        time_duration: seconds_or_zero(section.get(KEY_TIME_DUR)),
        frame_start: value_or_zero(section.get(KEY_FRAME_START)),
        frame_duration: value_or_zero(section.get(KEY_FRAME_DUR)),
    }
}

fn value_or_zero<T: FromStr + Default>(value: Option<&str>) -> T {
    value
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or_default()
}

fn seconds_or_zero(value: Option<&str>) -> f64 {
    let seconds: f64 = value_or_zero(value);
    if seconds.is_finite() {
        seconds
    } else {
        0.0
    }
}
