//! Command implementations

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::app::container::AppContainer;
use crate::cli::args::{CheckArgs, RetrieveArgs};
use crate::domain::model::{Cutlist, RetrievalOutcome};

/// One line of `retrieve --json` output
#[derive(Debug, Serialize)]
pub struct RetrievalReport<'a> {
    pub video_key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutlist: Option<&'a Cutlist>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> From<&'a RetrievalOutcome> for RetrievalReport<'a> {
    fn from(outcome: &'a RetrievalOutcome) -> Self {
        Self {
            video_key: &outcome.video_key,
            cutlist: outcome.cutlist(),
            error: outcome.result.as_ref().err().map(ToString::to_string),
        }
    }
}

/// Execute the retrieve command.
///
/// Every key is processed; the command fails when at least one key
/// yielded no cutlist.
pub async fn retrieve(container: &dyn AppContainer, args: RetrieveArgs) -> Result<()> {
    let interactor = container.retrieve_interactor();
    let mut failed = 0usize;

    for key in &args.keys {
        info!(key = %key, "Retrieving cutlist");
        let outcome = interactor.retrieve(key).await;
        if !outcome.is_success() {
            failed += 1;
        }

        if args.json {
            let json = serde_json::to_string(&RetrievalReport::from(&outcome))
                .context("Failed to serialize retrieval result")?;
            println!("{}", json);
        } else {
            print_outcome(&outcome);
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} recordings have no usable cutlist", failed, args.keys.len());
    }
    Ok(())
}

/// Execute the check command; returns whether cutlists are published
pub async fn check(container: &dyn AppContainer, args: CheckArgs) -> Result<bool> {
    let available = container.retrieve_interactor().has_cutlists(&args.key).await;
    if available {
        println!("{}: cutlists available", args.key);
    } else {
        println!("{}: no cutlists", args.key);
    }
    Ok(available)
}

fn print_outcome(outcome: &RetrievalOutcome) {
    match &outcome.result {
        Ok(cutlist) => {
            println!("{}: {}", outcome.video_key, cutlist);
            for (index, segment) in cutlist.segments.iter().enumerate() {
                if segment.carries_time() {
                    println!(
                        "  cut {}: {:.3}s +{:.3}s (until {:.3}s)",
                        index,
                        segment.time_start,
                        segment.time_duration,
                        segment.time_end()
                    );
                } else {
                    println!(
                        "  cut {}: frame {} +{}",
                        index, segment.frame_start, segment.frame_duration
                    );
                }
            }
            if let Some(seconds) = cutlist.total_cut_seconds() {
                println!("  total: {:.3}s", seconds);
            }
            if let Some(frames) = cutlist.total_cut_frames() {
                println!("  total: {} frames", frames);
            }
        }
        Err(error) => println!("{}: {}", outcome.video_key, error),
    }
}
