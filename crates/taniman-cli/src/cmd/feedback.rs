//! Record a feedback survey entry to the local store.

use anyhow::Context;
use chrono::Utc;
use std::path::Path;
use taniman_core::feedback::{self, FeedbackEntry, Rating, Recommend};
use taniman_core::messages;
use taniman_core::types::{Language, Mode};

#[allow(clippy::too_many_arguments)]
pub fn run(
    store: &Path,
    language: Language,
    rating: &str,
    what_worked: &str,
    what_to_improve: &str,
    recommend: &str,
    contact: Option<&str>,
    location: Option<&str>,
    mode: Option<&str>,
) -> anyhow::Result<()> {
    let rating: Rating = rating
        .parse()
        .with_context(|| format!("invalid rating '{rating}' (not_useful, somewhat_useful, useful, very_useful, excellent)"))?;
    let recommend = parse_recommend(recommend)?;
    let mode: Option<Mode> = match mode {
        Some(raw) => Some(raw.parse().with_context(|| format!("invalid mode '{raw}'"))?),
        None => None,
    };

    let entry = FeedbackEntry {
        timestamp: Utc::now(),
        rating,
        what_worked: what_worked.to_string(),
        what_to_improve: what_to_improve.to_string(),
        recommend,
        contact: contact.map(str::to_string),
        location: location.map(str::to_string),
        mode,
    };
    if let Err(err) = feedback::record(store, entry) {
        tracing::warn!(error = %err, "feedback store write failed");
        anyhow::bail!("{}", messages::feedback_failed(language));
    }

    println!("{}", messages::feedback_thanks(language));
    Ok(())
}

fn parse_recommend(raw: &str) -> anyhow::Result<Recommend> {
    match raw.to_lowercase().as_str() {
        "yes" => Ok(Recommend::Yes),
        "maybe" => Ok(Recommend::Maybe),
        "no" => Ok(Recommend::No),
        _ => anyhow::bail!("invalid recommend '{raw}' (yes, maybe, no)"),
    }
}
