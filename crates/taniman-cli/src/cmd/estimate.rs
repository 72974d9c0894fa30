//! Standalone harvest countdown, no session needed.

use crate::output::print_json;
use crate::render::veg_emoji;
use chrono::NaiveDate;
use serde::Serialize;
use taniman_core::harvest::{self, Bucket, HarvestEstimate, HarvestTable};

#[derive(Serialize)]
struct EstimateReport<'a> {
    vegetable: &'a str,
    planted: NaiveDate,
    today: NaiveDate,
    #[serde(flatten)]
    estimate: HarvestEstimate,
}

pub fn run(
    vegetable: &str,
    planted: NaiveDate,
    today: NaiveDate,
    json: bool,
) -> anyhow::Result<()> {
    let table = HarvestTable::builtin();
    let estimate = harvest::estimate(&table, vegetable, planted, today);

    if json {
        return print_json(&EstimateReport {
            vegetable,
            planted,
            today,
            estimate,
        });
    }

    println!("{} {vegetable}", veg_emoji(vegetable));
    println!("Planted:        {planted}");
    println!(
        "Harvest window: {} – {}",
        estimate.range_start, estimate.range_end
    );
    match estimate.bucket {
        Bucket::Ready => println!("Status:         ✅ ready to harvest"),
        Bucket::Past => println!("Status:         ⚠️ past the expected window"),
        Bucket::Soon => println!("Status:         ⏳ about {} days to go", estimate.days_left),
        Bucket::Later => println!("Status:         🗓 {} days to go", estimate.days_left),
    }
    Ok(())
}
