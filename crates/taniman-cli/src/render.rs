//! Plain-terminal renderer for replayed conversations.

use crate::output::print_table;
use taniman_core::advisor::{PreparationResult, ReplantingResult, ResearchResult};
use taniman_core::log::Role;
use taniman_core::render::{Renderer, TrackerRow};
use taniman_core::schedule::{month_abbrev, ScheduleResult};

// ---------------------------------------------------------------------------
// Emoji lookup
// ---------------------------------------------------------------------------

const VEGETABLE_EMOJI: &[(&str, &str)] = &[
    ("tomato", "🍅"),
    ("carrot", "🥕"),
    ("spinach", "🥬"),
    ("eggplant", "🍆"),
    ("pepper", "🫑"),
    ("lettuce", "🥗"),
    ("cucumber", "🥒"),
    ("potato", "🥔"),
    ("onion", "🧅"),
    ("garlic", "🧄"),
    ("corn", "🌽"),
    ("broccoli", "🥦"),
    ("cabbage", "🥬"),
    ("pumpkin", "🎃"),
    ("radish", "🌱"),
    ("beans", "🫘"),
    ("peas", "🌿"),
    ("chili", "🌶️"),
    ("ginger", "🫚"),
    ("sweet potato", "🍠"),
    ("kangkong", "🥬"),
    ("ampalaya", "🌿"),
    ("okra", "🌿"),
    ("sitaw", "🫘"),
    ("pechay", "🥬"),
    ("kamote", "🍠"),
    ("malunggay", "🌿"),
    ("talong", "🍆"),
    ("sibuyas", "🧅"),
    ("bawang", "🧄"),
    ("luya", "🫚"),
    ("sili", "🌶️"),
    ("patola", "🌿"),
    ("upo", "🌿"),
    ("kalabasa", "🎃"),
    ("sayote", "🌿"),
    ("bataw", "🫘"),
    ("mungo", "🫘"),
    ("mais", "🌽"),
    ("kamatis", "🍅"),
];

/// Exact match first, then partial, then a generic sprout.
pub fn veg_emoji(name: &str) -> &'static str {
    let lower = name.trim().to_lowercase();
    if let Some((_, emoji)) = VEGETABLE_EMOJI.iter().find(|(key, _)| *key == lower) {
        return emoji;
    }
    if let Some((_, emoji)) = VEGETABLE_EMOJI.iter().find(|(key, _)| lower.contains(key)) {
        return emoji;
    }
    "🌱"
}

// ---------------------------------------------------------------------------
// TextRenderer
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn message(&mut self, role: Role, text: &str) {
        match role {
            Role::User => println!("you: {text}"),
            Role::Assistant => println!("🌱 {text}"),
        }
    }

    fn research_cards(&mut self, research: &ResearchResult) {
        if !research.summary.is_empty() {
            println!("🌱 {}", research.summary);
        }
        for rec in &research.recommendations {
            println!("  {} {}", veg_emoji(&rec.vegetable), rec.vegetable);
            println!("     {}", rec.reason);
            if !rec.pot_size.is_empty() {
                println!("     pot: {}", rec.pot_size);
            }
        }
        println!();
    }

    fn schedule_chart(&mut self, schedule: &ScheduleResult) {
        // Text gantt: one plant row and one harvest row per vegetable,
        // twelve month cells each.
        let months: String = (1..=12).map(|m| format!("{:>4}", month_abbrev(m))).collect();
        println!("{:<22}{months}", "");
        for entry in &schedule.entries {
            let plant: String = (1..=12)
                .map(|m| {
                    if entry.plant_months().contains(&m) {
                        "  ██"
                    } else {
                        "   ·"
                    }
                })
                .collect();
            let harvest: String = (1..=12)
                .map(|m| {
                    if entry.harvest_months().contains(&m) {
                        "  ▓▓"
                    } else {
                        "   ·"
                    }
                })
                .collect();
            let label = format!("{} {}", veg_emoji(&entry.vegetable), entry.vegetable);
            println!("{label:<20} 🌱{plant}");
            println!("{:<20} 🌾{harvest}", "");
        }
        println!();
    }

    fn schedule_table(&mut self, schedule: &ScheduleResult) {
        let rows = schedule
            .entries
            .iter()
            .map(|e| {
                vec![
                    e.vegetable.clone(),
                    e.plant_window_label(),
                    e.harvest_window_label(),
                    e.companion_plant.clone(),
                ]
            })
            .collect();
        print_table(&["Vegetable", "Plant", "Harvest", "Companion"], rows);
        if !schedule.notes.is_empty() {
            println!("{}", schedule.notes);
        }
        println!();
    }

    fn preparation_cards(&mut self, preparation: &PreparationResult) {
        for item in &preparation.items {
            println!("  {} {}", veg_emoji(&item.vegetable), item.vegetable);
            println!("     lead time: {}", item.prep_lead_time);
            if item.can_grow_from_scraps {
                println!("     from scraps: {}", item.scraps_how);
            }
            if !item.special_tips.is_empty() {
                println!("     tip: {}", item.special_tips);
            }
        }
        if !preparation.notes.is_empty() {
            println!("🌱 {}", preparation.notes);
        }
        println!();
    }

    fn harvest_tracker(&mut self, rows: &[TrackerRow]) {
        let table_rows = rows
            .iter()
            .map(|row| {
                let est = &row.estimate;
                let status = match est.bucket {
                    taniman_core::harvest::Bucket::Ready => "✅ ready".to_string(),
                    taniman_core::harvest::Bucket::Past => "⚠️ past window".to_string(),
                    taniman_core::harvest::Bucket::Soon => {
                        format!("⏳ {} days", est.days_left)
                    }
                    taniman_core::harvest::Bucket::Later => {
                        format!("🗓 {} days", est.days_left)
                    }
                };
                vec![
                    format!("{} {}", veg_emoji(&row.vegetable), row.vegetable),
                    row.planted.to_string(),
                    format!("{} – {}", est.range_start, est.range_end),
                    status,
                ]
            })
            .collect();
        print_table(&["Vegetable", "Planted", "Harvest window", "Status"], table_rows);
        println!();
    }

    fn replanting_cards(&mut self, replanting: &ReplantingResult) {
        for rec in &replanting.recommendations {
            println!("  {} {}", veg_emoji(&rec.vegetable), rec.vegetable);
            println!("     {}", rec.reason);
            println!("     plant: {}", rec.best_time_to_plant);
            if !rec.tip.is_empty() {
                println!("     tip: {}", rec.tip);
            }
        }
        if !replanting.soil_rest_advice.is_empty() {
            println!("🌱 {}", replanting.soil_rest_advice);
        }
        println!();
    }
}
