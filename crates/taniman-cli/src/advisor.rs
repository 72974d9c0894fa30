//! Offline advisor backed by a curated knowledge base of common Philippine
//! home-garden vegetables. Deterministic: the same context always yields
//! the same advice, which keeps the chat loop testable.

use taniman_core::advisor::{
    Advisor, AdvisorContext, PreparationItem, PreparationResult, ReplantingResult,
    ReplantingSuggestion, ResearchResult, VegetableRecommendation,
};
use taniman_core::schedule::{ScheduleResult, VegetableSchedule};
use taniman_core::types::{Language, PlantingMedium};
use taniman_core::Result;

// ---------------------------------------------------------------------------
// Knowledge base
// ---------------------------------------------------------------------------

struct VegProfile {
    name: &'static str,
    reason_en: &'static str,
    reason_tl: &'static str,
    /// Empty when the vegetable does not suit containers.
    pot_size: &'static str,
    plant_start: u32,
    plant_end: u32,
    harvest_start: u32,
    harvest_end: u32,
    companion: &'static str,
    /// How to grow from food scraps, when possible.
    scraps: Option<&'static str>,
    prep_lead_time: &'static str,
    tips: &'static str,
}

const KNOWLEDGE: &[VegProfile] = &[
    VegProfile {
        name: "kangkong",
        reason_en: "Fast-growing leafy green that thrives in heat and tolerates heavy rain.",
        reason_tl: "Mabilis tumubo at matibay sa init at malakas na ulan.",
        pot_size: "20 cm wide, shallow",
        plant_start: 1,
        plant_end: 12,
        harvest_start: 2,
        harvest_end: 12,
        companion: "okra",
        scraps: Some("Root 10 cm stem cuttings in water, transplant after a week."),
        prep_lead_time: "1 week before planting",
        tips: "Keep the soil constantly moist.",
    },
    VegProfile {
        name: "pechay",
        reason_en: "Quick harvest in about a month, good for succession planting.",
        reason_tl: "Maaani sa loob ng isang buwan, maganda sa sunud-sunod na tanim.",
        pot_size: "15 cm deep container",
        plant_start: 10,
        plant_end: 2,
        harvest_start: 11,
        harvest_end: 3,
        companion: "onion",
        scraps: Some("Replant the base in shallow water until new leaves show."),
        prep_lead_time: "1-2 weeks before planting",
        tips: "Afternoon shade helps in the hottest months.",
    },
    VegProfile {
        name: "kamatis",
        reason_en: "Reliable producer in the dry season with staking.",
        reason_tl: "Maaasahan sa tag-araw kapag may tukod.",
        pot_size: "40 cm deep, 1 plant per pot",
        plant_start: 10,
        plant_end: 1,
        harvest_start: 12,
        harvest_end: 4,
        companion: "basil",
        scraps: Some("Ferment seeds from a ripe fruit, dry, then sow."),
        prep_lead_time: "3-4 weeks before planting (seedlings)",
        tips: "Stake early and prune suckers.",
    },
    VegProfile {
        name: "okra",
        reason_en: "Loves tropical heat and keeps producing for months.",
        reason_tl: "Gustong-gusto ang init at tuloy-tuloy ang bunga.",
        pot_size: "30 cm deep container",
        plant_start: 3,
        plant_end: 6,
        harvest_start: 5,
        harvest_end: 9,
        companion: "pepper",
        scraps: None,
        prep_lead_time: "Soak seeds overnight before sowing",
        tips: "Harvest pods young, every 2-3 days.",
    },
    VegProfile {
        name: "talong",
        reason_en: "Long harvest window once established, handles humidity well.",
        reason_tl: "Mahabang anihan kapag lumakas na, kaya ang halumigmig.",
        pot_size: "40 cm deep, sturdy pot",
        plant_start: 11,
        plant_end: 2,
        harvest_start: 2,
        harvest_end: 6,
        companion: "beans",
        scraps: None,
        prep_lead_time: "4 weeks before planting (seedlings)",
        tips: "Feed every two weeks once flowering starts.",
    },
    VegProfile {
        name: "sitaw",
        reason_en: "Nitrogen-fixing climber that improves the soil while it feeds you.",
        reason_tl: "Umaakyat na gulay na nagpapabuti pa ng lupa.",
        pot_size: "30 cm deep with a trellis",
        plant_start: 3,
        plant_end: 5,
        harvest_start: 5,
        harvest_end: 8,
        companion: "corn",
        scraps: None,
        prep_lead_time: "Direct sow, no lead time",
        tips: "Give it something at least 2 m tall to climb.",
    },
    VegProfile {
        name: "ampalaya",
        reason_en: "Hardy vine suited to a trellis along a fence or wall.",
        reason_tl: "Matibay na baging, bagay sa bakod o pader na may balag.",
        pot_size: "",
        plant_start: 3,
        plant_end: 5,
        harvest_start: 5,
        harvest_end: 9,
        companion: "sitaw",
        scraps: None,
        prep_lead_time: "Nick and soak seeds 24 hours",
        tips: "Hand-pollinate flowers for a better fruit set.",
    },
    VegProfile {
        name: "malunggay",
        reason_en: "Plant once, harvest leaves year-round.",
        reason_tl: "Isang beses itanim, buong taon ang ani ng dahon.",
        pot_size: "",
        plant_start: 4,
        plant_end: 6,
        harvest_start: 8,
        harvest_end: 12,
        companion: "kamote",
        scraps: Some("Strike 30 cm branch cuttings directly in moist soil."),
        prep_lead_time: "None for cuttings",
        tips: "Top the tree to keep leaves within reach.",
    },
];

fn lookup(name: &str) -> Option<&'static VegProfile> {
    let needle = name.trim().to_lowercase();
    KNOWLEDGE
        .iter()
        .find(|p| p.name == needle)
        .or_else(|| {
            KNOWLEDGE
                .iter()
                .find(|p| needle.contains(p.name) || p.name.contains(needle.as_str()))
        })
}

// ---------------------------------------------------------------------------
// StaticAdvisor
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct StaticAdvisor;

impl Advisor for StaticAdvisor {
    fn research(&self, ctx: &AdvisorContext) -> Result<ResearchResult> {
        let wants_pots = ctx.planting_medium == Some(PlantingMedium::Pots);
        let recommendations: Vec<VegetableRecommendation> = KNOWLEDGE
            .iter()
            .filter(|p| !wants_pots || !p.pot_size.is_empty())
            .take(4)
            .map(|p| VegetableRecommendation {
                vegetable: p.name.to_string(),
                reason: ctx.language.pick(p.reason_en, p.reason_tl).to_string(),
                pot_size: if wants_pots {
                    p.pot_size.to_string()
                } else {
                    String::new()
                },
            })
            .collect();

        Ok(ResearchResult {
            recommendations,
            summary: summary_line(ctx),
        })
    }

    fn schedule(&self, _ctx: &AdvisorContext, vegetables: &str) -> Result<ScheduleResult> {
        let entries = split_list(vegetables)
            .map(|name| match lookup(name) {
                Some(p) => VegetableSchedule {
                    vegetable: name.to_string(),
                    plant_start_month: p.plant_start,
                    plant_end_month: p.plant_end,
                    harvest_start_month: p.harvest_start,
                    harvest_end_month: p.harvest_end,
                    companion_plant: p.companion.to_string(),
                },
                // Unknown vegetables default to the start of the wet season.
                None => VegetableSchedule {
                    vegetable: name.to_string(),
                    plant_start_month: 6,
                    plant_end_month: 8,
                    harvest_start_month: 9,
                    harvest_end_month: 11,
                    companion_plant: "marigold".to_string(),
                },
            })
            .collect();

        Ok(ScheduleResult {
            entries,
            notes: String::new(),
        })
    }

    fn preparation(&self, ctx: &AdvisorContext, vegetables: &str) -> Result<PreparationResult> {
        let items = split_list(vegetables)
            .map(|name| {
                let profile = lookup(name);
                PreparationItem {
                    vegetable: name.to_string(),
                    can_grow_from_scraps: profile.is_some_and(|p| p.scraps.is_some()),
                    scraps_how: profile
                        .and_then(|p| p.scraps)
                        .unwrap_or("N/A")
                        .to_string(),
                    prep_lead_time: profile
                        .map(|p| p.prep_lead_time)
                        .unwrap_or("2-3 weeks before planting")
                        .to_string(),
                    special_tips: profile.map(|p| p.tips).unwrap_or("").to_string(),
                }
            })
            .collect();

        Ok(PreparationResult {
            items,
            notes: ctx
                .language
                .pick(
                    "Compost kitchen scraps now so the soil is ready at planting time.",
                    "Mag-compost na ng mga tira sa kusina para handa ang lupa pagdating ng taniman.",
                )
                .to_string(),
        })
    }

    fn replanting(
        &self,
        ctx: &AdvisorContext,
        harvested_vegetable: &str,
    ) -> Result<ReplantingResult> {
        // Rotate away from the harvested crop; legumes restore nitrogen.
        let recommendations = KNOWLEDGE
            .iter()
            .filter(|p| !p.name.eq_ignore_ascii_case(harvested_vegetable.trim()))
            .take(3)
            .map(|p| ReplantingSuggestion {
                vegetable: p.name.to_string(),
                reason: ctx.language.pick(p.reason_en, p.reason_tl).to_string(),
                best_time_to_plant: format!(
                    "{} to {}",
                    taniman_core::schedule::month_abbrev(p.plant_start),
                    taniman_core::schedule::month_abbrev(p.plant_end)
                ),
                tip: p.tips.to_string(),
            })
            .collect();

        Ok(ReplantingResult {
            harvested_vegetable: harvested_vegetable.to_string(),
            recommendations,
            soil_rest_advice: ctx
                .language
                .pick(
                    "Turn in compost and rest the bed for a week before replanting.",
                    "Haluan ng compost at pahingahin ang taniman ng isang linggo bago magtanim muli.",
                )
                .to_string(),
        })
    }

    fn answer(&self, ctx: &AdvisorContext, question: &str) -> Result<String> {
        // Canned guidance keyed on common topics; the fallback stays useful.
        let q = question.to_lowercase();
        let answer = if q.contains("water") || q.contains("tubig") || q.contains("dilig") {
            ctx.language.pick(
                "Water early in the morning, at the base of the plant. In the dry season most \
                 vegetables need a deep watering daily; in the wet season let the topsoil dry first.",
                "Magdilig nang maaga sa umaga, sa paanan ng halaman. Sa tag-araw araw-araw ang \
                 diligan; sa tag-ulan hayaang matuyo muna ang ibabaw ng lupa.",
            )
        } else if q.contains("pest") || q.contains("insect") || q.contains("peste") {
            ctx.language.pick(
                "Check leaf undersides weekly. Neem oil spray and hand-picking handle most home \
                 garden pests; plant marigold nearby to keep aphids away.",
                "Tingnan ang ilalim ng mga dahon linggu-linggo. Neem oil at pagpulot ng peste ang \
                 karaniwang sapat; magtanim ng marigold malapit para iwas kuto.",
            )
        } else if q.contains("fertil") || q.contains("abono") || q.contains("pataba") {
            ctx.language.pick(
                "Compost is the safest start. Feed fruiting vegetables every two weeks once they \
                 flower; leafy greens prefer a light nitrogen feed after each harvest.",
                "Compost ang pinakaligtas na panimula. Pakainin ang namumungang gulay tuwing \
                 dalawang linggo kapag namumulaklak na; ang mga dahong gulay ay bahagyang pataba \
                 pagkatapos ng bawat ani.",
            )
        } else {
            let en = format!(
                "For {}, the safest rule is to follow the planting windows in your schedule, \
                 keep beds mulched, and watch the plants daily. Ask me about watering, pests, \
                 or fertilizer for specifics.",
                ctx.location
            );
            let tl = format!(
                "Para sa {}, sundin ang mga buwan ng taniman sa inyong iskedyul, lagyan ng \
                 mulch ang taniman, at bantayan araw-araw ang mga halaman. Itanong ang tungkol \
                 sa pagdidilig, peste, o pataba para sa detalye.",
                ctx.location
            );
            return Ok(ctx.language.pick(&en, &tl).to_string());
        };
        Ok(answer.to_string())
    }
}

fn split_list(vegetables: &str) -> impl Iterator<Item = &str> {
    vegetables
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn summary_line(ctx: &AdvisorContext) -> String {
    let en = format!(
        "Vegetables suited to home gardens around {}, based on typical conditions in {}.",
        ctx.location, ctx.previous_year_label
    );
    let tl = format!(
        "Mga gulay na bagay sa mga hardin sa paligid ng {}, batay sa karaniwang lagay ng \
         panahon noong {}.",
        ctx.location, ctx.previous_year_label
    );
    ctx.language.pick(&en, &tl).to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
