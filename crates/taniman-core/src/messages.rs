//! Bilingual prompt and message catalog.
//!
//! Every user-facing string exists as an English/Tagalog pair; the caller
//! picks via [`Language::pick`]. Before a language is chosen the intake
//! prompts show both, matching the original conversation flow.

use crate::stage::Stage;
use crate::types::Language;

// ---------------------------------------------------------------------------
// Stage prompts (rendered by the host, not stored in the log)
// ---------------------------------------------------------------------------

/// The input prompt for a stage, or `None` for working/terminal stages that
/// take no direct input prompt of their own.
pub fn prompt_for(stage: &Stage, lang: Language) -> Option<String> {
    let text = match stage {
        Stage::NeedLocation => {
            "Where is your garden located? (e.g. Manila, Philippines)".to_string()
        }
        Stage::NeedLanguage => {
            "Please select your preferred language / Piliin ang iyong wika [english/tagalog]"
                .to_string()
        }
        Stage::NeedMode => lang
            .pick(
                "Are you planning a garden, or have you already planted? [planning/planted]",
                "Nagpaplano pa ba kayo ng hardin, o nakapagtanim na? [planning/planted]",
            )
            .to_string(),
        Stage::NeedMedium => lang
            .pick(
                "How will you be planting? [ground/pots]",
                "Paano mo itatanim? [ground/pots]",
            )
            .to_string(),
        Stage::AwaitingFeedback => lang
            .pick(
                "Want to add any vegetables to the list? Type a name to add, or 'done' to continue.",
                "Gusto ba ninyong magdagdag ng mga gulay sa listahan? Mag-type ng pangalan, o 'done' para magpatuloy.",
            )
            .to_string(),
        Stage::AwaitingGardenDesign => lang
            .pick(
                "Lay out your garden plots with 'place <row> <col> <vegetable>', or type 'done' / 'skip'.",
                "Ayusin ang inyong taniman gamit ang 'place <row> <col> <gulay>', o i-type ang 'done' / 'skip'.",
            )
            .to_string(),
        Stage::AwaitingScheduleConfirm => lang
            .pick(
                "Would you like me to create a planting schedule? [yes/no]",
                "Gusto ba ninyong gumawa ng iskedyul ng pagtatanim? [yes/no]",
            )
            .to_string(),
        Stage::AwaitingPreparation => lang
            .pick(
                "Would you like preparation tips before you plant? [yes/no]",
                "Gusto ba ninyo ng mga tip sa paghahanda bago magtanim? [yes/no]",
            )
            .to_string(),
        Stage::AwaitingChoice => lang
            .pick(
                "What would you like to do? [schedule/replant/questions]",
                "Ano ang gusto ninyong gawin? [schedule/replant/questions]",
            )
            .to_string(),
        Stage::CollectingPlantedVegetables => lang
            .pick(
                "Which vegetables have you already planted? Add one at a time, then 'done'.",
                "Anong mga gulay na ang naitanim ninyo? Idagdag isa-isa, tapos 'done'.",
            )
            .to_string(),
        Stage::AwaitingPlantingDates => lang
            .pick(
                "When did you plant each vegetable? Enter 'name=YYYY-MM-DD' pairs separated by commas.",
                "Kailan ninyo itinanim ang bawat gulay? Ilagay ang 'pangalan=YYYY-MM-DD', hiwalay ng kuwit.",
            )
            .to_string(),
        Stage::TrackerShown | Stage::AwaitingReplantingPrompt => lang
            .pick(
                "Would you like replanting suggestions for a harvested vegetable? [yes/skip]",
                "Gusto ba ninyo ng mungkahi sa muling pagtatanim para sa naani na gulay? [yes/skip]",
            )
            .to_string(),
        Stage::CollectingHarvestedVegetable { .. } => lang
            .pick(
                "Which vegetable did you just harvest?",
                "Anong gulay ang kaka-ani ninyo?",
            )
            .to_string(),
        Stage::OpenQa => lang
            .pick(
                "Ask me anything about your garden...",
                "Magtanong tungkol sa inyong hardin...",
            )
            .to_string(),
        Stage::Researching | Stage::Scheduling | Stage::Preparing | Stage::Replanting { .. } => {
            return None
        }
    };
    Some(text)
}

/// Busy-indicator text for a working stage.
pub fn busy_for(stage: &Stage, lang: Language) -> Option<&'static str> {
    let text = match stage {
        Stage::Researching => lang.pick(
            "Finding the best vegetables for your area...",
            "Hinahanap ang pinakamainam na mga gulay para sa inyong lugar...",
        ),
        Stage::Scheduling => lang.pick(
            "Creating your planting schedule...",
            "Ginagawa ang inyong iskedyul ng pagtatanim...",
        ),
        Stage::Preparing => lang.pick(
            "Putting together your preparation tips...",
            "Inihahanda ang inyong mga tip sa paghahanda...",
        ),
        Stage::Replanting { .. } => lang.pick(
            "Looking for good replanting options...",
            "Naghahanap ng magagandang itanim muli...",
        ),
        _ => return None,
    };
    Some(text)
}

// ---------------------------------------------------------------------------
// Conversation messages
// ---------------------------------------------------------------------------

pub fn location_saved(lang: Language, location: &str) -> String {
    format!(
        "{} {location}",
        lang.pick("📍 Garden location:", "📍 Lokasyon ng hardin:")
    )
}

pub fn feedback_prompt(lang: Language) -> &'static str {
    lang.pick(
        "💬 Are you happy with these vegetables? You can also add any vegetables you'd like to include!",
        "💬 Okay na ba kayo sa mga gulay na ito? Maaari din kayong magdagdag ng mga gulay na gusto ninyo!",
    )
}

pub fn added_vegetable(lang: Language, name: &str) -> String {
    match lang {
        Language::English => format!(
            "Got it! I've added {name} to your list. 🌱 Any more to add, or type done to continue!"
        ),
        Language::Tagalog => format!(
            "Sige! Idinagdag ko na ang {name} sa inyong listahan. 🌱 May idadagdag pa ba, o i-type ang done para magpatuloy!"
        ),
    }
}

pub fn design_offer(lang: Language) -> &'static str {
    lang.pick(
        "Great! Before the schedule, would you like to sketch where each vegetable goes? You can also skip this.",
        "Magaling! Bago ang iskedyul, gusto ba ninyong iguhit kung saan itatanim ang bawat gulay? Maaari din itong laktawan.",
    )
}

pub fn schedule_confirm_prompt(lang: Language) -> &'static str {
    lang.pick(
        "Would you like me to create a planting schedule for these vegetables?",
        "Gusto ba ninyong gumawa ng iskedyul ng pagtatanim para sa mga gulay na ito?",
    )
}

pub fn schedule_ready(lang: Language) -> &'static str {
    lang.pick(
        "📊 Here's your planting schedule!",
        "📊 Narito ang inyong iskedyul ng pagtatanim!",
    )
}

pub fn preparation_offer(lang: Language) -> &'static str {
    lang.pick(
        "Would you like preparation tips for these vegetables before you plant?",
        "Gusto ba ninyo ng mga tip sa paghahanda para sa mga gulay na ito bago magtanim?",
    )
}

pub fn qa_open(lang: Language) -> &'static str {
    lang.pick(
        "No problem! Feel free to ask me anything else about your garden. 🌿",
        "Okay lang! Huwag mag-atubiling magtanong tungkol sa inyong hardin. 🌿",
    )
}

pub fn planted_choice_prompt(lang: Language) -> &'static str {
    lang.pick(
        "Welcome back to the garden! I can build a harvest schedule, suggest what to replant, or just answer questions.",
        "Maligayang pagbabalik sa hardin! Maaari akong gumawa ng iskedyul ng ani, magmungkahi ng itatanim muli, o sumagot lang ng mga tanong.",
    )
}

pub fn planting_dates_prompt(lang: Language) -> &'static str {
    lang.pick(
        "Now tell me when you planted each vegetable so I can track your harvests.",
        "Sabihin ninyo kung kailan itinanim ang bawat gulay para masubaybayan ko ang inyong ani.",
    )
}

pub fn tracker_intro(lang: Language) -> &'static str {
    lang.pick(
        "🌾 Here's your harvest tracker!",
        "🌾 Narito ang inyong harvest tracker!",
    )
}

pub fn replant_offer(lang: Language) -> &'static str {
    lang.pick(
        "Harvested something already? I can suggest what to plant in its place.",
        "May naani na ba kayo? Maaari akong magmungkahi ng itatanim kapalit nito.",
    )
}

pub fn replant_again(lang: Language) -> &'static str {
    lang.pick(
        "Would you like replanting ideas for another harvested vegetable?",
        "Gusto ba ninyo ng mga ideya sa muling pagtatanim para sa iba pang naani na gulay?",
    )
}

pub fn restarted(lang: Language) -> &'static str {
    lang.pick(
        "Let's start over! 🌱",
        "Magsimula tayong muli! 🌱",
    )
}

// ---------------------------------------------------------------------------
// Inline warnings (never appended to the conversation log)
// ---------------------------------------------------------------------------

pub fn warn_blank_location(lang: Language) -> &'static str {
    lang.pick(
        "Please enter your location to continue.",
        "Mangyaring ilagay ang inyong lokasyon para magpatuloy.",
    )
}

pub fn warn_blank_vegetable(lang: Language) -> &'static str {
    lang.pick(
        "Please type a vegetable name first.",
        "Mangyaring mag-type muna ng pangalan ng gulay.",
    )
}

pub fn warn_blank_harvested(lang: Language) -> &'static str {
    lang.pick(
        "Please type the vegetable you harvested.",
        "Mangyaring i-type ang gulay na inani ninyo.",
    )
}

pub fn warn_no_planted_vegetables(lang: Language) -> &'static str {
    lang.pick(
        "Please add at least one vegetable first.",
        "Mangyaring magdagdag muna ng kahit isang gulay.",
    )
}

pub fn warn_blank_dates(lang: Language) -> &'static str {
    lang.pick(
        "Please enter at least one planting date.",
        "Mangyaring maglagay ng kahit isang petsa ng pagtatanim.",
    )
}

pub fn warn_blank_question(lang: Language) -> &'static str {
    lang.pick(
        "Please type a question first.",
        "Mangyaring mag-type muna ng tanong.",
    )
}

pub fn collaborator_failed(lang: Language) -> &'static str {
    lang.pick(
        "Something went wrong, please try again.",
        "May naganap na error. Pakisubukan muli.",
    )
}

pub fn feedback_thanks(lang: Language) -> &'static str {
    lang.pick(
        "🌱 Thank you! Your feedback helps Taniman grow.",
        "🌱 Salamat! Ang inyong puna ay tumutulong sa Taniman na lumago.",
    )
}

pub fn feedback_failed(lang: Language) -> &'static str {
    lang.pick(
        "Something went wrong saving your feedback. Please try again.",
        "May naganap na error sa pag-save ng inyong puna. Pakisubukan muli.",
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn working_stages_have_busy_text_not_prompts() {
        for stage in [Stage::Researching, Stage::Scheduling, Stage::Preparing] {
            assert!(prompt_for(&stage, Language::English).is_none());
            assert!(busy_for(&stage, Language::English).is_some());
        }
    }

    #[test]
    fn prompts_are_localized() {
        let en = prompt_for(&Stage::AwaitingScheduleConfirm, Language::English).unwrap();
        let tl = prompt_for(&Stage::AwaitingScheduleConfirm, Language::Tagalog).unwrap();
        assert!(en.contains("planting schedule"));
        assert!(tl.contains("iskedyul"));
    }

    #[test]
    fn language_prompt_is_bilingual() {
        let p = prompt_for(&Stage::NeedLanguage, Language::English).unwrap();
        assert!(p.contains("language"));
        assert!(p.contains("wika"));
    }
}
