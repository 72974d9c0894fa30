use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        })
    }
}

// ---------------------------------------------------------------------------
// RenderDirective
// ---------------------------------------------------------------------------

/// Symbolic stand-in for a rendered artifact. Directives are resolved
/// against the session's stored collaborator outputs at replay time, never
/// against a snapshot taken when the entry was appended, so a replayed
/// directive always shows the latest stored result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RenderDirective {
    ResearchCards,
    ScheduleChart,
    PreparationCards,
    HarvestTracker,
    ReplantingCards,
}

impl RenderDirective {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderDirective::ResearchCards => "RESEARCH_CARDS",
            RenderDirective::ScheduleChart => "SCHEDULE_CHART",
            RenderDirective::PreparationCards => "PREPARATION_CARDS",
            RenderDirective::HarvestTracker => "HARVEST_TRACKER",
            RenderDirective::ReplantingCards => "REPLANTING_CARDS",
        }
    }
}

impl fmt::Display for RenderDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ConversationEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Content {
    Text(String),
    Directive(RenderDirective),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub role: Role,
    pub content: Content,
}

impl ConversationEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Content::Text(text.into()),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: Content::Text(text.into()),
        }
    }

    pub fn directive(directive: RenderDirective) -> Self {
        Self {
            role: Role::Assistant,
            content: Content::Directive(directive),
        }
    }
}

// ---------------------------------------------------------------------------
// ConversationLog
// ---------------------------------------------------------------------------

/// Append-only ordered sequence of turns. Append order is the total order
/// of stage transitions; replay walks it front to back every time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationLog {
    entries: Vec<ConversationEntry>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ConversationEntry) {
        self.entries.push(entry);
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = ConversationEntry>) {
        self.entries.extend(entries);
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Count entries carrying the given directive.
    pub fn directive_count(&self, directive: RenderDirective) -> usize {
        self.entries
            .iter()
            .filter(|e| e.content == Content::Directive(directive))
            .count()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_order() {
        let mut log = ConversationLog::new();
        log.push(ConversationEntry::assistant("first"));
        log.push(ConversationEntry::user("second"));
        log.push(ConversationEntry::directive(RenderDirective::ResearchCards));

        assert_eq!(log.len(), 3);
        assert_eq!(log.entries()[0], ConversationEntry::assistant("first"));
        assert_eq!(log.entries()[1].role, Role::User);
        assert_eq!(
            log.entries()[2].content,
            Content::Directive(RenderDirective::ResearchCards)
        );
    }

    #[test]
    fn directive_count() {
        let mut log = ConversationLog::new();
        log.push(ConversationEntry::directive(RenderDirective::ScheduleChart));
        log.push(ConversationEntry::assistant("text"));
        log.push(ConversationEntry::directive(RenderDirective::ScheduleChart));

        assert_eq!(log.directive_count(RenderDirective::ScheduleChart), 2);
        assert_eq!(log.directive_count(RenderDirective::PreparationCards), 0);
    }

    #[test]
    fn directive_tokens_are_stable() {
        let json = serde_json::to_string(&RenderDirective::HarvestTracker).unwrap();
        assert_eq!(json, "\"HARVEST_TRACKER\"");
        let parsed: RenderDirective = serde_json::from_str("\"SCHEDULE_CHART\"").unwrap();
        assert_eq!(parsed, RenderDirective::ScheduleChart);
    }
}
