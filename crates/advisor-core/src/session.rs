//! Per-session state.
//!
//! Each browser tab gets its own record keyed by a server-issued id, so
//! concurrent sessions never see each other's flags. The state is dropped
//! with the process; nothing here persists.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Quick actions bound to the console buttons. Each carries the literal
/// instruction its button sends to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickAction {
    ShowMyDay,
    PrepNextMeeting,
    DraftFollowUp,
}

impl QuickAction {
    pub fn instruction(&self) -> &'static str {
        match self {
            QuickAction::ShowMyDay => {
                "Show my day: summarize today's meetings and the follow-ups I should fit in between them."
            }
            QuickAction::PrepNextMeeting => {
                "Prep me for my next client meeting: recent account activity, open action items, and one talking point."
            }
            QuickAction::DraftFollowUp => {
                "Draft a short, friendly follow-up email to a client whose annual review is overdue."
            }
        }
    }
}

/// Flags one browser tab carries between interactions.
#[derive(Debug, Default)]
pub struct SessionState {
    briefing: Option<String>,
    pending_action: Option<QuickAction>,
}

impl SessionState {
    pub fn briefing_shown(&self) -> bool {
        self.briefing.is_some()
    }

    pub fn briefing(&self) -> Option<&str> {
        self.briefing.as_deref()
    }

    pub fn record_briefing(&mut self, text: String) {
        self.briefing = Some(text);
    }

    /// Explicit refresh: the next fetch composes the briefing again.
    pub fn reset_briefing(&mut self) {
        self.briefing = None;
    }

    /// Queue an action into the single pending slot. A queued action that
    /// was never handled is replaced, never stacked.
    pub fn queue_action(&mut self, action: QuickAction) {
        self.pending_action = Some(action);
    }

    /// Take the pending action, clearing the slot.
    pub fn take_pending_action(&mut self) -> Option<QuickAction> {
        self.pending_action.take()
    }
}

/// All live sessions, keyed by server-issued id.
#[derive(Default)]
pub struct SessionStore {
    sessions: HashMap<String, SessionState>,
}

impl SessionStore {
    pub fn insert(&mut self, id: String) {
        self.sessions.insert(id, SessionState::default());
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut SessionState> {
        self.sessions.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_briefing_flag_lifecycle() {
        let mut session = SessionState::default();
        assert!(!session.briefing_shown());

        session.record_briefing("Good morning.".to_string());
        assert!(session.briefing_shown());
        assert_eq!(session.briefing(), Some("Good morning."));

        session.reset_briefing();
        assert!(!session.briefing_shown());
        assert_eq!(session.briefing(), None);
    }

    #[test]
    fn test_pending_slot_holds_at_most_one_action() {
        let mut session = SessionState::default();

        session.queue_action(QuickAction::ShowMyDay);
        session.queue_action(QuickAction::DraftFollowUp);

        assert_eq!(
            session.take_pending_action(),
            Some(QuickAction::DraftFollowUp)
        );
        // taking it cleared the slot
        assert_eq!(session.take_pending_action(), None);
    }

    #[test]
    fn test_store_isolates_sessions() {
        let mut store = SessionStore::default();
        store.insert("a".to_string());
        store.insert("b".to_string());

        store
            .get_mut("a")
            .unwrap()
            .record_briefing("for a".to_string());

        assert!(store.get_mut("a").unwrap().briefing_shown());
        assert!(!store.get_mut("b").unwrap().briefing_shown());
        assert!(store.get_mut("c").is_none());
    }

    #[test]
    fn test_action_names_deserialize_snake_case() {
        let action: QuickAction = serde_json::from_str("\"show_my_day\"").unwrap();
        assert_eq!(action, QuickAction::ShowMyDay);
    }
}
