use crate::core::error::ProjchatError;
use crate::gateway::QueryGateway;
use crate::workspace::{Language, Snapshot};
use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Ai,
}

/// One transcript entry. Immutable once appended; ids are unique within a
/// session.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub at: DateTime<Local>,
}

/// Owns one linear, append-only transcript and mediates exactly one
/// in-flight request at a time. The Idle/AwaitingReply transition is a
/// busy-gate enforced by state: while a reply is pending, new submissions
/// are silently rejected rather than queued.
pub struct ChatSession {
    language: Language,
    messages: Vec<ChatMessage>,
    awaiting_reply: bool,
    next_id: u64,
    revision: u64,
}

impl ChatSession {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            messages: Vec::new(),
            awaiting_reply: false,
            next_id: 0,
            revision: 0,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Seed the transcript with the welcome message. Idempotent once the
    /// transcript is non-empty.
    pub fn open(&mut self) {
        if self.messages.is_empty() {
            let welcome = self.language.welcome_message().to_string();
            self.append(welcome, Sender::Ai);
        }
    }

    /// Accept a submission: append the user message, enter AwaitingReply
    /// and hand back the trimmed query text. Returns `None` (no transcript
    /// or state change) for empty input or while a reply is pending.
    pub fn submit(&mut self, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() || self.awaiting_reply {
            return None;
        }

        self.append(text.to_string(), Sender::User);
        self.awaiting_reply = true;
        Some(text.to_string())
    }

    /// Complete the pending request. A failed call yields exactly one
    /// assistant message with the localized generic error text; the state
    /// returns to Idle either way. No retry.
    pub fn resolve(&mut self, reply: Result<String, ProjchatError>) {
        let text = match reply {
            Ok(text) => text,
            Err(_) => self.language.generic_error().to_string(),
        };
        self.append(text, Sender::Ai);
        self.awaiting_reply = false;
    }

    /// Full lifecycle for one message: submit, call the gateway's
    /// conversational mode, resolve. Returns whether the submission was
    /// accepted.
    pub async fn exchange(
        &mut self,
        text: &str,
        gateway: &dyn QueryGateway,
        snapshot: &Snapshot<'_>,
    ) -> bool {
        let Some(query) = self.submit(text) else {
            return false;
        };
        let reply = gateway.chat_response(&query, snapshot).await;
        self.resolve(reply);
        true
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Bumped on every transcript mutation; the front-end uses it as its
    /// cue to bring the newest message into view.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn append(&mut self, text: String, sender: Sender) {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            text,
            sender,
            at: Local::now(),
        });
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::Analysis;
    use async_trait::async_trait;

    /// Gateway stub returning a canned reply, or an error when `reply` is
    /// `None`.
    struct CannedGateway {
        reply: Option<String>,
    }

    #[async_trait]
    impl QueryGateway for CannedGateway {
        async fn chat_response(
            &self,
            _query: &str,
            _snapshot: &Snapshot<'_>,
        ) -> Result<String, ProjchatError> {
            self.reply
                .clone()
                .ok_or_else(|| ProjchatError::Network("connection refused".to_string()))
        }

        async fn analyze_query(&self, _query: &str, _snapshot: &Snapshot<'_>) -> Analysis {
            Analysis::Error("not used in session tests".to_string())
        }
    }

    fn empty_workspace() -> crate::workspace::Workspace {
        crate::workspace::Workspace::default()
    }

    #[test]
    fn open_seeds_one_welcome_message_and_is_idempotent() {
        let mut session = ChatSession::new(Language::En);
        session.open();
        session.open();

        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].sender, Sender::Ai);
        assert_eq!(session.transcript()[0].text, Language::En.welcome_message());
    }

    #[test]
    fn welcome_follows_the_session_language() {
        let mut session = ChatSession::new(Language::Ar);
        session.open();
        assert_eq!(session.transcript()[0].text, Language::Ar.welcome_message());
    }

    #[test]
    fn empty_or_whitespace_submissions_are_ignored() {
        let mut session = ChatSession::new(Language::En);
        session.open();

        assert!(session.submit("").is_none());
        assert!(session.submit("   \t ").is_none());
        assert_eq!(session.transcript().len(), 1);
        assert!(!session.is_awaiting_reply());
    }

    #[test]
    fn submissions_are_rejected_while_awaiting_a_reply() {
        let mut session = ChatSession::new(Language::En);
        session.open();

        assert_eq!(session.submit("first"), Some("first".to_string()));
        assert!(session.is_awaiting_reply());

        assert!(session.submit("second").is_none());
        assert_eq!(session.transcript().len(), 2);

        session.resolve(Ok("reply".to_string()));
        assert!(!session.is_awaiting_reply());
        assert!(session.submit("third").is_some());
    }

    #[test]
    fn submit_trims_the_query_text() {
        let mut session = ChatSession::new(Language::En);
        assert_eq!(session.submit("  hello  "), Some("hello".to_string()));
        assert_eq!(session.last_message().unwrap().text, "hello");
    }

    #[test]
    fn message_ids_are_unique_and_increasing() {
        let mut session = ChatSession::new(Language::En);
        session.open();
        session.submit("one");
        session.resolve(Ok("two".to_string()));

        let ids: Vec<u64> = session.transcript().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn successful_exchange_appends_user_and_assistant_messages() {
        let mut session = ChatSession::new(Language::En);
        session.open();
        let workspace = empty_workspace();
        let gateway = CannedGateway {
            reply: Some("Three projects are on track.".to_string()),
        };

        let accepted = session
            .exchange("how are my projects?", &gateway, &workspace.snapshot())
            .await;

        assert!(accepted);
        assert_eq!(session.transcript().len(), 3);
        assert_eq!(session.transcript()[1].sender, Sender::User);
        assert_eq!(session.transcript()[2].sender, Sender::Ai);
        assert_eq!(session.transcript()[2].text, "Three projects are on track.");
        assert!(!session.is_awaiting_reply());
    }

    #[tokio::test]
    async fn failed_exchange_appends_the_localized_error_message() {
        let mut session = ChatSession::new(Language::Ar);
        session.open();
        let workspace = empty_workspace();
        let gateway = CannedGateway { reply: None };

        let accepted = session
            .exchange("ما حالة المشاريع؟", &gateway, &workspace.snapshot())
            .await;

        assert!(accepted);
        assert_eq!(session.transcript().len(), 3);
        assert_eq!(
            session.last_message().unwrap().text,
            Language::Ar.generic_error()
        );
        assert!(!session.is_awaiting_reply());
    }

    #[tokio::test]
    async fn rejected_exchange_leaves_the_transcript_untouched() {
        let mut session = ChatSession::new(Language::En);
        session.open();
        let workspace = empty_workspace();
        let gateway = CannedGateway {
            reply: Some("unused".to_string()),
        };

        let accepted = session.exchange("   ", &gateway, &workspace.snapshot()).await;

        assert!(!accepted);
        assert_eq!(session.transcript().len(), 1);
        assert!(!session.is_awaiting_reply());
    }

    #[test]
    fn revision_tracks_every_transcript_mutation() {
        let mut session = ChatSession::new(Language::En);
        assert_eq!(session.revision(), 0);
        session.open();
        assert_eq!(session.revision(), 1);
        session.submit("hi");
        assert_eq!(session.revision(), 2);
        session.resolve(Err(ProjchatError::Api("boom".to_string())));
        assert_eq!(session.revision(), 3);
    }
}
