//! Conversation controller.
//!
//! Owns everything one chat conversation needs: the message log, the
//! current quick replies, the session identity and the transport. The
//! caller drives it explicitly (`init`, `on_auth_change`, `submit`,
//! `teardown`) and acts on the returned [`DispatchOutcome`].
//!
//! `submit` takes `&mut self`, so a controller has at most one chat request
//! in flight.

use fitcoach_types::auth::UserId;
use fitcoach_types::chat::{Sender, SessionId};
use tracing::{debug, info, warn};

use crate::chat::dispatcher::{DIET_INFO_HTML, DispatchOutcome, ResponseDispatcher, Turn};
use crate::chat::log::MessageLog;
use crate::chat::quick_reply::{HeuristicExtractor, QuickReplyStrategy};
use crate::chat::transport::{ChatRequest, ChatTransport};
use crate::session::SessionIdentity;
use crate::storage::KvStore;

pub const CONNECTION_PROBLEM: &str = "⚠️ Проблем при свързване с чатбота.";

/// Opening message of every conversation.
pub fn greeting() -> String {
    format!(
        "👋 Здравейте! Аз съм вашият личен асистент за фитнес и хранене. \
         Готови ли сте да създадем вашия персонализиран план?<br/><br/>{DIET_INFO_HTML}\
         <p><strong>Искаш ли допълнителна информация за типа диети?</strong> \
         <em>(отговори с \"да\" / \"не\")</em></p>"
    )
}

pub struct ConversationController<T, S, C, X = HeuristicExtractor>
where
    T: ChatTransport,
    S: KvStore,
    C: KvStore,
    X: QuickReplyStrategy,
{
    transport: T,
    identity: SessionIdentity<S>,
    session_cache: C,
    dispatcher: ResponseDispatcher<X>,
    log: MessageLog,
    quick_replies: Vec<String>,
    user_id: Option<UserId>,
}

impl<T, S, C, X> ConversationController<T, S, C, X>
where
    T: ChatTransport,
    S: KvStore,
    C: KvStore,
    X: QuickReplyStrategy,
{
    /// `durable` holds the session id across runs; `session_cache` receives generated plans.
    pub fn new(transport: T, durable: S, session_cache: C, dispatcher: ResponseDispatcher<X>) -> Self {
        Self {
            transport,
            identity: SessionIdentity::new(durable),
            session_cache,
            dispatcher,
            log: MessageLog::new(),
            quick_replies: Vec::new(),
            user_id: None,
        }
    }

    /// Resolve the session and seed the greeting.
    pub async fn init(&mut self, user_id: Option<UserId>) -> SessionId {
        self.user_id = user_id;
        let session_id = self.identity.init(user_id).await;

        if self.log.is_empty() {
            self.log.append(Sender::Bot, greeting());
            self.quick_replies = vec!["да".to_string(), "не".to_string()];
        }

        info!(session_id = %session_id, member = user_id.is_some(), "Conversation started");
        session_id
    }

    /// Track a sign-in or sign-out that happened mid-conversation.
    pub async fn on_auth_change(&mut self, user_id: Option<UserId>) -> Option<SessionId> {
        self.user_id = user_id;
        self.identity.rotate_on_auth(user_id).await
    }

    /// Send a user message and apply the bot's answer.
    ///
    /// Blank input is ignored. A transport failure is reported in the log
    /// and never retried.
    pub async fn submit(&mut self, text: &str) -> DispatchOutcome {
        let text = text.trim();
        if text.is_empty() {
            return DispatchOutcome::Continue;
        }

        self.log.append(Sender::User, text);
        self.quick_replies.clear();

        let session_id = self.identity.init(self.user_id).await;
        let request = ChatRequest::new(session_id, text, self.user_id);
        debug!(session_id = %request.session_id, role = %request.role, "Sending chat message");

        match self.transport.send(&request).await {
            Ok(response) => {
                self.dispatcher
                    .dispatch(
                        response,
                        Turn {
                            log: &mut self.log,
                            quick_replies: &mut self.quick_replies,
                            identity: &mut self.identity,
                            session_cache: &self.session_cache,
                            user_id: self.user_id,
                        },
                    )
                    .await
            }
            Err(e) => {
                warn!(session_id = %request.session_id, "Chat request failed: {e}");
                self.log.append(Sender::Bot, CONNECTION_PROBLEM);
                DispatchOutcome::Continue
            }
        }
    }

    /// Send the quick reply at `index`. Returns `None` for an index with no reply.
    pub async fn submit_quick_reply(&mut self, index: usize) -> Option<DispatchOutcome> {
        let reply = self.quick_replies.get(index)?.clone();
        Some(self.submit(&reply).await)
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn quick_replies(&self) -> &[String] {
        &self.quick_replies
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.identity.current()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    /// End the conversation, dropping the in-memory log.
    pub fn teardown(self) {
        info!(messages = self.log.len(), "Conversation closed");
    }
}
