//! Response dispatcher.
//!
//! Applies one bot response to the conversation: appends the visible
//! message, replaces the quick replies, and for terminal `plan` responses
//! caches the plan, ends the session and asks the caller to navigate.

use std::time::Duration;

use fitcoach_types::auth::UserId;
use fitcoach_types::chat::Sender;
use fitcoach_types::response::{BotResponse, ReplyButton};
use fitcoach_types::route::{Redirect, Route};
use fitcoach_types::storage::StorageKey;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::chat::log::MessageLog;
use crate::chat::quick_reply::{HeuristicExtractor, QuickReplyStrategy};
use crate::session::SessionIdentity;
use crate::storage::KvStore;

/// Overview of the supported diet types, shown before the diet question.
pub const DIET_INFO_HTML: &str = "<h3>Основни диетични подходи</h3>\
<ul>\
<li><strong>🍏 Балансирана:</strong> Разнообразна храна с умерено съотношение на макронутриенти.</li>\
<li><strong>🥩 Протеинова:</strong> Високо съдържание на протеин. За мускулен растеж и ситост.</li>\
<li><strong>🥑 Кетогенна:</strong> Много ниски въглехидрати, високи мазнини – кетоза.</li>\
<li><strong>🌱 Веган:</strong> Без животински продукти. Само растителни източници.</li>\
<li><strong>🍲 Вегетарианска:</strong> Позволява яйца и млечни, но не месо.</li>\
<li><strong>🌰 Палео:</strong> Без зърна, млечни и преработени храни.</li>\
</ul>";

pub const GUEST_PLAN_READY: &str = "Готово! Пренасочвам към демо страницата…";
pub const MEMBER_PLAN_READY: &str = "✅ Твоят персонализиран режим е готов! Пренасочвам…";
pub const LOGIN_REQUIRED: &str = "🔒 Влез в профила си, за да видиш пълния план.";
pub const UNKNOWN_ERROR: &str = "Неизвестна грешка.";
pub const UNEXPECTED_FORMAT: &str = "⚠️ Неочакван формат на отговора.";

/// Delays before the caller acts on a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedirectTiming {
    /// After a plan arrives.
    pub plan: Duration,
    /// Before sending an anonymous user to sign in.
    pub login: Duration,
}

impl Default for RedirectTiming {
    fn default() -> Self {
        Self {
            plan: Duration::from_millis(1200),
            login: Duration::from_millis(1500),
        }
    }
}

/// Mutable conversation state one dispatch operates on.
pub struct Turn<'a, S: KvStore, C: KvStore> {
    pub log: &'a mut MessageLog,
    pub quick_replies: &'a mut Vec<String>,
    pub identity: &'a mut SessionIdentity<S>,
    pub session_cache: &'a C,
    /// Signed-in member, if any (guests count as absent).
    pub user_id: Option<UserId>,
}

/// What the caller should do after a response was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Continue,
    Redirect(Redirect),
}

pub struct ResponseDispatcher<X: QuickReplyStrategy = HeuristicExtractor> {
    extractor: X,
    timing: RedirectTiming,
}

impl ResponseDispatcher<HeuristicExtractor> {
    pub fn new(timing: RedirectTiming) -> Self {
        Self::with_strategy(HeuristicExtractor, timing)
    }
}

impl Default for ResponseDispatcher<HeuristicExtractor> {
    fn default() -> Self {
        Self::new(RedirectTiming::default())
    }
}

fn button_labels(buttons: &[ReplyButton]) -> Vec<String> {
    buttons
        .iter()
        .filter_map(ReplyButton::label)
        .map(str::to_owned)
        .collect()
}

impl<X: QuickReplyStrategy> ResponseDispatcher<X> {
    pub fn with_strategy(extractor: X, timing: RedirectTiming) -> Self {
        Self { extractor, timing }
    }

    pub fn timing(&self) -> RedirectTiming {
        self.timing
    }

    /// Apply `response` to the conversation.
    pub async fn dispatch<S: KvStore, C: KvStore>(
        &self,
        response: BotResponse,
        turn: Turn<'_, S, C>,
    ) -> DispatchOutcome {
        debug!(kind = response.kind(), "Dispatching bot response");
        turn.quick_replies.clear();

        match response {
            BotResponse::Text { message } | BotResponse::Legacy(message) => {
                *turn.quick_replies = self.extractor.extract(&message);
                turn.log.append(Sender::Bot, message);
                DispatchOutcome::Continue
            }
            BotResponse::Buttons { message, buttons } => {
                turn.log.append(Sender::Bot, message);
                *turn.quick_replies = button_labels(&buttons);
                DispatchOutcome::Continue
            }
            BotResponse::DetailedDietInfo { message, buttons } => {
                turn.log
                    .append(Sender::Bot, format!("{DIET_INFO_HTML}<p>{message}</p>"));
                *turn.quick_replies = button_labels(&buttons);
                DispatchOutcome::Continue
            }
            BotResponse::Plan { is_guest, plan } => self.finish_with_plan(is_guest, plan, turn).await,
            BotResponse::Error { message } => {
                let detail = message.filter(|m| !m.is_empty());
                turn.log.append(
                    Sender::Bot,
                    format!("⚠️ Грешка: {}", detail.as_deref().unwrap_or(UNKNOWN_ERROR)),
                );
                DispatchOutcome::Continue
            }
            BotResponse::Unknown(payload) => {
                warn!(payload = %payload, "Unexpected chatbot response shape");
                turn.log.append(Sender::Bot, UNEXPECTED_FORMAT);
                DispatchOutcome::Continue
            }
        }
    }

    async fn finish_with_plan<S: KvStore, C: KvStore>(
        &self,
        is_guest: bool,
        plan: Value,
        turn: Turn<'_, S, C>,
    ) -> DispatchOutcome {
        let (cache_key, message, route) = if is_guest {
            (StorageKey::DemoPlan, GUEST_PLAN_READY, Route::GuestSummary)
        } else if turn.user_id.is_some() {
            (StorageKey::FullPlan, MEMBER_PLAN_READY, Route::Plan)
        } else {
            turn.log.append(Sender::Bot, LOGIN_REQUIRED);
            info!(route = %Route::Login, "Plan requires sign-in");
            return DispatchOutcome::Redirect(Redirect::new(Route::Login, self.timing.login));
        };

        if let Err(e) = turn.session_cache.set(cache_key, &plan.to_string()).await {
            warn!(key = %cache_key, "Failed to cache generated plan: {e}");
        }
        turn.log.append(Sender::Bot, message);
        turn.identity.clear_on_completion().await;

        info!(route = %route, is_guest, "Plan received");
        DispatchOutcome::Redirect(Redirect::new(route, self.timing.plan))
    }
}
