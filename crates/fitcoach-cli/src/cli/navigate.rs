//! Acting on a redirect requested by the chat.
//!
//! The dispatcher only says where to go and after how long; the wait and
//! the follow-up view happen here.

use anyhow::Result;
use tracing::{Instrument, info_span};

use fitcoach_observe::attrs::SPAN_REDIRECT;
use fitcoach_types::route::{Redirect, Route};

use crate::state::AppState;

use super::{plan, print_hint, spinner};

/// The `fitc` command that opens a route.
pub fn command_for(route: Route) -> &'static str {
    match route {
        Route::Welcome | Route::Dashboard => "fitc whoami",
        Route::Login => "fitc login",
        Route::Register => "fitc register",
        Route::ForgotPassword => "fitc forgot-password",
        Route::Guest => "fitc guest",
        Route::GuestSummary => "fitc demo",
        Route::Chatbot => "fitc chat",
        Route::Plan => "fitc plan",
        Route::History => "fitc history",
        Route::Profile => "fitc profile show",
    }
}

/// Wait out the redirect delay, then show the target view.
///
/// Views that need input of their own (sign-in) are only pointed at.
pub async fn follow(state: &AppState, redirect: Redirect) -> Result<()> {
    let span = info_span!(
        SPAN_REDIRECT,
        route = %redirect.route,
        delay_ms = redirect.after.as_millis() as u64
    );

    async move {
        let bar = spinner("Пренасочване...");
        tokio::time::sleep(redirect.after).await;
        bar.finish_and_clear();
        tracing::info!("Following redirect");

        match redirect.route {
            Route::Plan => plan::show_plan(state, None, false).await,
            Route::GuestSummary => plan::show_demo(state, false).await,
            Route::Login => {
                print_hint("Влезте в профила си, за да видите пълния план:", command_for(Route::Login));
                Ok(())
            }
            other => {
                print_hint("Продължете с:", command_for(other));
                Ok(())
            }
        }
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_targets_have_commands() {
        assert_eq!(command_for(Route::Plan), "fitc plan");
        assert_eq!(command_for(Route::GuestSummary), "fitc demo");
        assert_eq!(command_for(Route::Login), "fitc login");
    }
}
