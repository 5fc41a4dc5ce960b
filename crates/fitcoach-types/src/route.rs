//! Client views and navigation requests.

use std::fmt;
use std::time::Duration;

/// A view the client can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Welcome,
    Login,
    Register,
    ForgotPassword,
    Dashboard,
    Guest,
    GuestSummary,
    Chatbot,
    Plan,
    History,
    Profile,
}

impl Route {
    /// Path the view lives at in the web client, used in logs.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Welcome => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::ForgotPassword => "/forgot-password",
            Route::Dashboard => "/dashboard",
            Route::Guest => "/guest",
            Route::GuestSummary => "/guest-summary",
            Route::Chatbot => "/chatbot",
            Route::Plan => "/plan",
            Route::History => "/history",
            Route::Profile => "/profile",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A deferred navigation: go to `route` once `after` has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub route: Route,
    pub after: Duration,
}

impl Redirect {
    pub fn new(route: Route, after: Duration) -> Self {
        Self { route, after }
    }
}
