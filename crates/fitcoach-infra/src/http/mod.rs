//! REST client for the FitCoach backend.
//!
//! [`ApiClient`] is the single HTTP adapter: it implements the chat
//! transport and the auth, plan and profile ports from `fitcoach-core`.
//! The bearer token is read from the durable store before every request,
//! so a sign-in or sign-out takes effect on the very next call.

mod auth;
mod chat;
mod client;
mod plans;
mod profile;

pub use client::ApiClient;
