//! Conversation logic and port trait definitions for the FitCoach client.
//!
//! This crate defines the "ports" (transport, backend API and storage
//! traits) that the infrastructure layer implements, plus the services
//! built on them. It depends only on `fitcoach-types` -- never on
//! `fitcoach-infra` or any database/HTTP crate.

pub mod auth;
pub mod chat;
pub mod plan;
pub mod profile;
pub mod session;
pub mod storage;
