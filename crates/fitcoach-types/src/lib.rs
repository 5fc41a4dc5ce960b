//! Shared domain types for the FitCoach client.
//!
//! This crate contains the types shared across the workspace: chat messages,
//! the backend's bot response contract, auth payloads, plans, profile data,
//! view routes, storage keys, client configuration, and error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, thiserror.

pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod plan;
pub mod profile;
pub mod response;
pub mod route;
pub mod storage;
