//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate the codec, status and permission resolvers into use-case
//!   level APIs.
//! - Keep scanning surfaces and API routes decoupled from resolver details.

pub mod checkin_service;
