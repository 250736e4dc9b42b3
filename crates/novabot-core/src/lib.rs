//! ✨ novabot-core: Core library for Nova, the NovaStack website assistant.
//!
//! This crate contains the building blocks of the in-page assistant and
//! the small HTTP surface around it:
//!
//! - [`knowledge`] — Static fact table and priority-ordered topic catalogue
//! - [`engine`] — Keyword matcher, reply composer, and fallback policy
//! - [`session`] — In-memory, append-only conversation transcripts
//! - [`config`] — Typed configuration loading from JSON
//! - [`gateway`] — axum HTTP endpoints: chat, contact relay, audit relay
//!
//! # Quick Start
//!
//! ```
//! use novabot_core::engine::Engine;
//!
//! let engine = Engine::new();
//! let reply = engine.reply("How much does a simple website cost?").unwrap();
//! assert!(reply.starts_with("Simple one-page websites start from ₹25,000"));
//! ```
//!
//! The engine is a pure, synchronous function of its input and the static
//! knowledge base; all I/O (HTTP, webhook relays, the CLI) lives in the
//! layers around it.

pub mod config;
pub mod engine;
pub mod gateway;
pub mod knowledge;
pub mod session;
