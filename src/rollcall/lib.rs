//! # Rollcall Architecture
//!
//! Rollcall is a **UI-agnostic client library** for a student-roster REST
//! service, with a CLI shipped alongside it. The binary is a thin client of
//! the library, not the other way around.
//!
//! ## The Layer Stack
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs, print.rs, session.rs)         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! │  - Owns the confirmation prompt and the browse event loop   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Facade over commands, plus the form/session state:       │
//! │    which record is being edited, which search is active     │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure per-operation logic                                 │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Backend Layer (backend/)                                   │
//! │  - Abstract StudentBackend trait                            │
//! │  - HttpBackend (production), InMemoryBackend (testing)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Session state
//!
//! The roster lives on the server; the client's only durable state is a
//! small config file. The per-session state — edit vs. create mode and the
//! active search query — lives on the API facade, and the rule that every
//! successful mutation refreshes the view against the active search is
//! enforced there, not in each UI.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward (API, commands, backend), code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//! - **Never** assumes a terminal environment
//!
//! In particular, the interactive delete confirmation belongs to the CLI
//! layer: if the user declines, the API is simply never called.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade—entry point for all operations
//! - [`commands`]: Per-operation logic
//! - [`backend`]: Transport abstraction and implementations
//! - [`model`]: Core data types (`Student`, `StudentDraft`, `FormMode`)
//! - [`debounce`]: The search debounce state machine
//! - [`banner`]: Transient notices for the interactive session
//! - [`config`]: Deployment configuration (base URL, prefix, timeout)
//! - [`error`]: Error types
//! - CLI modules (`args`, `print`, `session`) live with the binary and are
//!   not part of the lib API

pub mod api;
pub mod backend;
pub mod banner;
pub mod commands;
pub mod config;
pub mod debounce;
pub mod error;
pub mod model;
