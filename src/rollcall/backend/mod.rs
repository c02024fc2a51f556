//! # Backend Layer
//!
//! This module defines the transport abstraction for rollcall. The
//! [`StudentBackend`] trait is the seam between the command layer and the
//! remote roster service.
//!
//! ## Design Rationale
//!
//! The backend is abstracted behind a trait to:
//! - Enable **testing** with `InMemoryBackend` (no network needed)
//! - Keep command logic **decoupled** from HTTP details
//!
//! ## Implementations
//!
//! - [`http::HttpBackend`]: Production client speaking HTTP/JSON to the
//!   configured base URL. One blocking request at a time; no retries.
//!
//! - [`memory::InMemoryBackend`]: In-memory fake for tests. Emulates the
//!   server's validation rules and search semantics so command tests see
//!   realistic error payloads.
//!
//! ## Contract notes
//!
//! The server owns ids and timestamps. `create`/`update`/`delete` return
//! only acknowledgement; callers re-fetch via `list` or `search` to refresh
//! a view. Search matching is server-side (substring over name and grade in
//! the reference backend), and the client treats it as opaque.

use crate::error::Result;
use crate::model::{SearchResults, Student, StudentDraft};

pub mod http;
pub mod memory;

/// Abstract interface to the students resource.
pub trait StudentBackend {
    /// Fetch the full collection.
    fn list(&self) -> Result<Vec<Student>>;

    /// Fetch the subset matching `query` (server-side filter).
    fn search(&self, query: &str) -> Result<SearchResults>;

    /// Fetch one student by id.
    fn get(&self, id: i64) -> Result<Student>;

    /// Create a new student.
    fn create(&mut self, draft: &StudentDraft) -> Result<()>;

    /// Update an existing student.
    fn update(&mut self, id: i64, draft: &StudentDraft) -> Result<()>;

    /// Delete a student.
    fn delete(&mut self, id: i64) -> Result<()>;
}
