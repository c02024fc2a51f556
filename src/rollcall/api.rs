//! # API Facade
//!
//! `RollcallApi` is the single entry point for all roster operations,
//! regardless of the UI driving it (one-shot subcommands or the interactive
//! browse session).
//!
//! Unlike a pure dispatcher it carries the two pieces of per-session state
//! the form workflow needs:
//!
//! - `editing`: which student the form currently targets (`None` = create
//!   mode). The rendered form mode must always match this field.
//! - `pending_search`: the active search query. After any successful
//!   mutation the view is refreshed against this field — re-run the search
//!   if one is active, otherwise reload the full list.
//!
//! Mutations only change this state **after** the backend call succeeds, so
//! a failed submit or delete leaves the form mode and the active query
//! untouched. The one deliberate exception is `load_all`: emptying the
//! search box drops the active query up front, whether or not the reload
//! succeeds.
//!
//! The facade never prints and never reads stdin. Confirmation prompts and
//! rendering belong to the CLI layer.

use crate::backend::StudentBackend;
use crate::commands::{self, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{FormMode, StudentDraft};

/// The main API facade for roster operations.
///
/// Generic over `StudentBackend` to allow an in-memory backend in tests.
pub struct RollcallApi<B: StudentBackend> {
    backend: B,
    editing: Option<i64>,
    pending_search: Option<String>,
}

impl<B: StudentBackend> RollcallApi<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            editing: None,
            pending_search: None,
        }
    }

    pub fn form_mode(&self) -> FormMode {
        match self.editing {
            Some(id) => FormMode::Edit(id),
            None => FormMode::Create,
        }
    }

    /// The query the current view reflects, if a search is active.
    pub fn active_query(&self) -> Option<&str> {
        self.pending_search.as_deref()
    }

    /// Fetch and show the full collection; clears any active search.
    ///
    /// The clear happens before the fetch: once the search box is emptied
    /// the old query must never drive a later refresh, even if this reload
    /// itself fails.
    pub fn load_all(&mut self) -> Result<CmdResult> {
        self.pending_search = None;
        commands::list::run(&self.backend, None)
    }

    /// Run a search and make it the active view filter.
    pub fn search(&mut self, query: &str) -> Result<CmdResult> {
        let result = commands::search::run(&self.backend, query)?;
        self.pending_search = Some(query.to_string());
        Ok(result)
    }

    /// Create or update depending on the form mode.
    ///
    /// On success the form returns to create mode and the result carries the
    /// refreshed view (active search re-run, or full list). On failure the
    /// error propagates and the form mode is left as it was.
    pub fn submit_form(&mut self, draft: &StudentDraft) -> Result<CmdResult> {
        let mut result = match self.editing {
            Some(id) => commands::update::run(&mut self.backend, id, draft)?,
            None => commands::add::run(&mut self.backend, draft)?,
        };
        self.editing = None;
        self.attach_refreshed_view(&mut result);
        Ok(result)
    }

    /// Fetch one student and switch the form to edit mode.
    pub fn begin_edit(&mut self, id: i64) -> Result<CmdResult> {
        let result = commands::get::run(&self.backend, id)?;
        self.editing = Some(id);
        Ok(result)
    }

    /// Delete one student. The caller has already confirmed interactively;
    /// declining the confirmation must mean this is never called.
    pub fn delete_one(&mut self, id: i64) -> Result<CmdResult> {
        let mut result = commands::delete::run(&mut self.backend, id)?;
        if self.editing == Some(id) {
            self.editing = None;
        }
        self.attach_refreshed_view(&mut result);
        Ok(result)
    }

    /// Reset the form to create mode without touching the backend.
    pub fn clear_form(&mut self) {
        self.editing = None;
    }

    pub fn list(&self, grade: Option<&str>) -> Result<CmdResult> {
        commands::list::run(&self.backend, grade)
    }

    pub fn get(&self, id: i64) -> Result<CmdResult> {
        commands::get::run(&self.backend, id)
    }

    pub fn stats(&self) -> Result<CmdResult> {
        commands::stats::run(&self.backend)
    }

    /// Re-fetch the view a successful mutation invalidated: the active
    /// search if one is set, the full list otherwise. A refresh failure is
    /// reported as a message rather than discarding the mutation's outcome.
    fn attach_refreshed_view(&self, result: &mut CmdResult) {
        let refreshed = match &self.pending_search {
            Some(query) => commands::search::run(&self.backend, query),
            None => commands::list::run(&self.backend, None),
        };
        match refreshed {
            Ok(view) => {
                result.students = view.students;
                result.search = view.search;
            }
            Err(e) => result.add_message(CmdMessage::error(format!(
                "Error loading students: {}",
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::InMemoryBackend;
    use crate::error::{Result, RollcallError};
    use crate::model::{SearchResults, Student};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        List,
        Search(String),
        Get(i64),
        Create,
        Update(i64),
        Delete(i64),
    }

    /// Wraps the in-memory backend and logs every request issued, so tests
    /// can assert on exact request counts and targets. Setting the fuse
    /// makes the next list request fail once, like a transient outage.
    struct Recording {
        inner: InMemoryBackend,
        calls: Rc<RefCell<Vec<Call>>>,
        fail_next_list: Rc<Cell<bool>>,
    }

    impl Recording {
        fn new(inner: InMemoryBackend) -> (Self, Rc<RefCell<Vec<Call>>>) {
            let (recording, calls, _) = Self::with_list_fuse(inner);
            (recording, calls)
        }

        fn with_list_fuse(
            inner: InMemoryBackend,
        ) -> (Self, Rc<RefCell<Vec<Call>>>, Rc<Cell<bool>>) {
            let calls = Rc::new(RefCell::new(Vec::new()));
            let fuse = Rc::new(Cell::new(false));
            (
                Self {
                    inner,
                    calls: Rc::clone(&calls),
                    fail_next_list: Rc::clone(&fuse),
                },
                calls,
                fuse,
            )
        }
    }

    impl StudentBackend for Recording {
        fn list(&self) -> Result<Vec<Student>> {
            self.calls.borrow_mut().push(Call::List);
            if self.fail_next_list.replace(false) {
                return Err(RollcallError::Api("server returned 502".into()));
            }
            self.inner.list()
        }

        fn search(&self, query: &str) -> Result<SearchResults> {
            self.calls.borrow_mut().push(Call::Search(query.into()));
            self.inner.search(query)
        }

        fn get(&self, id: i64) -> Result<Student> {
            self.calls.borrow_mut().push(Call::Get(id));
            self.inner.get(id)
        }

        fn create(&mut self, draft: &StudentDraft) -> Result<()> {
            self.calls.borrow_mut().push(Call::Create);
            self.inner.create(draft)
        }

        fn update(&mut self, id: i64, draft: &StudentDraft) -> Result<()> {
            self.calls.borrow_mut().push(Call::Update(id));
            self.inner.update(id, draft)
        }

        fn delete(&mut self, id: i64) -> Result<()> {
            self.calls.borrow_mut().push(Call::Delete(id));
            self.inner.delete(id)
        }
    }

    fn seeded() -> InMemoryBackend {
        let mut backend = InMemoryBackend::new();
        backend
            .create(&StudentDraft::new("Alice", 20, "A"))
            .unwrap();
        backend.create(&StudentDraft::new("Bob", 21, "B")).unwrap();
        backend
    }

    #[test]
    fn submit_in_create_mode_issues_one_create_then_one_list() {
        let (recording, calls) = Recording::new(InMemoryBackend::new());
        let mut api = RollcallApi::new(recording);

        let result = api.submit_form(&StudentDraft::new("Alice", 20, "A")).unwrap();

        assert_eq!(*calls.borrow(), vec![Call::Create, Call::List]);
        assert_eq!(api.form_mode(), FormMode::Create);
        assert_eq!(result.students.len(), 1);
        assert!(result.search.is_none());
    }

    #[test]
    fn submit_under_active_search_refreshes_the_search_not_the_list() {
        let (recording, calls) = Recording::new(seeded());
        let mut api = RollcallApi::new(recording);

        api.search("ali").unwrap();
        calls.borrow_mut().clear();

        let result = api.submit_form(&StudentDraft::new("Alison", 19, "C")).unwrap();

        assert_eq!(
            *calls.borrow(),
            vec![Call::Create, Call::Search("ali".into())]
        );
        let info = result.search.expect("search banner preserved");
        assert_eq!(info.query, "ali");
        assert_eq!(info.total, 2);
    }

    #[test]
    fn submit_in_edit_mode_targets_the_edited_id_and_resets_mode() {
        let (recording, calls) = Recording::new(seeded());
        let mut api = RollcallApi::new(recording);

        let result = api.begin_edit(1).unwrap();
        assert_eq!(result.student.as_ref().unwrap().name, "Alice");
        assert_eq!(api.form_mode(), FormMode::Edit(1));
        calls.borrow_mut().clear();

        api.submit_form(&StudentDraft::new("Alice", 22, "A")).unwrap();

        assert_eq!(*calls.borrow(), vec![Call::Update(1), Call::List]);
        assert_eq!(api.form_mode(), FormMode::Create);
    }

    #[test]
    fn failed_submit_keeps_edit_mode_and_skips_the_refresh() {
        let (recording, calls) = Recording::new(seeded());
        let mut api = RollcallApi::new(recording);

        api.begin_edit(2).unwrap();
        calls.borrow_mut().clear();

        let err = api
            .submit_form(&StudentDraft::new("", 21, "B"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: name");

        // One rejected update, no view refresh, mode unchanged.
        assert_eq!(*calls.borrow(), vec![Call::Update(2)]);
        assert_eq!(api.form_mode(), FormMode::Edit(2));
    }

    #[test]
    fn failed_begin_edit_leaves_create_mode() {
        let (recording, _calls) = Recording::new(seeded());
        let mut api = RollcallApi::new(recording);

        assert!(api.begin_edit(99).is_err());
        assert_eq!(api.form_mode(), FormMode::Create);
    }

    #[test]
    fn delete_refreshes_per_the_active_search_rule() {
        let (recording, calls) = Recording::new(seeded());
        let mut api = RollcallApi::new(recording);

        // No active search: delete then reload the full list.
        api.delete_one(2).unwrap();
        assert_eq!(*calls.borrow(), vec![Call::Delete(2), Call::List]);

        // Active search: delete re-runs the search.
        api.search("ali").unwrap();
        calls.borrow_mut().clear();
        api.delete_one(1).unwrap();
        assert_eq!(
            *calls.borrow(),
            vec![Call::Delete(1), Call::Search("ali".into())]
        );
    }

    #[test]
    fn deleting_the_edited_student_clears_edit_mode() {
        let (recording, _calls) = Recording::new(seeded());
        let mut api = RollcallApi::new(recording);

        api.begin_edit(1).unwrap();
        api.delete_one(1).unwrap();
        assert_eq!(api.form_mode(), FormMode::Create);
    }

    #[test]
    fn load_all_clears_the_active_search() {
        let (recording, calls) = Recording::new(seeded());
        let mut api = RollcallApi::new(recording);

        api.search("ali").unwrap();
        assert_eq!(api.active_query(), Some("ali"));

        api.load_all().unwrap();
        assert_eq!(api.active_query(), None);
        calls.borrow_mut().clear();

        api.submit_form(&StudentDraft::new("Dan", 23, "C")).unwrap();
        assert_eq!(*calls.borrow(), vec![Call::Create, Call::List]);
    }

    #[test]
    fn emptied_search_stays_cleared_when_the_reload_fails() {
        let (recording, calls, fail_list) = Recording::with_list_fuse(seeded());
        let mut api = RollcallApi::new(recording);

        api.search("ali").unwrap();
        fail_list.set(true);
        assert!(api.load_all().is_err());

        // The query is gone despite the failed reload.
        assert_eq!(api.active_query(), None);

        calls.borrow_mut().clear();
        api.submit_form(&StudentDraft::new("Dan", 23, "C")).unwrap();
        assert_eq!(*calls.borrow(), vec![Call::Create, Call::List]);
    }

    #[test]
    fn clear_form_resets_mode_without_requests() {
        let (recording, calls) = Recording::new(seeded());
        let mut api = RollcallApi::new(recording);

        api.begin_edit(1).unwrap();
        calls.borrow_mut().clear();

        api.clear_form();
        assert_eq!(api.form_mode(), FormMode::Create);
        assert!(calls.borrow().is_empty());
    }
}
