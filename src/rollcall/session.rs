//! Interactive browse session: a list view with search-as-you-type, a
//! create/edit form, confirm-before-delete, and a transient banner.
//!
//! Single-threaded event loop: poll the keyboard with a short timeout,
//! check the debounce deadline and banner expiry in between, and perform
//! blocking HTTP calls inline. The screen is redrawn from session state on
//! every pass, so the rendered form mode can never drift from the API's.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use colored::Colorize;
use console::Term;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use rollcall::api::RollcallApi;
use rollcall::backend::StudentBackend;
use rollcall::banner::Banner;
use rollcall::commands::{CmdMessage, CmdResult, MessageLevel, SearchInfo};
use rollcall::debounce::Debouncer;
use rollcall::error::{Result, RollcallError};
use rollcall::model::{FormMode, Student, StudentDraft};

use crate::print::sanitize;

const TICK: Duration = Duration::from_millis(50);

pub(crate) fn run<B: StudentBackend>(api: RollcallApi<B>) -> Result<()> {
    let term = Term::stdout();

    // Restore the terminal even if rendering panics.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        original_hook(info);
    }));

    enable_raw_mode()?;
    term.hide_cursor()?;

    let mut session = Session::new(api);
    let result = session.event_loop(&term);

    disable_raw_mode()?;
    term.show_cursor()?;
    term.clear_screen()?;
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Roster,
    Form,
    Confirm(i64),
}

#[derive(Debug, Default)]
struct FormState {
    name: String,
    age: String,
    grade: String,
    field: usize,
}

impl FormState {
    fn from_student(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            age: student.age.to_string(),
            grade: student.grade.clone(),
            field: 0,
        }
    }

    fn field_mut(&mut self) -> &mut String {
        match self.field {
            0 => &mut self.name,
            1 => &mut self.age,
            _ => &mut self.grade,
        }
    }

    fn next_field(&mut self) {
        self.field = (self.field + 1) % 3;
    }

    fn prev_field(&mut self) {
        self.field = (self.field + 2) % 3;
    }

    fn draft(&self) -> Result<StudentDraft> {
        if self.name.trim().is_empty() {
            return Err(RollcallError::InvalidInput("Name cannot be empty".into()));
        }
        let age: u32 = self
            .age
            .trim()
            .parse()
            .map_err(|_| RollcallError::InvalidInput("Age must be a number".into()))?;
        if self.grade.trim().is_empty() {
            return Err(RollcallError::InvalidInput("Grade cannot be empty".into()));
        }
        Ok(StudentDraft::new(self.name.trim(), age, self.grade.trim()))
    }
}

struct Session<B: StudentBackend> {
    api: RollcallApi<B>,
    debouncer: Debouncer,
    banner: Banner,
    students: Vec<Student>,
    search_info: Option<SearchInfo>,
    load_failed: bool,
    search: String,
    selected: usize,
    focus: Focus,
    form: FormState,
}

impl<B: StudentBackend> Session<B> {
    fn new(api: RollcallApi<B>) -> Self {
        Self {
            api,
            debouncer: Debouncer::default(),
            banner: Banner::new(),
            students: Vec::new(),
            search_info: None,
            load_failed: false,
            search: String::new(),
            selected: 0,
            focus: Focus::Roster,
            form: FormState::default(),
        }
    }

    fn event_loop(&mut self, term: &Term) -> Result<()> {
        self.reload();
        loop {
            self.render(term)?;
            if event::poll(TICK)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key) {
                        break;
                    }
                }
            }
            self.tick(Instant::now());
        }
        Ok(())
    }

    /// Fire the deferred search if its window has elapsed.
    fn tick(&mut self, now: Instant) {
        if let Some(query) = self.debouncer.poll(now) {
            self.run_search(&query);
        }
    }

    /// Returns true when the session should end.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        match self.focus {
            Focus::Confirm(id) => {
                match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') => self.delete_confirmed(id),
                    _ => self.notify(CmdMessage::info("Delete cancelled.")),
                }
                self.focus = Focus::Roster;
                false
            }
            Focus::Form => {
                self.handle_form_key(key);
                false
            }
            Focus::Roster => self.handle_roster_key(key),
        }
    }

    fn handle_roster_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                if self.search.is_empty() {
                    return true;
                }
                self.search.clear();
                self.on_search_input();
            }
            KeyCode::Enter => {
                if let Some(query) = self.debouncer.flush() {
                    self.run_search(&query);
                }
            }
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < self.students.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.api.clear_form();
                self.form = FormState::default();
                self.focus = Focus::Form;
            }
            KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.begin_edit_selected();
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(student) = self.students.get(self.selected) {
                    self.focus = Focus::Confirm(student.id);
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.push(c);
                self.on_search_input();
            }
            KeyCode::Backspace => {
                self.search.pop();
                self.on_search_input();
            }
            _ => {}
        }
        false
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.api.clear_form();
                self.focus = Focus::Roster;
            }
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Enter => {
                if self.form.field < 2 {
                    self.form.next_field();
                } else {
                    self.submit_form();
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.form.field_mut().push(c);
            }
            KeyCode::Backspace => {
                self.form.field_mut().pop();
            }
            _ => {}
        }
    }

    fn on_search_input(&mut self) {
        if self.debouncer.input(&self.search, Instant::now()) {
            self.reload();
        }
    }

    fn reload(&mut self) {
        match self.api.load_all() {
            Ok(result) => {
                self.apply_view(result);
            }
            Err(e) => {
                self.students.clear();
                self.search_info = None;
                self.load_failed = true;
                self.notify(CmdMessage::error(format!("Error loading students: {}", e)));
            }
        }
    }

    fn run_search(&mut self, query: &str) {
        match self.api.search(query) {
            Ok(result) => {
                self.apply_view(result);
                self.selected = 0;
            }
            // Prior content stays on screen.
            Err(e) => self.notify(CmdMessage::error(format!(
                "Error searching students: {}",
                e
            ))),
        }
    }

    fn begin_edit_selected(&mut self) {
        let Some(id) = self.students.get(self.selected).map(|s| s.id) else {
            return;
        };
        match self.api.begin_edit(id) {
            Ok(result) => {
                if let Some(student) = &result.student {
                    self.form = FormState::from_student(student);
                    self.focus = Focus::Form;
                }
            }
            Err(e) => self.notify(CmdMessage::error(format!("Error loading student: {}", e))),
        }
    }

    fn submit_form(&mut self) {
        let draft = match self.form.draft() {
            Ok(draft) => draft,
            Err(e) => {
                self.notify(CmdMessage::error(e.to_string()));
                return;
            }
        };

        let mode = self.api.form_mode();
        match self.api.submit_form(&draft) {
            Ok(result) => {
                self.show_first_message(&result);
                self.apply_view(result);
                self.form = FormState::default();
                self.focus = Focus::Roster;
            }
            Err(e) => {
                let context = match mode {
                    FormMode::Edit(_) => "Error updating student",
                    FormMode::Create => "Error adding student",
                };
                // Form contents and edit mode are left as they were.
                self.notify(CmdMessage::error(format!("{}: {}", context, e)));
            }
        }
    }

    fn delete_confirmed(&mut self, id: i64) {
        match self.api.delete_one(id) {
            Ok(result) => {
                self.show_first_message(&result);
                self.apply_view(result);
            }
            Err(e) => self.notify(CmdMessage::error(format!("Error deleting student: {}", e))),
        }
    }

    fn apply_view(&mut self, result: CmdResult) {
        self.students = result.students;
        self.search_info = result.search;
        self.load_failed = false;
        if self.selected >= self.students.len() {
            self.selected = self.students.len().saturating_sub(1);
        }
    }

    fn show_first_message(&mut self, result: &CmdResult) {
        if let Some(message) = result.messages.first() {
            self.notify(message.clone());
        }
    }

    fn notify(&mut self, message: CmdMessage) {
        self.banner.show(message, Instant::now());
    }

    fn render(&mut self, term: &Term) -> Result<()> {
        let lines = self.view_lines(Instant::now());
        term.clear_screen()?;
        let mut out = io::stdout();
        for line in &lines {
            write!(out, "{}\r\n", line)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Everything on screen, top to bottom, as plain lines.
    fn view_lines(&mut self, now: Instant) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();

        lines.push("rollcall — students".bold().to_string());
        lines.push(String::new());
        lines.push(format!("Search: {}", sanitize(&self.search)));

        match self.banner.current(now) {
            Some(message) => {
                let content = sanitize(&message.content);
                let styled = match message.level {
                    MessageLevel::Info => content.dimmed(),
                    MessageLevel::Success => content.green(),
                    MessageLevel::Warning => content.yellow(),
                    MessageLevel::Error => content.red(),
                };
                lines.push(styled.to_string());
            }
            None => lines.push(String::new()),
        }

        if let Some(info) = &self.search_info {
            lines.push(sanitize(&info.headline()).cyan().to_string());
        }
        lines.push(String::new());

        if self.load_failed {
            lines.push("Failed to load students".red().to_string());
        } else if self.students.is_empty() {
            if self.api.active_query().is_some() {
                lines.push("No students match your search.".to_string());
                lines.push("(Esc to clear the search)".dimmed().to_string());
            } else {
                lines.push("No students yet.".to_string());
                lines.push("(Ctrl-A to add the first one)".dimmed().to_string());
            }
        } else {
            for (i, student) in self.students.iter().enumerate() {
                let row = format!(
                    "{:>4}. {:<30} {:>4}  {}",
                    student.id,
                    sanitize(&student.name),
                    student.age,
                    sanitize(&student.grade)
                );
                if i == self.selected && self.focus == Focus::Roster {
                    lines.push(row.reversed().to_string());
                } else {
                    lines.push(row);
                }
            }
        }
        lines.push(String::new());

        match self.focus {
            Focus::Form => {
                let mode = self.api.form_mode();
                lines.push(mode.heading().bold().to_string());
                let fields = [
                    ("Name", &self.form.name),
                    ("Age", &self.form.age),
                    ("Grade", &self.form.grade),
                ];
                for (i, (label, value)) in fields.iter().enumerate() {
                    let marker = if i == self.form.field { "▸" } else { " " };
                    lines.push(format!("{} {:<6} {}", marker, label, sanitize(value)));
                }
                lines.push(
                    format!("Enter: {} · Tab: next field · Esc: cancel", mode.submit_label())
                        .dimmed()
                        .to_string(),
                );
            }
            Focus::Confirm(id) => {
                lines.push(
                    format!("Delete student {}? [y/N]", id)
                        .yellow()
                        .to_string(),
                );
            }
            Focus::Roster => {
                lines.push(
                    "type to search · Enter: search now · ↑/↓ select · Ctrl-A add · Ctrl-E edit · Ctrl-D delete · Esc quit"
                        .dimmed()
                        .to_string(),
                );
            }
        }

        lines
    }
}
