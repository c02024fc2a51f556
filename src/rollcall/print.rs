use chrono::{DateTime, Utc};
use colored::Colorize;
use rollcall::commands::{CmdMessage, MessageLevel, RosterStats, SearchInfo};
use rollcall::model::Student;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const AGE_WIDTH: usize = 4;
const GRADE_WIDTH: usize = 10;

/// Strip control characters from server- or user-supplied text before it
/// reaches the terminal. Terminal escape sequences are this client's
/// equivalent of the markup-injection problem.
pub(crate) fn sanitize(s: &str) -> String {
    s.chars().filter(|c| !c.is_control()).collect()
}

pub(crate) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        let content = sanitize(&message.content);
        match message.level {
            MessageLevel::Info => println!("{}", content.dimmed()),
            MessageLevel::Success => println!("{}", content.green()),
            MessageLevel::Warning => println!("{}", content.yellow()),
            MessageLevel::Error => println!("{}", content.red()),
        }
    }
}

pub(crate) fn print_search_banner(info: &SearchInfo) {
    println!("{}", sanitize(&info.headline()).cyan());
}

/// Render the list view. The two empty states are distinct on purpose: "no
/// students exist" invites adding one, "no matches" offers a way out of the
/// active search.
pub(crate) fn print_students(students: &[Student], active_query: Option<&str>) {
    if students.is_empty() {
        match active_query {
            Some(query) => {
                println!("No students matching \"{}\".", sanitize(query));
                println!("{}", "Run `rollcall list` to clear the search.".dimmed());
            }
            None => {
                println!("No students yet.");
                println!(
                    "{}",
                    "Add your first student: rollcall add <name> <age> <grade>".dimmed()
                );
            }
        }
        return;
    }

    for student in students {
        let id_str = format!("{}. ", student.id);
        let age_str = format!("{:>width$}", student.age, width = AGE_WIDTH);
        let grade = truncate_to_width(&sanitize(&student.grade), GRADE_WIDTH);
        let grade_str = format!(
            "{}{}",
            grade,
            " ".repeat(GRADE_WIDTH.saturating_sub(grade.width()))
        );
        let time_ago = format_time_ago(student.created_at);

        let fixed_width = id_str.width() + AGE_WIDTH + 2 + GRADE_WIDTH + 2 + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);

        let name = truncate_to_width(&sanitize(&student.name), available);
        let padding = available.saturating_sub(name.width());

        println!(
            "{}{}{}  {} {} {}",
            id_str.yellow(),
            name,
            " ".repeat(padding),
            age_str,
            grade_str,
            time_ago.dimmed()
        );
    }
}

pub(crate) fn print_student(student: &Student) {
    println!(
        "{} {}",
        format!("#{}", student.id).yellow(),
        sanitize(&student.name).bold()
    );
    println!("--------------------------------");
    println!("Age:   {}", student.age);
    println!("Grade: {}", sanitize(&student.grade));
    if let Some(created) = student.created_at {
        println!("Added: {}", format_time_ago(Some(created)).trim_start());
    }
    if let Some(updated) = student.updated_at {
        println!("Updated: {}", format_time_ago(Some(updated)).trim_start());
    }
}

pub(crate) fn print_stats(stats: &RosterStats) {
    println!("Total students: {}", stats.total);
    if stats.grades.is_empty() {
        return;
    }
    println!();
    println!("{:<12} {:>6}  {}", "Grade", "Count", "Avg age");
    for grade in &stats.grades {
        println!(
            "{:<12} {:>6}  {:.1}",
            truncate_to_width(&sanitize(&grade.grade), 12),
            grade.count,
            grade.avg_age
        );
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: Option<DateTime<Utc>>) -> String {
    let Some(timestamp) = timestamp else {
        return " ".repeat(TIME_WIDTH);
    };

    let now = Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
