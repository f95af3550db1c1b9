//! iCalendar export for assignment due dates.
//!
//! Pure formatting: one VCALENDAR wrapping one VEVENT, RFC 5545 text with
//! CRLF line endings, no timezone (floating local time).

use crate::models::{Assignment, Course};

/// Escape text per RFC 5545 §3.3.11: backslash, comma, semicolon, newline.
fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            other => out.push(other),
        }
    }
    out
}

/// Serialize the assignment's due date as a single-event calendar.
///
/// DTSTART is the due date in floating local time; DTSTAMP is the UTC
/// instant the export was generated, per RFC 5545 §3.8.7.2.
pub fn due_date_event(assignment: &Assignment, course: &Course) -> String {
    let start = assignment.due_date.format("%Y%m%dT%H%M%S");
    let generated = chrono::Utc::now().format("%Y%m%dT%H%M%SZ");
    let summary = escape_text(&format!("{} due: {}", course.code, assignment.title));
    let description = escape_text(assignment.description.as_deref().unwrap_or(""));

    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//registrar//student-information-system//EN".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:assignment-{}@registrar", assignment.id),
        format!("DTSTAMP:{}", generated),
        format!("DTSTART:{}", start),
        format!("SUMMARY:{}", summary),
    ];
    if !description.is_empty() {
        lines.push(format!("DESCRIPTION:{}", description));
    }
    lines.push("END:VEVENT".to_string());
    lines.push("END:VCALENDAR".to_string());

    let mut out = lines.join("\r\n");
    out.push_str("\r\n");
    out
}
