//! Content block model, row shaping and display formatting.
//!
//! # Design
//! - Rows from the API are shaped into [`ContentBlock`]s here so components
//!   only render.
//! - Timestamps are kept as local naive date-times; conversion from the wire
//!   happens once, at shaping time.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use lectern_api_models::{AnnouncementRow, InstructorRow, PageRow};

/// Endpoint assessment submissions are posted to.
pub const DEFAULT_SUBMISSION_URL: &str = "https://www.example-api.com/submit";

/// Placeholder shown for pages without blocks.
pub const NO_CONTENT_TEXT: &str = "This page has no content.";

const FILE_SIZE_UNITS: [&str; 5] = ["B", "kB", "MB", "GB", "TB"];

/// One renderable block of page content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentBlock {
    /// Server id of the block, when it has one.
    pub id: Option<i64>,
    /// Heading.
    pub title: Option<String>,
    /// Body text; newlines become line breaks.
    pub body: Option<String>,
    /// Author line.
    pub author: Option<String>,
    /// Creation time.
    pub date: Option<NaiveDateTime>,
    /// Last edit time.
    pub date_edit: Option<NaiveDateTime>,
    /// Attached file URLs.
    pub files: Vec<String>,
    /// Assessment attached to the block.
    pub assessment: Option<Assessment>,
}

/// Assessment details; each part renders only when present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assessment {
    /// Submission deadline.
    pub due_date: Option<NaiveDateTime>,
    /// Submission endpoint.
    pub submit: Option<String>,
    /// Files submitted earlier.
    pub previous_submissions: Option<Vec<SubmittedFile>>,
}

/// A file picked for, or already sent with, a submission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmittedFile {
    /// File name as chosen by the student.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
}

impl SubmittedFile {
    /// File with `name` and `size` in bytes.
    #[must_use]
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Size rendered through [`human_file_size`].
    #[must_use]
    pub fn size_label(&self) -> String {
        human_file_size(self.size)
    }
}

/// One graded assessment inside a [`ResultBlock`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssessmentResult {
    /// Assessment title.
    pub title: String,
    /// Due date as displayed.
    pub due_date: String,
    /// Marking status.
    pub status: String,
    /// Link to the submitted file.
    pub submission: String,
    /// Link to the feedback file.
    pub feedback: String,
}

/// Results summary for one milestone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultBlock {
    /// Milestone title.
    pub title: String,
    /// Graded assessments.
    pub assessments: Vec<AssessmentResult>,
}

impl From<PageRow> for ContentBlock {
    fn from(row: PageRow) -> Self {
        let assessment = (row.assessment == Some(1)).then(|| Assessment {
            due_date: row.due_date.as_deref().and_then(parse_timestamp),
            submit: Some(DEFAULT_SUBMISSION_URL.to_string()),
            previous_submissions: Some(Vec::new()),
        });
        Self {
            id: Some(row.content_id),
            title: row.title,
            body: row.text,
            author: None,
            date: row.date.as_deref().and_then(parse_timestamp),
            date_edit: None,
            files: Vec::new(),
            assessment,
        }
    }
}

impl From<AnnouncementRow> for ContentBlock {
    fn from(row: AnnouncementRow) -> Self {
        Self {
            body: row.announcement,
            author: row.author,
            date: row.announce_time.as_deref().and_then(parse_timestamp),
            date_edit: row.edit.as_deref().and_then(parse_timestamp),
            ..Self::default()
        }
    }
}

impl From<InstructorRow> for ContentBlock {
    fn from(row: InstructorRow) -> Self {
        Self {
            title: Some(format!("{} {} {}", row.title, row.first_name, row.last_name)),
            body: Some(format!("Email: {}\nActive: {}", row.email, row.active)),
            ..Self::default()
        }
    }
}

/// Split a body into the lines rendered between `<br/>` separators.
#[must_use]
pub fn body_lines(body: &str) -> Vec<&str> {
    body.split('\n').collect()
}

/// Human-readable byte count in base 1024 (`1536` -> `"1.5 kB"`).
#[must_use]
pub fn human_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut exponent = 0;
    let mut scale = 1_u64;
    while exponent + 1 < FILE_SIZE_UNITS.len() && bytes / scale >= 1024 {
        scale *= 1024;
        exponent += 1;
    }
    #[allow(clippy::cast_precision_loss)]
    let value = bytes as f64 / scale as f64;
    let rendered = format!("{value:.2}");
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", FILE_SIZE_UNITS[exponent])
}

/// Parse a wire timestamp into local time.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    parse_timestamp_in(raw, &Local)
}

/// Parse a wire timestamp, converting zoned values into `tz`.
///
/// Accepts RFC 3339 and the naive `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`
/// and `YYYY-MM-DD` forms; naive values are taken as already local.
#[must_use]
pub fn parse_timestamp_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(zoned) = DateTime::parse_from_rfc3339(raw) {
        return Some(zoned.with_timezone(tz).naive_local());
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// `DD/MM/YYYY HH:mm:ss`.
#[must_use]
pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format("%d/%m/%Y %H:%M:%S").to_string()
}

/// `DD/MM/YYYY by HH:mm:ss`.
#[must_use]
pub fn format_due_date(value: &NaiveDateTime) -> String {
    value.format("%d/%m/%Y by %H:%M:%S").to_string()
}

/// `DD/MM/YYYY`, falling back to the raw text when it cannot be parsed.
#[must_use]
pub fn format_day(raw: &str) -> String {
    parse_timestamp(raw).map_or_else(
        || raw.to_string(),
        |value| value.format("%d/%m/%Y").to_string(),
    )
}

/// ISO-8601 UTC form sent back to the server for due dates.
#[must_use]
pub fn to_wire_timestamp<Tz: TimeZone>(value: &NaiveDateTime, tz: &Tz) -> Option<String> {
    let zoned = tz.from_local_datetime(value).earliest()?;
    Some(
        zoned
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}

/// Current local time, used as the default due date.
#[must_use]
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}
