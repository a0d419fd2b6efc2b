#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Wire DTOs for the Lectern course portal API.
//!
//! The backend exposes a single endpoint that only accepts `POST`. Every call
//! sends an [`ApiRequest`] envelope and receives an [`ApiResponse`]. The
//! operation is selected by `request` (`query`, `update` or `login`) and, for
//! queries and updates, by the `query` discriminator inside `args`.
//!
//! Row types mirror the payloads as the server emits them. Text columns are
//! decoded leniently: `null`, numbers and booleans collapse into strings so a
//! single odd column does not fail a whole listing.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Top-level request discriminator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    /// Read-only query.
    Query,
    /// Mutating update.
    Update,
    /// Credential exchange for a session token.
    Login,
}

/// Request envelope posted to the API endpoint.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ApiRequest<A> {
    /// Session token; omitted for login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Request discriminator.
    pub request: RequestKind,
    /// Operation-specific arguments.
    pub args: A,
}

impl ApiRequest<QueryArgs> {
    /// Build an authenticated query envelope.
    #[must_use]
    pub fn query(token: impl Into<String>, args: QueryArgs) -> Self {
        Self {
            token: Some(token.into()),
            request: RequestKind::Query,
            args,
        }
    }
}

impl ApiRequest<UpdateArgs> {
    /// Build an authenticated update envelope.
    #[must_use]
    pub fn update(token: impl Into<String>, args: UpdateArgs) -> Self {
        Self {
            token: Some(token.into()),
            request: RequestKind::Update,
            args,
        }
    }
}

impl ApiRequest<LoginArgs> {
    /// Build an unauthenticated login envelope.
    #[must_use]
    pub const fn login(args: LoginArgs) -> Self {
        Self {
            token: None,
            request: RequestKind::Login,
            args,
        }
    }
}

impl<A> ApiRequest<A> {
    /// Borrowed copy with the token masked, for diagnostic logging.
    #[must_use]
    pub fn redacted(&self) -> ApiRequest<&A> {
        ApiRequest {
            token: self.token.as_ref().map(|_| "***".to_string()),
            request: self.request,
            args: &self.args,
        }
    }
}

/// Arguments for `request: "query"` calls.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "query", rename_all = "camelCase")]
pub enum QueryArgs {
    /// Courses a student is enrolled in.
    StudentDashboard {
        /// Student user id.
        user_id: i64,
    },
    /// Courses visible to an instructor.
    GetDashboard,
    /// Course summary record.
    CourseInfo {
        /// Course id.
        course_id: i64,
        /// Requesting user id.
        user_id: i64,
    },
    /// Flat milestone/page rows for the outline.
    Sidebar {
        /// Course id.
        course_id: i64,
    },
    /// Content rows for one page.
    GetPage {
        /// Course id.
        course_id: i64,
        /// Parent milestone id.
        milestone_id: i64,
        /// Page id.
        page_id: i64,
    },
    /// Announcement rows for a course.
    CourseAnnouncements {
        /// Course id.
        course_id: i64,
    },
    /// Every instructor attached to a course.
    GetCourseInstructors {
        /// Course id.
        course_id: i64,
    },
    /// Instructors with their teaching flag for the course.
    GetActiveCourseInstructors {
        /// Course id.
        course_id: i64,
    },
    /// Identity behind the session token.
    #[serde(rename = "getSessionUID")]
    GetSessionUid,
}

impl QueryArgs {
    /// Wire name of the query, used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::StudentDashboard { .. } => "studentDashboard",
            Self::GetDashboard => "getDashboard",
            Self::CourseInfo { .. } => "courseInfo",
            Self::Sidebar { .. } => "sidebar",
            Self::GetPage { .. } => "getPage",
            Self::CourseAnnouncements { .. } => "courseAnnouncements",
            Self::GetCourseInstructors { .. } => "getCourseInstructors",
            Self::GetActiveCourseInstructors { .. } => "getActiveCourseInstructors",
            Self::GetSessionUid => "getSessionUID",
        }
    }
}

/// Arguments for `request: "update"` calls.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "query", rename_all = "camelCase")]
pub enum UpdateArgs {
    /// Append an empty milestone of the given type.
    CreateMilestone {
        /// Course id.
        course_id: i64,
        /// Milestone group.
        milestone_type: MilestoneType,
    },
    /// Append an empty page to a milestone.
    CreatePage {
        /// Course id.
        course_id: i64,
        /// Parent milestone id.
        milestone_id: i64,
    },
    /// Remove a milestone and its pages.
    DeleteMilestone {
        /// Course id.
        course_id: i64,
        /// Milestone id.
        milestone_id: i64,
    },
    /// Remove a page.
    DeletePage {
        /// Course id.
        course_id: i64,
        /// Parent milestone id.
        milestone_id: i64,
        /// Page id.
        page_id: i64,
    },
    /// Change a milestone title.
    RenameMilestone {
        /// Course id.
        course_id: i64,
        /// Milestone id.
        milestone_id: i64,
        /// New title.
        title: String,
    },
    /// Change a page title.
    RenamePage {
        /// Course id.
        course_id: i64,
        /// Parent milestone id.
        milestone_id: i64,
        /// Page id.
        page_id: i64,
        /// New title.
        title: String,
    },
    /// Replace the content blocks of a page.
    UpdatePage {
        /// Course id.
        course_id: i64,
        /// Parent milestone id.
        milestone_id: i64,
        /// Page id.
        page_id: i64,
        /// Ordered replacement blocks.
        course_content: Vec<PageContentUpdate>,
    },
    /// Attach an instructor to the course.
    AddInstructor {
        /// Course id.
        course_id: i64,
        /// Instructor user id.
        user_id: i64,
    },
    /// Detach an instructor from the course.
    RemoveInstructor {
        /// Course id.
        course_id: i64,
        /// Instructor user id.
        user_id: i64,
    },
}

impl UpdateArgs {
    /// Wire name of the update, used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateMilestone { .. } => "createMilestone",
            Self::CreatePage { .. } => "createPage",
            Self::DeleteMilestone { .. } => "deleteMilestone",
            Self::DeletePage { .. } => "deletePage",
            Self::RenameMilestone { .. } => "renameMilestone",
            Self::RenamePage { .. } => "renamePage",
            Self::UpdatePage { .. } => "updatePage",
            Self::AddInstructor { .. } => "addInstructor",
            Self::RemoveInstructor { .. } => "removeInstructor",
        }
    }
}

/// Arguments for `request: "login"`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LoginArgs {
    /// Username as typed on the login form.
    pub user_id: String,
    /// Plain-text password; only ever sent over TLS.
    pub password: String,
}

/// Response envelope returned for every successful call.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    /// Application status code echoed by the server.
    #[serde(default)]
    pub status: Option<i64>,
    /// Human-readable status message.
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: String,
    /// Operation-specific payload.
    pub payload: T,
}

/// Payload for update calls, which carry nothing useful.
pub type EmptyPayload = Option<Value>;

/// Minimal view of an error body; only `message` is consulted.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Server-supplied failure message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Milestone group tag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MilestoneType {
    /// Work due before the course starts.
    Precourse,
    /// Work during the course.
    Incourse,
}

/// Course summary used by dashboards and course headers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseInfo {
    /// Course display name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Instructor names, preformatted by the server.
    #[serde(default, deserialize_with = "lenient_string")]
    pub instructor_name: String,
    /// Instructor email addresses.
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    /// Course id.
    pub course_id: i64,
    /// Long-form overview.
    #[serde(default, deserialize_with = "lenient_string")]
    pub overview: String,
    /// Learning outcomes.
    #[serde(default, deserialize_with = "lenient_string")]
    pub course_outcomes: String,
    /// Start date as sent by the server.
    #[serde(default, deserialize_with = "lenient_string")]
    pub commencement_date: String,
    /// Venue.
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: String,
    /// Finish date as sent by the server.
    #[serde(default, deserialize_with = "lenient_string")]
    pub finish_date: String,
    /// Progress indicator.
    #[serde(default, deserialize_with = "lenient_string")]
    pub course_progress: String,
    /// Number of milestones.
    #[serde(default, deserialize_with = "lenient_string")]
    pub milestones_count: String,
    /// Number of completed milestones.
    #[serde(default, deserialize_with = "lenient_string")]
    pub milestones_completed: String,
}

/// One flat outline row: a milestone joined with at most one of its pages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidebarRow {
    /// Milestone id.
    pub milestone_id: i64,
    /// Milestone title.
    #[serde(default, deserialize_with = "lenient_string")]
    pub milestone_title: String,
    /// Milestone group.
    #[serde(rename = "type")]
    pub milestone_type: MilestoneType,
    /// Page id; `null` for milestones without pages.
    #[serde(default)]
    pub page_id: Option<i64>,
    /// Page title; `null` for milestones without pages.
    #[serde(default)]
    pub page_title: Option<String>,
}

/// Page entry inside a [`MilestoneData`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageRecord {
    /// Page id.
    pub id: i64,
    /// Page title.
    pub title: String,
}

/// Milestone with its ordered pages, grouped from [`SidebarRow`]s.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MilestoneData {
    /// Milestone id.
    pub id: i64,
    /// Milestone title.
    pub title: String,
    /// Milestone group.
    pub milestone_type: MilestoneType,
    /// Pages in server order.
    pub pages: Vec<PageRecord>,
}

/// Group flat sidebar rows into milestones.
///
/// Milestones keep the order in which their id first appears; pages keep row
/// order within their milestone. A row whose page title is `null` only
/// registers the milestone and never adds a page. A row with a title but a
/// `null` page id is skipped the same way, since a page without an id cannot
/// be addressed.
#[must_use]
pub fn group_sidebar_rows(rows: Vec<SidebarRow>) -> Vec<MilestoneData> {
    let mut milestones: Vec<MilestoneData> = Vec::new();
    let mut positions: HashMap<i64, usize> = HashMap::new();
    for row in rows {
        let slot = *positions.entry(row.milestone_id).or_insert_with(|| {
            milestones.push(MilestoneData {
                id: row.milestone_id,
                title: row.milestone_title.clone(),
                milestone_type: row.milestone_type,
                pages: Vec::new(),
            });
            milestones.len() - 1
        });
        if let (Some(id), Some(title)) = (row.page_id, row.page_title)
            && let Some(milestone) = milestones.get_mut(slot)
        {
            milestone.pages.push(PageRecord { id, title });
        }
    }
    milestones
}

/// One content block row of a page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageRow {
    /// Content id.
    pub content_id: i64,
    /// Optional block title.
    #[serde(default)]
    pub title: Option<String>,
    /// Content type tag (currently always `Text`).
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Authoring timestamp.
    #[serde(default)]
    pub date: Option<String>,
    /// Body text with embedded newlines.
    #[serde(default)]
    pub text: Option<String>,
    /// `1` when the block is an assessment.
    #[serde(default)]
    pub assessment: Option<i64>,
    /// Assessment due date.
    #[serde(default)]
    pub due_date: Option<String>,
}

/// One course announcement.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnnouncementRow {
    /// Last edit timestamp.
    #[serde(default)]
    pub edit: Option<String>,
    /// Publication timestamp.
    #[serde(default)]
    pub announce_time: Option<String>,
    /// Announcement text.
    #[serde(default)]
    pub announcement: Option<String>,
    /// Author display name.
    #[serde(default)]
    pub author: Option<String>,
}

/// Instructor contact row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstructorRow {
    /// Instructor user id.
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_id: String,
    /// Honorific.
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    /// Given name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub first_name: String,
    /// Family name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_name: String,
    /// Contact email.
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    /// Activity flag as rendered by the server.
    #[serde(default, deserialize_with = "lenient_string")]
    pub active: String,
    /// Account creation timestamp.
    #[serde(default, deserialize_with = "lenient_string")]
    pub created: String,
}

/// Instructor with the teaching flag for one course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstructorInfoRow {
    /// Instructor user id.
    pub user_id: i64,
    /// Given name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub first_name: String,
    /// Family name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_name: String,
    /// `1` when the instructor teaches this course.
    #[serde(default)]
    pub is_teaching: i64,
}

/// Identity behind a session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfoRow {
    /// User id.
    pub user_id: i64,
    /// Given name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub first_name: String,
    /// Family name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_name: String,
    /// `1` for instructors.
    #[serde(default)]
    pub is_instructor: i64,
}

/// Login payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPayload {
    /// Session token.
    pub token: String,
}

/// Content block kind accepted by `updatePage`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ContentKind {
    /// Plain text block.
    #[default]
    Text,
}

/// One replacement block for `updatePage`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageContentUpdate {
    /// Block title (empty when unset).
    pub title: String,
    /// Block body (empty when unset).
    pub text: String,
    /// Block kind.
    #[serde(rename = "type")]
    pub kind: ContentKind,
    /// `1` for assessments.
    pub assessment: u8,
    /// ISO-8601 due date for assessments.
    pub due_date: Option<String>,
    /// 1-based position within the page.
    pub position: u32,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(text) => text,
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(milestone_id: i64, kind: MilestoneType, page: Option<(i64, &str)>) -> SidebarRow {
        SidebarRow {
            milestone_id,
            milestone_title: format!("M{milestone_id}"),
            milestone_type: kind,
            page_id: page.map(|(id, _)| id),
            page_title: page.map(|(_, title)| title.to_string()),
        }
    }

    #[test]
    fn query_envelope_matches_wire_shape() {
        let request = ApiRequest::query(
            "tok",
            QueryArgs::GetPage {
                course_id: 4,
                milestone_id: 7,
                page_id: 9,
            },
        );
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            value,
            json!({
                "token": "tok",
                "request": "query",
                "args": {"query": "getPage", "course_id": 4, "milestone_id": 7, "page_id": 9}
            })
        );
    }

    #[test]
    fn session_query_uses_uppercase_uid() {
        let value = serde_json::to_value(ApiRequest::query("t", QueryArgs::GetSessionUid))
            .expect("serialize");
        assert_eq!(value["args"], json!({"query": "getSessionUID"}));
        assert_eq!(QueryArgs::GetSessionUid.name(), "getSessionUID");
    }

    #[test]
    fn login_envelope_omits_token() {
        let request = ApiRequest::login(LoginArgs {
            user_id: "jdoe".to_string(),
            password: "pw".to_string(),
        });
        let value = serde_json::to_value(&request).expect("serialize");
        assert!(value.get("token").is_none());
        assert_eq!(value["request"], "login");
        assert_eq!(value["args"], json!({"user_id": "jdoe", "password": "pw"}));
    }

    #[test]
    fn update_page_serializes_content_blocks() {
        let request = ApiRequest::update(
            "t",
            UpdateArgs::UpdatePage {
                course_id: 1,
                milestone_id: 2,
                page_id: 3,
                course_content: vec![PageContentUpdate {
                    title: "Intro".to_string(),
                    text: String::new(),
                    kind: ContentKind::Text,
                    assessment: 0,
                    due_date: None,
                    position: 1,
                }],
            },
        );
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(value["args"]["query"], "updatePage");
        assert_eq!(
            value["args"]["course_content"][0],
            json!({"title": "Intro", "text": "", "type": "Text", "assessment": 0, "due_date": null, "position": 1})
        );
    }

    #[test]
    fn create_milestone_carries_type_tag() {
        let value = serde_json::to_value(ApiRequest::update(
            "t",
            UpdateArgs::CreateMilestone {
                course_id: 5,
                milestone_type: MilestoneType::Incourse,
            },
        ))
        .expect("serialize");
        assert_eq!(
            value["args"],
            json!({"query": "createMilestone", "course_id": 5, "milestone_type": "Incourse"})
        );
    }

    #[test]
    fn redacted_masks_token_only() {
        let request = ApiRequest::query("secret", QueryArgs::GetDashboard);
        let redacted = serde_json::to_value(request.redacted()).expect("serialize");
        assert_eq!(redacted["token"], "***");
        assert_eq!(redacted["args"]["query"], "getDashboard");
    }

    #[test]
    fn grouping_preserves_first_seen_order() {
        let rows = vec![
            row(2, MilestoneType::Incourse, Some((20, "B1"))),
            row(1, MilestoneType::Precourse, Some((10, "A1"))),
            row(2, MilestoneType::Incourse, Some((21, "B2"))),
            row(1, MilestoneType::Precourse, Some((11, "A2"))),
        ];
        let grouped = group_sidebar_rows(rows);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].id, 2);
        assert_eq!(
            grouped[0].pages.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![20, 21]
        );
        assert_eq!(grouped[1].id, 1);
        assert_eq!(grouped[1].milestone_type, MilestoneType::Precourse);
    }

    #[test]
    fn grouping_skips_null_page_titles() {
        let mut untitled = row(3, MilestoneType::Incourse, Some((30, "x")));
        untitled.page_title = None;
        let grouped = group_sidebar_rows(vec![row(3, MilestoneType::Incourse, None), untitled]);
        assert_eq!(grouped.len(), 1);
        assert!(grouped[0].pages.is_empty());
        assert_eq!(grouped[0].title, "M3");
    }

    #[test]
    fn grouping_skips_titled_rows_without_page_id() {
        let mut orphan = row(4, MilestoneType::Precourse, Some((40, "Orphan")));
        orphan.page_id = None;
        let grouped = group_sidebar_rows(vec![
            orphan,
            row(4, MilestoneType::Precourse, Some((41, "Kept"))),
        ]);
        assert_eq!(grouped.len(), 1);
        assert_eq!(
            grouped[0].pages,
            vec![PageRecord {
                id: 41,
                title: "Kept".into(),
            }]
        );
    }

    #[test]
    fn sidebar_rows_decode_from_server_json() {
        let payload = json!([
            {"milestone_id": 1, "milestone_title": "Week 1", "type": "Precourse", "page_id": 10, "page_title": "Reading"},
            {"milestone_id": 2, "milestone_title": "Week 2", "type": "Incourse", "page_id": null, "page_title": null}
        ]);
        let rows: Vec<SidebarRow> = serde_json::from_value(payload).expect("decode");
        assert_eq!(rows[0].page_title.as_deref(), Some("Reading"));
        assert_eq!(rows[1].milestone_type, MilestoneType::Incourse);
        assert_eq!(rows[1].page_id, None);
    }

    #[test]
    fn course_info_tolerates_numbers_and_nulls() {
        let info: CourseInfo = serde_json::from_value(json!({
            "name": "Interviewing",
            "course_id": 3,
            "overview": null,
            "milestones_count": 2,
            "milestones_completed": "0"
        }))
        .expect("decode");
        assert_eq!(info.overview, "");
        assert_eq!(info.milestones_count, "2");
        assert_eq!(info.milestones_completed, "0");
        assert_eq!(info.location, "");
    }

    #[test]
    fn update_response_accepts_missing_payload() {
        let response: ApiResponse<EmptyPayload> =
            serde_json::from_value(json!({"status": 200, "message": "ok"})).expect("decode");
        assert_eq!(response.payload, None);
        assert_eq!(response.message, "ok");
    }

    #[test]
    fn error_body_reads_message() {
        let body: ErrorBody =
            serde_json::from_slice(br#"{"status":401,"message":"Invalid token"}"#).expect("decode");
        assert_eq!(body.message.as_deref(), Some("Invalid token"));
    }
}
