//! Dashboard card model and role selection.

use crate::core::content::format_day;
use crate::core::session::SessionState;
use lectern_api_models::{CourseInfo, QueryArgs};

/// Role badge shown above the course grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Authoring user.
    Instructor,
    /// Enrolled learner.
    Student,
}

impl Role {
    /// Role of the signed-in user.
    #[must_use]
    pub fn of(session: &SessionState) -> Self {
        if session.is_instructor() {
            Self::Instructor
        } else {
            Self::Student
        }
    }

    /// Badge label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Instructor => "Instructor",
            Self::Student => "Student",
        }
    }

    /// Badge CSS modifier.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Instructor => "role-instructor",
            Self::Student => "role-student",
        }
    }
}

/// Dashboard query for the signed-in user, `None` without a session.
#[must_use]
pub fn dashboard_query(session: &SessionState) -> Option<QueryArgs> {
    let (_, user_id) = session.credentials()?;
    Some(match Role::of(session) {
        Role::Instructor => QueryArgs::GetDashboard,
        Role::Student => QueryArgs::StudentDashboard { user_id },
    })
}

/// Display-ready preview card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseCard {
    /// Course id used for links.
    pub course_id: i64,
    /// Course name.
    pub name: String,
    /// Labelled text sections in display order.
    pub sections: Vec<(&'static str, String)>,
    /// Start date (`DD/MM/YYYY`).
    pub start: String,
    /// Finish date (`DD/MM/YYYY`).
    pub finish: String,
    /// Location.
    pub location: String,
    /// Progress text.
    pub progress: String,
    /// "completed/total" milestones.
    pub milestones: String,
}

impl From<CourseInfo> for CourseCard {
    fn from(info: CourseInfo) -> Self {
        Self {
            course_id: info.course_id,
            sections: vec![
                ("Overview", info.overview),
                ("Course Outcomes", info.course_outcomes),
                ("Instructors", info.instructor_name),
                ("Email Addresses", info.email),
            ],
            start: format_day(&info.commencement_date),
            finish: format_day(&info.finish_date),
            location: info.location,
            progress: info.course_progress,
            milestones: format!("{}/{}", info.milestones_completed, info.milestones_count),
            name: info.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::UserInfo;

    fn session(is_instructor: bool) -> SessionState {
        let mut session = SessionState::default();
        session.install(
            "tok".into(),
            UserInfo {
                user_id: 8,
                first_name: "A".into(),
                last_name: "B".into(),
                is_instructor,
                is_teaching: None,
            },
        );
        session
    }

    #[test]
    fn query_depends_on_role() {
        assert_eq!(dashboard_query(&session(true)), Some(QueryArgs::GetDashboard));
        assert_eq!(
            dashboard_query(&session(false)),
            Some(QueryArgs::StudentDashboard { user_id: 8 })
        );
        assert_eq!(dashboard_query(&SessionState::default()), None);
        assert_eq!(Role::of(&session(true)).label(), "Instructor");
    }

    #[test]
    fn card_formats_dates_and_progress() {
        let card = CourseCard::from(CourseInfo {
            name: "Interviewing Children".into(),
            course_id: 4,
            commencement_date: "2023-12-06".into(),
            finish_date: "2024-01-05 00:00:00".into(),
            milestones_count: "2".into(),
            milestones_completed: "0".into(),
            overview: "Short".into(),
            ..CourseInfo::default()
        });
        assert_eq!(card.start, "06/12/2023");
        assert_eq!(card.finish, "05/01/2024");
        assert_eq!(card.milestones, "0/2");
        assert_eq!(card.sections[0], ("Overview", "Short".to_string()));
        assert_eq!(card.name, "Interviewing Children");
    }
}
