//! App-wide yewdux store.
//!
//! # Design
//! - One store holds the session, notifications and the open course so
//!   actions receive it explicitly through a `Dispatch`.
//! - Course slices are replaced wholesale when the route targets another
//!   course or view.

use crate::core::navigation::CourseNavigation;
use crate::core::notifications::{Notifications, Severity};
use crate::core::session::SessionState;
use crate::core::sidebar::{ExpansionSet, RenameState};
use crate::core::structure::{CourseView, PageRef, Structure};
use std::fmt::Display;
use yewdux::store::Store;

/// Global application store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Store)]
pub struct AppStore {
    /// Authenticated session.
    pub session: SessionState,
    /// Pending notifications.
    pub notifications: Notifications,
    /// Course currently open, if any.
    pub course: Option<CourseSlice>,
}

/// Navigation plus sidebar state for the open course.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseSlice {
    /// Current page bookkeeping.
    pub navigation: CourseNavigation,
    /// Expanded milestones.
    pub expansion: ExpansionSet,
    /// Inline rename editor.
    pub rename: RenameState,
}

impl CourseSlice {
    /// Fresh slice for a course route.
    #[must_use]
    pub fn new(course_id: i64, view: CourseView, initial_index: usize) -> Self {
        Self {
            navigation: CourseNavigation::new(course_id, view, initial_index),
            expansion: ExpansionSet::default(),
            rename: RenameState::default(),
        }
    }

    /// Expand the current page and every ancestor so it stays visible.
    pub fn sync_expansion(&mut self) {
        if let (Some(structure), Some(page)) = (self.navigation.structure(), self.navigation.page())
            && structure.resolve(page).is_some()
        {
            self.expansion.expand_ancestors(structure, page.node());
        }
    }

    /// Install a rebuilt outline and reveal the resolved page.
    pub fn install_structure(&mut self, structure: Structure) {
        self.navigation.replace_structure(structure);
        self.sync_expansion();
    }

    /// Open `page` and reveal it.
    pub fn open_page(&mut self, page: PageRef) {
        self.navigation.set_page(page);
        self.sync_expansion();
    }

    /// Step to the next page and reveal it.
    pub fn next(&mut self) {
        self.navigation.next();
        self.sync_expansion();
    }

    /// Step to the previous page and reveal it.
    pub fn previous(&mut self) {
        self.navigation.previous();
        self.sync_expansion();
    }
}

impl AppStore {
    /// Queue a notification.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.notifications.add(message, severity);
    }

    /// Queue an error notification.
    pub fn notify_error(&mut self, err: &impl Display) {
        self.notifications.error(err);
    }

    /// Make sure the open course matches the route, resetting it otherwise.
    ///
    /// Returns `true` when a new slice was created.
    pub fn open_course(&mut self, course_id: i64, view: CourseView, initial_index: usize) -> bool {
        if self
            .course
            .as_ref()
            .is_some_and(|slice| slice.navigation.is_for(course_id, view))
        {
            return false;
        }
        self.course = Some(CourseSlice::new(course_id, view, initial_index));
        true
    }

    /// Slice for `course_id` in `view`, if it is the open one.
    pub fn course_mut(&mut self, course_id: i64, view: CourseView) -> Option<&mut CourseSlice> {
        self.course
            .as_mut()
            .filter(|slice| slice.navigation.is_for(course_id, view))
    }

    /// Forget the session and everything loaded with it.
    pub fn sign_out(&mut self) {
        self.session.clear();
        self.course = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_api_models::{MilestoneData, MilestoneType, PageRecord};

    #[test]
    fn open_course_resets_only_on_change() {
        let mut store = AppStore::default();
        assert!(store.open_course(1, CourseView::Published, 2));
        if let Some(slice) = store.course_mut(1, CourseView::Published) {
            slice.navigation.set_index(5);
        }
        assert!(!store.open_course(1, CourseView::Published, 0));
        assert_eq!(
            store.course.as_ref().map(|slice| slice.navigation.index()),
            Some(5)
        );
        assert!(store.open_course(1, CourseView::Draft, 0));
        assert!(store.course_mut(1, CourseView::Published).is_none());
    }

    #[test]
    fn sign_out_drops_course_and_session() {
        let mut store = AppStore::default();
        store.session.token = Some("tok".into());
        store.open_course(3, CourseView::Published, 0);
        store.notify("bye", Severity::Info);
        store.sign_out();
        assert_eq!(store.session, SessionState::default());
        assert!(store.course.is_none());
        assert_eq!(store.notifications.items().len(), 1);
    }

    fn two_milestones() -> Structure {
        Structure::build(
            "C",
            &[
                MilestoneData {
                    id: 1,
                    title: "M1".into(),
                    milestone_type: MilestoneType::Precourse,
                    pages: vec![PageRecord {
                        id: 10,
                        title: "P1".into(),
                    }],
                },
                MilestoneData {
                    id: 2,
                    title: "M2".into(),
                    milestone_type: MilestoneType::Incourse,
                    pages: vec![PageRecord {
                        id: 20,
                        title: "P2".into(),
                    }],
                },
            ],
            CourseView::Published,
        )
    }

    fn is_revealed(slice: &CourseSlice) -> bool {
        let (Some(structure), Some(page)) = (slice.navigation.structure(), slice.navigation.page())
        else {
            return false;
        };
        structure
            .lineage(page.node())
            .all(|node| slice.expansion.is_expanded(node.key))
    }

    #[test]
    fn next_into_another_milestone_expands_it() {
        let mut slice = CourseSlice::new(1, CourseView::Published, 3);
        slice.install_structure(two_milestones());
        assert_eq!(slice.navigation.current().map(|n| n.title.as_str()), Some("P1"));
        assert!(is_revealed(&slice));

        slice.next();
        assert_eq!(slice.navigation.current().map(|n| n.title.as_str()), Some("P2"));
        assert!(is_revealed(&slice));
        let m2 = slice
            .navigation
            .structure()
            .and_then(|s| s.parent(slice.navigation.page().expect("page").node()))
            .expect("parent");
        assert_eq!(m2.id, 2);
        assert!(slice.expansion.is_expanded(m2.key));
    }

    #[test]
    fn previous_and_open_page_reveal_the_page() {
        let mut slice = CourseSlice::new(1, CourseView::Published, 4);
        slice.install_structure(two_milestones());
        slice.expansion = ExpansionSet::default();

        slice.previous();
        assert_eq!(slice.navigation.current().map(|n| n.title.as_str()), Some("P1"));
        assert!(is_revealed(&slice));

        let announcements = slice
            .navigation
            .structure()
            .and_then(|s| s.leaf_at(0))
            .expect("leaf");
        slice.open_page(announcements);
        assert!(is_revealed(&slice));
    }

    #[test]
    fn unresolved_page_expands_nothing() {
        let mut slice = CourseSlice::new(1, CourseView::Published, 40);
        slice.install_structure(two_milestones());
        assert!(slice.navigation.page().is_none());
        assert!(slice.expansion.is_empty());
    }
}
