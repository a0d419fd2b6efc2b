//! Current-page bookkeeping for a course outline.
//!
//! # Design
//! - Index and page are kept consistent on every mutation: setting one
//!   recomputes the other, so deep links and sidebar clicks agree.
//! - Page identity is a [`PageRef`], never a title or id comparison.
//! - URL updates are pulled, not pushed: the view calls
//!   [`CourseNavigation::take_url_update`] after each change and replaces the
//!   history entry only when it yields a value.

use crate::core::structure::{CourseView, Node, PageRef, Structure};

/// Navigation state for one course view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseNavigation {
    course_id: i64,
    view: CourseView,
    structure: Option<Structure>,
    index: usize,
    page: Option<PageRef>,
    last_synced_index: Option<usize>,
}

impl CourseNavigation {
    /// Start navigation at `initial_index`, usually taken from the URL.
    #[must_use]
    pub const fn new(course_id: i64, view: CourseView, initial_index: usize) -> Self {
        Self {
            course_id,
            view,
            structure: None,
            index: initial_index,
            page: None,
            last_synced_index: Some(initial_index),
        }
    }

    /// Course this state belongs to.
    #[must_use]
    pub const fn course_id(&self) -> i64 {
        self.course_id
    }

    /// View this state belongs to.
    #[must_use]
    pub const fn view(&self) -> CourseView {
        self.view
    }

    /// Whether this state tracks `course_id` in `view`.
    #[must_use]
    pub fn is_for(&self, course_id: i64, view: CourseView) -> bool {
        self.course_id == course_id && self.view == view
    }

    /// Current outline, once loaded.
    #[must_use]
    pub const fn structure(&self) -> Option<&Structure> {
        self.structure.as_ref()
    }

    /// Desired index into the flattened sequence.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Handle of the current page.
    #[must_use]
    pub const fn page(&self) -> Option<PageRef> {
        self.page
    }

    /// Current page node.
    #[must_use]
    pub fn current(&self) -> Option<&Node> {
        let structure = self.structure.as_ref()?;
        structure.resolve(self.page?)
    }

    /// Server id of the milestone owning the current page.
    #[must_use]
    pub fn current_parent_id(&self) -> Option<i64> {
        let structure = self.structure.as_ref()?;
        let page = self.page?;
        structure.resolve(page)?;
        structure.parent(page.node()).map(|parent| parent.id)
    }

    /// Install a freshly built outline.
    ///
    /// The retained index is resolved against the new outline first, then the
    /// index is re-derived from the resolved page.
    pub fn replace_structure(&mut self, structure: Structure) {
        self.structure = Some(structure);
        self.resolve_index();
        self.resolve_page();
    }

    /// Select the leaf at `index`; out of range selects no page.
    pub fn set_index(&mut self, index: usize) {
        self.index = index;
        self.resolve_index();
    }

    /// Select `page` directly and derive the index from its position.
    ///
    /// A handle that is not a leaf of the current outline clears the page and
    /// leaves the index untouched.
    pub fn set_page(&mut self, page: PageRef) {
        self.page = Some(page);
        self.resolve_page();
    }

    /// Advance one page; no-op on the last page.
    pub fn next(&mut self) {
        let Some(len) = self.len() else {
            return;
        };
        if self.index.saturating_add(1) < len {
            self.set_index(self.index + 1);
        }
    }

    /// Go back one page; no-op on the first page.
    pub fn previous(&mut self) {
        let Some(len) = self.len() else {
            return;
        };
        if self.index > 0 && len > 0 {
            self.set_index((self.index - 1).min(len - 1));
        }
    }

    /// Index to write into the URL, yielded once per change.
    pub fn take_url_update(&mut self) -> Option<usize> {
        let structure = self.structure.as_ref()?;
        let current = structure.position_of(self.page?)?;
        if self.last_synced_index == Some(current) {
            return None;
        }
        self.last_synced_index = Some(current);
        Some(current)
    }

    fn len(&self) -> Option<usize> {
        self.structure.as_ref().map(|s| s.flattened().len())
    }

    fn resolve_index(&mut self) {
        self.page = self
            .structure
            .as_ref()
            .and_then(|structure| structure.leaf_at(self.index));
    }

    fn resolve_page(&mut self) {
        let (Some(structure), Some(page)) = (self.structure.as_ref(), self.page) else {
            return;
        };
        match structure.position_of(page) {
            Some(position) => self.index = position,
            None => self.page = None,
        }
    }
}

/// Path of the course view, without query string.
#[must_use]
pub fn course_path(course_id: i64, view: CourseView) -> String {
    match view {
        CourseView::Published => format!("/course/{course_id}"),
        CourseView::Draft => format!("/course/{course_id}/edit"),
    }
}

/// Interpret the `index` query parameter; missing or malformed values mean 0.
#[must_use]
pub fn parse_index_param(raw: Option<&str>) -> usize {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::structure::NodeKind;
    use lectern_api_models::{MilestoneData, MilestoneType, PageRecord};

    fn outline() -> Structure {
        Structure::build(
            "Course A",
            &[
                MilestoneData {
                    id: 1,
                    title: "M1".into(),
                    milestone_type: MilestoneType::Precourse,
                    pages: vec![
                        PageRecord {
                            id: 10,
                            title: "P1".into(),
                        },
                        PageRecord {
                            id: 11,
                            title: "P2".into(),
                        },
                    ],
                },
                MilestoneData {
                    id: 2,
                    title: "M2".into(),
                    milestone_type: MilestoneType::Incourse,
                    pages: vec![PageRecord {
                        id: 20,
                        title: "P3".into(),
                    }],
                },
            ],
            CourseView::Published,
        )
    }

    fn loaded(index: usize) -> CourseNavigation {
        let mut nav = CourseNavigation::new(7, CourseView::Published, index);
        nav.replace_structure(outline());
        nav
    }

    #[test]
    fn index_and_page_round_trip() {
        let mut nav = loaded(0);
        let len = nav.structure().map(|s| s.flattened().len()).unwrap_or(0);
        assert_eq!(len, 7);
        for i in 0..len {
            nav.set_index(i);
            let page = nav.page().expect("page for in-range index");
            nav.set_index(len + 5);
            assert!(nav.page().is_none());
            nav.set_page(page);
            assert_eq!(nav.index(), i);
        }
    }

    #[test]
    fn out_of_range_index_selects_nothing() {
        let nav = loaded(42);
        assert_eq!(nav.index(), 42);
        assert!(nav.current().is_none());
    }

    #[test]
    fn next_and_previous_stop_at_bounds() {
        let mut nav = loaded(0);
        nav.previous();
        assert_eq!(nav.index(), 0);
        nav.set_index(6);
        nav.next();
        assert_eq!(nav.index(), 6);
        assert_eq!(nav.current().map(|n| n.kind), Some(NodeKind::Results));
        nav.previous();
        assert_eq!(nav.current().map(|n| n.title.as_str()), Some("P3"));
    }

    #[test]
    fn navigation_without_structure_is_inert() {
        let mut nav = CourseNavigation::new(1, CourseView::Draft, 3);
        nav.next();
        nav.previous();
        assert_eq!(nav.index(), 3);
        assert!(nav.current().is_none());
        assert_eq!(nav.take_url_update(), None);
    }

    #[test]
    fn set_page_derives_index() {
        let mut nav = loaded(0);
        let target = nav.structure().and_then(|s| s.leaf_at(4)).expect("leaf");
        nav.set_page(target);
        assert_eq!(nav.index(), 4);
        assert_eq!(nav.current_parent_id(), Some(1));
    }

    #[test]
    fn stale_page_from_previous_build_is_rejected() {
        let mut nav = loaded(3);
        let stale = nav.page().expect("page");
        nav.replace_structure(outline());
        assert_eq!(nav.index(), 3);
        assert_ne!(nav.page(), Some(stale));
        assert_eq!(nav.current().map(|n| n.title.as_str()), Some("P1"));
        nav.set_page(stale);
        assert!(nav.page().is_none());
        assert_eq!(nav.index(), 3);
    }

    #[test]
    fn url_update_fires_once_per_change() {
        let mut nav = loaded(0);
        assert_eq!(nav.take_url_update(), None);
        nav.next();
        assert_eq!(nav.take_url_update(), Some(1));
        assert_eq!(nav.take_url_update(), None);
        nav.replace_structure(outline());
        assert_eq!(nav.take_url_update(), None);
    }

    #[test]
    fn paths_follow_view() {
        assert_eq!(course_path(4, CourseView::Published), "/course/4");
        assert_eq!(course_path(4, CourseView::Draft), "/course/4/edit");
    }

    #[test]
    fn index_param_defaults_to_zero() {
        assert_eq!(parse_index_param(None), 0);
        assert_eq!(parse_index_param(Some("3")), 3);
        assert_eq!(parse_index_param(Some("-1")), 0);
        assert_eq!(parse_index_param(Some("abc")), 0);
    }
}
