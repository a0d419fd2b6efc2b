//! Published course page state.

use crate::core::structure::{Node, NodeKind, Structure};
use lectern_api_models::QueryArgs;

/// Where the content of the current published page comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentSource {
    /// Course announcements.
    Announcements,
    /// Instructor contact cards.
    Contacts,
    /// Blocks of an authored page.
    Page {
        /// Parent milestone id.
        milestone_id: i64,
        /// Page id.
        page_id: i64,
    },
    /// Nothing to load.
    Empty,
}

impl ContentSource {
    /// Source for the current page node.
    #[must_use]
    pub fn for_node(structure: &Structure, node: &Node) -> Self {
        match node.kind {
            NodeKind::Announcements => Self::Announcements,
            NodeKind::Contacts => Self::Contacts,
            NodeKind::Page => node
                .parent
                .and_then(|parent| structure.node(parent))
                .map_or(Self::Empty, |parent| Self::Page {
                    milestone_id: parent.id,
                    page_id: node.id,
                }),
            _ => Self::Empty,
        }
    }

    /// Query fetching this source, if any.
    #[must_use]
    pub const fn query(self, course_id: i64) -> Option<QueryArgs> {
        match self {
            Self::Announcements => Some(QueryArgs::CourseAnnouncements { course_id }),
            Self::Contacts => Some(QueryArgs::GetCourseInstructors { course_id }),
            Self::Page {
                milestone_id,
                page_id,
            } => Some(QueryArgs::GetPage {
                course_id,
                milestone_id,
                page_id,
            }),
            Self::Empty => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::structure::CourseView;
    use lectern_api_models::{MilestoneData, MilestoneType, PageRecord};

    #[test]
    fn sources_follow_published_outline() {
        let structure = Structure::build(
            "C",
            &[MilestoneData {
                id: 2,
                title: "M".into(),
                milestone_type: MilestoneType::Precourse,
                pages: vec![PageRecord {
                    id: 21,
                    title: "P".into(),
                }],
            }],
            CourseView::Published,
        );
        let sources: Vec<ContentSource> = structure
            .flattened()
            .iter()
            .filter_map(|id| structure.node(*id))
            .map(|node| ContentSource::for_node(&structure, node))
            .collect();
        assert_eq!(
            sources,
            vec![
                ContentSource::Announcements,
                ContentSource::Empty,
                ContentSource::Contacts,
                ContentSource::Page {
                    milestone_id: 2,
                    page_id: 21,
                },
                ContentSource::Empty,
            ]
        );
    }

    #[test]
    fn queries_carry_course_and_parent_ids() {
        assert_eq!(
            ContentSource::Page {
                milestone_id: 2,
                page_id: 21,
            }
            .query(9),
            Some(QueryArgs::GetPage {
                course_id: 9,
                milestone_id: 2,
                page_id: 21,
            })
        );
        assert_eq!(
            ContentSource::Contacts.query(9),
            Some(QueryArgs::GetCourseInstructors { course_id: 9 })
        );
        assert_eq!(ContentSource::Empty.query(9), None);
    }
}
