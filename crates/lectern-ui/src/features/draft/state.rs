//! Draft editor form state.
//!
//! # Design
//! - Inputs stay as plain strings while editing; conversion to wire blocks
//!   happens only on save.
//! - Positions are assigned at save time, 1-based, in display order.

use crate::core::content::{ContentBlock, to_wire_timestamp};
use crate::core::structure::{Node, NodeKind, Structure};
use chrono::{NaiveDateTime, TimeZone};
use lectern_api_models::{ContentKind, PageContentUpdate};

const DUE_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// What the draft editor shows for the current page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorTarget {
    /// Content blocks of an authored page.
    Page {
        /// Parent milestone id.
        milestone_id: i64,
        /// Page id.
        page_id: i64,
    },
    /// Instructor assignment list.
    Instructors,
    /// Anything else; an empty form.
    Empty,
}

impl EditorTarget {
    /// Target for the node currently selected in the draft outline.
    #[must_use]
    pub fn for_node(structure: &Structure, node: &Node) -> Self {
        match node.kind {
            NodeKind::Instructors => Self::Instructors,
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
}

/// One editable block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DraftBlock {
    /// Block title.
    pub title: String,
    /// Block body.
    pub body: String,
    /// Whether the block is an assessment.
    pub assessment: bool,
    /// Assessment due date in local time.
    pub due_date: Option<NaiveDateTime>,
}

impl From<ContentBlock> for DraftBlock {
    fn from(block: ContentBlock) -> Self {
        Self {
            title: block.title.unwrap_or_default(),
            body: block.body.unwrap_or_default(),
            assessment: block.assessment.is_some(),
            due_date: block.assessment.and_then(|assessment| assessment.due_date),
        }
    }
}

impl DraftBlock {
    /// Value for a `datetime-local` input.
    #[must_use]
    pub fn due_input_value(&self) -> String {
        self.due_date
            .map(|value| value.format(DUE_INPUT_FORMAT).to_string())
            .unwrap_or_default()
    }
}

/// Editable list of blocks for one page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DraftForm {
    blocks: Vec<DraftBlock>,
}

impl DraftForm {
    /// Form seeded from loaded blocks.
    #[must_use]
    pub fn from_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self {
            blocks: blocks.into_iter().map(DraftBlock::from).collect(),
        }
    }

    /// Blocks in display order.
    #[must_use]
    pub fn blocks(&self) -> &[DraftBlock] {
        &self.blocks
    }

    /// Whether the form has no blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Append an empty content block.
    pub fn append_content(&mut self) {
        self.blocks.push(DraftBlock::default());
    }

    /// Append an assessment block due at `now`.
    pub fn append_assessment(&mut self, now: NaiveDateTime) {
        self.blocks.push(DraftBlock {
            assessment: true,
            due_date: Some(now),
            ..DraftBlock::default()
        });
    }

    /// Update the title of block `index`.
    pub fn set_title(&mut self, index: usize, title: String) {
        if let Some(block) = self.blocks.get_mut(index) {
            block.title = title;
        }
    }

    /// Update the body of block `index`.
    pub fn set_body(&mut self, index: usize, body: String) {
        if let Some(block) = self.blocks.get_mut(index) {
            block.body = body;
        }
    }

    /// Update the due date of block `index` from a `datetime-local` value.
    ///
    /// Unparsable input clears the date.
    pub fn set_due_input(&mut self, index: usize, raw: &str) {
        if let Some(block) = self.blocks.get_mut(index) {
            block.due_date = NaiveDateTime::parse_from_str(raw, DUE_INPUT_FORMAT).ok();
        }
    }

    /// Wire blocks for `updatePage`, interpreting due dates in `tz`.
    ///
    /// Assessment blocks without a usable due date are saved as plain text.
    #[must_use]
    pub fn to_updates<Tz: TimeZone>(&self, tz: &Tz) -> Vec<PageContentUpdate> {
        (1..)
            .zip(&self.blocks)
            .map(|(position, block)| {
                let due_date = block
                    .due_date
                    .filter(|_| block.assessment)
                    .and_then(|value| to_wire_timestamp(&value, tz));
                PageContentUpdate {
                    title: block.title.clone(),
                    text: block.body.clone(),
                    kind: ContentKind::Text,
                    assessment: u8::from(due_date.is_some()),
                    due_date,
                    position,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::Assessment;
    use crate::core::structure::CourseView;
    use chrono::{NaiveDate, Utc};
    use lectern_api_models::{MilestoneData, MilestoneType, PageRecord};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .and_then(|date| date.and_hms_opt(h, m, 0))
            .expect("valid date")
    }

    #[test]
    fn updates_get_one_based_positions() {
        let mut form = DraftForm::default();
        form.append_content();
        form.append_assessment(at(9, 30));
        form.append_content();
        form.set_title(0, "Intro".into());
        form.set_body(1, "Submit the essay".into());

        let updates = form.to_updates(&Utc);
        let positions: Vec<u32> = updates.iter().map(|u| u.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
        assert_eq!(updates[0].title, "Intro");
        assert_eq!(updates[0].assessment, 0);
        assert_eq!(updates[0].due_date, None);
        assert_eq!(updates[1].assessment, 1);
        assert_eq!(
            updates[1].due_date.as_deref(),
            Some("2024-06-01T09:30:00.000Z")
        );
        assert!(updates.iter().all(|u| u.kind == ContentKind::Text));
    }

    #[test]
    fn assessment_without_due_date_saves_as_text() {
        let mut form = DraftForm::default();
        form.append_assessment(at(10, 0));
        form.set_due_input(0, "not a date");
        let updates = form.to_updates(&Utc);
        assert_eq!(updates[0].assessment, 0);
        assert_eq!(updates[0].due_date, None);
    }

    #[test]
    fn due_input_round_trips() {
        let mut form = DraftForm::default();
        form.append_assessment(at(8, 0));
        form.set_due_input(0, "2024-07-04T17:45");
        assert_eq!(form.blocks()[0].due_input_value(), "2024-07-04T17:45");
    }

    #[test]
    fn out_of_range_edits_are_ignored() {
        let mut form = DraftForm::default();
        form.set_title(3, "x".into());
        form.set_due_input(3, "2024-07-04T17:45");
        assert!(form.is_empty());
    }

    #[test]
    fn loaded_blocks_keep_assessment_dates() {
        let form = DraftForm::from_blocks(vec![ContentBlock {
            title: Some("Quiz".into()),
            assessment: Some(Assessment {
                due_date: Some(at(12, 0)),
                ..Assessment::default()
            }),
            ..ContentBlock::default()
        }]);
        let block = &form.blocks()[0];
        assert!(block.assessment);
        assert_eq!(block.due_date, Some(at(12, 0)));
        assert_eq!(block.body, "");
    }

    #[test]
    fn editor_target_follows_node_kind() {
        let structure = Structure::build(
            "C",
            &[MilestoneData {
                id: 4,
                title: "M".into(),
                milestone_type: MilestoneType::Incourse,
                pages: vec![PageRecord {
                    id: 40,
                    title: "P".into(),
                }],
            }],
            CourseView::Draft,
        );
        let targets: Vec<EditorTarget> = structure
            .flattened()
            .iter()
            .filter_map(|id| structure.node(*id))
            .map(|node| EditorTarget::for_node(&structure, node))
            .collect();
        assert_eq!(
            targets,
            vec![
                EditorTarget::Empty,
                EditorTarget::Instructors,
                EditorTarget::Page {
                    milestone_id: 4,
                    page_id: 40,
                },
            ]
        );
    }
}
