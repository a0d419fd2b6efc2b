//! Course outline tree built from flat milestone records.
//!
//! # Design
//! - Nodes live in an arena owned by [`Structure`]; children and parents are
//!   [`NodeId`] indices, so upward traversal needs no shared ownership.
//! - Every build stamps a fresh generation. A [`PageRef`] carries it, so a page
//!   picked from an older outline never resolves against a newer one even
//!   when ids and titles are equal.
//! - Construction is pure; callers fetch and group rows beforehand.

use crate::core::key::NodeKey;
use lectern_api_models::{MilestoneData, MilestoneType};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Which audience the outline is built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CourseView {
    /// Student-facing published course.
    Published,
    /// Instructor authoring view.
    Draft,
}

impl CourseView {
    /// Whether authoring affordances are shown.
    #[must_use]
    pub const fn is_draft(self) -> bool {
        matches!(self, Self::Draft)
    }
}

/// Closed set of outline node kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Course announcements (published only).
    Announcements,
    /// Course overview and dates (published only).
    Overview,
    /// Instructor contacts (published only).
    Contacts,
    /// Milestone in the in-course group.
    IncourseMilestone,
    /// Milestone in the pre-course group.
    PrecourseMilestone,
    /// Authored content page.
    Page,
    /// Assessment results (published only).
    Results,
    /// Instructor management (draft only).
    Instructors,
    /// Course details editor (draft only).
    Details,
}

impl NodeKind {
    /// Stable tag used for key derivation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Announcements => "announcements",
            Self::Overview => "overview",
            Self::Contacts => "contacts",
            Self::IncourseMilestone => "incourseMilestone",
            Self::PrecourseMilestone => "precourseMilestone",
            Self::Page => "page",
            Self::Results => "results",
            Self::Instructors => "instructors",
            Self::Details => "details",
        }
    }

    /// Milestones are the only kinds that may hold children.
    #[must_use]
    pub const fn is_milestone(self) -> bool {
        matches!(self, Self::IncourseMilestone | Self::PrecourseMilestone)
    }

    /// Kinds that exist on the server and can be renamed or deleted.
    #[must_use]
    pub const fn is_authored(self) -> bool {
        matches!(
            self,
            Self::IncourseMilestone | Self::PrecourseMilestone | Self::Page
        )
    }

    const fn for_milestone(kind: MilestoneType) -> Self {
        match kind {
            MilestoneType::Precourse => Self::PrecourseMilestone,
            MilestoneType::Incourse => Self::IncourseMilestone,
        }
    }
}

/// Arena index of a node inside one [`Structure`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// Identity of a leaf page within a specific outline build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PageRef {
    generation: u64,
    node: NodeId,
}

impl PageRef {
    /// Arena index inside the originating outline.
    #[must_use]
    pub const fn node(self) -> NodeId {
        self.node
    }

    /// Generation of the originating outline.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

/// Single outline entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    /// Server id, `0` for virtual pages.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Node kind.
    pub kind: NodeKind,
    /// Ordered children; empty for every non-milestone kind.
    pub children: Vec<NodeId>,
    /// Back-reference used for upward traversal only.
    pub parent: Option<NodeId>,
    /// Hash-derived identity key.
    pub key: NodeKey,
}

impl Node {
    /// Leaves are the unit of sequential navigation. A milestone is never a
    /// leaf, even when it has no pages yet.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        !self.kind.is_milestone()
    }
}

/// Navigable outline for one course and one view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Structure {
    title: String,
    nodes: Vec<Node>,
    sections: Vec<Vec<NodeId>>,
    flattened: Vec<NodeId>,
    generation: u64,
}

impl Structure {
    /// Build the outline for `view` from grouped milestone records.
    #[must_use]
    pub fn build(title: impl Into<String>, milestones: &[MilestoneData], view: CourseView) -> Self {
        let mut structure = Self {
            title: title.into(),
            nodes: Vec::new(),
            sections: Vec::new(),
            flattened: Vec::new(),
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
        };

        match view {
            CourseView::Published => {
                let intro = vec![
                    structure.push_virtual("Announcements", NodeKind::Announcements),
                    structure.push_virtual("Course Overview and Dates", NodeKind::Overview),
                    structure.push_virtual("Instructor Contacts", NodeKind::Contacts),
                ];
                structure.sections.push(intro);
                structure.push_milestone_sections(milestones);
                let results = structure.push_virtual("Results", NodeKind::Results);
                structure.sections.push(vec![results]);
            }
            CourseView::Draft => {
                let intro = vec![
                    structure.push_virtual("Course Details", NodeKind::Details),
                    structure.push_virtual("Instructors", NodeKind::Instructors),
                ];
                structure.sections.push(intro);
                structure.push_milestone_sections(milestones);
            }
        }

        structure.flattened = structure.collect_leaves();
        structure
    }

    /// Course title shown above the outline.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Top-level nodes grouped into visual sections.
    #[must_use]
    pub fn sections(&self) -> &[Vec<NodeId>] {
        &self.sections
    }

    /// Leaves in pre-order, the sequence used by next/previous.
    #[must_use]
    pub fn flattened(&self) -> &[NodeId] {
        &self.flattened
    }

    /// Build stamp distinguishing this outline from every other.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Look up a node by arena index.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Parent of a node, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<&Node> {
        self.node(id)?.parent.and_then(|parent| self.node(parent))
    }

    /// The node itself followed by every ancestor up to its root.
    pub fn lineage(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        std::iter::successors(self.node(id), move |node| {
            node.parent.and_then(|parent| self.node(parent))
        })
    }

    /// Identity handle for a node of this outline.
    #[must_use]
    pub const fn page_ref(&self, id: NodeId) -> PageRef {
        PageRef {
            generation: self.generation,
            node: id,
        }
    }

    /// Resolve a handle; `None` when it belongs to another build.
    #[must_use]
    pub fn resolve(&self, page: PageRef) -> Option<&Node> {
        if page.generation == self.generation {
            self.node(page.node)
        } else {
            None
        }
    }

    /// Position of `page` in [`Self::flattened`], by identity.
    #[must_use]
    pub fn position_of(&self, page: PageRef) -> Option<usize> {
        if page.generation != self.generation {
            return None;
        }
        self.flattened.iter().position(|id| *id == page.node)
    }

    /// Leaf at `index` of the flattened sequence.
    #[must_use]
    pub fn leaf_at(&self, index: usize) -> Option<PageRef> {
        self.flattened.get(index).map(|id| self.page_ref(*id))
    }

    /// First leaf reached by always descending into the first child.
    #[must_use]
    pub fn first(&self) -> Option<NodeId> {
        let mut current = *self.sections.first()?.first()?;
        while let Some(child) = self.node(current)?.children.first() {
            current = *child;
        }
        Some(current)
    }

    /// Whether any node of `kind` exists in the outline.
    #[must_use]
    pub fn contains_kind(&self, kind: NodeKind) -> bool {
        self.nodes.iter().any(|node| node.kind == kind)
    }

    fn push_milestone_sections(&mut self, milestones: &[MilestoneData]) {
        let mut precourse = Vec::new();
        let mut incourse = Vec::new();
        for milestone in milestones {
            let kind = NodeKind::for_milestone(milestone.milestone_type);
            let milestone_id = self.push_node(None, milestone.id, milestone.title.clone(), kind);
            for page in &milestone.pages {
                self.push_node(
                    Some(milestone_id),
                    page.id,
                    page.title.clone(),
                    NodeKind::Page,
                );
            }
            match milestone.milestone_type {
                MilestoneType::Precourse => precourse.push(milestone_id),
                MilestoneType::Incourse => incourse.push(milestone_id),
            }
        }
        if !precourse.is_empty() {
            self.sections.push(precourse);
        }
        if !incourse.is_empty() {
            self.sections.push(incourse);
        }
    }

    fn push_virtual(&mut self, title: &str, kind: NodeKind) -> NodeId {
        self.push_node(None, 0, title.to_string(), kind)
    }

    fn push_node(&mut self, parent: Option<NodeId>, id: i64, title: String, kind: NodeKind) -> NodeId {
        let parent_server_id = parent.and_then(|p| self.node(p)).map(|p| p.id);
        let node_id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            id,
            title,
            kind,
            children: Vec::new(),
            parent,
            key: NodeKey::derive(parent_server_id, id, kind.as_str()),
        });
        if let Some(parent_node) = parent.and_then(|p| self.nodes.get_mut(p.0))
            && parent_node.kind.is_milestone()
        {
            parent_node.children.push(node_id);
        }
        node_id
    }

    fn collect_leaves(&self) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        let mut stack: Vec<NodeId> = self
            .sections
            .iter()
            .flatten()
            .rev()
            .copied()
            .collect();
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            if node.is_leaf() {
                leaves.push(id);
            } else {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        leaves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_api_models::PageRecord;

    fn milestone(id: i64, kind: MilestoneType, pages: &[(i64, &str)]) -> MilestoneData {
        MilestoneData {
            id,
            title: format!("M{id}"),
            milestone_type: kind,
            pages: pages
                .iter()
                .map(|(id, title)| PageRecord {
                    id: *id,
                    title: (*title).to_string(),
                })
                .collect(),
        }
    }

    fn titles(structure: &Structure, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .filter_map(|id| structure.node(*id))
            .map(|node| node.title.clone())
            .collect()
    }

    fn preorder_leaves(structure: &Structure, id: NodeId, out: &mut Vec<NodeId>) {
        let node = structure.node(id).expect("node");
        if node.is_leaf() {
            out.push(id);
        }
        for child in &node.children {
            preorder_leaves(structure, *child, out);
        }
    }

    #[test]
    fn published_single_precourse_scenario() {
        let structure = Structure::build(
            "Course A",
            &[milestone(1, MilestoneType::Precourse, &[(10, "P1")])],
            CourseView::Published,
        );
        assert_eq!(structure.title(), "Course A");
        assert_eq!(structure.sections().len(), 3);
        assert_eq!(
            titles(&structure, structure.flattened()),
            vec![
                "Announcements",
                "Course Overview and Dates",
                "Instructor Contacts",
                "P1",
                "Results"
            ]
        );
    }

    #[test]
    fn flattened_equals_preorder_leaves() {
        let structure = Structure::build(
            "C",
            &[
                milestone(1, MilestoneType::Incourse, &[(10, "a"), (11, "b")]),
                milestone(2, MilestoneType::Precourse, &[(20, "c")]),
                milestone(3, MilestoneType::Incourse, &[]),
                milestone(4, MilestoneType::Incourse, &[(40, "d")]),
            ],
            CourseView::Published,
        );
        let mut expected = Vec::new();
        for id in structure.sections().iter().flatten() {
            preorder_leaves(&structure, *id, &mut expected);
        }
        assert_eq!(structure.flattened(), expected.as_slice());
        // Precourse group comes before incourse regardless of input order.
        assert_eq!(
            titles(&structure, &structure.flattened()[3..7]),
            vec!["c", "a", "b", "d"]
        );
        assert_eq!(structure.flattened().len(), 8);
    }

    #[test]
    fn milestone_without_pages_stays_out_of_flattened() {
        let structure = Structure::build(
            "C",
            &[milestone(5, MilestoneType::Incourse, &[])],
            CourseView::Draft,
        );
        let milestone_id = structure.sections()[1][0];
        let node = structure.node(milestone_id).expect("milestone");
        assert_eq!(node.kind, NodeKind::IncourseMilestone);
        assert!(node.children.is_empty());
        assert!(!structure.flattened().contains(&milestone_id));
        assert_eq!(structure.flattened().len(), 2);
    }

    #[test]
    fn empty_groups_produce_no_sections() {
        let published = Structure::build(
            "C",
            &[milestone(1, MilestoneType::Incourse, &[(10, "x")])],
            CourseView::Published,
        );
        assert_eq!(published.sections().len(), 3);
        assert!(!published.contains_kind(NodeKind::PrecourseMilestone));

        let bare = Structure::build("C", &[], CourseView::Published);
        assert_eq!(bare.sections().len(), 2);
        assert_eq!(bare.flattened().len(), 4);
    }

    #[test]
    fn draft_and_published_use_disjoint_virtual_pages() {
        let data = [milestone(1, MilestoneType::Precourse, &[(10, "P1")])];
        let draft = Structure::build("C", &data, CourseView::Draft);
        for kind in [
            NodeKind::Results,
            NodeKind::Announcements,
            NodeKind::Overview,
            NodeKind::Contacts,
        ] {
            assert!(!draft.contains_kind(kind), "draft contains {kind:?}");
        }
        assert_eq!(
            titles(&draft, draft.flattened()),
            vec!["Course Details", "Instructors", "P1"]
        );

        let published = Structure::build("C", &data, CourseView::Published);
        assert!(!published.contains_kind(NodeKind::Details));
        assert!(!published.contains_kind(NodeKind::Instructors));
    }

    #[test]
    fn page_keys_include_parent_id() {
        let structure = Structure::build(
            "C",
            &[milestone(1, MilestoneType::Precourse, &[(10, "P1")])],
            CourseView::Published,
        );
        let page = structure
            .leaf_at(3)
            .and_then(|page| structure.resolve(page))
            .expect("page");
        assert_eq!(page.key, NodeKey::derive(Some(1), 10, "page"));
        assert_eq!(structure.parent(structure.flattened()[3]).map(|p| p.id), Some(1));
    }

    #[test]
    fn rebuild_invalidates_page_refs() {
        let data = [milestone(1, MilestoneType::Precourse, &[(10, "P1")])];
        let first = Structure::build("C", &data, CourseView::Published);
        let second = Structure::build("C", &data, CourseView::Published);
        let page = first.leaf_at(3).expect("leaf");
        assert_eq!(first.position_of(page), Some(3));
        assert_eq!(second.position_of(page), None);
        assert!(second.resolve(page).is_none());
    }

    #[test]
    fn lineage_walks_to_root() {
        let structure = Structure::build(
            "C",
            &[milestone(7, MilestoneType::Incourse, &[(70, "leaf")])],
            CourseView::Draft,
        );
        let leaf = structure.flattened()[2];
        let ids: Vec<i64> = structure.lineage(leaf).map(|node| node.id).collect();
        assert_eq!(ids, vec![70, 7]);
    }

    #[test]
    fn first_descends_into_first_children() {
        let draft = Structure::build("C", &[], CourseView::Draft);
        let first = draft.first().and_then(|id| draft.node(id)).expect("first");
        assert_eq!(first.kind, NodeKind::Details);
    }
}
