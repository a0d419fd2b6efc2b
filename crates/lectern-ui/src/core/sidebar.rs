//! Sidebar tree state: expansion, inline rename and authoring requests.
//!
//! # Design
//! - Expansion is a set of [`NodeKey`]s so it survives outline rebuilds.
//! - Selecting a node never touches the API; it yields a [`SelectOutcome`]
//!   that the view applies to navigation.
//! - Authoring intents are plain values ([`SidebarAction`]) turned into wire
//!   arguments in one place.

use crate::core::key::NodeKey;
use crate::core::structure::{CourseView, NodeId, NodeKind, PageRef, Structure};
use lectern_api_models::{MilestoneType, UpdateArgs};
use std::collections::BTreeSet;

/// Keys of expanded milestones; absent means collapsed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpansionSet {
    keys: BTreeSet<NodeKey>,
}

/// Result of clicking a sidebar row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// A milestone was expanded or collapsed.
    Toggled {
        /// State after the toggle.
        expanded: bool,
    },
    /// A leaf was chosen and should become the current page.
    OpenPage(PageRef),
}

impl ExpansionSet {
    /// Whether the node with `key` is expanded.
    #[must_use]
    pub fn is_expanded(&self, key: NodeKey) -> bool {
        self.keys.contains(&key)
    }

    /// Number of expanded keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether nothing is expanded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Apply a click on `id`.
    ///
    /// Collapsing removes only the clicked key; expanding also expands every
    /// ancestor so the node stays visible.
    pub fn select(&mut self, structure: &Structure, id: NodeId) -> Option<SelectOutcome> {
        let node = structure.node(id)?;
        if node.is_leaf() {
            return Some(SelectOutcome::OpenPage(structure.page_ref(id)));
        }
        if self.keys.remove(&node.key) {
            return Some(SelectOutcome::Toggled { expanded: false });
        }
        self.expand_ancestors(structure, id);
        Some(SelectOutcome::Toggled { expanded: true })
    }

    /// Expand `id` and every ancestor. Never removes keys.
    pub fn expand_ancestors(&mut self, structure: &Structure, id: NodeId) {
        self.keys
            .extend(structure.lineage(id).map(|node| node.key));
    }
}

/// Buttons a row offers in a given view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Affordances {
    /// Inline rename.
    pub rename: bool,
    /// Delete button.
    pub delete: bool,
    /// "Add New Page" below the children.
    pub add_page: bool,
}

/// Affordances for a node of `kind` in `view`.
#[must_use]
pub const fn affordances(view: CourseView, kind: NodeKind) -> Affordances {
    if !view.is_draft() || !kind.is_authored() {
        return Affordances {
            rename: false,
            delete: false,
            add_page: false,
        };
    }
    Affordances {
        rename: true,
        delete: true,
        add_page: kind.is_milestone(),
    }
}

/// Rename request produced by committing an inline edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenameRequest {
    /// Rename a milestone.
    Milestone {
        /// Milestone id.
        milestone_id: i64,
        /// New title.
        title: String,
    },
    /// Rename a page.
    Page {
        /// Parent milestone id.
        milestone_id: i64,
        /// Page id.
        page_id: i64,
        /// New title.
        title: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RenameTarget {
    Milestone { milestone_id: i64 },
    Page { milestone_id: i64, page_id: i64 },
    Orphan,
}

/// Inline rename editor for one row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenameState {
    editing: Option<(NodeKey, RenameTarget)>,
    pending: String,
}

impl RenameState {
    /// Enter edit mode for `id`, seeded with its current title.
    pub fn begin(&mut self, structure: &Structure, id: NodeId) {
        let Some(node) = structure.node(id) else {
            return;
        };
        let target = if node.kind.is_milestone() {
            RenameTarget::Milestone {
                milestone_id: node.id,
            }
        } else {
            structure
                .parent(id)
                .map_or(RenameTarget::Orphan, |parent| RenameTarget::Page {
                    milestone_id: parent.id,
                    page_id: node.id,
                })
        };
        self.editing = Some((node.key, target));
        self.pending.clone_from(&node.title);
    }

    /// Replace the pending title.
    pub fn input(&mut self, text: impl Into<String>) {
        self.pending = text.into();
    }

    /// Whether the row with `key` is being edited.
    #[must_use]
    pub fn is_editing(&self, key: NodeKey) -> bool {
        matches!(self.editing, Some((current, _)) if current == key)
    }

    /// Pending title.
    #[must_use]
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Leave edit mode without a request.
    pub fn cancel(&mut self) {
        self.editing = None;
        self.pending.clear();
    }

    /// Leave edit mode and return the request to send, if any.
    pub fn commit(&mut self) -> Option<RenameRequest> {
        let (_, target) = self.editing.take()?;
        let title = std::mem::take(&mut self.pending);
        match target {
            RenameTarget::Milestone { milestone_id } => {
                Some(RenameRequest::Milestone {
                    milestone_id,
                    title,
                })
            }
            RenameTarget::Page {
                milestone_id,
                page_id,
            } => Some(RenameRequest::Page {
                milestone_id,
                page_id,
                title,
            }),
            RenameTarget::Orphan => None,
        }
    }
}

/// Authoring request issued from the draft sidebar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SidebarAction {
    /// Append a page to a milestone.
    CreatePage {
        /// Parent milestone id.
        milestone_id: i64,
    },
    /// Append a milestone to a group.
    CreateMilestone(MilestoneType),
    /// Delete a milestone.
    DeleteMilestone {
        /// Milestone id.
        milestone_id: i64,
    },
    /// Delete a page.
    DeletePage {
        /// Parent milestone id.
        milestone_id: i64,
        /// Page id.
        page_id: i64,
    },
    /// Commit a rename.
    Rename(RenameRequest),
}

impl SidebarAction {
    /// Delete action for a sidebar node, if it can be deleted.
    #[must_use]
    pub fn delete_for(structure: &Structure, id: NodeId) -> Option<Self> {
        let node = structure.node(id)?;
        match node.kind {
            NodeKind::IncourseMilestone | NodeKind::PrecourseMilestone => {
                Some(Self::DeleteMilestone {
                    milestone_id: node.id,
                })
            }
            NodeKind::Page => structure.parent(id).map(|parent| Self::DeletePage {
                milestone_id: parent.id,
                page_id: node.id,
            }),
            _ => None,
        }
    }

    /// Wire arguments for this action.
    #[must_use]
    pub fn into_update(self, course_id: i64) -> UpdateArgs {
        match self {
            Self::CreatePage { milestone_id } => UpdateArgs::CreatePage {
                course_id,
                milestone_id,
            },
            Self::CreateMilestone(milestone_type) => UpdateArgs::CreateMilestone {
                course_id,
                milestone_type,
            },
            Self::DeleteMilestone { milestone_id } => UpdateArgs::DeleteMilestone {
                course_id,
                milestone_id,
            },
            Self::DeletePage {
                milestone_id,
                page_id,
            } => UpdateArgs::DeletePage {
                course_id,
                milestone_id,
                page_id,
            },
            Self::Rename(RenameRequest::Milestone {
                milestone_id,
                title,
            }) => UpdateArgs::RenameMilestone {
                course_id,
                milestone_id,
                title,
            },
            Self::Rename(RenameRequest::Page {
                milestone_id,
                page_id,
                title,
            }) => UpdateArgs::RenamePage {
                course_id,
                milestone_id,
                page_id,
                title,
            },
        }
    }
}
