#![forbid(unsafe_code)]

//! Navigation steps and the batches they are recorded in.
//!
//! A user action produces a [`StepBatch`]: for every selection it changed,
//! one [`Direction::Undo`] step carrying the previous id and one
//! [`Direction::Redo`] step carrying the new id. The whole batch moves
//! between the undo and redo stacks; the direction tag decides which of its
//! steps are replayed on the way.

use std::fmt;

use configurator_core::{AttributeId, GroupId, OptionId, StepId};

/// Kind of navigation entity a step targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Group,
    Step,
    Attribute,
    Option,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Group => "group",
            Self::Step => "step",
            Self::Attribute => "attribute",
            Self::Option => "option",
        })
    }
}

/// Which replay a step belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Undo,
    Redo,
}

impl Direction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }
}

/// The entity a step restores, with its typed id.
///
/// `None` means "nothing selected" at that level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepTarget {
    Group(Option<GroupId>),
    Step(Option<StepId>),
    Attribute(Option<AttributeId>),
    Option(Option<OptionId>),
}

impl StepTarget {
    #[must_use]
    pub const fn kind(&self) -> TargetKind {
        match self {
            Self::Group(_) => TargetKind::Group,
            Self::Step(_) => TargetKind::Step,
            Self::Attribute(_) => TargetKind::Attribute,
            Self::Option(_) => TargetKind::Option,
        }
    }

    /// Whether the target is "nothing selected".
    #[must_use]
    pub const fn is_null(&self) -> bool {
        match self {
            Self::Group(id) => id.is_none(),
            Self::Step(id) => id.is_none(),
            Self::Attribute(id) => id.is_none(),
            Self::Option(id) => id.is_none(),
        }
    }

    /// Raw engine id of the target, if any.
    #[must_use]
    pub fn raw_id(&self) -> Option<i64> {
        match self {
            Self::Group(id) => id.map(GroupId::raw),
            Self::Step(id) => id.map(StepId::raw),
            Self::Attribute(id) => id.map(AttributeId::raw),
            Self::Option(id) => id.map(OptionId::raw),
        }
    }
}

/// A user-originated change of one selection, from the previous id to the
/// new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionChange {
    Group {
        from: Option<GroupId>,
        to: Option<GroupId>,
    },
    Step {
        from: Option<StepId>,
        to: Option<StepId>,
    },
    Attribute {
        from: Option<AttributeId>,
        to: Option<AttributeId>,
    },
    Option {
        from: Option<OptionId>,
        to: Option<OptionId>,
    },
}

impl SelectionChange {
    #[must_use]
    pub const fn kind(&self) -> TargetKind {
        match self {
            Self::Group { .. } => TargetKind::Group,
            Self::Step { .. } => TargetKind::Step,
            Self::Attribute { .. } => TargetKind::Attribute,
            Self::Option { .. } => TargetKind::Option,
        }
    }

    /// Whether the new id equals the previous one.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        match self {
            Self::Group { from, to } => from == to,
            Self::Step { from, to } => from == to,
            Self::Attribute { from, to } => from == to,
            Self::Option { from, to } => from == to,
        }
    }

    /// Target restored by undo.
    #[must_use]
    pub const fn previous(&self) -> StepTarget {
        match *self {
            Self::Group { from, .. } => StepTarget::Group(from),
            Self::Step { from, .. } => StepTarget::Step(from),
            Self::Attribute { from, .. } => StepTarget::Attribute(from),
            Self::Option { from, .. } => StepTarget::Option(from),
        }
    }

    /// Target restored by redo.
    #[must_use]
    pub const fn next(&self) -> StepTarget {
        match *self {
            Self::Group { to, .. } => StepTarget::Group(to),
            Self::Step { to, .. } => StepTarget::Step(to),
            Self::Attribute { to, .. } => StepTarget::Attribute(to),
            Self::Option { to, .. } => StepTarget::Option(to),
        }
    }
}

/// One recorded navigation step. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UndoRedoStep {
    pub target: StepTarget,
    pub direction: Direction,
}

impl UndoRedoStep {
    #[must_use]
    pub const fn undo(target: StepTarget) -> Self {
        Self {
            target,
            direction: Direction::Undo,
        }
    }

    #[must_use]
    pub const fn redo(target: StepTarget) -> Self {
        Self {
            target,
            direction: Direction::Redo,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> TargetKind {
        self.target.kind()
    }
}

impl fmt::Display for UndoRedoStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target.raw_id() {
            Some(id) => write!(f, "{} {}#{}", self.direction.as_str(), self.kind(), id),
            None => write!(f, "{} {}#none", self.direction.as_str(), self.kind()),
        }
    }
}

/// Steps produced by a single user action, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepBatch {
    steps: Vec<UndoRedoStep>,
}

impl StepBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The matched undo/redo pair for one change.
    #[must_use]
    pub fn from_change(change: SelectionChange) -> Self {
        let mut batch = Self::new();
        batch.push_change(change);
        batch
    }

    /// Append the undo/redo pair for one change.
    pub fn push_change(&mut self, change: SelectionChange) {
        self.steps.push(UndoRedoStep::undo(change.previous()));
        self.steps.push(UndoRedoStep::redo(change.next()));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UndoRedoStep> {
        self.steps.iter()
    }

    /// Steps tagged with `direction`, in insertion order.
    pub fn steps_for(&self, direction: Direction) -> impl Iterator<Item = &UndoRedoStep> {
        self.steps.iter().filter(move |s| s.direction == direction)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[UndoRedoStep] {
        &self.steps
    }
}

impl<'a> IntoIterator for &'a StepBatch {
    type Item = &'a UndoRedoStep;
    type IntoIter = std::slice::Iter<'a, UndoRedoStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
