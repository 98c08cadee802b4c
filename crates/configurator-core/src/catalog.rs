#![forbid(unsafe_code)]

//! Read-only product tree published by the configurator engine.
//!
//! A [`Group`] contains [`Step`]s and [`Attribute`]s, a step contains
//! attributes of its own, and an attribute contains selectable
//! [`ConfigOption`]s. Template groups hang off both groups and steps.
//!
//! Ids are not stable across structural changes (a template switch can
//! rebuild the whole tree), so callers holding an id should resolve it again
//! through the lookup helpers before using it.
//!
//! # Lookup semantics
//!
//! - [`find_group`] searches top-level groups.
//! - [`find_step`] searches the steps of every group.
//! - [`find_attribute`] searches attributes directly under groups first, then
//!   attributes under steps.
//! - [`find_option`] searches the options of every attribute found by the
//!   rules above, and also returns the owning attribute.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ids::{AttributeId, GroupId, OptionId, StepId, TemplateGroupId};

/// A selectable value of an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConfigOption {
    pub id: OptionId,
    pub name: String,
    /// Whether the engine currently has this option applied.
    #[cfg_attr(feature = "serde", serde(default))]
    pub selected: bool,
}

impl ConfigOption {
    #[must_use]
    pub fn new(id: OptionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            selected: false,
        }
    }

    #[must_use]
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

/// A configurable property with a list of options.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attribute {
    pub id: AttributeId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub options: Vec<ConfigOption>,
}

impl Attribute {
    #[must_use]
    pub fn new(id: AttributeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            options: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_option(mut self, option: ConfigOption) -> Self {
        self.options.push(option);
        self
    }

    /// The option the engine currently has applied, if any.
    #[must_use]
    pub fn selected_option(&self) -> Option<&ConfigOption> {
        self.options.iter().find(|o| o.selected)
    }
}

/// A group of templates the customer can pick from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TemplateGroup {
    pub id: TemplateGroupId,
    pub name: String,
}

/// A wizard-style step inside a group.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Step {
    pub id: StepId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: Vec<Attribute>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub template_groups: Vec<TemplateGroup>,
}

impl Step {
    #[must_use]
    pub fn new(id: StepId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            attributes: Vec::new(),
            template_groups: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    #[must_use]
    pub fn with_template_group(mut self, template_group: TemplateGroup) -> Self {
        self.template_groups.push(template_group);
        self
    }
}

/// A top-level navigation group.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub steps: Vec<Step>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: Vec<Attribute>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub template_groups: Vec<TemplateGroup>,
}

impl Group {
    #[must_use]
    pub fn new(id: GroupId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            steps: Vec::new(),
            attributes: Vec::new(),
            template_groups: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    #[must_use]
    pub fn with_template_group(mut self, template_group: TemplateGroup) -> Self {
        self.template_groups.push(template_group);
        self
    }

    /// Attributes shown for this group: those of `step` when a step of this
    /// group is given, otherwise the group's own.
    #[must_use]
    pub fn attributes_for(&self, step: Option<StepId>) -> &[Attribute] {
        step.and_then(|id| self.steps.iter().find(|s| s.id == id))
            .map_or(self.attributes.as_slice(), |s| s.attributes.as_slice())
    }

    fn all_attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes
            .iter()
            .chain(self.steps.iter().flat_map(|s| s.attributes.iter()))
    }
}

/// The full tree of groups for the loaded product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProductTree {
    pub groups: Vec<Group>,
}

impl ProductTree {
    #[must_use]
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    #[must_use]
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        find_group(&self.groups, id)
    }

    #[must_use]
    pub fn step(&self, id: StepId) -> Option<&Step> {
        find_step(&self.groups, id)
    }

    #[must_use]
    pub fn attribute(&self, id: AttributeId) -> Option<&Attribute> {
        find_attribute(&self.groups, id)
    }

    #[must_use]
    pub fn option(&self, id: OptionId) -> Option<(&Attribute, &ConfigOption)> {
        find_option(&self.groups, id)
    }
}

/// Find a top-level group by id.
#[must_use]
pub fn find_group(groups: &[Group], id: GroupId) -> Option<&Group> {
    groups.iter().find(|g| g.id == id)
}

/// Find a step by id across all groups.
#[must_use]
pub fn find_step(groups: &[Group], id: StepId) -> Option<&Step> {
    groups
        .iter()
        .flat_map(|g| g.steps.iter())
        .find(|s| s.id == id)
}

/// Find an attribute by id, group-level attributes first.
#[must_use]
pub fn find_attribute(groups: &[Group], id: AttributeId) -> Option<&Attribute> {
    groups
        .iter()
        .flat_map(|g| g.attributes.iter())
        .chain(
            groups
                .iter()
                .flat_map(|g| g.steps.iter())
                .flat_map(|s| s.attributes.iter()),
        )
        .find(|a| a.id == id)
}

/// Find an option by id together with the attribute that owns it.
#[must_use]
pub fn find_option(groups: &[Group], id: OptionId) -> Option<(&Attribute, &ConfigOption)> {
    groups.iter().flat_map(Group::all_attributes).find_map(|a| {
        a.options
            .iter()
            .find(|o| o.id == id)
            .map(|o| (a, o))
    })
}
