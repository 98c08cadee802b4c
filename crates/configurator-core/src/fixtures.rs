#![forbid(unsafe_code)]

//! Sample product trees for tests.

use crate::catalog::{Attribute, ConfigOption, Group, ProductTree, Step, TemplateGroup};
use crate::ids::{AttributeId, GroupId, OptionId, StepId, TemplateGroupId};

/// A small sofa product:
///
/// ```text
/// group 1 "Frame"
///   attribute 10 "Material"   options 100 (selected), 101, 102
///   step 20 "Legs"
///     attribute 30 "Leg style" options 300 (selected), 301
///   step 21 "Arms"
///     attribute 31 "Arm shape" options 310, 311
/// group 2 "Cushions"
///   attribute 11 "Fabric"     options 110 (selected), 111
///   template group 40 "Prints"
/// group 3 "Extras"
/// ```
#[must_use]
pub fn sofa() -> ProductTree {
    ProductTree::new(vec![
        Group::new(GroupId(1), "Frame")
            .with_attribute(
                Attribute::new(AttributeId(10), "Material")
                    .with_option(ConfigOption::new(OptionId(100), "Oak").selected(true))
                    .with_option(ConfigOption::new(OptionId(101), "Walnut"))
                    .with_option(ConfigOption::new(OptionId(102), "Steel")),
            )
            .with_step(
                Step::new(StepId(20), "Legs").with_attribute(
                    Attribute::new(AttributeId(30), "Leg style")
                        .with_option(ConfigOption::new(OptionId(300), "Tapered").selected(true))
                        .with_option(ConfigOption::new(OptionId(301), "Block")),
                ),
            )
            .with_step(
                Step::new(StepId(21), "Arms").with_attribute(
                    Attribute::new(AttributeId(31), "Arm shape")
                        .with_option(ConfigOption::new(OptionId(310), "Round"))
                        .with_option(ConfigOption::new(OptionId(311), "Square")),
                ),
            ),
        Group::new(GroupId(2), "Cushions")
            .with_attribute(
                Attribute::new(AttributeId(11), "Fabric")
                    .with_option(ConfigOption::new(OptionId(110), "Linen").selected(true))
                    .with_option(ConfigOption::new(OptionId(111), "Velvet")),
            )
            .with_template_group(TemplateGroup {
                id: TemplateGroupId(40),
                name: "Prints".into(),
            }),
        Group::new(GroupId(3), "Extras"),
    ])
}

/// Every group id in [`sofa`].
pub const SOFA_GROUPS: [GroupId; 3] = [GroupId(1), GroupId(2), GroupId(3)];
/// Every step id in [`sofa`].
pub const SOFA_STEPS: [StepId; 2] = [StepId(20), StepId(21)];
/// Every attribute id in [`sofa`].
pub const SOFA_ATTRIBUTES: [AttributeId; 4] =
    [AttributeId(10), AttributeId(11), AttributeId(30), AttributeId(31)];
