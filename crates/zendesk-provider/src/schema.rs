use std::collections::HashMap;

use tf_provider::{
    Attribute, AttributeConstraint, AttributeType, Block, Description, NestedBlock, Schema,
};

pub use AttributeConstraint::{Computed, Optional, OptionalComputed, Required};

pub fn attr(attr_type: AttributeType, constraint: AttributeConstraint, description: &str) -> Attribute {
    Attribute {
        attr_type,
        description: Description::plain(description),
        constraint,
        ..Default::default()
    }
}

pub fn string(constraint: AttributeConstraint, description: &str) -> Attribute {
    attr(AttributeType::String, constraint, description)
}

pub fn int(constraint: AttributeConstraint, description: &str) -> Attribute {
    attr(AttributeType::Number, constraint, description)
}

pub fn boolean(constraint: AttributeConstraint, description: &str) -> Attribute {
    attr(AttributeType::Bool, constraint, description)
}

pub fn sensitive(attribute: Attribute) -> Attribute {
    Attribute { sensitive: true, ..attribute }
}

pub fn string_set(constraint: AttributeConstraint, description: &str) -> Attribute {
    attr(AttributeType::Set(AttributeType::String.into()), constraint, description)
}

pub fn int_set(constraint: AttributeConstraint, description: &str) -> Attribute {
    attr(AttributeType::Set(AttributeType::Number.into()), constraint, description)
}

/// Set of objects, for computed collections that cannot be blocks.
pub fn object_set(
    fields: &[(&str, AttributeType)],
    constraint: AttributeConstraint,
    description: &str,
) -> Attribute {
    let fields = fields
        .iter()
        .map(|(name, ty)| (name.to_string(), ty.clone()))
        .collect();
    attr(
        AttributeType::Set(AttributeType::Object(fields).into()),
        constraint,
        description,
    )
}

/// The computed `id` every resource carries.
pub fn id(description: &str) -> Attribute {
    string(Computed, description)
}

pub fn block(
    description: &str,
    attributes: HashMap<String, Attribute>,
    blocks: HashMap<String, NestedBlock>,
) -> Block {
    Block {
        version: 1,
        attributes,
        blocks,
        description: Description::plain(description),
        ..Default::default()
    }
}

pub fn schema(block: Block) -> Schema {
    Schema { version: 1, block }
}
