//! Data module: per-entity attribute storage
#![warn(missing_docs)]

pub mod attribute;

pub use attribute::{
    AttributeBaseType, AttributeDefinition, AttributeMap, AttributeSchema, AttributeType,
    AttributeValue,
};
