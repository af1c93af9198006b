//! Named, typed payloads attached to mesh entities.
//!
//! Every vertex, edge, loop and face carries an [`AttributeMap`]: a lazily
//! populated mapping from attribute name to [`AttributeValue`]. The map itself
//! never interprets or checks the values it stores. Type consistency across
//! entities is opt-in, through the per-kind [`AttributeSchema`] owned by the
//! mesh.
//!
//! Values are small fixed-dimension vectors of one base type, which covers the
//! usual per-entity data (UV coordinates, material ids, colors, weights).

use std::fmt;

use hashbrown::HashMap;

use crate::mesh_error::MeshError;
use crate::topology::ids::EntityKind;

/// Scalar type of an attribute's components.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AttributeBaseType {
    /// 64-bit signed integer components.
    Int,
    /// 64-bit float components.
    Float,
}

/// Full type of an attribute value: base type plus number of components.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AttributeType {
    /// Component type.
    pub base: AttributeBaseType,
    /// Number of components.
    pub dimensions: usize,
}

impl AttributeType {
    /// An integer type with `dimensions` components.
    pub const fn int(dimensions: usize) -> Self {
        Self {
            base: AttributeBaseType::Int,
            dimensions,
        }
    }

    /// A float type with `dimensions` components.
    pub const fn float(dimensions: usize) -> Self {
        Self {
            base: AttributeBaseType::Float,
            dimensions,
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = match self.base {
            AttributeBaseType::Int => "int",
            AttributeBaseType::Float => "float",
        };
        write!(f, "{base}[{}]", self.dimensions)
    }
}

/// A stored attribute payload.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum AttributeValue {
    /// Integer components.
    Int(Vec<i64>),
    /// Float components.
    Float(Vec<f64>),
}

impl AttributeValue {
    /// Returns the type of this value, derived from its variant and length.
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            AttributeValue::Int(data) => AttributeType::int(data.len()),
            AttributeValue::Float(data) => AttributeType::float(data.len()),
        }
    }

    /// The components, if this is an integer value.
    pub fn as_ints(&self) -> Option<&[i64]> {
        match self {
            AttributeValue::Int(data) => Some(data),
            AttributeValue::Float(_) => None,
        }
    }

    /// The components, if this is a float value.
    pub fn as_floats(&self) -> Option<&[f64]> {
        match self {
            AttributeValue::Float(data) => Some(data),
            AttributeValue::Int(_) => None,
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        AttributeValue::Int(vec![v])
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        AttributeValue::Float(vec![v])
    }
}

impl<const N: usize> From<[i64; N]> for AttributeValue {
    fn from(v: [i64; N]) -> Self {
        AttributeValue::Int(v.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for AttributeValue {
    fn from(v: [f64; N]) -> Self {
        AttributeValue::Float(v.to_vec())
    }
}

/// Per-entity attribute storage.
///
/// A missing key means "no value"; the map never synthesizes defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeMap {
    values: HashMap<String, AttributeValue>,
}

impl AttributeMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `name`, returning the value it replaced, if any.
    pub fn set(&mut self, name: &str, value: AttributeValue) -> Option<AttributeValue> {
        self.values.insert(name.to_string(), value)
    }

    /// Returns the value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.values.get(name)
    }

    /// Mutable access to the value stored under `name`.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut AttributeValue> {
        self.values.get_mut(name)
    }

    /// Removes and returns the value stored under `name`.
    pub fn remove(&mut self, name: &str) -> Option<AttributeValue> {
        self.values.remove(name)
    }

    /// True if a value is stored under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over all `(name, value)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Declaration of a typed attribute for one entity kind.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeDefinition {
    /// Attribute name, unique per entity kind.
    pub name: String,
    /// Declared type.
    pub ty: AttributeType,
    /// Value reported by [`Mesh::attribute_or_default`] for entities that
    /// have none. Never written into entity maps.
    ///
    /// [`Mesh::attribute_or_default`]: crate::topology::mesh::Mesh::attribute_or_default
    pub default: Option<AttributeValue>,
}

impl AttributeDefinition {
    /// A declaration without a default.
    pub fn new(name: &str, ty: AttributeType) -> Self {
        Self {
            name: name.to_string(),
            ty,
            default: None,
        }
    }

    /// Attaches a default value; its type must match the declaration.
    pub fn with_default(mut self, default: AttributeValue) -> Result<Self, MeshError> {
        check_type(&self.name, self.ty, &default)?;
        self.default = Some(default);
        Ok(self)
    }
}

/// Attribute declarations, per entity kind.
#[derive(Clone, Debug, Default)]
pub struct AttributeSchema {
    vertex: HashMap<String, AttributeDefinition>,
    edge: HashMap<String, AttributeDefinition>,
    loops: HashMap<String, AttributeDefinition>,
    face: HashMap<String, AttributeDefinition>,
}

impl AttributeSchema {
    fn table(&self, kind: EntityKind) -> &HashMap<String, AttributeDefinition> {
        match kind {
            EntityKind::Vertex => &self.vertex,
            EntityKind::Edge => &self.edge,
            EntityKind::Loop => &self.loops,
            EntityKind::Face => &self.face,
        }
    }

    fn table_mut(&mut self, kind: EntityKind) -> &mut HashMap<String, AttributeDefinition> {
        match kind {
            EntityKind::Vertex => &mut self.vertex,
            EntityKind::Edge => &mut self.edge,
            EntityKind::Loop => &mut self.loops,
            EntityKind::Face => &mut self.face,
        }
    }

    /// Registers `def` for `kind`.
    ///
    /// Re-declaring a name with the same type replaces the default; a
    /// different type is rejected with [`MeshError::AttributeRedeclared`].
    pub fn declare(&mut self, kind: EntityKind, def: AttributeDefinition) -> Result<(), MeshError> {
        let table = self.table_mut(kind);
        if let Some(existing) = table.get(&def.name) {
            if existing.ty != def.ty {
                return Err(MeshError::AttributeRedeclared {
                    name: def.name,
                    existing: existing.ty,
                });
            }
        }
        table.insert(def.name.clone(), def);
        Ok(())
    }

    /// The declaration of `name` for `kind`, if any.
    pub fn definition(&self, kind: EntityKind, name: &str) -> Option<&AttributeDefinition> {
        self.table(kind).get(name)
    }

    /// True if `name` is declared for `kind`.
    pub fn is_declared(&self, kind: EntityKind, name: &str) -> bool {
        self.table(kind).contains_key(name)
    }

    /// Iterate over the declarations for `kind` in unspecified order.
    pub fn definitions(&self, kind: EntityKind) -> impl Iterator<Item = &AttributeDefinition> + '_ {
        self.table(kind).values()
    }

    /// Checks `value` against the declaration for `name`, if there is one.
    pub fn check(
        &self,
        kind: EntityKind,
        name: &str,
        value: &AttributeValue,
    ) -> Result<(), MeshError> {
        match self.definition(kind, name) {
            Some(def) => check_type(name, def.ty, value),
            None => Ok(()),
        }
    }
}

fn check_type(
    name: &str,
    expected: AttributeType,
    value: &AttributeValue,
) -> Result<(), MeshError> {
    let found = value.attribute_type();
    if found != expected {
        return Err(MeshError::AttributeTypeMismatch {
            name: name.to_string(),
            expected,
            found,
        });
    }
    Ok(())
}


#[cfg(test)]
mod serde_tests {
    use super::*;

    #[test]
    fn json_roundtrip() {
        let v = AttributeValue::Float(vec![0.5, 1.5]);
        let s = serde_json::to_string(&v).unwrap();
        let v2: AttributeValue = serde_json::from_str(&s).unwrap();
        assert_eq!(v2, v);
    }
}
