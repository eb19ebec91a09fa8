/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/3/26
******************************************************************************/

//! Schema definitions for HL7 v2.x message structures.
//!
//! This module defines the structures that represent an HL7 version's
//! message schema:
//! - [`FieldSpec`]: One field declaration within a segment
//! - [`SegmentDef`]: Segment definitions with an ordered, dense field list
//! - [`ChildDef`]: One child slot declaration within a group
//! - [`GroupDef`]: Named, ordered compositions of segments and sub-groups
//! - [`SchemaRegistry`]: Complete per-version structure registry
//!
//! Definitions are declared once (typically at registry build time) and are
//! immutable afterwards; the runtime shares them through `Arc`.

use ironhl7_core::error::SchemaError;
use ironhl7_core::types::{TableId, Version};
use ironhl7_core::value::Datatype;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Declaration of one field position within a segment.
///
/// Field positions are 1-based and dense: the Nth call to
/// [`SegmentDef::add_field`] declares position N.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// The field's datatype.
    pub datatype: Datatype,
    /// Whether at least one populated repetition is required.
    pub required: bool,
    /// Maximum number of repetitions; `0` means unbounded.
    pub max_repetitions: u32,
    /// Maximum value length; `0` means unspecified.
    pub max_length: u32,
    /// Bound vocabulary table for coded datatypes.
    pub table: Option<TableId>,
    /// Human-readable field name.
    pub description: String,
}

impl FieldSpec {
    /// Creates a new field declaration.
    ///
    /// # Arguments
    /// * `datatype` - The field's datatype
    /// * `required` - Whether the field is required
    /// * `max_repetitions` - Repetition bound (`0` = unbounded, `1` = singular)
    /// * `max_length` - Length bound (`0` = unspecified)
    /// * `description` - Human-readable field name
    #[must_use]
    pub fn new(
        datatype: Datatype,
        required: bool,
        max_repetitions: u32,
        max_length: u32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            datatype,
            required,
            max_repetitions,
            max_length,
            table: None,
            description: description.into(),
        }
    }

    /// Binds the field to a vocabulary table.
    #[must_use]
    pub const fn with_table(mut self, table: TableId) -> Self {
        self.table = Some(table);
        self
    }

    /// Returns true if the field may repeat.
    #[must_use]
    pub const fn repeats(&self) -> bool {
        self.max_repetitions != 1
    }

    /// Validates the declaration.
    ///
    /// # Arguments
    /// * `segment` - The owning segment name, for error context
    /// * `position` - The 1-based field position, for error context
    ///
    /// # Errors
    /// Returns [`SchemaError::InvalidFieldSpec`] for a table binding on a
    /// non-coded datatype or a missing description.
    pub fn validate(&self, segment: &str, position: usize) -> Result<(), SchemaError> {
        if self.table.is_some() && !self.datatype.is_coded() {
            return Err(SchemaError::InvalidFieldSpec {
                segment: segment.to_string(),
                position,
                reason: format!("table binding on non-coded datatype {}", self.datatype),
            });
        }
        if self.description.is_empty() {
            return Err(SchemaError::InvalidFieldSpec {
                segment: segment.to_string(),
                position,
                reason: "empty description".to_string(),
            });
        }
        Ok(())
    }
}

/// Definition of an HL7 segment: a named record with an ordered field list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentDef {
    /// Segment name (e.g., "AUT").
    pub name: String,
    /// Human-readable segment description.
    pub description: String,
    /// Ordered field declarations; index 0 is position 1.
    fields: Vec<FieldSpec>,
}

impl SegmentDef {
    /// Creates a new segment definition with no fields.
    ///
    /// # Arguments
    /// * `name` - The segment name
    /// * `description` - Human-readable description
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            fields: Vec::new(),
        }
    }

    /// Appends the next positional field declaration.
    pub fn add_field(&mut self, spec: FieldSpec) {
        self.fields.push(spec);
    }

    /// Builder form of [`SegmentDef::add_field`].
    #[must_use]
    pub fn with_field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Gets the declaration at a 1-based field position.
    #[must_use]
    pub fn field(&self, position: usize) -> Option<&FieldSpec> {
        position.checked_sub(1).and_then(|i| self.fields.get(i))
    }

    /// Returns the number of declared fields.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Returns an iterator over the field declarations in position order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter()
    }
}

/// Declaration of one child slot within a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildDef {
    /// Slot name used for lookup (e.g., "OBSERVATION").
    pub name: String,
    /// Structure name resolved through the registry (e.g.,
    /// "VXU_V04_OBSERVATION"). Equal to `name` for segment children.
    pub structure: String,
    /// Whether at least one instance is required.
    pub required: bool,
    /// Whether the slot may hold more than one instance.
    pub repeating: bool,
}

impl ChildDef {
    /// Creates a child slot declaration.
    ///
    /// # Arguments
    /// * `name` - The slot name
    /// * `structure` - The registry structure name the slot instantiates
    /// * `required` - Whether the slot is required
    /// * `repeating` - Whether the slot repeats
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        structure: impl Into<String>,
        required: bool,
        repeating: bool,
    ) -> Self {
        Self {
            name: name.into(),
            structure: structure.into(),
            required,
            repeating,
        }
    }

    /// Creates a segment child slot, where the slot name is the segment name.
    #[must_use]
    pub fn segment(name: impl Into<String>, required: bool, repeating: bool) -> Self {
        let name = name.into();
        Self {
            structure: name.clone(),
            name,
            required,
            repeating,
        }
    }
}

/// Definition of an HL7 group: a named, ordered composition of child slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDef {
    /// Group name (e.g., "VXU_V04_ORDER").
    pub name: String,
    /// Ordered child slot declarations.
    children: Vec<ChildDef>,
}

impl GroupDef {
    /// Creates a new group definition with no children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Appends the next child slot declaration.
    pub fn add_child(&mut self, child: ChildDef) {
        self.children.push(child);
    }

    /// Builder form of [`GroupDef::add_child`].
    #[must_use]
    pub fn with_child(mut self, child: ChildDef) -> Self {
        self.children.push(child);
        self
    }

    /// Gets a child declaration by slot name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&ChildDef> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Gets the slot index of a child by name.
    #[must_use]
    pub fn child_index(&self, name: &str) -> Option<usize> {
        self.children.iter().position(|c| c.name == name)
    }

    /// Returns the number of declared child slots.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Returns an iterator over the child declarations in slot order.
    pub fn children(&self) -> impl Iterator<Item = &ChildDef> {
        self.children.iter()
    }

    /// Validates the definition.
    ///
    /// # Errors
    /// Returns [`SchemaError::DuplicateChild`] if two slots share a name, or
    /// [`SchemaError::EmptyDefinition`] if no children are declared.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.children.is_empty() {
            return Err(SchemaError::EmptyDefinition {
                name: self.name.clone(),
            });
        }
        for (i, child) in self.children.iter().enumerate() {
            if self.children[..i].iter().any(|c| c.name == child.name) {
                return Err(SchemaError::DuplicateChild {
                    group: self.name.clone(),
                    name: child.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Complete structure registry for one HL7 version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaRegistry {
    /// HL7 version this registry describes.
    pub version: Version,
    /// Segment definitions indexed by name.
    segments: HashMap<String, Arc<SegmentDef>>,
    /// Group definitions indexed by name.
    groups: HashMap<String, Arc<GroupDef>>,
}

impl SchemaRegistry {
    /// Creates a new empty registry for the specified version.
    #[must_use]
    pub fn new(version: Version) -> Self {
        Self {
            version,
            segments: HashMap::new(),
            groups: HashMap::new(),
        }
    }

    /// Adds a segment definition.
    pub fn add_segment(&mut self, segment: SegmentDef) {
        self.segments.insert(segment.name.clone(), Arc::new(segment));
    }

    /// Adds a group definition.
    pub fn add_group(&mut self, group: GroupDef) {
        self.groups.insert(group.name.clone(), Arc::new(group));
    }

    /// Gets a segment definition by name.
    #[must_use]
    pub fn segment(&self, name: &str) -> Option<&Arc<SegmentDef>> {
        self.segments.get(name)
    }

    /// Gets a group definition by name.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&Arc<GroupDef>> {
        self.groups.get(name)
    }

    /// Returns true if the name maps to a segment or group definition.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.segments.contains_key(name) || self.groups.contains_key(name)
    }

    /// Returns an iterator over all segment definitions.
    pub fn segments(&self) -> impl Iterator<Item = &Arc<SegmentDef>> {
        self.segments.values()
    }

    /// Returns an iterator over all group definitions.
    pub fn groups(&self) -> impl Iterator<Item = &Arc<GroupDef>> {
        self.groups.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_field_segment() -> SegmentDef {
        SegmentDef::new("ZZA", "Test Segment")
            .with_field(FieldSpec::new(Datatype::Si, true, 1, 4, "Set ID"))
            .with_field(
                FieldSpec::new(Datatype::Id, false, 1, 1, "Yes/No Indicator")
                    .with_table(TableId::new(136)),
            )
    }

    #[test]
    fn test_field_positions_are_one_based() {
        let def = two_field_segment();
        assert_eq!(def.field_count(), 2);
        assert!(def.field(0).is_none());
        assert_eq!(def.field(1).unwrap().description, "Set ID");
        assert_eq!(def.field(2).unwrap().table, Some(TableId::new(136)));
        assert!(def.field(3).is_none());
    }

    #[test]
    fn test_field_spec_repeats() {
        assert!(FieldSpec::new(Datatype::Cwe, false, 0, 0, "x").repeats());
        assert!(FieldSpec::new(Datatype::Cwe, false, 3, 0, "x").repeats());
        assert!(!FieldSpec::new(Datatype::Cwe, false, 1, 0, "x").repeats());
    }

    #[test]
    fn test_field_spec_validate_rejects_table_on_non_coded() {
        let spec = FieldSpec::new(Datatype::St, false, 1, 0, "Name").with_table(TableId::new(399));
        assert!(matches!(
            spec.validate("ZZA", 1),
            Err(SchemaError::InvalidFieldSpec { position: 1, .. })
        ));
    }

    #[test]
    fn test_group_def_lookup() {
        let def = GroupDef::new("ZZZ_Z01_ORDER")
            .with_child(ChildDef::segment("ORC", true, false))
            .with_child(ChildDef::new("OBSERVATION", "ZZZ_Z01_OBSERVATION", false, true));

        assert_eq!(def.child_count(), 2);
        assert_eq!(def.child_index("ORC"), Some(0));
        assert_eq!(def.child("OBSERVATION").unwrap().structure, "ZZZ_Z01_OBSERVATION");
        assert!(def.child("OBX").is_none());
        assert!(def.validate().is_ok());
    }

    #[test]
    fn test_group_def_validate_duplicate_child() {
        let def = GroupDef::new("ZZZ")
            .with_child(ChildDef::segment("ORC", true, false))
            .with_child(ChildDef::segment("ORC", false, false));
        assert!(matches!(
            def.validate(),
            Err(SchemaError::DuplicateChild { .. })
        ));
    }

    #[test]
    fn test_group_def_validate_empty() {
        let def = GroupDef::new("ZZZ");
        assert!(matches!(
            def.validate(),
            Err(SchemaError::EmptyDefinition { .. })
        ));
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = SchemaRegistry::new(Version::V27);
        registry.add_segment(two_field_segment());
        registry.add_group(GroupDef::new("ZZZ_Z01_ORDER").with_child(ChildDef::segment("ZZA", true, false)));

        assert!(registry.segment("ZZA").is_some());
        assert!(registry.group("ZZZ_Z01_ORDER").is_some());
        assert!(registry.contains("ZZA"));
        assert!(registry.contains("ZZZ_Z01_ORDER"));
        assert!(!registry.contains("XYZ"));
    }
}
