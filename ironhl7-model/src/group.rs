/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/3/26
******************************************************************************/

//! Generic group runtime.
//!
//! A [`Group`] is a named, ordered composition of child structures —
//! segments or nested groups — instantiated against a
//! [`GroupDef`](ironhl7_dictionary::GroupDef). Children are created lazily:
//! the first read of an absent slot materializes an empty instance through
//! the message's [`ModelClassFactory`](crate::ModelClassFactory), which is
//! why named accessors over a required singular child never observe an
//! absent value.
//!
//! ## Slot State Machine
//!
//! A non-repeating slot is either absent or holds exactly one instance; a
//! repeating slot holds a dense, order-preserving sequence. Repetition
//! access is append-only-at-end: requesting an index equal to the current
//! count appends one instance, requesting past it fails. Removal compacts
//! the sequence and is only available on repeating slots.

use crate::message::MessageContext;
use crate::segment::Segment;
use ironhl7_core::error::AccessError;
use ironhl7_dictionary::{ChildDef, GroupDef};
use std::sync::Arc;
use tracing::{debug, warn};

/// A child structure: a segment or a nested group.
#[derive(Debug, Clone)]
pub enum Structure {
    /// A segment instance.
    Segment(Segment),
    /// A nested group instance.
    Group(Group),
}

impl Structure {
    /// Returns the structure name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Segment(s) => s.name(),
            Self::Group(g) => g.name(),
        }
    }

    /// Returns true if this is a segment.
    #[must_use]
    pub const fn is_segment(&self) -> bool {
        matches!(self, Self::Segment(_))
    }

    /// Returns the structure as a segment, if it is one.
    #[must_use]
    pub const fn as_segment(&self) -> Option<&Segment> {
        match self {
            Self::Segment(s) => Some(s),
            Self::Group(_) => None,
        }
    }

    /// Returns the structure as a mutable segment, if it is one.
    #[must_use]
    pub const fn as_segment_mut(&mut self) -> Option<&mut Segment> {
        match self {
            Self::Segment(s) => Some(s),
            Self::Group(_) => None,
        }
    }

    /// Returns the structure as a group, if it is one.
    #[must_use]
    pub const fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Group(g) => Some(g),
            Self::Segment(_) => None,
        }
    }

    /// Returns the structure as a mutable group, if it is one.
    #[must_use]
    pub const fn as_group_mut(&mut self) -> Option<&mut Group> {
        match self {
            Self::Group(g) => Some(g),
            Self::Segment(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Slot {
    instances: Vec<Structure>,
}

/// A named, ordered composition of child structures.
#[derive(Debug, Clone)]
pub struct Group {
    def: Arc<GroupDef>,
    context: Arc<MessageContext>,
    slots: Vec<Slot>,
}

impl Group {
    /// Creates an empty group with one vacant slot per declared child.
    ///
    /// A definition that fails validation is logged and the group is still
    /// returned; duplicate slot names resolve to their first declaration.
    ///
    /// # Arguments
    /// * `def` - The group definition
    /// * `context` - The shared message context
    #[must_use]
    pub fn new(def: Arc<GroupDef>, context: Arc<MessageContext>) -> Self {
        if let Err(err) = def.validate() {
            warn!(group = %def.name, error = %err, "group definition rejected; continuing");
        }
        let slots = vec![Slot::default(); def.child_count()];
        Self {
            def,
            context,
            slots,
        }
    }

    /// Returns the group name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.def.name
    }

    /// Returns the group definition.
    #[inline]
    #[must_use]
    pub const fn def(&self) -> &Arc<GroupDef> {
        &self.def
    }

    /// Returns the shared message context.
    #[inline]
    #[must_use]
    pub const fn context(&self) -> &Arc<MessageContext> {
        &self.context
    }

    /// Returns an iterator over the declared child slots in order.
    pub fn children(&self) -> impl Iterator<Item = &ChildDef> {
        self.def.children()
    }

    /// Returns the number of populated repetitions for a child slot.
    ///
    /// # Errors
    /// Returns [`AccessError::UnknownChild`] for undeclared names.
    pub fn repetitions_used(&self, name: &str) -> Result<usize, AccessError> {
        self.slot_index(name)
            .map(|index| self.slots[index].instances.len())
    }

    /// Gets the first repetition of a child slot, materializing it if the
    /// slot is empty.
    ///
    /// # Arguments
    /// * `name` - The child slot name
    ///
    /// # Errors
    /// Same as [`Group::get_structure_rep`] at index 0.
    pub fn get_structure(&mut self, name: &str) -> Result<&mut Structure, AccessError> {
        self.get_structure_rep(name, 0)
    }

    /// Gets the repetition at `rep` for a child slot, materializing one
    /// instance when `rep` equals the current count.
    ///
    /// # Arguments
    /// * `name` - The child slot name
    /// * `rep` - The zero-based repetition index
    ///
    /// # Errors
    /// Returns [`AccessError::UnknownChild`] for undeclared names,
    /// [`AccessError::NotRepeating`] for `rep > 0` on a non-repeating slot,
    /// [`AccessError::ChildRepetitionOutOfRange`] for skipping past the
    /// count, and [`AccessError::Instantiation`] if the factory cannot
    /// resolve the child's structure.
    pub fn get_structure_rep(
        &mut self,
        name: &str,
        rep: usize,
    ) -> Result<&mut Structure, AccessError> {
        let index = self.slot_index(name)?;
        let child = self.def.children().nth(index).cloned().ok_or_else(|| {
            AccessError::UnknownChild {
                group: self.def.name.clone(),
                name: name.to_string(),
            }
        })?;
        let populated = self.slots[index].instances.len();

        if rep > 0 && !child.repeating {
            return Err(AccessError::NotRepeating {
                group: self.def.name.clone(),
                name: name.to_string(),
            });
        }
        if rep > populated {
            return Err(AccessError::ChildRepetitionOutOfRange {
                group: self.def.name.clone(),
                name: name.to_string(),
                requested: rep,
                populated,
            });
        }
        if rep == populated {
            let context = Arc::clone(&self.context);
            let instance = context
                .factory()
                .instantiate(&child.structure, &context)
                .map_err(|source| AccessError::Instantiation {
                    structure: child.structure.clone(),
                    source,
                })?;
            debug!(
                group = %self.def.name,
                child = %name,
                rep,
                "materialized child structure"
            );
            self.slots[index].instances.push(instance);
        }
        Ok(&mut self.slots[index].instances[rep])
    }

    /// Gets the repetition at `rep` without materializing.
    ///
    /// # Errors
    /// Returns [`AccessError::ChildRepetitionOutOfRange`] when the index is
    /// not populated, or [`AccessError::UnknownChild`].
    pub fn try_structure(&self, name: &str, rep: usize) -> Result<&Structure, AccessError> {
        let index = self.slot_index(name)?;
        self.slots[index].instances.get(rep).ok_or_else(|| {
            AccessError::ChildRepetitionOutOfRange {
                group: self.def.name.clone(),
                name: name.to_string(),
                requested: rep,
                populated: self.slots[index].instances.len(),
            }
        })
    }

    /// Returns every populated repetition for a child slot, in order.
    ///
    /// The slice may be empty; an absent child is not an error.
    ///
    /// # Errors
    /// Returns [`AccessError::UnknownChild`] for undeclared names.
    pub fn get_all(&self, name: &str) -> Result<&[Structure], AccessError> {
        self.slot_index(name)
            .map(|index| self.slots[index].instances.as_slice())
    }

    /// Instantiates and appends a new repetition, returning it.
    ///
    /// # Errors
    /// Same as [`Group::get_structure_rep`] at index `repetitions_used`.
    pub fn add_structure(&mut self, name: &str) -> Result<&mut Structure, AccessError> {
        let next = self.repetitions_used(name)?;
        self.get_structure_rep(name, next)
    }

    /// Removes and returns the repetition at `index`, compacting the
    /// remaining sequence.
    ///
    /// # Arguments
    /// * `name` - The child slot name
    /// * `index` - The zero-based repetition index to remove
    ///
    /// # Errors
    /// Returns [`AccessError::UnknownChild`] for undeclared names,
    /// [`AccessError::NotRemovable`] for non-repeating slots, and
    /// [`AccessError::RemoveOutOfRange`] when the index is not populated.
    pub fn remove_repetition(&mut self, name: &str, index: usize) -> Result<Structure, AccessError> {
        let slot_index = self.slot_index(name)?;
        let child = self.def.child(name).ok_or_else(|| AccessError::UnknownChild {
            group: self.def.name.clone(),
            name: name.to_string(),
        })?;
        if !child.repeating {
            return Err(AccessError::NotRemovable {
                group: self.def.name.clone(),
                name: name.to_string(),
            });
        }
        let populated = self.slots[slot_index].instances.len();
        if index >= populated {
            return Err(AccessError::RemoveOutOfRange {
                name: name.to_string(),
                index,
                populated,
            });
        }
        Ok(self.slots[slot_index].instances.remove(index))
    }

    fn slot_index(&self, name: &str) -> Result<usize, AccessError> {
        self.def
            .child_index(name)
            .ok_or_else(|| AccessError::UnknownChild {
                group: self.def.name.clone(),
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;
    use ironhl7_core::value::Value;
    use ironhl7_dictionary::catalog;
    use ironhl7_dictionary::{ChildDef, GroupDef, SchemaRegistry};
    use ironhl7_core::types::Version;

    fn order_group() -> Group {
        let registry = Arc::new(catalog::v27());
        let mut message = Message::new(registry, "RSP_K31").unwrap();
        let order = message
            .root_mut()
            .get_structure_rep("ORDER", 0)
            .unwrap()
            .as_group()
            .cloned()
            .unwrap();
        order
    }

    #[test]
    fn test_lazy_singular_materialization_is_idempotent() {
        let mut group = order_group();
        assert_eq!(group.repetitions_used("ORC").unwrap(), 0);

        {
            let orc = group.get_structure("ORC").unwrap().as_segment_mut().unwrap();
            orc.set_field(1, 0, Value::Id(ironhl7_core::value::Coded {
                value: "RE".to_string(),
                table: orc.spec(1).unwrap().table,
            }))
            .unwrap();
        }
        assert_eq!(group.repetitions_used("ORC").unwrap(), 1);

        // Second read returns the same instance, not a fresh one.
        let orc = group.get_structure("ORC").unwrap().as_segment().unwrap();
        assert_eq!(orc.field(1, 0).unwrap().to_string(), "RE");
        assert_eq!(group.repetitions_used("ORC").unwrap(), 1);
    }

    #[test]
    fn test_repeating_slot_append_only_at_end() {
        let mut group = order_group();
        assert!(group.get_structure_rep("OBSERVATION", 0).is_ok());
        assert!(group.get_structure_rep("OBSERVATION", 1).is_ok());
        assert_eq!(group.repetitions_used("OBSERVATION").unwrap(), 2);

        assert!(matches!(
            group.get_structure_rep("OBSERVATION", 3),
            Err(AccessError::ChildRepetitionOutOfRange {
                requested: 3,
                populated: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_non_repeating_slot_rejects_second_repetition() {
        let mut group = order_group();
        group.get_structure("ORC").unwrap();
        assert!(matches!(
            group.get_structure_rep("ORC", 1),
            Err(AccessError::NotRepeating { .. })
        ));
    }

    #[test]
    fn test_unknown_child() {
        let mut group = order_group();
        assert!(matches!(
            group.get_structure("PID"),
            Err(AccessError::UnknownChild { .. })
        ));
        assert!(matches!(
            group.repetitions_used("PID"),
            Err(AccessError::UnknownChild { .. })
        ));
    }

    #[test]
    fn test_remove_compacts_and_preserves_order() {
        let mut group = order_group();
        for i in 0..3 {
            let obs = group
                .get_structure_rep("OBSERVATION", i)
                .unwrap()
                .as_group_mut()
                .unwrap();
            let obx = obs.get_structure("OBX").unwrap().as_segment_mut().unwrap();
            obx.set_field(4, 0, Value::St(format!("SUB{}", i))).unwrap();
        }

        let removed = group.remove_repetition("OBSERVATION", 1).unwrap();
        assert_eq!(group.repetitions_used("OBSERVATION").unwrap(), 2);

        let sub_id = |s: &Structure| {
            s.as_group()
                .unwrap()
                .try_structure("OBX", 0)
                .unwrap()
                .as_segment()
                .unwrap()
                .field(4, 0)
                .unwrap()
                .to_string()
        };
        assert_eq!(sub_id(&removed), "SUB1");
        let all = group.get_all("OBSERVATION").unwrap();
        assert_eq!(sub_id(&all[0]), "SUB0");
        assert_eq!(sub_id(&all[1]), "SUB2");
    }

    #[test]
    fn test_remove_rejects_non_repeating_and_out_of_range() {
        let mut group = order_group();
        group.get_structure("ORC").unwrap();
        assert!(matches!(
            group.remove_repetition("ORC", 0),
            Err(AccessError::NotRemovable { .. })
        ));
        assert!(matches!(
            group.remove_repetition("OBSERVATION", 0),
            Err(AccessError::RemoveOutOfRange { index: 0, populated: 0, .. })
        ));
    }

    #[test]
    fn test_get_all_empty_slot() {
        let group = order_group();
        assert_eq!(group.get_all("OBSERVATION").unwrap().len(), 0);
        assert!(group.try_structure("OBSERVATION", 0).is_err());
    }

    #[test]
    fn test_add_structure_appends() {
        let mut group = order_group();
        group.add_structure("OBSERVATION").unwrap();
        group.add_structure("OBSERVATION").unwrap();
        assert_eq!(group.repetitions_used("OBSERVATION").unwrap(), 2);
    }

    #[test]
    fn test_instantiation_failure_is_access_error() {
        // A group whose child references a structure the registry lacks.
        let mut registry = SchemaRegistry::new(Version::V27);
        registry.add_group(
            GroupDef::new("ZZZ_Z01")
                .with_child(ChildDef::new("DETAIL", "ZZZ_Z01_DETAIL", true, false)),
        );
        let message = Message::new(Arc::new(registry), "ZZZ_Z01");
        let mut message = message.unwrap();

        let err = message.root_mut().get_structure("DETAIL").unwrap_err();
        assert!(matches!(
            err,
            AccessError::Instantiation { structure, .. } if structure == "ZZZ_Z01_DETAIL"
        ));
    }

    #[test]
    fn test_nested_group_materialization() {
        let registry = Arc::new(catalog::v27());
        let mut message = Message::new(registry, "VXU_V04").unwrap();

        let order = message
            .root_mut()
            .get_structure("ORDER")
            .unwrap()
            .as_group_mut()
            .unwrap();
        let observation = order
            .get_structure("OBSERVATION")
            .unwrap()
            .as_group_mut()
            .unwrap();
        let obx = observation.get_structure("OBX").unwrap();
        assert_eq!(obx.name(), "OBX");
        assert!(obx.is_segment());
    }
}
