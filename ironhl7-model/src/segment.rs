/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/3/26
******************************************************************************/

//! Generic segment runtime.
//!
//! A [`Segment`] is a named record holding, per declared field position,
//! zero or more typed value repetitions. One generic type serves every
//! segment; the declared schema comes from a
//! [`SegmentDef`](ironhl7_dictionary::SegmentDef).
//!
//! ## Field Access Contract
//!
//! Positions are 1-based and dense. Repetition indices are zero-based, and
//! population is append-only-at-end: [`Segment::field_mut`] accepts an index
//! equal to the current repetition count (materializing one empty typed
//! value, subject to the declared bound) but never one past it. Read access
//! through [`Segment::field`] is strict and never materializes.
//!
//! ## Construction Errors
//!
//! Field declarations are registered in order during construction. A
//! declaration that fails validation is logged and swallowed; the slot is
//! marked defective and every later access to it fails with
//! [`AccessError::DefectiveField`]. One malformed declaration must not
//! prevent the rest of the message from being built.

use crate::message::MessageContext;
use ironhl7_core::error::AccessError;
use ironhl7_core::value::{Datatype, Value};
use ironhl7_dictionary::{FieldSpec, SegmentDef};
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::warn;

/// Per-position repetition storage. One repetition is the common case.
type Repetitions = SmallVec<[Value; 1]>;

#[derive(Debug, Clone)]
enum FieldSlot {
    Active(Repetitions),
    Defective,
}

/// A named HL7 record with typed, repeating, position-addressed fields.
#[derive(Debug, Clone)]
pub struct Segment {
    def: Arc<SegmentDef>,
    context: Arc<MessageContext>,
    slots: Vec<FieldSlot>,
}

impl Segment {
    /// Creates an empty segment, registering every declared field in
    /// position order.
    ///
    /// Declarations that fail validation are logged and swallowed; the
    /// affected slots are marked defective rather than failing construction.
    ///
    /// # Arguments
    /// * `def` - The segment definition
    /// * `context` - The shared message context
    #[must_use]
    pub fn new(def: Arc<SegmentDef>, context: Arc<MessageContext>) -> Self {
        let mut slots = Vec::with_capacity(def.field_count());
        for (i, spec) in def.fields().enumerate() {
            match spec.validate(&def.name, i + 1) {
                Ok(()) => slots.push(FieldSlot::Active(Repetitions::new())),
                Err(err) => {
                    warn!(
                        segment = %def.name,
                        position = i + 1,
                        error = %err,
                        "field declaration rejected; slot marked defective"
                    );
                    slots.push(FieldSlot::Defective);
                }
            }
        }
        Self {
            def,
            context,
            slots,
        }
    }

    /// Returns the segment name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.def.name
    }

    /// Returns the segment definition.
    #[inline]
    #[must_use]
    pub const fn def(&self) -> &Arc<SegmentDef> {
        &self.def
    }

    /// Returns the shared message context.
    #[inline]
    #[must_use]
    pub const fn context(&self) -> &Arc<MessageContext> {
        &self.context
    }

    /// Returns the number of declared field positions.
    #[inline]
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.slots.len()
    }

    /// Gets the declaration at a 1-based field position.
    ///
    /// # Errors
    /// Returns [`AccessError::PositionOutOfRange`] for positions outside
    /// `1..=field_count`.
    pub fn spec(&self, position: usize) -> Result<&FieldSpec, AccessError> {
        self.def
            .field(position)
            .ok_or_else(|| self.position_error(position))
    }

    /// Returns the number of populated repetitions at a position.
    ///
    /// # Errors
    /// Returns [`AccessError::PositionOutOfRange`] or
    /// [`AccessError::DefectiveField`].
    pub fn repetitions_used(&self, position: usize) -> Result<usize, AccessError> {
        self.repetitions(position).map(|reps| reps.len())
    }

    /// Returns every populated repetition at a position, in order.
    ///
    /// The slice may be empty; an absent field is not an error.
    ///
    /// # Errors
    /// Returns [`AccessError::PositionOutOfRange`] or
    /// [`AccessError::DefectiveField`].
    pub fn fields(&self, position: usize) -> Result<&[Value], AccessError> {
        self.repetitions(position).map(|reps| reps.as_slice())
    }

    /// Gets the value at a position and repetition index. Strict: never
    /// materializes.
    ///
    /// # Arguments
    /// * `position` - The 1-based field position
    /// * `repetition` - The zero-based repetition index
    ///
    /// # Errors
    /// Returns [`AccessError::RepetitionOutOfRange`] when the index is not
    /// populated, plus the errors of [`Segment::fields`].
    pub fn field(&self, position: usize, repetition: usize) -> Result<&Value, AccessError> {
        let reps = self.repetitions(position)?;
        reps.get(repetition)
            .ok_or_else(|| AccessError::RepetitionOutOfRange {
                segment: self.def.name.clone(),
                position,
                requested: repetition,
                populated: reps.len(),
            })
    }

    /// Gets the value at a position and repetition index, materializing one
    /// empty typed value when the index equals the current count.
    ///
    /// This is the accessor generated-style façades use: reading an absent
    /// field yields an empty-but-typed value rather than an error.
    ///
    /// # Errors
    /// Returns [`AccessError::RepetitionOutOfRange`] when the index is more
    /// than one past the populated count,
    /// [`AccessError::RepetitionLimitExceeded`] when materializing would
    /// exceed the declared bound, plus the errors of [`Segment::fields`].
    pub fn field_mut(
        &mut self,
        position: usize,
        repetition: usize,
    ) -> Result<&mut Value, AccessError> {
        let spec = self.spec(position)?.clone();
        let segment = self.def.name.clone();
        let reps = self.repetitions_mut(position)?;

        if repetition > reps.len() {
            return Err(AccessError::RepetitionOutOfRange {
                segment,
                position,
                requested: repetition,
                populated: reps.len(),
            });
        }
        if repetition == reps.len() {
            if spec.max_repetitions != 0 && reps.len() as u32 >= spec.max_repetitions {
                return Err(AccessError::RepetitionLimitExceeded {
                    segment,
                    position,
                    max: spec.max_repetitions,
                });
            }
            reps.push(Value::empty(spec.datatype, spec.table));
        }
        Ok(&mut reps[repetition])
    }

    /// Appends one empty repetition and returns it.
    ///
    /// # Errors
    /// Same as [`Segment::field_mut`] at index `repetitions_used`.
    pub fn add_repetition(&mut self, position: usize) -> Result<&mut Value, AccessError> {
        let next = self.repetitions_used(position)?;
        self.field_mut(position, next)
    }

    /// Sets the value at a position and repetition index, replacing an
    /// existing repetition or appending at the end.
    ///
    /// A value whose datatype disagrees with the declaration is rejected.
    /// Fields declared `Varies` accept any value and wrap it.
    ///
    /// # Errors
    /// Returns [`AccessError::DatatypeMismatch`] on disagreement, plus the
    /// errors of [`Segment::field_mut`].
    pub fn set_field(
        &mut self,
        position: usize,
        repetition: usize,
        value: Value,
    ) -> Result<(), AccessError> {
        let spec = self.spec(position)?;
        let value = if spec.datatype == Datatype::Varies && value.datatype() != Datatype::Varies {
            Value::Varies(Some(Box::new(value)))
        } else if value.datatype() != spec.datatype {
            return Err(AccessError::DatatypeMismatch {
                segment: self.def.name.clone(),
                position,
                expected: spec.datatype,
                actual: value.datatype(),
            });
        } else {
            value
        };
        *self.field_mut(position, repetition)? = value;
        Ok(())
    }

    /// Removes every repetition at a position.
    ///
    /// # Errors
    /// Same as [`Segment::fields`].
    pub fn clear_field(&mut self, position: usize) -> Result<(), AccessError> {
        self.repetitions_mut(position)?.clear();
        Ok(())
    }

    /// Returns true if any repetition at the position is populated.
    ///
    /// # Errors
    /// Same as [`Segment::fields`].
    pub fn is_valued(&self, position: usize) -> Result<bool, AccessError> {
        Ok(self.repetitions(position)?.iter().any(|v| !v.is_empty()))
    }

    /// Returns the positions of required fields with no populated
    /// repetition. Required-field presence is a validation concern layered
    /// on top of access; accessors themselves never fail on missing data.
    ///
    /// Defective slots are skipped.
    #[must_use]
    pub fn missing_required(&self) -> Vec<usize> {
        self.def
            .fields()
            .enumerate()
            .filter_map(|(i, spec)| {
                let position = i + 1;
                let valued = matches!(self.is_valued(position), Ok(true));
                (spec.required && !valued && !self.is_defective(position)).then_some(position)
            })
            .collect()
    }

    fn is_defective(&self, position: usize) -> bool {
        matches!(
            position.checked_sub(1).and_then(|i| self.slots.get(i)),
            Some(FieldSlot::Defective)
        )
    }

    fn position_error(&self, position: usize) -> AccessError {
        AccessError::PositionOutOfRange {
            segment: self.def.name.clone(),
            position,
            field_count: self.slots.len(),
        }
    }

    fn repetitions(&self, position: usize) -> Result<&Repetitions, AccessError> {
        let slot = position
            .checked_sub(1)
            .and_then(|i| self.slots.get(i))
            .ok_or_else(|| self.position_error(position))?;
        match slot {
            FieldSlot::Active(reps) => Ok(reps),
            FieldSlot::Defective => Err(AccessError::DefectiveField {
                segment: self.def.name.clone(),
                position,
            }),
        }
    }

    fn repetitions_mut(&mut self, position: usize) -> Result<&mut Repetitions, AccessError> {
        let err = self.position_error(position);
        let name = self.def.name.clone();
        let slot = position
            .checked_sub(1)
            .and_then(|i| self.slots.get_mut(i))
            .ok_or(err)?;
        match slot {
            FieldSlot::Active(reps) => Ok(reps),
            FieldSlot::Defective => Err(AccessError::DefectiveField {
                segment: name,
                position,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageContext;
    use ironhl7_core::types::{TableId, Version};
    use ironhl7_core::value::Cwe;
    use ironhl7_dictionary::{catalog, FieldSpec, SchemaRegistry, SegmentDef};
    use rust_decimal::Decimal;

    fn context() -> Arc<MessageContext> {
        Arc::new(MessageContext::new(Arc::new(catalog::v27())))
    }

    fn aut_segment() -> Segment {
        let ctx = context();
        let def = Arc::clone(ctx.registry().segment("AUT").unwrap());
        Segment::new(def, ctx)
    }

    fn cdm_segment() -> Segment {
        let ctx = context();
        let def = Arc::clone(ctx.registry().segment("CDM").unwrap());
        Segment::new(def, ctx)
    }

    #[test]
    fn test_positions_defined_across_declared_range() {
        let seg = aut_segment();
        assert_eq!(seg.field_count(), 12);
        for position in 1..=12 {
            assert_eq!(seg.repetitions_used(position).unwrap(), 0);
        }
        assert!(matches!(
            seg.repetitions_used(0),
            Err(AccessError::PositionOutOfRange { position: 0, .. })
        ));
        assert!(matches!(
            seg.repetitions_used(13),
            Err(AccessError::PositionOutOfRange { position: 13, .. })
        ));
    }

    #[test]
    fn test_field_mut_materializes_empty_typed_value() {
        let mut seg = aut_segment();
        let value = seg.field_mut(2, 0).unwrap();
        assert_eq!(value.datatype(), Datatype::Cwe);
        assert!(value.is_empty());
        assert_eq!(value.as_cwe().unwrap().table, Some(TableId::new(285)));
        assert_eq!(seg.repetitions_used(2).unwrap(), 1);
    }

    #[test]
    fn test_strict_read_signals_absence() {
        let seg = aut_segment();
        assert!(matches!(
            seg.field(2, 0),
            Err(AccessError::RepetitionOutOfRange {
                requested: 0,
                populated: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_singular_field_rejects_second_repetition() {
        let mut seg = aut_segment();
        seg.field_mut(3, 0).unwrap();
        assert!(matches!(
            seg.field_mut(3, 1),
            Err(AccessError::RepetitionLimitExceeded { max: 1, .. })
        ));
    }

    #[test]
    fn test_unbounded_field_accepts_many_repetitions() {
        let mut seg = cdm_segment();
        for i in 0..20 {
            let value = seg.field_mut(2, i).unwrap();
            assert_eq!(value.datatype(), Datatype::Cwe);
        }
        assert_eq!(seg.repetitions_used(2).unwrap(), 20);
    }

    #[test]
    fn test_field_mut_rejects_skipping_ahead() {
        let mut seg = cdm_segment();
        assert!(matches!(
            seg.field_mut(2, 1),
            Err(AccessError::RepetitionOutOfRange {
                requested: 1,
                populated: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_all_repetitions_agree_with_indexed_access() {
        let mut seg = cdm_segment();
        for i in 0..3 {
            let cwe = seg.field_mut(2, i).unwrap().as_cwe_mut().unwrap();
            cwe.identifier = format!("ALIAS{}", i);
        }

        let all = seg.fields(2).unwrap().to_vec();
        assert_eq!(all.len(), seg.repetitions_used(2).unwrap());
        for (i, value) in all.iter().enumerate() {
            assert_eq!(seg.field(2, i).unwrap(), value);
        }
    }

    #[test]
    fn test_set_field_rejects_datatype_mismatch() {
        let mut seg = cdm_segment();
        let err = seg
            .set_field(3, 0, Value::Cwe(Cwe::default()))
            .unwrap_err();
        assert!(matches!(
            err,
            AccessError::DatatypeMismatch {
                expected: Datatype::St,
                actual: Datatype::Cwe,
                ..
            }
        ));
    }

    #[test]
    fn test_set_field_replaces_and_appends() {
        let mut seg = cdm_segment();
        seg.set_field(3, 0, Value::St("CBC".to_string())).unwrap();
        seg.set_field(3, 0, Value::St("CMP".to_string())).unwrap();
        assert_eq!(seg.field(3, 0).unwrap().as_str(), Some("CMP"));
        assert_eq!(seg.repetitions_used(3).unwrap(), 1);
    }

    #[test]
    fn test_varies_field_wraps_concrete_values() {
        let ctx = context();
        let def = Arc::clone(ctx.registry().segment("OBX").unwrap());
        let mut seg = Segment::new(def, ctx);

        seg.set_field(5, 0, Value::Nm(Some(Decimal::new(1375, 2))))
            .unwrap();
        let value = seg.field(5, 0).unwrap();
        assert_eq!(value.datatype(), Datatype::Varies);
        assert_eq!(value.to_string(), "13.75");
    }

    #[test]
    fn test_defective_slot_swallowed_then_fails_on_access() {
        let mut registry = SchemaRegistry::new(Version::V27);
        registry.add_segment(
            SegmentDef::new("ZZB", "Broken Segment")
                .with_field(FieldSpec::new(Datatype::Si, true, 1, 4, "Set ID"))
                .with_field(
                    // Table binding on a non-coded datatype fails validation.
                    FieldSpec::new(Datatype::St, false, 1, 0, "Name")
                        .with_table(TableId::new(399)),
                ),
        );
        let ctx = Arc::new(MessageContext::new(Arc::new(registry)));
        let def = Arc::clone(ctx.registry().segment("ZZB").unwrap());

        // Construction succeeds despite the bad declaration.
        let mut seg = Segment::new(def, ctx);
        assert_eq!(seg.field_count(), 2);
        assert!(seg.repetitions_used(1).is_ok());

        assert!(matches!(
            seg.repetitions_used(2),
            Err(AccessError::DefectiveField { position: 2, .. })
        ));
        assert!(matches!(
            seg.field_mut(2, 0),
            Err(AccessError::DefectiveField { .. })
        ));
    }

    #[test]
    fn test_clear_field_and_is_valued() {
        let mut seg = cdm_segment();
        assert!(!seg.is_valued(3).unwrap());
        seg.set_field(3, 0, Value::St("CBC".to_string())).unwrap();
        assert!(seg.is_valued(3).unwrap());
        seg.clear_field(3).unwrap();
        assert_eq!(seg.repetitions_used(3).unwrap(), 0);
    }

    #[test]
    fn test_missing_required_reports_unpopulated_positions() {
        let mut seg = cdm_segment();
        assert_eq!(seg.missing_required(), vec![1, 3]);
        seg.set_field(3, 0, Value::St("CBC".to_string())).unwrap();
        assert_eq!(seg.missing_required(), vec![1]);
    }

    #[test]
    fn test_materialized_empty_value_does_not_count_as_valued() {
        let mut seg = aut_segment();
        seg.field_mut(2, 0).unwrap();
        assert!(!seg.is_valued(2).unwrap());
        assert!(seg.missing_required().contains(&2));
    }
}
