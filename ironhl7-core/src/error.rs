/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/3/26
******************************************************************************/

//! Error types for the IronHL7 runtime.
//!
//! This module provides the two-tier error hierarchy using `thiserror`:
//! - [`SchemaError`]: construction-time definition problems. These are logged
//!   and swallowed where a structure is being built, leaving the structure
//!   partially constructed rather than failing the whole message.
//! - [`AccessError`]: access-time failures. These are always returned to the
//!   caller; by the time application code reads a field, an error indicates a
//!   schema/data mismatch that must not be silently ignored.

use crate::value::Datatype;
use thiserror::Error;

/// Result type alias using [`Hl7Error`] as the error type.
pub type Result<T> = std::result::Result<T, Hl7Error>;

/// Top-level error type for all IronHL7 operations.
#[derive(Debug, Error)]
pub enum Hl7Error {
    /// Error in a schema definition or structure construction.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Error during field or structure access.
    #[error("access error: {0}")]
    Access(#[from] AccessError),
}

/// Construction-time schema definition errors.
///
/// These occur while registering field declarations or resolving structure
/// names. Call sites that build structures log these and continue; the
/// affected slot later surfaces as [`AccessError::DefectiveField`] when read.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Datatype name does not map to a known HL7 datatype.
    #[error("unknown datatype: {name}")]
    UnknownDatatype {
        /// The unresolvable datatype name.
        name: String,
    },

    /// Structure name does not map to a segment or group definition.
    #[error("unknown structure: {name}")]
    UnknownStructure {
        /// The unresolvable structure name.
        name: String,
    },

    /// Version string does not map to a supported HL7 version.
    #[error("unknown HL7 version: {name}")]
    UnknownVersion {
        /// The unresolvable version string.
        name: String,
    },

    /// A group declares two child slots with the same name.
    #[error("duplicate child slot {name} in group {group}")]
    DuplicateChild {
        /// The group name.
        group: String,
        /// The duplicated child slot name.
        name: String,
    },

    /// A field declaration failed validation during segment construction.
    #[error("invalid field declaration at position {position} of {segment}: {reason}")]
    InvalidFieldSpec {
        /// The segment name.
        segment: String,
        /// The 1-based field position.
        position: usize,
        /// Description of why the declaration is invalid.
        reason: String,
    },

    /// A structure definition declares no fields or children.
    #[error("structure {name} declares no content")]
    EmptyDefinition {
        /// The structure name.
        name: String,
    },
}

/// Access-time errors.
///
/// Every field or structure accessor either returns a fully-typed result or
/// one of these errors; there is no partial-success state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// Field position outside the segment's declared range.
    #[error("field position {position} out of range: segment {segment} declares {field_count} fields")]
    PositionOutOfRange {
        /// The segment name.
        segment: String,
        /// The requested 1-based position.
        position: usize,
        /// Number of fields the segment declares.
        field_count: usize,
    },

    /// Field repetition index outside the populated range.
    #[error("repetition {requested} out of range for field {position} of {segment}: {populated} populated")]
    RepetitionOutOfRange {
        /// The segment name.
        segment: String,
        /// The 1-based field position.
        position: usize,
        /// The requested zero-based repetition index.
        requested: usize,
        /// Number of repetitions currently populated.
        populated: usize,
    },

    /// Populating one more repetition would exceed the declared bound.
    #[error("field {position} of {segment} allows at most {max} repetitions")]
    RepetitionLimitExceeded {
        /// The segment name.
        segment: String,
        /// The 1-based field position.
        position: usize,
        /// The declared repetition bound.
        max: u32,
    },

    /// Value datatype does not match the field's declared datatype.
    #[error("datatype mismatch for field {position} of {segment}: expected {expected}, got {actual}")]
    DatatypeMismatch {
        /// The segment name.
        segment: String,
        /// The 1-based field position.
        position: usize,
        /// The declared datatype.
        expected: Datatype,
        /// The datatype of the offending value.
        actual: Datatype,
    },

    /// The field's declaration failed during construction and was swallowed.
    #[error("field {position} of {segment} is defective: its declaration failed during construction")]
    DefectiveField {
        /// The segment name.
        segment: String,
        /// The 1-based field position.
        position: usize,
    },

    /// Group declares no child slot with the given name.
    #[error("group {group} declares no child named {name}")]
    UnknownChild {
        /// The group name.
        group: String,
        /// The requested child name.
        name: String,
    },

    /// Structure repetition index more than one past the populated count.
    #[error("repetition {requested} out of range for child {name} of {group}: {populated} populated")]
    ChildRepetitionOutOfRange {
        /// The group name.
        group: String,
        /// The child slot name.
        name: String,
        /// The requested zero-based repetition index.
        requested: usize,
        /// Number of repetitions currently populated.
        populated: usize,
    },

    /// Operation requires a repeating child slot.
    #[error("child {name} of {group} does not repeat")]
    NotRepeating {
        /// The group name.
        group: String,
        /// The child slot name.
        name: String,
    },

    /// Removal attempted on a non-repeating child slot.
    #[error("child {name} of {group} is not removable")]
    NotRemovable {
        /// The group name.
        group: String,
        /// The child slot name.
        name: String,
    },

    /// Removal index outside the populated range.
    #[error("cannot remove repetition {index} of child {name}: {populated} populated")]
    RemoveOutOfRange {
        /// The child slot name.
        name: String,
        /// The requested zero-based removal index.
        index: usize,
        /// Number of repetitions currently populated.
        populated: usize,
    },

    /// Lazy materialization of a child structure failed.
    ///
    /// This is the uniform access-time wrapper around an internal schema
    /// lookup failure: the structure was reachable through a group's
    /// declared slots but could not be instantiated.
    #[error("failed to instantiate structure {structure}: {source}")]
    Instantiation {
        /// The structure name that failed to instantiate.
        structure: String,
        /// The underlying schema failure.
        #[source]
        source: SchemaError,
    },

    /// A raw value cannot be represented in the target datatype.
    #[error("invalid {datatype} value: {reason}")]
    InvalidFieldValue {
        /// The target datatype.
        datatype: Datatype,
        /// Description of why the value is invalid.
        reason: String,
    },

    /// A typed accessor was applied to the wrong structure type.
    #[error("expected structure {expected}, found {actual}")]
    StructureMismatch {
        /// The structure name the accessor requires.
        expected: String,
        /// The structure name actually found.
        actual: String,
    },
}
