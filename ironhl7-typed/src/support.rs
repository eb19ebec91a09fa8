/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/3/26
******************************************************************************/

//! Shared cast helpers for the typed façades.
//!
//! A façade accessor resolves a field position (or child slot) through the
//! generic runtime and then casts the result to the datatype its schema
//! declares. The cast can only fail when the message was built against a
//! registry that disagrees with the façade, which surfaces as
//! [`AccessError::DatatypeMismatch`] rather than a panic.

use ironhl7_core::error::AccessError;
use ironhl7_core::value::{Coded, Cp, Cq, Cwe, Cx, Datatype, Ei, Timestamp, Value, Xon};
use ironhl7_model::{Group, Segment, Structure};
use rust_decimal::Decimal;

macro_rules! typed_field {
    ($fn_name:ident, $variant:ident, $ty:ty) => {
        pub(crate) fn $fn_name<'a>(
            segment: &'a mut Segment,
            position: usize,
            repetition: usize,
        ) -> Result<&'a mut $ty, AccessError> {
            let segment_name = segment.name().to_string();
            match segment.field_mut(position, repetition)? {
                Value::$variant(v) => Ok(v),
                other => Err(AccessError::DatatypeMismatch {
                    segment: segment_name,
                    position,
                    expected: Datatype::$variant,
                    actual: other.datatype(),
                }),
            }
        }
    };
}

typed_field!(expect_st, St, String);
typed_field!(expect_id, Id, Coded);
typed_field!(expect_is, Is, Coded);
typed_field!(expect_nm, Nm, Option<Decimal>);
typed_field!(expect_dtm, Dtm, Timestamp);
typed_field!(expect_cwe, Cwe, Cwe);
typed_field!(expect_ei, Ei, Ei);
typed_field!(expect_cx, Cx, Cx);
typed_field!(expect_xon, Xon, Xon);
typed_field!(expect_cp, Cp, Cp);
typed_field!(expect_cq, Cq, Cq);

/// Resolves a child slot repetition expected to hold a segment.
pub(crate) fn segment_child_rep<'a>(
    group: &'a mut Group,
    name: &str,
    rep: usize,
) -> Result<&'a mut Segment, AccessError> {
    match group.get_structure_rep(name, rep)? {
        Structure::Segment(s) => Ok(s),
        Structure::Group(g) => Err(AccessError::StructureMismatch {
            expected: name.to_string(),
            actual: g.name().to_string(),
        }),
    }
}

/// Resolves a singular child slot expected to hold a segment.
pub(crate) fn segment_child<'a>(
    group: &'a mut Group,
    name: &str,
) -> Result<&'a mut Segment, AccessError> {
    segment_child_rep(group, name, 0)
}

/// Resolves a child slot repetition expected to hold a group.
pub(crate) fn group_child_rep<'a>(
    group: &'a mut Group,
    name: &str,
    rep: usize,
) -> Result<&'a mut Group, AccessError> {
    match group.get_structure_rep(name, rep)? {
        Structure::Group(g) => Ok(g),
        Structure::Segment(s) => Err(AccessError::StructureMismatch {
            expected: name.to_string(),
            actual: s.name().to_string(),
        }),
    }
}
