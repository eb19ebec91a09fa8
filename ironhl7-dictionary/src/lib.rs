/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/3/26
******************************************************************************/

//! # IronHL7 Dictionary
//!
//! HL7 v2.x structure definitions and schema registry for the IronHL7
//! runtime.
//!
//! This crate provides:
//! - **Schema definitions**: Field, segment, and group definitions
//! - **Schema registry**: Per-version name-to-definition resolution
//! - **Embedded catalogs**: Demonstration definitions for HL7 v2.7, v2.7.1,
//!   and v2.8 covering the structures exercised by the runtime tests
//!
//! Definitions are data, not code: the generic runtime in `ironhl7-model`
//! instantiates segments and groups against a [`SchemaRegistry`], so
//! supporting a new message structure means registering a definition, never
//! writing a new type.

pub mod catalog;
pub mod schema;

pub use schema::{ChildDef, FieldSpec, GroupDef, SchemaRegistry, SegmentDef};
