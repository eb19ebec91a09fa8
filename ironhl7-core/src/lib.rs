/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/3/26
******************************************************************************/

//! # IronHL7 Core
//!
//! Core types, value model, and error definitions for the IronHL7 HL7 v2.x
//! message runtime.
//!
//! This crate provides the fundamental building blocks used across all
//! IronHL7 crates:
//! - **Error types**: Two-tier error taxonomy with `thiserror` —
//!   [`SchemaError`] for construction-time definition problems and
//!   [`AccessError`] for access-time failures
//! - **Value types**: [`Datatype`], [`Value`], and the HL7 composite value
//!   structs (CWE, EI, HD, CX, XON, CP, CQ, MO)
//! - **Core types**: [`Version`], [`TableId`], [`EncodingCharacters`]
//!
//! ## Two-Tier Error Design
//!
//! HL7 runtimes deliberately treat schema problems and access problems
//! differently: a malformed field declaration is logged and swallowed during
//! segment construction so that one bad definition cannot abort parsing of an
//! entire message, while any failure during field access is surfaced to the
//! caller as a hard error. The two error enums keep that asymmetry explicit.

pub mod error;
pub mod types;
pub mod value;

pub use error::{AccessError, Hl7Error, Result, SchemaError};
pub use types::{EncodingCharacters, TableId, Version};
pub use value::{Coded, Cp, Cq, Cwe, Cx, Datatype, Ei, Hd, Mo, Timestamp, Value, Xon};
