/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/3/26
******************************************************************************/

//! # IronHL7 Typed
//!
//! Typed named-accessor façades over the generic IronHL7 runtime.
//!
//! This crate provides:
//! - Segment façades: [`Aut`], [`Cdm`]
//! - Group façades: [`VxuV04`], [`VxuV04Order`], [`VxuV04Observation`],
//!   [`RspK31`], [`RspK31Order`], [`RspK31Observation`], [`CciI22`],
//!   [`CciI22ResourceDetail`]
//!
//! ## Façades Carry No State
//!
//! Every type here is a borrow of a generic
//! [`Segment`](ironhl7_model::Segment) or [`Group`](ironhl7_model::Group);
//! all storage and behavior lives in `ironhl7-model`. A façade method is one
//! positional or named call plus a datatype cast, which is exactly what
//! schema-generated accessors would emit. Mixing façade and generic access
//! over the same structure is always coherent because there is only one
//! structure underneath.

mod support;

pub mod aut;
pub mod cci_i22;
pub mod cdm;
pub mod rsp_k31;
pub mod vxu_v04;

pub use aut::Aut;
pub use cci_i22::{CciI22, CciI22ResourceDetail};
pub use cdm::Cdm;
pub use rsp_k31::{RspK31, RspK31Order, RspK31Observation};
pub use vxu_v04::{VxuV04, VxuV04Observation, VxuV04Order};
