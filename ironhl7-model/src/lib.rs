/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/3/26
******************************************************************************/

//! # IronHL7 Model
//!
//! The generic segment/group runtime engine for IronHL7.
//!
//! This crate provides:
//! - **Message/context**: [`Message`] owning one structure tree and
//!   [`MessageContext`], the shared per-message state every structure holds
//!   a non-owning reference to
//! - **Segment runtime**: [`Segment`], a named record with per-position
//!   typed repeating field storage
//! - **Group runtime**: [`Group`], a named, ordered composition of child
//!   structures with lazy materialization
//! - **Factory**: [`ModelClassFactory`], the extension point resolving
//!   structure names to instances
//!
//! ## One Parametric Model
//!
//! There are no per-structure subclasses here: a single generic [`Segment`]
//! and [`Group`] are instantiated against `ironhl7-dictionary` definitions.
//! Supporting a new message structure means registering a definition; the
//! typed named-accessor layer in `ironhl7-typed` is an optional façade on
//! top and carries no runtime behavior of its own.

pub mod factory;
pub mod group;
pub mod message;
pub mod segment;

pub use factory::{DefaultModelClassFactory, ModelClassFactory};
pub use group::{Group, Structure};
pub use message::{Message, MessageContext};
pub use segment::Segment;
