/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/3/26
******************************************************************************/

//! # IronHL7
//!
//! A schema-driven HL7 v2.x object model runtime for Rust.
//!
//! IronHL7 provides the generic machinery beneath an HL7 v2.x message tree:
//! segments with positional typed repeating fields, groups with lazily
//! materialized child slots, and a registry of per-version structure
//! definitions. One parametric [`Segment`](model::Segment) and
//! [`Group`](model::Group) serve every message structure; typed
//! named-accessor façades are a thin optional layer on top.
//!
//! ## Features
//!
//! - **Schema-driven**: segments and groups instantiate against registry
//!   definitions, not per-structure code
//! - **Lazy materialization**: reading an absent child creates an empty
//!   instance, so navigation never observes a missing required child
//! - **Typed fields**: every field value is a datatype-tagged
//!   [`Value`](core::Value) with an empty-but-valid representation
//! - **Two error tiers**: construction-time schema problems are logged and
//!   swallowed; access-time failures are always returned
//!
//! ## Quick Start
//!
//! ```rust
//! use ironhl7::prelude::*;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(catalog::v27());
//! let mut message = Message::new(registry, "VXU_V04").unwrap();
//! let mut vxu = VxuV04::new(&mut message).unwrap();
//!
//! // First read materializes the empty PID segment.
//! let pid = vxu.pid().unwrap();
//! assert_eq!(pid.name(), "PID");
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`]: Datatypes, values, and error definitions
//! - [`dictionary`]: Schema definitions and embedded catalogs
//! - [`model`]: The generic segment/group runtime engine
//! - [`typed`]: Typed named-accessor façades

pub mod core {
    //! Datatypes, values, and error definitions.
    pub use ironhl7_core::*;
}

pub mod dictionary {
    //! Schema definitions and embedded catalogs.
    pub use ironhl7_dictionary::*;
}

pub mod model {
    //! The generic segment/group runtime engine.
    pub use ironhl7_model::*;
}

pub mod typed {
    //! Typed named-accessor façades.
    pub use ironhl7_typed::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    // Core types
    pub use ironhl7_core::{
        AccessError, Coded, Cp, Cq, Cwe, Cx, Datatype, Ei, EncodingCharacters, Hd, Hl7Error, Mo,
        Result, SchemaError, TableId, Timestamp, Value, Version, Xon,
    };

    // Schema definitions
    pub use ironhl7_dictionary::{
        catalog, ChildDef, FieldSpec, GroupDef, SchemaRegistry, SegmentDef,
    };

    // Runtime engine
    pub use ironhl7_model::{
        DefaultModelClassFactory, Group, Message, MessageContext, ModelClassFactory, Segment,
        Structure,
    };

    // Typed façades
    pub use ironhl7_typed::{
        Aut, Cdm, CciI22, CciI22ResourceDetail, RspK31, RspK31Observation, RspK31Order, VxuV04,
        VxuV04Observation, VxuV04Order,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use std::sync::Arc;

    #[test]
    fn test_prelude_imports() {
        let registry = Arc::new(catalog::v27());
        let message = Message::new(registry, "VXU_V04").unwrap();
        assert_eq!(message.version(), Version::V27);
    }

    #[test]
    fn test_version_parse() {
        let version: Version = "2.8".parse().unwrap();
        assert_eq!(version, Version::V28);
    }
}
