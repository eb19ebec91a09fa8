/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/3/26
******************************************************************************/

//! Structure instantiation.
//!
//! [`ModelClassFactory`] is the extension point between a structure name and
//! the instance it resolves to. The runtime never instantiates a child
//! directly; every lazy materialization inside a [`Group`](crate::Group)
//! goes through the factory on the message's context, so callers can swap
//! in site-specific resolution (Z-segments, custom profiles) by installing
//! their own factory via
//! [`MessageContext::with_factory`](crate::MessageContext::with_factory).

use crate::group::{Group, Structure};
use crate::message::MessageContext;
use crate::segment::Segment;
use ironhl7_core::error::SchemaError;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Resolves structure names to fresh, empty instances.
///
/// Implementations must be cheap to call repeatedly; the runtime invokes the
/// factory once per materialized child slot repetition.
pub trait ModelClassFactory: fmt::Debug + Send + Sync {
    /// Instantiates an empty structure for `name`.
    ///
    /// # Arguments
    /// * `name` - The structure name to resolve
    /// * `context` - The context the new instance will belong to
    ///
    /// # Errors
    /// Returns [`SchemaError::UnknownStructure`] if the name does not map to
    /// any definition the factory knows.
    fn instantiate(
        &self,
        name: &str,
        context: &Arc<MessageContext>,
    ) -> Result<Structure, SchemaError>;
}

/// Registry-backed factory.
///
/// Resolves against the context's [`SchemaRegistry`], trying segment
/// definitions first and group definitions second.
///
/// [`SchemaRegistry`]: ironhl7_dictionary::SchemaRegistry
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultModelClassFactory;

impl ModelClassFactory for DefaultModelClassFactory {
    fn instantiate(
        &self,
        name: &str,
        context: &Arc<MessageContext>,
    ) -> Result<Structure, SchemaError> {
        let registry = context.registry();
        if let Some(def) = registry.segment(name) {
            debug!(structure = %name, kind = "segment", "instantiating");
            return Ok(Structure::Segment(Segment::new(
                Arc::clone(def),
                Arc::clone(context),
            )));
        }
        if let Some(def) = registry.group(name) {
            debug!(structure = %name, kind = "group", "instantiating");
            return Ok(Structure::Group(Group::new(
                Arc::clone(def),
                Arc::clone(context),
            )));
        }
        Err(SchemaError::UnknownStructure {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironhl7_dictionary::catalog;

    fn context() -> Arc<MessageContext> {
        Arc::new(MessageContext::new(Arc::new(catalog::v27())))
    }

    #[test]
    fn test_resolves_segment() {
        let ctx = context();
        let structure = DefaultModelClassFactory.instantiate("AUT", &ctx).unwrap();
        assert!(structure.is_segment());
        assert_eq!(structure.name(), "AUT");
    }

    #[test]
    fn test_resolves_group() {
        let ctx = context();
        let structure = DefaultModelClassFactory
            .instantiate("VXU_V04_ORDER", &ctx)
            .unwrap();
        assert!(structure.as_group().is_some());
        assert_eq!(structure.name(), "VXU_V04_ORDER");
    }

    #[test]
    fn test_unknown_name() {
        let ctx = context();
        let err = DefaultModelClassFactory.instantiate("ZZZ", &ctx).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownStructure { name } if name == "ZZZ"));
    }

    #[test]
    fn test_custom_factory_installed_via_context() {
        #[derive(Debug)]
        struct Rejecting;
        impl ModelClassFactory for Rejecting {
            fn instantiate(
                &self,
                name: &str,
                _context: &Arc<MessageContext>,
            ) -> Result<Structure, SchemaError> {
                Err(SchemaError::UnknownStructure {
                    name: name.to_string(),
                })
            }
        }

        let ctx = Arc::new(
            MessageContext::new(Arc::new(catalog::v27())).with_factory(Arc::new(Rejecting)),
        );
        assert!(ctx.factory().instantiate("AUT", &ctx).is_err());
    }
}
