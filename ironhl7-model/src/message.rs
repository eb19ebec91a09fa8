/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/3/26
******************************************************************************/

//! Message tree and shared per-message context.
//!
//! This module provides:
//! - [`MessageContext`]: version, delimiters, schema registry, and factory
//!   shared by every structure in one message tree
//! - [`Message`]: owner of the root [`Group`] of a structure tree
//!
//! Every [`Segment`](crate::Segment) and [`Group`] holds an
//! `Arc<MessageContext>`: a non-owning back-reference to shared immutable
//! state. The context never references structures, so there are no cycles;
//! each parsed message is an independent object graph with no state shared
//! across messages beyond the registry itself.

use crate::factory::{DefaultModelClassFactory, ModelClassFactory};
use crate::group::Group;
use ironhl7_core::error::SchemaError;
use ironhl7_core::types::{EncodingCharacters, Version};
use ironhl7_dictionary::SchemaRegistry;
use std::sync::Arc;

/// Shared parse state for one message.
///
/// Constructed once per [`Message`] and handed to every structure and field
/// value the tree creates.
#[derive(Debug)]
pub struct MessageContext {
    version: Version,
    encoding: EncodingCharacters,
    registry: Arc<SchemaRegistry>,
    factory: Arc<dyn ModelClassFactory>,
}

impl MessageContext {
    /// Creates a context over a registry, with standard delimiters and the
    /// default factory.
    ///
    /// # Arguments
    /// * `registry` - The schema registry structures resolve against
    #[must_use]
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self {
            version: registry.version,
            encoding: EncodingCharacters::standard(),
            registry,
            factory: Arc::new(DefaultModelClassFactory),
        }
    }

    /// Replaces the delimiter set.
    #[must_use]
    pub const fn with_encoding(mut self, encoding: EncodingCharacters) -> Self {
        self.encoding = encoding;
        self
    }

    /// Replaces the structure factory.
    #[must_use]
    pub fn with_factory(mut self, factory: Arc<dyn ModelClassFactory>) -> Self {
        self.factory = factory;
        self
    }

    /// Returns the HL7 version of this message.
    #[inline]
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// Returns the active delimiter set.
    #[inline]
    #[must_use]
    pub const fn encoding(&self) -> &EncodingCharacters {
        &self.encoding
    }

    /// Returns the schema registry.
    #[inline]
    #[must_use]
    pub const fn registry(&self) -> &Arc<SchemaRegistry> {
        &self.registry
    }

    /// Returns the structure factory.
    #[inline]
    #[must_use]
    pub const fn factory(&self) -> &Arc<dyn ModelClassFactory> {
        &self.factory
    }
}

/// One HL7 message: a context plus the root group of its structure tree.
#[derive(Debug)]
pub struct Message {
    context: Arc<MessageContext>,
    root: Group,
}

impl Message {
    /// Creates an empty message for the named message structure.
    ///
    /// # Arguments
    /// * `registry` - The schema registry to resolve against
    /// * `structure` - The root group name (e.g., "VXU_V04")
    ///
    /// # Errors
    /// Returns [`SchemaError::UnknownStructure`] if the name does not map to
    /// a group definition.
    pub fn new(registry: Arc<SchemaRegistry>, structure: &str) -> Result<Self, SchemaError> {
        Self::with_context(Arc::new(MessageContext::new(registry)), structure)
    }

    /// Creates an empty message with a caller-supplied context.
    ///
    /// # Arguments
    /// * `context` - The shared message context
    /// * `structure` - The root group name
    ///
    /// # Errors
    /// Returns [`SchemaError::UnknownStructure`] if the name does not map to
    /// a group definition.
    pub fn with_context(
        context: Arc<MessageContext>,
        structure: &str,
    ) -> Result<Self, SchemaError> {
        let def = context.registry().group(structure).cloned().ok_or_else(|| {
            SchemaError::UnknownStructure {
                name: structure.to_string(),
            }
        })?;
        let root = Group::new(def, Arc::clone(&context));
        Ok(Self { context, root })
    }

    /// Returns the root group.
    #[inline]
    #[must_use]
    pub const fn root(&self) -> &Group {
        &self.root
    }

    /// Returns the root group mutably.
    #[inline]
    #[must_use]
    pub const fn root_mut(&mut self) -> &mut Group {
        &mut self.root
    }

    /// Returns the shared message context.
    #[inline]
    #[must_use]
    pub const fn context(&self) -> &Arc<MessageContext> {
        &self.context
    }

    /// Returns the HL7 version of this message.
    #[inline]
    #[must_use]
    pub fn version(&self) -> Version {
        self.context.version()
    }
}
