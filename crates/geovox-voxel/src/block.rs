//! Block type registry: maps configured block names to compact [`BlockId`]
//! tokens.
//!
//! The voxelization core treats block types as opaque; only the registry
//! knows their names. It is built once from configuration before a region
//! is processed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Compact opaque identifier for a block type (2 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId(pub u16);

/// Errors that can occur during block type registration.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A block with the same name has already been registered.
    #[error("duplicate block name: {0}")]
    DuplicateName(String),
    /// All 65 536 id slots have been consumed.
    #[error("block registry is full (max 65536 block types)")]
    RegistryFull,
}

/// Maps block names to [`BlockId`] with O(1) lookup in both directions.
#[derive(Debug, Default)]
pub struct BlockRegistry {
    /// Dense array where `index == BlockId.0`.
    names: Vec<String>,
    /// Reverse lookup: name → id.
    name_to_id: HashMap<String, BlockId>,
}

impl BlockRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a block name and returns its assigned id.
    ///
    /// Ids are assigned sequentially in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if the name already exists,
    /// or [`RegistryError::RegistryFull`] if all 65 536 slots are consumed.
    pub fn register(&mut self, name: &str) -> Result<BlockId, RegistryError> {
        if self.name_to_id.contains_key(name) {
            return Err(RegistryError::DuplicateName(name.to_string()));
        }
        if self.names.len() > u16::MAX as usize {
            return Err(RegistryError::RegistryFull);
        }

        let id = BlockId(self.names.len() as u16);
        self.name_to_id.insert(name.to_string(), id);
        self.names.push(name.to_string());
        Ok(id)
    }

    /// Registers a name if new, otherwise returns the existing id.
    ///
    /// Configuration lists the same block name in several roles (cover,
    /// filler, marker); each role resolves through this entry point.
    pub fn register_or_lookup(&mut self, name: &str) -> Result<BlockId, RegistryError> {
        match self.lookup(name) {
            Some(id) => Ok(id),
            None => self.register(name),
        }
    }

    /// Returns the id for a block name, or `None` if not registered.
    pub fn lookup(&self, name: &str) -> Option<BlockId> {
        self.name_to_id.get(name).copied()
    }

    /// Returns the name for a given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range — ids are only produced by the
    /// registry itself, so this indicates a programming error.
    pub fn name(&self, id: BlockId) -> &str {
        &self.names[id.0 as usize]
    }

    /// Total number of registered block types.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_assigns_sequential_ids() {
        let mut reg = BlockRegistry::new();
        assert_eq!(reg.register("bedrock").unwrap(), BlockId(0));
        assert_eq!(reg.register("grass_block").unwrap(), BlockId(1));
        assert_eq!(reg.register("dirt").unwrap(), BlockId(2));
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut reg = BlockRegistry::new();
        reg.register("stone").unwrap();
        let err = reg.register("stone").unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName(n) if n == "stone"));
    }

    #[test]
    fn test_register_or_lookup_reuses_id() {
        let mut reg = BlockRegistry::new();
        let first = reg.register_or_lookup("dirt").unwrap();
        let second = reg.register_or_lookup("dirt").unwrap();
        assert_eq!(first, second);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_lookup_and_name_round_trip() {
        let mut reg = BlockRegistry::new();
        let id = reg.register("coarse_dirt").unwrap();
        assert_eq!(reg.lookup("coarse_dirt"), Some(id));
        assert_eq!(reg.name(id), "coarse_dirt");
        assert_eq!(reg.lookup("gravel"), None);
    }
}
