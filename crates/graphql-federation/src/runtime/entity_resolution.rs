use crate::entity_type_set::EntityTypeSet;
use crate::runtime::Representation;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Maps a value returned by the entities fetcher to the name of its concrete
/// entity type, for `_Entity` union member selection. `None` signals that the
/// value could not be matched to any known type.
pub type EntityTypeResolver = dyn Fn(&Value) -> Option<String> + Send + Sync;

/// Resolves a full batch of entity representations in one call.
///
/// The returned vector must have one element per representation, in the same
/// order; `None` at a position means "not found" for the representation at
/// that position.
pub type EntitiesFetcher = dyn Fn(&[Representation]) -> Vec<Option<Value>> + Send + Sync;

/// An entity value paired with the concrete type the resolver assigned to it.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedEntity {
    pub type_name: String,
    pub value: Value,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum EntityResolutionError {
    #[error("This schema defines no entity types, so `_entities` is not available")]
    NoEntityTypes,

    #[error(
        "The entities fetcher returned {actual} result(s) for {expected} \
        representation(s); the batch must keep its length"
    )]
    BatchLengthMismatch { expected: usize, actual: usize },

    #[error("The entity type resolver could not type the value at index {index}")]
    UnresolvedEntityType { index: usize },

    #[error("`{type_name}` (resolved for the value at index {index}) is not an entity type")]
    UnknownEntityType { index: usize, type_name: String },
}

/// The callback pair wired onto the synthesized `_entities` field and the
/// `_Entity` union. Set once during the build and never mutated afterwards.
#[derive(Clone)]
pub(crate) struct EntityResolution {
    type_resolver: Arc<EntityTypeResolver>,
    fetcher: Arc<EntitiesFetcher>,
}

impl EntityResolution {
    pub(crate) fn new(
        type_resolver: Arc<EntityTypeResolver>,
        fetcher: Arc<EntitiesFetcher>,
    ) -> Self {
        Self {
            type_resolver,
            fetcher,
        }
    }

    pub(crate) fn type_resolver(&self) -> &Arc<EntityTypeResolver> {
        &self.type_resolver
    }

    /// Dispatches one `_entities` execution: the fetcher is invoked exactly
    /// once with the whole ordered batch, and every non-null result is typed
    /// through the resolver against the entity set.
    ///
    /// Positional association is preserved: the element at index `i` of the
    /// output corresponds to `representations[i]`, with `None` carried
    /// through as a "not found" marker rather than an error.
    pub(crate) fn resolve(
        &self,
        entity_types: &EntityTypeSet,
        representations: &[Representation],
    ) -> Result<Vec<Option<ResolvedEntity>>, EntityResolutionError> {
        let fetched = (self.fetcher)(representations);
        if fetched.len() != representations.len() {
            return Err(EntityResolutionError::BatchLengthMismatch {
                expected: representations.len(),
                actual: fetched.len(),
            });
        }

        let mut resolved = Vec::with_capacity(fetched.len());
        for (index, value) in fetched.into_iter().enumerate() {
            let Some(value) = value else {
                resolved.push(None);
                continue;
            };

            let type_name = (self.type_resolver)(&value)
                .ok_or(EntityResolutionError::UnresolvedEntityType { index })?;
            if !entity_types.contains(&type_name) {
                return Err(EntityResolutionError::UnknownEntityType { index, type_name });
            }
            resolved.push(Some(ResolvedEntity { type_name, value }));
        }
        Ok(resolved)
    }
}

impl std::fmt::Debug for EntityResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityResolution").finish_non_exhaustive()
    }
}
