use crate::ast;
use crate::entity_type_set::EntityTypeSet;
use crate::runtime::EntityResolution;
use crate::runtime::EntityResolutionError;
use crate::runtime::Representation;
use crate::runtime::ResolvedEntity;
use crate::runtime::RuntimeWiring;

/// A fully built, federation-augmented schema.
///
/// Immutable once returned from
/// [`SchemaTransformer::build()`](crate::SchemaTransformer::build): the
/// augmented document, the captured original SDL, the entity type set, and
/// the merged runtime wiring are all frozen at build time.
#[derive(Debug)]
pub struct FederatedSchema {
    document: ast::schema::Document,
    original_sdl: String,
    entity_types: EntityTypeSet,
    wiring: RuntimeWiring,
    entity_resolution: Option<EntityResolution>,
}

impl FederatedSchema {
    pub(crate) fn new(
        document: ast::schema::Document,
        original_sdl: String,
        entity_types: EntityTypeSet,
        wiring: RuntimeWiring,
        entity_resolution: Option<EntityResolution>,
    ) -> Self {
        Self {
            document,
            original_sdl,
            entity_types,
            wiring,
            entity_resolution,
        }
    }

    /// The augmented schema document.
    pub fn document(&self) -> &ast::schema::Document {
        &self.document
    }

    /// Prints the augmented schema as SDL.
    pub fn sdl(&self) -> String {
        self.document.to_string()
    }

    /// The value served by `_service { sdl }`: the caller's original,
    /// pre-transformation SDL (reprinted through the parser once, so that the
    /// same normalization applies to it as to any other printed schema).
    pub fn service_sdl(&self) -> &str {
        &self.original_sdl
    }

    pub fn entity_types(&self) -> &EntityTypeSet {
        &self.entity_types
    }

    /// The merged runtime wiring: caller-registered resolvers plus the
    /// federation entries for `Query._service`, `Query._entities`, and the
    /// `_Entity` union.
    pub fn wiring(&self) -> &RuntimeWiring {
        &self.wiring
    }

    /// Looks up a type definition in the augmented document by name.
    pub fn type_definition(&self, name: &str) -> Option<&ast::schema::TypeDefinition> {
        self.document.definitions.iter().find_map(|def| match def {
            ast::schema::Definition::TypeDefinition(type_def) => {
                (type_definition_name(type_def) == name).then_some(type_def)
            }
            _ => None,
        })
    }

    /// Resolves a batch of entity representations through the registered
    /// callbacks, exactly as the `_entities` field resolver does.
    pub fn resolve_entities(
        &self,
        representations: &[Representation],
    ) -> Result<Vec<Option<ResolvedEntity>>, EntityResolutionError> {
        let Some(resolution) = &self.entity_resolution else {
            return Err(EntityResolutionError::NoEntityTypes);
        };
        resolution.resolve(&self.entity_types, representations)
    }
}

fn type_definition_name(type_def: &ast::schema::TypeDefinition) -> &str {
    match type_def {
        ast::schema::TypeDefinition::Scalar(t) => &t.name,
        ast::schema::TypeDefinition::Object(t) => &t.name,
        ast::schema::TypeDefinition::Interface(t) => &t.name,
        ast::schema::TypeDefinition::Union(t) => &t.name,
        ast::schema::TypeDefinition::Enum(t) => &t.name,
        ast::schema::TypeDefinition::InputObject(t) => &t.name,
    }
}
