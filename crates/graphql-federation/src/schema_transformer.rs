use crate::ast;
use crate::augmenter;
use crate::catalog;
use crate::entity_type_set::EntityTypeSet;
use crate::federated_schema::FederatedSchema;
use crate::runtime::EntitiesFetcher;
use crate::runtime::EntityResolution;
use crate::runtime::EntityTypeResolver;
use crate::runtime::FieldResolutionError;
use crate::runtime::Representation;
use crate::runtime::RuntimeWiring;
use log::debug;
use serde_json::Value;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

type Result<T> = std::result::Result<T, SchemaBuildError>;

/// Fluent configuration for one federation transform.
///
/// Created by [`transform()`](crate::transform) (which parses the SDL and
/// captures its normalized form), configured with the two entity resolution
/// callbacks, and consumed by [`build()`](SchemaTransformer::build), the only
/// step that validates and rewrites. Each transform owns its state outright,
/// so independent transforms of the same SDL never interfere and always
/// produce equal schemas.
pub struct SchemaTransformer {
    document: ast::schema::Document,
    original_sdl: String,
    wiring: RuntimeWiring,
    type_resolver: Option<Arc<EntityTypeResolver>>,
    entities_fetcher: Option<Arc<EntitiesFetcher>>,
}

#[derive(Debug, Error)]
pub enum SchemaBuildError {
    #[error("Failed to parse the schema SDL")]
    ParseError {
        #[source]
        err: ast::schema::ParseError,
    },

    #[error("No query root operation type is defined in the schema")]
    NoQueryOperationTypeDefined,

    #[error(transparent)]
    Validation(#[from] SchemaValidationError),
}

/// Build-time contract violations. Always fatal: no schema object is
/// returned when one of these fires.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum SchemaValidationError {
    #[error(
        "The schema defines entity types ({}) but no `resolve_entity_type` \
        callback was registered",
        entity_type_names.join(", "),
    )]
    MissingEntityTypeResolver { entity_type_names: Vec<String> },

    #[error(
        "The schema defines entity types ({}) but no `fetch_entities` \
        callback was registered",
        entity_type_names.join(", "),
    )]
    MissingEntitiesFetcher { entity_type_names: Vec<String> },
}

impl SchemaTransformer {
    pub(crate) fn new(sdl: &str, wiring: RuntimeWiring) -> Result<Self> {
        let document = graphql_parser::schema::parse_schema::<String>(sdl)
            .map_err(|err| SchemaBuildError::ParseError { err })?
            .into_static();

        // Captured before any augmentation; this is what `_service.sdl`
        // serves back to the gateway.
        let original_sdl = document.to_string();

        Ok(Self {
            document,
            original_sdl,
            wiring,
            type_resolver: None,
            entities_fetcher: None,
        })
    }

    /// Registers the callback that maps a fetched entity value to its
    /// concrete type, for `_Entity` union member selection.
    pub fn resolve_entity_type(
        mut self,
        resolver: impl Fn(&Value) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.type_resolver = Some(Arc::new(resolver));
        self
    }

    /// Registers the callback that resolves a full batch of entity
    /// representations, invoked once per `_entities` execution.
    pub fn fetch_entities(
        mut self,
        fetcher: impl Fn(&[Representation]) -> Vec<Option<Value>> + Send + Sync + 'static,
    ) -> Self {
        self.entities_fetcher = Some(Arc::new(fetcher));
        self
    }

    /// Validates the configuration and produces the federated schema.
    ///
    /// All-or-nothing: validation runs before the rewrite, and any failure
    /// means no schema is returned. When the schema declares at least one
    /// entity type, both callbacks must have been registered; when it
    /// declares none, the callbacks are never required (and never invoked).
    pub fn build(self) -> Result<FederatedSchema> {
        let entity_types = EntityTypeSet::discover(&self.document);
        debug!(
            "building federated schema: {} entity type(s) discovered",
            entity_types.len(),
        );

        let entity_resolution = self.validated_entity_resolution(&entity_types)?;
        let document = augmenter::augment(&self.document, &entity_types)?;

        let query_type_name = augmenter::query_root_name(&document);
        let mut wiring = self.wiring;
        install_service_resolver(&mut wiring, &query_type_name, self.original_sdl.clone());
        if let Some(resolution) = &entity_resolution {
            install_entity_resolvers(&mut wiring, &query_type_name, &entity_types, resolution);
        }

        Ok(FederatedSchema::new(
            document,
            self.original_sdl,
            entity_types,
            wiring,
            entity_resolution,
        ))
    }

    fn validated_entity_resolution(
        &self,
        entity_types: &EntityTypeSet,
    ) -> Result<Option<EntityResolution>> {
        if entity_types.is_empty() {
            return Ok(None);
        }

        let entity_type_names = || entity_types.iter().map(str::to_string).collect();
        let type_resolver = self.type_resolver.clone().ok_or_else(|| {
            SchemaValidationError::MissingEntityTypeResolver {
                entity_type_names: entity_type_names(),
            }
        })?;
        let fetcher = self.entities_fetcher.clone().ok_or_else(|| {
            SchemaValidationError::MissingEntitiesFetcher {
                entity_type_names: entity_type_names(),
            }
        })?;

        Ok(Some(EntityResolution::new(type_resolver, fetcher)))
    }
}

impl std::fmt::Debug for SchemaTransformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaTransformer")
            .field("original_sdl", &self.original_sdl)
            .field("wiring", &self.wiring)
            .field("has_type_resolver", &self.type_resolver.is_some())
            .field("has_entities_fetcher", &self.entities_fetcher.is_some())
            .finish_non_exhaustive()
    }
}

/// `Query._service` serves the captured original SDL verbatim.
fn install_service_resolver(wiring: &mut RuntimeWiring, query_type_name: &str, sdl: String) {
    wiring.set_field_resolver(
        query_type_name,
        catalog::SERVICE_FIELD_NAME,
        Arc::new(move |_ctx| Ok(json!({ "sdl": sdl }))),
    );
}

/// `Query._entities` parses the `representations` argument, dispatches the
/// batch through the registered callbacks, and serializes each resolved
/// entity with its `__typename` injected so the executor can select the
/// matching `_Entity` union member. The `_Entity` type resolver is installed
/// alongside it.
fn install_entity_resolvers(
    wiring: &mut RuntimeWiring,
    query_type_name: &str,
    entity_types: &EntityTypeSet,
    resolution: &EntityResolution,
) {
    let entity_types = entity_types.clone();
    let entities_resolution = resolution.clone();
    wiring.set_field_resolver(
        query_type_name,
        catalog::ENTITIES_FIELD_NAME,
        Arc::new(move |ctx| {
            let arg_name = catalog::REPRESENTATIONS_ARGUMENT_NAME;
            let representations = match ctx.argument(arg_name) {
                Some(Value::Array(values)) => values
                    .iter()
                    .map(Representation::from_value)
                    .collect::<std::result::Result<Vec<_>, _>>()?,
                Some(_) => {
                    return Err(FieldResolutionError::InvalidArgument {
                        name: arg_name.to_string(),
                    });
                }
                None => {
                    return Err(FieldResolutionError::MissingArgument {
                        name: arg_name.to_string(),
                    });
                }
            };

            let resolved = entities_resolution.resolve(&entity_types, &representations)?;
            let results = resolved
                .into_iter()
                .map(|entity| match entity {
                    Some(entity) => {
                        let mut value = entity.value;
                        if let Value::Object(entries) = &mut value {
                            entries.insert(
                                catalog::TYPENAME_FIELD_NAME.to_string(),
                                Value::String(entity.type_name),
                            );
                        }
                        value
                    }
                    None => Value::Null,
                })
                .collect();
            Ok(Value::Array(results))
        }),
    );

    wiring.set_type_resolver(
        catalog::ENTITY_TYPE_NAME,
        Arc::clone(resolution.type_resolver()),
    );
}
