pub mod ast;
mod augmenter;
mod catalog;
mod entity_type_set;
mod federated_schema;
mod federation;
mod runtime;
mod schema_transformer;

pub use entity_type_set::EntityTypeSet;
pub use federated_schema::FederatedSchema;
pub use federation::transform;
pub use federation::transform_with_wiring;
pub use runtime::EntitiesFetcher;
pub use runtime::EntityResolutionError;
pub use runtime::EntityTypeResolver;
pub use runtime::FieldResolutionContext;
pub use runtime::FieldResolutionError;
pub use runtime::FieldResolver;
pub use runtime::Representation;
pub use runtime::RepresentationError;
pub use runtime::ResolvedEntity;
pub use runtime::RuntimeWiring;
pub use runtime::RuntimeWiringBuilder;
pub use runtime::TypeResolver;
pub use schema_transformer::SchemaBuildError;
pub use schema_transformer::SchemaTransformer;
pub use schema_transformer::SchemaValidationError;
