use crate::runtime::RuntimeWiring;
use crate::schema_transformer::SchemaBuildError;
use crate::schema_transformer::SchemaTransformer;

/// Begins a federation transform of the given schema SDL.
///
/// Parse errors surface immediately; everything else (entity discovery,
/// callback validation, schema augmentation) is deferred to
/// [`SchemaTransformer::build()`].
///
/// ```
/// use graphql_federation::transform;
///
/// let schema = transform("type Query { hello: String }")?.build()?;
/// assert!(schema.sdl().contains("_service: _Service"));
/// # Ok::<(), graphql_federation::SchemaBuildError>(())
/// ```
pub fn transform(sdl: &str) -> Result<SchemaTransformer, SchemaBuildError> {
    SchemaTransformer::new(sdl, RuntimeWiring::default())
}

/// Like [`transform()`], but seeds the build with caller-supplied runtime
/// wiring (resolvers for the schema's own fields and types). The federation
/// resolvers are merged into the same wiring at build time.
pub fn transform_with_wiring(
    sdl: &str,
    wiring: RuntimeWiring,
) -> Result<SchemaTransformer, SchemaBuildError> {
    SchemaTransformer::new(sdl, wiring)
}
