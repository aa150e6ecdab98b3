use crate::ast;
use crate::catalog;
use crate::entity_type_set::EntityTypeSet;
use crate::schema_transformer::SchemaBuildError;
use log::debug;
use std::collections::HashSet;

type Result<T> = std::result::Result<T, SchemaBuildError>;

/// Rewrites a parsed schema document into its federated form.
///
/// The input document is never mutated; all additions land on a clone, so two
/// transforms of the same base document cannot interfere with each other.
/// Every merge and injection is guarded by name, which makes the rewrite
/// idempotent: augmenting a document that already carries some (or all) of
/// the federation definitions adds nothing twice.
pub(crate) fn augment(
    document: &ast::schema::Document,
    entity_types: &EntityTypeSet,
) -> Result<ast::schema::Document> {
    let mut doc = document.clone();
    merge_catalog(&mut doc);

    let query_type_name = query_root_name(&doc);
    inject_query_field(&mut doc, &query_type_name, catalog::service_field())?;

    if entity_types.is_empty() {
        debug!("no entity types found; skipping `_Entity` and `_entities` synthesis");
        return Ok(doc);
    }

    debug!(
        "synthesizing `_Entity` union over {} member type(s)",
        entity_types.len(),
    );
    inject_query_field(&mut doc, &query_type_name, catalog::entities_field())?;
    if !defined_type_names(&doc).contains(catalog::ENTITY_TYPE_NAME) {
        doc.definitions.push(ast::schema::Definition::TypeDefinition(
            ast::schema::TypeDefinition::Union(catalog::entity_union_definition(
                entity_types.member_names(),
            )),
        ));
    }

    Ok(doc)
}

/// Merges the federation directive definitions, scalar stubs, and the
/// `_Service` type into the document, skipping any definition the user's
/// schema already declares under the same name.
fn merge_catalog(doc: &mut ast::schema::Document) {
    let directive_names: HashSet<String> = doc
        .definitions
        .iter()
        .filter_map(|def| match def {
            ast::schema::Definition::DirectiveDefinition(directive_def) => {
                Some(directive_def.name.clone())
            }
            _ => None,
        })
        .collect();
    for directive_def in catalog::directive_definitions() {
        if !directive_names.contains(&directive_def.name) {
            doc.definitions
                .push(ast::schema::Definition::DirectiveDefinition(directive_def));
        }
    }

    let type_names = defined_type_names(doc);
    for scalar_def in catalog::scalar_definitions() {
        if !type_names.contains(&scalar_def.name) {
            doc.definitions.push(ast::schema::Definition::TypeDefinition(
                ast::schema::TypeDefinition::Scalar(scalar_def),
            ));
        }
    }
    if !type_names.contains(catalog::SERVICE_TYPE_NAME) {
        doc.definitions.push(ast::schema::Definition::TypeDefinition(
            ast::schema::TypeDefinition::Object(catalog::service_type_definition()),
        ));
    }
}

/// Resolves the name of the query root operation type, honoring an explicit
/// `schema { query: ... }` definition before falling back to the default
/// `Query` name.
pub(crate) fn query_root_name(doc: &ast::schema::Document) -> String {
    doc.definitions
        .iter()
        .find_map(|def| match def {
            ast::schema::Definition::SchemaDefinition(schema_def) => schema_def.query.clone(),
            _ => None,
        })
        .unwrap_or_else(|| "Query".to_string())
}

fn inject_query_field(
    doc: &mut ast::schema::Document,
    query_type_name: &str,
    field: ast::schema::Field,
) -> Result<()> {
    for def in doc.definitions.iter_mut() {
        let ast::schema::Definition::TypeDefinition(ast::schema::TypeDefinition::Object(obj)) = def
        else {
            continue;
        };
        if obj.name != query_type_name {
            continue;
        }
        if !obj.fields.iter().any(|existing| existing.name == field.name) {
            obj.fields.push(field);
        }
        return Ok(());
    }

    Err(SchemaBuildError::NoQueryOperationTypeDefined)
}

fn defined_type_names(doc: &ast::schema::Document) -> HashSet<String> {
    doc.definitions
        .iter()
        .filter_map(|def| match def {
            ast::schema::Definition::TypeDefinition(type_def) => match type_def {
                ast::schema::TypeDefinition::Scalar(t) => Some(t.name.clone()),
                ast::schema::TypeDefinition::Object(t) => Some(t.name.clone()),
                ast::schema::TypeDefinition::Interface(t) => Some(t.name.clone()),
                ast::schema::TypeDefinition::Union(t) => Some(t.name.clone()),
                ast::schema::TypeDefinition::Enum(t) => Some(t.name.clone()),
                ast::schema::TypeDefinition::InputObject(t) => Some(t.name.clone()),
            },
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(sdl: &str) -> ast::schema::Document {
        graphql_parser::schema::parse_schema::<String>(sdl)
            .unwrap()
            .into_static()
    }

    #[test]
    fn missing_query_type_is_an_error() {
        let doc = parse("type Product @key(fields: \"id\") { id: ID! }");
        let entities = EntityTypeSet::discover(&doc);
        let result = augment(&doc, &entities);
        assert!(matches!(
            result,
            Err(SchemaBuildError::NoQueryOperationTypeDefined),
        ));
    }

    #[test]
    fn honors_schema_definition_query_root_override() {
        let doc = parse(concat!(
            "schema { query: QueryRoot }\n",
            "type QueryRoot { hello: String }",
        ));
        let entities = EntityTypeSet::discover(&doc);
        let augmented = augment(&doc, &entities).unwrap();

        let sdl = augmented.to_string();
        assert!(sdl.contains("_service: _Service"));
        assert!(!sdl.contains("type Query {"));
    }

    #[test]
    fn augmenting_twice_adds_nothing_new() {
        let doc = parse(concat!(
            "type Product @key(fields: \"id\") { id: ID! }\n",
            "type Query { product: Product }",
        ));
        let entities = EntityTypeSet::discover(&doc);
        let once = augment(&doc, &entities).unwrap();
        let twice = augment(&once, &entities).unwrap();
        assert_eq!(once.to_string(), twice.to_string());
    }

    #[test]
    fn preexisting_catalog_definitions_are_not_duplicated() {
        let doc = parse(concat!(
            "scalar _Any\n",
            "directive @key(fields: _FieldSet!) on OBJECT | INTERFACE\n",
            "scalar _FieldSet\n",
            "type Query { hello: String }",
        ));
        let entities = EntityTypeSet::discover(&doc);
        let augmented = augment(&doc, &entities).unwrap();

        let sdl = augmented.to_string();
        assert_eq!(sdl.matches("scalar _Any").count(), 1);
        assert_eq!(sdl.matches("directive @key").count(), 1);
        assert_eq!(sdl.matches("scalar _FieldSet").count(), 1);
    }
}
