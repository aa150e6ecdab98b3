use crate::ast;

pub(crate) const KEY_DIRECTIVE_NAME: &str = "key";
pub(crate) const EXTERNAL_DIRECTIVE_NAME: &str = "external";
pub(crate) const REQUIRES_DIRECTIVE_NAME: &str = "requires";
pub(crate) const PROVIDES_DIRECTIVE_NAME: &str = "provides";
pub(crate) const EXTENDS_DIRECTIVE_NAME: &str = "extends";

pub(crate) const ANY_TYPE_NAME: &str = "_Any";
pub(crate) const FIELD_SET_TYPE_NAME: &str = "_FieldSet";
pub(crate) const SERVICE_TYPE_NAME: &str = "_Service";
pub(crate) const ENTITY_TYPE_NAME: &str = "_Entity";

pub(crate) const SERVICE_FIELD_NAME: &str = "_service";
pub(crate) const ENTITIES_FIELD_NAME: &str = "_entities";
pub(crate) const REPRESENTATIONS_ARGUMENT_NAME: &str = "representations";
pub(crate) const SDL_FIELD_NAME: &str = "sdl";
pub(crate) const TYPENAME_FIELD_NAME: &str = "__typename";

/// The five federation directive definitions every federated schema must
/// carry: `@key`, `@external`, `@requires`, `@provides`, and `@extends`.
///
/// Definitions are constructed fresh on every call so that repeated
/// transforms never share (or mutate) AST state.
pub(crate) fn directive_definitions() -> Vec<ast::schema::DirectiveDefinition> {
    use ast::schema::DirectiveLocation;

    vec![
        directive_def(
            KEY_DIRECTIVE_NAME,
            vec![field_set_argument()],
            vec![DirectiveLocation::Object, DirectiveLocation::Interface],
        ),
        directive_def(
            EXTERNAL_DIRECTIVE_NAME,
            vec![],
            vec![DirectiveLocation::FieldDefinition],
        ),
        directive_def(
            REQUIRES_DIRECTIVE_NAME,
            vec![field_set_argument()],
            vec![DirectiveLocation::FieldDefinition],
        ),
        directive_def(
            PROVIDES_DIRECTIVE_NAME,
            vec![field_set_argument()],
            vec![DirectiveLocation::FieldDefinition],
        ),
        directive_def(
            EXTENDS_DIRECTIVE_NAME,
            vec![],
            vec![DirectiveLocation::Object, DirectiveLocation::Interface],
        ),
    ]
}

/// The `_Any` and `_FieldSet` scalar stubs.
pub(crate) fn scalar_definitions() -> Vec<ast::schema::ScalarType> {
    vec![
        scalar_def(ANY_TYPE_NAME),
        scalar_def(FIELD_SET_TYPE_NAME),
    ]
}

/// `type _Service { sdl: String! }`
pub(crate) fn service_type_definition() -> ast::schema::ObjectType {
    ast::schema::ObjectType {
        position: ast::Pos::default(),
        description: None,
        name: SERVICE_TYPE_NAME.to_string(),
        implements_interfaces: vec![],
        directives: vec![],
        fields: vec![ast::schema::Field {
            position: ast::Pos::default(),
            description: None,
            name: SDL_FIELD_NAME.to_string(),
            arguments: vec![],
            field_type: ast::schema::Type::NonNullType(Box::new(
                ast::schema::Type::NamedType("String".to_string()),
            )),
            directives: vec![],
        }],
    }
}

/// `_service: _Service`
pub(crate) fn service_field() -> ast::schema::Field {
    ast::schema::Field {
        position: ast::Pos::default(),
        description: None,
        name: SERVICE_FIELD_NAME.to_string(),
        arguments: vec![],
        field_type: ast::schema::Type::NamedType(SERVICE_TYPE_NAME.to_string()),
        directives: vec![],
    }
}

/// `_entities(representations: [_Any!]!): [_Entity]!`
pub(crate) fn entities_field() -> ast::schema::Field {
    ast::schema::Field {
        position: ast::Pos::default(),
        description: None,
        name: ENTITIES_FIELD_NAME.to_string(),
        arguments: vec![ast::schema::InputValue {
            position: ast::Pos::default(),
            description: None,
            name: REPRESENTATIONS_ARGUMENT_NAME.to_string(),
            value_type: ast::schema::Type::NonNullType(Box::new(
                ast::schema::Type::ListType(Box::new(
                    ast::schema::Type::NonNullType(Box::new(
                        ast::schema::Type::NamedType(ANY_TYPE_NAME.to_string()),
                    )),
                )),
            )),
            default_value: None,
            directives: vec![],
        }],
        field_type: ast::schema::Type::NonNullType(Box::new(
            ast::schema::Type::ListType(Box::new(
                ast::schema::Type::NamedType(ENTITY_TYPE_NAME.to_string()),
            )),
        )),
        directives: vec![],
    }
}

/// `union _Entity = A | B | ...` over the given member names.
pub(crate) fn entity_union_definition(members: Vec<String>) -> ast::schema::UnionType {
    ast::schema::UnionType {
        position: ast::Pos::default(),
        description: None,
        name: ENTITY_TYPE_NAME.to_string(),
        directives: vec![],
        types: members,
    }
}

fn directive_def(
    name: &str,
    arguments: Vec<ast::schema::InputValue>,
    locations: Vec<ast::schema::DirectiveLocation>,
) -> ast::schema::DirectiveDefinition {
    ast::schema::DirectiveDefinition {
        position: ast::Pos::default(),
        description: None,
        name: name.to_string(),
        arguments,
        repeatable: false,
        locations,
    }
}

fn field_set_argument() -> ast::schema::InputValue {
    ast::schema::InputValue {
        position: ast::Pos::default(),
        description: None,
        name: "fields".to_string(),
        value_type: ast::schema::Type::NonNullType(Box::new(
            ast::schema::Type::NamedType(FIELD_SET_TYPE_NAME.to_string()),
        )),
        default_value: None,
        directives: vec![],
    }
}

fn scalar_def(name: &str) -> ast::schema::ScalarType {
    ast::schema::ScalarType {
        position: ast::Pos::default(),
        description: None,
        name: name.to_string(),
        directives: vec![],
    }
}
