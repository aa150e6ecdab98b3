use crate::ast;
use crate::catalog;
use indexmap::IndexSet;
use std::collections::HashSet;

/// The ordered, de-duplicated set of object type names that participate in
/// the `_Entity` union.
///
/// An object type is an entity if it carries the `@key` directive itself, or
/// if it implements an interface that carries `@key`. Interface definitions
/// are consulted during discovery but never become members themselves: a
/// GraphQL union may only contain object types, so a keyed interface marks
/// each of its concrete implementers as externally referenceable instead.
///
/// Member order is the first-occurrence order of the object type definitions
/// in the source document, which keeps the synthesized union reproducible
/// across repeated transforms of the same input.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EntityTypeSet {
    type_names: IndexSet<String>,
}

impl EntityTypeSet {
    /// Scans a parsed schema document for entity types.
    ///
    /// Presence of `@key` is all that is tested here; the directive's
    /// field-set argument is not validated.
    pub(crate) fn discover(document: &ast::schema::Document) -> Self {
        let keyed_interfaces: HashSet<&str> = document
            .definitions
            .iter()
            .filter_map(|def| match def {
                ast::schema::Definition::TypeDefinition(
                    ast::schema::TypeDefinition::Interface(iface),
                ) if has_key_directive(&iface.directives) => Some(iface.name.as_str()),
                _ => None,
            })
            .collect();

        let mut type_names = IndexSet::new();
        for def in &document.definitions {
            let ast::schema::Definition::TypeDefinition(
                ast::schema::TypeDefinition::Object(obj),
            ) = def
            else {
                continue;
            };

            let implements_keyed_interface = obj
                .implements_interfaces
                .iter()
                .any(|iface_name| keyed_interfaces.contains(iface_name.as_str()));
            if has_key_directive(&obj.directives) || implements_keyed_interface {
                type_names.insert(obj.name.clone());
            }
        }

        Self { type_names }
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.type_names.contains(type_name)
    }

    pub fn is_empty(&self) -> bool {
        self.type_names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.type_names.len()
    }

    /// Iterates member type names in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.type_names.iter().map(String::as_str)
    }

    pub(crate) fn member_names(&self) -> Vec<String> {
        self.type_names.iter().cloned().collect()
    }
}

fn has_key_directive(directives: &[ast::schema::Directive]) -> bool {
    directives
        .iter()
        .any(|directive| directive.name == catalog::KEY_DIRECTIVE_NAME)
}
