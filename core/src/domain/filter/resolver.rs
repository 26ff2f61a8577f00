use indexmap::IndexMap;
use tracing::debug;

use crate::domain::filter::{
    errors::FilterError,
    schema::{AttributeDef, Cardinality, DeclaredType, EntityDef, Schema},
    value_objects::AttributePath,
};

/// LEFT OUTER JOIN installed for one association prefix of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub alias: String,
    pub parent_alias: String,
    pub table: &'static str,
    pub entity: &'static EntityDef,
    pub local_column: &'static str,
    pub foreign_column: &'static str,
    pub cardinality: Cardinality,
}

/// A terminal scalar attribute together with the alias it is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAttribute {
    pub alias: String,
    pub attribute: &'static AttributeDef,
    pub declared_type: DeclaredType,
    pub path: AttributePath,
}

impl ResolvedAttribute {
    pub fn column(&self) -> &'static str {
        self.attribute.column
    }

    pub fn is_joined(&self, root_alias: &str) -> bool {
        self.alias != root_alias
    }
}

/// Resolves dotted paths against the schema, one instance per request.
///
/// Joins are keyed by their canonical path prefix (`items.product`), so two
/// paths through the same association share a single join.
pub struct PathResolver<'a> {
    schema: &'a dyn Schema,
    root: &'static EntityDef,
    joins: IndexMap<String, Join>,
}

impl<'a> PathResolver<'a> {
    pub fn new(schema: &'a dyn Schema, root: &'static EntityDef) -> Self {
        Self {
            schema,
            root,
            joins: IndexMap::new(),
        }
    }

    pub fn root_alias(&self) -> &'static str {
        self.root.name
    }

    /// True when reading `attribute` walks a to-many association, so the
    /// same root row can come back once per child.
    pub fn crosses_to_many(&self, attribute: &ResolvedAttribute) -> bool {
        (1..=attribute.path.associations().len())
            .filter_map(|depth| self.joins.get(&attribute.path.prefix(depth)))
            .any(|join| join.cardinality == Cardinality::ToMany)
    }

    pub fn into_joins(self) -> Vec<Join> {
        self.joins.into_values().collect()
    }

    pub fn resolve(&mut self, path: &AttributePath) -> Result<ResolvedAttribute, FilterError> {
        let mut entity = self.root;
        let mut alias = self.root_alias().to_string();

        for (depth, segment) in path.associations().iter().enumerate() {
            let key = path.prefix(depth + 1);

            if let Some(join) = self.joins.get(&key) {
                entity = join.entity;
                alias = join.alias.clone();
                continue;
            }

            let association =
                entity
                    .association(segment)
                    .ok_or_else(|| FilterError::UnknownAssociation {
                        segment: segment.clone(),
                        path: path.to_string(),
                    })?;

            let target = self
                .schema
                .entity(association.target)
                .ok_or_else(|| FilterError::UnknownEntity(association.target.to_string()))?;

            let join = Join {
                alias: key.replace('.', "_"),
                parent_alias: alias,
                table: target.table,
                entity: target,
                local_column: association.local_column,
                foreign_column: association.foreign_column,
                cardinality: association.cardinality,
            };
            debug!(path = %key, table = target.table, "installing left join");

            entity = target;
            alias = join.alias.clone();
            self.joins.insert(key, join);
        }

        let terminal = path.terminal();
        let (attribute, declared_type) = entity
            .scalar(terminal)
            .or_else(|| entity.scalar(&boolean_name(terminal)))
            .ok_or_else(|| FilterError::UnknownAttribute {
                attribute: terminal.to_string(),
                path: path.to_string(),
            })?;

        Ok(ResolvedAttribute {
            alias,
            attribute,
            declared_type,
            path: path.clone(),
        })
    }
}

/// `remote` -> `isRemote`.
fn boolean_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!("is{}{}", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}
