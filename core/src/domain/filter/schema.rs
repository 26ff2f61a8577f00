use std::fmt;

/// Temporal column kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalKind {
    /// Calendar date without time.
    Date,
    /// Wall-clock date and time without offset.
    DateTime,
    /// Date and time with a UTC offset.
    OffsetDateTime,
    /// Point on the UTC timeline.
    Instant,
}

#[derive(Debug, PartialEq, Eq)]
pub struct EnumDef {
    pub name: &'static str,
    pub members: &'static [&'static str],
}

impl EnumDef {
    /// Exact, case-sensitive member lookup.
    pub fn member(&self, raw: &str) -> Option<&'static str> {
        self.members.iter().copied().find(|m| *m == raw)
    }
}

/// Declared type of a scalar attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredType {
    Bool,
    Int64,
    Int32,
    Int16,
    Int8,
    Float64,
    Float32,
    Decimal,
    String,
    Enum(&'static EnumDef),
    Temporal(TemporalKind),
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclaredType::Bool => f.write_str("boolean"),
            DeclaredType::Int64 => f.write_str("i64"),
            DeclaredType::Int32 => f.write_str("i32"),
            DeclaredType::Int16 => f.write_str("i16"),
            DeclaredType::Int8 => f.write_str("i8"),
            DeclaredType::Float64 => f.write_str("f64"),
            DeclaredType::Float32 => f.write_str("f32"),
            DeclaredType::Decimal => f.write_str("decimal"),
            DeclaredType::String => f.write_str("string"),
            DeclaredType::Enum(def) => write!(f, "enum {}", def.name),
            DeclaredType::Temporal(TemporalKind::Date) => f.write_str("date"),
            DeclaredType::Temporal(TemporalKind::DateTime) => f.write_str("datetime"),
            DeclaredType::Temporal(TemporalKind::OffsetDateTime) => {
                f.write_str("offset datetime")
            }
            DeclaredType::Temporal(TemporalKind::Instant) => f.write_str("instant"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    ToOne,
    ToMany,
}

/// Join description: `parent.local_column = target.foreign_column`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssociationDef {
    pub target: &'static str,
    pub cardinality: Cardinality,
    pub local_column: &'static str,
    pub foreign_column: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Scalar(DeclaredType),
    Association(AssociationDef),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDef {
    pub name: &'static str,
    pub column: &'static str,
    pub kind: AttributeKind,
}

impl AttributeDef {
    pub const fn scalar(name: &'static str, column: &'static str, ty: DeclaredType) -> Self {
        Self {
            name,
            column,
            kind: AttributeKind::Scalar(ty),
        }
    }

    /// Many-to-one / one-to-one: the foreign key lives on this entity.
    pub const fn to_one(name: &'static str, target: &'static str, fk_column: &'static str) -> Self {
        Self {
            name,
            column: fk_column,
            kind: AttributeKind::Association(AssociationDef {
                target,
                cardinality: Cardinality::ToOne,
                local_column: fk_column,
                foreign_column: "id",
            }),
        }
    }

    /// One-to-many: the foreign key lives on the target entity.
    pub const fn to_many(
        name: &'static str,
        target: &'static str,
        target_fk_column: &'static str,
    ) -> Self {
        Self {
            name,
            column: "id",
            kind: AttributeKind::Association(AssociationDef {
                target,
                cardinality: Cardinality::ToMany,
                local_column: "id",
                foreign_column: target_fk_column,
            }),
        }
    }
}

/// Static description of one entity.
///
/// Entity names are PascalCase and attribute names camelCase, so the entity
/// name doubles as the root alias without clashing with join aliases, which
/// are built from attribute paths.
#[derive(Debug, PartialEq, Eq)]
pub struct EntityDef {
    pub name: &'static str,
    pub table: &'static str,
    pub attributes: &'static [AttributeDef],
}

impl EntityDef {
    pub fn attribute(&self, name: &str) -> Option<&'static AttributeDef> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn scalar(&self, name: &str) -> Option<(&'static AttributeDef, DeclaredType)> {
        self.attribute(name).and_then(|a| match a.kind {
            AttributeKind::Scalar(ty) => Some((a, ty)),
            AttributeKind::Association(_) => None,
        })
    }

    pub fn association(&self, name: &str) -> Option<AssociationDef> {
        self.attribute(name).and_then(|a| match a.kind {
            AttributeKind::Association(assoc) => Some(assoc),
            AttributeKind::Scalar(_) => None,
        })
    }
}

/// Read-only entity lookup shared by every request.
pub trait Schema: Send + Sync {
    fn entity(&self, name: &str) -> Option<&'static EntityDef>;
}

/// Schema backed by a fixed list of entity tables.
#[derive(Debug)]
pub struct StaticSchema {
    entities: &'static [&'static EntityDef],
}

impl StaticSchema {
    pub const fn new(entities: &'static [&'static EntityDef]) -> Self {
        Self { entities }
    }

    pub fn entities(&self) -> &'static [&'static EntityDef] {
        self.entities
    }
}

impl Schema for StaticSchema {
    fn entity(&self, name: &str) -> Option<&'static EntityDef> {
        self.entities.iter().copied().find(|e| e.name == name)
    }
}
