use chrono::{Local, NaiveDate, TimeZone};

use crate::domain::filter::{
    assembler::EndpointSpec,
    coercion::{TemporalValue, TypedValue, ValueCoercer},
    ports::{LikePattern, PagedPlan, PredicateBackend, Selection},
    resolver::ResolvedAttribute,
    schema::{AttributeDef, DeclaredType, EntityDef, EnumDef, StaticSchema, TemporalKind},
    value_objects::{PageDefaults, PageSpec, SortDirection},
};

pub static JOB_STATUS: EnumDef = EnumDef {
    name: "JobStatus",
    members: &["OPEN", "CLOSED"],
};

pub static JOB: EntityDef = EntityDef {
    name: "Job",
    table: "jobs",
    attributes: &[
        AttributeDef::scalar("id", "id", DeclaredType::Int64),
        AttributeDef::scalar("name", "name", DeclaredType::String),
        AttributeDef::scalar("email", "email", DeclaredType::String),
        AttributeDef::scalar("phone", "phone", DeclaredType::String),
        AttributeDef::scalar("status", "status", DeclaredType::Enum(&JOB_STATUS)),
        AttributeDef::scalar("isRemote", "is_remote", DeclaredType::Bool),
        AttributeDef::scalar("isActive", "is_active", DeclaredType::Bool),
        AttributeDef::scalar("age", "age", DeclaredType::Int32),
        AttributeDef::scalar(
            "createdAt",
            "created_at",
            DeclaredType::Temporal(TemporalKind::DateTime),
        ),
        AttributeDef::scalar(
            "publishedAt",
            "published_at",
            DeclaredType::Temporal(TemporalKind::OffsetDateTime),
        ),
        AttributeDef::to_one("company", "Company", "company_id"),
        AttributeDef::to_one("salary", "Salary", "salary_id"),
        AttributeDef::to_one("category", "Category", "category_id"),
        AttributeDef::to_many("tags", "Tag", "job_id"),
    ],
};

pub static COMPANY: EntityDef = EntityDef {
    name: "Company",
    table: "companies",
    attributes: &[
        AttributeDef::scalar("id", "id", DeclaredType::Int64),
        AttributeDef::scalar("slug", "slug", DeclaredType::String),
        AttributeDef::scalar("name", "name", DeclaredType::String),
    ],
};

pub static SALARY: EntityDef = EntityDef {
    name: "Salary",
    table: "salaries",
    attributes: &[
        AttributeDef::scalar("id", "id", DeclaredType::Int64),
        AttributeDef::scalar("min", "min_amount", DeclaredType::Int64),
        AttributeDef::scalar("max", "max_amount", DeclaredType::Int64),
    ],
};

pub static CATEGORY: EntityDef = EntityDef {
    name: "Category",
    table: "categories",
    attributes: &[
        AttributeDef::scalar("id", "id", DeclaredType::Int64),
        AttributeDef::scalar("name", "name", DeclaredType::String),
    ],
};

pub static TAG: EntityDef = EntityDef {
    name: "Tag",
    table: "job_tags",
    attributes: &[
        AttributeDef::scalar("id", "id", DeclaredType::Int64),
        AttributeDef::scalar("label", "label", DeclaredType::String),
    ],
};

pub static TEST_SCHEMA: StaticSchema =
    StaticSchema::new(&[&JOB, &COMPANY, &SALARY, &CATEGORY, &TAG]);

pub const JOB_ENDPOINT: EndpointSpec = EndpointSpec {
    entity: "Job",
    search_fields: &["name", "email"],
    page_defaults: PageDefaults::ORDERS,
};

/// 2024-03-12 09:30 local time.
pub fn fixed_coercer() -> ValueCoercer {
    let at = NaiveDate::from_ymd_opt(2024, 3, 12)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .unwrap();
    ValueCoercer::at(Local.from_local_datetime(&at).single().unwrap())
}

/// Renders predicates as readable SQL sketches. Root columns are unqualified,
/// joined columns read `alias.attribute`.
pub struct SketchBackend;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SketchPlan {
    pub table: String,
    pub joins: Vec<String>,
    pub distinct: bool,
    pub predicate: String,
    pub order: Vec<String>,
    /// Joined sort columns a `DISTINCT` select adds to its column list.
    pub projected: Vec<String>,
    pub limit: u64,
    pub offset: u64,
    pub page: PageSpec,
}

impl PagedPlan for SketchPlan {
    fn page(&self) -> PageSpec {
        self.page
    }
}

impl SketchPlan {
    pub fn render(&self) -> String {
        format!(
            "SELECT {}*{} FROM {} {} WHERE {} ORDER BY {} LIMIT {} OFFSET {}",
            if self.distinct { "DISTINCT " } else { "" },
            self.projected
                .iter()
                .map(|c| format!(", {c}"))
                .collect::<String>(),
            self.table,
            self.joins.join(" "),
            self.predicate,
            self.order.join(", "),
            self.limit,
            self.offset
        )
    }
}

fn literal(value: &TypedValue) -> String {
    match value {
        TypedValue::Bool(true) => "TRUE".to_string(),
        TypedValue::Bool(false) => "FALSE".to_string(),
        TypedValue::Int64(n) => n.to_string(),
        TypedValue::Int32(n) => n.to_string(),
        TypedValue::Int16(n) => n.to_string(),
        TypedValue::Int8(n) => n.to_string(),
        TypedValue::Float64(n) => n.to_string(),
        TypedValue::Float32(n) => n.to_string(),
        TypedValue::Decimal(d) => d.to_string(),
        TypedValue::String(s) => format!("'{s}'"),
        TypedValue::Enum { member, .. } => format!("'{member}'"),
        TypedValue::Temporal(TemporalValue::Date(d)) => format!("'{d}'"),
        TypedValue::Temporal(TemporalValue::DateTime(dt)) => {
            format!("'{}'", dt.format("%Y-%m-%dT%H:%M:%S%.f"))
        }
        TypedValue::Temporal(TemporalValue::OffsetDateTime(dt)) => {
            format!("'{}'", dt.to_rfc3339())
        }
        TypedValue::Temporal(TemporalValue::Instant(dt)) => format!("'{}'", dt.to_rfc3339()),
        TypedValue::List(items) => format!(
            "({})",
            items.iter().map(literal).collect::<Vec<_>>().join(",")
        ),
    }
}

impl PredicateBackend for SketchBackend {
    type Expr = String;
    type Predicate = String;
    type Plan = SketchPlan;

    fn get(&self, attribute: &ResolvedAttribute) -> String {
        if attribute.path.is_nested() {
            format!("{}.{}", attribute.alias, attribute.attribute.name)
        } else {
            attribute.attribute.name.to_string()
        }
    }

    fn lower(&self, expr: String) -> String {
        format!("lower({expr})")
    }

    fn as_text(&self, expr: String) -> String {
        format!("CAST({expr} AS text)")
    }

    fn equal(&self, expr: String, value: TypedValue) -> String {
        format!("{expr} = {}", literal(&value))
    }

    fn not_equal(&self, expr: String, value: TypedValue) -> String {
        format!("{expr} <> {}", literal(&value))
    }

    fn less_than(&self, expr: String, value: TypedValue) -> String {
        format!("{expr} < {}", literal(&value))
    }

    fn less_than_or_equal(&self, expr: String, value: TypedValue) -> String {
        format!("{expr} <= {}", literal(&value))
    }

    fn greater_than(&self, expr: String, value: TypedValue) -> String {
        format!("{expr} > {}", literal(&value))
    }

    fn greater_than_or_equal(&self, expr: String, value: TypedValue) -> String {
        format!("{expr} >= {}", literal(&value))
    }

    fn is_in(&self, expr: String, values: Vec<TypedValue>) -> String {
        format!("{expr} IN {}", literal(&TypedValue::List(values)))
    }

    fn like(&self, expr: String, pattern: &LikePattern) -> String {
        format!("{expr} LIKE '{}'", pattern.pattern())
    }

    fn conjunction(&self, predicates: Vec<String>) -> String {
        let parts: Vec<String> = predicates.into_iter().filter(|p| p != "TRUE").collect();
        if parts.is_empty() {
            self.identity()
        } else {
            parts.join(" AND ")
        }
    }

    fn disjunction(&self, predicates: Vec<String>) -> String {
        format!("({})", predicates.join(" OR "))
    }

    fn identity(&self) -> String {
        "TRUE".to_string()
    }

    fn select(&self, selection: Selection<String, String>) -> SketchPlan {
        let projected = if selection.distinct {
            selection
                .order
                .iter()
                .filter(|key| key.joined)
                .map(|key| key.expr.clone())
                .collect()
        } else {
            Vec::new()
        };

        SketchPlan {
            table: selection.root.table.to_string(),
            joins: selection
                .joins
                .iter()
                .map(|j| format!("LEFT JOIN {} {}", j.table, j.alias))
                .collect(),
            distinct: selection.distinct,
            predicate: selection.predicate,
            order: selection
                .order
                .into_iter()
                .map(|key| match key.direction {
                    SortDirection::Asc => format!("{} ASC", key.expr),
                    SortDirection::Desc => format!("{} DESC", key.expr),
                })
                .collect(),
            projected,
            limit: selection.page.size,
            offset: selection.page.offset(),
            page: selection.page,
        }
    }
}
