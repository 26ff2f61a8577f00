use sea_orm::{
    Condition, DbBackend, Statement, Value,
    sea_query::{
        Alias, Asterisk, Expr, Func, JoinType, LikeExpr, Order, Query, QueryBuilder,
        SelectStatement, SimpleExpr,
    },
};

use crate::domain::filter::{
    coercion::{TemporalValue, TypedValue},
    ports::{LIKE_ESCAPE, LikePattern, PagedPlan, PredicateBackend, Selection},
    resolver::ResolvedAttribute,
    value_objects::{PageSpec, SortDirection},
};

/// Renders compiled filters onto sea-query conditions and select statements.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeaQueryBackend;

/// Compiled select over the root entity, without pagination applied.
#[derive(Debug, Clone)]
pub struct SeaQueryPlan {
    select: SelectStatement,
    page: PageSpec,
}

impl PagedPlan for SeaQueryPlan {
    fn page(&self) -> PageSpec {
        self.page
    }
}

impl SeaQueryPlan {
    /// `LIMIT size OFFSET index * size`
    pub fn statement(&self) -> SelectStatement {
        let mut select = self.select.clone();
        select.limit(self.page.size).offset(self.page.offset());
        select
    }

    /// Same page with one extra row, used to detect a following page.
    pub fn slice_statement(&self) -> SelectStatement {
        let mut select = self.select.clone();
        select
            .limit(self.page.size.saturating_add(1))
            .offset(self.page.offset());
        select
    }

    /// Page statement with values inlined, for logs and tests.
    pub fn to_sql<B: QueryBuilder>(&self, builder: B) -> String {
        self.statement().to_string(builder)
    }

    /// Parameterized lookahead statement ready to be executed.
    pub fn to_statement(&self, backend: DbBackend) -> Statement {
        backend.build(&self.slice_statement())
    }
}

fn to_expr(value: TypedValue) -> SimpleExpr {
    let value: Value = match value {
        TypedValue::Bool(b) => b.into(),
        TypedValue::Int64(n) => n.into(),
        TypedValue::Int32(n) => n.into(),
        TypedValue::Int16(n) => n.into(),
        TypedValue::Int8(n) => n.into(),
        TypedValue::Float64(n) => n.into(),
        TypedValue::Float32(n) => n.into(),
        TypedValue::Decimal(d) => d.into(),
        TypedValue::String(s) => s.into(),
        TypedValue::Enum { member, .. } => member.into(),
        TypedValue::Temporal(TemporalValue::Date(d)) => d.into(),
        TypedValue::Temporal(TemporalValue::DateTime(dt)) => dt.into(),
        TypedValue::Temporal(TemporalValue::OffsetDateTime(dt)) => dt.into(),
        TypedValue::Temporal(TemporalValue::Instant(dt)) => dt.into(),
        TypedValue::List(items) => {
            return SimpleExpr::Tuple(items.into_iter().map(to_expr).collect());
        }
    };
    SimpleExpr::Value(value)
}

impl PredicateBackend for SeaQueryBackend {
    type Expr = SimpleExpr;
    type Predicate = Condition;
    type Plan = SeaQueryPlan;

    fn get(&self, attribute: &ResolvedAttribute) -> SimpleExpr {
        Expr::col((
            Alias::new(attribute.alias.as_str()),
            Alias::new(attribute.column()),
        ))
        .into()
    }

    fn lower(&self, expr: SimpleExpr) -> SimpleExpr {
        Func::lower(expr).into()
    }

    fn as_text(&self, expr: SimpleExpr) -> SimpleExpr {
        Expr::expr(expr).cast_as(Alias::new("text"))
    }

    fn equal(&self, expr: SimpleExpr, value: TypedValue) -> Condition {
        Condition::all().add(Expr::expr(expr).eq(to_expr(value)))
    }

    fn not_equal(&self, expr: SimpleExpr, value: TypedValue) -> Condition {
        Condition::all().add(Expr::expr(expr).ne(to_expr(value)))
    }

    fn less_than(&self, expr: SimpleExpr, value: TypedValue) -> Condition {
        Condition::all().add(Expr::expr(expr).lt(to_expr(value)))
    }

    fn less_than_or_equal(&self, expr: SimpleExpr, value: TypedValue) -> Condition {
        Condition::all().add(Expr::expr(expr).lte(to_expr(value)))
    }

    fn greater_than(&self, expr: SimpleExpr, value: TypedValue) -> Condition {
        Condition::all().add(Expr::expr(expr).gt(to_expr(value)))
    }

    fn greater_than_or_equal(&self, expr: SimpleExpr, value: TypedValue) -> Condition {
        Condition::all().add(Expr::expr(expr).gte(to_expr(value)))
    }

    fn is_in(&self, expr: SimpleExpr, values: Vec<TypedValue>) -> Condition {
        Condition::all().add(Expr::expr(expr).is_in(values.into_iter().map(to_expr)))
    }

    fn like(&self, expr: SimpleExpr, pattern: &LikePattern) -> Condition {
        Condition::all()
            .add(Expr::expr(expr).like(LikeExpr::new(pattern.pattern()).escape(LIKE_ESCAPE)))
    }

    fn conjunction(&self, predicates: Vec<Condition>) -> Condition {
        predicates
            .into_iter()
            .filter(|c| !c.is_empty())
            .fold(Condition::all(), Condition::add)
    }

    fn disjunction(&self, predicates: Vec<Condition>) -> Condition {
        predicates.into_iter().fold(Condition::any(), Condition::add)
    }

    fn identity(&self) -> Condition {
        Condition::all()
    }

    fn select(&self, selection: Selection<SimpleExpr, Condition>) -> SeaQueryPlan {
        let root = Alias::new(selection.root_alias);
        let mut select = Query::select();

        select
            .column((root.clone(), Asterisk))
            .from_as(Alias::new(selection.root.table), root);

        if selection.distinct {
            select.distinct();
            // postgres wants every ORDER BY expression of a DISTINCT select in its column list
            for (i, key) in selection.order.iter().enumerate() {
                if key.joined {
                    select.expr_as(key.expr.clone(), Alias::new(format!("sort_{i}")));
                }
            }
        }

        for join in &selection.joins {
            select.join_as(
                JoinType::LeftJoin,
                Alias::new(join.table),
                Alias::new(join.alias.as_str()),
                Expr::col((
                    Alias::new(join.alias.as_str()),
                    Alias::new(join.foreign_column),
                ))
                .equals((
                    Alias::new(join.parent_alias.as_str()),
                    Alias::new(join.local_column),
                )),
            );
        }

        if !selection.predicate.is_empty() {
            select.cond_where(selection.predicate);
        }

        for key in selection.order {
            let order = match key.direction {
                SortDirection::Asc => Order::Asc,
                SortDirection::Desc => Order::Desc,
            };
            select.order_by_expr(key.expr, order);
        }

        SeaQueryPlan {
            select,
            page: selection.page,
        }
    }
}
