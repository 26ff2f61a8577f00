use crate::domain::filter::schema::{AttributeDef, DeclaredType, EntityDef, EnumDef, TemporalKind};

pub static ORDER_STATUS: EnumDef = EnumDef {
    name: "OrderStatus",
    members: &["PENDING", "PAID", "CANCELLED"],
};

pub static ORDER: EntityDef = EntityDef {
    name: "Order",
    table: "orders",
    attributes: &[
        AttributeDef::scalar("id", "id", DeclaredType::Int64),
        AttributeDef::scalar("status", "status", DeclaredType::Enum(&ORDER_STATUS)),
        AttributeDef::to_one("user", "User", "user_id"),
        AttributeDef::to_many("items", "OrderItem", "order_id"),
    ],
};

pub static ORDER_ITEM: EntityDef = EntityDef {
    name: "OrderItem",
    table: "order_items",
    attributes: &[
        AttributeDef::scalar("id", "id", DeclaredType::Int64),
        AttributeDef::scalar("quantity", "quantity", DeclaredType::Int32),
        AttributeDef::scalar("priceAtOrder", "price_at_order", DeclaredType::Decimal),
        AttributeDef::scalar(
            "createdAt",
            "created_at",
            DeclaredType::Temporal(TemporalKind::DateTime),
        ),
        AttributeDef::to_one("order", "Order", "order_id"),
        AttributeDef::to_one("product", "Product", "product_id"),
    ],
};

pub static PRODUCT: EntityDef = EntityDef {
    name: "Product",
    table: "products",
    attributes: &[
        AttributeDef::scalar("id", "id", DeclaredType::Int64),
        AttributeDef::scalar("name", "name", DeclaredType::String),
        AttributeDef::scalar("size", "size", DeclaredType::String),
        AttributeDef::scalar("description", "description", DeclaredType::String),
        AttributeDef::scalar("price", "price", DeclaredType::Decimal),
        AttributeDef::scalar("category", "category", DeclaredType::String),
        AttributeDef::scalar("imgUrl", "img_url", DeclaredType::String),
        AttributeDef::scalar("quantities", "quantities", DeclaredType::Int32),
    ],
};
