use crate::domain::filter::schema::{AttributeDef, DeclaredType, EntityDef};

pub static CART: EntityDef = EntityDef {
    name: "Cart",
    table: "carts",
    attributes: &[
        AttributeDef::scalar("id", "id", DeclaredType::Int64),
        AttributeDef::to_one("user", "User", "user_id"),
        AttributeDef::to_many("items", "CartItem", "cart_id"),
    ],
};

pub static CART_ITEM: EntityDef = EntityDef {
    name: "CartItem",
    table: "cart_items",
    attributes: &[
        AttributeDef::scalar("cartId", "cart_id", DeclaredType::Int64),
        AttributeDef::scalar("productId", "product_id", DeclaredType::Int64),
        AttributeDef::scalar("quantity", "quantity", DeclaredType::Int32),
        AttributeDef::to_one("cart", "Cart", "cart_id"),
        AttributeDef::to_one("product", "Product", "product_id"),
    ],
};
