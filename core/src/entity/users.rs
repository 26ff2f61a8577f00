use crate::domain::filter::schema::{AttributeDef, DeclaredType, EntityDef};

pub static USER: EntityDef = EntityDef {
    name: "User",
    table: "users",
    attributes: &[
        AttributeDef::scalar("id", "id", DeclaredType::Int64),
        AttributeDef::scalar("email", "email", DeclaredType::String),
        AttributeDef::scalar("name", "name", DeclaredType::String),
        AttributeDef::scalar("phone", "phone", DeclaredType::String),
        AttributeDef::scalar("address", "address", DeclaredType::String),
        AttributeDef::to_many("roles", "UserRole", "user_id"),
        AttributeDef::to_many("orders", "Order", "user_id"),
    ],
};

pub static ROLE: EntityDef = EntityDef {
    name: "Role",
    table: "roles",
    attributes: &[
        AttributeDef::scalar("id", "id", DeclaredType::Int64),
        AttributeDef::scalar("name", "name", DeclaredType::String),
    ],
};

/// Join table between users and roles.
pub static USER_ROLE: EntityDef = EntityDef {
    name: "UserRole",
    table: "user_role",
    attributes: &[
        AttributeDef::scalar("userId", "user_id", DeclaredType::Int64),
        AttributeDef::scalar("roleId", "role_id", DeclaredType::Int64),
        AttributeDef::to_one("user", "User", "user_id"),
        AttributeDef::to_one("role", "Role", "role_id"),
    ],
};
