use crate::domain::filter::schema::{AttributeDef, DeclaredType, EntityDef, TemporalKind};

pub static NOTIFICATION: EntityDef = EntityDef {
    name: "Notification",
    table: "notifications",
    attributes: &[
        AttributeDef::scalar("id", "id", DeclaredType::Int64),
        AttributeDef::scalar("title", "title", DeclaredType::String),
        AttributeDef::scalar("body", "body", DeclaredType::String),
        AttributeDef::scalar(
            "createdAt",
            "created_at",
            DeclaredType::Temporal(TemporalKind::DateTime),
        ),
    ],
};

pub static USER_NOTIFICATION: EntityDef = EntityDef {
    name: "UserNotification",
    table: "user_notifications",
    attributes: &[
        AttributeDef::scalar("id", "id", DeclaredType::Int64),
        AttributeDef::scalar("isRead", "is_read", DeclaredType::Bool),
        AttributeDef::to_one("user", "User", "user_id"),
        AttributeDef::to_one("notification", "Notification", "notification_id"),
    ],
};
