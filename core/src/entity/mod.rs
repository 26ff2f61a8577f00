//! Static table definitions the filter compiler resolves paths against.

pub mod carts;
pub mod notifications;
pub mod orders;
pub mod users;

use crate::domain::filter::schema::StaticSchema;

pub static SCHEMA: StaticSchema = StaticSchema::new(&[
    &users::USER,
    &users::ROLE,
    &users::USER_ROLE,
    &orders::ORDER,
    &orders::ORDER_ITEM,
    &orders::PRODUCT,
    &carts::CART,
    &carts::CART_ITEM,
    &notifications::NOTIFICATION,
    &notifications::USER_NOTIFICATION,
]);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::schema::{AttributeKind, Schema};

    #[test]
    fn test_every_association_target_exists() {
        for entity in SCHEMA.entities() {
            for attribute in entity.attributes {
                if let AttributeKind::Association(association) = attribute.kind {
                    assert!(
                        SCHEMA.entity(association.target).is_some(),
                        "{}.{} points to missing entity {}",
                        entity.name,
                        attribute.name,
                        association.target
                    );
                }
            }
        }
    }

    #[test]
    fn test_entity_and_attribute_names_are_unique() {
        let entities = SCHEMA.entities();
        for (i, entity) in entities.iter().enumerate() {
            assert!(entities[i + 1..].iter().all(|e| e.name != entity.name));
            for (j, attribute) in entity.attributes.iter().enumerate() {
                assert!(
                    entity.attributes[j + 1..]
                        .iter()
                        .all(|a| a.name != attribute.name),
                    "duplicate attribute {}.{}",
                    entity.name,
                    attribute.name
                );
            }
        }
    }
}
