//! Compiles HTTP query parameters into typed database query plans.
//!
//! The flow is: [`params::ParameterNormalizer`] -> [`value_objects::FilterPlan`]
//! -> [`assembler::QueryAssembler`], which resolves paths through the
//! [`schema::Schema`], coerces values and renders the result through a
//! [`ports::PredicateBackend`].

pub mod assembler;
pub mod coercion;
pub mod errors;
pub mod params;
pub mod ports;
pub mod predicate;
pub mod resolver;
pub mod schema;
pub mod value_objects;

#[cfg(test)]
pub(crate) mod test_utils;
