//! One module per group of remote operations. Every function performs a
//! single GraphQL request against the workspace the client is scoped to.

pub mod calculations;
pub mod pages;
pub mod schema;
pub mod users;
