//! Bearer token authentication against the identity provider's JWKS.
//!
//! The provider owns users; this service only trusts the token subject
//! as `user_id` and reads roles from a configurable claim.

mod jwks;
mod validator;

pub mod dto;
pub mod guards;
pub mod handler;
pub mod model;
pub mod routes;

pub use jwks::JwksClient;
pub use validator::JwtValidator;
