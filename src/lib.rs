//! Typed client for the SmugMug v2 photo-hosting API.
//!
//! A request targets one primary resource (album, image, node, user). The
//! server replies with a JSON envelope holding the primary payload plus an
//! optional `Expansions` map of URI-keyed payloads for related resources.
//! This crate decodes the primary object, resolves each of its advertised
//! related-resource links against the expansion map, and assembles a typed,
//! endpoint-specific result.

mod client;
mod errors;
mod expand;
mod params;
pub mod types;

pub use self::client::Client;
pub use self::errors::Error;
pub use self::expand::Expansion;
pub use self::params::ApiParams;
