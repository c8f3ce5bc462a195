//! Parsing and derivation rules applied to raw collaborator output.
//!
//! Everything here is a pure function over strings so the rules can be
//! tested without a host.

pub mod cidr;
pub mod hostname;
pub mod route;
pub mod text;

pub use cidr::{mask_weight, network_cidr, prefix_length};
pub use hostname::normalize_hostname;
pub use route::parse_default_route;
