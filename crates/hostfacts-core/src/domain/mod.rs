//! Core domain types.
//!
//! Pure data with no infrastructure dependencies: fact values, decoded
//! property-list trees and the network descriptions the session captures.

mod network;
mod structured;
mod value;

pub use network::{DefaultRoute, HardwarePort};
pub use structured::Structured;
pub use value::{FactValue, InterfaceBinding};
