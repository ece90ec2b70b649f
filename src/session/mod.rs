//! Session gate: identity notifications in, route decisions out.

pub mod gate;

pub use gate::SessionGate;
