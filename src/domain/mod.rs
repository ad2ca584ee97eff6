// Domain layer: map models, the session state and ports (interfaces). No external dependencies beyond std/serde.

pub mod model;
pub mod ports;
pub mod session;
