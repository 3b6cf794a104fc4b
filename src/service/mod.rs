//! User creation gateways

mod simulated;
mod traits;

pub use simulated::{SimulatedUserGateway, DEFAULT_DELAY};
pub use traits::UserGateway;

#[cfg(test)]
pub use traits::MockUserGateway;
