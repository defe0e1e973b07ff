//! Domain ports: the edges of the hexagon the client is built around.
//!
//! Backend gateways return the domain [`Error`](crate::domain::Error)
//! directly so pages can branch on its code. Local infrastructure adapters
//! declare their own error enums and convert on the way in.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_gateway;
mod availability_gateway;
mod directory_gateway;
mod notification_gateway;
mod profile_gateway;
mod session_request_gateway;
mod session_store;

pub use auth_gateway::AuthGateway;
#[cfg(test)]
pub use auth_gateway::MockAuthGateway;
pub use availability_gateway::AvailabilityGateway;
#[cfg(test)]
pub use availability_gateway::MockAvailabilityGateway;
pub use directory_gateway::DirectoryGateway;
#[cfg(test)]
pub use directory_gateway::MockDirectoryGateway;
#[cfg(test)]
pub use notification_gateway::MockNotificationGateway;
pub use notification_gateway::NotificationGateway;
#[cfg(test)]
pub use profile_gateway::MockProfileGateway;
pub use profile_gateway::ProfileGateway;
#[cfg(test)]
pub use session_request_gateway::MockSessionRequestGateway;
pub use session_request_gateway::SessionRequestGateway;
#[cfg(test)]
pub use session_store::MockSessionStore;
pub use session_store::{SessionStore, SessionStoreError};
