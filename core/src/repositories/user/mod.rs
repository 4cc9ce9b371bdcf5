//! External user store port

mod mock;
mod registry;
#[allow(clippy::module_inception)]
mod r#trait;

pub use mock::MockUserStore;
pub use registry::UserStoreRegistry;
pub use r#trait::{CredentialVerifier, UserStore};
