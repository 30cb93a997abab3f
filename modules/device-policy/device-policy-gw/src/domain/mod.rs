//! Domain layer for the device policy gateway.

pub mod client;
pub mod operations;
pub mod panel;
pub mod restrictions;
pub mod service;

pub use operations::OperationSpec;
pub use panel::{RestrictionPanel, RestrictionState};
pub use restrictions::enabled_restrictions;
pub use service::Gateway;
