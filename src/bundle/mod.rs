//! ATT&CK bundle wiring.
//!
//! This module wraps the STIX bundle (`enterprise-attack.json`) so the
//! classifier can walk its objects in document order. Objects stay as raw JSON
//! maps: the exporter re-emits them verbatim, so nothing here normalizes or
//! validates fields beyond what the accessors need at the point of use.

pub mod loader;
pub mod model;

pub use loader::{BundleNotFound, load_bundle};
pub use model::{AttackObject, Bundle};
