pub mod controller;
pub mod modal;

pub use controller::{ActionController, Enrichment, Services};
pub use modal::{Modal, PointerTarget};
