//! Request and response models for the bfhl service.

pub mod envelope;
pub mod operation;

pub use envelope::Envelope;
pub use operation::{Operation, OperationKind, OperationOutput};
