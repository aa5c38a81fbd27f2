//! Supplier domain model.
//!
//! # Responsibility
//! - Define the validated `Supplier` entity and its summary projection.
//! - Keep every decoding path funneled through one constructor.
//!
//! # Invariants
//! - Every stored supplier is identified by a positive `SupplierId`.
//! - Invalid field values never produce a `Supplier`.

pub mod decode;
pub mod supplier;
pub mod tax_id;
