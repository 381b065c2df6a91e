//! Repository trait definitions.
//!
//! The repository layer is split by concern:
//! - [`SlotRepository`]: canonical class slots plus mirror maintenance
//! - [`RoutineRepository`]: mirror-only reads, reschedule, expiry sweep
//! - [`ReferenceRepository`]: natural-key lookups of reference data
//!
//! [`FullRepository`] combines the three for components that need the whole
//! store behind one handle.

pub mod error;
pub mod reference;
pub mod routines;
pub mod slots;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use reference::ReferenceRepository;
pub use routines::RoutineRepository;
pub use slots::SlotRepository;

/// Combined repository interface.
///
/// Blanket-implemented for any type providing all three concern traits, so
/// backends only implement the parts.
pub trait FullRepository: SlotRepository + RoutineRepository + ReferenceRepository {}

impl<T> FullRepository for T where T: SlotRepository + RoutineRepository + ReferenceRepository {}
