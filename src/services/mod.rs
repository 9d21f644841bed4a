//! Business operations behind the HTTP handlers.
//!
//! Each service receives its stores and collaborators at construction; the
//! handlers only translate between HTTP and these calls.

pub mod accounts;
pub mod profile;
pub mod tasks;

pub use accounts::{AccountService, LoginOutcome};
pub use profile::{ImageUpload, ProfileService};
pub use tasks::TaskService;
