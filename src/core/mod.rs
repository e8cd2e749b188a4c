//! Core types shared across the installer.

pub mod error;

pub use error::{
    ErrorContext, InstallerError, MutationError, RestoreStatus, user_friendly_error,
};
