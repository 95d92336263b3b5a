//! # LinkVault Core
//!
//! Foundational types shared by every LinkVault crate:
//!
//! - [`errors`]: the [`AppError`] type and its HTTP response conversion
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use linkvault_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("longenough1")?;
//! if !verify_password("longenough1", &hash)? {
//!     return Err(AppError::unauthorized("Invalid email or password"));
//! }
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use password::{hash_password, verify_password};
