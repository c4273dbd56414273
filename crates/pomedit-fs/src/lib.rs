//! Filesystem abstraction for pomedit.
//!
//! This crate provides a `FileSystem` trait with a native implementation
//! (using `std::fs`) and an in-memory one for tests and embedding.
//!
//! # Example
//!
//! ```no_run
//! use pomedit_fs::{FileSystem, NativeFileSystem};
//! use std::path::Path;
//!
//! # fn main() -> std::io::Result<()> {
//! let fs = NativeFileSystem::new(".")?;
//! let contents = fs.read_to_string(Path::new("pom.xml"))?;
//! println!("{}", contents);
//! # Ok(())
//! # }
//! ```

mod file_system;
pub use file_system::FileSystem;

#[cfg(feature = "native")]
pub mod native;
#[cfg(feature = "native")]
pub use native::NativeFileSystem;

#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "memory")]
pub use memory::MemoryFileSystem;

