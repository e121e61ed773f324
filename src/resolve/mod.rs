//! Import specifier resolution support: tsconfig parsing and path aliases.
//!
//! Both halves are pure; hosts wire them to the filesystem.

pub mod path_alias;
pub mod tsconfig;

pub use path_alias::AliasResolver;
pub use tsconfig::{CompilerOptions, Tsconfig};
