//! Core types and trait definitions for avatar resolution.
//!
//! This crate is deliberately free of HTTP, database and hashing
//! dependencies. It defines what an avatar can be requested *for*
//! ([`subject::AvatarSubject`]), the knobs a caller can turn
//! ([`options::AvatarOptions`]), and the narrow contract the surrounding
//! platform must satisfy ([`host::HostServices`]).

pub mod error;
pub mod hooks;
pub mod host;
pub mod memory;
pub mod options;
pub mod subject;

pub use error::Suppressed;
pub use host::{HookValue, HostServices, SiteOptions};
pub use memory::MemoryHost;
