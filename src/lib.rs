//! renderscope - static analyzer for React client/server component graphs
//!
//! Reconstructs the component render tree of each route in a Next.js
//! app-directory project without executing any code, classifies every file
//! as client- or server-rendered, and computes project-wide composition
//! statistics such as the effective client/server ratio and shared-component
//! reuse.

pub mod aggregate;
pub mod analysis;
pub mod crawl;
pub mod discovery;
pub mod graph;
pub mod observer;
pub mod resolve;
