//! `mcinject_core` is the engine behind `mcinject`, a tool that wires the
//! Mobile Center SDK into an existing iOS application. It finds the Xcode
//! project, adds the SDK pods to the `Podfile`, and inserts the imports and
//! the `MSMobileCenter.start(…)` call into the application delegate without
//! parsing Swift or Objective-C.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Project directory
//!   -> Discovery (breadth-first walk, .xcodeproj, project files directory, AppDelegate)
//!   -> Podfile editor (pod lines inside the target block)
//!   -> Injector (one TextWalker pass collects anchors, edits are spliced in)
//!   -> IntegrationPlan (pending writes, applied only after every step succeeded)
//! ```
//!
//! ## Modules
//!
//! - [`walker`]: the lexical scanner. It tracks comments, string literals and
//!   brace depth, and runs caller-registered traps at every position.
//! - [`injection`]: Swift and Objective-C trap sets built on the walker.
//! - [`podfile`]: CocoaPods `Podfile` editing.
//! - [`discovery`]: locating the project, its sources and the delegate file.
//! - [`pipeline`]: the ordered steps and the deferred write queue.
//! - [`config`]: loading `mcinject.toml`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use mcinject_core::McInjectConfig;
//! use mcinject_core::Operation;
//! use mcinject_core::SdkModule;
//! use mcinject_core::plan;
//!
//! let root = Path::new(".");
//! let config = McInjectConfig::load(root).unwrap().unwrap_or_default();
//! let operation = Operation::integrate(
//!     Some("my-app-secret".into()),
//!     vec![SdkModule::Analytics, SdkModule::Crashes],
//!     &config,
//! )
//! .unwrap();
//!
//! let plan = plan(root, operation, config).unwrap();
//! plan.apply().unwrap();
//! ```

pub use config::*;
pub use discovery::*;
pub use error::*;
pub use injection::*;
pub use pipeline::*;
pub use sdk::*;
pub use text::*;
pub use walker::*;

pub mod config;
pub mod discovery;
#[allow(unused_assignments)]
mod error;
pub mod injection;
pub mod pipeline;
pub mod podfile;
mod sdk;
mod text;
pub mod walker;

#[cfg(test)]
mod __fixtures;
