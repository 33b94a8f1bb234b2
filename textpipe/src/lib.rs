//! # Textpipe
//!
//! A configurable text-transformation pipeline for post-processing
//! extracted or OCR'd text.
//!
//! A pipeline is an ordered, named sequence of parameterized tools applied
//! to one input string. Four tools ship with the crate:
//!
//! - **TrimWhitespace**: per-line leading/trailing whitespace removal
//! - **RegexReplace**: ordered, composing regex substitution rules
//! - **FullwidthToHalfwidth**: full-width to half-width character normalization
//! - **MergeSplitLines**: reflow of forcibly wrapped lines via width-similarity
//!   clustering
//!
//! ## Quick Start
//!
//! ```rust
//! use textpipe::prelude::*;
//!
//! let registry = ToolRegistry::new();
//! register_defaults(&registry);
//!
//! let catalog = PipelineCatalog::default();
//! let executor = PipelineExecutor::new(&registry, &catalog);
//!
//! let mut ctx = ExecutionContext::new();
//! let result = executor.execute("basic-cleanup", "  hello  \n  world  ", &mut ctx);
//!
//! assert!(result.success);
//! assert_eq!(result.output, "hello\nworld");
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc
)]

pub mod catalog;
pub mod context;
pub mod errors;
pub mod executor;
pub mod observability;
pub mod tools;


/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::catalog::{Pipeline, PipelineCatalog, PipelineStep};
    pub use crate::context::{ExecutionContext, MeasureTextFn};
    pub use crate::errors::{ExecuteError, ToolError};
    pub use crate::executor::{PipelineExecutor, PipelineResult};
    pub use crate::tools::{
        register_defaults, FullwidthToHalfwidth, MergeSplitLines, ParamMap,
        RegexReplace, Tool, ToolParameter, ToolRegistry, TrimWhitespace,
    };
}
