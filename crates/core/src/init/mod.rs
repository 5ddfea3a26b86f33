//! Project initialization.
//!
//! Generates a `.maki/` directory with ready-to-edit templates for:
//! - Global configuration (`config.toml`)
//! - Agent definitions (`agents/*.md`)
//! - Workflows (`workflows/*.yaml`)
//!
//! # Example
//!
//! ```no_run
//! use mk_core::init::{generate_maki_structure, InitOptions};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = InitOptions {
//!     target_dir: PathBuf::from("."),
//!     force: false,
//!     minimal: false,
//! };
//!
//! generate_maki_structure(options).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod generator;
pub mod templates;

pub use error::{InitError, InitResult};
pub use generator::{generate_maki_structure, InitOptions};
pub use templates::{get_template, list_templates};
