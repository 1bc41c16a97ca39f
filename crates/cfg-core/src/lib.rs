//! Configuration source resolution for cfgsource
//!
//! Turns a single locator string (local path, HTTP(S) URL, or git
//! repository reference) into a [`ConfigDocument`]:
//!
//! - [`locator`] classifies the locator
//! - [`derive`] rewrites web URLs into raw-file and clonable forms
//! - [`resolver`] picks a strategy and runs it with fallback
//! - [`workspace`] owns the temporary clone directory
//! - [`loader`] layers defaults and validation on top
//!
//! # Example
//!
//! ```ignore
//! use cfg_core::{ResolveRequest, SourceResolver, SourceSettings};
//!
//! let resolver = SourceResolver::new(SourceSettings::from_env()?)?;
//! let request = ResolveRequest::new("https://github.com/acme/widgets/blob/main/init.yaml");
//! if let Some(document) = resolver.resolve(&request) {
//!     println!("{:?}", document.get("project.name"));
//! }
//! ```

pub mod derive;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod locator;
pub mod resolver;
pub mod settings;
pub mod workspace;

pub use cfg_fs::{ConfigDocument, Mapping, Value};
pub use error::{Error, Result};
pub use fetch::{HttpFetcher, ReqwestFetcher};
pub use locator::Locator;
pub use resolver::{DEFAULT_BRANCH, ResolveRequest, SourceResolver, Strategy, plan};
pub use settings::SourceSettings;
pub use workspace::ClonedWorkspace;
