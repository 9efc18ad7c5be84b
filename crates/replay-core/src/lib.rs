//! Replay of captured HTTP requests.
//!
//! A captured request becomes a [`RequestBaseline`]. At runtime the baseline
//! and a set of [`Overrides`] produce an [`EffectiveRequest`], which is sent
//! exactly once and whose response can be printed in raw form.
//!
//! - [`capture`]: load captures from JSON, YAML or raw HTTP text
//! - [`effective`]: header add / remove / body-replace passes
//! - [`render`]: raw request and response text
//! - [`dispatch`]: the single outbound request
//! - [`script`]: flag parsing and run loop of generated programs
//! - [`template`]: rendering a baseline into a standalone Cargo project
//!
//! # Quick Start
//!
//! ```no_run
//! use replay_core::{script, RequestBaseline, ReplayFlags};
//!
//! # async fn example() -> replay_core::ReplayResult<()> {
//! let baseline = RequestBaseline::new("example.com", "/api", "GET")
//!     .with_header("Host", "example.com")
//!     .with_header("Accept", "*/*");
//!
//! let flags = ReplayFlags {
//!     headers: vec!["X-Test: 1".to_string()],
//!     print_request: true,
//!     ..Default::default()
//! };
//! script::run(&baseline, &flags, &mut std::io::stdout()).await?;
//! # Ok(())
//! # }
//! ```

pub mod baseline;
pub mod capture;
pub mod dispatch;
pub mod effective;
pub mod error;
pub mod headers;
pub mod render;
pub mod script;
pub mod template;

pub use baseline::RequestBaseline;
pub use capture::{load_baseline, CapturedRequest};
pub use dispatch::{Dispatcher, ReplayResponse};
pub use effective::{EffectiveRequest, Overrides};
pub use error::{ReplayError, ReplayResult};
pub use headers::{parse_header_arg, Header, HeaderList};
pub use script::ReplayFlags;
pub use template::{CoreDependency, GenerateConfig, GeneratedProject};
