//! Renders a baseline into a standalone replay program.
//!
//! The output is a small Cargo project whose `main.rs` embeds the captured
//! values as literals and hands them to [`crate::script::main_with_baseline`].
//! Nothing is read from the environment or from disk when the program runs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::baseline::RequestBaseline;
use crate::error::{ReplayError, ReplayResult};

pub const MAIN_RS_TEMPLATE: &str = r#"//! __DESCRIPTION__
//!
//! Generated by efin-replay. Run with `--help` to list the override flags.

use std::process::ExitCode;

use replay_core::RequestBaseline;

fn baseline() -> RequestBaseline {
__BASELINE__
}

fn main() -> ExitCode {
    replay_core::script::main_with_baseline(baseline())
}
"#;

pub const CARGO_TOML_TEMPLATE: &str = r#"[package]
name = "__NAME__"
version = "0.1.0"
edition = "2021"
publish = false

[dependencies]
replay-core = __CORE_DEPENDENCY__
"#;

/// Where the generated project gets `replay-core` from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoreDependency {
    /// Registry version requirement.
    Version(String),
    /// Local checkout of the `replay-core` crate.
    Path(PathBuf),
}

impl Default for CoreDependency {
    fn default() -> Self {
        Self::Version(env!("CARGO_PKG_VERSION").to_string())
    }
}

/// Script generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Cargo package (and binary) name of the generated program.
    #[serde(default = "default_script_name")]
    pub name: String,

    #[serde(default)]
    pub core_dependency: CoreDependency,

    /// Overwrite existing files.
    #[serde(default)]
    pub force: bool,
}

fn default_script_name() -> String {
    "make_request".to_string()
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            name: default_script_name(),
            core_dependency: CoreDependency::default(),
            force: false,
        }
    }
}

impl GenerateConfig {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_core_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.core_dependency = CoreDependency::Path(path.into());
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// Paths written by [`write_project`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedProject {
    pub manifest_path: PathBuf,
    pub main_path: PathBuf,
}

/// Render `src/main.rs` for `baseline`.
pub fn render_main_rs(baseline: &RequestBaseline) -> String {
    let description = format!(
        "Make a {} request to {}",
        baseline.method.escape_debug(),
        baseline.url().escape_debug()
    );

    let mut code = format!(
        "    RequestBaseline::new({:?}, {:?}, {:?})",
        baseline.host, baseline.url_path, baseline.method
    );
    for header in &baseline.headers {
        code.push_str(&format!(
            "\n        .with_header({:?}, {:?})",
            header.name, header.value
        ));
    }
    if !baseline.body.is_empty() {
        code.push_str(&format!(
            "\n        .with_body(b\"{}\".to_vec())",
            baseline.body.escape_ascii()
        ));
    }

    MAIN_RS_TEMPLATE
        .replace("__DESCRIPTION__", &description)
        .replace("__BASELINE__", &code)
}

/// Render the generated project's `Cargo.toml`.
pub fn render_cargo_toml(config: &GenerateConfig) -> ReplayResult<String> {
    validate_name(&config.name)?;

    let dependency = match &config.core_dependency {
        CoreDependency::Version(version) => format!("{:?}", version),
        CoreDependency::Path(path) => {
            let path = path.to_string_lossy();
            if path.contains(['\'', '\n', '\r']) {
                return Err(ReplayError::Generate {
                    message: format!("core path {:?} cannot be written to Cargo.toml", path),
                });
            }
            format!("{{ path = '{}' }}", path)
        }
    };

    Ok(CARGO_TOML_TEMPLATE
        .replace("__NAME__", &config.name)
        .replace("__CORE_DEPENDENCY__", &dependency))
}

/// Write `Cargo.toml` and `src/main.rs` under `out_dir`.
pub fn write_project(
    baseline: &RequestBaseline,
    config: &GenerateConfig,
    out_dir: &Path,
) -> ReplayResult<GeneratedProject> {
    let manifest = render_cargo_toml(config)?;
    let main = render_main_rs(baseline);

    let project = GeneratedProject {
        manifest_path: out_dir.join("Cargo.toml"),
        main_path: out_dir.join("src").join("main.rs"),
    };

    if !config.force {
        for path in [&project.manifest_path, &project.main_path] {
            if path.exists() {
                return Err(ReplayError::Generate {
                    message: format!("{} already exists (use --force to overwrite)", path.display()),
                });
            }
        }
    }

    fs::create_dir_all(out_dir.join("src"))?;
    fs::write(&project.manifest_path, manifest)?;
    fs::write(&project.main_path, main)?;

    info!(dir = %out_dir.display(), name = %config.name, "generated replay program");
    Ok(project)
}

fn validate_name(name: &str) -> ReplayResult<()> {
    let valid = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ReplayError::Generate {
            message: format!("invalid package name {:?}", name),
        })
    }
}
