use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::InjectError;
use crate::InjectResult;
use crate::discovery::DEFAULT_APP_DELEGATE_NAMES;
use crate::injection::DEFAULT_METHOD_NAME;
use crate::injection::DEFAULT_TYPE_NAME;
use crate::injection::SourceLanguage;
use crate::podfile::DEFAULT_PLATFORM;
use crate::sdk::SdkModule;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["mcinject.toml", ".mcinject.toml", ".config/mcinject.toml"];

/// Contents written by `mcinject init`.
pub const SAMPLE_CONFIG: &str = r#"# The Mobile Center app secret. Can be overridden with `--app-secret`.
# app_secret = "00000000-0000-0000-0000-000000000000"

# Services to start: "analytics", "crashes", "distribute".
modules = ["analytics", "crashes"]

[project]
# Case-insensitive globs naming the application delegate file.
app_delegate = ["AppDelegate.swift", "AppDelegate.m"]
type_name = "AppDelegate"
method_name = "application"

[exclude]
patterns = []

[podfile]
platform = "8.0"
"#;

/// Configuration loaded from an `mcinject.toml` file.
///
/// ```toml
/// app_secret = "00000000-0000-0000-0000-000000000000"
/// modules = ["analytics", "crashes"]
/// disable_gitignore = false
///
/// [project]
/// app_delegate = ["AppDelegate.swift", "AppDelegate.m"]
/// type_name = "AppDelegate"
/// method_name = "application"
///
/// [exclude]
/// patterns = ["Vendor/"]
///
/// [podfile]
/// platform = "9.0"
///
/// [format]
/// swift_indent = "        "
/// objc_indent = "    "
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct McInjectConfig {
	/// App secret used when none is given on the command line.
	#[serde(default)]
	pub app_secret: Option<String>,
	/// Services started when none are selected on the command line.
	#[serde(default)]
	pub modules: Vec<SdkModule>,
	/// Where to find the application delegate and what to look for in it.
	#[serde(default)]
	pub project: ProjectConfig,
	/// Exclusion configuration using gitignore-style patterns.
	#[serde(default)]
	pub exclude: ExcludeConfig,
	#[serde(default)]
	pub podfile: PodfileConfig,
	/// Indentation of the inserted start call.
	#[serde(default)]
	pub format: FormatConfig,
	/// When true, `.gitignore` files are not used for filtering during
	/// project discovery.
	#[serde(default)]
	pub disable_gitignore: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectConfig {
	pub app_delegate: Vec<String>,
	pub type_name: String,
	pub method_name: String,
}

impl Default for ProjectConfig {
	fn default() -> Self {
		Self {
			app_delegate: DEFAULT_APP_DELEGATE_NAMES
				.iter()
				.map(ToString::to_string)
				.collect(),
			type_name: DEFAULT_TYPE_NAME.to_string(),
			method_name: DEFAULT_METHOD_NAME.to_string(),
		}
	}
}

/// Exclusion configuration.
///
/// Patterns use gitignore-style syntax and are applied during project
/// discovery on top of the root `.gitignore`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ExcludeConfig {
	#[serde(default)]
	pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PodfileConfig {
	/// iOS deployment target written when a Podfile has to be created.
	pub platform: String,
}

impl Default for PodfileConfig {
	fn default() -> Self {
		Self {
			platform: DEFAULT_PLATFORM.to_string(),
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FormatConfig {
	pub swift_indent: Option<String>,
	pub objc_indent: Option<String>,
}

impl FormatConfig {
	/// The configured indentation for `language`, or its default.
	pub fn indent(&self, language: SourceLanguage) -> &str {
		let configured = match language {
			SourceLanguage::Swift => self.swift_indent.as_deref(),
			SourceLanguage::ObjectiveC => self.objc_indent.as_deref(),
		};
		configured.unwrap_or_else(|| language.default_indent())
	}
}

impl McInjectConfig {
	/// Resolve the config file path at `root` using supported candidate names.
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if the file does not exist.
	pub fn load(root: &Path) -> InjectResult<Option<McInjectConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		tracing::debug!(path = %config_path.display(), "loading config");
		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::parse(&content)?;

		Ok(Some(config))
	}

	pub fn parse(content: &str) -> InjectResult<McInjectConfig> {
		toml::from_str(content).map_err(|e| InjectError::ConfigParse(e.to_string()))
	}
}
