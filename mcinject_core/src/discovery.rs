use std::collections::HashSet;
use std::collections::VecDeque;
use std::path::Path;
use std::path::PathBuf;

use globset::GlobBuilder;
use globset::GlobSet;
use globset::GlobSetBuilder;
use ignore::gitignore::Gitignore;
use ignore::gitignore::GitignoreBuilder;
use serde::Serialize;

use crate::InjectError;
use crate::InjectResult;
use crate::config::McInjectConfig;
use crate::injection::SourceLanguage;

/// File names searched for in the project files directory when nothing is
/// configured.
pub const DEFAULT_APP_DELEGATE_NAMES: [&str; 2] = ["AppDelegate.swift", "AppDelegate.m"];

const PROJECT_FILE_EXTENSION: &str = "pbxproj";
const PROJECT_DIR_EXTENSION: &str = "xcodeproj";
const PODFILE_NAME: &str = "Podfile";

/// Options for controlling how a project tree is searched.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
	/// Gitignore-style patterns to skip.
	pub exclude_patterns: Vec<String>,
	/// Whether to disable `.gitignore` integration.
	pub disable_gitignore: bool,
	/// Case-insensitive globs naming the application delegate file.
	pub app_delegate_names: Vec<String>,
}

impl Default for DiscoveryOptions {
	fn default() -> Self {
		Self {
			exclude_patterns: Vec::new(),
			disable_gitignore: false,
			app_delegate_names: DEFAULT_APP_DELEGATE_NAMES
				.iter()
				.map(ToString::to_string)
				.collect(),
		}
	}
}

impl DiscoveryOptions {
	pub fn from_config(config: &McInjectConfig) -> Self {
		Self {
			exclude_patterns: config.exclude.patterns.clone(),
			disable_gitignore: config.disable_gitignore,
			app_delegate_names: config.project.app_delegate.clone(),
		}
	}
}

/// Paths that make up an Xcode project on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XcodeProject {
	/// Project name, taken from `<name>.xcodeproj`.
	pub name: String,
	/// The `project.pbxproj` file.
	pub project_file: PathBuf,
	/// Directory holding the `.xcodeproj`, the `Podfile` and the sources.
	pub root_dir: PathBuf,
	/// The `<root>/<name>` directory with the application sources.
	pub files_dir: PathBuf,
	pub app_delegate: PathBuf,
	pub language: SourceLanguage,
}

impl XcodeProject {
	pub fn podfile(&self) -> PathBuf {
		self.root_dir.join(PODFILE_NAME)
	}
}

/// Locate the Xcode project below `root`.
pub fn discover_project(root: &Path, options: &DiscoveryOptions) -> InjectResult<XcodeProject> {
	let gitignore = if options.disable_gitignore {
		Gitignore::empty()
	} else {
		build_gitignore(root)
	};
	let exclude = build_exclude_matcher(root, &options.exclude_patterns)?;
	let walker = TreeWalker {
		gitignore: &gitignore,
		exclude: &exclude,
	};

	let Some(project_file) = walker.find_first(root, |path| {
		path.extension()
			.is_some_and(|ext| ext == PROJECT_FILE_EXTENSION)
	})?
	else {
		return Err(InjectError::NoProjectFile {
			root: root.display().to_string(),
		});
	};
	tracing::debug!(path = %project_file.display(), "found project file");

	let misplaced = || {
		InjectError::MisplacedProjectFile {
			path: project_file.display().to_string(),
		}
	};
	let project_dir = project_file.parent().ok_or_else(misplaced)?;
	if project_dir
		.extension()
		.is_none_or(|ext| ext != PROJECT_DIR_EXTENSION)
	{
		return Err(misplaced());
	}
	let name = project_dir
		.file_stem()
		.and_then(|stem| stem.to_str())
		.ok_or_else(misplaced)?
		.to_string();
	let root_dir = project_dir.parent().ok_or_else(misplaced)?.to_path_buf();

	let files_dir = root_dir.join(&name);
	if !files_dir.is_dir() {
		return Err(InjectError::NoProjectFilesDirectory { name });
	}

	let app_delegate_names = build_name_matcher(&options.app_delegate_names)?;
	let app_delegate = walker
		.find_first(&files_dir, |path| {
			path.file_name()
				.is_some_and(|file_name| app_delegate_names.is_match(file_name))
		})?
		.ok_or_else(|| {
			InjectError::NoAppDelegate {
				directory: files_dir.display().to_string(),
			}
		})?;
	tracing::debug!(path = %app_delegate.display(), "found application delegate");

	let language = SourceLanguage::from_path(&app_delegate).ok_or_else(|| {
		InjectError::UnsupportedSourceFile {
			path: app_delegate.display().to_string(),
		}
	})?;

	Ok(XcodeProject {
		name,
		project_file,
		root_dir,
		files_dir,
		app_delegate,
		language,
	})
}

struct TreeWalker<'a> {
	gitignore: &'a Gitignore,
	exclude: &'a Gitignore,
}

impl TreeWalker<'_> {
	/// Breadth-first search for the first file accepted by `matches`. All
	/// entries of a directory are checked before any of its subdirectories is
	/// entered, and entries are visited in sorted order.
	fn find_first(
		&self,
		start: &Path,
		matches: impl Fn(&Path) -> bool,
	) -> InjectResult<Option<PathBuf>> {
		let mut queue = VecDeque::from([(start.to_path_buf(), Vec::<PathBuf>::new())]);
		let mut visited_dirs = HashSet::new();

		while let Some((dir, ancestors)) = queue.pop_front() {
			// A directory that resolves to one of its own ancestors is a cycle.
			// Reaching it again through an unrelated path is not.
			let canonical = dir.canonicalize().unwrap_or_else(|_| dir.clone());
			if ancestors.contains(&canonical) {
				return Err(InjectError::SymlinkCycle {
					path: dir.display().to_string(),
				});
			}
			if !visited_dirs.insert(canonical.clone()) {
				tracing::debug!(path = %dir.display(), "skipping already visited directory");
				continue;
			}

			let mut entries = std::fs::read_dir(&dir)?
				.map(|entry| entry.map(|entry| entry.path()))
				.collect::<Result<Vec<_>, _>>()?;
			entries.sort();

			let mut subdirs = Vec::new();
			for path in entries {
				let is_dir = path.is_dir();
				if self.is_skipped(&path, is_dir) {
					continue;
				}
				if is_dir {
					subdirs.push(path);
				} else if matches(&path) {
					return Ok(Some(path));
				}
			}

			let mut lineage = ancestors;
			lineage.push(canonical);
			queue.extend(subdirs.into_iter().map(|subdir| (subdir, lineage.clone())));
		}

		Ok(None)
	}

	fn is_skipped(&self, path: &Path, is_dir: bool) -> bool {
		if is_dir
			&& path
				.file_name()
				.and_then(|name| name.to_str())
				.is_some_and(is_ignored_directory_name)
		{
			return true;
		}

		self.gitignore.matched(path, is_dir).is_ignore()
			|| self.exclude.matched(path, is_dir).is_ignore()
	}
}

/// Hidden directories and dependency or build output folders never hold the
/// user's project.
fn is_ignored_directory_name(name: &str) -> bool {
	name.starts_with('.')
		|| matches!(
			name,
			"Pods" | "Carthage" | "DerivedData" | "build" | "node_modules"
		)
}

/// Build a case-insensitive `GlobSet` matching file names.
fn build_name_matcher(patterns: &[String]) -> InjectResult<GlobSet> {
	let mut builder = GlobSetBuilder::new();
	for pattern in patterns {
		let glob = GlobBuilder::new(pattern)
			.case_insensitive(true)
			.literal_separator(true)
			.build()
			.map_err(|e| {
				InjectError::InvalidPattern {
					pattern: pattern.clone(),
					reason: e.to_string(),
				}
			})?;
		builder.add(glob);
	}
	builder.build().map_err(|e| {
		InjectError::InvalidPattern {
			pattern: patterns.join(", "),
			reason: e.to_string(),
		}
	})
}

/// Build a `Gitignore` matcher from exclude patterns specified in
/// `mcinject.toml` `[exclude]`.
fn build_exclude_matcher(root: &Path, patterns: &[String]) -> InjectResult<Gitignore> {
	let mut builder = GitignoreBuilder::new(root);
	for pattern in patterns {
		builder.add_line(None, pattern).map_err(|e| {
			InjectError::ConfigParse(format!("invalid exclude pattern `{pattern}`: {e}"))
		})?;
	}
	builder
		.build()
		.map_err(|e| InjectError::ConfigParse(format!("failed to build exclude rules: {e}")))
}

/// Build a `Gitignore` matcher from the project's `.gitignore` file (if any).
fn build_gitignore(root: &Path) -> Gitignore {
	let mut builder = GitignoreBuilder::new(root);
	let gitignore_path = root.join(".gitignore");
	if gitignore_path.exists() {
		let _ = builder.add(gitignore_path);
	}
	builder.build().unwrap_or_else(|_| Gitignore::empty())
}
