//! The integration pipeline.
//!
//! A run is an explicit list of [`Step`]s executed in order over a shared
//! [`StepContext`]. Steps only read from disk. Every file they want to change
//! is queued as a [`PendingWrite`], and nothing is written until the whole
//! list has succeeded and [`IntegrationPlan::apply`] is called.

use std::path::Path;
use std::path::PathBuf;
use std::time::UNIX_EPOCH;

use crate::InjectError;
use crate::InjectResult;
use crate::config::McInjectConfig;
use crate::discovery::DiscoveryOptions;
use crate::discovery::XcodeProject;
use crate::discovery::discover_project;
use crate::injection::Injector;
use crate::podfile;
use crate::sdk::SdkIntegration;
use crate::sdk::SdkModule;
use crate::sdk::all_pods;
use crate::text::LineEnding;

/// What a pipeline run does to the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
	/// Add the pods, imports and start call for the given services.
	Integrate(SdkIntegration),
	/// Take every trace of the SDK out again.
	Remove,
}

impl Operation {
	/// Build an [`Operation::Integrate`], falling back to the config for the
	/// app secret and the services when none are given. Secrets that could
	/// not be written verbatim into a Swift or Objective-C literal are rejected.
	pub fn integrate(
		app_secret: Option<String>,
		modules: Vec<SdkModule>,
		config: &McInjectConfig,
	) -> InjectResult<Self> {
		let app_secret = app_secret
			.or_else(|| config.app_secret.clone())
			.filter(|secret| !secret.trim().is_empty())
			.ok_or(InjectError::MissingAppSecret)?;
		if app_secret
			.chars()
			.any(|ch| matches!(ch, '"' | '\\' | ';') || ch.is_control())
		{
			return Err(InjectError::InvalidAppSecret { secret: app_secret });
		}
		let modules = if modules.is_empty() {
			config.modules.clone()
		} else {
			modules
		};

		Ok(Self::Integrate(SdkIntegration::new(app_secret, modules)))
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
	FindProjectPaths,
	EditPodfile,
	EditAppDelegate,
}

impl Step {
	/// The steps of a full run, in order.
	pub const ALL: [Self; 3] = [Self::FindProjectPaths, Self::EditPodfile, Self::EditAppDelegate];

	pub fn name(self) -> &'static str {
		match self {
			Self::FindProjectPaths => "find project paths",
			Self::EditPodfile => "edit Podfile",
			Self::EditAppDelegate => "edit AppDelegate",
		}
	}

	pub fn run(self, context: &mut StepContext) -> InjectResult<()> {
		tracing::debug!(step = self.name(), "running step");

		match self {
			Self::FindProjectPaths => {
				context.project()?;
			}
			Self::EditPodfile => edit_podfile(context)?,
			Self::EditAppDelegate => edit_app_delegate(context)?,
		}

		Ok(())
	}
}

/// A file write deferred until every step has succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWrite {
	pub path: PathBuf,
	/// Content on disk when the step read it, `None` for a new file.
	pub original: Option<String>,
	pub content: String,
}

impl PendingWrite {
	pub fn is_changed(&self) -> bool {
		self.original.as_deref() != Some(self.content.as_str())
	}

	fn write(&self) -> InjectResult<()> {
		let file_name = self
			.path
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_default();
		let temp_path = self.path.with_file_name(format!(
			".{file_name}.tmp-{}-{}",
			std::process::id(),
			std::time::SystemTime::now()
				.duration_since(UNIX_EPOCH)
				.map_or(0, |duration| duration.as_nanos())
		));

		std::fs::write(&temp_path, &self.content)?;
		if let Err(error) = std::fs::rename(&temp_path, &self.path) {
			let _ = std::fs::remove_file(&temp_path);
			return Err(error.into());
		}

		Ok(())
	}
}

/// State shared by the steps of one run.
#[derive(Debug)]
pub struct StepContext {
	pub root: PathBuf,
	pub operation: Operation,
	pub config: McInjectConfig,
	pub project: Option<XcodeProject>,
	pub writes: Vec<PendingWrite>,
}

impl StepContext {
	pub fn new(root: impl Into<PathBuf>, operation: Operation, config: McInjectConfig) -> Self {
		Self {
			root: root.into(),
			operation,
			config,
			project: None,
			writes: Vec::new(),
		}
	}

	/// The discovered project, searching for it on first use.
	pub fn project(&mut self) -> InjectResult<XcodeProject> {
		if let Some(project) = &self.project {
			return Ok(project.clone());
		}

		let options = DiscoveryOptions::from_config(&self.config);
		let project = discover_project(&self.root, &options)?;
		tracing::info!(
			name = %project.name,
			app_delegate = %project.app_delegate.display(),
			"found Xcode project"
		);
		self.project = Some(project.clone());
		Ok(project)
	}

	/// Run `steps` in order, stopping at the first failure.
	pub fn run(&mut self, steps: &[Step]) -> InjectResult<()> {
		for step in steps {
			step.run(self)?;
		}
		Ok(())
	}
}

fn read_optional(path: &Path) -> InjectResult<Option<String>> {
	if path.is_file() {
		Ok(Some(std::fs::read_to_string(path)?))
	} else {
		Ok(None)
	}
}

fn edit_podfile(context: &mut StepContext) -> InjectResult<()> {
	let project = context.project()?;
	let path = project.podfile();
	let original = read_optional(&path)?;

	let content = match &context.operation {
		Operation::Integrate(integration) => {
			let mut content = match &original {
				Some(content) => content.clone(),
				None => {
					tracing::info!(path = %path.display(), "creating Podfile");
					podfile::default_podfile(
						&project.name,
						&context.config.podfile.platform,
						LineEnding::default(),
					)
				}
			};
			for pod in integration.pods() {
				content = podfile::add_pod(&content, &project.name, &pod)?;
			}
			content
		}
		Operation::Remove => {
			let Some(original) = &original else {
				return Ok(());
			};
			let mut content = original.clone();
			for pod in all_pods() {
				content = podfile::remove_pod(&content, &pod)?;
			}
			content
		}
	};

	context.writes.push(PendingWrite {
		path,
		original,
		content,
	});
	Ok(())
}

fn edit_app_delegate(context: &mut StepContext) -> InjectResult<()> {
	let project = context.project()?;
	let path = project.app_delegate.clone();
	let original = std::fs::read_to_string(&path)?;
	let source_name = path
		.strip_prefix(&context.root)
		.unwrap_or(&path)
		.display()
		.to_string();

	let injector = match &context.operation {
		Operation::Integrate(integration) => Injector::for_integration(project.language, integration),
		Operation::Remove => Injector::for_removal(project.language),
	}
	.with_type_name(&context.config.project.type_name)
	.with_method_name(&context.config.project.method_name)
	.with_indent(context.config.format.indent(project.language))
	.with_source_name(source_name);

	let outcome = match &context.operation {
		Operation::Integrate(_) => injector.inject(&original)?,
		Operation::Remove => injector.remove(&original)?,
	};
	tracing::debug!(
		imports_added = outcome.imports_added.len(),
		imports_removed = outcome.imports_removed.len(),
		calls_removed = outcome.calls_removed,
		"edited application delegate"
	);

	context.writes.push(PendingWrite {
		path,
		original: Some(original),
		content: outcome.content,
	});
	Ok(())
}

/// The result of a successful run: the project and the queued writes.
#[derive(Debug, Clone)]
pub struct IntegrationPlan {
	pub project: XcodeProject,
	pub writes: Vec<PendingWrite>,
}

impl IntegrationPlan {
	/// Writes whose content differs from what is on disk.
	pub fn changed(&self) -> Vec<&PendingWrite> {
		self.writes.iter().filter(|write| write.is_changed()).collect()
	}

	pub fn is_empty(&self) -> bool {
		self.changed().is_empty()
	}

	/// Write every changed file. Returns the number of files written.
	pub fn apply(&self) -> InjectResult<usize> {
		let changed = self.changed();
		for write in &changed {
			tracing::info!(path = %write.path.display(), "writing");
			write.write()?;
		}
		Ok(changed.len())
	}
}

/// Run every step for `operation` under `root` without touching the disk.
pub fn plan(
	root: &Path,
	operation: Operation,
	config: McInjectConfig,
) -> InjectResult<IntegrationPlan> {
	let mut context = StepContext::new(root, operation, config);
	context.run(&Step::ALL)?;

	let project = context.project()?;
	Ok(IntegrationPlan {
		project,
		writes: context.writes,
	})
}
