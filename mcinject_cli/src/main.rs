use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use mcinject_cli::Commands;
use mcinject_cli::InfoOutputFormat;
use mcinject_cli::McInjectCli;
use mcinject_core::CONFIG_FILE_CANDIDATES;
use mcinject_core::DiscoveryOptions;
use mcinject_core::IntegrationPlan;
use mcinject_core::McInjectConfig;
use mcinject_core::Operation;
use mcinject_core::SAMPLE_CONFIG;
use mcinject_core::discover_project;
use mcinject_core::plan;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = McInjectCli::parse();

	// Respect NO_COLOR env var, --no-color flag, and non-terminal output.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(supports_color::Stream::Stdout).is_some();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Init) => run_init(&args),
		Some(
			command @ Commands::Integrate {
				app_secret,
				dry_run,
				diff,
				..
			},
		) => {
			run_integrate(
				&args,
				app_secret.clone(),
				command.selected_modules(),
				*dry_run,
				*diff,
			)
		}
		Some(Commands::Remove { dry_run, diff }) => run_remove(&args, *dry_run, *diff),
		Some(Commands::Info { format }) => run_info(&args, *format),
		None => {
			eprintln!("No subcommand specified. Run `mcinject --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<mcinject_core::InjectError>() {
			Ok(inject_err) => {
				let report: miette::Report = (*inject_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// `--verbose` shows the core's debug events, otherwise `RUST_LOG` decides
/// and only warnings are printed by default.
fn init_tracing(verbose: bool, use_color: bool) {
	let filter = if verbose {
		EnvFilter::new("mcinject_core=debug")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
	};

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.try_init();
}

fn resolve_root(args: &McInjectCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn load_config(root: &Path) -> Result<McInjectConfig, Box<dyn std::error::Error>> {
	Ok(McInjectConfig::load(root)?.unwrap_or_default())
}

fn print_section(title: &str) {
	println!();
	println!("{}", colored!(title, bold));
}

fn print_field(label: &str, value: impl std::fmt::Display) {
	println!("{label:<20} {value}");
}

fn run_init(args: &McInjectCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);

	if let Some(existing) = McInjectConfig::resolve_path(&root) {
		println!("Config file already exists: {}", existing.display());
		return Ok(());
	}

	let config_path = root.join(CONFIG_FILE_CANDIDATES[0]);
	std::fs::write(&config_path, SAMPLE_CONFIG)?;
	println!("Created {}", config_path.display());

	println!();
	println!("Next steps:");
	println!("  1. Set `app_secret` and `modules` in {}", CONFIG_FILE_CANDIDATES[0]);
	println!("  2. Run `mcinject integrate` to add the SDK");
	println!("  3. Run `pod install` to fetch the pods");

	Ok(())
}

fn run_integrate(
	args: &McInjectCli,
	app_secret: Option<String>,
	modules: Vec<mcinject_core::SdkModule>,
	dry_run: bool,
	diff: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = load_config(&root)?;
	let operation = Operation::integrate(app_secret, modules, &config)?;
	let plan = plan(&root, operation, config)?;

	finish(args, &plan, &root, dry_run, diff)
}

fn run_remove(
	args: &McInjectCli,
	dry_run: bool,
	diff: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = load_config(&root)?;
	let plan = plan(&root, Operation::Remove, config)?;

	finish(args, &plan, &root, dry_run, diff)
}

fn finish(
	args: &McInjectCli,
	plan: &IntegrationPlan,
	root: &Path,
	dry_run: bool,
	diff: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let changed = plan.changed();

	if changed.is_empty() {
		println!(
			"Project {} is already up to date.",
			colored!(plan.project.name, bold)
		);
		return Ok(());
	}

	if diff {
		for write in &changed {
			eprintln!("{}", colored!(make_relative(&write.path, root), bold));
			print_diff(write.original.as_deref().unwrap_or_default(), &write.content);
		}
	}

	if dry_run {
		println!("Dry run: would update {} file(s):", changed.len());
		for write in &changed {
			println!("  {}", make_relative(&write.path, root));
		}
		return Ok(());
	}

	let written = plan.apply()?;
	println!(
		"{} {written} file(s) in project {}.",
		colored!("Updated", green),
		plan.project.name
	);

	if args.verbose || diff {
		for write in &changed {
			println!("  {}", make_relative(&write.path, root));
		}
	}

	Ok(())
}

fn run_info(args: &McInjectCli, format: InfoOutputFormat) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = load_config(&root)?;
	let config_path = McInjectConfig::resolve_path(&root);
	let project = discover_project(&root, &DiscoveryOptions::from_config(&config))?;
	let podfile = project.podfile();

	match format {
		InfoOutputFormat::Json => {
			let output = serde_json::json!({
				"config": config_path.as_deref().map(|path| make_relative(path, &root)),
				"project": project,
				"podfile_exists": podfile.is_file(),
			});
			println!("{}", serde_json::to_string_pretty(&output)?);
		}
		InfoOutputFormat::Text => {
			print_section("Config");
			print_field(
				"File",
				config_path
					.as_deref()
					.map_or_else(|| "(none)".to_string(), |path| make_relative(path, &root)),
			);

			print_section("Project");
			print_field("Name", &project.name);
			print_field("Project file", make_relative(&project.project_file, &root));
			print_field("Files directory", make_relative(&project.files_dir, &root));
			print_field("App delegate", make_relative(&project.app_delegate, &root));
			print_field(
				"Language",
				match project.language {
					mcinject_core::SourceLanguage::Swift => "Swift",
					mcinject_core::SourceLanguage::ObjectiveC => "Objective-C",
				},
			);
			print_field(
				"Podfile",
				if podfile.is_file() {
					make_relative(&podfile, &root)
				} else {
					"(will be created)".to_string()
				},
			);
		}
	}

	Ok(())
}

/// Print a unified diff between two strings, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
}

/// Make a path relative to root for display purposes.
fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
