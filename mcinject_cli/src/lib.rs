use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use mcinject_core::SdkModule;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Wire the Mobile Center SDK into an existing iOS project.",
	long_about = "mcinject finds the Xcode project in a directory, adds the Mobile Center pods to \
	              the Podfile, and inserts the imports and the MSMobileCenter.start call into the \
	              application delegate. Running it again is safe: existing start calls are \
	              replaced and present pods and imports are kept.\n\nQuick start:\n  mcinject \
	              init                             Create mcinject.toml\n  mcinject integrate -s \
	              <secret> --analytics  Add the SDK\n  mcinject remove                    Take \
	              it out again\n  mcinject info                      Show what was discovered"
)]
pub struct McInjectCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the directory containing the Xcode project.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Create a sample `mcinject.toml` in the project directory.
	///
	/// If a config file already exists, this command is a no-op and exits
	/// successfully.
	Init,
	/// Add the SDK pods, imports and start call to the project.
	///
	/// Services that are not selected with flags are taken from the
	/// `modules` list in `mcinject.toml`. An existing start call is replaced
	/// with the new one.
	Integrate {
		/// The app secret passed to `MSMobileCenter.start`. Falls back to
		/// `app_secret` in `mcinject.toml`.
		#[arg(long, short = 's')]
		app_secret: Option<String>,

		/// Start the Analytics service.
		#[arg(long, default_value_t = false)]
		analytics: bool,

		/// Start the Crashes service.
		#[arg(long, default_value_t = false)]
		crashes: bool,

		/// Start the Distribute service.
		#[arg(long, default_value_t = false)]
		distribute: bool,

		/// Print which files would change without writing them.
		#[arg(long, default_value_t = false)]
		dry_run: bool,

		/// Show a unified diff of every changed file.
		#[arg(long, default_value_t = false)]
		diff: bool,
	},
	/// Remove the SDK pods, imports and start call from the project.
	Remove {
		/// Print which files would change without writing them.
		#[arg(long, default_value_t = false)]
		dry_run: bool,

		/// Show a unified diff of every changed file.
		#[arg(long, default_value_t = false)]
		diff: bool,
	},
	/// Print the discovered project paths and the delegate language.
	Info {
		/// Output format for info results. Use `text` for human-readable
		/// output or `json` for programmatic consumption.
		#[arg(long, value_enum, default_value_t = InfoOutputFormat::Text)]
		format: InfoOutputFormat,
	},
}

impl Commands {
	/// Services selected with `--analytics`, `--crashes` and `--distribute`.
	pub fn selected_modules(&self) -> Vec<SdkModule> {
		let Self::Integrate {
			analytics,
			crashes,
			distribute,
			..
		} = self
		else {
			return Vec::new();
		};

		[
			(*analytics, SdkModule::Analytics),
			(*crashes, SdkModule::Crashes),
			(*distribute, SdkModule::Distribute),
		]
		.into_iter()
		.filter_map(|(selected, module)| selected.then_some(module))
		.collect()
	}
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum InfoOutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
