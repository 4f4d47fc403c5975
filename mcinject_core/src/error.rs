use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum InjectError {
	#[error(transparent)]
	#[diagnostic(code(mcinject::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(mcinject::config_parse),
		help("check that mcinject.toml is valid TOML")
	)]
	ConfigParse(String),

	#[error("no app secret was provided")]
	#[diagnostic(
		code(mcinject::missing_app_secret),
		help("pass `--app-secret <secret>` or set `app_secret` in mcinject.toml")
	)]
	MissingAppSecret,

	#[error("the app secret `{secret}` cannot be written into a string literal")]
	#[diagnostic(
		code(mcinject::invalid_app_secret),
		help("app secrets must not contain quotes, backslashes, semicolons or control characters")
	)]
	InvalidAppSecret { secret: String },

	#[error("there is no *.pbxproj file under `{root}`")]
	#[diagnostic(
		code(mcinject::no_project_file),
		help("run mcinject from the directory that contains your .xcodeproj")
	)]
	NoProjectFile { root: String },

	#[error("the project file `{path}` is not inside a *.xcodeproj directory")]
	#[diagnostic(code(mcinject::misplaced_project_file))]
	MisplacedProjectFile { path: String },

	#[error("there is no project files directory `{name}` next to `{name}.xcodeproj`")]
	#[diagnostic(code(mcinject::no_project_files_directory))]
	NoProjectFilesDirectory { name: String },

	#[error("there is no AppDelegate file in `{directory}`")]
	#[diagnostic(
		code(mcinject::no_app_delegate),
		help("set `[project] app_delegate` in mcinject.toml if the file has a different name")
	)]
	NoAppDelegate { directory: String },

	#[error("symlink cycle detected at: `{path}`")]
	#[diagnostic(
		code(mcinject::symlink_cycle),
		help("remove the circular symlink or exclude this path")
	)]
	SymlinkCycle { path: String },

	#[error("unsupported source file: `{path}`")]
	#[diagnostic(
		code(mcinject::unsupported_source),
		help("only Swift (.swift) and Objective-C (.m) application delegates are supported")
	)]
	UnsupportedSourceFile { path: String },

	#[error("type `{type_name}` is not defined in {file}")]
	#[diagnostic(code(mcinject::type_not_found))]
	TypeNotFound { type_name: String, file: String },

	#[error("function '{method}' is not defined in {file}")]
	#[diagnostic(
		code(mcinject::method_not_found),
		help("the start call is inserted into the first `{method}` method of the delegate")
	)]
	MethodNotFound { method: String, file: String },

	#[error("invalid pattern `{pattern}`: {reason}")]
	#[diagnostic(code(mcinject::invalid_pattern))]
	InvalidPattern { pattern: String, reason: String },
}

pub type InjectResult<T> = Result<T, InjectError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
