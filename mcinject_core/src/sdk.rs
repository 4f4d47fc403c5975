use serde::Deserialize;
use serde::Serialize;

/// The umbrella module every integration imports.
pub const CORE_MODULE: &str = "MobileCenter";
/// Class that receives the start call.
pub const START_RECEIVER: &str = "MSMobileCenter";
/// Selector of the start call.
pub const START_SELECTOR: &str = "start";

/// An optional Mobile Center service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdkModule {
	Analytics,
	Crashes,
	Distribute,
}

impl SdkModule {
	pub const ALL: [Self; 3] = [Self::Analytics, Self::Crashes, Self::Distribute];

	fn suffix(self) -> &'static str {
		match self {
			Self::Analytics => "Analytics",
			Self::Crashes => "Crashes",
			Self::Distribute => "Distribute",
		}
	}

	/// The CocoaPods subspec, e.g. `MobileCenter/MobileCenterAnalytics`.
	pub fn pod(self) -> String {
		format!("{CORE_MODULE}/{}", self.import())
	}

	/// The framework module name, e.g. `MobileCenterAnalytics`.
	pub fn import(self) -> String {
		format!("{CORE_MODULE}{}", self.suffix())
	}

	/// The service class, e.g. `MSAnalytics`.
	pub fn service_class(self) -> String {
		format!("MS{}", self.suffix())
	}
}

/// What to wire into the project: the app secret and the enabled services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkIntegration {
	app_secret: String,
	modules: Vec<SdkModule>,
}

impl SdkIntegration {
	pub fn new(app_secret: impl Into<String>, modules: impl IntoIterator<Item = SdkModule>) -> Self {
		let mut modules: Vec<_> = modules.into_iter().collect();
		modules.sort();
		modules.dedup();

		Self {
			app_secret: app_secret.into(),
			modules,
		}
	}

	pub fn app_secret(&self) -> &str {
		&self.app_secret
	}

	pub fn modules(&self) -> &[SdkModule] {
		&self.modules
	}

	/// Pod lines to add to the Podfile target.
	pub fn pods(&self) -> Vec<String> {
		self.modules.iter().map(|module| module.pod()).collect()
	}

	/// Modules to import, the umbrella module first.
	pub fn imports(&self) -> Vec<String> {
		let mut imports = vec![CORE_MODULE.to_string()];
		imports.extend(self.modules.iter().map(|module| module.import()));
		imports
	}

	pub fn swift_start_call(&self) -> String {
		let services: Vec<String> = self
			.modules
			.iter()
			.map(|module| format!("{}.self", module.service_class()))
			.collect();
		format!(
			"{START_RECEIVER}.{START_SELECTOR}(\"{}\", withServices: [{}])",
			self.app_secret,
			services.join(", ")
		)
	}

	pub fn objc_start_call(&self) -> String {
		let services: Vec<String> = self
			.modules
			.iter()
			.map(|module| format!("[{} class]", module.service_class()))
			.collect();
		format!(
			"[{START_RECEIVER} {START_SELECTOR}:@\"{}\" withServices:@[{}]];",
			self.app_secret,
			services.join(", ")
		)
	}
}

/// Every import the SDK can contribute, used when removing it again.
pub fn all_imports() -> Vec<String> {
	let mut imports = vec![CORE_MODULE.to_string()];
	imports.extend(SdkModule::ALL.iter().map(|module| module.import()));
	imports
}

/// Every pod the SDK can contribute.
pub fn all_pods() -> Vec<String> {
	SdkModule::ALL.iter().map(|module| module.pod()).collect()
}
