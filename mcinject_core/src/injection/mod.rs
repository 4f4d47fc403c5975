//! Injection rule sets for application delegates.
//!
//! Each language module builds a [`TextWalker`](crate::walker::TextWalker)
//! over the delegate source, registers its traps, and reports [`Anchors`]:
//! byte offsets of the import block end, the target method body, and any
//! start call that is already there. [`Injector`] turns those anchors into
//! edits against the original text, so a single walk is enough per file.

use std::ops::Range;
use std::path::Path;

use regex::Regex;
use serde::Serialize;

use crate::InjectError;
use crate::InjectResult;
use crate::sdk::SdkIntegration;
use crate::sdk::START_RECEIVER;
use crate::sdk::START_SELECTOR;
use crate::sdk::all_imports;
use crate::text::Edit;
use crate::text::LineEnding;
use crate::text::apply_edits;
use crate::walker::ScanState;

pub(crate) mod objc;
pub(crate) mod swift;

/// Default name of the delegate type.
pub const DEFAULT_TYPE_NAME: &str = "AppDelegate";
/// Default name of the method that receives the start call.
pub const DEFAULT_METHOD_NAME: &str = "application";
/// Overloads of the target method mentioning this label are preferred.
pub(crate) const PREFERRED_LABEL: &str = "didFinishLaunchingWithOptions";

/// Language of an application delegate source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceLanguage {
	Swift,
	ObjectiveC,
}

impl SourceLanguage {
	pub fn from_path(path: &Path) -> Option<Self> {
		let ext = path.extension()?.to_str()?.to_ascii_lowercase();
		match ext.as_str() {
			"swift" => Some(Self::Swift),
			"m" | "mm" => Some(Self::ObjectiveC),
			_ => None,
		}
	}

	/// Statement indentation used when nothing else is configured.
	pub fn default_indent(self) -> &'static str {
		match self {
			Self::Swift => "        ",
			Self::ObjectiveC => "    ",
		}
	}

	fn import_statement(self, module: &str) -> String {
		match self {
			Self::Swift => format!("import {module}"),
			Self::ObjectiveC => format!("@import {module};"),
		}
	}

	/// Matches a whole import line for `module`, terminator included.
	fn import_line_pattern(self, module: &str) -> String {
		let module = regex::escape(module);
		match self {
			Self::Swift => format!(r"(?m)^[ \t]*import[ \t]+{module}[ \t]*(?:\r?\n|$)"),
			Self::ObjectiveC => {
				format!(r"(?m)^[ \t]*@import[ \t]+{module}[ \t]*;[ \t]*(?:\r?\n|$)")
			}
		}
	}
}

/// Offsets collected by a language trap set in one walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Anchors {
	/// First position after the last top-level import line.
	pub end_of_imports: Option<usize>,
	/// Whether the target type's body was entered.
	pub type_found: bool,
	/// Position right after the target method's opening brace.
	pub method_body: Option<usize>,
	/// Spans of existing start calls, widened over their indentation and
	/// preceding line break.
	pub start_calls: Vec<Range<usize>>,
}

/// Result of running an [`Injector`] over a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectOutcome {
	pub content: String,
	pub imports_added: Vec<String>,
	pub imports_removed: Vec<String>,
	pub calls_removed: usize,
	pub call_inserted: bool,
}

/// Inserts or removes an SDK start call and its imports in a delegate source.
#[derive(Debug, Clone)]
pub struct Injector {
	language: SourceLanguage,
	type_name: String,
	method_name: String,
	receiver: String,
	selector: String,
	call: String,
	imports: Vec<String>,
	indent: String,
	source_name: String,
}

impl Injector {
	/// An injector inserting `call` with the Mobile Center defaults for
	/// everything else.
	pub fn new(language: SourceLanguage, call: impl Into<String>) -> Self {
		Self {
			language,
			type_name: DEFAULT_TYPE_NAME.to_string(),
			method_name: DEFAULT_METHOD_NAME.to_string(),
			receiver: START_RECEIVER.to_string(),
			selector: START_SELECTOR.to_string(),
			call: call.into(),
			imports: Vec::new(),
			indent: language.default_indent().to_string(),
			source_name: "the source file".to_string(),
		}
	}

	/// An injector for the rendered start call and imports of `integration`.
	pub fn for_integration(language: SourceLanguage, integration: &SdkIntegration) -> Self {
		let call = match language {
			SourceLanguage::Swift => integration.swift_start_call(),
			SourceLanguage::ObjectiveC => integration.objc_start_call(),
		};
		Self::new(language, call).with_imports(integration.imports())
	}

	/// An injector that only knows how to recognize and remove the SDK.
	pub fn for_removal(language: SourceLanguage) -> Self {
		Self::new(language, String::new()).with_imports(all_imports())
	}

	#[must_use]
	pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
		self.type_name = type_name.into();
		self
	}

	#[must_use]
	pub fn with_method_name(mut self, method_name: impl Into<String>) -> Self {
		self.method_name = method_name.into();
		self
	}

	/// Receiver and selector of the call shape recognized as an existing
	/// start call.
	#[must_use]
	pub fn with_call_shape(mut self, receiver: impl Into<String>, selector: impl Into<String>) -> Self {
		self.receiver = receiver.into();
		self.selector = selector.into();
		self
	}

	#[must_use]
	pub fn with_imports(mut self, imports: impl IntoIterator<Item = impl Into<String>>) -> Self {
		self.imports = imports.into_iter().map(Into::into).collect();
		self
	}

	#[must_use]
	pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
		self.indent = indent.into();
		self
	}

	/// Name used in error messages.
	#[must_use]
	pub fn with_source_name(mut self, source_name: impl Into<String>) -> Self {
		self.source_name = source_name.into();
		self
	}

	pub fn language(&self) -> SourceLanguage {
		self.language
	}

	/// Walk `content` once and collect the edit anchors.
	pub fn analyze(&self, content: &str) -> InjectResult<Anchors> {
		match self.language {
			SourceLanguage::Swift => swift::analyze(self, content),
			SourceLanguage::ObjectiveC => objc::analyze(self, content),
		}
	}

	/// Ensure the imports and exactly one start call at the top of the target
	/// method. Existing start calls are replaced.
	pub fn inject(&self, content: &str) -> InjectResult<InjectOutcome> {
		let anchors = self.analyze(content)?;

		if !anchors.type_found {
			return Err(InjectError::TypeNotFound {
				type_name: self.type_name.clone(),
				file: self.source_name.clone(),
			});
		}
		let Some(method_body) = anchors.method_body else {
			return Err(InjectError::MethodNotFound {
				method: self.method_name.clone(),
				file: self.source_name.clone(),
			});
		};

		let eol = LineEnding::detect(content).as_str();
		let mut edits: Vec<Edit> = anchors
			.start_calls
			.iter()
			.cloned()
			.map(Edit::delete)
			.collect();
		edits.push(Edit::insert(
			method_body,
			format!("{eol}{}{}", self.indent, self.call),
		));

		let import_offset = anchors.end_of_imports.unwrap_or(0);
		let import_block = &content[..import_offset];
		let mut imports_added = Vec::new();
		for module in &self.imports {
			let pattern = compile(&self.language.import_line_pattern(module))?;
			if !pattern.is_match(import_block) {
				imports_added.push(module.clone());
			}
		}

		if !imports_added.is_empty() {
			let lines: String = imports_added
				.iter()
				.map(|module| format!("{}{eol}", self.language.import_statement(module)))
				.collect();
			edits.push(Edit::insert(import_offset, lines));
		}

		tracing::debug!(
			language = ?self.language,
			replaced = anchors.start_calls.len(),
			imports = imports_added.len(),
			"injecting start call"
		);

		Ok(InjectOutcome {
			content: apply_edits(content, edits),
			imports_added,
			imports_removed: Vec::new(),
			calls_removed: anchors.start_calls.len(),
			call_inserted: true,
		})
	}

	/// Remove every recognized start call and SDK import line. Nothing to
	/// remove is not an error.
	pub fn remove(&self, content: &str) -> InjectResult<InjectOutcome> {
		let anchors = self.analyze(content)?;

		let mut edits: Vec<Edit> = anchors
			.start_calls
			.iter()
			.cloned()
			.map(Edit::delete)
			.collect();

		let import_block = &content[..anchors.end_of_imports.unwrap_or(0)];
		let mut imports_removed = Vec::new();
		for module in &self.imports {
			let pattern = compile(&self.language.import_line_pattern(module))?;
			let mut found = false;
			for line in pattern.find_iter(import_block) {
				edits.push(Edit::delete(line.range()));
				found = true;
			}
			if found {
				imports_removed.push(module.clone());
			}
		}

		tracing::debug!(
			language = ?self.language,
			calls = anchors.start_calls.len(),
			imports = imports_removed.len(),
			"removing start call"
		);

		Ok(InjectOutcome {
			content: apply_edits(content, edits),
			imports_added: Vec::new(),
			imports_removed,
			calls_removed: anchors.start_calls.len(),
			call_inserted: false,
		})
	}
}

pub(crate) fn compile(pattern: &str) -> InjectResult<Regex> {
	Regex::new(pattern).map_err(|e| {
		InjectError::InvalidPattern {
			pattern: pattern.to_string(),
			reason: e.to_string(),
		}
	})
}

/// Whether the character before `before`'s end could continue an identifier
/// or member access, in which case a call match there is only a suffix of a
/// longer expression.
pub(crate) fn continues_expression(before: &str) -> bool {
	before
		.chars()
		.next_back()
		.is_some_and(|ch| ch.is_alphanumeric() || ch == '_' || ch == '.')
}

/// Code text of the declaration header leading up to the next brace.
///
/// Comments and literals are folded into a single space so that their
/// contents never reach the header patterns.
#[derive(Debug, Default)]
pub(crate) struct DeclarationHeader {
	text: String,
}

impl DeclarationHeader {
	pub(crate) fn record(&mut self, state: &ScanState<'_>) {
		let rest = state.forepart();
		let is_code = state.significant
			&& !matches!(state.current_char, '"' | '\'')
			&& !rest.starts_with("//")
			&& !rest.starts_with("/*");

		if is_code {
			self.text.push(state.current_char);
		} else if !self.text.ends_with(' ') {
			self.text.push(' ');
		}
	}

	pub(crate) fn clear(&mut self) {
		self.text.clear();
	}

	pub(crate) fn as_str(&self) -> &str {
		&self.text
	}
}
