//! CocoaPods `Podfile` editing.
//!
//! Edits are plain text splices so that everything the user wrote around the
//! SDK lines stays byte-identical. Adding is add-if-absent and removing is
//! remove-if-present, so both are safe to repeat.

use std::ops::Range;

use regex::Regex;

use crate::InjectResult;
use crate::injection::compile;
use crate::text::Edit;
use crate::text::LineEnding;
use crate::text::apply_edits;

/// Default iOS deployment target written into a new Podfile.
pub const DEFAULT_PLATFORM: &str = "8.0";

/// Podfile written when the project has none yet.
pub fn default_podfile(target: &str, platform: &str, line_ending: LineEnding) -> String {
	let eol = line_ending.as_str();
	format!("platform :ios, '{platform}'{eol}target '{target}' do{eol}  use_frameworks!{eol}end{eol}")
}

/// Span of the body of `target '<target>' do … end`, ending at the start of
/// the column-zero `end` line.
pub fn target_body(content: &str, target: &str) -> InjectResult<Option<Range<usize>>> {
	let pattern = compile(&format!(
		r#"(?s)target[ \t]+['"]{}['"][ \t]+do\b.*?\n()end\b"#,
		regex::escape(target)
	))?;

	let Some(captures) = pattern.captures(content) else {
		return Ok(None);
	};
	let (Some(whole), Some(end)) = (captures.get(0), captures.get(1)) else {
		return Ok(None);
	};

	Ok(Some(whole.start()..end.start()))
}

fn pod_line(pod: &str) -> String {
	format!("pod '{pod}'")
}

/// A live `pod` line for `pod` in either quote style, with any options.
fn pod_pattern(pod: &str) -> InjectResult<Regex> {
	compile(&format!(
		r#"(?m)^[ \t]*pod[ \t]+['"]{}['"][^\n]*(?:\n|$)"#,
		regex::escape(pod)
	))
}

/// Add `pod '<pod>'` to the target block unless it is already there in
/// either quote style. Commented-out lines do not count.
///
/// Without a matching target block the line is appended at the end of the
/// file, unless it already appears anywhere in it.
pub fn add_pod(content: &str, target: &str, pod: &str) -> InjectResult<String> {
	let line = pod_line(pod);
	let present = pod_pattern(pod)?;
	let eol = LineEnding::detect(content).as_str();

	if let Some(body) = target_body(content, target)? {
		if present.is_match(&content[body.clone()]) {
			return Ok(content.to_string());
		}
		tracing::debug!(pod, target, "adding pod to target");
		return Ok(apply_edits(content, vec![Edit::insert(
			body.end,
			format!("  {line}{eol}"),
		)]));
	}

	if present.is_match(content) {
		return Ok(content.to_string());
	}

	tracing::debug!(pod, "no target block found, appending pod");
	let mut result = content.to_string();
	if !result.is_empty() && !result.ends_with('\n') {
		result.push_str(eol);
	}
	result.push_str(&line);
	result.push_str(eol);
	Ok(result)
}

/// Delete every `pod '<pod>'` line, whatever options follow it.
pub fn remove_pod(content: &str, pod: &str) -> InjectResult<String> {
	let edits: Vec<Edit> = pod_pattern(pod)?
		.find_iter(content)
		.map(|line| Edit::delete(line.range()))
		.collect();

	if !edits.is_empty() {
		tracing::debug!(pod, lines = edits.len(), "removing pod");
	}

	Ok(apply_edits(content, edits))
}
