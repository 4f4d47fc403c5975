use std::ops::Range;

/// Line terminator convention of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
	#[default]
	Lf,
	CrLf,
}

impl LineEnding {
	/// Detect the convention used by `content`. A single `\r\n` is enough to
	/// treat the whole file as CRLF.
	pub fn detect(content: &str) -> Self {
		if content.contains("\r\n") {
			Self::CrLf
		} else {
			Self::Lf
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Lf => "\n",
			Self::CrLf => "\r\n",
		}
	}
}

/// Replace `range` of the original text with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
	pub range: Range<usize>,
	pub replacement: String,
}

impl Edit {
	pub fn insert(offset: usize, text: impl Into<String>) -> Self {
		Self {
			range: offset..offset,
			replacement: text.into(),
		}
	}

	pub fn delete(range: Range<usize>) -> Self {
		Self {
			range,
			replacement: String::new(),
		}
	}
}

/// Apply edits expressed against the original `content` in a single pass.
///
/// Offsets always refer to the original text, so callers never have to
/// account for shifts caused by earlier edits. Edits are ordered by start
/// offset; an insertion sharing its offset with a deletion lands before the
/// deleted span. An edit that overlaps an already applied one is skipped.
pub fn apply_edits(content: &str, mut edits: Vec<Edit>) -> String {
	edits.sort_by(|a, b| {
		a.range
			.start
			.cmp(&b.range.start)
			.then_with(|| a.range.end.cmp(&b.range.end))
	});

	let mut result = String::with_capacity(content.len());
	let mut cursor = 0;

	for edit in edits {
		if edit.range.start < cursor || edit.range.end > content.len() {
			continue;
		}
		result.push_str(&content[cursor..edit.range.start]);
		result.push_str(&edit.replacement);
		cursor = edit.range.end;
	}

	result.push_str(&content[cursor..]);
	result
}

/// Walk back from the end of `before` over horizontal whitespace and one
/// line terminator. Deleting from the returned offset removes the whole line a
/// statement sat on, together with the break that introduced it.
pub(crate) fn widen_over_indent(before: &str) -> usize {
	let trimmed = before.trim_end_matches([' ', '\t']);
	if let Some(rest) = trimmed.strip_suffix("\r\n") {
		rest.len()
	} else if let Some(rest) = trimmed.strip_suffix('\n') {
		rest.len()
	} else {
		trimmed.len()
	}
}
