use super::Anchors;
use super::DeclarationHeader;
use super::Injector;
use super::PREFERRED_LABEL;
use super::compile;
use crate::InjectResult;
use crate::text::widen_over_indent;
use crate::walker::BagBase;
use crate::walker::TextWalker;
use crate::walker::WalkerBag;

/// `@import Module;`, `#import <…>`, `#import "…"` and `#include` lines.
const IMPORT_LINE: &str =
	r#"^[ \t]*[@#][ \t]*(?:import|include)[ \t]*[\w<>"/.+-]+[ \t]*;?[ \t]*(?://[^\n]*)?\r?\n$"#;

#[derive(Debug, Default)]
struct ObjectiveCInjectBag {
	base: BagBase,
	header: DeclarationHeader,
	is_within_implementation: bool,
	was_within_implementation: bool,
	is_within_method: bool,
	first_method_body: Option<usize>,
	preferred_method_body: Option<usize>,
	anchors: Anchors,
}

impl WalkerBag for ObjectiveCInjectBag {
	fn base(&self) -> &BagBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut BagBase {
		&mut self.base
	}
}

pub(crate) fn analyze(injector: &Injector, content: &str) -> InjectResult<Anchors> {
	let import_line = compile(IMPORT_LINE)?;
	let implementation = compile(&format!(
		r"^@implementation\s+{}\b",
		regex::escape(&injector.type_name)
	))?;
	let method_header = compile(&format!(
		r"-\s*\([^)]*\)\s*{}\b",
		regex::escape(&injector.method_name)
	))?;
	let call_shape = compile(&format!(
		r"^\[\s*{}\s+{}\b[^;]*;",
		regex::escape(&injector.receiver),
		regex::escape(&injector.selector)
	))?;

	let mut walker = TextWalker::new(content, ObjectiveCInjectBag::default());
	walker
		.add_trap(
			|bag, state| {
				bag.significant()
					&& bag.block_level() == 0
					&& !bag.was_within_implementation
					&& state.at_line_start()
					&& import_line.is_match(state.previous_line())
			},
			|bag, state| bag.anchors.end_of_imports = Some(state.position),
		)
		.add_trap(
			|bag, state| {
				bag.significant()
					&& bag.block_level() == 0
					&& state.forepart().starts_with("@implementation")
			},
			|bag, state| {
				if implementation.is_match(state.forepart()) {
					bag.is_within_implementation = true;
					bag.was_within_implementation = true;
				}
			},
		)
		.add_trap(
			|bag, state| {
				bag.significant()
					&& bag.block_level() == 0
					&& bag.is_within_implementation
					&& state.forepart().starts_with("@end")
			},
			|bag, _| bag.is_within_implementation = false,
		)
		.add_trap(
			|bag, state| {
				bag.significant()
					&& bag.is_within_implementation
					&& bag.block_level() == 0
					&& state.current_char == '{'
			},
			|bag, state| {
				let header = bag.header.as_str();
				if !method_header.is_match(header) {
					return;
				}
				let body = state.position + 1;
				bag.is_within_method = true;
				bag.first_method_body.get_or_insert(body);
				if bag.preferred_method_body.is_none() && header.contains(PREFERRED_LABEL) {
					bag.preferred_method_body = Some(body);
				}
			},
		)
		.add_trap(
			|bag, state| {
				bag.significant()
					&& bag.block_level() == 0
					&& bag.is_within_method
					&& state.current_char == '}'
			},
			|bag, _| bag.is_within_method = false,
		)
		.add_trap(
			|bag, state| bag.significant() && bag.is_within_method && state.current_char == '[',
			|bag, state| {
				if let Some(call) = call_shape.find(state.forepart()) {
					let start = widen_over_indent(state.backpart());
					bag.anchors
						.start_calls
						.push(start..state.position + call.end());
				}
			},
		)
		.add_trap(
			|bag, state| bag.significant() && matches!(state.current_char, '{' | '}' | ';'),
			|bag, _| bag.header.clear(),
		)
		.add_trap(
			|bag, state| !(bag.significant() && matches!(state.current_char, '{' | '}' | ';')),
			|bag, state| bag.header.record(state),
		);

	let bag = walker.walk();
	let mut anchors = bag.anchors;
	anchors.type_found = bag.was_within_implementation;
	anchors.method_body = bag.preferred_method_body.or(bag.first_method_body);
	Ok(anchors)
}
