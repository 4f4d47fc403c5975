//! Single-pass lexical walker for C-family source text.
//!
//! The walker visits every character of a source text exactly once and keeps
//! two pieces of structural context up to date:
//!
//! - whether the current position is *significant* (live code, as opposed to
//!   the inside of a comment or a string/character literal), and
//! - the current brace depth (`block_level`), counted only at significant
//!   positions.
//!
//! Callers register *traps*: a predicate over the bag and the [`ScanState`],
//! and an action that mutates the bag. At every position the traps are
//! evaluated in registration order and a matching trap's action runs before
//! the next predicate is asked, so later traps observe what earlier traps
//! recorded at the same position.
//!
//! ```text
//! position:  a  {  b  {  c  }  d  }  e
//! level:     0  0  1  1  2  1  1  0  0
//! ```
//!
//! A `{` and its matching `}` both observe the enclosing depth; everything
//! between them observes one more. Significance reflects the lexical context
//! *before* the current character is consumed, so the first character of an
//! opener (`/` of `//`, the opening `"`) is significant while everything after
//! it up to and including the terminator is not.
//!
//! The walker never fails. Unterminated comments and literals keep the rest of
//! the text insignificant, and unbalanced closing braces clamp the depth at
//! zero.

use std::fmt;

/// Which quote characters open a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syntax {
	quotes: &'static [char],
}

impl Syntax {
	/// C and Objective-C: string and character literals.
	pub const C: Self = Self {
		quotes: &['"', '\''],
	};
	/// Swift has no character literals, apostrophes only appear in comments
	/// and strings.
	pub const SWIFT: Self = Self { quotes: &['"'] };

	fn is_quote(self, ch: char) -> bool {
		self.quotes.contains(&ch)
	}
}

impl Default for Syntax {
	fn default() -> Self {
		Self::C
	}
}

/// The structural fields every bag carries. The walker overwrites them right
/// before traps are evaluated at each position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BagBase {
	pub significant: bool,
	pub block_level: usize,
}

/// A caller-defined accumulator threaded through a single walk.
///
/// Implementors embed a [`BagBase`] and add whatever offsets and flags their
/// traps record.
pub trait WalkerBag {
	fn base(&self) -> &BagBase;
	fn base_mut(&mut self) -> &mut BagBase;

	/// Whether the position the traps are looking at is live code.
	fn significant(&self) -> bool {
		self.base().significant
	}

	/// Brace depth at the position the traps are looking at.
	fn block_level(&self) -> usize {
		self.base().block_level
	}
}

impl WalkerBag for BagBase {
	fn base(&self) -> &BagBase {
		self
	}

	fn base_mut(&mut self) -> &mut BagBase {
		self
	}
}

/// Read-only view of the walker at one position.
#[derive(Debug, Clone, Copy)]
pub struct ScanState<'t> {
	text: &'t str,
	/// Byte offset of `current_char`.
	pub position: usize,
	pub current_char: char,
	pub significant: bool,
	pub block_level: usize,
}

impl<'t> ScanState<'t> {
	/// All text strictly before the current position.
	pub fn backpart(&self) -> &'t str {
		&self.text[..self.position]
	}

	/// All text from the current position to the end.
	pub fn forepart(&self) -> &'t str {
		&self.text[self.position..]
	}

	/// Whether the current position is the first character of a line.
	pub fn at_line_start(&self) -> bool {
		self.position == 0 || self.backpart().ends_with('\n')
	}

	/// The last complete line before the current position, including its
	/// terminator. Empty when the position is not at a line start or there is
	/// no preceding line.
	pub fn previous_line(&self) -> &'t str {
		let back = self.backpart();
		let Some(body) = back.strip_suffix('\n') else {
			return "";
		};
		let start = body.rfind('\n').map_or(0, |index| index + 1);
		&back[start..]
	}
}

type Predicate<'a, B> = Box<dyn Fn(&B, &ScanState<'_>) -> bool + 'a>;
type Action<'a, B> = Box<dyn Fn(&mut B, &ScanState<'_>) + 'a>;

struct Trap<'a, B> {
	predicate: Predicate<'a, B>,
	action: Action<'a, B>,
}

/// Lexical context before the current character is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
	Code,
	LineComment,
	/// The `*` of a `/*` opener, which must not close the comment.
	BlockCommentOpening,
	BlockComment {
		after_star: bool,
	},
	Literal {
		quote: char,
		escaped: bool,
	},
}

impl Context {
	fn advance(self, current: char, next: Option<char>, syntax: Syntax) -> Self {
		match self {
			Self::Code => {
				match (current, next) {
					('/', Some('/')) => Self::LineComment,
					('/', Some('*')) => Self::BlockCommentOpening,
					(ch, _) if syntax.is_quote(ch) => {
						Self::Literal {
							quote: ch,
							escaped: false,
						}
					}
					_ => Self::Code,
				}
			}
			Self::LineComment => {
				if current == '\n' {
					Self::Code
				} else {
					Self::LineComment
				}
			}
			Self::BlockCommentOpening => Self::BlockComment { after_star: false },
			Self::BlockComment { after_star } => {
				if after_star && current == '/' {
					Self::Code
				} else {
					Self::BlockComment {
						after_star: current == '*',
					}
				}
			}
			Self::Literal { quote, escaped } => {
				if escaped {
					Self::Literal {
						quote,
						escaped: false,
					}
				} else if current == '\\' {
					Self::Literal {
						quote,
						escaped: true,
					}
				} else if current == quote {
					Self::Code
				} else {
					self
				}
			}
		}
	}
}

/// Walks a source text once, firing registered traps at every position.
pub struct TextWalker<'a, B> {
	text: &'a str,
	syntax: Syntax,
	bag: B,
	traps: Vec<Trap<'a, B>>,
}

impl<B> fmt::Debug for TextWalker<'_, B> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TextWalker")
			.field("len", &self.text.len())
			.field("syntax", &self.syntax)
			.field("traps", &self.traps.len())
			.finish_non_exhaustive()
	}
}

impl<'a, B: WalkerBag> TextWalker<'a, B> {
	/// Create a walker with C-family literal rules.
	pub fn new(text: &'a str, bag: B) -> Self {
		Self::with_syntax(text, bag, Syntax::C)
	}

	pub fn with_syntax(text: &'a str, bag: B, syntax: Syntax) -> Self {
		Self {
			text,
			syntax,
			bag,
			traps: Vec::new(),
		}
	}

	/// Register a trap. Traps are evaluated in registration order.
	pub fn add_trap<P, A>(&mut self, predicate: P, action: A) -> &mut Self
	where
		P: Fn(&B, &ScanState<'_>) -> bool + 'a,
		A: Fn(&mut B, &ScanState<'_>) + 'a,
	{
		self.traps.push(Trap {
			predicate: Box::new(predicate),
			action: Box::new(action),
		});
		self
	}

	/// Run the single forward pass and hand back the bag.
	pub fn walk(self) -> B {
		let Self {
			text,
			syntax,
			mut bag,
			traps,
		} = self;

		let mut context = Context::Code;
		let mut block_level = 0usize;
		let mut chars = text.char_indices().peekable();

		while let Some((position, current_char)) = chars.next() {
			let next_char = chars.peek().map(|&(_, ch)| ch);
			let significant = context == Context::Code;

			if significant && current_char == '}' {
				block_level = block_level.saturating_sub(1);
			}

			*bag.base_mut() = BagBase {
				significant,
				block_level,
			};

			let state = ScanState {
				text,
				position,
				current_char,
				significant,
				block_level,
			};

			for trap in &traps {
				if (trap.predicate)(&bag, &state) {
					(trap.action)(&mut bag, &state);
				}
			}

			if significant && current_char == '{' {
				block_level += 1;
			}

			context = context.advance(current_char, next_char, syntax);
		}

		bag
	}
}
