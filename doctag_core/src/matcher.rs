use std::sync::LazyLock;

use regex::Regex;

use crate::languages::csharp::CSharpMatcher;
use crate::languages::dart::DartMatcher;
use crate::languages::objc::ObjCMatcher;
use crate::languages::typescript::TypeScriptMatcher;
use crate::scanner::Token;

/// A previously emitted tag marker line: `/* kind_name1_name2 */`. The
/// delimiters are fixed regardless of the target language; this is the
/// pipeline's internal exchange format.
pub(crate) static TAG_MARKER: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^/\*\s(.*)\s\*/$").expect("valid regex"));

/// The target languages a syntax matcher exists for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Language {
	Dart,
	TypeScript,
	CSharp,
	ObjC,
}

impl Language {
	/// Build the concrete matcher for this language.
	pub fn matcher(self) -> Box<dyn SyntaxMatcher> {
		match self {
			Self::Dart => Box::new(DartMatcher),
			Self::TypeScript => Box::new(TypeScriptMatcher),
			Self::CSharp => Box::new(CSharpMatcher),
			Self::ObjC => Box::new(ObjCMatcher),
		}
	}
}

/// Per-language line predicates and extractors.
///
/// Every method is a pure function of a single line of text (two for the
/// parameter-scope and name-refinement hooks, which also see the function
/// name or the flattened declaration block). Extractors return `None` when
/// the line is not a declaration of that kind; callers must treat `None`
/// as "no match", never as an error. Default method bodies provide the
/// generic brace-and-semicolon behavior that most C-family languages share;
/// variants override only what differs.
pub trait SyntaxMatcher {
	/// Extract the tag body from a previously emitted tag marker line.
	fn match_tag(&self, line: &str) -> Option<String> {
		TAG_MARKER
			.captures(line.trim())
			.map(|captures| captures[1].to_string())
	}

	/// Match a documentation comment line (stripped during re-tagging).
	fn match_comment(&self, line: &str) -> Option<String>;

	/// Match a class/interface declaration and extract its name.
	fn match_class(&self, line: &str) -> Option<String>;

	/// Match a constructor of `class_name` and extract the constructor name.
	fn match_class_constructor(&self, _line: &str, _class_name: &str) -> Option<String> {
		None
	}

	/// Match a member function declaration and extract its name.
	fn match_member_function(&self, line: &str) -> Option<String>;

	/// Match a member variable declaration and extract its name.
	fn match_member_variable(&self, line: &str) -> Option<String>;

	/// Match an enum declaration and extract its name.
	fn match_enum(&self, line: &str) -> Option<String>;

	/// Match an enum value line and extract the value name.
	fn match_enum_value(&self, line: &str) -> Option<String>;

	/// Match an annotation/attribute line and extract its text.
	fn match_annotation(&self, line: &str) -> Option<String>;

	/// Match an extension/category declaration and extract its name.
	fn match_extension(&self, _line: &str) -> Option<String> {
		None
	}

	/// Match a top-level constant declaration and extract its name.
	fn match_constant(&self, _line: &str) -> Option<String> {
		None
	}

	/// Match a top-level function declaration and extract its name.
	fn match_function(&self, _line: &str) -> Option<String> {
		None
	}

	fn match_class_scope_start(&self, line: &str) -> bool {
		line.trim().ends_with('{')
	}

	fn match_class_scope_end(&self, line: &str) -> bool {
		line.trim().starts_with('}')
	}

	fn match_function_scope_start(&self, line: &str) -> bool {
		self.match_class_scope_start(line)
	}

	fn match_function_scope_end(&self, line: &str) -> bool {
		self.match_class_scope_end(line)
	}

	fn match_enum_scope_start(&self, line: &str) -> bool {
		self.match_class_scope_start(line)
	}

	fn match_enum_scope_end(&self, line: &str) -> bool {
		self.match_class_scope_end(line)
	}

	fn match_parameter_scope_start(&self, _function_name: &str, line: &str) -> bool {
		line.contains('(')
	}

	fn match_parameter_scope_end(&self, line: &str) -> bool {
		line.contains(')')
	}

	/// Whether a declaration-only (abstract) function ends on this line.
	fn match_abstract_function_end(&self, line: &str) -> bool {
		line.trim_end().ends_with(';')
	}

	/// Parse the flattened parameter block of `function_name` into its
	/// ordered bare parameter names. `block` is the declaration's physical
	/// lines trimmed and joined with single spaces.
	fn find_function_parameter_list(&self, function_name: &str, block: &str) -> Vec<String> {
		generic_parameter_list(function_name, block)
	}

	/// Re-derive the real function name from the flattened declaration
	/// block. Returns `None` to keep the name the line matcher produced.
	/// Used by keyword-message languages where the first matched word is
	/// not the name the documentation keys on.
	fn refine_function_name(&self, _owner: Option<&str>, _matched: &str, _block: &str) -> Option<String> {
		None
	}

	/// Render the tag marker line for a token. `None` suppresses the token
	/// entirely (no line is inserted); variants may also return a fixed
	/// no-doc marker instead of the canonical tag.
	fn render_tag(&self, token: &Token) -> Option<String> {
		Some(token.tag_line())
	}
}

/// Split a parameter block on commas that sit at the top nesting level,
/// ignoring commas inside `<>` and `()`. Braces and brackets stay
/// transparent: named/optional parameter groups use them around comma
/// separated parameters.
pub(crate) fn split_top_level(block: &str) -> Vec<&str> {
	let mut pieces = Vec::new();
	let mut depth = 0i32;
	let mut start = 0;
	for (index, ch) in block.char_indices() {
		match ch {
			'<' | '(' => depth += 1,
			'>' | ')' => depth -= 1,
			',' if depth == 0 => {
				pieces.push(&block[start..index]);
				start = index + 1;
			}
			_ => {}
		}
	}
	pieces.push(&block[start..]);
	pieces
}

/// Extract the raw text between the parentheses that follow
/// `function_name` in a flattened declaration block.
pub(crate) fn parameter_block_text<'a>(function_name: &str, block: &'a str) -> Option<&'a str> {
	let name_at = block.find(function_name)?;
	let after_name = &block[name_at + function_name.len()..];
	let open = after_name.find('(')?;
	let mut depth = 0i32;
	for (index, ch) in after_name[open..].char_indices() {
		match ch {
			'(' => depth += 1,
			')' => {
				depth -= 1;
				if depth == 0 {
					return Some(&after_name[open + 1..open + index]);
				}
			}
			_ => {}
		}
	}
	None
}

/// Generic `Type name` parameter extraction: split the block on top-level
/// commas, drop default values, and keep the final identifier of each
/// piece. Optional/named grouping braces and nullability markers are
/// stripped.
pub(crate) fn generic_parameter_list(function_name: &str, block: &str) -> Vec<String> {
	let Some(text) = parameter_block_text(function_name, block) else {
		return Vec::new();
	};

	split_top_level(text)
		.into_iter()
		.filter_map(|piece| {
			let piece = piece
				.trim()
				.trim_matches(|ch| matches!(ch, '{' | '}' | '[' | ']'))
				.trim();
			if piece.is_empty() {
				return None;
			}
			// Default values: `Type name = value` keeps only `Type name`.
			let piece = piece.split('=').next().unwrap_or(piece).trim();
			// TypeScript-style `name: Type` keeps the part before the colon.
			let piece = piece.split(':').next().unwrap_or(piece).trim();
			let name = piece.rsplit(char::is_whitespace).next()?.trim_matches('?');
			if name.is_empty() {
				None
			} else {
				Some(name.to_string())
			}
		})
		.collect()
}
