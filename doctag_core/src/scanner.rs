use std::fmt::Display;

use crate::DoctagError;
use crate::DoctagResult;
use crate::matcher::SyntaxMatcher;

/// The declaration kinds a tag can name. Member variables and enum values
/// reuse `Class`/`Enum` with a second name component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
	Class,
	Api,
	Construct,
	Enum,
	Extension,
	Constant,
}

impl TagKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Class => "class",
			Self::Api => "api",
			Self::Construct => "construct",
			Self::Enum => "enum",
			Self::Extension => "extension",
			Self::Constant => "constant",
		}
	}
}

impl Display for TagKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One taggable declaration found by the scanner, anchored at a line
/// offset in the comment-stripped line sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
	/// Line index of the declaration itself.
	pub offset: usize,
	pub kind: TagKind,
	/// The owning class/enum/top-level name.
	pub name1: String,
	/// The member/value name, with an optional `##param1#param2` overload
	/// suffix for member functions.
	pub name2: Option<String>,
	/// Annotation lines collected upward from the declaration, nearest
	/// first.
	pub annotations: Vec<String>,
}

impl Token {
	/// The line the tag is inserted before. Annotations sit between the tag
	/// and the declaration, so the tag goes above the whole run.
	pub fn insert_offset(&self) -> usize {
		self.offset - self.annotations.len()
	}

	/// Canonical tag string: `kind_name1[_name2]`, lower-cased.
	pub fn tag(&self) -> String {
		self.tag_with_kind(self.kind)
	}

	pub fn tag_with_kind(&self, kind: TagKind) -> String {
		let mut tag = format!("{}_{}", kind.as_str(), self.name1);
		if let Some(name2) = &self.name2 {
			tag = format!("{tag}_{name2}");
		}
		tag.to_lowercase()
	}

	/// The tag wrapped as a marker line.
	pub fn tag_line(&self) -> String {
		format!("/* {} */", self.tag())
	}
}

/// Walks a file's lines with a [`SyntaxMatcher`] and produces the ordered
/// token sequence, reconstructing nested scopes with predicate-driven
/// depth tracking instead of a grammar.
pub struct LineScanner<'a> {
	matcher: &'a dyn SyntaxMatcher,
	lines: &'a [String],
}

impl<'a> LineScanner<'a> {
	pub fn new(matcher: &'a dyn SyntaxMatcher, lines: &'a [String]) -> Self {
		Self { matcher, lines }
	}

	/// Scan the whole file. Top-level declarations are tried in order:
	/// class, enum, extension, function, constant. First match wins, and
	/// each scoped match consumes lines up to its scope end.
	pub fn tokenize(&self) -> DoctagResult<Vec<Token>> {
		let mut tokens = Vec::new();
		let mut index = 0;

		while index < self.lines.len() {
			let line = &self.lines[index];

			if let Some(class_name) = self.matcher.match_class(line) {
				let (end, class_tokens) = self.class_tokens(&class_name, index, TagKind::Class)?;
				tokens.extend(class_tokens);
				index = end + 1;
				continue;
			}

			if let Some(enum_name) = self.matcher.match_enum(line) {
				let (end, enum_tokens) = self.enum_tokens(&enum_name, index)?;
				tokens.extend(enum_tokens);
				index = end + 1;
				continue;
			}

			if let Some(extension_name) = self.matcher.match_extension(line) {
				let (end, extension_tokens) =
					self.class_tokens(&extension_name, index, TagKind::Extension)?;
				tokens.extend(extension_tokens);
				index = end + 1;
				continue;
			}

			if let Some(function_name) = self.matcher.match_function(line) {
				let (end, function_tokens) =
					self.function_tokens(None, &function_name, index, None, self.lines.len())?;
				tokens.extend(function_tokens);
				index = end + 1;
				continue;
			}

			if let Some(constant_name) = self.matcher.match_constant(line) {
				tokens.push(Token {
					offset: index,
					kind: TagKind::Constant,
					name1: constant_name,
					name2: None,
					annotations: self.annotations_above(index),
				});
			}

			index += 1;
		}

		Ok(tokens)
	}

	/// Forward scan for the first line the matcher recognizes as a class
	/// scope start.
	fn find_scope_start(&self, from: usize) -> Option<usize> {
		(from..self.lines.len()).find(|&index| self.matcher.match_class_scope_start(&self.lines[index]))
	}

	/// Find the line index where the scope opened at `start` closes, using
	/// a depth stack over the matcher's open/close predicates. Nested
	/// function bodies inside the scope push and pop as they are passed.
	fn find_scope_end(&self, start: usize) -> DoctagResult<usize> {
		if !self.matcher.match_class_scope_start(&self.lines[start]) {
			return Err(DoctagError::ScopeMismatch { line: start });
		}

		let mut depth: usize = 1;
		let mut index = start + 1;

		while index < self.lines.len() {
			let line = self.lines[index].trim();
			if self.matcher.match_class_scope_end(line) || self.matcher.match_function_scope_end(line)
			{
				depth -= 1;
			} else if self.matcher.match_function_scope_start(line) {
				depth += 1;
			}

			if depth == 0 {
				return Ok(index);
			}

			index += 1;
		}

		Err(DoctagError::UnclosedScope { line: start })
	}

	/// Collect the contiguous run of annotation lines immediately above
	/// `index`, nearest first.
	fn annotations_above(&self, index: usize) -> Vec<String> {
		let mut annotations = Vec::new();
		let mut cursor = index;
		while cursor > 0 {
			match self.matcher.match_annotation(&self.lines[cursor - 1]) {
				Some(annotation) => annotations.push(annotation),
				None => break,
			}
			cursor -= 1;
		}
		annotations
	}

	/// Tokenize a class (or extension) declaration and its members.
	fn class_tokens(
		&self,
		class_name: &str,
		line_index: usize,
		kind: TagKind,
	) -> DoctagResult<(usize, Vec<Token>)> {
		let scope_start = self
			.find_scope_start(line_index)
			.ok_or(DoctagError::ScopeMismatch { line: line_index })?;
		let scope_end = self.find_scope_end(scope_start)?;

		let mut tokens = vec![Token {
			offset: line_index,
			kind,
			name1: class_name.to_string(),
			name2: None,
			annotations: self.annotations_above(line_index),
		}];

		let mut index = scope_start + 1;
		while index < scope_end {
			let line = &self.lines[index];

			if let Some(constructor_name) = self.matcher.match_class_constructor(line, class_name) {
				tokens.push(Token {
					offset: index,
					kind: TagKind::Construct,
					name1: class_name.to_string(),
					name2: Some(constructor_name),
					annotations: self.annotations_above(index),
				});
			} else if let Some(variable_name) = self.matcher.match_member_variable(line) {
				// Function-typed fields can be wrapped across several
				// physical lines with the field name on the last one. Walk
				// back to the first line of the declaration so the tag lands
				// above all of it. Any line that belongs to another member,
				// or closes one's body, ends the walk: crossing it would
				// regress the offset behind the previous token's splice
				// point.
				let mut first = index;
				while first > scope_start + 1 {
					let previous = self.lines[first - 1].trim();
					let constructor = self.matcher.match_class_constructor(previous, class_name);
					if previous.is_empty()
						|| self.matcher.match_member_variable(previous).is_some()
						|| self.matcher.match_annotation(previous).is_some()
						|| self.matcher.match_member_function(previous).is_some()
						|| constructor.is_some()
						|| self.matcher.match_class_scope_end(previous)
						|| self.matcher.match_function_scope_end(previous)
						|| self.matcher.match_function_scope_start(previous)
					{
						break;
					}
					first -= 1;
				}
				tokens.push(Token {
					offset: first,
					kind: TagKind::Class,
					name1: class_name.to_string(),
					name2: Some(variable_name),
					annotations: self.annotations_above(first),
				});
			} else if let Some(function_name) = self.matcher.match_member_function(line) {
				let (end, function_tokens) = self.function_tokens(
					Some(class_name),
					&function_name,
					index,
					Some(scope_start),
					scope_end,
				)?;
				tokens.extend(function_tokens);
				index = end + 1;
				continue;
			}

			index += 1;
		}

		Ok((scope_end, tokens))
	}

	/// Flatten the parameter block starting at `start`: the physical lines
	/// from the last parameter-scope start up to the first parameter-scope
	/// end, trimmed and joined with single spaces.
	fn parameter_block(&self, function_name: &str, start: usize, end: usize) -> String {
		let mut block_start = start;
		let mut block_end = end.min(self.lines.len().saturating_sub(1));

		let mut index = start;
		while index < end {
			let line = &self.lines[index];
			if self.matcher.match_parameter_scope_start(function_name, line) {
				block_start = index;
			}
			if self.matcher.match_parameter_scope_end(line) {
				block_end = index;
				break;
			}
			index += 1;
		}

		self.lines[block_start..=block_end]
			.iter()
			.map(|line| line.trim())
			.collect::<Vec<_>>()
			.join(" ")
	}

	/// Tokenize a function declaration (member or top-level). Member
	/// functions carry the `##`-joined parameter-name suffix so overloads
	/// stay distinguishable.
	fn function_tokens(
		&self,
		class_name: Option<&str>,
		function_name: &str,
		line_index: usize,
		class_scope_start: Option<usize>,
		class_scope_end: usize,
	) -> DoctagResult<(usize, Vec<Token>)> {
		let function_scope_start = self.find_scope_start(line_index);
		let parameter_search_end = function_scope_start.unwrap_or(class_scope_end);

		let block = self.parameter_block(function_name, line_index, parameter_search_end);
		let parameters = self.matcher.find_function_parameter_list(function_name, &block);
		let function_name = self
			.matcher
			.refine_function_name(class_name, function_name, &block)
			.unwrap_or_else(|| function_name.to_string());

		let mut signature = function_name.clone();
		if !parameters.is_empty() {
			signature = format!("{signature}##{}", parameters.join("#"));
		}

		let token = match class_name {
			Some(class_name) => {
				Token {
					offset: line_index,
					kind: TagKind::Api,
					name1: class_name.to_string(),
					name2: Some(signature),
					annotations: self.annotations_above(line_index),
				}
			}
			None => {
				Token {
					offset: line_index,
					kind: TagKind::Api,
					name1: function_name,
					name2: None,
					annotations: self.annotations_above(line_index),
				}
			}
		};
		let tokens = vec![token];

		// A body within the enclosing scope means a concrete function; the
		// scan resumes after its closing line.
		if let Some(scope_start) = function_scope_start {
			let inside_class = class_scope_start.is_none_or(|class_start| scope_start > class_start);
			if inside_class && scope_start < class_scope_end {
				let scope_end = self.find_scope_end(scope_start)?;
				return Ok((scope_end, tokens));
			}
		}

		// Declaration-only function: single-line if the declaration itself
		// is a complete statement, otherwise consume up to the statement
		// terminator.
		if self.matcher.match_abstract_function_end(&self.lines[line_index]) {
			return Ok((line_index, tokens));
		}
		for index in line_index + 1..class_scope_end.min(self.lines.len()) {
			if self.matcher.match_abstract_function_end(&self.lines[index]) {
				return Ok((index, tokens));
			}
		}

		Ok((line_index, tokens))
	}

	/// Tokenize an enum declaration and its values.
	fn enum_tokens(&self, enum_name: &str, line_index: usize) -> DoctagResult<(usize, Vec<Token>)> {
		let mut tokens = vec![Token {
			offset: line_index,
			kind: TagKind::Enum,
			name1: enum_name.to_string(),
			name2: None,
			annotations: self.annotations_above(line_index),
		}];

		let scope_start = self
			.find_enum_scope_start(line_index)
			.ok_or(DoctagError::ScopeMismatch { line: line_index })?;
		let scope_end = self.find_enum_scope_end(scope_start)?;

		for index in scope_start + 1..scope_end {
			if let Some(value_name) = self.matcher.match_enum_value(&self.lines[index]) {
				tokens.push(Token {
					offset: index,
					kind: TagKind::Enum,
					name1: enum_name.to_string(),
					name2: Some(value_name),
					annotations: self.annotations_above(index),
				});
			}
		}

		Ok((scope_end, tokens))
	}

	fn find_enum_scope_start(&self, from: usize) -> Option<usize> {
		(from..self.lines.len()).find(|&index| self.matcher.match_enum_scope_start(&self.lines[index]))
	}

	fn find_enum_scope_end(&self, start: usize) -> DoctagResult<usize> {
		if !self.matcher.match_enum_scope_start(&self.lines[start]) {
			return Err(DoctagError::ScopeMismatch { line: start });
		}

		// Enhanced enums can carry member function bodies, so nested scopes
		// are tracked the same way class bodies are.
		let mut depth: usize = 1;
		let mut index = start + 1;
		while index < self.lines.len() {
			let line = self.lines[index].trim();
			if self.matcher.match_enum_scope_end(line) || self.matcher.match_function_scope_end(line) {
				depth -= 1;
			} else if self.matcher.match_function_scope_start(line) {
				depth += 1;
			}

			if depth == 0 {
				return Ok(index);
			}

			index += 1;
		}

		Err(DoctagError::UnclosedScope { line: start })
	}
}
