use std::sync::LazyLock;

use regex::Regex;

use crate::matcher::SyntaxMatcher;
use crate::matcher::parameter_block_text;
use crate::matcher::split_top_level;
use crate::scanner::TagKind;
use crate::scanner::Token;

static CLASS: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)^(abstract )?class ([A-Za-z<>0-9_]+)(.*)\{?$").expect("valid regex"));
static MEMBER_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?i)^(static )?([A-Za-z0-9_]+)<?(.*)?>? ([A-Za-z0-9_]+)\((.*)(\)?( \{)?|;?)$")
		.expect("valid regex")
});
static ARROW_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?i)^(static )?([A-Za-z0-9_]+)<?(.*)?>? ([A-Za-z0-9_]+)\((.*)\)=>(.*)")
		.expect("valid regex")
});
static FINAL_VARIABLE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)^final (.*) ([A-Za-z0-9_]+);").expect("valid regex"));
static BARE_VARIABLE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_]+);$").expect("valid regex"));
static TYPED_VARIABLE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^(.*) ([A-Za-z0-9_]+);$").expect("valid regex"));
static ENUM: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)^enum (.*) \{").expect("valid regex"));
static ENUM_VALUE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)^([A-Za-z0-9_]+),?$").expect("valid regex"));
static ANNOTATION: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^@(.*)").expect("valid regex"));
static EXTENSION: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)^extension (.*) on (.*) \{").expect("valid regex"));
static TYPED_CONSTANT: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?i)^const ([A-Za-z<>0-9_]*) ([A-Za-z0-9_]+) = (.*);").expect("valid regex")
});
static UNTYPED_CONSTANT: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)^const ([A-Za-z0-9_]+) = (.*);").expect("valid regex"));

/// Annotations that mark a member as outside the public documentation
/// surface; tokens carrying one render no tag at all.
const HIDDEN_ANNOTATIONS: [&str; 4] = ["private", "protected", "override", "internal"];

/// Marker emitted for members generated by `json_serializable`/codegen
/// instead of a lookup tag.
const NO_DOC: &str = "/// @nodoc";

/// Matcher for the Dart SDK surface: `///` doc comments, brace scopes,
/// `final` fields, const/factory/named constructors, and
/// `extension ... on` blocks (tagged with kind `class`).
pub struct DartMatcher;

impl SyntaxMatcher for DartMatcher {
	fn match_comment(&self, line: &str) -> Option<String> {
		if line.trim().starts_with("///") {
			return Some(line.to_string());
		}
		None
	}

	fn match_class(&self, line: &str) -> Option<String> {
		CLASS
			.captures(line.trim())
			.map(|captures| captures[2].to_string())
	}

	fn match_class_constructor(&self, line: &str, class_name: &str) -> Option<String> {
		let line = line.trim();

		let unnamed =
			Regex::new(&format!(r"(?i)^(const )?{}\(\{{?", regex::escape(class_name))).ok()?;
		if unnamed.is_match(line) {
			return Some(class_name.to_string());
		}

		let named = Regex::new(&format!(
			r"(?i)^(const )?{}\.([A-Za-z<>0-9_]+)\((.*)?",
			regex::escape(class_name)
		))
		.ok()?;
		if let Some(captures) = named.captures(line) {
			return Some(captures[2].to_string());
		}

		let factory = Regex::new(&format!(
			r"(?i)^factory {}\.([A-Za-z<>0-9_]+)\((.*)?",
			regex::escape(class_name)
		))
		.ok()?;
		factory
			.captures(line)
			.map(|captures| captures[1].to_string())
	}

	fn match_member_function(&self, line: &str) -> Option<String> {
		let line = line.trim();
		if line.starts_with("final") {
			return None;
		}

		if let Some(captures) = MEMBER_FUNCTION.captures(line) {
			return Some(captures[4].to_string());
		}
		ARROW_FUNCTION
			.captures(line)
			.map(|captures| captures[4].to_string())
	}

	fn match_member_variable(&self, line: &str) -> Option<String> {
		let line = line.trim();

		if let Some(captures) = FINAL_VARIABLE.captures(line) {
			return Some(captures[2].to_string());
		}
		if let Some(captures) = BARE_VARIABLE.captures(line) {
			return Some(captures[1].to_string());
		}
		TYPED_VARIABLE
			.captures(line)
			.map(|captures| captures[2].to_string())
	}

	fn match_enum(&self, line: &str) -> Option<String> {
		ENUM.captures(line.trim())
			.map(|captures| captures[1].to_string())
	}

	fn match_enum_value(&self, line: &str) -> Option<String> {
		ENUM_VALUE
			.captures(line.trim())
			.map(|captures| captures[1].to_string())
	}

	fn match_annotation(&self, line: &str) -> Option<String> {
		ANNOTATION
			.captures(line.trim())
			.map(|captures| captures[1].to_string())
	}

	fn match_extension(&self, line: &str) -> Option<String> {
		EXTENSION
			.captures(line.trim())
			.map(|captures| captures[1].to_string())
	}

	fn match_constant(&self, line: &str) -> Option<String> {
		let line = line.trim();

		if let Some(captures) = TYPED_CONSTANT.captures(line) {
			return Some(captures[2].to_string());
		}
		UNTYPED_CONSTANT
			.captures(line)
			.map(|captures| captures[1].to_string())
	}

	fn match_function(&self, line: &str) -> Option<String> {
		self.match_member_function(line)
	}

	fn find_function_parameter_list(&self, function_name: &str, block: &str) -> Vec<String> {
		let Some(text) = parameter_block_text(function_name, block) else {
			return Vec::new();
		};

		split_top_level(text)
			.into_iter()
			.filter_map(|piece| {
				// Named/optional grouping braces wrap individual pieces once
				// the block is split on top-level commas.
				let piece = piece
					.trim()
					.trim_matches(|ch| matches!(ch, '{' | '}' | '[' | ']'))
					.trim();
				if piece.is_empty() {
					return None;
				}
				// `Type name = defaultValue` documents only `name`.
				let piece = piece.split(" = ").next().unwrap_or(piece).trim();
				let name = piece.rsplit(char::is_whitespace).next()?.trim_matches('?');
				// Fragments of a split default value are not names.
				if name.is_empty() || !name.starts_with(|ch: char| ch.is_alphabetic() || ch == '_') {
					None
				} else {
					Some(name.to_string())
				}
			})
			.collect()
	}

	fn render_tag(&self, token: &Token) -> Option<String> {
		if token
			.annotations
			.iter()
			.any(|annotation| HIDDEN_ANNOTATIONS.contains(&annotation.as_str()))
		{
			return None;
		}

		let name2 = token.name2.as_deref().unwrap_or_default().to_lowercase();

		// json_serializable and codegen emit fromJson/toJson plus value
		// accessors on `*Ext` extensions; those always get the fixed no-doc
		// marker rather than a template lookup.
		if token.kind == TagKind::Construct && name2 == "fromjson" {
			return Some(NO_DOC.to_string());
		}
		if token.kind == TagKind::Api {
			let generated_ext = token.name1.to_lowercase().ends_with("ext")
				&& (name2.starts_with("value") || name2.starts_with("fromvalue"));
			if name2.starts_with("tojson") || generated_ext {
				return Some(NO_DOC.to_string());
			}
		}

		// Extensions document as their extended class.
		if token.kind == TagKind::Extension {
			return Some(format!("/* {} */", token.tag_with_kind(TagKind::Class)));
		}

		Some(token.tag_line())
	}
}
