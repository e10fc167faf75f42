use std::sync::LazyLock;

use regex::Regex;

use crate::matcher::SyntaxMatcher;

static CLASS: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(export )?(abstract )?(class|interface) ([A-Za-z<>0-9_]+)(.*)\{?$")
		.expect("valid regex")
});
static MODIFIED_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(abstract |get |set |public |private )([A-Za-z0-9_]+)\((.*)(\)?( \{)?|;?)$")
		.expect("valid regex")
});
static BARE_FUNCTION: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"([A-Za-z0-9_]+)\??\((.*)(\)?( \{)?|;?)$").expect("valid regex"));
static MEMBER_VARIABLE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_]+)(\?)?: (.*);").expect("valid regex"));
static ENUM: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)^export enum (.*) \{").expect("valid regex"));
static ENUM_VALUE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_]+) = (.*),?$").expect("valid regex"));
static ANNOTATION: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^@(.*)").expect("valid regex"));
static CONSTANT: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)^export const (.*?)(: .*)? = (.*)").expect("valid regex"));
static FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?i)^(export )?function ([A-Za-z0-9_]+)\((.*)(\)?( \{)?|;?)$").expect("valid regex")
});
static PARAMETER: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\s?([A-Za-z0-9_]+)\??: (.*)").expect("valid regex"));

/// Matcher for the TypeScript SDK surface: `/* */` block comments,
/// `export`-prefixed declarations, `name?: Type` members, and
/// `name: Type = default` parameter lists.
pub struct TypeScriptMatcher;

impl SyntaxMatcher for TypeScriptMatcher {
	fn match_comment(&self, line: &str) -> Option<String> {
		let trimmed = line.trim();
		if trimmed.starts_with("/*") || trimmed.starts_with('*') {
			return Some(line.to_string());
		}
		None
	}

	fn match_class(&self, line: &str) -> Option<String> {
		CLASS
			.captures(line.trim())
			.map(|captures| captures[4].to_string())
	}

	fn match_member_function(&self, line: &str) -> Option<String> {
		let line = line.trim();

		if let Some(captures) = MODIFIED_FUNCTION.captures(line) {
			return Some(captures[2].to_string());
		}
		BARE_FUNCTION
			.captures(line)
			.map(|captures| captures[1].to_string())
	}

	fn match_member_variable(&self, line: &str) -> Option<String> {
		MEMBER_VARIABLE
			.captures(line.trim())
			.map(|captures| captures[1].to_string())
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

	fn match_constant(&self, line: &str) -> Option<String> {
		CONSTANT
			.captures(line.trim())
			.map(|captures| captures[1].trim().to_string())
	}

	fn match_function(&self, line: &str) -> Option<String> {
		FUNCTION
			.captures(line.trim())
			.map(|captures| captures[2].to_string())
	}

	fn match_class_scope_start(&self, line: &str) -> bool {
		let trimmed = line.trim();
		trimmed.ends_with('{') && !trimmed.starts_with('}')
	}

	fn match_class_scope_end(&self, line: &str) -> bool {
		let trimmed = line.trim();
		trimmed.starts_with('}') && !trimmed.ends_with('{')
	}

	fn find_function_parameter_list(&self, function_name: &str, block: &str) -> Vec<String> {
		let signature = Regex::new(&format!(
			r"(.*){}\??\((.*)\)(.*)",
			regex::escape(function_name)
		));
		let Ok(signature) = signature else {
			return Vec::new();
		};
		let Some(captures) = signature.captures(block) else {
			return Vec::new();
		};

		let mut parameters = Vec::new();
		for piece in captures[2].split(',') {
			// `name: Type = defaultValue` documents only `name`.
			let declaration = piece.split(" = ").next().unwrap_or(piece);
			if let Some(captures) = PARAMETER.captures(declaration) {
				parameters.push(captures[1].to_string());
			}
		}

		parameters
	}
}
