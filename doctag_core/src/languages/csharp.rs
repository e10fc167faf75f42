use std::sync::LazyLock;

use regex::Regex;

use crate::matcher::SyntaxMatcher;

static CLASS: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(public )?(abstract )?(class|interface) ([A-Za-z<>0-9_]+)(.*)\{?$")
		.expect("valid regex")
});
static RETURN_FIRST_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"^(public |protected |private )?(abstract |virtual |override )?([A-Za-z0-9_]+ )([A-Za-z0-9_]+)\(.*\)",
	)
	.expect("valid regex")
});
static MODIFIER_FIRST_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"^(abstract |virtual |override )?(public |protected |private )?([A-Za-z0-9_]+)\s([A-Za-z0-9_]+)\(.*\)",
	)
	.expect("valid regex")
});
static MEMBER_VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(public |protected |private )?([A-Za-z0-9_<>]+ )([A-Za-z0-9_]+)(;| \{ set; get; \}|\s=\s.*;)")
		.expect("valid regex")
});
static ENUM: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)^public enum (.*)$").expect("valid regex"));
static ENUM_VALUE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_]+) = (.*),?$").expect("valid regex"));
static ANNOTATION: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\[(.*)\]$").expect("valid regex"));

/// Matcher for the C# SDK surface: `///` doc comments, visibility and
/// virtuality modifiers in either order, and `[Attribute]` annotations.
pub struct CSharpMatcher;

impl SyntaxMatcher for CSharpMatcher {
	fn match_comment(&self, line: &str) -> Option<String> {
		if line.trim().starts_with("///") {
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

		if let Some(captures) = RETURN_FIRST_FUNCTION.captures(line) {
			return Some(captures[4].to_string());
		}
		MODIFIER_FIRST_FUNCTION
			.captures(line)
			.map(|captures| captures[4].to_string())
	}

	fn match_member_variable(&self, line: &str) -> Option<String> {
		MEMBER_VARIABLE
			.captures(line.trim())
			.map(|captures| captures[3].to_string())
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
}
