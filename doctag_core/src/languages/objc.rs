use std::sync::LazyLock;

use regex::Regex;

use crate::matcher::SyntaxMatcher;

static CLASS: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"@(interface|protocol)\s+(\w+)\s*(:|<|$)").expect("valid regex"));
// Category extensions `@interface Foo (Bar)` open a scope of their own,
// so `(` is a valid continuation alongside the superclass and protocol
// list forms.
static CLASS_SCOPE_START: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"@(interface|protocol)\s+(\w+)\s*(:|<|\()").expect("valid regex"));
static MEMBER_FUNCTION: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[-+]\s*\((.*?)\)\s*(\w+)").expect("valid regex"));
static MEMBER_VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"@property.*?\b(\w+)\s*(?:NS_SWIFT_NAME|;)").expect("valid regex")
});
static ENUM: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"typedef\s*NS_ENUM\s*\(.*, (\w*)\)\s*\{?").expect("valid regex"));
static ENUM_VALUE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^(\w+)\s*=\s*[^,]+,?").expect("valid regex"));
static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^@\w+$").expect("valid regex"));
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^__(attribute|deprecated|availability)(__)?\b").expect("valid regex")
});
static ATTRIBUTE_EXCLUDED: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\b(class|enum|interface|protocol|struct)\b|IBInspectable|IBOutlet|IBAction|NS_ASSUME_NONNULL")
		.expect("valid regex")
});
static EXTENSION: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^@interface\s+(\w+)\s*\(\s*(\w+)\s*\)").expect("valid regex"));
static TYPED_CONSTANT: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?i)^static const ([A-Za-z<>0-9_]*) ([A-Za-z0-9_]+) = (.*);").expect("valid regex")
});
static UNTYPED_CONSTANT: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?i)^static const ([A-Za-z0-9_]+) = (.*);").expect("valid regex")
});
static SELECTOR_KEYWORD: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(\w+):").expect("valid regex"));

/// Matcher for Objective-C headers: `@interface`/`@protocol` blocks ended
/// by `@end`, `@property` members, `NS_ENUM` typedefs, and `[-+]` method
/// declarations whose selector keywords carry the parameters.
pub struct ObjCMatcher;

impl SyntaxMatcher for ObjCMatcher {
	fn match_comment(&self, line: &str) -> Option<String> {
		let trimmed = line.trim();
		if trimmed.starts_with("/*")
			|| trimmed.starts_with('*')
			|| trimmed.starts_with("///")
			|| (trimmed.ends_with("*/") && !trimmed.contains("/*"))
		{
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
		let constructor = Regex::new(&format!(
			r"^[-+]\s*\(\s*instancetype\s*\)\s*{}\s*\w*\s*\{{?",
			regex::escape(class_name)
		))
		.ok()?;
		if constructor.is_match(line.trim()) {
			return Some(class_name.to_string());
		}
		None
	}

	fn match_member_function(&self, line: &str) -> Option<String> {
		MEMBER_FUNCTION
			.captures(line.trim())
			.map(|captures| captures[2].to_string())
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
		if line.contains("NS_ASSUME_NONNULL") {
			return Some(line.to_string());
		}
		let trimmed = line.trim();
		if DIRECTIVE.is_match(trimmed) {
			return Some(trimmed.to_string());
		}
		if !ATTRIBUTE_EXCLUDED.is_match(trimmed) {
			if let Some(captures) = ATTRIBUTE.captures(trimmed) {
				return Some(captures[1].to_string());
			}
		}
		None
	}

	fn match_extension(&self, line: &str) -> Option<String> {
		EXTENSION
			.captures(line.trim())
			.map(|captures| format!("{}({})", &captures[1], &captures[2]))
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

	fn match_class_scope_start(&self, line: &str) -> bool {
		CLASS_SCOPE_START.is_match(line)
	}

	fn match_class_scope_end(&self, line: &str) -> bool {
		line.trim_start().starts_with("@end")
	}

	fn match_function_scope_start(&self, line: &str) -> bool {
		line.contains('{')
	}

	fn match_function_scope_end(&self, line: &str) -> bool {
		line.contains('}')
	}

	fn match_enum_scope_start(&self, line: &str) -> bool {
		self.match_enum(line).is_some()
	}

	fn match_enum_scope_end(&self, line: &str) -> bool {
		line.trim_start().starts_with("};")
	}

	fn match_parameter_scope_end(&self, line: &str) -> bool {
		line.contains(';')
	}

	fn find_function_parameter_list(&self, _function_name: &str, block: &str) -> Vec<String> {
		// `:(Type)name` pairs; the type may itself contain parentheses
		// (block types), so match the closing paren by depth.
		let mut parameters = Vec::new();
		let bytes = block.as_bytes();
		let mut index = 0;
		while index < bytes.len() {
			if bytes[index] == b':' {
				let mut cursor = index + 1;
				while cursor < bytes.len() && bytes[cursor].is_ascii_whitespace() {
					cursor += 1;
				}
				if cursor < bytes.len() && bytes[cursor] == b'(' {
					let mut depth = 0i32;
					let mut close = None;
					for (offset, ch) in block[cursor..].char_indices() {
						match ch {
							'(' => depth += 1,
							')' => {
								depth -= 1;
								if depth == 0 {
									close = Some(cursor + offset);
									break;
								}
							}
							_ => {}
						}
					}
					if let Some(close) = close {
						let name: String = block[close + 1..]
							.chars()
							.take_while(|ch| ch.is_alphanumeric() || *ch == '_')
							.collect();
						if !name.is_empty() {
							parameters.push(name);
						}
						index = close;
					}
				}
			}
			index += 1;
		}
		parameters
	}

	fn refine_function_name(&self, owner: Option<&str>, matched: &str, block: &str) -> Option<String> {
		// Delegate-style callbacks name the receiver in the first selector
		// keyword (`rtcEngine:didOccurError:`); the documented name is the
		// second keyword.
		let owner = owner?;
		if !owner.to_lowercase().contains(&matched.to_lowercase()) {
			return None;
		}
		let selector = block.split("NS_SWIFT_NAME").next().unwrap_or(block);
		let keywords: Vec<&str> = SELECTOR_KEYWORD
			.captures_iter(selector)
			.map(|captures| captures.get(1).map_or("", |name| name.as_str()))
			.collect();
		if keywords.len() > 1 {
			return Some(keywords[1].to_string());
		}
		None
	}
}
