use crate::DoctagResult;
use crate::matcher::Language;
use crate::matcher::SyntaxMatcher;
use crate::scanner::LineScanner;

/// Strips stale tags and comments from a source file's lines, scans the
/// remainder for declarations, and splices a tag marker line above each
/// one. Running the builder over its own output reproduces it, so files
/// can be re-tagged in place.
pub struct TagBuilder {
	matcher: Box<dyn SyntaxMatcher>,
}

impl TagBuilder {
	pub fn new(language: Language) -> Self {
		Self {
			matcher: language.matcher(),
		}
	}

	pub fn with_matcher(matcher: Box<dyn SyntaxMatcher>) -> Self {
		Self { matcher }
	}

	/// Tag one file's lines. Previously emitted tag markers and comment
	/// lines are dropped first; comments are regenerated downstream from
	/// the template, not preserved.
	pub fn build(&self, source_lines: &[String]) -> DoctagResult<Vec<String>> {
		let lines: Vec<String> = source_lines
			.iter()
			.filter(|line| {
				self.matcher.match_comment(line).is_none() && self.matcher.match_tag(line).is_none()
			})
			.cloned()
			.collect();

		let tokens = LineScanner::new(self.matcher.as_ref(), &lines).tokenize()?;

		let mut output = Vec::with_capacity(lines.len() + tokens.len());
		let mut copied_to = 0;
		for token in &tokens {
			let offset = token.insert_offset();
			output.extend_from_slice(&lines[copied_to..offset]);
			if let Some(tag) = self.matcher.render_tag(token) {
				output.push(tag);
			}
			output.push(lines[offset].clone());
			copied_to = offset + 1;
		}

		if copied_to < lines.len() {
			output.extend_from_slice(&lines[copied_to..]);
		}

		Ok(output)
	}

	/// Tag a whole file's contents, preserving the line-based structure.
	pub fn build_str(&self, source: &str) -> DoctagResult<String> {
		let lines: Vec<String> = source.lines().map(str::to_string).collect();
		Ok(self.build(&lines)?.join("\n"))
	}
}
