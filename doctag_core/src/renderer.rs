use std::collections::BTreeMap;

use crate::matcher::TAG_MARKER;
use crate::template::CommentSource;
use crate::template::LanguageFormat;

/// Strip a `##param#param` overload suffix from a tag id.
fn bare_id(tag: &str) -> &str {
	tag.split("##").next().unwrap_or(tag)
}

/// Split the `##param#param` overload suffix of a tag id into its
/// lowercased parameter names.
fn suffix_parameters(tag: &str) -> Option<Vec<String>> {
	let (_, suffix) = tag.split_once("##")?;
	Some(
		suffix
			.split('#')
			.filter(|name| !name.is_empty())
			.map(str::to_lowercase)
			.collect(),
	)
}

/// Replaces tag marker lines with rendered documentation comments.
///
/// The table is keyed by canonical tag id; tags that miss the table fall
/// through a series of relaxed lookups before being left in place.
pub struct Tag2Doc {
	format: LanguageFormat,
	sources: BTreeMap<String, CommentSource>,
}

impl Tag2Doc {
	pub fn new(format: LanguageFormat, sources: BTreeMap<String, CommentSource>) -> Self {
		Self { format, sources }
	}

	/// Rewrite every tag marker line of `code` into its documentation
	/// comment. Unresolved tags are logged and left in place.
	pub fn process(&self, code: &str) -> String {
		let mut output = Vec::new();
		for line in code.split('\n') {
			if let Some(captures) = TAG_MARKER.captures(line.trim()) {
				let tag = &captures[1];
				if let Some(source) = self.resolve(tag) {
					let indent = line.find('/').unwrap_or(0);
					output.push(self.generate_comment(Some(&source), indent));
					continue;
				}
				tracing::warn!(tag, "no comment source found");
			}
			output.push(line.to_string());
		}
		output.join("\n")
	}

	/// Rewrite any remaining tag marker lines into the ignore comment.
	/// Run after [`Self::process`] so sources the template never documents
	/// still end up marked instead of leaking raw tags.
	pub fn force_no_doc(&self, code: &str) -> String {
		let mut output = Vec::new();
		for line in code.split('\n') {
			let trimmed = line.trim();
			if trimmed.starts_with("/*") && trimmed.ends_with("*/") {
				let indent = line.find('/').unwrap_or(0);
				output.push(self.generate_comment(None, indent));
				continue;
			}
			output.push(line.to_string());
		}
		output.join("\n")
	}

	/// Find the comment source for a tag.
	///
	/// Lookup order: exact id, then an overloaded id whose parameter set
	/// matches the tag's regardless of order (reordered to the tag's), then
	/// the bare id with overload suffixes ignored on both sides, then a
	/// child synthesized from the owning record's parameter list.
	fn resolve(&self, tag: &str) -> Option<CommentSource> {
		if let Some(source) = self.sources.get(tag) {
			return Some(source.clone());
		}

		if let Some(tag_parameters) = suffix_parameters(tag) {
			let tag_base = bare_id(tag);
			for (id, source) in &self.sources {
				if bare_id(id) != tag_base {
					continue;
				}
				let Some(mut id_parameters) = suffix_parameters(id) else {
					continue;
				};
				id_parameters.sort();
				let mut sorted = tag_parameters.clone();
				sorted.sort();
				if id_parameters == sorted {
					let mut reordered = source.clone();
					reordered.parameters = tag_parameters
						.iter()
						.filter_map(|name| {
							source
								.parameters
								.iter()
								.find(|(parameter, _)| parameter.to_lowercase() == *name)
								.cloned()
						})
						.collect();
					return Some(reordered);
				}
			}
		}

		let tag_base = bare_id(tag);
		if let Some(source) = self.sources.get(tag_base) {
			return Some(source.clone());
		}
		for (id, source) in &self.sources {
			if bare_id(id) == tag_base {
				return Some(source.clone());
			}
		}

		// Member variables and enum values may only be documented through
		// their owning record's parameter list.
		let split: Vec<&str> = tag.split('_').collect();
		if split.len() >= 3 {
			let parent_tag = format!("{}_{}", split[0], split[1]);
			if let Some(parent) = self.sources.get(&parent_tag) {
				for (parameter, description) in &parent.parameters {
					if parameter.to_lowercase() == split[2].to_lowercase() {
						return Some(CommentSource {
							id: tag.to_string(),
							description: description.clone(),
							is_hide: parent.is_hide,
							..CommentSource::default()
						});
					}
				}
			}
		}

		None
	}

	/// Render the comment block for a source at a column. `None` and hidden
	/// sources render the ignore comment.
	pub fn generate_comment(&self, source: Option<&CommentSource>, indent: usize) -> String {
		let indent = " ".repeat(indent);

		let Some(source) = source.filter(|source| !source.is_hide) else {
			return self.ignore_comment(&indent);
		};

		let mut out = self.summary(source);

		// Parameter blocks belong to functions and to member records;
		// top-level classes and enums document theirs through children.
		if source.kind == "api" || source.id.split('_').count() > 2 {
			let parameters = self.parameter_block(source);
			if !parameters.is_empty() {
				out.push_str("\n\n");
				out.push_str(&parameters);
			}
		}

		let returns = self.return_block(source);
		if !returns.is_empty() {
			out.push_str("\n\n");
			out.push_str(&returns);
		}

		if out.is_empty() {
			return self.ignore_comment(&indent);
		}

		pair_content(
			&self.format.comment1,
			&self.format.comment3,
			&indent,
			"\n",
			&self.description_block(&out, &indent),
		)
	}

	fn ignore_comment(&self, indent: &str) -> String {
		pair_content(
			&self.format.comment1,
			&self.format.comment3,
			indent,
			"\n",
			&self.description_block(&self.format.ignore, indent),
		)
	}

	/// Prefix every line of `text` with the comment leader at `indent`.
	fn description_block(&self, text: &str, indent: &str) -> String {
		text.split('\n')
			.map(|line| {
				let ws = if line.trim().is_empty() { "" } else { " " };
				format!("{indent}{}{ws}{line}", self.format.comment2)
			})
			.collect::<Vec<_>>()
			.join("\n")
	}

	fn summary(&self, source: &CommentSource) -> String {
		pair_content(
			&self.format.summary1,
			&self.format.summary2,
			"",
			"\n",
			&source.description,
		)
	}

	fn parameter_block(&self, source: &CommentSource) -> String {
		source
			.parameters
			.iter()
			.map(|(name, description)| {
				let name_part = pair_content(&self.format.param1, &self.format.param2, "", "", name);
				pair_content(&name_part, &self.format.param3, "", "", description)
			})
			.collect::<Vec<_>>()
			.join("\n")
	}

	fn return_block(&self, source: &CommentSource) -> String {
		pair_content(
			&self.format.return1,
			&self.format.return2,
			"",
			"\n",
			&source.returns,
		)
	}
}

/// Wrap non-empty `content` between two optional fragments. Empty content
/// collapses the whole block.
fn pair_content(pair1: &str, pair2: &str, indent: &str, separator: &str, content: &str) -> String {
	if content.is_empty() {
		return String::new();
	}

	let mut output = String::new();
	if !pair1.is_empty() {
		output.push_str(indent);
		output.push_str(pair1);
		output.push_str(separator);
	}
	output.push_str(content);
	if !pair2.is_empty() {
		output.push_str(separator);
		output.push_str(indent);
		output.push_str(pair2);
	}
	output
}
