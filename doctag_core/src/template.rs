use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::de::MapAccess;
use serde::de::Visitor;

use crate::error::DoctagError;
use crate::error::DoctagResult;

/// The per-language comment rendering format, loaded from a `fmt.yaml`
/// file. Every field is a literal fragment; empty fragments are omitted
/// from the rendered comment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LanguageFormat {
	/// Opening line of a comment block.
	#[serde(deserialize_with = "null_string")]
	pub comment1: String,
	/// Per-line comment leader.
	#[serde(deserialize_with = "null_string")]
	pub comment2: String,
	/// Closing line of a comment block.
	#[serde(deserialize_with = "null_string")]
	pub comment3: String,
	#[serde(deserialize_with = "null_string")]
	pub summary1: String,
	#[serde(deserialize_with = "null_string")]
	pub summary2: String,
	#[serde(deserialize_with = "null_string")]
	pub tag1: String,
	#[serde(deserialize_with = "null_string")]
	pub tag2: String,
	/// Wrapped around a parameter name, followed by its description.
	#[serde(deserialize_with = "null_string")]
	pub param1: String,
	#[serde(deserialize_with = "null_string")]
	pub param2: String,
	#[serde(deserialize_with = "null_string")]
	pub param3: String,
	#[serde(deserialize_with = "null_string")]
	pub return1: String,
	#[serde(deserialize_with = "null_string")]
	pub return2: String,
	#[serde(deserialize_with = "null_string")]
	pub link1: String,
	#[serde(deserialize_with = "null_string")]
	pub link2: String,
	/// Body of the comment emitted for hidden or undocumented items.
	#[serde(deserialize_with = "null_string")]
	pub ignore: String,
}

impl Default for LanguageFormat {
	fn default() -> Self {
		Self {
			comment1: String::new(),
			comment2: "///".into(),
			comment3: String::new(),
			summary1: String::new(),
			summary2: String::new(),
			tag1: String::new(),
			tag2: String::new(),
			param1: String::new(),
			param2: String::new(),
			param3: String::new(),
			return1: String::new(),
			return2: String::new(),
			link1: String::new(),
			link2: String::new(),
			ignore: String::new(),
		}
	}
}

impl LanguageFormat {
	/// Parse a format from YAML text. Missing keys fall back to the
	/// defaults, `null` values to empty fragments.
	pub fn from_yaml(text: &str) -> DoctagResult<Self> {
		serde_yaml_ng::from_str(text).map_err(|error| DoctagError::ConfigParse(error.to_string()))
	}
}

/// One documented item from a template file.
///
/// `parameters` is flattened out of the template's list of single-entry
/// objects into ordered `(name, description)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CommentSource {
	#[serde(rename = "type_", deserialize_with = "null_string")]
	pub kind: String,
	#[serde(deserialize_with = "null_string")]
	pub id: String,
	#[serde(deserialize_with = "null_string")]
	pub name: String,
	#[serde(deserialize_with = "null_string")]
	pub description: String,
	#[serde(deserialize_with = "lenient_parameters")]
	pub parameters: Vec<(String, String)>,
	#[serde(deserialize_with = "null_string")]
	pub returns: String,
	#[serde(deserialize_with = "null_string")]
	pub deprecated: String,
	#[serde(deserialize_with = "null_string")]
	pub note: String,
	#[serde(deserialize_with = "null_string")]
	pub warning: String,
	#[serde(deserialize_with = "null_bool")]
	pub is_hide: bool,
}

fn null_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single parameter object from the template, in key order.
struct ParameterEntry(Vec<(String, String)>);

impl<'de> Deserialize<'de> for ParameterEntry {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		struct EntryVisitor;

		impl<'de> Visitor<'de> for EntryVisitor {
			type Value = ParameterEntry;

			fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
				formatter.write_str("a parameter object or null")
			}

			fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
			where
				A: MapAccess<'de>,
			{
				let mut pairs = Vec::new();
				while let Some(key) = map.next_key::<String>()? {
					let value = map.next_value::<Option<String>>()?.unwrap_or_default();
					pairs.push((key, value));
				}
				Ok(ParameterEntry(pairs))
			}

			fn visit_unit<E>(self) -> Result<Self::Value, E>
			where
				E: serde::de::Error,
			{
				tracing::warn!("skipping null parameter entry");
				Ok(ParameterEntry(Vec::new()))
			}
		}

		deserializer.deserialize_any(EntryVisitor)
	}
}

fn lenient_parameters<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
	D: Deserializer<'de>,
{
	let entries = Option::<Vec<ParameterEntry>>::deserialize(deserializer)?;
	Ok(entries
		.unwrap_or_default()
		.into_iter()
		.flat_map(|entry| entry.0)
		.collect())
}

/// Id normalization options, chosen per target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateOptions {
	/// Remap `callback_*` ids to `class_*`.
	pub callback_to_class: bool,
	/// Remap `callback_*` ids to `api_*`.
	pub callback_to_api: bool,
	/// Re-derive the record name through its owning class entry.
	pub id_pattern_v2: bool,
}

impl Default for TemplateOptions {
	fn default() -> Self {
		Self {
			callback_to_class: false,
			callback_to_api: false,
			id_pattern_v2: true,
		}
	}
}

/// The normalized comment table, keyed by canonical tag id.
///
/// Template files are JSON arrays of [`CommentSource`] records whose ids
/// carry assorted legacy shapes (`_ng` suffixes, display names with
/// bracketed qualifiers, `callback_` kinds). [`CommentStore::add_source`]
/// rewrites each id into the canonical form the tagger emits, so lookups
/// at render time are plain map hits.
#[derive(Debug, Default)]
pub struct CommentStore {
	options: TemplateOptions,
	sources: BTreeMap<String, CommentSource>,
}

impl CommentStore {
	pub fn new(options: TemplateOptions) -> Self {
		Self {
			options,
			sources: BTreeMap::new(),
		}
	}

	/// Parse one template file and merge its records into the table.
	///
	/// The first record to claim an id wins, both within one file and
	/// across files. Class and enum records with parameters are exploded
	/// into one child record per parameter, keyed `{id}_{name}`; children
	/// always overwrite.
	pub fn add_source(&mut self, json: &str) -> DoctagResult<()> {
		let raw: Vec<CommentSource> = serde_json::from_str(json)
			.map_err(|error| DoctagError::TemplateParse(error.to_string()))?;

		for entry in &raw {
			let mut name = entry.name.to_lowercase();
			// Visible display names may carry a bracketed qualifier:
			// `onError [1/2]` documents `onError`.
			if !entry.is_hide && name.ends_with(']') {
				if let Some(open) = name.find('[') {
					name = name[..open].trim_end().to_string();
				}
			}

			let mut id = entry
				.id
				.strip_suffix("_ng")
				.unwrap_or(&entry.id)
				.to_string();

			if self.options.id_pattern_v2 {
				let split: Vec<&str> = id.split('_').collect();
				if split.len() >= 2 {
					let mut kind = split[0].to_string();
					// Members key on their owning record's display name,
					// looked up by raw id in the same file.
					let lookup_kind = if kind == "api" || kind == "callback" {
						"class"
					} else {
						kind.as_str()
					};
					let lookup_id = format!("{lookup_kind}_{}", split[1]);
					let name1 = raw
						.iter()
						.find(|sibling| sibling.id == lookup_id)
						.map_or_else(|| entry.name.to_lowercase(), |parent| {
							parent.name.to_lowercase()
						});

					if self.options.callback_to_api && kind == "callback" {
						kind = "api".into();
					}
					if self.options.callback_to_class && kind == "callback" {
						kind = "class".into();
					}

					id = if split.len() == 3 {
						format!("{kind}_{name1}_{name}")
					} else {
						format!("{kind}_{name1}")
					};
				}
			}

			let kind = id.split('_').next().unwrap_or_default().to_string();

			if kind == "api" && !entry.parameters.is_empty() {
				let joined = entry
					.parameters
					.iter()
					.map(|(parameter, _)| parameter.as_str())
					.collect::<Vec<_>>()
					.join("#")
					.to_lowercase();
				id = format!("{id}##{joined}");
			}

			if self.sources.contains_key(&id) {
				continue;
			}

			let mut normalized = entry.clone();
			normalized.kind = kind.clone();
			normalized.id = id.clone();

			if (kind == "class" || kind == "enum") && !normalized.parameters.is_empty() {
				let parameters = std::mem::take(&mut normalized.parameters);
				let hidden = normalized.is_hide;
				self.sources.insert(id.clone(), normalized);

				for (parameter, description) in parameters {
					let child_id = format!("{id}_{}", parameter.to_lowercase());
					let child = CommentSource {
						id: child_id.clone(),
						name: parameter,
						description,
						is_hide: hidden,
						..CommentSource::default()
					};
					self.sources.insert(child_id, child);
				}
			} else {
				self.sources.insert(id, normalized);
			}
		}

		Ok(())
	}

	pub fn get(&self, id: &str) -> Option<&CommentSource> {
		self.sources.get(id)
	}

	pub fn len(&self) -> usize {
		self.sources.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sources.is_empty()
	}

	/// Consume the store into the plain lookup table the renderer keys on.
	pub fn into_table(self) -> BTreeMap<String, CommentSource> {
		self.sources
	}
}
