use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::LazyLock;

use doctag_core::DoctagError;
use doctag_core::DoctagResult;
use regex::Regex;

use crate::ExportLanguage;

static DART_EXPORT: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)^export '(.*)';$").unwrap());
static TS_EXPORT: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)^export \* from '\./(.*)';$").unwrap());

/// Expand an export file into the list of source files to document.
///
/// Dart export files are pure directive lists, so only the re-exported
/// files are returned. Typescript index files re-export their sibling
/// modules and carry declarations of their own, so the index file itself
/// comes first. The other languages have no export file convention and the
/// given file is the only entry.
pub fn parse_export_files(
	language: ExportLanguage,
	export_file_path: &Path,
) -> DoctagResult<Vec<PathBuf>> {
	let directory = export_file_path.parent().unwrap_or_else(|| Path::new(""));

	match language {
		ExportLanguage::Dart => {
			let text = fs::read_to_string(export_file_path)?;
			let files: Vec<PathBuf> = text
				.lines()
				.filter_map(|line| DART_EXPORT.captures(line.trim()))
				.map(|captures| directory.join(&captures[1]))
				.collect();

			if files.is_empty() {
				return Err(DoctagError::EmptyExport(
					export_file_path.display().to_string(),
				));
			}

			Ok(files)
		}
		ExportLanguage::Ts => {
			let text = fs::read_to_string(export_file_path)?;
			let mut files = vec![export_file_path.to_path_buf()];

			for line in text.lines() {
				let Some(captures) = TS_EXPORT.captures(line.trim()) else {
					continue;
				};

				let stem = &captures[1];
				let ts = directory.join(format!("{stem}.ts"));
				let tsx = directory.join(format!("{stem}.tsx"));
				if ts.exists() {
					files.push(ts);
				} else if tsx.exists() {
					files.push(tsx);
				}
			}

			Ok(files)
		}
		ExportLanguage::Csharp | ExportLanguage::Objc => Ok(vec![export_file_path.to_path_buf()]),
	}
}
