use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;

use doctag_core::CommentStore;
use doctag_core::DoctagError;
use doctag_core::DoctagResult;
use doctag_core::LanguageFormat;
use doctag_core::Tag2Doc;
use doctag_core::TagBuilder;

use crate::DoctagCli;
use crate::ExportLanguage;
use crate::export::parse_export_files;

/// Drive the whole pipeline for one export file. Returns the number of
/// source files rewritten.
pub fn run(cli: &DoctagCli) -> DoctagResult<usize> {
	let export_dir = cli
		.export_file_path
		.parent()
		.unwrap_or_else(|| Path::new(""))
		.to_path_buf();

	let template_path = match (&cli.template, &cli.template_url) {
		(Some(path), _) => path.clone(),
		(None, Some(url)) => fetch_template(url, &export_dir)?,
		(None, None) => unreachable!("clap requires a template source"),
	};

	let format = LanguageFormat::from_yaml(&fs::read_to_string(&cli.config)?)?;

	let mut store = CommentStore::new(cli.language.template_options());
	store.add_source(&fs::read_to_string(&template_path)?)?;
	tracing::debug!(records = store.len(), "loaded documentation template");

	let files = parse_export_files(cli.language, &cli.export_file_path)?;
	let builder = TagBuilder::new(cli.language.language());
	let renderer = Tag2Doc::new(format, store.into_table());

	for path in &files {
		process_file(&builder, &renderer, path, cli.debug_show_tag)?;
	}

	if cli.language == ExportLanguage::Dart {
		format_dart_sources(&export_dir);
	}

	Ok(files.len())
}

/// Download the template next to the export file, under a fresh `build`
/// directory, and return the path of the saved copy.
fn fetch_template(url: &str, export_dir: &Path) -> DoctagResult<PathBuf> {
	let build_dir = export_dir.join("build");
	if build_dir.exists() {
		fs::remove_dir_all(&build_dir)?;
	}
	fs::create_dir_all(&build_dir)?;

	tracing::info!(url, "downloading documentation template");
	let body = reqwest::blocking::get(url)
		.and_then(reqwest::blocking::Response::error_for_status)
		.and_then(|response| response.text())
		.map_err(|error| DoctagError::TemplateFetch {
			url: url.to_string(),
			reason: error.to_string(),
		})?;

	let name = url
		.trim_end_matches('/')
		.rsplit('/')
		.next()
		.filter(|name| !name.is_empty())
		.unwrap_or("template.json");
	let path = build_dir.join(name);
	fs::write(&path, &body)?;

	Ok(path)
}

/// Rewrite one source file in place, working through a `.backup` copy so
/// a failure part way through leaves the original untouched.
fn process_file(
	builder: &TagBuilder,
	renderer: &Tag2Doc,
	path: &Path,
	debug_show_tag: bool,
) -> DoctagResult<()> {
	tracing::info!(path = %path.display(), "documenting");

	let mut backup = path.as_os_str().to_owned();
	backup.push(".backup");
	let backup = PathBuf::from(backup);
	fs::copy(path, &backup)?;

	let source = fs::read_to_string(&backup)?;
	let tagged = builder.build_str(&source)?;
	let mut rendered = renderer.process(&tagged);
	if !debug_show_tag {
		rendered = renderer.force_no_doc(&rendered);
	}

	fs::write(&backup, &rendered)?;
	fs::copy(&backup, path)?;
	fs::remove_file(&backup)?;

	Ok(())
}

/// `dart format` normalizes the indentation of the freshly spliced
/// comments. A missing or failing formatter is reported, not fatal.
fn format_dart_sources(directory: &Path) {
	match Command::new("dart")
		.arg("format")
		.arg(".")
		.current_dir(directory)
		.status()
	{
		Ok(status) if status.success() => {}
		Ok(status) => tracing::warn!(%status, "dart format reported failure"),
		Err(error) => tracing::warn!(%error, "dart format could not be run"),
	}
}
