use std::path::PathBuf;

use clap::ArgGroup;
use clap::Parser;
use clap::ValueEnum;
use doctag_core::Language;
use doctag_core::TemplateOptions;

pub use export::parse_export_files;
pub use pipeline::run;

mod export;
mod pipeline;


#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(group = ArgGroup::new("template_source").required(true).args(["template", "template_url"]))]
pub struct DoctagCli {
	/// Path to the YAML file describing the comment markers of the target
	/// language.
	#[arg(long, short)]
	pub config: PathBuf,

	/// Path to a documentation template JSON file.
	#[arg(long, short)]
	pub template: Option<PathBuf>,

	/// URL of a documentation template to download instead.
	#[arg(long)]
	pub template_url: Option<String>,

	/// Language of the files listed by the export file.
	#[arg(long, value_enum)]
	pub language: ExportLanguage,

	/// Path of the export file listing the source files to document.
	#[arg(long)]
	pub export_file_path: PathBuf,

	/// Keep unresolved tag markers in place instead of rewriting them to
	/// the ignore comment.
	#[arg(long, default_value_t = false)]
	pub debug_show_tag: bool,
}

/// Languages the cli can drive end to end.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportLanguage {
	Dart,
	Ts,
	Csharp,
	Objc,
}

impl ExportLanguage {
	pub fn language(self) -> Language {
		match self {
			Self::Dart => Language::Dart,
			Self::Ts => Language::TypeScript,
			Self::Csharp => Language::CSharp,
			Self::Objc => Language::ObjC,
		}
	}

	/// Id normalization options for the template table. Dart folds
	/// callback records into their owning class, typescript documents
	/// them as plain apis.
	pub fn template_options(self) -> TemplateOptions {
		match self {
			Self::Dart => TemplateOptions {
				callback_to_class: true,
				..TemplateOptions::default()
			},
			Self::Ts => TemplateOptions {
				callback_to_api: true,
				..TemplateOptions::default()
			},
			Self::Csharp | Self::Objc => TemplateOptions::default(),
		}
	}
}
