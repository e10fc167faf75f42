use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum DoctagError {
	#[error(transparent)]
	#[diagnostic(code(doctag::io_error))]
	Io(#[from] std::io::Error),

	#[error("line {line} is not a recognized scope start")]
	#[diagnostic(
		code(doctag::scope_mismatch),
		help(
			"the syntax matcher and the source file disagree about scope structure; this file \
			 cannot be tagged"
		)
	)]
	ScopeMismatch { line: usize },

	#[error("scope opened at line {line} never closes")]
	#[diagnostic(
		code(doctag::unclosed_scope),
		help("check the source file for unbalanced scope delimiters")
	)]
	UnclosedScope { line: usize },

	#[error("failed to parse documentation template: {0}")]
	#[diagnostic(
		code(doctag::template_parse),
		help(
			"the template must be a JSON array of records with `id`, `name`, `description`, \
			 `parameters`, `returns`, and `is_hide` fields"
		)
	)]
	TemplateParse(String),

	#[error("failed to parse format config: {0}")]
	#[diagnostic(
		code(doctag::config_parse),
		help(
			"the config must be a YAML mapping of comment marker fields (comment1, comment2, \
			 param1, ...)"
		)
	)]
	ConfigParse(String),

	#[error("failed to fetch template from `{url}`: {reason}")]
	#[diagnostic(code(doctag::template_fetch))]
	TemplateFetch { url: String, reason: String },

	#[error("export file `{0}` lists no source files")]
	#[diagnostic(
		code(doctag::empty_export),
		help("the export file must contain `export` directives pointing at the API source files")
	)]
	EmptyExport(String),
}

pub type DoctagResult<T> = Result<T, DoctagError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
