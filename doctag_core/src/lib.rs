//! `doctag_core` regenerates SDK documentation comments from a shared
//! template. It scans API source files line by line, anchors a canonical
//! tag to every public declaration, and replaces each tag with the
//! comment rendered from the template in the target language's format.
//!
//! ## Processing Pipeline
//!
//! ```text
//! API source file
//!   -> TagBuilder (strips stale comments and tags, rescans declarations)
//!   -> LineScanner (matcher-driven scope walk producing Tokens)
//!   -> tag marker lines spliced above each declaration
//!   -> CommentStore (template records normalized to canonical ids)
//!   -> Tag2Doc (tags resolved and rendered as comment blocks)
//! ```
//!
//! ## Modules
//!
//! - [`matcher`]: the per-line [`SyntaxMatcher`] trait and the supported
//!   [`Language`] set.
//! - [`scanner`]: the scope-walking [`LineScanner`] and its [`Token`]
//!   output.
//! - [`tagger`]: the idempotent strip-then-splice [`TagBuilder`].
//! - [`template`]: template loading, id normalization, and the
//!   [`LanguageFormat`] comment fragments.
//! - [`renderer`]: [`Tag2Doc`], which turns tag marker lines into
//!   documentation comments.

pub use error::*;
pub use matcher::*;
pub use renderer::*;
pub use scanner::*;
pub use tagger::*;
pub use template::*;

mod error;
pub mod languages;
mod matcher;
mod renderer;
mod scanner;
mod tagger;
mod template;
