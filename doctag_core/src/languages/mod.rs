//! Per-language [`SyntaxMatcher`](crate::matcher::SyntaxMatcher)
//! implementations. Each variant is a set of line regexes plus overrides
//! of the generic scope/rendering behavior where the language differs.

pub mod csharp;
pub mod dart;
pub mod objc;
pub mod typescript;
