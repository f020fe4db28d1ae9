//! # Simple Pages
//!
//! A minimal static page generator. A directory of markdown documents becomes
//! a directory of HTML pages, and one designated document becomes an index
//! listing all the others.
//!
//! # Pipeline
//!
//! ```text
//! pages/*.md  →  markdown → HTML  →  page template  →  src/*.html
//! pages/index.md + listing        →  index template →  index.html
//! ```
//!
//! There is no intermediate state, no cache, and no concurrency: every build
//! reads everything and rewrites everything, in one pass.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | Filename → display title and output filename |
//! | [`markup`] | Markdown rendering with highlighted code blocks, `.md` → `.html` rewrite, `{IMAGE ...}` placeholders |
//! | [`template`] | Literal `{NAME}` token substitution |
//! | [`index`] | Source directory scan and the generated `{ENTRIES}` listing |
//! | [`generate`] | Per-page pipeline and the build driver |
//! | [`config`] | `config.toml` loading, merging onto stock defaults, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Plain Token Substitution
//!
//! Templates are ordinary HTML files with `{NAME}`, `{BODY}`, and `{ENTRIES}`
//! tokens. Substitution is literal and sequential; unknown tokens pass through
//! untouched, so templates can carry text that merely looks like a token.
//!
//! ## Explicit Index Order
//!
//! Directory listing order differs between platforms and filesystems. The
//! index is always sorted, by filename unless `config.toml` asks for
//! modification time.

pub mod config;
pub mod generate;
pub mod index;
pub mod markup;
pub mod naming;
pub mod output;
pub mod template;
