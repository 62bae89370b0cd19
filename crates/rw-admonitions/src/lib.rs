//! MkDocs-style admonitions for markdown documents.
//!
//! Detects admonition blocks in markdown source
//!
//! ```markdown
//! !!! warning "Difference between IP and domain searches"
//!     Scanning by IP address covers all services.
//!
//!     Scanning by domain name covers HTTP services only.
//! ```
//!
//! and rewrites each into a styled HTML container before the document is
//! parsed:
//!
//! ```html
//! <div class="admonition admonition-warning">
//! <div class="admonition-title"><p>Difference between IP and domain searches</p></div>
//! <p>Scanning by IP address covers all services.</p>
//! <p>Scanning by domain name covers HTTP services only.</p>
//! </div>
//! ```
//!
//! # Architecture
//!
//! [`AdmonitionRewriter`] is a pipeline [`Transform`]: it receives the
//! document tree and its [`SourceFile`], rewrites the source, re-parses it and
//! replaces the tree in place. Rendering and parsing are delegated to the
//! [`FragmentRenderer`] and [`TreeParser`] traits; [`CmarkRenderer`] and
//! [`CmarkParser`] implement them with pulldown-cmark.
//!
//! # Example
//!
//! ```
//! use rw_admonitions::{AdmonitionRewriter, CmarkParser, NodeKind, SourceFile, TreeParser};
//!
//! let markdown = "Intro.\n\n!!! note\n    Remember this.\n";
//! let mut file = SourceFile::new(markdown);
//! let mut tree = CmarkParser::new().parse_tree(markdown).unwrap();
//!
//! AdmonitionRewriter::new().rewrite(&mut tree, &mut file).unwrap();
//!
//! assert_eq!(tree.children[1].kind, NodeKind::HtmlBlock);
//! assert!(file.raw.unwrap().contains("<p>Remember this.</p>"));
//! ```

mod backend;
mod cmark;
mod config;
mod error;
mod kind;
mod rewriter;
mod scanner;
mod tree;

pub use backend::{FragmentRenderer, TreeParser};
pub use cmark::{CmarkParser, CmarkRenderer};
pub use config::AdmonitionConfig;
pub use error::{BoxError, ConfigError, RewriteError};
pub use kind::{AdmonitionKinds, DEFAULT_KINDS};
pub use rewriter::{AdmonitionRewriter, SourceFile, Transform};
pub use tree::{Node, NodeKind};
