//! termdeck core: slides and presentations for a terminal presenter.
//!
//! This crate provides:
//! - The [`Slide`] model: code, executable (Python/shell), markdown, text,
//!   function-defined and tabular slides sharing one lifecycle
//! - [`factory::load`], which picks a slide variant from a file extension
//! - [`Presentation`], the typed description of a deck, and its resolution
//!   into concrete slides
//! - [`loader`] functions reading TOML and JSON presentation documents
//!
//! The terminal UI is not part of this crate. Slides render into a
//! framework-neutral [`View`] and talk to the UI through the [`Host`] trait.
//!
//! # Example
//!
//! ```no_run
//! use termdeck_core::{load_presentation, HeadlessHost};
//!
//! let presentation = load_presentation("talk/presentation.toml")?;
//! let mut slides = presentation.create_slides()?;
//! let mut host = HeadlessHost::default();
//! for slide in &mut slides {
//!     println!("{:?}", slide.render(&mut host));
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod data;
pub mod error;
pub mod exec;
pub mod factory;
pub mod host;
pub mod loader;
pub mod presentation;
pub mod slide;
pub mod view;

pub use error::{PresentationError, SlideError};
pub use factory::{load, SlideOptions};
pub use host::{HeadlessHost, Host, Size};
pub use loader::{load_presentation, load_presentation_from_reader, DocumentFormat};
pub use presentation::{Presentation, SlideDescription, SlideEntry, SlideType};
pub use slide::{Mode, Slide, SlideKind};
pub use view::{TableView, View};

/// termdeck version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
