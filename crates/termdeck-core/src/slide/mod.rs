//! The slide model.
//!
//! A [`Slide`] is one navigable unit of a presentation. Every variant shares
//! the same lifecycle:
//!
//! - `load`/`reload` re-read backing files (text variants never fail here)
//! - `render` turns the current state into a [`View`]
//! - `run` toggles executable slides between code and output

mod code;
mod data;
mod executable;
mod func;
mod markdown;
mod source;

pub use code::{visible_code, CodeSlide, DEFAULT_LANGUAGE};
pub use data::DataSlide;
pub use executable::{ExecutableSlide, ExecutionState, Mode};
pub use func::FuncSlide;
pub use markdown::{dedent, MarkdownSlide, TextSlide};
pub use source::SlideSource;

use std::fmt;
use std::path::Path;

use crate::error::SlideError;
use crate::exec::Interpreter;
use crate::host::Host;
use crate::view::View;

/// Variant tag of a slide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideKind {
    Code,
    Python,
    Shell,
    Markdown,
    Text,
    Func,
    Data,
    Error,
}

impl fmt::Display for SlideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Code => "code",
            Self::Python => "python",
            Self::Shell => "shell",
            Self::Markdown => "markdown",
            Self::Text => "text",
            Self::Func => "func",
            Self::Data => "data",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// A literal message shown in place of a slide that could not be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSlide {
    message: String,
}

impl ErrorSlide {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn render(&self) -> View {
        View::markdown(self.message.clone())
    }
}

/// One unit of displayed content in a presentation.
#[derive(Debug)]
pub enum Slide {
    Code(CodeSlide),
    Executable(ExecutableSlide),
    Markdown(MarkdownSlide),
    Text(TextSlide),
    Func(FuncSlide),
    Data(DataSlide),
    Error(ErrorSlide),
}

impl Slide {
    /// Inline markdown slide.
    pub fn markdown(source: impl Into<String>) -> Self {
        Self::Markdown(MarkdownSlide::new(source))
    }

    /// Inline Python slide.
    pub fn python(source: impl Into<String>) -> Self {
        Self::Executable(ExecutableSlide::python(source))
    }

    /// Inline shell slide.
    pub fn shell(source: impl Into<String>) -> Self {
        Self::Executable(ExecutableSlide::shell(source))
    }

    /// Slide rendered by `render` each time it is displayed.
    pub fn func<F, R>(render: F) -> Self
    where
        F: Fn(&dyn Host) -> R + 'static,
        R: Into<View>,
    {
        Self::Func(FuncSlide::new(render))
    }

    /// Error placeholder carrying a literal message.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(ErrorSlide::new(message))
    }

    pub fn kind(&self) -> SlideKind {
        match self {
            Self::Code(_) => SlideKind::Code,
            Self::Executable(slide) => match slide.interpreter() {
                Interpreter::Python => SlideKind::Python,
                Interpreter::Shell => SlideKind::Shell,
            },
            Self::Markdown(_) => SlideKind::Markdown,
            Self::Text(_) => SlideKind::Text,
            Self::Func(_) => SlideKind::Func,
            Self::Data(_) => SlideKind::Data,
            Self::Error(_) => SlideKind::Error,
        }
    }

    /// File backing this slide, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Code(slide) => slide.path(),
            Self::Executable(slide) => slide.path(),
            Self::Markdown(slide) => slide.path(),
            Self::Text(slide) => slide.path(),
            Self::Data(slide) => slide.path(),
            Self::Func(_) | Self::Error(_) => None,
        }
    }

    /// Raw text content. Empty for function and data slides.
    pub fn source(&self) -> &str {
        match self {
            Self::Code(slide) => slide.source(),
            Self::Executable(slide) => slide.source(),
            Self::Markdown(slide) => slide.source(),
            Self::Text(slide) => slide.source(),
            Self::Error(slide) => slide.message(),
            Self::Func(_) | Self::Data(_) => "",
        }
    }

    /// Whether `run` does anything for this slide.
    pub fn is_runnable(&self) -> bool {
        matches!(self, Self::Executable(slide) if slide.is_runnable())
    }

    /// Whether this slide only displays content.
    pub fn is_display_only(&self) -> bool {
        !matches!(self, Self::Executable(_))
    }

    /// Populate content from the backing file.
    ///
    /// Only data slides can fail, and only for configuration mistakes such as
    /// an unsupported format. Missing text files become placeholder content.
    pub fn load(&mut self) -> Result<(), SlideError> {
        match self {
            Self::Code(slide) => slide.load(),
            Self::Executable(slide) => slide.load(),
            Self::Markdown(slide) => slide.load(),
            Self::Text(slide) => slide.load(),
            Self::Data(slide) => slide.load()?,
            Self::Func(_) | Self::Error(_) => {}
        }
        Ok(())
    }

    /// Re-read the slide from disk, dropping cached execution output.
    pub fn reload(&mut self) -> Result<(), SlideError> {
        self.load()
    }

    pub fn render(&mut self, host: &mut dyn Host) -> View {
        match self {
            Self::Code(slide) => slide.render(),
            Self::Executable(slide) => slide.render(host),
            Self::Markdown(slide) => slide.render(),
            Self::Text(slide) => slide.render(),
            Self::Func(slide) => slide.render(host),
            Self::Data(slide) => slide.render(),
            Self::Error(slide) => slide.render(),
        }
    }

    /// Toggle execution for executable slides. No-op otherwise.
    pub fn run(&mut self) {
        if let Self::Executable(slide) = self {
            slide.run();
        }
    }
}

impl From<CodeSlide> for Slide {
    fn from(slide: CodeSlide) -> Self {
        Self::Code(slide)
    }
}

impl From<ExecutableSlide> for Slide {
    fn from(slide: ExecutableSlide) -> Self {
        Self::Executable(slide)
    }
}

impl From<MarkdownSlide> for Slide {
    fn from(slide: MarkdownSlide) -> Self {
        Self::Markdown(slide)
    }
}

impl From<TextSlide> for Slide {
    fn from(slide: TextSlide) -> Self {
        Self::Text(slide)
    }
}

impl From<DataSlide> for Slide {
    fn from(slide: DataSlide) -> Self {
        Self::Data(slide)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HeadlessHost;

    #[test]
    fn error_slide_renders_plain_markdown() {
        let mut slide = Slide::error("**Error**: Empty presentation.");
        assert_eq!(slide.kind(), SlideKind::Error);
        assert!(slide.reload().is_ok());
        assert_eq!(
            slide.render(&mut HeadlessHost::default()),
            View::markdown("**Error**: Empty presentation.")
        );
    }

    #[test]
    fn run_is_noop_for_display_slides() {
        let mut slide = Slide::markdown("# Hi");
        slide.run();
        assert!(!slide.is_runnable());
        assert_eq!(slide.render(&mut HeadlessHost::default()), View::markdown("# Hi"));
    }

    #[test]
    fn runnable_follows_executable_flag() {
        assert!(Slide::python("print(1)").is_runnable());
        let disabled: Slide = ExecutableSlide::python("print(1)").with_runnable(false).into();
        assert!(!disabled.is_runnable());
        assert!(!disabled.is_display_only());
    }

    #[test]
    fn func_slide_sees_host_size() {
        let mut slide = Slide::func(|host: &dyn Host| format!("{}x{}", host.size().width, host.size().height));
        assert_eq!(slide.render(&mut HeadlessHost::default()), View::markdown("80x24"));
        assert!(slide.path().is_none());
        assert_eq!(slide.source(), "");
    }
}
