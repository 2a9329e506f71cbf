//! Slides rendered by a user-supplied function.

use std::fmt;

use crate::host::Host;
use crate::view::View;

type RenderFn = Box<dyn Fn(&dyn Host) -> View>;

/// Any slide created from a function of the hosting application.
///
/// Strings returned by the function become dedented markdown. Views are
/// shown as returned.
pub struct FuncSlide {
    render: RenderFn,
}

impl FuncSlide {
    pub fn new<F, R>(render: F) -> Self
    where
        F: Fn(&dyn Host) -> R + 'static,
        R: Into<View>,
    {
        Self {
            render: Box::new(move |host| render(host).into()),
        }
    }

    pub fn render(&self, host: &dyn Host) -> View {
        (self.render)(host)
    }
}

impl fmt::Debug for FuncSlide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuncSlide").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HeadlessHost, Size};

    #[test]
    fn string_results_render_as_markdown() {
        let slide = FuncSlide::new(|host: &dyn Host| {
            format!(
                "
                # Terminal
                {} columns
                ",
                host.size().width
            )
        });
        let view = slide.render(&HeadlessHost::new(Size::new(132, 43)));
        assert_eq!(view, View::markdown("\n# Terminal\n132 columns\n"));
    }

    #[test]
    fn views_pass_through() {
        let slide = FuncSlide::new(|_: &dyn Host| View::Text("raw".into()));
        assert_eq!(slide.render(&HeadlessHost::default()), View::Text("raw".into()));
    }

    #[test]
    fn explicit_markdown_keeps_indentation() {
        let slide = FuncSlide::new(|_: &dyn Host| View::markdown("    let x = 1;"));
        assert_eq!(slide.render(&HeadlessHost::default()), View::markdown("    let x = 1;"));

        let slide = FuncSlide::new(|_: &dyn Host| "    let x = 1;");
        assert_eq!(slide.render(&HeadlessHost::default()), View::markdown("let x = 1;"));
    }
}
