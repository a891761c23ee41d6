use std::fmt::Display;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::TextRange;

/// A message anchored to a source range. Non-fatal anomalies accumulate as
/// diagnostics on the build result; fatal factory errors convert into one
/// for rendering.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    message: String,
    range: TextRange,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, range: TextRange) -> Self {
        Self { message: message.into(), range }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let message = Level::Error.title(&self.message).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(Level::Error.span(self.range.into()).label("here"))
                .fold(true),
        );
        renderer.render(message)
    }
}

#[cfg(test)]
mod tests {
    use super::{Diagnostic, Renderer, TextRange};

    #[test]
    fn render_points_at_the_anchored_range() {
        let diagnostic =
            Diagnostic::error("unparsed text between elements", TextRange::new(3.into(), 6.into()));
        let rendered =
            diagnostic.render(&Renderer::plain(), "demo.raku", "1; ???\n").to_string();

        assert!(rendered.contains("unparsed text between elements"));
        assert!(rendered.contains("demo.raku"));
        assert!(rendered.contains("here"));
    }
}
