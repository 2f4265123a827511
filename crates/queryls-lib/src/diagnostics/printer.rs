//! Rendering diagnostics for terminals and logs.
//!
//! With a source, each diagnostic becomes one annotated report: the name of
//! the reporting check as its id, an unlabelled primary span (the title
//! already carries the message), related ranges as labelled context spans and
//! hints as `help` lines. Without a source, each diagnostic is one line in its
//! `Display` form.

use std::fmt::Write;
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use rowan::TextRange;

use super::Diagnostics;
use super::message::{Diagnostic, Severity};

pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            source: None,
            path: None,
            colored: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    /// Shown as the report origin. Only used together with a source.
    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        // Infallible for String.
        let _ = self.format(&mut out);
        out
    }

    /// Reports are separated by a blank line.
    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let Some(source) = self.source else {
            return self.format_plain(w);
        };

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_str("\n\n")?;
            }
            let group = report(diag, source, self.path);
            w.write_str(&renderer.render(&[group]))?;
        }
        Ok(())
    }

    fn format_plain(&self, w: &mut impl Write) -> std::fmt::Result {
        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{diag}")?;
        }
        Ok(())
    }
}

fn report<'a>(diag: &'a Diagnostic, source: &'a str, path: Option<&'a str>) -> Group<'a> {
    let mut snippet = Snippet::source(source)
        .line_start(1)
        .path(path)
        .annotation(AnnotationKind::Primary.span(span_in(diag.range(), source)));
    for related in diag.related() {
        snippet = snippet.annotation(
            AnnotationKind::Context
                .span(span_in(related.range(), source))
                .label(related.message()),
        );
    }

    let level = match diag.severity() {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    };
    let hints = diag.hints().iter().map(|hint| Level::HELP.message(hint.as_str()));

    level
        .primary_title(diag.message())
        .id(diag.kind().source())
        .element(snippet)
        .elements(hints)
}

/// Byte span for the renderer. An empty range (a missing token) covers the
/// next character so there is something to underline.
fn span_in(range: TextRange, source: &str) -> Range<usize> {
    let start = usize::from(range.start()).min(source.len());
    let end = usize::from(range.end()).min(source.len());
    if start < end {
        return start..end;
    }
    let next = source
        .get(start..)
        .and_then(|rest| rest.chars().next())
        .map_or(0, char::len_utf8);
    start..start + next
}

impl Diagnostics {
    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }
}
