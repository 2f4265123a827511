//! Grammar productions for tree-sitter query documents.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.
//!
//! Omissions that the lints report (empty groupings, hanging captures, fields
//! without a value, predicates without parameters) are parsed silently into
//! incomplete nodes. Reporting them here too would double every such error.

use super::core::Parser;
use super::cst::SyntaxKind;
use super::cst::token_sets::{CLOSERS, PATTERN_FIRST, QUANTIFIERS, VALUE_FIRST};
use crate::diagnostics::DiagnosticKind;

impl Parser<'_> {
    pub fn parse_root(&mut self) {
        self.start_node(SyntaxKind::Program);

        while !self.at_end() {
            match self.current() {
                SyntaxKind::At => self.parse_detached_capture(),
                kind if PATTERN_FIRST.contains(kind) => self.parse_pattern(),
                _ => self.error_and_bump_msg(DiagnosticKind::UnexpectedToken, "expected a pattern"),
            }
        }

        self.eat_trivia();
        self.finish_node();
    }

    /// Any construct that can stand in a pattern position.
    fn parse_pattern(&mut self) {
        if !self.enter_recursion() {
            return;
        }

        match self.current() {
            SyntaxKind::ParenOpen => match self.peek_nth(1) {
                SyntaxKind::Sharp => self.parse_predicate(),
                SyntaxKind::Id | SyntaxKind::Underscore if self.peek_nth(2) != SyntaxKind::Colon => {
                    self.parse_named_node()
                }
                _ => self.parse_container(SyntaxKind::Grouping),
            },
            SyntaxKind::BracketOpen => self.parse_container(SyntaxKind::List),
            SyntaxKind::DoubleQuote | SyntaxKind::Underscore => self.parse_anonymous_node(),
            SyntaxKind::Id if self.next_is(SyntaxKind::Colon) => self.parse_field_definition(),
            SyntaxKind::Id => self.error_and_bump(DiagnosticKind::BareIdentifier),
            _ => self.error_and_bump_msg(DiagnosticKind::UnexpectedToken, "expected a pattern"),
        }

        self.exit_recursion();
    }

    /// `(kind items...)`, `(_ items...)`, `(supertype/subtype)`
    fn parse_named_node(&mut self) {
        self.start_node(SyntaxKind::NamedNode);
        self.push_delimiter();
        self.bump(); // `(`
        let is_missing = self.current_text() == "MISSING";
        self.bump(); // kind name or `_`

        if is_missing {
            // `(MISSING kind)` and `(MISSING "lit")` name what is missing.
            match self.current() {
                SyntaxKind::Id => self.bump(),
                SyntaxKind::DoubleQuote => self.parse_string(),
                _ => {}
            }
        } else if self.eat_token(SyntaxKind::Slash) && !self.eat_token(SyntaxKind::Id) {
            self.error(DiagnosticKind::ExpectedSubtype);
        }

        self.parse_items();
        self.close_delimiter(SyntaxKind::ParenClose, DiagnosticKind::UnclosedNode);
        self.parse_suffix();
        self.finish_node();
    }

    /// `( items... )` or `[ items... ]`
    fn parse_container(&mut self, kind: SyntaxKind) {
        let (close, unclosed) = if kind == SyntaxKind::List {
            (SyntaxKind::BracketClose, DiagnosticKind::UnclosedList)
        } else {
            (SyntaxKind::ParenClose, DiagnosticKind::UnclosedNode)
        };

        self.start_node(kind);
        self.push_delimiter();
        self.bump();
        self.parse_items();
        self.close_delimiter(close, unclosed);
        self.parse_suffix();
        self.finish_node();
    }

    /// Items inside a node or container, up to (not including) a closer.
    fn parse_items(&mut self) {
        loop {
            let kind = self.current();
            if self.eof() || CLOSERS.contains(kind) {
                break;
            }
            match kind {
                SyntaxKind::Bang => self.parse_negated_field(),
                SyntaxKind::Dot => self.bump(),
                SyntaxKind::At => self.parse_detached_capture(),
                kind if PATTERN_FIRST.contains(kind) => self.parse_pattern(),
                _ => self.error_and_bump_msg(DiagnosticKind::UnexpectedToken, "expected a pattern"),
            }
        }
    }

    /// `"literal"` or `_`, with optional quantifier and captures.
    fn parse_anonymous_node(&mut self) {
        self.start_node(SyntaxKind::AnonymousNode);
        if !self.eat_token(SyntaxKind::Underscore) {
            self.parse_string();
        }
        self.parse_suffix();
        self.finish_node();
    }

    fn parse_string(&mut self) {
        self.start_node(SyntaxKind::Str);
        let open = self.current_span();
        self.bump(); // opening quote

        if self.nth_raw(0) == SyntaxKind::StrVal {
            self.bump();
        }
        if self.nth_raw(0) == SyntaxKind::DoubleQuote {
            self.bump();
        } else {
            self.error_at(DiagnosticKind::UnclosedString, open);
        }

        self.finish_node();
    }

    /// `name: value`. A missing value is left for the lints.
    fn parse_field_definition(&mut self) {
        self.start_node(SyntaxKind::FieldDefinition);
        self.bump(); // name
        self.debug_expect(SyntaxKind::Colon);
        self.bump();
        if self.currently_is_one_of(VALUE_FIRST) {
            self.parse_pattern();
        }
        self.finish_node();
    }

    /// `!name`
    fn parse_negated_field(&mut self) {
        self.start_node(SyntaxKind::NegatedField);
        self.bump(); // `!`
        if !self.eat_token(SyntaxKind::Id) {
            self.error(DiagnosticKind::ExpectedFieldName);
        }
        self.finish_node();
    }

    /// `(#name? params...)` or `(#name! params...)`
    fn parse_predicate(&mut self) {
        self.start_node(SyntaxKind::Predicate);
        self.push_delimiter();
        self.bump(); // `(`
        self.debug_expect(SyntaxKind::Sharp);
        self.bump();

        if self.eat_token(SyntaxKind::Id) {
            if !self.eat_token(SyntaxKind::Question) && !self.eat_token(SyntaxKind::Bang) {
                self.error(DiagnosticKind::ExpectedPredicateType);
            }
        } else {
            self.error(DiagnosticKind::ExpectedPredicateName);
        }

        self.start_node(SyntaxKind::Parameters);
        loop {
            let kind = self.current();
            if self.eof() || CLOSERS.contains(kind) {
                break;
            }
            match kind {
                SyntaxKind::At => self.parse_capture(),
                SyntaxKind::DoubleQuote => self.parse_string(),
                SyntaxKind::Id | SyntaxKind::Underscore => self.bump(),
                _ => self.error_and_bump_msg(
                    DiagnosticKind::UnexpectedToken,
                    "expected a capture, string or identifier argument",
                ),
            }
        }
        self.finish_node();

        self.close_delimiter(SyntaxKind::ParenClose, DiagnosticKind::UnclosedNode);
        self.finish_node();
    }

    /// Optional quantifier, then any number of captures.
    fn parse_suffix(&mut self) {
        if self.currently_is_one_of(QUANTIFIERS) {
            self.start_node(SyntaxKind::Quantifier);
            self.bump();
            self.finish_node();
        }
        while self.currently_is(SyntaxKind::At) {
            self.parse_capture();
        }
    }

    /// `@name`. The name must follow the sigil immediately.
    fn parse_capture(&mut self) {
        self.start_node(SyntaxKind::Capture);
        self.bump(); // `@`
        if self.nth_raw(0) == SyntaxKind::Id {
            self.bump();
        }
        self.finish_node();
    }

    /// A capture that doesn't follow any pattern.
    fn parse_detached_capture(&mut self) {
        let start = self.current_span().start();
        self.parse_capture();

        let has_name = self
            .tokens
            .get(self.pos.wrapping_sub(1))
            .is_some_and(|t| t.kind == SyntaxKind::Id);
        if has_name {
            let end = self.tokens[self.pos - 1].span.end();
            self.error_at(
                DiagnosticKind::CaptureWithoutTarget,
                rowan::TextRange::new(start, end),
            );
        }
    }
}
