//! Style table construction.
//!
//! Turns raw CSS text into a [`StyleTable`]: joined selector text mapped to
//! its declarations. Parsing is tokenizer-level only; selector preludes are
//! captured as raw text because matching is purely structural and never
//! interprets selector semantics.
//!
//! Recovery policy: malformed rules and declarations are skipped in place
//! and never surface as errors. At-rules with a block (`@media`,
//! `@supports`, `@keyframes`) are traversed recursively so nested rules land
//! in the table like top-level ones; block-less at-rules (`@import`,
//! `@charset`) are ignored.

use cssparser::{Delimiter, ParseError, Parser, ParserInput, Token};

use crate::types::{DeclarationSet, StyleTable};

/// Parse CSS text into a style table.
///
/// Selector fragments of one rule are trimmed and re-joined with `","` to
/// form the table key. If two rules produce the same key, the later rule's
/// declarations overwrite the earlier one's for overlapping properties;
/// non-overlapping properties are kept.
pub fn build_style_table(css: &str) -> StyleTable {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut table = StyleTable::new();
    parse_rule_list(&mut parser, &mut table);
    table
}

fn parse_rule_list<'i>(parser: &mut Parser<'i, '_>, table: &mut StyleTable) {
    loop {
        parser.skip_whitespace();
        if parser.is_exhausted() {
            break;
        }
        if parse_rule(parser, table).is_err() {
            recover_to_next_rule(parser);
        }
    }
}

fn parse_rule<'i>(
    parser: &mut Parser<'i, '_>,
    table: &mut StyleTable,
) -> Result<(), ParseError<'i, ()>> {
    let is_at_rule = parser
        .try_parse(|p| -> Result<(), ParseError<'i, ()>> {
            let at_keyword = matches!(p.next()?, Token::AtKeyword(_));
            if at_keyword {
                Ok(())
            } else {
                Err(p.new_custom_error(()))
            }
        })
        .is_ok();
    if is_at_rule {
        return parse_at_rule_body(parser, table);
    }

    // Qualified rule: raw comma-separated selector fragments up to the block.
    // A top-level semicolon cannot occur in a selector, so it ends the
    // prelude and the rule is treated as malformed.
    let selectors: Vec<String> = parser
        .parse_until_before(Delimiter::CurlyBracketBlock | Delimiter::Semicolon, |p| {
            p.parse_comma_separated(|p| -> Result<String, ParseError<'i, ()>> {
                let start = p.position();
                while p.next().is_ok() {}
                Ok(p.slice_from(start).trim().to_string())
            })
        })?
        .into_iter()
        .filter(|fragment| !fragment.is_empty())
        .collect();
    parser.expect_curly_bracket_block()?;
    if selectors.is_empty() {
        // A block with no selector text is malformed; consume and drop it.
        return parser.parse_nested_block(|p| {
            while p.next().is_ok() {}
            Ok(())
        });
    }

    let declarations = table.entry(selectors.join(",")).or_default();
    parser.parse_nested_block(|p| {
        parse_declarations_into(p, declarations);
        Ok(())
    })
}

/// Consume an at-rule after its `@keyword` token. The prelude is discarded;
/// a trailing block is walked for nested rules.
fn parse_at_rule_body<'i>(
    parser: &mut Parser<'i, '_>,
    table: &mut StyleTable,
) -> Result<(), ParseError<'i, ()>> {
    parser.parse_until_before(
        Delimiter::CurlyBracketBlock | Delimiter::Semicolon,
        |p| -> Result<(), ParseError<'i, ()>> {
            while p.next().is_ok() {}
            Ok(())
        },
    )?;
    let has_block = matches!(parser.next(), Ok(Token::CurlyBracketBlock));
    if has_block {
        parser.parse_nested_block(|p| {
            parse_rule_list(p, table);
            Ok(())
        })?;
    }
    Ok(())
}

fn parse_declarations_into(parser: &mut Parser<'_, '_>, out: &mut DeclarationSet) {
    loop {
        parser.skip_whitespace();
        if parser.is_exhausted() {
            break;
        }
        if let Some((name, value)) = parse_declaration(parser) {
            out.insert(name, value);
        }
    }
}

/// One `name: value` declaration. Returns `None` for malformed declarations
/// (missing name, colon, or value) after consuming through the terminating
/// semicolon, so the caller can continue with the next declaration.
fn parse_declaration<'i>(parser: &mut Parser<'i, '_>) -> Option<(String, String)> {
    parser
        .parse_until_after(Delimiter::Semicolon, |p| -> Result<Option<(String, String)>, ParseError<'i, ()>> {
            let name = p.expect_ident()?.to_string();
            p.expect_colon()?;
            p.skip_whitespace();
            let start = p.position();
            let mut important = false;
            loop {
                let bang = match p.next() {
                    Ok(Token::Delim('!')) => true,
                    Ok(_) => false,
                    Err(_) => break,
                };
                if bang && p.try_parse(|q| q.expect_ident_matching("important")).is_ok() {
                    important = true;
                }
            }
            let raw = p.slice_from(start).trim();
            // The stored value excludes any `!important` suffix, matching how
            // declaration values are compared.
            let value = if important {
                match raw.rfind('!') {
                    Some(idx) => raw[..idx].trim_end(),
                    None => raw,
                }
            } else {
                raw
            };
            if value.is_empty() {
                return Ok(None);
            }
            Ok(Some((name, value.to_string())))
        })
        .ok()
        .flatten()
}

/// Skip past the next block or semicolon so rule parsing can resume.
fn recover_to_next_rule<'i>(parser: &mut Parser<'i, '_>) {
    let _ = parser.parse_until_after(
        Delimiter::CurlyBracketBlock | Delimiter::Semicolon,
        |p| -> Result<(), ParseError<'i, ()>> {
            while p.next().is_ok() {}
            Ok(())
        },
    );
}
