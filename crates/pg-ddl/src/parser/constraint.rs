use crate::{
    ast::{
        constraint::{
            ConstraintTiming, ExcludeElement, ForeignKeyReference, MatchType, ReferentialAction,
            TableConstraint, TableConstraintKind,
        },
        table::{LikeClause, LikeOption, LikeOptionKind},
    },
    cursor::TokenCursor,
    errors::ParseError,
    lexer::token::TokenKind,
    parser::{
        parse_constraint_name, parse_expression_until, parse_identifier, parse_identifier_list,
        parse_list, parse_parenthesized, parse_qualified_name,
    },
};
use tracing::debug;

pub(crate) fn parse_table_constraint<C: TokenCursor>(
    tokens: &mut C,
) -> Result<TableConstraint, ParseError> {
    let name = parse_constraint_name(tokens)?;

    let kind = if tokens.consume_if("CHECK") {
        let expr = parse_parenthesized(tokens)?;
        let no_inherit = tokens.expect_sequence(&["NO", "INHERIT"])?;
        TableConstraintKind::Check { expr, no_inherit }
    } else if tokens.consume_if("UNIQUE") {
        let columns = parse_identifier_list(tokens, "column name")?;
        let include = parse_include(tokens)?;
        TableConstraintKind::Unique { columns, include }
    } else if tokens.expect_sequence(&["PRIMARY", "KEY"])? {
        let columns = parse_identifier_list(tokens, "column name")?;
        let include = parse_include(tokens)?;
        TableConstraintKind::PrimaryKey { columns, include }
    } else if tokens.expect_sequence(&["FOREIGN", "KEY"])? {
        let columns = parse_identifier_list(tokens, "column name")?;
        tokens.expect("REFERENCES")?;
        let reference = parse_references(tokens)?;
        TableConstraintKind::ForeignKey { columns, reference }
    } else if tokens.consume_if("EXCLUDE") {
        parse_exclude(tokens)?
    } else {
        return Err(tokens.unexpected("CHECK, UNIQUE, PRIMARY KEY, FOREIGN KEY or EXCLUDE"));
    };

    let timing = if kind.accepts_timing() {
        parse_constraint_timing(tokens)?
    } else {
        ConstraintTiming::default()
    };

    debug!(constraint = ?name, "Parsed table constraint");
    Ok(TableConstraint { name, kind, timing })
}

/// Any sequence of `[NOT] DEFERRABLE` and `INITIALLY { DEFERRED | IMMEDIATE }`.
fn parse_constraint_timing<C: TokenCursor>(tokens: &mut C) -> Result<ConstraintTiming, ParseError> {
    let mut timing = ConstraintTiming::default();
    loop {
        let negated = tokens.consume_if("NOT");
        if !parse_timing_attribute(tokens, &mut timing, negated)? {
            return Ok(timing);
        }
    }
}

/// Reads one timing attribute into `timing`. `negated` means a `NOT` was
/// already consumed, so only `DEFERRABLE` may follow. Each attribute may be
/// given once per constraint.
pub(crate) fn parse_timing_attribute<C: TokenCursor>(
    tokens: &mut C,
    timing: &mut ConstraintTiming,
    negated: bool,
) -> Result<bool, ParseError> {
    if tokens.check("DEFERRABLE") {
        if timing.deferrable.is_some() {
            return Err(tokens.unexpected("a single DEFERRABLE or NOT DEFERRABLE"));
        }
        tokens.advance();
        timing.deferrable = Some(!negated);
        return Ok(true);
    }

    if negated {
        return Err(tokens.unexpected("DEFERRABLE"));
    }

    if !tokens.check("INITIALLY") {
        return Ok(false);
    }
    if timing.initially_deferred.is_some() {
        return Err(tokens.unexpected("a single INITIALLY clause"));
    }
    tokens.advance();

    let deferred = if tokens.consume_if("DEFERRED") {
        true
    } else if tokens.consume_if("IMMEDIATE") {
        false
    } else {
        return Err(tokens.unexpected("DEFERRED or IMMEDIATE"));
    };
    timing.initially_deferred = Some(deferred);
    Ok(true)
}

fn parse_include<C: TokenCursor>(tokens: &mut C) -> Result<Vec<String>, ParseError> {
    if tokens.consume_if("INCLUDE") {
        parse_identifier_list(tokens, "column name")
    } else {
        Ok(Vec::new())
    }
}

/// `EXCLUDE [USING method] ( element WITH operator [, ...] ) [WHERE ( predicate )]`
fn parse_exclude<C: TokenCursor>(tokens: &mut C) -> Result<TableConstraintKind, ParseError> {
    let method = if tokens.consume_if("USING") {
        Some(parse_identifier(tokens, "index method")?)
    } else {
        None
    };

    let elements = parse_list(tokens, |tokens| {
        let element = parse_expression_until(tokens, &["WITH", ","], "exclusion element")?;
        tokens.expect("WITH")?;
        let operator = match tokens.current().kind {
            TokenKind::Operator | TokenKind::Word => tokens.current_text().to_string(),
            _ => return Err(tokens.unexpected("exclusion operator")),
        };
        tokens.advance();
        Ok(ExcludeElement { element, operator })
    })?;

    let predicate = if tokens.consume_if("WHERE") {
        Some(parse_parenthesized(tokens)?)
    } else {
        None
    };

    Ok(TableConstraintKind::Exclude {
        method,
        elements,
        predicate,
    })
}

/// Target of `REFERENCES`: table, optional column list, `MATCH` and
/// `ON DELETE` / `ON UPDATE` actions in any order.
pub(crate) fn parse_references<C: TokenCursor>(
    tokens: &mut C,
) -> Result<ForeignKeyReference, ParseError> {
    let table = parse_qualified_name(tokens, "referenced table")?;
    let mut reference = ForeignKeyReference::new(&table);

    if tokens.check("(") {
        reference.columns = parse_identifier_list(tokens, "referenced column")?;
    }

    if tokens.consume_if("MATCH") {
        let match_type = if tokens.consume_if("FULL") {
            MatchType::Full
        } else if tokens.consume_if("PARTIAL") {
            MatchType::Partial
        } else if tokens.consume_if("SIMPLE") {
            MatchType::Simple
        } else {
            return Err(tokens.unexpected("FULL, PARTIAL or SIMPLE"));
        };
        reference.match_type = Some(match_type);
    }

    while tokens.consume_if("ON") {
        if tokens.consume_if("DELETE") {
            reference.on_delete = Some(parse_referential_action(tokens)?);
        } else if tokens.consume_if("UPDATE") {
            reference.on_update = Some(parse_referential_action(tokens)?);
        } else {
            return Err(tokens.unexpected("DELETE or UPDATE"));
        }
    }

    Ok(reference)
}

fn parse_referential_action<C: TokenCursor>(
    tokens: &mut C,
) -> Result<ReferentialAction, ParseError> {
    if tokens.consume_if("CASCADE") {
        Ok(ReferentialAction::Cascade)
    } else if tokens.consume_if("RESTRICT") {
        Ok(ReferentialAction::Restrict)
    } else if tokens.expect_sequence(&["NO", "ACTION"])? {
        Ok(ReferentialAction::NoAction)
    } else if tokens.consume_if("SET") {
        if tokens.consume_if("NULL") {
            Ok(ReferentialAction::SetNull)
        } else if tokens.consume_if("DEFAULT") {
            Ok(ReferentialAction::SetDefault)
        } else {
            Err(tokens.unexpected("NULL or DEFAULT"))
        }
    } else {
        Err(tokens.unexpected("CASCADE, RESTRICT, NO ACTION, SET NULL or SET DEFAULT"))
    }
}

/// `LIKE source { INCLUDING | EXCLUDING } option ...`
pub(crate) fn parse_like_clause<C: TokenCursor>(tokens: &mut C) -> Result<LikeClause, ParseError> {
    tokens.expect("LIKE")?;
    let source = parse_qualified_name(tokens, "source table")?;

    let mut options = Vec::new();
    loop {
        let including = if tokens.consume_if("INCLUDING") {
            true
        } else if tokens.consume_if("EXCLUDING") {
            false
        } else {
            break;
        };

        let kind = match tokens.current().kind {
            TokenKind::Word => LikeOptionKind::from_keyword(tokens.current_text()),
            _ => None,
        }
        .ok_or_else(|| tokens.unexpected("LIKE option"))?;
        tokens.advance();

        options.push(LikeOption { including, kind });
    }

    debug!(source = %source, options = options.len(), "Parsed LIKE clause");
    Ok(LikeClause { source, options })
}
