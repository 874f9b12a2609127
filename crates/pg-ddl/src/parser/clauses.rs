//! Clauses after the definition list.
//!
//! Each parser returns `None` without touching the cursor when its keyword is
//! absent, so the dispatcher can call them unconditionally in fixed order.

use crate::{
    ast::{
        expr::Expression,
        table::{OIDS_PARAMETER, OnCommit, PartitionSpec, PartitionStrategy, StorageValue},
    },
    cursor::TokenCursor,
    errors::ParseError,
    lexer::token::TokenKind,
    parser::{parse_expression_until, parse_identifier, parse_list, parse_qualified_name},
};
use std::collections::BTreeMap;
use tracing::debug;

pub(crate) fn parse_inherits<C: TokenCursor>(
    tokens: &mut C,
) -> Result<Option<Vec<String>>, ParseError> {
    if !tokens.consume_if("INHERITS") {
        return Ok(None);
    }

    let parents = parse_list(tokens, |tokens| parse_qualified_name(tokens, "parent table"))?;
    debug!(?parents, "Parsed INHERITS");
    Ok(Some(parents))
}

pub(crate) fn parse_partition_by<C: TokenCursor>(
    tokens: &mut C,
) -> Result<Option<PartitionSpec>, ParseError> {
    if !tokens.consume_if("PARTITION") {
        return Ok(None);
    }
    tokens.expect("BY")?;

    let strategy = match tokens.current().kind {
        TokenKind::Word => PartitionStrategy::from_keyword(tokens.current_text()),
        _ => None,
    }
    .ok_or_else(|| tokens.unexpected("RANGE, LIST or HASH"))?;
    tokens.advance();

    let keys: Vec<Expression> = parse_list(tokens, |tokens| {
        parse_expression_until(tokens, &[","], "partition key")
    })?;

    debug!(strategy = strategy.as_sql(), keys = keys.len(), "Parsed PARTITION BY");
    Ok(Some(PartitionSpec { strategy, keys }))
}

pub(crate) fn parse_using_method<C: TokenCursor>(
    tokens: &mut C,
) -> Result<Option<String>, ParseError> {
    if !tokens.consume_if("USING") {
        return Ok(None);
    }
    Ok(Some(parse_identifier(tokens, "access method")?))
}

/// `WITH ( key [= value] [, ...] )`, legacy `WITH OIDS`, or `WITHOUT OIDS`.
pub(crate) fn parse_storage_parameters<C: TokenCursor>(
    tokens: &mut C,
) -> Result<Option<BTreeMap<String, StorageValue>>, ParseError> {
    if tokens.consume_if("WITHOUT") {
        tokens.expect("OIDS")?;
        return Ok(Some(BTreeMap::from([(
            OIDS_PARAMETER.to_string(),
            StorageValue::Flag(false),
        )])));
    }

    if !tokens.consume_if("WITH") {
        return Ok(None);
    }

    if tokens.consume_if("OIDS") {
        return Ok(Some(BTreeMap::from([(
            OIDS_PARAMETER.to_string(),
            StorageValue::Flag(true),
        )])));
    }

    let entries = parse_list(tokens, parse_storage_parameter)?;
    debug!(parameters = entries.len(), "Parsed storage parameters");
    Ok(Some(entries.into_iter().collect()))
}

fn parse_storage_parameter<C: TokenCursor>(
    tokens: &mut C,
) -> Result<(String, StorageValue), ParseError> {
    let key = parse_qualified_name(tokens, "storage parameter")?;

    if !tokens.consume_if("=") {
        return Ok((key, StorageValue::Flag(true)));
    }

    let mut value = String::new();
    if tokens.check("-") || tokens.check("+") {
        value.push_str(tokens.current_text());
        tokens.advance();
    }

    match tokens.current().kind {
        TokenKind::Word | TokenKind::QuotedIdentifier | TokenKind::String | TokenKind::Number => {
            value.push_str(tokens.current_text());
            tokens.advance();
        }
        _ => return Err(tokens.unexpected("storage parameter value")),
    }

    Ok((key, StorageValue::Value(value)))
}

pub(crate) fn parse_on_commit<C: TokenCursor>(
    tokens: &mut C,
) -> Result<Option<OnCommit>, ParseError> {
    if !tokens.consume_if("ON") {
        return Ok(None);
    }
    tokens.expect("COMMIT")?;

    let action = if tokens.expect_sequence(&["PRESERVE", "ROWS"])? {
        OnCommit::PreserveRows
    } else if tokens.expect_sequence(&["DELETE", "ROWS"])? {
        OnCommit::DeleteRows
    } else if tokens.consume_if("DROP") {
        OnCommit::Drop
    } else {
        return Err(tokens.unexpected("PRESERVE ROWS, DELETE ROWS or DROP"));
    };

    Ok(Some(action))
}

pub(crate) fn parse_tablespace<C: TokenCursor>(
    tokens: &mut C,
) -> Result<Option<String>, ParseError> {
    if !tokens.consume_if("TABLESPACE") {
        return Ok(None);
    }
    Ok(Some(parse_identifier(tokens, "tablespace name")?))
}
