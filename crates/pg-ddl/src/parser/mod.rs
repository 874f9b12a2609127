//! Recursive-descent parser for PostgreSQL `CREATE TABLE`.
//!
//! Every decision is taken from the current token alone. Sub-parsers either
//! consume at least one token or fail, so malformed input always runs into
//! `Eof` and errors out instead of looping.

use crate::{
    ast::{
        column::ColumnDefinition,
        constraint::TableConstraint,
        expr::Expression,
        table::{LikeClause, TableDefinition, TableScope},
    },
    cursor::TokenCursor,
    errors::ParseError,
    lexer::token::TokenKind,
};
use tracing::debug;

pub mod clauses;
pub mod column;
pub mod constraint;

/// Keywords that open a table constraint instead of a column definition.
const TABLE_CONSTRAINT_KEYWORDS: [&str; 6] =
    ["CONSTRAINT", "PRIMARY", "UNIQUE", "CHECK", "FOREIGN", "EXCLUDE"];

/// Stateless `CREATE TABLE` parser; all parse state lives in the cursor.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateTableParser;

#[derive(Debug, Default)]
struct TableModifiers {
    temporary: bool,
    unlogged: bool,
    scope: Option<TableScope>,
}

#[derive(Debug, Default)]
struct CreateDefinitions {
    columns: Vec<ColumnDefinition>,
    constraints: Vec<TableConstraint>,
    like: Option<LikeClause>,
}

impl CreateTableParser {
    pub fn new() -> Self {
        CreateTableParser
    }

    /// Parses one statement, through its terminating `;` when present.
    pub fn parse_tokens<C: TokenCursor>(
        &self,
        tokens: &mut C,
    ) -> Result<TableDefinition, ParseError> {
        tokens.expect("CREATE")?;

        let modifiers = parse_modifiers(tokens)?;
        tokens.expect("TABLE")?;

        let if_not_exists = tokens.expect_sequence(&["IF", "NOT", "EXISTS"])?;
        let name = parse_qualified_name(tokens, "table name")?;
        debug!(table = %name, "Parsing CREATE TABLE");

        let definitions = parse_create_definitions(tokens)?;

        let inherits = clauses::parse_inherits(tokens)?;
        let partition_by = clauses::parse_partition_by(tokens)?;
        let access_method = clauses::parse_using_method(tokens)?;
        let storage_parameters = clauses::parse_storage_parameters(tokens)?;
        let on_commit = clauses::parse_on_commit(tokens)?;
        let tablespace = clauses::parse_tablespace(tokens)?;

        parse_terminator(tokens)?;

        debug!(
            table = %name,
            columns = definitions.columns.len(),
            constraints = definitions.constraints.len(),
            "Parsed CREATE TABLE"
        );

        Ok(TableDefinition {
            name,
            columns: definitions.columns,
            constraints: definitions.constraints,
            like: definitions.like,
            inherits,
            partition_by,
            access_method,
            storage_parameters,
            on_commit,
            tablespace,
            is_temporary: modifiers.temporary,
            is_unlogged: modifiers.unlogged,
            if_not_exists,
            scope: modifiers.scope,
        })
    }
}

/// `TEMPORARY | TEMP | UNLOGGED | GLOBAL | LOCAL`, any order, up to `TABLE`.
fn parse_modifiers<C: TokenCursor>(tokens: &mut C) -> Result<TableModifiers, ParseError> {
    let mut modifiers = TableModifiers::default();

    while !tokens.check("TABLE") {
        if tokens.check("TEMPORARY") || tokens.check("TEMP") {
            modifiers.temporary = true;
        } else if tokens.check("UNLOGGED") {
            modifiers.unlogged = true;
        } else if tokens.check("GLOBAL") {
            modifiers.scope = Some(TableScope::Global);
        } else if tokens.check("LOCAL") {
            modifiers.scope = Some(TableScope::Local);
        } else {
            return Err(tokens.unexpected("TEMPORARY, TEMP, UNLOGGED, GLOBAL, LOCAL or TABLE"));
        }
        tokens.advance();
    }

    Ok(modifiers)
}

fn parse_create_definitions<C: TokenCursor>(
    tokens: &mut C,
) -> Result<CreateDefinitions, ParseError> {
    let mut definitions = CreateDefinitions::default();

    if !tokens.consume_if("(") {
        return Ok(definitions);
    }

    while !tokens.consume_if(")") {
        if tokens.is_at_end() {
            return Err(tokens.unexpected("column definition, table constraint, LIKE or ')'"));
        }

        if tokens.check("LIKE") {
            if definitions.like.is_some() {
                return Err(tokens.unexpected("a single LIKE clause"));
            }
            definitions.like = Some(constraint::parse_like_clause(tokens)?);
        } else if is_column_definition(tokens) {
            definitions.columns.push(column::parse_column_definition(tokens)?);
        } else {
            definitions
                .constraints
                .push(constraint::parse_table_constraint(tokens)?);
        }

        parse_separator(tokens)?;
    }

    Ok(definitions)
}

/// After a list entry: `,` is consumed, `)` is left for the caller, anything
/// else fails. A `,` directly before `)` is accepted.
pub(crate) fn parse_separator<C: TokenCursor>(tokens: &mut C) -> Result<(), ParseError> {
    if tokens.consume_if(",") || tokens.check(")") {
        Ok(())
    } else {
        Err(tokens.unexpected("',' or ')'"))
    }
}

fn is_column_definition<C: TokenCursor>(tokens: &C) -> bool {
    tokens.current().is_identifier()
        && !TABLE_CONSTRAINT_KEYWORDS
            .iter()
            .any(|keyword| tokens.check(keyword))
}

fn parse_terminator<C: TokenCursor>(tokens: &mut C) -> Result<(), ParseError> {
    if tokens.consume_if(";") || tokens.is_at_end() {
        Ok(())
    } else {
        Err(tokens.unexpected("';' or end of input"))
    }
}

/// Single name token: a bare word or a quoted identifier, kept as written.
pub(crate) fn parse_identifier<C: TokenCursor>(
    tokens: &mut C,
    what: &str,
) -> Result<String, ParseError> {
    if !tokens.current().is_identifier() {
        return Err(tokens.unexpected(what));
    }
    let name = tokens.current_text().to_string();
    tokens.advance();
    Ok(name)
}

/// `name { . name }`, joined back with dots.
pub(crate) fn parse_qualified_name<C: TokenCursor>(
    tokens: &mut C,
    what: &str,
) -> Result<String, ParseError> {
    let mut name = parse_identifier(tokens, what)?;
    while tokens.consume_if(".") {
        name.push('.');
        name.push_str(&parse_identifier(tokens, what)?);
    }
    Ok(name)
}

pub(crate) fn parse_constraint_name<C: TokenCursor>(
    tokens: &mut C,
) -> Result<Option<String>, ParseError> {
    if tokens.consume_if("CONSTRAINT") {
        Ok(Some(parse_identifier(tokens, "constraint name")?))
    } else {
        Ok(None)
    }
}

/// `( item [, item ...] )`, with the same separator rules as the definition list.
pub(crate) fn parse_list<C, T, F>(tokens: &mut C, mut parse_item: F) -> Result<Vec<T>, ParseError>
where
    C: TokenCursor,
    F: FnMut(&mut C) -> Result<T, ParseError>,
{
    tokens.expect("(")?;
    let mut items = Vec::new();
    while !tokens.consume_if(")") {
        items.push(parse_item(tokens)?);
        parse_separator(tokens)?;
    }
    Ok(items)
}

pub(crate) fn parse_identifier_list<C: TokenCursor>(
    tokens: &mut C,
    what: &str,
) -> Result<Vec<String>, ParseError> {
    parse_list(tokens, |tokens| parse_identifier(tokens, what))
}

/// Copies a balanced `( ... )` group, both parentheses included, into `out`.
pub(crate) fn collect_balanced<C: TokenCursor>(
    tokens: &mut C,
    out: &mut Vec<String>,
) -> Result<(), ParseError> {
    out.push(tokens.expect("(")?.lexeme);
    let mut depth = 1usize;

    while depth > 0 {
        let kind = tokens.current().kind;
        match kind {
            TokenKind::Eof => return Err(tokens.unexpected("')'")),
            TokenKind::LeftParen => depth += 1,
            TokenKind::RightParen => depth -= 1,
            _ => {}
        }
        out.push(tokens.current_text().to_string());
        tokens.advance();
    }

    Ok(())
}

/// Consumes `( ... )` and returns the tokens strictly inside.
pub(crate) fn parse_parenthesized<C: TokenCursor>(
    tokens: &mut C,
) -> Result<Expression, ParseError> {
    let mut collected = Vec::new();
    collect_balanced(tokens, &mut collected)?;
    collected.pop();
    collected.remove(0);
    Ok(Expression::new(collected))
}

/// Collects tokens up to a depth-zero stop token, which is left unconsumed.
/// An empty result is an error: the caller expected `what` here.
pub(crate) fn parse_expression_until<C: TokenCursor>(
    tokens: &mut C,
    stops: &[&str],
    what: &str,
) -> Result<Expression, ParseError> {
    let mut collected = Vec::new();

    loop {
        if stops.iter().any(|stop| tokens.check(stop)) {
            break;
        }
        let kind = tokens.current().kind;
        match kind {
            TokenKind::Eof => return Err(tokens.unexpected(what)),
            TokenKind::LeftParen => collect_balanced(tokens, &mut collected)?,
            TokenKind::RightParen => break,
            _ => {
                collected.push(tokens.current_text().to_string());
                tokens.advance();
            }
        }
    }

    if collected.is_empty() {
        return Err(tokens.unexpected(what));
    }
    Ok(Expression::new(collected))
}
