use crate::{
    ast::{
        column::{ColumnDefinition, ColumnOption, DataType, StorageMode},
        constraint::{ColumnConstraint, ColumnConstraintKind, ConstraintTiming},
        expr::Expression,
    },
    cursor::TokenCursor,
    errors::ParseError,
    lexer::token::TokenKind,
    parser::{
        collect_balanced,
        constraint::{parse_references, parse_timing_attribute},
        parse_constraint_name, parse_identifier, parse_list, parse_parenthesized,
        parse_qualified_name,
    },
};
use tracing::debug;

/// Keywords that open a column constraint.
const COLUMN_CONSTRAINT_KEYWORDS: [&str; 9] = [
    "CONSTRAINT",
    "NOT",
    "NULL",
    "CHECK",
    "DEFAULT",
    "GENERATED",
    "UNIQUE",
    "PRIMARY",
    "REFERENCES",
];

pub(crate) fn parse_column_definition<C: TokenCursor>(
    tokens: &mut C,
) -> Result<ColumnDefinition, ParseError> {
    let name = parse_identifier(tokens, "column name")?;
    let data_type = parse_data_type(tokens)?;

    let mut options = Vec::new();
    while !is_end_of_column_definition(tokens) {
        if tokens.is_at_end() {
            return Err(tokens.unexpected("',' or ')'"));
        }
        if tokens.check("NOT") || tokens.check("DEFERRABLE") || tokens.check("INITIALLY") {
            parse_not_null_or_timing(tokens, &mut options)?;
        } else {
            options.push(parse_column_option(tokens)?);
        }
    }

    debug!(column = %name, data_type = %data_type, options = options.len(), "Parsed column");
    Ok(ColumnDefinition {
        name,
        data_type,
        options,
    })
}

fn is_end_of_column_definition<C: TokenCursor>(tokens: &C) -> bool {
    tokens.check(",") || tokens.check(")")
}

/// Type name plus an optional balanced `( args )` and array suffixes.
pub(crate) fn parse_data_type<C: TokenCursor>(tokens: &mut C) -> Result<DataType, ParseError> {
    let mut name = parse_qualified_name(tokens, "data type")?;

    let continuation = match name.to_ascii_uppercase().as_str() {
        "DOUBLE" => Some("PRECISION"),
        "CHARACTER" | "CHAR" | "BIT" => Some("VARYING"),
        _ => None,
    };
    if let Some(word) = continuation
        && tokens.check(word)
    {
        name.push(' ');
        name.push_str(tokens.current_text());
        tokens.advance();
    }

    let mut data_type = DataType::new(&name);

    if tokens.check("(") {
        data_type.modifiers = parse_list(tokens, |tokens| {
            let mut parts = Vec::new();
            while !tokens.check(",") && !tokens.check(")") {
                if tokens.is_at_end() {
                    return Err(tokens.unexpected("type modifier"));
                }
                parts.push(tokens.current_text().to_string());
                tokens.advance();
            }
            if parts.is_empty() {
                return Err(tokens.unexpected("type modifier"));
            }
            Ok(parts.concat())
        })?;
    }

    if matches!(name.to_ascii_uppercase().as_str(), "TIMESTAMP" | "TIME") {
        if tokens.expect_sequence(&["WITH", "TIME", "ZONE"])? {
            data_type.with_time_zone = Some(true);
        } else if tokens.expect_sequence(&["WITHOUT", "TIME", "ZONE"])? {
            data_type.with_time_zone = Some(false);
        }
    }

    while tokens.consume_if("[") {
        if tokens.current().kind == TokenKind::Number {
            tokens.advance();
        }
        tokens.expect("]")?;
        data_type.array_dimensions += 1;
    }

    Ok(data_type)
}

fn parse_column_option<C: TokenCursor>(tokens: &mut C) -> Result<ColumnOption, ParseError> {
    if tokens.consume_if("STORAGE") {
        let mode = match tokens.current().kind {
            TokenKind::Word => StorageMode::from_keyword(tokens.current_text()),
            _ => None,
        }
        .ok_or_else(|| tokens.unexpected("PLAIN, EXTERNAL, EXTENDED, MAIN or DEFAULT"))?;
        tokens.advance();
        return Ok(ColumnOption::Storage(mode));
    }

    if tokens.consume_if("COMPRESSION") {
        let method = parse_identifier(tokens, "compression method")?;
        return Ok(ColumnOption::Compression(method));
    }

    if tokens.consume_if("COLLATE") {
        let collation = parse_qualified_name(tokens, "collation name")?;
        return Ok(ColumnOption::Collate(collation));
    }

    if COLUMN_CONSTRAINT_KEYWORDS
        .iter()
        .any(|keyword| tokens.check(keyword))
    {
        return Ok(ColumnOption::Constraint(parse_column_constraint(tokens)?));
    }

    Err(tokens.unexpected("known column option (STORAGE, COMPRESSION, COLLATE or a constraint)"))
}

/// `NOT NULL`, or a timing attribute for the constraint written just before
/// it, which must be UNIQUE, PRIMARY KEY or REFERENCES.
fn parse_not_null_or_timing<C: TokenCursor>(
    tokens: &mut C,
    options: &mut Vec<ColumnOption>,
) -> Result<(), ParseError> {
    let negated = tokens.consume_if("NOT");
    if negated && tokens.consume_if("NULL") {
        options.push(ColumnOption::Constraint(ColumnConstraint {
            name: None,
            kind: ColumnConstraintKind::NotNull,
            timing: ConstraintTiming::default(),
        }));
        return Ok(());
    }
    if negated && !tokens.check("DEFERRABLE") {
        return Err(tokens.unexpected("NULL or DEFERRABLE"));
    }

    match options.last_mut() {
        Some(ColumnOption::Constraint(constraint)) if constraint.kind.accepts_timing() => {
            parse_timing_attribute(tokens, &mut constraint.timing, negated)?;
            Ok(())
        }
        _ => Err(tokens.unexpected("UNIQUE, PRIMARY KEY or REFERENCES before a timing attribute")),
    }
}

pub(crate) fn parse_column_constraint<C: TokenCursor>(
    tokens: &mut C,
) -> Result<ColumnConstraint, ParseError> {
    let name = parse_constraint_name(tokens)?;

    let kind = if tokens.consume_if("NOT") {
        tokens.expect("NULL")?;
        ColumnConstraintKind::NotNull
    } else if tokens.consume_if("NULL") {
        ColumnConstraintKind::Null
    } else if tokens.consume_if("CHECK") {
        let expr = parse_parenthesized(tokens)?;
        let no_inherit = tokens.expect_sequence(&["NO", "INHERIT"])?;
        ColumnConstraintKind::Check { expr, no_inherit }
    } else if tokens.consume_if("DEFAULT") {
        ColumnConstraintKind::Default(parse_default_expression(tokens)?)
    } else if tokens.consume_if("GENERATED") {
        parse_generated(tokens)?
    } else if tokens.consume_if("UNIQUE") {
        ColumnConstraintKind::Unique
    } else if tokens.expect_sequence(&["PRIMARY", "KEY"])? {
        ColumnConstraintKind::PrimaryKey
    } else if tokens.consume_if("REFERENCES") {
        ColumnConstraintKind::References(parse_references(tokens)?)
    } else {
        return Err(tokens.unexpected(
            "NOT NULL, NULL, CHECK, DEFAULT, GENERATED, UNIQUE, PRIMARY KEY or REFERENCES",
        ));
    };

    Ok(ColumnConstraint {
        name,
        kind,
        timing: ConstraintTiming::default(),
    })
}

/// `GENERATED ALWAYS AS ( expr ) STORED` or
/// `GENERATED { ALWAYS | BY DEFAULT } AS IDENTITY [ ( options ) ]`.
fn parse_generated<C: TokenCursor>(tokens: &mut C) -> Result<ColumnConstraintKind, ParseError> {
    let always = if tokens.consume_if("ALWAYS") {
        true
    } else if tokens.expect_sequence(&["BY", "DEFAULT"])? {
        false
    } else {
        return Err(tokens.unexpected("ALWAYS or BY DEFAULT"));
    };

    tokens.expect("AS")?;

    if !always || tokens.check("IDENTITY") {
        tokens.expect("IDENTITY")?;
        let options = if tokens.check("(") {
            Some(parse_parenthesized(tokens)?)
        } else {
            None
        };
        return Ok(ColumnConstraintKind::Identity { always, options });
    }

    let expr = parse_parenthesized(tokens)?;
    tokens.expect("STORED")?;
    Ok(ColumnConstraintKind::Generated(expr))
}

/// Operands joined by operator tokens: `0`, `-1`, `now()`, `'a'::text || b`,
/// `(1 + 2)`.
fn parse_default_expression<C: TokenCursor>(tokens: &mut C) -> Result<Expression, ParseError> {
    let mut collected = Vec::new();
    parse_default_operand(tokens, &mut collected)?;

    while tokens.current().kind == TokenKind::Operator {
        collected.push(tokens.current_text().to_string());
        tokens.advance();
        parse_default_operand(tokens, &mut collected)?;
    }

    Ok(Expression::new(collected))
}

fn parse_default_operand<C: TokenCursor>(
    tokens: &mut C,
    out: &mut Vec<String>,
) -> Result<(), ParseError> {
    if tokens.check("-") || tokens.check("+") {
        out.push(tokens.current_text().to_string());
        tokens.advance();
    }

    let kind = tokens.current().kind;
    match kind {
        TokenKind::LeftParen => collect_balanced(tokens, out)?,
        TokenKind::Word | TokenKind::QuotedIdentifier | TokenKind::String | TokenKind::Number => {
            out.push(tokens.current_text().to_string());
            tokens.advance();
            while tokens.check(".") {
                out.push(".".to_string());
                tokens.advance();
                out.push(parse_identifier(tokens, "name")?);
            }
            if tokens.check("(") {
                collect_balanced(tokens, out)?;
            }
        }
        _ => return Err(tokens.unexpected("default expression")),
    }

    while tokens.check("::") {
        out.push("::".to_string());
        tokens.advance();
        parse_cast_type(tokens, out)?;
    }

    Ok(())
}

/// Raw tokens of a cast target: `text`, `pg_catalog.varchar(10)`, `int[]`.
fn parse_cast_type<C: TokenCursor>(
    tokens: &mut C,
    out: &mut Vec<String>,
) -> Result<(), ParseError> {
    out.push(parse_identifier(tokens, "type name")?);
    while tokens.check(".") {
        out.push(".".to_string());
        tokens.advance();
        out.push(parse_identifier(tokens, "type name")?);
    }
    if tokens.check("(") {
        collect_balanced(tokens, out)?;
    }
    while tokens.check("[") {
        out.push("[".to_string());
        tokens.advance();
        if tokens.current().kind == TokenKind::Number {
            out.push(tokens.current_text().to_string());
            tokens.advance();
        }
        out.push(tokens.expect("]")?.lexeme);
    }
    Ok(())
}
