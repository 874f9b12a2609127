use crate::ast::expr::Expression;
use serde::{Deserialize, Serialize};

/// Constraint attached to a single column, optionally named with
/// `CONSTRAINT <name>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnConstraint {
    pub name: Option<String>,
    pub kind: ColumnConstraintKind,
    #[serde(default)]
    pub timing: ConstraintTiming,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnConstraintKind {
    NotNull,
    Null,
    Check { expr: Expression, no_inherit: bool },
    Default(Expression),
    /// `GENERATED ALWAYS AS (expr) STORED`
    Generated(Expression),
    /// `GENERATED {ALWAYS | BY DEFAULT} AS IDENTITY [(options)]`
    Identity {
        always: bool,
        options: Option<Expression>,
    },
    Unique,
    PrimaryKey,
    References(ForeignKeyReference),
}

/// Entry of the definition list that is not a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConstraint {
    pub name: Option<String>,
    pub kind: TableConstraintKind,
    #[serde(default)]
    pub timing: ConstraintTiming,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableConstraintKind {
    Check {
        expr: Expression,
        no_inherit: bool,
    },
    Unique {
        columns: Vec<String>,
        include: Vec<String>,
    },
    PrimaryKey {
        columns: Vec<String>,
        include: Vec<String>,
    },
    ForeignKey {
        columns: Vec<String>,
        reference: ForeignKeyReference,
    },
    Exclude {
        method: Option<String>,
        elements: Vec<ExcludeElement>,
        predicate: Option<Expression>,
    },
}

/// `[NOT] DEFERRABLE` and `INITIALLY { DEFERRED | IMMEDIATE }`.
/// `None` means the attribute was not written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintTiming {
    pub deferrable: Option<bool>,
    pub initially_deferred: Option<bool>,
}

impl ConstraintTiming {
    pub fn is_empty(&self) -> bool {
        self.deferrable.is_none() && self.initially_deferred.is_none()
    }
}

impl ColumnConstraintKind {
    /// Only uniqueness and foreign keys can be deferred.
    pub fn accepts_timing(&self) -> bool {
        matches!(
            self,
            ColumnConstraintKind::Unique
                | ColumnConstraintKind::PrimaryKey
                | ColumnConstraintKind::References(_)
        )
    }
}

impl TableConstraintKind {
    pub fn accepts_timing(&self) -> bool {
        !matches!(self, TableConstraintKind::Check { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludeElement {
    pub element: Expression,
    pub operator: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKeyReference {
    pub table: String,
    pub columns: Vec<String>,
    pub match_type: Option<MatchType>,
    pub on_delete: Option<ReferentialAction>,
    pub on_update: Option<ReferentialAction>,
}

impl ForeignKeyReference {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: Vec::new(),
            match_type: None,
            on_delete: None,
            on_update: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchType {
    Full,
    Partial,
    Simple,
}

impl MatchType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            MatchType::Full => "FULL",
            MatchType::Partial => "PARTIAL",
            MatchType::Simple => "SIMPLE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferentialAction {
    NoAction,
    Restrict,
    Cascade,
    SetNull,
    SetDefault,
}

impl ReferentialAction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            ReferentialAction::NoAction => "NO ACTION",
            ReferentialAction::Restrict => "RESTRICT",
            ReferentialAction::Cascade => "CASCADE",
            ReferentialAction::SetNull => "SET NULL",
            ReferentialAction::SetDefault => "SET DEFAULT",
        }
    }
}
