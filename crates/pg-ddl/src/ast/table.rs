use crate::ast::{
    column::ColumnDefinition,
    constraint::TableConstraint,
    expr::Expression,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Storage parameter key written by `WITH OIDS` / `WITHOUT OIDS`.
pub const OIDS_PARAMETER: &str = "oids";

/// Root of a parsed `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
    pub constraints: Vec<TableConstraint>,
    pub like: Option<LikeClause>,
    pub inherits: Option<Vec<String>>,
    pub partition_by: Option<PartitionSpec>,
    pub access_method: Option<String>,
    pub storage_parameters: Option<BTreeMap<String, StorageValue>>,
    pub on_commit: Option<OnCommit>,
    pub tablespace: Option<String>,
    pub is_temporary: bool,
    pub is_unlogged: bool,
    pub if_not_exists: bool,
    /// Accepted for compatibility; PostgreSQL ignores it.
    pub scope: Option<TableScope>,
}

impl TableDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
            constraints: Vec::new(),
            like: None,
            inherits: None,
            partition_by: None,
            access_method: None,
            storage_parameters: None,
            on_commit: None,
            tablespace: None,
            is_temporary: false,
            is_unlogged: false,
            if_not_exists: false,
            scope: None,
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableScope {
    Global,
    Local,
}

impl TableScope {
    pub fn as_sql(&self) -> &'static str {
        match self {
            TableScope::Global => "GLOBAL",
            TableScope::Local => "LOCAL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikeClause {
    pub source: String,
    pub options: Vec<LikeOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeOption {
    /// `INCLUDING` when true, `EXCLUDING` otherwise.
    pub including: bool,
    pub kind: LikeOptionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LikeOptionKind {
    Comments,
    Compression,
    Constraints,
    Defaults,
    Generated,
    Identity,
    Indexes,
    Statistics,
    Storage,
    All,
}

impl LikeOptionKind {
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.to_ascii_uppercase().as_str() {
            "COMMENTS" => Some(LikeOptionKind::Comments),
            "COMPRESSION" => Some(LikeOptionKind::Compression),
            "CONSTRAINTS" => Some(LikeOptionKind::Constraints),
            "DEFAULTS" => Some(LikeOptionKind::Defaults),
            "GENERATED" => Some(LikeOptionKind::Generated),
            "IDENTITY" => Some(LikeOptionKind::Identity),
            "INDEXES" => Some(LikeOptionKind::Indexes),
            "STATISTICS" => Some(LikeOptionKind::Statistics),
            "STORAGE" => Some(LikeOptionKind::Storage),
            "ALL" => Some(LikeOptionKind::All),
            _ => None,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            LikeOptionKind::Comments => "COMMENTS",
            LikeOptionKind::Compression => "COMPRESSION",
            LikeOptionKind::Constraints => "CONSTRAINTS",
            LikeOptionKind::Defaults => "DEFAULTS",
            LikeOptionKind::Generated => "GENERATED",
            LikeOptionKind::Identity => "IDENTITY",
            LikeOptionKind::Indexes => "INDEXES",
            LikeOptionKind::Statistics => "STATISTICS",
            LikeOptionKind::Storage => "STORAGE",
            LikeOptionKind::All => "ALL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionSpec {
    pub strategy: PartitionStrategy,
    pub keys: Vec<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartitionStrategy {
    Range,
    List,
    Hash,
}

impl PartitionStrategy {
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.to_ascii_uppercase().as_str() {
            "RANGE" => Some(PartitionStrategy::Range),
            "LIST" => Some(PartitionStrategy::List),
            "HASH" => Some(PartitionStrategy::Hash),
            _ => None,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            PartitionStrategy::Range => "RANGE",
            PartitionStrategy::List => "LIST",
            PartitionStrategy::Hash => "HASH",
        }
    }
}

/// Value side of a `WITH (...)` entry. Entries written without `= value`
/// become `Flag(true)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageValue {
    Value(String),
    Flag(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnCommit {
    PreserveRows,
    DeleteRows,
    Drop,
}

impl OnCommit {
    pub fn as_sql(&self) -> &'static str {
        match self {
            OnCommit::PreserveRows => "PRESERVE ROWS",
            OnCommit::DeleteRows => "DELETE ROWS",
            OnCommit::Drop => "DROP",
        }
    }
}
