use crate::ast::constraint::{ColumnConstraint, ColumnConstraintKind};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    pub options: Vec<ColumnOption>,
}

impl ColumnDefinition {
    pub fn constraints(&self) -> impl Iterator<Item = &ColumnConstraint> {
        self.options.iter().filter_map(|option| match option {
            ColumnOption::Constraint(c) => Some(c),
            _ => None,
        })
    }

    pub fn is_not_null(&self) -> bool {
        self.constraints()
            .any(|c| matches!(c.kind, ColumnConstraintKind::NotNull))
    }
}

/// Column type as written, e.g. `varchar(255)` or `timestamp(3) with time zone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataType {
    /// Type name; multi-word names keep their words separated by one space.
    pub name: String,
    pub modifiers: Vec<String>,
    /// `Some(true)` for `WITH TIME ZONE`, `Some(false)` for `WITHOUT TIME ZONE`.
    pub with_time_zone: Option<bool>,
    pub array_dimensions: usize,
}

impl DataType {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            modifiers: Vec::new(),
            with_time_zone: None,
            array_dimensions: 0,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.modifiers.is_empty() {
            write!(f, "({})", self.modifiers.join(","))?;
        }
        match self.with_time_zone {
            Some(true) => write!(f, " WITH TIME ZONE")?,
            Some(false) => write!(f, " WITHOUT TIME ZONE")?,
            None => {}
        }
        for _ in 0..self.array_dimensions {
            write!(f, "[]")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnOption {
    Storage(StorageMode),
    Compression(String),
    Collate(String),
    Constraint(ColumnConstraint),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageMode {
    Plain,
    External,
    Extended,
    Main,
    Default,
}

impl StorageMode {
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.to_ascii_uppercase().as_str() {
            "PLAIN" => Some(StorageMode::Plain),
            "EXTERNAL" => Some(StorageMode::External),
            "EXTENDED" => Some(StorageMode::Extended),
            "MAIN" => Some(StorageMode::Main),
            "DEFAULT" => Some(StorageMode::Default),
            _ => None,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            StorageMode::Plain => "PLAIN",
            StorageMode::External => "EXTERNAL",
            StorageMode::Extended => "EXTENDED",
            StorageMode::Main => "MAIN",
            StorageMode::Default => "DEFAULT",
        }
    }
}
