//! Canonical SQL text for a parsed table definition.

use crate::ast::{
    column::{ColumnDefinition, ColumnOption},
    constraint::{
        ColumnConstraint, ColumnConstraintKind, ConstraintTiming, ForeignKeyReference,
        TableConstraint, TableConstraintKind,
    },
    table::{LikeClause, PartitionSpec, StorageValue, TableDefinition},
};

pub trait Render {
    fn render(&self, r: &mut Renderer);
}

#[derive(Debug, Default)]
pub struct Renderer {
    pub sql: String,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> String {
        self.sql
    }

    fn push_list(&mut self, items: &[String]) {
        self.sql.push('(');
        self.sql.push_str(&items.join(", "));
        self.sql.push(')');
    }
}

impl TableDefinition {
    pub fn to_sql(&self) -> String {
        let mut renderer = Renderer::new();
        self.render(&mut renderer);
        renderer.finish()
    }
}

impl Render for TableDefinition {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("CREATE ");
        if let Some(scope) = &self.scope {
            r.sql.push_str(scope.as_sql());
            r.sql.push(' ');
        }
        if self.is_temporary {
            r.sql.push_str("TEMPORARY ");
        }
        if self.is_unlogged {
            r.sql.push_str("UNLOGGED ");
        }
        r.sql.push_str("TABLE ");
        if self.if_not_exists {
            r.sql.push_str("IF NOT EXISTS ");
        }
        r.sql.push_str(&self.name);
        r.sql.push_str(" (");

        let mut entries = Vec::new();
        for col in &self.columns {
            let mut inner = Renderer::new();
            col.render(&mut inner);
            entries.push(inner.finish());
        }
        if let Some(like) = &self.like {
            let mut inner = Renderer::new();
            like.render(&mut inner);
            entries.push(inner.finish());
        }
        for constraint in &self.constraints {
            let mut inner = Renderer::new();
            constraint.render(&mut inner);
            entries.push(inner.finish());
        }

        for (i, entry) in entries.iter().enumerate() {
            r.sql.push_str("\n\t");
            r.sql.push_str(entry);
            if i < entries.len() - 1 {
                r.sql.push(',');
            }
        }
        if !entries.is_empty() {
            r.sql.push('\n');
        }
        r.sql.push(')');

        if let Some(parents) = &self.inherits {
            r.sql.push_str(" INHERITS ");
            r.push_list(parents);
        }
        if let Some(partition) = &self.partition_by {
            r.sql.push(' ');
            partition.render(r);
        }
        if let Some(method) = &self.access_method {
            r.sql.push_str(" USING ");
            r.sql.push_str(method);
        }
        if let Some(params) = &self.storage_parameters {
            if params.len() == 1
                && let Some(StorageValue::Flag(false)) = params.get("oids")
            {
                r.sql.push_str(" WITHOUT OIDS");
            } else {
                let rendered: Vec<String> = params
                    .iter()
                    .map(|(key, value)| match value {
                        StorageValue::Value(v) => format!("{key} = {v}"),
                        StorageValue::Flag(true) => key.clone(),
                        StorageValue::Flag(false) => format!("{key} = false"),
                    })
                    .collect();
                r.sql.push_str(" WITH ");
                r.push_list(&rendered);
            }
        }
        if let Some(on_commit) = &self.on_commit {
            r.sql.push_str(" ON COMMIT ");
            r.sql.push_str(on_commit.as_sql());
        }
        if let Some(tablespace) = &self.tablespace {
            r.sql.push_str(" TABLESPACE ");
            r.sql.push_str(tablespace);
        }

        r.sql.push(';');
    }
}

impl Render for ColumnDefinition {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str(&self.name);
        r.sql.push(' ');
        r.sql.push_str(&self.data_type.to_string());

        for option in &self.options {
            r.sql.push(' ');
            match option {
                ColumnOption::Storage(mode) => {
                    r.sql.push_str("STORAGE ");
                    r.sql.push_str(mode.as_sql());
                }
                ColumnOption::Compression(method) => {
                    r.sql.push_str("COMPRESSION ");
                    r.sql.push_str(method);
                }
                ColumnOption::Collate(collation) => {
                    r.sql.push_str("COLLATE ");
                    r.sql.push_str(collation);
                }
                ColumnOption::Constraint(constraint) => constraint.render(r),
            }
        }
    }
}

fn render_constraint_name(name: &Option<String>, r: &mut Renderer) {
    if let Some(name) = name {
        r.sql.push_str("CONSTRAINT ");
        r.sql.push_str(name);
        r.sql.push(' ');
    }
}

impl Render for ColumnConstraint {
    fn render(&self, r: &mut Renderer) {
        render_constraint_name(&self.name, r);

        match &self.kind {
            ColumnConstraintKind::NotNull => r.sql.push_str("NOT NULL"),
            ColumnConstraintKind::Null => r.sql.push_str("NULL"),
            ColumnConstraintKind::Check { expr, no_inherit } => {
                r.sql.push_str(&format!("CHECK ({expr})"));
                if *no_inherit {
                    r.sql.push_str(" NO INHERIT");
                }
            }
            ColumnConstraintKind::Default(expr) => r.sql.push_str(&format!("DEFAULT {expr}")),
            ColumnConstraintKind::Generated(expr) => {
                r.sql
                    .push_str(&format!("GENERATED ALWAYS AS ({expr}) STORED"));
            }
            ColumnConstraintKind::Identity { always, options } => {
                r.sql.push_str(if *always {
                    "GENERATED ALWAYS AS IDENTITY"
                } else {
                    "GENERATED BY DEFAULT AS IDENTITY"
                });
                if let Some(options) = options {
                    r.sql.push_str(&format!(" ({options})"));
                }
            }
            ColumnConstraintKind::Unique => r.sql.push_str("UNIQUE"),
            ColumnConstraintKind::PrimaryKey => r.sql.push_str("PRIMARY KEY"),
            ColumnConstraintKind::References(reference) => {
                r.sql.push_str("REFERENCES ");
                reference.render(r);
            }
        }
        self.timing.render(r);
    }
}

impl Render for ForeignKeyReference {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str(&self.table);
        if !self.columns.is_empty() {
            r.sql.push(' ');
            r.push_list(&self.columns);
        }
        if let Some(match_type) = &self.match_type {
            r.sql.push_str(" MATCH ");
            r.sql.push_str(match_type.as_sql());
        }
        if let Some(action) = &self.on_delete {
            r.sql.push_str(" ON DELETE ");
            r.sql.push_str(action.as_sql());
        }
        if let Some(action) = &self.on_update {
            r.sql.push_str(" ON UPDATE ");
            r.sql.push_str(action.as_sql());
        }
    }
}

impl Render for TableConstraint {
    fn render(&self, r: &mut Renderer) {
        render_constraint_name(&self.name, r);

        match &self.kind {
            TableConstraintKind::Check { expr, no_inherit } => {
                r.sql.push_str(&format!("CHECK ({expr})"));
                if *no_inherit {
                    r.sql.push_str(" NO INHERIT");
                }
            }
            TableConstraintKind::Unique { columns, include } => {
                r.sql.push_str("UNIQUE ");
                r.push_list(columns);
                render_include(include, r);
            }
            TableConstraintKind::PrimaryKey { columns, include } => {
                r.sql.push_str("PRIMARY KEY ");
                r.push_list(columns);
                render_include(include, r);
            }
            TableConstraintKind::ForeignKey { columns, reference } => {
                r.sql.push_str("FOREIGN KEY ");
                r.push_list(columns);
                r.sql.push_str(" REFERENCES ");
                reference.render(r);
            }
            TableConstraintKind::Exclude {
                method,
                elements,
                predicate,
            } => {
                r.sql.push_str("EXCLUDE ");
                if let Some(method) = method {
                    r.sql.push_str(&format!("USING {method} "));
                }
                let rendered: Vec<String> = elements
                    .iter()
                    .map(|e| format!("{} WITH {}", e.element, e.operator))
                    .collect();
                r.push_list(&rendered);
                if let Some(predicate) = predicate {
                    r.sql.push_str(&format!(" WHERE ({predicate})"));
                }
            }
        }
        self.timing.render(r);
    }
}

impl Render for ConstraintTiming {
    fn render(&self, r: &mut Renderer) {
        match self.deferrable {
            Some(true) => r.sql.push_str(" DEFERRABLE"),
            Some(false) => r.sql.push_str(" NOT DEFERRABLE"),
            None => {}
        }
        match self.initially_deferred {
            Some(true) => r.sql.push_str(" INITIALLY DEFERRED"),
            Some(false) => r.sql.push_str(" INITIALLY IMMEDIATE"),
            None => {}
        }
    }
}

fn render_include(include: &[String], r: &mut Renderer) {
    if !include.is_empty() {
        r.sql.push_str(" INCLUDE ");
        r.push_list(include);
    }
}

impl Render for LikeClause {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("LIKE ");
        r.sql.push_str(&self.source);
        for option in &self.options {
            r.sql.push_str(if option.including {
                " INCLUDING "
            } else {
                " EXCLUDING "
            });
            r.sql.push_str(option.kind.as_sql());
        }
    }
}

impl Render for PartitionSpec {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("PARTITION BY ");
        r.sql.push_str(self.strategy.as_sql());
        r.sql.push(' ');
        let keys: Vec<String> = self.keys.iter().map(|k| k.to_string()).collect();
        r.push_list(&keys);
    }
}
