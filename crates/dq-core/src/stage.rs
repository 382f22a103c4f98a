//! Ordered rule stages for one table's cleaning policy.
//!
//! A stage is either a filter (non-matching rows are dropped, silently) or
//! a transform (pure `Row -> Row`, total: malformed scalars map to null).
//! Stage order matters: later stages observe the output of earlier ones.

use dq_model::{Row, StageKind, TableSchema};

pub type FilterFn = Box<dyn Fn(&TableSchema, &Row) -> bool + Send + Sync>;
pub type TransformFn = Box<dyn Fn(&TableSchema, Row) -> Row + Send + Sync>;

pub enum StageOp {
    Filter(FilterFn),
    Transform(TransformFn),
}

/// One named stage in a table's rule set.
pub struct Stage {
    pub name: String,
    pub op: StageOp,
}

impl Stage {
    pub fn filter(
        name: &str,
        predicate: impl Fn(&TableSchema, &Row) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.to_string(),
            op: StageOp::Filter(Box::new(predicate)),
        }
    }

    pub fn transform(
        name: &str,
        apply: impl Fn(&TableSchema, Row) -> Row + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.to_string(),
            op: StageOp::Transform(Box::new(apply)),
        }
    }

    pub fn kind(&self) -> StageKind {
        match self.op {
            StageOp::Filter(_) => StageKind::Filter,
            StageOp::Transform(_) => StageKind::Transform,
        }
    }
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .finish()
    }
}

/// The ordered cleaning policy for one table.
pub struct RuleSet {
    pub table: String,
    /// Columns deduplicated first-occurrence-wins, in addition to the
    /// primary key. Rows with a null key value are all kept.
    pub dedup_columns: Vec<String>,
    pub stages: Vec<Stage>,
}

impl RuleSet {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            dedup_columns: Vec::new(),
            stages: Vec::new(),
        }
    }

    pub fn dedup_by(mut self, column: &str) -> Self {
        self.dedup_columns.push(column.to_string());
        self
    }

    pub fn stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name.as_str()).collect()
    }
}
