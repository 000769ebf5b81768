use serde::{Deserialize, Serialize};

use crate::position::Position;
use crate::view::BatchMutations;

/// One structural mutation call, as issued against a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "targets", rename_all = "snake_case")]
pub enum Mutation {
    InsertSections(Vec<usize>),
    DeleteSections(Vec<usize>),
    ReloadSections(Vec<usize>),
    InsertRows(Vec<Position>),
    DeleteRows(Vec<Position>),
    ReloadRows(Vec<Position>),
}

impl Mutation {
    /// Number of sections or rows this call touches.
    pub fn target_count(&self) -> usize {
        match self {
            Mutation::InsertSections(indices)
            | Mutation::DeleteSections(indices)
            | Mutation::ReloadSections(indices) => indices.len(),
            Mutation::InsertRows(positions)
            | Mutation::DeleteRows(positions)
            | Mutation::ReloadRows(positions) => positions.len(),
        }
    }
}

/// Records mutation calls instead of applying them.
impl BatchMutations for Vec<Mutation> {
    fn insert_sections(&mut self, indices: &[usize]) {
        self.push(Mutation::InsertSections(indices.to_vec()));
    }

    fn delete_sections(&mut self, indices: &[usize]) {
        self.push(Mutation::DeleteSections(indices.to_vec()));
    }

    fn reload_sections(&mut self, indices: &[usize]) {
        self.push(Mutation::ReloadSections(indices.to_vec()));
    }

    fn insert_rows(&mut self, positions: &[Position]) {
        self.push(Mutation::InsertRows(positions.to_vec()));
    }

    fn delete_rows(&mut self, positions: &[Position]) {
        self.push(Mutation::DeleteRows(positions.to_vec()));
    }

    fn reload_rows(&mut self, positions: &[Position]) {
        self.push(Mutation::ReloadRows(positions.to_vec()));
    }
}
