use crate::column::{ColumnEdit, ColumnEditor};
use crate::error::ValidationError;
use crate::schema::{Column, DataAttribute, Table};
// draft.rs

/// Trait defining the interface for an in-progress table definition.
/// Provides methods to name the table and add, edit and remove column drafts.
pub trait TableDraftInterface {
    /// Replaces the table name.
    fn set_table_name(&mut self, value: &str);
    /// Appends a default column (`""`, string, no attributes).
    fn add_column(&mut self);
    /// Removes the column at `index`. The last remaining column is never removed.
    fn remove_column(&mut self, index: usize) -> Result<Column, ValidationError>;
    /// Applies a field edit to the column at `index`.
    fn edit_column(&mut self, index: usize, edit: ColumnEdit) -> Result<(), ValidationError>;
    /// Toggles an attribute on the column at `index`.
    fn toggle_column_attribute(
        &mut self,
        index: usize,
        attribute: DataAttribute,
    ) -> Result<(), ValidationError>;
    /// Clears the name and leaves a single default column.
    fn reset(&mut self);
}

/// Struct representing a table that has not been sent to the service yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableDraft {
    pub table_name: String,
    pub columns: Vec<Column>,
}

impl Default for TableDraft {
    fn default() -> Self {
        TableDraft {
            table_name: String::new(),
            columns: vec![Column::default()],
        }
    }
}

impl TableDraft {
    /// Creates an empty draft with one default column.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a draft from a confirmed table, used when a table is selected.
    pub fn from_table(table: &Table) -> Self {
        TableDraft {
            table_name: table.table_name.clone(),
            columns: table.columns.clone(),
        }
    }

    fn check_index(&self, index: usize) -> Result<(), ValidationError> {
        if index >= self.columns.len() {
            return Err(ValidationError::ColumnIndexOutOfRange {
                index,
                len: self.columns.len(),
            });
        }
        Ok(())
    }

    /// Checks the draft can be submitted for creation. Any column without a
    /// name rejects the whole draft.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.table_name.is_empty() {
            return Err(ValidationError::EmptyTableName);
        }
        if let Some(index) = self.columns.iter().position(|c| !c.is_submittable()) {
            return Err(ValidationError::InvalidColumn { index });
        }
        Ok(())
    }

    /// The table actually sent to the service. Columns that are not
    /// submittable are dropped even though `validate` already rejects them.
    pub fn to_table(&self) -> Table {
        Table {
            table_name: self.table_name.clone(),
            columns: self
                .columns
                .iter()
                .filter(|c| c.is_submittable())
                .cloned()
                .collect(),
        }
    }
}

/// Implements the TableDraftInterface trait for the TableDraft struct.
impl TableDraftInterface for TableDraft {
    fn set_table_name(&mut self, value: &str) {
        self.table_name = value.to_string();
    }

    fn add_column(&mut self) {
        self.columns.push(Column::default());
    }

    fn remove_column(&mut self, index: usize) -> Result<Column, ValidationError> {
        if self.columns.len() <= 1 {
            return Err(ValidationError::LastColumn);
        }
        self.check_index(index)?;
        Ok(self.columns.remove(index))
    }

    fn edit_column(&mut self, index: usize, edit: ColumnEdit) -> Result<(), ValidationError> {
        self.check_index(index)?;
        self.columns[index] = self.columns[index].set_field(edit);
        Ok(())
    }

    fn toggle_column_attribute(
        &mut self,
        index: usize,
        attribute: DataAttribute,
    ) -> Result<(), ValidationError> {
        self.check_index(index)?;
        self.columns[index] = self.columns[index].toggle_attribute(attribute);
        Ok(())
    }

    fn reset(&mut self) {
        *self = TableDraft::default();
    }
}

// tests live in tests/unit_tests.rs
