use crate::schema::{Column, Table};
// registry.rs

/// Whether the startup fetch has happened yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Local cache of the schema as last confirmed by the migration service.
/// Only changed from the outcome of a remote call.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    tables: Vec<Table>,
    selected: Option<Table>,
    state: LoadState,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry already populated, as if a fetch had just returned `tables`.
    pub fn with_tables(tables: Vec<Table>) -> Self {
        Registry {
            tables,
            selected: None,
            state: LoadState::Loaded,
        }
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn selected(&self) -> Option<&Table> {
        self.selected.as_ref()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn get(&self, table_name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.table_name == table_name)
    }

    pub fn contains(&self, table_name: &str) -> bool {
        self.get(table_name).is_some()
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.table_name.as_str()).collect()
    }

    /// Marks a fetch as in flight.
    pub fn begin_load(&mut self) {
        self.state = LoadState::Loading;
    }

    /// Replaces the contents with a fetch result. On failure the list is left empty.
    pub fn finish_load(&mut self, result: Option<Vec<Table>>) {
        match result {
            Some(tables) => {
                self.tables = tables;
                self.state = LoadState::Loaded;
            }
            None => {
                self.tables.clear();
                self.state = LoadState::Failed;
            }
        }
        self.selected = None;
    }

    /// Selects a table by name and returns it.
    pub fn select(&mut self, table_name: &str) -> Option<&Table> {
        self.selected = self.get(table_name).cloned();
        self.selected.as_ref()
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn append(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Removes a table and clears the selection.
    pub fn remove(&mut self, table_name: &str) -> Option<Table> {
        let idx = self.tables.iter().position(|t| t.table_name == table_name)?;
        self.selected = None;
        Some(self.tables.remove(idx))
    }

    /// Renames a table in place, following the selection if it points at it.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> bool {
        let Some(table) = self.tables.iter_mut().find(|t| t.table_name == old_name) else {
            return false;
        };
        table.table_name = new_name.to_string();
        if let Some(selected) = self.selected.as_mut() {
            if selected.table_name == old_name {
                selected.table_name = new_name.to_string();
            }
        }
        true
    }

    /// Appends a column to a table and to the selection if it is the same table.
    pub fn add_column(&mut self, table_name: &str, column: Column) -> bool {
        let Some(table) = self.tables.iter_mut().find(|t| t.table_name == table_name) else {
            return false;
        };
        table.columns.push(column.clone());
        if let Some(selected) = self.selected.as_mut() {
            if selected.table_name == table_name {
                selected.columns.push(column);
            }
        }
        true
    }

    /// Removes every column named `column_name` from a table and from the selection.
    pub fn remove_column(&mut self, table_name: &str, column_name: &str) -> bool {
        let Some(table) = self.tables.iter_mut().find(|t| t.table_name == table_name) else {
            return false;
        };
        table.columns.retain(|c| c.name != column_name);
        if let Some(selected) = self.selected.as_mut() {
            if selected.table_name == table_name {
                selected.columns.retain(|c| c.name != column_name);
            }
        }
        true
    }
}
