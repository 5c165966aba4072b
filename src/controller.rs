//! Session controller tying the draft editors and the registry to the
//! remote migration service.
//!
//! Every mutation runs validate, then the remote call, then reconciles the
//! registry from the outcome. Local state never changes before the service
//! has answered, and a failed call leaves it exactly as it was.

use tracing::{error, info, warn};

use crate::column::{ColumnEdit, ColumnEditor};
use crate::draft::{TableDraft, TableDraftInterface};
use crate::error::{Result, SchemaError, ServiceError, ValidationError};
use crate::notify::{Notification, Notifier};
use crate::registry::Registry;
use crate::schema::{Column, DataAttribute, Table};
use crate::service::{DeleteTableRequest, EditTableRequest, RenameTableRequest, SchemaService};

/// State of the rename input in the table detail view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameForm {
    pub visible: bool,
    pub new_name: String,
}

/// One editing session against a migration service.
pub struct Controller<S: SchemaService> {
    service: S,
    notifier: Box<dyn Notifier>,
    registry: Registry,
    draft: TableDraft,
    create_form_visible: bool,
    rename: RenameForm,
    new_column: Column,
}

impl<S: SchemaService> Controller<S> {
    pub fn new(service: S, notifier: Box<dyn Notifier>) -> Self {
        Controller {
            service,
            notifier,
            registry: Registry::new(),
            draft: TableDraft::new(),
            create_form_visible: false,
            rename: RenameForm::default(),
            new_column: Column::default(),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn draft(&self) -> &TableDraft {
        &self.draft
    }

    /// Direct access to the table draft for field-level editing.
    pub fn draft_mut(&mut self) -> &mut TableDraft {
        &mut self.draft
    }

    pub fn is_create_form_visible(&self) -> bool {
        self.create_form_visible
    }

    pub fn rename_form(&self) -> &RenameForm {
        &self.rename
    }

    pub fn new_column(&self) -> &Column {
        &self.new_column
    }

    fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }

    fn reject(&self, err: ValidationError) -> SchemaError {
        warn!(error = %err, "rejected before reaching the service");
        self.notify(Notification::error(err.to_string()));
        err.into()
    }

    fn fail(&self, err: ServiceError, message: &str) -> SchemaError {
        error!(error = %err, "{}", message);
        self.notify(Notification::error(message));
        err.into()
    }

    /// Loads every table from the service. A failure leaves the registry
    /// empty; there is no retry.
    pub async fn fetch_tables(&mut self) -> Result<usize> {
        self.registry.begin_load();
        match self.service.list_tables().await {
            Ok(tables) => {
                let count = tables.len();
                self.registry.finish_load(Some(tables));
                info!(count, "loaded tables");
                Ok(count)
            }
            Err(err) => {
                self.registry.finish_load(None);
                Err(self.fail(err, "Error fetching tables"))
            }
        }
    }

    /// Opens the create form with a fresh draft and clears the selection.
    pub fn begin_new_table(&mut self) {
        self.draft.reset();
        self.registry.deselect();
        self.create_form_visible = true;
    }

    /// Closes the create form and throws the draft away.
    pub fn dismiss_create_form(&mut self) {
        self.draft.reset();
        self.create_form_visible = false;
    }

    /// Removes a column from the table draft, refusing to drop the last one.
    pub fn remove_draft_column(&mut self, index: usize) -> Result<Column> {
        self.draft.remove_column(index).map_err(|err| self.reject(err))
    }

    /// Sends the table draft to the service. On success the table is appended
    /// to the registry and the draft is reset.
    pub async fn create_table(&mut self) -> Result<()> {
        if let Err(err) = self.draft.validate() {
            return Err(self.reject(err));
        }
        if self.registry.contains(&self.draft.table_name) {
            let name = self.draft.table_name.clone();
            return Err(self.reject(ValidationError::DuplicateTableName(name)));
        }
        let table = self.draft.to_table();

        if let Err(err) = self.service.create_table(&table).await {
            return Err(self.fail(err, "Error creating table"));
        }

        info!(table = %table.table_name, columns = table.columns.len(), "table created");
        self.registry.append(table);
        self.dismiss_create_form();
        self.notify(Notification::success("Table created successfully"));
        Ok(())
    }

    /// Selects a table and seeds the draft with its current definition.
    pub fn select_table(&mut self, table_name: &str) -> Result<&Table> {
        let Some(table) = self.registry.get(table_name) else {
            return Err(self.reject(ValidationError::UnknownTable(table_name.to_string())));
        };
        self.draft = TableDraft::from_table(table);
        self.create_form_visible = false;
        self.rename = RenameForm::default();
        self.registry
            .select(table_name)
            .ok_or_else(|| ValidationError::UnknownTable(table_name.to_string()).into())
    }

    pub async fn delete_table(&mut self, table_name: &str) -> Result<()> {
        let request = DeleteTableRequest {
            table_name: table_name.to_string(),
        };
        if let Err(err) = self.service.delete_table(&request).await {
            return Err(self.fail(err, "Error deleting table"));
        }

        info!(table = %table_name, "table deleted");
        self.registry.remove(table_name);
        self.registry.deselect();
        self.notify(Notification::success("Table deleted successfully"));
        Ok(())
    }

    /// Opens the rename input, prefilled with the selected table's name.
    pub fn show_rename_form(&mut self) -> Result<()> {
        let Some(selected) = self.registry.selected() else {
            return Err(self.reject(ValidationError::NoTableSelected));
        };
        self.rename = RenameForm {
            visible: true,
            new_name: selected.table_name.clone(),
        };
        Ok(())
    }

    pub fn set_rename_input(&mut self, value: &str) {
        self.rename.new_name = value.to_string();
    }

    pub fn cancel_rename(&mut self) {
        self.rename = RenameForm::default();
    }

    /// Renames the selected table to the rename input.
    pub async fn rename_table(&mut self) -> Result<()> {
        let Some(old_name) = self.registry.selected().map(|t| t.table_name.clone()) else {
            return Err(self.reject(ValidationError::NoTableSelected));
        };
        let new_name = self.rename.new_name.clone();
        if new_name.is_empty() {
            return Err(self.reject(ValidationError::EmptyNewTableName));
        }
        if self.registry.contains(&new_name) {
            return Err(self.reject(ValidationError::DuplicateTableName(new_name)));
        }

        let request = RenameTableRequest {
            old_name: old_name.clone(),
            new_name: new_name.clone(),
        };
        if let Err(err) = self.service.rename_table(&request).await {
            return Err(self.fail(err, "Error renaming table"));
        }

        info!(from = %old_name, to = %new_name, "table renamed");
        self.registry.rename(&old_name, &new_name);
        if self.draft.table_name == old_name {
            self.draft.set_table_name(&new_name);
        }
        self.rename = RenameForm::default();
        self.notify(Notification::success("Table renamed successfully"));
        Ok(())
    }

    pub async fn delete_column(&mut self, table_name: &str, column_name: &str) -> Result<()> {
        let request = EditTableRequest::delete_column(table_name, column_name);
        if let Err(err) = self.service.edit_table(&request).await {
            return Err(self.fail(err, "Error deleting column"));
        }

        info!(table = %table_name, column = %column_name, "column deleted");
        self.registry.remove_column(table_name, column_name);
        self.notify(Notification::success("Column deleted successfully"));
        Ok(())
    }

    pub async fn add_column(&mut self, table_name: &str, column: Column) -> Result<()> {
        if !column.is_submittable() {
            return Err(self.reject(ValidationError::InvalidColumn { index: 0 }));
        }
        let request = EditTableRequest::add_column(table_name, &column);
        if let Err(err) = self.service.edit_table(&request).await {
            return Err(self.fail(err, "Error adding column"));
        }

        info!(table = %table_name, column = %column.name, "column added");
        self.registry.add_column(table_name, column);
        self.notify(Notification::success("Column added successfully"));
        Ok(())
    }

    /// Edits the detail view's add-column draft.
    pub fn edit_new_column(&mut self, edit: ColumnEdit) {
        self.new_column = self.new_column.set_field(edit);
    }

    pub fn toggle_new_column_attribute(&mut self, attribute: DataAttribute) {
        self.new_column = self.new_column.toggle_attribute(attribute);
    }

    /// Adds the add-column draft to the selected table and clears the draft.
    pub async fn submit_new_column(&mut self) -> Result<()> {
        let Some(table_name) = self.registry.selected().map(|t| t.table_name.clone()) else {
            return Err(self.reject(ValidationError::NoTableSelected));
        };
        let column = self.new_column.clone();
        self.add_column(&table_name, column).await?;
        self.new_column = Column::default();
        Ok(())
    }
}
