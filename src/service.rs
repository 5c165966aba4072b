//! The remote migration service as seen by the controller.
//!
//! [`SchemaService`] is the seam between the local state machine and the
//! network. [`crate::client::HttpSchemaService`] talks to the real REST
//! endpoints; tests substitute an in-memory implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::schema::{Column, DataType, Table};

/// Body of the delete-table request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTableRequest {
    pub table_name: String,
}

/// Body of the rename-table request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameTableRequest {
    pub old_name: String,
    pub new_name: String,
}

/// A column in the edit-table request. Attributes travel as one
/// comma-joined string here, unlike everywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: DataType,
    pub attributes: String,
}

impl From<&Column> for EditColumn {
    fn from(column: &Column) -> Self {
        EditColumn {
            name: column.name.clone(),
            data_type: column.data_type,
            attributes: column.attributes.joined(),
        }
    }
}

/// Body of the edit-table request. `edit_columns` is always sent empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditTableRequest {
    pub table_name: String,
    pub add_columns: Vec<EditColumn>,
    pub edit_columns: Vec<EditColumn>,
    pub delete_columns: Vec<String>,
}

impl EditTableRequest {
    pub fn add_column(table_name: &str, column: &Column) -> Self {
        EditTableRequest {
            table_name: table_name.to_string(),
            add_columns: vec![EditColumn::from(column)],
            edit_columns: Vec::new(),
            delete_columns: Vec::new(),
        }
    }

    pub fn delete_column(table_name: &str, column_name: &str) -> Self {
        EditTableRequest {
            table_name: table_name.to_string(),
            add_columns: Vec::new(),
            edit_columns: Vec::new(),
            delete_columns: vec![column_name.to_string()],
        }
    }
}

/// Operations offered by the remote migration service.
///
/// Each call either succeeds as a whole or fails as a whole. Success bodies of
/// mutations are returned as opaque JSON; the controller does not depend on them.
#[async_trait]
pub trait SchemaService: Send + Sync {
    async fn list_tables(&self) -> Result<Vec<Table>, ServiceError>;

    async fn create_table(&self, table: &Table) -> Result<serde_json::Value, ServiceError>;

    async fn delete_table(
        &self,
        request: &DeleteTableRequest,
    ) -> Result<serde_json::Value, ServiceError>;

    async fn rename_table(
        &self,
        request: &RenameTableRequest,
    ) -> Result<serde_json::Value, ServiceError>;

    async fn edit_table(
        &self,
        request: &EditTableRequest,
    ) -> Result<serde_json::Value, ServiceError>;
}
