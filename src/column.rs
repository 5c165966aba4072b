use std::str::FromStr;

use crate::error::ValidationError;
use crate::schema::{AttributeSet, Column, DataAttribute, DataType};
// column.rs

/// A single field update on a column draft.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColumnEdit {
    SetName(String),
    SetType(DataType),
}

impl ColumnEdit {
    /// Builds an edit from a field name and raw text, as typed into a form.
    /// Accepted fields are `name` and `type`.
    pub fn parse(field: &str, value: &str) -> Result<Self, ValidationError> {
        match field.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(ColumnEdit::SetName(value.to_string())),
            "type" => Ok(ColumnEdit::SetType(value.parse()?)),
            other => Err(ValidationError::MalformedColumnSpec(format!("{}={}", other, value))),
        }
    }
}

/// Trait defining the edit operations on a column draft.
/// Every operation is a pure transform; the caller stores the result.
pub trait ColumnEditor: Sized {
    /// Returns the column with one field replaced. Nothing is validated here.
    fn set_field(&self, edit: ColumnEdit) -> Self;
    /// Returns the column with `attribute` added if absent, removed if present.
    fn toggle_attribute(&self, attribute: DataAttribute) -> Self;
}

impl ColumnEditor for Column {
    fn set_field(&self, edit: ColumnEdit) -> Self {
        let mut column = self.clone();
        match edit {
            ColumnEdit::SetName(name) => column.name = name,
            ColumnEdit::SetType(data_type) => column.data_type = data_type,
        }
        column
    }

    fn toggle_attribute(&self, attribute: DataAttribute) -> Self {
        let mut column = self.clone();
        column.attributes.toggle(attribute);
        column
    }
}

/// Parses `name:type[:attr,attr]`, e.g. `id:integer:primary_key,autoincrement`.
impl FromStr for Column {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let name = parts.next().unwrap_or_default().trim();
        let data_type = match parts.next() {
            Some(t) if !t.trim().is_empty() => t.parse::<DataType>()?,
            Some(_) => return Err(ValidationError::MalformedColumnSpec(s.to_string())),
            None => DataType::default(),
        };
        if name.is_empty() {
            return Err(ValidationError::MalformedColumnSpec(s.to_string()));
        }
        let attributes = match parts.next() {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(DataAttribute::from_str)
                .collect::<Result<AttributeSet, _>>()?,
            None => AttributeSet::new(),
        };
        Ok(Column {
            name: name.to_string(),
            data_type,
            attributes,
        })
    }
}
