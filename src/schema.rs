use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Represents the type of a column in a table schema.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    String,
    Integer,
    Boolean,
    Float,
    Datetime,
    Text,
}

impl DataType {
    /// Every data type the migration service understands, in menu order.
    pub const ALL: [DataType; 6] = [
        DataType::String,
        DataType::Integer,
        DataType::Boolean,
        DataType::Float,
        DataType::Datetime,
        DataType::Text,
    ];

    /// Wire name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Integer => "integer",
            DataType::Boolean => "boolean",
            DataType::Float => "float",
            DataType::Datetime => "datetime",
            DataType::Text => "text",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            DataType::String => "String",
            DataType::Integer => "Integer",
            DataType::Boolean => "Boolean",
            DataType::Float => "Float",
            DataType::Datetime => "DateTime",
            DataType::Text => "Text",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        DataType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| ValidationError::UnknownDataType(token.to_string()))
    }
}

/// Returns true if `token` names one of the closed set of data types.
pub fn is_valid_data_type(token: &str) -> bool {
    token.parse::<DataType>().is_ok()
}

/// A boolean constraint flag attached to a column.
///
/// On the wire each flag is written as `name=True`; the bare name is accepted
/// when reading.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataAttribute {
    #[serde(rename = "primary_key=True", alias = "primary_key")]
    PrimaryKey,
    #[serde(rename = "nullable=True", alias = "nullable")]
    Nullable,
    #[serde(rename = "unique=True", alias = "unique")]
    Unique,
    #[serde(rename = "index=True", alias = "index")]
    Index,
    #[serde(rename = "autoincrement=True", alias = "autoincrement")]
    Autoincrement,
    #[serde(rename = "foreign_key=True", alias = "foreign_key")]
    ForeignKey,
}

impl DataAttribute {
    pub const ALL: [DataAttribute; 6] = [
        DataAttribute::PrimaryKey,
        DataAttribute::Nullable,
        DataAttribute::Unique,
        DataAttribute::Index,
        DataAttribute::Autoincrement,
        DataAttribute::ForeignKey,
    ];

    /// Bare flag name, e.g. `primary_key`.
    pub fn name(&self) -> &'static str {
        match self {
            DataAttribute::PrimaryKey => "primary_key",
            DataAttribute::Nullable => "nullable",
            DataAttribute::Unique => "unique",
            DataAttribute::Index => "index",
            DataAttribute::Autoincrement => "autoincrement",
            DataAttribute::ForeignKey => "foreign_key",
        }
    }

    /// Flag form sent to the migration service, e.g. `primary_key=True`.
    pub fn wire_name(&self) -> &'static str {
        match self {
            DataAttribute::PrimaryKey => "primary_key=True",
            DataAttribute::Nullable => "nullable=True",
            DataAttribute::Unique => "unique=True",
            DataAttribute::Index => "index=True",
            DataAttribute::Autoincrement => "autoincrement=True",
            DataAttribute::ForeignKey => "foreign_key=True",
        }
    }
}

impl fmt::Display for DataAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for DataAttribute {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        DataAttribute::ALL
            .iter()
            .copied()
            .find(|a| a.name().eq_ignore_ascii_case(token) || a.wire_name().eq_ignore_ascii_case(token))
            .ok_or_else(|| ValidationError::UnknownAttribute(token.to_string()))
    }
}

/// Returns true if `token` names one of the closed set of attributes.
pub fn is_valid_data_attribute(token: &str) -> bool {
    token.parse::<DataAttribute>().is_ok()
}

/// Set of attributes on a column. Keeps insertion order for display.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(from = "Vec<DataAttribute>")]
pub struct AttributeSet(Vec<DataAttribute>);

impl AttributeSet {
    pub fn new() -> Self {
        AttributeSet(Vec::new())
    }

    pub fn contains(&self, attribute: DataAttribute) -> bool {
        self.0.contains(&attribute)
    }

    /// Adds the attribute. Returns false if it was already present.
    pub fn insert(&mut self, attribute: DataAttribute) -> bool {
        if self.contains(attribute) {
            return false;
        }
        self.0.push(attribute);
        true
    }

    /// Removes the attribute. Returns false if it was absent.
    pub fn remove(&mut self, attribute: DataAttribute) -> bool {
        let before = self.0.len();
        self.0.retain(|a| *a != attribute);
        self.0.len() != before
    }

    /// Adds the attribute if absent, removes it if present.
    pub fn toggle(&mut self, attribute: DataAttribute) {
        if !self.remove(attribute) {
            self.0.push(attribute);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = DataAttribute> + '_ {
        self.0.iter().copied()
    }

    /// Comma-joined wire form used by the edit-table request.
    pub fn joined(&self) -> String {
        self.0
            .iter()
            .map(|a| a.wire_name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl From<Vec<DataAttribute>> for AttributeSet {
    fn from(attributes: Vec<DataAttribute>) -> Self {
        let mut set = AttributeSet::new();
        for attribute in attributes {
            set.insert(attribute);
        }
        set
    }
}

impl FromIterator<DataAttribute> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = DataAttribute>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}

// Order is presentation only.
impl PartialEq for AttributeSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|a| other.contains(a))
    }
}

impl Eq for AttributeSet {}

/// A column definition: name, type and constraint flags.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: DataType,
    #[serde(default)]
    pub attributes: AttributeSet,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Column {
            name: name.into(),
            data_type,
            attributes: AttributeSet::new(),
        }
    }

    /// Builder: attach an attribute.
    pub fn with_attribute(mut self, attribute: DataAttribute) -> Self {
        self.attributes.insert(attribute);
        self
    }

    /// A column may be persisted once it has a name. The type is always set.
    pub fn is_submittable(&self) -> bool {
        !self.name.is_empty()
    }
}

/// A table as the migration service reports it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Table {
    pub table_name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(table_name: impl Into<String>, columns: Vec<Column>) -> Self {
        Table {
            table_name: table_name.into(),
            columns,
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}
