//! Column-oriented data table
//!
//! Columns are typed once at load time. Category and label columns are
//! resolved to plain vectors before anything per-frame touches them.

use std::collections::HashMap;

use crate::error::{NebulaError, Result};

#[derive(Clone, Debug, PartialEq)]
pub enum Column {
    Numeric(Vec<f64>),
    /// Codes index into `categories` (first-seen order)
    Categorical {
        values: Vec<u32>,
        categories: Vec<String>,
    },
    Text(Vec<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Categorical { values, .. } => values.len(),
            Column::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell `row` as display text
    pub fn text_at(&self, row: usize) -> Option<String> {
        match self {
            Column::Numeric(v) => v.get(row).map(|x| x.to_string()),
            Column::Categorical { values, categories } => values
                .get(row)
                .and_then(|code| categories.get(*code as usize))
                .cloned(),
            Column::Text(v) => v.get(row).cloned(),
        }
    }
}

/// Intern strings in first-seen order
pub fn intern_categories<S: AsRef<str>>(raw: &[S]) -> (Vec<u32>, Vec<String>) {
    let mut lookup: HashMap<&str, u32> = HashMap::new();
    let mut categories = Vec::new();
    let values = raw
        .iter()
        .map(|s| {
            let s = s.as_ref();
            *lookup.entry(s).or_insert_with(|| {
                categories.push(s.to_string());
                (categories.len() - 1) as u32
            })
        })
        .collect();
    (values, categories)
}

/// JSON array of strings from JS; blank input is an empty list
pub fn string_list_from_json(payload: &'static str, json: &str) -> Result<Vec<String>> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(json).map_err(|e| NebulaError::Payload {
        payload,
        reason: e.to_string(),
    })
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataTable {
    rows: usize,
    /// Insertion order kept for display
    names: Vec<String>,
    columns: HashMap<String, Column>,
}

impl DataTable {
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .get(name)
            .ok_or_else(|| NebulaError::UnknownColumn(name.to_string()))
    }

    fn insert(&mut self, name: &str, column: Column) -> Result<()> {
        if column.len() != self.rows {
            return Err(NebulaError::ColumnLength {
                column: name.to_string(),
                expected: self.rows,
                actual: column.len(),
            });
        }
        if self.columns.insert(name.to_string(), column).is_none() {
            self.names.push(name.to_string());
        }
        Ok(())
    }

    pub fn push_numeric(&mut self, name: &str, values: Vec<f64>) -> Result<()> {
        self.insert(name, Column::Numeric(values))
    }

    pub fn push_categorical_strings<S: AsRef<str>>(&mut self, name: &str, raw: &[S]) -> Result<()> {
        let (values, categories) = intern_categories(raw);
        self.insert(name, Column::Categorical { values, categories })
    }

    pub fn push_text(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        self.insert(name, Column::Text(values))
    }

    /// Category code per row. Non-categorical columns put every row in 0.
    pub fn category_indices(&self, name: &str) -> Result<Vec<u32>> {
        Ok(match self.column(name)? {
            Column::Categorical { values, .. } => values.clone(),
            _ => vec![0; self.rows],
        })
    }

    pub fn category_names(&self, name: &str) -> Result<Vec<String>> {
        Ok(match self.column(name)? {
            Column::Categorical { categories, .. } => categories.clone(),
            _ => Vec::new(),
        })
    }

    /// Display label per row, any column kind
    pub fn labels(&self, name: &str) -> Option<Vec<String>> {
        let column = self.columns.get(name)?;
        Some(
            (0..self.rows)
                .map(|row| column.text_at(row).unwrap_or_default())
                .collect(),
        )
    }
}
