//! Числовая таблица с индексной колонкой

use ndarray::{concatenate, s, Array1, Array2, ArrayView1, Axis};

use crate::error::{Error, Result};

/// Таблица: индекс (идентификатор строки, как текст) + именованные колонки f64.
/// Пропуски хранятся как NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub index_name: String,
    pub index: Vec<String>,
    pub columns: Vec<String>,
    pub values: Array2<f64>,
}

impl Frame {
    pub fn new(
        index_name: impl Into<String>,
        index: Vec<String>,
        columns: Vec<String>,
        values: Array2<f64>,
    ) -> Result<Self> {
        if values.nrows() != index.len() {
            return Err(Error::LengthMismatch {
                expected: index.len(),
                actual: values.nrows(),
            });
        }
        if values.ncols() != columns.len() {
            return Err(Error::LengthMismatch {
                expected: columns.len(),
                actual: values.ncols(),
            });
        }

        Ok(Self {
            index_name: index_name.into(),
            index,
            columns,
            values,
        })
    }

    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    pub fn column_position(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| Error::MissingColumn {
                column: name.to_string(),
                available: self.columns.clone(),
            })
    }

    pub fn column(&self, name: &str) -> Result<ArrayView1<'_, f64>> {
        let idx = self.column_position(name)?;
        Ok(self.values.column(idx))
    }

    /// Все колонки кроме последней
    pub fn drop_last_column(&self) -> Frame {
        let keep = self.ncols().saturating_sub(1);
        Frame {
            index_name: self.index_name.clone(),
            index: self.index.clone(),
            columns: self.columns[..keep].to_vec(),
            values: self.values.slice(s![.., ..keep]).to_owned(),
        }
    }

    /// Копия таблицы с новой колонкой в конце
    pub fn with_column(&self, name: impl Into<String>, column: &Array1<f64>) -> Result<Frame> {
        if column.len() != self.nrows() {
            return Err(Error::LengthMismatch {
                expected: self.nrows(),
                actual: column.len(),
            });
        }

        let column = column.view().insert_axis(Axis(1));
        let values = concatenate(Axis(1), &[self.values.view(), column])?;

        let mut columns = self.columns.clone();
        columns.push(name.into());

        Ok(Frame {
            index_name: self.index_name.clone(),
            index: self.index.clone(),
            columns,
            values,
        })
    }
}
