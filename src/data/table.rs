use std::fmt;

// ---------------------------------------------------------------------------
// Cell – a single spreadsheet value
// ---------------------------------------------------------------------------

/// A dynamically-typed cell, covering what spreadsheets and CSV files hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Cell {
    /// Numeric value of `Int` and `Float` cells. Booleans and text are not
    /// numbers here, even when they look like one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(i) => Some(*i as f64),
            Cell::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Guess the type of a text field (CSV input).
    pub fn parse(s: &str) -> Cell {
        if s.is_empty() {
            return Cell::Empty;
        }
        if let Ok(i) = s.parse::<i64>() {
            return Cell::Int(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return Cell::Float(f);
        }
        match s {
            "true" | "TRUE" | "True" => Cell::Bool(true),
            "false" | "FALSE" | "False" => Cell::Bool(false),
            _ => Cell::Text(s.to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Int(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Float(v)
    }
}

// ---------------------------------------------------------------------------
// BatchTable – rectangular grid of cells
// ---------------------------------------------------------------------------

/// A rectangular table read from a header-less file. Columns are positional;
/// their names are the position as text until a named column is appended.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchTable {
    column_names: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl BatchTable {
    /// Build from raw rows. Short rows are padded with `Empty` and trailing
    /// all-empty rows are dropped.
    pub fn from_rows(mut rows: Vec<Vec<Cell>>) -> Self {
        while rows
            .last()
            .is_some_and(|row| row.iter().all(Cell::is_empty))
        {
            rows.pop();
        }
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, Cell::Empty);
        }
        BatchTable {
            column_names: (0..width).map(|i| i.to_string()).collect(),
            rows,
        }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.column_names.len()
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.rows[row][col]
    }

    /// Append a named column. Missing values are padded with `Empty`; extra
    /// values are ignored.
    pub fn append_column<I>(&mut self, name: impl Into<String>, values: I)
    where
        I: IntoIterator,
        I::Item: Into<Cell>,
    {
        let mut values = values.into_iter();
        for row in &mut self.rows {
            row.push(values.next().map(Into::into).unwrap_or(Cell::Empty));
        }
        self.column_names.push(name.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_guesses_types() {
        assert_eq!(Cell::parse(""), Cell::Empty);
        assert_eq!(Cell::parse("12"), Cell::Int(12));
        assert_eq!(Cell::parse("1.5"), Cell::Float(1.5));
        assert_eq!(Cell::parse("TRUE"), Cell::Bool(true));
        assert_eq!(Cell::parse("GFRP"), Cell::Text("GFRP".into()));
    }

    #[test]
    fn ragged_rows_are_padded() {
        let t = BatchTable::from_rows(vec![
            vec![Cell::Int(1)],
            vec![Cell::Int(2), Cell::Int(3), Cell::Int(4)],
            vec![Cell::Empty, Cell::Empty],
        ]);
        assert_eq!(t.len(), 2);
        assert_eq!(t.width(), 3);
        assert_eq!(t.cell(0, 2), &Cell::Empty);
        assert_eq!(t.column_names(), &["0", "1", "2"]);
    }

    #[test]
    fn appended_column_keeps_row_order() {
        let mut t = BatchTable::from_rows(vec![vec![Cell::Int(1)], vec![Cell::Int(2)]]);
        t.append_column("Predicted", vec![10.0, 20.0]);
        assert_eq!(t.width(), 2);
        assert_eq!(t.cell(0, 1), &Cell::Float(10.0));
        assert_eq!(t.cell(1, 1), &Cell::Float(20.0));
        assert_eq!(t.cell(1, 0), &Cell::Int(2));
        assert_eq!(t.column_names()[1], "Predicted");
    }

    #[test]
    fn bool_is_not_numeric() {
        assert_eq!(Cell::Bool(true).as_f64(), None);
        assert_eq!(Cell::Int(3).as_f64(), Some(3.0));
    }
}
