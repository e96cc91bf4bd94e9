use std::fmt;

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct SelectStatement {
    /// Identifiers or `*`, in source order.
    pub columns: Vec<String>,
    pub table: String,
    pub where_clause: Option<WhereClause>,
}

impl SelectStatement {
    pub fn where_column(&self) -> Option<&str> {
        self.where_clause.as_ref().map(|w| w.column.as_str())
    }

    pub fn where_operator(&self) -> Option<&str> {
        self.where_clause.as_ref().map(|w| w.operator.as_str())
    }

    pub fn where_value(&self) -> Option<&str> {
        self.where_clause.as_ref().map(|w| w.value.as_str())
    }
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT {} FROM {}", self.columns.join(", "), self.table)?;

        match &self.where_clause {
            Some(c) => write!(f, " WHERE {}", c),
            None => Ok(()),
        }
    }
}

/// A single `<column> <operator> <value>` comparison.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct WhereClause {
    pub column: String,
    pub operator: ComparisonOperator,
    pub value: Literal,
}

impl fmt::Display for WhereClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.column, self.operator, self.value)
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ComparisonOperator {
    Equal,       // =
    GreaterThan, // >
    LessThan,    // <
}

impl ComparisonOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOperator::Equal => "=",
            ComparisonOperator::GreaterThan => ">",
            ComparisonOperator::LessThan => "<",
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The right-hand side of a comparison. Not checked against the column or
/// operator, so `age > 'eighteen'` is accepted.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Literal {
    Number(String),
    String(String),
}

impl Literal {
    pub fn as_str(&self) -> &str {
        match self {
            Literal::Number(n) => n,
            Literal::String(s) => s,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{n}"),
            Literal::String(s) => write!(f, "'{s}'"),
        }
    }
}
