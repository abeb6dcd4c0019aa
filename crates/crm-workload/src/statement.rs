//! A single parameterized SQL statement.

use mysql_async::Value;

/// Positional parameter bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParam {
    Int(i64),
    Text(String),
}

impl From<i64> for QueryParam {
    fn from(value: i64) -> Self {
        QueryParam::Int(value)
    }
}

impl From<&str> for QueryParam {
    fn from(value: &str) -> Self {
        QueryParam::Text(value.to_string())
    }
}

impl From<String> for QueryParam {
    fn from(value: String) -> Self {
        QueryParam::Text(value)
    }
}

impl From<QueryParam> for Value {
    fn from(param: QueryParam) -> Self {
        match param {
            QueryParam::Int(i) => Value::Int(i),
            QueryParam::Text(s) => Value::Bytes(s.into_bytes()),
        }
    }
}

/// Static SQL template plus its positional parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: &'static str,
    pub params: Vec<QueryParam>,
}

impl Statement {
    pub fn new(sql: &'static str) -> Self {
        Self {
            sql,
            params: Vec::new(),
        }
    }

    /// Append the next positional parameter.
    pub fn bind(mut self, param: impl Into<QueryParam>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Number of `?` placeholders in the template.
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_in_order() {
        let stmt = Statement::new("SELECT salary FROM salaries WHERE emp_no = ? AND to_date = ?")
            .bind(10001i64)
            .bind("9999-01-01");

        assert_eq!(stmt.placeholder_count(), 2);
        assert_eq!(
            stmt.params,
            vec![
                QueryParam::Int(10001),
                QueryParam::Text("9999-01-01".to_string())
            ]
        );
    }

    #[test]
    fn test_param_to_mysql_value() {
        assert_eq!(Value::from(QueryParam::Int(42)), Value::Int(42));
        assert_eq!(
            Value::from(QueryParam::from("d001")),
            Value::Bytes(b"d001".to_vec())
        );
    }
}
