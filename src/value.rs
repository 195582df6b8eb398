use std::fmt;

/// Scalar operand of a filter clause, rendered as a PostgREST literal.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FilterValue {
    pub fn null() -> Self {
        Self::Null
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Percent-encoded form used inside a query parameter.
    pub(crate) fn encoded(&self) -> String {
        urlencoding::encode(&self.to_string()).into_owned()
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<&String> for FilterValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u32> for FilterValue {
    fn from(value: u32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<i16> for FilterValue {
    fn from(value: i16) -> Self {
        Self::Integer(value.into())
    }
}

/// Falls back to the decimal text when the value exceeds `i64::MAX`.
impl From<u64> for FilterValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::Integer)
    }
}

impl From<usize> for FilterValue {
    fn from(value: usize) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::Integer)
    }
}

impl From<f32> for FilterValue {
    fn from(value: f32) -> Self {
        Self::Float(value.into())
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use crate::FilterValue;

    #[test]
    fn renders_postgrest_literals() {
        assert_eq!(FilterValue::null().to_string(), "null");
        assert_eq!(FilterValue::from(true).to_string(), "true");
        assert_eq!(FilterValue::from(42).to_string(), "42");
        assert_eq!(FilterValue::from(1.5).to_string(), "1.5");
        assert_eq!(FilterValue::text("kit").to_string(), "kit");
        assert_eq!(FilterValue::from(None::<i64>), FilterValue::Null);
    }

    #[test]
    fn converts_wider_and_narrower_numbers() {
        assert_eq!(FilterValue::from(7u64), FilterValue::Integer(7));
        assert_eq!(FilterValue::from(9usize), FilterValue::Integer(9));
        assert_eq!(FilterValue::from(-3i16), FilterValue::Integer(-3));
        assert_eq!(FilterValue::from(0.5f32), FilterValue::Float(0.5));
        assert_eq!(FilterValue::from(u64::MAX).to_string(), u64::MAX.to_string());
        assert_eq!(
            FilterValue::from(u64::MAX),
            FilterValue::Text("18446744073709551615".to_owned())
        );
    }

    #[test]
    fn encodes_reserved_characters() {
        assert_eq!(FilterValue::text("a b").encoded(), "a%20b");
        assert_eq!(FilterValue::text("x&y=z").encoded(), "x%26y%3Dz");
        assert_eq!(FilterValue::text("%smith%").encoded(), "%25smith%25");
    }
}
