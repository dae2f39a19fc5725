use google_sheets4::api::ValueRange;
use serde_json::Value;
use std::borrow::Cow;

pub trait ValueRangeFactory {
    fn from_row<'a, T: Into<Cow<'a, str>> + Clone>(row_values: &[T]) -> Self;
}

fn wrap_value<'a, T: Into<Cow<'a, str>>>(value: T) -> Value {
    Value::String(value.into().into_owned())
}

impl ValueRangeFactory for ValueRange {
    fn from_row<'a, T: Into<Cow<'a, str>> + Clone>(row_values: &[T]) -> Self {
        let row = row_values
            .iter()
            .map(|cell| wrap_value(cell.clone()))
            .collect::<Vec<_>>();

        Self {
            major_dimension: Some("ROWS".to_string()),
            range: None,
            values: Some(vec![row]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_value() {
        let value = wrap_value("1");
        assert_eq!(value, Value::String("1".to_string()));
    }

    // ["Alice", "a@x.com"] -> one row with two cells, in order
    #[test]
    fn test_from_row() {
        let value_range = ValueRange::from_row(&["Alice".to_string(), "a@x.com".to_string()]);
        assert_eq!(
            value_range.major_dimension,
            Some("ROWS".to_string()),
            "Major dimension should be ROWS"
        );
        assert_eq!(value_range.range, None, "Range should be None");
        assert_eq!(
            value_range.values,
            Some(vec![vec![
                Value::String("Alice".to_string()),
                Value::String("a@x.com".to_string())
            ]]),
        );
    }

    #[test]
    fn test_from_row_keeps_blank_cells() {
        let value_range = ValueRange::from_row(&["a", "", "c"]);
        let row = &value_range.values.unwrap()[0];
        assert_eq!(row.len(), 3);
        assert_eq!(row[1], Value::String(String::new()));
    }
}
