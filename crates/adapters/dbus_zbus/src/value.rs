//! Conversions between D-Bus variants and [`BusValue`].
//!
//! Venus OS publishes "no value" as an empty array; any shape other than a
//! number or a string is treated the same way.

use zbus::zvariant::Value;

use whrelay_domain::bus::BusValue;

use crate::error::DbusError;

/// Convert a variant read with `GetValue`.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn from_variant(value: &Value<'_>) -> BusValue {
    match value {
        Value::U8(v) => BusValue::Int(i64::from(*v)),
        Value::Bool(v) => BusValue::Int(i64::from(*v)),
        Value::I16(v) => BusValue::Int(i64::from(*v)),
        Value::U16(v) => BusValue::Int(i64::from(*v)),
        Value::I32(v) => BusValue::Int(i64::from(*v)),
        Value::U32(v) => BusValue::Int(i64::from(*v)),
        Value::I64(v) => BusValue::Int(*v),
        Value::U64(v) => i64::try_from(*v).map_or(BusValue::Float(*v as f64), BusValue::Int),
        Value::F64(v) => BusValue::Float(*v),
        Value::Str(s) => BusValue::Text(s.to_string()),
        Value::Value(inner) => from_variant(inner),
        _ => BusValue::Invalid,
    }
}

/// Convert a value for `SetValue`. Integers that fit are sent as `i32`,
/// which is what Venus OS relay objects expect.
pub(crate) fn to_variant(value: &BusValue) -> Result<Value<'_>, DbusError> {
    match value {
        BusValue::Int(v) => Ok(i32::try_from(*v).map_or(Value::I64(*v), Value::I32)),
        BusValue::Float(v) => Ok(Value::F64(*v)),
        BusValue::Text(s) => Ok(Value::from(s.as_str())),
        BusValue::Invalid => Err(DbusError::UnsupportedValue(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_read_integers_of_any_width() {
        assert_eq!(from_variant(&Value::I32(240)), BusValue::Int(240));
        assert_eq!(from_variant(&Value::U8(3)), BusValue::Int(3));
        assert_eq!(from_variant(&Value::I64(-1)), BusValue::Int(-1));
        assert_eq!(from_variant(&Value::U32(4)), BusValue::Int(4));
    }

    #[test]
    fn should_read_bool_as_integer() {
        assert_eq!(from_variant(&Value::Bool(true)), BusValue::Int(1));
    }

    #[test]
    fn should_read_string() {
        assert_eq!(
            from_variant(&Value::from("AC Water Heater")),
            BusValue::from("AC Water Heater")
        );
    }

    #[test]
    fn should_read_double() {
        assert_eq!(from_variant(&Value::F64(1.5)), BusValue::Float(1.5));
    }

    #[test]
    fn should_unwrap_nested_variant() {
        let nested = Value::Value(Box::new(Value::I32(1)));
        assert_eq!(from_variant(&nested), BusValue::Int(1));
    }

    #[test]
    fn should_read_empty_array_as_invalid() {
        let empty: Vec<i32> = Vec::new();
        assert_eq!(from_variant(&Value::from(empty)), BusValue::Invalid);
    }

    #[test]
    fn should_write_small_integers_as_i32() {
        assert_eq!(to_variant(&BusValue::Int(1)).unwrap(), Value::I32(1));
    }

    #[test]
    fn should_write_large_integers_as_i64() {
        let big = i64::from(i32::MAX) + 1;
        assert_eq!(to_variant(&BusValue::Int(big)).unwrap(), Value::I64(big));
    }

    #[test]
    fn should_write_text_as_string() {
        let text = BusValue::from("AC WH");
        assert_eq!(to_variant(&text).unwrap(), Value::from("AC WH"));
    }

    #[test]
    fn should_refuse_to_write_invalid() {
        assert!(matches!(
            to_variant(&BusValue::Invalid),
            Err(DbusError::UnsupportedValue(_))
        ));
    }
}
