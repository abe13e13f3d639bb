//! Input rules for product payloads and query parameters.
//!
//! Payload rules run in a fixed order and stop at the first violation; the
//! returned message names the offending field.

use serde_json::Value;
use validator::ValidationErrors;

use crate::error::{ProductError, ProductResult};
use crate::models::{ProductPayload, ValidatedProduct};

pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_DESCRIPTION_CHARS: usize = 4000;

pub const NAME_REQUIRED: &str = "El campo 'nombre' es obligatorio y no puede estar vacío";
pub const NAME_TOO_LONG: &str = "El nombre no puede exceder 100 caracteres";
pub const DESCRIPTION_TOO_LONG: &str = "La descripción no puede exceder 4000 caracteres";
pub const QUANTITY_NOT_INTEGER: &str = "La cantidad debe ser un número entero válido";
pub const QUANTITY_NEGATIVE: &str = "La cantidad no puede ser negativa";
pub const PRICE_NOT_NUMBER: &str = "El precio debe ser un número válido";
pub const PRICE_NEGATIVE: &str = "El precio no puede ser negativo";
pub const INVALID_ID: &str = "ID inválido. Debe ser un número positivo";
pub const SEARCH_TERM_REQUIRED: &str = "El parámetro 'nombre' es requerido y no puede estar vacío";

fn invalid(message: &str) -> ProductError {
    ProductError::InvalidArgument(message.to_string())
}

/// Check every rule and produce the trimmed, typed product.
pub fn validate_payload(payload: ProductPayload) -> ProductResult<ValidatedProduct> {
    let name = payload
        .nombre
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| invalid(NAME_REQUIRED))?;
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(invalid(NAME_TOO_LONG));
    }

    // Measured before trimming, unlike the name
    let raw_description = payload.descripcion.as_deref().unwrap_or_default();
    if raw_description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(invalid(DESCRIPTION_TOO_LONG));
    }
    let description = raw_description.trim();

    let quantity = parse_quantity(payload.cantidad.as_ref()).ok_or_else(|| invalid(QUANTITY_NOT_INTEGER))?;
    if quantity < 0 {
        return Err(invalid(QUANTITY_NEGATIVE));
    }

    let price = parse_price(payload.precio.as_ref()).ok_or_else(|| invalid(PRICE_NOT_NUMBER))?;
    if price < 0.0 {
        return Err(invalid(PRICE_NEGATIVE));
    }

    Ok(ValidatedProduct {
        name: name.to_string(),
        description: description.to_string(),
        quantity,
        price,
    })
}

/// Integer that fits in `i32`, from a JSON integer or a numeric string.
fn parse_quantity(value: Option<&Value>) -> Option<i32> {
    let wide = match value? {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    i32::try_from(wide).ok()
}

/// Finite decimal from a JSON number or a numeric string.
fn parse_price(value: Option<&Value>) -> Option<f64> {
    let price = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    price.is_finite().then_some(price)
}

/// Ids come from the path and must be strictly positive.
pub fn validate_id(id: i64) -> ProductResult<i64> {
    if id > 0 { Ok(id) } else { Err(invalid(INVALID_ID)) }
}

/// Trimmed, non-empty search term.
pub fn validate_search_term(term: Option<&str>) -> ProductResult<String> {
    term.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or_else(|| invalid(SEARCH_TERM_REQUIRED))
}

/// First message of a `validator` failure, for derive-validated query structs.
pub fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Valor inválido para '{field}'"))
            })
        })
        .next()
        .unwrap_or_else(|| "Parámetros inválidos".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> ProductPayload {
        serde_json::from_value(value).unwrap()
    }

    fn message(result: ProductResult<ValidatedProduct>) -> String {
        match result {
            Err(ProductError::InvalidArgument(msg)) => msg,
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_payload_is_trimmed_and_typed() {
        let product = validate_payload(payload(json!({
            "nombre": "  Laptop HP ",
            "descripcion": " Laptop para oficina  ",
            "cantidad": 10,
            "precio": 850000.50
        })))
        .unwrap();

        assert_eq!(
            product,
            ValidatedProduct {
                name: "Laptop HP".into(),
                description: "Laptop para oficina".into(),
                quantity: 10,
                price: 850000.50,
            }
        );
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let product = validate_payload(payload(json!({
            "nombre": "Mouse",
            "cantidad": " 7 ",
            "precio": "12.5"
        })))
        .unwrap();

        assert_eq!(product.quantity, 7);
        assert_eq!(product.price, 12.5);
        assert_eq!(product.description, "");
    }

    #[test]
    fn test_name_rules() {
        assert_eq!(message(validate_payload(payload(json!({})))), NAME_REQUIRED);
        assert_eq!(
            message(validate_payload(payload(json!({"nombre": "   "})))),
            NAME_REQUIRED
        );

        let long = "x".repeat(MAX_NAME_CHARS + 1);
        assert_eq!(
            message(validate_payload(payload(json!({"nombre": long})))),
            NAME_TOO_LONG
        );

        // Length is measured after trimming, in characters
        let padded = format!("  {}  ", "ñ".repeat(MAX_NAME_CHARS));
        assert!(validate_payload(payload(json!({"nombre": padded, "cantidad": 1, "precio": 1}))).is_ok());
    }

    #[test]
    fn test_description_limit() {
        let long = "d".repeat(MAX_DESCRIPTION_CHARS + 1);
        assert_eq!(
            message(validate_payload(payload(json!({"nombre": "A", "descripcion": long})))),
            DESCRIPTION_TOO_LONG
        );

        let padded = format!("{}  ", "d".repeat(MAX_DESCRIPTION_CHARS));
        assert_eq!(
            message(validate_payload(payload(json!({"nombre": "A", "descripcion": padded})))),
            DESCRIPTION_TOO_LONG
        );

        let exact = "d".repeat(MAX_DESCRIPTION_CHARS);
        let product = validate_payload(payload(
            json!({"nombre": "A", "descripcion": exact, "cantidad": 1, "precio": 1}),
        ))
        .unwrap();
        assert_eq!(product.description.chars().count(), MAX_DESCRIPTION_CHARS);
    }

    #[test]
    fn test_quantity_rules() {
        let cases = [
            (json!(null), QUANTITY_NOT_INTEGER),
            (json!("diez"), QUANTITY_NOT_INTEGER),
            (json!(2.5), QUANTITY_NOT_INTEGER),
            (json!(true), QUANTITY_NOT_INTEGER),
            (json!(3_000_000_000_i64), QUANTITY_NOT_INTEGER),
            (json!(-1), QUANTITY_NEGATIVE),
            (json!("-4"), QUANTITY_NEGATIVE),
        ];

        for (cantidad, expected) in cases {
            let result = validate_payload(payload(json!({"nombre": "A", "cantidad": cantidad, "precio": 1})));
            assert_eq!(message(result), expected, "cantidad = {cantidad}");
        }
    }

    #[test]
    fn test_price_rules() {
        let cases = [
            (json!(null), PRICE_NOT_NUMBER),
            (json!("gratis"), PRICE_NOT_NUMBER),
            (json!("NaN"), PRICE_NOT_NUMBER),
            (json!("inf"), PRICE_NOT_NUMBER),
            (json!(-0.01), PRICE_NEGATIVE),
        ];

        for (precio, expected) in cases {
            let result = validate_payload(payload(json!({"nombre": "A", "cantidad": 1, "precio": precio})));
            assert_eq!(message(result), expected, "precio = {precio}");
        }
    }

    #[test]
    fn test_rules_fail_fast_in_order() {
        // Every field is wrong; only the name is reported
        let result = validate_payload(payload(json!({"cantidad": -1, "precio": -1})));
        assert_eq!(message(result), NAME_REQUIRED);

        let result = validate_payload(payload(json!({"nombre": "A", "cantidad": -1, "precio": -1})));
        assert_eq!(message(result), QUANTITY_NEGATIVE);
    }

    #[test]
    fn test_zero_values_are_allowed() {
        let product =
            validate_payload(payload(json!({"nombre": "A", "cantidad": 0, "precio": 0}))).unwrap();
        assert_eq!(product.quantity, 0);
        assert_eq!(product.price, 0.0);
    }

    #[test]
    fn test_validate_id() {
        assert_eq!(validate_id(1).unwrap(), 1);
        assert!(matches!(validate_id(0), Err(ProductError::InvalidArgument(_))));
        assert!(matches!(validate_id(-5), Err(ProductError::InvalidArgument(_))));
    }

    #[test]
    fn test_validate_search_term() {
        assert_eq!(validate_search_term(Some("  lap ")).unwrap(), "lap");
        assert!(validate_search_term(Some("   ")).is_err());
        assert!(validate_search_term(None).is_err());
    }
}
