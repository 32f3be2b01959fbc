//! Field-level checks for incoming patient data.
//!
//! Pure functions; each failure carries its own user-facing message so
//! handlers can report exactly which rule was violated.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

use crate::models::Sexo;

/// 7-8 digits, a hyphen and a verifier digit or K (either case).
static RUT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{7,8}-[0-9Kk]$").unwrap());

/// Minimum length for the illness search filter.
pub const MIN_ENFERMEDAD_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Todos los campos son obligatorios")]
    CamposFaltantes,
    #[error("El RUT debe tener el formato correcto: 12345678-9 o 12345678-K")]
    RutInvalido,
    #[error("La edad debe ser un número positivo")]
    EdadInvalida,
    #[error("Sexo debe ser 'Masculino', 'Femenino' o 'Otro'")]
    SexoInvalido,
    #[error("La fecha de ingreso debe ser válida")]
    FechaInvalida,
    #[error("La enfermedad debe tener al menos {0} caracteres")]
    EnfermedadCorta(usize),
}

/// Every mandatory creation field present and non-empty.
pub fn require_fields(fields: &[&Option<String>]) -> Result<(), ValidationError> {
    if fields
        .iter()
        .any(|f| f.as_deref().map_or(true, str::is_empty))
    {
        return Err(ValidationError::CamposFaltantes);
    }
    Ok(())
}

pub fn validate_rut(value: &str) -> Result<(), ValidationError> {
    if RUT_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::RutInvalido)
    }
}

/// Age in its raw text form (multipart fields arrive as text).
pub fn validate_edad_text(value: &str) -> Result<i64, ValidationError> {
    match value.trim().parse::<i64>() {
        Ok(n) if n >= 0 => Ok(n),
        _ => Err(ValidationError::EdadInvalida),
    }
}

pub fn validate_edad(value: i64) -> Result<(), ValidationError> {
    if value >= 0 {
        Ok(())
    } else {
        Err(ValidationError::EdadInvalida)
    }
}

/// Membership in the sex enumeration, case-sensitive.
pub fn validate_sexo(value: &str) -> Result<Sexo, ValidationError> {
    value
        .parse::<Sexo>()
        .map_err(|_| ValidationError::SexoInvalido)
}

/// Calendar-date well-formedness, `YYYY-MM-DD`.
pub fn validate_fecha(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ValidationError::FechaInvalida)
}

pub fn validate_min_length(value: &str, min: usize) -> Result<(), ValidationError> {
    if value.chars().count() >= min {
        Ok(())
    } else {
        Err(ValidationError::EnfermedadCorta(min))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rut_with_seven_digits_is_valid() {
        assert!(validate_rut("1234567-8").is_ok());
    }

    #[test]
    fn rut_with_eight_digits_is_valid() {
        assert!(validate_rut("12345678-9").is_ok());
    }

    #[test]
    fn rut_verifier_k_any_case_is_valid() {
        assert!(validate_rut("12345678-K").is_ok());
        assert!(validate_rut("12345678-k").is_ok());
    }

    #[test]
    fn rut_too_short_is_rejected() {
        assert_eq!(validate_rut("123-4"), Err(ValidationError::RutInvalido));
    }

    #[test]
    fn rut_without_hyphen_is_rejected() {
        assert_eq!(validate_rut("123456789"), Err(ValidationError::RutInvalido));
    }

    #[test]
    fn rut_with_nine_digits_is_rejected() {
        assert_eq!(
            validate_rut("123456789-1"),
            Err(ValidationError::RutInvalido)
        );
    }

    #[test]
    fn edad_text_accepts_zero_and_positive() {
        assert_eq!(validate_edad_text("0"), Ok(0));
        assert_eq!(validate_edad_text("42"), Ok(42));
    }

    #[test]
    fn edad_text_rejects_negative_and_non_numeric() {
        assert_eq!(validate_edad_text("-1"), Err(ValidationError::EdadInvalida));
        assert_eq!(
            validate_edad_text("treinta"),
            Err(ValidationError::EdadInvalida)
        );
        assert_eq!(
            validate_edad_text("30.5"),
            Err(ValidationError::EdadInvalida)
        );
    }

    #[test]
    fn sexo_enumeration_is_case_sensitive() {
        assert_eq!(validate_sexo("Masculino"), Ok(Sexo::Masculino));
        assert_eq!(
            validate_sexo("masculino"),
            Err(ValidationError::SexoInvalido)
        );
        assert_eq!(validate_sexo("Invalido"), Err(ValidationError::SexoInvalido));
    }

    #[test]
    fn fecha_must_be_a_real_date() {
        assert!(validate_fecha("2024-02-29").is_ok());
        assert_eq!(
            validate_fecha("2023-02-29"),
            Err(ValidationError::FechaInvalida)
        );
        assert_eq!(
            validate_fecha("no-es-fecha"),
            Err(ValidationError::FechaInvalida)
        );
    }

    #[test]
    fn min_length_counts_characters() {
        assert!(validate_min_length("tos", 3).is_ok());
        assert_eq!(
            validate_min_length("tb", 3),
            Err(ValidationError::EnfermedadCorta(3))
        );
    }

    #[test]
    fn require_fields_rejects_missing_and_empty() {
        let some = Some("valor".to_string());
        let empty = Some(String::new());
        assert!(require_fields(&[&some, &some]).is_ok());
        assert_eq!(
            require_fields(&[&some, &None]),
            Err(ValidationError::CamposFaltantes)
        );
        assert_eq!(
            require_fields(&[&some, &empty]),
            Err(ValidationError::CamposFaltantes)
        );
    }
}
