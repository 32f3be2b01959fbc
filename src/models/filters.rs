use chrono::NaiveDate;

use super::enums::Sexo;

/// Optional, independently validated filters for the patient search path.
/// Absent fields impose no constraint; supplied fields match by equality.
#[derive(Debug, Default)]
pub struct PacienteFilter {
    pub sexo: Option<Sexo>,
    pub fecha_ingreso: Option<NaiveDate>,
    pub enfermedad: Option<String>,
}
