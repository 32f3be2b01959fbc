use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::Sexo;

/// A patient admission record. Flat and standalone; `id` is assigned at
/// creation and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paciente {
    pub id: Uuid,
    pub rut: String,
    pub nombre: String,
    pub edad: i64,
    pub sexo: Sexo,
    pub enfermedad: String,
    pub fecha_ingreso: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foto_personal: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_wire_field_names() {
        let paciente = Paciente {
            id: Uuid::new_v4(),
            rut: "12345678-9".into(),
            nombre: "Ana Rojas".into(),
            edad: 42,
            sexo: Sexo::Femenino,
            enfermedad: "Neumonía".into(),
            fecha_ingreso: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            foto_personal: None,
        };

        let json: serde_json::Value = serde_json::to_value(&paciente).unwrap();
        assert_eq!(json["rut"], "12345678-9");
        assert_eq!(json["fechaIngreso"], "2024-05-01");
        // absent photo is omitted entirely, not null
        assert!(json.get("fotoPersonal").is_none());
    }

    #[test]
    fn photo_path_appears_when_present() {
        let paciente = Paciente {
            id: Uuid::new_v4(),
            rut: "1234567-8".into(),
            nombre: "Luis Soto".into(),
            edad: 30,
            sexo: Sexo::Masculino,
            enfermedad: "Gripe".into(),
            fecha_ingreso: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            foto_personal: Some("uploads/abc-foto.jpg".into()),
        };

        let json: serde_json::Value = serde_json::to_value(&paciente).unwrap();
        assert_eq!(json["fotoPersonal"], "uploads/abc-foto.jpg");
    }
}
