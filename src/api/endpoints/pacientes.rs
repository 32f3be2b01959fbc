//! Patient record endpoints.
//!
//! One handler per operation (create, list, detail, update, remove,
//! search), each following the same shape: parse input, validate, call
//! the store, map the result to a JSON response.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db;
use crate::models::{Paciente, PacienteFilter};
use crate::uploads;
use crate::validation;

/// `POST /api/pacientes` — create a record from multipart form data.
///
/// The five mandatory fields travel as text parts; `fotoPersonal` is an
/// optional file part persisted before the insert.
pub async fn create(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Paciente>), ApiError> {
    let mut rut = None;
    let mut nombre = None;
    let mut edad = None;
    let mut sexo = None;
    let mut enfermedad = None;
    let mut fecha_ingreso = None;
    let mut foto: Option<(String, Vec<u8>)> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "rut" => rut = field.text().await.ok(),
            "nombre" => nombre = field.text().await.ok(),
            "edad" => edad = field.text().await.ok(),
            "sexo" => sexo = field.text().await.ok(),
            "enfermedad" => enfermedad = field.text().await.ok(),
            "fechaIngreso" => fecha_ingreso = field.text().await.ok(),
            "fotoPersonal" => {
                let file_name = field.file_name().unwrap_or("foto").to_string();
                if let Ok(bytes) = field.bytes().await {
                    foto = Some((file_name, bytes.to_vec()));
                }
            }
            _ => {}
        }
    }

    validation::require_fields(&[&rut, &nombre, &edad, &sexo, &enfermedad])?;
    let edad = validation::validate_edad_text(&edad.unwrap_or_default())?;
    let rut = rut.unwrap_or_default();
    validation::validate_rut(&rut)?;
    let sexo = validation::validate_sexo(&sexo.unwrap_or_default())?;

    // The admission date is not a validated input: a well-formed value is
    // taken as-is, anything else falls back to today.
    let fecha_ingreso = fecha_ingreso
        .as_deref()
        .and_then(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").ok())
        .unwrap_or_else(|| Local::now().date_naive());

    let foto_personal = match foto {
        Some((file_name, bytes)) => Some(
            uploads::store_photo(&ctx.uploads_dir, &file_name, &bytes)
                .map_err(|e| ApiError::Internal(e.to_string()))?,
        ),
        None => None,
    };

    let paciente = Paciente {
        id: Uuid::new_v4(),
        rut,
        nombre: nombre.unwrap_or_default(),
        edad,
        sexo,
        enfermedad: enfermedad.unwrap_or_default(),
        fecha_ingreso,
        foto_personal,
    };

    let conn = ctx.open_db()?;
    db::insert_paciente(&conn, &paciente)?;

    tracing::info!(id = %paciente.id, "paciente creado");
    Ok((StatusCode::CREATED, Json(paciente)))
}

/// `GET /api/pacientes` — every record.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Paciente>>, ApiError> {
    let conn = ctx.open_db()?;
    let pacientes = db::get_pacientes(&conn)?;
    Ok(Json(pacientes))
}

/// `GET /api/pacientes/:id` — single record by id.
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Paciente>, ApiError> {
    let id = parse_id(&id)?;
    let conn = ctx.open_db()?;
    let paciente = db::get_paciente(&conn, &id)?.ok_or(ApiError::NotFound)?;
    Ok(Json(paciente))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActualizarPaciente {
    pub rut: Option<String>,
    pub nombre: Option<String>,
    pub edad: Option<i64>,
    pub sexo: Option<String>,
    pub enfermedad: Option<String>,
    pub fecha_ingreso: Option<NaiveDate>,
}

/// `PUT /api/pacientes/:id` — partial merge; only supplied fields change.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    Json(cambios): Json<ActualizarPaciente>,
) -> Result<Json<Paciente>, ApiError> {
    if let Some(rut) = &cambios.rut {
        validation::validate_rut(rut)?;
    }
    if let Some(edad) = cambios.edad {
        validation::validate_edad(edad)?;
    }
    let sexo = match &cambios.sexo {
        Some(v) => Some(validation::validate_sexo(v)?),
        None => None,
    };

    let id = parse_id(&id)?;
    let conn = ctx.open_db()?;
    let mut paciente = db::get_paciente(&conn, &id)?.ok_or(ApiError::NotFound)?;

    if let Some(rut) = cambios.rut {
        paciente.rut = rut;
    }
    if let Some(nombre) = cambios.nombre {
        paciente.nombre = nombre;
    }
    if let Some(edad) = cambios.edad {
        paciente.edad = edad;
    }
    if let Some(sexo) = sexo {
        paciente.sexo = sexo;
    }
    if let Some(enfermedad) = cambios.enfermedad {
        paciente.enfermedad = enfermedad;
    }
    if let Some(fecha) = cambios.fecha_ingreso {
        paciente.fecha_ingreso = fecha;
    }

    db::update_paciente(&conn, &paciente)?;
    Ok(Json(paciente))
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `DELETE /api/pacientes/:id`.
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id)?;
    let conn = ctx.open_db()?;
    if !db::delete_paciente(&conn, &id)? {
        return Err(ApiError::NotFound);
    }

    tracing::info!(%id, "paciente eliminado");
    Ok(Json(MessageResponse {
        message: "Paciente eliminado correctamente".into(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusquedaQuery {
    pub sexo: Option<String>,
    pub fecha_ingreso: Option<String>,
    pub enfermedad: Option<String>,
}

/// `GET /api/pacientes/buscar` — filtered search.
///
/// Each supplied filter is validated on its own before any predicate is
/// built; the first failure rejects the whole call.
pub async fn search(
    State(ctx): State<ApiContext>,
    Query(query): Query<BusquedaQuery>,
) -> Result<Json<Vec<Paciente>>, ApiError> {
    let sexo = match &query.sexo {
        Some(v) => Some(validation::validate_sexo(v)?),
        None => None,
    };
    let fecha_ingreso = match &query.fecha_ingreso {
        Some(v) => Some(validation::validate_fecha(v)?),
        None => None,
    };
    if let Some(enfermedad) = &query.enfermedad {
        validation::validate_min_length(enfermedad, validation::MIN_ENFERMEDAD_LEN)?;
    }

    let filter = PacienteFilter {
        sexo,
        fecha_ingreso,
        enfermedad: query.enfermedad,
    };

    let conn = ctx.open_db()?;
    let pacientes = db::find_pacientes(&conn, &filter)?;
    Ok(Json(pacientes))
}

/// Ids that do not parse can match no record.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound)
}
