use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::{params, Connection, ToSql};
use uuid::Uuid;

use crate::db::StoreError;
use crate::models::{Paciente, PacienteFilter, Sexo};

pub fn insert_paciente(conn: &Connection, paciente: &Paciente) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO pacientes (id, rut, nombre, edad, sexo, enfermedad, fecha_ingreso, foto_personal)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            paciente.id.to_string(),
            paciente.rut,
            paciente.nombre,
            paciente.edad,
            paciente.sexo.as_str(),
            paciente.enfermedad,
            paciente.fecha_ingreso.to_string(),
            paciente.foto_personal,
        ],
    )?;
    Ok(())
}

pub fn get_pacientes(conn: &Connection) -> Result<Vec<Paciente>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, rut, nombre, edad, sexo, enfermedad, fecha_ingreso, foto_personal
         FROM pacientes",
    )?;
    let rows = stmt.query_map([], paciente_row)?;
    rows_to_vec(rows)
}

pub fn get_paciente(conn: &Connection, id: &Uuid) -> Result<Option<Paciente>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, rut, nombre, edad, sexo, enfermedad, fecha_ingreso, foto_personal
         FROM pacientes WHERE id = ?1",
    )?;

    let result = stmt.query_row(params![id.to_string()], paciente_row);

    match result {
        Ok(row) => Ok(Some(paciente_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn update_paciente(conn: &Connection, paciente: &Paciente) -> Result<(), StoreError> {
    conn.execute(
        "UPDATE pacientes SET rut = ?2, nombre = ?3, edad = ?4, sexo = ?5,
         enfermedad = ?6, fecha_ingreso = ?7, foto_personal = ?8
         WHERE id = ?1",
        params![
            paciente.id.to_string(),
            paciente.rut,
            paciente.nombre,
            paciente.edad,
            paciente.sexo.as_str(),
            paciente.enfermedad,
            paciente.fecha_ingreso.to_string(),
            paciente.foto_personal,
        ],
    )?;
    Ok(())
}

/// Returns whether a record was actually removed.
pub fn delete_paciente(conn: &Connection, id: &Uuid) -> Result<bool, StoreError> {
    let deleted = conn.execute(
        "DELETE FROM pacientes WHERE id = ?1",
        params![id.to_string()],
    )?;
    Ok(deleted > 0)
}

/// Filtered find: one equality predicate per supplied filter field,
/// combined with AND. No filters selects everything.
pub fn find_pacientes(
    conn: &Connection,
    filter: &PacienteFilter,
) -> Result<Vec<Paciente>, StoreError> {
    let sexo = filter.sexo.as_ref().map(|s| s.as_str().to_string());
    let fecha = filter.fecha_ingreso.map(|d| d.to_string());

    let mut clauses: Vec<&str> = Vec::new();
    let mut values: Vec<&dyn ToSql> = Vec::new();

    if let Some(s) = &sexo {
        clauses.push("sexo = ?");
        values.push(s);
    }
    if let Some(f) = &fecha {
        clauses.push("fecha_ingreso = ?");
        values.push(f);
    }
    if let Some(e) = &filter.enfermedad {
        clauses.push("enfermedad = ?");
        values.push(e);
    }

    let mut sql = String::from(
        "SELECT id, rut, nombre, edad, sexo, enfermedad, fecha_ingreso, foto_personal
         FROM pacientes",
    );
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(&values[..], paciente_row)?;
    rows_to_vec(rows)
}

type PacienteRow = (
    String,
    String,
    String,
    i64,
    String,
    String,
    String,
    Option<String>,
);

fn paciente_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PacienteRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
    ))
}

fn paciente_from_row(row: PacienteRow) -> Result<Paciente, StoreError> {
    let (id, rut, nombre, edad, sexo, enfermedad, fecha_ingreso, foto_personal) = row;
    Ok(Paciente {
        id: Uuid::parse_str(&id).map_err(|e| StoreError::ConstraintViolation(e.to_string()))?,
        rut,
        nombre,
        edad,
        sexo: Sexo::from_str(&sexo)?,
        enfermedad,
        fecha_ingreso: NaiveDate::parse_from_str(&fecha_ingreso, "%Y-%m-%d").unwrap_or_default(),
        foto_personal,
    })
}

fn rows_to_vec(
    rows: rusqlite::MappedRows<'_, impl FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<PacienteRow>>,
) -> Result<Vec<Paciente>, StoreError> {
    let mut pacientes = Vec::new();
    for row in rows {
        pacientes.push(paciente_from_row(row?)?);
    }
    Ok(pacientes)
}
