use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{numero, requerir_id, requerir_texto, verdadero, Recurso};
use crate::utils::{mayusculas, mayusculas_opt};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activo {
    #[serde(default, with = "numero::opcional", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(with = "numero")]
    pub empresa_id: i64,
    #[serde(with = "numero")]
    pub tipo_activo_id: i64,
    pub codigo: String,
    pub descripcion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marca: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modelo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serie: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_adquisicion: Option<DateTime<Utc>>,
    #[serde(default, with = "numero::decimal_opcional")]
    pub valor_adquisicion: Option<f64>,
    #[serde(default, with = "numero::opcional")]
    pub centro_costo_id: Option<i64>,
    #[serde(default = "verdadero")]
    pub activo: bool,
}

impl Recurso for Activo {
    const RUTA: &'static str = "activos";
    const NOMBRE: &'static str = "Activo";

    fn validar(&self) -> Vec<String> {
        let mut errores = Vec::new();
        requerir_id(&mut errores, self.empresa_id, "Empresa");
        requerir_id(&mut errores, self.tipo_activo_id, "Tipo de activo");
        requerir_texto(&mut errores, &self.codigo, "Codigo");
        requerir_texto(&mut errores, &self.descripcion, "Descripcion");
        if matches!(self.valor_adquisicion, Some(v) if v < 0.0) {
            errores.push("Valor de adquisicion no puede ser negativo".to_string());
        }
        errores
    }

    fn normalizar(&mut self) {
        mayusculas(&mut self.codigo);
        mayusculas(&mut self.descripcion);
        mayusculas_opt(&mut self.marca);
        mayusculas_opt(&mut self.modelo);
        mayusculas_opt(&mut self.serie);
    }
}

/// Vehiculo registrado a nombre de una entidad comercial (control de acceso)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehiculoEntidad {
    #[serde(default, with = "numero::opcional", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(with = "numero")]
    pub entidad_comercial_id: i64,
    pub placa: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marca: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modelo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, with = "numero::opcional")]
    pub anio: Option<i64>,
    #[serde(default, with = "numero::opcional")]
    pub tipo_vehiculo_id: Option<i64>,
    #[serde(default = "verdadero")]
    pub activo: bool,
}

impl Recurso for VehiculoEntidad {
    const RUTA: &'static str = "vehiculo-entidad";
    const NOMBRE: &'static str = "Vehiculo";

    fn validar(&self) -> Vec<String> {
        let mut errores = Vec::new();
        requerir_id(&mut errores, self.entidad_comercial_id, "Entidad comercial");
        requerir_texto(&mut errores, &self.placa, "Placa");
        errores
    }

    fn normalizar(&mut self) {
        mayusculas(&mut self.placa);
        mayusculas_opt(&mut self.marca);
        mayusculas_opt(&mut self.modelo);
        mayusculas_opt(&mut self.color);
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TipoMovimientoAcceso {
    #[serde(default, with = "numero::opcional", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nombre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(default = "verdadero")]
    pub activo: bool,
}

impl Recurso for TipoMovimientoAcceso {
    const RUTA: &'static str = "tipo-movimiento-acceso";
    const NOMBRE: &'static str = "Tipo de movimiento de acceso";

    fn validar(&self) -> Vec<String> {
        let mut errores = Vec::new();
        requerir_texto(&mut errores, &self.nombre, "Nombre");
        errores
    }

    fn normalizar(&mut self) {
        mayusculas(&mut self.nombre);
        mayusculas_opt(&mut self.descripcion);
    }
}
