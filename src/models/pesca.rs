use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{numero, requerir_id, requerir_texto, verdadero, Recurso};
use crate::utils::{mayusculas, mayusculas_opt};

// ============================================
// JERARQUIA TEMPORADA -> FAENA -> CALA
// ============================================

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TemporadaPesca {
    #[serde(default, with = "numero::opcional", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(with = "numero")]
    pub empresa_id: i64,
    pub nombre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_inicio: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_fin: Option<DateTime<Utc>>,
    #[serde(default, with = "numero::decimal_opcional")]
    pub cuota_propia_ton: Option<f64>,
    /// Acumulado por el backend al recalcular en cascada
    #[serde(default, with = "numero::decimal")]
    pub toneladas_capturadas: f64,
}

impl Recurso for TemporadaPesca {
    const RUTA: &'static str = "temporada-pesca";
    const NOMBRE: &'static str = "Temporada de pesca";

    fn validar(&self) -> Vec<String> {
        let mut errores = Vec::new();
        requerir_id(&mut errores, self.empresa_id, "Empresa");
        requerir_texto(&mut errores, &self.nombre, "Nombre");
        if let (Some(inicio), Some(fin)) = (self.fecha_inicio, self.fecha_fin) {
            if fin < inicio {
                errores.push("Fecha fin no puede ser anterior a fecha inicio".to_string());
            }
        }
        errores
    }

    fn normalizar(&mut self) {
        mayusculas(&mut self.nombre);
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FaenaPesca {
    #[serde(default, with = "numero::opcional", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(with = "numero")]
    pub temporada_id: i64,
    #[serde(default, with = "numero::opcional")]
    pub boliche_red_id: Option<i64>,
    #[serde(default, with = "numero::opcional")]
    pub embarcacion_id: Option<i64>,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_salida: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_retorno: Option<DateTime<Utc>>,
    #[serde(default, with = "numero::decimal")]
    pub toneladas_capturadas: f64,
}

impl Recurso for FaenaPesca {
    const RUTA: &'static str = "faena-pesca";
    const NOMBRE: &'static str = "Faena de pesca";

    fn validar(&self) -> Vec<String> {
        let mut errores = Vec::new();
        requerir_id(&mut errores, self.temporada_id, "Temporada");
        errores
    }

    fn normalizar(&mut self) {
        mayusculas(&mut self.descripcion);
    }
}

/// Un lance de red dentro de una faena
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cala {
    #[serde(default, with = "numero::opcional", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(with = "numero")]
    pub faena_pesca_id: i64,
    #[serde(default, with = "numero::opcional")]
    pub temporada_pesca_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_hora_inicio: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_hora_fin: Option<DateTime<Utc>>,
    #[serde(default, with = "numero::decimal_opcional")]
    pub latitud: Option<f64>,
    #[serde(default, with = "numero::decimal_opcional")]
    pub longitud: Option<f64>,
    #[serde(default, with = "numero::decimal")]
    pub toneladas_capturadas: f64,
}

impl Recurso for Cala {
    const RUTA: &'static str = "cala";
    const NOMBRE: &'static str = "Cala";

    fn validar(&self) -> Vec<String> {
        let mut errores = Vec::new();
        requerir_id(&mut errores, self.faena_pesca_id, "Faena");
        errores
    }
}

// ============================================
// DETALLES DE FAENA
// ============================================

/// Captura por especie de una cala.
///
/// Cualquier escritura sobre estos registros debe ir seguida del recalculo en
/// cascada de la cala (ver [`crate::cascada`]).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetalleCalaEspecie {
    #[serde(default, with = "numero::opcional", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(with = "numero")]
    pub cala_id: i64,
    #[serde(with = "numero")]
    pub especie_id: i64,
    #[serde(default, with = "numero::decimal")]
    pub toneladas: f64,
    #[serde(default, with = "numero::decimal_opcional")]
    pub porcentaje_juveniles: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
}

impl Recurso for DetalleCalaEspecie {
    const RUTA: &'static str = "detalle-cala-especie";
    const NOMBRE: &'static str = "Detalle de cala por especie";

    fn validar(&self) -> Vec<String> {
        let mut errores = Vec::new();
        requerir_id(&mut errores, self.cala_id, "Cala");
        requerir_id(&mut errores, self.especie_id, "Especie");
        if self.toneladas < 0.0 {
            errores.push("Toneladas no puede ser negativo".to_string());
        }
        if let Some(p) = self.porcentaje_juveniles {
            if !(0.0..=100.0).contains(&p) {
                errores.push("Porcentaje de juveniles debe estar entre 0 y 100".to_string());
            }
        }
        errores
    }

    fn normalizar(&mut self) {
        mayusculas_opt(&mut self.observaciones);
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BolicheRed {
    #[serde(default, with = "numero::opcional", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(with = "numero")]
    pub empresa_id: i64,
    pub codigo: String,
    pub descripcion: String,
    #[serde(default, with = "numero::decimal_opcional")]
    pub longitud_brazas: Option<f64>,
    #[serde(default, with = "numero::decimal_opcional")]
    pub altura_brazas: Option<f64>,
    #[serde(default = "verdadero")]
    pub activo: bool,
}

impl Recurso for BolicheRed {
    const RUTA: &'static str = "boliche-red";
    const NOMBRE: &'static str = "Boliche de red";

    fn validar(&self) -> Vec<String> {
        let mut errores = Vec::new();
        requerir_id(&mut errores, self.empresa_id, "Empresa");
        requerir_texto(&mut errores, &self.codigo, "Codigo");
        requerir_texto(&mut errores, &self.descripcion, "Descripcion");
        errores
    }

    fn normalizar(&mut self) {
        mayusculas(&mut self.codigo);
        mayusculas(&mut self.descripcion);
    }
}

/// Tripulante embarcado en una faena
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripulanteFaena {
    #[serde(default, with = "numero::opcional", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(with = "numero")]
    pub faena_pesca_id: i64,
    #[serde(with = "numero")]
    pub personal_id: i64,
    #[serde(default, with = "numero::opcional")]
    pub cargo_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
}

impl Recurso for TripulanteFaena {
    const RUTA: &'static str = "tripulante-faena";
    const NOMBRE: &'static str = "Tripulante de faena";

    fn validar(&self) -> Vec<String> {
        let mut errores = Vec::new();
        requerir_id(&mut errores, self.faena_pesca_id, "Faena");
        requerir_id(&mut errores, self.personal_id, "Tripulante");
        errores
    }

    fn normalizar(&mut self) {
        mayusculas_opt(&mut self.observaciones);
    }
}

/// Documento de un tripulante (libreta, certificado medico, etc.)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetalleDocTripulantes {
    #[serde(default, with = "numero::opcional", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(with = "numero")]
    pub tripulante_id: i64,
    #[serde(with = "numero")]
    pub documento_pesca_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero_documento: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_emision: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_vencimiento: Option<DateTime<Utc>>,
    #[serde(default)]
    pub verificado: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_doc_pdf: Option<String>,
}

impl DetalleDocTripulantes {
    /// Vencido a la fecha indicada. Sin fecha de vencimiento nunca vence.
    pub fn vencido(&self, ahora: DateTime<Utc>) -> bool {
        self.fecha_vencimiento.map(|f| f < ahora).unwrap_or(false)
    }
}

impl Recurso for DetalleDocTripulantes {
    const RUTA: &'static str = "detalle-doc-tripulantes";
    const NOMBRE: &'static str = "Documento de tripulante";

    fn validar(&self) -> Vec<String> {
        let mut errores = Vec::new();
        requerir_id(&mut errores, self.tripulante_id, "Tripulante");
        requerir_id(&mut errores, self.documento_pesca_id, "Tipo de documento");
        if let (Some(emision), Some(vence)) = (self.fecha_emision, self.fecha_vencimiento) {
            if vence < emision {
                errores.push("Fecha de vencimiento anterior a la emision".to_string());
            }
        }
        errores
    }

    fn normalizar(&mut self) {
        mayusculas_opt(&mut self.numero_documento);
    }
}

/// Movimiento de la liquidacion de una temporada
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovLiquidacionTemporadaPesca {
    #[serde(default, with = "numero::opcional", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(with = "numero")]
    pub liquidacion_temporada_id: i64,
    #[serde(with = "numero")]
    pub tipo_movimiento_id: i64,
    #[serde(default, with = "numero::opcional")]
    pub centro_costo_id: Option<i64>,
    #[serde(with = "numero::decimal")]
    pub monto: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_movimiento: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
}

impl Recurso for MovLiquidacionTemporadaPesca {
    const RUTA: &'static str = "mov-liquidacion-temporada-pesca";
    const NOMBRE: &'static str = "Movimiento de liquidacion de temporada";

    fn validar(&self) -> Vec<String> {
        let mut errores = Vec::new();
        requerir_id(&mut errores, self.liquidacion_temporada_id, "Liquidacion");
        requerir_id(&mut errores, self.tipo_movimiento_id, "Tipo de movimiento");
        if self.monto <= 0.0 {
            errores.push("Monto debe ser mayor a cero".to_string());
        }
        errores
    }

    fn normalizar(&mut self) {
        mayusculas_opt(&mut self.descripcion);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detalle_cala_normaliza_claves_texto() {
        let detalle: DetalleCalaEspecie = serde_json::from_value(json!({
            "id": "40",
            "calaId": "9",
            "especieId": 3,
            "toneladas": "12.5"
        }))
        .unwrap();
        assert_eq!(detalle.cala_id, 9);

        let body = serde_json::to_value(&detalle).unwrap();
        assert_eq!(body["calaId"], json!(9));
        assert_eq!(body["especieId"], json!(3));
        assert_eq!(body["id"], json!(40));
        assert_eq!(body["toneladas"], json!(12.5));
    }

    #[test]
    fn detalle_cala_sin_id_no_envia_id() {
        let detalle = DetalleCalaEspecie {
            id: None,
            cala_id: 1,
            especie_id: 2,
            toneladas: 5.0,
            porcentaje_juveniles: None,
            observaciones: None,
        };
        let body = serde_json::to_value(&detalle).unwrap();
        assert!(body.get("id").is_none());
        assert!(detalle.validar().is_empty());
    }

    #[test]
    fn detalle_cala_validaciones() {
        let detalle = DetalleCalaEspecie {
            id: None,
            cala_id: 0,
            especie_id: 2,
            toneladas: -1.0,
            porcentaje_juveniles: Some(120.0),
            observaciones: None,
        };
        let errores = detalle.validar();
        assert_eq!(errores.len(), 3);
        assert!(errores.iter().any(|e| e.contains("Cala")));
        assert!(errores.iter().any(|e| e.contains("negativo")));
        assert!(errores.iter().any(|e| e.contains("juveniles")));
    }

    #[test]
    fn boliche_en_mayusculas() {
        let mut boliche: BolicheRed = serde_json::from_value(json!({
            "empresaId": "1",
            "codigo": " br-01",
            "descripcion": "red anchovetera"
        }))
        .unwrap();
        assert!(boliche.activo);
        boliche.normalizar();
        assert_eq!(boliche.codigo, "BR-01");
        assert_eq!(boliche.descripcion, "RED ANCHOVETERA");
    }

    #[test]
    fn documento_vencido() {
        let ahora = Utc::now();
        let mut doc = DetalleDocTripulantes {
            id: Some(1),
            tripulante_id: 4,
            documento_pesca_id: 2,
            numero_documento: None,
            fecha_emision: None,
            fecha_vencimiento: None,
            verificado: true,
            url_doc_pdf: None,
        };
        assert!(!doc.vencido(ahora));
        doc.fecha_vencimiento = Some(ahora - chrono::Duration::days(1));
        assert!(doc.vencido(ahora));
    }

    #[test]
    fn temporada_fechas_invertidas() {
        let temporada: TemporadaPesca = serde_json::from_value(json!({
            "empresaId": 1,
            "nombre": "2024-I",
            "fechaInicio": "2024-06-01T00:00:00Z",
            "fechaFin": "2024-04-01T00:00:00Z"
        }))
        .unwrap();
        assert!(temporada.validar().iter().any(|e| e.contains("Fecha fin")));
    }

    #[test]
    fn liquidacion_monto_positivo() {
        let mov: MovLiquidacionTemporadaPesca = serde_json::from_value(json!({
            "liquidacionTemporadaId": "3",
            "tipoMovimientoId": "8",
            "monto": "0"
        }))
        .unwrap();
        assert_eq!(mov.validar(), vec!["Monto debe ser mayor a cero".to_string()]);
    }
}
