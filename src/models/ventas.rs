use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{numero, requerir_id, requerir_texto, Recurso};
use crate::utils::{mayusculas, mayusculas_opt};

/// Datos de membrete de la empresa emisora
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Empresa {
    #[serde(default, with = "numero::opcional", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub razon_social: String,
    #[serde(default)]
    pub ruc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Logo en base64, con o sin prefijo `data:image/...;base64,`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl Recurso for Empresa {
    const RUTA: &'static str = "empresas";
    const NOMBRE: &'static str = "Empresa";

    fn validar(&self) -> Vec<String> {
        let mut errores = Vec::new();
        requerir_texto(&mut errores, &self.razon_social, "Razon social");
        if !self.ruc.is_empty() && (self.ruc.len() != 11 || !self.ruc.chars().all(|c| c.is_ascii_digit())) {
            errores.push("RUC debe tener 11 digitos".to_string());
        }
        errores
    }

    fn normalizar(&mut self) {
        mayusculas(&mut self.razon_social);
        mayusculas_opt(&mut self.direccion);
    }
}

/// Cliente embebido en la cotizacion (solo lectura, viene del backend)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClienteCotizacion {
    pub razon_social: String,
    #[serde(default)]
    pub numero_documento: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contacto: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Cabecera de la cotizacion de ventas
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CotizacionVentas {
    #[serde(default, with = "numero::opcional", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(with = "numero")]
    pub empresa_id: i64,
    #[serde(with = "numero")]
    pub cliente_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero_documento: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_documento: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_vencimiento: Option<DateTime<Utc>>,
    /// Codigo de moneda (PEN, USD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moneda: Option<String>,
    #[serde(rename = "porcentajeIGV", default, with = "numero::decimal_opcional")]
    pub porcentaje_igv: Option<f64>,
    #[serde(rename = "esExoneradoAlIGV", default)]
    pub es_exonerado_al_igv: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forma_pago: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incoterm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminos_condiciones: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_cotizacion_pdf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cliente: Option<ClienteCotizacion>,
}

impl CotizacionVentas {
    pub fn codigo_moneda(&self) -> &str {
        self.moneda
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or("PEN")
    }
}

impl Recurso for CotizacionVentas {
    const RUTA: &'static str = "cotizacion-ventas";
    const NOMBRE: &'static str = "Cotizacion de ventas";

    fn validar(&self) -> Vec<String> {
        let mut errores = Vec::new();
        requerir_id(&mut errores, self.empresa_id, "Empresa");
        requerir_id(&mut errores, self.cliente_id, "Cliente");
        if matches!(self.porcentaje_igv, Some(p) if !(0.0..=100.0).contains(&p)) {
            errores.push("Porcentaje IGV debe estar entre 0 y 100".to_string());
        }
        errores
    }

    fn normalizar(&mut self) {
        mayusculas_opt(&mut self.numero_documento);
        mayusculas_opt(&mut self.moneda);
        mayusculas_opt(&mut self.incoterm);
    }
}

/// Linea de la cotizacion
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetalleCotizacionVentas {
    #[serde(default, with = "numero::opcional", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, with = "numero::opcional")]
    pub cotizacion_ventas_id: Option<i64>,
    #[serde(default, with = "numero::opcional")]
    pub producto_id: Option<i64>,
    pub descripcion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unidad_medida: Option<String>,
    #[serde(with = "numero::decimal")]
    pub cantidad: f64,
    #[serde(with = "numero::decimal")]
    pub precio_unitario: f64,
    /// Si viene del backend prevalece sobre cantidad * precio
    #[serde(default, with = "numero::decimal_opcional")]
    pub subtotal: Option<f64>,
}

impl DetalleCotizacionVentas {
    pub fn subtotal(&self) -> f64 {
        self.subtotal
            .unwrap_or(self.cantidad * self.precio_unitario)
    }
}

impl Recurso for DetalleCotizacionVentas {
    const RUTA: &'static str = "det-cotizacion-ventas";
    const NOMBRE: &'static str = "Detalle de cotizacion";

    fn validar(&self) -> Vec<String> {
        let mut errores = Vec::new();
        requerir_texto(&mut errores, &self.descripcion, "Descripcion");
        if self.cantidad <= 0.0 {
            errores.push("Cantidad debe ser mayor a cero".to_string());
        }
        if self.precio_unitario < 0.0 {
            errores.push("Precio unitario no puede ser negativo".to_string());
        }
        errores
    }

    fn normalizar(&mut self) {
        mayusculas(&mut self.descripcion);
        mayusculas_opt(&mut self.unidad_medida);
    }
}

/// Costo de exportacion asociado a la cotizacion (flete, seguro, etc.)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CostoExportacion {
    #[serde(default, with = "numero::opcional", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub concepto: String,
    #[serde(with = "numero::decimal")]
    pub monto: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cotizacion_campos_igv() {
        let cot: CotizacionVentas = serde_json::from_value(json!({
            "id": "31",
            "empresaId": "1",
            "clienteId": "8",
            "porcentajeIGV": "18.00",
            "esExoneradoAlIGV": false,
            "moneda": ""
        }))
        .unwrap();
        assert_eq!(cot.porcentaje_igv, Some(18.0));
        assert_eq!(cot.codigo_moneda(), "PEN");

        let body = serde_json::to_value(&cot).unwrap();
        assert_eq!(body["porcentajeIGV"], json!(18.0));
        assert_eq!(body["esExoneradoAlIGV"], json!(false));
        assert_eq!(body["clienteId"], json!(8));
    }

    #[test]
    fn subtotal_explicito_o_calculado() {
        let mut det = DetalleCotizacionVentas {
            id: None,
            cotizacion_ventas_id: Some(1),
            producto_id: None,
            descripcion: "Harina de pescado".to_string(),
            unidad_medida: Some("TM".to_string()),
            cantidad: 2.0,
            precio_unitario: 150.0,
            subtotal: None,
        };
        assert_eq!(det.subtotal(), 300.0);
        det.subtotal = Some(290.0);
        assert_eq!(det.subtotal(), 290.0);
    }

    #[test]
    fn empresa_ruc() {
        let mut empresa = Empresa {
            razon_social: "megui sac".to_string(),
            ruc: "2010".to_string(),
            ..Default::default()
        };
        assert_eq!(empresa.validar(), vec!["RUC debe tener 11 digitos".to_string()]);
        empresa.normalizar();
        assert_eq!(empresa.razon_social, "MEGUI SAC");
    }
}
