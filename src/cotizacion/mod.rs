//! PDF de cotizacion de ventas: totales, maquetado en A4 y subida al backend.

pub mod documento;
pub mod generador;
pub mod metricas;
pub mod render;
pub mod subida;
pub mod texto;
pub mod totales;

use serde::{Deserialize, Serialize};

use crate::models::{CostoExportacion, CotizacionVentas, DetalleCotizacionVentas, Empresa};

pub use generador::generar_documento;
pub use subida::{generar_pdf_cotizacion, generar_y_subir_pdf, ResultadoPdf};
pub use totales::{calcular_totales, Totales};

/// Todo lo necesario para armar el PDF de una cotizacion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatosCotizacionPdf {
    pub cotizacion: CotizacionVentas,
    #[serde(default)]
    pub detalles: Vec<DetalleCotizacionVentas>,
    #[serde(default)]
    pub costos: Vec<CostoExportacion>,
    pub empresa: Empresa,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn datos_desde_json_del_backend() {
        let datos: DatosCotizacionPdf = serde_json::from_value(json!({
            "cotizacion": { "id": "31", "empresaId": 1, "clienteId": "8", "porcentajeIGV": 18 },
            "detalles": [
                { "descripcion": "Harina", "cantidad": "10", "precioUnitario": "100.00" }
            ],
            "empresa": { "razonSocial": "MEGUI SAC" }
        }))
        .unwrap();

        assert!(datos.costos.is_empty());
        let t = calcular_totales(&datos.cotizacion, &datos.detalles);
        assert_eq!(t.total, 1180.0);
    }
}
