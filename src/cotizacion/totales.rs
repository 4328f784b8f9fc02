use serde::Serialize;

use crate::models::{CotizacionVentas, DetalleCotizacionVentas};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totales {
    pub subtotal: f64,
    pub igv: f64,
    pub total: f64,
}

/// Subtotal de las lineas, IGV y total, sin redondear; el redondeo a
/// 2 decimales ocurre al mostrarlos. Los costos de exportacion se
/// muestran aparte y no suman aqui.
pub fn calcular_totales(cotizacion: &CotizacionVentas, detalles: &[DetalleCotizacionVentas]) -> Totales {
    let subtotal: f64 = detalles.iter().map(|d| d.subtotal()).sum();

    let igv = match cotizacion.porcentaje_igv {
        _ if cotizacion.es_exonerado_al_igv => 0.0,
        Some(pct) if pct > 0.0 => subtotal * pct / 100.0,
        _ => 0.0,
    };

    Totales {
        subtotal,
        igv,
        total: subtotal + igv,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::format_dinero;

    fn cotizacion(pct: Option<f64>, exonerado: bool) -> CotizacionVentas {
        CotizacionVentas {
            id: Some(1),
            empresa_id: 1,
            cliente_id: 2,
            numero_documento: None,
            fecha_documento: None,
            fecha_vencimiento: None,
            moneda: None,
            porcentaje_igv: pct,
            es_exonerado_al_igv: exonerado,
            forma_pago: None,
            incoterm: None,
            observaciones: None,
            terminos_condiciones: None,
            url_cotizacion_pdf: None,
            cliente: None,
        }
    }

    fn linea(cantidad: f64, precio: f64) -> DetalleCotizacionVentas {
        DetalleCotizacionVentas {
            id: None,
            cotizacion_ventas_id: Some(1),
            producto_id: None,
            descripcion: "ITEM".to_string(),
            unidad_medida: None,
            cantidad,
            precio_unitario: precio,
            subtotal: None,
        }
    }

    #[test]
    fn igv_sobre_subtotal() {
        let t = calcular_totales(&cotizacion(Some(18.0), false), &[linea(2.0, 300.0), linea(4.0, 100.0)]);
        assert_eq!(t.subtotal, 1000.0);
        assert_eq!(t.igv, 180.0);
        assert_eq!(t.total, 1180.0);
    }

    #[test]
    fn exonerado_sin_igv() {
        let t = calcular_totales(&cotizacion(Some(18.0), true), &[linea(1.0, 500.0)]);
        assert_eq!(t.igv, 0.0);
        assert_eq!(t.total, 500.0);
    }

    #[test]
    fn sin_porcentaje_sin_igv() {
        let t = calcular_totales(&cotizacion(None, false), &[linea(1.0, 50.0)]);
        assert_eq!(t.igv, 0.0);
        assert_eq!(t.total, 50.0);
    }

    #[test]
    fn porcentaje_cero_sin_igv() {
        let t = calcular_totales(&cotizacion(Some(0.0), false), &[linea(3.0, 12.5)]);
        assert_eq!(t.igv, 0.0);
        assert_eq!(t.total, t.subtotal);
        assert_eq!(t.subtotal, 37.5);
    }

    #[test]
    fn total_es_la_suma_exacta() {
        let t = calcular_totales(&cotizacion(Some(18.0), false), &[linea(1.0, 0.1), linea(1.0, 0.2), linea(3.0, 0.335)]);
        assert_eq!(t.total, t.subtotal + t.igv);
        assert_eq!(format_dinero(t.total), "1.54");
    }

    #[test]
    fn sin_lineas() {
        let t = calcular_totales(&cotizacion(Some(18.0), false), &[]);
        assert_eq!(t, Totales { subtotal: 0.0, igv: 0.0, total: 0.0 });
    }
}
