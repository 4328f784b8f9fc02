use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{numero, requerir_id, Recurso};

/// Linea del kardex de almacen.
///
/// El saldo (cantidad y costo) lo mantiene el backend; aqui solo se lee.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KardexAlmacen {
    #[serde(default, with = "numero::opcional", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(with = "numero")]
    pub empresa_id: i64,
    #[serde(with = "numero")]
    pub almacen_id: i64,
    #[serde(with = "numero")]
    pub producto_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_movimiento: Option<DateTime<Utc>>,
    #[serde(default, with = "numero::opcional")]
    pub concepto_mov_almacen_id: Option<i64>,
    /// `true` = ingreso, `false` = salida
    pub es_ingreso: bool,
    #[serde(with = "numero::decimal")]
    pub cantidad: f64,
    #[serde(default, with = "numero::decimal")]
    pub costo_unitario: f64,
    #[serde(default, with = "numero::decimal")]
    pub saldo_cantidad: f64,
    #[serde(default, with = "numero::decimal")]
    pub saldo_costo_total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero_documento: Option<String>,
}

impl KardexAlmacen {
    /// Cantidad con signo segun el tipo de movimiento
    pub fn cantidad_firmada(&self) -> f64 {
        if self.es_ingreso {
            self.cantidad.abs()
        } else {
            -self.cantidad.abs()
        }
    }
}

impl Recurso for KardexAlmacen {
    const RUTA: &'static str = "kardex-almacen";
    const NOMBRE: &'static str = "Kardex de almacen";

    fn validar(&self) -> Vec<String> {
        let mut errores = Vec::new();
        requerir_id(&mut errores, self.empresa_id, "Empresa");
        requerir_id(&mut errores, self.almacen_id, "Almacen");
        requerir_id(&mut errores, self.producto_id, "Producto");
        if self.cantidad <= 0.0 {
            errores.push("Cantidad debe ser mayor a cero".to_string());
        }
        errores
    }
}

/// Saldo de la ultima linea de una consulta de kardex, si hay lineas.
pub fn saldo_final(lineas: &[KardexAlmacen]) -> Option<(f64, f64)> {
    lineas
        .last()
        .map(|l| (l.saldo_cantidad, l.saldo_costo_total))
}

/// Filtros de consulta del kardex. Solo se envian los definidos.
#[derive(Debug, Clone, Default)]
pub struct FiltroKardex {
    pub empresa_id: Option<i64>,
    pub almacen_id: Option<i64>,
    pub producto_id: Option<i64>,
    pub fecha_desde: Option<NaiveDate>,
    pub fecha_hasta: Option<NaiveDate>,
}

impl FiltroKardex {
    pub fn como_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(id) = self.empresa_id {
            query.push(("empresaId", id.to_string()));
        }
        if let Some(id) = self.almacen_id {
            query.push(("almacenId", id.to_string()));
        }
        if let Some(id) = self.producto_id {
            query.push(("productoId", id.to_string()));
        }
        if let Some(f) = self.fecha_desde {
            query.push(("fechaDesde", f.format("%Y-%m-%d").to_string()));
        }
        if let Some(f) = self.fecha_hasta {
            query.push(("fechaHasta", f.format("%Y-%m-%d").to_string()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn linea(es_ingreso: bool, cantidad: f64, saldo: f64) -> KardexAlmacen {
        KardexAlmacen {
            id: Some(1),
            empresa_id: 1,
            almacen_id: 2,
            producto_id: 3,
            fecha_movimiento: None,
            concepto_mov_almacen_id: None,
            es_ingreso,
            cantidad,
            costo_unitario: 10.0,
            saldo_cantidad: saldo,
            saldo_costo_total: saldo * 10.0,
            numero_documento: None,
        }
    }

    #[test]
    fn cantidad_con_signo() {
        assert_eq!(linea(true, 5.0, 5.0).cantidad_firmada(), 5.0);
        assert_eq!(linea(false, 2.0, 3.0).cantidad_firmada(), -2.0);
    }

    #[test]
    fn saldo_de_la_ultima_linea() {
        assert_eq!(saldo_final(&[]), None);
        let lineas = vec![linea(true, 5.0, 5.0), linea(false, 2.0, 3.0)];
        assert_eq!(saldo_final(&lineas), Some((3.0, 30.0)));
    }

    #[test]
    fn filtro_solo_campos_definidos() {
        let filtro = FiltroKardex {
            almacen_id: Some(4),
            fecha_desde: NaiveDate::from_ymd_opt(2024, 3, 1),
            ..Default::default()
        };
        assert_eq!(
            filtro.como_query(),
            vec![
                ("almacenId", "4".to_string()),
                ("fechaDesde", "2024-03-01".to_string())
            ]
        );
        assert!(FiltroKardex::default().como_query().is_empty());
    }

    #[test]
    fn kardex_montos_texto() {
        let linea: KardexAlmacen = serde_json::from_value(json!({
            "id": "100",
            "empresaId": "1",
            "almacenId": "2",
            "productoId": "3",
            "esIngreso": true,
            "cantidad": "12.000",
            "costoUnitario": "4.5",
            "saldoCantidad": "12",
            "saldoCostoTotal": "54.00",
            "fechaMovimiento": "2024-03-02T15:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(linea.cantidad, 12.0);
        assert_eq!(linea.saldo_costo_total, 54.0);
        assert!(linea.fecha_movimiento.is_some());
    }
}
