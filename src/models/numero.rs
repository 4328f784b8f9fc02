//! Normalizacion numerica de ids y montos.
//!
//! El backend (y los formularios) pueden entregar claves y montos como texto
//! (`"12"`, `"1500.50"`). Todo se lee como numero y se envia siempre como
//! numero JSON.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Crudo {
    Entero(i64),
    Decimal(f64),
    Texto(String),
}

fn a_entero(crudo: Crudo) -> Result<Option<i64>, String> {
    match crudo {
        Crudo::Entero(n) => Ok(Some(n)),
        // i64::MAX as f64 redondea a 2^63, que ya no cabe
        Crudo::Decimal(d) if d.fract() == 0.0 && d >= i64::MIN as f64 && d < i64::MAX as f64 => {
            Ok(Some(d as i64))
        }
        Crudo::Decimal(d) => Err(format!("se esperaba un entero, se recibio {}", d)),
        Crudo::Texto(t) => {
            let t = t.trim();
            if t.is_empty() {
                return Ok(None);
            }
            t.parse::<i64>()
                .map(Some)
                .map_err(|_| format!("valor numerico invalido: {:?}", t))
        }
    }
}

fn a_decimal(crudo: Crudo) -> Result<Option<f64>, String> {
    match crudo {
        Crudo::Entero(n) => Ok(Some(n as f64)),
        Crudo::Decimal(d) => Ok(Some(d)),
        Crudo::Texto(t) => {
            let t = t.trim();
            if t.is_empty() {
                return Ok(None);
            }
            t.parse::<f64>()
                .map(Some)
                .map_err(|_| format!("monto invalido: {:?}", t))
        }
    }
}

pub fn serialize<S: Serializer>(valor: &i64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(*valor)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let crudo = Crudo::deserialize(deserializer)?;
    a_entero(crudo)
        .map_err(D::Error::custom)?
        .ok_or_else(|| D::Error::custom("id requerido vacio"))
}

/// Claves foraneas opcionales; texto vacio o `null` equivalen a `None`.
pub mod opcional {
    use super::*;

    pub fn serialize<S: Serializer>(valor: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
        match valor {
            Some(n) => serializer.serialize_i64(*n),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        match Option::<Crudo>::deserialize(deserializer)? {
            Some(crudo) => a_entero(crudo).map_err(D::Error::custom),
            None => Ok(None),
        }
    }
}

/// Montos y cantidades; texto vacio o `null` se leen como 0.
pub mod decimal {
    use super::*;

    pub fn serialize<S: Serializer>(valor: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(*valor)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Option::<Crudo>::deserialize(deserializer)? {
            Some(crudo) => Ok(a_decimal(crudo).map_err(D::Error::custom)?.unwrap_or(0.0)),
            None => Ok(0.0),
        }
    }
}

pub mod decimal_opcional {
    use super::*;

    pub fn serialize<S: Serializer>(valor: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match valor {
            Some(d) => serializer.serialize_f64(*d),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        match Option::<Crudo>::deserialize(deserializer)? {
            Some(crudo) => a_decimal(crudo).map_err(D::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize)]
    struct Fila {
        #[serde(with = "crate::models::numero")]
        id: i64,
        #[serde(default, with = "crate::models::numero::opcional")]
        padre_id: Option<i64>,
        #[serde(default, with = "crate::models::numero::decimal")]
        monto: f64,
        #[serde(default, with = "crate::models::numero::decimal_opcional")]
        tope: Option<f64>,
    }

    #[test]
    fn acepta_texto_y_emite_numeros() {
        let fila: Fila = serde_json::from_value(json!({
            "id": "15",
            "padre_id": " 3 ",
            "monto": "1500.50",
            "tope": 20
        }))
        .unwrap();
        assert_eq!(fila.id, 15);
        assert_eq!(fila.padre_id, Some(3));
        assert_eq!(fila.monto, 1500.5);
        assert_eq!(fila.tope, Some(20.0));

        let salida = serde_json::to_value(&fila).unwrap();
        assert_eq!(salida["id"], json!(15));
        assert_eq!(salida["padre_id"], json!(3));
        assert!(salida["monto"].is_number());
    }

    #[test]
    fn vacios_y_nulos() {
        let fila: Fila = serde_json::from_value(json!({
            "id": 1,
            "padre_id": "",
            "monto": null,
            "tope": ""
        }))
        .unwrap();
        assert_eq!(fila.padre_id, None);
        assert_eq!(fila.monto, 0.0);
        assert_eq!(fila.tope, None);

        let fila: Fila = serde_json::from_value(json!({ "id": 2 })).unwrap();
        assert_eq!(fila.padre_id, None);
    }

    #[test]
    fn rechaza_texto_no_numerico() {
        let res: Result<Fila, _> = serde_json::from_value(json!({ "id": "abc" }));
        assert!(res.is_err());

        let res: Result<Fila, _> = serde_json::from_value(json!({ "id": 1.5 }));
        assert!(res.is_err());

        let res: Result<Fila, _> = serde_json::from_value(json!({ "id": "" }));
        assert!(res.is_err());
    }

    #[test]
    fn entero_desde_decimal_exacto() {
        let fila: Fila = serde_json::from_value(json!({ "id": 4.0 })).unwrap();
        assert_eq!(fila.id, 4);
    }

    #[test]
    fn rechaza_enteros_fuera_de_rango() {
        let res: Result<Fila, _> = serde_json::from_value(json!({ "id": 1e20 }));
        assert!(res.is_err());

        let res: Result<Fila, _> = serde_json::from_value(json!({ "id": u64::MAX }));
        assert!(res.is_err());

        let res: Result<Fila, _> = serde_json::from_value(json!({ "id": "99999999999999999999" }));
        assert!(res.is_err());
    }
}
