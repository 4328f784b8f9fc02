use serde::{Deserialize, Serialize};

use super::{numero, requerir_id, requerir_texto, verdadero, Recurso};
use crate::utils::{mayusculas, mayusculas_opt};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoriaCCosto {
    #[serde(default, with = "numero::opcional", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nombre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(default = "verdadero")]
    pub activo: bool,
}

impl Recurso for CategoriaCCosto {
    const RUTA: &'static str = "categoria-ccosto";
    const NOMBRE: &'static str = "Categoria de centro de costo";

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

/// Centro de costo; puede colgar de otro centro (jerarquia de costos).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CentroCosto {
    #[serde(default, with = "numero::opcional", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(with = "numero")]
    pub empresa_id: i64,
    #[serde(with = "numero")]
    pub categoria_id: i64,
    pub codigo: String,
    pub nombre: String,
    #[serde(default, with = "numero::opcional")]
    pub centro_padre_id: Option<i64>,
    #[serde(default = "verdadero")]
    pub activo: bool,
}

impl Recurso for CentroCosto {
    const RUTA: &'static str = "centro-costo";
    const NOMBRE: &'static str = "Centro de costo";

    fn validar(&self) -> Vec<String> {
        let mut errores = Vec::new();
        requerir_id(&mut errores, self.empresa_id, "Empresa");
        requerir_id(&mut errores, self.categoria_id, "Categoria");
        requerir_texto(&mut errores, &self.codigo, "Codigo");
        requerir_texto(&mut errores, &self.nombre, "Nombre");
        if self.id.is_some() && self.id == self.centro_padre_id {
            errores.push("Un centro de costo no puede ser su propio padre".to_string());
        }
        errores
    }

    fn normalizar(&mut self) {
        mayusculas(&mut self.codigo);
        mayusculas(&mut self.nombre);
    }
}

/// Cuenta bancaria de la empresa o de una entidad comercial
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CuentaCorriente {
    #[serde(default, with = "numero::opcional", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(with = "numero")]
    pub empresa_id: i64,
    #[serde(default, with = "numero::opcional")]
    pub entidad_comercial_id: Option<i64>,
    #[serde(with = "numero")]
    pub banco_id: i64,
    #[serde(with = "numero")]
    pub moneda_id: i64,
    pub numero_cuenta: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cci: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(default = "verdadero")]
    pub activo: bool,
}

impl Recurso for CuentaCorriente {
    const RUTA: &'static str = "cuenta-corriente";
    const NOMBRE: &'static str = "Cuenta corriente";

    fn validar(&self) -> Vec<String> {
        let mut errores = Vec::new();
        requerir_id(&mut errores, self.empresa_id, "Empresa");
        requerir_id(&mut errores, self.banco_id, "Banco");
        requerir_id(&mut errores, self.moneda_id, "Moneda");
        requerir_texto(&mut errores, &self.numero_cuenta, "Numero de cuenta");
        if let Some(cci) = &self.cci {
            if !cci.is_empty() && (cci.len() != 20 || !cci.chars().all(|c| c.is_ascii_digit())) {
                errores.push("CCI debe tener 20 digitos".to_string());
            }
        }
        errores
    }

    fn normalizar(&mut self) {
        self.numero_cuenta = self.numero_cuenta.trim().to_string();
        if let Some(cci) = self.cci.as_mut() {
            *cci = cci.trim().to_string();
        }
        mayusculas_opt(&mut self.descripcion);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn centro_costo_claves_numericas() {
        let centro: CentroCosto = serde_json::from_value(json!({
            "empresaId": "1",
            "categoriaId": "4",
            "codigo": "cc-10",
            "nombre": "Flota",
            "centroPadreId": ""
        }))
        .unwrap();
        assert_eq!(centro.centro_padre_id, None);
        let body = serde_json::to_value(&centro).unwrap();
        assert_eq!(body["empresaId"], json!(1));
        assert_eq!(body["categoriaId"], json!(4));
        assert!(body["centroPadreId"].is_null());
    }

    #[test]
    fn centro_costo_padre_propio() {
        let centro = CentroCosto {
            id: Some(5),
            empresa_id: 1,
            categoria_id: 1,
            codigo: "A".to_string(),
            nombre: "B".to_string(),
            centro_padre_id: Some(5),
            activo: true,
        };
        assert_eq!(centro.validar().len(), 1);
    }

    #[test]
    fn cuenta_cci_invalido() {
        let cuenta: CuentaCorriente = serde_json::from_value(json!({
            "empresaId": 1,
            "bancoId": 2,
            "monedaId": 1,
            "numeroCuenta": "193-1234567-0-11",
            "cci": "0021931234"
        }))
        .unwrap();
        assert_eq!(cuenta.validar(), vec!["CCI debe tener 20 digitos".to_string()]);
    }

    #[test]
    fn categoria_requiere_nombre() {
        let categoria = CategoriaCCosto {
            id: None,
            nombre: "  ".to_string(),
            descripcion: None,
            activo: true,
        };
        assert_eq!(categoria.validar(), vec!["Nombre es requerido".to_string()]);
    }
}
