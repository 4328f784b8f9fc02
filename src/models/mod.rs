pub mod numero;

pub mod activos;
pub mod almacen;
pub mod contabilidad;
pub mod pesca;
pub mod ventas;

pub use activos::*;
pub use almacen::*;
pub use contabilidad::*;
pub use pesca::*;
pub use ventas::*;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Entidad remota accesible por `/{RUTA}` con operaciones CRUD.
pub trait Recurso: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Segmento de ruta del endpoint, p.ej. `"centro-costo"`.
    const RUTA: &'static str;
    /// Nombre legible para logs y mensajes.
    const NOMBRE: &'static str;

    /// Campos requeridos faltantes. Vacio si el registro es valido.
    fn validar(&self) -> Vec<String> {
        Vec::new()
    }

    /// Normaliza textos antes de crear o actualizar.
    fn normalizar(&mut self) {}
}

pub(crate) fn verdadero() -> bool {
    true
}

/// Agrega un error si el texto requerido esta vacio.
pub(crate) fn requerir_texto(errores: &mut Vec<String>, valor: &str, campo: &str) {
    if valor.trim().is_empty() {
        errores.push(format!("{} es requerido", campo));
    }
}

/// Agrega un error si la clave foranea requerida no es positiva.
pub(crate) fn requerir_id(errores: &mut Vec<String>, valor: i64, campo: &str) {
    if valor <= 0 {
        errores.push(format!("{} es requerido", campo));
    }
}
