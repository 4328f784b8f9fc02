use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

use crate::error::ApiError;
use crate::models::numero;

/// Roles con permiso para eliminar registros
const ROLES_ELIMINACION: [&str; 2] = ["ADMINISTRADOR", "SUPERUSUARIO"];

/// Usuario autenticado tal como lo devuelve `/auth/login`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UsuarioSesion {
    #[serde(with = "numero")]
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub rol: String,
    #[serde(default)]
    pub es_super_usuario: bool,
}

/// Sesión activa (almacenada en RAM)
#[derive(Debug, Clone)]
pub struct Sesion {
    pub token: String,
    pub usuario: Option<UsuarioSesion>,
}

/// Almacen del token JWT compartido por todos los modulos de API.
///
/// Los modulos solo lo leen; login/logout son los unicos que escriben.
#[derive(Debug, Clone, Default)]
pub struct AuthStore {
    sesion: Arc<RwLock<Option<Sesion>>>,
}

impl AuthStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn con_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.iniciar(Sesion {
            token: token.into(),
            usuario: None,
        });
        store
    }

    pub fn iniciar(&self, sesion: Sesion) {
        let mut guard = self.sesion.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(sesion);
    }

    pub fn cerrar(&self) {
        let mut guard = self.sesion.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }

    pub fn token(&self) -> Result<String, ApiError> {
        let guard = self.sesion.read().unwrap_or_else(|e| e.into_inner());
        guard
            .as_ref()
            .map(|s| s.token.clone())
            .filter(|t| !t.is_empty())
            .ok_or(ApiError::NoAutenticado)
    }

    pub fn usuario(&self) -> Option<UsuarioSesion> {
        let guard = self.sesion.read().unwrap_or_else(|e| e.into_inner());
        guard.as_ref().and_then(|s| s.usuario.clone())
    }

    /// Solo superusuarios y administradores pueden eliminar.
    pub fn puede_eliminar(&self) -> bool {
        match self.usuario() {
            Some(u) => {
                u.es_super_usuario
                    || ROLES_ELIMINACION
                        .iter()
                        .any(|r| r.eq_ignore_ascii_case(u.rol.trim()))
            }
            None => false,
        }
    }
}
