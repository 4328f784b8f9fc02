//! Operaciones CRUD por entidad.
//!
//! Cada entidad que implementa [`Recurso`] obtiene listar / obtener / crear /
//! actualizar / eliminar sobre `/{RUTA}`. Las consultas propias de cada
//! entidad viven en [`consultas`].

pub mod consultas;

use std::marker::PhantomData;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::Recurso;

pub struct CrudApi<R> {
    client: ApiClient,
    _recurso: PhantomData<fn() -> R>,
}

impl<R: Recurso> CrudApi<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _recurso: PhantomData,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn listar(&self) -> Result<Vec<R>, ApiError> {
        self.client.get_json(R::RUTA).await
    }

    /// Payload crudo del backend, sin ninguna transformacion.
    pub async fn listar_json(&self) -> Result<serde_json::Value, ApiError> {
        self.client.get_json(R::RUTA).await
    }

    pub async fn obtener(&self, id: i64) -> Result<R, ApiError> {
        self.client.get_json(&format!("{}/{}", R::RUTA, id)).await
    }

    pub async fn crear(&self, mut registro: R) -> Result<R, ApiError> {
        preparar(&mut registro)?;
        let creado: R = self.client.post_json(R::RUTA, &registro).await?;
        tracing::info!(recurso = R::NOMBRE, "Registro creado");
        Ok(creado)
    }

    pub async fn actualizar(&self, id: i64, mut registro: R) -> Result<R, ApiError> {
        preparar(&mut registro)?;
        let actualizado: R = self
            .client
            .put_json(&format!("{}/{}", R::RUTA, id), &registro)
            .await?;
        tracing::info!(recurso = R::NOMBRE, id, "Registro actualizado");
        Ok(actualizado)
    }

    /// Solo superusuarios y administradores pueden eliminar.
    pub async fn eliminar(&self, id: i64) -> Result<(), ApiError> {
        if !self.client.auth().puede_eliminar() {
            tracing::warn!(recurso = R::NOMBRE, id, "Eliminacion rechazada por rol");
            return Err(ApiError::Prohibido(format!(
                "No tiene permisos para eliminar {}",
                R::NOMBRE.to_lowercase()
            )));
        }

        self.client.delete(&format!("{}/{}", R::RUTA, id)).await?;
        tracing::info!(recurso = R::NOMBRE, id, "Registro eliminado");
        Ok(())
    }
}

/// Normaliza y valida antes de enviar
fn preparar<R: Recurso>(registro: &mut R) -> Result<(), ApiError> {
    registro.normalizar();
    let errores = registro.validar();
    if !errores.is_empty() {
        return Err(ApiError::Validacion(errores));
    }
    Ok(())
}
