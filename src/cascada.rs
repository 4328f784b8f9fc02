//! Recalculo en cascada Cala -> Faena -> Temporada.
//!
//! El calculo vive en el backend. Despues de cada escritura sobre un
//! [`DetalleCalaEspecie`] se pide una sola vez el recalculo de la cala; si ese
//! pedido falla solo se registra una advertencia y la escritura original se
//! reporta igual como exitosa.

use serde::Serialize;

use crate::api::CrudApi;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::DetalleCalaEspecie;

/// Ancestros conocidos de la cala; los desconocidos no se envian.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ancestros {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faena_pesca_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporada_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Recalculo {
    Completado,
    /// Fallo del recalculo; la escritura original no se ve afectada.
    Fallido(String),
}

/// Resultado de una escritura seguida del recalculo.
#[derive(Debug, Clone)]
pub struct Escritura<T> {
    pub registro: T,
    pub recalculo: Recalculo,
}

impl<T> Escritura<T> {
    /// Mensaje de advertencia a mostrar, si el recalculo fallo.
    pub fn advertencia(&self) -> Option<String> {
        match &self.recalculo {
            Recalculo::Completado => None,
            Recalculo::Fallido(msg) => Some(format!(
                "Registro guardado, pero no se pudieron recalcular los totales: {}",
                msg
            )),
        }
    }
}

/// `POST /cala/{calaId}/recalcular-cascada`
pub async fn recalcular_cascada(
    client: &ApiClient,
    cala_id: i64,
    ancestros: &Ancestros,
) -> Result<serde_json::Value, ApiError> {
    client
        .post_json(&format!("cala/{}/recalcular-cascada", cala_id), ancestros)
        .await
}

pub struct DetalleCalaEspecieService {
    api: CrudApi<DetalleCalaEspecie>,
}

impl DetalleCalaEspecieService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            api: CrudApi::new(client),
        }
    }

    pub fn api(&self) -> &CrudApi<DetalleCalaEspecie> {
        &self.api
    }

    pub async fn crear(
        &self,
        detalle: DetalleCalaEspecie,
        ancestros: Ancestros,
    ) -> Result<Escritura<DetalleCalaEspecie>, ApiError> {
        let cala_id = detalle.cala_id;
        let creado = self.api.crear(detalle).await?;
        let recalculo = self.recalcular(cala_id, &ancestros).await;
        Ok(Escritura {
            registro: creado,
            recalculo,
        })
    }

    pub async fn actualizar(
        &self,
        id: i64,
        detalle: DetalleCalaEspecie,
        ancestros: Ancestros,
    ) -> Result<Escritura<DetalleCalaEspecie>, ApiError> {
        let cala_id = detalle.cala_id;
        let actualizado = self.api.actualizar(id, detalle).await?;
        let recalculo = self.recalcular(cala_id, &ancestros).await;
        Ok(Escritura {
            registro: actualizado,
            recalculo,
        })
    }

    /// Elimina el detalle; la cala a recalcular se toma del propio registro.
    pub async fn eliminar(
        &self,
        detalle: &DetalleCalaEspecie,
        ancestros: Ancestros,
    ) -> Result<Escritura<()>, ApiError> {
        let id = detalle
            .id
            .ok_or_else(|| ApiError::Validacion(vec!["ID requerido para eliminar".to_string()]))?;

        self.api.eliminar(id).await?;
        let recalculo = self.recalcular(detalle.cala_id, &ancestros).await;
        Ok(Escritura {
            registro: (),
            recalculo,
        })
    }

    async fn recalcular(&self, cala_id: i64, ancestros: &Ancestros) -> Recalculo {
        match recalcular_cascada(self.api.client(), cala_id, ancestros).await {
            Ok(_) => {
                tracing::debug!(cala_id, "Recalculo en cascada completado");
                Recalculo::Completado
            }
            Err(e) => {
                tracing::warn!(cala_id, error = %e, "No se pudo recalcular en cascada");
                Recalculo::Fallido(e.mensaje_usuario())
            }
        }
    }
}
