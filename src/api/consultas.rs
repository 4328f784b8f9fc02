use serde::Deserialize;

use super::CrudApi;
use crate::error::ApiError;
use crate::models::{
    DetalleCalaEspecie, DetalleDocTripulantes, FiltroKardex, KardexAlmacen,
    MovLiquidacionTemporadaPesca, Recurso, TripulanteFaena,
};

#[derive(Debug, Deserialize)]
struct RespuestaUnicidad {
    existe: bool,
}

impl CrudApi<DetalleCalaEspecie> {
    pub async fn listar_por_cala(&self, cala_id: i64) -> Result<Vec<DetalleCalaEspecie>, ApiError> {
        self.client()
            .get_json(&format!("{}/cala/{}", DetalleCalaEspecie::RUTA, cala_id))
            .await
    }
}

impl CrudApi<TripulanteFaena> {
    pub async fn listar_por_faena(&self, faena_id: i64) -> Result<Vec<TripulanteFaena>, ApiError> {
        self.client()
            .get_json(&format!("{}/faena/{}", TripulanteFaena::RUTA, faena_id))
            .await
    }
}

impl CrudApi<DetalleDocTripulantes> {
    pub async fn listar_por_tripulante(
        &self,
        tripulante_id: i64,
    ) -> Result<Vec<DetalleDocTripulantes>, ApiError> {
        self.client()
            .get_json(&format!("{}/tripulante/{}", DetalleDocTripulantes::RUTA, tripulante_id))
            .await
    }
}

impl CrudApi<MovLiquidacionTemporadaPesca> {
    pub async fn listar_por_liquidacion(
        &self,
        liquidacion_id: i64,
    ) -> Result<Vec<MovLiquidacionTemporadaPesca>, ApiError> {
        self.client()
            .get_json(&format!(
                "{}/liquidacion/{}",
                MovLiquidacionTemporadaPesca::RUTA,
                liquidacion_id
            ))
            .await
    }
}

impl CrudApi<KardexAlmacen> {
    pub async fn listar_filtrado(&self, filtro: &FiltroKardex) -> Result<Vec<KardexAlmacen>, ApiError> {
        self.client()
            .get_json_query(KardexAlmacen::RUTA, &filtro.como_query())
            .await
    }
}

impl<R: Recurso> CrudApi<R> {
    /// Consulta si ya existe un registro con `campo = valor`.
    ///
    /// `excluir_id` omite el registro en edicion.
    pub async fn existe_valor(
        &self,
        campo: &str,
        valor: &str,
        excluir_id: Option<i64>,
    ) -> Result<bool, ApiError> {
        let ruta = format!("{}/verificar", R::RUTA);
        let query: Vec<(&str, String)> = excluir_id
            .map(|id| vec![("excluirId", id.to_string())])
            .unwrap_or_default();

        let respuesta: RespuestaUnicidad = self
            .client()
            .get_json_segmentos(&ruta, &[campo, valor.trim()], &query)
            .await?;
        Ok(respuesta.existe)
    }
}
