//! Verificacion de unicidad con debounce.
//!
//! Los formularios de vehiculo (placa) y activo (codigo) consultan al backend
//! si el valor ya existe 500 ms despues de la ultima pulsacion.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::api::CrudApi;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Activo, Recurso, VehiculoEntidad};

pub const RETRASO_VALIDACION: Duration = Duration::from_millis(500);

/// Ejecuta solo la ultima llamada recibida dentro de la ventana de espera.
#[derive(Debug, Clone)]
pub struct Debouncer {
    retraso: Duration,
    generacion: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(retraso: Duration) -> Self {
        Self {
            retraso,
            generacion: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Espera el retraso y ejecuta `trabajo` si ninguna llamada posterior lo
    /// reemplazo; en ese caso devuelve `None` sin ejecutarlo.
    pub async fn llamar<F, T>(&self, trabajo: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        let mia = self.generacion.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.retraso).await;

        if self.generacion.load(Ordering::SeqCst) != mia {
            return None;
        }
        Some(trabajo.await)
    }

    /// Descarta la llamada pendiente sin programar otra.
    pub fn cancelar(&self) {
        self.generacion.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct VerificadorUnicidad<R> {
    api: CrudApi<R>,
    campo: &'static str,
    debouncer: Debouncer,
}

impl<R: Recurso> VerificadorUnicidad<R> {
    pub fn new(client: ApiClient, campo: &'static str, retraso: Duration) -> Self {
        Self {
            api: CrudApi::new(client),
            campo,
            debouncer: Debouncer::new(retraso),
        }
    }

    /// `Some(existe)` si esta llamada fue la que se ejecuto, `None` si otra
    /// posterior la reemplazo. Un valor vacio nunca consulta al backend y
    /// cancela la verificacion pendiente.
    pub async fn verificar(&self, valor: &str, excluir_id: Option<i64>) -> Result<Option<bool>, ApiError> {
        let valor = valor.trim().to_uppercase();
        if valor.is_empty() {
            self.debouncer.cancelar();
            return Ok(Some(false));
        }

        self.debouncer
            .llamar(self.api.existe_valor(self.campo, &valor, excluir_id))
            .await
            .transpose()
    }
}

impl VerificadorUnicidad<VehiculoEntidad> {
    pub fn placa(client: ApiClient) -> Self {
        Self::new(client, "placa", RETRASO_VALIDACION)
    }
}

impl VerificadorUnicidad<Activo> {
    pub fn codigo(client: ApiClient) -> Self {
        Self::new(client, "codigo", RETRASO_VALIDACION)
    }
}
