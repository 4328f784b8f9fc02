//! Cliente HTTP del backend ERP.
//!
//! Toda solicitud (salvo el login) lleva `Authorization: Bearer <token>`
//! leido del [`AuthStore`] en el momento de la llamada. Los errores se
//! registran y luego se devuelven al llamador.

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::auth::{AuthStore, Sesion, UsuarioSesion};
use crate::config::Config;
use crate::error::ApiError;

/// Respuesta de `/auth/login`
#[derive(Debug, Deserialize)]
struct RespuestaLogin {
    token: String,
    usuario: Option<UsuarioSesion>,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    auth: AuthStore,
}

impl ApiClient {
    pub fn new(config: &Config, auth: AuthStore) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    /// Cliente con el token pre-cargado de la configuracion (si lo hay).
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let auth = match &config.token {
            Some(token) => AuthStore::con_token(token.clone()),
            None => AuthStore::new(),
        };
        Self::new(config, auth)
    }

    pub fn auth(&self) -> &AuthStore {
        &self.auth
    }

    pub fn url(&self, ruta: &str) -> String {
        format!("{}/{}", self.base_url, ruta.trim_start_matches('/'))
    }

    /// Inicia sesion y guarda el token en el almacen compartido.
    pub async fn login(&self, usuario: &str, password: &str) -> Result<Option<UsuarioSesion>, ApiError> {
        let body = serde_json::json!({
            "usuario": usuario,
            "password": password,
        });

        let request = self.http.post(self.url("auth/login")).json(&body);
        let respuesta: RespuestaLogin = self.enviar("POST", "auth/login", request).await?;

        tracing::info!(usuario, "Sesion iniciada");
        self.auth.iniciar(Sesion {
            token: respuesta.token,
            usuario: respuesta.usuario.clone(),
        });
        Ok(respuesta.usuario)
    }

    pub fn logout(&self) {
        self.auth.cerrar();
    }

    pub async fn get_json<T: DeserializeOwned>(&self, ruta: &str) -> Result<T, ApiError> {
        let request = self.autenticada(Method::GET, ruta)?;
        self.enviar("GET", ruta, request).await
    }

    pub async fn get_json_query<T: DeserializeOwned>(
        &self,
        ruta: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let request = self.autenticada(Method::GET, ruta)?.query(query);
        self.enviar("GET", ruta, request).await
    }

    /// GET sobre `ruta` mas `segmentos` codificados uno a uno, para valores
    /// escritos por el usuario (`/`, `#` o `?` no alteran la ruta).
    pub async fn get_json_segmentos<T: DeserializeOwned>(
        &self,
        ruta: &str,
        segmentos: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let mut url = reqwest::Url::parse(&self.url(ruta))
            .map_err(|e| ApiError::Configuracion(format!("URL invalida: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Configuracion(format!("URL base sin rutas: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segmentos);

        let ruta_final = url.path().to_string();
        let token = self.auth.token()?;
        let request = self.http.get(url).bearer_auth(token).query(query);
        self.enviar("GET", &ruta_final, request).await
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        ruta: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.autenticada(Method::POST, ruta)?.json(body);
        self.enviar("POST", ruta, request).await
    }

    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        ruta: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.autenticada(Method::PUT, ruta)?.json(body);
        self.enviar("PUT", ruta, request).await
    }

    pub async fn delete(&self, ruta: &str) -> Result<(), ApiError> {
        let request = self.autenticada(Method::DELETE, ruta)?;
        let _: serde_json::Value = self.enviar("DELETE", ruta, request).await?;
        Ok(())
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        ruta: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        let request = self.autenticada(Method::POST, ruta)?.multipart(form);
        self.enviar("POST", ruta, request).await
    }

    // ---- helpers privados ----

    fn autenticada(&self, metodo: Method, ruta: &str) -> Result<RequestBuilder, ApiError> {
        let token = self.auth.token()?;
        Ok(self
            .http
            .request(metodo, self.url(ruta))
            .bearer_auth(token))
    }

    async fn enviar<T: DeserializeOwned>(
        &self,
        metodo: &str,
        ruta: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        tracing::debug!(metodo, ruta, "Solicitud al backend");

        let resultado = async {
            let response = request.send().await?;
            Self::parse_response(response).await
        }
        .await;

        if let Err(e) = &resultado {
            tracing::error!(metodo, ruta, error = %e, "Fallo la solicitud al backend");
        }
        resultado
    }

    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Api {
                status: status.as_u16(),
                mensaje: mensaje_de_error(&body),
            });
        }

        // DELETE y algunos POST responden sin cuerpo
        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        Ok(serde_json::from_str(body)?)
    }
}

/// Extrae `message` (o `error`) del cuerpo JSON; si no, el cuerpo crudo.
fn mensaje_de_error(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["message", "error"]
                .iter()
                .find_map(|k| v.get(*k).and_then(|m| m.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}
