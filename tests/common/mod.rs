//! Backend simulado en proceso para las pruebas de integracion.
//!
//! Registra cada solicitud recibida y responde con lo configurado por la
//! prueba; sin configuracion, GET devuelve `[]`, POST/PUT devuelven el
//! cuerpo recibido con `id` y DELETE responde vacio.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::to_bytes;
use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{json, Value};

use erp_megui::auth::{AuthStore, Sesion, UsuarioSesion};
use erp_megui::{ApiClient, Config};

pub const TOKEN: &str = "token-prueba";

#[derive(Debug, Clone)]
pub struct Solicitud {
    pub metodo: Method,
    pub ruta: String,
    pub query: Option<String>,
    pub autorizacion: Option<String>,
    pub tipo_contenido: Option<String>,
    pub cuerpo: String,
}

impl Solicitud {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.cuerpo).unwrap_or(Value::Null)
    }
}

#[derive(Clone, Default)]
pub struct MockBackend {
    solicitudes: Arc<Mutex<Vec<Solicitud>>>,
    respuestas: Arc<Mutex<HashMap<(Method, String), (StatusCode, Value)>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fija la respuesta para `metodo` + `ruta` (sin query string).
    pub fn responder(&self, metodo: Method, ruta: &str, status: StatusCode, cuerpo: Value) {
        self.respuestas
            .lock()
            .unwrap()
            .insert((metodo, ruta.to_string()), (status, cuerpo));
    }

    pub fn solicitudes(&self) -> Vec<Solicitud> {
        self.solicitudes.lock().unwrap().clone()
    }

    pub fn recibidas(&self, metodo: Method, ruta: &str) -> Vec<Solicitud> {
        self.solicitudes()
            .into_iter()
            .filter(|s| s.metodo == metodo && s.ruta == ruta)
            .collect()
    }

    /// Levanta el servidor en un puerto efimero y devuelve su URL base.
    pub async fn iniciar(&self) -> String {
        let app = Router::new().fallback(atender).with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }
}

async fn atender(State(backend): State<MockBackend>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();
    let cabecera = |nombre: HeaderName| {
        parts
            .headers
            .get(nombre)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let solicitud = Solicitud {
        metodo: parts.method.clone(),
        ruta: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        autorizacion: cabecera(AUTHORIZATION),
        tipo_contenido: cabecera(CONTENT_TYPE),
        cuerpo: String::from_utf8_lossy(&bytes).into_owned(),
    };
    backend.solicitudes.lock().unwrap().push(solicitud.clone());

    let configurada = backend
        .respuestas
        .lock()
        .unwrap()
        .get(&(solicitud.metodo.clone(), solicitud.ruta.clone()))
        .cloned();

    let (status, cuerpo) = match configurada {
        Some(r) => r,
        None if solicitud.metodo == Method::GET => (StatusCode::OK, json!([])),
        None if solicitud.metodo == Method::DELETE => return StatusCode::OK.into_response(),
        None => {
            let mut eco = solicitud.json();
            if let Value::Object(mapa) = &mut eco {
                mapa.entry("id").or_insert(json!(1));
            }
            (StatusCode::OK, eco)
        }
    };
    (status, axum::Json(cuerpo)).into_response()
}

pub fn sesion_con_rol(rol: &str) -> AuthStore {
    let auth = AuthStore::new();
    auth.iniciar(Sesion {
        token: TOKEN.to_string(),
        usuario: Some(UsuarioSesion {
            id: 1,
            nombre: "PRUEBA".to_string(),
            rol: rol.to_string(),
            es_super_usuario: false,
        }),
    });
    auth
}

/// Backend simulado y cliente autenticado como administrador.
pub async fn entorno() -> (MockBackend, ApiClient) {
    entorno_con(sesion_con_rol("ADMINISTRADOR")).await
}

pub async fn entorno_con(auth: AuthStore) -> (MockBackend, ApiClient) {
    let backend = MockBackend::new();
    let url = backend.iniciar().await;
    let client = ApiClient::new(&Config::new(url), auth).unwrap();
    (backend, client)
}
