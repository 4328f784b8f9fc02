mod common;

use assert_matches::assert_matches;
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::entorno;
use erp_megui::cascada::{Ancestros, DetalleCalaEspecieService, Recalculo};
use erp_megui::models::DetalleCalaEspecie;
use erp_megui::ApiError;

fn detalle(id: Option<i64>) -> DetalleCalaEspecie {
    DetalleCalaEspecie {
        id,
        cala_id: 12,
        especie_id: 3,
        toneladas: 40.5,
        porcentaje_juveniles: Some(8.0),
        observaciones: None,
    }
}

const ANCESTROS: Ancestros = Ancestros {
    faena_pesca_id: Some(5),
    temporada_id: Some(2),
};

#[tokio::test]
async fn crear_recalcula_una_sola_vez() {
    let (backend, client) = entorno().await;
    let service = DetalleCalaEspecieService::new(client);

    let escritura = service.crear(detalle(None), ANCESTROS).await.unwrap();
    assert_eq!(escritura.recalculo, Recalculo::Completado);
    assert!(escritura.advertencia().is_none());

    let recalculos = backend.recibidas(Method::POST, "/cala/12/recalcular-cascada");
    assert_eq!(recalculos.len(), 1);
    assert_eq!(recalculos[0].json(), json!({ "faenaPescaId": 5, "temporadaId": 2 }));

    // la escritura va antes que el recalculo
    let rutas: Vec<String> = backend.solicitudes().into_iter().map(|s| s.ruta).collect();
    assert_eq!(rutas, vec!["/detalle-cala-especie", "/cala/12/recalcular-cascada"]);
}

#[tokio::test]
async fn fallo_del_recalculo_no_invalida_la_escritura() {
    let (backend, client) = entorno().await;
    backend.responder(
        Method::POST,
        "/cala/12/recalcular-cascada",
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "Temporada bloqueada" }),
    );
    let service = DetalleCalaEspecieService::new(client);

    let escritura = service.actualizar(30, detalle(Some(30)), Ancestros::default()).await.unwrap();
    assert_eq!(escritura.registro.id, Some(30));
    assert_matches!(&escritura.recalculo, Recalculo::Fallido(msg) if msg == "Temporada bloqueada");
    assert!(escritura.advertencia().unwrap().contains("Temporada bloqueada"));

    let recalculos = backend.recibidas(Method::POST, "/cala/12/recalcular-cascada");
    assert_eq!(recalculos.len(), 1);
    assert_eq!(recalculos[0].json(), json!({}));
}

#[tokio::test]
async fn escritura_fallida_no_recalcula() {
    let (backend, client) = entorno().await;
    backend.responder(
        Method::DELETE,
        "/detalle-cala-especie/30",
        StatusCode::NOT_FOUND,
        json!({ "message": "No existe" }),
    );
    let service = DetalleCalaEspecieService::new(client);

    let err = service.eliminar(&detalle(Some(30)), ANCESTROS).await.unwrap_err();
    assert_matches!(err, ApiError::Api { status: 404, .. });
    assert!(backend.recibidas(Method::POST, "/cala/12/recalcular-cascada").is_empty());
}

#[tokio::test]
async fn eliminar_recalcula_la_cala_del_registro() {
    let (backend, client) = entorno().await;
    let service = DetalleCalaEspecieService::new(client);

    service.eliminar(&detalle(Some(30)), ANCESTROS).await.unwrap();
    assert_eq!(backend.recibidas(Method::DELETE, "/detalle-cala-especie/30").len(), 1);
    assert_eq!(backend.recibidas(Method::POST, "/cala/12/recalcular-cascada").len(), 1);
}

#[tokio::test]
async fn eliminar_sin_id_es_error_de_validacion() {
    let (backend, client) = entorno().await;
    let service = DetalleCalaEspecieService::new(client);

    assert_matches!(
        service.eliminar(&detalle(None), ANCESTROS).await,
        Err(ApiError::Validacion(_))
    );
    assert!(backend.solicitudes().is_empty());
}
