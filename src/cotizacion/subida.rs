use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use super::generador::generar_documento;
use super::render::renderizar;
use super::DatosCotizacionPdf;
use crate::client::ApiClient;
use crate::error::ApiError;

pub const RUTA_SUBIDA: &str = "cotizacion-ventas/upload-pdf";

/// Resultado de generar y subir el PDF; los errores llegan en `error`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultadoPdf {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_pdf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RespuestaSubida {
    url_pdf: Option<String>,
}

/// Genera el PDF de la cotizacion en memoria.
pub fn generar_pdf_cotizacion(datos: &DatosCotizacionPdf) -> Result<Vec<u8>, ApiError> {
    renderizar(&generar_documento(datos))
}

async fn subir(client: &ApiClient, datos: &DatosCotizacionPdf) -> Result<String, ApiError> {
    let id = datos
        .cotizacion
        .id
        .ok_or_else(|| ApiError::Validacion(vec!["La cotizacion debe estar guardada antes de generar el PDF".to_string()]))?;

    let bytes = generar_pdf_cotizacion(datos)?;
    tracing::info!(cotizacion_id = id, bytes = bytes.len(), "Subiendo PDF de cotizacion");

    let archivo = Part::bytes(bytes)
        .file_name(format!("cotizacion_{}.pdf", id))
        .mime_str("application/pdf")?;
    let form = Form::new()
        .part("pdf", archivo)
        .text("cotizacionId", id.to_string());

    let respuesta: RespuestaSubida = client.post_multipart(RUTA_SUBIDA, form).await?;
    respuesta
        .url_pdf
        .ok_or_else(|| ApiError::Api {
            status: 200,
            mensaje: "El servidor no devolvio la URL del PDF".to_string(),
        })
}

/// Genera el PDF y lo sube al backend, que responde con la URL publicada.
pub async fn generar_y_subir_pdf(client: &ApiClient, datos: &DatosCotizacionPdf) -> ResultadoPdf {
    match subir(client, datos).await {
        Ok(url) => ResultadoPdf {
            success: true,
            url_pdf: Some(url),
            error: None,
        },
        Err(e) => {
            tracing::error!(cotizacion_id = ?datos.cotizacion.id, error = %e, "No se pudo generar o subir el PDF");
            ResultadoPdf {
                success: false,
                url_pdf: None,
                error: Some(e.mensaje_usuario()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resultado_en_camel_case() {
        let ok = ResultadoPdf {
            success: true,
            url_pdf: Some("/uploads/cotizacion_31.pdf".to_string()),
            error: None,
        };
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({ "success": true, "urlPdf": "/uploads/cotizacion_31.pdf" })
        );
    }
}
