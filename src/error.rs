/// Errores del cliente ERP
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Fallo de transporte (red, DNS, TLS, timeout).
    #[error("Error de conexion: {0}")]
    Request(#[from] reqwest::Error),

    /// El backend respondio con un estado no exitoso.
    #[error("Error del servidor (HTTP {status}): {mensaje}")]
    Api { status: u16, mensaje: String },

    #[error("Error de serializacion: {0}")]
    Serializacion(#[from] serde_json::Error),

    /// Campos requeridos faltantes, detectados antes de enviar.
    #[error("Validacion fallida: {}", .0.join("; "))]
    Validacion(Vec<String>),

    #[error("No hay sesion activa")]
    NoAutenticado,

    #[error("Accion no permitida: {0}")]
    Prohibido(String),

    #[error("Configuracion invalida: {0}")]
    Configuracion(String),

    #[error("Error generando PDF: {0}")]
    Pdf(String),
}

impl ApiError {
    /// Texto apto para mostrar al usuario final.
    ///
    /// Para errores del backend se reenvia su propio mensaje; el resto usa un
    /// texto generico.
    pub fn mensaje_usuario(&self) -> String {
        match self {
            ApiError::Api { mensaje, .. } if !mensaje.is_empty() => mensaje.clone(),
            ApiError::Api { status, .. } => format!("Error del servidor (HTTP {})", status),
            ApiError::Validacion(campos) => campos.join("\n"),
            ApiError::NoAutenticado => "Debe iniciar sesion".to_string(),
            ApiError::Prohibido(msg) => msg.clone(),
            ApiError::Request(_) => "No se pudo conectar con el servidor".to_string(),
            _ => "Ocurrio un error inesperado".to_string(),
        }
    }
}
