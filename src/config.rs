use crate::error::ApiError;

const TIMEOUT_POR_DEFECTO: u64 = 30;

/// Configuracion del cliente, tomada del entorno.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub timeout_secs: u64,
    /// Token pre-cargado (herramientas de linea de comandos).
    pub token: Option<String>,
}

impl Config {
    pub fn new(api_url: impl Into<String>) -> Self {
        Config {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            timeout_secs: TIMEOUT_POR_DEFECTO,
            token: None,
        }
    }

    /// Lee `MEGUI_API_URL`, `MEGUI_API_TIMEOUT_SECS` y `MEGUI_API_TOKEN`.
    /// Un archivo `.env` en el directorio actual se carga primero si existe.
    pub fn from_env() -> Result<Self, ApiError> {
        dotenvy::dotenv().ok();

        Self::from_vars(
            std::env::var("MEGUI_API_URL").ok(),
            std::env::var("MEGUI_API_TIMEOUT_SECS").ok(),
            std::env::var("MEGUI_API_TOKEN").ok(),
        )
    }

    fn from_vars(
        url: Option<String>,
        timeout: Option<String>,
        token: Option<String>,
    ) -> Result<Self, ApiError> {
        let url = url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| ApiError::Configuracion("MEGUI_API_URL no esta definida".to_string()))?;

        let timeout_secs = match timeout {
            Some(t) if !t.trim().is_empty() => t.trim().parse::<u64>().map_err(|_| {
                ApiError::Configuracion(format!("MEGUI_API_TIMEOUT_SECS invalido: {}", t))
            })?,
            _ => TIMEOUT_POR_DEFECTO,
        };

        let mut config = Config::new(url.trim());
        config.timeout_secs = timeout_secs;
        config.token = token.filter(|t| !t.is_empty());
        Ok(config)
    }
}
