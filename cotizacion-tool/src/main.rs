use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use erp_megui::cotizacion::{calcular_totales, generar_pdf_cotizacion, generar_y_subir_pdf, DatosCotizacionPdf};
use erp_megui::utils::format_dinero;
use erp_megui::{ApiClient, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cotizacion-tool", version, about = "PDF de cotizaciones de ventas ERP Megui")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Genera el PDF localmente
    Generar {
        /// JSON con cotizacion, detalles, costos y empresa
        datos: PathBuf,
        /// Archivo de salida (por defecto cotizacion_{id}.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Genera el PDF y lo sube al backend
    Subir {
        datos: PathBuf,
        /// Usuario para iniciar sesion si no hay MEGUI_API_TOKEN
        #[arg(long, env = "MEGUI_USUARIO")]
        usuario: Option<String>,
        #[arg(long, env = "MEGUI_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Muestra subtotal, IGV y total
    Totales { datos: PathBuf },
}

fn leer_datos(ruta: &Path) -> Result<DatosCotizacionPdf> {
    let texto = fs::read_to_string(ruta).with_context(|| format!("No se pudo leer {}", ruta.display()))?;
    serde_json::from_str(&texto).with_context(|| format!("JSON de cotizacion invalido en {}", ruta.display()))
}

fn generar(datos: &Path, output: Option<PathBuf>) -> Result<()> {
    let datos = leer_datos(datos)?;
    let salida = output.unwrap_or_else(|| {
        PathBuf::from(format!("cotizacion_{}.pdf", datos.cotizacion.id.unwrap_or_default()))
    });

    let bytes = generar_pdf_cotizacion(&datos)?;
    fs::write(&salida, &bytes).with_context(|| format!("No se pudo escribir {}", salida.display()))?;
    tracing::info!(archivo = %salida.display(), bytes = bytes.len(), "PDF generado");
    println!("{}", salida.display());
    Ok(())
}

async fn subir(datos: &Path, usuario: Option<String>, password: Option<String>) -> Result<()> {
    let datos = leer_datos(datos)?;
    let config = Config::from_env()?;
    let client = ApiClient::from_config(&config)?;

    if config.token.is_none() {
        match (usuario, password) {
            (Some(u), Some(p)) => {
                client.login(&u, &p).await?;
            }
            _ => bail!("Defina MEGUI_API_TOKEN o MEGUI_USUARIO y MEGUI_PASSWORD"),
        }
    }

    let resultado = generar_y_subir_pdf(&client, &datos).await;
    match (resultado.success, resultado.url_pdf, resultado.error) {
        (true, Some(url), _) => {
            println!("{}", url);
            Ok(())
        }
        (_, _, error) => bail!(error.unwrap_or_else(|| "Error desconocido al subir el PDF".to_string())),
    }
}

fn totales(datos: &Path) -> Result<()> {
    let datos = leer_datos(datos)?;
    let t = calcular_totales(&datos.cotizacion, &datos.detalles);
    let moneda = datos.cotizacion.codigo_moneda();

    println!("SUBTOTAL: {} {}", moneda, format_dinero(t.subtotal));
    if datos.cotizacion.es_exonerado_al_igv {
        println!("IGV: EXONERADO");
    } else {
        println!("IGV: {} {}", moneda, format_dinero(t.igv));
    }
    println!("TOTAL: {} {}", moneda, format_dinero(t.total));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cotizacion_tool=info,erp_megui=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generar { datos, output } => generar(&datos, output),
        Commands::Subir { datos, usuario, password } => subir(&datos, usuario, password).await,
        Commands::Totales { datos } => totales(&datos),
    }
}
