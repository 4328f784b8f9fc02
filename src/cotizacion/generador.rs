use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Utc};

use super::documento::{Alineacion, Documento, ANCHO_PAGINA, ANCHO_UTIL, LIMITE_INFERIOR, MARGEN};
use super::metricas::{alto_linea, Fuente, PT_A_MM};
use super::texto::dividir_texto;
use super::totales::calcular_totales;
use super::DatosCotizacionPdf;
use crate::models::{CotizacionVentas, Empresa};
use crate::utils::{format_cantidad, format_dinero};

const LOGO_ANCHO_MAX: f64 = 40.0;
const LOGO_ALTO_MAX: f64 = 20.0;

const T_EMPRESA: f64 = 12.0;
const T_TITULO: f64 = 16.0;
const T_NUMERO: f64 = 11.0;
const T_NORMAL: f64 = 9.0;
const T_TABLA: f64 = 8.5;
const T_TOTAL: f64 = 10.0;

const PAD_H: f64 = 1.5;
const PAD_V: f64 = 1.2;
const GROSOR: f64 = 0.3;

// ============================================
// HELPERS
// ============================================

struct Columna {
    titulo: &'static str,
    ancho: f64,
    alineacion: Alineacion,
}

/// Logo en base64 (con o sin prefijo `data:`) a bytes
fn decodificar_logo(logo: &str) -> Option<Vec<u8>> {
    let datos = match logo.split_once(',') {
        Some((prefijo, resto)) if prefijo.starts_with("data:") => resto,
        _ => logo,
    };
    let datos = datos.trim();
    if datos.is_empty() {
        return None;
    }
    match BASE64.decode(datos) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            tracing::warn!(error = %e, "Logo de empresa no es base64 valido");
            None
        }
    }
}

fn be16(bytes: &[u8], i: usize) -> Option<u32> {
    Some(u16::from_be_bytes([*bytes.get(i)?, *bytes.get(i + 1)?]) as u32)
}

/// Ancho y alto en pixeles leidos de la cabecera PNG o JPEG
fn dimensiones_imagen(bytes: &[u8]) -> Option<(u32, u32)> {
    if bytes.len() >= 24 && bytes.starts_with(b"\x89PNG") {
        let w = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        let h = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
        return (w > 0 && h > 0).then_some((w, h));
    }

    if bytes.starts_with(&[0xFF, 0xD8]) {
        let mut i = 2;
        while i + 3 < bytes.len() {
            if bytes[i] != 0xFF {
                return None;
            }
            let marcador = bytes[i + 1];
            // SOF0..SOF15 salvo DHT, JPG y DAC
            if (0xC0..=0xCF).contains(&marcador) && ![0xC4, 0xC8, 0xCC].contains(&marcador) {
                let h = be16(bytes, i + 5)?;
                let w = be16(bytes, i + 7)?;
                return (w > 0 && h > 0).then_some((w, h));
            }
            i += 2 + be16(bytes, i + 2)? as usize;
        }
    }
    None
}

/// Escala (ancho, alto) para caber en la caja conservando la proporcion
fn ajustar(w: u32, h: u32, ancho_max: f64, alto_max: f64) -> (f64, f64) {
    let escala = (ancho_max / w as f64).min(alto_max / h as f64);
    (w as f64 * escala, h as f64 * escala)
}

fn format_fecha(fecha: Option<&DateTime<Utc>>) -> String {
    fecha.map(|f| f.format("%d/%m/%Y").to_string()).unwrap_or_default()
}

fn numero_cotizacion(cotizacion: &CotizacionVentas) -> String {
    match (&cotizacion.numero_documento, cotizacion.id) {
        (Some(n), _) if !n.trim().is_empty() => n.clone(),
        (_, Some(id)) => id.to_string(),
        _ => String::new(),
    }
}

/// Linea base de la fila `i` de un bloque que empieza en `y`
fn base(y: f64, i: usize, tamano: f64) -> f64 {
    y + tamano * PT_A_MM + i as f64 * alto_linea(tamano)
}

/// Pares etiqueta/valor en una columna; devuelve la altura ocupada.
fn bloque_datos(doc: &mut Documento, x: f64, y: f64, ancho: f64, pares: &[(&str, String)]) -> f64 {
    let ancho_etiqueta = 26.0;
    let mut fila = 0;
    for (etiqueta, valor) in pares.iter().filter(|(_, v)| !v.trim().is_empty()) {
        let lineas = dividir_texto(valor, ancho - ancho_etiqueta, Fuente::Normal, T_NORMAL);
        doc.texto(
            x,
            base(y, fila, T_NORMAL),
            &format!("{}:", etiqueta),
            Fuente::Negrita,
            T_NORMAL,
            Alineacion::Izquierda,
        );
        for linea in &lineas {
            doc.texto(
                x + ancho_etiqueta,
                base(y, fila, T_NORMAL),
                linea,
                Fuente::Normal,
                T_NORMAL,
                Alineacion::Izquierda,
            );
            fila += 1;
        }
    }
    fila as f64 * alto_linea(T_NORMAL)
}

fn x_celda(x: f64, columna: &Columna) -> f64 {
    match columna.alineacion {
        Alineacion::Izquierda => x + PAD_H,
        Alineacion::Centro => x + columna.ancho / 2.0,
        Alineacion::Derecha => x + columna.ancho - PAD_H,
    }
}

fn alto_encabezado() -> f64 {
    alto_linea(T_TABLA) + 2.0 * PAD_V
}

fn encabezado_tabla(doc: &mut Documento, columnas: &[Columna]) {
    let y = doc.cursor;
    let alto = alto_encabezado();
    doc.rectangulo(MARGEN, y, ANCHO_UTIL, alto, GROSOR);
    let mut x = MARGEN;
    for columna in columnas {
        doc.texto(
            x_celda(x, columna),
            base(y + PAD_V, 0, T_TABLA),
            columna.titulo,
            Fuente::Negrita,
            T_TABLA,
            columna.alineacion,
        );
        x += columna.ancho;
    }
    doc.cursor = y + alto;
}

/// Tabla con encabezado repetido en cada pagina. Todas las celdas se
/// ajustan al ancho de su columna; una fila mas alta que una pagina se
/// parte entre paginas.
fn tabla(doc: &mut Documento, columnas: &[Columna], filas: &[Vec<String>]) {
    let paso = alto_linea(T_TABLA);
    let celdas_de = |fila: &Vec<String>| -> Vec<Vec<String>> {
        columnas
            .iter()
            .zip(fila)
            .map(|(c, texto)| dividir_texto(texto, c.ancho - 2.0 * PAD_H, Fuente::Normal, T_TABLA))
            .collect()
    };
    let lineas_de = |celdas: &[Vec<String>]| celdas.iter().map(Vec::len).max().unwrap_or(0).max(1);
    // lo que cabe en una pagina nueva bajo el encabezado
    let alto_max_fila = LIMITE_INFERIOR - MARGEN - alto_encabezado();

    let primera = filas
        .first()
        .map(|f| lineas_de(&celdas_de(f)) as f64 * paso + 2.0 * PAD_V)
        .unwrap_or(0.0);
    doc.asegurar_espacio(alto_encabezado() + primera.min(alto_max_fila));
    encabezado_tabla(doc, columnas);

    for fila in filas {
        let celdas = celdas_de(fila);
        let total = lineas_de(&celdas);
        let alto = total as f64 * paso + 2.0 * PAD_V;

        if alto <= alto_max_fila {
            if doc.asegurar_espacio(alto) {
                encabezado_tabla(doc, columnas);
            }
        } else if doc.cursor + paso + 2.0 * PAD_V > LIMITE_INFERIOR {
            doc.nueva_pagina();
            encabezado_tabla(doc, columnas);
        }

        let mut desde = 0;
        loop {
            let y = doc.cursor;
            let caben = ((LIMITE_INFERIOR - y - 2.0 * PAD_V) / paso).floor().max(1.0) as usize;
            let hasta = total.min(desde + caben);

            let mut x = MARGEN;
            for (columna, lineas) in columnas.iter().zip(&celdas) {
                let tramo = lineas.get(desde..hasta.min(lineas.len())).unwrap_or_default();
                for (i, linea) in tramo.iter().enumerate() {
                    doc.texto(
                        x_celda(x, columna),
                        base(y + PAD_V, i, T_TABLA),
                        linea,
                        Fuente::Normal,
                        T_TABLA,
                        columna.alineacion,
                    );
                }
                x += columna.ancho;
            }

            let fin = y + (hasta - desde) as f64 * paso + 2.0 * PAD_V;
            doc.linea(MARGEN, fin, MARGEN + ANCHO_UTIL, fin, GROSOR / 2.0);
            doc.cursor = fin;

            desde = hasta;
            if desde >= total {
                break;
            }
            doc.nueva_pagina();
            encabezado_tabla(doc, columnas);
        }
    }
}

/// Titulo de seccion y parrafo ajustado, paginado linea por linea
fn parrafo(doc: &mut Documento, titulo: &str, texto: &str) {
    let lineas = dividir_texto(texto, ANCHO_UTIL, Fuente::Normal, T_NORMAL);
    if lineas.is_empty() {
        return;
    }
    let paso = alto_linea(T_NORMAL);

    doc.cursor += 4.0;
    doc.asegurar_espacio(2.0 * paso);
    doc.texto(MARGEN, base(doc.cursor, 0, T_NORMAL), titulo, Fuente::Negrita, T_NORMAL, Alineacion::Izquierda);
    doc.cursor += paso;

    for linea in &lineas {
        doc.asegurar_espacio(paso);
        doc.texto(MARGEN, base(doc.cursor, 0, T_NORMAL), linea, Fuente::Normal, T_NORMAL, Alineacion::Izquierda);
        doc.cursor += paso;
    }
}

// ============================================
// SECCIONES
// ============================================

fn seccion_encabezado(doc: &mut Documento, empresa: &Empresa, cotizacion: &CotizacionVentas) {
    let y0 = doc.cursor;
    let derecha = ANCHO_PAGINA - MARGEN;

    // Logo
    let mut x_empresa = MARGEN;
    let mut alto_logo = 0.0;
    if let Some(bytes) = empresa.logo.as_deref().and_then(decodificar_logo) {
        match dimensiones_imagen(&bytes) {
            Some((w, h)) => {
                let (ancho, alto) = ajustar(w, h, LOGO_ANCHO_MAX, LOGO_ALTO_MAX);
                doc.imagen(MARGEN, y0, ancho, alto, bytes);
                x_empresa = MARGEN + LOGO_ANCHO_MAX + 5.0;
                alto_logo = alto;
            }
            None => tracing::warn!("Formato de logo no soportado, se omite"),
        }
    }

    // Datos del emisor
    let mut y = y0;
    doc.texto(x_empresa, base(y, 0, T_EMPRESA), &empresa.razon_social, Fuente::Negrita, T_EMPRESA, Alineacion::Izquierda);
    y += alto_linea(T_EMPRESA);
    let lineas_empresa = [
        (!empresa.ruc.is_empty()).then(|| format!("RUC: {}", empresa.ruc)),
        empresa.direccion.clone(),
        empresa.telefono.as_ref().map(|t| format!("Tel: {}", t)),
        empresa.email.clone(),
    ];
    let ancho_empresa = derecha - 60.0 - x_empresa;
    for texto in lineas_empresa.iter().flatten() {
        for linea in dividir_texto(texto, ancho_empresa, Fuente::Normal, T_NORMAL) {
            doc.texto(x_empresa, base(y, 0, T_NORMAL), &linea, Fuente::Normal, T_NORMAL, Alineacion::Izquierda);
            y += alto_linea(T_NORMAL);
        }
    }

    // Titulo y numero
    doc.texto(derecha, base(y0, 0, T_TITULO), "COTIZACIÓN", Fuente::Negrita, T_TITULO, Alineacion::Derecha);
    let numero = numero_cotizacion(cotizacion);
    let mut y_titulo = y0 + alto_linea(T_TITULO);
    if !numero.is_empty() {
        doc.texto(
            derecha,
            base(y_titulo, 0, T_NUMERO),
            &format!("N° {}", numero),
            Fuente::Negrita,
            T_NUMERO,
            Alineacion::Derecha,
        );
        y_titulo += alto_linea(T_NUMERO);
    }

    doc.cursor = (y0 + alto_logo).max(y).max(y_titulo) + 3.0;
    doc.linea(MARGEN, doc.cursor, derecha, doc.cursor, GROSOR);
    doc.cursor += 3.0;

    // Metadatos en dos columnas
    let cliente = cotizacion.cliente.clone().unwrap_or_default();
    let mitad = ANCHO_UTIL / 2.0;
    let izquierda = [
        ("Cliente", cliente.razon_social),
        ("RUC/DNI", cliente.numero_documento),
        ("Dirección", cliente.direccion.unwrap_or_default()),
        ("Contacto", cliente.contacto.unwrap_or_default()),
        ("Email", cliente.email.unwrap_or_default()),
    ];
    let derecha_datos = [
        ("Fecha", format_fecha(cotizacion.fecha_documento.as_ref())),
        ("Válida hasta", format_fecha(cotizacion.fecha_vencimiento.as_ref())),
        ("Moneda", cotizacion.codigo_moneda().to_string()),
        ("Forma de pago", cotizacion.forma_pago.clone().unwrap_or_default()),
        ("Incoterm", cotizacion.incoterm.clone().unwrap_or_default()),
    ];
    let y = doc.cursor;
    let alto_izq = bloque_datos(doc, MARGEN, y, mitad - 4.0, &izquierda);
    let alto_der = bloque_datos(doc, MARGEN + mitad, y, mitad, &derecha_datos);
    doc.cursor = y + alto_izq.max(alto_der) + 4.0;
}

fn seccion_items(doc: &mut Documento, datos: &DatosCotizacionPdf) {
    let columnas = [
        Columna { titulo: "#", ancho: 10.0, alineacion: Alineacion::Centro },
        Columna { titulo: "DESCRIPCIÓN", ancho: 80.0, alineacion: Alineacion::Izquierda },
        Columna { titulo: "UNIDAD", ancho: 20.0, alineacion: Alineacion::Centro },
        Columna { titulo: "CANTIDAD", ancho: 20.0, alineacion: Alineacion::Derecha },
        Columna { titulo: "P. UNIT.", ancho: 25.0, alineacion: Alineacion::Derecha },
        Columna { titulo: "SUBTOTAL", ancho: 25.0, alineacion: Alineacion::Derecha },
    ];

    let filas: Vec<Vec<String>> = datos
        .detalles
        .iter()
        .enumerate()
        .map(|(i, d)| {
            vec![
                (i + 1).to_string(),
                d.descripcion.clone(),
                d.unidad_medida.clone().unwrap_or_default(),
                format_cantidad(d.cantidad),
                format_dinero(d.precio_unitario),
                format_dinero(d.subtotal()),
            ]
        })
        .collect();

    tabla(doc, &columnas, &filas);
}

fn seccion_costos(doc: &mut Documento, datos: &DatosCotizacionPdf) {
    if datos.costos.is_empty() {
        return;
    }
    let columnas = [
        Columna { titulo: "CONCEPTO", ancho: ANCHO_UTIL - 40.0, alineacion: Alineacion::Izquierda },
        Columna { titulo: "MONTO", ancho: 40.0, alineacion: Alineacion::Derecha },
    ];
    let filas: Vec<Vec<String>> = datos
        .costos
        .iter()
        .map(|c| vec![c.concepto.clone(), format_dinero(c.monto)])
        .collect();

    let paso = alto_linea(T_NORMAL);
    doc.cursor += 4.0;
    doc.asegurar_espacio(paso + alto_encabezado());
    doc.texto(
        MARGEN,
        base(doc.cursor, 0, T_NORMAL),
        "COSTOS DE EXPORTACIÓN",
        Fuente::Negrita,
        T_NORMAL,
        Alineacion::Izquierda,
    );
    doc.cursor += paso;
    tabla(doc, &columnas, &filas);
}

fn seccion_totales(doc: &mut Documento, datos: &DatosCotizacionPdf) {
    let totales = calcular_totales(&datos.cotizacion, &datos.detalles);
    let moneda = datos.cotizacion.codigo_moneda();

    let igv = if datos.cotizacion.es_exonerado_al_igv {
        "IGV: EXONERADO".to_string()
    } else {
        let pct = datos.cotizacion.porcentaje_igv.unwrap_or(0.0);
        format!("IGV {}%: {} {}", format_cantidad(pct), moneda, format_dinero(totales.igv))
    };
    let lineas = [
        (format!("SUBTOTAL: {} {}", moneda, format_dinero(totales.subtotal)), Fuente::Normal),
        (igv, Fuente::Normal),
        (format!("TOTAL: {} {}", moneda, format_dinero(totales.total)), Fuente::Negrita),
    ];

    let paso = alto_linea(T_TOTAL);
    doc.cursor += 3.0;
    doc.asegurar_espacio(paso * lineas.len() as f64 + 2.0);
    let x = ANCHO_PAGINA - MARGEN - PAD_H;
    for (texto, fuente) in &lineas {
        doc.texto(x, base(doc.cursor, 0, T_TOTAL), texto, *fuente, T_TOTAL, Alineacion::Derecha);
        doc.cursor += paso;
    }
}

// ============================================
// GENERADOR
// ============================================

/// Arma la lista de dibujo completa de la cotizacion, ya numerada.
pub fn generar_documento(datos: &DatosCotizacionPdf) -> Documento {
    let numero = numero_cotizacion(&datos.cotizacion);
    let mut doc = Documento::new(format!("Cotización {}", numero).trim_end().to_string());

    seccion_encabezado(&mut doc, &datos.empresa, &datos.cotizacion);
    seccion_items(&mut doc, datos);
    seccion_costos(&mut doc, datos);
    seccion_totales(&mut doc, datos);

    if let Some(obs) = datos.cotizacion.observaciones.as_deref() {
        parrafo(&mut doc, "OBSERVACIONES", obs);
    }
    if let Some(terminos) = datos.cotizacion.terminos_condiciones.as_deref() {
        parrafo(&mut doc, "TÉRMINOS Y CONDICIONES", terminos);
    }

    doc.numerar_paginas();
    doc
}
