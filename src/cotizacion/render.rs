//! Conversion de la lista de dibujo a PDF con `printpdf`.

use printpdf::image_crate::{self, DynamicImage};
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point,
};

use super::documento::{Documento, Operacion, ALTO_PAGINA, ANCHO_PAGINA};
use super::metricas::Fuente;
use crate::error::ApiError;

const DPI: f64 = 300.0;

struct Fuentes {
    normal: IndirectFontRef,
    negrita: IndirectFontRef,
}

impl Fuentes {
    fn de(&self, fuente: Fuente) -> &IndirectFontRef {
        match fuente {
            Fuente::Normal => &self.normal,
            Fuente::Negrita => &self.negrita,
        }
    }
}

/// mm desde arriba a punto PDF (origen abajo a la izquierda)
fn punto(x: f64, y: f64) -> Point {
    Point::new(Mm(x as f32), Mm((ALTO_PAGINA - y) as f32))
}

fn pdf_err(e: impl std::fmt::Display) -> ApiError {
    ApiError::Pdf(e.to_string())
}

fn dibujar_imagen(capa: &PdfLayerReference, x: f64, y: f64, ancho: f64, alto: f64, datos: &[u8]) {
    let imagen = match image_crate::load_from_memory(datos) {
        Ok(img) => DynamicImage::ImageRgb8(img.to_rgb8()),
        Err(e) => {
            tracing::warn!(error = %e, "No se pudo decodificar la imagen, se omite");
            return;
        }
    };
    let (w, h) = (imagen.width() as f64, imagen.height() as f64);
    if w == 0.0 || h == 0.0 {
        return;
    }

    // A `DPI` la imagen mide px / DPI * 25.4 mm
    let escala_x = ancho / (w / DPI * 25.4);
    let escala_y = alto / (h / DPI * 25.4);

    Image::from_dynamic_image(&imagen).add_to_layer(
        capa.clone(),
        ImageTransform {
            translate_x: Some(Mm(x as f32)),
            translate_y: Some(Mm((ALTO_PAGINA - y - alto) as f32)),
            scale_x: Some(escala_x as f32),
            scale_y: Some(escala_y as f32),
            dpi: Some(DPI as f32),
            ..Default::default()
        },
    );
}

fn dibujar(capa: &PdfLayerReference, fuentes: &Fuentes, operacion: &Operacion) {
    match operacion {
        Operacion::Texto { x, y, texto, fuente, tamano } => {
            capa.use_text(
                texto.as_str(),
                *tamano as f32,
                Mm(*x as f32),
                Mm((ALTO_PAGINA - y) as f32),
                fuentes.de(*fuente),
            );
        }
        Operacion::Linea { x1, y1, x2, y2, grosor } => {
            capa.set_outline_thickness(*grosor as f32);
            capa.add_line(Line {
                points: vec![(punto(*x1, *y1), false), (punto(*x2, *y2), false)],
                is_closed: false,
            });
        }
        Operacion::Rectangulo { x, y, ancho, alto, grosor } => {
            capa.set_outline_thickness(*grosor as f32);
            capa.add_line(Line {
                points: vec![
                    (punto(*x, *y), false),
                    (punto(x + ancho, *y), false),
                    (punto(x + ancho, y + alto), false),
                    (punto(*x, y + alto), false),
                ],
                is_closed: true,
            });
        }
        Operacion::Imagen { x, y, ancho, alto, datos } => {
            dibujar_imagen(capa, *x, *y, *ancho, *alto, datos);
        }
    }
}

/// Renderiza todas las paginas del documento a bytes PDF.
pub fn renderizar(documento: &Documento) -> Result<Vec<u8>, ApiError> {
    let ancho = Mm(ANCHO_PAGINA as f32);
    let alto = Mm(ALTO_PAGINA as f32);
    let (pdf, primera_pagina, primera_capa) = PdfDocument::new(&documento.titulo, ancho, alto, "Capa 1");

    let fuentes = Fuentes {
        normal: pdf.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?,
        negrita: pdf.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_err)?,
    };

    for (i, pagina) in documento.paginas().iter().enumerate() {
        let capa = if i == 0 {
            pdf.get_page(primera_pagina).get_layer(primera_capa)
        } else {
            let (p, c) = pdf.add_page(ancho, alto, "Capa 1");
            pdf.get_page(p).get_layer(c)
        };
        for operacion in &pagina.operaciones {
            dibujar(&capa, &fuentes, operacion);
        }
    }

    let bytes = pdf.save_to_bytes().map_err(pdf_err)?;
    tracing::debug!(paginas = documento.paginas().len(), bytes = bytes.len(), "PDF generado");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cotizacion::documento::Alineacion;

    #[test]
    fn genera_pdf_multipagina() {
        let mut doc = Documento::new("Cotización 1");
        doc.texto(15.0, 20.0, "COTIZACIÓN", Fuente::Negrita, 16.0, Alineacion::Izquierda);
        doc.rectangulo(15.0, 30.0, 180.0, 6.0, 0.3);
        doc.linea(15.0, 40.0, 195.0, 40.0, 0.3);
        doc.nueva_pagina();
        doc.texto(15.0, 20.0, "Pagina dos", Fuente::Normal, 9.0, Alineacion::Izquierda);
        doc.numerar_paginas();

        let bytes = renderizar(&doc).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn imagen_ilegible_no_rompe() {
        let mut doc = Documento::new("logo");
        doc.imagen(15.0, 15.0, 40.0, 20.0, vec![0x89, b'P', b'N', b'G', 0, 1, 2]);
        let bytes = renderizar(&doc).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
