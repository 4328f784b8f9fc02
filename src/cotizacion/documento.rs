//! Lista de dibujo paginada con cursor vertical.
//!
//! Coordenadas en mm desde la esquina superior izquierda de la pagina; el
//! renderizador las invierte al sistema de PDF.

use super::metricas::{ancho_texto, Fuente};

pub const ANCHO_PAGINA: f64 = 210.0;
pub const ALTO_PAGINA: f64 = 297.0;
pub const MARGEN: f64 = 15.0;
/// Un elemento que cruce esta altura pasa a la pagina siguiente
pub const LIMITE_INFERIOR: f64 = ALTO_PAGINA - 20.0;
pub const ANCHO_UTIL: f64 = ANCHO_PAGINA - 2.0 * MARGEN;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Alineacion {
    Izquierda,
    Centro,
    Derecha,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operacion {
    /// `x` ya resuelto al borde izquierdo; `y` es la linea base
    Texto {
        x: f64,
        y: f64,
        texto: String,
        fuente: Fuente,
        tamano: f64,
    },
    Linea {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        grosor: f64,
    },
    Rectangulo {
        x: f64,
        y: f64,
        ancho: f64,
        alto: f64,
        grosor: f64,
    },
    /// Imagen codificada (PNG/JPEG); `y` es el borde superior
    Imagen {
        x: f64,
        y: f64,
        ancho: f64,
        alto: f64,
        datos: Vec<u8>,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pagina {
    pub operaciones: Vec<Operacion>,
}

#[derive(Debug, Clone)]
pub struct Documento {
    pub titulo: String,
    paginas: Vec<Pagina>,
    /// Posicion vertical actual en la ultima pagina
    pub cursor: f64,
}

impl Documento {
    pub fn new(titulo: impl Into<String>) -> Self {
        Documento {
            titulo: titulo.into(),
            paginas: vec![Pagina::default()],
            cursor: MARGEN,
        }
    }

    pub fn paginas(&self) -> &[Pagina] {
        &self.paginas
    }

    pub fn nueva_pagina(&mut self) {
        self.paginas.push(Pagina::default());
        self.cursor = MARGEN;
    }

    /// Salta de pagina si `alto` mm no caben bajo el cursor. Devuelve `true`
    /// si hubo salto.
    pub fn asegurar_espacio(&mut self, alto: f64) -> bool {
        if self.cursor + alto > LIMITE_INFERIOR && self.cursor > MARGEN {
            self.nueva_pagina();
            return true;
        }
        false
    }

    fn actual(&mut self) -> &mut Pagina {
        if self.paginas.is_empty() {
            self.paginas.push(Pagina::default());
        }
        let ultima = self.paginas.len() - 1;
        &mut self.paginas[ultima]
    }

    pub fn texto(
        &mut self,
        x: f64,
        y: f64,
        texto: &str,
        fuente: Fuente,
        tamano: f64,
        alineacion: Alineacion,
    ) {
        if texto.is_empty() {
            return;
        }
        let ancho = ancho_texto(texto, fuente, tamano);
        let x = match alineacion {
            Alineacion::Izquierda => x,
            Alineacion::Centro => x - ancho / 2.0,
            Alineacion::Derecha => x - ancho,
        };
        self.actual().operaciones.push(Operacion::Texto {
            x,
            y,
            texto: texto.to_string(),
            fuente,
            tamano,
        });
    }

    pub fn linea(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, grosor: f64) {
        self.actual().operaciones.push(Operacion::Linea { x1, y1, x2, y2, grosor });
    }

    pub fn rectangulo(&mut self, x: f64, y: f64, ancho: f64, alto: f64, grosor: f64) {
        self.actual()
            .operaciones
            .push(Operacion::Rectangulo { x, y, ancho, alto, grosor });
    }

    pub fn imagen(&mut self, x: f64, y: f64, ancho: f64, alto: f64, datos: Vec<u8>) {
        self.actual()
            .operaciones
            .push(Operacion::Imagen { x, y, ancho, alto, datos });
    }

    /// Agrega "Pagina i de n" al pie de cada pagina.
    pub fn numerar_paginas(&mut self) {
        let total = self.paginas.len();
        for (i, pagina) in self.paginas.iter_mut().enumerate() {
            let texto = format!("Página {} de {}", i + 1, total);
            let ancho = ancho_texto(&texto, Fuente::Normal, 8.0);
            pagina.operaciones.push(Operacion::Texto {
                x: ANCHO_PAGINA - MARGEN - ancho,
                y: ALTO_PAGINA - 10.0,
                texto,
                fuente: Fuente::Normal,
                tamano: 8.0,
            });
        }
    }

    /// Todos los textos de una pagina, en orden de dibujo.
    pub fn textos_pagina(&self, indice: usize) -> Vec<&str> {
        self.paginas
            .get(indice)
            .map(|p| {
                p.operaciones
                    .iter()
                    .filter_map(|op| match op {
                        Operacion::Texto { texto, .. } => Some(texto.as_str()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn contiene_texto(&self, buscado: &str) -> bool {
        (0..self.paginas.len()).any(|i| self.textos_pagina(i).iter().any(|t| t.contains(buscado)))
    }
}
