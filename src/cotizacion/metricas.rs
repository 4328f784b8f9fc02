//! Anchos de glifo de las fuentes base Helvetica y Helvetica-Bold.
//!
//! Valores AFM en milesimas de em para ASCII 32..=126. Los caracteres
//! acentuados se miden como su letra base.

use serde::{Deserialize, Serialize};

/// Puntos tipograficos a milimetros
pub const PT_A_MM: f64 = 25.4 / 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fuente {
    Normal,
    Negrita,
}

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const ANCHO_POR_DEFECTO: u16 = 556;

fn letra_base(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        'Á' | 'À' | 'Ä' | 'Â' => 'A',
        'É' | 'È' | 'Ë' | 'Ê' => 'E',
        'Í' | 'Ì' | 'Ï' | 'Î' => 'I',
        'Ó' | 'Ò' | 'Ö' | 'Ô' => 'O',
        'Ú' | 'Ù' | 'Ü' | 'Û' => 'U',
        'Ñ' => 'N',
        otro => otro,
    }
}

fn ancho_glifo(c: char, fuente: Fuente) -> u16 {
    let c = letra_base(c);
    let tabla = match fuente {
        Fuente::Normal => &HELVETICA,
        Fuente::Negrita => &HELVETICA_BOLD,
    };
    match c as u32 {
        n @ 32..=126 => tabla[(n - 32) as usize],
        _ => ANCHO_POR_DEFECTO,
    }
}

/// Ancho del texto en mm para el tamano de fuente dado (en puntos).
pub fn ancho_texto(texto: &str, fuente: Fuente, tamano: f64) -> f64 {
    let milesimas: u32 = texto.chars().map(|c| ancho_glifo(c, fuente) as u32).sum();
    milesimas as f64 / 1000.0 * tamano * PT_A_MM
}

/// Alto de linea en mm (interlineado 1.15 como en los formularios impresos)
pub fn alto_linea(tamano: f64) -> f64 {
    tamano * 1.15 * PT_A_MM
}
