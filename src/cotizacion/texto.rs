use super::metricas::{ancho_texto, Fuente};

/// Divide el texto en lineas que no superan `ancho_max` mm.
///
/// Respeta los saltos de linea explicitos (una linea vacia se conserva) y
/// corta por caracteres las palabras mas anchas que la columna.
pub fn dividir_texto(texto: &str, ancho_max: f64, fuente: Fuente, tamano: f64) -> Vec<String> {
    let mut lineas = Vec::new();
    if texto.is_empty() {
        return lineas;
    }

    let cabe = |s: &str| ancho_texto(s, fuente, tamano) <= ancho_max;

    for parrafo in texto.split('\n').map(|p| p.trim_end_matches('\r')) {
        let mut actual = String::new();
        let mut hubo_palabras = false;

        for palabra in parrafo.split_whitespace() {
            hubo_palabras = true;

            if !cabe(palabra) {
                if !actual.is_empty() {
                    lineas.push(std::mem::take(&mut actual));
                }
                let mut trozos = cortar_palabra(palabra, &cabe);
                actual = trozos.pop().unwrap_or_default();
                lineas.extend(trozos);
                continue;
            }

            let candidata = if actual.is_empty() {
                palabra.to_string()
            } else {
                format!("{} {}", actual, palabra)
            };

            if cabe(&candidata) {
                actual = candidata;
            } else {
                lineas.push(std::mem::replace(&mut actual, palabra.to_string()));
            }
        }

        if hubo_palabras {
            lineas.push(actual);
        } else {
            lineas.push(String::new());
        }
    }

    lineas
}

/// Corta una palabra en trozos que caben; al menos un caracter por trozo.
fn cortar_palabra(palabra: &str, cabe: &impl Fn(&str) -> bool) -> Vec<String> {
    let mut trozos = Vec::new();
    let mut actual = String::new();

    for c in palabra.chars() {
        let mut candidata = actual.clone();
        candidata.push(c);
        if actual.is_empty() || cabe(&candidata) {
            actual = candidata;
        } else {
            trozos.push(std::mem::replace(&mut actual, c.to_string()));
        }
    }
    if !actual.is_empty() {
        trozos.push(actual);
    }
    trozos
}
