/// Formatea un monto con 2 decimales
pub fn format_dinero(val: f64) -> String {
    format!("{:.2}", redondear2(val))
}

/// Cantidades enteras sin decimales, fraccionarias con 2
pub fn format_cantidad(cant: f64) -> String {
    if cant == cant.floor() {
        format!("{:.0}", cant)
    } else {
        format!("{:.2}", cant)
    }
}

/// Redondeo comercial a 2 decimales
pub fn redondear2(val: f64) -> f64 {
    (val * 100.0).round() / 100.0
}

/// Mayusculas y recorte de espacios
pub fn mayusculas(texto: &mut String) {
    *texto = texto.trim().to_uppercase();
}

pub fn mayusculas_opt(texto: &mut Option<String>) {
    if let Some(t) = texto.as_mut() {
        mayusculas(t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dinero_dos_decimales() {
        assert_eq!(format_dinero(180.0), "180.00");
        assert_eq!(format_dinero(10.126), "10.13");
        assert_eq!(format_dinero(0.1 + 0.2), "0.30");
    }

    #[test]
    fn cantidad_entera_o_decimal() {
        assert_eq!(format_cantidad(3.0), "3");
        assert_eq!(format_cantidad(2.5), "2.50");
    }

    #[test]
    fn mayusculas_recorta() {
        let mut t = "  abc-123 ".to_string();
        mayusculas(&mut t);
        assert_eq!(t, "ABC-123");

        let mut o = Some("toyota".to_string());
        mayusculas_opt(&mut o);
        assert_eq!(o.as_deref(), Some("TOYOTA"));
    }
}
