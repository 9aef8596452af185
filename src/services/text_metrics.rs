use regex::Regex;

/// Tokens numéricos do texto, com decimal e separador de milhar opcionais.
/// Vírgulas são removidas antes da comparação: "45,000" vira "45000".
pub fn digit_tokens(text: &str) -> Vec<String> {
    let re = Regex::new(r"\d[\d,]*(?:\.\d+)?").unwrap();

    re.find_iter(text)
        .map(|m| m.as_str().replace(',', ""))
        .collect()
}

pub fn numeric_value(token: &str) -> Option<f64> {
    token.parse::<f64>().ok()
}

pub fn hangul_count(text: &str) -> usize {
    text.chars().filter(|&c| is_hangul(c)).count()
}

fn is_hangul(c: char) -> bool {
    matches!(c,
        '\u{AC00}'..='\u{D7A3}'     // sílabas
        | '\u{1100}'..='\u{11FF}'   // jamo
        | '\u{3130}'..='\u{318F}'   // jamo de compatibilidade
    )
}
