/// Forma canônica do termo para a chave de unicidade: minúsculas (não
/// afeta hangul), espaços colapsados, pontuação decorativa removida.
pub fn normalize(term: &str) -> String {
    let mut s = term.trim().to_lowercase();

    s = s.split_whitespace().collect::<Vec<_>>().join(" ");

    for ch in ['“', '”', '’', '‘', '…', '"', '\'', '(', ')'] {
        s = s.replace(ch, "");
    }

    s
}
