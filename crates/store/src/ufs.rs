//! The 27 Brazilian federative units.

/// `(uf, name)` pairs, ordered by code.
pub const BRAZILIAN_STATES: &[(&str, &str)] = &[
    ("AC", "Acre"),
    ("AL", "Alagoas"),
    ("AM", "Amazonas"),
    ("AP", "Amapá"),
    ("BA", "Bahia"),
    ("CE", "Ceará"),
    ("DF", "Distrito Federal"),
    ("ES", "Espírito Santo"),
    ("GO", "Goiás"),
    ("MA", "Maranhão"),
    ("MG", "Minas Gerais"),
    ("MS", "Mato Grosso do Sul"),
    ("MT", "Mato Grosso"),
    ("PA", "Pará"),
    ("PB", "Paraíba"),
    ("PE", "Pernambuco"),
    ("PI", "Piauí"),
    ("PR", "Paraná"),
    ("RJ", "Rio de Janeiro"),
    ("RN", "Rio Grande do Norte"),
    ("RO", "Rondônia"),
    ("RR", "Roraima"),
    ("RS", "Rio Grande do Sul"),
    ("SC", "Santa Catarina"),
    ("SE", "Sergipe"),
    ("SP", "São Paulo"),
    ("TO", "Tocantins"),
];

/// Name of the state with code `uf`, case-insensitive.
pub fn state_name(uf: &str) -> Option<&'static str> {
    let uf = uf.trim();
    BRAZILIAN_STATES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(uf))
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_units_present() {
        assert_eq!(BRAZILIAN_STATES.len(), 27);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(state_name("pe"), Some("Pernambuco"));
        assert_eq!(state_name(" SP "), Some("São Paulo"));
        assert_eq!(state_name("ZZ"), None);
    }
}
