//! Records returned by the IBGE localities API
//! (`https://servicodados.ibge.gov.br/api/v1/localidades`).
//!
//! Only the fields the registration form needs are declared; serde skips the rest.

use serde::{Deserialize, Serialize};

/// Элемент ответа `/estados`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IbgeUf {
    pub sigla: String,
}

/// Элемент ответа `/estados/{uf}/municipios`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IbgeMunicipio {
    pub nome: String,
}

/// Сортированный список аббревиатур штатов
pub fn uf_codes(records: Vec<IbgeUf>) -> Vec<String> {
    let mut codes: Vec<String> = records.into_iter().map(|r| r.sigla).collect();
    codes.sort();
    codes.dedup();
    codes
}

pub fn city_names(records: Vec<IbgeMunicipio>) -> Vec<String> {
    records.into_iter().map(|r| r.nome).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_ibge_fields_are_ignored() {
        let json = r#"[
            {"id":35,"sigla":"SP","nome":"São Paulo","regiao":{"id":3,"sigla":"SE","nome":"Sudeste"}},
            {"id":33,"sigla":"RJ","nome":"Rio de Janeiro","regiao":{"id":3,"sigla":"SE","nome":"Sudeste"}}
        ]"#;
        let ufs: Vec<IbgeUf> = serde_json::from_str(json).unwrap();
        assert_eq!(uf_codes(ufs), vec!["RJ".to_string(), "SP".to_string()]);
    }

    #[test]
    fn city_names_keep_api_order() {
        let json = r#"[{"id":1,"nome":"São Paulo"},{"id":2,"nome":"Campinas"}]"#;
        let cities: Vec<IbgeMunicipio> = serde_json::from_str(json).unwrap();
        assert_eq!(city_names(cities), vec!["São Paulo", "Campinas"]);
    }
}
