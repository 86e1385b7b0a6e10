//! Клиент IBGE: штаты и муниципалитеты Бразилии

use contracts::shared::localities::{city_names, uf_codes, IbgeMunicipio, IbgeUf};

use crate::shared::api_utils::get_json;
use crate::shared::errors::FetchError;

pub const IBGE_LOCALITIES_BASE: &str = "https://servicodados.ibge.gov.br/api/v1/localidades";

/// Список аббревиатур штатов, отсортированный
pub async fn fetch_ufs() -> Result<Vec<String>, FetchError> {
    let records: Vec<IbgeUf> = get_json(&format!("{}/estados", IBGE_LOCALITIES_BASE)).await?;
    Ok(uf_codes(records))
}

/// Муниципалитеты штата `uf`
pub async fn fetch_cities(uf: &str) -> Result<Vec<String>, FetchError> {
    let records: Vec<IbgeMunicipio> = get_json(&cities_url(uf)).await?;
    Ok(city_names(records))
}

fn cities_url(uf: &str) -> String {
    format!(
        "{}/estados/{}/municipios",
        IBGE_LOCALITIES_BASE,
        urlencoding::encode(uf)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cities_url() {
        assert_eq!(
            cities_url("SP"),
            "https://servicodados.ibge.gov.br/api/v1/localidades/estados/SP/municipios"
        );
        assert_eq!(
            cities_url("S/P"),
            "https://servicodados.ibge.gov.br/api/v1/localidades/estados/S%2FP/municipios"
        );
    }
}
