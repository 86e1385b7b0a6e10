//! Определение местоположения устройства через `navigator.geolocation`

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::shared::errors::GeolocationError;

/// Пара координат (градусы, WGS84)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPosition {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Центр карты, когда геолокация недоступна (Praça da Sé, São Paulo)
pub const DEFAULT_MAP_CENTER: GeoPosition = GeoPosition::new(-23.5505, -46.6333);

/// `GeolocationPositionError.PERMISSION_DENIED`
const PERMISSION_DENIED: u16 = 1;

/// Request the current position once.
///
/// Resolves when the browser calls either the success or the error callback.
pub async fn current_position() -> Result<GeoPosition, GeolocationError> {
    let window = web_sys::window()
        .ok_or_else(|| GeolocationError::Unavailable("no window".to_string()))?;
    let geolocation = window
        .navigator()
        .geolocation()
        .map_err(|e| GeolocationError::Unavailable(format!("{e:?}")))?;

    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        if let Err(e) = geolocation.get_current_position_with_error_callback(&resolve, Some(&reject)) {
            let _ = reject.call1(&JsValue::NULL, &e);
        }
    });

    match JsFuture::from(promise).await {
        Ok(value) => {
            let position: web_sys::GeolocationPosition = value.unchecked_into();
            let coords = position.coords();
            Ok(GeoPosition::new(coords.latitude(), coords.longitude()))
        }
        Err(err) => Err(classify_error(&err)),
    }
}

fn classify_error(err: &JsValue) -> GeolocationError {
    match err.dyn_ref::<web_sys::GeolocationPositionError>() {
        Some(position_error) => error_from_code(position_error.code(), position_error.message()),
        None => GeolocationError::Unavailable(format!("{err:?}")),
    }
}

fn error_from_code(code: u16, message: String) -> GeolocationError {
    if code == PERMISSION_DENIED {
        GeolocationError::Denied
    } else {
        GeolocationError::Unavailable(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_denied_code_maps_to_denied() {
        assert_eq!(error_from_code(1, "User denied".into()), GeolocationError::Denied);
    }

    #[test]
    fn other_codes_are_unavailable() {
        assert_eq!(
            error_from_code(3, "Timeout expired".into()),
            GeolocationError::Unavailable("Timeout expired".into())
        );
        assert_eq!(
            error_from_code(2, "Position unavailable".into()),
            GeolocationError::Unavailable("Position unavailable".into())
        );
    }
}
