pub mod api_utils;
pub mod errors;
pub mod geolocation;
pub mod icons;
pub mod localities;
pub mod state;
