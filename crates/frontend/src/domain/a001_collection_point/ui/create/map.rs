use crate::shared::geolocation::GeoPosition;
use leaflet::LatLng;
use leptos::prelude::*;
use leptos_leaflet::prelude::{MapContainer, MapEvents, Marker, Position, TileLayer};

const TILE_LAYER_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const MAP_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";
const MAP_ZOOM: f64 = 15.0;

/// Карта выбора адреса пункта.
///
/// The map is created once; later changes of `center` (the device location
/// usually arrives after the first render) pan it. A click reports the exact
/// coordinates through `on_pick`.
#[component]
pub fn LocationPicker(
    #[prop(into)] center: Signal<GeoPosition>,
    #[prop(into)] selected: Signal<Option<GeoPosition>>,
    on_pick: Callback<GeoPosition>,
) -> impl IntoView {
    let events = MapEvents::new();
    let map = RwSignal::<Option<leaflet::Map>, LocalStorage>::new_local(None);

    events.clone().mouse_click(move |e: leaflet::MouseEvent| {
        let latlng = e.lat_lng();
        on_pick.run(GeoPosition::new(latlng.lat(), latlng.lng()));
    });

    Effect::new(move |_| {
        let GeoPosition {
            latitude,
            longitude,
        } = center.get();
        let Some(map) = map.get_untracked() else {
            return;
        };
        map.set_view(&LatLng::new(latitude, longitude), map.get_zoom());
    });

    let GeoPosition {
        latitude,
        longitude,
    } = center.get_untracked();

    view! {
        <MapContainer
            class="create-point__map"
            center=Position::new(latitude, longitude)
            zoom=MAP_ZOOM
            map=map.write_only()
            set_view=true
            events
        >
            <TileLayer url=TILE_LAYER_URL attribution=MAP_ATTRIBUTION />
            {move || {
                selected
                    .get()
                    .map(|p| view! { <Marker position=Position::new(p.latitude, p.longitude) /> })
            }}
        </MapContainer>
    }
}
