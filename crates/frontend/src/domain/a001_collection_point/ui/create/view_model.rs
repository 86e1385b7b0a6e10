use super::model;
use super::state::{CityTicket, ContactField, CreatePointState, SubmitRejected};
use crate::shared::geolocation::{self, GeoPosition};
use crate::shared::localities;
use contracts::domain::a002_recycling_item::aggregate::RecyclingItemId;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// ViewModel for the create-point form
///
/// Owns the single state signal and starts every request. Responses are applied
/// with `try_update`, so a request that resolves after the page is gone is ignored.
#[derive(Clone, Copy)]
pub struct CreatePointVm {
    pub state: RwSignal<CreatePointState>,
}

impl CreatePointVm {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(CreatePointState::new()),
        }
    }

    /// Start the independent loads (location, catalog, states)
    pub fn init(&self) {
        self.locate();
        self.load_items();
        self.load_ufs();
    }

    pub fn locate(&self) {
        let state = self.state;
        state.update(|s| s.begin_locate());
        spawn_local(async move {
            let result = geolocation::current_position().await;
            if let Err(e) = &result {
                log::warn!("geolocation failed: {}", e);
            }
            state.try_update(|s| s.apply_location(result));
        });
    }

    pub fn load_items(&self) {
        let state = self.state;
        state.update(|s| s.begin_items_load());
        spawn_local(async move {
            let result = model::fetch_items().await;
            match &result {
                Ok(items) => log::debug!("loaded {} recycling items", items.len()),
                Err(e) => log::warn!("failed to load recycling items: {}", e),
            }
            state.try_update(|s| s.apply_items(result));
        });
    }

    pub fn load_ufs(&self) {
        let state = self.state;
        state.update(|s| s.begin_ufs_load());
        spawn_local(async move {
            let result = localities::fetch_ufs().await;
            if let Err(e) = &result {
                log::warn!("failed to load states: {}", e);
            }
            state.try_update(|s| s.apply_ufs(result));
        });
    }

    pub fn select_uf(&self, value: String) {
        if let Some(ticket) = self.state.try_update(|s| s.select_uf(&value)).flatten() {
            self.fetch_cities(ticket);
        }
    }

    pub fn retry_cities(&self) {
        if let Some(ticket) = self.state.try_update(|s| s.retry_cities()).flatten() {
            self.fetch_cities(ticket);
        }
    }

    fn fetch_cities(&self, ticket: CityTicket) {
        let state = self.state;
        spawn_local(async move {
            let result = localities::fetch_cities(&ticket.uf).await;
            if let Err(e) = &result {
                log::warn!("failed to load cities for {}: {}", ticket.uf, e);
            }
            let applied = state
                .try_update(|s| s.apply_cities(&ticket, result))
                .unwrap_or(false);
            if !applied {
                log::debug!(
                    "dropped stale city list for {} (generation {})",
                    ticket.uf,
                    ticket.generation
                );
            }
        });
    }

    pub fn select_city(&self, value: String) {
        let accepted = self.state.try_update(|s| s.select_city(&value)).unwrap_or(false);
        if !accepted {
            log::warn!("ignored city outside the loaded list: {}", value);
        }
    }

    pub fn set_map_position(&self, position: GeoPosition) {
        self.state
            .update(|s| s.set_map_position(position.latitude, position.longitude));
    }

    pub fn update_contact(&self, field: ContactField, value: String) {
        self.state.update(|s| s.update_contact(field, value));
    }

    pub fn toggle_item(&self, id: RecyclingItemId) {
        self.state.update(|s| s.toggle_item(id));
    }

    /// Validate and post the form. `on_created` runs only after the backend accepted it.
    pub fn submit(&self, on_created: impl FnOnce() + 'static) {
        let state = self.state;
        let Some(outcome) = state.try_update(|s| s.begin_submit()) else {
            return;
        };

        let dto = match outcome {
            Ok(dto) => dto,
            Err(SubmitRejected::InFlight) => {
                log::debug!("submit ignored: previous request still in flight");
                return;
            }
            Err(SubmitRejected::Invalid(errors)) => {
                log::debug!("submit blocked by {} invalid field(s)", errors.len());
                return;
            }
        };

        spawn_local(async move {
            let result = model::create_point(&dto).await;
            match &result {
                Ok(id) => log::info!("collection point {} created", id.value()),
                Err(e) => log::error!("failed to create collection point: {}", e),
            }
            if state.try_update(|s| s.apply_submit_result(result)) == Some(true) {
                on_created();
            }
        });
    }
}

impl Default for CreatePointVm {
    fn default() -> Self {
        Self::new()
    }
}
