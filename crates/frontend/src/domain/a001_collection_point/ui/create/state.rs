//! Состояние формы регистрации пункта сбора
//!
//! All page state lives in one [`CreatePointState`] record. Every user event and
//! every resolved request is a plain method on it; none of them touches the network.
//! Requests are started by the view model.

use contracts::domain::a001_collection_point::aggregate::{
    CollectionPointId, CreatePointDto, PointFieldError, CITY_PLACEHOLDER, UF_PLACEHOLDER,
};
use contracts::domain::a002_recycling_item::aggregate::{RecyclingItem, RecyclingItemId};

use crate::shared::errors::{FetchError, GeolocationError, SubmissionError};
use crate::shared::geolocation::{GeoPosition, DEFAULT_MAP_CENTER};
use crate::shared::state::Loadable;

/// Поле контактных данных, которое можно редактировать
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Whatsapp,
}

impl ContactField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Whatsapp => "whatsapp",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub whatsapp: String,
}

impl ContactInfo {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Whatsapp => &self.whatsapp,
        }
    }

    fn set(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Whatsapp => self.whatsapp = value,
        }
    }
}

/// Метка запроса списка городов.
///
/// Only a response carrying the latest ticket is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityTicket {
    pub uf: String,
    pub generation: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Failed(SubmissionError),
}

/// Почему отправка не была начата
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitRejected {
    InFlight,
    Invalid(Vec<PointFieldError>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreatePointState {
    pub contact: ContactInfo,
    pub location: Loadable<GeoPosition, GeolocationError>,
    pub selected_position: Option<GeoPosition>,
    pub items: Loadable<Vec<RecyclingItem>>,
    pub selected_items: Vec<RecyclingItemId>,
    pub ufs: Loadable<Vec<String>>,
    pub selected_uf: Option<String>,
    pub cities: Loadable<Vec<String>>,
    pub selected_city: Option<String>,
    pub validation_errors: Vec<PointFieldError>,
    pub submission: SubmissionStatus,
    city_generation: u64,
}

impl CreatePointState {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Device location
    // ------------------------------------------------------------------

    pub fn begin_locate(&mut self) {
        self.location = Loadable::Loading;
    }

    pub fn apply_location(&mut self, result: Result<GeoPosition, GeolocationError>) {
        self.location = result.into();
    }

    /// Центр карты: позиция устройства или запасной центр
    pub fn map_center(&self) -> GeoPosition {
        self.location.loaded().copied().unwrap_or(DEFAULT_MAP_CENTER)
    }

    // ------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------

    pub fn begin_items_load(&mut self) {
        self.items = Loadable::Loading;
    }

    /// Replaces the catalog in full. Selected ids that vanished from a reloaded
    /// catalog are dropped.
    pub fn apply_items(&mut self, result: Result<Vec<RecyclingItem>, FetchError>) {
        if let Ok(items) = &result {
            self.selected_items
                .retain(|id| items.iter().any(|item| item.id == *id));
        }
        self.items = result.into();
        self.revalidate();
    }

    pub fn toggle_item(&mut self, id: RecyclingItemId) {
        match self.selected_items.iter().position(|selected| *selected == id) {
            Some(index) => {
                self.selected_items.remove(index);
            }
            None => self.selected_items.push(id),
        }
        self.revalidate();
    }

    pub fn is_item_selected(&self, id: RecyclingItemId) -> bool {
        self.selected_items.contains(&id)
    }

    // ------------------------------------------------------------------
    // Region cascade
    // ------------------------------------------------------------------

    pub fn begin_ufs_load(&mut self) {
        self.ufs = Loadable::Loading;
    }

    pub fn apply_ufs(&mut self, result: Result<Vec<String>, FetchError>) {
        self.ufs = result.into();
    }

    /// Выбор штата.
    ///
    /// Resets the city, discards the current city list and returns the ticket for
    /// the fetch to start. Choosing the placeholder, or the already selected state,
    /// returns `None`.
    pub fn select_uf(&mut self, value: &str) -> Option<CityTicket> {
        let value = value.trim();
        let uf = (!value.is_empty() && value != UF_PLACEHOLDER).then(|| value.to_string());

        if uf == self.selected_uf {
            return None;
        }

        self.selected_uf = uf;
        self.selected_city = None;
        self.city_generation += 1;

        let ticket = match &self.selected_uf {
            Some(uf) => {
                self.cities = Loadable::Loading;
                Some(CityTicket {
                    uf: uf.clone(),
                    generation: self.city_generation,
                })
            }
            None => {
                self.cities = Loadable::Unloaded;
                None
            }
        };
        self.revalidate();
        ticket
    }

    /// Повторный запрос городов после ошибки
    pub fn retry_cities(&mut self) -> Option<CityTicket> {
        let uf = self.selected_uf.clone()?;
        self.city_generation += 1;
        self.cities = Loadable::Loading;
        Some(CityTicket {
            uf,
            generation: self.city_generation,
        })
    }

    /// Applies a city response. Returns `false` when the ticket is stale and the
    /// response was dropped.
    pub fn apply_cities(
        &mut self,
        ticket: &CityTicket,
        result: Result<Vec<String>, FetchError>,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.cities = result.into();
        true
    }

    fn is_current(&self, ticket: &CityTicket) -> bool {
        ticket.generation == self.city_generation
            && self.selected_uf.as_deref() == Some(ticket.uf.as_str())
    }

    /// Выбор города. Returns `false` when the name is not in the loaded list.
    pub fn select_city(&mut self, value: &str) -> bool {
        if value.is_empty() || value == CITY_PLACEHOLDER {
            self.selected_city = None;
            self.revalidate();
            return true;
        }
        let known = self
            .cities
            .loaded()
            .is_some_and(|cities| cities.iter().any(|c| c == value));
        if known {
            self.selected_city = Some(value.to_string());
            self.revalidate();
        }
        known
    }

    // ------------------------------------------------------------------
    // Map & contact
    // ------------------------------------------------------------------

    pub fn set_map_position(&mut self, latitude: f64, longitude: f64) {
        self.selected_position = Some(GeoPosition::new(latitude, longitude));
        self.revalidate();
    }

    pub fn update_contact(&mut self, field: ContactField, value: String) {
        self.contact.set(field, value);
        self.revalidate();
    }

    // ------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------

    /// Снимок данных формы для отправки
    pub fn payload(&self) -> CreatePointDto {
        let position = self.selected_position.unwrap_or(GeoPosition::new(0.0, 0.0));
        CreatePointDto {
            name: self.contact.name.clone(),
            email: self.contact.email.clone(),
            whatsapp: self.contact.whatsapp.clone(),
            uf: self
                .selected_uf
                .clone()
                .unwrap_or_else(|| UF_PLACEHOLDER.to_string()),
            city: self
                .selected_city
                .clone()
                .unwrap_or_else(|| CITY_PLACEHOLDER.to_string()),
            latitude: position.latitude,
            longitude: position.longitude,
            items: self.selected_items.clone(),
        }
    }

    /// Validates and moves into `Submitting`. The returned payload is what must be
    /// posted; nothing is posted when this returns `Err`.
    pub fn begin_submit(&mut self) -> Result<CreatePointDto, SubmitRejected> {
        if self.submission == SubmissionStatus::Submitting {
            return Err(SubmitRejected::InFlight);
        }

        let payload = self.payload();
        if let Err(errors) = payload.validate() {
            self.validation_errors = errors.clone();
            return Err(SubmitRejected::Invalid(errors));
        }

        self.validation_errors.clear();
        self.submission = SubmissionStatus::Submitting;
        Ok(payload)
    }

    /// Returns `true` when the point was created and the page may navigate away.
    pub fn apply_submit_result(&mut self, result: Result<CollectionPointId, SubmissionError>) -> bool {
        match result {
            Ok(_) => {
                self.submission = SubmissionStatus::Idle;
                true
            }
            Err(err) => {
                self.submission = SubmissionStatus::Failed(err);
                false
            }
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submission == SubmissionStatus::Submitting
    }

    pub fn field_errors(&self, field: &str) -> Vec<PointFieldError> {
        self.validation_errors
            .iter()
            .copied()
            .filter(|e| e.field() == field)
            .collect()
    }

    // Field messages shown after a rejected submit follow the form as it changes.
    fn revalidate(&mut self) {
        if self.validation_errors.is_empty() {
            return;
        }
        self.validation_errors = self.payload().validate().err().unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn catalog() -> Vec<RecyclingItem> {
        vec![
            RecyclingItem::new(1, "Lâmpadas", "x"),
            RecyclingItem::new(2, "Pilhas", "y"),
        ]
    }

    fn cities(names: &[&str]) -> Result<Vec<String>, FetchError> {
        Ok(names.iter().map(|s| s.to_string()).collect())
    }

    /// Форма, готовая к отправке
    fn filled_state() -> CreatePointState {
        let mut state = CreatePointState::new();
        state.apply_items(Ok(catalog()));
        state.update_contact(ContactField::Name, "Ecoponto Vila Mariana".into());
        state.update_contact(ContactField::Email, "eco@vilamariana.org".into());
        state.update_contact(ContactField::Whatsapp, "11988887777".into());
        let ticket = state.select_uf("SP").unwrap();
        state.apply_cities(&ticket, cities(&["São Paulo", "Campinas"]));
        assert!(state.select_city("São Paulo"));
        state.set_map_position(-23.5, -46.6);
        state.toggle_item(RecyclingItemId(2));
        state
    }

    #[test]
    fn toggle_sequence_from_catalog_example() {
        let mut state = CreatePointState::new();
        state.apply_items(Ok(catalog()));

        state.toggle_item(RecyclingItemId(1));
        state.toggle_item(RecyclingItemId(2));
        state.toggle_item(RecyclingItemId(1));

        assert_eq!(state.selected_items, vec![RecyclingItemId(2)]);
        assert!(state.is_item_selected(RecyclingItemId(2)));
        assert!(!state.is_item_selected(RecyclingItemId(1)));
    }

    #[test]
    fn toggled_set_equals_ids_toggled_odd_number_of_times() {
        // Deterministic pseudo-random sequences over a small id space.
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        for _ in 0..200 {
            let mut state = CreatePointState::new();
            let mut counts = [0u32; 6];
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            let len = (seed % 40) as usize;
            for _ in 0..len {
                seed ^= seed << 13;
                seed ^= seed >> 7;
                seed ^= seed << 17;
                let id = (seed % 6) as i64;
                counts[id as usize] += 1;
                state.toggle_item(RecyclingItemId(id));
            }

            let expected: BTreeSet<i64> = (0..6).filter(|i| counts[*i as usize] % 2 == 1).collect();
            let actual: BTreeSet<i64> = state.selected_items.iter().map(|id| id.value()).collect();
            assert_eq!(actual, expected);
            assert_eq!(actual.len(), state.selected_items.len(), "duplicates in selection");
        }
    }

    #[test]
    fn update_contact_touches_only_named_field() {
        let mut state = CreatePointState::new();
        state.update_contact(ContactField::Name, "A".into());
        state.update_contact(ContactField::Email, "b@c".into());

        let before = state.contact.clone();
        state.update_contact(ContactField::Whatsapp, "123".into());

        assert_eq!(state.contact.name, before.name);
        assert_eq!(state.contact.email, before.email);
        assert_eq!(state.contact.get(ContactField::Whatsapp), "123");
    }

    #[test]
    fn contact_field_names_match_payload_keys() {
        let payload = serde_json::to_value(CreatePointState::new().payload()).unwrap();
        for field in [ContactField::Name, ContactField::Email, ContactField::Whatsapp] {
            assert!(payload.get(field.name()).is_some(), "{}", field.name());
        }
    }

    #[test]
    fn late_response_for_previous_state_is_dropped() {
        let mut state = CreatePointState::new();
        let sp = state.select_uf("SP").unwrap();
        let rj = state.select_uf("RJ").unwrap();

        assert!(state.apply_cities(&rj, cities(&["Rio de Janeiro", "Niterói"])));
        assert!(!state.apply_cities(&sp, cities(&["São Paulo", "Campinas"])));

        assert_eq!(
            state.cities.loaded().unwrap(),
            &vec!["Rio de Janeiro".to_string(), "Niterói".to_string()]
        );
    }

    #[test]
    fn stale_response_arriving_first_never_shows() {
        let mut state = CreatePointState::new();
        let sp = state.select_uf("SP").unwrap();
        let _rj = state.select_uf("RJ").unwrap();

        assert!(!state.apply_cities(&sp, cities(&["São Paulo"])));
        assert!(state.cities.is_loading());
    }

    #[test]
    fn changing_state_resets_city() {
        let mut state = filled_state();
        assert_eq!(state.selected_city.as_deref(), Some("São Paulo"));

        let ticket = state.select_uf("RJ").unwrap();
        assert_eq!(state.selected_city, None);
        assert!(state.cities.is_loading());
        assert_eq!(ticket.uf, "RJ");
    }

    #[test]
    fn reselecting_same_state_does_not_refetch() {
        let mut state = CreatePointState::new();
        assert!(state.select_uf("SP").is_some());
        assert!(state.select_uf("SP").is_none());
    }

    #[test]
    fn placeholder_state_clears_cascade() {
        let mut state = filled_state();
        assert!(state.select_uf(UF_PLACEHOLDER).is_none());
        assert_eq!(state.selected_uf, None);
        assert_eq!(state.cities, Loadable::Unloaded);
        assert_eq!(state.selected_city, None);
    }

    #[test]
    fn retry_issues_fresh_ticket_and_invalidates_old_one() {
        let mut state = CreatePointState::new();
        let first = state.select_uf("MG").unwrap();
        state.apply_cities(&first, Err(FetchError::Status(502)));
        assert_eq!(state.cities.error(), Some(&FetchError::Status(502)));

        let retry = state.retry_cities().unwrap();
        assert_ne!(retry, first);
        assert!(!state.apply_cities(&first, cities(&["Ouro Preto"])));
        assert!(state.apply_cities(&retry, cities(&["Belo Horizonte"])));
    }

    #[test]
    fn retry_without_state_does_nothing() {
        let mut state = CreatePointState::new();
        assert!(state.retry_cities().is_none());
    }

    #[test]
    fn unknown_city_is_ignored() {
        let mut state = CreatePointState::new();
        let ticket = state.select_uf("SP").unwrap();
        state.apply_cities(&ticket, cities(&["Campinas"]));

        assert!(!state.select_city("Niterói"));
        assert_eq!(state.selected_city, None);
        assert!(state.select_city("Campinas"));
    }

    #[test]
    fn map_click_is_submitted_without_rounding() {
        let mut state = filled_state();
        state.set_map_position(-23.5, -46.6);

        let payload = state.begin_submit().unwrap();
        assert_eq!(payload.latitude, -23.5);
        assert_eq!(payload.longitude, -46.6);
    }

    #[test]
    fn payload_items_match_selection() {
        let mut state = filled_state();
        state.toggle_item(RecyclingItemId(1));

        let payload = state.begin_submit().unwrap();
        assert_eq!(payload.items, state.selected_items);
        assert_eq!(payload.items, vec![RecyclingItemId(2), RecyclingItemId(1)]);
        assert_eq!(payload.uf, "SP");
        assert_eq!(payload.city, "São Paulo");
    }

    #[test]
    fn empty_name_is_rejected_before_posting() {
        let mut state = filled_state();
        state.update_contact(ContactField::Name, String::new());

        let rejected = state.begin_submit().unwrap_err();
        assert_eq!(rejected, SubmitRejected::Invalid(vec![PointFieldError::NameRequired]));
        assert_eq!(state.submission, SubmissionStatus::Idle);
        assert_eq!(state.field_errors("name"), vec![PointFieldError::NameRequired]);
    }

    #[test]
    fn fixing_a_field_clears_its_message() {
        let mut state = filled_state();
        state.update_contact(ContactField::Name, String::new());
        let _ = state.begin_submit();

        state.update_contact(ContactField::Name, "Ecoponto".into());
        assert!(state.validation_errors.is_empty());
    }

    #[test]
    fn untouched_form_reports_every_missing_field() {
        let mut state = CreatePointState::new();
        let Err(SubmitRejected::Invalid(errors)) = state.begin_submit() else {
            panic!("empty form must be rejected");
        };
        assert!(errors.contains(&PointFieldError::UfRequired));
        assert!(errors.contains(&PointFieldError::CityRequired));
        assert!(errors.contains(&PointFieldError::PositionRequired));
        assert!(errors.contains(&PointFieldError::ItemsRequired));
    }

    #[test]
    fn second_submit_while_in_flight_is_rejected() {
        let mut state = filled_state();
        assert!(state.begin_submit().is_ok());
        assert!(state.is_submitting());
        assert_eq!(state.begin_submit(), Err(SubmitRejected::InFlight));
    }

    #[test]
    fn failed_submit_stays_on_page_and_allows_retry() {
        let mut state = filled_state();
        state.begin_submit().unwrap();

        let navigate = state.apply_submit_result(Err(SubmissionError::Server(500, "db".into())));
        assert!(!navigate);
        assert_eq!(
            state.submission,
            SubmissionStatus::Failed(SubmissionError::Server(500, "db".into()))
        );
        assert!(state.begin_submit().is_ok());
    }

    #[test]
    fn successful_submit_allows_navigation() {
        let mut state = filled_state();
        state.begin_submit().unwrap();
        assert!(state.apply_submit_result(Ok(CollectionPointId(10))));
        assert!(!state.is_submitting());
    }

    #[test]
    fn map_center_falls_back_when_location_fails() {
        let mut state = CreatePointState::new();
        assert_eq!(state.map_center(), DEFAULT_MAP_CENTER);

        state.begin_locate();
        state.apply_location(Err(GeolocationError::Denied));
        assert_eq!(state.map_center(), DEFAULT_MAP_CENTER);
        assert_eq!(state.location.error(), Some(&GeolocationError::Denied));

        state.begin_locate();
        state.apply_location(Ok(GeoPosition::new(-22.9, -43.2)));
        assert_eq!(state.map_center(), GeoPosition::new(-22.9, -43.2));
    }

    #[test]
    fn catalog_reload_drops_vanished_selection() {
        let mut state = CreatePointState::new();
        state.apply_items(Ok(catalog()));
        state.toggle_item(RecyclingItemId(1));
        state.toggle_item(RecyclingItemId(2));

        state.apply_items(Ok(vec![RecyclingItem::new(2, "Pilhas", "y")]));
        assert_eq!(state.selected_items, vec![RecyclingItemId(2)]);
    }

    #[test]
    fn failed_catalog_keeps_error_visible() {
        let mut state = CreatePointState::new();
        state.begin_items_load();
        state.apply_items(Err(FetchError::Network("offline".into())));
        assert_eq!(state.items.error(), Some(&FetchError::Network("offline".into())));
    }
}
