use super::items_grid::ItemsGrid;
use super::map::LocationPicker;
use super::state::{ContactField, SubmissionStatus};
use super::view_model::CreatePointVm;
use crate::layout::header::PageHeader;
use crate::shared::geolocation::GeoPosition;
use crate::shared::icons::icon;
use crate::shared::state::Loadable;
use contracts::domain::a001_collection_point::aggregate::{CITY_PLACEHOLDER, UF_PLACEHOLDER};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use thaw::*;

#[component]
pub fn CreatePointPage() -> impl IntoView {
    let vm = CreatePointVm::new();
    vm.init();

    let navigate = use_navigate();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let navigate = navigate.clone();
        vm.submit(move || navigate("/", Default::default()));
    };

    let is_submitting = Memo::new(move |_| vm.state.with(|s| s.is_submitting()));

    view! {
        <div id="page-create-point">
            <PageHeader back_link=true />

            <form on:submit=on_submit>
                <h1>"Cadastro do ponto de coleta"</h1>

                <fieldset>
                    <legend>
                        <h2>"Dados"</h2>
                    </legend>

                    <ContactInput vm=vm field=ContactField::Name label="Nome da entidade" />

                    <div class="field-group">
                        <ContactInput vm=vm field=ContactField::Email label="E-mail" />
                        <ContactInput vm=vm field=ContactField::Whatsapp label="Whatsapp" />
                    </div>
                </fieldset>

                <fieldset>
                    <legend>
                        <h2>"Endereço"</h2>
                        <span>"Selecione o endereço no mapa"</span>
                    </legend>

                    <LocationSection vm=vm />
                    <RegionSection vm=vm />
                </fieldset>

                <fieldset>
                    <legend>
                        <h2>"Ítens de coleta"</h2>
                        <span>"Selecione um ou mais ítens abaixo"</span>
                    </legend>

                    <ItemsSection vm=vm />
                    <FieldErrors vm=vm field="items" />
                </fieldset>

                <SubmissionNotice vm=vm />

                <button type="submit" class="btn btn-primary" disabled=move || is_submitting.get()>
                    {move || {
                        if is_submitting.get() {
                            view! { <Spinner size=SpinnerSize::Tiny /> "Cadastrando..." }.into_any()
                        } else {
                            view! { "Cadastrar ponto de coleta" }.into_any()
                        }
                    }}
                </button>
            </form>
        </div>
    }
}

#[component]
fn ContactInput(vm: CreatePointVm, field: ContactField, label: &'static str) -> impl IntoView {
    view! {
        <div class="field">
            <label for=field.name()>{label}</label>
            <input
                type="text"
                name=field.name()
                id=field.name()
                prop:value=move || vm.state.with(|s| s.contact.get(field).to_string())
                on:input=move |ev| vm.update_contact(field, event_target_value(&ev))
            />
            <FieldErrors vm=vm field=field.name() />
        </div>
    }
}

/// Сообщения валидации для одного поля
#[component]
fn FieldErrors(vm: CreatePointVm, field: &'static str) -> impl IntoView {
    let errors = Memo::new(move |_| vm.state.with(|s| s.field_errors(field)));
    move || {
        errors
            .get()
            .into_iter()
            .map(|e| view! { <span class="field__error">{e.message()}</span> })
            .collect_view()
    }
}

/// Ошибка загрузки ресурса с кнопкой повтора
#[component]
fn LoadFailed(message: String, on_retry: Callback<()>) -> impl IntoView {
    view! {
        <MessageBar intent=MessageBarIntent::Error>
            <div class="load-failed">
                <span>{message}</span>
                <Button
                    appearance=ButtonAppearance::Transparent
                    size=ButtonSize::Small
                    on_click=move |_| on_retry.run(())
                >
                    {icon("refresh")}
                    "Tentar novamente"
                </Button>
            </div>
        </MessageBar>
    }
}

#[component]
fn LocationSection(vm: CreatePointVm) -> impl IntoView {
    let center = Memo::new(move |_| vm.state.with(|s| s.map_center()));
    let selected = Memo::new(move |_| vm.state.with(|s| s.selected_position));
    let location = Memo::new(move |_| vm.state.with(|s| s.location.clone()));

    view! {
        {move || match location.get() {
            Loadable::Loading => view! {
                <div class="location-status">
                    <Spinner size=SpinnerSize::Tiny />
                    <span>"Obtendo sua localização..."</span>
                </div>
            }.into_any(),
            Loadable::Failed(e) => view! {
                <MessageBar intent=MessageBarIntent::Warning>
                    <div class="load-failed">
                        <span>{format!("{}. O mapa foi centralizado em São Paulo.", e)}</span>
                        <Button
                            appearance=ButtonAppearance::Transparent
                            size=ButtonSize::Small
                            on_click=move |_| vm.locate()
                        >
                            {icon("refresh")}
                            "Tentar novamente"
                        </Button>
                    </div>
                </MessageBar>
            }.into_any(),
            Loadable::Unloaded | Loadable::Loaded(_) => ().into_any(),
        }}

        <LocationPicker
            center=center
            selected=selected
            on_pick=Callback::new(move |p: GeoPosition| vm.set_map_position(p))
        />
        <FieldErrors vm=vm field="position" />
    }
}

#[component]
fn RegionSection(vm: CreatePointVm) -> impl IntoView {
    let ufs = Memo::new(move |_| vm.state.with(|s| s.ufs.clone()));
    let cities = Memo::new(move |_| vm.state.with(|s| s.cities.clone()));

    view! {
        <div class="field-group">
            <div class="field">
                <label for="uf">"Estado (UF)"</label>
                <select
                    name="uf"
                    id="uf"
                    prop:value=move || vm.state.with(|s| {
                        s.selected_uf.clone().unwrap_or_else(|| UF_PLACEHOLDER.to_string())
                    })
                    on:change=move |ev| vm.select_uf(event_target_value(&ev))
                >
                    <option value=UF_PLACEHOLDER>"Selecione uma UF"</option>
                    {move || {
                        ufs.get()
                            .loaded()
                            .cloned()
                            .unwrap_or_default()
                            .into_iter()
                            .map(|uf| view! { <option value=uf.clone()>{uf.clone()}</option> })
                            .collect_view()
                    }}
                </select>
                <FieldErrors vm=vm field="uf" />
            </div>

            <div class="field">
                <label for="city">"Cidade"</label>
                <select
                    name="city"
                    id="city"
                    disabled=move || cities.with(|c| c.loaded().is_none())
                    prop:value=move || vm.state.with(|s| {
                        s.selected_city.clone().unwrap_or_else(|| CITY_PLACEHOLDER.to_string())
                    })
                    on:change=move |ev| vm.select_city(event_target_value(&ev))
                >
                    <option value=CITY_PLACEHOLDER>
                        {move || if cities.with(|c| c.is_loading()) {
                            "Carregando cidades..."
                        } else {
                            "Selecione uma cidade"
                        }}
                    </option>
                    {move || {
                        cities
                            .get()
                            .loaded()
                            .cloned()
                            .unwrap_or_default()
                            .into_iter()
                            .map(|city| view! { <option value=city.clone()>{city.clone()}</option> })
                            .collect_view()
                    }}
                </select>
                <FieldErrors vm=vm field="city" />
            </div>
        </div>

        {move || ufs.get().error().map(|e| view! {
            <LoadFailed
                message=format!("Não foi possível carregar as UFs. {}", e)
                on_retry=Callback::new(move |_| vm.load_ufs())
            />
        })}
        {move || cities.get().error().map(|e| view! {
            <LoadFailed
                message=format!("Não foi possível carregar as cidades. {}", e)
                on_retry=Callback::new(move |_| vm.retry_cities())
            />
        })}
    }
}

#[component]
fn ItemsSection(vm: CreatePointVm) -> impl IntoView {
    let items = Memo::new(move |_| vm.state.with(|s| s.items.clone()));

    move || match items.get() {
        Loadable::Unloaded | Loadable::Loading => view! {
            <div class="items-loading">
                <Spinner size=SpinnerSize::Small />
            </div>
        }
        .into_any(),
        Loadable::Loaded(list) => view! { <ItemsGrid vm=vm items=list /> }.into_any(),
        Loadable::Failed(e) => view! {
            <LoadFailed
                message=format!("Não foi possível carregar os ítens de coleta. {}", e)
                on_retry=Callback::new(move |_| vm.load_items())
            />
        }
        .into_any(),
    }
}

#[component]
fn SubmissionNotice(vm: CreatePointVm) -> impl IntoView {
    let submission = Memo::new(move |_| vm.state.with(|s| s.submission.clone()));
    let invalid_count = Memo::new(move |_| vm.state.with(|s| s.validation_errors.len()));

    view! {
        {move || match submission.get() {
            SubmissionStatus::Failed(e) => Some(view! {
                <MessageBar intent=MessageBarIntent::Error>
                    {e.to_string()}
                </MessageBar>
            }),
            SubmissionStatus::Idle | SubmissionStatus::Submitting => None,
        }}
        {move || (invalid_count.get() > 0).then(|| view! {
            <MessageBar intent=MessageBarIntent::Warning>
                "Revise os campos destacados antes de cadastrar."
            </MessageBar>
        })}
    }
}
