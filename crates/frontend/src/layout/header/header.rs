use crate::shared::icons::icon;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn PageHeader(#[prop(optional)] back_link: bool) -> impl IntoView {
    view! {
        <header data-zone="header" class="header">
            <div class="header__content">
                {icon("recycle")}
                <span class="header__title">"Ecoleta"</span>
            </div>
            <Show when=move || back_link>
                <div class="header__actions">
                    <A href="/">
                        {icon("arrow-left")}
                        "Voltar para home"
                    </A>
                </div>
            </Show>
        </header>
    }
}
