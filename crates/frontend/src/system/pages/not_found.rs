use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="page-not-found">
            <h1>"Página não encontrada"</h1>
            <A href="/">"Voltar para home"</A>
        </div>
    }
}
