use crate::domain::a001_collection_point::ui::create::CreatePointPage;
use crate::system::pages::home::HomePage;
use crate::system::pages::not_found::NotFoundPage;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <NotFoundPage /> }>
                <Route path=path!("/") view=HomePage />
                <Route path=path!("/create-point") view=CreatePointPage />
            </Routes>
        </Router>
    }
}
