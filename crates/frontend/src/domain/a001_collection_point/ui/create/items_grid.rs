use super::view_model::CreatePointVm;
use contracts::domain::a002_recycling_item::aggregate::RecyclingItem;
use leptos::prelude::*;

/// Сетка категорий материалов с выбором по клику
#[component]
pub fn ItemsGrid(vm: CreatePointVm, items: Vec<RecyclingItem>) -> impl IntoView {
    view! {
        <ul class="items-grid">
            {items
                .into_iter()
                .map(|item| {
                    let id = item.id;
                    let alt = item.title.clone();
                    view! {
                        <li
                            class:selected=move || vm.state.with(|s| s.is_item_selected(id))
                            on:click=move |_| vm.toggle_item(id)
                        >
                            <img src=item.image_url alt=alt />
                            <span>{item.title}</span>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
}
