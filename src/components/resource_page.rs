//! Resource Page Component
//!
//! One CRUD screen for any record type: load the list, filter and page it in
//! memory, add/edit/view through the modal and soft delete from the table.

use std::marker::PhantomData;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{DataTable, ListToolbar, ModalMode, ModalState, Pager, RecordModal};
use crate::context::use_app_context;
use crate::models::Record;
use crate::paginate::{category_options, ListQuery};
use crate::toast::Notifier;

/// `R` picks the screen; the marker carries it since no other prop does
#[component]
pub fn ResourcePage<R: Record>(#[prop(optional)] marker: PhantomData<R>) -> impl IntoView {
    let _ = marker;
    let ctx = use_app_context();

    let records = RwSignal::new(Vec::<R>::new());
    let query = RwSignal::new(ListQuery::new(ctx.config().default_page_size));
    let modal = RwSignal::new(None::<ModalState>);
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let reload = move || set_reload_trigger.update(|n| *n += 1);

    // Load on mount and after every change
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        log::debug!("[APP] Loading {}, trigger={}", R::RESOURCE, trigger);
        let api = ctx.api();
        ctx.session.begin_navigation();
        spawn_local(async move {
            match api.list::<R>().await {
                Ok(loaded) => records.set(loaded),
                Err(err) => ctx.report(&err, &format!("Failed to load {}", R::PLURAL.to_lowercase())),
            }
            ctx.session.end_navigation();
        });
    });

    let window = Memo::new(move |_| query.with(|q| records.with(|r| q.apply(r))));
    let rows = Signal::derive(move || window.with(|w| w.rows.clone()));
    let first_row = Signal::derive(move || window.with(|w| w.start));
    let categories = Signal::derive(move || records.with(|r| category_options(r)));

    let on_add = Callback::new(move |_: ()| modal.set(Some(ModalState::add::<R>())));
    let on_view = Callback::new(move |record: R| modal.set(Some(ModalState::open(ModalMode::View, &record))));
    let on_edit = Callback::new(move |record: R| modal.set(Some(ModalState::open(ModalMode::Edit, &record))));
    let on_saved = Callback::new(move |_: R| reload());

    let on_delete = Callback::new(move |record: R| {
        let api = ctx.api();
        spawn_local(async move {
            match api.soft_delete::<R>(record.id()).await {
                Ok(reply) => {
                    let message = reply
                        .message()
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("{} deleted successfully", R::SINGULAR));
                    ctx.toasts.success(&message);
                    reload();
                }
                Err(err) => ctx.report(&err, &format!("Failed to delete {}", R::SINGULAR.to_lowercase())),
            }
        });
    });

    view! {
        <section class="resource-page">
            <header class="page-header">
                <h1>{R::PLURAL}</h1>
                <span class="page-count">{move || records.with(|r| format!("{} total", r.len()))}</span>
            </header>
            <ListToolbar
                query=query
                categories=categories
                category_label=R::category_label()
                date_label=R::date_label()
                add_label=format!("Add {}", R::SINGULAR)
                on_add=on_add
            />
            <DataTable<R> rows=rows first_row=first_row on_view=on_view on_edit=on_edit on_delete=on_delete />
            <Pager<R> window=window query=query />
            <RecordModal<R> state=modal on_saved=on_saved />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, Sale};

    #[test]
    fn test_record_type_alone_selects_page() {
        let customers = ResourcePageProps::<Customer>::builder().build();
        let sales = ResourcePageProps::<Sale>::builder().build();
        assert_eq!(customers.marker, PhantomData::<Customer>);
        assert_eq!(sales.marker, PhantomData::<Sale>);
    }
}
