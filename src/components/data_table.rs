//! Data Table Components
//!
//! Table body, filter toolbar and pager shared by every list page.

use leptos::prelude::*;

use crate::components::DeleteConfirmButton;
use crate::config::PAGE_SIZE_OPTIONS;
use crate::form::{format_date, parse_date};
use crate::models::Record;
use crate::paginate::{ListQuery, PageWindow};

/// Current page of records with view/edit/delete actions per row
#[component]
pub fn DataTable<R: Record>(
    #[prop(into)] rows: Signal<Vec<R>>,
    /// 1-based number of the first row
    #[prop(into)] first_row: Signal<usize>,
    #[prop(into)] on_view: Callback<R>,
    #[prop(into)] on_edit: Callback<R>,
    #[prop(into)] on_delete: Callback<R>,
) -> impl IntoView {
    let colspan = (R::columns().len() + 2).to_string();

    view! {
        <table class="data-table">
            <thead>
                <tr>
                    <th class="row-number">"#"</th>
                    {R::columns().iter().map(|column| view! { <th>{*column}</th> }).collect_view()}
                    <th class="row-actions">"Actions"</th>
                </tr>
            </thead>
            <tbody>
                <Show when=move || rows.with(|r| r.is_empty())>
                    <tr class="empty-row">
                        <td colspan=colspan.clone()>"No records found"</td>
                    </tr>
                </Show>
                <For
                    each=move || rows.get().into_iter().enumerate()
                    // Cells in the key so an edited record re-renders
                    key=|(index, record)| (*index, record.id().to_string(), record.cells())
                    children=move |(index, record)| {
                        let cells = record.cells();
                        let viewed = record.clone();
                        let edited = record.clone();
                        let deleted = record.clone();
                        view! {
                            <tr>
                                <td class="row-number">{move || first_row.get() + index}</td>
                                {cells.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
                                <td class="row-actions">
                                    <button class="row-btn" on:click=move |_| on_view.run(viewed.clone())>"View"</button>
                                    <button class="row-btn" on:click=move |_| on_edit.run(edited.clone())>"Edit"</button>
                                    <DeleteConfirmButton
                                        kind=R::SINGULAR.to_lowercase()
                                        name=record.display_name()
                                        on_confirm=move |_: ()| on_delete.run(deleted.clone())
                                    />
                                </td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
    }
}

/// Search box, optional category and date filters, page size and add button
#[component]
pub fn ListToolbar(
    query: RwSignal<ListQuery>,
    #[prop(into)] categories: Signal<Vec<String>>,
    category_label: Option<&'static str>,
    date_label: Option<&'static str>,
    #[prop(into)] add_label: String,
    #[prop(into)] on_add: Callback<()>,
) -> impl IntoView {
    let category_filter = category_label.map(|label| {
        view! {
            <label class="filter">
                <span>{label}</span>
                <select on:change=move |ev| {
                    let value = event_target_value(&ev);
                    query.update(|q| q.set_category(Some(value)));
                }>
                    <option value="" prop:selected=move || query.with(|q| q.category.is_none())>"All"</option>
                    <For
                        each=move || categories.get()
                        key=|category| category.clone()
                        children=move |category| {
                            let value = category.clone();
                            let selected = move || query.with(|q| q.category.as_deref() == Some(value.as_str()));
                            view! { <option value=category.clone() prop:selected=selected>{category.clone()}</option> }
                        }
                    />
                </select>
            </label>
        }
    });

    let date_filter = date_label.map(|label| {
        view! {
            <label class="filter">
                <span>{label}" from"</span>
                <input
                    type="date"
                    prop:value=move || query.with(|q| format_date(q.date_from))
                    on:change=move |ev| {
                        let from = parse_date(&event_target_value(&ev));
                        query.update(|q| q.set_date_range(from, q.date_to));
                    }
                />
            </label>
            <label class="filter">
                <span>"to"</span>
                <input
                    type="date"
                    prop:value=move || query.with(|q| format_date(q.date_to))
                    on:change=move |ev| {
                        let to = parse_date(&event_target_value(&ev));
                        query.update(|q| q.set_date_range(q.date_from, to));
                    }
                />
            </label>
        }
    });

    view! {
        <div class="list-toolbar">
            <input
                type="search"
                class="search-input"
                placeholder="Search..."
                prop:value=move || query.with(|q| q.search.clone())
                on:input=move |ev| query.update(|q| q.set_search(event_target_value(&ev)))
            />
            {category_filter}
            {date_filter}
            <button class="clear-btn" on:click=move |_| query.update(|q| q.clear_filters())>"Clear"</button>
            <label class="filter">
                <span>"Rows"</span>
                <select on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                        query.update(|q| q.set_page_size(size));
                    }
                }>
                    {PAGE_SIZE_OPTIONS.iter().map(|&size| {
                        view! {
                            <option value=size.to_string() prop:selected=move || query.with(|q| q.page_size == size)>
                                {size}
                            </option>
                        }
                    }).collect_view()}
                </select>
            </label>
            <button class="add-btn" on:click=move |_| on_add.run(())>{add_label}</button>
        </div>
    }
}

/// "Showing a–b of n" with previous/next
#[component]
pub fn Pager<R: Record>(window: Memo<PageWindow<R>>, query: RwSignal<ListQuery>) -> impl IntoView {
    // Step from the clamped page, not the requested one
    let prev = move |_: web_sys::MouseEvent| {
        let (page, pages) = window.with(|w| (w.page, w.total_pages));
        query.update(|q| q.go_to(page.saturating_sub(1), pages));
    };
    let next = move |_: web_sys::MouseEvent| {
        let (page, pages) = window.with(|w| (w.page, w.total_pages));
        query.update(|q| q.go_to(page + 1, pages));
    };

    view! {
        <div class="pager">
            <span class="pager-summary">
                {move || window.with(|w| format!("Showing {}–{} of {}", w.start, w.end, w.total))}
            </span>
            <button class="pager-btn" disabled=move || window.with(|w| w.page <= 1) on:click=prev>"Prev"</button>
            <span class="pager-page">
                {move || window.with(|w| format!("Page {} of {}", w.page, w.total_pages))}
            </span>
            <button class="pager-btn" disabled=move || window.with(|w| w.page >= w.total_pages) on:click=next>"Next"</button>
        </div>
    }
}
