//! Project Board Component
//!
//! Kanban view of projects, one column per status.
//! Uses leptos-dragdrop: dropping a card into another column moves the project
//! there at once and syncs the new status in the background.

use leptos::prelude::*;
use leptos::task::spawn_local;

use leptos_dragdrop::*;

use crate::board::{drop_project, Board, BoardDrop};
use crate::context::use_app_context;
use crate::form::format_date;
use crate::models::{Project, ProjectStatus};

#[component]
pub fn ProjectBoard() -> impl IntoView {
    let ctx = use_app_context();
    let board = RwSignal::new(Board::default());
    let (reload_trigger, set_reload_trigger) = signal(0u32);

    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        log::debug!("[BOARD] Loading projects, trigger={}", trigger);
        let api = ctx.api();
        ctx.session.begin_navigation();
        spawn_local(async move {
            match api.list::<Project>().await {
                Ok(loaded) => {
                    board.try_update(|b| b.replace(loaded));
                }
                Err(err) => ctx.report(&err, "Failed to load projects"),
            }
            ctx.session.end_navigation();
        });
    });

    let dnd = create_dnd_signals::<String, ProjectStatus>();
    bind_global_mouseup(dnd, move |drop: BoardDrop| {
        let api = ctx.api();
        let toasts = ctx.toasts;
        spawn_local(async move {
            let Some(outcome) = drop_project(&board, &api, &toasts, &drop).await else { return };
            log::debug!("[BOARD] #{} settled: {:?}", outcome.pending.ticket, outcome.settlement);
            // The failure toast is already up; an expired token also ends the session
            if outcome.error.is_some_and(|err| err.is_unauthorized()) {
                ctx.session.sign_out();
            }
        });
    });

    let syncing = move || board.with(|b| b.pending_count());

    view! {
        <section class="board-page">
            <header class="page-header">
                <h1>"Project Board"</h1>
                <Show when=move || { syncing() > 0 }>
                    <span class="board-syncing">{move || format!("Syncing {}...", syncing())}</span>
                </Show>
                <button class="secondary-btn" on:click=move |_| set_reload_trigger.update(|n| *n += 1)>
                    "Reload"
                </button>
            </header>
            <div class="board-columns">
                {ProjectStatus::ALL
                    .iter()
                    .map(|&status| view! { <BoardColumn board=board dnd=dnd status=status /> })
                    .collect_view()}
            </div>
        </section>
    }
}

/// One status column with its cards
#[component]
fn BoardColumn(
    board: RwSignal<Board>,
    dnd: DndSignals<String, ProjectStatus>,
    status: ProjectStatus,
) -> impl IntoView {
    let cards = move || board.with(|b| b.column(status));
    let count = move || board.with(|b| b.column(status).len());

    // Entering the column targets its tail; cards narrow it to a position
    let on_mouseenter = move |ev: web_sys::MouseEvent| {
        let tail = board.with_untracked(|b| b.column(status).len());
        make_on_slot_mouseenter(dnd, DropSlot::new(status, tail))(ev)
    };
    let on_mouseleave = make_on_mouseleave(dnd);

    let is_drop_target = move || {
        matches!(dnd.hover_read.get(), Some(slot) if slot.column == status)
            && dnd.dragging_id_read.with(|d| d.is_some())
    };
    let column_class = move || {
        let mut c = format!("board-column column-{}", status.column_index());
        if is_drop_target() { c.push_str(" drop-target"); }
        c
    };

    view! {
        <div class=column_class on:mouseenter=on_mouseenter on:mouseleave=on_mouseleave>
            <div class="board-column-header">
                <span class="board-column-title">{status.label()}</span>
                <span class="board-column-count">{count}</span>
            </div>
            <div class="board-column-body">
                <For
                    each=move || cards().into_iter().enumerate()
                    key=|(index, project)| (*index, project.id.clone(), project.name.clone(), project.status)
                    children=move |(index, project)| {
                        let id = project.id.clone();
                        let dragged_id = id.clone();
                        let syncing_id = id.clone();
                        let slot = DropSlot::new(status, index);

                        let on_mousedown = make_on_mousedown(dnd, id.clone(), slot);
                        let on_card_enter = make_on_slot_mouseenter(dnd, slot);

                        let is_dragging = move || dnd.dragging_id_read.with(|d| d.as_deref() == Some(dragged_id.as_str()));
                        let is_syncing = move || board.with(|b| b.is_syncing(&syncing_id));
                        let card_class = move || {
                            let mut c = String::from("board-card");
                            if is_dragging() { c.push_str(" dragging"); }
                            if is_syncing() { c.push_str(" syncing"); }
                            c
                        };

                        let dates = match (project.start_date, project.end_date) {
                            (None, None) => None,
                            (start, end) => Some(format!("{} → {}", format_date(start), format_date(end))),
                        };

                        view! {
                            <div class=card_class on:mousedown=on_mousedown on:mouseenter=on_card_enter>
                                <div class="board-card-title">{project.name.clone()}</div>
                                {project.client.clone().map(|client| view! { <div class="board-card-client">{client}</div> })}
                                {dates.map(|d| view! { <div class="board-card-dates">{d}</div> })}
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}
