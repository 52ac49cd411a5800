//! Record Modal Component
//!
//! Add/edit/view dialog for one record. Fields come from the record type's
//! field specs; the draft is validated before anything is sent.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::form::{validate_draft, Draft, FieldKind, FieldSpec};
use crate::models::Record;
use crate::toast::Notifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    Add,
    Edit,
    View,
}

/// Open dialog: mode, id of the record (empty when adding) and its draft
#[derive(Debug, Clone, PartialEq)]
pub struct ModalState {
    pub mode: ModalMode,
    pub id: String,
    pub draft: Draft,
}

impl ModalState {
    pub fn add<R: Record>() -> Self {
        Self { mode: ModalMode::Add, id: String::new(), draft: Draft::blank(R::fields()) }
    }

    pub fn open<R: Record>(mode: ModalMode, record: &R) -> Self {
        Self { mode, id: record.id().to_string(), draft: record.to_draft() }
    }

    pub fn title(&self, singular: &str) -> String {
        match self.mode {
            ModalMode::Add => format!("Add {}", singular),
            ModalMode::Edit => format!("Edit {}", singular),
            ModalMode::View => format!("{} details", singular),
        }
    }
}

/// Modal dialog bound to `state`; None means closed
#[component]
pub fn RecordModal<R: Record>(
    state: RwSignal<Option<ModalState>>,
    /// Runs with the record that was sent, after the backend accepted it
    #[prop(into)] on_saved: Callback<R>,
) -> impl IntoView {
    let ctx = use_app_context();
    let (saving, set_saving) = signal(false);

    // Re-render the form only when it opens or changes mode, not per keystroke
    let opened = Memo::new(move |_| state.with(|s| s.as_ref().map(|s| (s.mode, s.title(R::SINGULAR)))));

    let close = move || state.set(None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(current) = state.get_untracked() else { return };
        if current.mode == ModalMode::View || saving.get_untracked() {
            return;
        }

        let parsed = validate_draft(R::fields(), &current.draft).and_then(|_| R::from_draft(&current.id, &current.draft));
        let record = match parsed {
            Ok(record) => record,
            Err(err) => {
                log::warn!("[FORM] {} rejected: {}", R::SINGULAR, err);
                ctx.toasts.error(&err.to_string());
                return;
            }
        };

        let api = ctx.api();
        let verb = if current.mode == ModalMode::Add { "created" } else { "updated" };
        set_saving.set(true);
        spawn_local(async move {
            match api.save(&record).await {
                Ok(reply) => {
                    let message = reply
                        .message()
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("{} {} successfully", R::SINGULAR, verb));
                    ctx.toasts.success(&message);
                    state.set(None);
                    on_saved.run(record);
                }
                Err(err) => ctx.report(&err, &format!("Failed to save {}", R::SINGULAR.to_lowercase())),
            }
            set_saving.set(false);
        });
    };

    move || {
        opened.get().map(|(mode, title)| {
            let read_only = mode == ModalMode::View;
            let fields = R::fields().iter().map(|field| {
                let key = field.key;
                let value = Signal::derive(move || {
                    state.with(|s| s.as_ref().map(|s| s.draft.raw(key).to_string()).unwrap_or_default())
                });
                let on_change = Callback::new(move |value: String| {
                    state.update(|s| {
                        if let Some(s) = s {
                            s.draft.set(key, value);
                        }
                    });
                });
                view! { <FieldInput field=*field value=value read_only=read_only on_change=on_change /> }
            }).collect_view();

            view! {
                <div class="modal-backdrop" on:click=move |_| close()>
                    <form class="modal" on:submit=on_submit on:click=|ev| ev.stop_propagation()>
                        <div class="modal-header">
                            <h2>{title}</h2>
                            <button type="button" class="modal-close" on:click=move |_| close()>"×"</button>
                        </div>
                        <div class="modal-body">{fields}</div>
                        <div class="modal-footer">
                            {if read_only {
                                view! {
                                    <button
                                        type="button"
                                        class="secondary-btn"
                                        on:click=move |_| state.update(|s| {
                                            if let Some(s) = s {
                                                s.mode = ModalMode::Edit;
                                            }
                                        })
                                    >
                                        "Edit"
                                    </button>
                                }.into_any()
                            } else {
                                view! {
                                    <button type="submit" class="primary-btn" disabled=move || saving.get()>
                                        {move || if saving.get() { "Saving..." } else { "Save" }}
                                    </button>
                                }.into_any()
                            }}
                            <button type="button" class="secondary-btn" on:click=move |_| close()>"Close"</button>
                        </div>
                    </form>
                </div>
            }
        })
    }
}

/// One labelled input, widget chosen by field kind
#[component]
fn FieldInput(
    field: FieldSpec,
    value: Signal<String>,
    read_only: bool,
    on_change: Callback<String>,
) -> impl IntoView {
    let input = match field.kind {
        FieldKind::TextArea => view! {
            <textarea
                rows="3"
                disabled=read_only
                prop:value=move || value.get()
                on:input=move |ev| on_change.run(event_target_value(&ev))
            />
        }
        .into_any(),
        FieldKind::Checkbox => view! {
            <input
                type="checkbox"
                disabled=read_only
                prop:checked=move || value.with(|v| v == "true")
                on:change=move |ev| on_change.run(event_target_checked(&ev).to_string())
            />
        }
        .into_any(),
        FieldKind::Select(options) => view! {
            <select disabled=read_only on:change=move |ev| on_change.run(event_target_value(&ev))>
                {options.iter().map(|&(option, label)| {
                    view! {
                        <option value=option prop:selected=move || value.with(|v| v == option)>{label}</option>
                    }
                }).collect_view()}
            </select>
        }
        .into_any(),
        kind => {
            let input_type = match kind {
                FieldKind::Email => "email",
                FieldKind::Password => "password",
                FieldKind::Number => "number",
                FieldKind::Date => "date",
                _ => "text",
            };
            view! {
                <input
                    type=input_type
                    disabled=read_only
                    prop:value=move || value.get()
                    on:input=move |ev| on_change.run(event_target_value(&ev))
                />
            }
            .into_any()
        }
    };

    view! {
        <label class="form-field">
            <span class="form-label">
                {field.label}
                {field.required.then_some(view! { <span class="required">"*"</span> })}
            </span>
            {input}
        </label>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, Todo};

    fn todo() -> Todo {
        Todo {
            id: "t1".into(),
            title: "Call bank".into(),
            description: None,
            priority: Priority::High,
            due_date: None,
            completed: false,
        }
    }

    #[test]
    fn test_add_starts_blank() {
        let state = ModalState::add::<Todo>();
        assert_eq!(state.mode, ModalMode::Add);
        assert!(state.id.is_empty());
        assert_eq!(state.draft.get("priority"), "low");
        assert_eq!(state.title("Todo"), "Add Todo");
    }

    #[test]
    fn test_open_carries_record() {
        let state = ModalState::open(ModalMode::View, &todo());
        assert_eq!(state.id, "t1");
        assert_eq!(state.draft.get("title"), "Call bank");
        assert_eq!(state.title("Todo"), "Todo details");
    }
}
