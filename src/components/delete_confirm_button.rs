//! Delete Confirm Button Component

use leptos::prelude::*;

/// Confirmation line naming what is about to go
pub fn confirm_prompt(kind: &str, name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        format!("Delete this {}?", kind)
    } else {
        format!("Delete {} \"{}\"?", kind, name)
    }
}

/// Row-level delete that asks once, inline, before `on_confirm` runs
#[component]
pub fn DeleteConfirmButton(
    /// Record kind, lowercase, e.g. `customer`
    #[prop(into)] kind: String,
    /// Display name of the record
    #[prop(into)] name: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let armed = RwSignal::new(false);
    let prompt = confirm_prompt(&kind, &name);

    move || {
        if !armed.get() {
            return view! {
                <button
                    class="row-btn danger"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        armed.set(true);
                    }
                >
                    "Delete"
                </button>
            }
            .into_any();
        }

        view! {
            <span class="delete-confirm">
                <span class="delete-confirm-text">{prompt.clone()}</span>
                <button
                    class="confirm-btn"
                    title="Yes, delete"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        armed.set(false);
                        on_confirm.run(());
                    }
                >
                    "Yes"
                </button>
                <button
                    class="cancel-btn"
                    title="Keep it"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        armed.set(false);
                    }
                >
                    "No"
                </button>
            </span>
        }
        .into_any()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_record() {
        assert_eq!(confirm_prompt("customer", "Acme Ltd"), "Delete customer \"Acme Ltd\"?");
    }

    #[test]
    fn test_prompt_without_name() {
        assert_eq!(confirm_prompt("todo", "  "), "Delete this todo?");
    }
}
