use leptos::prelude::*;
use thaw::*;

/// Record waiting for the user to confirm its removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: String,
    pub label: String,
}

impl PendingDelete {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Question shown in the dialog, e.g. `Delete store "Tech Gadgets"?`
    pub fn prompt(&self, kind: &str) -> String {
        if self.label.trim().is_empty() {
            format!("Delete {} '{}'? This cannot be undone.", kind, self.id)
        } else {
            format!("Delete {} \"{}\"? This cannot be undone.", kind, self.label)
        }
    }
}

/// Модальное подтверждение необратимого действия
#[component]
pub fn ConfirmDialog(
    #[prop(into)] title: String,
    #[prop(into)] message: String,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
    #[prop(optional, into)] confirm_label: Option<String>,
) -> impl IntoView {
    let confirm_label = confirm_label.unwrap_or_else(|| "Delete".to_string());
    view! {
        <div class="modal-overlay">
            <div class="modal">
                <div class="modal__header">
                    <h2>{title}</h2>
                </div>
                <div class="modal__body">
                    <p>{message}</p>
                </div>
                <div class="modal__footer">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                        "Cancel"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| on_confirm.run(())>
                        {confirm_label}
                    </Button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_the_record() {
        let pending = PendingDelete::new("s1", "Tech Gadgets");
        assert_eq!(
            pending.prompt("store"),
            "Delete store \"Tech Gadgets\"? This cannot be undone."
        );
        assert_eq!(
            PendingDelete::new("a7", " ").prompt("admin"),
            "Delete admin 'a7'? This cannot be undone."
        );
    }
}
