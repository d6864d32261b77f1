use crate::domain::a002_product_return::api;
use crate::shared::form_utils::opt_text;
use crate::shared::toast::use_notifier;
use contracts::domain::a002_product_return::aggregate::{ChangeReturnStatusRequest, ReturnStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Confirmação de mudança de status, com parecer (obrigatório na recusa)
#[component]
pub fn StatusChangeDialog(
    id: String,
    customer: String,
    current: ReturnStatus,
    next: ReturnStatus,
    #[prop(into)] on_done: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let notifier = use_notifier();
    let notes = RwSignal::new(String::new());
    let sending = RwSignal::new(false);
    let id = StoredValue::new(id);

    let confirm = move |_| {
        let request =
            match ChangeReturnStatusRequest::for_transition(current, next, opt_text(notes.get_untracked())) {
                Ok(r) => r,
                Err(e) => {
                    notifier.invalid(&e);
                    return;
                }
            };
        let id = id.get_value();
        sending.set(true);
        spawn_local(async move {
            match api::change_status(&id, &request).await {
                Ok(()) => {
                    notifier.success(format!("Devolução marcada como \"{}\"", next.label()));
                    on_done.run(());
                }
                Err(e) => notifier.error("Erro ao alterar o status", e),
            }
            sending.set(false);
        });
    };

    let notes_label = if next == ReturnStatus::Rejected {
        "Motivo da recusa *"
    } else {
        "Parecer"
    };

    view! {
        <div class="dialog">
            <h2 class="dialog__title">
                {format!("{} → {}", current.label(), next.label())}
            </h2>
            <p class="dialog__text">{format!("Cliente: {}", customer)}</p>
            <div class="form__group">
                <label class="form__label">{notes_label}</label>
                <Textarea value=notes attr:rows=3 />
            </div>
            <Flex justify=FlexJustify::End gap=FlexGap::Small>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    "Cancelar"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=confirm
                    disabled=Signal::derive(move || sending.get())
                >
                    "Confirmar"
                </Button>
            </Flex>
        </div>
    }
}
