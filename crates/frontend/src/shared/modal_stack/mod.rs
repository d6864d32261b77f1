//! Pilha de modais da aplicação.
//!
//! Os formulários de detalhe abrem por aqui; `ModalHost` fica montado uma
//! única vez na raiz e Escape fecha só o modal do topo.

use crate::shared::modal_frame::ModalFrame;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use std::sync::Arc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;

type ModalBuilder = Arc<dyn Fn(ModalHandle) -> AnyView + Send + Sync>;

/// Largura da superfície do modal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalSize {
    Small,
    #[default]
    Medium,
    /// Formulário de pedido
    Wide,
}

impl ModalSize {
    pub fn class(&self) -> &'static str {
        match self {
            ModalSize::Small => "modal--small",
            ModalSize::Medium => "modal--medium",
            ModalSize::Wide => "modal--wide",
        }
    }
}

const BASE_Z_INDEX: i32 = 1000;

#[derive(Clone)]
struct ModalEntry {
    id: u64,
    size: ModalSize,
    builder: ModalBuilder,
}

/// Cada modal da pilha com o seu z-index; o último aberto fica por cima
fn layered(stack: &[ModalEntry]) -> Vec<(i32, ModalEntry)> {
    stack
        .iter()
        .cloned()
        .enumerate()
        .map(|(depth, entry)| (BASE_Z_INDEX + depth as i32, entry))
        .collect()
}

/// Devolvido por `push`; o modal usa para se fechar
#[derive(Clone, Copy)]
pub struct ModalHandle {
    id: u64,
    svc: ModalStackService,
}

impl ModalHandle {
    pub fn close(&self) {
        self.svc.close_deferred(self.id);
    }
}

#[derive(Clone, Copy)]
pub struct ModalStackService {
    stack: RwSignal<Vec<ModalEntry>>,
    next_id: StoredValue<u64>,
}

impl ModalStackService {
    pub fn new() -> Self {
        Self {
            stack: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
        }
    }

    // Remover o modal dentro do próprio evento de clique derruba o handler
    // que ainda está executando; fecha no próximo tick.
    fn defer(&self, f: impl FnOnce(ModalStackService) + 'static) {
        let svc = *self;
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            f(svc);
        });
    }

    pub fn is_open(&self) -> bool {
        self.stack.with(|s| !s.is_empty())
    }

    pub fn push<F>(&self, size: ModalSize, builder: F) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);

        self.stack.update(|s| {
            s.push(ModalEntry {
                id,
                size,
                builder: Arc::new(builder),
            })
        });
        log::debug!("modal {} opened ({} on stack)", id, self.stack.with_untracked(Vec::len));

        ModalHandle { id, svc: *self }
    }

    pub fn close(&self, id: u64) {
        self.stack.update(|s| s.retain(|e| e.id != id));
    }

    pub fn close_deferred(&self, id: u64) {
        self.defer(move |svc| svc.close(id));
    }

    pub fn pop_deferred(&self) {
        self.defer(|svc| {
            svc.stack.update(|s| {
                s.pop();
            })
        });
    }
}

pub fn use_modal_stack() -> ModalStackService {
    expect_context::<ModalStackService>()
}

#[component]
pub fn ModalHost() -> impl IntoView {
    let svc = use_modal_stack();

    Effect::new(move |_| {
        let on_keydown = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let is_escape = event
                .dyn_ref::<KeyboardEvent>()
                .map_or(false, |k| k.key() == "Escape");
            if is_escape && svc.is_open() {
                svc.pop_deferred();
            }
        }) as Box<dyn FnMut(_)>);

        if let Some(window) = web_sys::window() {
            if window
                .add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())
                .is_err()
            {
                log::warn!("could not register Escape handler for modals");
            }
            // host vive enquanto a aplicação viver
            on_keydown.forget();
        }
    });

    view! {
        <Show when=move || svc.is_open()>
            <For
                each=move || { svc.stack.with(|s| layered(s)) }
                key=|(_, entry)| entry.id
                children=move |(z_index, entry)| {
                    let id = entry.id;
                    let on_close = Callback::new(move |_| svc.close_deferred(id));
                    let body = (entry.builder)(ModalHandle { id, svc });
                    view! {
                        <ModalFrame
                            z_index=z_index
                            on_close=on_close
                            modal_class=entry.size.class()
                        >
                            {body}
                        </ModalFrame>
                    }
                }
            />
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u64) -> ModalEntry {
        ModalEntry {
            id,
            size: ModalSize::default(),
            builder: Arc::new(|_: ModalHandle| ().into_any()),
        }
    }

    #[test]
    fn latest_modal_sits_on_top() {
        let stack = vec![entry(7), entry(3), entry(9)];
        let layers = layered(&stack);
        let ids: Vec<_> = layers.iter().map(|(_, e)| e.id).collect();
        assert_eq!(ids, vec![7, 3, 9]);
        assert_eq!(layers[0].0, BASE_Z_INDEX);
        assert!(layers[2].0 > layers[1].0);
        assert!(layered(&[]).is_empty());
    }
}
