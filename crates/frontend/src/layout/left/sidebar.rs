//! Menu lateral com grupos recolhíveis

use crate::layout::global_context::use_app_context;
use crate::layout::tabs::tab_label_for_key;
use crate::layout::tabs::tab_labels::MEMBERSHIP_REPORT_KEY;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    /// (chave da aba, ícone)
    items: Vec<(&'static str, &'static str)>,
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "workshop",
            label: "Oficina",
            icon: "production",
            items: vec![
                ("a006_order", "orders"),
                ("a003_production_item", "production"),
                ("a002_product_return", "returns"),
            ],
        },
        MenuGroup {
            id: "finance",
            label: "Financeiro",
            icon: "payables",
            items: vec![("a001_account_payable", "payables")],
        },
        MenuGroup {
            id: "marketing",
            label: "Marketing",
            icon: "marketing",
            items: vec![("a004_marketing_task", "marketing")],
        },
        MenuGroup {
            id: "members",
            label: "Associados",
            icon: "members",
            items: vec![("a005_membership", "members"), (MEMBERSHIP_REPORT_KEY, "report")],
        },
    ]
}

fn toggle_group(expanded: &mut Vec<String>, id: &str) {
    match expanded.iter().position(|x| x == id) {
        Some(pos) => {
            expanded.remove(pos);
        }
        None => expanded.push(id.to_string()),
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_app_context();
    let groups = get_menu_groups();
    let expanded_groups = RwSignal::new(groups.iter().map(|g| g.id.to_string()).collect::<Vec<_>>());

    view! {
        <div class="app-sidebar__content">
            {groups
                .into_iter()
                .map(|group| {
                    let gid = group.id;
                    let is_expanded = move || expanded_groups.with(|e| e.iter().any(|x| x == gid));
                    view! {
                        <div>
                            <div
                                class="app-sidebar__item"
                                style:padding-left="12px"
                                on:click=move |_| expanded_groups.update(|e| toggle_group(e, gid))
                            >
                                <div class="app-sidebar__item-content">
                                    {icon(group.icon)}
                                    <span>{group.label}</span>
                                </div>
                                <div
                                    class="app-sidebar__chevron"
                                    class:app-sidebar__chevron--expanded=is_expanded
                                >
                                    {icon("chevron-right")}
                                </div>
                            </div>
                            <Show when=is_expanded>
                                <div class="app-sidebar__children">
                                    {group
                                        .items
                                        .iter()
                                        .map(|&(key, icon_name)| {
                                            let label = tab_label_for_key(key);
                                            let label_click = label.clone();
                                            view! {
                                                <div
                                                    class="app-sidebar__item"
                                                    class:app-sidebar__item--active=move || {
                                                        ctx.active.with(|a| a.as_deref() == Some(key))
                                                    }
                                                    style:padding-left="10px"
                                                    on:click=move |_| ctx.open_tab(key, &label_click)
                                                >
                                                    <div class="app-sidebar__item-content">
                                                        {icon(icon_name)}
                                                        <span>{label}</span>
                                                    </div>
                                                </div>
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            </Show>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_menu_item_has_a_label() {
        for group in get_menu_groups() {
            for (key, _) in group.items {
                assert_ne!(tab_label_for_key(key), key, "sem título: {key}");
            }
        }
    }

    #[test]
    fn toggling_a_group() {
        let mut expanded = vec!["workshop".to_string()];
        toggle_group(&mut expanded, "finance");
        toggle_group(&mut expanded, "workshop");
        assert_eq!(expanded, vec!["finance".to_string()]);
    }
}
