use super::api;
use super::state::{WizardState, STEP_COUNT};
use crate::shared::components::ui::Select;
use crate::shared::icons::icon;
use contracts::domain::c002_entry::aggregate::ValueBag;
use contracts::domain::c003_destination::aggregate::{DestinationCreateDto, DestinationKind};
use leptos::prelude::*;
use serde_json::Value;
use wasm_bindgen_futures::spawn_local;

/// Задержка debounce для поиска по дереву
const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Записать имя выбранного узла шага в мешок значений и снести имена всех
/// шагов глубже — предпросмотр слага не должен видеть осиротевших детей
fn write_step_name(values: RwSignal<ValueBag>, level: usize, name: Option<String>) {
    let step_names = DestinationKind::wizard_param_names();
    values.update(|bag| {
        match name {
            Some(name) => bag.set(step_names[level].to_string(), Value::String(name)),
            None => bag.remove(step_names[level]),
        }
        for deeper in step_names.iter().skip(level + 1) {
            bag.remove(deeper);
        }
    });
}

/// Мастер направлений: регион → субрегион → зона.
///
/// Каждый шаг — зависимый select, набор вариантов — дети выбора уровнем
/// выше. Выбранные имена пишутся в мешок значений под ключами шагов; сами
/// id узлов — внутреннее состояние мастера.
#[component]
pub fn DestinationWizard(values: RwSignal<ValueBag>) -> impl IntoView {
    use contracts::domain::c003_destination::aggregate::DestinationNode;

    let (tree, set_tree) = signal::<Vec<DestinationNode>>(vec![]);
    let (error, set_error) = signal::<Option<String>>(None);
    let (filter_text, set_filter_text) = signal(String::new());
    let wizard = RwSignal::new(WizardState::new());
    // Токен поколения: ответ устаревшего запроса отбрасывается, не применяется
    let generation = StoredValue::new(0u64);

    let load = move || {
        let my_generation = generation.get_value() + 1;
        generation.set_value(my_generation);
        spawn_local(async move {
            match api::fetch_tree().await {
                Ok(data) => {
                    if generation.get_value() != my_generation {
                        // Пока ждали ответ, ушел более новый запрос
                        return;
                    }
                    wizard.update(|w| w.prune_missing(&data));
                    set_tree.set(data);
                    set_error.set(None);
                }
                Err(e) => {
                    if generation.get_value() == my_generation {
                        set_error.set(Some(format!("Ошибка загрузки направлений: {}", e)));
                    }
                }
            }
        });
    };

    // Debounce: при серии нажатий выполняется только последний запрос
    let on_search_input = move |raw: String| {
        set_filter_text.set(raw.clone());
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if filter_text.get_untracked() != raw {
                return;
            }
            load();
        });
    };

    let create_inputs: [RwSignal<String>; STEP_COUNT] = [
        RwSignal::new(String::new()),
        RwSignal::new(String::new()),
        RwSignal::new(String::new()),
    ];

    load();

    let steps: Vec<AnyView> = (0..STEP_COUNT)
        .map(|level| {
            let kind = DestinationKind::WIZARD_ORDER[level];
            let create_input = create_inputs[level];

            let options = Signal::derive(move || {
                let tree = tree.get();
                let filter = filter_text.get().trim().to_lowercase();
                let state = wizard.get();
                let mut options: Vec<(String, String)> =
                    vec![(String::new(), "—".to_string())];
                options.extend(
                    state
                        .options(&tree, level)
                        .into_iter()
                        .filter(|n| {
                            filter.is_empty() || n.name.to_lowercase().contains(&filter)
                        })
                        .map(|n| (n.id.clone(), n.name.clone())),
                );
                options
            });

            let selected_id = Signal::derive(move || {
                wizard
                    .get()
                    .selection(level)
                    .cloned()
                    .unwrap_or_default()
            });

            let on_change = Callback::new(move |node_id: String| {
                let node_id = (!node_id.is_empty()).then_some(node_id);
                let name = node_id.as_ref().and_then(|id| {
                    let tree = tree.get_untracked();
                    wizard
                        .get_untracked()
                        .options(&tree, level)
                        .into_iter()
                        .find(|n| &n.id == id)
                        .map(|n| n.name.clone())
                });
                wizard.update(|w| w.select(level, node_id));
                write_step_name(values, level, name);
            });

            let create = move |_| {
                let names = create_input.get_untracked();
                if names.trim().is_empty() {
                    return;
                }
                let parent_id = if level == 0 {
                    None
                } else {
                    match wizard.get_untracked().selection(level - 1).cloned() {
                        Some(id) => Some(id),
                        None => {
                            set_error.set(Some(format!(
                                "Сначала выберите {}",
                                DestinationKind::WIZARD_ORDER[level - 1].label()
                            )));
                            return;
                        }
                    }
                };
                let dto = DestinationCreateDto {
                    kind: kind.as_str().to_string(),
                    names: names.clone(),
                    parent_id,
                };
                spawn_local(async move {
                    match api::create_nodes(&dto).await {
                        Ok(ids) => {
                            create_input.set(String::new());
                            set_error.set(None);
                            // Обновляем дерево и предвыбираем первый созданный узел
                            let my_generation = generation.get_value() + 1;
                            generation.set_value(my_generation);
                            match api::fetch_tree().await {
                                Ok(data) => {
                                    if generation.get_value() != my_generation {
                                        return;
                                    }
                                    set_tree.set(data);
                                    if let Some(first_id) = ids.first() {
                                        let first_name = dto
                                            .split_names()
                                            .into_iter()
                                            .next()
                                            .unwrap_or_default();
                                        wizard.update(|w| {
                                            w.select(level, Some(first_id.clone()))
                                        });
                                        write_step_name(values, level, Some(first_name));
                                    }
                                }
                                Err(e) => set_error.set(Some(format!(
                                    "Ошибка загрузки направлений: {}",
                                    e
                                ))),
                            }
                        }
                        Err(e) => set_error.set(Some(format!("Ошибка создания: {}", e))),
                    }
                });
            };

            let delete = move |_| {
                let Some(node_id) = wizard.get_untracked().selection(level).cloned() else {
                    return;
                };
                let confirmed = web_sys::window()
                    .and_then(|w| {
                        w.confirm_with_message(
                            "Удалить узел и всех его потомков? Действие необратимо.",
                        )
                        .ok()
                    })
                    .unwrap_or(false);
                if !confirmed {
                    return;
                }
                spawn_local(async move {
                    match api::delete_node(&node_id).await {
                        // Выбор чистит prune_missing при перезагрузке дерева;
                        // значения в формах намеренно не трогаем
                        Ok(()) => load(),
                        Err(e) => set_error.set(Some(format!("Ошибка удаления: {}", e))),
                    }
                });
            };

            let has_selection =
                Signal::derive(move || wizard.get().selection(level).is_some());

            view! {
                <div class="wizard-step">
                    <Select
                        label=kind.label().to_string()
                        value=selected_id
                        on_change=on_change
                        options=options
                    />
                    <div class="wizard-step__actions">
                        <input
                            class="form__input wizard-step__new-name"
                            placeholder="Новое (можно несколько через запятую)"
                            prop:value=move || create_input.get()
                            on:input=move |ev| create_input.set(event_target_value(&ev))
                        />
                        <button class="button button--secondary" on:click=create>
                            {icon("plus")}
                            {"Добавить"}
                        </button>
                        {move || has_selection.get().then(|| view! {
                            <button
                                class="button button--danger"
                                title="Удалить выбранный узел"
                                on:click=delete
                            >
                                {icon("trash")}
                            </button>
                        })}
                    </div>
                </div>
            }
            .into_any()
        })
        .collect();

    view! {
        <div class="destination-wizard">
            <div class="destination-wizard__header">
                <span class="destination-wizard__title">{"Направление"}</span>
                <input
                    class="form__input destination-wizard__search"
                    placeholder="Поиск по дереву..."
                    prop:value=move || filter_text.get()
                    on:input=move |ev| on_search_input(event_target_value(&ev))
                />
                <button class="button button--secondary" title="Обновить" on:click=move |_| load()>
                    {icon("refresh")}
                </button>
            </div>
            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}
            {steps}
        </div>
    }
}
