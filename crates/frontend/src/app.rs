use crate::domain::c001_content_type::ui::details::{model as content_type_model, ContentTypeDetails};
use crate::domain::c002_entry::ui::details::{model as entry_model, EntryDetails};
use crate::shared::icons::icon;
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

/// Что открыто в рабочей области
#[derive(Clone, PartialEq, Eq)]
enum Screen {
    Empty,
    SchemaEditor { id: Option<String> },
    EntryEditor {
        content_type_id: String,
        entry_id: Option<String>,
    },
}

/// Минимальная оболочка: список типов контента слева, редакторы справа.
/// Роутинг и хром страниц сознательно за рамками.
#[component]
pub fn App() -> impl IntoView {
    let screen = RwSignal::new(Screen::Empty);
    let (content_types, set_content_types) = signal::<Vec<(String, String)>>(vec![]);
    let (entries, set_entries) = signal::<Vec<(String, String)>>(vec![]);
    let (selected_type, set_selected_type) = signal::<Option<String>>(None);
    let (error, set_error) = signal::<Option<String>>(None);

    let load_types = move || {
        spawn_local(async move {
            match content_type_model::fetch_all().await {
                Ok(list) => {
                    set_content_types.set(
                        list.into_iter()
                            .map(|ct| (ct.base.id.as_string(), ct.base.description.clone()))
                            .collect(),
                    );
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(format!("Ошибка загрузки: {}", e))),
            }
        });
    };

    let load_entries = move |content_type_id: String| {
        spawn_local(async move {
            match entry_model::fetch_by_content_type(content_type_id).await {
                Ok(list) => set_entries.set(
                    list.into_iter()
                        .map(|e| (e.base.id.as_string(), e.base.description.clone()))
                        .collect(),
                ),
                Err(e) => set_error.set(Some(format!("Ошибка загрузки записей: {}", e))),
            }
        });
    };

    load_types();

    let close_editor = move || {
        screen.set(Screen::Empty);
        load_types();
        if let Some(ct) = selected_type.get_untracked() {
            load_entries(ct);
        }
    };

    view! {
        <div class="app-shell">
            <div class="app-shell__sidebar">
                <div class="app-shell__sidebar-header">
                    <h2>{"Типы контента"}</h2>
                    <button
                        class="button button--primary"
                        on:click=move |_| screen.set(Screen::SchemaEditor { id: None })
                    >
                        {icon("plus")}
                        {"Новый"}
                    </button>
                </div>
                {move || error.get().map(|e| view! { <div class="error">{e}</div> })}
                <ul class="app-shell__list">
                    {move || {
                        content_types
                            .get()
                            .into_iter()
                            .map(|(id, name)| {
                                let open_id = id.clone();
                                let entries_id = id.clone();
                                let entry_new_id = id.clone();
                                view! {
                                    <li class="app-shell__list-item">
                                        <span
                                            class="app-shell__list-name"
                                            on:click=move |_| {
                                                screen.set(Screen::SchemaEditor {
                                                    id: Some(open_id.clone()),
                                                });
                                            }
                                        >
                                            {name}
                                        </span>
                                        <button
                                            class="button button--secondary"
                                            title="Записи этого типа"
                                            on:click=move |_| {
                                                set_selected_type.set(Some(entries_id.clone()));
                                                load_entries(entries_id.clone());
                                            }
                                        >
                                            {icon("chevron-down")}
                                        </button>
                                        <button
                                            class="button button--secondary"
                                            title="Новая запись"
                                            on:click=move |_| {
                                                screen.set(Screen::EntryEditor {
                                                    content_type_id: entry_new_id.clone(),
                                                    entry_id: None,
                                                });
                                            }
                                        >
                                            {icon("plus")}
                                        </button>
                                    </li>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </ul>

                {move || {
                    selected_type.get().map(|content_type_id| {
                        let items = entries.get();
                        view! {
                            <div class="app-shell__entries">
                                <h3>{"Записи"}</h3>
                                <ul class="app-shell__list">
                                    {items
                                        .into_iter()
                                        .map(|(id, title)| {
                                            let content_type_id = content_type_id.clone();
                                            view! {
                                                <li
                                                    class="app-shell__list-item"
                                                    on:click=move |_| {
                                                        screen.set(Screen::EntryEditor {
                                                            content_type_id: content_type_id.clone(),
                                                            entry_id: Some(id.clone()),
                                                        });
                                                    }
                                                >
                                                    {title}
                                                </li>
                                            }
                                        })
                                        .collect::<Vec<_>>()}
                                </ul>
                            </div>
                        }
                    })
                }}
            </div>

            <div class="app-shell__main">
                {move || match screen.get() {
                    Screen::Empty => view! {
                        <div class="app-shell__placeholder">
                            {"Выберите тип контента или создайте новый"}
                        </div>
                    }
                    .into_any(),
                    Screen::SchemaEditor { id } => view! {
                        <ContentTypeDetails
                            id=id
                            on_saved=Rc::new(move |_| close_editor())
                            on_cancel=Rc::new(move |_| screen.set(Screen::Empty))
                        />
                    }
                    .into_any(),
                    Screen::EntryEditor {
                        content_type_id,
                        entry_id,
                    } => view! {
                        <EntryDetails
                            content_type_id=content_type_id
                            id=entry_id
                            on_saved=Rc::new(move |_| close_editor())
                            on_cancel=Rc::new(move |_| screen.set(Screen::Empty))
                        />
                    }
                    .into_any(),
                }}
            </div>
        </div>
    }
}
