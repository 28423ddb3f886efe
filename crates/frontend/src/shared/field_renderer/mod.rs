//! Dynamic field renderer: one schema field definition плюс текущий мешок
//! значений → конкретный контрол ввода.
//!
//! Диспетчеризация тотальна по закрытому перечислению видов полей; для
//! неизвестного тега рисуется заглушка, а не паника — схема может быть
//! новее или старее текущего реестра.

pub mod media;
pub mod slug_widget;

use crate::shared::components::date_input::{coerce_iso_date, DateInput};
use crate::shared::components::ui::{Checkbox, Input, Select, Textarea};
use contracts::domain::c001_content_type::aggregate::FieldDefinition;
use contracts::domain::c002_entry::aggregate::ValueBag;
use contracts::shared::metadata::FieldKind;
use leptos::prelude::*;
use media::MediaControl;
use serde_json::Value;
use slug_widget::SlugWidget;

fn string_of(values: RwSignal<ValueBag>, key: &str) -> Signal<String> {
    let key = key.to_string();
    Signal::derive(move || values.get().get_str(&key).unwrap_or_default())
}

fn set_or_remove(values: RwSignal<ValueBag>, key: &str, raw: String) {
    let key = key.to_string();
    values.update(|bag| {
        if raw.is_empty() {
            bag.remove(&key);
        } else {
            bag.set(key, Value::String(raw));
        }
    });
}

/// Контрол для одного поля схемы
#[component]
pub fn FieldControl(
    field: FieldDefinition,
    /// Все поля схемы (для слагов: делегированные параметры шаблона)
    siblings: Vec<FieldDefinition>,
    values: RwSignal<ValueBag>,
) -> impl IntoView {
    // Списковый вариант поддержан для скалярных видов; слаг, медиа и флаг
    // остаются одиночными
    if field.is_list
        && matches!(
            field.kind,
            FieldKind::Text | FieldKind::Number | FieldKind::Date | FieldKind::Select
        )
    {
        return view! { <ListControl field=field values=values /> }.into_any();
    }

    let key = field.api_identifier.clone();
    let label = field.label.clone();

    match field.kind.clone() {
        FieldKind::Text => {
            let value = string_of(values, &key);
            let on_input = Callback::new(move |v: String| set_or_remove(values, &key, v));
            view! {
                <Input
                    label=label
                    value=value
                    on_input=on_input
                    placeholder=field.metadata.placeholder.clone().unwrap_or_default()
                    required=field.is_required
                />
            }
            .into_any()
        }
        FieldKind::LongText => {
            let value = string_of(values, &key);
            let on_input = Callback::new(move |v: String| set_or_remove(values, &key, v));
            view! {
                <Textarea
                    label=label
                    value=value
                    on_input=on_input
                    placeholder=field.metadata.placeholder.clone().unwrap_or_default()
                    rows=6u32
                />
            }
            .into_any()
        }
        FieldKind::Number => {
            let value = string_of(values, &key);
            let on_input = Callback::new(move |v: String| {
                let key = key.clone();
                values.update(|bag| {
                    if v.is_empty() {
                        bag.remove(&key);
                    } else if let Some(number) =
                        v.parse::<f64>().ok().and_then(serde_json::Number::from_f64)
                    {
                        bag.set(key, Value::Number(number));
                    }
                    // Недопарсившийся ввод не трогает прежнее значение
                });
            });
            view! {
                <Input
                    label=label
                    value=value
                    on_input=on_input
                    input_type="number"
                    required=field.is_required
                />
            }
            .into_any()
        }
        FieldKind::Boolean => {
            let checked = {
                let key = key.clone();
                Signal::derive(move || {
                    matches!(values.get().get(&key), Some(Value::Bool(true)))
                })
            };
            let on_change = Callback::new(move |checked: bool| {
                let key = key.clone();
                values.update(|bag| bag.set(key, Value::Bool(checked)));
            });
            view! { <Checkbox label=label checked=checked on_change=on_change /> }.into_any()
        }
        FieldKind::Date => {
            let value = {
                let key = key.clone();
                Signal::derive(move || {
                    coerce_iso_date(&values.get().get_str(&key).unwrap_or_default())
                })
            };
            view! {
                <div class="form__group">
                    <label class="form__label">{label}</label>
                    <DateInput
                        value=value
                        on_change=move |v: String| set_or_remove(values, &key, v)
                    />
                </div>
            }
            .into_any()
        }
        FieldKind::Select => {
            let value = string_of(values, &key);
            let choices = field.metadata.select_options.clone().unwrap_or_default();
            let mut options: Vec<(String, String)> = vec![(String::new(), "—".to_string())];
            options.extend(choices.into_iter().map(|c| (c.clone(), c)));
            let options = Signal::derive(move || options.clone());
            let on_change = Callback::new(move |v: String| set_or_remove(values, &key, v));
            view! {
                <Select
                    label=label
                    value=value
                    on_change=on_change
                    options=options
                    required=field.is_required
                />
            }
            .into_any()
        }
        FieldKind::Media => view! { <MediaControl field=field values=values /> }.into_any(),
        FieldKind::Slug => {
            view! { <SlugWidget field=field siblings=siblings values=values /> }.into_any()
        }
        FieldKind::Unknown(tag) => view! {
            <div class="form__group form__group--unsupported">
                <label class="form__label">{label}</label>
                <div class="field-unsupported">
                    {format!("Неподдерживаемый вид поля: {}", tag)}
                </div>
            </div>
        }
        .into_any(),
    }
}

/// Список скалярных значений: строка на элемент, добавление и удаление
#[component]
fn ListControl(field: FieldDefinition, values: RwSignal<ValueBag>) -> impl IntoView {
    let key = field.api_identifier.clone();
    let label = field.label.clone();

    let items = {
        let key = key.clone();
        Signal::derive(move || match values.get().get(&key) {
            Some(Value::Array(items)) => items
                .iter()
                .map(|v| v.as_str().map(|s| s.to_string()).unwrap_or_else(|| v.to_string()))
                .collect::<Vec<String>>(),
            _ => Vec::new(),
        })
    };

    let write_items = move |key: &str, items: Vec<String>| {
        let key = key.to_string();
        values.update(|bag| {
            if items.is_empty() {
                bag.remove(&key);
            } else {
                bag.set(key, Value::Array(items.into_iter().map(Value::String).collect()));
            }
        });
    };

    let add_key = key.clone();
    let add_item = move |_| {
        let mut current = items.get_untracked();
        current.push(String::new());
        write_items(&add_key, current);
    };

    view! {
        <div class="form__group">
            <label class="form__label">{label}</label>
            {move || {
                let key = key.clone();
                items
                    .get()
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| {
                        let key_edit = key.clone();
                        let key_remove = key.clone();
                        view! {
                            <div class="list-field__row">
                                <input
                                    class="form__input"
                                    prop:value=item
                                    on:input=move |ev| {
                                        let mut current = items.get_untracked();
                                        if let Some(slot) = current.get_mut(i) {
                                            *slot = event_target_value(&ev);
                                        }
                                        write_items(&key_edit, current);
                                    }
                                />
                                <button
                                    class="list-field__remove"
                                    on:click=move |_| {
                                        let mut current = items.get_untracked();
                                        if i < current.len() {
                                            current.remove(i);
                                        }
                                        write_items(&key_remove, current);
                                    }
                                >
                                    {crate::shared::icons::icon("x")}
                                </button>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
            <button class="button button--secondary list-field__add" on:click=add_item>
                {crate::shared::icons::icon("plus")}
                {"Добавить"}
            </button>
        </div>
    }
}
