use contracts::domain::c001_content_type::aggregate::{
    ContentType, FieldConfig, FieldDefinition, FieldId, FieldPatch,
};
use contracts::shared::metadata::{describe, FieldKind};
use leptos::prelude::*;

fn patch(schema: RwSignal<ContentType>, id: FieldId, patch: FieldPatch) {
    schema.update(|ct| ct.update_field(id, patch));
}

fn field_of<T>(
    schema: RwSignal<ContentType>,
    id: FieldId,
    read: impl Fn(&FieldDefinition) -> T + Send + Sync + 'static,
) -> Signal<T>
where
    T: Default + Send + Sync + 'static,
{
    Signal::derive(move || {
        schema.with(|ct| ct.field(id).map(&read).unwrap_or_default())
    })
}

fn config_of(schema: RwSignal<ContentType>, id: FieldId) -> FieldConfig {
    schema
        .with_untracked(|ct| ct.field(id).map(|f| f.metadata.clone()))
        .unwrap_or_default()
}

/// Панель настроек выбранного поля.
///
/// Каждое изменение — это `update_field` с частичным патчем; пересчет
/// auto-идентификатора при правке метки происходит в самой схеме на каждый
/// ввод. Структура панели зависит только от выбора: инпуты привязаны к
/// схеме реактивно и не пересоздаются на каждый символ.
#[component]
pub fn FieldSettings(
    schema: RwSignal<ContentType>,
    selected: RwSignal<Option<FieldId>>,
) -> impl IntoView {
    view! {
        <div class="field-settings">
            {move || {
                let Some(field_id) = selected.get() else {
                    return view! {
                        <div class="field-settings__empty">
                            {"Выберите поле на канвасе"}
                        </div>
                    }
                    .into_any();
                };
                // Вид поля фиксируется при создании и в панели не меняется
                let Some(kind) = schema.with_untracked(|ct| {
                    ct.field(field_id).map(|f| f.kind.clone())
                }) else {
                    return view! {
                        <div class="field-settings__empty">{"Поле удалено"}</div>
                    }
                    .into_any();
                };

                let kind_label = describe(&kind)
                    .map(|info| info.label.to_string())
                    .unwrap_or_else(|e| format!("неизвестный вид: {}", e.0));

                let label_value = field_of(schema, field_id, |f| f.label.clone());
                let identifier_value =
                    field_of(schema, field_id, |f| f.api_identifier.clone());
                let auto_identifier = field_of(schema, field_id, |f| f.auto_identifier);
                let is_required = field_of(schema, field_id, |f| f.is_required);
                let is_list = field_of(schema, field_id, |f| f.is_list);

                view! {
                    <div class="field-settings__body">
                        <div class="field-settings__kind">{kind_label}</div>

                        <div class="form__group">
                            <label class="form__label">{"Метка"}</label>
                            <input
                                class="form__input"
                                prop:value=move || label_value.get()
                                on:input=move |ev| {
                                    patch(schema, field_id, FieldPatch {
                                        label: Some(event_target_value(&ev)),
                                        ..Default::default()
                                    });
                                }
                            />
                        </div>

                        <div class="form__group">
                            <label class="form__label">
                                {"Api-идентификатор"}
                                {move || auto_identifier.get().then(|| view! {
                                    <span class="field-settings__auto" title="Следует за меткой; введите вручную, чтобы зафиксировать">
                                        {"auto"}
                                    </span>
                                })}
                            </label>
                            <input
                                class="form__input"
                                prop:value=move || identifier_value.get()
                                placeholder="пусто — вернуться к авто"
                                on:input=move |ev| {
                                    patch(schema, field_id, FieldPatch {
                                        api_identifier: Some(event_target_value(&ev)),
                                        ..Default::default()
                                    });
                                }
                            />
                        </div>

                        <div class="form__checkbox-wrapper">
                            <input
                                id="field-required"
                                type="checkbox"
                                class="form__checkbox"
                                prop:checked=move || is_required.get()
                                on:change=move |ev| {
                                    patch(schema, field_id, FieldPatch {
                                        is_required: Some(event_target_checked(&ev)),
                                        ..Default::default()
                                    });
                                }
                            />
                            <label class="form__checkbox-label" for="field-required">
                                {"Обязательное"}
                            </label>
                        </div>

                        <div class="form__checkbox-wrapper">
                            <input
                                id="field-list"
                                type="checkbox"
                                class="form__checkbox"
                                prop:checked=move || is_list.get()
                                on:change=move |ev| {
                                    patch(schema, field_id, FieldPatch {
                                        is_list: Some(event_target_checked(&ev)),
                                        ..Default::default()
                                    });
                                }
                            />
                            <label class="form__checkbox-label" for="field-list">
                                {"Список значений"}
                            </label>
                        </div>

                        {kind_specific_settings(schema, field_id, &kind)}
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}

/// Настройки, зависящие от вида поля
fn kind_specific_settings(
    schema: RwSignal<ContentType>,
    field_id: FieldId,
    kind: &FieldKind,
) -> AnyView {
    match kind {
        FieldKind::Slug => {
            let route = field_of(schema, field_id, |f| {
                f.metadata.slug_route.clone().unwrap_or_default()
            });
            view! {
                <div class="form__group">
                    <label class="form__label">{"Шаблон маршрута"}</label>
                    <input
                        class="form__input"
                        prop:value=move || route.get()
                        placeholder="/[region]/[zone]/[slug]"
                        on:input=move |ev| {
                            let raw = event_target_value(&ev);
                            let mut config = config_of(schema, field_id);
                            config.slug_route = (!raw.is_empty()).then_some(raw);
                            patch(schema, field_id, FieldPatch {
                                metadata: Some(config),
                                ..Default::default()
                            });
                        }
                    />
                </div>
            }
            .into_any()
        }
        FieldKind::Select => {
            // Снимок на момент открытия панели: текст правится свободно,
            // парсится построчно на каждый ввод
            let options_text = config_of(schema, field_id)
                .select_options
                .unwrap_or_default()
                .join("\n");
            view! {
                <div class="form__group">
                    <label class="form__label">{"Варианты (по одному на строку)"}</label>
                    <textarea
                        class="form__textarea"
                        rows=4
                        prop:value=options_text
                        on:input=move |ev| {
                            let raw = event_target_value(&ev);
                            let options: Vec<String> = raw
                                .lines()
                                .map(|l| l.trim().to_string())
                                .filter(|l| !l.is_empty())
                                .collect();
                            let mut config = config_of(schema, field_id);
                            config.select_options = (!options.is_empty()).then_some(options);
                            patch(schema, field_id, FieldPatch {
                                metadata: Some(config),
                                ..Default::default()
                            });
                        }
                    ></textarea>
                </div>
            }
            .into_any()
        }
        FieldKind::Text | FieldKind::LongText => {
            let placeholder = field_of(schema, field_id, |f| {
                f.metadata.placeholder.clone().unwrap_or_default()
            });
            view! {
                <div class="form__group">
                    <label class="form__label">{"Placeholder"}</label>
                    <input
                        class="form__input"
                        prop:value=move || placeholder.get()
                        on:input=move |ev| {
                            let raw = event_target_value(&ev);
                            let mut config = config_of(schema, field_id);
                            config.placeholder = (!raw.is_empty()).then_some(raw);
                            patch(schema, field_id, FieldPatch {
                                metadata: Some(config),
                                ..Default::default()
                            });
                        }
                    />
                </div>
            }
            .into_any()
        }
        _ => view! { <></> }.into_any(),
    }
}
