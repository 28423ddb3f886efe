use super::FieldControl;
use crate::domain::c003_destination::ui::wizard::DestinationWizard;
use crate::shared::icons::icon;
use contracts::domain::c001_content_type::aggregate::FieldDefinition;
use contracts::domain::c002_entry::aggregate::ValueBag;
use contracts::domain::c003_destination::aggregate::DestinationKind;
use contracts::shared::metadata::FieldKind;
use contracts::shared::slug::{
    build_preview, plan_params, slugify, unbound_names, ParamSource, RouteTemplate, SlugParam,
};
use leptos::prelude::*;
use serde_json::Value;

/// Параметры шаблона, делегированные обычным соседним полям.
///
/// Слаг-поле показывает ровно те параметры, которые нужны шаблону и не
/// закрыты мастером — оператор не заполняет ничего лишнего.
fn delegated_siblings(
    params: &[SlugParam],
    siblings: &[FieldDefinition],
    own_identifier: &str,
) -> Vec<FieldDefinition> {
    params
        .iter()
        .filter(|p| p.source == ParamSource::SiblingField)
        .filter_map(|p| {
            siblings
                .iter()
                .find(|s| s.api_identifier == p.name() && s.api_identifier != own_identifier)
        })
        // Вложенный слаг рендерить нельзя
        .filter(|s| s.kind != FieldKind::Slug)
        .cloned()
        .collect()
}

/// Слаг-поле: редактируемое значение, живой предпросмотр маршрута,
/// мастер направлений и делегированные параметры шаблона.
///
/// Поток данных строго односторонний: на каждую перерисовку читается
/// снимок значений и собирается предпросмотр; движок никогда не пишет в
/// чужие поля.
#[component]
pub fn SlugWidget(
    field: FieldDefinition,
    siblings: Vec<FieldDefinition>,
    values: RwSignal<ValueBag>,
) -> impl IntoView {
    let own_key = field.api_identifier.clone();
    let label = field.label.clone();
    let route = field.metadata.slug_route.clone().unwrap_or_default();

    let template = match RouteTemplate::parse(&route) {
        Ok(template) => template,
        Err(e) => {
            // Битый шаблон — inline-предупреждение, поле остается редактируемым
            let value_key = own_key.clone();
            let value = Signal::derive(move || {
                values.get().get_str(&value_key).unwrap_or_default()
            });
            let input_key = own_key.clone();
            return view! {
                <div class="form__group">
                    <label class="form__label">{label}</label>
                    <div class="error">{format!("Ошибка шаблона маршрута: {}", e)}</div>
                    <input
                        class="form__input"
                        prop:value=move || value.get()
                        on:input=move |ev| {
                            let v = event_target_value(&ev);
                            let key = input_key.clone();
                            values.update(|bag| bag.set(key, Value::String(v)));
                        }
                    />
                </div>
            }
            .into_any();
        }
    };

    let wizard_names = DestinationKind::wizard_param_names();
    let sibling_ids: Vec<&str> = siblings
        .iter()
        .filter(|s| s.id != field.id)
        .map(|s| s.api_identifier.as_str())
        .collect();
    let params = plan_params(&template, &own_key, &wizard_names, &sibling_ids);

    let has_wizard = params
        .iter()
        .any(|p| matches!(p.source, ParamSource::WizardStep(_)));
    let unbound = unbound_names(&params);
    let delegated = delegated_siblings(&params, &siblings, &own_key);

    let preview = {
        let template = template.clone();
        let params = params.clone();
        let own_key = own_key.clone();
        Signal::derive(move || {
            let bag = values.get();
            let own_value = bag.get_str(&own_key).unwrap_or_default();
            build_preview(&template, &params, &own_key, &own_value, |param| {
                match param.source {
                    ParamSource::WizardStep(step) => bag.get_str(wizard_names[step]),
                    ParamSource::SiblingField => bag.get_str(param.name()),
                    _ => None,
                }
            })
        })
    };

    let own_value = {
        let own_key = own_key.clone();
        Signal::derive(move || values.get().get_str(&own_key).unwrap_or_default())
    };

    // Одноразовая генерация из первого текстового соседа ("generate from
    // title"); дальше оператор правит значение свободно
    let generate_source = siblings
        .iter()
        .find(|s| s.kind == FieldKind::Text && s.id != field.id)
        .map(|s| (s.api_identifier.clone(), s.label.clone()));

    let input_key = own_key.clone();
    let delegated_views: Vec<AnyView> = delegated
        .into_iter()
        .map(|sibling| {
            let sibling_list = siblings.clone();
            view! {
                <FieldControl field=sibling siblings=sibling_list values=values />
            }
            .into_any()
        })
        .collect();

    view! {
        <div class="form__group slug-field">
            <label class="form__label">{label}</label>

            <div class="slug-field__own">
                <input
                    class="form__input"
                    placeholder="url-segment"
                    prop:value=move || own_value.get()
                    on:input=move |ev| {
                        let v = event_target_value(&ev);
                        let key = input_key.clone();
                        values.update(|bag| {
                            if v.is_empty() {
                                bag.remove(&key);
                            } else {
                                bag.set(key, Value::String(v));
                            }
                        });
                    }
                />
                {generate_source.map(|(source_key, source_label)| {
                    let own_key = own_key.clone();
                    view! {
                        <button
                            class="button button--secondary slug-field__generate"
                            title=format!("Сгенерировать из поля «{}»", source_label)
                            on:click=move |_| {
                                let source = values
                                    .with_untracked(|bag| bag.get_str(&source_key))
                                    .unwrap_or_default();
                                let generated = slugify(&source);
                                if !generated.is_empty() {
                                    let key = own_key.clone();
                                    values.update(|bag| bag.set(key, Value::String(generated)));
                                }
                            }
                        >
                            {icon("wand")}
                            {"Сгенерировать"}
                        </button>
                    }
                })}
            </div>

            <div class="slug-field__preview" title="Предпросмотр URL">
                {move || preview.get()}
            </div>

            {(!unbound.is_empty()).then(|| view! {
                <div class="slug-field__warning">
                    {format!("Параметры без источника: {}", unbound.join(", "))}
                </div>
            })}

            {has_wizard.then(|| view! { <DestinationWizard values=values /> })}

            {(!delegated_views.is_empty()).then(|| view! {
                <div class="slug-field__delegated">
                    <div class="slug-field__delegated-title">
                        {"Параметры маршрута"}
                    </div>
                    {delegated_views}
                </div>
            })}
        </div>
    }
    .into_any()
}
