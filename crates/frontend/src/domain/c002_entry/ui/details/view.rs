use super::view_model::EntryDetailsViewModel;
use crate::shared::field_renderer::FieldControl;
use crate::shared::icons::icon;
use contracts::domain::c002_entry::aggregate::EntryStatus;
use leptos::prelude::*;
use std::rc::Rc;

/// Форма записи: каждое поле схемы проходит через динамический рендерер
#[component]
pub fn EntryDetails(
    content_type_id: String,
    id: Option<String>,
    on_saved: Rc<dyn Fn(())>,
    on_cancel: Rc<dyn Fn(())>,
) -> impl IntoView {
    let vm = EntryDetailsViewModel::new();
    vm.load(content_type_id, id);

    let vm_clone = vm.clone();

    view! {
        <div class="details-container entry-details">
            <div class="details-header">
                <h3>
                    {
                        let vm = vm_clone.clone();
                        move || {
                            let name = vm
                                .content_type
                                .get()
                                .map(|ct| ct.base.description.clone())
                                .unwrap_or_default();
                            if vm.is_edit_mode()() {
                                format!("Редактирование записи — {}", name)
                            } else {
                                format!("Новая запись — {}", name)
                            }
                        }
                    }
                </h3>
            </div>

            {
                let vm = vm_clone.clone();
                move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })
            }

            {
                let vm = vm_clone.clone();
                move || {
                    if let Some(fatal) = vm.fatal.get() {
                        return view! { <div class="error error--fatal">{fatal}</div> }.into_any();
                    }
                    let Some(schema) = vm.content_type.get() else {
                        return view! {
                            <div class="loading">{"Загрузка схемы..."}</div>
                        }
                        .into_any();
                    };

                    let vm_title = vm.clone();
                    let vm_title_input = vm.clone();
                    let vm_status = vm.clone();
                    let vm_status_change = vm.clone();
                    let values = vm.values;
                    let missing = vm.missing;
                    let fields = schema.fields.clone();
                    let siblings = schema.fields.clone();

                    view! {
                        <div class="details-form">
                            <div class="form-group">
                                <label for="entry-title">{"Заголовок"}</label>
                                <input
                                    type="text"
                                    id="entry-title"
                                    prop:value=move || vm_title.title.get()
                                    on:input=move |ev| vm_title_input.title.set(event_target_value(&ev))
                                />
                            </div>

                            <div class="form-group">
                                <label for="entry-status">{"Статус"}</label>
                                <select
                                    id="entry-status"
                                    on:change=move |ev| {
                                        vm_status_change
                                            .status
                                            .set(EntryStatus::from_tag(&event_target_value(&ev)));
                                    }
                                >
                                    <option
                                        value="draft"
                                        selected=move || vm_status.status.get() == EntryStatus::Draft
                                    >
                                        {"Черновик"}
                                    </option>
                                    <option
                                        value="published"
                                        selected=move || vm_status.status.get() == EntryStatus::Published
                                    >
                                        {"Опубликовано"}
                                    </option>
                                </select>
                            </div>

                            {fields
                                .into_iter()
                                .map(|field| {
                                    let api_identifier = field.api_identifier.clone();
                                    let field_siblings = siblings.clone();
                                    view! {
                                        <div class="entry-field">
                                            <FieldControl
                                                field=field
                                                siblings=field_siblings
                                                values=values
                                            />
                                            {move || {
                                                missing
                                                    .get()
                                                    .contains(&api_identifier)
                                                    .then(|| view! {
                                                        <div class="entry-field__missing">
                                                            {"Обязательное поле не заполнено"}
                                                        </div>
                                                    })
                                            }}
                                        </div>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </div>
                    }
                    .into_any()
                }
            }

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    on:click={
                        let vm = vm_clone.clone();
                        let on_saved = on_saved.clone();
                        move |_| vm.save_command(on_saved.clone())
                    }
                    disabled={
                        let vm = vm_clone.clone();
                        move || vm.fatal.get().is_some() || vm.content_type.get().is_none()
                    }
                >
                    {icon("save")}
                    {
                        let vm = vm_clone.clone();
                        move || if vm.is_edit_mode()() { "Сохранить" } else { "Создать" }
                    }
                </button>
                <button
                    class="btn btn-secondary"
                    on:click=move |_| (on_cancel)(())
                >
                    {icon("cancel")}
                    {"Отмена"}
                </button>
            </div>
        </div>
    }
}
