use super::model;
use crate::shared::composer::ComposerSession;
use contracts::domain::c001_content_type::aggregate::{
    ContentType, ContentTypeDto, FieldId,
};
use contracts::domain::common::AggregateId;
use contracts::shared::slug::api_identifier_from_label;
use leptos::prelude::*;
use std::rc::Rc;

/// ViewModel редактора типа контента.
///
/// Единственный владелец схемы на странице: композер, панель настроек поля
/// и заголовок формы мутируют один и тот же сигнал.
#[derive(Clone)]
pub struct ContentTypeDetailsViewModel {
    pub schema: RwSignal<ContentType>,
    pub session: RwSignal<ComposerSession>,
    pub selected_field: RwSignal<Option<FieldId>>,
    /// Идентификатор типа следует за именем, пока оператор его не трогал
    pub auto_api_identifier: RwSignal<bool>,
    pub edit_mode: RwSignal<bool>,
    /// Структурно битый документ: композер не монтируется
    pub fatal: RwSignal<Option<String>>,
    pub error: RwSignal<Option<String>>,
}

impl ContentTypeDetailsViewModel {
    pub fn new() -> Self {
        Self {
            schema: RwSignal::new(ContentType::new_for_insert(String::new(), None)),
            session: RwSignal::new(ComposerSession::new()),
            selected_field: RwSignal::new(None),
            auto_api_identifier: RwSignal::new(true),
            edit_mode: RwSignal::new(false),
            fatal: RwSignal::new(None),
            error: RwSignal::new(None),
        }
    }

    /// Load and hydrate the schema document when an ID is provided.
    /// A corrupt document sets `fatal` and never reaches the composer.
    pub fn load_if_needed(&self, id: Option<String>) {
        let Some(existing_id) = id else {
            return;
        };
        let schema = self.schema;
        let auto = self.auto_api_identifier;
        let edit_mode = self.edit_mode;
        let fatal = self.fatal;
        wasm_bindgen_futures::spawn_local(async move {
            let document = match model::fetch_document(existing_id).await {
                Ok(document) => document,
                Err(e) => {
                    fatal.set(Some(format!("Ошибка загрузки: {}", e)));
                    return;
                }
            };
            match ContentType::hydrate(document) {
                Ok(hydrated) => {
                    schema.set(hydrated);
                    auto.set(false);
                    edit_mode.set(true);
                }
                Err(e) => fatal.set(Some(format!("Схема повреждена: {}", e))),
            }
        });
    }

    pub fn set_name(&self, name: String) {
        let auto = self.auto_api_identifier.get_untracked();
        self.schema.update(|ct| {
            ct.base.description = name;
            if auto {
                ct.api_identifier = api_identifier_from_label(&ct.base.description);
            }
        });
    }

    pub fn set_api_identifier(&self, value: String) {
        if value.is_empty() {
            self.auto_api_identifier.set(true);
            self.schema.update(|ct| {
                ct.api_identifier = api_identifier_from_label(&ct.base.description);
            });
        } else {
            self.auto_api_identifier.set(false);
            self.schema.update(|ct| ct.api_identifier = value);
        }
    }

    pub fn set_description(&self, value: String) {
        self.schema.update(|ct| {
            ct.base.comment = (!value.is_empty()).then_some(value);
        });
    }

    pub fn is_form_valid(&self) -> impl Fn() -> bool + '_ {
        move || self.schema.get().validate().is_ok()
    }

    fn to_dto(schema: &ContentType, edit_mode: bool) -> ContentTypeDto {
        ContentTypeDto {
            id: edit_mode.then(|| schema.base.id.as_string()),
            name: schema.base.description.clone(),
            api_identifier: Some(schema.api_identifier.clone()),
            description: schema.base.comment.clone(),
            fields: schema.fields.clone(),
        }
    }

    /// Save the schema document to the server
    pub fn save_command(&self, on_saved: Rc<dyn Fn(())>) {
        let current = self.schema.get_untracked();

        if let Err(msg) = current.validate() {
            self.error.set(Some(msg));
            return;
        }

        let dto = Self::to_dto(&current, self.edit_mode.get_untracked());
        let on_saved_cb = on_saved.clone();
        let error = self.error;
        wasm_bindgen_futures::spawn_local(async move {
            match model::save_form(&dto).await {
                Ok(()) => (on_saved_cb)(()),
                Err(e) => error.set(Some(e)),
            }
        });
    }
}
