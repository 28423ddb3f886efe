use super::model;
use crate::domain::c001_content_type::ui::details::model as content_type_model;
use contracts::domain::c001_content_type::aggregate::ContentType;
use contracts::domain::c002_entry::aggregate::{EntryDto, EntryStatus, ValueBag};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use std::rc::Rc;

/// ViewModel формы записи: схема читается, мешок значений мутируется
/// рендерером поле за полем
#[derive(Clone)]
pub struct EntryDetailsViewModel {
    pub content_type: RwSignal<Option<ContentType>>,
    pub values: RwSignal<ValueBag>,
    pub title: RwSignal<String>,
    pub status: RwSignal<EntryStatus>,
    pub entry_id: RwSignal<Option<String>>,
    /// Обязательные поля без значения после попытки сохранения
    pub missing: RwSignal<Vec<String>>,
    /// Схема не загрузилась или повреждена: форма не монтируется
    pub fatal: RwSignal<Option<String>>,
    pub error: RwSignal<Option<String>>,
}

impl EntryDetailsViewModel {
    pub fn new() -> Self {
        Self {
            content_type: RwSignal::new(None),
            values: RwSignal::new(ValueBag::new()),
            title: RwSignal::new(String::new()),
            status: RwSignal::new(EntryStatus::Draft),
            entry_id: RwSignal::new(None),
            missing: RwSignal::new(Vec::new()),
            fatal: RwSignal::new(None),
            error: RwSignal::new(None),
        }
    }

    /// Схема обязана гидратироваться до монтирования формы; затем, в режиме
    /// редактирования, поднимаем запись
    pub fn load(&self, content_type_id: String, entry_id: Option<String>) {
        let content_type = self.content_type;
        let values = self.values;
        let title = self.title;
        let status = self.status;
        let entry_id_signal = self.entry_id;
        let fatal = self.fatal;
        wasm_bindgen_futures::spawn_local(async move {
            let document = match content_type_model::fetch_document(content_type_id).await {
                Ok(document) => document,
                Err(e) => {
                    fatal.set(Some(format!("Ошибка загрузки схемы: {}", e)));
                    return;
                }
            };
            let schema = match ContentType::hydrate(document) {
                Ok(schema) => schema,
                Err(e) => {
                    fatal.set(Some(format!("Схема повреждена: {}", e)));
                    return;
                }
            };
            content_type.set(Some(schema));

            if let Some(id) = entry_id {
                match model::fetch_by_id(id).await {
                    Ok(entry) => {
                        entry_id_signal.set(Some(entry.base.id.as_string()));
                        title.set(entry.base.description.clone());
                        status.set(entry.status);
                        values.set(entry.data);
                    }
                    Err(e) => fatal.set(Some(format!("Ошибка загрузки записи: {}", e))),
                }
            }
        });
    }

    pub fn is_edit_mode(&self) -> impl Fn() -> bool + '_ {
        move || self.entry_id.get().is_some()
    }

    /// Save the entry document to the server
    pub fn save_command(&self, on_saved: Rc<dyn Fn(())>) {
        let Some(schema) = self.content_type.get_untracked() else {
            return;
        };

        if self.title.get_untracked().trim().is_empty() {
            self.error.set(Some("Заголовок обязателен".to_string()));
            return;
        }

        // Обязательные поля подсвечиваются, но черновик сохранять можно
        let bag = self.values.get_untracked();
        let missing_now = bag.missing_required(&schema.fields);
        self.missing.set(missing_now.clone());
        if self.status.get_untracked() == EntryStatus::Published && !missing_now.is_empty() {
            self.error.set(Some(format!(
                "Для публикации заполните: {}",
                missing_now.join(", ")
            )));
            return;
        }

        let dto = EntryDto {
            id: self.entry_id.get_untracked(),
            title: self.title.get_untracked(),
            content_type_ref: schema.base.id.as_string(),
            data: bag,
            status: self.status.get_untracked(),
        };

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
