use contracts::domain::c001_content_type::aggregate::{ContentType, FieldId};
use contracts::shared::metadata::FieldKind;

/// Минимальное смещение указателя, после которого жест считается
/// перетаскиванием, а не кликом
pub const DRAG_ACTIVATION_DISTANCE: f64 = 5.0;

/// Откуда тянут
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOrigin {
    /// Palette entry: dropping creates a new field of this kind
    Palette(FieldKind),
    /// Existing field: dropping moves it
    Existing(FieldId),
}

/// Куда сейчас наведен указатель
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    EmptyCanvas,
    Before(usize),
    After(usize),
    OnField(FieldId),
}

/// Ровно одна мутация схемы на завершенный drag — или ни одной
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaCommand {
    Insert {
        kind: FieldKind,
        /// None — в конец
        index: Option<usize>,
    },
    Move {
        from: usize,
        /// Координата после изъятия элемента
        to: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Idle,
    /// Pointer is down but the activation threshold is not crossed yet;
    /// releasing here is an ordinary click
    Armed { origin: DragOrigin, start: (f64, f64) },
    Dragging {
        origin: DragOrigin,
        over: Option<DropTarget>,
    },
}

/// Состояние одного drag-взаимодействия.
///
/// Lives only between pointer-down and pointer-up/cancel and is reset
/// unconditionally on drop, so a stale target can never leak into the next
/// drag.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposerSession {
    phase: Phase,
}

impl Default for ComposerSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ComposerSession {
    pub fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    pub fn dragging_origin(&self) -> Option<&DragOrigin> {
        match &self.phase {
            Phase::Dragging { origin, .. } => Some(origin),
            _ => None,
        }
    }

    pub fn current_target(&self) -> Option<DropTarget> {
        match &self.phase {
            Phase::Dragging { over, .. } => *over,
            _ => None,
        }
    }

    /// Нажатие указателя: взводим сессию, но drag еще не начат.
    /// Перезапуск из любой фазы — потерянный pointer-up не должен съесть
    /// следующий жест.
    pub fn pointer_down(&mut self, origin: DragOrigin, x: f64, y: f64) {
        self.phase = Phase::Armed {
            origin,
            start: (x, y),
        };
    }

    /// Движение указателя: активирует drag после порога смещения
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if let Phase::Armed { origin, start } = &self.phase {
            let (sx, sy) = *start;
            let distance = ((x - sx).powi(2) + (y - sy).powi(2)).sqrt();
            if distance >= DRAG_ACTIVATION_DISTANCE {
                self.phase = Phase::Dragging {
                    origin: origin.clone(),
                    over: None,
                };
            }
        }
    }

    /// Наведение на цель. Идемпотентно и без побочных эффектов: шквал
    /// pointer-move не дает ни мерцания, ни двойных вставок.
    pub fn drag_over(&mut self, target: DropTarget) {
        if let Phase::Dragging { over, .. } = &mut self.phase {
            *over = Some(target);
        }
    }

    /// Указатель ушел с валидной поверхности
    pub fn drag_leave(&mut self) {
        if let Phase::Dragging { over, .. } = &mut self.phase {
            *over = None;
        }
    }

    /// Отпускание указателя. Сессия уничтожается безусловно; команда
    /// возвращается максимум одна.
    #[must_use]
    pub fn drop(&mut self, schema: &ContentType) -> Option<SchemaCommand> {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        match phase {
            Phase::Dragging {
                origin,
                over: Some(target),
            } => resolve(&origin, target, schema),
            // Armed = клик без drag; Dragging без цели = drop мимо
            _ => None,
        }
    }

    /// Escape или уход за пределы поверхности: без мутаций, всегда в idle
    pub fn cancel(&mut self) {
        self.phase = Phase::Idle;
    }
}

/// Превратить (источник, цель) в точную команду над схемой.
///
/// Любая комбинация, не описанная ниже, разрешается в `None` — молчаливое
/// сохранение текущего состояния, не ошибка.
fn resolve(
    origin: &DragOrigin,
    target: DropTarget,
    schema: &ContentType,
) -> Option<SchemaCommand> {
    match origin {
        DragOrigin::Palette(kind) => {
            if schema.fields.is_empty() {
                return Some(SchemaCommand::Insert {
                    kind: kind.clone(),
                    index: None,
                });
            }
            let index = match target {
                DropTarget::EmptyCanvas => None,
                DropTarget::Before(i) => Some(i),
                DropTarget::After(i) => Some(i + 1),
                // Попадание "на поле" без явного before/after: вставка после
                DropTarget::OnField(id) => Some(schema.field_index(id)? + 1),
            };
            Some(SchemaCommand::Insert {
                kind: kind.clone(),
                index,
            })
        }
        DragOrigin::Existing(field_id) => {
            let from = schema.field_index(*field_id)?;
            let to = match target {
                DropTarget::EmptyCanvas => return None,
                DropTarget::Before(i) => {
                    if from < i {
                        i - 1
                    } else {
                        i
                    }
                }
                DropTarget::After(i) => {
                    if from <= i {
                        i
                    } else {
                        i + 1
                    }
                }
                DropTarget::OnField(target_id) => {
                    if target_id == *field_id {
                        return None;
                    }
                    let i = schema.field_index(target_id)?;
                    if from <= i {
                        i
                    } else {
                        i + 1
                    }
                }
            };
            if to == from {
                return None;
            }
            Some(SchemaCommand::Move { from, to })
        }
    }
}

/// Применить команду к схеме (единственная точка мутации из drag'а)
pub fn apply_command(schema: &mut ContentType, command: SchemaCommand) {
    use contracts::domain::c001_content_type::aggregate::FieldDefinition;
    match command {
        SchemaCommand::Insert { kind, index } => {
            schema.add_field(FieldDefinition::new(kind), index);
        }
        SchemaCommand::Move { from, to } => {
            schema.move_field(from, to);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema_with(labels: &[&str]) -> ContentType {
        use contracts::domain::c001_content_type::aggregate::FieldDefinition;
        let mut ct = ContentType::new_for_insert("Plan".into(), None);
        for label in labels {
            ct.add_field(FieldDefinition::with_label(FieldKind::Text, label), None);
        }
        ct
    }

    fn order(ct: &ContentType) -> Vec<String> {
        ct.fields.iter().map(|f| f.label.clone()).collect()
    }

    /// Довести сессию до состояния dragging
    fn dragging(origin: DragOrigin) -> ComposerSession {
        let mut session = ComposerSession::new();
        session.pointer_down(origin, 0.0, 0.0);
        session.pointer_move(20.0, 0.0);
        assert!(session.is_dragging());
        session
    }

    #[test]
    fn test_click_without_threshold_never_activates() {
        let schema = schema_with(&["A"]);
        let mut session = ComposerSession::new();
        session.pointer_down(DragOrigin::Palette(FieldKind::Text), 10.0, 10.0);
        session.pointer_move(12.0, 11.0);
        assert!(!session.is_dragging());
        assert_eq!(session.drop(&schema), None);
        assert_eq!(session, ComposerSession::new());
    }

    #[test]
    fn test_pointer_down_restarts_a_stale_session() {
        // pointer-up потерялся (ушел за пределы окна) — следующий жест
        // должен начаться с чистого листа
        let mut session = ComposerSession::new();
        session.pointer_down(DragOrigin::Palette(FieldKind::Text), 0.0, 0.0);
        session.pointer_down(DragOrigin::Palette(FieldKind::Date), 50.0, 50.0);
        session.pointer_move(70.0, 50.0);
        assert_eq!(
            session.dragging_origin(),
            Some(&DragOrigin::Palette(FieldKind::Date))
        );
    }

    #[test]
    fn test_drag_over_is_idempotent() {
        let mut session = dragging(DragOrigin::Palette(FieldKind::Text));
        session.drag_over(DropTarget::Before(1));
        let snapshot = session.clone();
        session.drag_over(DropTarget::Before(1));
        session.drag_over(DropTarget::Before(1));
        assert_eq!(session, snapshot);
    }

    #[test]
    fn test_palette_drop_on_empty_canvas_appends() {
        let schema = schema_with(&[]);
        let mut session = dragging(DragOrigin::Palette(FieldKind::Text));
        session.drag_over(DropTarget::EmptyCanvas);
        assert_eq!(
            session.drop(&schema),
            Some(SchemaCommand::Insert {
                kind: FieldKind::Text,
                index: None
            })
        );
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_palette_drop_before_and_after_resolve_to_exact_indices() {
        let schema = schema_with(&["A", "B"]);

        let mut session = dragging(DragOrigin::Palette(FieldKind::Number));
        session.drag_over(DropTarget::Before(1));
        assert_eq!(
            session.drop(&schema),
            Some(SchemaCommand::Insert {
                kind: FieldKind::Number,
                index: Some(1)
            })
        );

        let mut session = dragging(DragOrigin::Palette(FieldKind::Number));
        session.drag_over(DropTarget::After(1));
        assert_eq!(
            session.drop(&schema),
            Some(SchemaCommand::Insert {
                kind: FieldKind::Number,
                index: Some(2)
            })
        );
    }

    #[test]
    fn test_palette_drop_onto_field_inserts_after_it() {
        let schema = schema_with(&["A", "B"]);
        let mut session = dragging(DragOrigin::Palette(FieldKind::Date));
        session.drag_over(DropTarget::OnField(schema.fields[0].id));
        assert_eq!(
            session.drop(&schema),
            Some(SchemaCommand::Insert {
                kind: FieldKind::Date,
                index: Some(1)
            })
        );
    }

    // Сценарий: [A, B], тащим A за B → [B, A]
    #[test]
    fn test_move_first_field_after_second() {
        let mut schema = schema_with(&["A", "B"]);
        let a = schema.fields[0].id;
        let mut session = dragging(DragOrigin::Existing(a));
        session.drag_over(DropTarget::After(1));
        let command = session.drop(&schema).unwrap();
        assert_eq!(command, SchemaCommand::Move { from: 0, to: 1 });
        apply_command(&mut schema, command);
        assert_eq!(order(&schema), vec!["B", "A"]);
    }

    #[test]
    fn test_move_last_field_before_first() {
        let mut schema = schema_with(&["A", "B", "C"]);
        let c = schema.fields[2].id;
        let mut session = dragging(DragOrigin::Existing(c));
        session.drag_over(DropTarget::Before(0));
        let command = session.drop(&schema).unwrap();
        apply_command(&mut schema, command);
        assert_eq!(order(&schema), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_drop_onto_own_position_is_a_noop() {
        let schema = schema_with(&["A", "B"]);
        let a = schema.fields[0].id;

        let mut session = dragging(DragOrigin::Existing(a));
        session.drag_over(DropTarget::OnField(a));
        assert_eq!(session.drop(&schema), None);

        // Before своего же индекса — тоже no-op
        let mut session = dragging(DragOrigin::Existing(a));
        session.drag_over(DropTarget::Before(0));
        assert_eq!(session.drop(&schema), None);
    }

    #[test]
    fn test_existing_drop_onto_other_field_lands_after_it() {
        let mut schema = schema_with(&["A", "B", "C"]);
        let a = schema.fields[0].id;
        let c = schema.fields[2].id;
        let mut session = dragging(DragOrigin::Existing(a));
        session.drag_over(DropTarget::OnField(c));
        let command = session.drop(&schema).unwrap();
        apply_command(&mut schema, command);
        assert_eq!(order(&schema), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_drop_without_target_preserves_state() {
        let schema = schema_with(&["A"]);
        let mut session = dragging(DragOrigin::Palette(FieldKind::Text));
        assert_eq!(session.drop(&schema), None);
    }

    #[test]
    fn test_drag_leave_clears_the_target() {
        let schema = schema_with(&["A"]);
        let mut session = dragging(DragOrigin::Palette(FieldKind::Text));
        session.drag_over(DropTarget::After(0));
        session.drag_leave();
        assert_eq!(session.current_target(), None);
        assert_eq!(session.drop(&schema), None);
    }

    #[test]
    fn test_cancel_discards_the_session_without_mutation() {
        let mut session = dragging(DragOrigin::Palette(FieldKind::Text));
        session.drag_over(DropTarget::After(0));
        session.cancel();
        assert_eq!(session, ComposerSession::new());
    }

    #[test]
    fn test_session_is_reset_even_after_a_winning_drop() {
        let schema = schema_with(&["A"]);
        let mut session = dragging(DragOrigin::Palette(FieldKind::Text));
        session.drag_over(DropTarget::After(0));
        assert!(session.drop(&schema).is_some());
        // Следующий drag начинается с чистого листа
        assert_eq!(session, ComposerSession::new());
        assert_eq!(session.current_target(), None);
    }

    #[test]
    fn test_removed_field_resolves_to_noop() {
        // Цель исчезла между наведением и drop'ом
        let mut schema = schema_with(&["A", "B"]);
        let b = schema.fields[1].id;
        let mut session = dragging(DragOrigin::Palette(FieldKind::Text));
        session.drag_over(DropTarget::OnField(b));
        schema.remove_field(b);
        assert_eq!(session.drop(&schema), None);
    }
}
