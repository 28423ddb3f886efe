//! Headless-состояние мастера направлений: три зависимых шага,
//! выбор на шаге i сбрасывает все шаги глубже.

use contracts::domain::c003_destination::aggregate::DestinationNode;

pub const STEP_COUNT: usize = 3;

/// Выбранные узлы по уровням (id узла дерева)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WizardState {
    selections: [Option<String>; STEP_COUNT],
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self, level: usize) -> Option<&String> {
        self.selections.get(level).and_then(|s| s.as_ref())
    }

    /// Выбор на уровне: каскадно инвалидирует все уровни глубже.
    ///
    /// Stale child selections must never survive a parent change.
    pub fn select(&mut self, level: usize, node_id: Option<String>) {
        if level >= STEP_COUNT {
            return;
        }
        self.selections[level] = node_id;
        for deeper in self.selections.iter_mut().skip(level + 1) {
            *deeper = None;
        }
    }

    /// Сбросить выбор, указывающий на исчезнувший из дерева узел.
    /// Каскад дальше делает `select`.
    pub fn prune_missing(&mut self, tree: &[DestinationNode]) {
        for level in 0..STEP_COUNT {
            if self.selection(level).is_some() && self.node_at(tree, level).is_none() {
                self.select(level, None);
                return;
            }
        }
    }

    /// Варианты выбора на уровне: дети выбранного узла уровнем выше,
    /// для корня — вершины дерева
    pub fn options<'t>(
        &self,
        tree: &'t [DestinationNode],
        level: usize,
    ) -> Vec<&'t DestinationNode> {
        match level {
            0 => tree.iter().collect(),
            _ => self
                .node_at(tree, level - 1)
                .map(|parent| parent.children.iter().collect())
                .unwrap_or_default(),
        }
    }

    /// Узел, выбранный на уровне (если выбор еще валиден)
    pub fn node_at<'t>(
        &self,
        tree: &'t [DestinationNode],
        level: usize,
    ) -> Option<&'t DestinationNode> {
        let id = self.selection(level)?;
        self.options(tree, level).into_iter().find(|n| &n.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::c003_destination::aggregate::DestinationKind;

    fn node(id: &str, kind: DestinationKind, children: Vec<DestinationNode>) -> DestinationNode {
        DestinationNode {
            id: id.to_string(),
            name: id.to_string(),
            kind,
            children,
        }
    }

    fn sample_tree() -> Vec<DestinationNode> {
        vec![node(
            "caribe",
            DestinationKind::Region,
            vec![
                node(
                    "bolivar",
                    DestinationKind::Subregion,
                    vec![node("cartagena", DestinationKind::Zone, vec![])],
                ),
                node("magdalena", DestinationKind::Subregion, vec![]),
            ],
        )]
    }

    #[test]
    fn test_root_options_are_tree_roots() {
        let tree = sample_tree();
        let state = WizardState::new();
        assert_eq!(state.options(&tree, 0).len(), 1);
        assert!(state.options(&tree, 1).is_empty());
    }

    #[test]
    fn test_options_follow_the_parent_selection() {
        let tree = sample_tree();
        let mut state = WizardState::new();
        state.select(0, Some("caribe".into()));
        let names: Vec<&str> = state
            .options(&tree, 1)
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(names, vec!["bolivar", "magdalena"]);
    }

    // Каскадный сброс: для любого i выбор на i очищает все j > i
    #[test]
    fn test_selecting_a_parent_clears_every_deeper_step() {
        let tree = sample_tree();
        for level in 0..STEP_COUNT {
            let mut state = WizardState::new();
            state.select(0, Some("caribe".into()));
            state.select(1, Some("bolivar".into()));
            state.select(2, Some("cartagena".into()));

            state.select(level, Some("changed".into()));
            for deeper in level + 1..STEP_COUNT {
                assert_eq!(
                    state.selection(deeper),
                    None,
                    "step {} must be cleared by a change at step {}",
                    deeper,
                    level
                );
            }
        }
        let _ = tree;
    }

    #[test]
    fn test_reselecting_same_parent_still_clears_children() {
        let mut state = WizardState::new();
        state.select(0, Some("caribe".into()));
        state.select(1, Some("bolivar".into()));
        state.select(0, Some("caribe".into()));
        assert_eq!(state.selection(1), None);
    }

    #[test]
    fn test_prune_missing_drops_a_deleted_selection() {
        let mut tree = sample_tree();
        let mut state = WizardState::new();
        state.select(0, Some("caribe".into()));
        state.select(1, Some("bolivar".into()));
        state.select(2, Some("cartagena".into()));

        // Субрегион удалили; его дети ушли вместе с ним
        tree[0].children.retain(|n| n.id != "bolivar");
        state.prune_missing(&tree);

        assert_eq!(state.selection(0).map(String::as_str), Some("caribe"));
        assert_eq!(state.selection(1), None);
        assert_eq!(state.selection(2), None);
    }

    #[test]
    fn test_out_of_range_select_is_ignored() {
        let mut state = WizardState::new();
        state.select(7, Some("x".into()));
        assert_eq!(state, WizardState::new());
    }
}
