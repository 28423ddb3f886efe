use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор направления
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DestinationId(pub Uuid);

impl DestinationId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for DestinationId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(DestinationId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Kind (wizard step level)
// ============================================================================

/// Уровень направления в иерархии: регион → субрегион → зона.
///
/// The order doubles as the wizard step order and the names double as the
/// slug route parameter names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationKind {
    Region,
    Subregion,
    Zone,
}

impl DestinationKind {
    /// Wizard steps, root first
    pub const WIZARD_ORDER: [DestinationKind; 3] =
        [Self::Region, Self::Subregion, Self::Zone];

    /// Route template parameter name for this level
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Region => "region",
            Self::Subregion => "subregion",
            Self::Zone => "zone",
        }
    }

    pub fn from_tag(s: &str) -> Result<Self, String> {
        match s {
            "region" => Ok(Self::Region),
            "subregion" => Ok(Self::Subregion),
            "zone" => Ok(Self::Zone),
            other => Err(format!("unknown destination kind: {}", other)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Region => "Region",
            Self::Subregion => "Subregion",
            Self::Zone => "Zone",
        }
    }

    /// Следующий уровень вниз (None для листа)
    pub fn child(&self) -> Option<DestinationKind> {
        match self {
            Self::Region => Some(Self::Subregion),
            Self::Subregion => Some(Self::Zone),
            Self::Zone => None,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Self::Region => 0,
            Self::Subregion => 1,
            Self::Zone => 2,
        }
    }

    /// Parameter names for the slug engine, wizard order
    pub fn wizard_param_names() -> [&'static str; 3] {
        [
            Self::Region.as_str(),
            Self::Subregion.as_str(),
            Self::Zone.as_str(),
        ]
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Направление (узел иерархии локаций для слаг-мастера)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    #[serde(flatten)]
    pub base: BaseAggregate<DestinationId>,

    pub kind: DestinationKind,

    /// Родительский узел; None для регионов
    #[serde(rename = "parentId")]
    pub parent_id: Option<String>,
}

impl Destination {
    /// Создать новое направление для вставки в БД
    pub fn new_for_insert(
        kind: DestinationKind,
        name: String,
        parent_id: Option<String>,
    ) -> Self {
        let code = format!("DST-{}", &Uuid::new_v4().to_string()[..8]);
        Self {
            base: BaseAggregate::new(DestinationId::new_v4(), code, name),
            kind,
            parent_id,
        }
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Name must not be empty".into());
        }
        match (self.kind, &self.parent_id) {
            (DestinationKind::Region, Some(_)) => {
                Err("A region must not have a parent".into())
            }
            (DestinationKind::Region, None) => Ok(()),
            (_, None) => Err(format!("A {} needs a parent", self.kind.as_str())),
            (_, Some(_)) => Ok(()),
        }
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Destination {
    type Id = DestinationId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "c003"
    }

    fn collection_name() -> &'static str {
        "destination"
    }

    fn element_name() -> &'static str {
        "Destination"
    }

    fn list_name() -> &'static str {
        "Destinations"
    }
}

// ============================================================================
// Tree DTO (the Hierarchy Provider's read contract)
// ============================================================================

/// Узел дерева направлений, как его отдает API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DestinationNode {
    pub id: String,
    pub name: String,
    pub kind: DestinationKind,
    #[serde(default)]
    pub children: Vec<DestinationNode>,
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO создания направлений.
///
/// `names` may carry several comma- or newline-separated names; the service
/// creates one node per non-empty segment.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DestinationCreateDto {
    pub kind: String,
    pub names: String,
    #[serde(rename = "parentId")]
    pub parent_id: Option<String>,
}

impl DestinationCreateDto {
    /// Разбить `names` на отдельные имена узлов
    pub fn split_names(&self) -> Vec<String> {
        self.names
            .split(|c| c == ',' || c == '\n')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wizard_order_matches_depth() {
        for (i, kind) in DestinationKind::WIZARD_ORDER.iter().enumerate() {
            assert_eq!(kind.depth(), i);
        }
    }

    #[test]
    fn test_kind_chain_ends_at_zone() {
        assert_eq!(DestinationKind::Region.child(), Some(DestinationKind::Subregion));
        assert_eq!(DestinationKind::Subregion.child(), Some(DestinationKind::Zone));
        assert_eq!(DestinationKind::Zone.child(), None);
    }

    #[test]
    fn test_region_with_parent_fails_validation() {
        let node = Destination::new_for_insert(
            DestinationKind::Region,
            "Caribe".into(),
            Some("parent".into()),
        );
        assert!(node.validate().is_err());
    }

    #[test]
    fn test_zone_without_parent_fails_validation() {
        let node =
            Destination::new_for_insert(DestinationKind::Zone, "Cartagena".into(), None);
        assert!(node.validate().is_err());
    }

    #[test]
    fn test_split_names_handles_bulk_input() {
        let dto = DestinationCreateDto {
            kind: "zone".into(),
            names: "Cartagena, Santa Marta\n  Barú ,".into(),
            parent_id: Some("p".into()),
        };
        assert_eq!(
            dto.split_names(),
            vec!["Cartagena", "Santa Marta", "Barú"]
        );
    }
}
