use super::repository;
use contracts::domain::c003_destination::aggregate::{
    Destination, DestinationCreateDto, DestinationKind, DestinationNode,
};
use contracts::domain::common::AggregateId;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Построение дерева: сначала группируем детей, потом строим узлы.
///
/// A parent_id pointing at a node that is not in the list (e.g. already
/// soft-deleted) promotes the node to the root level instead of dropping it.
fn build_tree(items: Vec<Destination>) -> Vec<DestinationNode> {
    if items.is_empty() {
        return vec![];
    }

    let existing_ids: HashSet<String> =
        items.iter().map(|item| item.base.id.as_string()).collect();

    let mut children_map: HashMap<Option<String>, Vec<Destination>> = HashMap::new();
    for item in items {
        let normalized_parent = match &item.parent_id {
            Some(pid) if existing_ids.contains(pid) => Some(pid.clone()),
            _ => None,
        };
        children_map.entry(normalized_parent).or_default().push(item);
    }

    fn build_node(
        item: &Destination,
        children_map: &HashMap<Option<String>, Vec<Destination>>,
    ) -> DestinationNode {
        let id = item.base.id.as_string();
        let mut children: Vec<DestinationNode> = children_map
            .get(&Some(id.clone()))
            .map(|kids| kids.iter().map(|kid| build_node(kid, children_map)).collect())
            .unwrap_or_default();
        children.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        DestinationNode {
            id,
            name: item.base.description.clone(),
            kind: item.kind,
            children,
        }
    }

    let mut roots: Vec<DestinationNode> = children_map
        .get(&None)
        .map(|root_items| {
            root_items
                .iter()
                .map(|item| build_node(item, &children_map))
                .collect()
        })
        .unwrap_or_default();
    roots.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    roots
}

/// Собрать id узла и всех его потомков (для каскадного удаления)
fn collect_subtree_ids(all: &[Destination], root_id: &str) -> Vec<String> {
    let mut by_parent: HashMap<&str, Vec<&Destination>> = HashMap::new();
    for item in all {
        if let Some(pid) = &item.parent_id {
            by_parent.entry(pid.as_str()).or_default().push(item);
        }
    }

    let mut collected = vec![root_id.to_string()];
    let mut queue = vec![root_id.to_string()];
    while let Some(current) = queue.pop() {
        if let Some(kids) = by_parent.get(current.as_str()) {
            for kid in kids {
                let id = kid.base.id.as_string();
                collected.push(id.clone());
                queue.push(id);
            }
        }
    }
    collected
}

/// Дерево направлений для мастера слагов
pub async fn tree() -> anyhow::Result<Vec<DestinationNode>> {
    let items = repository::list_all().await?;
    Ok(build_tree(items))
}

/// Создание направлений; `names` в DTO может содержать несколько имен
/// через запятую или перенос строки — по узлу на каждое.
pub async fn create_bulk(dto: DestinationCreateDto) -> anyhow::Result<Vec<Destination>> {
    let kind = DestinationKind::from_tag(&dto.kind).map_err(|e| anyhow::anyhow!(e))?;
    let names = dto.split_names();
    if names.is_empty() {
        anyhow::bail!("No names supplied");
    }

    let mut created = Vec::with_capacity(names.len());
    for name in names {
        let mut aggregate = Destination::new_for_insert(kind, name, dto.parent_id.clone());
        aggregate
            .validate()
            .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
        aggregate.before_write();
        repository::insert(&aggregate).await?;
        created.push(aggregate);
    }
    Ok(created)
}

/// Каскадное удаление узла со всеми потомками
pub async fn delete_cascade(id: Uuid) -> anyhow::Result<u64> {
    let all = repository::list_all().await?;
    let ids = collect_subtree_ids(&all, &id.to_string());
    repository::soft_delete_many(&ids).await
}

/// Вставка тестовых данных (колумбийская география)
pub async fn insert_test_data() -> anyhow::Result<()> {
    let seeds: [(&str, &[(&str, &[&str])]); 2] = [
        (
            "Caribe",
            &[
                ("Bolívar", &["Cartagena", "Playa Blanca", "Islas del Rosario"]),
                ("Magdalena", &["Santa Marta", "Tayrona"]),
            ],
        ),
        (
            "Andina",
            &[("Antioquia", &["Medellín", "Guatapé"]), ("Boyacá", &["Villa de Leyva"])],
        ),
    ];

    for (region_name, subregions) in seeds {
        let region = create_bulk(DestinationCreateDto {
            kind: "region".into(),
            names: region_name.into(),
            parent_id: None,
        })
        .await?;
        let region_id = region[0].base.id.as_string();

        for (subregion_name, zones) in subregions {
            let subregion = create_bulk(DestinationCreateDto {
                kind: "subregion".into(),
                names: (*subregion_name).into(),
                parent_id: Some(region_id.clone()),
            })
            .await?;
            let subregion_id = subregion[0].base.id.as_string();

            create_bulk(DestinationCreateDto {
                kind: "zone".into(),
                names: zones.join(", "),
                parent_id: Some(subregion_id),
            })
            .await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(kind: DestinationKind, name: &str, parent: Option<&Destination>) -> Destination {
        Destination::new_for_insert(
            kind,
            name.to_string(),
            parent.map(|p| p.base.id.as_string()),
        )
    }

    #[test]
    fn test_build_tree_nests_three_levels() {
        let region = node(DestinationKind::Region, "Caribe", None);
        let subregion = node(DestinationKind::Subregion, "Bolívar", Some(&region));
        let zone = node(DestinationKind::Zone, "Cartagena", Some(&subregion));

        let tree = build_tree(vec![zone, region.clone(), subregion]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].name, "Caribe");
        assert_eq!(tree[0].children[0].name, "Bolívar");
        assert_eq!(tree[0].children[0].children[0].name, "Cartagena");
    }

    #[test]
    fn test_orphaned_parent_reference_promotes_to_root() {
        let mut lost = node(DestinationKind::Subregion, "Perdido", None);
        lost.parent_id = Some("missing-id".into());
        let tree = build_tree(vec![lost]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].name, "Perdido");
    }

    #[test]
    fn test_collect_subtree_ids_covers_all_descendants() {
        let region = node(DestinationKind::Region, "Caribe", None);
        let subregion = node(DestinationKind::Subregion, "Bolívar", Some(&region));
        let zone_a = node(DestinationKind::Zone, "Cartagena", Some(&subregion));
        let zone_b = node(DestinationKind::Zone, "Barú", Some(&subregion));
        let other = node(DestinationKind::Region, "Andina", None);

        let all = vec![
            region.clone(),
            subregion.clone(),
            zone_a.clone(),
            zone_b.clone(),
            other.clone(),
        ];
        let ids = collect_subtree_ids(&all, &region.base.id.as_string());

        assert_eq!(ids.len(), 4);
        assert!(!ids.contains(&other.base.id.as_string()));
        assert!(ids.contains(&zone_b.base.id.as_string()));
    }
}
