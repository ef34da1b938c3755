//! DAG 展平
//!
//! CSG 结构在构建时可以是有向无环图，同一实例出现在多个位置。
//! 网格导出等下游处理要求严格的树结构，因此需要先把每个位置复制成独立实例。

use crate::error::CsgError;
use crate::node::{CsgNode, CsgRef, NodeKind};
use std::collections::{HashMap, HashSet};

/// 展平：返回一棵新树，其中每个位置都是新建的独立实例
///
/// 子节点先于父节点重建。通过多条路径可达的节点在每条路径上各复制一次。
/// 遇到无法复制的自定义实体时返回 `UnsupportedVariant`，不返回部分结果。
pub fn flatten(dag_root: &CsgRef) -> Result<CsgRef, CsgError> {
    let tree = copy_node(dag_root)?;
    // 统计需要整图遍历，仅在开启 debug 时计算
    if tracing::enabled!(tracing::Level::DEBUG) {
        tracing::debug!(
            nodes = node_count(&tree),
            shared_instances = shared_nodes(dag_root).len(),
            "flattened CSG graph"
        );
    }
    Ok(tree)
}

fn copy_all(nodes: &[CsgRef]) -> Result<Vec<CsgRef>, CsgError> {
    nodes.iter().map(copy_node).collect()
}

fn copy_node(node: &CsgRef) -> Result<CsgRef, CsgError> {
    let kind = match node.kind() {
        NodeKind::Primitive(primitive) => NodeKind::Primitive(primitive.clone()),
        NodeKind::Custom(solid) => match solid.duplicate() {
            Some(copy) => NodeKind::Custom(copy),
            None => {
                tracing::warn!(variant = solid.type_name(), "cannot copy custom solid");
                return Err(CsgError::UnsupportedVariant(solid.type_name().to_string()));
            }
        },
        NodeKind::Transform { child, transform } => NodeKind::Transform {
            child: copy_node(child)?,
            transform: *transform,
        },
        NodeKind::Scale { child, factor } => NodeKind::Scale {
            child: copy_node(child)?,
            factor: *factor,
        },
        NodeKind::Translate { child, offset } => NodeKind::Translate {
            child: copy_node(child)?,
            offset: *offset,
        },
        NodeKind::Union { children } => NodeKind::Union {
            children: copy_all(children)?,
        },
        NodeKind::Difference { base, subtracted } => NodeKind::Difference {
            base: copy_node(base)?,
            subtracted: copy_all(subtracted)?,
        },
        NodeKind::Intersection { children } => NodeKind::Intersection {
            children: copy_all(children)?,
        },
    };

    Ok(CsgNode::new(kind)
        .with_properties(node.properties().clone())
        .into_ref())
}

/// 树中的位置总数（共享实例按出现次数计）
pub fn node_count(root: &CsgRef) -> usize {
    1 + root.children().into_iter().map(node_count).sum::<usize>()
}

/// 通过多条路径可达的实例，按首次出现顺序
pub fn shared_nodes(root: &CsgRef) -> Vec<CsgRef> {
    let mut visits: HashMap<usize, usize> = HashMap::new();
    let mut order = Vec::new();
    count_visits(root, &mut visits, &mut order);

    order
        .into_iter()
        .filter(|node| visits.get(&node.instance_id()).copied().unwrap_or(0) > 1)
        .collect()
}

fn count_visits(node: &CsgRef, visits: &mut HashMap<usize, usize>, order: &mut Vec<CsgRef>) {
    let count = visits.entry(node.instance_id()).or_insert(0);
    *count += 1;
    if *count > 1 {
        // 重复访问：子树中每个实例的计数加一
        bump_subtree(node, visits);
        return;
    }
    order.push(node.clone());
    for child in node.children() {
        count_visits(child, visits, order);
    }
}

fn bump_subtree(node: &CsgRef, visits: &mut HashMap<usize, usize>) {
    for child in node.children() {
        *visits.entry(child.instance_id()).or_insert(0) += 1;
        bump_subtree(child, visits);
    }
}

/// 是否为严格的树（没有实例出现在两个位置）
pub fn is_tree(root: &CsgRef) -> bool {
    let mut seen = HashSet::new();
    all_unique(root, &mut seen)
}

fn all_unique(node: &CsgRef, seen: &mut HashSet<usize>) -> bool {
    if !seen.insert(node.instance_id()) {
        return false;
    }
    node.children().into_iter().all(|child| all_unique(child, seen))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{BoundingBox3, Point3, Vector3};
    use crate::ops::{mirror_across_x, translate};
    use crate::primitive::{CustomSolid, Primitive};
    use crate::transform::Transform3D;
    use std::sync::Arc;

    fn unit_cube() -> CsgRef {
        CsgNode::primitive(Primitive::cuboid_at_origin(Vector3::repeat(1.0))).into_ref()
    }

    fn collect_ids(node: &CsgRef, ids: &mut Vec<usize>) {
        ids.push(node.instance_id());
        for child in node.children() {
            collect_ids(child, ids);
        }
    }

    #[derive(Debug)]
    struct Marker {
        copyable: bool,
    }

    impl CustomSolid for Marker {
        fn type_name(&self) -> &str {
            "Marker"
        }

        fn bounding_box(&self) -> BoundingBox3 {
            BoundingBox3::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0))
        }

        fn duplicate(&self) -> Option<Arc<dyn CustomSolid>> {
            self.copyable.then(|| Arc::new(Marker { copyable: true }) as Arc<dyn CustomSolid>)
        }
    }

    #[test]
    fn test_flatten_splits_shared_instance() {
        let shared = CsgNode::primitive(Primitive::sphere(1.0))
            .with_name("shared")
            .into_ref();
        let left = translate(&shared, Vector3::new(-2.0, 0.0, 0.0), "left");
        let right = mirror_across_x(&left, 0.0, "right");
        let dag = &left + &right;

        assert!(!is_tree(&dag));
        assert_eq!(shared_nodes(&dag).len(), 2);

        let tree = flatten(&dag).unwrap();
        assert!(is_tree(&tree));
        assert!(shared_nodes(&tree).is_empty());
        assert_eq!(tree, dag);
        assert_eq!(node_count(&tree), node_count(&dag));

        let mut ids = Vec::new();
        collect_ids(&tree, &mut ids);
        let unique: HashSet<usize> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());

        // 原图不受影响
        let mut dag_ids = Vec::new();
        collect_ids(&dag, &mut dag_ids);
        assert!(dag_ids.iter().all(|id| !unique.contains(id)));
        assert!(!is_tree(&dag));
    }

    #[test]
    fn test_flatten_copies_every_variant() {
        let cube = unit_cube();
        let moved = CsgNode::transform(cube.clone(), Transform3D::rotation_x(0.3)).into_ref();
        let cut = &moved - &cube;
        let both = CsgNode::intersection(vec![cut.clone(), cube.clone()]).into_ref();
        let marker = CsgNode::custom(Arc::new(Marker { copyable: true })).into_ref();
        let root = CsgNode::union(vec![both, marker.clone(), marker])
            .with_name("root")
            .into_ref();

        let tree = flatten(&root).unwrap();
        assert!(is_tree(&tree));
        assert_eq!(tree, root);
        assert_eq!(tree.name(), "root");
        assert_eq!(tree.bounding_box(), root.bounding_box());
    }

    #[test]
    fn test_flatten_rejects_uncopyable_custom_solid() {
        let marker = CsgNode::custom(Arc::new(Marker { copyable: false })).into_ref();
        let root = &unit_cube() + &marker;

        assert_eq!(
            flatten(&root),
            Err(CsgError::UnsupportedVariant("Marker".to_string()))
        );
    }

    #[test]
    fn test_tree_is_left_untouched_structurally() {
        let root = &unit_cube() - &unit_cube();
        assert!(is_tree(&root));
        let tree = flatten(&root).unwrap();
        assert_eq!(tree, root);
        assert!(!tree.ptr_eq(&root));
    }

    #[test]
    fn test_flatten_same_result_with_and_without_debug_logging() {
        let leaf = unit_cube();
        let inner = translate(&leaf, Vector3::new(1.0, 0.0, 0.0), "inner");
        let dag = CsgNode::union(vec![inner.clone(), inner, leaf]).into_ref();

        let quiet = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_test_writer()
            .finish();
        let plain = tracing::subscriber::with_default(quiet, || flatten(&dag)).unwrap();

        let verbose = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        let logged = tracing::subscriber::with_default(verbose, || flatten(&dag)).unwrap();

        assert_eq!(plain, logged);
        assert!(is_tree(&plain) && is_tree(&logged));
        assert_eq!(node_count(&plain), 6);
    }

    #[test]
    fn test_shared_nodes_counts_nested_sharing() {
        let leaf = unit_cube();
        let inner = translate(&leaf, Vector3::new(1.0, 0.0, 0.0), "");
        let root = CsgNode::union(vec![inner.clone(), inner.clone()]).into_ref();

        let shared = shared_nodes(&root);
        assert_eq!(shared.len(), 2);
        assert!(shared[0].ptr_eq(&inner));
        assert!(shared[1].ptr_eq(&leaf));
        assert_eq!(node_count(&root), 5);
    }
}
