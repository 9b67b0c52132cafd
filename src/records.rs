use log::warn;

use crate::{ElementBlock, ElementDataset, ElementShape, NodeDataset};
use std::collections::BTreeMap;

/// One node of dataset 2411, addressed by its node number.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeRecord {
    pub def_cs: i32,
    pub disp_cs: i32,
    pub color: i32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// One element of dataset 2412, addressed by its element number.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementRecord {
    pub fe_descriptor: i32,
    pub phys_table: i32,
    pub mat_table: i32,
    pub color: i32,
    pub nodes_nums: Vec<u64>,
}

impl ElementRecord {
    /// Always the connectivity length, never a stored count.
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.nodes_nums.len()
    }
}

/// Reshape a node dataset into a map keyed by node number.
///
/// A duplicate node number keeps the last occurrence.
#[must_use]
pub fn nodes_by_id(dset: &NodeDataset) -> BTreeMap<u64, NodeRecord> {
    let mut nodes = BTreeMap::new();
    for i in 0..dset.len() {
        nodes.insert(
            dset.node_nums[i],
            NodeRecord {
                def_cs: dset.def_cs[i],
                disp_cs: dset.disp_cs[i],
                color: dset.color[i],
                x: dset.x[i],
                y: dset.y[i],
                z: dset.z[i],
            },
        );
    }
    nodes
}

/// Reshape an element dataset into a single map keyed by element number.
///
/// All shape blocks merge into one flat map; element numbers are assumed
/// unique across blocks.
#[must_use]
pub fn elements_by_id(dset: &ElementDataset) -> BTreeMap<u64, ElementRecord> {
    let mut elems = BTreeMap::new();
    for (_, block) in dset.blocks() {
        for i in 0..block.len() {
            elems.insert(
                block.element_nums[i],
                ElementRecord {
                    fe_descriptor: block.fe_descriptor[i],
                    phys_table: block.phys_table[i],
                    mat_table: block.mat_table[i],
                    color: block.color[i],
                    nodes_nums: block.nodes_nums[i].clone(),
                },
            );
        }
    }
    elems
}

/// Reshape a node map back into a dataset, in ascending node number order.
#[must_use]
pub fn node_dataset(nodes: &BTreeMap<u64, NodeRecord>) -> NodeDataset {
    let mut node_nums = Vec::with_capacity(nodes.len());
    let mut def_cs = Vec::with_capacity(nodes.len());
    let mut disp_cs = Vec::with_capacity(nodes.len());
    let mut color = Vec::with_capacity(nodes.len());
    let mut x = Vec::with_capacity(nodes.len());
    let mut y = Vec::with_capacity(nodes.len());
    let mut z = Vec::with_capacity(nodes.len());

    for (&id, node) in nodes {
        node_nums.push(id);
        def_cs.push(node.def_cs);
        disp_cs.push(node.disp_cs);
        color.push(node.color);
        x.push(node.x);
        y.push(node.y);
        z.push(node.z);
    }

    NodeDataset::new(node_nums, def_cs, disp_cs, color, x, y, z)
}

/// Reshape an element map back into a dataset, in ascending element number
/// order, with one block per shape that has at least one element.
///
/// Elements whose connectivity length is neither 3 nor 4 are skipped with a
/// warning.
#[must_use]
pub fn element_dataset(elems: &BTreeMap<u64, ElementRecord>) -> ElementDataset {
    let mut tri = ElementBlock::default();
    let mut quad = ElementBlock::default();

    for (&id, elem) in elems {
        let block = match ElementShape::from_num_nodes(elem.num_nodes()) {
            Some(ElementShape::Triangle) => &mut tri,
            Some(ElementShape::Quad) => &mut quad,
            None => {
                warn!(
                    "element {id} has {} nodes, neither triangle nor quad: skipped",
                    elem.num_nodes()
                );
                continue;
            }
        };
        block.push(
            id,
            elem.fe_descriptor,
            elem.phys_table,
            elem.mat_table,
            elem.color,
            elem.nodes_nums.clone(),
        );
    }

    let mut dset = ElementDataset::new();
    if !tri.is_empty() {
        dset.insert(ElementShape::Triangle, tri);
    }
    if !quad.is_empty() {
        dset.insert(ElementShape::Quad, quad);
    }
    dset
}

#[cfg(test)]
mod tests {
    use super::{element_dataset, elements_by_id, node_dataset, nodes_by_id};
    use super::{ElementRecord, NodeRecord};
    use crate::{ElementBlock, ElementDataset, ElementShape, NodeDataset};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::BTreeMap;

    fn tri_record(nodes_nums: Vec<u64>) -> ElementRecord {
        ElementRecord {
            fe_descriptor: 91,
            phys_table: 1,
            mat_table: 1,
            color: 7,
            nodes_nums,
        }
    }

    #[test]
    fn test_nodes_by_id_single() {
        let dset = NodeDataset::new(
            vec![1],
            vec![0],
            vec![0],
            vec![1],
            vec![0.0],
            vec![0.0],
            vec![0.0],
        );
        let nodes = nodes_by_id(&dset);
        assert_eq!(nodes.len(), 1);
        assert_eq!(
            nodes[&1],
            NodeRecord {
                def_cs: 0,
                disp_cs: 0,
                color: 1,
                x: 0.0,
                y: 0.0,
                z: 0.0,
            }
        );

        // and back, same arrays in the same order
        assert_eq!(node_dataset(&nodes), dset);
    }

    #[test]
    fn test_nodes_by_id_cardinality() {
        let dset = NodeDataset::new(
            vec![4, 2, 9],
            vec![1, 1, 1],
            vec![1, 1, 1],
            vec![11, 11, 11],
            vec![0.0, 1.0, 2.0],
            vec![0.5, 1.5, 2.5],
            vec![0.0, 0.0, 0.0],
        );
        let nodes = nodes_by_id(&dset);
        assert_eq!(nodes.len(), dset.len());
        for id in nodes.keys() {
            assert!(dset.node_nums.contains(id));
        }
        assert_eq!(nodes[&2].x, 1.0);
        assert_eq!(nodes[&9].y, 2.5);
    }

    #[test]
    fn test_nodes_by_id_duplicate_keeps_last() {
        let dset = NodeDataset::new(
            vec![1, 1],
            vec![0, 0],
            vec![0, 0],
            vec![1, 1],
            vec![0.0, 5.0],
            vec![0.0, 0.0],
            vec![0.0, 0.0],
        );
        let nodes = nodes_by_id(&dset);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[&1].x, 5.0);
    }

    #[test]
    fn test_elements_by_id_merges_blocks() {
        let mut tri = ElementBlock::default();
        tri.push(1, 91, 1, 1, 7, vec![1, 2, 3]);
        tri.push(2, 91, 1, 1, 7, vec![2, 4, 3]);
        let mut quad = ElementBlock::default();
        quad.push(3, 94, 2, 1, 8, vec![3, 4, 5, 6]);

        let mut dset = ElementDataset::new();
        dset.insert(ElementShape::Triangle, tri);
        dset.insert(ElementShape::Quad, quad);

        let elems = elements_by_id(&dset);
        assert_eq!(elems.len(), 3);
        assert_eq!(elems[&2].nodes_nums, [2, 4, 3]);
        assert_eq!(elems[&2].num_nodes(), 3);
        assert_eq!(elems[&3].phys_table, 2);
        assert_eq!(elems[&3].num_nodes(), 4);
    }

    #[test]
    fn test_element_dataset_partitions_by_shape() {
        let mut elems = BTreeMap::new();
        elems.insert(10, tri_record(vec![1, 2, 3]));
        elems.insert(
            20,
            ElementRecord {
                fe_descriptor: 94,
                phys_table: 1,
                mat_table: 1,
                color: 7,
                nodes_nums: vec![1, 2, 3, 4],
            },
        );

        let dset = element_dataset(&elems);
        let tri = dset.block(ElementShape::Triangle).unwrap();
        assert_eq!(tri.element_nums, [10]);
        let quad = dset.block(ElementShape::Quad).unwrap();
        assert_eq!(quad.element_nums, [20]);
    }

    #[test]
    fn test_element_dataset_skips_other_counts() {
        let mut elems = BTreeMap::new();
        elems.insert(1, tri_record(vec![1, 2, 3]));
        elems.insert(2, tri_record(vec![1, 2, 3, 4, 5]));
        elems.insert(3, tri_record(vec![1, 2]));

        let dset = element_dataset(&elems);
        assert_eq!(dset.len(), 1);
        let tri = dset.block(ElementShape::Triangle).unwrap();
        assert_eq!(tri.element_nums, [1]);
        assert!(dset.block(ElementShape::Quad).is_none());
    }

    #[test]
    fn test_element_dataset_no_empty_blocks() {
        let mut elems = BTreeMap::new();
        elems.insert(1, tri_record(vec![1, 2, 3]));
        elems.insert(2, tri_record(vec![3, 2, 4]));

        let dset = element_dataset(&elems);
        assert!(dset.block(ElementShape::Quad).is_none());
        assert!(dset.block(ElementShape::Triangle).is_some());

        let dset = element_dataset(&BTreeMap::new());
        assert!(dset.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let mut rng = StdRng::seed_from_u64(1234);

        let mut nodes = BTreeMap::new();
        for id in 1..=100_u64 {
            nodes.insert(
                id,
                NodeRecord {
                    def_cs: rng.gen_range(0..5),
                    disp_cs: rng.gen_range(0..5),
                    color: rng.gen_range(1..16),
                    x: rng.gen::<f64>(),
                    y: rng.gen::<f64>(),
                    z: rng.gen::<f64>(),
                },
            );
        }

        let mut elems = BTreeMap::new();
        for id in 1..=50_u64 {
            let n = if rng.gen::<bool>() { 3 } else { 4 };
            let conn = (0..n).map(|_| rng.gen_range(1..=100)).collect::<Vec<_>>();
            elems.insert(
                id,
                ElementRecord {
                    fe_descriptor: if n == 3 { 91 } else { 94 },
                    phys_table: rng.gen_range(1..4),
                    mat_table: rng.gen_range(1..4),
                    color: rng.gen_range(1..16),
                    nodes_nums: conn,
                },
            );
        }

        let node_dset = node_dataset(&nodes);
        let elem_dset = element_dataset(&elems);
        assert_eq!(node_dset.len(), nodes.len());
        assert_eq!(elem_dset.len(), elems.len());

        assert_eq!(nodes_by_id(&node_dset), nodes);
        assert_eq!(elements_by_id(&elem_dset), elems);
    }
}
