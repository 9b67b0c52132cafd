use std::collections::BTreeMap;

/// Shape of a 2412 element block.
///
/// UNV stores the element type per element through its FE descriptor; the
/// in-memory dataset groups elements by connectivity length instead, with one
/// block per shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementShape {
    Triangle,
    Quad,
}

impl ElementShape {
    #[must_use]
    pub fn num_nodes(self) -> usize {
        match self {
            Self::Triangle => 3,
            Self::Quad => 4,
        }
    }

    #[must_use]
    pub fn from_num_nodes(n: usize) -> Option<Self> {
        match n {
            3 => Some(Self::Triangle),
            4 => Some(Self::Quad),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Triangle => "triangle",
            Self::Quad => "quad",
        }
    }
}

/// Dataset 2411: node coordinates as parallel arrays.
///
/// Index i across all arrays describes one node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeDataset {
    pub node_nums: Vec<u64>,
    pub def_cs: Vec<i32>,
    pub disp_cs: Vec<i32>,
    pub color: Vec<i32>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl NodeDataset {
    /// All arrays must have one common length.
    #[must_use]
    pub fn new(
        node_nums: Vec<u64>,
        def_cs: Vec<i32>,
        disp_cs: Vec<i32>,
        color: Vec<i32>,
        x: Vec<f64>,
        y: Vec<f64>,
        z: Vec<f64>,
    ) -> Self {
        let n = node_nums.len();
        assert_eq!(def_cs.len(), n);
        assert_eq!(disp_cs.len(), n);
        assert_eq!(color.len(), n);
        assert_eq!(x.len(), n);
        assert_eq!(y.len(), n);
        assert_eq!(z.len(), n);
        Self {
            node_nums,
            def_cs,
            disp_cs,
            color,
            x,
            y,
            z,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.node_nums.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.node_nums.is_empty()
    }
}

/// One shape block of dataset 2412: element attributes as parallel arrays,
/// with the connectivity node lists nested per element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementBlock {
    pub element_nums: Vec<u64>,
    pub fe_descriptor: Vec<i32>,
    pub phys_table: Vec<i32>,
    pub mat_table: Vec<i32>,
    pub color: Vec<i32>,
    pub nodes_nums: Vec<Vec<u64>>,
}

impl ElementBlock {
    /// All arrays must have one common length.
    #[must_use]
    pub fn new(
        element_nums: Vec<u64>,
        fe_descriptor: Vec<i32>,
        phys_table: Vec<i32>,
        mat_table: Vec<i32>,
        color: Vec<i32>,
        nodes_nums: Vec<Vec<u64>>,
    ) -> Self {
        let n = element_nums.len();
        assert_eq!(fe_descriptor.len(), n);
        assert_eq!(phys_table.len(), n);
        assert_eq!(mat_table.len(), n);
        assert_eq!(color.len(), n);
        assert_eq!(nodes_nums.len(), n);
        Self {
            element_nums,
            fe_descriptor,
            phys_table,
            mat_table,
            color,
            nodes_nums,
        }
    }

    pub fn push(
        &mut self,
        element_num: u64,
        fe_descriptor: i32,
        phys_table: i32,
        mat_table: i32,
        color: i32,
        nodes_nums: Vec<u64>,
    ) {
        self.element_nums.push(element_num);
        self.fe_descriptor.push(fe_descriptor);
        self.phys_table.push(phys_table);
        self.mat_table.push(mat_table);
        self.color.push(color);
        self.nodes_nums.push(nodes_nums);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.element_nums.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.element_nums.is_empty()
    }
}

/// Dataset 2412: element blocks grouped by shape.
///
/// Only non-empty blocks are stored; iteration is in `ElementShape` order
/// (triangles before quads).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementDataset {
    blocks: BTreeMap<ElementShape, ElementBlock>,
}

impl ElementDataset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every connectivity list in the block must match the shape's node count.
    pub fn insert(&mut self, shape: ElementShape, block: ElementBlock) {
        assert!(!block.is_empty());
        for conn in &block.nodes_nums {
            assert_eq!(conn.len(), shape.num_nodes());
        }
        self.blocks.insert(shape, block);
    }

    #[must_use]
    pub fn block(&self, shape: ElementShape) -> Option<&ElementBlock> {
        self.blocks.get(&shape)
    }

    pub fn blocks(&self) -> impl Iterator<Item = (ElementShape, &ElementBlock)> {
        self.blocks.iter().map(|(&shape, block)| (shape, block))
    }

    /// Total number of elements across all blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.values().map(ElementBlock::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
