use log::{debug, warn};

use crate::{ElementBlock, ElementDataset, ElementShape, Error, NodeDataset, Result};
use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader, Seek, SeekFrom},
};

/// Rod and beam descriptors carry an extra orientation record before the
/// connectivity list.
fn has_orientation_record(fe_descriptor: i32) -> bool {
    matches!(fe_descriptor, 11 | 21 | 22 | 23 | 24)
}

/// Fortran-style `D` exponents appear in files written by I-deas.
fn parse_float(s: &str) -> f64 {
    if s.contains(['D', 'd']) {
        s.replace(['D', 'd'], "E").parse().unwrap()
    } else {
        s.parse().unwrap()
    }
}

#[derive(Debug)]
pub struct UnvReader {
    offsets: HashMap<u16, Vec<u64>>,
    reader: BufReader<File>,
}

impl UnvReader {
    pub fn new(fname: &str) -> Result<Self> {
        if !fname.ends_with(".unv") {
            return Err(Error::from(&format!("Invalid file extension for {fname}")));
        }

        debug!("parse {fname} (ascii)");
        let mut offsets: HashMap<u16, Vec<u64>> = HashMap::new();

        let file = File::open(fname)?;
        let mut reader = BufReader::new(file);
        let mut line = String::new();
        let mut in_set = false;
        let mut expect_number = false;
        while reader.read_line(&mut line)? > 0 {
            let trimmed_line = line.trim();
            if trimmed_line == "-1" {
                if in_set {
                    in_set = false;
                } else {
                    in_set = true;
                    expect_number = true;
                }
            } else if expect_number {
                expect_number = false;
                match trimmed_line.parse::<u16>() {
                    Ok(number) => {
                        debug!("found dataset {number}");
                        offsets
                            .entry(number)
                            .or_default()
                            .push(reader.stream_position().unwrap());
                    }
                    Err(_) => debug!("skip dataset {trimmed_line}"),
                }
            }
            line.clear();
        }

        reader.rewind()?;

        Ok(Self { offsets, reader })
    }

    /// The dataset numbers present in the file, in no particular order.
    #[must_use]
    pub fn dataset_numbers(&self) -> Vec<u16> {
        self.offsets.keys().copied().collect()
    }

    /// Number of datasets with this number.
    #[must_use]
    pub fn n_sets(&self, number: u16) -> usize {
        self.offsets.get(&number).map_or(0, Vec::len)
    }

    fn goto_set(&mut self, number: u16, setn: usize) -> Result<()> {
        let offset = self
            .offsets
            .get(&number)
            .and_then(|sets| sets.get(setn))
            .copied()
            .ok_or_else(|| Error::from(&format!("Unable to get dataset {number} (set {setn})")))?;
        self.reader.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    fn next_record(&mut self, line: &mut String) -> Result<()> {
        loop {
            line.clear();
            let len = self.reader.read_line(line)?;
            assert_ne!(len, 0);
            if !line.trim().is_empty() {
                return Ok(());
            }
        }
    }

    /// Read the first 2411 dataset.
    pub fn read_nodes(&mut self) -> Result<NodeDataset> {
        self.read_nodes_at(0)
    }

    /// Read the `setn`-th 2411 dataset.
    pub fn read_nodes_at(&mut self, setn: usize) -> Result<NodeDataset> {
        self.goto_set(2411, setn)?;

        let mut node_nums = Vec::new();
        let mut def_cs = Vec::new();
        let mut disp_cs = Vec::new();
        let mut color = Vec::new();
        let mut x = Vec::new();
        let mut y = Vec::new();
        let mut z = Vec::new();

        let mut line = String::new();
        loop {
            self.next_record(&mut line)?;
            if line.trim() == "-1" {
                break;
            }
            let mut fields = line.split_whitespace();
            node_nums.push(fields.next().unwrap().parse().unwrap());
            def_cs.push(fields.next().unwrap().parse().unwrap());
            disp_cs.push(fields.next().unwrap().parse().unwrap());
            color.push(fields.next().unwrap().parse().unwrap());

            self.next_record(&mut line)?;
            let mut fields = line.split_whitespace();
            x.push(parse_float(fields.next().unwrap()));
            y.push(parse_float(fields.next().unwrap()));
            z.push(parse_float(fields.next().unwrap()));
        }
        debug!("read {} nodes", node_nums.len());

        Ok(NodeDataset::new(node_nums, def_cs, disp_cs, color, x, y, z))
    }

    /// Read the first 2412 dataset.
    pub fn read_elements(&mut self) -> Result<ElementDataset> {
        self.read_elements_at(0)
    }

    /// Read the `setn`-th 2412 dataset.
    ///
    /// Elements whose connectivity length is neither 3 nor 4 are skipped
    /// with a warning.
    pub fn read_elements_at(&mut self, setn: usize) -> Result<ElementDataset> {
        self.goto_set(2412, setn)?;

        let mut tri = ElementBlock::default();
        let mut quad = ElementBlock::default();

        let mut line = String::new();
        loop {
            self.next_record(&mut line)?;
            if line.trim() == "-1" {
                break;
            }
            let mut fields = line.split_whitespace();
            let element_num: u64 = fields.next().unwrap().parse().unwrap();
            let fe_descriptor: i32 = fields.next().unwrap().parse().unwrap();
            let phys_table: i32 = fields.next().unwrap().parse().unwrap();
            let mat_table: i32 = fields.next().unwrap().parse().unwrap();
            let color: i32 = fields.next().unwrap().parse().unwrap();
            let num_nodes: usize = fields.next().unwrap().parse().unwrap();

            if has_orientation_record(fe_descriptor) {
                self.next_record(&mut line)?;
            }

            let mut nodes_nums = Vec::with_capacity(num_nodes);
            while nodes_nums.len() < num_nodes {
                self.next_record(&mut line)?;
                for v in line.split_whitespace() {
                    nodes_nums.push(v.parse().unwrap());
                }
            }

            match ElementShape::from_num_nodes(nodes_nums.len()) {
                Some(ElementShape::Triangle) => {
                    tri.push(
                        element_num,
                        fe_descriptor,
                        phys_table,
                        mat_table,
                        color,
                        nodes_nums,
                    );
                }
                Some(ElementShape::Quad) => {
                    quad.push(
                        element_num,
                        fe_descriptor,
                        phys_table,
                        mat_table,
                        color,
                        nodes_nums,
                    );
                }
                None => warn!(
                    "element {element_num} has {} nodes, neither triangle nor quad: skipped",
                    nodes_nums.len()
                ),
            }
        }

        let mut dset = ElementDataset::new();
        if !tri.is_empty() {
            dset.insert(ElementShape::Triangle, tri);
        }
        if !quad.is_empty() {
            dset.insert(ElementShape::Quad, quad);
        }
        debug!("read {} elements", dset.len());

        Ok(dset)
    }
}
