use log::debug;

use crate::{ElementDataset, Error, NodeDataset, Result};
use std::{
    fs::File,
    io::{BufWriter, Write},
};

#[derive(Debug)]
pub struct UnvWriter {
    writer: BufWriter<File>,
}

impl UnvWriter {
    /// The file is truncated: existing datasets are overwritten.
    pub fn new(fname: &str) -> Result<Self> {
        if !fname.ends_with(".unv") {
            return Err(Error::from(&format!("Invalid file extension for {fname}")));
        }

        debug!("create {fname} (ascii)");
        let file = File::create(fname)?;

        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    fn write_delimiter(&mut self) -> Result<()> {
        writeln!(self.writer, "{:>6}", -1)?;
        Ok(())
    }

    /// Write one 2411 dataset.
    pub fn write_nodes(&mut self, dset: &NodeDataset) -> Result<()> {
        debug!("write {} nodes", dset.len());

        self.write_delimiter()?;
        writeln!(self.writer, "{:>6}", 2411)?;

        for i in 0..dset.len() {
            writeln!(
                self.writer,
                "{:>10}{:>10}{:>10}{:>10}",
                dset.node_nums[i], dset.def_cs[i], dset.disp_cs[i], dset.color[i]
            )?;
            writeln!(
                self.writer,
                "{:>25.16e}{:>25.16e}{:>25.16e}",
                dset.x[i], dset.y[i], dset.z[i]
            )?;
        }

        self.write_delimiter()
    }

    /// Write one 2412 dataset covering every block, triangles before quads.
    pub fn write_elements(&mut self, dset: &ElementDataset) -> Result<()> {
        debug!("write {} elements", dset.len());

        self.write_delimiter()?;
        writeln!(self.writer, "{:>6}", 2412)?;

        let mut line = String::new();
        for (shape, block) in dset.blocks() {
            debug!("write {} {} elements", block.len(), shape.name());
            for i in 0..block.len() {
                let conn = &block.nodes_nums[i];
                writeln!(
                    self.writer,
                    "{:>10}{:>10}{:>10}{:>10}{:>10}{:>10}",
                    block.element_nums[i],
                    block.fe_descriptor[i],
                    block.phys_table[i],
                    block.mat_table[i],
                    block.color[i],
                    conn.len()
                )?;
                for chunk in conn.chunks(8) {
                    line.clear();
                    for n in chunk {
                        line += &format!("{n:>10}");
                    }
                    writeln!(self.writer, "{}", &line)?;
                }
            }
        }

        self.write_delimiter()
    }

    pub fn close(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
