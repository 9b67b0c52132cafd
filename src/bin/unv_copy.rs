use log::info;

use miniunv::reader::UnvReader;
use miniunv::records::{element_dataset, elements_by_id, node_dataset, nodes_by_id};
use miniunv::writer::UnvWriter;
use miniunv::{Error, Result};

/// Copy the first node and element datasets of a UNV file through the by-ID
/// record form, overwriting the output file.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(input), Some(output)) = (args.next(), args.next()) else {
        return Err(Error::from("usage: unv_copy <input.unv> <output.unv>"));
    };

    let mut reader = UnvReader::new(&input)?;
    let nodes = nodes_by_id(&reader.read_nodes()?);
    let elems = elements_by_id(&reader.read_elements()?);
    info!("{}: {} nodes, {} elements", input, nodes.len(), elems.len());

    let mut writer = UnvWriter::new(&output)?;
    writer.write_nodes(&node_dataset(&nodes))?;
    writer.write_elements(&element_dataset(&elems))?;
    writer.close()
}
