use kdam::tqdm;
use serde::Deserialize;
use vnet_core::model::{LinkId, Means, Mode, NodeId, ServiceId};

use super::{BaseNetwork, NetworkError, RealLink, RealNode};

#[derive(Deserialize)]
struct NodeRow {
    num: i64,
    x: f64,
    y: f64,
    #[serde(default)]
    transship: u8,
}

#[derive(Deserialize)]
struct LinkRow {
    num: i64,
    node1: i64,
    node2: i64,
    mode: Mode,
    means: Means,
    length: f64,
    #[serde(default)]
    service: ServiceId,
    #[serde(default)]
    oneway: u8,
}

/// reads the base network from a nodes file (`num,x,y[,transship]`) and a
/// links file (`num,node1,node2,mode,means,length[,service][,oneway]`).
pub fn read_base_network(nodes_file: &str, links_file: &str) -> Result<BaseNetwork, NetworkError> {
    let mut nodes_reader = csv::Reader::from_path(nodes_file)
        .map_err(|e| NetworkError::CsvReadError(nodes_file.to_string(), e))?;
    let nodes_iter = tqdm!(nodes_reader.deserialize::<NodeRow>(), desc = "read nodes");
    let mut nodes = vec![];
    for row in nodes_iter {
        let row = row.map_err(|e| NetworkError::CsvReadError(nodes_file.to_string(), e))?;
        nodes.push(RealNode {
            id: NodeId(row.num),
            x: row.x,
            y: row.y,
            transhipment: row.transship != 0,
        });
    }
    eprintln!();

    let mut links_reader = csv::Reader::from_path(links_file)
        .map_err(|e| NetworkError::CsvReadError(links_file.to_string(), e))?;
    let links_iter = tqdm!(links_reader.deserialize::<LinkRow>(), desc = "read links");
    let mut links = vec![];
    for row in links_iter {
        let row = row.map_err(|e| NetworkError::CsvReadError(links_file.to_string(), e))?;
        links.push(RealLink {
            id: LinkId(row.num),
            node1: NodeId(row.node1),
            node2: NodeId(row.node2),
            mode: row.mode,
            means: row.means,
            service: row.service,
            length: row.length,
            oneway: row.oneway != 0,
        });
    }
    eprintln!();

    log::info!(
        "read base network with {} nodes and {} links",
        nodes.len(),
        links.len()
    );
    BaseNetwork::new(nodes, links)
}
