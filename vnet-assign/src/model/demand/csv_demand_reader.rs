use kdam::tqdm;
use serde::Deserialize;
use vnet_core::model::{GroupId, NodeId, OdClass};

use crate::model::virtual_network::VirtualNetwork;

use super::{DemandCell, DemandError, DemandReader};

#[derive(Deserialize)]
struct DemandRow {
    grp: u16,
    org: i64,
    dst: i64,
    qty: f64,
    #[serde(default)]
    class: u8,
    #[serde(default)]
    slice: usize,
}

/// reads the OD matrix from a CSV file with columns `grp,org,dst,qty[,class][,slice]`.
#[derive(Debug, Clone)]
pub struct CsvDemandReader {
    pub demand_file: String,
}

impl CsvDemandReader {
    pub fn new(demand_file: &str) -> CsvDemandReader {
        CsvDemandReader {
            demand_file: demand_file.to_string(),
        }
    }

    pub fn read_cells(&self) -> Result<Vec<DemandCell>, DemandError> {
        let mut reader = csv::Reader::from_path(&self.demand_file)
            .map_err(|e| DemandError::CsvReadError(self.demand_file.clone(), e))?;
        let rows = tqdm!(reader.deserialize::<DemandRow>(), desc = "read demand");
        let mut cells = vec![];
        for row in rows {
            let row = row.map_err(|e| DemandError::CsvReadError(self.demand_file.clone(), e))?;
            cells.push(DemandCell {
                group: GroupId(row.grp),
                od_class: OdClass(row.class),
                origin: NodeId(row.org),
                destination: NodeId(row.dst),
                quantity: row.qty,
                time_slice: row.slice,
            });
        }
        eprintln!();
        log::info!("read {} demand rows from {}", cells.len(), self.demand_file);
        Ok(cells)
    }
}

impl DemandReader for CsvDemandReader {
    fn load_demand(&self, vnet: &mut VirtualNetwork) -> Result<(), DemandError> {
        let cells = self.read_cells()?;
        vnet.load_demand_cells(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_cells_with_optional_columns() {
        let dir = std::env::temp_dir().join(format!("vnet_demand_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("od.csv");
        std::fs::write(&file, "grp,org,dst,qty\n0,1,2,100\n3,2,1,12.5\n").unwrap();
        let reader = CsvDemandReader::new(file.to_str().unwrap());
        let cells = reader.read_cells().unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0], DemandCell::new(0, 1, 2, 100.0));
        assert_eq!(cells[1].group, GroupId(3));
        assert_eq!(cells[1].od_class, OdClass(0));
        assert_eq!(cells[1].time_slice, 0);

        std::fs::write(&file, "grp,org,dst,qty,class,slice\n1,1,2,5,2,1\n").unwrap();
        let cells = reader.read_cells().unwrap();
        assert_eq!(cells[0], DemandCell::new(1, 1, 2, 5.0).with_od_class(2).with_time_slice(1));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let reader = CsvDemandReader::new("does/not/exist.csv");
        assert!(matches!(
            reader.read_cells(),
            Err(DemandError::CsvReadError(_, _))
        ));
    }
}
