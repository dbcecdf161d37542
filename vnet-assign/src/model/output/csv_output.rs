use std::{
    fs::File,
    path::{Path, PathBuf},
};

use csv::QuoteStyle;
use flate2::{write::GzEncoder, Compression};
use itertools::Itertools;
use kdam::tqdm;
use vnet_core::model::GroupId;

use super::{AssignmentOutput, FlowRecord, OutputError, PathRecord};

/// writes `paths_<scenario>.csv.gz` and `vnet_<scenario>.csv.gz` in a directory.
#[derive(Debug, Clone)]
pub struct CsvOutput {
    pub output_directory: PathBuf,
}

impl CsvOutput {
    pub fn new(output_directory: &str) -> CsvOutput {
        CsvOutput {
            output_directory: PathBuf::from(output_directory),
        }
    }

    pub fn flows_file(&self, scenario: u32) -> PathBuf {
        self.output_directory.join(format!("vnet_{scenario}.csv.gz"))
    }

    pub fn paths_file(&self, scenario: u32) -> PathBuf {
        self.output_directory.join(format!("paths_{scenario}.csv.gz"))
    }
}

fn create_writer(filepath: &Path) -> Result<csv::Writer<GzEncoder<File>>, OutputError> {
    let file = File::create(filepath)
        .map_err(|e| OutputError::IoError(filepath.to_string_lossy().to_string(), e))?;
    let buffer = GzEncoder::new(file, Compression::default());
    let writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(buffer);
    Ok(writer)
}

fn finish(
    filepath: &Path,
    writer: csv::Writer<GzEncoder<File>>,
) -> Result<(), OutputError> {
    let name = filepath.to_string_lossy().to_string();
    let encoder = writer
        .into_inner()
        .map_err(|e| OutputError::IoError(name.clone(), e.into_error()))?;
    encoder
        .finish()
        .map_err(|e| OutputError::IoError(name, e))?;
    Ok(())
}

impl AssignmentOutput for CsvOutput {
    fn accept_scenario(&self, scenario: u32, confirm_overwrite: bool) -> Result<(), OutputError> {
        if self.flows_file(scenario).exists() && !confirm_overwrite {
            return Err(OutputError::ScenarioExists(scenario));
        }
        std::fs::create_dir_all(&self.output_directory).map_err(|e| {
            OutputError::IoError(self.output_directory.to_string_lossy().to_string(), e)
        })
    }

    fn save_paths(&mut self, scenario: u32, paths: &[PathRecord]) -> Result<(), OutputError> {
        let filepath = self.paths_file(scenario);
        let name = filepath.to_string_lossy().to_string();
        let mut writer = create_writer(&filepath)?;
        writer
            .write_record([
                "iteration", "grp", "class", "org", "dst", "slice", "qty", "cost", "links",
            ])
            .map_err(|e| OutputError::CsvWriteError(name.clone(), e))?;
        let rows = tqdm!(paths.iter(), total = paths.len(), desc = "write paths");
        for path in rows {
            writer
                .write_record([
                    path.iteration.to_string(),
                    path.group.to_string(),
                    path.od_class.to_string(),
                    path.origin.to_string(),
                    path.destination.to_string(),
                    path.time_slice.to_string(),
                    path.quantity.to_string(),
                    path.cost.to_string(),
                    path.links.iter().join(" "),
                ])
                .map_err(|e| OutputError::CsvWriteError(name.clone(), e))?;
        }
        eprintln!();
        finish(&filepath, writer)?;
        log::info!("wrote {} paths to {}", paths.len(), name);
        Ok(())
    }

    fn save_flows(
        &mut self,
        scenario: u32,
        groups: &[GroupId],
        records: &[FlowRecord],
    ) -> Result<(), OutputError> {
        let filepath = self.flows_file(scenario);
        let name = filepath.to_string_lossy().to_string();
        let mut writer = create_writer(&filepath)?;

        let mut header = [
            "node1", "link1", "mode1", "means1", "service1", "node2", "link2", "mode2", "means2",
            "service2", "time", "length",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect_vec();
        for group in groups.iter() {
            header.push(format!("ucost{group}"));
            header.push(format!("qty{group}"));
            header.push(format!("veh{group}"));
        }
        header.extend(["ucost", "qty", "veh"].iter().map(|s| s.to_string()));
        writer
            .write_record(&header)
            .map_err(|e| OutputError::CsvWriteError(name.clone(), e))?;

        let rows = tqdm!(records.iter(), total = records.len(), desc = "write flows");
        for r in rows {
            let mut row = vec![
                r.node1.to_string(),
                r.link1.to_string(),
                r.mode1.to_string(),
                r.means1.to_string(),
                r.service1.to_string(),
                r.node2.to_string(),
                r.link2.to_string(),
                r.mode2.to_string(),
                r.means2.to_string(),
                r.service2.to_string(),
                r.time.to_string(),
                r.length.to_string(),
            ];
            for g in r.groups.iter() {
                row.push(g.unit_cost.to_string());
                row.push(g.quantity.to_string());
                row.push(g.vehicles.to_string());
            }
            row.push(r.unit_cost.to_string());
            row.push(r.quantity.to_string());
            row.push(r.vehicles.to_string());
            writer
                .write_record(&row)
                .map_err(|e| OutputError::CsvWriteError(name.clone(), e))?;
        }
        eprintln!();
        finish(&filepath, writer)?;
        log::info!("wrote {} flow records to {}", records.len(), name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use flate2::read::GzDecoder;
    use vnet_core::model::{LinkId, NodeId};

    use super::*;
    use crate::model::output::GroupFlowValues;

    fn read_gz(path: &Path) -> String {
        let mut decoder = GzDecoder::new(File::open(path).unwrap());
        let mut s = String::new();
        decoder.read_to_string(&mut s).unwrap();
        s
    }

    #[test]
    fn test_flows_file_shape() {
        let dir = std::env::temp_dir().join(format!("vnet_csv_output_{}", std::process::id()));
        let mut output = CsvOutput::new(dir.to_str().unwrap());
        output.accept_scenario(7, false).unwrap();
        let record = FlowRecord {
            link: 0,
            node1: NodeId(1),
            link1: LinkId(10),
            mode1: 1,
            means1: 1,
            service1: 0,
            node2: NodeId(2),
            link2: LinkId(10),
            mode2: 1,
            means2: 1,
            service2: 0,
            time: 0,
            length: 2.5,
            groups: vec![
                GroupFlowValues {
                    unit_cost: 2.0,
                    quantity: 30.0,
                    vehicles: 2,
                },
                GroupFlowValues {
                    unit_cost: 4.0,
                    quantity: 10.0,
                    vehicles: 1,
                },
            ],
            unit_cost: 2.5,
            quantity: 40.0,
            vehicles: 3,
        };
        output
            .save_flows(7, &[GroupId(0), GroupId(5)], &[record])
            .unwrap();
        let content = read_gz(&output.flows_file(7));
        let lines = content.lines().collect_vec();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "node1,link1,mode1,means1,service1,node2,link2,mode2,means2,service2,time,length,ucost0,qty0,veh0,ucost5,qty5,veh5,ucost,qty,veh"
        );
        assert_eq!(lines[1], "1,10,1,1,0,2,10,1,1,0,0,2.5,2,30,2,4,10,1,2.5,40,3");

        assert!(matches!(
            output.accept_scenario(7, false),
            Err(OutputError::ScenarioExists(7))
        ));
        assert!(output.accept_scenario(7, true).is_ok());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
