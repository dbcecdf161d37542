use std::path::Path;

use vnet_core::model::{Exclusion, ExclusionSet, ANY};

use super::{ExclusionError, ExclusionReader};

/// reads exclusion rules from a CSV file with columns
/// `grp,num,mode1,means1,mode2,means2`. a missing file means no exclusions.
#[derive(Debug, Clone)]
pub struct CsvExclusionReader {
    pub exclusions_file: Option<String>,
}

impl CsvExclusionReader {
    pub fn new(exclusions_file: Option<String>) -> CsvExclusionReader {
        CsvExclusionReader { exclusions_file }
    }
}

impl ExclusionReader for CsvExclusionReader {
    fn has_exclusions(&self) -> bool {
        self.exclusions_file
            .as_ref()
            .is_some_and(|f| Path::new(f).exists())
    }

    fn load_exclusions(&self) -> Result<ExclusionSet, ExclusionError> {
        let Some(file) = &self.exclusions_file else {
            return Ok(ExclusionSet::default());
        };
        let mut reader = csv::Reader::from_path(file)
            .map_err(|e| ExclusionError::CsvReadError(file.clone(), e))?;
        let mut rules = vec![];
        for row in reader.deserialize::<Exclusion>() {
            let rule = row.map_err(|e| ExclusionError::CsvReadError(file.clone(), e))?;
            for (name, value) in [
                ("group", rule.group),
                ("mode1", rule.mode1),
                ("means1", rule.means1),
                ("mode2", rule.mode2),
                ("means2", rule.means2),
            ] {
                if value < ANY {
                    return Err(ExclusionError::InvalidField(
                        rule.node,
                        name.to_string(),
                        value,
                    ));
                }
            }
            if rule.node.0 < i64::from(ANY) {
                return Err(ExclusionError::InvalidNode(rule.node));
            }
            rules.push(rule);
        }
        Ok(ExclusionSet::new(rules))
    }
}
