use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("results of scenario {0} already exist and overwriting was not confirmed")]
    ScenarioExists(u32),
    #[error("failure creating output {0}: {1}")]
    IoError(String, std::io::Error),
    #[error("failure writing output {0}: {1}")]
    CsvWriteError(String, csv::Error),
}
