use crate::quiz::*;

use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputSettings {
    #[serde(rename = "runName")]
    pub run_name: Option<String>,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "idColumn")]
    pub id_column: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

impl ResponseSource {
    pub fn id_column(&self) -> &str {
        self.id_column.as_deref().unwrap_or(DEFAULT_ID_COLUMN)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "quizPath")]
    pub quiz_path: Option<String>,
    #[serde(rename = "responseSources", default)]
    pub response_sources: Vec<ResponseSource>,
}

/// The supported formats for files of answers.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    Json,
    Csv,
    Xlsx,
}

impl InputType {
    pub fn from_provider(provider: &str) -> QuizResult<InputType> {
        match provider.to_ascii_lowercase().as_str() {
            "json" => Ok(InputType::Json),
            "csv" => Ok(InputType::Csv),
            "xlsx" | "excel" => Ok(InputType::Xlsx),
            _ => UnknownProviderSnafu { provider }.fail(),
        }
    }

    /// Guesses the provider from the extension of the file.
    pub fn guess_provider(path: &str) -> Option<&'static str> {
        let ext = Path::new(path).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some("json"),
            "csv" => Some("csv"),
            "xlsx" => Some("xlsx"),
            _ => None,
        }
    }
}

pub fn read_run_config(path: &str) -> QuizResult<RunConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: RunConfig =
        serde_json::from_str(&contents).context(ParsingJsonSnafu { path })?;
    info!("read_run_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> QuizResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_summary: content: {:?}", contents);
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_run_config() {
        let js = r#"{
            "outputSettings": {"runName": "classroom"},
            "responseSources": [
                {"provider": "csv", "filePath": "answers.csv", "idColumn": "student"},
                {"provider": "xlsx", "filePath": "forms.xlsx", "excelWorksheetName": "Form1"}
            ]
        }"#;
        let config: RunConfig = serde_json::from_str(js).unwrap();
        assert_eq!(config.output_settings.run_name, Some("classroom".to_string()));
        assert_eq!(config.output_settings.output_path, None);
        assert_eq!(config.quiz_path, None);
        assert_eq!(config.response_sources.len(), 2);
        assert_eq!(config.response_sources[0].id_column(), "student");
        assert_eq!(config.response_sources[1].id_column(), DEFAULT_ID_COLUMN);
        assert_eq!(
            config.response_sources[1].excel_worksheet_name,
            Some("Form1".to_string())
        );
    }

    #[test]
    fn providers() {
        assert_eq!(InputType::from_provider("CSV").unwrap(), InputType::Csv);
        assert_eq!(InputType::from_provider("excel").unwrap(), InputType::Xlsx);
        assert!(matches!(
            InputType::from_provider("dominion"),
            Err(QuizError::UnknownProvider { .. })
        ));
        assert_eq!(InputType::guess_provider("a/b/answers.JSON"), Some("json"));
        assert_eq!(InputType::guess_provider("answers.xlsx"), Some("xlsx"));
        assert_eq!(InputType::guess_provider("answers"), None);
    }
}
