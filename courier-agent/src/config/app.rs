use rst_common::standard::serde::{self, Deserialize};

use crate::common::types::{CommonError, ToValidate};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "self::serde")]
pub struct App {
    pub(super) log_level: String,
}

impl App {
    pub fn get_log_level(&self) -> String {
        self.log_level.to_owned()
    }
}

impl Default for App {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl ToValidate for App {
    fn validate(&self) -> Result<(), CommonError> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(CommonError::ValidationError(format!(
                "config: app:log_level is invalid: {}",
                self.log_level
            )));
        }

        Ok(())
    }
}
