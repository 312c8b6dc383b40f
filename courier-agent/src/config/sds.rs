use rst_common::standard::serde::{self, Deserialize};

use prople_courier_core::identity::sds::types::SyncOptions;

use crate::common::types::{CommonError, ToValidate};

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(crate = "self::serde")]
pub struct Sds {
    #[serde(default)]
    pub(super) server_url: Option<String>,
}

impl Sds {
    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions::new(self.server_url.to_owned())
    }
}

impl ToValidate for Sds {
    fn validate(&self) -> Result<(), CommonError> {
        let url = match &self.server_url {
            Some(url) if !url.is_empty() => url,
            _ => return Ok(()),
        };

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(CommonError::ValidationError(format!(
                "config: sds:server_url must be an http url: {}",
                url
            )));
        }

        Ok(())
    }
}
