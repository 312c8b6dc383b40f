use rst_common::standard::serde::{self, Deserialize};

use crate::common::types::{CommonError, ToValidate};

use super::{App, Mediator, Sds};

#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "self::serde")]
pub struct Config {
    pub(super) app: App,
    pub(super) mediator: Mediator,

    #[serde(default)]
    pub(super) sds: Sds,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn mediator(&self) -> &Mediator {
        &self.mediator
    }

    pub fn sds(&self) -> &Sds {
        &self.sds
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: App::default(),
            mediator: Mediator::default(),
            sds: Sds::default(),
        }
    }
}

impl ToValidate for Config {
    fn validate(&self) -> Result<(), CommonError> {
        _ = self.app.validate()?;
        _ = self.mediator.validate()?;
        _ = self.sds.validate()?;

        Ok(())
    }
}
