use serde::Deserialize;
use std::fmt;

/* GET /anlagen returns a plain array of these. Every field may be absent. */
#[derive(Debug, Default, Deserialize)]
pub struct Device {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "steuereinheitnummer")]
    pub control_unit_number: String,
    #[serde(default, rename = "gehaeusenummer")]
    pub housing_number: String,
    #[serde(default, rename = "strasse")]
    pub street: String,
    #[serde(default, rename = "hausnummer")]
    pub house_number: String,
    #[serde(default, rename = "postleitzahl")]
    pub postal_code: String,
    #[serde(default, rename = "ort")]
    pub city: String,
    #[serde(default, rename = "zeitzone")]
    pub timezone: String,
    #[serde(default, rename = "systemType")]
    pub system_type: String,
}

/* One line per installation, as logged when the device id is ambiguous */
impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Id: {}, control device id: {}, housing id: {} address: {} {}, {} {}, timezone: {}, system type: {}",
            self.id,
            self.control_unit_number,
            self.housing_number,
            self.street,
            self.house_number,
            self.postal_code,
            self.city,
            self.timezone,
            self.system_type
        )
    }
}
